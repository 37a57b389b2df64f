//! Per-cast context handed to every effect.
//!
//! `Mechanics` answers "what is being cast, how, by whom, and onto which
//! battlefield". Effects never store it; they receive it on every call.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::battle::{BattleInfo, Unit};
use crate::core::{BattleSide, CreatureId, Mode, SpellId, SpellLevel, UnitId};

/// Context of one cast.
pub trait Mechanics {
    /// Mastery level the cast resolves at.
    fn effect_level(&self) -> SpellLevel;

    /// Identity of the spell being cast.
    fn spell_id(&self) -> SpellId;

    /// What triggered the cast.
    fn mode(&self) -> Mode;

    /// Side the caster fights for.
    fn caster_side(&self) -> BattleSide;

    /// Base magnitude of the cast (damage, heal amount, summon size...).
    fn effect_value(&self) -> i64;

    /// The battlefield the cast happens on.
    fn battle(&self) -> &dyn BattleInfo;

    /// Hit points of one creature of the given kind, if known.
    fn creature_health(&self, creature: CreatureId) -> Option<i32>;

    /// Whether `unit` ignores this spell entirely.
    fn is_immune(&self, _unit: &Unit) -> bool {
        false
    }
}

/// Ready-made `Mechanics` over any `BattleInfo`.
///
/// ```
/// use spell_engine::battle::BattleState;
/// use spell_engine::core::{Mode, SpellId, SpellLevel};
/// use spell_engine::spells::{CastMechanics, Mechanics};
///
/// let state = BattleState::new();
/// let m = CastMechanics::new(&state, SpellId::CURE, SpellLevel::EXPERT)
///     .with_mode(Mode::CreatureActive)
///     .with_effect_value(30);
///
/// assert_eq!(m.effect_level(), SpellLevel::EXPERT);
/// assert_eq!(m.effect_value(), 30);
/// ```
pub struct CastMechanics<'a> {
    battle: &'a dyn BattleInfo,
    spell: SpellId,
    level: SpellLevel,
    mode: Mode,
    caster_side: BattleSide,
    effect_value: i64,
    creature_health: FxHashMap<CreatureId, i32>,
    immune: FxHashSet<UnitId>,
}

impl<'a> CastMechanics<'a> {
    /// Hero cast by the attacker with zero power.
    pub fn new(battle: &'a dyn BattleInfo, spell: SpellId, level: SpellLevel) -> Self {
        Self {
            battle,
            spell,
            level,
            mode: Mode::Hero,
            caster_side: BattleSide::Attacker,
            effect_value: 0,
            creature_health: FxHashMap::default(),
            immune: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_caster_side(mut self, side: BattleSide) -> Self {
        self.caster_side = side;
        self
    }

    #[must_use]
    pub fn with_effect_value(mut self, value: i64) -> Self {
        self.effect_value = value;
        self
    }

    /// Declare the per-creature health of a creature kind.
    #[must_use]
    pub fn with_creature(mut self, creature: CreatureId, health: i32) -> Self {
        self.creature_health.insert(creature, health);
        self
    }

    /// Make a unit immune to this cast.
    #[must_use]
    pub fn with_immune(mut self, unit: UnitId) -> Self {
        self.immune.insert(unit);
        self
    }
}

impl Mechanics for CastMechanics<'_> {
    fn effect_level(&self) -> SpellLevel {
        self.level
    }

    fn spell_id(&self) -> SpellId {
        self.spell
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn caster_side(&self) -> BattleSide {
        self.caster_side
    }

    fn effect_value(&self) -> i64 {
        self.effect_value
    }

    fn battle(&self) -> &dyn BattleInfo {
        self.battle
    }

    fn creature_health(&self, creature: CreatureId) -> Option<i32> {
        self.creature_health.get(&creature).copied()
    }

    fn is_immune(&self, unit: &Unit) -> bool {
        self.immune.contains(&unit.id)
    }
}
