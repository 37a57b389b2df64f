//! Effect type registry.
//!
//! Maps an effect *type name* from configuration (`"damage"`, `"heal"`...)
//! to a factory producing fresh effects of that kind. The registry is
//! filled once at startup and then only read: bundles take it by reference
//! while loading, so there is no hidden global to initialize.
//!
//! ```
//! use spell_engine::core::SpellLevel;
//! use spell_engine::effects::EffectRegistry;
//!
//! let registry = EffectRegistry::with_builtin_effects();
//!
//! let effect = registry.create("damage", SpellLevel::BASIC).unwrap();
//! assert_eq!(effect.type_name(), "damage");
//! assert!(registry.find("fireworks").is_none());
//! ```

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::SpellLevel;

use super::effect::Effect;
use super::{Damage, Dispel, Heal, Summon, Timed};

/// Builds new effects of one kind.
pub trait EffectFactory: Send + Sync {
    fn create(&self, level: SpellLevel) -> Box<dyn Effect>;
}

impl<F> EffectFactory for F
where
    F: Fn(SpellLevel) -> Box<dyn Effect> + Send + Sync,
{
    fn create(&self, level: SpellLevel) -> Box<dyn Effect> {
        self(level)
    }
}

/// An effect kind that knows its own registry name.
pub trait EffectType: Effect + Sized + 'static {
    const TYPE_NAME: &'static str;

    /// A fresh, default-configured effect for `level`.
    fn with_level(level: SpellLevel) -> Self;
}

/// Registry of effect factories keyed by type name.
#[derive(Default)]
pub struct EffectRegistry {
    factories: FxHashMap<String, Box<dyn EffectFactory>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in effect kind.
    #[must_use]
    pub fn with_builtin_effects() -> Self {
        let mut registry = Self::new();
        registry.register_type::<Damage>();
        registry.register_type::<Heal>();
        registry.register_type::<Summon>();
        registry.register_type::<Timed>();
        registry.register_type::<Dispel>();
        registry
    }

    /// Bind a type name to a factory.
    ///
    /// Registering a name twice replaces the earlier factory (last
    /// registration wins). Returns `true` if something was replaced.
    pub fn register(&mut self, type_name: impl Into<String>, factory: impl EffectFactory + 'static) -> bool {
        let type_name = type_name.into();
        let replaced = self.factories.insert(type_name.clone(), Box::new(factory)).is_some();
        if replaced {
            debug!(effect_type = %type_name, "effect type re-registered, replacing previous factory");
        }
        replaced
    }

    /// Register an `EffectType` under its own name.
    pub fn register_type<T: EffectType>(&mut self) -> bool {
        self.register(T::TYPE_NAME, |level: SpellLevel| Box::new(T::with_level(level)) as Box<dyn Effect>)
    }

    /// Look up a factory. Unknown names are `None`, never an error.
    #[must_use]
    pub fn find(&self, type_name: &str) -> Option<&dyn EffectFactory> {
        self.factories.get(type_name).map(|f| f.as_ref())
    }

    /// Build an effect of the named kind.
    #[must_use]
    pub fn create(&self, type_name: &str, level: SpellLevel) -> Option<Box<dyn Effect>> {
        self.find(type_name).map(|f| f.create(level))
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
