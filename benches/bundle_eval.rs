use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use spell_engine::battle::{BattleInfo, BattleState, PacketLog, Unit};
use spell_engine::core::{BattleHex, BattleRng, BattleSide, CreatureId, SpellId, SpellLevel, UnitId};
use spell_engine::effects::{EffectBundle, EffectRegistry};
use spell_engine::spells::{cast, CastMechanics, Destination, Problem, Target};

fn crowded_battle() -> BattleState {
    let mut state = BattleState::new();
    let mut id = 0;
    // Two full columns per side
    for (side, columns) in [(BattleSide::Attacker, [1, 2]), (BattleSide::Defender, [14, 15])] {
        for x in columns {
            for y in 0..11 {
                let hex = BattleHex::from_xy(x, y).expect("hex on field");
                state.add_unit(Unit::new(UnitId(id), CreatureId(7), side, hex, 20, 30));
                id += 1;
            }
        }
    }
    state
}

fn storm_bundle() -> EffectBundle {
    let registry = EffectRegistry::with_builtin_effects();
    let mut bundle = EffectBundle::new();
    bundle
        .load_json(
            &registry,
            SpellLevel::EXPERT,
            &json!({
                "blast": { "type": "damage", "variance": 20 },
                "chain": { "type": "damage", "chainLength": 5, "optional": true },
                "dispel": { "type": "dispel", "optional": true },
                "slow": { "type": "timed", "statuses": [54], "duration": 3 }
            }),
        )
        .expect("bench config is an object");
    bundle
}

fn bench_applicable(c: &mut Criterion) {
    let state = crowded_battle();
    let bundle = storm_bundle();
    let target: Target = state.units().map(Destination::unit).collect();
    let m = CastMechanics::new(&state, SpellId(23), SpellLevel::EXPERT).with_effect_value(50);

    c.bench_function("bundle_applicable", |b| {
        b.iter(|| black_box(bundle.applicable(&mut Problem::new(), &m)))
    });

    c.bench_function("bundle_applicable_at", |b| {
        b.iter(|| black_box(bundle.applicable_at(&mut Problem::new(), &m, &target, &target)))
    });
}

fn bench_prepare(c: &mut Criterion) {
    let state = crowded_battle();
    let bundle = storm_bundle();
    let target: Target = state.units().map(Destination::unit).collect();
    let m = CastMechanics::new(&state, SpellId(23), SpellLevel::EXPERT).with_effect_value(50);

    c.bench_function("bundle_prepare", |b| {
        b.iter(|| black_box(bundle.prepare(&m, &target, &target).len()))
    });
}

fn bench_cast(c: &mut Criterion) {
    let state = crowded_battle();
    let bundle = storm_bundle();
    let target: Target = state.units().map(Destination::unit).collect();
    let m = CastMechanics::new(&state, SpellId(23), SpellLevel::EXPERT).with_effect_value(50);

    c.bench_function("cast_networked", |b| {
        b.iter(|| {
            let mut log = PacketLog::new();
            let applied = cast(&bundle, &m, &target, &target, &mut BattleRng::new(3), &mut log);
            black_box((applied.is_ok(), log.len()))
        })
    });
}

criterion_group!(benches, bench_applicable, bench_prepare, bench_cast);
criterion_main!(benches);
