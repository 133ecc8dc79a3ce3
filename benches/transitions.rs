use criterion::{black_box, criterion_group, criterion_main, Criterion};

use parlor_rules::core::{GameRng, WhotConfig};
use parlor_rules::ludo::{self, LudoColor, TokenPosition};
use parlor_rules::mancala;
use parlor_rules::opponent::{OpponentPolicy, UniformOpponent};
use parlor_rules::rules::RulesEngine;
use parlor_rules::whot::{self, RuleVersion, WhotEngine};

fn bench_mancala(c: &mut Criterion) {
    let state = mancala::initialize();
    c.bench_function("mancala_apply_move", |b| {
        b.iter(|| mancala::apply_move(black_box(&state), black_box(2)))
    });
}

fn bench_ludo(c: &mut Criterion) {
    use TokenPosition::{House, Track};
    let state = ludo::initialize(LudoColor::Red, LudoColor::Blue)
        .unwrap()
        .with_tokens(parlor_rules::PlayerId::new(0), [Track(3), Track(20), House, Track(49)]);
    let rolled = ludo::roll_dice_with(&state, [6, 4]);
    c.bench_function("ludo_get_valid_moves", |b| {
        b.iter(|| ludo::get_valid_moves(black_box(&rolled)))
    });
}

fn bench_whot_playout(c: &mut Criterion) {
    let engine = WhotEngine;
    c.bench_function("whot_random_playout", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(17);
            let mut state = whot::initialize(&["a", "b", "c", "d"], &WhotConfig::new(RuleVersion::Rule1, 5), &mut rng)
                .unwrap()
                .state;
            for _ in 0..300 {
                let Some(mv) = UniformOpponent.choose_move(&engine, &state, &mut rng) else {
                    break;
                };
                state = engine.apply_move(&state, &mv).unwrap();
                if state.winner.is_some() {
                    break;
                }
            }
            black_box(state)
        })
    });
}

criterion_group!(benches, bench_mancala, bench_ludo, bench_whot_playout);
criterion_main!(benches);
