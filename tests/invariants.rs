//! Property tests over whole runs driven by random input

use aircraft_shooter::consts::{ENEMY_SPAWN_FLOOR_MS, TICK_MS};
use aircraft_shooter::rects_overlap;
use aircraft_shooter::sim::{GamePhase, GameState, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 5]>(), prop::option::of(0usize..4)).prop_map(|(held, select)| TickInput {
        left: held[0],
        right: held[1],
        up: held[2],
        down: held[3],
        fire: held[4],
        select_weapon: select,
        start: true,
        restart: false,
    })
}

fn running(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Vec2::new(800.0, 600.0));
    tick(&mut state, &TickInput { start: true, ..Default::default() }, TICK_MS);
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_health_and_player_stay_in_bounds(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = running(seed);
        for input in &inputs {
            tick(&mut state, input, TICK_MS);

            prop_assert!(state.health <= state.max_health);
            prop_assert_eq!(state.health == 0, state.phase == GamePhase::GameOver);

            let p = &state.player;
            prop_assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= state.viewport.x);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y + p.size.y <= state.viewport.y);
            prop_assert!(state.weapon_index < 3);
            prop_assert!(state.particles.len() <= state.max_particles);
        }
    }

    #[test]
    fn test_spawn_interval_never_increases(
        seed in any::<u64>(),
        ticks in 1usize..3000,
    ) {
        let mut state = running(seed);
        let mut previous = state.enemy_spawn_interval_ms;
        let idle = TickInput::default();
        for _ in 0..ticks {
            tick(&mut state, &idle, TICK_MS);
            if state.phase != GamePhase::Running {
                break;
            }
            prop_assert!(state.enemy_spawn_interval_ms <= previous);
            prop_assert!(state.enemy_spawn_interval_ms >= ENEMY_SPAWN_FLOOR_MS);
            previous = state.enemy_spawn_interval_ms;
        }
    }

    #[test]
    fn test_overlap_symmetric(
        ax in -50.0f32..50.0, ay in -50.0f32..50.0,
        bx in -50.0f32..50.0, by in -50.0f32..50.0,
        aw in 1.0f32..40.0, ah in 1.0f32..40.0,
        bw in 1.0f32..40.0, bh in 1.0f32..40.0,
    ) {
        let (a, a_size) = (Vec2::new(ax, ay), Vec2::new(aw, ah));
        let (b, b_size) = (Vec2::new(bx, by), Vec2::new(bw, bh));
        prop_assert_eq!(rects_overlap(a, a_size, b, b_size), rects_overlap(b, b_size, a, a_size));
        // Boxes that only share an edge do not overlap
        prop_assert!(!rects_overlap(a, a_size, Vec2::new(ax + aw, by), b_size));
    }

    #[test]
    fn test_same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..200),
    ) {
        let mut a = running(seed);
        let mut b = running(seed);
        for input in &inputs {
            tick(&mut a, input, TICK_MS);
            tick(&mut b, input, TICK_MS);
        }
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.health, b.health);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        prop_assert_eq!(a.bullets.len(), b.bullets.len());
        prop_assert_eq!(a.particles.len(), b.particles.len());
    }
}

#[test]
fn test_restart_after_game_over() {
    let mut state = running(7);
    state.score = 340;
    state.high_score = 340;
    state.health = 0;
    state.game_over();
    assert_eq!(state.phase, GamePhase::GameOver);

    // Time is frozen and inputs other than restart are ignored
    let frozen = state.time_ms;
    tick(&mut state, &TickInput { fire: true, left: true, ..Default::default() }, TICK_MS);
    assert_eq!(state.time_ms, frozen);
    assert!(state.bullets.is_empty());

    tick(&mut state, &TickInput { restart: true, ..Default::default() }, TICK_MS);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.health, 100);
    assert_eq!(state.high_score, 340);
    assert_eq!(state.enemy_spawn_interval_ms, 2000);
}
