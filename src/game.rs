//! Game driver
//!
//! Owns the simulation, input and persistence, and runs the fixed timestep
//! loop: host frames feed an accumulator that is drained in `TICK_MS` steps.

use crate::consts::{MAX_SUBSTEPS, TICK_MS};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::input::InputState;
use crate::platform::time::clock_seed;
use crate::renderer::Presenter;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, tick};

pub struct Game {
    state: GameState,
    high_score: HighScore,
    settings: Settings,
    input: InputState,
    accumulator: f64,
}

impl Game {
    /// Build a game from settings; the store backs the high score
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut state = GameState::with_options(
            seed,
            settings.viewport(),
            settings.star_count(),
            settings.max_particles(),
        );
        let high_score = HighScore::load(store);
        state.high_score = high_score.best();
        log::info!(
            "Game ready (seed {}, {}x{}, {} quality)",
            seed,
            state.viewport.x,
            state.viewport.y,
            settings.quality.as_str()
        );

        Self {
            state,
            high_score,
            settings,
            input: InputState::new(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// State to read alongside input to write (e.g. for an autopilot)
    pub fn state_and_input(&mut self) -> (&GameState, &mut InputState) {
        (&self.state, &mut self.input)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Run exactly one tick with the current input, returning its events
    pub fn step(&mut self) -> &[GameEvent] {
        let input = self.input.sample();
        tick(&mut self.state, &input, TICK_MS);

        // Clear one-shot inputs after processing
        self.input.consume_edges();

        self.handle_events();
        &self.state.events
    }

    /// Advance by host elapsed time (ms). Returns the number of ticks run.
    pub fn update(&mut self, elapsed_ms: f64) -> u32 {
        let step = f64::from(TICK_MS);
        self.accumulator += elapsed_ms.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= step;
            substeps += 1;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS && self.accumulator >= step {
            log::debug!("Dropping {:.1}ms of simulation backlog", self.accumulator);
            self.accumulator %= step;
        }
        substeps
    }

    /// Presentation view, with shake suppressed when disabled in settings
    pub fn snapshot(&self) -> Snapshot<'_> {
        let mut snapshot = self.state.snapshot();
        if !self.settings.effective_screen_shake() {
            snapshot.shake = Default::default();
        }
        snapshot
    }

    pub fn present(&self, presenter: &mut dyn Presenter) {
        presenter.present(&self.snapshot());
    }

    fn handle_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::Started => log::info!("Run started"),
                GameEvent::Restarted => log::info!("Run restarted"),
                GameEvent::NewHighScore(score) => {
                    self.high_score.record(*score);
                }
                GameEvent::EnemyDestroyed { kind, points } => {
                    log::debug!("{:?} destroyed (+{})", kind, points);
                }
                GameEvent::PlayerHit { health } => log::debug!("Player hit, health {}", health),
                GameEvent::PowerUpCollected(kind) => log::debug!("Collected {:?}", kind),
                GameEvent::GameOver { score } => {
                    log::info!("Game over: score {} (best {})", score, self.high_score.best());
                }
                GameEvent::EnemySpawned(_) | GameEvent::PowerUpSpawned(_) => {}
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.state.phase)
            .field("score", &self.state.score)
            .field("high_score", &self.high_score)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::persistence::{MemoryStore, Result, load_json};
    use crate::platform::input::Action;
    use crate::sim::{GamePhase, PowerUp, PowerUpKind};

    /// Store shared between the game and the test
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn seeded_settings() -> Settings {
        Settings {
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_loads_high_score_into_state() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "1200").unwrap();
        let game = Game::new(seeded_settings(), Box::new(store));
        assert_eq!(game.state().high_score, 1200);
        assert_eq!(game.high_score(), 1200);
    }

    #[test]
    fn test_start_edge_consumed() {
        let mut game = Game::new(seeded_settings(), Box::new(MemoryStore::new()));
        game.input_mut().press(Action::Start);
        let events = game.step().to_vec();
        assert!(events.contains(&GameEvent::Started));
        assert_eq!(game.state().phase, GamePhase::Running);
        assert!(!game.input_mut().sample().start);
    }

    #[test]
    fn test_accumulator_runs_whole_ticks() {
        let mut game = Game::new(seeded_settings(), Box::new(MemoryStore::new()));
        game.input_mut().press(Action::Start);
        assert_eq!(game.update(10.0), 0);
        assert_eq!(game.update(10.0), 1);
        assert_eq!(game.update(40.0), 2);
        assert_eq!(game.state().time_ms, 3 * u64::from(TICK_MS));
    }

    #[test]
    fn test_substeps_bounded() {
        let mut game = Game::new(seeded_settings(), Box::new(MemoryStore::new()));
        assert_eq!(game.update(10_000.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert_eq!(game.update(0.0), 0);
    }

    #[test]
    fn test_new_high_score_persisted() {
        let store = SharedStore::default();
        let mut game = Game::new(seeded_settings(), Box::new(store.clone()));
        game.input_mut().press(Action::Start);
        game.step();

        let state = game.state_mut();
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state.power_ups.push(PowerUp::new(id, PowerUpKind::RapidFire, pos));
        game.step();

        assert_eq!(game.high_score(), 50);
        let stored: Option<u64> = load_json(&store, HighScore::STORAGE_KEY).unwrap();
        assert_eq!(stored, Some(50));
    }

    #[test]
    fn test_shake_suppressed_by_settings() {
        let settings = Settings {
            screen_shake: false,
            ..seeded_settings()
        };
        let mut game = Game::new(settings, Box::new(MemoryStore::new()));
        game.state_mut().shake.trigger(8.0, 20);
        assert_eq!(game.snapshot().shake.ticks, 0);
        assert_eq!(game.state().shake.ticks, 20);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut game = Game::new(seeded_settings(), Box::new(MemoryStore::new()));
            game.input_mut().press(Action::Start);
            game.input_mut().press(Action::Fire);
            for _ in 0..300 {
                game.step();
            }
            let state = game.state();
            (state.score, state.health, state.enemies.len(), state.bullets.len())
        };
        assert_eq!(run(), run());
    }
}
