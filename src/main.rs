//! Aircraft Shooter entry point
//!
//! Native: headless run driven by a simple autopilot, logging the HUD.
//! Web: the page drives `WebGame` from the library; nothing to do here.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    use clap::{Parser, ValueEnum};

    use aircraft_shooter::consts::{TICK_HZ, TICK_MS};
    use aircraft_shooter::persistence::{FileStore, KeyValueStore, MemoryStore};
    use aircraft_shooter::platform::{Action, FrameClock, InputState};
    use aircraft_shooter::renderer::TextHud;
    use aircraft_shooter::sim::{GamePhase, GameState};
    use aircraft_shooter::{Game, QualityPreset, Settings};

    /// Headless run of the shooter under a simple autopilot
    #[derive(Parser, Debug)]
    #[command(name = "aircraft-shooter")]
    #[command(about = "Headless Aircraft Shooter run driven by an autopilot, logging the HUD")]
    struct Cli {
        /// Ticks to simulate (stops early on game over)
        #[arg(long, default_value_t = 60 * u64::from(TICK_HZ))]
        ticks: u64,
        /// RNG seed (defaults to the stored setting, then the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Directory holding settings and the high score
        #[arg(long, default_value = ".aircraft-shooter")]
        data_dir: PathBuf,
        /// Quality preset; saved to the settings when given
        #[arg(long, value_enum)]
        quality: Option<CliQuality>,
        /// Pace ticks against the wall clock instead of running flat out
        #[arg(long)]
        realtime: bool,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
    enum CliQuality {
        Low,
        Medium,
        High,
    }

    impl From<CliQuality> for QualityPreset {
        fn from(value: CliQuality) -> Self {
            match value {
                CliQuality::Low => QualityPreset::Low,
                CliQuality::Medium => QualityPreset::Medium,
                CliQuality::High => QualityPreset::High,
            }
        }
    }

    fn open_store(dir: &Path) -> Box<dyn KeyValueStore> {
        match FileStore::open(dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("Cannot use {}: {}; scores will not persist", dir.display(), e);
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Keep firing and drift under the nearest enemy, backing off when close
    fn autopilot(state: &GameState, input: &mut InputState) {
        match state.phase {
            GamePhase::NotStarted => input.press(Action::Start),
            GamePhase::GameOver => {}
            GamePhase::Running => {
                input.press(Action::Fire);
                input.release(Action::MoveLeft);
                input.release(Action::MoveRight);
                input.release(Action::MoveDown);

                let me = state.player.center();
                let target = state.enemies.iter().min_by(|a, b| {
                    let da = a.center().distance_squared(me);
                    let db = b.center().distance_squared(me);
                    da.total_cmp(&db)
                });
                if let Some(enemy) = target {
                    let dx = enemy.center().x - me.x;
                    if dx < -state.player.speed {
                        input.press(Action::MoveLeft);
                    } else if dx > state.player.speed {
                        input.press(Action::MoveRight);
                    }
                    if enemy.center().y > me.y - 2.0 * state.player.size.y {
                        input.press(Action::MoveDown);
                    }
                }
            }
        }
    }

    pub fn run() {
        let cli = Cli::parse();

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Aircraft Shooter (native) starting...");

        let mut store = open_store(&cli.data_dir);
        let mut settings = Settings::load(store.as_ref());
        if let Some(quality) = cli.quality {
            settings.apply_preset(quality.into());
            settings.save(store.as_mut());
        }
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }

        let mut game = Game::new(settings, store);
        let mut hud = TextHud::default();
        let mut clock = FrameClock::new();
        let started = Instant::now();
        let mut ticks = 0u64;

        while ticks < cli.ticks {
            let (state, input) = game.state_and_input();
            autopilot(state, input);

            if cli.realtime {
                std::thread::sleep(Duration::from_millis(u64::from(TICK_MS)));
                let elapsed = clock.advance(started.elapsed().as_secs_f64() * 1000.0);
                ticks += u64::from(game.update(elapsed));
            } else {
                game.step();
                ticks += 1;
            }

            if ticks % u64::from(TICK_HZ) == 0 {
                game.present(&mut hud);
            }
            if game.state().phase == GamePhase::GameOver {
                break;
            }
        }

        game.present(&mut hud);
        log::info!(
            "Finished after {} ticks: score {}, high score {}",
            ticks,
            game.state().score,
            game.high_score()
        );
    }

    #[cfg(test)]
    mod tests {
        use clap::CommandFactory;

        use super::*;

        #[test]
        fn test_cli_definition() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["aircraft-shooter"]).unwrap();
            assert_eq!(cli.ticks, 3600);
            assert_eq!(cli.seed, None);
            assert_eq!(cli.data_dir, PathBuf::from(".aircraft-shooter"));
            assert_eq!(cli.quality, None);
            assert!(!cli.realtime);
        }

        #[test]
        fn test_cli_typed_values() {
            let cli = Cli::try_parse_from([
                "aircraft-shooter",
                "--ticks",
                "120",
                "--seed",
                "42",
                "--quality",
                "high",
                "--realtime",
            ])
            .unwrap();
            assert_eq!(cli.ticks, 120);
            assert_eq!(cli.seed, Some(42));
            assert_eq!(cli.quality.map(QualityPreset::from), Some(QualityPreset::High));
            assert!(cli.realtime);
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(Cli::try_parse_from(["aircraft-shooter", "--ticks", "lots"]).is_err());
            assert!(Cli::try_parse_from(["aircraft-shooter", "--seed", "banana"]).is_err());
            assert!(Cli::try_parse_from(["aircraft-shooter", "--quality", "ultra"]).is_err());
            assert!(Cli::try_parse_from(["aircraft-shooter", "--warp"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
