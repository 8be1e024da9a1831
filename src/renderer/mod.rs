//! Presentation
//!
//! Presenters consume a read-only `Snapshot` each frame. Drawing itself lives
//! outside the crate (canvas page, terminal); these produce what it needs.

use std::fmt::Write as _;

use crate::sim::{GamePhase, Snapshot};

/// Consumer of per-frame snapshots
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot<'_>);
}

/// One-line text HUD (score, health, high score, weapon, effects)
#[derive(Debug, Clone, Default)]
pub struct TextHud {
    pub last: String,
}

impl TextHud {
    pub fn format(snapshot: &Snapshot<'_>) -> String {
        let mut line = match snapshot.phase {
            GamePhase::NotStarted => "[press start] ".to_owned(),
            GamePhase::Running => String::new(),
            GamePhase::GameOver => "[GAME OVER] ".to_owned(),
        };
        let _ = write!(
            line,
            "Score: {} | Health: {}/{} | High Score: {} | Weapon: {}",
            snapshot.score,
            snapshot.health,
            snapshot.max_health,
            snapshot.high_score,
            snapshot.weapon_name
        );
        for effect in &snapshot.effects {
            let _ = write!(line, " | {} {:.1}s", effect.label, effect.remaining_ms as f32 / 1000.0);
        }
        line
    }
}

impl Presenter for TextHud {
    fn present(&mut self, snapshot: &Snapshot<'_>) {
        self.last = Self::format(snapshot);
        log::info!("{}", self.last);
    }
}

/// Serializes the whole snapshot for a script-side renderer
#[derive(Debug, Clone, Default)]
pub struct JsonFrame {
    pub last: String,
}

impl Presenter for JsonFrame {
    fn present(&mut self, snapshot: &Snapshot<'_>) {
        match serde_json::to_string(snapshot) {
            Ok(json) => self.last = json,
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    }
}
