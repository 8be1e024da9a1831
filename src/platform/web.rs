//! Browser bindings
//!
//! The page owns the canvas and the animation loop; it forwards keyboard and
//! pointer events here and draws the JSON frame returned by `frame`.

use wasm_bindgen::prelude::*;

use super::time::FrameClock;
use crate::game::Game;
use crate::persistence::{KeyValueStore, LocalStore, MemoryStore};
use crate::renderer::JsonFrame;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
    log::info!("Aircraft Shooter starting...");
}

/// Open LocalStorage, falling back to an in-memory store (private browsing)
fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    clock: FrameClock,
    frame: JsonFrame,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game sized to the canvas (CSS pixels)
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let store = open_store();
        let mut settings = Settings::load(store.as_ref());
        settings.viewport_width = width;
        settings.viewport_height = height;

        WebGame {
            game: Game::new(settings, store),
            clock: FrameClock::new(),
            frame: JsonFrame::default(),
        }
    }

    pub fn key_down(&mut self, code: &str) {
        self.game.input_mut().key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.game.input_mut().key_up(code);
    }

    /// Named action from an on-screen button; returns false for unknown names
    pub fn action(&mut self, name: &str) -> bool {
        self.game.input_mut().press_named(name)
    }

    /// Release a held named action (on-screen button lifted)
    pub fn action_up(&mut self, name: &str) -> bool {
        self.game.input_mut().release_named(name)
    }

    /// Canvas click
    pub fn click(&mut self) {
        self.game.input_mut().activate();
    }

    /// Window lost focus or tab hidden
    pub fn blur(&mut self) {
        self.game.input_mut().clear();
        self.clock.reset();
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    /// Advance to `now_ms` (requestAnimationFrame timestamp) and return the
    /// frame to draw as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let elapsed = self.clock.advance(now_ms);
        self.game.update(elapsed);
        self.game.present(&mut self.frame);
        self.frame.last.clone()
    }
}
