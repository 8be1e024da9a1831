//! Input actions and held-state tracking
//!
//! Movement and fire are held states; start, restart and weapon selection are
//! edges latched until the next tick consumes them. Multiple events between
//! ticks collapse to the last write.

use crate::sim::TickInput;

/// A discrete input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    /// Catalog index (0-based)
    SelectWeapon(usize),
    Start,
    Restart,
}

impl Action {
    /// Parse an action name such as `move-left` or `select-weapon-2`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "move-left" => Some(Action::MoveLeft),
            "move-right" => Some(Action::MoveRight),
            "move-up" => Some(Action::MoveUp),
            "move-down" => Some(Action::MoveDown),
            "fire" => Some(Action::Fire),
            "select-weapon-1" => Some(Action::SelectWeapon(0)),
            "select-weapon-2" => Some(Action::SelectWeapon(1)),
            "select-weapon-3" => Some(Action::SelectWeapon(2)),
            "start" => Some(Action::Start),
            "restart" => Some(Action::Restart),
            _ => None,
        }
    }

    /// Actions bound to a keyboard `code` (KeyboardEvent.code naming)
    pub fn from_key_code(code: &str) -> &'static [Action] {
        match code {
            "ArrowLeft" | "KeyA" => &[Action::MoveLeft],
            "ArrowRight" | "KeyD" => &[Action::MoveRight],
            "ArrowUp" | "KeyW" => &[Action::MoveUp],
            "ArrowDown" | "KeyS" => &[Action::MoveDown],
            // Space fires and also starts from the title screen
            "Space" => &[Action::Fire, Action::Start],
            "Enter" => &[Action::Start],
            "KeyR" => &[Action::Restart],
            "Digit1" => &[Action::SelectWeapon(0)],
            "Digit2" => &[Action::SelectWeapon(1)],
            "Digit3" => &[Action::SelectWeapon(2)],
            _ => &[],
        }
    }

    /// Held actions stay active until released
    pub fn is_held(self) -> bool {
        matches!(
            self,
            Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown | Action::Fire
        )
    }
}

/// Current input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        let input = &mut self.current;
        match action {
            Action::MoveLeft => input.left = true,
            Action::MoveRight => input.right = true,
            Action::MoveUp => input.up = true,
            Action::MoveDown => input.down = true,
            Action::Fire => input.fire = true,
            Action::SelectWeapon(index) => input.select_weapon = Some(index),
            Action::Start => input.start = true,
            Action::Restart => input.restart = true,
        }
    }

    /// Release a held action; edges ignore releases
    pub fn release(&mut self, action: Action) {
        let input = &mut self.current;
        match action {
            Action::MoveLeft => input.left = false,
            Action::MoveRight => input.right = false,
            Action::MoveUp => input.up = false,
            Action::MoveDown => input.down = false,
            Action::Fire => input.fire = false,
            Action::SelectWeapon(_) | Action::Start | Action::Restart => {}
        }
    }

    /// Press by action name. Unknown names are ignored (returns false).
    pub fn press_named(&mut self, name: &str) -> bool {
        match Action::from_name(name) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Release by action name. Unknown names are ignored (returns false).
    pub fn release_named(&mut self, name: &str) -> bool {
        match Action::from_name(name) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    pub fn key_down(&mut self, code: &str) {
        for &action in Action::from_key_code(code) {
            self.press(action);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        for &action in Action::from_key_code(code) {
            self.release(action);
        }
    }

    /// Pointer activation of the play area (starts the game)
    pub fn activate(&mut self) {
        self.press(Action::Start);
    }

    /// Input to feed the next tick
    pub fn sample(&self) -> TickInput {
        self.current.clone()
    }

    /// Clear one-shot inputs after a tick has processed them
    pub fn consume_edges(&mut self) {
        self.current.select_weapon = None;
        self.current.start = false;
        self.current.restart = false;
    }

    /// Drop everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.current = TickInput::default();
    }
}
