use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::config::KeyBindings;

/// Per-tick controls consumed by the simulation. Toggles, start, reset and
/// quit are edge-triggered (pressed this frame); the paddle axes are levels
/// (held down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub toggle_left_ai: bool,
    pub toggle_right_ai: bool,
    pub start: bool,
    pub reset: bool,
    pub quit: bool,
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// Parse a binding like `"W"`, `"Up"` or `"Space"` into a key code.
/// Named keys ignore case; single characters keep theirs and are folded
/// when matched against events.
pub fn parse_key(name: &str) -> Result<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => bail!("unknown key binding {:?}", name),
            }
        }
    };
    Ok(code)
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    ToggleLeftAi,
    ToggleRightAi,
    Start,
    Reset,
    Quit,
}

/// Key bindings resolved to key codes.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Vec<Control>>,
}

impl KeyMap {
    pub fn from_bindings(keys: &KeyBindings) -> Result<Self> {
        let pairs = [
            (&keys.left_paddle_up, Control::LeftUp),
            (&keys.left_paddle_down, Control::LeftDown),
            (&keys.right_paddle_up, Control::RightUp),
            (&keys.right_paddle_down, Control::RightDown),
            (&keys.toggle_left_ai, Control::ToggleLeftAi),
            (&keys.toggle_right_ai, Control::ToggleRightAi),
            (&keys.start, Control::Start),
            (&keys.reset, Control::Reset),
            (&keys.quit, Control::Quit),
        ];

        let mut bindings: HashMap<KeyCode, Vec<Control>> = HashMap::new();
        for (name, control) in pairs {
            bindings
                .entry(normalize(parse_key(name)?))
                .or_default()
                .push(control);
        }
        // Esc always quits
        bindings.entry(KeyCode::Esc).or_default().push(Control::Quit);
        Ok(Self { bindings })
    }

    fn controls(&self, code: KeyCode) -> &[Control] {
        self.bindings
            .get(&normalize(code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Turns terminal key events into `TickInput`s.
///
/// Terminals that report key releases give exact held state. Others only
/// send presses and auto-repeats, so a press counts as held for
/// `hold_frames` frames and each repeat refreshes it.
#[derive(Debug)]
pub struct KeyTracker {
    keymap: KeyMap,
    hold_frames: u32,
    held: HashMap<KeyCode, u32>,
    pressed: Vec<KeyCode>,
}

// Effectively "until released"
const HELD_UNTIL_RELEASE: u32 = u32::MAX;

impl KeyTracker {
    pub fn new(keymap: KeyMap, hold_frames: u32) -> Self {
        Self {
            keymap,
            hold_frames: hold_frames.max(1),
            held: HashMap::new(),
            pressed: Vec::new(),
        }
    }

    /// Feed one key event.
    pub fn handle(&mut self, key: KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.pressed.push(code);
                self.held.insert(code, self.hold_frames);
            }
            KeyEventKind::Repeat => {
                self.held.insert(code, self.hold_frames);
            }
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
        }
    }

    /// Switch to exact held state once the terminal reports releases.
    pub fn enable_release_tracking(&mut self) {
        self.hold_frames = HELD_UNTIL_RELEASE;
    }

    /// Drain every pending terminal event without blocking.
    pub fn poll(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.handle(key);
            }
        }
        Ok(())
    }

    /// Build this frame's input and age the held keys.
    pub fn take_input(&mut self) -> TickInput {
        let mut input = TickInput::default();

        for code in self.pressed.drain(..) {
            for control in self.keymap.controls(code) {
                match control {
                    Control::ToggleLeftAi => input.toggle_left_ai = true,
                    Control::ToggleRightAi => input.toggle_right_ai = true,
                    Control::Start => input.start = true,
                    Control::Reset => input.reset = true,
                    Control::Quit => input.quit = true,
                    _ => {}
                }
            }
        }

        for code in self.held.keys() {
            for control in self.keymap.controls(*code) {
                match control {
                    Control::LeftUp => input.left_up = true,
                    Control::LeftDown => input.left_down = true,
                    Control::RightUp => input.right_up = true,
                    Control::RightDown => input.right_down = true,
                    _ => {}
                }
            }
        }

        self.held.retain(|_, frames| {
            if *frames == HELD_UNTIL_RELEASE {
                return true;
            }
            *frames -= 1;
            *frames > 0
        });

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn tracker(hold_frames: u32) -> KeyTracker {
        let keymap = KeyMap::from_bindings(&KeyBindings::default()).unwrap();
        KeyTracker::new(keymap, hold_frames)
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("Up").unwrap(), KeyCode::Up);
        assert_eq!(parse_key("space").unwrap(), KeyCode::Char(' '));
        assert_eq!(parse_key("W").unwrap(), KeyCode::Char('W'));
        assert_eq!(parse_key("Esc").unwrap(), KeyCode::Esc);
        assert!(parse_key("Hyper").is_err());
        assert!(parse_key("").is_err());
    }

    #[test]
    fn test_uppercase_binding_matches_either_case() {
        let mut bindings = KeyBindings::default();
        bindings.left_paddle_up = "W".to_string();
        let keymap = KeyMap::from_bindings(&bindings).unwrap();
        let mut tracker = KeyTracker::new(keymap, 1);

        tracker.handle(key(KeyCode::Char('w'), KeyEventKind::Press));
        assert!(tracker.take_input().left_up);
        tracker.handle(key(KeyCode::Char('W'), KeyEventKind::Press));
        assert!(tracker.take_input().left_up);
    }

    #[test]
    fn test_press_is_edge_triggered() {
        let mut tracker = tracker(4);
        tracker.handle(key(KeyCode::Char('P'), KeyEventKind::Press));
        tracker.handle(key(KeyCode::Char(' '), KeyEventKind::Press));

        let first = tracker.take_input();
        assert!(first.toggle_right_ai);
        assert!(first.start);
        assert!(!first.toggle_left_ai);

        let second = tracker.take_input();
        assert!(!second.toggle_right_ai);
        assert!(!second.start);
    }

    #[test]
    fn test_press_held_for_hold_window() {
        let mut tracker = tracker(3);
        tracker.handle(key(KeyCode::Char('w'), KeyEventKind::Press));

        for _ in 0..3 {
            let input = tracker.take_input();
            assert!(input.left_up);
            assert!(!input.left_down);
        }
        assert!(!tracker.take_input().left_up);
    }

    #[test]
    fn test_release_tracking_holds_until_release() {
        let mut tracker = tracker(3);
        tracker.enable_release_tracking();
        tracker.handle(key(KeyCode::Down, KeyEventKind::Press));

        for _ in 0..50 {
            assert!(tracker.take_input().right_down);
        }
        tracker.handle(key(KeyCode::Down, KeyEventKind::Release));
        assert!(!tracker.take_input().right_down);
    }

    #[test]
    fn test_escape_always_quits() {
        let mut tracker = tracker(3);
        tracker.handle(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(tracker.take_input().quit);
    }

    #[test]
    fn test_bad_binding_rejected() {
        let mut bindings = KeyBindings::default();
        bindings.reset = "NotAKey".to_string();
        assert!(KeyMap::from_bindings(&bindings).is_err());
    }
}
