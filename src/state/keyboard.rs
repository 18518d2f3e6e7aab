//! Keyboard state and key-code mapping for game moves

use strum::{ Display, EnumIter };

/// Direction a move slides the tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Maps a physical key code to a move: arrows, vim keys (hjkl) and wasd
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyK" | "KeyW" => Some(Direction::Up),
            "ArrowDown" | "KeyJ" | "KeyS" => Some(Direction::Down),
            "ArrowLeft" | "KeyH" | "KeyA" => Some(Direction::Left),
            "ArrowRight" | "KeyL" | "KeyD" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Logical key identifier a browser would report for a physical key code
/// on a US layout, without modifiers
pub fn key_for_code(code: &str) -> String {
    if let Some(letter) = code.strip_prefix("Key") {
        if letter.len() == 1 {
            return letter.to_ascii_lowercase();
        }
    }
    if let Some(digit) = code.strip_prefix("Digit") {
        if digit.len() == 1 {
            return digit.to_string();
        }
    }
    match code {
        "Space" => " ".to_string(),
        "Minus" => "-".to_string(),
        "Equal" => "=".to_string(),
        "Comma" => ",".to_string(),
        "Period" => ".".to_string(),
        "Slash" => "/".to_string(),
        "Semicolon" => ";".to_string(),
        "Quote" => "'".to_string(),
        // Arrows and named keys share their identifier with the code
        _ => code.to_string(),
    }
}

/// Represents the current state of keyboard interactions
/// - `key_pressed`: Whether a key has been processed since the game started
/// - `last_key`: The most recent key code that was processed
#[derive(Debug, PartialEq, Clone, Default)]
pub struct KeyboardState {
    pub key_pressed: bool,
    pub last_key: String,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, code: &str) {
        self.key_pressed = true;
        self.last_key = code.to_string();
    }
}
