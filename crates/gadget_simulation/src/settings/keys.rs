//! Key bindings: имена клавиш из настроек → `KeyCode`

use bevy::prelude::KeyCode;

/// Раскладка игрока (right/left/jump/shoot)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub right: KeyCode,
    pub left: KeyCode,
    pub jump: KeyCode,
    pub shoot: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            right: KeyCode::KeyD,
            left: KeyCode::KeyA,
            jump: KeyCode::Space,
            shoot: KeyCode::KeyF,
        }
    }
}

/// Имя клавиши из файла настроек ("D", "Space", "F1") → `KeyCode`
///
/// Регистр не важен. `None`: имя не распознано.
pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
    let s = name.trim().to_ascii_uppercase();

    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match c {
            'A'..='Z' => letter_key(c),
            '0'..='9' => digit_key(c),
            _ => None,
        };
    }

    Some(match s.as_str() {
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,

        // Стрелки
        "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
        "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
        "UP" | "ARROWUP" => KeyCode::ArrowUp,
        "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

        "SPACE" => KeyCode::Space,
        "ENTER" | "RETURN" => KeyCode::Enter,
        "TAB" => KeyCode::Tab,
        "ESC" | "ESCAPE" => KeyCode::Escape,

        // Модификаторы
        "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
        "RSHIFT" => KeyCode::ShiftRight,
        "LCTRL" | "CTRL" => KeyCode::ControlLeft,
        "RCTRL" => KeyCode::ControlRight,
        "LALT" | "ALT" => KeyCode::AltLeft,
        "RALT" => KeyCode::AltRight,

        _ => return None,
    })
}

fn letter_key(c: char) -> Option<KeyCode> {
    Some(match c {
        'A' => KeyCode::KeyA,
        'B' => KeyCode::KeyB,
        'C' => KeyCode::KeyC,
        'D' => KeyCode::KeyD,
        'E' => KeyCode::KeyE,
        'F' => KeyCode::KeyF,
        'G' => KeyCode::KeyG,
        'H' => KeyCode::KeyH,
        'I' => KeyCode::KeyI,
        'J' => KeyCode::KeyJ,
        'K' => KeyCode::KeyK,
        'L' => KeyCode::KeyL,
        'M' => KeyCode::KeyM,
        'N' => KeyCode::KeyN,
        'O' => KeyCode::KeyO,
        'P' => KeyCode::KeyP,
        'Q' => KeyCode::KeyQ,
        'R' => KeyCode::KeyR,
        'S' => KeyCode::KeyS,
        'T' => KeyCode::KeyT,
        'U' => KeyCode::KeyU,
        'V' => KeyCode::KeyV,
        'W' => KeyCode::KeyW,
        'X' => KeyCode::KeyX,
        'Y' => KeyCode::KeyY,
        'Z' => KeyCode::KeyZ,
        _ => return None,
    })
}

fn digit_key(c: char) -> Option<KeyCode> {
    Some(match c {
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        _ => return None,
    })
}
