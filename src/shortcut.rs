// =============================================================================
// shortcut.rs - Keyboard shortcuts (key code + modifiers)
// =============================================================================

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};

bitflags! {
    /// Modifier flags, same raw values as `NSEvent.ModifierFlags`
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u64 {
        const CAPS_LOCK = 1 << 16;
        const SHIFT = 1 << 17;
        const CONTROL = 1 << 18;
        const OPTION = 1 << 19;
        const COMMAND = 1 << 20;
        const NUMERIC_PAD = 1 << 21;
        const HELP = 1 << 22;
        const FUNCTION = 1 << 23;
    }
}

impl ModifierFlags {
    /// NSEventModifierFlagDeviceIndependentFlagsMask
    pub const DEVICE_INDEPENDENT_MASK: u64 = 0xffff_0000;

    /// The four modifiers a shortcut can be made of
    pub fn shortcut_modifiers() -> ModifierFlags {
        ModifierFlags::SHIFT | ModifierFlags::CONTROL | ModifierFlags::OPTION | ModifierFlags::COMMAND
    }
}

// Carbon modifier masks (Events.h)
const CARBON_CMD_KEY: u32 = 1 << 8;
const CARBON_SHIFT_KEY: u32 = 1 << 9;
const CARBON_OPTION_KEY: u32 = 1 << 11;
const CARBON_CONTROL_KEY: u32 = 1 << 12;

/// Action déclenchée par un raccourci
/// Action triggered by a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    CopyColor,
    PinToScreen,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 2] = [ShortcutAction::CopyColor, ShortcutAction::PinToScreen];

    pub fn display_name(self) -> &'static str {
        match self {
            ShortcutAction::CopyColor => "Copy color",
            ShortcutAction::PinToScreen => "Pin on screen",
        }
    }
}

/// Raccourci clavier : code de touche virtuel + modificateurs
/// Keyboard shortcut: virtual key code + modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredShortcut", into = "StoredShortcut")]
pub struct Shortcut {
    key_code: u16,
    modifiers: ModifierFlags,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredShortcut {
    key_code: u16,
    modifier_flags: u64,
}

impl From<StoredShortcut> for Shortcut {
    fn from(s: StoredShortcut) -> Self {
        Shortcut::new(s.key_code, ModifierFlags::from_bits_truncate(s.modifier_flags))
    }
}

impl From<Shortcut> for StoredShortcut {
    fn from(s: Shortcut) -> Self {
        StoredShortcut {
            key_code: s.key_code,
            modifier_flags: s.modifiers.bits(),
        }
    }
}

impl Shortcut {
    /// Device-dependent bits are dropped so that left/right modifiers match
    pub fn new(key_code: u16, modifiers: ModifierFlags) -> Self {
        Self {
            key_code,
            modifiers: ModifierFlags::from_bits_truncate(
                modifiers.bits() & ModifierFlags::DEVICE_INDEPENDENT_MASK,
            ),
        }
    }

    pub fn key_code(&self) -> u16 {
        self.key_code
    }

    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }

    /// Modificateurs pour les APIs Carbon (RegisterEventHotKey)
    /// Modifier flags for Carbon APIs (RegisterEventHotKey)
    pub fn carbon_flags(&self) -> u32 {
        let mut flags = 0;
        if self.modifiers.contains(ModifierFlags::COMMAND) {
            flags |= CARBON_CMD_KEY;
        }
        if self.modifiers.contains(ModifierFlags::OPTION) {
            flags |= CARBON_OPTION_KEY;
        }
        if self.modifiers.contains(ModifierFlags::CONTROL) {
            flags |= CARBON_CONTROL_KEY;
        }
        if self.modifiers.contains(ModifierFlags::SHIFT) {
            flags |= CARBON_SHIFT_KEY;
        }
        flags
    }

    /// Symbols in macOS menu order, e.g. "⌥⇧⌘"
    pub fn modifiers_string(&self) -> String {
        let mut result = String::new();
        if self.modifiers.contains(ModifierFlags::CONTROL) {
            result.push('\u{2303}');
        }
        if self.modifiers.contains(ModifierFlags::OPTION) {
            result.push('\u{2325}');
        }
        if self.modifiers.contains(ModifierFlags::SHIFT) {
            result.push('\u{21E7}');
        }
        if self.modifiers.contains(ModifierFlags::COMMAND) {
            result.push('\u{2318}');
        }
        result
    }

    /// Key name, e.g. "P", "F1", "Space"; empty for unknown codes
    pub fn key_string(&self) -> String {
        key_name(self.key_code).unwrap_or_default().to_string()
    }

    /// e.g. "⇧⌘P"
    pub fn display_string(&self) -> String {
        self.modifiers_string() + &self.key_string()
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// Parses textual specs such as "cmd+shift+p" or "ctrl+option+F5"
impl FromStr for Shortcut {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PickerError::InvalidShortcut(s.to_string());
        let mut modifiers = ModifierFlags::empty();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            let modifier = match part.to_ascii_lowercase().as_str() {
                "cmd" | "command" => Some(ModifierFlags::COMMAND),
                "shift" => Some(ModifierFlags::SHIFT),
                "alt" | "opt" | "option" => Some(ModifierFlags::OPTION),
                "ctrl" | "control" => Some(ModifierFlags::CONTROL),
                _ => None,
            };
            match modifier {
                Some(flag) => modifiers |= flag,
                None if key.is_none() => key = Some(key_code_for(part).ok_or_else(invalid)?),
                None => return Err(invalid()),
            }
        }

        key.map(|code| Shortcut::new(code, modifiers)).ok_or_else(invalid)
    }
}

// =============================================================================
// KEY TABLE - US ANSI layout (HIToolbox Events.h)
// =============================================================================

const KEY_NAMES: &[(u16, &str)] = &[
    (0x00, "A"), (0x01, "S"), (0x02, "D"), (0x03, "F"), (0x04, "H"), (0x05, "G"),
    (0x06, "Z"), (0x07, "X"), (0x08, "C"), (0x09, "V"), (0x0B, "B"), (0x0C, "Q"),
    (0x0D, "W"), (0x0E, "E"), (0x0F, "R"), (0x10, "Y"), (0x11, "T"), (0x12, "1"),
    (0x13, "2"), (0x14, "3"), (0x15, "4"), (0x16, "6"), (0x17, "5"), (0x18, "="),
    (0x19, "9"), (0x1A, "7"), (0x1B, "-"), (0x1C, "8"), (0x1D, "0"), (0x1E, "]"),
    (0x1F, "O"), (0x20, "U"), (0x21, "["), (0x22, "I"), (0x23, "P"), (0x25, "L"),
    (0x26, "J"), (0x27, "'"), (0x28, "K"), (0x29, ";"), (0x2A, "\\"), (0x2B, ","),
    (0x2C, "/"), (0x2D, "N"), (0x2E, "M"), (0x2F, "."), (0x32, "`"),
    // Special keys
    (0x24, "\u{21A9}"), // Return
    (0x30, "\u{21E5}"), // Tab
    (0x31, "Space"),
    (0x33, "\u{232B}"), // Delete
    (0x35, "\u{238B}"), // Escape
    (0x72, "?"),        // Help
    (0x73, "\u{2196}"), // Home
    (0x74, "\u{21DE}"), // Page up
    (0x75, "\u{2326}"), // Forward delete
    (0x77, "\u{2198}"), // End
    (0x79, "\u{21DF}"), // Page down
    (0x7B, "\u{2190}"), (0x7C, "\u{2192}"), (0x7D, "\u{2193}"), (0x7E, "\u{2191}"),
    // Function keys
    (0x7A, "F1"), (0x78, "F2"), (0x63, "F3"), (0x76, "F4"), (0x60, "F5"),
    (0x61, "F6"), (0x62, "F7"), (0x64, "F8"), (0x65, "F9"), (0x6D, "F10"),
    (0x67, "F11"), (0x6F, "F12"), (0x69, "F13"), (0x6B, "F14"), (0x71, "F15"),
    (0x6A, "F16"), (0x40, "F17"), (0x4F, "F18"), (0x50, "F19"),
    // Keypad
    (0x41, "."), (0x43, "*"), (0x45, "+"), (0x47, "\u{2327}"), (0x4B, "/"),
    (0x4C, "\u{2305}"), (0x4E, "-"), (0x51, "="), (0x52, "0"), (0x53, "1"),
    (0x54, "2"), (0x55, "3"), (0x56, "4"), (0x57, "5"), (0x58, "6"), (0x59, "7"),
    (0x5B, "8"), (0x5C, "9"),
];

/// Textual names accepted when parsing, besides the table above
const KEY_ALIASES: &[(&str, u16)] = &[
    ("return", 0x24),
    ("enter", 0x24),
    ("tab", 0x30),
    ("space", 0x31),
    ("delete", 0x33),
    ("backspace", 0x33),
    ("escape", 0x35),
    ("esc", 0x35),
    ("home", 0x73),
    ("pageup", 0x74),
    ("end", 0x77),
    ("pagedown", 0x79),
    ("left", 0x7B),
    ("right", 0x7C),
    ("down", 0x7D),
    ("up", 0x7E),
];

fn key_name(code: u16) -> Option<&'static str> {
    KEY_NAMES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// First match wins, so main-keyboard digits and symbols are preferred over
/// the keypad ones.
fn key_code_for(name: &str) -> Option<u16> {
    let lower = name.to_ascii_lowercase();
    if let Some((_, code)) = KEY_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return Some(*code);
    }
    KEY_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

// =============================================================================
// TESTS
// =============================================================================
