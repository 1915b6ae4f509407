//! Preset rolls offered alongside free-text input.

use lazy_static::lazy_static;

/// A ready-made roll bound to a numeric hotkey slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub formula: &'static str,
}

lazy_static! {
    /// The standard dice, in hotkey order (slots 1 through 9).
    pub static ref PRESETS: Vec<Preset> = vec![
        Preset { label: "d4", formula: "1d4" },
        Preset { label: "d6", formula: "1d6" },
        Preset { label: "d8", formula: "1d8" },
        Preset { label: "d10", formula: "1d10" },
        Preset { label: "d12", formula: "1d12" },
        Preset { label: "d20", formula: "1d20" },
        Preset { label: "d100", formula: "1d100" },
        Preset { label: "2d6", formula: "2d6" },
        Preset { label: "3d6", formula: "3d6" },
    ];
}

/// Look up a preset by its 1-based hotkey slot.
pub fn preset_for_slot(slot: usize) -> Option<&'static Preset> {
    slot.checked_sub(1).and_then(|index| PRESETS.get(index))
}
