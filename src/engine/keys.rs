//! Key label adapter.
//!
//! The terminal boundary (`App::handle_key` in `src/app.rs`) decodes crossterm
//! key codes into label strings: printable characters pass through as
//! themselves, non-printable keys arrive as symbolic names. This module is
//! the single place those names map to display glyphs; everything past the
//! input boundary works with labels and this table only.

/// Symbolic key names the input boundary is allowed to emit.
pub const SYMBOLIC_LABELS: &[&str] = &[
    "space",
    "enter",
    "tab",
    "backspace",
    "delete",
    "esc",
    "shift",
    "ctrl",
    "alt",
    "cmd",
    "menu",
    "caps_lock",
];

/// Fixed display glyph for a key label. Unrecognized labels pass through
/// unchanged, so the mapping is total and deterministic.
pub fn display_glyph(label: &str) -> &str {
    match label {
        "space" => "␣",
        "enter" => "⏎",
        "tab" => "⇥",
        "backspace" => "⌫",
        "delete" => "⌦",
        "esc" => "⎋",
        "shift" => "⇧",
        "ctrl" => "⌃",
        "alt" => "⌥",
        "cmd" => "⌘",
        "menu" => "▤",
        "caps_lock" => "⇪",
        "f1" | "f2" | "f3" | "f4" | "f5" | "f6" | "f7" | "f8" | "f9" | "f10" | "f11" | "f12" => {
            "ƒ"
        }
        other => other,
    }
}
