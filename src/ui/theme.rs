use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::engine::world::GlyphSet;

/// Colors plus the world glyph vocabulary. Built-in themes are defined in
/// code; user themes load from `<config>/railbar/themes/<name>.toml` and
/// shadow built-ins of the same name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub glyphs: GlyphSet,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub rail: String,
    pub player: String,
    pub trail: String,
    pub tree: String,
    pub cloud: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub paused: String,
    pub bar_filled: String,
    pub bar_empty: String,
}

const BUILTIN_THEMES: &[&str] = &["railway-default", "scenic"];

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow built-ins.
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("railbar")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        Self::builtin(name)
    }

    fn builtin(name: &str) -> Option<Self> {
        match name {
            "railway-default" => Some(Self {
                name: name.to_string(),
                colors: ThemeColors::default(),
                glyphs: GlyphSet::default(),
            }),
            "scenic" => Some(Self {
                name: name.to_string(),
                colors: ThemeColors {
                    bg: "#1a1b26".to_string(),
                    fg: "#c0caf5".to_string(),
                    rail: "#3b4261".to_string(),
                    player: "#ff9e64".to_string(),
                    trail: "#e0af68".to_string(),
                    tree: "#9ece6a".to_string(),
                    cloud: "#7aa2f7".to_string(),
                    accent: "#bb9af7".to_string(),
                    border: "#3b4261".to_string(),
                    header_bg: "#24283b".to_string(),
                    header_fg: "#c0caf5".to_string(),
                    paused: "#e0af68".to_string(),
                    bar_filled: "#7aa2f7".to_string(),
                    bar_empty: "#24283b".to_string(),
                },
                glyphs: GlyphSet {
                    rail: "⋅".to_string(),
                    player: "◆".to_string(),
                    trail: "✦".to_string(),
                    tree: "♠".to_string(),
                    cloud: "☁".to_string(),
                },
            }),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<String> {
        BUILTIN_THEMES.iter().map(|n| n.to_string()).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin("railway-default").expect("built-in default theme exists")
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            rail: "#585b70".to_string(),
            player: "#f5e0dc".to_string(),
            trail: "#f9e2af".to_string(),
            tree: "#a6e3a1".to_string(),
            cloud: "#89b4fa".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            paused: "#f9e2af".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn rail(&self) -> Color { Self::parse_color(&self.rail) }
    pub fn player(&self) -> Color { Self::parse_color(&self.player) }
    pub fn trail(&self) -> Color { Self::parse_color(&self.trail) }
    pub fn tree(&self) -> Color { Self::parse_color(&self.tree) }
    pub fn cloud(&self) -> Color { Self::parse_color(&self.cloud) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn paused(&self) -> Color { Self::parse_color(&self.paused) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
}
