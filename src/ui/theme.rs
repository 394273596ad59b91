use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub good: String,
    pub good_bg: String,
    pub bad: String,
    pub bad_bg: String,
    pub warning: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes in the config dir shadow the bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("factdr")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    #[allow(dead_code)]
    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("terminal-default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            good: "#a6e3a1".to_string(),
            good_bg: "#2a3b33".to_string(),
            bad: "#f38ba8".to_string(),
            bad_bg: "#45273a".to_string(),
            warning: "#f9e2af".to_string(),
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
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn good(&self) -> Color { Self::parse_color(&self.good) }
    pub fn good_bg(&self) -> Color { Self::parse_color(&self.good_bg) }
    pub fn bad(&self) -> Color { Self::parse_color(&self.bad) }
    pub fn bad_bg(&self) -> Color { Self::parse_color(&self.bad_bg) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(
            ThemeColors::parse_color("#1e1e2e"),
            Color::Rgb(0x1e, 0x1e, 0x2e)
        );
        assert_eq!(ThemeColors::parse_color("ff0000"), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_color_garbage_falls_back() {
        assert_eq!(ThemeColors::parse_color("#zzzzzz"), Color::White);
        assert_eq!(ThemeColors::parse_color("red"), Color::White);
        assert_eq!(ThemeColors::parse_color(""), Color::White);
    }

    #[test]
    fn test_bundled_themes_parse() {
        for name in Theme::available_themes() {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to load");
        }
    }
}
