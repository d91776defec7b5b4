use gamehub_core::config::ThemeConfig;
use ratatui::style::Color;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub muted: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub success: Color,
    pub danger: Color,
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Rgb(124, 58, 237),
            accent_alt: Color::Rgb(245, 158, 11),
            muted: Color::DarkGray,
            highlight: Color::Rgb(250, 204, 21),
            selection_bg: Color::Rgb(40, 40, 60),
            success: Color::Green,
            danger: Color::Red,
            on_accent: Color::White,
        }
    }
}

impl Theme {
    /// Default palette with any valid overrides from config applied.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();
        let overrides = [
            ("accent", config.accent.as_deref(), &mut theme.accent),
            ("accent_alt", config.accent_alt.as_deref(), &mut theme.accent_alt),
            ("muted", config.muted.as_deref(), &mut theme.muted),
            ("highlight", config.highlight.as_deref(), &mut theme.highlight),
        ];
        for (name, raw, slot) in overrides {
            let Some(raw) = raw else { continue };
            match parse_hex_color(raw) {
                Some(color) => *slot = color,
                None => warn!("Ignoring theme.{name}: {raw:?} is not a #rrggbb color"),
            }
        }
        theme.on_accent = contrast_color(&theme.accent, theme.on_accent);
        theme
    }
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance = 0.299 * *r as f32 + 0.587 * *g as f32 + 0.114 * *b as f32;
            if luminance > 150.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}
