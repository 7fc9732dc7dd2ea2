use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Installs the configured theme. Only the first call takes effect.
pub fn init(config: &ThemeConfig) -> &'static Theme {
    THEME.get_or_init(|| config.clone().into_theme())
}

/// Get the active theme; the default one if `init` was never called.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    /// Active tab and chart line.
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}

/// Colors a preset is built from. Presets differ only in palette; the
/// modifiers and which slot feeds which style stay the same.
struct Palette {
    name: &'static str,
    fg: (u8, u8, u8),
    today: (u8, u8, u8),
    selected: (u8, u8, u8),
    dim: (u8, u8, u8),
    border: (u8, u8, u8),
    panel: (u8, u8, u8),
    accent: (u8, u8, u8),
}

const PALETTES: &[Palette] = &[
    Palette {
        name: "dracula",
        fg: (248, 248, 242),
        today: (189, 147, 249),
        selected: (139, 233, 253),
        dim: (98, 114, 164),
        border: (68, 71, 90),
        panel: (68, 71, 90),
        accent: (255, 121, 198),
    },
    Palette {
        name: "gruvbox",
        fg: (235, 219, 178),
        today: (250, 189, 47),
        selected: (131, 165, 152),
        dim: (146, 131, 116),
        border: (102, 92, 84),
        panel: (80, 73, 69),
        accent: (184, 187, 38),
    },
    Palette {
        name: "nord",
        fg: (229, 233, 240),
        today: (235, 203, 139),
        selected: (136, 192, 208),
        dim: (76, 86, 106),
        border: (67, 76, 94),
        panel: (67, 76, 94),
        accent: (143, 188, 187),
    },
];

impl Palette {
    fn theme(&self) -> Theme {
        let rgb = |(r, g, b): (u8, u8, u8)| Color::Rgb(r, g, b);
        Theme {
            name: self.name.to_string(),
            today: Style::default().fg(Color::Black).bg(rgb(self.today)),
            selected: Style::default().fg(Color::Black).bg(rgb(self.selected)),
            header: Style::default().fg(rgb(self.fg)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(rgb(self.dim)),
            border: Style::default().fg(rgb(self.border)),
            status: Style::default().fg(rgb(self.fg)).bg(rgb(self.panel)),
            highlight: Style::default().bg(rgb(self.panel)).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(rgb(self.accent)).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Built-in preset by name; unknown names get the default theme.
    pub fn preset(name: &str) -> Self {
        PALETTES
            .iter()
            .find(|p| p.name == name)
            .map(Palette::theme)
            .unwrap_or_default()
    }
}

/// `[theme]` table of `config.toml`: a preset name plus per-style overrides.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub accent_fg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        let base = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        Theme {
            today: restyle(base.today, &self.today_fg, &self.today_bg),
            selected: restyle(base.selected, &self.selected_fg, &self.selected_bg),
            header: restyle(base.header, &self.header_fg, &None),
            dim: restyle(base.dim, &self.dim_fg, &None),
            border: restyle(base.border, &self.border_fg, &None),
            status: restyle(base.status, &self.status_fg, &self.status_bg),
            highlight: restyle(base.highlight, &None, &self.highlight_bg),
            accent: restyle(base.accent, &self.accent_fg, &None),
            name: base.name,
        }
    }
}

/// Unparseable colors are ignored and the preset value kept.
fn restyle(style: Style, fg: &Option<String>, bg: &Option<String>) -> Style {
    let style = match fg.as_deref().and_then(parse_color) {
        Some(c) => style.fg(c),
        None => style,
    };
    match bg.as_deref().and_then(parse_color) {
        Some(c) => style.bg(c),
        None => style,
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 && s.is_ascii() {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_hex_and_names() {
        assert_eq!(parse_color("#102030"), Some(Color::Rgb(16, 32, 48)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("gruvbox".to_string()),
            status_bg: Some("black".to_string()),
            ..Default::default()
        };
        let theme = config.into_theme();
        assert_eq!(theme.name, "gruvbox");
        assert_eq!(theme.status.bg, Some(Color::Black));
        assert_eq!(theme.selected, Theme::preset("gruvbox").selected);
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        assert_eq!(Theme::preset("solarized").name, "default");
    }

    #[test]
    fn every_palette_is_reachable_by_name() {
        for palette in PALETTES {
            let theme = Theme::preset(palette.name);
            assert_eq!(theme.name, palette.name);
            assert_eq!(theme.status.bg, theme.highlight.bg);
        }
    }
}
