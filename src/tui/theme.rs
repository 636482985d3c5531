use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::{Category, Priority};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x23, 0x1E, 0x2B),
            text: Color::Rgb(0xD8, 0xD0, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xF2, 0x6B, 0x8A),
            dim: Color::Rgb(0x8A, 0x82, 0x9A),
            red: Color::Rgb(0xF2, 0x6B, 0x6B),
            yellow: Color::Rgb(0xF2, 0xD4, 0x7B),
            green: Color::Rgb(0x7B, 0xD9, 0x9A),
            blue: Color::Rgb(0x7B, 0xA7, 0xF2),
            purple: Color::Rgb(0xC5, 0x8A, 0xF2),
            selection_bg: Color::Rgb(0x3A, 0x2A, 0x3E),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (name, hex) in &ui.colors {
            let Some(color) = parse_hex_color(hex) else {
                continue;
            };
            match name.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "blue" => theme.blue = color,
                "purple" => theme.purple = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }
        theme
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Personal => self.purple,
            Category::Work => self.blue,
            Category::Shopping => self.green,
            Category::Health => self.red,
            Category::Education => self.yellow,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.green,
            Priority::Medium => self.yellow,
            Priority::High => self.red,
        }
    }
}
