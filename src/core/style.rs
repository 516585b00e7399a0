//! Text styling for rendered fields
//!
//! A [`Style`] describes how a fragment looks; [`Style::paint`] is the only
//! place that decides between styled and plain output. Padding is applied
//! before the escape sequences are added, so the plain rendering is always the
//! styled rendering with its escapes removed.

use colored::Color;
use std::borrow::Cow;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    color: Option<Color>,
    bold: bool,
    dim: bool,
    width: Option<usize>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            color: None,
            bold: false,
            dim: false,
            width: None,
        }
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Left-align the text in a column of at least `width` characters
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn has_escapes(&self) -> bool {
        self.color.is_some() || self.bold || self.dim
    }

    /// Render `text` with this style, emitting ANSI escapes only when `colored`
    pub fn paint(&self, text: &str, colored: bool) -> String {
        let text = match self.width {
            Some(width) => format!("{:<width$}", text, width = width),
            None => text.to_string(),
        };

        if !colored || !self.has_escapes() {
            return text;
        }

        let mut codes: Vec<Cow<'static, str>> = Vec::with_capacity(3);
        if self.bold {
            codes.push(Cow::Borrowed("1"));
        }
        if self.dim {
            codes.push(Cow::Borrowed("2"));
        }
        if let Some(color) = self.color {
            codes.push(color.to_fg_str());
        }

        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }
}

/// Parse a color name such as `magenta`, `light-red` or `bright_blue`
pub fn parse_color(name: &str) -> Option<Color> {
    let normalized = name.trim().to_lowercase().replace(['_', ' '], "-");
    let (light, base) = match normalized
        .strip_prefix("light-")
        .or_else(|| normalized.strip_prefix("bright-"))
    {
        Some(base) => (true, base),
        None => (false, normalized.as_str()),
    };

    let color = match (light, base) {
        (false, "black") => Color::Black,
        (false, "red") => Color::Red,
        (false, "green") => Color::Green,
        (false, "yellow") => Color::Yellow,
        (false, "blue") => Color::Blue,
        (false, "magenta") => Color::Magenta,
        (false, "cyan") => Color::Cyan,
        (false, "white") => Color::White,
        (true, "black") => Color::BrightBlack,
        (true, "red") => Color::BrightRed,
        (true, "green") => Color::BrightGreen,
        (true, "yellow") => Color::BrightYellow,
        (true, "blue") => Color::BrightBlue,
        (true, "magenta") => Color::BrightMagenta,
        (true, "cyan") => Color::BrightCyan,
        (true, "white") => Color::BrightWhite,
        _ => return None,
    };
    Some(color)
}
