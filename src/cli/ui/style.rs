use std::sync::{OnceLock, RwLock};

use colored::{Color, Colorize};

/// Presentation settings shared by tables, charts and headers.
#[derive(Clone, Debug)]
pub struct UiStyle {
    pub header_prefix: String,
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Option<Color>,
}

static STYLE: OnceLock<RwLock<UiStyle>> = OnceLock::new();

pub fn style() -> UiStyle {
    STYLE
        .get_or_init(|| RwLock::new(UiStyle::plain()))
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|_| UiStyle::plain())
}

pub fn refresh_style(use_color: bool) {
    let next = UiStyle::new(use_color);
    let lock = STYLE.get_or_init(|| RwLock::new(next.clone()));
    if let Ok(mut guard) = lock.write() {
        *guard = next;
    }
}

impl UiStyle {
    pub fn new(use_color: bool) -> Self {
        Self {
            header_prefix: "> ".into(),
            horizontal: '─',
            use_color,
            color_header: use_color.then_some(Color::BrightBlue),
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(40))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match self.color_header {
            Some(color) => text.color(color).bold().to_string(),
            None => text.bold().to_string(),
        }
    }

    /// Colors a whole rendered line; a no-op in plain mode.
    pub fn apply_tone(&self, text: &str, color: Option<Color>) -> String {
        match (self.use_color, color) {
            (true, Some(color)) => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }
}
