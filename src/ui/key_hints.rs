//! Key hint footer for the terminal dialog and the device screen.
//!
//! Renders styled key badges followed by a description, separated by a
//! thin divider. Hints that do not fit are replaced by a `…+N` counter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Divider between hints.
const DIVIDER: &str = " \u{2502} ";

/// Style variant for a key hint badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyHintStyle {
    /// Gray badge.
    #[default]
    Normal,
    /// Red badge for closing or cancelling.
    Danger,
    /// Green badge for connecting.
    Success,
}

impl KeyHintStyle {
    /// Returns the background color for the key badge.
    #[must_use]
    pub const fn badge_bg(&self) -> Color {
        match self {
            Self::Normal => Color::DarkGray,
            Self::Danger => Color::Red,
            Self::Success => Color::Green,
        }
    }

    /// Returns the foreground color for the key badge text.
    #[must_use]
    pub const fn badge_fg(&self) -> Color {
        match self {
            Self::Normal | Self::Danger => Color::White,
            Self::Success => Color::Black,
        }
    }
}

/// A single key hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint<'a> {
    /// Key combination text (e.g., "Ctrl+T").
    pub key: &'a str,
    /// Description of the action (e.g., "Switch Tab").
    pub description: &'a str,
    /// Badge style.
    pub style: KeyHintStyle,
}

impl<'a> KeyHint<'a> {
    /// Creates a hint with the normal style.
    #[must_use]
    pub const fn new(key: &'a str, description: &'a str) -> Self {
        Self {
            key,
            description,
            style: KeyHintStyle::Normal,
        }
    }

    /// Creates a hint with a specific style.
    #[must_use]
    pub const fn styled(key: &'a str, description: &'a str, style: KeyHintStyle) -> Self {
        Self {
            key,
            description,
            style,
        }
    }

    /// Display width: ` key ` badge, a space, then the description.
    fn width(&self) -> usize {
        self.key.width() + 2 + 1 + self.description.width()
    }
}

/// One-row footer of key hints.
#[derive(Debug, Clone)]
pub struct HintFooter<'a> {
    hints: Vec<KeyHint<'a>>,
}

impl<'a> HintFooter<'a> {
    /// Creates a footer from hints in priority order.
    #[must_use]
    pub fn new(hints: Vec<KeyHint<'a>>) -> Self {
        Self { hints }
    }

    /// Returns how many hints fit in `width` columns.
    #[must_use]
    pub fn fitting(&self, width: usize) -> usize {
        let mut used = 1; // left padding
        let mut fits = 0;

        for (i, hint) in self.hints.iter().enumerate() {
            let divider = if i > 0 { DIVIDER.width() } else { 0 };
            let needed = used + divider + hint.width();
            if needed > width {
                break;
            }
            used = needed;
            fits += 1;
        }

        fits
    }
}

impl Widget for HintFooter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bar = Style::default().bg(Color::Black).fg(Color::DarkGray);
        let row = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(row, bar);

        let right = area.x + area.width;
        let fits = self.fitting(usize::from(area.width));
        let mut x = area.x + 1;

        for (i, hint) in self.hints.iter().take(fits).enumerate() {
            if i > 0 {
                x = buf.set_stringn(x, area.y, DIVIDER, usize::from(right - x), bar).0;
            }

            let badge = Style::default()
                .bg(hint.style.badge_bg())
                .fg(hint.style.badge_fg())
                .add_modifier(Modifier::BOLD);
            let key = format!(" {} ", hint.key);
            x = buf.set_stringn(x, area.y, &key, usize::from(right - x), badge).0;

            let desc = format!(" {}", hint.description);
            let desc_style = Style::default().fg(Color::Gray).bg(Color::Black);
            x = buf.set_stringn(x, area.y, &desc, usize::from(right - x), desc_style).0;
        }

        let remaining = self.hints.len().saturating_sub(fits);
        if remaining > 0 && x < right {
            let indicator = format!(" \u{2026}+{}", remaining);
            buf.set_stringn(x, area.y, &indicator, usize::from(right - x), bar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_row(footer: HintFooter, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        footer.render(area, &mut buf);
        (0..width)
            .map(|x| {
                buf.cell((x, 0))
                    .map_or(' ', |c| c.symbol().chars().next().unwrap_or(' '))
            })
            .collect()
    }

    #[test]
    fn test_all_hints_fit() {
        let footer = HintFooter::new(vec![
            KeyHint::new("Tab", "Next Field"),
            KeyHint::styled("Enter", "Connect", KeyHintStyle::Success),
            KeyHint::styled("Esc", "Cancel", KeyHintStyle::Danger),
        ]);
        let row = render_row(footer, 80);

        assert!(row.contains("Tab"));
        assert!(row.contains("Next Field"));
        assert!(row.contains("Connect"));
        assert!(row.contains("Cancel"));
        assert!(!row.contains('\u{2026}'));
    }

    #[test]
    fn test_overflow_shows_counter() {
        let footer = HintFooter::new(vec![
            KeyHint::new("Tab", "Next Field"),
            KeyHint::new("Ctrl+T", "Switch Tab"),
            KeyHint::styled("Esc", "Cancel", KeyHintStyle::Danger),
        ]);
        assert_eq!(footer.fitting(20), 1);

        let row = render_row(footer, 24);
        assert!(row.contains("Next Field"));
        assert!(row.contains("+2"));
    }

    #[test]
    fn test_zero_width_is_noop() {
        let footer = HintFooter::new(vec![KeyHint::new("Tab", "Next Field")]);
        assert_eq!(footer.fitting(0), 0);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        footer.render(area, &mut buf);
    }
}
