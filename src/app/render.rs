//! Rendering methods for the App.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::ui::TerminalDialogWidget;
use crate::ui::key_hints::{HintFooter, KeyHint, KeyHintStyle};

use super::App;

/// Columns reserved for the trigger at the right of the device row.
const TRIGGER_WIDTH: u16 = 16;

impl App {
    /// Renders the application.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.element_map.borrow_mut().clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let trigger_area = self.render_device_panel(frame, chunks[0]);
        self.render_body(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);

        let keys = self.keys();
        let widget = TerminalDialogWidget::new(&self.dialog, &keys)
            .show(self.show())
            .trigger_area(trigger_area);
        let mut map = self.element_map.borrow_mut();
        frame.render_stateful_widget(widget, area, &mut *map);
    }

    /// Renders the device row and returns where the trigger goes.
    fn render_device_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let block = Block::default()
            .title(" Device ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let target = self.dialog.target();
        let line = if target.is_empty() {
            Line::from(Span::styled(
                "No device selected",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled("\u{25cf} ", Style::default().fg(Color::Green)),
                Span::styled(
                    target.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(line), inner);

        let width = TRIGGER_WIDTH.min(inner.width);
        let label_end = inner.x + u16::try_from(target.width() + 3).unwrap_or(u16::MAX);
        let x = (inner.x + inner.width - width).max(label_end.min(inner.x + inner.width));
        Rect::new(x, inner.y, inner.x + inner.width - x, inner.height.min(1))
    }

    /// Renders the help text below the device row.
    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let text = if self.config.enable_connect_button {
            "Press Enter or click Connect to open a terminal on the device."
        } else {
            "Press Enter or click Open console to open a terminal on the device."
        };
        let body = Paragraph::new(text).style(Style::default().fg(Color::Gray));
        frame.render_widget(body, area.inner(ratatui::layout::Margin::new(1, 1)));
    }

    /// Renders the status bar.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if !self.status.is_empty() {
            let status = Paragraph::new(self.status.as_str())
                .style(Style::default().fg(Color::Black).bg(Color::Cyan));
            frame.render_widget(status, area);
            return;
        }

        let hints = vec![
            KeyHint::styled("Enter", "Open Console", KeyHintStyle::Success),
            KeyHint::new("Click", "Trigger"),
            KeyHint::styled("q", "Quit", KeyHintStyle::Danger),
        ];
        frame.render_widget(HintFooter::new(hints), area);
    }
}
