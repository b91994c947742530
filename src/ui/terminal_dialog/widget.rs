//! Terminal dialog widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, StatefulWidget, Widget},
};

use crate::credentials::Credential;
use crate::session::AuthMethod;
use crate::ui::element_map::{ElementId, ElementMap};

use super::state::TerminalDialog;
use super::widget_render::{render_password_tab, render_public_key_tab, render_tabs, render_trigger};

/// Widget rendering the dialog trigger and, when visible, the dialog popup.
///
/// The element map receives the stable identifier and area of every
/// interactive element drawn.
pub struct TerminalDialogWidget<'a> {
    /// Dialog state.
    dialog: &'a TerminalDialog,
    /// Saved keys offered on the PublicKey tab.
    credentials: &'a [Credential],
    /// Externally owned visibility flag.
    show: bool,
    /// Where the trigger goes. Defaults to the first row of the area.
    trigger_area: Option<Rect>,
}

impl<'a> TerminalDialogWidget<'a> {
    /// Creates a new dialog widget.
    #[must_use]
    pub fn new(dialog: &'a TerminalDialog, credentials: &'a [Credential]) -> Self {
        Self {
            dialog,
            credentials,
            show: false,
            trigger_area: None,
        }
    }

    /// Sets the externally owned `show` flag.
    #[must_use]
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Sets where the trigger is drawn.
    #[must_use]
    pub fn trigger_area(mut self, area: Rect) -> Self {
        self.trigger_area = Some(area);
        self
    }

    /// Calculates the popup area.
    fn popup_area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(8).min(64);
        let height = area.height.saturating_sub(4).min(16);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height)
    }

    fn render_popup(&self, area: Rect, buf: &mut Buffer, map: &mut ElementMap) {
        let popup_area = Self::popup_area(area);

        Clear.render(popup_area, buf);

        let title_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .title(Span::styled(
                format!(" Connect to {} ", self.dialog.target()),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        map.register(ElementId::TerminalDialog, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        render_tabs(self.dialog, chunks[0], buf, map);

        let sep = "\u{2500}".repeat(usize::from(chunks[1].width));
        buf.set_string(
            chunks[1].x,
            chunks[1].y,
            &sep,
            Style::default().fg(Color::DarkGray),
        );

        match self.dialog.active_method() {
            AuthMethod::Password => render_password_tab(self.dialog, chunks[2], buf, map),
            AuthMethod::PublicKey => {
                render_public_key_tab(self.dialog, self.credentials, chunks[2], buf, map);
            }
        }
    }
}

impl StatefulWidget for TerminalDialogWidget<'_> {
    type State = ElementMap;

    fn render(self, area: Rect, buf: &mut Buffer, map: &mut ElementMap) {
        let trigger = self
            .trigger_area
            .unwrap_or(Rect::new(area.x, area.y, area.width, 1))
            .intersection(area);
        render_trigger(self.dialog, trigger, buf, map);

        if self.dialog.is_visible(self.show) {
            self.render_popup(area, buf, map);
        }
    }
}
