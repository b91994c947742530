//! Terminal dialog rendering functions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::credentials::Credential;
use crate::session::AuthMethod;
use crate::ui::element_map::{ElementId, ElementMap};
use crate::ui::key_hints::{HintFooter, KeyHint, KeyHintStyle};

use super::state::TerminalDialog;
use super::types::DialogField;

/// Label of the full connect button.
const CONNECT_LABEL: &str = " \u{25b6} Connect ";

/// Console icon of the compact trigger.
const CONSOLE_ICON: &str = ">_";

/// Label of the menu item paired with the console icon.
const CONSOLE_ITEM_LABEL: &str = "Open console";

/// Renders the trigger: the full button, or the icon + menu item pair.
pub fn render_trigger(dialog: &TerminalDialog, area: Rect, buf: &mut Buffer, map: &mut ElementMap) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y, area.width, 1);

    if dialog.enable_connect_button() {
        let style = if dialog.target().is_empty() {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        let button = clipped(row, CONNECT_LABEL.width());
        buf.set_stringn(button.x, button.y, CONNECT_LABEL, usize::from(button.width), style);
        map.register(ElementId::ConnectButton, button);
        return;
    }

    let icon = clipped(row, CONSOLE_ICON.width());
    buf.set_stringn(
        icon.x,
        icon.y,
        CONSOLE_ICON,
        usize::from(icon.width),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    );
    map.register(ElementId::ConsoleIcon, icon);

    let item_x = icon.x + icon.width + 1;
    if item_x < row.x + row.width {
        let rest = Rect::new(item_x, row.y, row.x + row.width - item_x, 1);
        let item = clipped(rest, CONSOLE_ITEM_LABEL.width());
        buf.set_stringn(
            item.x,
            item.y,
            CONSOLE_ITEM_LABEL,
            usize::from(item.width),
            Style::default().fg(Color::White),
        );
        map.register(ElementId::ConsoleItem, item);
    }
}

/// Returns the leftmost `width` columns of `area`.
fn clipped(area: Rect, width: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    Rect::new(area.x, area.y, width, area.height.min(1))
}

/// Renders the tab headers in fixed order.
pub fn render_tabs(dialog: &TerminalDialog, area: Rect, buf: &mut Buffer, map: &mut ElementMap) {
    let right = area.x + area.width;
    let mut x = area.x;

    for method in AuthMethod::ALL {
        if method.index() > 0 && x < right {
            x = buf
                .set_stringn(x, area.y, "\u{2502}", usize::from(right - x), Style::default().fg(Color::DarkGray))
                .0;
        }
        if x >= right {
            break;
        }

        let style = if method == dialog.active_method() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = format!(" {} ", method.label());
        let start = x;
        x = buf.set_stringn(x, area.y, &label, usize::from(right - x), style).0;
        map.register(ElementId::Tab(method), Rect::new(start, area.y, x - start, 1));
    }
}

/// Renders a labelled text input.
fn render_input(
    label_area: Rect,
    input_area: Rect,
    buf: &mut Buffer,
    label: &str,
    value: &str,
    is_active: bool,
    is_missing: bool,
) {
    let label_style = if is_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Paragraph::new(label).style(label_style).render(label_area, buf);

    if is_missing {
        let note = "Required";
        let x = label_area.x + u16::try_from(label.width() + 1).unwrap_or(0);
        if x < label_area.x + label_area.width {
            let room = usize::from(label_area.x + label_area.width - x);
            buf.set_stringn(x, label_area.y, note, room, Style::default().fg(Color::Red));
        }
    }

    let input_text = if is_active {
        format!("{}_", value)
    } else {
        value.to_string()
    };
    Paragraph::new(input_text)
        .style(Style::default().bg(Color::DarkGray))
        .render(input_area, buf);
}

/// Renders the submit button of the active tab.
fn render_connect_button(
    dialog: &TerminalDialog,
    id: ElementId,
    area: Rect,
    buf: &mut Buffer,
    map: &mut ElementMap,
) {
    let label = " Connect ";
    let width = u16::try_from(label.len()).unwrap_or(0).min(area.width);
    let x = area.x + (area.width - width) / 2;
    let button = Rect::new(x, area.y, width, 1);

    let focused = dialog.focused_field() == DialogField::Connect;
    let style = match (dialog.is_form_valid(), focused) {
        (false, _) => Style::default().fg(Color::DarkGray).bg(Color::Black),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::LightGreen)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        (true, false) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    };

    buf.set_stringn(button.x, button.y, label, usize::from(button.width), style);
    map.register(id, button);
}

/// Renders the inline rejection message.
fn render_error(dialog: &TerminalDialog, area: Rect, buf: &mut Buffer) {
    if let Some(err) = dialog.error() {
        Paragraph::new(err.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .render(area, buf);
    }
}

/// Renders the Password tab body.
pub fn render_password_tab(dialog: &TerminalDialog, area: Rect, buf: &mut Buffer, map: &mut ElementMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let focused = dialog.focused_field();
    let validity = dialog.validity();

    render_input(
        chunks[0],
        chunks[1],
        buf,
        "Username:",
        dialog.username(),
        focused == DialogField::Username,
        validity.is_missing(DialogField::Username),
    );
    map.register(ElementId::UsernameField, chunks[1]);

    let masked = "*".repeat(dialog.password().chars().count());
    render_input(
        chunks[2],
        chunks[3],
        buf,
        "Password:",
        &masked,
        focused == DialogField::Password,
        validity.is_missing(DialogField::Password),
    );
    map.register(ElementId::PasswordField, chunks[3]);

    render_error(dialog, chunks[4], buf);
    render_connect_button(dialog, ElementId::ConnectButton, chunks[5], buf, map);

    let hints = vec![
        KeyHint::new("Tab", "Next Field"),
        KeyHint::new("Ctrl+T", "Switch Tab"),
        KeyHint::styled("Enter", "Connect", KeyHintStyle::Success),
        KeyHint::styled("Esc", "Cancel", KeyHintStyle::Danger),
    ];
    HintFooter::new(hints).render(chunks[6], buf);
}

/// Returns the first visible row of the key list.
#[must_use]
pub fn key_list_offset(selected: Option<usize>, height: u16) -> usize {
    let height = usize::from(height.max(1));
    selected.map_or(0, |i| (i + 1).saturating_sub(height))
}

/// Renders the PublicKey tab body.
pub fn render_public_key_tab(
    dialog: &TerminalDialog,
    credentials: &[Credential],
    area: Rect,
    buf: &mut Buffer,
    map: &mut ElementMap,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let focused = dialog.focused_field();
    let validity = dialog.validity();

    render_input(
        chunks[0],
        chunks[1],
        buf,
        "Username:",
        dialog.username(),
        focused == DialogField::Username,
        validity.is_missing(DialogField::Username),
    );
    map.register(ElementId::Username2Field, chunks[1]);

    let selector_active = focused == DialogField::PrivateKey;
    let label_style = if selector_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let label = if validity.is_missing(DialogField::PrivateKey) {
        "Private key: Required"
    } else {
        "Private key:"
    };
    Paragraph::new(label).style(label_style).render(chunks[2], buf);

    render_key_list(dialog, credentials, chunks[3], buf, selector_active);
    map.register(ElementId::PrivateKeysSelect, chunks[3]);

    render_error(dialog, chunks[4], buf);
    render_connect_button(dialog, ElementId::Connect2Button, chunks[5], buf, map);

    let hints = vec![
        KeyHint::new("Tab", "Next Field"),
        KeyHint::new("\u{2191}\u{2193}", "Select Key"),
        KeyHint::new("Ctrl+T", "Switch Tab"),
        KeyHint::styled("Enter", "Connect", KeyHintStyle::Success),
        KeyHint::styled("Esc", "Cancel", KeyHintStyle::Danger),
    ];
    HintFooter::new(hints).render(chunks[6], buf);
}

/// Renders the saved key list.
fn render_key_list(
    dialog: &TerminalDialog,
    credentials: &[Credential],
    area: Rect,
    buf: &mut Buffer,
    active: bool,
) {
    buf.set_style(area, Style::default().bg(Color::DarkGray));

    if credentials.is_empty() {
        Paragraph::new("No private keys saved")
            .style(Style::default().fg(Color::Gray).bg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let selected = dialog.selected_key();
    let offset = key_list_offset(selected, area.height);

    for (row, (index, key)) in credentials
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(area.height))
        .enumerate()
    {
        let is_selected = selected == Some(index);
        let style = match (is_selected, active) {
            (true, true) => Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().bg(Color::DarkGray).fg(Color::Cyan),
            (false, _) => Style::default().bg(Color::DarkGray).fg(Color::White),
        };
        let marker = if is_selected { "\u{25b8} " } else { "  " };
        let y = area.y + u16::try_from(row).unwrap_or(0);
        buf.set_stringn(
            area.x,
            y,
            format!("{}{}", marker, key.name),
            usize::from(area.width),
            style,
        );
    }
}
