use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Borders,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{BaseStyle, Padding, StatusBarStyle};

use crate::state::{LoadStatus, ViewState};
use crate::theme::{
    ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN, spinner_frame,
};

/// One-line fetch summary: error, spinner, counts or the idle hint.
pub fn status_line<T>(view: &ViewState<T>, tick: u64, noun: &str, idle_hint: &str) -> Line<'static> {
    if let Some(error) = &view.error {
        return Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.clone(), Style::default().fg(ERROR_RED)),
        ]);
    }

    match view.status {
        LoadStatus::Loading => Line::from(Span::styled(
            format!("{} Loading...", spinner_frame(tick)),
            Style::default().fg(ACCENT_GOLD),
        )),
        LoadStatus::Ready | LoadStatus::Failed => Line::from(Span::styled(
            format!("Showing {} of {} {noun}", view.filtered.len(), view.full.len()),
            Style::default().fg(TEXT_DIM),
        )),
        LoadStatus::Idle => Line::from(Span::styled(
            idle_hint.to_string(),
            Style::default().fg(TEXT_DIM),
        )),
    }
}

/// Bordered key-hint footer shared by the grid screens
pub fn footer_style() -> StatusBarStyle {
    StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    }
}
