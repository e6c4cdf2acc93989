use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::grid_columns;
use crate::theme::{ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};

/// One rendered cell of the grid
#[derive(Clone, Debug, Default)]
pub struct GridCard {
    pub title: Line<'static>,
    pub body: Vec<Line<'static>>,
}

pub struct CardGridProps<'a> {
    pub cards: &'a [GridCard],
    pub selected: usize,
    pub card_height: u16,
    pub is_focused: bool,
}

/// Responsive card grid; keeps the selected row scrolled into view.
#[derive(Default)]
pub struct CardGrid {
    scroll_row: usize,
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First visible row after bringing `target` into a window of `visible` rows.
pub fn scroll_to(current: usize, target: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if target < current {
        target
    } else if target >= current + visible {
        target + 1 - visible
    } else {
        current
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &GridCard, selected: bool, focused: bool) {
    let (border, bg) = if selected {
        let mut style = Style::default().fg(ACCENT_TEAL);
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        (style, BG_HIGHLIGHT)
    } else {
        (Style::default().fg(TEXT_DIM), BG_PANEL)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(card.title.clone())
        .style(Style::default().bg(bg).fg(TEXT_MAIN));
    let body = Paragraph::new(card.body.clone())
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.cards.is_empty() || area.height == 0 || props.card_height == 0 {
            self.scroll_row = 0;
            return;
        }

        let columns = grid_columns(area.width);
        let visible_rows = (area.height / props.card_height).max(1) as usize;
        let selected = props.selected.min(props.cards.len() - 1);
        let total_rows = props.cards.len().div_ceil(columns);
        self.scroll_row = scroll_to(self.scroll_row, selected / columns, visible_rows)
            .min(total_rows.saturating_sub(1));

        let rows = Layout::vertical(vec![Constraint::Length(props.card_height); visible_rows])
            .split(area);
        let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

        for (offset, row_area) in rows.iter().enumerate() {
            let row = self.scroll_row + offset;
            let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
            for (column, cell) in cells.iter().enumerate() {
                let index = row * columns + column;
                let Some(card) = props.cards.get(index) else {
                    return;
                };
                render_card(frame, *cell, card, index == selected, props.is_focused);
            }
        }
    }
}
