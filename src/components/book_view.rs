use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{StatusBar, StatusBarHint, StatusBarProps, StatusBarSection};

use super::status_line::footer_style;
use super::{CardGrid, CardGridProps, Component, GridCard, SearchBar, SearchBarProps, status_line};
use crate::action::Action;
use crate::reducer::BOOK_CARD_HEIGHT;
use crate::state::{AppState, Book, BookshelfState, LoadStatus, Screen};
use crate::theme::{
    ACCENT_GOLD, ACCENT_TEAL, BG_BASE, TEXT_DIM, TEXT_MAIN, badge_style, category_color,
};

pub const COVER_MARKER: &str = "[cover]";

pub struct BookViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Bookfinder screen: explicit search plus a client-side category selector
pub struct BookView {
    search: SearchBar,
    grid: CardGrid,
    status_bar: StatusBar,
}

impl BookView {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
            grid: CardGrid::new(),
            status_bar: StatusBar::new(),
        }
    }
}

pub fn book_card(book: &Book) -> GridCard {
    let mut tags: Vec<Span<'static>> = Vec::new();
    for category in book.category_list() {
        if !tags.is_empty() {
            tags.push(Span::raw(" "));
        }
        tags.push(Span::styled(
            format!(" {category} "),
            badge_style(category_color(category)),
        ));
    }
    if book.thumbnail.is_some() {
        if !tags.is_empty() {
            tags.push(Span::raw(" "));
        }
        tags.push(Span::styled(COVER_MARKER, Style::default().fg(ACCENT_TEAL)));
    }

    GridCard {
        title: Line::from(Span::styled(
            format!(" {} ", book.title),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )),
        body: vec![
            Line::from(Span::styled(
                book.author_line(),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::ITALIC),
            )),
            Line::from(tags),
            Line::from(Span::styled(
                book.description_text().to_string(),
                Style::default().fg(TEXT_DIM),
            )),
        ],
    }
}

fn category_selector(books: &BookshelfState) -> Line<'static> {
    let active = Style::default()
        .fg(BG_BASE)
        .bg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(TEXT_DIM);

    let mut spans = vec![Span::styled(" Category: ", Style::default().fg(TEXT_MAIN))];
    let all = if books.category.is_none() { active } else { idle };
    spans.push(Span::styled(" All ", all));
    for option in books.category_options() {
        let style = if books.category.as_deref() == Some(option.as_str()) {
            active
        } else {
            idle
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {option} "), style));
    }
    Line::from(spans)
}

fn empty_message(books: &BookshelfState) -> String {
    match (&books.category, &books.searched) {
        (Some(category), _) if !books.view.full.is_empty() => {
            format!("No results in \"{category}\"")
        }
        (_, Some(query)) => format!("No books found for \"{query}\""),
        _ => "No books found".to_string(),
    }
}

impl Component<Action> for BookView {
    type Props<'a> = BookViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let key = match event {
            EventKind::Key(key) => key,
            EventKind::Scroll { delta, .. } => {
                return vec![Action::GridMove(if *delta < 0 { -1 } else { 1 })];
            }
            _ => return Vec::new(),
        };

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return vec![Action::ScreenBack],
            KeyCode::Up => return vec![Action::GridMove(-1)],
            KeyCode::Down => return vec![Action::GridMove(1)],
            KeyCode::PageUp => return vec![Action::GridPage(-1)],
            KeyCode::PageDown => return vec![Action::GridPage(1)],
            KeyCode::Left if ctrl => return vec![Action::GridStep(-1)],
            KeyCode::Right if ctrl => return vec![Action::GridStep(1)],
            KeyCode::Tab => return vec![Action::BookCategoryNext],
            KeyCode::BackTab => return vec![Action::BookCategoryPrev],
            KeyCode::Char('f') if ctrl => return vec![Action::BookSearchInCategory],
            _ => {}
        }

        let search_props = SearchBarProps {
            value: &props.state.books.query,
            title: "Search books",
            placeholder: "Title, author, subject... (Enter to search)",
            is_focused: true,
            on_change: Action::BookQueryChange,
            on_submit: Action::BookQuerySubmit,
        };
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: BookViewProps<'_>) {
        let state = props.state;
        let books = &state.books;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [header, search, categories, status, grid, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(area);

        let title = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", Screen::Books.title()),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, header);

        self.search.render(
            frame,
            search,
            SearchBarProps {
                value: &books.query,
                title: "Search books",
                placeholder: "Title, author, subject... (Enter to search)",
                is_focused: props.is_focused,
                on_change: Action::BookQueryChange,
                on_submit: Action::BookQuerySubmit,
            },
        );

        frame.render_widget(Paragraph::new(category_selector(books)), categories);
        frame.render_widget(
            Paragraph::new(status_line(
                &books.view,
                state.tick,
                "books",
                "Type a query and press Enter to search",
            )),
            status,
        );

        if books.view.filtered.is_empty() && books.view.status == LoadStatus::Ready {
            frame.render_widget(
                Paragraph::new(empty_message(books))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                grid,
            );
        } else {
            let cards: Vec<GridCard> = books.view.filtered.iter().map(book_card).collect();
            self.grid.render(
                frame,
                grid,
                CardGridProps {
                    cards: &cards,
                    selected: books.selected,
                    card_height: BOOK_CARD_HEIGHT,
                    is_focused: props.is_focused,
                },
            );
        }

        let hints = [
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Tab", "Category"),
            StatusBarHint::new("Ctrl+F", "Search category"),
            StatusBarHint::new("Up/Down", "Move"),
            StatusBarHint::new("Esc", "Back"),
        ];
        let bar_props = StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&hints).with_separator("  "),
            right: StatusBarSection::empty(),
            style: footer_style(),
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, footer, bar_props);
    }
}
