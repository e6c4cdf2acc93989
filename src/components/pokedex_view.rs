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
use crate::reducer::POKEMON_CARD_HEIGHT;
use crate::state::{AppState, LoadStatus, Pokemon, Screen};
use crate::theme::{
    ACCENT_GOLD, BG_BASE, TEXT_DIM, TEXT_MAIN, badge_style, format_name, type_color,
};

pub struct PokedexViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Pokedex screen: live name filter over the fetched index
pub struct PokedexView {
    search: SearchBar,
    grid: CardGrid,
    status_bar: StatusBar,
}

impl PokedexView {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
            grid: CardGrid::new(),
            status_bar: StatusBar::new(),
        }
    }
}

pub fn pokemon_card(pokemon: &Pokemon) -> GridCard {
    let mut badges = Vec::new();
    for name in pokemon.type_names() {
        if !badges.is_empty() {
            badges.push(Span::raw(" "));
        }
        badges.push(Span::styled(format!(" {name} "), badge_style(type_color(name))));
    }
    GridCard {
        title: Line::from(vec![
            Span::styled(format!(" #{} ", pokemon.id), Style::default().fg(ACCENT_GOLD)),
            Span::styled(
                format!("{} ", format_name(&pokemon.name)),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ),
        ]),
        body: vec![
            Line::from(Span::styled(
                format!("{:.1} kg", pokemon.weight_kg()),
                Style::default().fg(TEXT_DIM),
            )),
            Line::default(),
            Line::from(badges),
        ],
    }
}

impl Component<Action> for PokedexView {
    type Props<'a> = PokedexViewProps<'a>;

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
            KeyCode::F(5) => return vec![Action::PokedexFetch],
            _ => {}
        }

        let search_props = SearchBarProps {
            value: &props.state.pokedex.query,
            title: "Search by name",
            placeholder: "Type a name prefix...",
            is_focused: true,
            on_change: Action::PokedexQueryChange,
            on_submit: Action::PokedexQueryChange,
        };
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PokedexViewProps<'_>) {
        let state = props.state;
        let pokedex = &state.pokedex;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [header, search, status, grid, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(area);

        let title = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", Screen::Pokedex.title()),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, header);

        self.search.render(
            frame,
            search,
            SearchBarProps {
                value: &pokedex.query,
                title: "Search by name",
                placeholder: "Type a name prefix...",
                is_focused: props.is_focused,
                on_change: Action::PokedexQueryChange,
                on_submit: Action::PokedexQueryChange,
            },
        );

        frame.render_widget(
            Paragraph::new(status_line(
                &pokedex.view,
                state.tick,
                "Pokemon",
                "Press F5 to load the Pokedex",
            )),
            status,
        );

        if pokedex.view.filtered.is_empty() && pokedex.view.status == LoadStatus::Ready {
            let message = if pokedex.view.full.is_empty() {
                "The Pokedex is empty".to_string()
            } else {
                format!("No Pokemon start with \"{}\"", pokedex.query)
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                grid,
            );
        } else {
            let cards: Vec<GridCard> = pokedex.view.filtered.iter().map(pokemon_card).collect();
            self.grid.render(
                frame,
                grid,
                CardGridProps {
                    cards: &cards,
                    selected: pokedex.selected,
                    card_height: POKEMON_CARD_HEIGHT,
                    is_focused: props.is_focused,
                },
            );
        }

        let hints = [
            StatusBarHint::new("Up/Down", "Move"),
            StatusBarHint::new("PgUp/PgDn", "Page"),
            StatusBarHint::new("F5", "Refresh"),
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
