use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::Screen;
use crate::theme::{BG_BASE, TEXT_DIM, TEXT_MAIN};

const BUTTON_WIDTH: u16 = 18;
const BUTTON_HEIGHT: u16 = 3;

pub struct LandingProps {
    pub selected: usize,
    pub is_focused: bool,
}

/// The "Choose Your Path" menu
#[derive(Default)]
pub struct Landing;

fn button_color(screen: Screen) -> Color {
    match screen {
        Screen::Pokedex => Color::Rgb(239, 68, 68),
        Screen::Books => Color::Rgb(234, 179, 8),
        Screen::Landing => TEXT_DIM,
    }
}

impl Component<Action> for Landing {
    type Props<'a> = LandingProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                Some(Action::LandingSelect(props.selected.saturating_sub(1)))
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                Some(Action::LandingSelect(props.selected + 1))
            }
            KeyCode::Enter => Some(Action::LandingConfirm),
            KeyCode::Char('1') => Some(Action::ScreenOpen(Screen::Pokedex)),
            KeyCode::Char('2') => Some(Action::ScreenOpen(Screen::Books)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LandingProps) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [title_area, buttons_area, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(2),
        ])
        .flex(Flex::Center)
        .areas(area);

        let title = Paragraph::new(Line::from(Screen::Landing.title()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let buttons = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 2])
            .flex(Flex::Center)
            .spacing(4)
            .split(buttons_area);
        for (idx, (screen, button_area)) in Screen::MENU.iter().zip(buttons.iter()).enumerate() {
            let color = button_color(*screen);
            let selected = idx == props.selected;
            let border = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_DIM)
            };
            let label = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(color)
            };
            let button = Paragraph::new(Line::from(format!(" {} {} ", idx + 1, screen.title())))
                .alignment(Alignment::Center)
                .style(label)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border),
                );
            frame.render_widget(button, *button_area);
        }

        let hint = Paragraph::new(vec![Line::default(), Line::from("Enter to open  ·  q to quit")])
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM));
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn actions_for(event: EventKind, selected: usize) -> Vec<Action> {
        let mut component = Landing;
        component
            .handle_event(
                &event,
                LandingProps {
                    selected,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_number_keys_open_directly() {
        actions_for(EventKind::Key(key("1")), 0).assert_first(Action::ScreenOpen(Screen::Pokedex));
        actions_for(EventKind::Key(key("2")), 0).assert_first(Action::ScreenOpen(Screen::Books));
    }

    #[test]
    fn test_navigation_and_confirm() {
        actions_for(EventKind::Key(key("j")), 0).assert_first(Action::LandingSelect(1));
        actions_for(EventKind::Key(key("k")), 0).assert_first(Action::LandingSelect(0));
        let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        actions_for(enter, 1).assert_first(Action::LandingConfirm);
    }

    #[test]
    fn test_escape_quits() {
        let esc = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        actions_for(esc, 0).assert_first(Action::Quit);
    }

    #[test]
    fn test_render_shows_both_paths() {
        let mut render = RenderHarness::new(60, 16);
        let mut component = Landing;

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                LandingProps {
                    selected: 0,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Choose Your Path"));
        assert!(output.contains("Pokemon"));
        assert!(output.contains("Bookfinder"));
    }
}
