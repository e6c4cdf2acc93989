//! dexfinder - Pokedex and Bookfinder TUI

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dexfinder::action::Action;
use dexfinder::api;
use dexfinder::components::{
    BookView, BookViewProps, Component, Landing, LandingProps, PokedexView, PokedexViewProps,
};
use dexfinder::config::{BOOKS_BASE, DEFAULT_PAGE_SIZE, Endpoints, FanOut, POKEAPI_BASE};
use dexfinder::effect::Effect;
use dexfinder::reducer::reducer;
use dexfinder::state::{AppState, LOADING_TICK_MS, Screen};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StartScreen {
    Pokedex,
    Books,
}

impl From<StartScreen> for Screen {
    fn from(screen: StartScreen) -> Self {
        match screen {
            StartScreen::Pokedex => Screen::Pokedex,
            StartScreen::Books => Screen::Books,
        }
    }
}

/// Browse the first page of the Pokedex or search the book catalog
#[derive(Parser, Debug)]
#[command(name = "dexfinder")]
#[command(about = "Pokedex grid and Bookfinder in the terminal")]
struct Args {
    /// Open a screen directly instead of the landing menu
    #[arg(long, value_enum)]
    screen: Option<StartScreen>,

    /// Pokedex index page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Concurrent detail requests (1 = one at a time)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    fan_out: u16,

    /// Book search to run at startup
    #[arg(long)]
    query: Option<String>,

    #[arg(long, default_value = POKEAPI_BASE)]
    pokeapi_url: String,

    #[arg(long, default_value = BOOKS_BASE)]
    books_url: String,

    #[arg(long, default_value = "dexfinder.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Landing,
    Pokedex,
    Books,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Landing,
    Pokedex,
    Books,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        match self.screen {
            Screen::Landing => Some(DexComponentId::Landing),
            Screen::Pokedex => Some(DexComponentId::Pokedex),
            Screen::Books => Some(DexComponentId::Books),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        None
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Landing => DexContext::Landing,
            DexComponentId::Pokedex => DexContext::Pokedex,
            DexComponentId::Books => DexContext::Books,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Landing
    }
}

fn init_logging(path: &Path, level: LevelFilter) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(&args.log_file, log_level);

    let debug = DebugSession::new(args.debug);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let screen = args.screen.map(Screen::from).unwrap_or_default();
    let endpoints = Endpoints {
        pokeapi: args.pokeapi_url,
        books: args.books_url,
    };
    let fan_out = FanOut::from_limit(args.fan_out as usize);
    let page_size = args.page_size;
    let query = args.query;
    log::info!("dexfinder starting on {screen:?} (page size {page_size}, {fan_out:?})");

    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(
                AppState::new(screen, endpoints, page_size, fan_out).with_initial_query(query),
            )
        })
        .await
        .map_err(debug_error)?;
    if let Ok(size) = crossterm::terminal::size() {
        state.terminal_size = size;
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    log::info!("dexfinder exiting");
    Ok(())
}

struct DexUi {
    landing: Landing,
    pokedex: PokedexView,
    books: BookView,
}

impl DexUi {
    fn new() -> Self {
        Self {
            landing: Landing,
            pokedex: PokedexView::new(),
            books: BookView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let active = match state.screen {
            Screen::Landing => DexComponentId::Landing,
            Screen::Pokedex => DexComponentId::Pokedex,
            Screen::Books => DexComponentId::Books,
        };
        for id in [
            DexComponentId::Landing,
            DexComponentId::Pokedex,
            DexComponentId::Books,
        ] {
            if id != active {
                event_ctx.component_areas.remove(&id);
            }
        }
        event_ctx.set_component_area(active, area);

        let is_focused = render_ctx.is_focused();
        match state.screen {
            Screen::Landing => self.landing.render(
                frame,
                area,
                LandingProps {
                    selected: state.landing_selected,
                    is_focused,
                },
            ),
            Screen::Pokedex => self
                .pokedex
                .render(frame, area, PokedexViewProps { state, is_focused }),
            Screen::Books => self
                .books
                .render(frame, area, BookViewProps { state, is_focused }),
        }
    }

    fn handle_event(
        &mut self,
        id: DexComponentId,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<Action> = match id {
            DexComponentId::Landing => self
                .landing
                .handle_event(
                    event,
                    LandingProps {
                        selected: state.landing_selected,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            DexComponentId::Pokedex => self
                .pokedex
                .handle_event(
                    event,
                    PokedexViewProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            DexComponentId::Books => self
                .books
                .handle_event(
                    event,
                    BookViewProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
        };
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    for id in [
        DexComponentId::Landing,
        DexComponentId::Pokedex,
        DexComponentId::Books,
    ] {
        let ui = Rc::clone(&ui);
        bus.register(id, move |event, state| {
            ui.borrow_mut().handle_event(id, &event.kind, state)
        });
    }

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => HandlerResponse {
            actions: vec![Action::UiTerminalResize(width, height)],
            consumed: false,
            needs_render: true,
        },
        EventKind::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning one task per fetch attempt
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokedex {
            seq,
            base_url,
            page_size,
            fan_out,
        } => {
            log::info!("pokedex fetch #{seq}: {page_size} entries, {fan_out:?}");
            ctx.tasks()
                .spawn(TaskKey::new(format!("pokedex_{seq}")), async move {
                    match api::fetch_pokedex(&base_url, page_size, fan_out).await {
                        Ok(pokemon) => Action::PokedexDidLoad { seq, pokemon },
                        Err(err) => {
                            log::warn!("pokedex fetch #{seq} failed: {err}");
                            Action::PokedexDidError {
                                seq,
                                error: err.to_string(),
                            }
                        }
                    }
                });
        }
        Effect::SearchBooks {
            seq,
            base_url,
            query,
            category,
        } => {
            log::info!("book search #{seq}: {query:?} in {category:?}");
            ctx.tasks()
                .spawn(TaskKey::new(format!("books_{seq}")), async move {
                    match api::search_books(&base_url, &query, category.as_deref()).await {
                        Ok(books) => Action::BookDidLoad { seq, books },
                        Err(err) => {
                            log::warn!("book search #{seq} failed: {err}");
                            Action::BookDidError {
                                seq,
                                error: err.to_string(),
                            }
                        }
                    }
                });
        }
    }
}
