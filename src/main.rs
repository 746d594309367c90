//! Pokedex card lookup TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokecard::action::Action;
use pokecard::api;
use pokecard::components::{CardDisplay, CardDisplayProps, Component};
use pokecard::effect::Effect;
use pokecard::reducer::reducer;
use pokecard::sprite;
use pokecard::state::{AppState, EXIT_ANIM_DELAY_MS, LOADING_TICK_MS};

/// Pokedex card lookup TUI
#[derive(Parser, Debug)]
#[command(name = "pokecard")]
#[command(about = "Look up a Pokemon and render its card, weaknesses included")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokecardComponentId {
    Card,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokecardContext {
    Main,
}

impl EventRoutingState<PokecardComponentId, PokecardContext> for AppState {
    fn focused(&self) -> Option<PokecardComponentId> {
        Some(PokecardComponentId::Card)
    }

    fn modal(&self) -> Option<PokecardComponentId> {
        None
    }

    fn binding_context(&self, _id: PokecardComponentId) -> PokecardContext {
        PokecardContext::Main
    }

    fn default_context(&self) -> PokecardContext {
        PokecardContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args { debug: debug_args } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PokecardUi {
    display: CardDisplay,
}

impl PokecardUi {
    fn new() -> Self {
        Self {
            display: CardDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokecardComponentId>,
    ) {
        event_ctx.set_component_area(PokecardComponentId::Card, area);
        let props = CardDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_card_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CardDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
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
    let ui = Rc::new(RefCell::new(PokecardUi::new()));
    let mut bus: EventBus<AppState, Action, PokecardComponentId, PokecardContext> = EventBus::new();
    let keybindings: Keybindings<PokecardContext> = Keybindings::new();

    let ui_card = Rc::clone(&ui);
    bus.register(PokecardComponentId::Card, move |event, state| {
        ui_card.borrow_mut().handle_card_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
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

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::ScheduleLookup { input } => {
            // The exit transition stays visible for the delay before the
            // card content is blanked; resubmitting supersedes a pending
            // delay because the task key is fixed.
            ctx.tasks().spawn(TaskKey::new("lookup_delay"), async move {
                tokio::time::sleep(Duration::from_millis(EXIT_ANIM_DELAY_MS)).await;
                Action::LookupStart { input }
            });
        }
        Effect::FetchCard { query, variant } => {
            let key = format!("card_{}_{}", variant.label(), query);
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_card(&query, variant).await {
                    Ok(card) => Action::CardDidLoad { card },
                    Err(error) => Action::CardDidError {
                        variant,
                        query,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::LoadSprite { url } => {
            ctx.tasks().spawn(TaskKey::new("sprite"), async move {
                match api::fetch_bytes(&url).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes) {
                        Ok(sprite) => Action::SpriteDidLoad(sprite),
                        Err(error) => Action::SpriteDidError(error),
                    },
                    Err(error) => Action::SpriteDidError(error.to_string()),
                }
            });
        }
    }
}
