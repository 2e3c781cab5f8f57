pub mod app;
pub mod event;
pub mod feedback;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::domain::Language;
use crate::gesture::RefreshGestureController;

use self::app::{FetchOutcome, TuiApp};
use self::event::{Action, AppEvent, EventHandler};
use self::feedback::{ChannelReload, TerminalBell};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = &ctx.config;
    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();

    let gesture = RefreshGestureController::with_haptics(
        config.gesture.clone(),
        ChannelReload::new(reload_tx),
        TerminalBell::new(config.gesture.haptics),
    );
    let mut read_state = ctx.read_state();
    read_state.load();

    let mut tui_app = TuiApp::new(ctx.language, read_state, gesture);
    let event_handler = EventHandler::new(Duration::from_millis(50));

    let language = tui_app.begin_fetch();
    spawn_fetch(&ctx, language, fetch_tx.clone());

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = config.keybindings.get_action(&key);

                // The modal swallows everything but closing and quitting.
                if tui_app.show_disclaimer
                    && !matches!(action, Action::Close | Action::ShowDisclaimer | Action::Quit)
                {
                    continue;
                }

                match action {
                    Action::Quit => {
                        tui_app.should_quit = true;
                    }
                    Action::MoveUp => {
                        tui_app.move_up();
                    }
                    Action::MoveDown => {
                        tui_app.move_down();
                    }
                    Action::NextPage => {
                        tui_app.next_page();
                    }
                    Action::PrevPage => {
                        tui_app.prev_page();
                    }
                    Action::Toggle => {
                        tui_app.toggle_selected();
                    }
                    Action::OpenInBrowser => {
                        if let Some(url) = tui_app.take_link_to_open() {
                            if let Err(e) = open::that(&url) {
                                tui_app.set_status(format!("Failed to open browser: {}", e));
                            }
                        }
                    }
                    Action::Refresh => {
                        if !tui_app.loading {
                            let language = tui_app.begin_fetch();
                            spawn_fetch(&ctx, language, fetch_tx.clone());
                        }
                    }
                    Action::SwitchLanguage => {
                        let language = tui_app.switch_language();
                        spawn_fetch(&ctx, language, fetch_tx.clone());
                    }
                    Action::ShowDisclaimer => {
                        tui_app.toggle_disclaimer();
                    }
                    Action::Close => {
                        tui_app.close();
                    }
                    Action::None => {}
                }
            }
            AppEvent::Mouse(mouse) => {
                if !tui_app.show_disclaimer {
                    tui_app.handle_mouse(mouse);
                }
            }
            AppEvent::Resize | AppEvent::Tick => {}
        }

        tui_app.tick();

        // Reloads fired by the gesture. Several queued in one frame still fetch once.
        let mut reload_requested = false;
        while reload_rx.try_recv().is_ok() {
            reload_requested = true;
        }
        if reload_requested && !tui_app.loading {
            let language = tui_app.begin_fetch();
            spawn_fetch(&ctx, language, fetch_tx.clone());
        }

        while let Ok(outcome) = fetch_rx.try_recv() {
            tui_app.apply_fetch(outcome);
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_fetch(ctx: &Arc<AppContext>, language: Language, tx: UnboundedSender<FetchOutcome>) {
    let source = ctx.source.clone();
    tracing::debug!("Fetching {} news", language);

    tokio::spawn(async move {
        let result = source.fetch(language).await;
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(FetchOutcome { language, result });
    });
}
