use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::refresh;
use crate::app::state::DashboardState;
use crate::app::update::update;
use crate::app::view;
use crate::github::GithubClient;
use crate::github::contributions::ContributionsClient;
use crate::util::config::AppConfig;

pub async fn run(
    config: AppConfig,
    client: GithubClient,
    contributions: ContributionsClient,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, config, client, contributions).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    client: GithubClient,
    contributions: ContributionsClient,
) -> Result<()> {
    let mut state = DashboardState::new(
        config.demo.blog_posts.clone(),
        config.demo.achievements.clone(),
    );

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Single-slot refresh task. While it is unfinished, further refresh
    // requests (timer or manual) are no-ops; on exit it is aborted so no
    // fetch outlives the app.
    let mut refresh_task: Option<JoinHandle<()>> = None;

    spawn_side_effect(
        SideEffect::RefreshAll,
        &config,
        &client,
        &contributions,
        &action_tx,
        &mut refresh_task,
    );

    let mut event_stream = crossterm::event::EventStream::new();

    let mut refresh_timer = tokio::time::interval(tokio::time::Duration::from_secs(
        config.dashboard.refresh_interval_secs,
    ));
    // First tick fires immediately (already handled by initial fetch above)
    refresh_timer.tick().await;

    let mut ui_timer = tokio::time::interval(tokio::time::Duration::from_secs(1));

    loop {
        // Render
        terminal.draw(|f| view::render(f, &state))?;

        if state.should_quit {
            break;
        }

        // Wait for events
        tokio::select! {
            // Terminal events
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event
                    && let Some(action) = map_event_to_action(&event, &state) {
                        let effects = update(&mut state, action);
                        for effect in effects {
                            spawn_side_effect(
                                effect,
                                &config,
                                &client,
                                &contributions,
                                &action_tx,
                                &mut refresh_task,
                            );
                        }
                    }
            }
            // Actions from background tasks
            Some(action) = action_rx.recv() => {
                let effects = update(&mut state, action);
                for effect in effects {
                    spawn_side_effect(
                        effect,
                        &config,
                        &client,
                        &contributions,
                        &action_tx,
                        &mut refresh_task,
                    );
                }
            }
            // Auto-refresh timer
            _ = refresh_timer.tick() => {
                let in_flight = refresh_task.as_ref().is_some_and(|t| !t.is_finished());
                if in_flight {
                    debug!("Refresh already in flight, skipping timer tick");
                } else {
                    let effects = update(&mut state, Action::Refresh);
                    for effect in effects {
                        spawn_side_effect(
                            effect,
                            &config,
                            &client,
                            &contributions,
                            &action_tx,
                            &mut refresh_task,
                        );
                    }
                }
            }
            // Notification pruning
            _ = ui_timer.tick() => {
                update(&mut state, Action::Tick);
            }
        }
    }

    // Cancel any outstanding refresh so nothing updates state after teardown
    if let Some(task) = refresh_task.take() {
        task.abort();
    }

    Ok(())
}

fn map_event_to_action(event: &Event, state: &DashboardState) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    // The error screen replaces the whole view; only retry, dismiss, quit
    if state.error_message.is_some() {
        return match code {
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Esc => Some(Action::DismissError),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            _ => None,
        };
    }

    // Handle search mode
    if state.search_active {
        return match code {
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Enter => Some(Action::ToggleSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(*c)),
            _ => None,
        };
    }

    // Normal mode
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(Action::Select),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => Some(Action::Back),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('o') => Some(Action::OpenInBrowser),
        KeyCode::Char('/') => Some(Action::ToggleSearch),
        KeyCode::Char('s') => Some(Action::CycleSort),
        KeyCode::Char('f') => Some(Action::CycleLanguageFilter),
        KeyCode::Char('d') => Some(Action::CycleDateRange),
        KeyCode::Char('i') => Some(Action::ToggleInfiniteScroll),
        _ => None,
    }
}

fn spawn_side_effect(
    effect: SideEffect,
    config: &AppConfig,
    client: &GithubClient,
    contributions: &ContributionsClient,
    action_tx: &mpsc::UnboundedSender<Action>,
    refresh_task: &mut Option<JoinHandle<()>>,
) {
    match effect {
        SideEffect::RefreshAll => {
            if refresh_task.as_ref().is_some_and(|t| !t.is_finished()) {
                debug!("Refresh already in flight, ignoring");
                return;
            }

            let client = client.clone();
            let contributions = contributions.clone();
            let username = config.github.username.clone();
            let tx = action_tx.clone();

            *refresh_task = Some(tokio::spawn(async move {
                match refresh::fetch_snapshot(&client, &contributions, &username).await {
                    Ok(snapshot) => {
                        let _ = tx.send(Action::DataLoaded(DataPayload::Snapshot(Box::new(
                            snapshot,
                        ))));
                    }
                    Err(e) => {
                        error!(error = %e, "Refresh failed");
                        let _ = tx.send(Action::LoadError(format!(
                            "Failed to fetch GitHub data: {e}"
                        )));
                    }
                }
            }));
        }
        SideEffect::FetchRepoReadme { repo } => {
            let client = client.clone();
            let username = config.github.username.clone();
            let tx = action_tx.clone();

            tokio::spawn(async move {
                match client.fetch_readme(&username, &repo).await {
                    Ok(content) => {
                        let _ = tx.send(Action::DataLoaded(DataPayload::RepoReadme {
                            repo,
                            content,
                        }));
                    }
                    Err(e) => {
                        warn!(repo = %repo, error = %e, "README fetch failed");
                        let _ = tx.send(Action::DataLoaded(DataPayload::RepoReadmeFailed {
                            repo,
                            message: e.to_string(),
                        }));
                    }
                }
            });
        }
        SideEffect::OpenUrl(url) => {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = crate::util::browser::open_url(&url) {
                    error!(error = %e, "Failed to open URL");
                }
            });
        }
    }
}
