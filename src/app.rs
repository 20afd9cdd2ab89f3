// App state and main event loop.
// Dispatches keyboard input, runs API calls on the runtime, and applies their results.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{Activity, Repo, RepoClient, RepoName, parse_items};
use crate::cache;
use crate::demo;
use crate::errors::{ErrorMessage, ErrorReporter, ErrorSlot};
use crate::state::{DashboardState, InputMode, Tab};
use crate::ui;

/// Where repositories come from.
pub enum Source {
    Api(Arc<RepoClient>),
    /// In-memory sample data; mutations apply locally.
    Demo(Vec<Repo>),
}

/// Completion of a background API call.
#[derive(Debug)]
pub enum AppEvent {
    ReposLoaded(Result<Vec<Repo>, String>),
    RepoAdded(String),
    RepoDeleted(String),
    ItemsTracked { id: String, count: usize },
}

/// Main application state.
pub struct App {
    pub dashboard: DashboardState,
    pub show_help: bool,
    pub should_quit: bool,
    source: Source,
    errors: ErrorSlot,
    error_rx: watch::Receiver<Option<ErrorMessage>>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    runtime: Handle,
    cache_path: Option<PathBuf>,
    cache_ttl: Duration,
}

impl App {
    pub fn new(source: Source, errors: ErrorSlot, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let error_rx = errors.subscribe();
        Self {
            dashboard: DashboardState::new(),
            show_help: false,
            should_quit: false,
            source,
            errors,
            error_rx,
            events_tx,
            events_rx,
            runtime,
            cache_path: None,
            cache_ttl: Duration::ZERO,
        }
    }

    /// Persist successful loads to `path` and show them on the next start
    /// while younger than `ttl`.
    pub fn with_cache(mut self, path: Option<PathBuf>, ttl: Duration) -> Self {
        self.cache_path = path;
        self.cache_ttl = ttl;
        self
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.source, Source::Demo(_))
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start();
        while !self.should_quit {
            self.process_events();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Show cached data if any, then load fresh data.
    #[allow(clippy::collapsible_if)]
    pub fn start(&mut self) {
        if let (Source::Api(_), Some(path)) = (&self.source, &self.cache_path) {
            if let Some(repos) = cache::load_repos(path, self.cache_ttl) {
                info!(count = repos.len(), "showing cached repos");
                self.dashboard.set_loaded(repos, true);
            }
        }
        self.refresh();
    }

    pub fn refresh(&mut self) {
        match &self.source {
            Source::Demo(repos) => {
                let repos = repos.clone();
                self.apply(AppEvent::ReposLoaded(Ok(repos)));
            }
            Source::Api(client) => {
                self.dashboard.set_loading();
                let client = client.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    let result = client.list_repos().await.map_err(|e| e.to_string());
                    let _ = tx.send(AppEvent::ReposLoaded(result));
                });
            }
        }
    }

    /// Drain finished API calls and pick up error slot changes.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
        if self.error_rx.has_changed().unwrap_or(false) {
            self.dashboard.error = self.error_rx.borrow_and_update().clone();
        }
    }

    /// Apply the outcome of an API call.
    ///
    /// Results are applied in arrival order; a slow, stale list response can
    /// overwrite a newer one.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReposLoaded(Ok(repos)) => {
                if let (Source::Api(_), Some(path)) = (&self.source, &self.cache_path) {
                    if let Err(e) = cache::save_repos(path, &repos) {
                        warn!(error = %e, "failed to cache repos");
                    }
                }
                self.dashboard.set_loaded(repos, false);
            }
            AppEvent::ReposLoaded(Err(e)) => self.dashboard.set_error(e),
            AppEvent::RepoAdded(name) => {
                self.dashboard.status = Some(format!("Added repo {}", name));
                self.refresh();
            }
            AppEvent::RepoDeleted(id) => {
                self.dashboard.status = Some(format!("Deleted repo {}", id));
                self.refresh();
            }
            AppEvent::ItemsTracked { id, count } => {
                self.dashboard.status = Some(format!("Tracking {} new item(s) on {}", count, id));
                self.refresh();
            }
        }
    }

    pub fn add_repo(&mut self, name: String) {
        let name = name.trim().to_string();
        if name.is_empty() {
            return;
        }
        match &mut self.source {
            Source::Api(client) => {
                let client = client.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    if client.add_repo(&name).await.is_ok() {
                        let _ = tx.send(AppEvent::RepoAdded(name));
                    }
                });
            }
            Source::Demo(repos) => {
                if let Err(e) = name.parse::<RepoName>() {
                    self.errors.report(format!("Could not add repo {}: {}", name, e));
                    return;
                }
                let id = repos.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
                repos.push(Repo {
                    id: Some(id),
                    title: name.clone(),
                    last_commit: None,
                    activity: Activity::default(),
                });
                self.apply(AppEvent::RepoAdded(name));
            }
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.dashboard.selected_repo().map(Repo::api_id) else {
            return;
        };
        match &mut self.source {
            Source::Api(client) => {
                let client = client.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    if client.delete_repo(&id).await.is_ok() {
                        let _ = tx.send(AppEvent::RepoDeleted(id));
                    }
                });
            }
            Source::Demo(repos) => {
                repos.retain(|r| r.api_id() != id);
                self.apply(AppEvent::RepoDeleted(id));
            }
        }
    }

    /// Track items typed as `pr:1 issue:7` on the selected repo.
    pub fn track_items(&mut self, input: String) {
        let Some(id) = self.dashboard.selected_repo().map(Repo::api_id) else {
            return;
        };
        let items = match parse_items(&input) {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => return,
            Err(e) => {
                self.errors.report(format!("Unable to add items to repo {}: {}", id, e));
                return;
            }
        };
        match &self.source {
            Source::Api(client) => {
                let client = client.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    if client.track_items(&id, &items).await.is_ok() {
                        let count = items.len();
                        let _ = tx.send(AppEvent::ItemsTracked { id, count });
                    }
                });
            }
            Source::Demo(_) => {
                self.errors.report(format!(
                    "Unable to add items to repo {}: demo data cannot track items",
                    id
                ));
            }
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match self.dashboard.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::ConfirmDelete => {
                let confirmed = key.code == KeyCode::Char('y');
                self.dashboard.cancel_input();
                if confirmed {
                    self.delete_selected();
                }
            }
            mode => match key.code {
                KeyCode::Esc => self.dashboard.cancel_input(),
                KeyCode::Backspace => self.dashboard.pop_char(),
                KeyCode::Char(c) => self.dashboard.push_char(c),
                KeyCode::Enter => {
                    let input = self.dashboard.finish_input();
                    match mode {
                        InputMode::AddRepo => self.add_repo(input),
                        InputMode::TrackItems => self.track_items(input),
                        _ => {}
                    }
                }
                _ => {}
            },
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.dashboard.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.dashboard.select_prev(),
            KeyCode::Tab => self.dashboard.next_tab(),
            KeyCode::BackTab => self.dashboard.prev_tab(),
            KeyCode::Char('1') => self.dashboard.select_tab(Tab::All),
            KeyCode::Char('2') => self.dashboard.select_tab(Tab::Prs),
            KeyCode::Char('3') => self.dashboard.select_tab(Tab::Issues),
            KeyCode::Char('/') => self.dashboard.begin_input(InputMode::Search),
            KeyCode::Char('a') => self.dashboard.begin_input(InputMode::AddRepo),
            KeyCode::Char('t') if self.dashboard.selected_repo().is_some() => {
                self.dashboard.begin_input(InputMode::TrackItems)
            }
            KeyCode::Char('d') if self.dashboard.selected_repo().is_some() => {
                self.dashboard.begin_input(InputMode::ConfirmDelete)
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('c') => {
                self.errors.clear();
                self.dashboard.status = None;
            }
            KeyCode::Esc => self.dashboard.search = None,
            _ => {}
        }
    }
}

/// Build a demo-mode app populated with the sample repositories.
pub fn demo_source() -> Source {
    Source::Demo(demo::sample_repos(Utc::now()))
}
