// Dashboard state management.
// Holds the loaded repositories, selection, search and text input for the view.

use ratatui::widgets::ListState;
use tracing::debug;

use crate::api::{Item, Repo};
use crate::errors::ErrorMessage;
use crate::search::{DEFAULT_FIELDS, SearchQuery};

use super::tabs::{Tab, TabSelector, items_of};

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// A repository together with the tab selection its view owns.
#[derive(Debug)]
pub struct RepoView {
    pub repo: Repo,
    pub tabs: TabSelector,
}

impl RepoView {
    pub fn new(repo: Repo) -> Self {
        let mut tabs = TabSelector::new();
        let title = repo.title.clone();
        tabs.on_change(move |tab| debug!(repo = %title, tab = tab.title(), "tab selected"));
        Self { repo, tabs }
    }

    /// Items under the current tab.
    pub fn items(&self) -> Vec<&Item> {
        items_of(&self.repo, self.tabs.current())
    }
}

/// What keystrokes currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    AddRepo,
    TrackItems,
    ConfirmDelete,
}

/// Complete state for the dashboard view.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub repos: LoadingState<Vec<RepoView>>,
    /// Selection in the repository list.
    pub list_state: ListState,
    pub mode: InputMode,
    /// Text being typed in the current input mode.
    pub input: String,
    pub search: Option<SearchQuery>,
    /// Mirror of the shared error slot.
    pub error: Option<ErrorMessage>,
    /// Last informational message ("Added repo ...").
    pub status: Option<String>,
    /// True while the shown list came from the local cache.
    pub from_cache: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self) {
        // Keep showing what we have while a refresh is in flight
        if self.repos.data().is_none() {
            self.repos = LoadingState::Loading;
        }
    }

    /// Replace the repo list. Views for repos that are still present keep
    /// their tab selection; the selected repo stays selected when possible.
    pub fn set_loaded(&mut self, repos: Vec<Repo>, from_cache: bool) {
        let selected_title = self.selected_repo().map(|r| r.title.clone());
        let mut previous = match std::mem::take(&mut self.repos) {
            LoadingState::Loaded(views) => views,
            _ => Vec::new(),
        };

        let views: Vec<RepoView> = repos
            .into_iter()
            .map(|repo| match previous.iter().position(|v| v.repo.title == repo.title) {
                Some(i) => {
                    let mut view = previous.swap_remove(i);
                    view.repo = repo;
                    view
                }
                None => RepoView::new(repo),
            })
            .collect();

        let selected = selected_title
            .and_then(|title| views.iter().position(|v| v.repo.title == title))
            .or(if views.is_empty() { None } else { Some(0) });

        self.repos = LoadingState::Loaded(views);
        self.list_state.select(selected);
        self.from_cache = from_cache;
    }

    /// A failed load only replaces the list when nothing is shown yet.
    pub fn set_error(&mut self, error: String) {
        if self.repos.data().is_none() {
            self.repos = LoadingState::Error(error);
            self.list_state.select(None);
        }
    }

    pub fn views(&self) -> &[RepoView] {
        self.repos.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_view(&self) -> Option<&RepoView> {
        let index = self.list_state.selected()?;
        self.views().get(index)
    }

    pub fn selected_view_mut(&mut self) -> Option<&mut RepoView> {
        let index = self.list_state.selected()?;
        self.repos.data_mut()?.get_mut(index)
    }

    pub fn selected_repo(&self) -> Option<&Repo> {
        self.selected_view().map(|v| &v.repo)
    }

    /// Select the next repository in the list.
    pub fn select_next(&mut self) {
        let len = self.views().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous repository in the list.
    pub fn select_prev(&mut self) {
        if self.views().is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if let Some(view) = self.selected_view_mut() {
            view.tabs.select(tab);
        }
    }

    pub fn next_tab(&mut self) {
        if let Some(view) = self.selected_view_mut() {
            view.tabs.select_next();
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(view) = self.selected_view_mut() {
            view.tabs.select_prev();
        }
    }

    /// Items of `view` under its tab, narrowed by the active search.
    pub fn visible_items<'a>(&self, view: &'a RepoView) -> Vec<&'a Item> {
        let items = view.items();
        match &self.search {
            Some(query) if !query.is_empty() => query.apply(&items).into_iter().copied().collect(),
            _ => items,
        }
    }

    /// Enter an input mode with an empty buffer. Search starts from the
    /// current query text.
    pub fn begin_input(&mut self, mode: InputMode) {
        self.input = match (mode, &self.search) {
            (InputMode::Search, Some(query)) => query.text().to_string(),
            _ => String::new(),
        };
        self.mode = mode;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        if self.mode == InputMode::Search {
            self.update_search();
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        if self.mode == InputMode::Search {
            self.update_search();
        }
    }

    /// Leave input mode, returning the typed text. Search keeps its query.
    pub fn finish_input(&mut self) -> String {
        self.mode = InputMode::Normal;
        std::mem::take(&mut self.input)
    }

    /// Abandon input. Cancelling a search also clears the query.
    pub fn cancel_input(&mut self) {
        if self.mode == InputMode::Search {
            self.search = None;
        }
        self.mode = InputMode::Normal;
        self.input.clear();
    }

    fn update_search(&mut self) {
        if self.input.is_empty() {
            self.search = None;
            return;
        }
        match SearchQuery::new(&self.input, DEFAULT_FIELDS) {
            Ok(query) => self.search = Some(query),
            Err(e) => debug!(error = %e, "keeping previous search"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Activity;

    fn item(title: &str) -> Item {
        Item {
            link: "#".to_string(),
            title: title.to_string(),
            by: "me".to_string(),
            last_updated: None,
            labels: Vec::new(),
        }
    }

    fn repo(title: &str, prs: &[&str], issues: &[&str]) -> Repo {
        Repo {
            id: None,
            title: title.to_string(),
            last_commit: None,
            activity: Activity {
                prs: prs.iter().map(|t| item(t)).collect(),
                issues: issues.iter().map(|t| item(t)).collect(),
                ..Activity::default()
            },
        }
    }

    fn titles(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    fn loaded() -> DashboardState {
        let mut state = DashboardState::new();
        state.set_loading();
        assert!(state.repos.is_loading());
        state.set_loaded(
            vec![
                repo("felipesere/advisor", &["a pr"], &["an issue"]),
                repo("http-rs/tide", &["Refactor API"], &[]),
            ],
            false,
        );
        state
    }

    #[test]
    fn test_load_selects_first_repo() {
        let state = loaded();
        assert_eq!(state.views().len(), 2);
        assert_eq!(state.selected_repo().unwrap().title, "felipesere/advisor");
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut state = loaded();
        state.select_prev();
        assert_eq!(state.list_state.selected(), Some(0));
        state.select_next();
        state.select_next();
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_tab_selection_is_per_repo() {
        let mut state = loaded();
        state.select_tab(Tab::Prs);
        state.select_next();

        assert_eq!(state.selected_view().unwrap().tabs.current(), Tab::All);
        state.select_prev();
        let view = state.selected_view().unwrap();
        assert_eq!(view.tabs.current(), Tab::Prs);
        assert_eq!(titles(&state.visible_items(view)), vec!["a pr"]);
    }

    #[test]
    fn test_reload_keeps_selection_and_tabs() {
        let mut state = loaded();
        state.select_next();
        state.select_tab(Tab::Issues);

        state.set_loaded(
            vec![
                repo("async-rs/async-std", &[], &[]),
                repo("felipesere/advisor", &[], &[]),
                repo("http-rs/tide", &[], &["new issue"]),
            ],
            false,
        );

        let view = state.selected_view().unwrap();
        assert_eq!(view.repo.title, "http-rs/tide");
        assert_eq!(view.tabs.current(), Tab::Issues);
        assert_eq!(titles(&view.items()), vec!["new issue"]);
    }

    #[test]
    fn test_error_only_replaces_empty_state() {
        let mut state = loaded();
        state.set_error("Could not load repos".to_string());
        assert_eq!(state.views().len(), 2);

        let mut empty = DashboardState::new();
        empty.set_loading();
        empty.set_error("Could not load repos".to_string());
        assert!(matches!(empty.repos, LoadingState::Error(_)));
        assert!(empty.views().is_empty());
        assert!(empty.selected_view().is_none());
    }

    #[test]
    fn test_search_narrows_visible_items() {
        let mut state = loaded();
        state.begin_input(InputMode::Search);
        for c in "ISS".chars() {
            state.push_char(c);
        }

        let view = state.selected_view().unwrap();
        assert_eq!(titles(&state.visible_items(view)), vec!["an issue"]);

        assert_eq!(state.finish_input(), "ISS");
        assert_eq!(state.mode, InputMode::Normal);
        assert!(state.search.is_some());

        state.begin_input(InputMode::Search);
        assert_eq!(state.input, "ISS");
        state.cancel_input();
        assert!(state.search.is_none());
        let view = state.selected_view().unwrap();
        assert_eq!(state.visible_items(view).len(), 2);
    }

    #[test]
    fn test_deleting_search_text_clears_query() {
        let mut state = loaded();
        state.begin_input(InputMode::Search);
        state.push_char('x');
        assert!(state.search.is_some());
        state.pop_char();
        assert!(state.search.is_none());
    }

    #[test]
    fn test_add_repo_input() {
        let mut state = loaded();
        state.begin_input(InputMode::AddRepo);
        for c in "foo/bar".chars() {
            state.push_char(c);
        }
        assert!(state.search.is_none());
        assert_eq!(state.finish_input(), "foo/bar");
        assert!(state.input.is_empty());
    }
}
