// Per-repository tab selection.
// Chooses which of a repository's items (issues, PRs, or both) are shown.

use std::fmt;

use crate::api::{Item, Repo};

/// Category of items shown for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Prs,
    Issues,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Prs, Tab::Issues];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Prs => "PRs",
            Tab::Issues => "Issues",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::All => Tab::Prs,
            Tab::Prs => Tab::Issues,
            Tab::Issues => Tab::All,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::All => Tab::Issues,
            Tab::Prs => Tab::All,
            Tab::Issues => Tab::Prs,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::All => 0,
            Tab::Prs => 1,
            Tab::Issues => 2,
        }
    }
}

/// Items of `repo` visible under `tab`. `All` lists issues before PRs.
pub fn items_of(repo: &Repo, tab: Tab) -> Vec<&Item> {
    let activity = &repo.activity;
    match tab {
        Tab::All => activity.issues.iter().chain(activity.prs.iter()).collect(),
        Tab::Prs => activity.prs.iter().collect(),
        Tab::Issues => activity.issues.iter().collect(),
    }
}

type Observer = Box<dyn FnMut(Tab)>;

/// Holds the selected tab and notifies observers on every selection.
#[derive(Default)]
pub struct TabSelector {
    current: Tab,
    observers: Vec<Observer>,
}

impl fmt::Debug for TabSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabSelector")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Tab {
        self.current
    }

    /// Register a callback invoked with the new tab after each selection.
    pub fn on_change(&mut self, observer: impl FnMut(Tab) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Select `tab`. Observers are notified even when it was already selected.
    pub fn select(&mut self, tab: Tab) {
        self.current = tab;
        for observer in &mut self.observers {
            observer(tab);
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.current.next());
    }

    pub fn select_prev(&mut self) {
        self.select(self.current.prev());
    }
}
