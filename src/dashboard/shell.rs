use std::collections::HashSet;
use std::hash::Hash;

use crate::config;
use crate::models::Role;
use crate::session::SessionStore;

use super::Searchable;

/// One dashboard's shell state: active section, sidebar, search box,
/// and which sections have already loaded their data.
pub struct Shell<S> {
    role: Role,
    active: S,
    sidebar_collapsed: bool,
    search: String,
    loaded: HashSet<S>,
}

impl<S: Copy + Eq + Hash> Shell<S> {
    /// Open the shell on its initial section. The initial section
    /// counts as visited, so its fetch is the caller's first load.
    pub fn new(role: Role, initial: S) -> Self {
        let mut loaded = HashSet::new();
        loaded.insert(initial);
        Shell {
            role,
            active: initial,
            sidebar_collapsed: false,
            search: String::new(),
            loaded,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active(&self) -> S {
        self.active
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Switch to a section. Returns `true` the first time a section is
    /// shown, which is the caller's cue to fetch its data; later
    /// visits render from cache.
    pub fn activate(&mut self, section: S) -> bool {
        self.active = section;
        self.loaded.insert(section)
    }

    pub fn is_loaded(&self, section: S) -> bool {
        self.loaded.contains(&section)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// The current search applied to a list snapshot.
    pub fn filter<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|i| i.matches(&self.search)).collect()
    }

    /// Clear this dashboard's session and report the login route to
    /// redirect to. Local-only: the token is forgotten, not revoked.
    pub fn logout(&self, sessions: &mut SessionStore) -> &'static str {
        tracing::info!(role = %self.role, "logging out");
        sessions.logout(self.role);
        config::login_route(self.role)
    }
}
