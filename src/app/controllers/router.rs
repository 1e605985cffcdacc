use std::collections::HashMap;

use crate::app::domain::{Location, RouteKind, RouteRecord, ScrollPosition};
use crate::app::infrastructure::error::RouteError;
use crate::app::services::pages::PageView;

/// Longest redirect chain followed before giving up.
pub const MAX_REDIRECTS: usize = 8;

/// One step of route matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Redirect(&'a str),
    View(&'a RouteRecord),
}

/// A request resolved through any redirects to a page route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Final location, using the route's canonical path.
    pub location: Location,
    pub route: RouteRecord,
}

/// How a navigation moves through history once it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    /// Back/forward to the entry at this index.
    Traverse(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub location: Location,
    /// Position saved when the user navigated away from this entry.
    pub scroll: Option<ScrollPosition>,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
}

impl History {
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|i| self.entries.get(i))
    }

    pub fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn back_index(&self) -> Option<usize> {
        self.index.filter(|&i| i > 0).map(|i| i - 1)
    }

    pub fn forward_index(&self) -> Option<usize> {
        self.index
            .filter(|&i| i + 1 < self.entries.len())
            .map(|i| i + 1)
    }

    fn save_current(&mut self, leaving: Option<ScrollPosition>) {
        if let Some(entry) = self.index.and_then(|i| self.entries.get_mut(i)) {
            entry.scroll = leaving;
        }
    }

    /// Add a new entry after the current one, dropping any forward entries.
    pub fn push(&mut self, location: Location, leaving: Option<ScrollPosition>) {
        self.save_current(leaving);
        if let Some(i) = self.index {
            self.entries.truncate(i + 1);
        }
        self.entries.push(HistoryEntry {
            location,
            scroll: None,
        });
        self.index = Some(self.entries.len() - 1);
    }

    /// Move to `target`, returning the position saved for it.
    pub fn traverse(
        &mut self,
        target: usize,
        leaving: Option<ScrollPosition>,
    ) -> Option<ScrollPosition> {
        if target >= self.entries.len() {
            return None;
        }
        self.save_current(leaving);
        self.index = Some(target);
        self.entries[target].scroll
    }
}

pub struct Router {
    routes: Vec<RouteRecord>,
    history: History,
    views: HashMap<String, PageView>,
}

impl Router {
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self {
            routes,
            history: History::default(),
            views: HashMap::new(),
        }
    }

    /// Routes that render a page, in table order.
    pub fn page_routes(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes
            .iter()
            .filter(|r| matches!(r.kind, RouteKind::View { .. }))
    }

    /// Match `path` against the table; the first matching record wins.
    pub fn resolve(&self, path: &str) -> Result<Resolution<'_>, RouteError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.matches(path))
            .ok_or_else(|| RouteError::NotFound {
                path: path.to_string(),
            })?;
        Ok(match &route.kind {
            RouteKind::Redirect { to } => Resolution::Redirect(to),
            RouteKind::View { .. } => Resolution::View(route),
        })
    }

    /// Follow redirects from `requested` to a page route. A redirect
    /// without its own fragment keeps the requested one.
    pub fn resolve_location(&self, requested: &Location) -> Result<ResolvedRoute, RouteError> {
        let mut location = requested.clone();
        for _ in 0..=MAX_REDIRECTS {
            match self.resolve(&location.path)? {
                Resolution::Redirect(to) => {
                    let target = Location::parse(to);
                    tracing::debug!(from = %location, to = %target, "Following redirect");
                    location = Location {
                        path: target.path,
                        hash: target.hash.or(location.hash),
                    };
                }
                Resolution::View(route) => {
                    return Ok(ResolvedRoute {
                        location: Location {
                            path: route.path.clone(),
                            hash: location.hash,
                        },
                        route: route.clone(),
                    });
                }
            }
        }
        Err(RouteError::RedirectLoop {
            path: requested.path.clone(),
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether `location` is the entry currently shown. Pushing it again
    /// would duplicate that entry.
    pub fn is_current(&self, location: &Location) -> bool {
        self.history
            .current()
            .is_some_and(|entry| &entry.location == location)
    }

    /// Record a committed navigation and return the saved position the
    /// scroll policy should see (only traversals carry one).
    pub fn commit(
        &mut self,
        location: Location,
        kind: NavigationKind,
        leaving: Option<ScrollPosition>,
    ) -> Option<ScrollPosition> {
        match kind {
            NavigationKind::Push => {
                self.history.push(location, leaving);
                None
            }
            NavigationKind::Traverse(index) => self.history.traverse(index, leaving),
        }
    }

    pub fn cached_view(&self, route_name: &str) -> Option<&PageView> {
        self.views.get(route_name)
    }

    pub fn cache_view(&mut self, view: PageView) {
        self.views.insert(view.route.clone(), view);
    }
}
