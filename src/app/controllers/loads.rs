//! Bookkeeping for page loads in flight. Only the newest request may
//! commit; results of superseded requests are dropped without caching.

use crate::app::domain::Location;
use crate::app::infrastructure::error::PageLoadError;
use crate::app::services::pages::{PageLoaded, PageView};

use super::router::{NavigationKind, Router};

/// A load in flight, committed when its result arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub request: u64,
    pub location: Location,
    pub kind: NavigationKind,
}

/// A finished load that belongs to the latest navigation.
#[derive(Debug, Clone)]
pub struct CompletedLoad {
    pub location: Location,
    pub kind: NavigationKind,
    pub result: Result<PageView, PageLoadError>,
}

#[derive(Debug, Default)]
pub struct PageRequests {
    next_request: u64,
    pending: Option<PendingNavigation>,
}

impl PageRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new load, superseding any pending one. Returns the
    /// request number the load must report back with.
    pub fn begin(&mut self, location: Location, kind: NavigationKind) -> u64 {
        self.next_request += 1;
        let request = self.next_request;
        if let Some(old) = self.pending.replace(PendingNavigation {
            request,
            location,
            kind,
        }) {
            tracing::debug!(superseded = old.request, request, "Page load superseded");
        }
        request
    }

    /// Forget the pending load, if any. Its result will be dropped.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    /// Match a finished load against the pending request. Successful views
    /// of the newest request are cached in `router`; anything else is
    /// stale and returns `None`.
    pub fn complete(&mut self, router: &mut Router, loaded: PageLoaded) -> Option<CompletedLoad> {
        let Some(pending) = self.pending.take_if(|p| p.request == loaded.request) else {
            tracing::debug!(request = loaded.request, "Ignoring stale page load");
            return None;
        };
        if let Ok(view) = &loaded.result {
            router.cache_view(view.clone());
        }
        Some(CompletedLoad {
            location: pending.location,
            kind: pending.kind,
            result: loaded.result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::default_routes;

    fn view(route: &str) -> PageView {
        PageView {
            route: route.to_string(),
            title: format!("{route} title"),
            html: format!("<h1>{route}</h1>"),
        }
    }

    fn loaded(request: u64, route: &str) -> PageLoaded {
        PageLoaded {
            request,
            result: Ok(view(route)),
        }
    }

    #[test]
    fn test_superseded_request_is_dropped_and_not_cached() {
        let mut router = Router::new(default_routes());
        let mut requests = PageRequests::new();

        let first = requests.begin(Location::new("/web-sdk"), NavigationKind::Push);
        let second = requests.begin(Location::new("/ios-sdk"), NavigationKind::Push);
        assert_ne!(first, second);

        assert!(requests.complete(&mut router, loaded(first, "WebSDK")).is_none());
        assert!(router.cached_view("WebSDK").is_none());
        assert_eq!(requests.pending().unwrap().request, second);

        let done = requests.complete(&mut router, loaded(second, "iOSSDK")).unwrap();
        assert_eq!(done.location.path, "/ios-sdk");
        assert_eq!(done.kind, NavigationKind::Push);
        assert_eq!(done.result.unwrap().route, "iOSSDK");
        assert!(router.cached_view("iOSSDK").is_some());
        assert!(requests.pending().is_none());
    }

    #[test]
    fn test_result_delivered_twice_commits_once() {
        let mut router = Router::new(default_routes());
        let mut requests = PageRequests::new();
        let request = requests.begin(Location::new("/web-sdk"), NavigationKind::Traverse(0));

        let done = requests.complete(&mut router, loaded(request, "WebSDK")).unwrap();
        assert_eq!(done.kind, NavigationKind::Traverse(0));
        assert!(requests.complete(&mut router, loaded(request, "WebSDK")).is_none());
    }

    #[test]
    fn test_cancelled_request_is_ignored() {
        let mut router = Router::new(default_routes());
        let mut requests = PageRequests::new();
        let request = requests.begin(Location::new("/web-sdk"), NavigationKind::Push);
        requests.cancel();

        assert!(requests.complete(&mut router, loaded(request, "WebSDK")).is_none());
        assert!(router.cached_view("WebSDK").is_none());
    }

    #[test]
    fn test_failed_load_completes_without_caching() {
        let mut router = Router::new(default_routes());
        let mut requests = PageRequests::new();
        let request = requests.begin(Location::new("/web-sdk"), NavigationKind::Push);

        let done = requests
            .complete(
                &mut router,
                PageLoaded {
                    request,
                    result: Err(PageLoadError::new("WebSDK", "disk on fire")),
                },
            )
            .unwrap();
        assert_eq!(done.result.unwrap_err().reason, "disk on fire");
        assert!(router.cached_view("WebSDK").is_none());
    }
}
