//! Route records, locations and the scroll-restoration policy.

/// Metadata attached to a page route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
}

/// What a route record does when matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Redirect {
        to: String,
    },
    View {
        name: String,
        /// Page source file, resolved lazily by the page loader.
        component: String,
        meta: RouteMeta,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: String,
    pub kind: RouteKind,
}

impl RouteRecord {
    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: RouteKind::Redirect { to: to.to_string() },
        }
    }

    pub fn view(path: &str, name: &str, component: &str, title: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: RouteKind::View {
                name: name.to_string(),
                component: component.to_string(),
                meta: RouteMeta {
                    title: title.to_string(),
                },
            },
        }
    }

    /// Route name, for view routes.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::View { name, .. } => Some(name),
            RouteKind::Redirect { .. } => None,
        }
    }

    pub fn component(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::View { component, .. } => Some(component),
            RouteKind::Redirect { .. } => None,
        }
    }

    pub fn meta(&self) -> Option<&RouteMeta> {
        match &self.kind {
            RouteKind::View { meta, .. } => Some(meta),
            RouteKind::Redirect { .. } => None,
        }
    }

    /// Non-strict, case-insensitive path comparison.
    pub fn matches(&self, path: &str) -> bool {
        normalize_path(&self.path).eq_ignore_ascii_case(&normalize_path(path))
    }
}

/// The documentation site's route table.
pub fn default_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", "/web-sdk"),
        RouteRecord::view("/web-sdk", "WebSDK", "web-sdk.md", "Web SDK Documentation"),
        RouteRecord::view("/ios-sdk", "iOSSDK", "ios-sdk.md", "iOS SDK Documentation"),
    ]
}

/// Strip one trailing slash (except from the root) and ensure a leading one.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut out = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// A navigation target: path plus optional fragment identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub hash: Option<String>,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        let hash = hash.trim_start_matches('#');
        self.hash = (!hash.is_empty()).then(|| hash.to_string());
        self
    }

    /// Parse `/path?query#fragment`. The query part is dropped.
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash)),
            None => (raw, None),
        };
        let path = rest.split_once('?').map_or(rest, |(p, _)| p);
        let location = Self::new(path);
        match hash {
            Some(h) => location.with_hash(h),
            None => location,
        }
    }

    /// Rendered form, e.g. `/web-sdk#install`.
    pub fn href(&self) -> String {
        match &self.hash {
            Some(h) => format!("{}#{}", self.path, h),
            None => self.path.clone(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href())
    }
}

/// Vertical scroll offset of the page view, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub top: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// What the page view should do after a navigation commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollInstruction {
    ToElement { id: String, behavior: ScrollBehavior },
    Restore(ScrollPosition),
    Top,
}

/// Decide where to scroll after navigating to `to`.
///
/// A fragment always wins, then a position saved by back/forward
/// navigation, then the top of the page.
pub fn scroll_behavior(to: &Location, saved: Option<ScrollPosition>) -> ScrollInstruction {
    if let Some(id) = &to.hash {
        return ScrollInstruction::ToElement {
            id: id.clone(),
            behavior: ScrollBehavior::Smooth,
        };
    }
    if let Some(position) = saved {
        return ScrollInstruction::Restore(position);
    }
    ScrollInstruction::Top
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes_shape() {
        let routes = default_routes();
        assert_eq!(routes.len(), 3);
        assert_eq!(
            routes[0].kind,
            RouteKind::Redirect {
                to: "/web-sdk".to_string()
            }
        );
        assert_eq!(routes[1].name(), Some("WebSDK"));
        assert_eq!(routes[1].meta().unwrap().title, "Web SDK Documentation");
        assert_eq!(routes[2].name(), Some("iOSSDK"));
        assert_eq!(routes[2].component(), Some("ios-sdk.md"));
    }

    #[test]
    fn test_matches_is_non_strict() {
        let route = RouteRecord::view("/web-sdk", "WebSDK", "web-sdk.md", "Web");
        assert!(route.matches("/web-sdk"));
        assert!(route.matches("/web-sdk/"));
        assert!(route.matches("/Web-SDK"));
        assert!(route.matches("web-sdk"));
        assert!(!route.matches("/web-sdk/extra"));
    }

    #[test]
    fn test_root_keeps_slash() {
        let root = RouteRecord::redirect("/", "/web-sdk");
        assert!(root.matches("/"));
        assert!(root.matches(""));
        assert!(!root.matches("/x"));
    }

    #[test]
    fn test_location_parse() {
        let loc = Location::parse("/web-sdk?tab=1#install");
        assert_eq!(loc.path, "/web-sdk");
        assert_eq!(loc.hash.as_deref(), Some("install"));
        assert_eq!(loc.href(), "/web-sdk#install");

        let loc = Location::parse("/ios-sdk#");
        assert_eq!(loc.hash, None);
    }

    #[test]
    fn test_scroll_fragment_wins_over_saved() {
        let to = Location::parse("/web-sdk#section1");
        let instruction = scroll_behavior(&to, Some(ScrollPosition { top: 120 }));
        assert_eq!(
            instruction,
            ScrollInstruction::ToElement {
                id: "section1".to_string(),
                behavior: ScrollBehavior::Smooth,
            }
        );
    }

    #[test]
    fn test_scroll_restores_saved_position() {
        let to = Location::new("/web-sdk");
        let instruction = scroll_behavior(&to, Some(ScrollPosition { top: 42 }));
        assert_eq!(instruction, ScrollInstruction::Restore(ScrollPosition { top: 42 }));
    }

    #[test]
    fn test_scroll_defaults_to_top() {
        let to = Location::new("/ios-sdk");
        assert_eq!(scroll_behavior(&to, None), ScrollInstruction::Top);
    }
}
