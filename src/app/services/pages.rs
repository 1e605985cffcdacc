//! On-demand page loading.
//!
//! A [`PageLoader`] turns a matched route into a rendered [`PageView`].
//! Loads run on a worker thread via [`spawn_page_load`] and report back
//! with an explicit result; the caller decides what to do with stale or
//! failed loads.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use crate::app::domain::{Locale, RouteRecord};
use crate::app::infrastructure::error::PageLoadError;

/// Rendered page content for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub route: String,
    pub title: String,
    /// HTML body fragment, without `<html>`/`<body>` wrappers.
    pub html: String,
}

pub trait PageLoader: Send + Sync {
    fn load(&self, route: &RouteRecord) -> Result<PageView, PageLoadError>;
}

/// Completion report of one asynchronous load.
#[derive(Debug, Clone)]
pub struct PageLoaded {
    pub request: u64,
    pub result: Result<PageView, PageLoadError>,
}

/// Run `loader` for `route` on a worker thread and hand the outcome to
/// `deliver`.
pub fn spawn_page_load<F>(
    loader: Arc<dyn PageLoader>,
    route: RouteRecord,
    request: u64,
    deliver: F,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnOnce(PageLoaded) + Send + 'static,
{
    thread::Builder::new()
        .name(format!("page-load-{request}"))
        .spawn(move || {
            let result = loader.load(&route);
            deliver(PageLoaded { request, result });
        })
}

/// Copies of the pages shipped inside the binary.
pub fn embedded_page(file: &str) -> Option<&'static str> {
    match file {
        "web-sdk.md" => Some(include_str!("../../../pages/web-sdk.md")),
        "ios-sdk.md" => Some(include_str!("../../../pages/ios-sdk.md")),
        _ => None,
    }
}

/// Loads Markdown sources from an optional docs directory, preferring a
/// per-locale copy, and falls back to the embedded pages.
#[derive(Debug, Clone)]
pub struct MarkdownPageLoader {
    docs_dir: Option<PathBuf>,
    locale: Locale,
}

impl MarkdownPageLoader {
    pub fn new(docs_dir: Option<PathBuf>, locale: Locale) -> Self {
        Self { docs_dir, locale }
    }

    fn candidate_paths(&self, file: &str) -> Vec<PathBuf> {
        match &self.docs_dir {
            Some(dir) => vec![dir.join(self.locale.code()).join(file), dir.join(file)],
            None => Vec::new(),
        }
    }

    fn read_source(&self, route: &str, file: &str) -> Result<String, PageLoadError> {
        for path in self.candidate_paths(file) {
            match fs::read_to_string(&path) {
                Ok(source) => {
                    tracing::debug!(route, path = %path.display(), "Page source read from disk");
                    return Ok(source);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(PageLoadError::new(
                        route,
                        format!("{}: {e}", path.display()),
                    ));
                }
            }
        }
        embedded_page(file)
            .map(str::to_string)
            .ok_or_else(|| PageLoadError::new(route, format!("no source for {file}")))
    }
}

impl PageLoader for MarkdownPageLoader {
    fn load(&self, route: &RouteRecord) -> Result<PageView, PageLoadError> {
        let (Some(name), Some(component), Some(meta)) =
            (route.name(), route.component(), route.meta())
        else {
            return Err(PageLoadError::new(
                route.path.as_str(),
                "route does not render a page",
            ));
        };
        let source = self.read_source(name, component)?;
        Ok(PageView {
            route: name.to_string(),
            title: meta.title.clone(),
            html: render_markdown(&source),
        })
    }
}

/// Render Markdown to HTML. Every heading is preceded by a named anchor,
/// taken from an explicit `{#id}` or derived from the heading text.
/// Repeated anchors get `-1`, `-2`, ... suffixes.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut events: Vec<Event> = Vec::new();
    let mut heading: Option<(Vec<Event>, Option<String>)> = None;
    let mut anchors = HashSet::new();

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::Heading { ref id, .. }) => {
                let explicit = id.as_ref().map(|id| id.to_string());
                heading = Some((vec![event.clone()], explicit));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((mut buffered, explicit)) = heading.take() {
                    buffered.push(event);
                    let base = explicit.unwrap_or_else(|| slugify(&heading_text(&buffered)));
                    let anchor = unique_anchor(&mut anchors, base);
                    events.push(Event::Html(format!("<a name=\"{anchor}\"></a>\n").into()));
                    events.extend(buffered);
                }
            }
            other => match heading.as_mut() {
                Some((buffered, _)) => buffered.push(other),
                None => events.push(other),
            },
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Body for a page shown in place of a route that failed to resolve or load.
pub fn error_page_html(title: &str, message: &str) -> String {
    format!(
        "<h1>{}</h1>\n<p>{}</p>\n",
        escape_html(title),
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn unique_anchor(used: &mut HashSet<String>, base: String) -> String {
    let mut anchor = base.clone();
    let mut n = 0;
    while used.contains(&anchor) {
        n += 1;
        anchor = format!("{base}-{n}");
    }
    used.insert(anchor.clone());
    anchor
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        if let Event::Text(t) | Event::Code(t) = event {
            text.push_str(t);
        }
    }
    text
}

/// Lowercase, hyphen-separated identifier for a heading.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::default_routes;
    use std::sync::mpsc;
    use std::time::Duration;

    fn web_route() -> RouteRecord {
        default_routes()
            .into_iter()
            .find(|r| r.name() == Some("WebSDK"))
            .unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  Install  the SDK! "), "install-the-sdk");
        assert_eq!(slugify("init() - options"), "init-options");
        assert_eq!(slugify("Установка"), "установка");
    }

    #[test]
    fn test_render_adds_anchors() {
        let html = render_markdown("# Getting Started\n\ntext\n\n## Install {#setup}\n");
        let anchor = html.find("<a name=\"getting-started\"></a>").unwrap();
        let h1 = html.find("<h1>").unwrap();
        assert!(anchor < h1);

        let anchor = html.find("<a name=\"setup\"></a>").unwrap();
        let h2 = html.find("<h2 id=\"setup\">").unwrap();
        assert!(anchor < h2);
        assert!(html.contains("<p>text</p>"));
    }

    #[test]
    fn test_error_page_escapes_input() {
        let html = error_page_html("Page not found", "No page at /<script>&x");
        assert_eq!(
            html,
            "<h1>Page not found</h1>\n<p>No page at /&lt;script&gt;&amp;x</p>\n"
        );
    }

    #[test]
    fn test_repeated_headings_get_numbered_anchors() {
        let html = render_markdown("## Example\n\n## Example\n\n## Example\n\n## Example 1\n");
        let first = html.find("<a name=\"example\"></a>").unwrap();
        let second = html.find("<a name=\"example-1\"></a>").unwrap();
        let third = html.find("<a name=\"example-2\"></a>").unwrap();
        assert!(first < second && second < third);
        // A heading whose own slug was already taken moves on as well.
        assert!(html.contains("<a name=\"example-1-1\"></a>"));
    }

    #[test]
    fn test_render_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_embedded_pages_exist_for_default_routes() {
        for route in default_routes() {
            if let Some(component) = route.component() {
                assert!(embedded_page(component).is_some(), "{component}");
            }
        }
        assert!(embedded_page("android-sdk.md").is_none());
    }

    #[test]
    fn test_loader_uses_embedded_copy_without_docs_dir() {
        let loader = MarkdownPageLoader::new(None, Locale::En);
        let view = loader.load(&web_route()).unwrap();
        assert_eq!(view.route, "WebSDK");
        assert_eq!(view.title, "Web SDK Documentation");
        assert!(view.html.contains("<h1>"));
    }

    #[test]
    fn test_loader_prefers_locale_copy_then_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("uz")).unwrap();
        fs::write(dir.path().join("uz").join("web-sdk.md"), "# Salom").unwrap();
        fs::write(dir.path().join("web-sdk.md"), "# Root copy").unwrap();

        let uz = MarkdownPageLoader::new(Some(dir.path().to_path_buf()), Locale::Uz);
        assert!(uz.load(&web_route()).unwrap().html.contains("Salom"));

        let ru = MarkdownPageLoader::new(Some(dir.path().to_path_buf()), Locale::Ru);
        assert!(ru.load(&web_route()).unwrap().html.contains("Root copy"));
    }

    #[test]
    fn test_loader_reports_missing_source() {
        let loader = MarkdownPageLoader::new(None, Locale::En);
        let route = RouteRecord::view("/android-sdk", "AndroidSDK", "android-sdk.md", "Android");
        let err = loader.load(&route).unwrap_err();
        assert_eq!(err.route, "AndroidSDK");
        assert!(err.reason.contains("android-sdk.md"));
    }

    #[test]
    fn test_loader_rejects_redirect_route() {
        let loader = MarkdownPageLoader::new(None, Locale::En);
        let err = loader.load(&RouteRecord::redirect("/", "/web-sdk")).unwrap_err();
        assert_eq!(err.route, "/");
    }

    #[test]
    fn test_spawn_page_load_delivers_result() {
        let loader: Arc<dyn PageLoader> = Arc::new(MarkdownPageLoader::new(None, Locale::En));
        let (tx, rx) = mpsc::channel();

        let handle = spawn_page_load(loader, web_route(), 7, move |loaded| {
            let _ = tx.send(loaded);
        })
        .unwrap();

        let loaded = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(loaded.request, 7);
        assert_eq!(loaded.result.unwrap().route, "WebSDK");
        handle.join().unwrap();
    }
}
