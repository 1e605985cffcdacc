use std::sync::Arc;

use fltk::{
    app::{Sender, TimeoutHandle},
    dialog,
    frame::Frame,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    window::Window,
};

use super::controllers::loads::PageRequests;
use super::controllers::router::{NavigationKind, Router};
use super::controllers::theme::ThemeManager;
use super::domain::{AppSettings, Location, ScrollInstruction, scroll_behavior};
use super::infrastructure::error::RouteError;
use super::infrastructure::platform::{AmbientScheme, AmbientSubscription};
use super::infrastructure::storage::SharedStore;
use super::messages::Message;
use super::services::i18n::LocaleProvider;
use super::services::pages::{PageLoaded, PageLoader, error_page_html, spawn_page_load};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::location::show_location_dialog;
use crate::ui::main_window::MainWidgets;
use crate::ui::menu::dark_mode_path;
use crate::ui::page_view;
use crate::ui::theme::{WindowRoot, page_document};

/// Page currently shown in the view.
#[derive(Debug, Clone)]
struct ShownPage {
    title: String,
    body: String,
}

/// Composition root: owns the widgets and every long-lived service, and
/// handles the messages dispatched from the main loop.
pub struct AppState {
    pub window: Window,
    pub view: HelpView,
    pub status: Frame,
    pub menu: MenuBar,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub theme: ThemeManager,
    pub i18n: LocaleProvider,
    pub router: Router,
    loader: Arc<dyn PageLoader>,
    dark_menu_path: String,
    requests: PageRequests,
    page: Option<ShownPage>,
    smooth_scroll: Option<TimeoutHandle>,
    ambient: Option<AmbientSubscription>,
}

impl AppState {
    pub fn new(
        widgets: &MainWidgets,
        sender: Sender<Message>,
        settings: AppSettings,
        store: SharedStore,
        i18n: LocaleProvider,
        router: Router,
        loader: Arc<dyn PageLoader>,
    ) -> Self {
        let root = WindowRoot::new(widgets.themed());
        Self {
            window: widgets.wind.clone(),
            view: widgets.view.clone(),
            status: widgets.status.clone(),
            menu: widgets.menu.clone(),
            sender,
            settings,
            theme: ThemeManager::new(store, Box::new(root)),
            dark_menu_path: dark_mode_path(&i18n),
            i18n,
            router,
            loader,
            requests: PageRequests::new(),
            page: None,
            smooth_scroll: None,
            ambient: None,
        }
    }

    // --- Theme ---

    /// Apply the saved or ambient theme and start following the ambient
    /// scheme until [`shutdown`](Self::shutdown).
    pub fn initialize_theme(&mut self, ambient: &dyn AmbientScheme) {
        let s = self.sender;
        let subscription = self.theme.initialize(
            ambient,
            Box::new(move |dark| s.send(Message::AmbientSchemeChanged(dark))),
        );
        self.ambient = Some(subscription);
        self.sync_dark_menu();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.theme.toggle();
        self.sync_dark_menu();
        self.refresh_page();
    }

    pub fn ambient_changed(&mut self, prefers_dark: bool) {
        if self.theme.on_ambient_change(prefers_dark) {
            self.sync_dark_menu();
            self.refresh_page();
        }
    }

    fn sync_dark_menu(&mut self) {
        if let Some(mut item) = self.menu.find_item(&self.dark_menu_path) {
            if self.theme.is_dark() {
                item.set();
            } else {
                item.clear();
            }
        }
    }

    // --- Navigation ---

    pub fn navigate(&mut self, target: &str) {
        self.navigate_to(Location::parse(target), NavigationKind::Push);
    }

    pub fn go_back(&mut self) {
        if let Some(index) = self.router.history().back_index() {
            self.traverse(index);
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(index) = self.router.history().forward_index() {
            self.traverse(index);
        }
    }

    fn traverse(&mut self, index: usize) {
        if let Some(entry) = self.router.history().entry(index) {
            let location = entry.location.clone();
            self.navigate_to(location, NavigationKind::Traverse(index));
        }
    }

    fn navigate_to(&mut self, requested: Location, kind: NavigationKind) {
        let resolved = match self.router.resolve_location(&requested) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::info!(location = %requested, "Navigation failed: {e}");
                self.show_route_error(requested, &e, kind);
                return;
            }
        };

        if kind == NavigationKind::Push && self.router.is_current(&resolved.location) {
            tracing::debug!(location = %resolved.location, "Already showing location, navigation skipped");
            self.requests.cancel();
            self.status
                .set_label(&self.i18n.t_with("status.ready", &[("page", &resolved.location.href())]));
            return;
        }

        let name = resolved.route.name().unwrap_or_default().to_string();
        if let Some(view) = self.router.cached_view(&name).cloned() {
            self.requests.cancel();
            let title = self.page_title(&view.route, &view.title);
            self.commit(resolved.location, kind, title, view.html);
            return;
        }

        let request = self.requests.begin(resolved.location.clone(), kind);
        let page = self.i18n.t_or(&format!("nav.{name}"), &name);
        self.status
            .set_label(&self.i18n.t_with("status.loading", &[("page", &page)]));

        let s = self.sender;
        let spawned = spawn_page_load(self.loader.clone(), resolved.route, request, move |loaded| {
            s.send(Message::PageLoaded(loaded))
        });
        match spawned {
            Ok(_) => {
                tracing::debug!(request, location = %resolved.location, "Page load started");
            }
            Err(e) => {
                tracing::error!("Failed to spawn page loader: {e}");
                self.requests.cancel();
                let title = self.i18n.t("errors.load_failed_title");
                let message = self.i18n.t_with(
                    "errors.load_failed",
                    &[("page", &page), ("reason", &e.to_string())],
                );
                self.commit(resolved.location, kind, title.clone(), error_page_html(&title, &message));
            }
        }
    }

    /// Commit a finished load if it still belongs to the latest navigation.
    pub fn page_loaded(&mut self, loaded: PageLoaded) {
        let Some(done) = self.requests.complete(&mut self.router, loaded) else {
            return;
        };

        match done.result {
            Ok(view) => {
                let title = self.page_title(&view.route, &view.title);
                self.commit(done.location, done.kind, title, view.html);
            }
            Err(e) => {
                tracing::warn!("{e}");
                let page = self.i18n.t_or(&format!("nav.{}", e.route), &e.route);
                let title = self.i18n.t("errors.load_failed_title");
                let message = self.i18n.t_with(
                    "errors.load_failed",
                    &[("page", &page), ("reason", &e.reason)],
                );
                self.commit(done.location, done.kind, title.clone(), error_page_html(&title, &message));
            }
        }
    }

    fn show_route_error(&mut self, requested: Location, error: &RouteError, kind: NavigationKind) {
        self.requests.cancel();
        let (title, message) = self.i18n.route_error_text(error);
        self.commit(requested, kind, title.clone(), error_page_html(&title, &message));
    }

    fn page_title(&self, route: &str, fallback: &str) -> String {
        self.i18n.t_or(&format!("titles.{route}"), fallback)
    }

    fn commit(&mut self, location: Location, kind: NavigationKind, title: String, body: String) {
        page_view::cancel_scroll(self.smooth_scroll.take());
        let leaving = self
            .page
            .is_some()
            .then(|| page_view::scroll_position(&self.view));
        let saved = self.router.commit(location.clone(), kind, leaving);

        self.window
            .set_label(&format!("{title} - {}", self.i18n.t("app.title")));
        self.status
            .set_label(&self.i18n.t_with("status.ready", &[("page", &location.href())]));
        self.page = Some(ShownPage { title, body });
        self.render_page();

        tracing::info!(location = %location, ?kind, "Navigated");
        self.apply_scroll(scroll_behavior(&location, saved));
    }

    fn apply_scroll(&mut self, instruction: ScrollInstruction) {
        match instruction {
            ScrollInstruction::ToElement { id, behavior } => {
                self.smooth_scroll = page_view::scroll_to_anchor(&mut self.view, &id, behavior);
            }
            ScrollInstruction::Restore(position) => page_view::scroll_to(&mut self.view, position),
            ScrollInstruction::Top => self.view.set_top_line(0),
        }
    }

    fn render_page(&mut self) {
        if let Some(page) = &self.page {
            tracing::trace!(title = %page.title, "Rendering page");
            self.view
                .set_value(&page_document(&page.body, self.theme.is_dark()));
        }
    }

    /// Re-render the current page in the active palette, keeping its offset.
    fn refresh_page(&mut self) {
        let position = page_view::scroll_position(&self.view);
        self.render_page();
        page_view::scroll_to(&mut self.view, position);
    }

    pub fn current_href(&self) -> String {
        self.router
            .history()
            .current()
            .map(|entry| entry.location.href())
            .unwrap_or_else(|| self.settings.start_path.clone())
    }

    // --- Dialogs ---

    pub fn show_location_dialog(&mut self) {
        let current = self.current_href();
        show_location_dialog(&self.i18n, &current, &self.sender);
    }

    pub fn show_about(&self) {
        show_about_dialog(&self.i18n);
    }

    pub fn open_settings_folder(&self) {
        let dir = AppSettings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            tracing::warn!(dir = %dir.display(), "Failed to open settings folder: {e}");
            dialog::alert_default(&format!("{}: {e}", dir.display()));
        }
    }

    /// Stop the ambient watcher. Safe to call more than once.
    pub fn shutdown(&mut self) {
        page_view::cancel_scroll(self.smooth_scroll.take());
        drop(self.ambient.take());
    }
}
