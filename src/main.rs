use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use fltk::{app, dialog, prelude::*};
use tracing_subscriber::EnvFilter;

use sdk_docs::app::controllers::router::Router;
use sdk_docs::app::domain::{AppSettings, default_routes};
use sdk_docs::app::infrastructure::platform::PollingAmbient;
use sdk_docs::app::infrastructure::storage::{JsonFileStore, SharedStore};
use sdk_docs::app::messages::Message;
use sdk_docs::app::services::i18n::LocaleProvider;
use sdk_docs::app::services::pages::MarkdownPageLoader;
use sdk_docs::app::state::AppState;
use sdk_docs::ui::main_window::build_main_window;
use sdk_docs::ui::menu::build_menu;

/// `RUST_LOG` wins over the filter in settings.
fn init_logging(settings: &AppSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let settings = AppSettings::load();
    init_logging(&settings);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting sdk-docs");

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let store: SharedStore = Rc::new(RefCell::new(JsonFileStore::open(
        AppSettings::preferences_path(),
    )));

    let i18n = match LocaleProvider::new(&*store.borrow()) {
        Ok(i18n) => i18n,
        Err(e) => {
            tracing::error!("Failed to load message tables: {e}");
            dialog::alert_default(&format!("Failed to load message tables: {e}"));
            return;
        }
    };

    let router = Router::new(default_routes());
    let mut widgets = build_main_window(&settings, &i18n, &router, &sender);
    let loader = Arc::new(MarkdownPageLoader::new(
        settings.docs_dir.clone(),
        i18n.locale(),
    ));

    let mut state = AppState::new(
        &widgets,
        sender,
        settings,
        store,
        i18n,
        router,
        loader,
    );
    state.initialize_theme(&PollingAmbient::system(Duration::from_secs(
        state.settings.ambient_poll_secs,
    )));
    build_menu(
        &mut widgets.menu,
        &sender,
        &state.i18n,
        &state.router,
        state.theme.is_dark(),
    );

    widgets.wind.show();

    // Set Windows title bar theme AFTER window is shown (needs valid HWND)
    #[cfg(target_os = "windows")]
    sdk_docs::ui::theme::set_windows_titlebar_theme(&widgets.wind, state.theme.is_dark());

    let start = state.settings.start_path.clone();
    state.navigate(&start);

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::OpenSettingsFolder => state.open_settings_folder(),
                Message::Quit => app.quit(),

                Message::ToggleDarkMode => state.toggle_dark_mode(),
                Message::AmbientSchemeChanged(dark) => state.ambient_changed(dark),

                Message::Navigate(target) => state.navigate(&target),
                Message::GoBack => state.go_back(),
                Message::GoForward => state.go_forward(),
                Message::ShowLocationDialog => state.show_location_dialog(),
                Message::PageLoaded(loaded) => state.page_loaded(loaded),

                Message::ShowAbout => state.show_about(),
            }
        }
    }

    state.shutdown();
    tracing::info!("Exiting");
}
