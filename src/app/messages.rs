use super::services::pages::PageLoaded;

/// All messages that can be sent through the FLTK channel.
/// Menu and button callbacks, the ambient watcher and page-load workers
/// send these; the dispatch loop in main handles them one at a time.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    OpenSettingsFolder,
    Quit,

    // View
    ToggleDarkMode,
    AmbientSchemeChanged(bool),

    // Go
    Navigate(String),
    GoBack,
    GoForward,
    ShowLocationDialog,
    PageLoaded(PageLoaded),

    // Help
    ShowAbout,
}
