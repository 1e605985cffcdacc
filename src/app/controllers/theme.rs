//! Dark-mode preference, kept in step with storage, the visual root and the
//! ambient color scheme.

use crate::app::domain::{THEME_KEY, Theme};
use crate::app::infrastructure::platform::{AmbientNotify, AmbientScheme, AmbientSubscription};
use crate::app::infrastructure::storage::SharedStore;
use crate::app::infrastructure::visual_root::VisualRoot;

pub struct ThemeManager {
    is_dark: bool,
    theme: Theme,
    store: SharedStore,
    root: Box<dyn VisualRoot>,
}

impl ThemeManager {
    /// Starts light and untouched; nothing is applied until
    /// [`initialize`](Self::initialize) or a mutation runs.
    pub fn new(store: SharedStore, root: Box<dyn VisualRoot>) -> Self {
        Self {
            is_dark: false,
            theme: Theme::Light,
            store,
            root,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn root(&self) -> &dyn VisualRoot {
        self.root.as_ref()
    }

    pub fn toggle(&mut self) {
        self.set_explicit(!self.is_dark);
    }

    pub fn set_explicit(&mut self, value: bool) {
        self.is_dark = value;
        self.theme = Theme::from_dark_flag(value);
        self.apply_side_effects();
    }

    /// Mark the root with the active theme, clear the other marker, and
    /// persist the label.
    pub fn apply_side_effects(&mut self) {
        let active = self.theme;
        self.root.add_class(active.class_marker());
        self.root.remove_class(active.opposite().class_marker());

        if let Err(e) = self.store.borrow_mut().set(THEME_KEY, active.as_str()) {
            tracing::warn!(theme = %active, "Failed to persist theme: {e}");
        }
    }

    /// Apply the saved theme, or the ambient preference when nothing is
    /// saved, then subscribe to ambient changes.
    ///
    /// `notify` receives each ambient change; it must route the value back
    /// to [`on_ambient_change`](Self::on_ambient_change) on the thread that
    /// owns this manager. The subscription lasts as long as the returned
    /// guard.
    pub fn initialize(
        &mut self,
        ambient: &dyn AmbientScheme,
        notify: AmbientNotify,
    ) -> AmbientSubscription {
        match self.saved_theme() {
            Some(saved) => {
                tracing::debug!(saved = %saved, "Applying saved theme");
                self.set_explicit(Theme::from_stored(&saved).is_dark());
            }
            None => {
                let prefers_dark = ambient.prefers_dark();
                tracing::debug!(prefers_dark, "No saved theme, following ambient preference");
                self.set_explicit(prefers_dark);
            }
        }
        ambient.subscribe(notify)
    }

    /// Handle one ambient change. Ignored while a theme is saved; returns
    /// whether the change was applied.
    pub fn on_ambient_change(&mut self, prefers_dark: bool) -> bool {
        if self.saved_theme().is_some() {
            tracing::debug!(prefers_dark, "Saved theme present, ignoring ambient change");
            return false;
        }
        self.set_explicit(prefers_dark);
        true
    }

    /// The stored label, if one is present and non-empty.
    fn saved_theme(&self) -> Option<String> {
        self.store
            .borrow()
            .get(THEME_KEY)
            .filter(|saved| !saved.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::platform::FixedAmbient;
    use crate::app::infrastructure::storage::{MemoryStore, PreferenceStore};
    use crate::app::infrastructure::visual_root::ClassList;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::Duration;

    /// Ambient source driven by the test: values sent on `changes` are
    /// passed to the subscriber's callback, and `released` counts how many
    /// watchers have exited.
    struct ScriptedAmbient {
        prefers_dark: bool,
        changes: RefCell<Option<mpsc::Receiver<bool>>>,
        released: Arc<AtomicUsize>,
    }

    impl AmbientScheme for ScriptedAmbient {
        fn prefers_dark(&self) -> bool {
            self.prefers_dark
        }

        fn subscribe(&self, notify: AmbientNotify) -> AmbientSubscription {
            let changes = self.changes.borrow_mut().take().expect("subscribed twice");
            let released = Arc::clone(&self.released);
            AmbientSubscription::spawn("scripted-ambient", move |stop| {
                while !stop.load(Ordering::Acquire) {
                    match changes.recv_timeout(Duration::from_millis(5)) {
                        Ok(dark) => notify(dark),
                        Err(mpsc::RecvTimeoutError::Timeout) => {}
                        Err(mpsc::RecvTimeoutError::Disconnected) => {
                            thread::park_timeout(Duration::from_millis(5));
                        }
                    }
                }
                drop(notify);
                released.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    fn manager_with(store: MemoryStore) -> (ThemeManager, Rc<RefCell<MemoryStore>>) {
        let store = store.shared();
        let manager = ThemeManager::new(store.clone(), Box::new(ClassList::new()));
        (manager, store)
    }

    fn stored_theme(store: &Rc<RefCell<MemoryStore>>) -> Option<String> {
        store.borrow().get(THEME_KEY)
    }

    #[test]
    fn test_set_explicit_updates_flag_store_and_root() {
        for value in [true, false] {
            let (mut manager, store) = manager_with(MemoryStore::new());
            manager.set_explicit(value);

            assert_eq!(manager.is_dark(), value);
            assert_eq!(stored_theme(&store).as_deref() == Some("dark"), value);
            assert_eq!(manager.root().has_class("dark"), value);
            assert_eq!(manager.root().has_class("light"), !value);
        }
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for start in [true, false] {
            let (mut manager, store) = manager_with(MemoryStore::new());
            manager.set_explicit(start);

            manager.toggle();
            assert_eq!(manager.is_dark(), !start);
            assert_eq!(manager.theme(), Theme::from_dark_flag(!start));

            manager.toggle();
            assert_eq!(manager.is_dark(), start);
            assert_eq!(manager.root().has_class("dark"), start);
            assert_eq!(manager.root().has_class("light"), !start);
            assert_eq!(
                stored_theme(&store).as_deref(),
                Some(Theme::from_dark_flag(start).as_str())
            );
        }
    }

    #[test]
    fn test_markers_are_mutually_exclusive() {
        let (mut manager, _store) = manager_with(MemoryStore::new());
        manager.set_explicit(true);
        manager.set_explicit(false);
        manager.set_explicit(true);
        assert!(manager.root().has_class("dark"));
        assert!(!manager.root().has_class("light"));
    }

    #[test]
    fn test_saved_dark_beats_ambient_light() {
        let (mut manager, _store) = manager_with(MemoryStore::new().with(THEME_KEY, "dark"));
        let _sub = manager.initialize(&FixedAmbient(false), Box::new(|_| {}));
        assert!(manager.is_dark());
    }

    #[test]
    fn test_saved_light_beats_ambient_dark() {
        let (mut manager, _store) = manager_with(MemoryStore::new().with(THEME_KEY, "light"));
        let _sub = manager.initialize(&FixedAmbient(true), Box::new(|_| {}));
        assert!(!manager.is_dark());
    }

    #[test]
    fn test_no_saved_theme_follows_ambient_dark() {
        let (mut manager, store) = manager_with(MemoryStore::new());
        let _sub = manager.initialize(&FixedAmbient(true), Box::new(|_| {}));
        assert!(manager.is_dark());
        assert_eq!(stored_theme(&store).as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_saved_theme_counts_as_absent() {
        let (mut manager, _store) = manager_with(MemoryStore::new().with(THEME_KEY, ""));
        let _sub = manager.initialize(&FixedAmbient(true), Box::new(|_| {}));
        assert!(manager.is_dark());
    }

    #[test]
    fn test_unknown_saved_value_reads_as_light() {
        let (mut manager, store) = manager_with(MemoryStore::new().with(THEME_KEY, "sepia"));
        let _sub = manager.initialize(&FixedAmbient(true), Box::new(|_| {}));
        assert!(!manager.is_dark());
        // Re-persisted as the normalized label.
        assert_eq!(stored_theme(&store).as_deref(), Some("light"));
    }

    #[test]
    fn test_ambient_change_ignored_once_saved() {
        let (mut manager, _store) = manager_with(MemoryStore::new().with(THEME_KEY, "light"));
        let _sub = manager.initialize(&FixedAmbient(false), Box::new(|_| {}));

        assert!(!manager.on_ambient_change(true));
        assert!(!manager.is_dark());
    }

    #[test]
    fn test_ambient_change_applies_when_preference_cleared() {
        let (mut manager, store) = manager_with(MemoryStore::new());
        let _sub = manager.initialize(&FixedAmbient(false), Box::new(|_| {}));
        store.borrow_mut().remove(THEME_KEY).unwrap();

        assert!(manager.on_ambient_change(true));
        assert!(manager.is_dark());
        assert_eq!(stored_theme(&store).as_deref(), Some("dark"));

        // Persisting again suppresses the next change.
        assert!(!manager.on_ambient_change(false));
        assert!(manager.is_dark());
    }

    #[test]
    fn test_initialize_subscribes_with_given_callback() {
        let (change_tx, change_rx) = mpsc::channel();
        let (notified_tx, notified_rx) = mpsc::channel();
        let released = Arc::new(AtomicUsize::new(0));
        let ambient = ScriptedAmbient {
            prefers_dark: false,
            changes: RefCell::new(Some(change_rx)),
            released: Arc::clone(&released),
        };

        let (mut manager, store) = manager_with(MemoryStore::new());
        let sub = manager.initialize(
            &ambient,
            Box::new(move |dark| {
                let _ = notified_tx.send(dark);
            }),
        );
        assert!(sub.is_active());
        assert!(!manager.is_dark());

        // Clear the persisted label so the change is applied.
        store.borrow_mut().remove(THEME_KEY).unwrap();
        change_tx.send(true).unwrap();
        let dark = notified_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(manager.on_ambient_change(dark));
        assert!(manager.is_dark());
        assert_eq!(released.load(Ordering::SeqCst), 0);

        drop(sub);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        // The callback went away with the watcher.
        assert!(matches!(
            notified_rx.recv_timeout(Duration::from_secs(5)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
