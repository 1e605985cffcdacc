use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub fn detect_system_dark_mode() -> bool {
    // Windows: Check registry for dark mode preference
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        {
            // AppsUseLightTheme: 0 = dark mode, 1 = light mode
            if let Ok(value) = hkcu.get_value::<u32, _>("AppsUseLightTheme") {
                return value == 0;
            }
        }
    }

    // Linux: GNOME exposes both a theme name and a color-scheme hint
    #[cfg(target_os = "linux")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", "color-scheme"])
            .output()
        {
            let scheme = String::from_utf8_lossy(&output.stdout);
            if scheme.contains("prefer-dark") {
                return true;
            }
        }

        if let Ok(output) = Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", "gtk-theme"])
            .output()
        {
            let theme = String::from_utf8_lossy(&output.stdout).to_lowercase();
            if theme.contains("dark") {
                return true;
            }
        }
    }

    // macOS: Check AppleInterfaceStyle
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            if output.status.success() {
                let style = String::from_utf8_lossy(&output.stdout).to_lowercase();
                if style.contains("dark") {
                    return true;
                }
            }
        }
    }

    // Default to light mode if detection fails
    false
}

/// Callback invoked with the new "prefers dark" value on each change.
pub type AmbientNotify = Box<dyn Fn(bool) + Send + 'static>;

/// The operating environment's color-scheme preference.
pub trait AmbientScheme {
    fn prefers_dark(&self) -> bool;

    /// Start delivering change notifications until the returned guard drops.
    fn subscribe(&self, notify: AmbientNotify) -> AmbientSubscription;
}

/// Scoped ambient-change subscription. Dropping it stops the watcher and
/// waits for it to exit, so no notification is delivered afterwards.
#[derive(Debug)]
pub struct AmbientSubscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AmbientSubscription {
    /// A subscription with nothing behind it, for sources that never change.
    pub fn inert() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(true)),
            handle: None,
        }
    }

    /// Run `watch` on a named thread. `watch` must return soon after the
    /// flag it is given becomes true; dropping the guard sets it, unparks
    /// the thread and joins it.
    pub fn spawn<F>(name: &str, watch: F) -> Self
    where
        F: FnOnce(Arc<AtomicBool>) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        match thread::Builder::new()
            .name(name.to_string())
            .spawn(move || watch(stop_flag))
        {
            Ok(handle) => Self {
                stop,
                handle: Some(handle),
            },
            Err(e) => {
                tracing::warn!(name, "Could not start ambient color-scheme watcher: {e}");
                Self::inert()
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some() && !self.stop.load(Ordering::Acquire)
    }
}

impl Drop for AmbientSubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("Ambient color-scheme watcher panicked");
            }
            tracing::debug!("Ambient color-scheme subscription released");
        }
    }
}

/// Ambient source that samples a detector on a background thread and
/// reports edges.
#[derive(Debug, Clone, Copy)]
pub struct PollingAmbient {
    detector: fn() -> bool,
    interval: Duration,
}

impl PollingAmbient {
    pub fn new(detector: fn() -> bool, interval: Duration) -> Self {
        Self { detector, interval }
    }

    /// Watches the operating system's dark-mode setting.
    pub fn system(interval: Duration) -> Self {
        Self::new(detect_system_dark_mode, interval)
    }
}

impl AmbientScheme for PollingAmbient {
    fn prefers_dark(&self) -> bool {
        (self.detector)()
    }

    fn subscribe(&self, notify: AmbientNotify) -> AmbientSubscription {
        let detector = self.detector;
        let interval = self.interval;
        // Baseline is taken before the watcher starts.
        let mut last = detector();

        AmbientSubscription::spawn("ambient-scheme", move |stop| {
            loop {
                thread::park_timeout(interval);
                if stop.load(Ordering::Acquire) {
                    break;
                }
                let current = detector();
                if current != last {
                    last = current;
                    tracing::debug!(prefers_dark = current, "Ambient color scheme changed");
                    notify(current);
                }
            }
        })
    }
}

/// Ambient source with a constant answer and no notifications.
#[derive(Debug, Clone, Copy)]
pub struct FixedAmbient(pub bool);

impl AmbientScheme for FixedAmbient {
    fn prefers_dark(&self) -> bool {
        self.0
    }

    fn subscribe(&self, _notify: AmbientNotify) -> AmbientSubscription {
        AmbientSubscription::inert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    static WATCHED_DARK: AtomicBool = AtomicBool::new(false);

    fn watched_detector() -> bool {
        WATCHED_DARK.load(Ordering::SeqCst)
    }

    #[test]
    fn test_fixed_ambient() {
        let ambient = FixedAmbient(true);
        assert!(ambient.prefers_dark());
        let sub = ambient.subscribe(Box::new(|_| {}));
        assert!(!sub.is_active());
    }

    #[test]
    fn test_polling_ambient_reports_changes_and_stops_on_drop() {
        let ambient = PollingAmbient::new(watched_detector, Duration::from_millis(5));
        let (tx, rx) = mpsc::channel();

        let sub = ambient.subscribe(Box::new(move |dark| {
            let _ = tx.send(dark);
        }));
        assert!(sub.is_active());

        WATCHED_DARK.store(true, Ordering::SeqCst);
        let received = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(received);

        drop(sub);
        // The watcher owned the only sender; once joined the channel closes.
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn test_inert_subscription_drop_is_noop() {
        let sub = AmbientSubscription::inert();
        assert!(!sub.is_active());
        drop(sub);
    }
}
