use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::controllers::router::Router;
use crate::app::messages::Message;
use crate::app::services::i18n::LocaleProvider;

/// Menu path of the dark mode toggle, needed to sync its check mark when
/// the theme changes without the menu being used.
pub fn dark_mode_path(i18n: &LocaleProvider) -> String {
    format!("{}/{}", i18n.t("menu.view"), i18n.t("menu.toggle_dark"))
}

pub fn build_menu(
    menu: &mut MenuBar,
    sender: &Sender<Message>,
    i18n: &LocaleProvider,
    router: &Router,
    initial_dark_mode: bool,
) {
    let s = sender;
    let item = |group: &str, label: &str| format!("{}/{}", i18n.t(group), i18n.t(label));

    // File
    menu.add(&item("menu.file", "menu.open_config"), Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenSettingsFolder) });
    menu.add(&item("menu.file", "menu.quit"), Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // View
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add(&dark_mode_path(i18n), Shortcut::Ctrl | Shortcut::Shift | 'd', dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });

    // Go
    menu.add(&item("menu.go", "menu.back"), Shortcut::Alt | Key::Left, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GoBack) });
    menu.add(&item("menu.go", "menu.forward"), Shortcut::Alt | Key::Right, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::GoForward) });
    for (i, route) in router.page_routes().enumerate() {
        let Some(name) = route.name() else { continue };
        let label = format!("{}/{}", i18n.t("menu.go"), i18n.t(&format!("nav.{name}")));
        let shortcut = match char::from_digit(i as u32 + 1, 10) {
            Some(digit) if i < 9 => Shortcut::Ctrl | digit,
            _ => Shortcut::None,
        };
        let path = route.path.clone();
        menu.add(&label, shortcut, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Navigate(path.clone())) });
    }
    menu.add(&item("menu.go", "menu.location"), Shortcut::Ctrl | 'l', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowLocationDialog) });

    // Help
    menu.add(&item("menu.help", "menu.about"), Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}
