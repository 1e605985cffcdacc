use fltk::{
    enums::Color,
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    window::Window,
};

use crate::app::domain::Theme;
use crate::app::infrastructure::visual_root::{ClassList, VisualRoot};

/// Colors for one theme, as RGB triplets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub chrome: (u8, u8, u8),
    pub chrome_text: (u8, u8, u8),
    pub selection: (u8, u8, u8),
    pub link: (u8, u8, u8),
}

pub fn palette(is_dark: bool) -> Palette {
    if is_dark {
        Palette {
            background: (30, 30, 30),
            text: (220, 220, 220),
            chrome: (35, 35, 35),
            chrome_text: (220, 220, 220),
            selection: (60, 60, 60),
            link: (138, 180, 248),
        }
    } else {
        Palette {
            background: (255, 255, 255),
            text: (0, 0, 0),
            chrome: (240, 240, 240),
            chrome_text: (0, 0, 0),
            selection: (200, 200, 200),
            link: (26, 13, 171),
        }
    }
}

fn color((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb(r, g, b)
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Wrap a page body so the help view paints it with the theme's colors.
pub fn page_document(body: &str, is_dark: bool) -> String {
    let p = palette(is_dark);
    format!(
        "<html><body bgcolor=\"{}\" text=\"{}\" link=\"{}\">\n{}</body></html>",
        hex(p.background),
        hex(p.text),
        hex(p.link),
        body
    )
}

/// Widgets repainted when the theme changes.
#[derive(Clone)]
pub struct ThemedWidgets {
    pub window: Window,
    pub menu: MenuBar,
    pub nav: Flex,
    pub view: HelpView,
    pub status: Frame,
}

pub fn apply_theme(widgets: &mut ThemedWidgets, is_dark: bool) {
    let p = palette(is_dark);

    widgets.window.set_color(color(p.chrome));
    widgets.window.set_label_color(color(p.chrome_text));
    widgets.menu.set_color(color(p.chrome));
    widgets.menu.set_text_color(color(p.chrome_text));
    widgets.menu.set_selection_color(color(p.selection)); // Hover color

    widgets.nav.set_color(color(p.chrome));
    for i in 0..widgets.nav.children() {
        if let Some(mut button) = widgets.nav.child(i) {
            button.set_color(color(p.chrome));
            button.set_label_color(color(p.chrome_text));
            button.set_selection_color(color(p.selection));
        }
    }

    widgets.view.set_color(color(p.background));
    widgets.view.set_text_color(color(p.text));
    widgets.view.set_selection_color(color(p.selection));

    widgets.status.set_color(color(p.chrome));
    widgets.status.set_label_color(color(p.chrome_text));

    #[cfg(target_os = "windows")]
    if widgets.window.shown() {
        set_windows_titlebar_theme(&widgets.window, is_dark);
    }

    widgets.window.redraw();
}

/// The main window as a visual root: the `dark`/`light` markers select
/// the palette painted onto its widgets.
pub struct WindowRoot {
    classes: ClassList,
    widgets: ThemedWidgets,
}

impl WindowRoot {
    pub fn new(widgets: ThemedWidgets) -> Self {
        Self {
            classes: ClassList::new(),
            widgets,
        }
    }
}

impl VisualRoot for WindowRoot {
    fn add_class(&mut self, class: &str) {
        self.classes.add_class(class);
        if class == Theme::Dark.class_marker() {
            apply_theme(&mut self.widgets, true);
        } else if class == Theme::Light.class_marker() {
            apply_theme(&mut self.widgets, false);
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove_class(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.has_class(class)
    }
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // Try attribute 20 (Windows 11 / Windows 10 2004+)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20), // DWMWA_USE_IMMERSIVE_DARK_MODE
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );

        // Also try attribute 19 (Windows 10 1809-1903)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_document_uses_palette() {
        let dark = page_document("<p>hi</p>", true);
        assert!(dark.contains("bgcolor=\"#1e1e1e\""));
        assert!(dark.contains("text=\"#dcdcdc\""));
        assert!(dark.contains("<p>hi</p>"));

        let light = page_document("<p>hi</p>", false);
        assert!(light.contains("bgcolor=\"#ffffff\""));
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(palette(true), palette(false));
        assert_eq!(hex((1, 2, 255)), "#0102ff");
    }
}
