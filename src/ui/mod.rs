//! FLTK shell: window, menu, dialogs and theme painting.

pub mod dialogs;
pub mod main_window;
pub mod menu;
pub mod page_view;
pub mod theme;
