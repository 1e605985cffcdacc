use fltk::{
    button::Button,
    enums::{Align, Color, Font},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    window::Window,
};

use crate::app::domain::AppSettings;
use crate::app::services::i18n::LocaleProvider;
use super::run_dialog;

/// Show About dialog
pub fn show_about_dialog(i18n: &LocaleProvider) {
    let version = env!("CARGO_PKG_VERSION");
    let mut dialog = Window::default()
        .with_size(420, 260)
        .with_label(&i18n.t("about.title"))
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 400, 240, None);
    flex.set_type(FlexType::Column);
    flex.set_spacing(10);

    let mut title = Frame::default();
    title.set_label(&i18n.t("app.title"));
    title.set_label_size(22);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 40);

    let mut version_frame = Frame::default();
    version_frame.set_label(&i18n.t_with("about.version", &[("version", version)]));
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 25);

    let mut desc_frame = Frame::default();
    desc_frame.set_label(&i18n.t("about.description"));
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(Color::from_rgb(100, 100, 100));
    desc_frame.set_align(Align::Center | Align::Inside | Align::Wrap);
    flex.fixed(&desc_frame, 40);

    // Where settings and preferences live, for support questions.
    let mut info_frame = Frame::default();
    info_frame.set_label(&AppSettings::config_dir().display().to_string());
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(Align::Center | Align::Inside | Align::Wrap);

    let mut close_btn = Button::default().with_label(&i18n.t("about.close"));
    flex.fixed(&close_btn, 35);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    run_dialog(&dialog);
}
