use fltk::{
    app::Sender,
    button::Button,
    enums::CallbackTrigger,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::messages::Message;
use crate::app::services::i18n::LocaleProvider;
use super::run_dialog;

/// Ask for a path such as `/ios-sdk#permissions` and navigate to it.
pub fn show_location_dialog(i18n: &LocaleProvider, current: &str, sender: &Sender<Message>) {
    let mut dialog_win = Window::default()
        .with_size(380, 120)
        .with_label(&i18n.t("dialog.location_title"))
        .center_screen();
    dialog_win.make_modal(true);
    Frame::default()
        .with_pos(20, 20)
        .with_size(60, 30)
        .with_label(&i18n.t("dialog.location_label"));
    let mut location_input = Input::default().with_pos(90, 20).with_size(270, 30);
    location_input.set_value(current);

    let mut go_btn = Button::default()
        .with_pos(190, 70).with_size(80, 30).with_label(&i18n.t("dialog.go"));
    let mut cancel_btn = Button::default()
        .with_pos(280, 70).with_size(80, 30).with_label(&i18n.t("dialog.cancel"));

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.show();
    let _ = location_input.take_focus();

    let s = *sender;
    let dialog_go = dialog_win.clone();
    let input_go = location_input.clone();
    go_btn.set_callback(move |_| {
        let target = input_go.value();
        let target = target.trim();
        if target.is_empty() {
            return;
        }
        s.send(Message::Navigate(target.to_string()));
        dialog_go.clone().hide();
    });

    // Enter key on input triggers Go
    let mut go_btn2 = go_btn.clone();
    location_input.set_trigger(CallbackTrigger::EnterKey);
    location_input.set_callback(move |_| {
        go_btn2.do_callback();
    });

    let dialog_close = dialog_win.clone();
    cancel_btn.set_callback(move |_| {
        dialog_close.clone().hide();
    });

    run_dialog(&dialog_win);
}
