use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    window::Window,
};

use crate::app::controllers::router::Router;
use crate::app::domain::AppSettings;
use crate::app::messages::Message;
use crate::app::services::i18n::LocaleProvider;
use super::theme::ThemedWidgets;

const MENU_HEIGHT: i32 = 30;
const NAV_HEIGHT: i32 = 32;
const STATUS_HEIGHT: i32 = 22;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    /// One button per page route.
    pub nav: Flex,
    pub view: HelpView,
    pub status: Frame,
}

impl MainWidgets {
    pub fn themed(&self) -> ThemedWidgets {
        ThemedWidgets {
            window: self.wind.clone(),
            menu: self.menu.clone(),
            nav: self.nav.clone(),
            view: self.view.clone(),
            status: self.status.clone(),
        }
    }
}

pub fn build_main_window(
    settings: &AppSettings,
    i18n: &LocaleProvider,
    router: &Router,
    sender: &Sender<Message>,
) -> MainWidgets {
    let (w, h) = (settings.window_width, settings.window_height);
    let mut wind = Window::new(100, 100, w, h, None);
    wind.set_label(&i18n.t("app.title"));
    wind.set_xclass("sdk-docs");

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let mut nav = Flex::default();
    nav.set_type(FlexType::Row);
    nav.set_margin(4);
    nav.set_spacing(6);
    nav.set_frame(FrameType::FlatBox);
    for route in router.page_routes() {
        let Some(name) = route.name() else { continue };
        let mut button = Button::default().with_label(&i18n.t(&format!("nav.{name}")));
        button.set_frame(FrameType::FlatBox);
        button.set_tooltip(&i18n.t(&format!("titles.{name}")));
        let path = route.path.clone();
        let s = *sender;
        button.set_callback(move |_| s.send(Message::Navigate(path.clone())));
        nav.fixed(&button, 110);
    }
    // Keeps the buttons packed to the left.
    Frame::default();
    nav.end();
    flex.fixed(&nav, NAV_HEIGHT);

    let mut view = HelpView::default();
    view.set_text_size(15);

    let mut status = Frame::default();
    status.set_frame(FrameType::FlatBox);
    status.set_align(Align::Left | Align::Inside);
    status.set_label_size(12);
    flex.fixed(&status, STATUS_HEIGHT);

    flex.end();
    wind.end();
    wind.resizable(&flex);

    MainWidgets {
        wind,
        menu,
        nav,
        view,
        status,
    }
}
