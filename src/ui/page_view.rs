//! Scrolling helpers for the page view. Offsets are in pixels, as reported
//! by `HelpView::top_line`.

use fltk::{
    app::{self, TimeoutHandle},
    misc::HelpView,
    prelude::*,
};

use crate::app::domain::{ScrollBehavior, ScrollPosition};

const SMOOTH_STEPS: u32 = 12;
const FRAME_SECS: f64 = 0.016;

pub fn scroll_position(view: &HelpView) -> ScrollPosition {
    ScrollPosition {
        top: view.top_line(),
    }
}

pub fn scroll_to(view: &mut HelpView, position: ScrollPosition) {
    view.set_top_line(position.top);
}

/// Bring the named anchor to the top of the view. Smooth scrolling runs
/// on an FLTK timeout; the returned handle can cancel it.
pub fn scroll_to_anchor(
    view: &mut HelpView,
    anchor: &str,
    behavior: ScrollBehavior,
) -> Option<TimeoutHandle> {
    let start = view.top_line();
    view.set_top_line_string(anchor);
    let target = view.top_line();
    if behavior == ScrollBehavior::Auto || start == target {
        return None;
    }

    view.set_top_line(start);
    let mut view = view.clone();
    let mut step = 0;
    Some(app::add_timeout3(FRAME_SECS, move |handle| {
        step += 1;
        view.set_top_line(eased_offset(start, target, step, SMOOTH_STEPS));
        if step < SMOOTH_STEPS {
            app::repeat_timeout3(FRAME_SECS, handle);
        }
    }))
}

pub fn cancel_scroll(handle: Option<TimeoutHandle>) {
    if let Some(handle) = handle
        && app::has_timeout3(handle)
    {
        app::remove_timeout3(handle);
    }
}

/// Ease-out cubic interpolation between two offsets.
fn eased_offset(start: i32, target: i32, step: u32, steps: u32) -> i32 {
    let t = (step.min(steps) as f64) / steps as f64;
    let eased = 1.0 - (1.0 - t).powi(3);
    start + ((target - start) as f64 * eased).round() as i32
}
