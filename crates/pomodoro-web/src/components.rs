mod clock_face;
mod completion_modal;
mod mode_switch;
mod settings_modal;
mod timer_controls;

pub use clock_face::{ClockFace, ProgressBar};
pub use completion_modal::CompletionModal;
pub use mode_switch::ModeSwitch;
pub use settings_modal::SettingsModal;
pub use timer_controls::TimerControls;

use yew::{Callback, MouseEvent};

/// Swallows clicks inside a modal so they do not reach the backdrop.
fn stop_click_propagation() -> Callback<MouseEvent> {
    Callback::from(|e: MouseEvent| e.stop_propagation())
}
