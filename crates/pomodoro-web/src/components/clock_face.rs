use pomodoro_core::Mode;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub percent: f64,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let width = format!("width: {:.3}%", props.percent.clamp(0.0, 100.0));
    html! {
        <div class="progress">
            <div class="progress-fill" style={width} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ClockFaceProps {
    pub display: String,
    pub mode: Mode,
}

#[function_component(ClockFace)]
pub fn clock_face(props: &ClockFaceProps) -> Html {
    html! {
        <div class={format!("clock-face mode-{}", props.mode.key())}>
            <p class="clock-digits" role="timer">{ props.display.clone() }</p>
        </div>
    }
}
