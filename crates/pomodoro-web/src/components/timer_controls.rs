use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TimerControlsProps {
    pub running: bool,
    pub on_toggle: Callback<MouseEvent>,
    pub on_reset: Callback<MouseEvent>,
    pub on_settings: Callback<MouseEvent>,
}

#[function_component(TimerControls)]
pub fn timer_controls(props: &TimerControlsProps) -> Html {
    let (icon, label) = if props.running {
        ("❚❚", "Pause")
    } else {
        ("▶", "Start")
    };

    html! {
        <div class="controls">
            <button
                type="button"
                class="btn btn-primary"
                title={label}
                aria-label={label}
                onclick={props.on_toggle.clone()}
            >
                { icon }
            </button>
            <button
                type="button"
                class="icon-button"
                title="Reset"
                aria-label="Reset"
                onclick={props.on_reset.clone()}
            >
                { "↻" }
            </button>
            <button
                type="button"
                class="icon-button"
                title="Settings"
                aria-label="Settings"
                onclick={props.on_settings.clone()}
            >
                { "⚙" }
            </button>
        </div>
    }
}
