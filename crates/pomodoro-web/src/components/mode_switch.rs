use pomodoro_core::Mode;
use yew::{Callback, Classes, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ModeSwitchProps {
    pub active: Mode,
    pub on_select: Callback<Mode>,
}

#[function_component(ModeSwitch)]
pub fn mode_switch(props: &ModeSwitchProps) -> Html {
    html! {
        <div class="mode-switch">
            {
                for Mode::ALL.into_iter().map(|mode| {
                    let on_select = props.on_select.clone();
                    html! {
                        <button
                            type="button"
                            class={mode_button_class(mode, props.active == mode)}
                            onclick={move |_| on_select.emit(mode)}
                        >
                            { mode.label() }
                        </button>
                    }
                })
            }
        </div>
    }
}

fn mode_button_class(mode: Mode, active: bool) -> Classes {
    if active {
        classes!("mode-button", "active", format!("accent-{}", mode.accent()))
    } else {
        classes!("mode-button")
    }
}
