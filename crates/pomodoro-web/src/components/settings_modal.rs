use std::collections::BTreeMap;

use pomodoro_core::{Durations, Mode};
use web_sys::{HtmlInputElement, InputEvent};
use yew::{Callback, Html, MouseEvent, Properties, TargetCast, function_component, html};

use super::stop_click_propagation;

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub open: bool,
    pub draft: Durations,
    pub errors: BTreeMap<Mode, String>,
    pub save_error: Option<String>,
    pub on_input: Callback<(Mode, String)>,
    pub on_cancel: Callback<MouseEvent>,
    pub on_save: Callback<MouseEvent>,
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let field = |mode: Mode| {
        let on_input = props.on_input.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((mode, input.value()));
        });
        let id = format!("duration-{}", mode.key());
        let error = props.errors.get(&mode);

        html! {
            <div class={if error.is_some() { "field invalid" } else { "field" }}>
                <label for={id.clone()}>{ mode.label() }</label>
                <input
                    id={id}
                    type="text"
                    placeholder="MM:SS"
                    value={props.draft.get(mode).to_string()}
                    oninput={oninput}
                />
                {
                    error.map(|message| html! {
                        <div class="field-error">{ message.clone() }</div>
                    }).unwrap_or_default()
                }
            </div>
        }
    };

    html! {
        <div class="modal-backdrop" onclick={props.on_cancel.clone()}>
            <div class="modal" role="dialog" onclick={stop_click_propagation()}>
                <div class="header">{ "⏱ Timer Settings" }</div>
                <div class="content">
                    { for Mode::ALL.into_iter().map(field) }
                    {
                        props.save_error.as_ref().map(|message| html! {
                            <div class="form-error">{ message.clone() }</div>
                        }).unwrap_or_default()
                    }
                    <div class="footer">
                        <button type="button" class="btn btn-ghost" onclick={props.on_cancel.clone()}>
                            { "Cancel" }
                        </button>
                        <button type="button" class="btn btn-primary" onclick={props.on_save.clone()}>
                            { "Save" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
