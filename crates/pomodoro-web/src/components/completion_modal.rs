use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

use super::stop_click_propagation;

#[derive(Properties, PartialEq)]
pub struct CompletionModalProps {
    pub open: bool,
    pub on_dismiss: Callback<MouseEvent>,
}

#[function_component(CompletionModal)]
pub fn completion_modal(props: &CompletionModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={props.on_dismiss.clone()}>
            <div class="modal modal-sm" role="alertdialog" onclick={stop_click_propagation()}>
                <div class="header">{ "Timer Complete!" }</div>
                <div class="content">
                    <p class="description">
                        { "The Pomodoro timer is finished. You can stop the music now." }
                    </p>
                    <div class="footer">
                        <button type="button" class="btn btn-primary" onclick={props.on_dismiss.clone()}>
                            { "Stop Music" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
