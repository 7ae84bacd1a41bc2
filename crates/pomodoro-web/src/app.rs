mod audio;
mod storage;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use pomodoro_core::{
  AppConfig,
  Mode,
  Pomodoro,
  Tick
};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::{
  Component,
  Context,
  Html,
  MouseEvent,
  html
};

use self::audio::AudioPlayer;
use self::storage::LocalStore;
use crate::components::{
  ClockFace,
  CompletionModal,
  ModeSwitch,
  ProgressBar,
  SettingsModal,
  TimerControls
};

const POMODORO_CONFIG_TOML: &str =
  include_str!("../assets/pomodoro.toml");
const PAGE_TITLE: &str =
  "Pomodoro Timer";

type Timer = Pomodoro<
  LocalStore,
  Interval,
  AudioPlayer
>;

pub enum Msg {
  SelectMode(Mode),
  Toggle,
  Reset,
  Tick,
  OpenSettings,
  EditDuration(Mode, String),
  SaveSettings,
  CancelSettings,
  DismissCompletion,
  Escape
}

pub struct App {
  timer:    Timer,
  tick_ms:  u32,
  _keydown: Option<EventListener>
}

impl Component for App {
  type Message = Msg;
  type Properties = ();

  fn create(
    ctx: &Context<Self>
  ) -> Self {
    let config = AppConfig::load_embedded(
      POMODORO_CONFIG_TOML
    );
    let store = LocalStore::new(
      config.storage.key.clone()
    );
    let timer =
      Pomodoro::new(store, &config);

    let keydown =
      web_sys::window().map(|window| {
        let link = ctx.link().clone();
        EventListener::new(
          &window,
          "keydown",
          move |event| {
            if let Some(event) = event
              .dyn_ref::<KeyboardEvent>()
              && event.key() == "Escape"
            {
              link.send_message(
                Msg::Escape
              );
            }
          }
        )
      });

    Self {
      timer,
      tick_ms: config.timer.tick_ms,
      _keydown: keydown
    }
  }

  fn update(
    &mut self,
    ctx: &Context<Self>,
    msg: Self::Message
  ) -> bool {
    match msg {
      | Msg::SelectMode(mode) => {
        self.timer.select_mode(mode);
      }
      | Msg::Toggle => {
        let link = ctx.link().clone();
        let tick_ms = self.tick_ms;
        self.timer.toggle(move || {
          Interval::new(
            tick_ms,
            move || {
              link.send_message(
                Msg::Tick
              )
            }
          )
        });
        tracing::debug!(
          running =
            self.timer.is_running(),
          remaining =
            self.timer.remaining(),
          "start/pause toggled"
        );
      }
      | Msg::Reset => {
        self.timer.reset();
      }
      | Msg::Tick => {
        if self.timer.tick()
          == Tick::Ignored
        {
          return false;
        }
      }
      | Msg::OpenSettings => {
        self.timer.open_settings();
      }
      | Msg::EditDuration(
        mode,
        value
      ) => {
        self
          .timer
          .edit_duration(mode, value);
      }
      | Msg::SaveSettings => {
        if let Err(error) =
          self.timer.save_settings()
        {
          tracing::debug!(
            error = %format!("{error:#}"),
            "settings save rejected"
          );
        }
      }
      | Msg::CancelSettings => {
        self.timer.cancel_settings();
      }
      | Msg::DismissCompletion => {
        self.timer.dismiss_completion();
      }
      | Msg::Escape => {
        if self.timer.completion_open() {
          self
            .timer
            .dismiss_completion();
        } else if self
          .timer
          .settings_open()
        {
          self.timer.cancel_settings();
        } else {
          return false;
        }
      }
    }
    true
  }

  fn rendered(
    &mut self,
    _ctx: &Context<Self>,
    _first_render: bool
  ) {
    let title = document_title(
      &self.timer
    );
    if let Some(document) =
      web_sys::window()
        .and_then(|window| {
          window.document()
        })
    {
      document.set_title(&title);
    }
  }

  fn view(
    &self,
    ctx: &Context<Self>
  ) -> Html {
    let link = ctx.link();
    let timer = &self.timer;
    let draft = timer
      .draft()
      .cloned()
      .unwrap_or_else(|| {
        timer.durations().clone()
      });

    html! {
        <main class="page">
            <h1 class="title">{ PAGE_TITLE }</h1>
            <ModeSwitch
                active={timer.mode()}
                on_select={link.callback(Msg::SelectMode)}
            />
            <ProgressBar percent={timer.progress()} />
            <ClockFace display={timer.display()} mode={timer.mode()} />
            <TimerControls
                running={timer.is_running()}
                on_toggle={link.callback(|_: MouseEvent| Msg::Toggle)}
                on_reset={link.callback(|_: MouseEvent| Msg::Reset)}
                on_settings={link.callback(|_: MouseEvent| Msg::OpenSettings)}
            />
            <SettingsModal
                open={timer.settings_open()}
                draft={draft}
                errors={timer.draft_errors().clone()}
                save_error={timer.save_error().map(str::to_string)}
                on_input={link.callback(|(mode, value): (Mode, String)| Msg::EditDuration(mode, value))}
                on_cancel={link.callback(|_: MouseEvent| Msg::CancelSettings)}
                on_save={link.callback(|_: MouseEvent| Msg::SaveSettings)}
            />
            <CompletionModal
                open={timer.completion_open()}
                on_dismiss={link.callback(|_: MouseEvent| Msg::DismissCompletion)}
            />
        </main>
    }
  }
}

fn document_title(
  timer: &Timer
) -> String {
  if timer.is_running() {
    format!(
      "{} · {}",
      timer.display(),
      timer.mode().label()
    )
  } else {
    PAGE_TITLE.to_string()
  }
}
