//! Platform-free Pomodoro timer: modes, the countdown state machine, the
//! persisted duration settings and the completion alarm.
//!
//! The browser frontend supplies the three platform pieces through traits:
//! a [`settings::DurationStore`], an [`alarm::AlarmPlayer`] and the handle
//! type returned when it arms its repeating tick callback.

pub mod alarm;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod mode;
pub mod settings;
pub mod timer;

pub use alarm::{
  Alarm,
  AlarmPlayer
};
pub use clock::{
  format_clock,
  parse_clock,
  progress_percent
};
pub use config::AppConfig;
pub use countdown::{
  Countdown,
  CountdownState,
  Tick
};
pub use mode::Mode;
pub use settings::{
  DurationStore,
  Durations,
  MemoryStore,
  Settings
};
pub use timer::Pomodoro;
