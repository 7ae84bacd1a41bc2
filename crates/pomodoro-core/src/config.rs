use anyhow::Context;
use serde::Deserialize;
use tracing::{
  info,
  warn
};

use crate::clock::{
  format_clock,
  parse_clock
};
use crate::mode::Mode;
use crate::settings::Durations;

pub const DEFAULT_TICK_MS: u32 = 1_000;
pub const DEFAULT_STORAGE_KEY: &str =
  "durations";
pub const DEFAULT_ALARM_SOURCE: &str =
  "/alarm.mp3";

fn default_tick_ms() -> u32 {
  DEFAULT_TICK_MS
}

fn default_storage_key() -> String {
  DEFAULT_STORAGE_KEY.to_string()
}

fn default_alarm_source() -> String {
  DEFAULT_ALARM_SOURCE.to_string()
}

/// Application settings compiled into the frontend.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct AppConfig {
  #[serde(default)]
  pub version:   u32,
  #[serde(default)]
  pub durations: Durations,
  #[serde(default)]
  pub timer:     TimerConfig,
  #[serde(default)]
  pub storage:   StorageConfig,
  #[serde(default)]
  pub alarm:     AlarmConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct TimerConfig {
  #[serde(default = "default_tick_ms")]
  pub tick_ms: u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct StorageConfig {
  #[serde(
    default = "default_storage_key"
  )]
  pub key: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct AlarmConfig {
  #[serde(
    default = "default_alarm_source"
  )]
  pub source: String
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      version:   1,
      durations: Durations::default(),
      timer:     TimerConfig::default(),
      storage:   StorageConfig::default(),
      alarm:     AlarmConfig::default()
    }
  }
}

impl Default for TimerConfig {
  fn default() -> Self {
    Self {
      tick_ms: default_tick_ms()
    }
  }
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      key: default_storage_key()
    }
  }
}

impl Default for AlarmConfig {
  fn default() -> Self {
    Self {
      source: default_alarm_source()
    }
  }
}

impl AppConfig {
  /// Parse and sanitize a TOML
  /// document.
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<AppConfig>(raw)
        .context(
          "failed to parse pomodoro \
           config"
        )?;
    config.sanitize();
    Ok(config)
  }

  /// Like [`AppConfig::from_toml_str`]
  /// but never fails: a broken
  /// document yields the defaults.
  pub fn load_embedded(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        info!(
          version = config.version,
          tick_ms = config.timer.tick_ms,
          storage_key = %config.storage.key,
          alarm = %config.alarm.source,
          "loaded pomodoro config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(error = %format!("{error:#}"), "failed parsing pomodoro config; using defaults");
        Self::default()
      }
    }
  }

  fn sanitize(&mut self) {
    let builtin = Durations::default();
    for mode in Mode::ALL {
      match parse_clock(
        self.durations.get(mode)
      ) {
        | Ok(seconds) => {
          self.durations.set(
            mode,
            format_clock(seconds)
          );
        }
        | Err(error) => {
          warn!(
            mode = %mode,
            %error,
            "invalid default \
             duration in config"
          );
          self.durations.set(
            mode,
            builtin.get(mode)
          );
        }
      }
    }

    if self.timer.tick_ms == 0 {
      self.timer.tick_ms =
        default_tick_ms();
    }

    if self.storage.key.trim().is_empty()
    {
      self.storage.key =
        default_storage_key();
    }

    if self
      .alarm
      .source
      .trim()
      .is_empty()
    {
      self.alarm.source =
        default_alarm_source();
    }
  }
}
