use std::collections::BTreeMap;

use tracing::{
    debug,
    info,
    warn,
};

use crate::alarm::{
    Alarm,
    AlarmPlayer,
};
use crate::clock::{
    format_clock,
    progress_percent,
};
use crate::config::AppConfig;
use crate::countdown::{
    Countdown,
    CountdownState,
    Tick,
};
use crate::mode::Mode;
use crate::settings::{
    DurationStore,
    Durations,
    Settings,
};

/// The whole timer page state: active mode, countdown, settings dialog,
/// completion dialog and alarm.
///
/// `S` persists the durations, `H` is the handle of the repeating tick
/// callback and `P` plays the alarm sound.
pub struct Pomodoro<S, H, P> {
    store: S,
    mode: Mode,
    settings: Settings,
    countdown: Countdown<H>,
    alarm: Alarm<P>,
    completion_open: bool,
}

impl<S, H, P> Pomodoro<S, H, P>
where
    S: DurationStore,
    P: AlarmPlayer,
{
    #[tracing::instrument(skip_all)]
    pub fn new(store: S, config: &AppConfig) -> Self {
        let settings = Settings::load(&store, &config.durations);
        let mode = Mode::default();
        let countdown = Countdown::new(settings.durations().seconds(mode));
        info!(mode = %mode, remaining = countdown.remaining(), "timer ready");

        Self {
            store,
            mode,
            settings,
            countdown,
            alarm: Alarm::new(config.alarm.source.clone()),
            completion_open: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn durations(&self) -> &Durations {
        self.settings.durations()
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Configured length of the active mode in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.durations().seconds(self.mode)
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining())
    }

    pub fn progress(&self) -> f64 {
        progress_percent(self.total_seconds(), self.remaining())
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn state(&self) -> CountdownState {
        self.countdown.state()
    }

    pub fn alarm(&self) -> &Alarm<P> {
        &self.alarm
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Make `mode` current and reload its full duration. A running
    /// countdown keeps running from the new value. Selecting the active
    /// mode leaves the countdown untouched.
    pub fn select_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            debug!(mode = %mode, "mode already active");
            return;
        }
        self.mode = mode;
        self.recompute();
        debug!(mode = %mode, remaining = self.remaining(), "mode selected");
    }

    pub fn start<F>(&mut self, arm: F) -> bool
    where
        F: FnOnce() -> H,
    {
        self.countdown.start(arm)
    }

    pub fn pause(&mut self) -> bool {
        self.countdown.pause()
    }

    /// Start when idle, pause when running.
    pub fn toggle<F>(&mut self, arm: F)
    where
        F: FnOnce() -> H,
    {
        if self.is_running() {
            self.pause();
        } else {
            self.start(arm);
        }
    }

    pub fn reset(&mut self) {
        let total = self.total_seconds();
        self.countdown.reset(total);
    }

    /// Deliver one tick; on completion the alarm rings and the completion
    /// dialog opens.
    pub fn tick(&mut self) -> Tick {
        let tick = self.countdown.tick();
        if tick == Tick::Completed {
            info!(mode = %self.mode, "countdown complete");
            self.alarm.ring();
            self.completion_open = true;
        }
        tick
    }

    pub fn settings_open(&self) -> bool {
        self.settings.is_open()
    }

    pub fn draft(&self) -> Option<&Durations> {
        self.settings.draft()
    }

    pub fn draft_errors(&self) -> &BTreeMap<Mode, String> {
        self.settings.field_errors()
    }

    pub fn save_error(&self) -> Option<&str> {
        self.settings.save_error()
    }

    pub fn open_settings(&mut self) {
        self.settings.open();
    }

    pub fn edit_duration(&mut self, mode: Mode, text: impl Into<String>) {
        self.settings.edit(mode, text);
    }

    /// Persist the draft, close the dialog and reload the active mode's
    /// duration, even mid-countdown.
    pub fn save_settings(&mut self) -> anyhow::Result<()> {
        if let Err(err) = self.settings.save(&self.store) {
            warn!(error = %format!("{err:#}"), "settings not saved");
            return Err(err);
        }
        self.recompute();
        Ok(())
    }

    pub fn cancel_settings(&mut self) {
        self.settings.cancel();
    }

    pub fn completion_open(&self) -> bool {
        self.completion_open
    }

    /// Silence the alarm and close the completion dialog.
    pub fn dismiss_completion(&mut self) {
        self.alarm.silence();
        self.completion_open = false;
    }

    fn recompute(&mut self) {
        let total = self.total_seconds();
        self.countdown.set_remaining(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    struct Silent;

    impl AlarmPlayer for Silent {
        fn open(_source: &str) -> anyhow::Result<Self> {
            Ok(Silent)
        }

        fn play(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn pause(&mut self) {}

        fn rewind(&mut self) {}
    }

    fn timer() -> Pomodoro<MemoryStore, (), Silent> {
        Pomodoro::new(MemoryStore::new(), &AppConfig::default())
    }

    #[test]
    fn toggle_starts_and_pauses() {
        let mut timer = timer();
        timer.toggle(|| ());
        assert!(timer.is_running());
        timer.tick();
        timer.toggle(|| ());
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 1499);
    }

    #[test]
    fn selecting_a_mode_while_running_keeps_running() {
        let mut timer = timer();
        timer.start(|| ());
        timer.tick();
        timer.select_mode(Mode::ShortBreak);
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 300);
    }

    #[test]
    fn failed_save_keeps_remaining() {
        let mut timer = timer();
        timer.start(|| ());
        timer.tick();
        timer.open_settings();
        timer.edit_duration(Mode::Pomodoro, "25");
        assert!(timer.save_settings().is_err());
        assert!(timer.settings_open());
        assert_eq!(timer.remaining(), 1499);
        assert!(timer.draft_errors().contains_key(&Mode::Pomodoro));
    }
}
