use std::cell::Cell;
use std::rc::Rc;

use pomodoro_core::{
    AlarmPlayer, AppConfig, CountdownState, DurationStore, MemoryStore, Mode, Pomodoro, Tick,
};

#[derive(Debug, Default)]
struct FakePlayer {
    playing: bool,
    position: u32,
    plays: u32,
}

impl AlarmPlayer for FakePlayer {
    fn open(_source: &str) -> anyhow::Result<Self> {
        Ok(Self::default())
    }

    fn play(&mut self) -> anyhow::Result<()> {
        self.playing = true;
        self.position = 3;
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.position = 0;
    }
}

/// Stand-in for the browser interval; counts how often it was cancelled.
struct FakeInterval(Rc<Cell<u32>>);

impl Drop for FakeInterval {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

type Timer = Pomodoro<MemoryStore, FakeInterval, FakePlayer>;

fn new_timer(store: MemoryStore) -> Timer {
    Pomodoro::new(store, &AppConfig::default())
}

fn start(timer: &mut Timer, cancels: &Rc<Cell<u32>>) -> bool {
    let cancels = Rc::clone(cancels);
    timer.start(move || FakeInterval(cancels))
}

#[test]
fn default_pomodoro_ticks_down_with_progress() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());

    assert_eq!(timer.mode(), Mode::Pomodoro);
    assert_eq!(timer.remaining(), 1500);
    assert_eq!(timer.display(), "25:00");
    assert_eq!(timer.progress(), 0.0);

    assert!(start(&mut timer, &cancels));
    assert_eq!(timer.tick(), Tick::Continue { remaining: 1499 });
    assert_eq!(timer.display(), "24:59");
    assert!((timer.progress() - 0.0667).abs() < 0.001);
}

#[test]
fn selecting_each_mode_loads_its_duration() {
    let mut timer = new_timer(MemoryStore::new());
    for (mode, seconds) in [
        (Mode::ShortBreak, 300),
        (Mode::LongBreak, 900),
        (Mode::Pomodoro, 1500),
    ] {
        timer.select_mode(mode);
        assert_eq!(timer.mode(), mode);
        assert_eq!(timer.remaining(), seconds);
    }

    timer.select_mode(Mode::Pomodoro);
    assert_eq!(timer.remaining(), 1500);
}

#[test]
fn reselecting_active_mode_keeps_progress() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());
    assert!(start(&mut timer, &cancels));
    for _ in 0..10 {
        timer.tick();
    }

    timer.select_mode(Mode::Pomodoro);
    assert_eq!(timer.remaining(), 1490);
    assert!(timer.is_running());
    assert_eq!(cancels.get(), 0);
}

#[test]
fn short_break_completes_after_five_ticks() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());
    timer.select_mode(Mode::ShortBreak);
    timer.open_settings();
    timer.edit_duration(Mode::ShortBreak, "00:05");
    timer.save_settings().expect("save short break");
    assert_eq!(timer.remaining(), 5);

    start(&mut timer, &cancels);
    for expected in (1..=4).rev() {
        assert_eq!(timer.tick(), Tick::Continue { remaining: expected });
        assert!(!timer.completion_open());
    }
    assert_eq!(timer.tick(), Tick::Completed);

    assert_eq!(timer.remaining(), 0);
    assert!(!timer.is_running());
    assert_eq!(timer.state(), CountdownState::Completed);
    assert!(timer.completion_open());
    assert!(timer.alarm().is_ringing());
    assert_eq!(cancels.get(), 1);
    assert_eq!(timer.progress(), 100.0);

    assert_eq!(timer.tick(), Tick::Ignored);
}

#[test]
fn dismissing_completion_stops_and_rewinds_alarm() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());
    timer.open_settings();
    timer.edit_duration(Mode::Pomodoro, "00:01");
    timer.save_settings().expect("save pomodoro");

    start(&mut timer, &cancels);
    timer.tick();
    assert!(timer.completion_open());

    timer.dismiss_completion();
    assert!(!timer.completion_open());
    assert!(!timer.alarm().is_ringing());
    let player = timer.alarm().player().expect("alarm player after ring");
    assert!(!player.playing);
    assert_eq!(player.position, 0);

    // Restarting at zero completes again on the next tick, reusing the player.
    start(&mut timer, &cancels);
    assert_eq!(timer.tick(), Tick::Completed);
    let player = timer.alarm().player().expect("alarm player after second ring");
    assert_eq!(player.plays, 2);
}

#[test]
fn reset_restores_full_duration_from_any_state() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());

    timer.reset();
    assert_eq!(timer.remaining(), 1500);

    start(&mut timer, &cancels);
    timer.tick();
    timer.tick();
    timer.reset();
    assert_eq!(timer.remaining(), 1500);
    assert!(!timer.is_running());
    assert_eq!(timer.state(), CountdownState::Idle);
    assert_eq!(cancels.get(), 1);

    start(&mut timer, &cancels);
    timer.pause();
    timer.reset();
    assert_eq!(cancels.get(), 2);
    assert_eq!(timer.remaining(), 1500);
}

#[test]
fn pause_preserves_remaining_time() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());
    start(&mut timer, &cancels);
    timer.tick();
    timer.tick();
    timer.tick();
    assert!(timer.pause());
    assert_eq!(timer.remaining(), 1497);
    assert_eq!(timer.tick(), Tick::Ignored);
    assert_eq!(timer.remaining(), 1497);
    assert_eq!(cancels.get(), 1);
}

#[test]
fn saving_active_mode_recomputes_immediately() {
    let cancels = Rc::new(Cell::new(0));
    let mut timer = new_timer(MemoryStore::new());
    timer.select_mode(Mode::LongBreak);
    start(&mut timer, &cancels);
    timer.tick();

    timer.open_settings();
    timer.edit_duration(Mode::LongBreak, "10:00");
    timer.save_settings().expect("save long break");

    assert_eq!(timer.remaining(), 600);
    assert!(!timer.settings_open());
    assert!(timer.is_running());
    assert_eq!(timer.progress(), 0.0);
}

#[test]
fn saved_durations_survive_a_reload() {
    let store = MemoryStore::new();
    let mut timer = new_timer(store.clone());
    timer.open_settings();
    timer.edit_duration(Mode::Pomodoro, "50:00");
    timer.edit_duration(Mode::ShortBreak, "10:00");
    timer.edit_duration(Mode::LongBreak, "30:00");
    timer.save_settings().expect("save all durations");
    let saved = timer.durations().clone();
    drop(timer);

    let reloaded = new_timer(store.clone());
    assert_eq!(reloaded.durations(), &saved);
    assert_eq!(reloaded.remaining(), 3000);
    assert!(store.load().expect("load store").is_some());
}

#[test]
fn cancel_discards_draft_without_recompute() {
    let store = MemoryStore::new();
    let mut timer = new_timer(store.clone());
    timer.open_settings();
    timer.edit_duration(Mode::Pomodoro, "01:00");
    timer.cancel_settings();

    assert!(!timer.settings_open());
    assert_eq!(timer.durations().pomodoro, "25:00");
    assert_eq!(timer.remaining(), 1500);
    assert_eq!(store.contents(), None);
}

#[test]
fn corrupt_storage_starts_from_defaults() {
    let timer = new_timer(MemoryStore::with_contents("[1, 2, 3]"));
    assert_eq!(timer.durations().pomodoro, "25:00");
    assert_eq!(timer.remaining(), 1500);
}
