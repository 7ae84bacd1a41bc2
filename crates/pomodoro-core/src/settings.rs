use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{
    Context,
    anyhow,
};
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    error,
    info,
    warn,
};

use crate::clock::{
    clock_seconds_lossy,
    format_clock,
    parse_clock,
};
use crate::mode::Mode;

/// Configured `MM:SS` duration of every mode.
///
/// Serializes as `{"pomodoro": .., "short-break": .., "long-break": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub pomodoro: String,
    #[serde(rename = "short-break")]
    pub short_break: String,
    #[serde(rename = "long-break")]
    pub long_break: String,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro: "25:00".to_string(),
            short_break: "05:00".to_string(),
            long_break: "15:00".to_string(),
        }
    }
}

impl Durations {
    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Pomodoro => &self.pomodoro,
            Mode::ShortBreak => &self.short_break,
            Mode::LongBreak => &self.long_break,
        }
    }

    pub fn set(&mut self, mode: Mode, value: impl Into<String>) {
        let slot = match mode {
            Mode::Pomodoro => &mut self.pomodoro,
            Mode::ShortBreak => &mut self.short_break,
            Mode::LongBreak => &mut self.long_break,
        };
        *slot = value.into();
    }

    /// Total seconds configured for `mode`.
    ///
    /// Saved mappings are validated, so the lossy path only serves values
    /// that bypassed validation.
    pub fn seconds(&self, mode: Mode) -> u32 {
        let raw = self.get(mode);
        parse_clock(raw).unwrap_or_else(|err| {
            warn!(mode = %mode, value = raw, error = %err, "unparseable duration");
            clock_seconds_lossy(raw)
        })
    }

    /// Parse a persisted JSON mapping, keeping every valid entry and taking
    /// the rest from `defaults`.
    pub fn from_json_lenient(raw: &str, defaults: &Durations) -> anyhow::Result<Self> {
        let entries: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(raw).context("duration mapping is not a JSON object")?;

        let mut durations = defaults.clone();
        for mode in Mode::ALL {
            match entries.get(mode.key()) {
                Some(serde_json::Value::String(value)) => match parse_clock(value) {
                    Ok(seconds) => durations.set(mode, format_clock(seconds)),
                    Err(err) => {
                        warn!(mode = %mode, value = %value, error = %err, "stored duration invalid; using default")
                    }
                },
                Some(other) => {
                    warn!(mode = %mode, value = %other, "stored duration is not a string; using default")
                }
                None => warn!(mode = %mode, "stored duration missing; using default"),
            }
        }

        for key in entries.keys().filter(|key| Mode::from_key(key).is_none()) {
            debug!(key = %key, "ignoring unknown stored duration key");
        }

        Ok(durations)
    }

    /// Validate every entry, returning the canonical mapping or the error
    /// message of each rejected mode.
    pub fn validated(&self) -> Result<Durations, BTreeMap<Mode, String>> {
        let mut canonical = self.clone();
        let mut errors = BTreeMap::new();
        for mode in Mode::ALL {
            match parse_clock(self.get(mode)) {
                Ok(seconds) => canonical.set(mode, format_clock(seconds)),
                Err(err) => {
                    errors.insert(mode, err.to_string());
                }
            }
        }
        if errors.is_empty() {
            Ok(canonical)
        } else {
            Err(errors)
        }
    }
}

/// Durable slot holding the serialized duration mapping.
pub trait DurationStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<String>>;
    fn save(&self, raw: &str) -> anyhow::Result<()>;
}

/// In-memory [`DurationStore`]. Clones share one slot, so a second timer
/// built over a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl DurationStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, raw: &str) -> anyhow::Result<()> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

/// Saved duration mapping plus the draft edited in the settings dialog.
///
/// The dialog is open exactly while a draft exists.
#[derive(Debug, Clone)]
pub struct Settings {
    saved: Durations,
    draft: Option<Durations>,
    field_errors: BTreeMap<Mode, String>,
    save_error: Option<String>,
}

impl Settings {
    pub fn new(saved: Durations) -> Self {
        Self {
            saved,
            draft: None,
            field_errors: BTreeMap::new(),
            save_error: None,
        }
    }

    /// Read the mapping from `store`, falling back to `defaults` when it is
    /// absent, unreadable or corrupt.
    #[tracing::instrument(skip_all)]
    pub fn load<S: DurationStore + ?Sized>(store: &S, defaults: &Durations) -> Self {
        let saved = match store.load() {
            Ok(Some(raw)) => match Durations::from_json_lenient(&raw, defaults) {
                Ok(durations) => {
                    info!(?durations, "loaded saved durations");
                    durations
                }
                Err(err) => {
                    error!(error = %format!("{err:#}"), "failed parsing saved durations; using defaults");
                    defaults.clone()
                }
            },
            Ok(None) => {
                debug!("no saved durations; using defaults");
                defaults.clone()
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed reading saved durations; using defaults");
                defaults.clone()
            }
        };
        Self::new(saved)
    }

    pub fn durations(&self) -> &Durations {
        &self.saved
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Start editing a copy of the saved mapping.
    pub fn open(&mut self) {
        self.draft = Some(self.saved.clone());
        self.field_errors.clear();
        self.save_error = None;
    }

    pub fn draft(&self) -> Option<&Durations> {
        self.draft.as_ref()
    }

    pub fn field_errors(&self) -> &BTreeMap<Mode, String> {
        &self.field_errors
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Store `text` verbatim in the draft; validation waits for save.
    pub fn edit(&mut self, mode: Mode, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.set(mode, text);
            self.field_errors.remove(&mode);
        }
    }

    /// Validate the draft, persist it as a full overwrite and close the
    /// dialog. On error the dialog stays open with the draft untouched.
    #[tracing::instrument(skip_all)]
    pub fn save<S: DurationStore + ?Sized>(&mut self, store: &S) -> anyhow::Result<()> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| anyhow!("settings dialog is not open"))?;

        let canonical = match draft.validated() {
            Ok(canonical) => canonical,
            Err(errors) => {
                let count = errors.len();
                self.field_errors = errors;
                self.save_error = None;
                return Err(anyhow!("{count} duration(s) are not valid MM:SS values"));
            }
        };

        let json = serde_json::to_string(&canonical).context("failed to serialize durations")?;
        if let Err(err) = store.save(&json) {
            self.save_error = Some(format!("Could not save settings: {err}"));
            return Err(err.context("failed to persist durations"));
        }

        info!(durations = ?canonical, "saved durations");
        self.saved = canonical;
        self.draft = None;
        self.field_errors.clear();
        self.save_error = None;
        Ok(())
    }

    /// Close the dialog and drop the draft, keeping the last saved mapping.
    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            debug!("settings edit cancelled");
        }
        self.field_errors.clear();
        self.save_error = None;
    }
}
