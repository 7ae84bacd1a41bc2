use tracing::{
    debug,
    error,
    info,
};

/// Platform sound playback used for the completion alarm.
pub trait AlarmPlayer {
    /// Load the sound at `source`. Called at most once per [`Alarm`].
    fn open(source: &str) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Start, or resume, playback from the current position.
    fn play(&mut self) -> anyhow::Result<()>;
    fn pause(&mut self);
    /// Move the playback position back to the start.
    fn rewind(&mut self);
}

/// Completion alarm owning one lazily opened player.
#[derive(Debug)]
pub struct Alarm<P> {
    source: String,
    player: Option<P>,
    ringing: bool,
}

impl<P: AlarmPlayer> Alarm<P> {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            player: None,
            ringing: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    /// Start playback, opening the player on first use. Failures are
    /// logged; an alarm that cannot sound is not an error for the timer.
    pub fn ring(&mut self) {
        if self.player.is_none() {
            match P::open(&self.source) {
                Ok(player) => {
                    debug!(source = %self.source, "opened alarm sound");
                    self.player = Some(player);
                }
                Err(err) => {
                    error!(source = %self.source, error = %format!("{err:#}"), "failed to open alarm sound");
                    return;
                }
            }
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        match player.play() {
            Ok(()) => {
                self.ringing = true;
                info!("alarm ringing");
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed to play alarm sound");
            }
        }
    }

    /// Stop playback and rewind so the next ring starts from the top.
    pub fn silence(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.pause();
            player.rewind();
            if self.ringing {
                debug!("alarm silenced");
            }
        }
        self.ringing = false;
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        plays: u32,
        pauses: u32,
        position: u32,
    }

    impl AlarmPlayer for Recorder {
        fn open(_source: &str) -> anyhow::Result<Self> {
            Ok(Self::default())
        }

        fn play(&mut self) -> anyhow::Result<()> {
            self.plays += 1;
            self.position += 1;
            Ok(())
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn rewind(&mut self) {
            self.position = 0;
        }
    }

    struct Unavailable;

    impl AlarmPlayer for Unavailable {
        fn open(source: &str) -> anyhow::Result<Self> {
            bail!("no audio support for {source}")
        }

        fn play(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn pause(&mut self) {}

        fn rewind(&mut self) {}
    }

    #[test]
    fn player_is_created_once_and_reused() {
        let mut alarm = Alarm::<Recorder>::new("/alarm.mp3");
        assert!(alarm.player().is_none());

        alarm.ring();
        alarm.silence();
        alarm.ring();

        let player = alarm.player().expect("player after ring");
        assert_eq!(player.plays, 2);
        assert_eq!(player.pauses, 1);
        assert!(alarm.is_ringing());
    }

    #[test]
    fn silence_pauses_and_rewinds() {
        let mut alarm = Alarm::<Recorder>::new("/alarm.mp3");
        alarm.ring();
        alarm.silence();

        let player = alarm.player().expect("player after ring");
        assert_eq!(player.position, 0);
        assert!(!alarm.is_ringing());
    }

    #[test]
    fn silence_before_any_ring_is_a_no_op() {
        let mut alarm = Alarm::<Recorder>::new("/alarm.mp3");
        alarm.silence();
        assert!(alarm.player().is_none());
    }

    #[test]
    fn open_failure_is_swallowed() {
        let mut alarm = Alarm::<Unavailable>::new("/alarm.mp3");
        alarm.ring();
        assert!(alarm.player().is_none());
        assert!(!alarm.is_ringing());
    }
}
