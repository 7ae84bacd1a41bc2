use anyhow::anyhow;
use pomodoro_core::AlarmPlayer;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Alarm sound backed by a detached
/// `<audio>` element.
pub(crate) struct AudioPlayer {
  element: HtmlAudioElement
}

impl AlarmPlayer for AudioPlayer {
  fn open(
    source: &str
  ) -> anyhow::Result<Self> {
    let element =
      HtmlAudioElement::new_with_src(
        source
      )
      .map_err(|error| {
        anyhow!(
          "failed creating audio \
           element for {source}: \
           {error:?}"
        )
      })?;
    Ok(Self { element })
  }

  fn play(
    &mut self
  ) -> anyhow::Result<()> {
    let promise: js_sys::Promise =
      self.element.play().map_err(
        |error| {
          anyhow!(
            "audio play failed: \
             {error:?}"
          )
        }
      )?;

    // Autoplay policies reject the
    // promise rather than throwing.
    wasm_bindgen_futures::spawn_local(
      async move {
        if let Err(error) =
          JsFuture::from(promise).await
        {
          tracing::warn!(
            ?error,
            "alarm playback rejected \
             by the browser"
          );
        }
      }
    );
    Ok(())
  }

  fn pause(&mut self) {
    if let Err(error) =
      self.element.pause()
    {
      tracing::warn!(
        ?error,
        "failed pausing alarm"
      );
    }
  }

  fn rewind(&mut self) {
    self.element.set_current_time(0.0);
  }
}
