use anyhow::anyhow;
use pomodoro_core::DurationStore;

/// Duration mapping persisted under
/// one `localStorage` key.
pub(crate) struct LocalStore {
  key: String
}

impl LocalStore {
  pub(crate) fn new(
    key: impl Into<String>
  ) -> Self {
    Self {
      key: key.into()
    }
  }
}

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| {
      anyhow!("no browser window")
    })?
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "localStorage access \
         denied: {error:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!(
        "localStorage unavailable"
      )
    })
}

impl DurationStore for LocalStore {
  fn load(
    &self
  ) -> anyhow::Result<Option<String>> {
    let stored = local_storage()?
      .get_item(&self.key)
      .map_err(|error| {
        anyhow!(
          "failed reading {}: \
           {error:?}",
          self.key
        )
      })?;
    tracing::debug!(
      key = %self.key,
      present = stored.is_some(),
      "read durations from local storage"
    );
    Ok(stored)
  }

  fn save(
    &self,
    raw: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(&self.key, raw)
      .map_err(|error| {
        anyhow!(
          "failed writing {}: \
           {error:?}",
          self.key
        )
      })?;
    tracing::debug!(
      key = %self.key,
      "persisted durations"
    );
    Ok(())
  }
}
