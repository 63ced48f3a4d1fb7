//! Render session: what was last drawn, and whether the next fetch needs drawing at all.
//!
//! The session is owned by whoever drives rendering (see [`crate::view`]); it never
//! fetches and never sleeps. Each call hands it the outcome of one fetch and gets back the
//! scene to present, or `None` when nothing should change on screen.

use {
  crate::{
    config::Config,
    error::{Error, Result},
    growth::{EntranceCue, Growth},
    photos::Snapshot,
    scene::Scene,
    seed::Seed
  },
  tracing::{debug, info, trace, warn}
};


/// What caused a render.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trigger {
  /// first render after initialization, always drawn
  Initial,
  /// periodic fetch, drawn only if the bytes changed
  Poll,
  /// explicit request after an upload, always drawn
  Refresh
}

#[derive(Debug, Clone)]
struct Rendered {
  snapshot: Snapshot,
  count: usize,
  capacity: usize
}

#[derive(Debug, Clone)]
pub struct RenderSession {
  config: Config,
  seed: Seed,
  last: Option<Rendered>,
  cue: Option<EntranceCue>
}

impl RenderSession {
  pub fn new(config: Config, seed: Seed) -> Self {
    Self { config, seed, last: None, cue: None }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn seed(&self) -> Seed {
    self.seed
  }

  /// Count shown by the last render, `None` before the first one.
  pub fn last_count(&self) -> Option<usize> {
    self.last.as_ref().map(|last| last.count)
  }

  pub fn last_snapshot(&self) -> Option<&Snapshot> {
    self.last.as_ref().map(|last| &last.snapshot)
  }

  /// Cue of the last render, until taken.
  pub fn cue(&self) -> Option<EntranceCue> {
    self.cue
  }

  pub fn take_cue(&mut self) -> Option<EntranceCue> {
    self.cue.take()
  }

  /// Handle the outcome of a fetch.
  ///
  /// [`Error::DataUnavailable`] from the fetch or from parsing never propagates: the render
  /// is skipped, or an empty tree is drawn when `view.render_empty_on_unavailable` is set
  /// and nothing has been drawn yet. Layout errors do propagate.
  pub fn render(&mut self, trigger: Trigger, fetched: Result<Snapshot>) -> Result<Option<Scene>> {
    let snapshot = match fetched {
      Ok(snapshot) => snapshot,
      Err(e) if e.is_data_unavailable() => return self.unavailable(trigger, e),
      Err(e) => return Err(e)
    };
    if trigger == Trigger::Poll && self.last_snapshot() == Some(&snapshot) {
      trace!(bytes = snapshot.len(), "photo data unchanged");
      return Ok(None);
    }
    let data = match snapshot.parse() {
      Ok(data) => data,
      Err(e) => return self.unavailable(trigger, e)
    };

    let capacity = data.capacity_or(self.config.tree.max_capacity);
    let count = data.capacity_check(self.config.tree.max_capacity);
    let growth = Growth::between(self.last_count(), count);
    let cue = growth.entrance(self.config.view.entrance());
    let scene = self.compose(count, capacity)?
      .with_photos(&data)
      .with_entrance(cue);

    match growth {
      Growth::Grew { from, to } => info!(from, to, index = to - 1, "new ornament"),
      Growth::Shrank { from, to } => warn!(from, to, "photo count went down"),
      _ => debug!(?trigger, count, "rendered")
    }
    self.last = Some(Rendered { snapshot, count, capacity });
    self.cue = cue;
    Ok(Some(scene))
  }

  /// Redraw the last rendered data, e.g. after the viewport changed. Never carries a cue.
  pub fn rerender(&mut self) -> Result<Option<Scene>> {
    let (data, count, capacity) = match &self.last {
      Some(last) => (last.snapshot.parse()?, last.count, last.capacity),
      None => return Ok(None)
    };
    self.cue = None;
    Ok(Some(self.compose(count, capacity)?.with_photos(&data)))
  }

  fn compose(&self, count: usize, capacity: usize) -> Result<Scene> {
    if capacity == self.config.tree.max_capacity {
      return Scene::compose(count, self.seed, &self.config);
    }
    let mut config = self.config.clone();
    config.tree.max_capacity = capacity;
    Scene::compose(count, self.seed, &config)
  }

  fn unavailable(&mut self, trigger: Trigger, e: Error) -> Result<Option<Scene>> {
    warn!(?trigger, "{e}");
    if self.config.view.render_empty_on_unavailable && self.last.is_none() {
      return self.compose(0, self.config.tree.max_capacity).map(Some);
    }
    Ok(None)
  }
}
