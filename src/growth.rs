//! Deciding which ornament is new.
//!
//! Every render recomputes the whole layout at the current count, so growing the tree can
//! move ornaments that were already on screen. What survives across renders is only the
//! count that was last shown: when it grows, the highest index gets a one-shot entrance
//! cue. Renders at an unchanged count (polls, refreshes, resizes) never replay it.

use {
  serde::Serialize,
  std::time::Duration
};

#[cfg(test)] mod tests;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Growth {
  /// nothing rendered before
  Initial,
  Grew { from: usize, to: usize },
  Unchanged,
  Shrank { from: usize, to: usize }
}

impl Growth {
  pub fn between(previous: Option<usize>, current: usize) -> Self {
    match previous {
      None => Growth::Initial,
      Some(from) if current > from => Growth::Grew { from, to: current },
      Some(from) if current < from => Growth::Shrank { from, to: current },
      Some(_) => Growth::Unchanged
    }
  }

  /// The single new ornament, if any.
  pub fn new_index(self) -> Option<usize> {
    match self {
      Growth::Grew { to, .. } => Some(to - 1),
      _ => None
    }
  }

  pub fn entrance(self, duration: Duration) -> Option<EntranceCue> {
    self.new_index().map(|index| EntranceCue {
      index,
      duration_ms: duration.as_millis() as u64
    })
  }
}

/// Transient highlight for a freshly added ornament.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct EntranceCue {
  pub index: usize,
  pub duration_ms: u64
}

impl EntranceCue {
  pub fn duration(&self) -> Duration {
    Duration::from_millis(self.duration_ms)
  }
}
