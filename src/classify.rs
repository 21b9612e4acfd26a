//! Unlock classification
//!
//! Maps a resolved raw value plus its item's type to the display state:
//! done, accepted (partial progress), or locked. Recomputed on every pass,
//! never persisted.

use crate::item::{AnyOfCheck, Item, ItemRule};
use crate::resolve::{Progress, Resolved};

/// Display classification for one item. `done` and `accepted` are mutually
/// exclusive; both false means locked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unlock {
    pub done: bool,
    pub accepted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockState {
    Locked,
    Accepted,
    Done,
}

impl Unlock {
    fn done_if(done: bool) -> Unlock {
        Unlock { done, accepted: false }
    }

    pub fn state(self) -> UnlockState {
        if self.done {
            UnlockState::Done
        } else if self.accepted {
            UnlockState::Accepted
        } else {
            UnlockState::Locked
        }
    }
}

impl std::fmt::Display for UnlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            UnlockState::Locked => write!(f, "locked"),
            UnlockState::Accepted => write!(f, "accepted"),
            UnlockState::Done => write!(f, "done"),
        }
    }
}

/// Classify one item's resolved value.
pub fn classify(item: &Item, value: &Resolved) -> Unlock {
    match &item.rule {
        ItemRule::Level { required, .. } => Unlock::done_if(value.number_or_zero() >= *required as f64),

        ItemRule::Collectable { .. } => Unlock::done_if(value.number_or_zero() > 0.0),

        ItemRule::Quill { .. } => {
            // Exact tier match against the id suffix, not "at least".
            let done = match (value, quill_tier(item)) {
                (Resolved::Number(n), Some(tier)) => {
                    (1..=3).contains(&tier) && *n == tier as f64
                }
                _ => false,
            };
            Unlock::done_if(done)
        }

        ItemRule::Quest { .. } => Unlock {
            done: *value == Resolved::State(Progress::Completed) || value.is_true(),
            accepted: *value == Resolved::State(Progress::Accepted),
        },

        ItemRule::Relic { .. } | ItemRule::Materium { .. } | ItemRule::Device { .. } => Unlock {
            done: *value == Resolved::State(Progress::Deposited),
            accepted: *value == Resolved::State(Progress::Collected),
        },

        ItemRule::Journal { required, .. } => {
            let kills = value.number_or_zero();
            Unlock {
                done: kills >= *required as f64 || value.is_true(),
                accepted: kills > 0.0 && kills < *required as f64,
            }
        }

        ItemRule::Key { .. } => Unlock::done_if(value.is_true()),

        ItemRule::SceneVisited { .. } => Unlock::done_if(value.is_true()),

        ItemRule::AnyOf { any_of } => {
            let results = match value {
                Resolved::Many(results) => results.as_slice(),
                _ => &[],
            };
            let done = any_of.iter().zip(results).any(|(check, result)| match check {
                AnyOfCheck::Flag { .. }
                | AnyOfCheck::SceneBool { .. }
                | AnyOfCheck::SceneVisited { .. }
                | AnyOfCheck::FlagInt { .. } => result.is_true(),
                AnyOfCheck::Level { required, .. } => {
                    result.number_or_zero() >= *required as f64
                }
            });
            Unlock::done_if(done)
        }

        // flag, flagInt, sceneBool, tool, boss
        _ => {
            let done = value.is_true()
                || *value == Resolved::State(Progress::Collected)
                || *value == Resolved::State(Progress::Deposited);
            Unlock::done_if(done)
        }
    }
}

/// Tier a quill item expects, encoded in its id as `QuillState_<n>`.
fn quill_tier(item: &Item) -> Option<i64> {
    item.id
        .as_deref()?
        .strip_prefix("QuillState_")?
        .parse()
        .ok()
}
