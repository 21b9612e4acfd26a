//! Item value resolution
//!
//! Given a loaded save and one item descriptor, produce the raw signal for
//! that item: a boolean, a number, or a progress tag. Absence is data here,
//! never an error — a missing entry in a `savedData` list just means the
//! player has not obtained the thing yet. Classification into
//! done/accepted/locked happens separately in [`crate::classify`].
//!
//! Resolution is a pure read of the load snapshot; calling it twice with the
//! same inputs returns the same value.

use serde_json::Value;

use crate::flags::normalize_name;
use crate::item::{AnyOfCheck, Item, ItemRule};
use crate::save::SavedEntry;
use crate::session::LoadedSave;

/// The raw signal extracted from a save for one item.
///
/// `Missing` covers both "no save loaded" and the lookups whose contract is
/// to report absence as undefined (rather than `false` or `0`).
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Missing,
    Bool(bool),
    Number(f64),
    State(Progress),
    /// One entry per sub-check of an `anyOf` item, in config order.
    Many(Vec<Resolved>),
}

/// String-enum progress tags used by quests, relics, materium and devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Completed,
    Accepted,
    Collected,
    Deposited,
}

impl Resolved {
    /// Numeric view with the resolver's `?? 0` semantics.
    pub fn number_or_zero(&self) -> f64 {
        match *self {
            Resolved::Number(n) => n,
            _ => 0.0,
        }
    }

    pub fn is_true(&self) -> bool {
        *self == Resolved::Bool(true)
    }
}

/// Map a raw JSON value to a resolved one. Only booleans and numbers carry
/// signal; anything else reads as absent.
fn from_json(value: &Value) -> Resolved {
    match value {
        Value::Bool(b) => Resolved::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(Resolved::Missing, Resolved::Number),
        _ => Resolved::Missing,
    }
}

/// Resolve one item against a loaded save.
pub fn resolve(save: &LoadedSave, item: &Item) -> Resolved {
    resolve_rule(save, &item.rule)
}

fn resolve_rule(save: &LoadedSave, rule: &ItemRule) -> Resolved {
    let player = &save.save().player_data;

    match rule {
        // Direct player-data reads, no fallback.
        ItemRule::Flag { flag } | ItemRule::Boss { flag } => {
            save.player_field(flag).map_or(Resolved::Missing, from_json)
        }

        ItemRule::FlagInt { flag } => {
            let set = match save.player_field(flag) {
                Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n >= 1.0),
                _ => false,
            };
            Resolved::Bool(set)
        }

        ItemRule::Level { flag, .. } => match save.player_field(flag) {
            Some(value) => from_json(value),
            None => Resolved::Number(0.0),
        },

        ItemRule::Quill { flag } => {
            if save.player_field("hasQuill") != Some(&Value::Bool(true)) {
                return Resolved::Number(0.0);
            }
            match save.player_field(flag) {
                Some(value) => from_json(value),
                None => Resolved::Number(0.0),
            }
        }

        ItemRule::SceneBool { scene, flag, required } => {
            if let Some(required) = required {
                // Value-matched variant: compare against the scene's
                // persistent int instead of the boolean index.
                let stored = persistent_int(save.raw(), scene, flag);
                return Resolved::Bool(stored == Some(*required));
            }
            Resolved::Bool(save.flags().is_set(scene, flag))
        }

        ItemRule::SceneVisited { scene } => {
            Resolved::Bool(player.scenes_visited.iter().any(|s| s == scene))
        }

        ItemRule::Key { flag, flags } => {
            if let Some(flags) = flags {
                let any = flags
                    .iter()
                    .any(|flag| save.player_field(flag) == Some(&Value::Bool(true)));
                return Resolved::Bool(any);
            }
            match flag.as_deref() {
                Some(flag) if !flag.is_empty() => {
                    Resolved::Bool(save.player_field(flag) == Some(&Value::Bool(true)))
                }
                _ => Resolved::Bool(false),
            }
        }

        ItemRule::Tool { flag } => {
            let wanted = normalize_name(flag);
            let entry = player
                .tools
                .find_normalized(&wanted)
                .or_else(|| player.tool_equips.find_normalized(&wanted));
            match entry {
                Some(entry) => Resolved::Bool(entry.data_flag("IsUnlocked")),
                None => Resolved::Missing,
            }
        }

        ItemRule::Collectable { flag } => match player.collectables.find(flag) {
            // An entry without an Amount counts as zero.
            Some(entry) => Resolved::Number(entry.data_number("Amount").unwrap_or(0.0)),
            None => Resolved::Missing,
        },

        ItemRule::Quest { flag } => {
            let wanted = normalize_name(flag);
            match player.quest_completion_data.find_normalized(&wanted) {
                Some(entry) => {
                    // Completed takes precedence over accepted.
                    if entry.data_flag("IsCompleted") {
                        Resolved::State(Progress::Completed)
                    } else if entry.data_flag("IsAccepted") {
                        Resolved::State(Progress::Accepted)
                    } else {
                        Resolved::Bool(false)
                    }
                }
                None => Resolved::Missing,
            }
        }

        ItemRule::Journal { flag, .. } => {
            let entry = player
                .enemy_journal_kill_data
                .list
                .iter()
                .find(|entry| entry.name == *flag);
            match entry {
                Some(entry) => Resolved::Number(entry.record.kills as f64),
                // Absent reads as 0, not false: "never seen" and explicit
                // zero kills land on the same side of classification.
                None => Resolved::Number(0.0),
            }
        }

        ItemRule::Relic { flag } => {
            let entry = player
                .relics
                .saved_data
                .iter()
                .chain(player.mementos_deposited.saved_data.iter())
                .find(|entry| entry.name == *flag);
            match entry {
                Some(entry) => relic_state(entry),
                None => Resolved::Bool(false),
            }
        }

        ItemRule::Materium { flag } => match player.materium_collected.find(flag) {
            Some(entry) => {
                if entry.data_flag("HasSeenInRelicBoard") {
                    Resolved::State(Progress::Deposited)
                } else if entry.data_flag("IsCollected") {
                    Resolved::State(Progress::Collected)
                } else {
                    Resolved::Bool(false)
                }
            }
            None => Resolved::Bool(false),
        },

        ItemRule::Device { scene, flag, related_flag } => {
            // The deposited check comes first, independent of scene flags.
            if save.player_field(related_flag) == Some(&Value::Bool(true)) {
                return Resolved::State(Progress::Deposited);
            }
            if save.flags().is_set(scene, flag) {
                return Resolved::State(Progress::Collected);
            }
            Resolved::Bool(false)
        }

        ItemRule::AnyOf { any_of } => {
            Resolved::Many(any_of.iter().map(|check| resolve_check(save, check)).collect())
        }
    }
}

fn resolve_check(save: &LoadedSave, check: &AnyOfCheck) -> Resolved {
    let rule = match check {
        AnyOfCheck::Flag { flag } => ItemRule::Flag { flag: flag.clone() },
        AnyOfCheck::FlagInt { flag } => ItemRule::FlagInt { flag: flag.clone() },
        AnyOfCheck::Level { flag, required } => ItemRule::Level {
            flag: flag.clone(),
            required: *required,
        },
        AnyOfCheck::SceneBool { scene, flag } => ItemRule::SceneBool {
            scene: scene.clone(),
            flag: flag.clone(),
            required: None,
        },
        AnyOfCheck::SceneVisited { scene } => ItemRule::SceneVisited { scene: scene.clone() },
    };
    resolve_rule(save, &rule)
}

fn relic_state(entry: &SavedEntry) -> Resolved {
    // Precedence: deposited beats board-seen beats collected.
    if entry.data_flag("IsDeposited") {
        Resolved::State(Progress::Deposited)
    } else if entry.data_flag("HasSeenInRelicBoard") || entry.data_flag("IsCollected") {
        Resolved::State(Progress::Collected)
    } else {
        Resolved::Bool(false)
    }
}

/// Read `sceneData.persistentInts.serializedList` for an exact
/// `(SceneName, ID)` match with a numeric value.
fn persistent_int(raw: &Value, scene: &str, flag: &str) -> Option<i64> {
    let list = raw
        .get("sceneData")?
        .get("persistentInts")?
        .get("serializedList")?
        .as_array()?;
    list.iter().find_map(|element| {
        let object = element.as_object()?;
        if object.get("SceneName")?.as_str()? != scene || object.get("ID")?.as_str()? != flag {
            return None;
        }
        object.get("Value")?.as_i64()
    })
}
