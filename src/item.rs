//! Item descriptors
//!
//! Items are static configuration, not game state: each one names a
//! trackable piece of progress and says where its value lives in the save.
//! The config's loose `type` discriminator becomes a real tagged union here,
//! one variant per type with exactly the fields that type needs, so the
//! resolver's dispatch is exhaustive and checked by the compiler.

use serde::Deserialize;

use crate::error::Result;

/// One trackable item from the config data files.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Items sharing a group are alternatives of each other: at most one
    /// counts toward display and completion.
    #[serde(default, rename = "exclusiveGroup")]
    pub exclusive_group: Option<String>,
    /// Upgrades of another tool are excluded from completion counting.
    #[serde(default, rename = "upgradeOf")]
    pub upgrade_of: Option<String>,
    #[serde(flatten)]
    pub rule: ItemRule,
}

impl Item {
    /// A bare item wrapping a rule, for programmatic probes.
    pub fn from_rule(rule: ItemRule) -> Item {
        Item {
            id: None,
            label: None,
            exclusive_group: None,
            upgrade_of: None,
            rule,
        }
    }

    /// The primary save-file flag this item reads, when it has one.
    pub fn flag(&self) -> Option<&str> {
        self.rule.flag()
    }
}

/// Where to find an item's state, tagged by the config's `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemRule {
    /// Direct boolean field on player data.
    Flag { flag: String },
    /// Integer field on player data treated as a boolean (`>= 1`).
    FlagInt { flag: String },
    /// Numeric progression (needle, tool pouch, ...) with a target level.
    Level { flag: String, required: i64 },
    /// Scene-scoped boolean from the flag index. Items carrying `required`
    /// compare against the scene's persistent int instead.
    SceneBool {
        scene: String,
        flag: String,
        #[serde(default)]
        required: Option<i64>,
    },
    /// Owned iff the scene appears in `scenesVisited`.
    SceneVisited { scene: String },
    /// Entry in `Tools` or `ToolEquips`, unlocked via `IsUnlocked`.
    Tool { flag: String },
    /// Entry in `Collectables`, counted via `Amount`.
    Collectable { flag: String },
    /// Quill tier; forced to 0 while the player lacks the quill.
    Quill { flag: String },
    /// Entry in `QuestCompletionData`; completed takes precedence over
    /// accepted.
    Quest { flag: String },
    /// Named key boolean, or any-of over several key booleans.
    Key {
        #[serde(default)]
        flag: Option<String>,
        #[serde(default)]
        flags: Option<Vec<String>>,
    },
    /// Enemy journal entry, tracked by kill count.
    Journal { flag: String, required: i64 },
    /// Entry in `Relics` or `MementosDeposited`.
    Relic { flag: String },
    /// Entry in `MateriumCollected`.
    Materium { flag: String },
    /// Deposited via a player-data flag, collected via a scene flag.
    Device {
        scene: String,
        flag: String,
        #[serde(rename = "relatedFlag")]
        related_flag: String,
    },
    /// Boss kills are simple boolean flags.
    Boss { flag: String },
    /// Owned iff any of the sub-checks passes.
    AnyOf {
        #[serde(rename = "anyOf")]
        any_of: Vec<AnyOfCheck>,
    },
}

impl ItemRule {
    pub fn flag(&self) -> Option<&str> {
        match self {
            ItemRule::Flag { flag }
            | ItemRule::FlagInt { flag }
            | ItemRule::Level { flag, .. }
            | ItemRule::SceneBool { flag, .. }
            | ItemRule::Tool { flag }
            | ItemRule::Collectable { flag }
            | ItemRule::Quill { flag }
            | ItemRule::Quest { flag }
            | ItemRule::Journal { flag, .. }
            | ItemRule::Relic { flag }
            | ItemRule::Materium { flag }
            | ItemRule::Device { flag, .. }
            | ItemRule::Boss { flag } => Some(flag),
            ItemRule::Key { flag, .. } => flag.as_deref(),
            ItemRule::SceneVisited { .. } | ItemRule::AnyOf { .. } => None,
        }
    }
}

/// Sub-check of an `anyOf` item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnyOfCheck {
    Flag { flag: String },
    FlagInt { flag: String },
    Level { flag: String, required: i64 },
    SceneBool { scene: String, flag: String },
    SceneVisited { scene: String },
}

/// One named category of items from a config data file.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub label: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub items: Vec<Item>,
}

/// A whole item config document. The shape is trusted at the type level;
/// no validation happens beyond deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub categories: Vec<Category>,
}

impl ItemConfig {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}
