//! Typed view of the validated save file
//!
//! The save is a large game-defined JSON tree; only the subset the tracker
//! relies on is typed here. JSON field names are the game's exact PascalCase
//! or camelCase spellings, so every field carries a rename. Unknown fields
//! are tolerated and kept reachable through the raw tree held by the session.

use serde::Deserialize;

use crate::error::Result;

/// Root of the decrypted save document.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveFile {
    #[serde(rename = "playerData")]
    pub player_data: PlayerData,
}

impl SaveFile {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerData {
    #[serde(rename = "Collectables")]
    pub collectables: SavedDataList,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: i64,
    #[serde(rename = "EnemyJournalKillData")]
    pub enemy_journal_kill_data: JournalData,
    #[serde(rename = "MateriumCollected")]
    pub materium_collected: SavedDataList,
    #[serde(rename = "MementosDeposited")]
    pub mementos_deposited: SavedDataList,
    pub geo: i64,
    /// 0 = normal, 1 = steel soul.
    #[serde(rename = "permadeathMode")]
    pub permadeath_mode: i64,
    /// Total play time in seconds.
    #[serde(rename = "playTime")]
    pub play_time: f64,
    #[serde(rename = "QuestCompletionData")]
    pub quest_completion_data: SavedDataList,
    #[serde(rename = "Relics")]
    pub relics: SavedDataList,
    #[serde(rename = "scenesVisited")]
    pub scenes_visited: Vec<String>,
    #[serde(rename = "ShellShards")]
    pub shell_shards: i64,
    #[serde(rename = "ToolEquips")]
    pub tool_equips: SavedDataList,
    #[serde(rename = "Tools")]
    pub tools: SavedDataList,
    #[serde(default)]
    pub date: Option<String>,

    // Named key flags.
    #[serde(rename = "PurchasedBonebottomFaithToken")]
    pub purchased_bonebottom_faith_token: bool,
    #[serde(rename = "CollectedDustCageKey")]
    pub collected_dust_cage_key: bool,
    #[serde(rename = "MerchantEnclaveSimpleKey")]
    pub merchant_enclave_simple_key: bool,
    #[serde(rename = "BallowGivenKey")]
    pub ballow_given_key: bool,
    #[serde(rename = "collectedWardKey")]
    pub collected_ward_key: bool,
    #[serde(rename = "collectedWardBossKey")]
    pub collected_ward_boss_key: bool,
    #[serde(rename = "HasSlabKeyA")]
    pub has_slab_key_a: bool,
    #[serde(rename = "HasSlabKeyB")]
    pub has_slab_key_b: bool,
    #[serde(rename = "HasSlabKeyC")]
    pub has_slab_key_c: bool,
    #[serde(rename = "PurchasedArchitectKey")]
    pub purchased_architect_key: bool,
}

impl PlayerData {
    pub fn mode(&self) -> Mode {
        if self.permadeath_mode != 0 {
            Mode::Steel
        } else {
            Mode::Normal
        }
    }
}

/// Save mode, derived from `permadeathMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Steel,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Mode::Normal => write!(f, "normal"),
            Mode::Steel => write!(f, "steel"),
        }
    }
}

/// The `{ savedData: [{ Name, Data }] }` shape shared by `Tools`, `Relics`,
/// `QuestCompletionData` and friends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedDataList {
    #[serde(rename = "savedData")]
    pub saved_data: Vec<SavedEntry>,
}

impl SavedDataList {
    /// Find an entry by exact name. A missing entry is the normal
    /// "not yet obtained" case, never an error.
    pub fn find(&self, name: &str) -> Option<&SavedEntry> {
        self.saved_data.iter().find(|entry| entry.name == name)
    }

    /// Find an entry by case/whitespace-insensitive name.
    pub fn find_normalized(&self, normalized_name: &str) -> Option<&SavedEntry> {
        self.saved_data
            .iter()
            .find(|entry| crate::flags::normalize_name(&entry.name) == normalized_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedEntry {
    #[serde(rename = "Name")]
    pub name: String,
    /// Arbitrary-keyed bag; which keys matter depends on the list
    /// (`IsUnlocked`, `IsCompleted`, `IsDeposited`, `Amount`, ...).
    #[serde(rename = "Data")]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl SavedEntry {
    /// True iff `Data[key]` is literally `true`.
    pub fn data_flag(&self, key: &str) -> bool {
        self.data.get(key) == Some(&serde_json::Value::Bool(true))
    }

    pub fn data_number(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(serde_json::Value::as_f64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalData {
    pub list: Vec<JournalEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Record")]
    pub record: KillRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KillRecord {
    #[serde(rename = "Kills")]
    pub kills: i64,
    #[serde(rename = "HasBeenSeen")]
    pub has_been_seen: bool,
}

/// Format a play time in seconds the way the tracker displays it, e.g.
/// `"12h 34m"`.
pub fn format_play_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as i64;
    format!("{hours}h {minutes:02}m")
}
