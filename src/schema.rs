//! Structural validation of the decrypted save document
//!
//! A wrong file selected by the user is an expected, everyday outcome, so
//! validation never panics and reports every violated field path with the
//! expected vs. actual shape, not just the first. On success the document is
//! handed to serde for the typed [`SaveFile`](crate::save::SaveFile) view;
//! downstream code may then assume the required fields exist, while optional
//! nested entries (a missing name in a `savedData` list) stay a normal
//! "not yet obtained" case.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::save::SaveFile;

/// One violated field in the save document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path from the root, e.g. `playerData.geo`.
    pub path: String,
    pub expected: &'static str,
    /// JSON type actually found, or `"missing"`.
    pub actual: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}

/// The named boolean key flags required on `playerData`.
const KEY_FLAGS: [&str; 10] = [
    "PurchasedBonebottomFaithToken",
    "CollectedDustCageKey",
    "MerchantEnclaveSimpleKey",
    "BallowGivenKey",
    "collectedWardKey",
    "collectedWardBossKey",
    "HasSlabKeyC",
    "HasSlabKeyA",
    "HasSlabKeyB",
    "PurchasedArchitectKey",
];

/// The `playerData` fields that must be `{ savedData: [{ Name, Data }] }`.
const SAVED_DATA_FIELDS: [&str; 7] = [
    "Collectables",
    "MateriumCollected",
    "MementosDeposited",
    "QuestCompletionData",
    "Relics",
    "ToolEquips",
    "Tools",
];

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn report(&mut self, path: String, expected: &'static str, found: Option<&Value>) {
        self.violations.push(Violation {
            path,
            expected,
            actual: found.map_or_else(|| "missing".to_string(), |v| json_type(v).to_string()),
        });
    }

    /// Fetch a field, reporting it when absent or failing `ok`.
    fn field<'a>(
        &mut self,
        object: &'a Value,
        path: &str,
        name: &str,
        expected: &'static str,
        ok: fn(&Value) -> bool,
    ) -> Option<&'a Value> {
        let found = object.get(name);
        match found {
            Some(value) if ok(value) => Some(value),
            _ => {
                let full = if path.is_empty() {
                    name.to_string()
                } else {
                    format!("{path}.{name}")
                };
                self.report(full, expected, found);
                None
            }
        }
    }

    fn check_saved_data(&mut self, player_data: &Value, path: &str, name: &str) {
        let Some(container) =
            self.field(player_data, path, name, "object with savedData", Value::is_object)
        else {
            return;
        };
        let container_path = format!("{path}.{name}");
        let Some(list) = self.field(container, &container_path, "savedData", "array", Value::is_array)
        else {
            return;
        };
        for (i, entry) in list.as_array().unwrap().iter().enumerate() {
            let entry_path = format!("{container_path}.savedData[{i}]");
            if !entry.is_object() {
                self.report(entry_path, "object", Some(entry));
                continue;
            }
            self.field(entry, &entry_path, "Name", "string", Value::is_string);
            self.field(entry, &entry_path, "Data", "object", Value::is_object);
        }
    }

    fn check_journal(&mut self, player_data: &Value) {
        let path = "playerData";
        let Some(journal) =
            self.field(player_data, path, "EnemyJournalKillData", "object", Value::is_object)
        else {
            return;
        };
        let journal_path = "playerData.EnemyJournalKillData";
        let Some(list) = self.field(journal, journal_path, "list", "array", Value::is_array) else {
            return;
        };
        for (i, entry) in list.as_array().unwrap().iter().enumerate() {
            let entry_path = format!("{journal_path}.list[{i}]");
            if !entry.is_object() {
                self.report(entry_path, "object", Some(entry));
                continue;
            }
            self.field(entry, &entry_path, "Name", "string", Value::is_string);
            if let Some(record) = self.field(entry, &entry_path, "Record", "object", Value::is_object)
            {
                let record_path = format!("{entry_path}.Record");
                self.field(record, &record_path, "Kills", "integer", is_integer);
                self.field(record, &record_path, "HasBeenSeen", "boolean", Value::is_boolean);
            }
        }
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn is_permadeath_literal(value: &Value) -> bool {
    matches!(value.as_i64(), Some(0) | Some(1))
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|list| list.iter().all(Value::is_string))
}

/// Validate the full document, returning every violation found.
///
/// An empty list means the document conforms.
pub fn validate(root: &Value) -> Vec<Violation> {
    let mut checker = Checker { violations: Vec::new() };

    if !root.is_object() {
        checker.report(String::new(), "object", Some(root));
        return checker.violations;
    }

    checker.field(root, "", "sceneData", "object", Value::is_object);

    let Some(player_data) = checker.field(root, "", "playerData", "object", Value::is_object)
    else {
        return checker.violations;
    };
    let path = "playerData";

    for name in SAVED_DATA_FIELDS {
        checker.check_saved_data(player_data, path, name);
    }
    checker.check_journal(player_data);

    checker.field(player_data, path, "completionPercentage", "integer", is_integer);
    checker.field(player_data, path, "geo", "integer", is_integer);
    checker.field(player_data, path, "ShellShards", "integer", is_integer);
    checker.field(player_data, path, "permadeathMode", "0 or 1", is_permadeath_literal);
    checker.field(player_data, path, "playTime", "number", Value::is_number);
    checker.field(player_data, path, "scenesVisited", "array of strings", is_string_array);

    for name in KEY_FLAGS {
        checker.field(player_data, path, name, "boolean", Value::is_boolean);
    }

    checker.violations
}

/// Validate a parsed document and produce the typed view.
pub fn validate_value(root: &Value) -> Result<SaveFile> {
    let violations = validate(root);
    if !violations.is_empty() {
        return Err(Error::Validation(violations));
    }
    Ok(serde_json::from_value(root.clone())?)
}

/// Parse decrypted text as JSON and validate it.
///
/// A parse failure surfaces as [`Error::Json`], distinct from the schema
/// mismatch carried by [`Error::Validation`].
pub fn parse_and_validate(text: &str) -> Result<SaveFile> {
    let root: Value = serde_json::from_str(text)?;
    validate_value(&root)
}
