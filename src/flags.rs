//! Scene flag indexing
//!
//! The save scatters `{ SceneName, ID, Value }` triples all over its tree
//! (persistent bools, persistent ints, geo rocks, ...). This module walks the
//! full raw document once per load and flattens every triple into a
//! scene → id → bool index, so scene-scoped lookups never have to re-walk
//! the tree. Some flags are stored as booleans and some as integers; both
//! coerce by truthiness.

use std::collections::HashMap;

use serde_json::Value;

/// Lower-case a string, collapse runs of whitespace to a single space, and
/// trim. Used for name matching in `savedData` lists.
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trim a string, collapse runs of whitespace to a single underscore, and
/// replace every character that is not `[A-Za-z0-9_.]` with an underscore.
/// Used for scene names and flag ids. Idempotent.
pub fn normalize_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push('_');
            pending_space = false;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out
}

/// Flat two-level lookup of scene-scoped flags, rebuilt on every load.
#[derive(Debug, Clone, Default)]
pub struct FlagIndex {
    scenes: HashMap<String, HashMap<String, bool>>,
}

impl FlagIndex {
    /// Walk the full raw document and index every `{ SceneName, ID, Value }`
    /// triple found anywhere in it. Duplicate `(scene, id)` pairs are not
    /// expected, but the later-encountered one wins.
    pub fn build(root: &Value) -> FlagIndex {
        let mut index = FlagIndex::default();
        index.walk(root);
        index
    }

    fn walk(&mut self, node: &Value) {
        match node {
            Value::Array(elements) => {
                for element in elements {
                    self.walk(element);
                }
            }
            Value::Object(map) => {
                if let Some((scene, id, value)) = flag_triple(map) {
                    self.mark(scene, id, value);
                }
                // A matched node is still recursed into; no pruning.
                for value in map.values() {
                    self.walk(value);
                }
            }
            _ => {}
        }
    }

    fn mark(&mut self, scene: &str, id: &str, value: bool) {
        self.scenes
            .entry(normalize_key(scene))
            .or_default()
            .insert(normalize_key(id), value);
    }

    /// Look up a flag; inputs are normalized before the lookup.
    pub fn get(&self, scene: &str, id: &str) -> Option<bool> {
        self.scenes
            .get(&normalize_key(scene))
            .and_then(|flags| flags.get(&normalize_key(id)))
            .copied()
    }

    /// True iff the flag is present and set.
    pub fn is_set(&self, scene: &str, id: &str) -> bool {
        self.get(scene, id).unwrap_or(false)
    }

    /// All indexed flags of one scene, if any.
    pub fn scene(&self, scene: &str) -> Option<&HashMap<String, bool>> {
        self.scenes.get(&normalize_key(scene))
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.values().map(HashMap::len).sum()
    }
}

/// Extract the `(SceneName, ID, Value)` triple from an object node, if all
/// three fields are present with usable types. The id field is spelled
/// `ID`, `Id`, or `id` depending on where the triple lives; same for the
/// value field.
fn flag_triple(map: &serde_json::Map<String, Value>) -> Option<(&str, &str, bool)> {
    let scene = map.get("SceneName")?.as_str()?;
    let id = ["ID", "Id", "id"].iter().find_map(|k| map.get(*k))?.as_str()?;
    let value = ["Value", "value"].iter().find_map(|k| map.get(*k))?;
    let value = match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => return None,
    };
    Some((scene, id, value))
}
