//! Load context
//!
//! The session owns the "current save" state the original tracker kept in
//! module-level mutable variables. A load is atomic: it either fully fails,
//! leaving the previous save untouched, or fully replaces it (last load
//! wins). Resolution only reads the current snapshot, so it is safe to call
//! repeatedly between loads.

use serde_json::Value;

use crate::classify::{classify, Unlock};
use crate::dat::{decode_dat, SaveFormat};
use crate::error::Result;
use crate::flags::FlagIndex;
use crate::item::Item;
use crate::resolve::{resolve, Resolved};
use crate::save::{Mode, SaveFile};
use crate::schema::validate_value;

/// One successfully decoded, validated save plus its derived flag index.
#[derive(Debug, Clone)]
pub struct LoadedSave {
    raw: Value,
    save: SaveFile,
    flags: FlagIndex,
    mode: Mode,
}

impl LoadedSave {
    /// Build from an already-parsed JSON document: validate, type, and
    /// index the flags. The flag index is built from the raw tree, not the
    /// validated subset, since triples live outside the typed schema too.
    pub fn from_json_value(raw: Value) -> Result<LoadedSave> {
        let save = validate_value(&raw)?;
        let flags = FlagIndex::build(&raw);
        let mode = save.player_data.mode();
        Ok(LoadedSave { raw, save, flags, mode })
    }

    pub fn from_text(text: &str) -> Result<LoadedSave> {
        Self::from_json_value(serde_json::from_str(text)?)
    }

    /// Decode raw file bytes in the given format.
    pub fn from_bytes(bytes: &[u8], format: SaveFormat) -> Result<LoadedSave> {
        match format {
            SaveFormat::Dat => Self::from_text(&decode_dat(bytes)?),
            SaveFormat::Json => Self::from_text(&String::from_utf8(bytes.to_vec())?),
        }
    }

    /// Read a save from disk, picking the format from the file extension.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<LoadedSave> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, SaveFormat::from_path(path))
    }

    pub fn save(&self) -> &SaveFile {
        &self.save
    }

    /// The full pre-validation document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn flags(&self) -> &FlagIndex {
        &self.flags
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Dynamic string-keyed read of a `playerData` field. The single place
    /// untyped access happens; absent keys read as `None`, never a panic.
    pub fn player_field(&self, key: &str) -> Option<&Value> {
        self.raw.get("playerData").and_then(|pd| pd.get(key))
    }

    pub fn resolve(&self, item: &Item) -> Resolved {
        resolve(self, item)
    }

    pub fn classify(&self, item: &Item) -> Unlock {
        classify(item, &self.resolve(item))
    }
}

/// Caller-owned current-save context.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<LoadedSave>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Decode and install a save. On error the previous save stays current.
    pub fn load_bytes(&mut self, bytes: &[u8], format: SaveFormat) -> Result<()> {
        let loaded = LoadedSave::from_bytes(bytes, format)?;
        self.current = Some(loaded);
        Ok(())
    }

    pub fn load_file<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<()> {
        let loaded = LoadedSave::from_file(path)?;
        self.current = Some(loaded);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn loaded(&self) -> Option<&LoadedSave> {
        self.current.as_ref()
    }

    pub fn save(&self) -> Option<&SaveFile> {
        self.current.as_ref().map(LoadedSave::save)
    }

    pub fn flags(&self) -> Option<&FlagIndex> {
        self.current.as_ref().map(LoadedSave::flags)
    }

    pub fn mode(&self) -> Option<Mode> {
        self.current.as_ref().map(LoadedSave::mode)
    }

    /// Resolve an item, or [`Resolved::Missing`] when nothing is loaded.
    pub fn resolve(&self, item: &Item) -> Resolved {
        match &self.current {
            Some(loaded) => loaded.resolve(item),
            None => Resolved::Missing,
        }
    }
}
