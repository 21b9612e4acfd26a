use silksave::dat::SaveFormat;

use crate::error::Result;

/// Decrypt and pretty-print a save without requiring it to pass schema
/// validation, so foreign or partial saves can still be inspected.
pub fn run(path: &str, out: Option<&str>) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let text = match SaveFormat::from_path(path) {
        SaveFormat::Dat => silksave::decode_dat(&bytes)?,
        SaveFormat::Json => String::from_utf8(bytes).map_err(silksave::Error::from)?,
    };

    let value: serde_json::Value = serde_json::from_str(&text).map_err(silksave::Error::from)?;
    let pretty = serde_json::to_string_pretty(&value).map_err(silksave::Error::from)?;

    match out {
        Some(out) => std::fs::write(out, pretty)?,
        None => println!("{}", pretty),
    }
    Ok(())
}
