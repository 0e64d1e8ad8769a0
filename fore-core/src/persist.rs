use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Write a serializable value to `path` atomically: the JSON lands in a
/// sibling temp file which is then renamed over the target, so readers never
/// observe a partial write.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("failed to create parent directory")?;
        }
    }

    let json = serde_json::to_string_pretty(value).context("failed to serialize value")?;

    let temp_path = path.with_extension("tmp");
    let mut temp_file =
        std::fs::File::create(&temp_path).context("failed to create temp file")?;
    temp_file
        .write_all(json.as_bytes())
        .context("failed to write temp file")?;
    temp_file.sync_all().context("failed to sync temp file")?;

    std::fs::rename(&temp_path, path).context("failed to move temp file into place")?;
    Ok(())
}

/// Read a JSON value from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).context("failed to open file")?;
    let reader = std::io::BufReader::new(file);
    let value = serde_json::from_reader(reader).context("failed to deserialize file")?;
    Ok(value)
}
