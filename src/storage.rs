use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

const INDENT: &[u8] = b"    ";

/// Reads a JSON backing file, falling back to `T::default()` when the file
/// is missing, unreadable or not valid JSON for `T`. The fallback is logged
/// and never reported to the caller.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!(path = %path.display(), "backing file missing, starting empty");
        return T::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read backing file, starting empty");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(path = %path.display(), "loaded backing file");
            value
        }
        Err(e) => {
            error!(
                path = %path.display(),
                error = %e,
                "backing file is not valid JSON, starting empty; the next save replaces it"
            );
            T::default()
        }
    }
}

/// Overwrites `path` with `value` as 4-space indented JSON.
///
/// Plain truncate-and-write: a crash mid-write can leave a short file,
/// which the next load treats as empty.
pub fn save_pretty<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, buf)?;
    debug!(path = %path.display(), "saved backing file");
    Ok(())
}
