pub mod convert;
pub mod inspect;
pub mod map;

use std::error::Error;
use std::fs;
use std::path::Path;

use slha_core::serde::to_canonical_json_pretty;

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_canonical_json_pretty(value)?)?;
    Ok(())
}
