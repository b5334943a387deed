//! JSON file helpers shared by the option store and the schedule registry
//!
//! Reads treat a missing file as empty. Writes go to a per-process temp file
//! next to the target and are renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SnapError, SnapResult};

/// Load a JSON data file; a file that does not exist yet yields `T::default()`
pub fn read_json<T, P>(path: P) -> SnapResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("cannot read", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_error("corrupt data file", path, e))
}

/// Replace a JSON data file in one rename
///
/// Readers see either the previous contents or the new ones.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> SnapResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("cannot create directory", dir, e))?;
    }

    let staging = staging_path(path);
    if let Err(e) = write_staged(&staging, data) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        storage_error("cannot replace", path, e)
    })
}

fn write_staged<T: Serialize>(staging: &Path, data: &T) -> SnapResult<()> {
    let file = File::create(staging).map_err(|e| storage_error("cannot create", staging, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("cannot encode", staging, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("cannot write", staging, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("cannot sync", staging, e))
}

/// `options.json` -> `options.json.<pid>.tmp`, in the same directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn storage_error(what: &str, path: &Path, e: impl std::fmt::Display) -> SnapError {
    SnapError::Storage(format!("{} {}: {}", what, path.display(), e))
}
