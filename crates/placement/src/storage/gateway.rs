//! Whole-file rewrites for the CSV data files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use super::codec::encode_row;
use super::StoreError;

/// Replace the contents of `path` with `header` followed by every row.
///
/// The file is staged next to the target and renamed over it, so readers see
/// either the old contents or the new ones.
pub fn rewrite<I>(path: &Path, header: &[&str], rows: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut buffer = encode_row(header);
    buffer.push('\n');

    let mut written = 0usize;
    for row in rows {
        buffer.push_str(&encode_row(&row));
        buffer.push('\n');
        written += 1;
    }

    if let Err(source) = replace_file(path, buffer.as_bytes()) {
        error!(path = %path.display(), error = %source, "failed to rewrite data file");
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), rows = written, "data file rewritten");
    Ok(())
}

fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    fs::write(&staging, contents)?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
