//! Batch runs: mirror a source folder, then rewrite every profile file in the copy.
//!
//! One named subdirectory of the destination (terrain models, typically `DTM`)
//! is never deleted, overwritten or copied over.

use crate::error::{Error, Result};
use crate::mutation::MutationTable;
use crate::rewrite::{rewrite_file, FileReport, TransformOptions};
use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Create `dest` if needed and remove everything in it except `preserve`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an entry cannot be removed.
pub fn prepare_destination(dest: &Path, preserve: &str) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    for entry in fs::read_dir(dest).map_err(|e| Error::io(dest, e))? {
        let entry = entry.map_err(|e| Error::io(dest, e))?;
        if entry.file_name() == preserve {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        }
        debug!(path = %path.display(), "removed");
    }

    Ok(())
}

/// Recursively copy a directory's contents into `dst`.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type().map_err(|e| Error::io(&from, e))?.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }

    Ok(())
}

/// Mirror `src` into `dest`, leaving the `preserve` subdirectory of `dest` untouched.
///
/// The destination is cleared first (apart from `preserve`), then every entry of
/// `src` except one named `preserve` is copied across.
///
/// # Errors
///
/// Returns an error if any filesystem operation fails.
pub fn mirror_folder(src: &Path, dest: &Path, preserve: &str) -> Result<()> {
    prepare_destination(dest, preserve)?;

    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        if entry.file_name() == preserve {
            continue;
        }
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type().map_err(|e| Error::io(&from, e))?.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }

    info!(src = %src.display(), dest = %dest.display(), "mirrored folder");
    Ok(())
}

/// Whether `path` ends in one of `extensions` (compared case-insensitively).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Collect the files to process from a mix of file and directory paths.
///
/// Files are kept when their extension matches. Directories contribute their
/// direct children with a matching extension; they are not descended into.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be listed.
pub fn find_documents(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        if meta.is_dir() {
            for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
                let child = entry.map_err(|e| Error::io(path, e))?.path();
                if child.is_file() && has_extension(&child, extensions) {
                    documents.push(child);
                }
            }
        } else if has_extension(path, extensions) {
            documents.push(path.clone());
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

/// Mirror `src` into `dest` and rewrite every matching file directly under `dest`.
///
/// # Errors
///
/// Returns an error if mirroring fails or any file cannot be rewritten.
pub fn run_batch(
    src: &Path,
    dest: &Path,
    preserve: &str,
    extensions: &[String],
    table: &MutationTable,
    options: TransformOptions,
    encoding: &'static Encoding,
) -> Result<Vec<FileReport>> {
    mirror_folder(src, dest, preserve)?;

    let documents = find_documents(&[dest.to_path_buf()], extensions)?;
    let reports = documents
        .iter()
        .map(|path| rewrite_file(path, table, options, encoding))
        .collect::<Result<Vec<_>>>()?;

    info!(files = reports.len(), "all profile files have been processed");
    Ok(reports)
}

#[cfg(test)]
#[path = "tests/batch.rs"]
mod tests;
