//! Texture selection within a single directory

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use texinvert_core::{Error, ListingOrder, Result, TextureEntry};
use tracing::{debug, trace};

/// Suffix a file name must end with to be treated as a texture
pub const TEXTURE_SUFFIX: &str = ".png";

/// Check whether a file name selects a texture
///
/// Exact, case-sensitive suffix match: `a.png` matches, `b.PNG` does not.
pub fn is_texture_name(name: impl AsRef<OsStr>) -> bool {
    name.as_ref()
        .as_encoded_bytes()
        .ends_with(TEXTURE_SUFFIX.as_bytes())
}

/// List the textures directly inside `dir`
///
/// Subdirectories are never entered. Fails before any file is touched when
/// `dir` does not exist or is not a directory.
pub fn scan_directory(dir: impl AsRef<Path>, order: ListingOrder) -> Result<Vec<TextureEntry>> {
    let dir = dir.as_ref();

    let metadata = match fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::InvalidDirectory(dir.to_path_buf()));
        }
        Err(e) => return Err(Error::from(e).with_context(format!("reading {}", dir.display()))),
    };
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !is_texture_name(&name) {
            trace!(name = ?name, "Skipping non-texture entry");
            continue;
        }

        let path = entry.path();
        // Follows symlinks, so a link to a texture is processed like the texture.
        if !path.is_file() {
            trace!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        entries.push(TextureEntry::new(path));
    }

    if order == ListingOrder::Name {
        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    }

    debug!(dir = %dir.display(), count = entries.len(), ?order, "Scanned directory");
    Ok(entries)
}
