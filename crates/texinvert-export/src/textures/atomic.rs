//! Atomic PNG write-back
//!
//! The encoded texture goes to a temporary file in the destination
//! directory and is renamed over the target once fully synced. The
//! temporary file is removed on every failure path, so the target holds
//! either its old bytes or the complete new ones.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tempfile::{Builder, NamedTempFile};
use texinvert_core::{Error, Result};
use tracing::debug;

use super::NormalizedTexture;

const TEMP_PREFIX: &str = ".texinvert-";
const TEMP_SUFFIX: &str = ".tmp";

/// Encode `texture` as PNG and atomically replace `path` with it
///
/// A symlinked `path` is resolved first, so the link stays in place and
/// its target receives the new bytes. Returns the number of bytes written.
pub fn write_png_atomic(path: impl AsRef<Path>, texture: &NormalizedTexture) -> Result<u64> {
    let path = path.as_ref();
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| Error::write(path, format!("creating temporary file: {e}")))?;
    debug!(temp = %temp.path().display(), target = %target.display(), "Encoding to temporary file");

    let temp = encode_into(temp, texture).map_err(|e| Error::write(path, e))?;
    let bytes_written = temp
        .as_file()
        .metadata()
        .map_err(|e| Error::write(path, e))?
        .len();

    // Keep the original file's mode instead of the temp file's 0600.
    if let Ok(metadata) = fs::metadata(&target) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::write(path, format!("copying permissions: {e}")))?;
    }

    temp.persist(&target)
        .map_err(|e| Error::write(path, format!("replacing file: {}", e.error)))?;

    Ok(bytes_written)
}

/// The file the bytes should land in: `path` with symlinks resolved, or
/// `path` itself when it does not exist yet.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Encode, flush and sync. Dropping the returned error drops the temp file.
fn encode_into(temp: NamedTempFile, texture: &NormalizedTexture) -> std::result::Result<NamedTempFile, String> {
    let mut writer = BufWriter::new(temp);
    match texture {
        NormalizedTexture::Rgba8(img) => img.write_to(&mut writer, ImageFormat::Png),
        NormalizedTexture::Rgba16(img) => img.write_to(&mut writer, ImageFormat::Png),
    }
    .map_err(|e| format!("encoding PNG: {e}"))?;
    writer.flush().map_err(|e| format!("flushing: {e}"))?;

    let temp = writer
        .into_inner()
        .map_err(|e| format!("flushing: {}", e.error()))?;
    temp.as_file().sync_all().map_err(|e| format!("syncing: {e}"))?;
    Ok(temp)
}
