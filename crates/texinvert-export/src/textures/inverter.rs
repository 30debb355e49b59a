//! Batch texture inverter
//!
//! Each selected file goes through one load, transform, store cycle before
//! the next file starts. Nothing is shared between files.

use std::fs;
use std::path::Path;
use std::time::Instant;

use texinvert_core::{
    log_texture_complete, log_texture_error, log_texture_start, BatchReport, Error, FailurePolicy,
    FileOutcome, ListingOrder, Result, ResultExt,
};
use tracing::{debug, info, warn};

use super::{atomic::write_png_atomic, decode_texture, NormalizedTexture};
use crate::scan::scan_directory;

/// Batch options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvertOptions {
    /// Order in which directory entries are processed
    pub order: ListingOrder,

    /// Stop at the first failure or keep going
    pub policy: FailurePolicy,

    /// Report the selected files without reading or writing them
    pub dry_run: bool,
}

/// Texture inverter
#[derive(Debug, Clone, Default)]
pub struct TextureInverter {
    options: InvertOptions,
}

impl TextureInverter {
    /// Create new inverter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create inverter with custom options
    pub fn with_options(options: InvertOptions) -> Self {
        Self { options }
    }

    /// Invert the colour channels of one texture and write it back in place
    pub fn invert_file(&self, path: impl AsRef<Path>) -> Result<FileOutcome> {
        let path = path.as_ref();
        let start = Instant::now();

        let bytes = fs::read(path)
            .map_err(Error::from)
            .with_context(|| format!("reading {}", path.display()))?;
        let decoded = decode_texture(path, &bytes)?;
        drop(bytes);

        let texture = NormalizedTexture::from_dynamic(path, decoded)?;
        debug!(
            path = %path.display(),
            width = texture.width(),
            height = texture.height(),
            bit_depth = texture.bit_depth(),
            "Decoded texture"
        );

        let inverted = texture.invert();
        drop(texture);
        let bytes_written = write_png_atomic(path, &inverted)?;

        log_texture_complete!(path, inverted.width(), inverted.height(), start.elapsed());

        Ok(FileOutcome::inverted(
            path,
            inverted.width(),
            inverted.height(),
            inverted.bit_depth(),
            bytes_written,
        ))
    }

    /// Invert every texture directly inside `dir`
    ///
    /// With [`FailurePolicy::Abort`] the first failure is returned and files
    /// processed before it stay inverted. With [`FailurePolicy::Continue`]
    /// failures are recorded in the report; use
    /// [`BatchReport::into_result`] to turn them into an error.
    pub fn invert_all(&self, dir: impl AsRef<Path>) -> Result<BatchReport> {
        let dir = dir.as_ref();
        let entries = scan_directory(dir, self.options.order)?;
        let mut report = BatchReport::new(dir);

        if entries.is_empty() {
            info!(dir = %dir.display(), "No textures found");
            return Ok(report);
        }
        info!(dir = %dir.display(), count = entries.len(), "Found textures");

        for entry in &entries {
            log_texture_start!(entry.path());

            if self.options.dry_run {
                report.push(FileOutcome::skipped(entry.path()));
                continue;
            }

            match self.invert_file(entry.path()) {
                Ok(outcome) => report.push(outcome),
                Err(e) if self.options.policy == FailurePolicy::Continue => {
                    warn!(path = %entry.path().display(), error = %e, "Texture failed, continuing");
                    report.push(FileOutcome::failed(entry.path(), &e));
                }
                Err(e) => {
                    log_texture_error!(entry.path(), e);
                    return Err(e);
                }
            }
        }

        Ok(report)
    }
}
