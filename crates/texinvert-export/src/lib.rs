//! texinvert export pipeline
//!
//! Inverts the colour channels of every PNG texture directly inside a
//! directory and writes each one back in place:
//! - [`scan`] selects `*.png` files with a single non-recursive listing
//! - [`textures`] splits pixels into channel planes, complements the colour
//!   planes, and re-encodes through a temporary file
//!
//! # Example
//!
//! ```rust,no_run
//! use texinvert_export::{TextureInverter, InvertOptions};
//! use texinvert_core::ListingOrder;
//!
//! let inverter = TextureInverter::with_options(InvertOptions {
//!     order: ListingOrder::Name,
//!     ..Default::default()
//! });
//! let report = inverter.invert_all("Assets/GameAssets/Characters")?;
//! println!("inverted {} textures", report.inverted());
//! # Ok::<(), texinvert_core::Error>(())
//! ```

pub mod scan;
pub mod textures;

use std::path::Path;

use texinvert_core::{BatchReport, Result};

pub use scan::{is_texture_name, scan_directory};
pub use textures::{
    Channel, ChannelPlanes, InvertOptions, NormalizedTexture, TextureInverter,
    complement_plane, invert_color_planes, invert_rgba, write_png_atomic,
};

/// Invert every PNG texture in `dir` with default options
///
/// Directory listing order, abort on the first failing file.
pub fn invert_all(dir: impl AsRef<Path>) -> Result<BatchReport> {
    TextureInverter::new().invert_all(dir)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
