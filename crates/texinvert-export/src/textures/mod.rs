//! Texture decoding, channel inversion and write-back
//!
//! Textures are decoded from their bytes, normalized to four channels,
//! split into channel planes, and re-encoded as PNG over the original file.

mod atomic;
mod invert;
mod inverter;
mod planes;

pub use atomic::write_png_atomic;
pub use invert::{complement, complement_plane, invert_color_planes, invert_rgba};
pub use inverter::{InvertOptions, TextureInverter};
pub use planes::{Channel, ChannelPlanes};

use std::io::Cursor;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageBuffer, ImageReader, Rgba, RgbaImage};
use texinvert_core::{Error, Result};

/// 16-bit RGBA buffer
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Decoded texture in its four-channel working form
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedTexture {
    /// 8 bits per channel (max value 255)
    Rgba8(RgbaImage),
    /// 16 bits per channel (max value 65535)
    Rgba16(Rgba16Image),
}

impl NormalizedTexture {
    /// Normalize a decoded image to RGBA
    ///
    /// 16-bit sources keep their precision; everything else becomes 8-bit.
    /// Sources without alpha gain a fully opaque alpha channel.
    pub fn from_dynamic(path: &Path, image: DynamicImage) -> Result<Self> {
        match image.color() {
            ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => {
                Ok(Self::Rgba16(image.into_rgba16()))
            }
            ColorType::Rgb32F | ColorType::Rgba32F => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                format: format!("{:?}", image.color()),
            }),
            _ => Ok(Self::Rgba8(image.into_rgba8())),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Rgba8(img) => img.width(),
            Self::Rgba16(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Rgba8(img) => img.height(),
            Self::Rgba16(img) => img.height(),
        }
    }

    /// Bits per channel
    pub fn bit_depth(&self) -> u8 {
        match self {
            Self::Rgba8(_) => 8,
            Self::Rgba16(_) => 16,
        }
    }

    /// Complement the colour channels, keeping alpha
    pub fn invert(&self) -> Self {
        match self {
            Self::Rgba8(img) => Self::Rgba8(invert_rgba(img)),
            Self::Rgba16(img) => Self::Rgba16(invert_rgba(img)),
        }
    }
}

/// Decode texture bytes, guessing the container from its signature
///
/// Empty or corrupt data and non-PNG containers all fail with
/// [`Error::Decode`].
pub fn decode_texture(path: &Path, bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::decode(path, "file is empty"));
    }

    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::decode(path, e))?
        .decode()
        .map_err(|e| Error::decode(path, e))
}
