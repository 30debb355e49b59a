//! Channel planes
//!
//! An RGBA buffer split into four single-channel grids of equal length,
//! stored in pixel order (row-major, top-left first).

use image::{ImageBuffer, Pixel, Primitive, Rgba};

/// One of the four channels of an RGBA texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// The colour channels, i.e. everything but alpha
    pub const COLOR: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel within an RGBA pixel
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// Four independent planes split from an RGBA buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlanes<P> {
    width: u32,
    height: u32,
    planes: [Vec<P>; 4],
}

impl<P> ChannelPlanes<P>
where
    P: Primitive,
    Rgba<P>: Pixel<Subpixel = P>,
{
    /// Split `image` into its R, G, B and A planes
    pub fn split(image: &ImageBuffer<Rgba<P>, Vec<P>>) -> Self {
        let len = image.width() as usize * image.height() as usize;
        let mut planes: [Vec<P>; 4] = std::array::from_fn(|_| Vec::with_capacity(len));

        for pixel in image.pixels() {
            for (plane, &value) in planes.iter_mut().zip(pixel.0.iter()) {
                plane.push(value);
            }
        }

        Self {
            width: image.width(),
            height: image.height(),
            planes,
        }
    }

    /// Recombine the planes into an RGBA buffer of the original size
    pub fn merge(&self) -> ImageBuffer<Rgba<P>, Vec<P>> {
        let [r, g, b, a] = &self.planes;
        let width = self.width as usize;

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let i = y as usize * width + x as usize;
            Rgba([r[i], g[i], b[i], a[i]])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples of one channel
    pub fn plane(&self, channel: Channel) -> &[P] {
        &self.planes[channel.index()]
    }

    /// Mutable samples of one channel
    ///
    /// Returned as a slice so the plane length, and therefore the
    /// dimensions, cannot change.
    pub fn plane_mut(&mut self, channel: Channel) -> &mut [P] {
        &mut self.planes[channel.index()]
    }
}
