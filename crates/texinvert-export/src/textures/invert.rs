//! Colour channel complement
//!
//! The complement of a sample is `max - value`, where `max` is the largest
//! value the sample type represents (255 for 8-bit, 65535 for 16-bit).
//! Applying it twice gives back the original sample.

use image::{ImageBuffer, Pixel, Primitive, Rgba};

use super::planes::{Channel, ChannelPlanes};

/// Complement a single sample
#[inline]
pub fn complement<P: Primitive>(value: P) -> P {
    P::DEFAULT_MAX_VALUE - value
}

/// Complement every sample of a plane in place
pub fn complement_plane<P: Primitive>(plane: &mut [P]) {
    plane.iter_mut().for_each(|v| *v = complement(*v));
}

/// Complement the red, green and blue planes; alpha is left as is
pub fn invert_color_planes<P>(planes: &mut ChannelPlanes<P>)
where
    P: Primitive,
    Rgba<P>: Pixel<Subpixel = P>,
{
    for channel in Channel::COLOR {
        complement_plane(planes.plane_mut(channel));
    }
}

/// Invert the colour channels of an RGBA buffer
///
/// Splits into planes, complements R, G and B, and merges back into a
/// buffer with the same dimensions and pixel order.
pub fn invert_rgba<P>(image: &ImageBuffer<Rgba<P>, Vec<P>>) -> ImageBuffer<Rgba<P>, Vec<P>>
where
    P: Primitive,
    Rgba<P>: Pixel<Subpixel = P>,
{
    let mut planes = ChannelPlanes::split(image);
    invert_color_planes(&mut planes);
    planes.merge()
}
