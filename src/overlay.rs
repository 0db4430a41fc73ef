// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render results for human eyes: paint a discovered seam onto a copy
//! of the source image, or dump the raw energy grid as a graymap.
//! Nothing here feeds back into the seam search.

use crate::grid::EnergyGrid;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive, Rgba};
use itertools::iproduct;
use num_traits::{Bounded, NumCast};

/// Copy the image and paint the seam's pixel in every row full red.
pub fn seam_overlay<I, P, S>(image: &I, seam: &[u32]) -> ImageBuffer<Rgba<S>, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut out = ImageBuffer::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        out.put_pixel(x, y, image.get_pixel(x, y).to_rgba());
    }

    let nil: S = NumCast::from(0).unwrap();
    let channels = [S::max_value(), nil, nil, S::max_value()];
    let red = *Rgba::from_slice(&channels);
    for (y, &x) in seam.iter().enumerate() {
        out.put_pixel(x, y as u32, red);
    }
    out
}

/// Render an energy grid as an 8-bit graymap, scaled so the hottest
/// cell comes out white.  Handy for eyeballing what the seam finder
/// is actually walking through.
pub fn energy_to_image(energy: &EnergyGrid<u32>) -> GrayImage {
    let (width, height) = (energy.width(), energy.height());
    let factor = iproduct!(0..height, 0..width)
        .map(|(y, x)| energy[(x, y)])
        .max()
        .unwrap_or(0)
        .max(1);

    let mut out: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let c = (<u64 as From<u32>>::from(energy[(x, y)]) * 255
            / <u64 as From<u32>>::from(factor)) as u8;
        out.put_pixel(x, y, *Luma::from_slice(&[c]));
    }
    out
}
