// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turn an image into an energy grid.
//!
//! The energy of a pixel is the squared luma difference of its
//! left/right neighbor pair plus that of its up/down pair; pixels on
//! the border substitute themselves for the missing neighbor.  This
//! is the plain gradient-magnitude energy from Avidan & Shamir
//! (2007), with none of the fancier variants.

use crate::grid::EnergyGrid;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

// (Pixel, Pixel) -> Energy.  The luma values go through i32 so the
// difference can't underflow before it is squared.
#[inline]
fn energy_of_pair<P, S>(p1: &P, p2: &P) -> u32
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    #[inline]
    fn lumachannel<S, P>(p: &P) -> i32
    where
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        let c = p.to_luma().channels().to_owned();
        NumCast::from(c[0]).unwrap()
    }

    let css = lumachannel(p1) - lumachannel(p2);
    (css * css) as u32
}

/// Compute the energy of every pixel in an image.  Generic over the
/// image type; always uses the greyscale calculator, converting color
/// pixels through their luma channel.
pub fn calculate_energy<I, P, S>(image: &I) -> EnergyGrid<u32>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let (mw, mh) = (width - 1, height - 1);

    let mut emap = EnergyGrid::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let current_pixel = image.get_pixel(x, y);
        let (leftpixel, rightpixel, uppixel, downpixel) = (
            cq!(x == 0, current_pixel, image.get_pixel(x - 1, y)),
            cq!(x >= mw, current_pixel, image.get_pixel(x + 1, y)),
            cq!(y == 0, current_pixel, image.get_pixel(x, y - 1)),
            cq!(y >= mh, current_pixel, image.get_pixel(x, y + 1)),
        );
        emap[(x, y)] =
            energy_of_pair(&leftpixel, &rightpixel) + energy_of_pair(&uppixel, &downpixel);
    }
    emap
}
