// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Discover the lowest-cumulative-energy vertical seam through a grid
//! of per-pixel energies, the dynamic-programming heart of the seam
//! carving algorithm.  This crate finds a single top-to-bottom seam;
//! removing it (or carving repeatedly) is the caller's business.

#[macro_use]
mod ternary;

pub mod energy;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod seamfinder;

pub use error::SeamError;
pub use grid::{Energy, EnergyGrid};
pub use seamfinder::{find_vertical_seam, find_vertical_seam_within, Seam};
