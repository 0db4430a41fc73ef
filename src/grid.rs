use crate::error::SeamError;
use num_traits::Zero;
use std::ops::{Index, IndexMut};

/// The scalar contract for a grid cell.  Anything orderable with a
/// zero and a notion of validity works: the image pipeline feeds us
/// `u32` squared-difference energies, callers with their own energy
/// functions may prefer floats.  `Send + Sync` so the threaded row
/// fill can hand slices of a row to worker threads.
pub trait Energy: Copy + PartialOrd + Zero + Send + Sync {
    /// True when the value is a legal energy: non-negative, and for
    /// floating-point types also finite.
    fn is_valid(self) -> bool {
        self >= Self::zero()
    }
}

impl Energy for u32 {}
impl Energy for u64 {}

impl Energy for f32 {
    fn is_valid(self) -> bool {
        self.is_finite() && self >= 0.0
    }
}

impl Energy for f64 {
    fn is_valid(self) -> bool {
        self.is_finite() && self >= 0.0
    }
}

/// A rectangular field of per-pixel energies, row 0 at the top.  The
/// storage is a flat row-major vector addressed through exactly one
/// index function; the same layout image.rs uses.
#[derive(Debug, Clone)]
pub struct EnergyGrid<E: Energy> {
    width: u32,
    height: u32,
    energy: Vec<E>,
}

impl<E: Energy> EnergyGrid<E> {
    /// A zero-filled scratch grid, for producers that fill cells in
    /// place (see `energy::calculate_energy`).
    pub fn new(width: u32, height: u32) -> Self {
        EnergyGrid {
            width,
            height,
            energy: vec![E::zero(); width as usize * height as usize],
        }
    }

    /// Build a grid from explicit rows, enforcing every precondition
    /// up front: at least one row, at least one column, every row the
    /// same length, every value non-negative and finite.
    pub fn from_rows(rows: Vec<Vec<E>>) -> Result<Self, SeamError> {
        let height = rows.len();
        if height == 0 {
            return Err(SeamError::invalid("grid has zero height"));
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(SeamError::invalid("grid has zero width"));
        }
        let mut energy = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(SeamError::invalid(format!(
                    "row {} has {} entries, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            energy.extend(row);
        }
        let grid = EnergyGrid {
            width: width as u32,
            height: height as u32,
            energy,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check the invariants a seam search relies on.  Rectangularity
    /// is structural here, so this covers the dimensions and the
    /// values; it runs before any DP pass so a bad grid can never be
    /// discovered halfway through.
    pub fn validate(&self) -> Result<(), SeamError> {
        if self.width == 0 || self.height == 0 {
            return Err(SeamError::invalid("grid has zero width or height"));
        }
        for (i, e) in self.energy.iter().enumerate() {
            if !e.is_valid() {
                let (x, y) = (i % self.width as usize, i / self.width as usize);
                return Err(SeamError::invalid(format!(
                    "energy at ({}, {}) is negative or not finite",
                    x, y
                )));
            }
        }
        Ok(())
    }

    /// One row of the grid as a slice.  The recurrence consumes rows
    /// whole, and the threaded fill hands out disjoint chunks of them.
    pub fn row(&self, y: u32) -> &[E] {
        let start = y as usize * self.width as usize;
        &self.energy[start..start + self.width as usize]
    }

    // Keep the index math in a single place and never, ever touch it
    // anywhere else.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl<E: Energy> Index<(u32, u32)> for EnergyGrid<E> {
    type Output = E;

    fn index(&self, (x, y): (u32, u32)) -> &E {
        let index = self.get_index(x, y);
        &self.energy[index]
    }
}

impl<E: Energy> IndexMut<(u32, u32)> for EnergyGrid<E> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut E {
        let index = self.get_index(x, y);
        &mut self.energy[index]
    }
}
