// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the lowest-energy vertical seam in an energy grid.
//!
//! The grid is an implicit DAG: every cell (x, y) has incoming edges
//! from (x-1, y-1), (x, y-1) and (x+1, y-1), clamped at the borders.
//! A single top-to-bottom sweep computes, per cell, the cheapest seam
//! ending there together with a back pointer to the parent column;
//! the seam itself is recovered by chasing those pointers up from the
//! cheapest cell in the bottom row.  Each row depends only on the row
//! above it, which is what makes the per-row chunked fill of the
//! `threaded` feature safe.

use crate::error::SeamError;
use crate::grid::{Energy, EnergyGrid};
use std::time::Instant;

/// Per-cell DP state: the total energy of the cheapest seam ending at
/// this cell, and the column in the row above that it came through.
/// The position itself is implied by where the cell sits in the table.
#[derive(Debug, Copy, Clone)]
struct EnergyAndBackPointer<E: Energy> {
    energy: E,
    parent: u32,
}

/// A vertical seam: one column per row, top to bottom, adjacent
/// entries never more than one column apart, plus the summed energy
/// of the cells it passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam<E> {
    /// The x coordinate chosen in each row, `columns[0]` at the top.
    pub columns: Vec<u32>,
    /// The energy of the whole path; always equal to the sum of the
    /// grid values along `columns`.
    pub total_energy: E,
}

impl<E> Seam<E> {
    /// Number of rows the seam spans.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The column where the seam meets the bottom row.
    pub fn end_x(&self) -> u32 {
        self.columns[self.columns.len() - 1]
    }
}

/// Find the cheapest top-to-bottom seam in the grid.
///
/// The grid's preconditions (nonzero dimensions, valid values) are
/// checked before any DP work happens, and the grid itself is never
/// modified; every call is a pure function of its input.
pub fn find_vertical_seam<E: Energy>(grid: &EnergyGrid<E>) -> Result<Seam<E>, SeamError> {
    find_vertical_seam_within(grid, None)
}

/// Like [`find_vertical_seam`], but gives up once `deadline` has
/// passed.  The check happens between row iterations only, so the
/// result is all-or-nothing: either a complete seam or
/// `SeamError::Cancelled` naming the row that was never started.
pub fn find_vertical_seam_within<E: Energy>(
    grid: &EnergyGrid<E>,
    deadline: Option<Instant>,
) -> Result<Seam<E>, SeamError> {
    grid.validate()?;
    let (width, height) = (grid.width() as usize, grid.height() as usize);

    let mut table = vec![
        EnergyAndBackPointer {
            energy: E::zero(),
            parent: 0,
        };
        width * height
    ];

    // Row 0: a seam ending there is just the cell itself.  The parent
    // slot is set to the cell's own column; the backtrace stops at
    // row 0 and never reads it.
    for (x, (cell, &e)) in table.iter_mut().zip(grid.row(0)).enumerate() {
        *cell = EnergyAndBackPointer {
            energy: e,
            parent: x as u32,
        };
    }

    // Every subsequent row reads only the finalized row above it.
    for y in 1..height {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(SeamError::Cancelled { row: y as u32 });
            }
        }
        let (done, rest) = table.split_at_mut(y * width);
        let above = &done[(y - 1) * width..];
        fill_row(grid.row(y as u32), above, &mut rest[..width]);
    }

    // The cheapest cell in the bottom row is where the seam ends;
    // scanning left to right with a strict compare keeps the leftmost
    // column on ties.
    let last = &table[(height - 1) * width..];
    let mut end = 0;
    for x in 1..width {
        if last[x].energy < last[end].energy {
            end = x;
        }
    }
    let total_energy = last[end].energy;

    // Chase the back pointers up through the table, then flip the
    // collected columns so they read top to bottom.
    let mut seam_col = end as u32;
    let columns: Vec<u32> = (0..height)
        .rev()
        .fold(Vec::with_capacity(height), |mut acc, y| {
            acc.push(seam_col);
            seam_col = table[y * width + seam_col as usize].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect();

    Ok(Seam {
        columns,
        total_energy,
    })
}

// Relax a contiguous span of one row.  `span` starts at absolute
// column `base`; `above` is always the entire previous row, since
// border cells of a chunk still reach one column past it.
fn relax_span<E: Energy>(
    energies: &[E],
    above: &[EnergyAndBackPointer<E>],
    span: &mut [EnergyAndBackPointer<E>],
    base: usize,
) {
    let maxwidth = above.len() - 1;
    for (i, cell) in span.iter_mut().enumerate() {
        let x = base + i;
        // Candidate parents {x-1, x, x+1}, clamped to the row.  The
        // scan runs in increasing column order with a strict compare,
        // so a tie always resolves to the smallest column index.
        let lo = cq!(x == 0, 0, x - 1);
        let hi = cq!(x == maxwidth, maxwidth, x + 1);
        let mut parent_x = lo;
        for candidate in lo + 1..=hi {
            if above[candidate].energy < above[parent_x].energy {
                parent_x = candidate;
            }
        }
        *cell = EnergyAndBackPointer {
            energy: energies[x] + above[parent_x].energy,
            parent: parent_x as u32,
        };
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_row<E: Energy>(
    energies: &[E],
    above: &[EnergyAndBackPointer<E>],
    current: &mut [EnergyAndBackPointer<E>],
) {
    relax_span(energies, above, current, 0);
}

// Divvy the row up into one chunk per core and relax the chunks on
// scoped worker threads.  Columns within a row are independent; only
// the row above is read, and it is already final.
#[cfg(feature = "threaded")]
fn fill_row<E: Energy>(
    energies: &[E],
    above: &[EnergyAndBackPointer<E>],
    current: &mut [EnergyAndBackPointer<E>],
) {
    let workers = num_cpus::get().max(1);
    if workers == 1 || current.len() <= workers {
        return relax_span(energies, above, current, 0);
    }
    let chunk = (current.len() + workers - 1) / workers;
    crossbeam::scope(|scope| {
        for (i, span) in current.chunks_mut(chunk).enumerate() {
            scope.spawn(move |_| relax_span(energies, above, span, i * chunk));
        }
    })
    .expect("seam worker panicked");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // A deterministic grid so minimality can be cross-checked against
    // brute force without dragging in an RNG crate.
    fn pseudo_grid(width: u32, height: u32, seed: u64) -> EnergyGrid<u32> {
        let mut state = seed;
        let mut grid = EnergyGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                grid[(x, y)] = ((state >> 33) % 100) as u32;
            }
        }
        grid
    }

    // Every valid unit-step path, tried one by one.
    fn brute_force_minimum(grid: &EnergyGrid<u32>) -> u32 {
        fn walk(grid: &EnergyGrid<u32>, x: u32, y: u32) -> u32 {
            let here = grid[(x, y)];
            if y == grid.height() - 1 {
                return here;
            }
            let lo = cq!(x == 0, 0, x - 1);
            let hi = cq!(x == grid.width() - 1, x, x + 1);
            here + (lo..=hi).map(|nx| walk(grid, nx, y + 1)).min().unwrap()
        }
        (0..grid.width())
            .map(|x| walk(grid, x, 0))
            .min()
            .unwrap()
    }

    fn assert_seam_invariants(grid: &EnergyGrid<u32>, seam: &Seam<u32>) {
        assert_eq!(seam.len(), grid.height() as usize);
        let mut total = 0u32;
        for (y, &x) in seam.columns.iter().enumerate() {
            assert!(x < grid.width());
            if y > 0 {
                let step = i64::from(x) - i64::from(seam.columns[y - 1]);
                assert!(step.abs() <= 1, "seam jumps {} columns at row {}", step, y);
            }
            total += grid[(x, y as u32)];
        }
        assert_eq!(total, seam.total_energy, "total is not the path sum");
    }

    #[test]
    fn single_cell_grid() {
        let grid = EnergyGrid::from_rows(vec![vec![5u32]]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![0]);
        assert_eq!(seam.total_energy, 5);
    }

    #[test]
    fn three_by_three_minimum() {
        let grid =
            EnergyGrid::from_rows(vec![vec![1u32, 2, 3], vec![4, 1, 2], vec![1, 5, 1]]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        // Two routes cost 3; the leftmost-column tie-break at the
        // bottom row picks the one ending at x = 0.
        assert_eq!(seam.total_energy, 3);
        assert_eq!(seam.columns, vec![0, 1, 0]);
        assert_seam_invariants(&grid, &seam);
    }

    #[test]
    fn known_five_by_four_seam() {
        let rows = vec![
            vec![9u32, 9, 0, 9, 9],
            vec![9, 1, 9, 8, 9],
            vec![9, 9, 9, 9, 0],
            vec![9, 9, 9, 0, 9],
        ];
        let grid = EnergyGrid::from_rows(rows).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![2, 3, 4, 3]);
        assert_eq!(seam.total_energy, 8);
        assert_eq!(seam.end_x(), 3);
    }

    #[test]
    fn uniform_grid_energy_is_value_times_height() {
        let grid = EnergyGrid::from_rows(vec![vec![7u32; 4]; 5]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.total_energy, 7 * 5);
        assert_seam_invariants(&grid, &seam);
    }

    #[test]
    fn single_column_is_forced() {
        let grid = EnergyGrid::from_rows(vec![vec![3u32], vec![1], vec![4], vec![1]]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![0, 0, 0, 0]);
        assert_eq!(seam.total_energy, 9);
    }

    #[test]
    fn single_row_picks_smallest_cell() {
        let grid = EnergyGrid::from_rows(vec![vec![4u32, 2, 9]]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![1]);
        assert_eq!(seam.total_energy, 2);

        // All-equal row: the tie resolves to column 0.
        let grid = EnergyGrid::from_rows(vec![vec![2u32, 2]]).unwrap();
        assert_eq!(find_vertical_seam(&grid).unwrap().columns, vec![0]);
    }

    #[test]
    fn ties_resolve_to_the_leftmost_column() {
        let grid = EnergyGrid::from_rows(vec![vec![0u32, 0, 0], vec![0, 0, 0]]).unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![0, 0]);
        assert_eq!(seam.total_energy, 0);
    }

    #[test]
    fn works_on_float_grids() {
        let grid =
            EnergyGrid::from_rows(vec![vec![1.0f64, 2.0], vec![0.5, 3.0], vec![2.0, 0.25]])
                .unwrap();
        let seam = find_vertical_seam(&grid).unwrap();
        assert_eq!(seam.columns, vec![0, 0, 1]);
        assert_eq!(seam.total_energy, 1.75);
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        for seed in 0..8 {
            let grid = pseudo_grid(5, 5, seed);
            let seam = find_vertical_seam(&grid).unwrap();
            assert_seam_invariants(&grid, &seam);
            assert_eq!(
                seam.total_energy,
                brute_force_minimum(&grid),
                "not minimal for seed {}",
                seed
            );
        }
    }

    #[test]
    fn invariants_hold_on_larger_grids() {
        let grid = pseudo_grid(40, 60, 99);
        let seam = find_vertical_seam(&grid).unwrap();
        assert_seam_invariants(&grid, &seam);
    }

    #[test]
    fn zero_dimension_grid_is_rejected_up_front() {
        let grid = EnergyGrid::<u32>::new(0, 3);
        match find_vertical_seam(&grid) {
            Err(SeamError::InvalidGrid { .. }) => (),
            other => panic!("expected InvalidGrid, got {:?}", other),
        }
    }

    #[test]
    fn expired_deadline_cancels_before_the_next_row() {
        let grid = pseudo_grid(8, 8, 1);
        let err = find_vertical_seam_within(&grid, Some(Instant::now())).unwrap_err();
        assert_eq!(err, SeamError::Cancelled { row: 1 });
    }

    #[test]
    fn generous_deadline_completes() {
        let grid = pseudo_grid(8, 8, 1);
        let deadline = Instant::now() + Duration::from_secs(60);
        let seam = find_vertical_seam_within(&grid, Some(deadline)).unwrap();
        assert_seam_invariants(&grid, &seam);
    }
}
