//! One-dimensional cutting stock: assigns profile pieces to stock bars.
//!
//! The heuristic is first-fit over a length-descending order. It is not
//! optimal, but the bar count, bar order and cut positions it produces are
//! fully determined by the input, which downstream plans rely on.

use tracing::debug;

use crate::bar::OpenBar;
use crate::error::{Error, Result};
use crate::types::{CuttingPiece, Solution};

pub struct Solver {
    bar_length: f64,
    kerf: f64,
    pieces: Vec<CuttingPiece>,
}

impl Solver {
    pub fn new(bar_length: f64, kerf: f64, pieces: Vec<CuttingPiece>) -> Self {
        Self {
            bar_length,
            kerf,
            pieces,
        }
    }

    pub fn solve(self) -> Result<Solution> {
        self.validate()?;

        let mut remaining = self.pieces;
        // Stable: equal lengths keep their input order.
        remaining.sort_by(|a, b| b.length.total_cmp(&a.length));

        let mut plans = Vec::new();
        while !remaining.is_empty() {
            let mut bar = OpenBar::new(self.bar_length, self.kerf);

            let mut i = 0;
            while i < remaining.len() {
                if bar.fits(&remaining[i]) {
                    let piece = remaining.remove(i);
                    bar.place(piece);
                } else {
                    i += 1;
                }
            }

            let plan = bar.close(plans.len() + 1);
            debug!(
                bar = plan.bar_index,
                cuts = plan.cuts.len(),
                waste = plan.waste,
                "bar closed"
            );
            plans.push(plan);
        }

        Ok(Solution {
            plans,
            bar_length: self.bar_length,
            kerf: self.kerf,
        })
    }

    /// Every piece must fit on an empty bar, or the loop above never ends.
    fn validate(&self) -> Result<()> {
        if !(self.bar_length.is_finite() && self.bar_length > 0.0)
            || !(self.kerf.is_finite() && self.kerf >= 0.0)
        {
            return Err(Error::InvalidStock {
                bar_length: self.bar_length,
                kerf: self.kerf,
            });
        }

        for p in &self.pieces {
            if !(p.length.is_finite() && p.length > 0.0) {
                return Err(Error::InvalidPiece {
                    owner: p.owner.clone(),
                    label: p.label.clone(),
                    length: p.length,
                });
            }
            if p.length > self.bar_length {
                return Err(Error::OversizedPiece {
                    owner: p.owner.clone(),
                    label: p.label.clone(),
                    length: p.length,
                    bar_length: self.bar_length,
                });
            }
        }
        Ok(())
    }
}

pub fn optimize(pieces: Vec<CuttingPiece>, bar_length: f64, kerf: f64) -> Result<Solution> {
    Solver::new(bar_length, kerf, pieces).solve()
}
