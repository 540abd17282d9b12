//! Profile pieces each window needs cut, grouped by the stock they come from.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalculatorConfig, Geometry};
use crate::error::Result;
use crate::project::WindowProject;
use crate::solver::optimize;
use crate::types::{CuttingPiece, Solution, WindowSpecs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileGroup {
    Frame,
    Sashes,
    Separator,
}

impl ProfileGroup {
    pub const ALL: [ProfileGroup; 3] = [
        ProfileGroup::Frame,
        ProfileGroup::Sashes,
        ProfileGroup::Separator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileGroup::Frame => "frame",
            ProfileGroup::Sashes => "sashes",
            ProfileGroup::Separator => "separator",
        }
    }

    pub fn pieces(
        &self,
        owner: &str,
        specs: &WindowSpecs,
        config: &CalculatorConfig,
    ) -> Vec<CuttingPiece> {
        match self {
            ProfileGroup::Frame => frame_pieces(owner, specs),
            ProfileGroup::Sashes => sash_pieces(owner, specs, config),
            ProfileGroup::Separator => separator_pieces(owner, specs, config),
        }
    }
}

impl std::fmt::Display for ProfileGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn frame_pieces(owner: &str, specs: &WindowSpecs) -> Vec<CuttingPiece> {
    vec![
        CuttingPiece::new(owner, "frame top", specs.length),
        CuttingPiece::new(owner, "frame bottom", specs.length),
        CuttingPiece::new(owner, "frame right", specs.width),
        CuttingPiece::new(owner, "frame left", specs.width),
    ]
}

pub fn sash_pieces(owner: &str, specs: &WindowSpecs, config: &CalculatorConfig) -> Vec<CuttingPiece> {
    let g = Geometry::of(specs, config);
    let mut pieces = Vec::with_capacity(8);
    for sash in 1..=2 {
        pieces.push(CuttingPiece::new(owner, format!("sash {sash} top"), g.sash_length));
        pieces.push(CuttingPiece::new(owner, format!("sash {sash} bottom"), g.sash_length));
        pieces.push(CuttingPiece::new(owner, format!("sash {sash} right"), g.sash_width));
        pieces.push(CuttingPiece::new(owner, format!("sash {sash} left"), g.sash_width));
    }
    pieces
}

pub fn separator_pieces(
    owner: &str,
    specs: &WindowSpecs,
    config: &CalculatorConfig,
) -> Vec<CuttingPiece> {
    let g = Geometry::of(specs, config);
    vec![CuttingPiece::new(owner, "separator", g.separator_length)]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyPlan {
    pub group: ProfileGroup,
    pub solution: Solution,
}

/// Cutting plans for every profile group, pooling the pieces of all windows.
pub fn plan_cutting(
    windows: &[WindowProject],
    kerf: f64,
    config: &CalculatorConfig,
) -> Result<Vec<FamilyPlan>> {
    ProfileGroup::ALL
        .into_iter()
        .map(|group| -> Result<FamilyPlan> {
            let pieces = windows
                .iter()
                .flat_map(|w| group.pieces(&w.name, &w.specs, config))
                .collect();
            let solution = optimize(pieces, config.bar_length, kerf)?;
            Ok(FamilyPlan { group, solution })
        })
        .collect()
}
