use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    WoodFinish,
    Gray,
}

impl Color {
    pub fn label(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::WoodFinish => "wood finish",
            Color::Gray => "gray",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Supplier series of a profile. Frames and sashes draw from the same set,
/// though each family only stocks some of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    Eurosist,
    Inoforme,
    EcoLoranzo,
    Pral,
    Inter,
    Losanzo,
    Gris,
    Technoline,
}

impl Series {
    pub fn label(&self) -> &'static str {
        match self {
            Series::Eurosist => "eurosist",
            Series::Inoforme => "inoforme",
            Series::EcoLoranzo => "eco loranzo",
            Series::Pral => "pral",
            Series::Inter => "inter",
            Series::Losanzo => "losanzo",
            Series::Gris => "gris",
            Series::Technoline => "technoline",
        }
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SashFamily {
    #[serde(rename = "6007")]
    P6007,
    #[serde(rename = "40404")]
    P40404,
}

impl SashFamily {
    pub fn code(&self) -> &'static str {
        match self {
            SashFamily::P6007 => "6007",
            SashFamily::P40404 => "40404",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassType {
    #[default]
    Simple,
}

/// Geometry and material selection of one two-sash window.
/// Dimensions are in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpecs {
    pub length: f64,
    pub width: f64,
    pub color: Color,
    pub frame_type: Series,
    pub sash_type: SashFamily,
    pub sash_subtype: Series,
    #[serde(default)]
    pub glass_type: GlassType,
}

impl Default for WindowSpecs {
    fn default() -> Self {
        Self {
            length: 100.0,
            width: 100.0,
            color: Color::White,
            frame_type: Series::Eurosist,
            sash_type: SashFamily::P6007,
            sash_subtype: Series::Inoforme,
            glass_type: GlassType::Simple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPiece {
    pub owner: String,
    pub label: String,
    pub length: f64,
}

impl CuttingPiece {
    pub fn new(owner: impl Into<String>, label: impl Into<String>, length: f64) -> Self {
        Self {
            owner: owner.into(),
            label: label.into(),
            length,
        }
    }
}

impl std::fmt::Display for CuttingPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.owner, self.label, self.length)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub piece: CuttingPiece,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlan {
    /// 1-based, in the order bars were opened.
    pub bar_index: usize,
    pub cuts: Vec<Cut>,
    pub used_length: f64,
    pub waste: f64,
    /// Percentage of the bar consumed by pieces and kerf.
    pub efficiency: f64,
}

impl CuttingPlan {
    pub fn rating(&self) -> EfficiencyRating {
        EfficiencyRating::from_percent(self.efficiency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub plans: Vec<CuttingPlan>,
    pub bar_length: f64,
    pub kerf: f64,
}

impl Solution {
    pub fn bar_count(&self) -> usize {
        self.plans.len()
    }

    pub fn piece_count(&self) -> usize {
        self.plans.iter().map(|p| p.cuts.len()).sum()
    }

    pub fn total_waste(&self) -> f64 {
        self.plans.iter().map(|p| p.waste).sum()
    }

    pub fn average_efficiency(&self) -> f64 {
        if self.plans.is_empty() {
            return 0.0;
        }
        self.plans.iter().map(|p| p.efficiency).sum::<f64>() / self.plans.len() as f64
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock = self.bar_length * self.plans.len() as f64;
        if total_stock <= 0.0 {
            return 0.0;
        }
        self.total_waste() / total_stock * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyRating {
    Good,
    Fair,
    Poor,
}

impl EfficiencyRating {
    pub fn from_percent(efficiency: f64) -> Self {
        if efficiency >= 90.0 {
            EfficiencyRating::Good
        } else if efficiency >= 75.0 {
            EfficiencyRating::Fair
        } else {
            EfficiencyRating::Poor
        }
    }
}

impl std::fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EfficiencyRating::Good => "good",
            EfficiencyRating::Fair => "fair",
            EfficiencyRating::Poor => "poor",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(efficiency: f64, waste: f64) -> CuttingPlan {
        CuttingPlan {
            bar_index: 1,
            cuts: vec![],
            used_length: 650.0 - waste,
            waste,
            efficiency,
        }
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(EfficiencyRating::from_percent(90.0), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_percent(89.9), EfficiencyRating::Fair);
        assert_eq!(EfficiencyRating::from_percent(75.0), EfficiencyRating::Fair);
        assert_eq!(EfficiencyRating::from_percent(74.9), EfficiencyRating::Poor);
    }

    #[test]
    fn test_empty_solution() {
        let sol = Solution {
            plans: vec![],
            bar_length: 650.0,
            kerf: 0.5,
        };
        assert_eq!(sol.bar_count(), 0);
        assert_eq!(sol.average_efficiency(), 0.0);
        assert_eq!(sol.total_waste_percent(), 0.0);
    }

    #[test]
    fn test_solution_totals() {
        let sol = Solution {
            plans: vec![plan(100.0, 0.0), plan(50.0, 325.0)],
            bar_length: 650.0,
            kerf: 0.0,
        };
        assert_eq!(sol.total_waste(), 325.0);
        assert!((sol.average_efficiency() - 75.0).abs() < 1e-9);
        assert!((sol.total_waste_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_specs_json_tags() {
        let json = r#"{
            "length": 120, "width": 80, "color": "wood_finish",
            "frame_type": "pral", "sash_type": "40404", "sash_subtype": "technoline"
        }"#;
        let specs: WindowSpecs = serde_json::from_str(json).unwrap();
        assert_eq!(specs.color, Color::WoodFinish);
        assert_eq!(specs.sash_type, SashFamily::P40404);
        assert_eq!(specs.glass_type, GlassType::Simple);
        assert_eq!(specs.length, 120.0);
    }
}
