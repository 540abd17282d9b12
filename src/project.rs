//! A set of named windows priced together.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{CombinedMaterial, ProjectSummary, aggregate};
use crate::breakdown::CostBreakdown;
use crate::calculator::Calculator;
use crate::types::WindowSpecs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowProject {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub specs: WindowSpecs,
}

impl WindowProject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, specs: WindowSpecs) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedWindow {
    pub name: String,
    pub specs: WindowSpecs,
    pub breakdown: CostBreakdown,
}

/// Converts a percentage as typed by a user into the margin fraction the
/// calculator takes.
pub fn margin_from_percent(percent: f64) -> f64 {
    percent / 100.0
}

/// Prices every window. Windows are independent, so they are priced in
/// parallel; the result is in input order.
pub fn calculate_all(
    windows: &[WindowProject],
    margin: f64,
    calculator: &Calculator<'_>,
) -> Vec<PricedWindow> {
    let priced: Vec<PricedWindow> = windows
        .par_iter()
        .map(|w| PricedWindow {
            name: w.name.clone(),
            specs: w.specs,
            breakdown: calculator.calculate(&w.specs, margin),
        })
        .collect();
    info!(windows = priced.len(), margin, "priced project");
    priced
}

pub fn combine(priced: &[PricedWindow]) -> Vec<CombinedMaterial> {
    aggregate(priced.iter().map(|w| (w.name.as_str(), &w.breakdown)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub windows: Vec<PricedWindow>,
    pub materials: Vec<CombinedMaterial>,
    pub summary: ProjectSummary,
}

impl Quote {
    pub fn build(windows: &[WindowProject], margin: f64, calculator: &Calculator<'_>) -> Self {
        let priced = calculate_all(windows, margin, calculator);
        let materials = combine(&priced);
        let summary = ProjectSummary::estimate(&materials, calculator.config().bar_length);
        Self {
            windows: priced,
            materials,
            summary,
        }
    }
}

/// Snapshot of a priced project, written out as JSON. The format carries no
/// compatibility guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectExport {
    pub windows: Vec<PricedWindow>,
    pub total_cost: f64,
    pub generated_at: DateTime<Utc>,
}

impl ProjectExport {
    pub fn new(windows: Vec<PricedWindow>) -> Self {
        Self::at(windows, Utc::now())
    }

    pub fn at(windows: Vec<PricedWindow>, generated_at: DateTime<Utc>) -> Self {
        let total_cost = windows.iter().map(|w| w.breakdown.total_cost()).sum();
        Self {
            windows,
            total_cost,
            generated_at,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalculatorConfig;
    use crate::catalog::Catalog;
    use chrono::TimeZone;

    fn windows(sizes: &[(f64, f64)]) -> Vec<WindowProject> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(length, width))| {
                WindowProject::new(
                    (i + 1).to_string(),
                    format!("window {}", i + 1),
                    WindowSpecs {
                        length,
                        width,
                        ..WindowSpecs::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_margin_from_percent() {
        assert_eq!(margin_from_percent(30.0), 0.3);
        assert_eq!(margin_from_percent(0.0), 0.0);
    }

    #[test]
    fn test_calculate_all_keeps_order() {
        let catalog = Catalog::default();
        let calc = Calculator::new(&catalog, CalculatorConfig::default());
        let sizes: Vec<(f64, f64)> = (0..50).map(|i| (80.0 + i as f64, 60.0 + i as f64)).collect();
        let ws = windows(&sizes);
        let priced = calculate_all(&ws, 0.3, &calc);
        assert_eq!(priced.len(), ws.len());
        for (w, p) in ws.iter().zip(&priced) {
            assert_eq!(w.name, p.name);
            assert_eq!(p.breakdown, calc.calculate(&w.specs, 0.3));
        }
    }

    #[test]
    fn test_quote_consolidates() {
        let catalog = Catalog::default();
        let calc = Calculator::new(&catalog, CalculatorConfig::default());
        // Frame perimeters 400 and 500.
        let quote = Quote::build(&windows(&[(100.0, 100.0), (150.0, 100.0)]), 0.0, &calc);
        let frame = quote
            .materials
            .iter()
            .find(|m| m.name == "40100 white eurosist")
            .unwrap();
        assert_eq!(frame.quantity.billable_units(), 2.0);
        assert_eq!(frame.used_in_windows, vec!["window 1", "window 2"]);

        let sum: f64 = quote.materials.iter().map(|m| m.total_cost).sum();
        assert!((quote.summary.total_cost - sum).abs() < 1e-9);
    }

    #[test]
    fn test_export_snapshot() {
        let catalog = Catalog::default();
        let calc = Calculator::new(&catalog, CalculatorConfig::default());
        let priced = calculate_all(&windows(&[(100.0, 100.0), (120.0, 90.0)]), 0.3, &calc);
        let expected: f64 = priced.iter().map(|w| w.breakdown.total_cost()).sum();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let export = ProjectExport::at(priced, at);
        assert!((export.total_cost - expected).abs() < 1e-9);

        let json = export.to_json_pretty().unwrap();
        assert!(json.contains("\"generated_at\": \"2026-03-01T12:00:00Z\""));
        assert!(json.contains("\"unit\": \"bars\""));
    }

    #[test]
    fn test_demo_project() {
        let ws: Vec<WindowProject> =
            serde_json::from_str(include_str!("../demos/project.json")).unwrap();
        let catalog = Catalog::from_json(include_str!("../data/catalog.json")).unwrap();
        let calc = Calculator::new(&catalog, CalculatorConfig::default());
        let quote = Quote::build(&ws, 0.3, &calc);
        assert_eq!(quote.windows.len(), 3);
        let names: Vec<&str> = quote.windows.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["kitchen", "living room", "study"]);
        // The wood-finish window brings its own profiles and dark hardware.
        assert!(quote.materials.iter().any(|m| m.name == "hinges black"));
        assert!(quote.materials.windows(2).all(|p| p[0].total_cost >= p[1].total_cost));
    }

    #[test]
    fn test_project_file_without_ids() {
        let json = r#"[{"name": "kitchen", "specs": {
            "length": 120, "width": 100, "color": "white",
            "frame_type": "eurosist", "sash_type": "6007", "sash_subtype": "inoforme"
        }}]"#;
        let ws: Vec<WindowProject> = serde_json::from_str(json).unwrap();
        assert_eq!(ws[0].id, "");
        assert_eq!(ws[0].name, "kitchen");
    }
}
