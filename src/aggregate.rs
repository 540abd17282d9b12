//! Consolidated purchase list across windows.
//!
//! Bar stock is re-rounded from the summed consumption of all windows, so
//! offcuts of one window count towards the next instead of every window
//! buying its own partial bar. Bar stock is listed at purchase price: whole
//! bars times unit price, with no markup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::breakdown::{Category, CostBreakdown, Quantity, UnitKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedMaterial {
    pub name: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub margin: f64,
    pub total_cost: f64,
    pub category: Category,
    pub used_in_windows: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

impl CombinedMaterial {
    pub fn unit_kind(&self) -> UnitKind {
        self.quantity.unit_kind()
    }

    fn reprice_bars(&mut self) {
        self.total_cost = self.quantity.billable_units() * self.unit_price;
    }
}

/// Merges the items of every window by name, keeping first-seen order for
/// materials of equal cost. The result is sorted by cost, most expensive
/// first.
pub fn aggregate<'a, I>(windows: I) -> Vec<CombinedMaterial>
where
    I: IntoIterator<Item = (&'a str, &'a CostBreakdown)>,
{
    let mut materials: Vec<CombinedMaterial> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (window, breakdown) in windows {
        for (category, item) in breakdown.items() {
            let Some(&i) = index.get(&item.name) else {
                index.insert(item.name.clone(), materials.len());
                let mut material = CombinedMaterial {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    margin: item.margin,
                    total_cost: item.total_cost,
                    category,
                    used_in_windows: vec![window.to_string()],
                    specification: item.specification.clone(),
                };
                if material.unit_kind() == UnitKind::Bar {
                    material.reprice_bars();
                }
                materials.push(material);
                continue;
            };

            let existing = &mut materials[i];
            match existing.quantity.merge(&item.quantity) {
                Some(merged) => {
                    existing.quantity = merged;
                    if merged.unit_kind() == UnitKind::Bar {
                        existing.reprice_bars();
                    } else {
                        existing.total_cost += item.total_cost;
                    }
                }
                None => {
                    warn!(
                        material = %item.name,
                        window,
                        "quantity does not match earlier windows, adding cost only"
                    );
                    existing.total_cost += item.total_cost;
                }
            }
            existing.used_in_windows.push(window.to_string());
        }
    }

    materials.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    materials
}

/// Rough efficiency assumed for project-level waste. Not derived from any
/// cutting plan; the optimizer reports its own figures on `Solution`.
pub const NOMINAL_EFFICIENCY: f64 = 0.85;

/// Project totals over a consolidated purchase list. Bar waste is an
/// estimate from [`NOMINAL_EFFICIENCY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Fractional bars of profile consumed.
    pub total_bars: f64,
    /// Whole bars to buy, rounded per material.
    pub purchased_bars: f64,
    pub nominal_efficiency: f64,
    pub estimated_waste: f64,
    pub total_cost: f64,
    pub material_count: usize,
}

impl ProjectSummary {
    pub fn estimate(materials: &[CombinedMaterial], bar_length: f64) -> Self {
        let profiles = materials
            .iter()
            .filter(|m| m.category.is_profile() && m.unit_kind() == UnitKind::Bar);

        let mut total_bars = 0.0;
        let mut purchased_bars = 0.0;
        for m in profiles {
            total_bars += m.quantity.amount();
            purchased_bars += m.quantity.billable_units();
        }

        Self {
            total_bars,
            purchased_bars,
            nominal_efficiency: NOMINAL_EFFICIENCY * 100.0,
            estimated_waste: total_bars * bar_length * (1.0 - NOMINAL_EFFICIENCY),
            total_cost: materials.iter().map(|m| m.total_cost).sum(),
            material_count: materials.len(),
        }
    }
}

/// Purchase list split back into the five buckets, each sorted by cost.
pub fn by_category(materials: &[CombinedMaterial]) -> Vec<(Category, Vec<&CombinedMaterial>)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, materials.iter().filter(|m| m.category == c).collect()))
        .collect()
}
