//! Itemized cost of a single window.
//!
//! Every item carries its consumption as a structured [`Quantity`], so the
//! purchase list can be rebuilt across windows without reading back any
//! display text.

use serde::{Deserialize, Serialize};

/// Slack for float noise when rounding consumption up to whole bars.
const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Bar,
    Area,
    Length,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum Quantity {
    /// Profile consumed from stock bars, in length units. Bought whole.
    Bars { consumed: f64, bar_length: f64 },
    Area { square_metres: f64 },
    Length { metres: f64 },
    Count { pieces: u32 },
}

impl Quantity {
    pub fn bars(consumed: f64, bar_length: f64) -> Self {
        Quantity::Bars {
            consumed,
            bar_length,
        }
    }

    pub fn unit_kind(&self) -> UnitKind {
        match self {
            Quantity::Bars { .. } => UnitKind::Bar,
            Quantity::Area { .. } => UnitKind::Area,
            Quantity::Length { .. } => UnitKind::Length,
            Quantity::Count { .. } => UnitKind::Count,
        }
    }

    /// Consumption in the unit the item is priced in. Bars are fractional here.
    pub fn amount(&self) -> f64 {
        match *self {
            Quantity::Bars {
                consumed,
                bar_length,
            } => consumed / bar_length,
            Quantity::Area { square_metres } => square_metres,
            Quantity::Length { metres } => metres,
            Quantity::Count { pieces } => pieces as f64,
        }
    }

    /// Units that have to be paid for: whole bars for bar stock, the raw
    /// amount for everything else.
    pub fn billable_units(&self) -> f64 {
        match self {
            Quantity::Bars { .. } => purchase_count(self.amount()),
            _ => self.amount(),
        }
    }

    /// Sums two quantities of the same kind. Bars only merge when cut from
    /// the same stock length.
    pub fn merge(&self, other: &Quantity) -> Option<Quantity> {
        match (*self, *other) {
            (
                Quantity::Bars {
                    consumed: a,
                    bar_length,
                },
                Quantity::Bars {
                    consumed: b,
                    bar_length: other_bar,
                },
            ) if bar_length == other_bar => Some(Quantity::bars(a + b, bar_length)),
            (Quantity::Area { square_metres: a }, Quantity::Area { square_metres: b }) => {
                Some(Quantity::Area {
                    square_metres: a + b,
                })
            }
            (Quantity::Length { metres: a }, Quantity::Length { metres: b }) => {
                Some(Quantity::Length { metres: a + b })
            }
            (Quantity::Count { pieces: a }, Quantity::Count { pieces: b }) => {
                Some(Quantity::Count { pieces: a + b })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Quantity::Bars { consumed, .. } => write!(
                f,
                "{:.1} bars ({:.1} cm), {} to buy",
                self.amount(),
                consumed,
                self.billable_units()
            ),
            Quantity::Area { square_metres } => write!(f, "{square_metres:.2} m²"),
            Quantity::Length { metres } => write!(f, "{metres:.1} m"),
            Quantity::Count { pieces } => write!(f, "{pieces} pcs"),
        }
    }
}

/// Whole bars needed for a fractional bar consumption.
pub fn purchase_count(bars: f64) -> f64 {
    (bars - EPS).ceil() + 0.0
}

pub fn apply_margin(cost: f64, margin: f64) -> f64 {
    cost * (1.0 + margin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frame,
    Sashes,
    Separator,
    Glass,
    Hardware,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Frame,
        Category::Sashes,
        Category::Separator,
        Category::Glass,
        Category::Hardware,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Frame => "frame",
            Category::Sashes => "sashes",
            Category::Separator => "separator",
            Category::Glass => "glass",
            Category::Hardware => "hardware",
        }
    }

    /// Categories bought as stock bars and planned by the optimizer.
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            Category::Frame | Category::Sashes | Category::Separator
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub name: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    /// Markup fraction already applied to `total_cost`.
    pub margin: f64,
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

impl CostItem {
    pub fn priced(name: impl Into<String>, quantity: Quantity, unit_price: f64, margin: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            margin,
            total_cost: apply_margin(quantity.billable_units() * unit_price, margin),
            specification: None,
        }
    }

    pub fn with_specification(mut self, specification: impl Into<String>) -> Self {
        self.specification = Some(specification.into());
        self
    }
}

/// Cost of one window, split into the five fixed buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    frame: Vec<CostItem>,
    sashes: Vec<CostItem>,
    separator: Vec<CostItem>,
    glass: Vec<CostItem>,
    hardware: Vec<CostItem>,
    total_cost: f64,
}

impl CostBreakdown {
    pub fn new(
        frame: Vec<CostItem>,
        sashes: Vec<CostItem>,
        separator: Vec<CostItem>,
        glass: Vec<CostItem>,
        hardware: Vec<CostItem>,
    ) -> Self {
        let mut breakdown = Self {
            frame,
            sashes,
            separator,
            glass,
            hardware,
            total_cost: 0.0,
        };
        breakdown.total_cost = breakdown.items().map(|(_, item)| item.total_cost).sum();
        breakdown
    }

    pub fn bucket(&self, category: Category) -> &[CostItem] {
        match category {
            Category::Frame => &self.frame,
            Category::Sashes => &self.sashes,
            Category::Separator => &self.separator,
            Category::Glass => &self.glass,
            Category::Hardware => &self.hardware,
        }
    }

    /// All items, bucket by bucket in [`Category::ALL`] order.
    pub fn items(&self) -> impl Iterator<Item = (Category, &CostItem)> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.bucket(c).iter().map(move |item| (c, item)))
    }

    pub fn category_total(&self, category: Category) -> f64 {
        self.bucket(category).iter().map(|i| i.total_cost).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
