//! Window pricing.
//!
//! Turns [`WindowSpecs`] into a [`CostBreakdown`]. Pricing is a pure function
//! of the specs, the margin, the catalog snapshot and the [`CalculatorConfig`]:
//! the same inputs always produce the same breakdown.

use serde::{Deserialize, Serialize};

use crate::breakdown::{CostBreakdown, CostItem, Quantity};
use crate::catalog::Catalog;
use crate::materials::{
    BRACKETS_PER_BOX, GASKET_ROLL_METRES, HardwareColor, MaterialKey, ProfileFamily, fallback,
    refs,
};
use crate::types::WindowSpecs;

pub const BAR_LENGTH: f64 = 650.0;
pub const KERF: f64 = 0.5;
/// Markup as entered by users, in percent.
pub const DEFAULT_MARGIN_PERCENT: f64 = 30.0;
pub const DEFAULT_PROFIT_MARGIN: f64 = DEFAULT_MARGIN_PERCENT / 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Length of one stock profile bar.
    pub bar_length: f64,
    /// Frame length minus sash length.
    pub sash_length_offset: f64,
    /// Frame width minus the combined width of both sashes. Measured on the
    /// 6007/40404 hardware; other systems may need a different value.
    pub sash_width_offset: f64,
    /// Sash interior minus glass pane, per side.
    pub glass_clearance: f64,
    pub glass_price_per_m2: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            bar_length: BAR_LENGTH,
            sash_length_offset: 4.0,
            sash_width_offset: 4.7,
            glass_clearance: 1.0,
            glass_price_per_m2: 31.25,
        }
    }
}

/// Derived lengths of a window, in centimetres unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub frame_perimeter: f64,
    pub sash_length: f64,
    pub sash_width: f64,
    /// Profile for both sashes.
    pub sash_consumption: f64,
    pub separator_length: f64,
    pub glass_length: f64,
    pub glass_width: f64,
    /// Both panes, m².
    pub glass_area: f64,
}

impl Geometry {
    pub fn of(specs: &WindowSpecs, config: &CalculatorConfig) -> Self {
        let frame_perimeter = 2.0 * (specs.length + specs.width);
        let sash_length = specs.length - config.sash_length_offset;
        let sash_width = (specs.width - config.sash_width_offset) / 2.0;
        let sash_consumption = 2.0 * (sash_length + sash_width) * 2.0;
        let glass_length = sash_length - config.glass_clearance;
        let glass_width = sash_width - config.glass_clearance;

        Self {
            frame_perimeter,
            sash_length,
            sash_width,
            sash_consumption,
            separator_length: sash_length,
            glass_length,
            glass_width,
            glass_area: glass_length * glass_width / 10_000.0 * 2.0,
        }
    }
}

pub struct Calculator<'a> {
    catalog: &'a Catalog,
    config: CalculatorConfig,
}

impl<'a> Calculator<'a> {
    pub fn new(catalog: &'a Catalog, config: CalculatorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn calculate(&self, specs: &WindowSpecs, margin: f64) -> CostBreakdown {
        let geometry = Geometry::of(specs, &self.config);
        CostBreakdown::new(
            self.frame_items(specs, &geometry, margin),
            self.sash_items(specs, &geometry, margin),
            self.separator_items(specs, &geometry, margin),
            self.glass_items(&geometry, margin),
            self.hardware_items(specs, &geometry, margin),
        )
    }

    fn price(&self, reference: &str, fallback: f64) -> f64 {
        self.catalog.resolve(reference, fallback)
    }

    fn bar_item(&self, name: String, consumed: f64, unit_price: f64, margin: f64) -> CostItem {
        let quantity = Quantity::bars(consumed, self.config.bar_length);
        let item = CostItem::priced(name, quantity, unit_price, margin);
        let note = format!(
            "consumed {:.1} cm, {} bars × {:.2}",
            consumed,
            quantity.billable_units(),
            unit_price
        );
        item.with_specification(note)
    }

    fn frame_items(&self, specs: &WindowSpecs, g: &Geometry, margin: f64) -> Vec<CostItem> {
        let family = ProfileFamily::Frame40100;
        let key = MaterialKey::new(family, specs.frame_type, specs.color);
        let profile_price = self.price(key.reference(), fallback::FRAME_PROFILE);
        let bracket = self.price(refs::CORNER_BRACKET, fallback::CORNER_BRACKET);
        let pm = self.price(refs::ALIGNMENT_BRACKET_PM, fallback::ALIGNMENT_BRACKET_PM)
            / BRACKETS_PER_BOX;

        vec![
            self.bar_item(
                format!("{} {} {}", family.code(), specs.color, specs.frame_type),
                g.frame_perimeter,
                profile_price,
                margin,
            ),
            CostItem::priced("frame corner brackets", Quantity::Count { pieces: 4 }, bracket, margin),
            CostItem::priced("PM alignment brackets", Quantity::Count { pieces: 4 }, pm, margin),
        ]
    }

    fn sash_items(&self, specs: &WindowSpecs, g: &Geometry, margin: f64) -> Vec<CostItem> {
        let family = ProfileFamily::from(specs.sash_type);
        let key = MaterialKey::new(family, specs.sash_subtype, specs.color);
        let profile_price = self.price(key.reference(), fallback::SASH_PROFILE);
        let bracket = self.price(refs::CORNER_BRACKET, fallback::CORNER_BRACKET);
        let gm = self.price(refs::ALIGNMENT_BRACKET_GM, fallback::ALIGNMENT_BRACKET_GM)
            / BRACKETS_PER_BOX;

        vec![
            self.bar_item(
                format!(
                    "{} {} {} (two sashes)",
                    family.code(),
                    specs.sash_subtype,
                    specs.color
                ),
                g.sash_consumption,
                profile_price,
                margin,
            ),
            CostItem::priced("sash corner brackets", Quantity::Count { pieces: 8 }, bracket, margin),
            CostItem::priced("GM alignment brackets", Quantity::Count { pieces: 8 }, gm, margin),
        ]
    }

    fn separator_items(&self, specs: &WindowSpecs, g: &Geometry, margin: f64) -> Vec<CostItem> {
        let family = ProfileFamily::Separator40112;
        let key = MaterialKey::new(family, specs.frame_type, specs.color);
        let price = self.price(key.reference(), fallback::SEPARATOR_PROFILE);

        vec![self.bar_item(
            format!("{} separator {}", family.code(), specs.color),
            g.separator_length,
            price,
            margin,
        )]
    }

    fn glass_items(&self, g: &Geometry, margin: f64) -> Vec<CostItem> {
        let gasket = self.price(refs::GLAZING_GASKET, fallback::GLAZING_GASKET) / GASKET_ROLL_METRES;
        let gasket_metres = g.sash_consumption * 2.0 / 100.0;

        vec![
            CostItem::priced(
                "glass 4mm",
                Quantity::Area {
                    square_metres: g.glass_area,
                },
                self.config.glass_price_per_m2,
                margin,
            )
            .with_specification(format!(
                "two panes {:.1} × {:.1} cm",
                g.glass_length, g.glass_width
            )),
            CostItem::priced(
                "glazing gasket",
                Quantity::Length {
                    metres: gasket_metres,
                },
                gasket,
                margin,
            )
            .with_specification("both faces"),
        ]
    }

    fn hardware_items(&self, specs: &WindowSpecs, g: &Geometry, margin: f64) -> Vec<CostItem> {
        let color = HardwareColor::for_window(specs.color);
        let hw = color.refs();
        let hinge = self.price(hw.hinge, fallback::HINGE);
        let espagnolette = self.price(hw.espagnolette, fallback::ESPAGNOLETTE);
        let weatherstrip = self.price(refs::WEATHERSTRIP, fallback::WEATHERSTRIP) / GASKET_ROLL_METRES;
        let kit = self.price(refs::ESPAGNOLETTE_KIT, fallback::ESPAGNOLETTE_KIT);
        let lock = self.price(refs::LOCK_KIT, fallback::LOCK_KIT);
        let rod = self.price(refs::ESPAGNOLETTE_ROD, fallback::ESPAGNOLETTE_ROD);

        let weatherstrip_metres = (g.frame_perimeter + g.sash_consumption) / 100.0;
        let one = Quantity::Count { pieces: 1 };

        vec![
            CostItem::priced(
                format!("hinges {}", color.label()),
                Quantity::Count { pieces: 4 },
                hinge,
                margin,
            )
            .with_specification(format!("{} hardware for {} windows", color.label(), specs.color)),
            CostItem::priced(
                "weatherstrip",
                Quantity::Length {
                    metres: weatherstrip_metres,
                },
                weatherstrip,
                margin,
            ),
            CostItem::priced(format!("espagnolette {}", color.label()), one, espagnolette, margin)
                .with_specification(format!("{} hardware for {} windows", color.label(), specs.color)),
            CostItem::priced("espagnolette kit", one, kit, margin),
            CostItem::priced("lock kit", one, lock, margin),
            CostItem::priced(
                "espagnolette rod",
                Quantity::Length {
                    metres: specs.length / 100.0,
                },
                rod,
                margin,
            ),
        ]
    }
}
