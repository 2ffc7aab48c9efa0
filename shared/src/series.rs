//! Chart series for the per-location breeder charts

use serde::Serialize;

use crate::models::ProcessedRecord;
use crate::types::{LocationSlot, TrialSite};

/// Fixed colour of the WALLER reference variety in every chart
pub const WALLER_VARIETY_COLOR: &str = "#16a34a";

/// Scale each RGB channel of a `#rrggbb` colour by `factor`.
///
/// Unparseable input is returned unchanged.
pub fn adjust_color_brightness(hex: &str, factor: f64) -> String {
    let Ok(value) = u32::from_str_radix(hex.trim_start_matches('#'), 16) else {
        return hex.to_string();
    };
    let scale = |channel: u32| ((channel as f64 * factor).round().clamp(0.0, 255.0)) as u32;
    let r = scale((value >> 16) & 0xff);
    let g = scale((value >> 8) & 0xff);
    let b = scale(value & 0xff);
    format!("#{:06x}", (r << 16) | (g << 8) | b)
}

/// One shade of `base` per variety, darkest first
pub fn color_shades(base: &str, varieties: &[&str]) -> Vec<String> {
    let steps = varieties.len().saturating_sub(1).max(1) as f64;
    varieties
        .iter()
        .enumerate()
        .map(|(index, variety)| {
            if *variety == "WALLER" {
                WALLER_VARIETY_COLOR.to_string()
            } else {
                adjust_color_brightness(base, 0.3 + index as f64 * 0.7 / steps)
            }
        })
        .collect()
}

/// A column series: one variety across the six location slots
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnSeries {
    pub name: String,
    pub color: String,
    /// Values in [`LocationSlot::ALL`] order
    pub data: [f64; 6],
}

pub fn breeder_series(records: &[ProcessedRecord], breeder_color: &str) -> Vec<ColumnSeries> {
    let varieties: Vec<&str> = records.iter().map(|r| r.variety.as_str()).collect();
    let colors = color_shades(breeder_color, &varieties);

    records
        .iter()
        .zip(colors)
        .map(|(record, color)| ColumnSeries {
            name: record.variety.clone(),
            color,
            data: record.locations.to_array(),
        })
        .collect()
}

/// Category-axis labels of the breeder charts
pub fn location_categories() -> [&'static str; 6] {
    LocationSlot::ALL.map(|slot| slot.code())
}

/// Background band grouping the two slots of a site
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlotBand {
    pub label: &'static str,
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

pub fn location_bands() -> Vec<PlotBand> {
    TrialSite::ALL
        .iter()
        .map(|site| {
            let (first, _) = site.slots();
            let from = first.index() as f64 - 0.5;
            PlotBand {
                label: site.name(),
                from,
                to: from + 2.0,
                color: site.color(),
            }
        })
        .collect()
}
