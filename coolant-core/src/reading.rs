use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::chemistry::{compute_concentration, Sample};
use crate::error::CoolantError;

/// Workpiece metal family being machined with the coolant.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum MetalCategory {
    #[serde(rename = "Aluminum 6XXX")]
    Aluminum6xxx,
    #[serde(rename = "Aluminum 7XXX")]
    Aluminum7xxx,
    #[serde(rename = "Stainless")]
    Stainless,
    #[serde(rename = "Cast Iron")]
    CastIron,
    #[serde(rename = "Carbon Steel")]
    CarbonSteel,
    #[serde(rename = "Yellow Metals")]
    YellowMetals,
}

impl MetalCategory {
    pub const ALL: [MetalCategory; 6] = [
        MetalCategory::Aluminum6xxx,
        MetalCategory::Aluminum7xxx,
        MetalCategory::Stainless,
        MetalCategory::CastIron,
        MetalCategory::CarbonSteel,
        MetalCategory::YellowMetals,
    ];

    /// Display label, also the persisted column value.
    pub fn label(&self) -> &'static str {
        match self {
            MetalCategory::Aluminum6xxx => "Aluminum 6XXX",
            MetalCategory::Aluminum7xxx => "Aluminum 7XXX",
            MetalCategory::Stainless => "Stainless",
            MetalCategory::CastIron => "Cast Iron",
            MetalCategory::CarbonSteel => "Carbon Steel",
            MetalCategory::YellowMetals => "Yellow Metals",
        }
    }
}

impl fmt::Display for MetalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetalCategory {
    type Err = CoolantError;

    /// Accepts the display label or any spelling that matches it once case,
    /// spaces, dashes and underscores are ignored ("cast-iron", "CAST_IRON").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        MetalCategory::ALL
            .into_iter()
            .find(|metal| metal.label().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| CoolantError::UnknownMetal(s.to_string()))
    }
}

/// One technician visit to one machine.
///
/// The concentration is never stored on the struct; it is always derived
/// from `brix` and `ri_factor` through [`ServiceReading::concentration_pct`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ServiceReading {
    /// Store-assigned insertion identifier, `None` until appended.
    pub id: Option<i64>,
    pub shop: String,
    pub machine: String,
    pub coolant_product: Option<String>,
    pub metal: Option<MetalCategory>,
    /// Specific alloy, e.g. "6061-T6".
    pub alloy: Option<String>,
    /// Sump volume in gallons.
    pub sump_volume_gal: f64,
    /// Refractive-index correction factor for the coolant product.
    pub ri_factor: f64,
    /// Refractometer reading; `0` means not measured.
    pub brix: f64,
    /// pH reading; `0` means not measured.
    pub ph: f64,
    pub notes: String,
    pub service_date: NaiveDate,
}

impl ServiceReading {
    /// Concentration percent, `round(brix * ri_factor, 2)`.
    pub fn concentration_pct(&self) -> f64 {
        compute_concentration(self.brix, self.ri_factor)
    }

    /// The raw chemistry inputs of this reading.
    pub fn sample(&self) -> Sample {
        Sample {
            brix: self.brix,
            ri_factor: self.ri_factor,
            ph: self.ph,
            sump_volume_gal: self.sump_volume_gal,
        }
    }
}

/// Trim an optional text field, mapping blank input to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
