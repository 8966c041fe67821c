//! Dosage regimens

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use aqua_core::rounding::round_half_even;
use aqua_core::{DoseReferences, Pool, PoolError, ProductType};
use serde::{Deserialize, Serialize};

/// Reference volume the dose tables are expressed against
pub const REFERENCE_VOLUME_LITERS: f64 = 10_000.0;

/// Required quantity per chemical type, in each chemical's natural unit
pub type DosePlan = BTreeMap<ProductType, f64>;

/// Anything that can tell how much of each chemical a pool needs today
pub trait DoseStrategy {
    fn required_doses(&self, pool: &Pool) -> DosePlan;
}

/// Treatment regimen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regimen {
    /// Daily maintenance: chlorine + clarifier
    Maintenance,
    /// Shock: 4x chlorine, 2x clarifier, algaecide
    Shock,
    /// Algaecide only
    AlgaecideOnly,
    /// Anti-scale only
    AntiScale,
}

impl Regimen {
    pub const ALL: [Regimen; 4] = [
        Regimen::Maintenance,
        Regimen::Shock,
        Regimen::AlgaecideOnly,
        Regimen::AntiScale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Regimen::Maintenance => "mantenimiento",
            Regimen::Shock => "choque",
            Regimen::AlgaecideOnly => "alguicida",
            Regimen::AntiScale => "antisarro",
        }
    }

    /// Reference dose per 10,000 L for each chemical of the regimen
    pub fn reference_doses(&self, refs: &DoseReferences) -> Vec<(ProductType, f64)> {
        match self {
            Regimen::Maintenance => vec![
                (ProductType::GranulatedChlorine, refs.chlorine_maintenance),
                (ProductType::Clarifier, refs.clarifier),
            ],
            Regimen::Shock => vec![
                (ProductType::GranulatedChlorine, refs.chlorine_shock),
                (ProductType::Clarifier, refs.clarifier * 2.0),
                (ProductType::Algaecide, refs.algaecide),
            ],
            Regimen::AlgaecideOnly => vec![(ProductType::Algaecide, refs.algaecide)],
            Regimen::AntiScale => vec![(ProductType::AntiScale, refs.anti_scale)],
        }
    }

    /// Scale the reference doses to the pool volume
    pub fn scaled_doses(&self, refs: &DoseReferences, pool: &Pool) -> DosePlan {
        self.reference_doses(refs)
            .into_iter()
            .map(|(product_type, reference)| {
                (product_type, scale_by_volume(reference, pool.volume_liters))
            })
            .collect()
    }

    /// Pair the regimen with a dose table
    pub fn with_references(self, references: DoseReferences) -> RegimenDosage {
        RegimenDosage::new(self, references)
    }
}

impl fmt::Display for Regimen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Regimen {
    type Err = PoolError;

    fn from_str(s: &str) -> aqua_core::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mantenimiento" | "maintenance" => Ok(Regimen::Maintenance),
            "choque" | "shock" => Ok(Regimen::Shock),
            "alguicida" | "algaecide" | "algaecide-only" => Ok(Regimen::AlgaecideOnly),
            "antisarro" | "anti-scale" | "antiscale" => Ok(Regimen::AntiScale),
            _ => Err(PoolError::UnknownRegimen(s.to_string())),
        }
    }
}

/// Uses the default dose table
impl DoseStrategy for Regimen {
    fn required_doses(&self, pool: &Pool) -> DosePlan {
        self.scaled_doses(&DoseReferences::default(), pool)
    }
}

/// A regimen bound to a configured dose table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimenDosage {
    pub regimen: Regimen,
    pub references: DoseReferences,
}

impl RegimenDosage {
    pub fn new(regimen: Regimen, references: DoseReferences) -> Self {
        Self {
            regimen,
            references,
        }
    }
}

impl DoseStrategy for RegimenDosage {
    fn required_doses(&self, pool: &Pool) -> DosePlan {
        self.regimen.scaled_doses(&self.references, pool)
    }
}

/// reference x (volume / 10,000), rounded to two decimals at the end
pub fn scale_by_volume(reference_per_10k: f64, volume_liters: u32) -> f64 {
    round_half_even(
        reference_per_10k * (f64::from(volume_liters) / REFERENCE_VOLUME_LITERS),
        2,
    )
}
