//! Product catalog model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PoolError, Result};

/// Chemical category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    /// Granulated chlorine
    #[serde(rename = "cloro-granulado")]
    GranulatedChlorine,
    /// Chlorine tablets
    #[serde(rename = "cloro-pastilla")]
    ChlorineTablet,
    /// Clarifier
    #[serde(rename = "clarificador")]
    Clarifier,
    /// Algaecide
    #[serde(rename = "alguicida")]
    Algaecide,
    /// Anti-scale agent
    #[serde(rename = "antisarro")]
    AntiScale,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        ProductType::GranulatedChlorine,
        ProductType::ChlorineTablet,
        ProductType::Clarifier,
        ProductType::Algaecide,
        ProductType::AntiScale,
    ];

    /// Label used as the stock key in client home inventories
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::GranulatedChlorine => "cloro-granulado",
            ProductType::ChlorineTablet => "cloro-pastilla",
            ProductType::Clarifier => "clarificador",
            ProductType::Algaecide => "alguicida",
            ProductType::AntiScale => "antisarro",
        }
    }

    /// Natural unit of measure
    pub fn unit(&self) -> Unit {
        match self {
            ProductType::GranulatedChlorine => Unit::Grams,
            ProductType::ChlorineTablet => Unit::Tablets,
            ProductType::Clarifier | ProductType::Algaecide | ProductType::AntiScale => {
                Unit::Milliliters
            }
        }
    }

    /// Packaging used when the catalog entry does not name one
    pub fn default_presentation(&self) -> &'static str {
        match self {
            ProductType::GranulatedChlorine => "1kg",
            ProductType::ChlorineTablet => "200g",
            ProductType::Clarifier | ProductType::Algaecide | ProductType::AntiScale => "1L",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductType {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        ProductType::ALL
            .into_iter()
            .find(|t| t.label() == key)
            .ok_or_else(|| PoolError::UnknownProductType(s.to_string()))
    }
}

/// Unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "pastillas")]
    Tablets,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Milliliters => "ml",
            Unit::Tablets => "pastillas",
        }
    }
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock keeping unit, unique in the catalog
    pub sku: String,

    /// Display name
    pub name: String,

    /// Chemical category
    pub product_type: ProductType,

    /// Unit of measure
    pub unit: Unit,

    /// Packaging label (e.g. "1kg", "1L")
    pub presentation: String,
}

impl Product {
    /// Create a new product using the natural unit of its type
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        product_type: ProductType,
        presentation: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            product_type,
            unit: product_type.unit(),
            presentation: presentation.into(),
        }
    }

    /// Build a catalog entry from a type label
    ///
    /// Fails with `UnknownProductType` when the label is not a known category.
    /// An empty presentation falls back to the type's default packaging.
    pub fn from_catalog(type_label: &str, sku: &str, name: &str, presentation: &str) -> Result<Self> {
        let product_type: ProductType = type_label.parse()?;
        let presentation = if presentation.trim().is_empty() {
            product_type.default_presentation()
        } else {
            presentation
        };
        Ok(Self::new(sku, name, product_type, presentation))
    }
}
