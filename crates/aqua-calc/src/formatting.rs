//! Product display formatting
//!
//! Formatters are plain values passed to whoever renders products; there is no
//! process-wide registry.

use aqua_core::Product;

pub trait ProductFormatter {
    fn format(&self, product: &Product) -> String;
}

/// `"{name} [{type}] ({presentation})"`
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFormatter;

impl ProductFormatter for CatalogFormatter {
    fn format(&self, product: &Product) -> String {
        format!(
            "{} [{}] ({})",
            product.name, product.product_type, product.presentation
        )
    }
}

/// Adds SKU and unit, for stock listings
#[derive(Debug, Clone, Copy, Default)]
pub struct StockListingFormatter;

impl ProductFormatter for StockListingFormatter {
    fn format(&self, product: &Product) -> String {
        format!(
            "{} {} [{}, {}]",
            product.sku,
            product.name,
            product.product_type,
            product.unit.symbol()
        )
    }
}

/// Format every product with the given formatter
pub fn format_catalog<'a>(
    formatter: &dyn ProductFormatter,
    products: impl IntoIterator<Item = &'a Product>,
) -> Vec<String> {
    products.into_iter().map(|p| formatter.format(p)).collect()
}
