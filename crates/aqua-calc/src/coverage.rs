//! Coverage and shortfall against a client's home stock

use std::collections::BTreeMap;

use aqua_core::rounding::round_half_even;
use aqua_core::{ProductType, StockLedger};

use crate::dosage::DosePlan;

/// Per-chemical coverage percentage, 0..=100
pub type Coverage = BTreeMap<ProductType, f64>;

/// Per-chemical missing quantity; chemicals with enough stock are absent
pub type Shortfall = BTreeMap<ProductType, f64>;

/// Coverage line for one chemical
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageLine {
    pub product_type: ProductType,
    /// Required today
    pub required: f64,
    /// At the client's home
    pub available: f64,
    /// Percentage of the requirement the home stock can supply
    pub coverage_pct: f64,
    /// Missing quantity, 0 when covered
    pub shortfall: f64,
}

/// Coverage calculator
///
/// Client ledgers are keyed by chemical type label, not by SKU.
pub struct CoverageCalculator;

impl CoverageCalculator {
    /// Per-chemical detail lines
    pub fn lines(stock: &StockLedger, plan: &DosePlan) -> Vec<CoverageLine> {
        plan.iter()
            .map(|(&product_type, &required)| {
                let available = stock.available(product_type.label());
                CoverageLine {
                    product_type,
                    required,
                    available,
                    coverage_pct: coverage_pct(available, required),
                    shortfall: if available < required {
                        round_half_even(required - available, 2)
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }

    /// Percentage of each required dose the client can supply
    pub fn coverage(stock: &StockLedger, plan: &DosePlan) -> Coverage {
        plan.iter()
            .map(|(&product_type, &required)| {
                let available = stock.available(product_type.label());
                (product_type, coverage_pct(available, required))
            })
            .collect()
    }

    /// What is missing at the client's home to apply today's doses
    pub fn shortfall(stock: &StockLedger, plan: &DosePlan) -> Shortfall {
        plan.iter()
            .filter_map(|(&product_type, &required)| {
                let available = stock.available(product_type.label());
                (available < required)
                    .then(|| (product_type, round_half_even(required - available, 2)))
            })
            .collect()
    }

    /// Product presence in the pool water
    ///
    /// Placeholder until real concentration measurements exist: 0 whenever a
    /// dose is required today, 100 otherwise. Not authoritative.
    pub fn pool_presence(plan: &DosePlan) -> Coverage {
        plan.iter()
            .map(|(&product_type, &required)| {
                (product_type, if required > 0.0 { 0.0 } else { 100.0 })
            })
            .collect()
    }
}

fn coverage_pct(available: f64, required: f64) -> f64 {
    if required == 0.0 {
        return 100.0;
    }
    let pct = f64::clamp(available / required * 100.0, 0.0, 100.0);
    round_half_even(pct, 1)
}

/// Render a per-chemical map as `{type: qty, ...}`
pub fn format_quantities(map: &BTreeMap<ProductType, f64>) -> String {
    let body = map
        .iter()
        .map(|(product_type, qty)| format!("{product_type}: {qty}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shock_plan() -> DosePlan {
        DosePlan::from([
            (ProductType::GranulatedChlorine, 300.0),
            (ProductType::Clarifier, 200.0),
            (ProductType::Algaecide, 62.5),
        ])
    }

    #[test]
    fn test_coverage_partial_stock() {
        let stock = StockLedger::new().with_quantity("alguicida", 10.0);
        let plan = DosePlan::from([(ProductType::Algaecide, 62.5)]);

        let coverage = CoverageCalculator::coverage(&stock, &plan);
        assert_eq!(coverage[&ProductType::Algaecide], 16.0);

        let shortfall = CoverageCalculator::shortfall(&stock, &plan);
        assert_eq!(shortfall, Shortfall::from([(ProductType::Algaecide, 52.5)]));
    }

    #[test]
    fn test_coverage_caps_at_100() {
        let stock = StockLedger::new()
            .with_quantity("cloro-granulado", 500.0)
            .with_quantity("clarificador", 200.0)
            .with_quantity("alguicida", 50.0);

        let coverage = CoverageCalculator::coverage(&stock, &shock_plan());
        assert_eq!(coverage[&ProductType::GranulatedChlorine], 100.0);
        assert_eq!(coverage[&ProductType::Clarifier], 100.0);
        assert_eq!(coverage[&ProductType::Algaecide], 80.0);

        // Exactly enough clarifier is not a shortfall
        let shortfall = CoverageCalculator::shortfall(&stock, &shock_plan());
        assert_eq!(shortfall, Shortfall::from([(ProductType::Algaecide, 12.5)]));
    }

    #[test]
    fn test_zero_requirement_is_fully_covered() {
        let stock = StockLedger::new();
        let plan = DosePlan::from([(ProductType::AntiScale, 0.0)]);

        assert_eq!(CoverageCalculator::coverage(&stock, &plan)[&ProductType::AntiScale], 100.0);
        assert!(CoverageCalculator::shortfall(&stock, &plan).is_empty());
        assert_eq!(CoverageCalculator::pool_presence(&plan)[&ProductType::AntiScale], 100.0);
    }

    #[test]
    fn test_lines_detail() {
        let stock = StockLedger::new().with_quantity("cloro-granulado", 10.0);
        let lines = CoverageCalculator::lines(&stock, &shock_plan());

        assert_eq!(lines.len(), 3);
        let chlorine = lines
            .iter()
            .find(|l| l.product_type == ProductType::GranulatedChlorine)
            .unwrap();
        assert_eq!(chlorine.available, 10.0);
        assert_eq!(chlorine.coverage_pct, 3.3);
        assert_eq!(chlorine.shortfall, 290.0);
    }

    #[test]
    fn test_pool_presence_placeholder() {
        let presence = CoverageCalculator::pool_presence(&shock_plan());
        assert!(presence.values().all(|p| *p == 0.0));
    }

    #[test]
    fn test_format_quantities() {
        let shortfall = Shortfall::from([
            (ProductType::Clarifier, 190.0),
            (ProductType::Algaecide, 52.5),
        ]);
        assert_eq!(format_quantities(&shortfall), "{clarificador: 190, alguicida: 52.5}");
        assert_eq!(format_quantities(&Shortfall::new()), "{}");
    }

    proptest! {
        #[test]
        fn prop_coverage_and_shortfall_consistent(available in 0.0f64..1_000.0, required in 0.0f64..1_000.0) {
            let stock = StockLedger::new().with_quantity("clarificador", available);
            let plan = DosePlan::from([(ProductType::Clarifier, required)]);

            let pct = CoverageCalculator::coverage(&stock, &plan)[&ProductType::Clarifier];
            prop_assert!((0.0..=100.0).contains(&pct));

            let shortfall = CoverageCalculator::shortfall(&stock, &plan);
            if available >= required {
                prop_assert!(shortfall.is_empty());
            } else {
                prop_assert!(shortfall.contains_key(&ProductType::Clarifier));
            }
        }
    }
}
