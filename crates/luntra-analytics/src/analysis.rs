//! Complete deal analysis bundle.

use luntra_core::{DealInputs, FlatMap, LuntraResult};
use serde::{Deserialize, Serialize};

use crate::income::OperatingExpenses;
use crate::metrics::{compute_metrics, DealMetrics};
use crate::ratios::{supplementary_metrics, SupplementaryMetrics};

/// Inputs together with everything derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealAnalysis {
    /// The validated inputs.
    pub inputs: DealInputs,
    /// Core metrics.
    pub metrics: DealMetrics,
    /// Monthly operating expense breakdown.
    pub expenses: OperatingExpenses,
    /// Supplementary ratios.
    pub supplementary: SupplementaryMetrics,
}

/// Analyze a deal: core metrics, expense breakdown and supplementary ratios.
pub fn analyze(inputs: &DealInputs) -> LuntraResult<DealAnalysis> {
    let metrics = compute_metrics(inputs)?;
    let supplementary = supplementary_metrics(inputs, &metrics);

    Ok(DealAnalysis {
        inputs: inputs.clone(),
        expenses: OperatingExpenses::from_inputs(inputs),
        metrics,
        supplementary,
    })
}

impl DealAnalysis {
    /// Flattens inputs, metrics and ratios into one key-value map.
    pub fn to_flat_map(&self) -> FlatMap {
        let mut map = self.inputs.to_flat_map();
        map.extend(self.metrics.to_flat_map());
        map.extend(self.supplementary.to_flat_map());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flat_map_merges_without_collisions() {
        let inputs = DealInputs::builder()
            .purchase_price(dec!(350000))
            .down_payment_percent(dec!(25))
            .interest_rate_percent(dec!(7))
            .monthly_rent(dec!(2600))
            .build()
            .unwrap();

        let analysis = analyze(&inputs).unwrap();
        let map = analysis.to_flat_map();

        assert_eq!(map.len(), 15 + 14 + 7);
        assert_eq!(map["loan_amount"].as_decimal(), Some(dec!(262500)));
    }

    #[test]
    fn test_invalid_inputs_propagate() {
        let inputs = DealInputs::builder()
            .down_payment_percent(dec!(120))
            .build_unchecked();
        let err = analyze(&inputs).unwrap_err();
        assert!(err.names_field("down_payment_percent"));
    }
}
