//! GST (Goods and Services Tax) computation for Indian tax compliance

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{TaxSplit, TaxType};

/// Standard GST slabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstSlab {
    /// Essential items (fresh food, medicines, etc.) - 0%
    Exempt,
    /// Reduced rate items - 5%
    Reduced,
    /// Standard rate items - 12%
    Standard,
    /// Higher rate items - 18%
    Higher,
    /// Luxury/Sin goods - 28%
    Luxury,
}

impl GstSlab {
    pub const ALL: [GstSlab; 5] = [
        GstSlab::Exempt,
        GstSlab::Reduced,
        GstSlab::Standard,
        GstSlab::Higher,
        GstSlab::Luxury,
    ];

    /// Get the GST percentage for this slab
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstSlab::Exempt => BigDecimal::from(0),
            GstSlab::Reduced => BigDecimal::from(5),
            GstSlab::Standard => BigDecimal::from(12),
            GstSlab::Higher => BigDecimal::from(18),
            GstSlab::Luxury => BigDecimal::from(28),
        }
    }

    /// Find the slab matching a percentage, if it is a standard one
    pub fn from_rate(rate: &BigDecimal) -> Option<Self> {
        Self::ALL.into_iter().find(|slab| slab.rate() == *rate)
    }
}

/// Per-line GST calculation
///
/// Stateless: the same engine value can be shared by any number of callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxEngine;

impl TaxEngine {
    pub fn new() -> Self {
        Self
    }

    /// Tax owed on a taxable amount at a percentage rate.
    ///
    /// Built as twice the intra-state half so that CGST plus SGST equals the
    /// total exactly, even when the taxable amount carries full division
    /// precision. Zero for non-positive amounts or rates.
    pub fn tax_on(&self, taxable_amount: &BigDecimal, tax_rate_percent: &BigDecimal) -> BigDecimal {
        let half = self.half_tax_on(taxable_amount, tax_rate_percent);
        &half + &half
    }

    fn half_tax_on(&self, taxable_amount: &BigDecimal, tax_rate_percent: &BigDecimal) -> BigDecimal {
        let zero = BigDecimal::from(0);
        if *taxable_amount <= zero || *tax_rate_percent <= zero {
            return zero;
        }
        (taxable_amount * tax_rate_percent) / BigDecimal::from(200)
    }

    /// Compute and split the tax on a taxable amount.
    ///
    /// Total for every input: negative amounts or rates yield a zero split.
    pub fn compute_tax(
        &self,
        taxable_amount: &BigDecimal,
        tax_rate_percent: &BigDecimal,
        is_inter_state: bool,
    ) -> TaxSplit {
        let zero = BigDecimal::from(0);
        let half = self.half_tax_on(taxable_amount, tax_rate_percent);
        if half == zero {
            return TaxSplit::zero();
        }

        let total = &half + &half;
        if is_inter_state {
            TaxSplit {
                igst: total.clone(),
                cgst: zero.clone(),
                sgst: zero,
                total,
            }
        } else {
            TaxSplit {
                igst: zero,
                cgst: half.clone(),
                sgst: half,
                total,
            }
        }
    }

    /// Same as [`compute_tax`](Self::compute_tax) keyed by a classified tax type
    pub fn compute_for(
        &self,
        taxable_amount: &BigDecimal,
        tax_rate_percent: &BigDecimal,
        tax_type: TaxType,
    ) -> TaxSplit {
        self.compute_tax(taxable_amount, tax_rate_percent, tax_type.is_inter_state())
    }

    /// Remove tax from a tax-inclusive amount.
    ///
    /// Amounts at a zero or negative rate are returned unchanged.
    pub fn exclusive_of_tax(&self, inclusive_amount: &BigDecimal, tax_rate_percent: &BigDecimal) -> BigDecimal {
        if *tax_rate_percent <= BigDecimal::from(0) {
            return inclusive_amount.clone();
        }

        let divisor = BigDecimal::from(1) + tax_rate_percent / BigDecimal::from(100);
        inclusive_amount / divisor
    }
}

impl TaxSplit {
    /// Validate that the split is internally consistent
    pub fn validate(&self) -> Result<(), GstError> {
        let zero = BigDecimal::from(0);
        let calculated_total = &self.cgst + &self.sgst + &self.igst;

        if calculated_total != self.total {
            return Err(GstError::InvalidSplit(format!(
                "GST components don't add up to total: {} != {}",
                calculated_total, self.total
            )));
        }

        // Intra-state halves must match
        if self.cgst != self.sgst {
            return Err(GstError::InvalidSplit(format!(
                "CGST and SGST must be equal: {} != {}",
                self.cgst, self.sgst
            )));
        }

        if self.igst > zero && self.cgst > zero {
            return Err(GstError::InvalidSplit(
                "IGST cannot be combined with CGST/SGST".to_string(),
            ));
        }

        Ok(())
    }
}

/// GST-related errors
#[derive(Debug, thiserror::Error)]
pub enum GstError {
    #[error("Invalid GST split: {0}")]
    InvalidSplit(String),
}
