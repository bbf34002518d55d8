//! Order-level discount allocation

use bigdecimal::BigDecimal;

use crate::types::ResolvedLine;
use crate::utils::validation::bounded;

/// Spreads a header discount across lines in proportion to their
/// pre-discount totals
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountAllocator;

impl DiscountAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Share of `header_discount` each line receives, in line order.
    ///
    /// The shares always sum to the (clamped) discount exactly: the last line
    /// with a positive total absorbs whatever the proportional split leaves.
    /// The discount is clamped to `[0, sum(item_total)]`; a full discount
    /// zeroes every line.
    pub fn allocations(&self, lines: &[ResolvedLine], header_discount: &BigDecimal) -> Vec<BigDecimal> {
        let zero = BigDecimal::from(0);
        let total_before_discount: BigDecimal = lines.iter().map(|line| &line.item_total).sum();

        if total_before_discount <= zero {
            return vec![zero; lines.len()];
        }

        let discount = bounded(header_discount, &total_before_discount, "header_discount");
        if discount == total_before_discount {
            return lines.iter().map(|line| line.item_total.clone()).collect();
        }

        let remainder_index = lines.iter().rposition(|line| line.item_total > zero);

        let mut allocated = BigDecimal::from(0);
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let share = if Some(index) == remainder_index {
                    &discount - &allocated
                } else if line.item_total > zero {
                    (&line.item_total * &discount) / &total_before_discount
                } else {
                    BigDecimal::from(0)
                };
                allocated += &share;
                share
            })
            .collect()
    }

    /// Apply the header discount, replacing any per-line discount.
    pub fn allocate(&self, lines: &[ResolvedLine], header_discount: &BigDecimal) -> Vec<ResolvedLine> {
        let shares = self.allocations(lines, header_discount);
        tracing::debug!(
            lines = lines.len(),
            header_discount = %header_discount,
            "allocating header discount"
        );

        lines
            .iter()
            .zip(shares)
            .map(|(line, share)| line.with_discount_amount(share))
            .collect()
    }
}
