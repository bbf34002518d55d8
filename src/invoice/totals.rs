//! Invoice totals and the HSN-wise tax summary

use bigdecimal::BigDecimal;
use std::collections::BTreeMap;

use crate::types::*;
use crate::utils::number::round_currency;
use crate::utils::validation::non_negative;

/// Sums resolved lines and their tax splits into [`InvoiceTotals`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceTotalsReconciler;

impl InvoiceTotalsReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate at full precision.
    ///
    /// `splits[i]` must be the tax split of `lines[i]`. Negative shipping or
    /// paid amounts are clamped to zero; overpayment shows up as a negative
    /// balance.
    pub fn reconcile(
        &self,
        lines: &[ResolvedLine],
        splits: &[TaxSplit],
        shipping_charges: &BigDecimal,
        paid_amount: &BigDecimal,
    ) -> InvoiceResult<InvoiceTotals> {
        if lines.len() != splits.len() {
            return Err(InvoiceError::SplitCountMismatch {
                lines: lines.len(),
                splits: splits.len(),
            });
        }

        let mut rows: BTreeMap<&str, TaxSummaryRow> = BTreeMap::new();
        let mut total_row = TaxSummaryRow::empty(None);
        let mut total_discount = BigDecimal::from(0);

        for (line, split) in lines.iter().zip(splits) {
            split.validate()?;

            rows.entry(line.hsn_code.as_str())
                .or_insert_with(|| TaxSummaryRow::empty(Some(line.hsn_code.clone())))
                .accumulate(line, split);
            total_row.accumulate(line, split);
            total_discount += &line.discount_amount;
        }

        let shipping_charges = non_negative(shipping_charges, "shipping_charges");
        let paid_amount = non_negative(paid_amount, "paid_amount");

        let sub_total = total_row.taxable_amount.clone();
        let total_tax = total_row.total_tax.clone();
        let grand_total = &sub_total + &total_tax + &shipping_charges;
        let balance = &grand_total - &paid_amount;

        Ok(InvoiceTotals {
            sub_total,
            total_discount,
            total_cgst: total_row.cgst_amount.clone(),
            total_sgst: total_row.sgst_amount.clone(),
            total_igst: total_row.igst_amount.clone(),
            total_tax,
            shipping_charges,
            grand_total,
            paid_amount,
            balance,
            tax_summary: TaxSummary {
                rows: rows.into_values().collect(),
                total: total_row,
            },
        })
    }
}

impl TaxSummaryRow {
    fn rounded(&self, scale: i64) -> Self {
        Self {
            hsn_code: self.hsn_code.clone(),
            taxable_amount: round_currency(&self.taxable_amount, scale),
            cgst_amount: round_currency(&self.cgst_amount, scale),
            sgst_amount: round_currency(&self.sgst_amount, scale),
            igst_amount: round_currency(&self.igst_amount, scale),
            total_tax: round_currency(&self.total_tax, scale),
        }
    }
}

impl InvoiceTotals {
    /// Copy with every amount rounded to `scale` places for display.
    ///
    /// Rounding is applied to each stored figure independently, so the
    /// rounded copy is for presentation only; identities hold on `self`.
    pub fn rounded(&self, scale: i64) -> Self {
        Self {
            sub_total: round_currency(&self.sub_total, scale),
            total_discount: round_currency(&self.total_discount, scale),
            total_cgst: round_currency(&self.total_cgst, scale),
            total_sgst: round_currency(&self.total_sgst, scale),
            total_igst: round_currency(&self.total_igst, scale),
            total_tax: round_currency(&self.total_tax, scale),
            shipping_charges: round_currency(&self.shipping_charges, scale),
            grand_total: round_currency(&self.grand_total, scale),
            paid_amount: round_currency(&self.paid_amount, scale),
            balance: round_currency(&self.balance, scale),
            tax_summary: TaxSummary {
                rows: self
                    .tax_summary
                    .rows
                    .iter()
                    .map(|row| row.rounded(scale))
                    .collect(),
                total: self.tax_summary.total.rounded(scale),
            },
        }
    }

    /// Check the defining identities of the totals.
    ///
    /// Useful when totals are read back from storage before a reprint.
    pub fn is_reconciled(&self) -> bool {
        let summary = &self.tax_summary;
        let row_taxable: BigDecimal = summary.rows.iter().map(|row| &row.taxable_amount).sum();
        let row_tax: BigDecimal = summary.rows.iter().map(|row| &row.total_tax).sum();

        self.grand_total == &self.sub_total + &self.total_tax + &self.shipping_charges
            && self.balance == &self.grand_total - &self.paid_amount
            && self.total_tax == &self.total_cgst + &self.total_sgst + &self.total_igst
            && summary.total.taxable_amount == self.sub_total
            && summary.total.total_tax == self.total_tax
            && row_taxable == self.sub_total
            && row_tax == self.total_tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::LineItemResolver;
    use crate::tax::TaxEngine;
    use std::str::FromStr;

    fn dec(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    fn resolved(items: &[LineItem], inter_state: bool) -> (Vec<ResolvedLine>, Vec<TaxSplit>) {
        let resolver = LineItemResolver::new();
        let engine = TaxEngine::new();
        let lines: Vec<ResolvedLine> = items.iter().map(|item| resolver.resolve(item)).collect();
        let splits = lines
            .iter()
            .map(|line| engine.compute_tax(&line.taxable_amount, &line.tax_rate, inter_state))
            .collect();
        (lines, splits)
    }

    #[test]
    fn test_zero_cart() {
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&[], &[], &dec("0"), &dec("0"))
            .unwrap();
        assert_eq!(totals.sub_total, dec("0"));
        assert_eq!(totals.total_tax, dec("0"));
        assert_eq!(totals.grand_total, dec("0"));
        assert_eq!(totals.balance, dec("0"));
        assert!(totals.tax_summary.rows.is_empty());
        assert!(totals.is_reconciled());
    }

    #[test]
    fn test_intra_state_totals() {
        let items = [LineItem::new(dec("1000"), dec("2"), dec("18")).with_hsn_code("8471")];
        let (lines, splits) = resolved(&items, false);
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&lines, &splits, &dec("0"), &dec("0"))
            .unwrap();

        assert_eq!(totals.sub_total, dec("2000"));
        assert_eq!(totals.total_cgst, dec("180"));
        assert_eq!(totals.total_sgst, dec("180"));
        assert_eq!(totals.total_igst, dec("0"));
        assert_eq!(totals.grand_total, dec("2360"));
        assert_eq!(totals.balance, dec("2360"));
    }

    #[test]
    fn test_summary_grouped_by_hsn() {
        let items = [
            LineItem::new(dec("100"), dec("1"), dec("18")).with_hsn_code("9403"),
            LineItem::new(dec("50"), dec("2"), dec("5")).with_hsn_code("1006"),
            LineItem::new(dec("200"), dec("1"), dec("18")).with_hsn_code("9403"),
        ];
        let (lines, splits) = resolved(&items, true);
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&lines, &splits, &dec("40"), &dec("100"))
            .unwrap();

        let rows = &totals.tax_summary.rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hsn_code.as_deref(), Some("1006"));
        assert_eq!(rows[0].taxable_amount, dec("100"));
        assert_eq!(rows[0].igst_amount, dec("5"));
        assert_eq!(rows[1].hsn_code.as_deref(), Some("9403"));
        assert_eq!(rows[1].taxable_amount, dec("300"));
        assert_eq!(rows[1].igst_amount, dec("54"));
        assert_eq!(totals.tax_summary.total.hsn_code, None);
        assert_eq!(totals.tax_summary.total.total_tax, dec("59"));

        assert_eq!(totals.grand_total, dec("499"));
        assert_eq!(totals.balance, dec("399"));
        assert!(totals.is_reconciled());
    }

    #[test]
    fn test_overpayment_gives_negative_balance() {
        let items = [LineItem::new(dec("100"), dec("1"), dec("0"))];
        let (lines, splits) = resolved(&items, false);
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&lines, &splits, &dec("0"), &dec("150"))
            .unwrap();
        assert_eq!(totals.balance, dec("-50"));
    }

    #[test]
    fn test_negative_shipping_and_paid_are_clamped() {
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&[], &[], &dec("-10"), &dec("-5"))
            .unwrap();
        assert_eq!(totals.shipping_charges, dec("0"));
        assert_eq!(totals.paid_amount, dec("0"));
        assert_eq!(totals.balance, dec("0"));
    }

    #[test]
    fn test_split_count_mismatch() {
        let items = [LineItem::new(dec("100"), dec("1"), dec("18"))];
        let (lines, _) = resolved(&items, false);
        let result = InvoiceTotalsReconciler::new().reconcile(&lines, &[], &dec("0"), &dec("0"));
        assert!(matches!(
            result,
            Err(InvoiceError::SplitCountMismatch { lines: 1, splits: 0 })
        ));
    }

    #[test]
    fn test_inconsistent_split_is_rejected() {
        let items = [LineItem::new(dec("100"), dec("1"), dec("18"))];
        let (lines, _) = resolved(&items, false);
        let bad = TaxSplit {
            igst: dec("0"),
            cgst: dec("10"),
            sgst: dec("8"),
            total: dec("18"),
        };
        let result = InvoiceTotalsReconciler::new().reconcile(&lines, &[bad], &dec("0"), &dec("0"));
        assert!(matches!(result, Err(InvoiceError::Gst(_))));
    }

    #[test]
    fn test_rounding_only_at_presentation() {
        // 3 x 33.335 @ 5%: per-line rounding would drift, aggregate does not
        let items: Vec<LineItem> = (0..3)
            .map(|_| LineItem::new(dec("33.335"), dec("1"), dec("5")))
            .collect();
        let (lines, splits) = resolved(&items, false);
        let totals = InvoiceTotalsReconciler::new()
            .reconcile(&lines, &splits, &dec("0"), &dec("0"))
            .unwrap();

        assert_eq!(totals.sub_total, dec("100.005"));
        assert_eq!(totals.total_tax, dec("5.00025"));

        let shown = totals.rounded(2);
        assert_eq!(shown.sub_total, dec("100.01"));
        assert_eq!(shown.total_tax, dec("5.00"));
        assert_eq!(shown.grand_total, dec("105.01"));
        assert_eq!(shown.tax_summary.total.cgst_amount, dec("2.50"));
    }
}
