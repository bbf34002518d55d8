//! Line item resolution: tax extraction, per-line discount and line totals

use bigdecimal::BigDecimal;

use crate::tax::{GstSlab, TaxEngine};
use crate::types::*;
use crate::utils::validation::{non_negative, percentage};

/// Turns entered cart lines into [`ResolvedLine`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemResolver {
    tax_engine: TaxEngine,
}

impl LineItemResolver {
    pub fn new() -> Self {
        Self {
            tax_engine: TaxEngine::new(),
        }
    }

    /// Resolve a line, applying its own `discount_percent`
    pub fn resolve(&self, item: &LineItem) -> ResolvedLine {
        self.resolve_line(item, true)
    }

    /// Resolve a line ignoring its `discount_percent`.
    ///
    /// Used when the discount comes from the invoice header instead.
    pub fn resolve_gross(&self, item: &LineItem) -> ResolvedLine {
        self.resolve_line(item, false)
    }

    fn resolve_line(&self, item: &LineItem, apply_line_discount: bool) -> ResolvedLine {
        let hundred = BigDecimal::from(100);
        let rate = non_negative(&item.rate, "rate");
        let quantity = non_negative(&item.quantity, "quantity");
        let tax_rate = non_negative(&item.tax_rate, "tax_rate");
        let discount_percent = if apply_line_discount {
            percentage(&item.discount_percent, "discount_percent")
        } else {
            BigDecimal::from(0)
        };

        if GstSlab::from_rate(&tax_rate).is_none() {
            tracing::debug!(tax_rate = %tax_rate, hsn_code = %item.hsn_code, "non-standard GST rate");
        }

        let unit_taxable = match item.price_type {
            PriceType::Inclusive => self.tax_engine.exclusive_of_tax(&rate, &tax_rate),
            PriceType::Exclusive => rate.clone(),
        };

        let item_total = &unit_taxable * &quantity;
        let discount_amount = (&item_total * &discount_percent) / &hundred;
        let taxable_amount = &item_total - &discount_amount;
        let tax_amount = self.tax_engine.tax_on(&taxable_amount, &tax_rate);

        let line_total = match item.price_type {
            // Tax is already embedded in the entered rate
            PriceType::Inclusive => {
                let gross = &rate * &quantity;
                &gross - (&gross * &discount_percent) / &hundred
            }
            PriceType::Exclusive => &taxable_amount + &tax_amount,
        };

        ResolvedLine {
            description: item.description.clone(),
            hsn_code: item.hsn_code.clone(),
            rate,
            quantity,
            tax_rate,
            price_type: item.price_type,
            unit_taxable,
            item_total,
            discount_amount,
            taxable_amount,
            tax_amount,
            line_total,
        }
    }
}

impl ResolvedLine {
    /// Same line with `discount_amount` replacing whatever discount it had.
    ///
    /// Taxable amount, tax and line total are recomputed from `item_total`.
    pub fn with_discount_amount(&self, discount_amount: BigDecimal) -> ResolvedLine {
        let taxable_amount = &self.item_total - &discount_amount;
        let tax_amount = TaxEngine::new().tax_on(&taxable_amount, &self.tax_rate);
        let line_total = &taxable_amount + &tax_amount;

        ResolvedLine {
            discount_amount,
            taxable_amount,
            tax_amount,
            line_total,
            ..self.clone()
        }
    }
}
