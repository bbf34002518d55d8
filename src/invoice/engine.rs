//! Invoice engine that runs the full computation pipeline
//!
//! Classification, line resolution, discount allocation, tax splitting and
//! reconciliation always run in that order. The engine is the single entry
//! point for the API, the PDF renderer and the live preview, so all three see
//! identical figures for identical carts.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::{DiscountMode, EngineConfig};
use crate::invoice::{
    BillingType, DiscountAllocator, InvoiceRequest, InvoiceTotalsReconciler, LineItemResolver,
};
use crate::tax::{TaxEngine, TaxTypeClassifier};
use crate::types::*;

/// Result of computing one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedInvoice {
    pub tax_type: TaxType,
    pub lines: Vec<ResolvedLine>,
    pub splits: Vec<TaxSplit>,
    /// Full-precision totals; this is what gets persisted
    pub totals: InvoiceTotals,
    /// `totals` rounded to the configured currency scale for display
    pub display_totals: InvoiceTotals,
}

/// Pure invoice computation pipeline
#[derive(Debug, Clone)]
pub struct InvoiceEngine {
    config: EngineConfig,
    classifier: TaxTypeClassifier,
    resolver: LineItemResolver,
    allocator: DiscountAllocator,
    tax_engine: TaxEngine,
    reconciler: InvoiceTotalsReconciler,
}

impl InvoiceEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> InvoiceResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: TaxTypeClassifier::new(&config.seller_state),
            resolver: LineItemResolver::new(),
            allocator: DiscountAllocator::new(),
            tax_engine: TaxEngine::new(),
            reconciler: InvoiceTotalsReconciler::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify a sale to `buyer_state` from this engine's seller
    pub fn tax_type_for(&self, buyer_state: &str) -> TaxType {
        self.classifier.classify_buyer(buyer_state)
    }

    /// Compute an invoice.
    ///
    /// Never fails on bad numbers; an empty cart computes to all zeros.
    pub fn compute(&self, request: &InvoiceRequest) -> InvoiceResult<ComputedInvoice> {
        let tax_type = self.tax_type_for(request.buyer_state());

        if request.billing_type == BillingType::B2b && request.buyer_state().trim().is_empty() {
            tracing::warn!(
                customer = %request.customer.name,
                "B2B invoice without buyer state; treating as intra-state"
            );
        }

        let lines = self.resolve_lines(&request.items, &request.discount);

        let splits: Vec<TaxSplit> = lines
            .iter()
            .map(|line| {
                self.tax_engine
                    .compute_for(&line.taxable_amount, &line.tax_rate, tax_type)
            })
            .collect();

        let totals = self.reconciler.reconcile(
            &lines,
            &splits,
            &request.shipping_charges,
            &request.paid_amount,
        )?;
        let display_totals = totals.rounded(self.config.currency_scale);

        tracing::debug!(
            lines = lines.len(),
            tax_type = ?tax_type,
            discount_mode = ?self.config.discount_mode,
            grand_total = %display_totals.grand_total,
            "computed invoice"
        );

        Ok(ComputedInvoice {
            tax_type,
            lines,
            splits,
            totals,
            display_totals,
        })
    }

    /// Parse a JSON invoice payload and compute it
    pub fn compute_json(&self, payload: &str) -> InvoiceResult<ComputedInvoice> {
        let request = InvoiceRequest::from_json_str(payload)?;
        self.compute(&request)
    }

    fn resolve_lines(&self, items: &[LineItem], header_discount: &BigDecimal) -> Vec<ResolvedLine> {
        let zero = BigDecimal::from(0);

        match self.config.discount_mode {
            DiscountMode::PerLine => {
                if *header_discount != zero {
                    tracing::warn!(
                        header_discount = %header_discount,
                        "header discount ignored in per-line discount mode"
                    );
                }
                items.iter().map(|item| self.resolver.resolve(item)).collect()
            }
            DiscountMode::OrderLevel => {
                if items.iter().any(|item| item.discount_percent != zero) {
                    tracing::warn!("line discounts ignored in order-level discount mode");
                }
                let gross: Vec<ResolvedLine> = items
                    .iter()
                    .map(|item| self.resolver.resolve_gross(item))
                    .collect();
                self.allocator.allocate(&gross, header_discount)
            }
        }
    }
}
