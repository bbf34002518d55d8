//! Core types and data structures for invoice computation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::lenient;

/// Whether the entered rate already contains tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Rate is before tax; tax is added on top
    #[default]
    Exclusive,
    /// Rate already contains tax; tax is carved out of it
    Inclusive,
}

impl From<&str> for PriceType {
    /// Case-insensitive; anything other than "inclusive" is exclusive.
    fn from(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("inclusive") {
            PriceType::Inclusive
        } else {
            PriceType::Exclusive
        }
    }
}

/// How tax is levied on a sale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// Inter-state supply: Integrated GST only
    #[serde(rename = "IGST")]
    Igst,
    /// Intra-state supply: Central GST and State GST in equal halves
    #[default]
    #[serde(rename = "CGST_SGST")]
    CgstSgst,
}

impl TaxType {
    pub fn is_inter_state(&self) -> bool {
        matches!(self, TaxType::Igst)
    }
}

/// A cart line as entered at billing time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Free text carried through to the resolved line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HSN/SAC classification code, used only for grouping
    #[serde(default, alias = "hsn", deserialize_with = "lenient::string_or_empty")]
    pub hsn_code: String,
    /// Unit price as entered
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub rate: BigDecimal,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub quantity: BigDecimal,
    /// GST percentage (e.g. 18 for 18%)
    #[serde(
        default,
        alias = "taxSlab",
        deserialize_with = "lenient::number_or_zero"
    )]
    pub tax_rate: BigDecimal,
    /// Per-line discount percentage
    #[serde(
        default,
        alias = "discount",
        deserialize_with = "lenient::number_or_zero"
    )]
    pub discount_percent: BigDecimal,
    #[serde(default, deserialize_with = "lenient::price_type")]
    pub price_type: PriceType,
}

impl LineItem {
    /// Create a tax-exclusive line without discount
    pub fn new(rate: BigDecimal, quantity: BigDecimal, tax_rate: BigDecimal) -> Self {
        Self {
            description: None,
            hsn_code: String::new(),
            rate,
            quantity,
            tax_rate,
            discount_percent: BigDecimal::from(0),
            price_type: PriceType::Exclusive,
        }
    }

    pub fn with_hsn_code(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = hsn_code.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_discount_percent(mut self, discount_percent: BigDecimal) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }

    /// Mark the rate as tax-inclusive
    pub fn inclusive(self) -> Self {
        self.with_price_type(PriceType::Inclusive)
    }
}

/// A line after tax extraction and discounting
///
/// Amounts are kept at full precision; nothing here is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hsn_code: String,
    /// Entered rate (after input normalization)
    pub rate: BigDecimal,
    pub quantity: BigDecimal,
    pub tax_rate: BigDecimal,
    pub price_type: PriceType,
    /// Unit rate with any embedded tax removed
    pub unit_taxable: BigDecimal,
    /// `unit_taxable * quantity`, before any discount
    pub item_total: BigDecimal,
    /// Discount taken off `item_total`, per-line or allocated from the header
    pub discount_amount: BigDecimal,
    pub taxable_amount: BigDecimal,
    pub tax_amount: BigDecimal,
    /// Amount shown on the invoice line
    pub line_total: BigDecimal,
}

/// Tax on one line, split by levy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub igst: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub total: BigDecimal,
}

impl TaxSplit {
    pub fn zero() -> Self {
        Self {
            igst: BigDecimal::from(0),
            cgst: BigDecimal::from(0),
            sgst: BigDecimal::from(0),
            total: BigDecimal::from(0),
        }
    }
}

/// One row of the HSN-wise tax summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummaryRow {
    /// HSN code, or `None` for the grand-total row
    pub hsn_code: Option<String>,
    pub taxable_amount: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_amount: BigDecimal,
    pub total_tax: BigDecimal,
}

impl TaxSummaryRow {
    pub fn empty(hsn_code: Option<String>) -> Self {
        Self {
            hsn_code,
            taxable_amount: BigDecimal::from(0),
            cgst_amount: BigDecimal::from(0),
            sgst_amount: BigDecimal::from(0),
            igst_amount: BigDecimal::from(0),
            total_tax: BigDecimal::from(0),
        }
    }

    /// Fold a line and its tax split into this row
    pub fn accumulate(&mut self, line: &ResolvedLine, split: &TaxSplit) {
        self.taxable_amount += &line.taxable_amount;
        self.cgst_amount += &split.cgst;
        self.sgst_amount += &split.sgst;
        self.igst_amount += &split.igst;
        self.total_tax += &split.total;
    }
}

/// HSN-wise tax summary printed under the line table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    /// One row per distinct HSN code, ordered by code
    pub rows: Vec<TaxSummaryRow>,
    pub total: TaxSummaryRow,
}

/// Final figures of an invoice; the only part that gets persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of taxable amounts
    pub sub_total: BigDecimal,
    /// Sum of discounts already deducted from `sub_total`
    pub total_discount: BigDecimal,
    pub total_cgst: BigDecimal,
    pub total_sgst: BigDecimal,
    pub total_igst: BigDecimal,
    pub total_tax: BigDecimal,
    pub shipping_charges: BigDecimal,
    /// `sub_total + total_tax + shipping_charges`
    pub grand_total: BigDecimal,
    pub paid_amount: BigDecimal,
    /// `grand_total - paid_amount`; negative on overpayment
    pub balance: BigDecimal,
    pub tax_summary: TaxSummary,
}

/// Errors raised at the boundaries of the engine
///
/// The arithmetic itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Invalid invoice payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("Invoice must contain at least one item")]
    EmptyCart,
    #[error("Got {splits} tax splits for {lines} lines")]
    SplitCountMismatch { lines: usize, splits: usize },
    #[error("Tax split error: {0}")]
    Gst(#[from] crate::tax::gst::GstError),
}

/// Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_price_type_from_str() {
        assert_eq!(PriceType::from("Inclusive"), PriceType::Inclusive);
        assert_eq!(PriceType::from(" inclusive "), PriceType::Inclusive);
        assert_eq!(PriceType::from("exclusive"), PriceType::Exclusive);
        assert_eq!(PriceType::from("whatever"), PriceType::Exclusive);
    }

    #[test]
    fn test_line_item_from_ui_payload() {
        let item: LineItem = serde_json::from_value(json!({
            "description": "Steel almirah",
            "hsn": 9403,
            "rate": "1180",
            "quantity": 2,
            "taxSlab": 18,
            "discount": "",
            "priceType": "Inclusive"
        }))
        .unwrap();

        assert_eq!(item.hsn_code, "9403");
        assert_eq!(item.rate, BigDecimal::from(1180));
        assert_eq!(item.quantity, BigDecimal::from(2));
        assert_eq!(item.tax_rate, BigDecimal::from(18));
        assert_eq!(item.discount_percent, BigDecimal::from(0));
        assert_eq!(item.price_type, PriceType::Inclusive);
    }

    #[test]
    fn test_line_item_with_missing_fields() {
        let item: LineItem = serde_json::from_value(json!({ "rate": 10.5 })).unwrap();
        assert_eq!(item.rate, BigDecimal::from_str("10.5").unwrap());
        assert_eq!(item.quantity, BigDecimal::from(0));
        assert_eq!(item.tax_rate, BigDecimal::from(0));
        assert_eq!(item.price_type, PriceType::Exclusive);
        assert!(item.hsn_code.is_empty());
    }

    #[test]
    fn test_tax_type_wire_names() {
        assert_eq!(serde_json::to_value(TaxType::Igst).unwrap(), json!("IGST"));
        assert_eq!(
            serde_json::to_value(TaxType::CgstSgst).unwrap(),
            json!("CGST_SGST")
        );
        assert!(TaxType::Igst.is_inter_state());
        assert!(!TaxType::CgstSgst.is_inter_state());
    }

    #[test]
    fn test_line_item_builder() {
        let item = LineItem::new(BigDecimal::from(118), BigDecimal::from(1), BigDecimal::from(18))
            .with_hsn_code("8471")
            .with_description("Keyboard")
            .with_discount_percent(BigDecimal::from(5))
            .inclusive();

        assert_eq!(item.hsn_code, "8471");
        assert_eq!(item.description.as_deref(), Some("Keyboard"));
        assert_eq!(item.discount_percent, BigDecimal::from(5));
        assert_eq!(item.price_type, PriceType::Inclusive);
    }
}
