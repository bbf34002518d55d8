//! Invoice creation payload as sent by the billing screens

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::lenient;

/// Business-to-business or business-to-consumer sale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingType {
    #[serde(rename = "B2B", alias = "b2b")]
    B2b,
    #[default]
    #[serde(rename = "B2C", alias = "b2c")]
    B2c,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Upi,
    Card,
    #[serde(alias = "banktransfer", alias = "bank_transfer")]
    Bank,
    Credit,
    #[serde(other)]
    Other,
}

/// Buyer details relevant to tax computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    /// Buyer state as `"NN-StateName"`
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
}

/// Everything needed to compute an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Header discount amount
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub discount: BigDecimal,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub shipping_charges: BigDecimal,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub paid_amount: BigDecimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub billing_type: BillingType,
}

impl InvoiceRequest {
    pub fn new(customer: Customer, items: Vec<LineItem>) -> Self {
        Self {
            customer,
            items,
            ..Self::default()
        }
    }

    /// Parse a request from the JSON body of an invoice-creation call
    pub fn from_json_str(raw: &str) -> InvoiceResult<Self> {
        serde_json::from_str(raw).map_err(|e| InvoiceError::InvalidPayload(e.to_string()))
    }

    pub fn with_discount(mut self, discount: BigDecimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_shipping_charges(mut self, shipping_charges: BigDecimal) -> Self {
        self.shipping_charges = shipping_charges;
        self
    }

    pub fn with_paid_amount(mut self, paid_amount: BigDecimal) -> Self {
        self.paid_amount = paid_amount;
        self
    }

    /// Buyer state, empty when unknown
    pub fn buyer_state(&self) -> &str {
        self.customer.state.as_deref().unwrap_or_default()
    }

    /// Business rules checked when an invoice is submitted.
    ///
    /// Live previews skip this; an empty cart simply totals to zero there.
    pub fn validate_for_submission(&self) -> InvoiceResult<()> {
        if self.items.is_empty() {
            return Err(InvoiceError::EmptyCart);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_payload() {
        let request = InvoiceRequest::from_json_str(
            r#"{
                "customer": { "name": "Acme Traders", "state": "06-Haryana", "gstin": "06AAAAA0000A1Z5" },
                "items": [ { "rate": 1000, "quantity": 2, "taxRate": 18, "hsnCode": "8471" } ],
                "discount": "",
                "shippingCharges": "50",
                "paidAmount": null,
                "paymentMethod": "upi",
                "billingType": "B2B"
            }"#,
        )
        .unwrap();

        assert_eq!(request.customer.name, "Acme Traders");
        assert_eq!(request.buyer_state(), "06-Haryana");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.discount, BigDecimal::from(0));
        assert_eq!(request.shipping_charges, BigDecimal::from(50));
        assert_eq!(request.paid_amount, BigDecimal::from(0));
        assert_eq!(request.payment_method, PaymentMethod::Upi);
        assert_eq!(request.billing_type, BillingType::B2b);
    }

    #[test]
    fn test_minimal_payload_defaults() {
        let request = InvoiceRequest::from_json_str("{}").unwrap();
        assert!(request.items.is_empty());
        assert_eq!(request.buyer_state(), "");
        assert_eq!(request.payment_method, PaymentMethod::Cash);
        assert_eq!(request.billing_type, BillingType::B2c);
    }

    #[test]
    fn test_unknown_payment_method() {
        let request = InvoiceRequest::from_json_str(r#"{ "paymentMethod": "cheque" }"#).unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Other);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            InvoiceRequest::from_json_str("{ items: oops"),
            Err(InvoiceError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_submission_requires_items() {
        let empty = InvoiceRequest::default();
        assert!(matches!(
            empty.validate_for_submission(),
            Err(InvoiceError::EmptyCart)
        ));

        let request = InvoiceRequest::new(
            Customer::default(),
            vec![LineItem::new(
                BigDecimal::from(10),
                BigDecimal::from(1),
                BigDecimal::from(0),
            )],
        );
        assert!(request.validate_for_submission().is_ok());
    }
}
