//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::types::{InvoiceError, InvoiceResult};

/// Which discount mechanism an engine applies
///
/// The two mechanisms are mutually exclusive: an engine applies exactly one
/// to every invoice it computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountMode {
    /// Each line's `discount_percent` applies; the header discount is ignored.
    #[default]
    PerLine,
    /// The header discount amount is spread over lines in proportion to their
    /// pre-discount totals; per-line percentages are ignored.
    OrderLevel,
}

fn default_currency_scale() -> i64 {
    2
}

/// Configuration for [`InvoiceEngine`](crate::InvoiceEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seller's registered state as `"NN-StateName"`
    #[serde(default)]
    pub seller_state: String,
    #[serde(default)]
    pub discount_mode: DiscountMode,
    /// Decimal places used for presentation rounding
    #[serde(default = "default_currency_scale")]
    pub currency_scale: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seller_state: String::new(),
            discount_mode: DiscountMode::default(),
            currency_scale: default_currency_scale(),
        }
    }
}

impl EngineConfig {
    /// Configuration for a seller registered in `seller_state`
    pub fn for_seller(seller_state: impl Into<String>) -> Self {
        Self {
            seller_state: seller_state.into(),
            ..Self::default()
        }
    }

    pub fn with_discount_mode(mut self, discount_mode: DiscountMode) -> Self {
        self.discount_mode = discount_mode;
        self
    }

    /// Load configuration from a JSON document
    pub fn from_json_str(raw: &str) -> InvoiceResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| InvoiceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InvoiceResult<()> {
        if !(0..=6).contains(&self.currency_scale) {
            return Err(InvoiceError::InvalidConfig(format!(
                "currency scale must be between 0 and 6, got {}",
                self.currency_scale
            )));
        }
        Ok(())
    }
}
