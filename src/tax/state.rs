//! GST state codes and inter-state classification
//!
//! States are exchanged as `"NN-StateName"` strings (for example
//! `"27-Maharashtra"`). Only the leading code takes part in classification;
//! the name is informational.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::TaxType;

/// GST state and union territory codes as printed on GSTINs
const STATE_NAMES: &[(&str, &str)] = &[
    ("01", "Jammu and Kashmir"),
    ("02", "Himachal Pradesh"),
    ("03", "Punjab"),
    ("04", "Chandigarh"),
    ("05", "Uttarakhand"),
    ("06", "Haryana"),
    ("07", "Delhi"),
    ("08", "Rajasthan"),
    ("09", "Uttar Pradesh"),
    ("10", "Bihar"),
    ("11", "Sikkim"),
    ("12", "Arunachal Pradesh"),
    ("13", "Nagaland"),
    ("14", "Manipur"),
    ("15", "Mizoram"),
    ("16", "Tripura"),
    ("17", "Meghalaya"),
    ("18", "Assam"),
    ("19", "West Bengal"),
    ("20", "Jharkhand"),
    ("21", "Odisha"),
    ("22", "Chhattisgarh"),
    ("23", "Madhya Pradesh"),
    ("24", "Gujarat"),
    ("25", "Daman and Diu"),
    ("26", "Dadra and Nagar Haveli and Daman and Diu"),
    ("27", "Maharashtra"),
    ("28", "Andhra Pradesh (Old)"),
    ("29", "Karnataka"),
    ("30", "Goa"),
    ("31", "Lakshadweep"),
    ("32", "Kerala"),
    ("33", "Tamil Nadu"),
    ("34", "Puducherry"),
    ("35", "Andaman and Nicobar Islands"),
    ("36", "Telangana"),
    ("37", "Andhra Pradesh"),
    ("38", "Ladakh"),
    ("97", "Other Territory"),
    ("99", "Centre Jurisdiction"),
];

/// The code part of a `"NN-StateName"` string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCode(String);

impl StateCode {
    /// Extract the state code, or `None` when there is nothing to extract.
    ///
    /// Never fails on malformed input: a string without a `-` separator is
    /// taken whole as the code. A single-digit numeric code is zero-padded
    /// so that `"6-Haryana"` and `"06-Haryana"` agree.
    pub fn parse(raw: &str) -> Option<Self> {
        let code = match raw.split_once('-') {
            Some((code, _)) => code,
            None => raw,
        }
        .trim();

        if code.is_empty() {
            return None;
        }

        if code.len() == 1 && code.chars().all(|c| c.is_ascii_digit()) {
            return Some(Self(format!("0{code}")));
        }

        Some(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the state or union territory, if the code is known
    pub fn name(&self) -> Option<&'static str> {
        STATE_NAMES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}-{}", self.0, name),
            None => f.write_str(&self.0),
        }
    }
}

/// Decides between IGST and CGST+SGST for a sale
///
/// Holds the seller's registered state, which is configuration rather than a
/// built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxTypeClassifier {
    seller_state: Option<StateCode>,
}

impl TaxTypeClassifier {
    /// Create a classifier for a seller registered in `seller_state`
    pub fn new(seller_state: &str) -> Self {
        let seller_state = StateCode::parse(seller_state);
        if seller_state.is_none() {
            tracing::warn!("seller state not configured; every sale will be intra-state");
        }
        Self { seller_state }
    }

    pub fn seller_state(&self) -> Option<&StateCode> {
        self.seller_state.as_ref()
    }

    /// Classify a sale to a buyer in `buyer_state`
    pub fn classify_buyer(&self, buyer_state: &str) -> TaxType {
        match (&self.seller_state, StateCode::parse(buyer_state)) {
            (Some(seller), Some(buyer)) => classify_codes(seller, &buyer),
            _ => TaxType::CgstSgst,
        }
    }
}

/// Classify a sale given both `"NN-StateName"` strings.
///
/// A missing code on either side falls back to CGST+SGST.
pub fn classify(seller_state: &str, buyer_state: &str) -> TaxType {
    match (StateCode::parse(seller_state), StateCode::parse(buyer_state)) {
        (Some(seller), Some(buyer)) => classify_codes(&seller, &buyer),
        _ => TaxType::CgstSgst,
    }
}

fn classify_codes(seller: &StateCode, buyer: &StateCode) -> TaxType {
    if seller == buyer {
        TaxType::CgstSgst
    } else {
        TaxType::Igst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_strings() {
        assert_eq!(StateCode::parse("27-Maharashtra").unwrap().as_str(), "27");
        assert_eq!(StateCode::parse(" 06 - Haryana ").unwrap().as_str(), "06");
        assert_eq!(StateCode::parse("6-Haryana").unwrap().as_str(), "06");
        assert_eq!(StateCode::parse("29").unwrap().as_str(), "29");
        assert_eq!(StateCode::parse("Karnataka").unwrap().as_str(), "Karnataka");
        assert_eq!(StateCode::parse(""), None);
        assert_eq!(StateCode::parse("   "), None);
        assert_eq!(StateCode::parse("-Goa"), None);
    }

    #[test]
    fn test_state_names() {
        let code = StateCode::parse("33").unwrap();
        assert_eq!(code.name(), Some("Tamil Nadu"));
        assert_eq!(code.to_string(), "33-Tamil Nadu");

        let unknown = StateCode::parse("XX-Nowhere").unwrap();
        assert_eq!(unknown.name(), None);
        assert_eq!(unknown.to_string(), "XX");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("27-Maharashtra", "27-Maharashtra"), TaxType::CgstSgst);
        assert_eq!(classify("27-Maharashtra", "06-Haryana"), TaxType::Igst);
        assert_eq!(classify("27-Maharashtra", ""), TaxType::CgstSgst);
        assert_eq!(classify("", "06-Haryana"), TaxType::CgstSgst);
        assert_eq!(classify("27", "27-Maharashtra"), TaxType::CgstSgst);
        assert_eq!(classify("Maharashtra", "Haryana"), TaxType::Igst);
    }

    #[test]
    fn test_classifier_uses_configured_seller() {
        let classifier = TaxTypeClassifier::new("27-Maharashtra");
        assert_eq!(classifier.seller_state().unwrap().as_str(), "27");
        assert_eq!(classifier.classify_buyer("27-Maharashtra"), TaxType::CgstSgst);
        assert_eq!(classifier.classify_buyer("07-Delhi"), TaxType::Igst);
        assert_eq!(classifier.classify_buyer(""), TaxType::CgstSgst);
    }

    #[test]
    fn test_unconfigured_classifier_is_intra_state() {
        let classifier = TaxTypeClassifier::default();
        assert_eq!(classifier.classify_buyer("07-Delhi"), TaxType::CgstSgst);
    }
}
