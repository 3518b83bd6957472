use std::fmt;

use serde::{Deserialize, Serialize};

/// Price per ton assumed for buyers paying the prevailing market rate
pub const MARKET_RATE_PRICE: f64 = 12_000.0;

/// Price per ton assumed for negotiable buyers and unreadable pricing text
pub const FALLBACK_PRICE: f64 = 10_000.0;

/// Fee per ton charged by collectors whose fee could not be read
pub const DEFAULT_COLLECTION_FEE: f64 = 5_000.0;

/// Pricing text used when a catalog entry carries none
const DEFAULT_PRICING_TEXT: &str = "₹10000-12000/ton";

/// Interpreted pricing terms of a consumer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingTerms {
    /// Buyer pays somewhere in `min..=max` per ton
    Range { min: f64, max: f64 },
    MarketRate,
    Negotiable,
    /// Collector charges the producer; `fee` is per ton
    CollectionFee { fee: Option<f64> },
    Unrecognized,
}

/// A consumer's pricing model, parsed once from its catalog text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PricingModel {
    text: String,
    terms: PricingTerms,
}

impl PricingModel {
    pub fn parse(text: &str) -> Self {
        let terms = parse_terms(text);
        if terms == PricingTerms::Unrecognized {
            tracing::warn!(
                "Unrecognized pricing model {:?}, assuming {} per ton",
                text,
                FALLBACK_PRICE
            );
        }

        Self {
            text: text.to_string(),
            terms,
        }
    }

    pub fn terms(&self) -> PricingTerms {
        self.terms
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Price per ton; negative when the producer pays to have material collected
    pub fn price_per_ton(&self) -> f64 {
        match self.terms {
            PricingTerms::Range { min, max } => (min + max) / 2.0,
            PricingTerms::MarketRate => MARKET_RATE_PRICE,
            PricingTerms::Negotiable => FALLBACK_PRICE,
            PricingTerms::CollectionFee { fee } => -fee.unwrap_or(DEFAULT_COLLECTION_FEE),
            PricingTerms::Unrecognized => FALLBACK_PRICE,
        }
    }
}

fn parse_terms(text: &str) -> PricingTerms {
    let cleaned = text.replace(['₹', ','], "");
    let cleaned = cleaned.trim();
    let lower = cleaned.to_lowercase();

    // Checked before ranges: "Collection_Fee: 2000-3000" also contains a dash
    if lower.contains("collection_fee") || lower.contains("collection fee") {
        let fee = cleaned
            .split(':')
            .nth(1)
            .and_then(|rest| rest.split('-').next())
            .and_then(|amount| amount.trim().parse::<f64>().ok());
        return PricingTerms::CollectionFee { fee };
    }

    if cleaned.contains('-') {
        return parse_range(cleaned).unwrap_or(PricingTerms::Unrecognized);
    }

    if lower.contains("market_rate") || lower.contains("market rate") {
        return PricingTerms::MarketRate;
    }

    if lower.contains("negotiable") {
        return PricingTerms::Negotiable;
    }

    PricingTerms::Unrecognized
}

/// Parses `low-high/ton`
fn parse_range(cleaned: &str) -> Option<PricingTerms> {
    let mut parts = cleaned.split('-');
    let min = parts.next()?.trim().parse::<f64>().ok()?;
    let max = parts
        .next()?
        .split('/')
        .next()?
        .trim()
        .parse::<f64>()
        .ok()?;

    Some(PricingTerms::Range { min, max })
}

impl Default for PricingModel {
    fn default() -> Self {
        Self::parse(DEFAULT_PRICING_TEXT)
    }
}

impl From<String> for PricingModel {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&str> for PricingModel {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<PricingModel> for String {
    fn from(model: PricingModel) -> Self {
        model.text
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
