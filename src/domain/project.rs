// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project configuration record types.
//!
//! These are the canonical, typed forms produced by the validator and stored by
//! the record store. Field names serialize in camelCase so the stored JSON
//! matches what clients send.

use crate::domain::Slug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a roadmap milestone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoadmapStatus {
    /// Not started.
    Planned,
    /// Under way.
    InProgress,
    /// Finished.
    Done,
}

impl RoadmapStatus {
    /// The literal tags accepted on input.
    pub const TAGS: &'static [&'static str] = &["PLANNED", "IN_PROGRESS", "DONE"];

    /// Parses a literal tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PLANNED" => Some(RoadmapStatus::Planned),
            "IN_PROGRESS" => Some(RoadmapStatus::InProgress),
            "DONE" => Some(RoadmapStatus::Done),
            _ => None,
        }
    }
}

/// Whether a round is a presale or a public sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundKind {
    /// Private or whitelisted sale ahead of the public round.
    Presale,
    /// Open sale.
    Public,
}

impl RoundKind {
    /// The literal tags accepted on input.
    pub const TAGS: &'static [&'static str] = &["PRESALE", "PUBLIC"];

    /// Parses a literal tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PRESALE" => Some(RoundKind::Presale),
            "PUBLIC" => Some(RoundKind::Public),
            _ => None,
        }
    }
}

/// Currency a round accepts payment in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Ether.
    Eth,
    /// Tether USD.
    Usdt,
    /// USD Coin.
    Usdc,
}

impl Currency {
    /// The literal tags accepted on input.
    pub const TAGS: &'static [&'static str] = &["ETH", "USDT", "USDC"];

    /// Parses a literal tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ETH" => Some(Currency::Eth),
            "USDT" => Some(Currency::Usdt),
            "USDC" => Some(Currency::Usdc),
            _ => None,
        }
    }
}

/// A value accepted either as a JSON string or a JSON number.
///
/// The original representation is kept so a stored record serializes back to
/// exactly what was submitted.
///
/// # Examples
///
/// ```
/// use sale_factory::domain::NumericValue;
///
/// let price = NumericValue::from("0.015");
/// assert_eq!(price.as_f64(), Some(0.015));
///
/// let cap = NumericValue::from(1_500_000u64);
/// assert_eq!(cap.as_f64(), Some(1_500_000.0));
///
/// assert_eq!(NumericValue::from("TBD").as_f64(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// A JSON number.
    Number(serde_json::Number),
    /// A string that may or may not hold a number.
    Text(String),
}

impl NumericValue {
    /// Returns the value as a finite `f64`, or `None` if it does not parse.
    ///
    /// Strings are trimmed first; a blank string counts as zero.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericValue::Number(n) => n.as_f64()?,
            NumericValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
        };
        value.is_finite().then_some(value)
    }
}

impl From<&str> for NumericValue {
    fn from(s: &str) -> Self {
        NumericValue::Text(s.to_string())
    }
}

impl From<String> for NumericValue {
    fn from(s: String) -> Self {
        NumericValue::Text(s)
    }
}

impl From<u64> for NumericValue {
    fn from(n: u64) -> Self {
        NumericValue::Number(n.into())
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Number(n) => write!(f, "{}", n),
            NumericValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A roadmap milestone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    /// Short milestone title.
    pub title: String,
    /// What the milestone delivers.
    pub description: String,
    /// Free-form date label such as `Q3 2024`.
    pub date_label: String,
    /// Current progress.
    pub status: RoadmapStatus,
}

/// A named share of the total supply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    /// Allocation bucket name.
    pub name: String,
    /// Share of total supply, 0 to 100, as submitted.
    pub percent: serde_json::Number,
    /// Vesting schedule label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting: Option<String>,
    /// Cliff label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliff: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Supply and distribution of the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokenomics {
    /// Total supply as a decimal string.
    pub total_supply: String,
    /// Token decimals.
    pub decimals: u32,
    /// Maximum supply as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_supply: Option<String>,
    /// Burn fee in basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_fee_bps: Option<serde_json::Number>,
    /// Distribution buckets in display order.
    pub allocations: Vec<Allocation>,
}

impl Allocation {
    /// Sums the percentages of `allocations`.
    pub fn total_percent(allocations: &[Allocation]) -> f64 {
        allocations
            .iter()
            .filter_map(|a| a.percent.as_f64())
            .sum()
    }
}

impl Tokenomics {
    /// Sum of all allocation percentages.
    pub fn allocated_percent(&self) -> f64 {
        Allocation::total_percent(&self.allocations)
    }
}

/// A time-boxed sale window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Client-generated round identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Presale or public.
    pub kind: RoundKind,
    /// Opening timestamp.
    pub start: String,
    /// Closing timestamp.
    pub end: String,
    /// Token price.
    pub price: NumericValue,
    /// Maximum raise.
    pub hard_cap: NumericValue,
    /// Smallest accepted purchase.
    pub min_buy: NumericValue,
    /// Largest accepted purchase.
    pub max_buy: NumericValue,
    /// Payment currency.
    pub accepted_currency: Currency,
    /// Whether buyers must be whitelisted.
    pub whitelist_enabled: bool,
    /// Whether purchased tokens vest.
    pub vesting_enabled: bool,
}

/// Presale and public rounds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rounds {
    /// Presale rounds in order.
    pub pre_sales: Vec<Round>,
    /// Public rounds in order.
    pub public_sales: Vec<Round>,
}

/// Regulatory settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    /// Whether buyers must pass KYC.
    pub kyc_required: bool,
    /// Country codes excluded from the sale.
    pub geo_restrictions: Vec<String>,
    /// Legal disclaimer text.
    pub disclaimer: String,
}

/// External links.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitepaper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

/// A complete project configuration record.
///
/// Values of this type are only produced by the validator or read back from
/// storage, so `slug` is always normalized and `ticker` always upper-case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Project display name.
    pub name: String,
    /// Record identifier.
    pub slug: Slug,
    /// Upper-case ticker symbol.
    pub ticker: String,
    /// Target chain name.
    pub chain_target: String,
    /// UI theme tag.
    pub theme: String,
    /// One sentence pitch.
    pub one_liner: String,
    /// Long description.
    pub description: String,
    /// Value proposition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_prop: Option<String>,
    /// Milestones in display order.
    pub roadmap: Vec<RoadmapItem>,
    /// Supply and distribution.
    pub tokenomics: Tokenomics,
    /// Sale rounds.
    pub rounds: Rounds,
    /// Regulatory settings.
    pub compliance: Compliance,
    /// External links.
    pub links: Links,
    /// When the record was first stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// When the record was last stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The listing view of a stored record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Record identifier.
    pub slug: Slug,
    /// Project display name.
    pub name: String,
    /// When the record was last stored.
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_value_parses_strings() {
        assert_eq!(NumericValue::from("250").as_f64(), Some(250.0));
        assert_eq!(NumericValue::from(" 1e3 ").as_f64(), Some(1000.0));
        assert_eq!(NumericValue::from("").as_f64(), Some(0.0));
        assert_eq!(NumericValue::from("abc").as_f64(), None);
    }

    #[test]
    fn test_numeric_value_rejects_non_finite() {
        assert_eq!(NumericValue::from("inf").as_f64(), None);
        assert_eq!(NumericValue::from("NaN").as_f64(), None);
    }

    #[test]
    fn test_numeric_value_keeps_representation() {
        let text: NumericValue = serde_json::from_value(json!("0.03")).unwrap();
        let number: NumericValue = serde_json::from_value(json!(6000000)).unwrap();
        assert!(matches!(text, NumericValue::Text(_)));
        assert!(matches!(number, NumericValue::Number(_)));
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("0.03"));
        assert_eq!(serde_json::to_value(&number).unwrap(), json!(6000000));
    }

    #[test]
    fn test_enum_tags_round_trip() {
        assert_eq!(
            serde_json::to_value(RoadmapStatus::InProgress).unwrap(),
            json!("IN_PROGRESS")
        );
        assert_eq!(serde_json::to_value(RoundKind::Presale).unwrap(), json!("PRESALE"));
        assert_eq!(serde_json::to_value(Currency::Usdc).unwrap(), json!("USDC"));
        for tag in RoadmapStatus::TAGS {
            let status = RoadmapStatus::from_tag(tag).unwrap();
            assert_eq!(serde_json::to_value(status).unwrap(), json!(tag));
        }
        assert_eq!(Currency::from_tag("BTC"), None);
    }

    #[test]
    fn test_allocated_percent() {
        let tokenomics = Tokenomics {
            total_supply: "1000".to_string(),
            decimals: 18,
            max_supply: None,
            burn_fee_bps: None,
            allocations: vec![
                Allocation {
                    name: "Team".to_string(),
                    percent: serde_json::Number::from(20u64),
                    vesting: None,
                    cliff: None,
                    notes: None,
                },
                Allocation {
                    name: "Community".to_string(),
                    percent: serde_json::Number::from_f64(45.5).unwrap(),
                    vesting: Some("24 months".to_string()),
                    cliff: None,
                    notes: None,
                },
            ],
        };
        assert_eq!(tokenomics.allocated_percent(), 65.5);
    }

    #[test]
    fn test_allocation_percent_keeps_representation() {
        let allocation: Allocation =
            serde_json::from_value(json!({ "name": "Team", "percent": 45 })).unwrap();
        assert_eq!(serde_json::to_value(&allocation).unwrap()["percent"], json!(45));

        let allocation: Allocation =
            serde_json::from_value(json!({ "name": "Team", "percent": 12.5 })).unwrap();
        assert_eq!(serde_json::to_value(&allocation).unwrap()["percent"], json!(12.5));
    }

    #[test]
    fn test_links_omit_absent_fields() {
        let links = Links {
            website: Some("https://example.org".to_string()),
            ..Links::default()
        };
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({ "website": "https://example.org" })
        );
    }
}
