// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project configuration validator.
//!
//! Validation is a single pass over an untyped JSON document. Structural checks
//! (presence, primitive shapes, enum tags) and cross-field business rules all
//! append to the same violation list, so callers get every problem at once.
//! A typed [`ProjectConfig`] is only returned when the list is empty.
//!
//! Cross-field rules:
//!
//! - round `start` must precede `end` (violation at `start`)
//! - round `hardCap >= minBuy` (violation at `hardCap`)
//! - round `maxBuy >= minBuy` (violation at `maxBuy`)
//! - `totalSupply` must be a finite number above zero (violation at `totalSupply`)
//! - allocation percentages must sum to at most 100 (violation at `allocations`)
//!
//! Numeric comparisons only fire when both sides parse as finite numbers.

use crate::domain::errors::{PathSegment, ValidationError, Violation};
use crate::domain::project::{
    Allocation, Compliance, Currency, Links, NumericValue, ProjectConfig, RoadmapItem,
    RoadmapStatus, Round, RoundKind, Rounds, Tokenomics,
};
use crate::domain::Slug;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Validates and canonicalizes raw project documents.
///
/// The validator is stateless; every call to [`validate`](Self::validate) runs
/// an independent pass.
///
/// # Examples
///
/// ```
/// use sale_factory::domain::ConfigValidator;
/// use sale_factory::domain::demo::demo_document;
///
/// let config = ConfigValidator::validate(&demo_document()).unwrap();
/// assert_eq!(config.slug.as_str(), "atlas-chain");
/// assert_eq!(config.ticker, "ATLAS");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates `raw` against the full project schema.
    ///
    /// On success the returned record has its slug lower-cased and its ticker
    /// upper-cased. On failure the error carries every violation found.
    pub fn validate(raw: &Value) -> Result<ProjectConfig, ValidationError> {
        let mut pass = Pass::default();
        let config = pass.project(raw);

        match config {
            Some(config) if pass.violations.is_empty() => Ok(config),
            _ => {
                if pass.violations.is_empty() {
                    // A subtree failed without reporting; never hand back a partial record.
                    pass.report(&[], "Invalid input");
                }
                Err(ValidationError {
                    violations: pass.violations,
                })
            }
        }
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// Parses a round timestamp.
///
/// Accepts RFC 3339 and RFC 2822, ISO-like date-times without an offset
/// (minute or second precision, read as UTC), and bare dates such as
/// `2024-05-01` or `May 1, 2024` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

type Path = [PathSegment];

fn child(path: &Path, segment: impl Into<PathSegment>) -> Vec<PathSegment> {
    let mut next = path.to_vec();
    next.push(segment.into());
    next
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(kind: &str, actual: &Value) -> String {
    format!("Expected {}, received {}", kind, type_name(actual))
}

/// Accumulator for one validation call.
#[derive(Default)]
struct Pass {
    violations: Vec<Violation>,
}

impl Pass {
    fn report(&mut self, path: &Path, message: impl Into<String>) {
        self.violations.push(Violation::new(path.to_vec(), message));
    }

    fn object<'v>(&mut self, value: Option<&'v Value>, path: &Path) -> Option<&'v Map<String, Value>> {
        match value {
            None => {
                self.report(path, "Required");
                None
            }
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                self.report(path, expected("object", other));
                None
            }
        }
    }

    fn array<'v>(&mut self, obj: &'v Map<String, Value>, key: &str, path: &Path) -> Option<&'v Vec<Value>> {
        let path = child(path, key);
        match obj.get(key) {
            None => {
                self.report(&path, "Required");
                None
            }
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                self.report(&path, expected("array", other));
                None
            }
        }
    }

    /// Validates every element of `items`; `None` if any element failed.
    fn each<T>(
        &mut self,
        items: &[Value],
        path: &Path,
        mut element: impl FnMut(&mut Self, &Value, &Path) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            match element(self, item, &child(path, index)) {
                Some(value) => parsed.push(value),
                None => complete = false,
            }
        }
        complete.then_some(parsed)
    }

    fn string(&mut self, obj: &Map<String, Value>, key: &str, path: &Path) -> Option<String> {
        let path = child(path, key);
        match obj.get(key) {
            None => {
                self.report(&path, "Required");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.report(&path, expected("string", other));
                None
            }
        }
    }

    /// `Some(None)` when absent, `None` when present with the wrong type.
    fn optional_string(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &Path,
    ) -> Option<Option<String>> {
        match obj.get(key) {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.report(&child(path, key), expected("string", other));
                None
            }
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, key: &str, path: &Path) -> Option<bool> {
        let path = child(path, key);
        match obj.get(key) {
            None => {
                self.report(&path, "Required");
                None
            }
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.report(&path, expected("boolean", other));
                None
            }
        }
    }

    fn number(&mut self, obj: &Map<String, Value>, key: &str, path: &Path) -> Option<serde_json::Number> {
        let path = child(path, key);
        match obj.get(key) {
            None => {
                self.report(&path, "Required");
                None
            }
            Some(Value::Number(n)) => Some(n.clone()),
            Some(other) => {
                self.report(&path, expected("number", other));
                None
            }
        }
    }

    fn numeric(&mut self, obj: &Map<String, Value>, key: &str, path: &Path) -> Option<NumericValue> {
        let path = child(path, key);
        match obj.get(key) {
            None => {
                self.report(&path, "Required");
                None
            }
            Some(Value::Number(n)) => Some(NumericValue::Number(n.clone())),
            Some(Value::String(s)) => Some(NumericValue::Text(s.clone())),
            Some(other) => {
                self.report(&path, expected("string or number", other));
                None
            }
        }
    }

    fn tag<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &Path,
        tags: &[&str],
        from_tag: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.string(obj, key, path)?;
        let parsed = from_tag(&raw);
        if parsed.is_none() {
            let options = tags
                .iter()
                .map(|t| format!("'{}'", t))
                .collect::<Vec<_>>()
                .join(" | ");
            self.report(
                &child(path, key),
                format!("Invalid enum value. Expected {}, received '{}'", options, raw),
            );
        }
        parsed
    }

    fn project(&mut self, raw: &Value) -> Option<ProjectConfig> {
        let root: &Path = &[];
        let obj = self.object(Some(raw), root)?;

        let name = self.string(obj, "name", root);
        let slug = self.slug(obj);
        let ticker = self.string(obj, "ticker", root).map(|t| t.to_uppercase());
        let chain_target = self.string(obj, "chainTarget", root);
        let theme = self.string(obj, "theme", root);
        let one_liner = self.string(obj, "oneLiner", root);
        let description = self.string(obj, "description", root);
        let value_prop = self.optional_string(obj, "valueProp", root);

        let roadmap_path = child(root, "roadmap");
        let roadmap = self
            .array(obj, "roadmap", root)
            .and_then(|items| self.each(items, &roadmap_path, Self::roadmap_item));

        let tokenomics_path = child(root, "tokenomics");
        let tokenomics = self
            .object(obj.get("tokenomics"), &tokenomics_path)
            .and_then(|t| self.tokenomics(t, &tokenomics_path));

        let rounds_path = child(root, "rounds");
        let rounds = self
            .object(obj.get("rounds"), &rounds_path)
            .and_then(|r| self.rounds(r, &rounds_path));

        let compliance_path = child(root, "compliance");
        let compliance = self
            .object(obj.get("compliance"), &compliance_path)
            .and_then(|c| self.compliance(c, &compliance_path));

        let links_path = child(root, "links");
        let links = self
            .object(obj.get("links"), &links_path)
            .and_then(|l| self.links(l, &links_path));

        let created_at = self.optional_string(obj, "createdAt", root);
        let updated_at = self.optional_string(obj, "updatedAt", root);

        Some(ProjectConfig {
            name: name?,
            slug: slug?,
            ticker: ticker?,
            chain_target: chain_target?,
            theme: theme?,
            one_liner: one_liner?,
            description: description?,
            value_prop: value_prop?,
            roadmap: roadmap?,
            tokenomics: tokenomics?,
            rounds: rounds?,
            compliance: compliance?,
            links: links?,
            created_at: created_at?,
            updated_at: updated_at?,
        })
    }

    fn slug(&mut self, obj: &Map<String, Value>) -> Option<Slug> {
        let path = [PathSegment::from("slug")];
        let Some(raw) = obj.get("slug") else {
            self.report(&path, "Required");
            return None;
        };
        match Slug::from_value(raw) {
            Ok(slug) => Some(slug),
            Err(e) => {
                self.report(&path, e.to_string());
                None
            }
        }
    }

    fn roadmap_item(&mut self, value: &Value, path: &Path) -> Option<RoadmapItem> {
        let obj = self.object(Some(value), path)?;
        let title = self.string(obj, "title", path);
        let description = self.string(obj, "description", path);
        let date_label = self.string(obj, "dateLabel", path);
        let status = self.tag(obj, "status", path, RoadmapStatus::TAGS, RoadmapStatus::from_tag);

        Some(RoadmapItem {
            title: title?,
            description: description?,
            date_label: date_label?,
            status: status?,
        })
    }

    fn allocation(&mut self, value: &Value, path: &Path) -> Option<Allocation> {
        let obj = self.object(Some(value), path)?;
        let name = self.string(obj, "name", path);
        let percent = self.number(obj, "percent", path).and_then(|n| {
            let value = n.as_f64()?;
            let percent_path = child(path, "percent");
            if value < 0.0 {
                self.report(&percent_path, "Number must be greater than or equal to 0");
                return None;
            }
            if value > 100.0 {
                self.report(&percent_path, "Number must be less than or equal to 100");
                return None;
            }
            Some(n)
        });
        let vesting = self.optional_string(obj, "vesting", path);
        let cliff = self.optional_string(obj, "cliff", path);
        let notes = self.optional_string(obj, "notes", path);

        Some(Allocation {
            name: name?,
            percent: percent?,
            vesting: vesting?,
            cliff: cliff?,
            notes: notes?,
        })
    }

    fn tokenomics(&mut self, obj: &Map<String, Value>, path: &Path) -> Option<Tokenomics> {
        let total_supply = self.string(obj, "totalSupply", path);
        let decimals = self.number(obj, "decimals", path).and_then(|n| {
            if let Some(d) = n.as_u64().and_then(|d| u32::try_from(d).ok()) {
                return Some(d);
            }
            let message = match n.as_f64() {
                Some(f) if f.fract() != 0.0 => "Expected integer, received float",
                Some(f) if f < 0.0 => "Number must be greater than or equal to 0",
                _ => "Number must be less than or equal to 4294967295",
            };
            self.report(&child(path, "decimals"), message);
            None
        });
        let max_supply = self.optional_string(obj, "maxSupply", path);
        let burn_fee_bps = match obj.get("burnFeeBps") {
            None => Some(None),
            Some(Value::Number(n)) => Some(Some(n.clone())),
            Some(other) => {
                self.report(&child(path, "burnFeeBps"), expected("number", other));
                None
            }
        };

        let allocations_path = child(path, "allocations");
        let allocations = self
            .array(obj, "allocations", path)
            .and_then(|items| self.each(items, &allocations_path, Self::allocation));

        if let Some(total_supply) = &total_supply {
            let parsed = NumericValue::Text(total_supply.clone()).as_f64();
            if !matches!(parsed, Some(supply) if supply > 0.0) {
                self.report(&child(path, "totalSupply"), "totalSupply must be greater than 0.");
            }
        }

        if let Some(allocations) = &allocations {
            if Allocation::total_percent(allocations) > 100.0 {
                self.report(
                    &allocations_path,
                    "allocations percent sum must be less than or equal to 100.",
                );
            }
        }

        Some(Tokenomics {
            total_supply: total_supply?,
            decimals: decimals?,
            max_supply: max_supply?,
            burn_fee_bps: burn_fee_bps?,
            allocations: allocations?,
        })
    }

    fn rounds(&mut self, obj: &Map<String, Value>, path: &Path) -> Option<Rounds> {
        let pre_path = child(path, "preSales");
        let pre_sales = self
            .array(obj, "preSales", path)
            .and_then(|items| self.each(items, &pre_path, Self::round));

        let public_path = child(path, "publicSales");
        let public_sales = self
            .array(obj, "publicSales", path)
            .and_then(|items| self.each(items, &public_path, Self::round));

        Some(Rounds {
            pre_sales: pre_sales?,
            public_sales: public_sales?,
        })
    }

    fn round(&mut self, value: &Value, path: &Path) -> Option<Round> {
        let obj = self.object(Some(value), path)?;
        let id = self.string(obj, "id", path);
        let name = self.string(obj, "name", path);
        let kind = self.tag(obj, "kind", path, RoundKind::TAGS, RoundKind::from_tag);
        let start = self.string(obj, "start", path);
        let end = self.string(obj, "end", path);
        let price = self.numeric(obj, "price", path);
        let hard_cap = self.numeric(obj, "hardCap", path);
        let min_buy = self.numeric(obj, "minBuy", path);
        let max_buy = self.numeric(obj, "maxBuy", path);
        let accepted_currency =
            self.tag(obj, "acceptedCurrency", path, Currency::TAGS, Currency::from_tag);
        let whitelist_enabled = self.boolean(obj, "whitelistEnabled", path);
        let vesting_enabled = self.boolean(obj, "vestingEnabled", path);

        if let (Some(start), Some(end)) = (&start, &end) {
            if let (Some(opens), Some(closes)) = (parse_timestamp(start), parse_timestamp(end)) {
                if opens >= closes {
                    self.report(&child(path, "start"), "Round start must be before end.");
                }
            }
        }

        let min = min_buy.as_ref().and_then(NumericValue::as_f64);
        if let (Some(cap), Some(min)) = (hard_cap.as_ref().and_then(NumericValue::as_f64), min) {
            if cap < min {
                self.report(
                    &child(path, "hardCap"),
                    "hardCap must be greater than or equal to minBuy.",
                );
            }
        }
        if let (Some(max), Some(min)) = (max_buy.as_ref().and_then(NumericValue::as_f64), min) {
            if max < min {
                self.report(
                    &child(path, "maxBuy"),
                    "maxBuy must be greater than or equal to minBuy.",
                );
            }
        }

        Some(Round {
            id: id?,
            name: name?,
            kind: kind?,
            start: start?,
            end: end?,
            price: price?,
            hard_cap: hard_cap?,
            min_buy: min_buy?,
            max_buy: max_buy?,
            accepted_currency: accepted_currency?,
            whitelist_enabled: whitelist_enabled?,
            vesting_enabled: vesting_enabled?,
        })
    }

    fn compliance(&mut self, obj: &Map<String, Value>, path: &Path) -> Option<Compliance> {
        let kyc_required = self.boolean(obj, "kycRequired", path);
        let geo_path = child(path, "geoRestrictions");
        let geo_restrictions = self
            .array(obj, "geoRestrictions", path)
            .and_then(|items| {
                self.each(items, &geo_path, |pass, item, item_path| match item {
                    Value::String(code) => Some(code.clone()),
                    other => {
                        pass.report(item_path, expected("string", other));
                        None
                    }
                })
            });
        let disclaimer = self.string(obj, "disclaimer", path);

        Some(Compliance {
            kyc_required: kyc_required?,
            geo_restrictions: geo_restrictions?,
            disclaimer: disclaimer?,
        })
    }

    fn links(&mut self, obj: &Map<String, Value>, path: &Path) -> Option<Links> {
        let website = self.optional_string(obj, "website", path);
        let whitepaper = self.optional_string(obj, "whitepaper", path);
        let docs = self.optional_string(obj, "docs", path);
        let twitter = self.optional_string(obj, "twitter", path);
        let telegram = self.optional_string(obj, "telegram", path);
        let discord = self.optional_string(obj, "discord", path);

        Some(Links {
            website: website?,
            whitepaper: whitepaper?,
            docs: docs?,
            twitter: twitter?,
            telegram: telegram?,
            discord: discord?,
        })
    }
}
