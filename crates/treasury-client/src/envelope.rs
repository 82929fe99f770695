//! Response envelope parsing
//!
//! Every Fiscal Data endpoint answers with the same shape: a `data` array of
//! flat objects, a `meta` block with counts, and pagination `links`. Field
//! values are almost always JSON strings, and missing values are sent as the
//! literal string `"null"`.

use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

/// Pagination counts reported alongside the data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Meta {
    /// Rows in this response
    #[serde(default)]
    pub count: Option<u64>,
    /// Rows matching the query across all pages
    #[serde(default, rename = "total-count")]
    pub total_count: Option<u64>,
    /// Pages available at the requested page size
    #[serde(default, rename = "total-pages")]
    pub total_pages: Option<u64>,
}

/// Top-level response body
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// One flat object per record
    pub data: Vec<Row>,
    /// Counts, if the server sent them
    #[serde(default)]
    pub meta: Option<Meta>,
    /// Pagination links, kept raw
    #[serde(default)]
    pub links: Option<Value>,
}

impl Envelope {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|e| Error::Parse(format!("Failed to parse response envelope: {}", e)))?;

        if let Some(meta) = &envelope.meta {
            debug!(
                count = ?meta.count,
                total_count = ?meta.total_count,
                total_pages = ?meta.total_pages,
                "response meta"
            );
        }

        Ok(envelope)
    }
}

/// One record in the `data` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Field value as text, with `null`, `"null"` and `""` treated as absent
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() || s.eq_ignore_ascii_case("null") {
                    None
                } else {
                    Some(s.to_string())
                }
            }
            other => Some(other.to_string()),
        }
    }

    /// Required text field
    pub fn required_text(&self, field: &str) -> Result<String> {
        self.text(field)
            .ok_or_else(|| Error::Parse(format!("missing field `{}`", field)))
    }

    /// Required `YYYY-MM-DD` date field
    pub fn date(&self, field: &str) -> Result<NaiveDate> {
        let raw = self.required_text(field)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| Error::Parse(format!("field `{}`: invalid date {:?}: {}", field, raw, e)))
    }

    /// Optional decimal field
    pub fn decimal_opt(&self, field: &str) -> Result<Option<Decimal>> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => parse_decimal(&raw)
                .map(Some)
                .map_err(|e| Error::Parse(format!("field `{}`: {}", field, e))),
        }
    }

    /// Required decimal field
    pub fn decimal(&self, field: &str) -> Result<Decimal> {
        self.decimal_opt(field)?
            .ok_or_else(|| Error::Parse(format!("missing field `{}`", field)))
    }

    /// Optional integer field
    pub fn integer_opt<T: FromStr>(&self, field: &str) -> Result<Option<T>> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| Error::Parse(format!("field `{}`: invalid integer {:?}", field, raw))),
        }
    }

    /// Iterate over present fields as text, in key order
    pub fn fields(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0
            .keys()
            .filter_map(move |key| self.text(key).map(|value| (key.as_str(), value)))
    }
}

/// Parse an amount that may carry thousands separators
pub fn parse_decimal(raw: &str) -> std::result::Result<Decimal, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| format!("invalid decimal {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_envelope_with_meta() {
        let body = r#"{
            "data": [{"record_date": "2025-06-04"}],
            "meta": {"count": 1, "total-count": 40, "total-pages": 40},
            "links": {"self": "&page%5Bnumber%5D=1"}
        }"#;

        let envelope = Envelope::parse(body).unwrap();
        assert_eq!(envelope.data.len(), 1);
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.count, Some(1));
        assert_eq!(meta.total_count, Some(40));
        assert_eq!(meta.total_pages, Some(40));
    }

    #[test]
    fn test_parse_envelope_empty_data() {
        let envelope = Envelope::parse(r#"{"data": []}"#).unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_parse_envelope_missing_data() {
        let err = Envelope::parse(r#"{"meta": {"count": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(ref m) if m.contains("data")));
    }

    #[test]
    fn test_parse_envelope_not_json() {
        assert!(matches!(Envelope::parse("<html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_row_null_handling() {
        let r = row(serde_json::json!({
            "a": "null",
            "b": "",
            "c": null,
            "d": " 4.25 ",
            "e": 7
        }));

        assert_eq!(r.text("a"), None);
        assert_eq!(r.text("b"), None);
        assert_eq!(r.text("c"), None);
        assert_eq!(r.text("missing"), None);
        assert_eq!(r.text("d"), Some("4.25".to_string()));
        assert_eq!(r.text("e"), Some("7".to_string()));
    }

    #[test]
    fn test_row_typed_fields() {
        let r = row(serde_json::json!({
            "record_date": "2025-06-04",
            "tot_pub_debt_out_amt": "36,214,312,845,129.55",
            "record_calendar_month": "06",
            "bad_date": "06/04/2025"
        }));

        assert_eq!(r.date("record_date").unwrap(), NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(
            r.decimal("tot_pub_debt_out_amt").unwrap(),
            Decimal::from_str("36214312845129.55").unwrap()
        );
        assert_eq!(r.integer_opt::<u32>("record_calendar_month").unwrap(), Some(6));
        assert!(r.date("bad_date").is_err());
        assert!(r.decimal("missing").is_err());
        assert_eq!(r.decimal_opt("missing").unwrap(), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,234.5").unwrap(), Decimal::from_str("1234.5").unwrap());
        assert_eq!(parse_decimal("-12").unwrap(), Decimal::from(-12));
        assert!(parse_decimal("n/a").is_err());
    }
}
