//! Conversion of untyped tool arguments into typed parameter structs.
//!
//! Every failure here is an [`Error::InvalidArgument`].

use google_kit_core::{Error, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Deserialize tool arguments. Missing or `null` arguments count as `{}`.
pub(crate) fn parse<T: DeserializeOwned>(arguments: Option<Value>) -> Result<T> {
    let value = match arguments {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    };
    serde_json::from_value(value).map_err(|e| Error::invalid_argument(e.to_string()))
}

/// Reject an empty or whitespace-only required identifier.
pub(crate) fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}

/// Treat an empty string like an absent value.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept any JSON number that is a whole, non-negative `u32`.
pub(crate) fn count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(n) if n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n) => Ok(Some(n as u32)),
        Some(n) => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        id: String,
        #[serde(default, deserialize_with = "count")]
        limit: Option<u32>,
        #[serde(default)]
        verbose: bool,
    }

    #[test]
    fn test_parse_missing_required_field() {
        let err = parse::<Sample>(Some(json!({"limit": 5}))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("missing field `id`")));
    }

    #[test]
    fn test_parse_null_arguments_as_empty_object() {
        let err = parse::<Sample>(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_wrong_type() {
        let err = parse::<Sample>(Some(json!({"id": 7}))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_count_accepts_float_and_integer() {
        let sample: Sample = parse(Some(json!({"id": "a", "limit": 25.0}))).unwrap();
        assert_eq!(sample.limit, Some(25));
        let sample: Sample = parse(Some(json!({"id": "a", "limit": 3}))).unwrap();
        assert_eq!(sample.limit, Some(3));
        let sample: Sample = parse(Some(json!({"id": "a", "limit": null}))).unwrap();
        assert_eq!(sample.limit, None);
        assert!(!sample.verbose);
    }

    #[test]
    fn test_count_rejects_fraction_and_negative() {
        assert!(parse::<Sample>(Some(json!({"id": "a", "limit": 2.5}))).is_err());
        assert!(parse::<Sample>(Some(json!({"id": "a", "limit": -1}))).is_err());
        assert!(parse::<Sample>(Some(json!({"id": "a", "limit": "10"}))).is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(" f1 ", "filter_id").unwrap(), "f1");
        let err = non_empty("  ", "filter_id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: filter_id cannot be empty");
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(
            comma_list(" a@x.com, ,b@x.com ,"),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
        assert!(comma_list("").is_empty());
    }
}
