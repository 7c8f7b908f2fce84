use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Parse a `YYYY-MM-DD` date, treating empty or malformed values as absent.
///
/// The catalog reports unknown dates as `""` rather than omitting the field.
pub fn parse_lenient(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Stored rows sometimes carry a full timestamp
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_lenient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("2021-03-04"), NaiveDate::from_ymd_opt(2021, 3, 4));
        assert_eq!(parse_lenient("2021-03-04T10:00:00Z"), NaiveDate::from_ymd_opt(2021, 3, 4));
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("soon"), None);
    }
}
