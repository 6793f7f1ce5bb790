//! Date helpers: Robinhood ISO dates (YYYY-MM-DD) <-> Mint dates (MM/DD/YYYY).
//!
//! Conversions are plain string transforms. Only `parse_mint_date` does calendar
//! validation, since the date filter needs real ordering.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed date '{input}': {reason}")]
pub struct MalformedDateError {
    pub input: String,
    pub reason: String,
}

impl MalformedDateError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Split `s` on `sep` into exactly three non-empty, all-digit segments.
fn three_segments<'a>(s: &'a str, sep: char) -> Result<[&'a str; 3], MalformedDateError> {
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 {
        return Err(MalformedDateError::new(
            s,
            format!("expected 3 '{sep}'-separated segments, found {}", parts.len()),
        ));
    }
    for p in &parts {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedDateError::new(s, format!("segment '{p}' is not numeric")));
        }
    }
    Ok([parts[0], parts[1], parts[2]])
}

/// Convert "YYYY-MM-DD" (optionally "YYYY-MM-DDThh:mm:ss...") into "MM/DD/YYYY".
pub fn iso_to_mint(iso: &str) -> Result<String, MalformedDateError> {
    let trimmed = iso.trim();
    let date_part = trimmed
        .split_once('T')
        .map(|(date, _)| date)
        .unwrap_or(trimmed);
    let [y, m, d] = three_segments(date_part, '-').map_err(|e| MalformedDateError {
        input: iso.to_string(),
        reason: e.reason,
    })?;
    Ok(format!("{m}/{d}/{y}"))
}

/// Convert "MM/DD/YYYY" back into "YYYY-MM-DD".
pub fn mint_to_iso(mint: &str) -> Result<String, MalformedDateError> {
    let [m, d, y] = three_segments(mint.trim(), '/')?;
    Ok(format!("{y}-{m}-{d}"))
}

/// Parse a Mint date into a calendar date.
pub fn parse_mint_date(mint: &str) -> Result<NaiveDate, MalformedDateError> {
    let [m, d, y] = three_segments(mint.trim(), '/')?;
    let parse = |seg: &str| -> Result<u32, MalformedDateError> {
        seg.parse()
            .map_err(|_| MalformedDateError::new(mint, format!("segment '{seg}' out of range")))
    };
    let year = i32::try_from(parse(y)?)
        .map_err(|_| MalformedDateError::new(mint, "year out of range"))?;
    NaiveDate::from_ymd_opt(year, parse(m)?, parse(d)?)
        .ok_or_else(|| MalformedDateError::new(mint, "not a calendar date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_iso_to_mint_plain_date() {
        assert_eq!(iso_to_mint("2017-05-18").unwrap(), "05/18/2017");
    }

    #[test]
    fn test_iso_to_mint_drops_time() {
        assert_eq!(iso_to_mint("2020-01-15T00:00:00").unwrap(), "01/15/2020");
        assert_eq!(
            iso_to_mint("2018-08-10T15:32:11.123000Z").unwrap(),
            "08/10/2018"
        );
    }

    #[test]
    fn test_wrong_segment_count_is_rejected() {
        let err = iso_to_mint("2017-05").unwrap_err();
        assert_eq!(err.input, "2017-05");
        assert!(err.reason.contains("found 2"), "{}", err.reason);

        assert!(iso_to_mint("2017-05-18-01").is_err());
        assert!(iso_to_mint("").is_err());
        assert!(mint_to_iso("05/18").is_err());
    }

    #[test]
    fn test_non_numeric_segment_is_rejected() {
        assert!(iso_to_mint("2017-May-18").is_err());
        assert!(parse_mint_date("05//2017").is_err());
    }

    #[test]
    fn test_parse_mint_date_validates_calendar() {
        assert_eq!(
            parse_mint_date("05/18/2017").unwrap(),
            NaiveDate::from_ymd_opt(2017, 5, 18).unwrap()
        );
        assert!(parse_mint_date("02/30/2017").is_err());
        assert!(parse_mint_date("13/01/2017").is_err());
    }

    #[test]
    fn test_error_message_is_readable() {
        let err = iso_to_mint("yesterday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed date 'yesterday': expected 3 '-'-separated segments, found 1"
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip_preserves_calendar_date(
            y in 1900i32..2100,
            m in 1u32..=12,
            d in 1u32..=28,
        ) {
            let iso = format!("{y:04}-{m:02}-{d:02}");
            let mint = iso_to_mint(&iso).unwrap();
            prop_assert_eq!(mint_to_iso(&mint).unwrap(), iso);
            prop_assert_eq!(
                parse_mint_date(&mint).unwrap(),
                NaiveDate::from_ymd_opt(y, m, d).unwrap()
            );
        }
    }
}
