//! Turns one row of the daily price file into a [`StationRecord`].
//!
//! Rows are headerless: `longitude, latitude, composite`. The composite field
//! is the free-text description with the price glued onto its tail at a fixed
//! width: two separator characters followed by a five-character price token
//! using a decimal comma, e.g. `"Station A  1,459"`. Older files put a
//! two-character unit after the token instead (`"Station A 1,459 €"`); that
//! layout is tried when the trailing token is not a number.

use crate::stations::error::ParseRowError;
use crate::types::coordinate::Coordinate;
use crate::types::station::StationRecord;
use std::borrow::Cow;

/// Shortest composite field that still leaves room for a price block.
pub const MIN_COMPOSITE_LEN: usize = 8;
const PRICE_BLOCK_LEN: usize = 7;
const PRICE_TOKEN_LEN: usize = 5;

/// Parses the fields of one row into a station with a distance of `0.0`.
///
/// Extra fields after the third are ignored. A price token that is not a
/// number yields a record without a price rather than an error.
///
/// # Examples
///
/// ```
/// use gasofa::parse_row;
///
/// let station = parse_row(&["-3.0", "40.01", "Station A  1,459"]).unwrap();
/// assert_eq!(station.description(), "Station A");
/// assert_eq!(station.price(), Some(1.459));
/// assert_eq!(station.latitude(), 40.01);
///
/// assert!(parse_row(&["-3.0", "40.01"]).is_err());
/// assert!(parse_row(&["-3.0", "40.01", "1,459"]).is_err());
/// ```
pub fn parse_row<S: AsRef<str>>(fields: &[S]) -> Result<StationRecord, ParseRowError> {
    let [longitude, latitude, composite, ..] = fields else {
        return Err(ParseRowError::TooFewFields {
            found: fields.len(),
        });
    };
    let longitude = parse_number("longitude", longitude.as_ref())?;
    let latitude = parse_number("latitude", latitude.as_ref())?;
    let position = Coordinate::new(latitude, longitude).map_err(|_| {
        ParseRowError::CoordinateOutOfRange {
            latitude,
            longitude,
        }
    })?;

    let (description, price) = split_description_and_price(composite.as_ref())?;
    Ok(StationRecord::new(position, price, description))
}

/// Decodes a raw csv field. The publisher has shipped both UTF-8 and
/// ISO-8859-1 files, and every byte sequence is valid ISO-8859-1.
pub(crate) fn decode_field(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ParseRowError> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ParseRowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn split_description_and_price(composite: &str) -> Result<(String, Option<f64>), ParseRowError> {
    let chars: Vec<char> = composite.chars().collect();
    let len = chars.len();
    if len < MIN_COMPOSITE_LEN {
        return Err(ParseRowError::FieldTooShort {
            length: len,
            minimum: MIN_COMPOSITE_LEN,
        });
    }
    let block_start = len - PRICE_BLOCK_LEN;
    let text = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();

    if let Some(price) = parse_price(&text(len - PRICE_TOKEN_LEN..len)) {
        return Ok((text(0..block_start).trim().to_string(), Some(price)));
    }

    // Unit-suffixed layout: separator, token, then two unit characters.
    let token = text(block_start..block_start + PRICE_TOKEN_LEN);
    if let Some(price) = parse_price(&token) {
        return Ok((text(0..block_start - 1).trim().to_string(), Some(price)));
    }

    Ok((text(0..block_start).trim().to_string(), None))
}

/// Accepts only the exact `d,ddd` (or `d.ddd`) shape, so a token that is
/// shifted by padding or a stray trailing space yields no price at all.
fn parse_price(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == PRICE_TOKEN_LEN
        && bytes[0].is_ascii_digit()
        && matches!(bytes[1], b',' | b'.')
        && bytes[2..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return None;
    }
    token.replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_row_layout() {
        let station = parse_row(&["-3.0", "40.01", "Station A  1,459"]).unwrap();

        assert_eq!(station.longitude(), -3.0);
        assert_eq!(station.latitude(), 40.01);
        assert_eq!(station.description(), "Station A");
        assert_eq!(station.price(), Some(1.459));
        assert_eq!(station.distance_km(), 0.0);
    }

    #[test]
    fn description_and_price_round_trip() {
        let cases = [
            ("REPSOL C/ MAYOR 3 L-D: 24H", "1,389"),
            ("CEPSA", "0,999"),
            ("GALP AVDA. DE ANDALUCÍA Ñ", "1,602"),
            ("X", "2,000"),
        ];
        for (description, price) in cases {
            let composite = format!("{}  {}", description, price);
            let station = parse_row(&["-3.7", "40.4", composite.as_str()]).unwrap();
            assert_eq!(station.description(), description);
            assert_eq!(
                station.price(),
                Some(price.replace(',', ".").parse::<f64>().unwrap())
            );
        }
    }

    #[test]
    fn unit_suffixed_layout_is_recognised() {
        let station = parse_row(&["-3.7", "40.4", "SHELL NORTE 1,389 €"]).unwrap();
        assert_eq!(station.description(), "SHELL NORTE");
        assert_eq!(station.price(), Some(1.389));
    }

    #[test]
    fn non_numeric_price_token_leaves_price_empty() {
        let station = parse_row(&["-3.7", "40.4", "BP AEROPUERTO  n/d  "]).unwrap();
        assert_eq!(station.price(), None);
        assert_eq!(station.description(), "BP AEROPUERTO");
    }

    #[test]
    fn misaligned_price_token_leaves_price_empty() {
        let station = parse_row(&["-3.7", "40.4", "Station A  1,459 "]).unwrap();
        assert_eq!(station.price(), None);
        assert_eq!(station.description(), "Station A");

        let station = parse_row(&["-3.7", "40.4", "Station B    459"]).unwrap();
        assert_eq!(station.price(), None);
        assert_eq!(station.description(), "Station B");

        for composite in ["Station C  1,45 ", "Station D  ,1459", "Station E  1,4,5"] {
            assert_eq!(parse_row(&["-3.7", "40.4", composite]).unwrap().price(), None);
        }
    }

    #[test]
    fn short_composite_field_is_rejected() {
        for composite in ["", "1,459", "A 1,459"] {
            let err = parse_row(&["-3.7", "40.4", composite]).unwrap_err();
            assert_eq!(
                err,
                ParseRowError::FieldTooShort {
                    length: composite.chars().count(),
                    minimum: MIN_COMPOSITE_LEN,
                }
            );
        }
        assert!(parse_row(&["-3.7", "40.4", "AB 1,459"]).is_ok());
    }

    #[test]
    fn lengths_are_counted_in_characters() {
        // Seven characters, but more than eight bytes.
        let err = parse_row(&["-3.7", "40.4", "Ñ 1,459"]).unwrap_err();
        assert!(matches!(err, ParseRowError::FieldTooShort { length: 7, .. }));

        let station = parse_row(&["-3.7", "40.4", "ÁÉÍÓÚ  1,234"]).unwrap();
        assert_eq!(station.description(), "ÁÉÍÓÚ");
        assert_eq!(station.price(), Some(1.234));
    }

    #[test]
    fn rows_with_too_few_fields_are_rejected() {
        assert_eq!(
            parse_row::<&str>(&[]).unwrap_err(),
            ParseRowError::TooFewFields { found: 0 }
        );
        assert_eq!(
            parse_row(&["-3.7", "40.4"]).unwrap_err(),
            ParseRowError::TooFewFields { found: 2 }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let station = parse_row(&["-3.7", "40.4", "Station B  1,500", "extra", ""]).unwrap();
        assert_eq!(station.description(), "Station B");
    }

    #[test]
    fn coordinates_accept_whitespace_and_decimal_comma() {
        let station = parse_row(&[" -3,7 ", "40,4", "Station C  1,500"]).unwrap();
        assert_eq!(station.longitude(), -3.7);
        assert_eq!(station.latitude(), 40.4);
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        assert!(matches!(
            parse_row(&["abc", "40.4", "Station C  1,500"]).unwrap_err(),
            ParseRowError::InvalidNumber { field: "longitude", .. }
        ));
        assert!(matches!(
            parse_row(&["-3.7", "", "Station C  1,500"]).unwrap_err(),
            ParseRowError::InvalidNumber { field: "latitude", .. }
        ));
        assert!(matches!(
            parse_row(&["-3.7", "95.0", "Station C  1,500"]).unwrap_err(),
            ParseRowError::CoordinateOutOfRange { .. }
        ));
        assert!(matches!(
            parse_row(&["NaN", "40.4", "Station C  1,500"]).unwrap_err(),
            ParseRowError::CoordinateOutOfRange { .. }
        ));
    }

    #[test]
    fn latin1_fields_are_decoded() {
        assert_eq!(decode_field(b"plain"), "plain");
        assert_eq!(decode_field("Añaza".as_bytes()), "Añaza");
        assert_eq!(decode_field(&[b'A', 0xF1, b'a', b'z', b'a']), "Añaza");
    }
}
