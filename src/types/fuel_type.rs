//! The closed set of fuel products for which daily price files are published.

use crate::error::InvalidArgumentError;
use std::fmt;
use std::str::FromStr;

/// A fuel product with its own daily price file.
///
/// The publisher identifies each product by a short upper-case code, which is
/// also what ends up in the cache and archive file names.
///
/// # Examples
///
/// ```
/// use gasofa::FuelType;
///
/// let fuel: FuelType = "G95".parse().unwrap();
/// assert_eq!(fuel, FuelType::Gasoline95);
/// assert_eq!(fuel.code(), "G95");
/// assert!("XYZ".parse::<FuelType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    /// Unleaded gasoline, 95 octane (`G95`).
    Gasoline95,
    /// Unleaded gasoline, 98 octane (`G98`).
    Gasoline98,
    /// Automotive diesel, "gasóleo A" (`GOA`).
    DieselA,
    /// Heating / new-formula diesel (`NGO`).
    HeatingDiesel,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline95,
        FuelType::Gasoline98,
        FuelType::DieselA,
        FuelType::HeatingDiesel,
    ];

    /// The publisher's code for this product.
    pub fn code(&self) -> &'static str {
        match self {
            FuelType::Gasoline95 => "G95",
            FuelType::Gasoline98 => "G98",
            FuelType::DieselA => "GOA",
            FuelType::HeatingDiesel => "NGO",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FuelType {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| InvalidArgumentError::UnknownFuelType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_published_code() {
        for fuel in FuelType::ALL {
            assert_eq!(fuel.code().parse::<FuelType>().unwrap(), fuel);
            assert_eq!(fuel.to_string(), fuel.code());
        }
    }

    #[test]
    fn parsing_ignores_case_and_surrounding_whitespace() {
        assert_eq!(" goa ".parse::<FuelType>().unwrap(), FuelType::DieselA);
        assert_eq!("ngo".parse::<FuelType>().unwrap(), FuelType::HeatingDiesel);
    }

    #[test]
    fn rejects_unknown_codes() {
        let err = "XYZ".parse::<FuelType>().unwrap_err();
        assert!(matches!(err, InvalidArgumentError::UnknownFuelType(ref code) if code == "XYZ"));
        assert!("".parse::<FuelType>().is_err());
        assert!("G9".parse::<FuelType>().is_err());
    }
}
