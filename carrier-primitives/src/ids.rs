//! Carrier identifier types.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// USDOT number identifying a registered motor carrier.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsdotNumber(u64);

impl UsdotNumber {
    /// Creates an identifier from a raw number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUsdot`] when the number is zero.
    pub fn new(value: u64) -> crate::Result<Self> {
        if value == 0 {
            return Err(Error::InvalidUsdot {
                input: value.to_string(),
                reason: "must be greater than zero",
            });
        }
        Ok(Self(value))
    }

    /// Returns the underlying number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for UsdotNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<UsdotNumber> for u64 {
    fn from(value: UsdotNumber) -> Self {
        value.0
    }
}

impl FromStr for UsdotNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = |reason| Error::InvalidUsdot {
            input: s.to_owned(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("cannot be empty"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must contain digits only"));
        }

        let value = trimmed
            .parse::<u64>()
            .map_err(|_| invalid("number is too large"))?;
        if value == 0 {
            return Err(invalid("must be greater than zero"));
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_digits() {
        let id: UsdotNumber = " 44 ".parse().expect("parse");
        assert_eq!(id.get(), 44);
        assert_eq!(id.to_string(), "44");
    }

    #[test]
    fn rejects_non_numeric_and_zero() {
        assert!(matches!(
            "44a".parse::<UsdotNumber>(),
            Err(Error::InvalidUsdot { .. })
        ));
        assert!("".parse::<UsdotNumber>().is_err());
        assert!("0".parse::<UsdotNumber>().is_err());
        assert!(UsdotNumber::new(0).is_err());
        assert!("-5".parse::<UsdotNumber>().is_err());
    }
}
