use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use rand::Rng;

use crate::error::NotifyError;

/// A 24-bit accent colour for the notification sidebar.
///
/// Always renders as six zero-padded lowercase hex digits, so `0x0000ff`
/// prints as `0000ff` and never as `ff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccentColor(u32);

impl AccentColor {
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Returns `None` for values wider than 24 bits
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value > Self::MAX {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Samples a colour uniformly from `[0, 0xFFFFFF]` with the thread RNG
    #[must_use]
    pub fn random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=Self::MAX))
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:06x}", self.0)
    }

    /// `#rrggbb`, as used in the attachment `color` field
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl Display for AccentColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

impl FromStr for AccentColor {
    type Err = NotifyError;

    /// Accepts 1 to 6 hex digits with an optional leading `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.is_empty() || digits.len() > 6 {
            return Err(NotifyError::invalid_config(format!(
                "accent colour must have 1 to 6 hex digits, got '{s}'"
            )));
        }

        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| NotifyError::invalid_config(format!("invalid accent colour '{s}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_samples_stay_in_range() {
        for _ in 0..10_000 {
            let color = AccentColor::random();
            let hex = color.to_hex();

            assert!(color.value() <= AccentColor::MAX);
            assert_eq!(hex.len(), 6);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            assert_eq!(u32::from_str_radix(&hex, 16).unwrap(), color.value());
        }
    }

    #[test]
    fn test_small_values_are_zero_padded() {
        let color = AccentColor::new(0xff).unwrap();

        assert_eq!(color.to_hex(), "0000ff");
        assert_eq!(color.to_css(), "#0000ff");
        assert_eq!(color.to_string(), "0000ff");
        assert_eq!(AccentColor::new(0).unwrap().to_hex(), "000000");
        assert_eq!(AccentColor::new(AccentColor::MAX).unwrap().to_hex(), "ffffff");
    }

    #[test]
    fn test_new_rejects_wide_values() {
        assert!(AccentColor::new(0x0100_0000).is_none());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = AccentColor::from_rng(&mut StdRng::seed_from_u64(7));
        let b = AccentColor::from_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse() {
        assert_eq!("#1a2B3c".parse::<AccentColor>().unwrap().to_hex(), "1a2b3c");
        assert_eq!("ff".parse::<AccentColor>().unwrap().to_hex(), "0000ff");
        assert!("".parse::<AccentColor>().is_err());
        assert!("#1234567".parse::<AccentColor>().is_err());
        assert!("zzzzzz".parse::<AccentColor>().is_err());
    }
}
