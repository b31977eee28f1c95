use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DescriptorError {
    #[error("orbital longitude descriptor is empty")]
    Empty,
    #[error("expected hemisphere 'E' or 'W' at the end of '{0}'")]
    Hemisphere(String),
    #[error("invalid orbital longitude magnitude in '{0}'")]
    Magnitude(String),
    #[error("orbital longitude {0} is outside [0, 180] degrees")]
    OutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    East,
    West,
}

/// Longitude of a geostationary slot, written as `"<magnitude><E|W>"`.
///
/// The configured text is kept, minus surrounding whitespace, so results can
/// echo it back (`" 138.0E"` becomes `"138.0E"`, never `"138E"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct OrbitalLongitude {
    magnitude: f64,
    hemisphere: Hemisphere,
    text: String,
}

impl OrbitalLongitude {
    /// Signed longitude in degrees, East positive.
    pub fn degrees(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::East => self.magnitude,
            Hemisphere::West => -self.magnitude,
        }
    }
}

impl FromStr for OrbitalLongitude {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let hemisphere = match text.chars().last() {
            None => return Err(DescriptorError::Empty),
            Some('E') => Hemisphere::East,
            Some('W') => Hemisphere::West,
            Some(_) => return Err(DescriptorError::Hemisphere(text.to_string())),
        };

        // Hemisphere symbol is a single ASCII byte
        let value = &text[..text.len() - 1];
        let magnitude: f64 = value
            .trim()
            .parse()
            .map_err(|_| DescriptorError::Magnitude(text.to_string()))?;

        if !magnitude.is_finite() {
            return Err(DescriptorError::Magnitude(text.to_string()));
        }
        if !(0.0..=180.0).contains(&magnitude) {
            return Err(DescriptorError::OutOfRange(magnitude));
        }

        Ok(Self {
            magnitude,
            hemisphere,
            text: text.to_string(),
        })
    }
}

impl TryFrom<String> for OrbitalLongitude {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OrbitalLongitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
