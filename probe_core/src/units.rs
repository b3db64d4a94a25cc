//! Temperature units and doneness presets.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[inline]
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

#[inline]
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

impl TempUnit {
    /// Convert a value expressed in `self` to Celsius.
    pub fn to_celsius(self, v: f64) -> f64 {
        match self {
            Self::Celsius => v,
            Self::Fahrenheit => fahrenheit_to_celsius(v),
        }
    }

    /// Convert a Celsius value into `self`.
    pub fn from_celsius(self, c: f64) -> f64 {
        match self {
            Self::Celsius => c,
            Self::Fahrenheit => celsius_to_fahrenheit(c),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// Pull temperatures for common cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Doneness {
    Pork,
    Steak,
    Chicken,
    Fish,
    Lamb,
}

impl Doneness {
    /// Target internal temperature in degrees Fahrenheit.
    pub const fn target_f(self) -> f64 {
        match self {
            Self::Pork | Self::Fish | Self::Lamb => 145.0,
            Self::Steak => 135.0,
            Self::Chicken => 165.0,
        }
    }

    /// Target internal temperature expressed in `unit`.
    pub fn target(self, unit: TempUnit) -> f64 {
        match unit {
            TempUnit::Fahrenheit => self.target_f(),
            TempUnit::Celsius => fahrenheit_to_celsius(self.target_f()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_invert() {
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        let c = 63.5;
        assert!((TempUnit::Fahrenheit.to_celsius(TempUnit::Fahrenheit.from_celsius(c)) - c).abs() < 1e-12);
    }

    #[test]
    fn chicken_is_about_74c() {
        assert!((Doneness::Chicken.target(TempUnit::Celsius) - 73.888_888).abs() < 1e-5);
        assert_eq!(Doneness::Steak.target(TempUnit::Fahrenheit), 135.0);
    }
}
