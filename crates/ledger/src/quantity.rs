use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use std::fmt;
use std::ops::{Add, Sub};

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Stock quantity. Whole numbers serialize as JSON integers so name-keyed
/// pantries keep their `{"eggs": 24}` shape; fractional amounts (food-id
/// pantries) serialize as floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    pub fn new(value: f64) -> Self {
        Quantity(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Finite and non-negative.
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Sum, or `None` when it would not be a valid quantity.
    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        Some(Quantity(self.0 + rhs.0)).filter(|sum| sum.is_valid())
    }

    fn as_exact_int(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INT {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity(value)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity(value as f64)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity(f64::from(value))
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 - rhs.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_exact_int() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return Err(ser::Error::custom(format!("quantity {} is not finite", self.0)));
        }
        match self.as_exact_int() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_numbers_serialize_as_integers() {
        assert_eq!(serde_json::to_value(Quantity::new(3.0)).unwrap(), json!(3));
        assert_eq!(serde_json::to_string(&Quantity::new(0.0)).unwrap(), "0");
    }

    #[test]
    fn fractions_serialize_as_floats() {
        assert_eq!(
            serde_json::to_value(Quantity::new(2.5)).unwrap(),
            json!(2.5)
        );
        assert_eq!(Quantity::new(0.25).to_string(), "0.25");
    }

    #[test]
    fn accepts_integer_and_float_input() {
        let q: Quantity = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(q.value(), 7.0);
        let q: Quantity = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(q.value(), 1.5);
    }

    #[test]
    fn non_finite_values_refuse_to_serialize() {
        assert!(serde_json::to_string(&Quantity::new(f64::INFINITY)).is_err());
        assert!(serde_json::to_string(&Quantity::new(f64::NAN)).is_err());
    }

    #[test]
    fn checked_add_rejects_overflow() {
        assert_eq!(
            Quantity::new(1.5).checked_add(Quantity::new(2.0)),
            Some(Quantity::new(3.5))
        );
        assert_eq!(Quantity::new(1e308).checked_add(Quantity::new(1e308)), None);
    }

    #[test]
    fn validity() {
        assert!(Quantity::new(0.0).is_valid());
        assert!(!Quantity::new(-1.0).is_valid());
        assert!(!Quantity::new(f64::NAN).is_valid());
        assert!(!Quantity::new(f64::INFINITY).is_valid());
    }
}
