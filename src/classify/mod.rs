//! Number classification module
//!
//! Validates the raw input and computes the fixed set of numeric properties
//! reported by the classification endpoint.

pub mod input;
pub mod predicates;

use serde::Serialize;

pub use input::ParsePolicy;
pub use predicates::Parity;

/// Property tag reported in the `properties` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

impl From<Parity> for Property {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::Even => Self::Even,
            Parity::Odd => Self::Odd,
        }
    }
}

/// Everything computed locally for a validated number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberProperties {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    /// `armstrong` first when it applies, then exactly one parity tag
    pub properties: Vec<Property>,
    pub digit_sum: u32,
}

/// Successful classification body
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u32,
    pub fun_fact: Option<String>,
}

/// Body returned for input that fails validation
#[derive(Debug, Clone, Serialize)]
pub struct InvalidNumber<'a> {
    /// Raw input echoed back, `null` when the parameter was absent
    pub number: Option<&'a str>,
    pub error: bool,
}

impl<'a> InvalidNumber<'a> {
    pub const fn new(raw: Option<&'a str>) -> Self {
        Self {
            number: raw,
            error: true,
        }
    }
}

pub fn classify(n: i64) -> NumberProperties {
    let mut properties = Vec::with_capacity(2);
    if predicates::is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    properties.push(Parity::of(n).into());

    NumberProperties {
        number: n,
        is_prime: predicates::is_prime(n),
        is_perfect: predicates::is_perfect(n),
        properties,
        digit_sum: predicates::digit_sum(n),
    }
}

impl NumberProperties {
    /// Attach the (possibly absent) fun fact to form the response body
    pub fn with_fun_fact(self, fun_fact: Option<String>) -> Classification {
        Classification {
            number: self.number,
            is_prime: self.is_prime,
            is_perfect: self.is_perfect,
            properties: self.properties,
            digit_sum: self.digit_sum,
            fun_fact,
        }
    }
}
