use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The closed set of French TVA rates the product offers.
///
/// Any percentage outside this set is a policy violation; there is no
/// free-form rate anywhere in the system. On the wire a rate is its
/// percentage value (`20`, `5.5`), matching the stored invoice documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvaRate {
    /// No TVA (0%)
    Zero,
    /// Super-reduced (2.1%)
    SuperReduced,
    /// Reduced (5.5%)
    Reduced,
    /// Intermediate (10%)
    Intermediate,
    /// Standard (20%)
    Standard,
}

impl TvaRate {
    pub const ALL: [TvaRate; 5] = [
        TvaRate::Zero,
        TvaRate::SuperReduced,
        TvaRate::Reduced,
        TvaRate::Intermediate,
        TvaRate::Standard,
    ];

    /// The rate as a percentage, e.g. `5.5` for the reduced rate
    pub fn as_percent(&self) -> Decimal {
        match self {
            TvaRate::Zero => Decimal::ZERO,
            TvaRate::SuperReduced => Decimal::new(21, 1),
            TvaRate::Reduced => Decimal::new(55, 1),
            TvaRate::Intermediate => Decimal::new(10, 0),
            TvaRate::Standard => Decimal::new(20, 0),
        }
    }

    /// The rate as a fraction of the subtotal (`percent / 100`)
    pub fn as_fraction(&self) -> Decimal {
        self.as_percent() / Decimal::ONE_HUNDRED
    }

    /// Selector label
    pub fn label(&self) -> &'static str {
        match self {
            TvaRate::Zero => "No TVA",
            TvaRate::SuperReduced => "Super-reduced",
            TvaRate::Reduced => "Reduced",
            TvaRate::Intermediate => "Intermediate",
            TvaRate::Standard => "Standard",
        }
    }

    /// Match a candidate percentage against the set.
    ///
    /// Candidates may have travelled through an `f64` (2.1 and 5.5 have no
    /// exact binary form), so the comparison snaps the candidate to two
    /// decimal places in fixed point first instead of relying on exact
    /// equality of whatever digits the conversion produced.
    pub fn from_percent(candidate: Decimal) -> Option<TvaRate> {
        let snapped =
            candidate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        TvaRate::ALL
            .iter()
            .copied()
            .find(|rate| rate.as_percent() == snapped)
    }
}

impl fmt::Display for TvaRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

impl Serialize for TvaRate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.as_percent(), serializer)
    }
}

impl<'de> Deserialize<'de> for TvaRate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let candidate = <Decimal as Deserialize>::deserialize(deserializer)?;
        TvaRate::from_percent(candidate).ok_or_else(|| {
            serde::de::Error::custom(format!("{} is not an allowed TVA rate", candidate))
        })
    }
}
