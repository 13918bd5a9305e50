use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::Error;

/// The side of the bracket a match is played in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Bracket {
    /// The winners bracket. The grand final is also part of the upper bracket.
    Upper,
    /// The losers bracket.
    Lower,
}

impl Bracket {
    #[inline]
    pub fn is_upper(self) -> bool {
        matches!(self, Self::Upper)
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Upper => "UB",
            Self::Lower => "LB",
        }
    }
}

/// The human readable label of a match: `UB {round}.{index}`, `LB {round}.{index}` or `Final`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchNumber {
    Upper { round: u32, index: u32 },
    Lower { round: u32, index: u32 },
    Final,
}

impl MatchNumber {
    /// Creates a new label for a non-final match.
    #[inline]
    pub fn new(bracket: Bracket, round: u32, index: u32) -> Self {
        match bracket {
            Bracket::Upper => Self::Upper { round, index },
            Bracket::Lower => Self::Lower { round, index },
        }
    }

    /// Returns `true` if this is the grand final.
    ///
    /// ```
    /// # use double_bracket_core::MatchNumber;
    /// assert!(MatchNumber::Final.is_final());
    /// assert!(!"UB 1.1".parse::<MatchNumber>().unwrap().is_final());
    /// ```
    #[inline]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final)
    }

    #[inline]
    pub fn bracket(&self) -> Bracket {
        match self {
            Self::Lower { .. } => Bracket::Lower,
            _ => Bracket::Upper,
        }
    }
}

impl Display for MatchNumber {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Upper { round, index } => {
                write!(f, "{} {}.{}", Bracket::Upper.prefix(), round, index)
            }
            Self::Lower { round, index } => {
                write!(f, "{} {}.{}", Bracket::Lower.prefix(), round, index)
            }
            Self::Final => f.write_str("Final"),
        }
    }
}

impl FromStr for MatchNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::InvalidMatchNumber(s.to_owned());

        if s.starts_with("Final") {
            return Ok(Self::Final);
        }

        let (prefix, position) = s.split_once(' ').ok_or_else(err)?;
        let bracket = match prefix {
            "UB" => Bracket::Upper,
            "LB" => Bracket::Lower,
            _ => return Err(err()),
        };

        let (round, index) = position.split_once('.').ok_or_else(err)?;
        let round = round.parse().map_err(|_| err())?;
        let index = index.parse().map_err(|_| err())?;

        Ok(Self::new(bracket, round, index))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt::{self, Formatter};

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::MatchNumber;

    impl Serialize for MatchNumber {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for MatchNumber {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct MatchNumberVisitor;

            impl<'de> Visitor<'de> for MatchNumberVisitor {
                type Value = MatchNumber;

                fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                    formatter.write_str("a match number like \"UB 1.1\", \"LB 2.1\" or \"Final\"")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    v.parse().map_err(E::custom)
                }
            }

            deserializer.deserialize_str(MatchNumberVisitor)
        }
    }

}
