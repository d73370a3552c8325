//! Chain ordering policy.
//!
//! Bundles never say which certificate is the leaf and which is the root.
//! The [`ChainOrderPolicy`] a caller declares decides it purely from
//! position, both when a bundle is read and when a collection is written
//! back out.

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ROOT_LAST: &str = "root-last";
const ROOT_FIRST: &str = "root-first";
const IGNORE: &str = "ignore";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChainOrderPolicy {
    /// Leaf first, then intermediates, root last.
    #[default]
    RootLast,
    /// Root first, then intermediates, leaf last.
    RootFirst,
    /// Leaf first; every other certificate is dropped.
    Ignore,
}

/// Maps configuration text to a policy.
///
/// Matching is case-insensitive. Unrecognized or empty text yields
/// [`ChainOrderPolicy::RootLast`]; this never fails.
pub fn parse_policy(text: &str) -> ChainOrderPolicy {
    if text.eq_ignore_ascii_case(ROOT_FIRST) {
        ChainOrderPolicy::RootFirst
    } else if text.eq_ignore_ascii_case(IGNORE) {
        ChainOrderPolicy::Ignore
    } else {
        ChainOrderPolicy::RootLast
    }
}

impl ChainOrderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainOrderPolicy::RootLast => ROOT_LAST,
            ChainOrderPolicy::RootFirst => ROOT_FIRST,
            ChainOrderPolicy::Ignore => IGNORE,
        }
    }

    /// Splits certificates in bundle order into the leaf and its chain.
    ///
    /// | policy      | leaf  | chain                       |
    /// |-------------|-------|-----------------------------|
    /// | `RootLast`  | first | the rest, in bundle order   |
    /// | `RootFirst` | last  | the others, in bundle order |
    /// | `Ignore`    | first | empty                       |
    ///
    /// Returns `None` when there are no certificates.
    pub fn arrange<T>(self, mut certificates: Vec<T>) -> Option<(T, Vec<T>)> {
        if certificates.is_empty() {
            return None;
        }
        match self {
            ChainOrderPolicy::RootFirst => {
                let leaf = certificates.pop()?;
                Some((leaf, certificates))
            }
            ChainOrderPolicy::RootLast => {
                let leaf = certificates.remove(0);
                Some((leaf, certificates))
            }
            ChainOrderPolicy::Ignore => {
                let leaf = certificates.swap_remove(0);
                Some((leaf, Vec::new()))
            }
        }
    }
}

impl Display for ChainOrderPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChainOrderPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_policy(s))
    }
}

impl From<&str> for ChainOrderPolicy {
    fn from(value: &str) -> Self {
        parse_policy(value)
    }
}

impl Serialize for ChainOrderPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChainOrderPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(parse_policy(&text))
    }
}
