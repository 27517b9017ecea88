//! Dotted version numbers (`v1.2.0`).
//!
//! Versions compare numerically per component. Missing trailing components
//! count as zero, so `v1` and `v1.0.0` are equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::ModelError;

/// An immutable, totally ordered version.
#[derive(Clone)]
pub struct Version {
    /// Original text, e.g. `v1.10.0`.
    vstring: String,
    /// Parsed components; never empty.
    numbers: Vec<u32>,
}

impl Version {
    /// Parse a `v`-prefixed dotted version string.
    pub fn parse(vstring: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidVersion {
            vstring: vstring.to_string(),
        };

        let digits = vstring.strip_prefix('v').ok_or_else(invalid)?;
        let numbers = digits
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version {
            vstring: vstring.to_string(),
            numbers,
        })
    }

    /// The version `v0`, used when none is declared.
    pub fn zero() -> Self {
        Version {
            vstring: "v0".to_string(),
            numbers: vec![0],
        }
    }

    /// The version text as written.
    pub fn vstring(&self) -> &str {
        &self.vstring
    }

    /// Parsed numeric components.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// First component.
    pub fn major(&self) -> u32 {
        self.numbers[0]
    }

    /// Components without trailing zeros; the canonical form for equality.
    fn significant(&self) -> &[u32] {
        let len = self
            .numbers
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |pos| pos + 1);
        &self.numbers[..len]
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        for i in 0..len {
            let mine = self.numbers.get(i).copied().unwrap_or(0);
            let theirs = other.numbers.get(i).copied().unwrap_or(0);
            match mine.cmp(&theirs) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl FromStr for Version {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vstring)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.vstring)
    }
}
