//! Record identifiers
//!
//! Every record gets a ULID-backed identifier so ids sort by creation time.
//! Unions additionally carry a registry code (`IO-###`) that other records
//! use as their foreign key.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a fresh identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s)
                    .map(Self)
                    .map_err(|_| ModelError::InvalidId(s.to_string()))
            }
        }
    };
}

record_id!(
    /// Union record identifier
    UnionId
);
record_id!(
    /// Document record identifier
    DocumentId
);
record_id!(
    /// Member record identifier
    MemberId
);
record_id!(
    /// Workflow identifier
    WorkflowId
);
record_id!(
    /// Correspondence identifier
    CorrespondenceId
);
record_id!(
    /// User account identifier
    UserId
);

/// Registry code of a union, `IO-` followed by three digits
///
/// The numeric part is always in `100..=999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnionCode(u16);

impl UnionCode {
    /// Smallest allocatable number
    pub const MIN: u16 = 100;
    /// Largest allocatable number
    pub const MAX: u16 = 999;

    /// Build a code from its number
    ///
    /// # Errors
    /// `ModelError::InvalidUnionCode` when `number` is outside `100..=999`.
    pub fn new(number: u16) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ModelError::InvalidUnionCode(format!("IO-{number}")))
        }
    }

    /// Numeric part of the code
    #[inline]
    #[must_use]
    pub fn number(&self) -> u16 {
        self.0
    }

    /// Number of distinct codes available
    #[inline]
    #[must_use]
    pub fn capacity() -> usize {
        usize::from(Self::MAX - Self::MIN) + 1
    }
}

impl fmt::Display for UnionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IO-{:03}", self.0)
    }
}

impl FromStr for UnionCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidUnionCode(s.to_string());
        let digits = s.trim().strip_prefix("IO-").ok_or_else(invalid)?;
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u16 = digits.parse().map_err(|_| invalid())?;
        Self::new(number).map_err(|_| invalid())
    }
}

impl Serialize for UnionCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnionCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
