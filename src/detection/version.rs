use std::fmt;

use crate::token::key2::VERSION_STAMPS;
use crate::token::{TokenResolver, key1::KEY1_TOKENS, key2::KEY2_TOKENS};

/// Major version of the presentation format.
///
/// Version 1 has its own legacy grammar; versions 2 to 5 share the unified
/// grammar and differ only in details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    V1 = 1,
    V2 = 2,
    V3 = 3,
    V4 = 4,
    V5 = 5,
}

impl Version {
    pub const NEWEST: Version = Version::V5;
    pub const OLDEST: Version = Version::V1;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            5 => Some(Self::V5),
            _ => None,
        }
    }

    /// Version named by a `key:version` stamp.
    pub fn from_stamp(stamp: &str) -> Option<Self> {
        VERSION_STAMPS
            .get(stamp.trim())
            .and_then(|n| Self::from_number(*n))
    }

    /// Whether this version uses the legacy grammar.
    pub fn is_legacy(self) -> bool {
        self == Self::V1
    }

    /// Token vocabulary of this version's grammar family.
    pub fn tokens(self) -> &'static dyn TokenResolver {
        if self.is_legacy() {
            &KEY1_TOKENS
        } else {
            &KEY2_TOKENS
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
