//! Privileges and privilege-set bitmask.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Privileges available to channel users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    /// Default read-only access.
    Reader,
    /// Can publish, edit, and delete messages.
    Writer,
    /// Can edit channel info and view statistics.
    Moderator,
    /// Full administrative access.
    Admin,
}

impl Privilege {
    const ALL: [Privilege; 4] = [Self::Reader, Self::Writer, Self::Moderator, Self::Admin];

    fn bit(self) -> u8 {
        match self {
            Self::Reader => 1 << 0,
            Self::Writer => 1 << 1,
            Self::Moderator => 1 << 2,
            Self::Admin => 1 << 3,
        }
    }

    /// Return the privilege as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Privilege {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Self::Reader),
            "writer" => Ok(Self::Writer),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid privilege: '{s}'. Expected one of: reader, writer, moderator, admin"
            ))),
        }
    }
}

/// A set of privileges stored as a bitmask.
///
/// Captured once per listener at connect time (the privilege snapshot) and
/// never refreshed for the life of the session. Membership tests are O(1).
/// Serializes as a JSON array of privilege names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivilegeSet(u8);

impl PrivilegeSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The default set for an anonymous or unprivileged user.
    pub fn reader() -> Self {
        Self(Privilege::Reader.bit())
    }

    /// Whether the set contains the given privilege.
    pub fn contains(&self, privilege: Privilege) -> bool {
        self.0 & privilege.bit() != 0
    }

    /// Add a privilege to the set.
    pub fn insert(&mut self, privilege: Privilege) {
        self.0 |= privilege.bit();
    }

    /// Builder-style insertion.
    pub fn with(mut self, privilege: Privilege) -> Self {
        self.insert(privilege);
        self
    }

    /// Iterate the privileges present in the set.
    pub fn iter(&self) -> impl Iterator<Item = Privilege> + '_ {
        Privilege::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<T: IntoIterator<Item = Privilege>>(iter: T) -> Self {
        let mut set = Self::empty();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl Serialize for PrivilegeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PrivilegeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let privileges = Vec::<Privilege>::deserialize(deserializer)?;
        Ok(privileges.into_iter().collect())
    }
}
