//! User role enumeration.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Access role of a user.
///
/// Serialized as the integers `0` (customer) and `1` (admin). Deserialization
/// accepts integers only: the JSON string `"1"` is an error, never an admin.
/// Any integer other than `1` maps to `Customer`, so unknown role codes can
/// exist in stored data without ever granting admin access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular customer (`0`, the default for new registrations).
    #[default]
    Customer,
    /// Administrator (`1`).
    Admin,
}

impl Role {
    /// Map a stored integer code to a role. Only exactly `1` is admin.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Admin,
            _ => Self::Customer,
        }
    }

    /// The integer code this role serializes as.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Customer => 0,
            Self::Admin => 1,
        }
    }

    /// Returns true for [`Role::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Integers only; "1" must not deserialize as admin.
        let code = i64::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}
