//! Identifier wrappers.
//!
//! `RideId` is the upstream identifier: an opaque string that is only ever
//! compared for equality and hashed.  `Seq` and `Slot` are locally assigned
//! integers and share the `typed_id!` treatment so they sort, hash and print
//! without ceremony.

use std::borrow::Borrow;
use std::fmt;

// ── RideId ────────────────────────────────────────────────────────────────────

/// Opaque upstream ride identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RideId(pub String);

impl RideId {
    pub fn new(id: impl Into<String>) -> Self {
        RideId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RideId {
    fn from(s: &str) -> Self {
        RideId(s.to_owned())
    }
}

impl From<String> for RideId {
    fn from(s: String) -> Self {
        RideId(s)
    }
}

impl Borrow<str> for RideId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Local counters ────────────────────────────────────────────────────────────

/// Generate a typed wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Display-ordering counter assigned when a ride is first seen or
    /// re-touched.  Larger means more recently touched.  Not a correctness
    /// guarantee about upstream ordering.
    pub struct Seq(u64);
}

typed_id! {
    /// Position of a card in the bounded display window.  Slot 0 holds the
    /// most recently touched ride.
    pub struct Slot(u32);
}

impl Seq {
    /// The sequence number that follows `self`.
    #[inline]
    pub fn next(self) -> Seq {
        Seq(self.0 + 1)
    }
}
