use std::fmt;

use crate::errors::{unknown_tag, Error};

/// The type of a [`Value`](crate::Value).
///
/// The discriminants are part of the boundary protocol and follow the order
/// used by the binding layer since the first release. The set is closed:
/// [`Tag::try_from`] rejects any other raw value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Tag {
    Integer = 0,
    Real = 1,
    String = 2,
    Boolean = 3,
    Array = 4,
    Hash = 5,
    Null = 6,
}

impl Tag {
    /// Every tag, in discriminant order.
    pub const ALL: [Tag; 7] = [
        Tag::Integer,
        Tag::Real,
        Tag::String,
        Tag::Boolean,
        Tag::Array,
        Tag::Hash,
        Tag::Null,
    ];

    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Integer => "integer",
            Tag::Real => "real",
            Tag::String => "string",
            Tag::Boolean => "boolean",
            Tag::Array => "array",
            Tag::Hash => "hash",
            Tag::Null => "null",
        }
    }

    /// Raw discriminant as sent across the boundary.
    pub const fn to_raw(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Tag {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.to_raw() == raw)
            .ok_or_else(|| unknown_tag(raw))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_raw_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::try_from(tag.to_raw()), Ok(tag));
        }
        assert_eq!(Tag::Integer.to_raw(), 0);
        assert_eq!(Tag::Null.to_raw(), 6);
    }

    #[test]
    fn test_unknown_raw_tag() {
        for raw in [-1, 7, i32::MAX] {
            let err = Tag::try_from(raw).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnknownTag { raw });
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::Boolean.to_string(), "boolean");
    }
}
