//! Kind tags for [`Value`](crate::Value).

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// A set of value kinds.
///
/// Single kinds are the associated constants; sets are built with `|` so an
/// error can report more than one accepted kind.
///
/// ```
/// use json_value::Type;
///
/// let containers = Type::ARRAY | Type::OBJECT;
/// assert!(containers.contains(Type::ARRAY));
/// assert_eq!(containers.to_string(), "Array|Object");
/// assert_eq!(Type::NONE.to_string(), "Unknown");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Type(u8);

impl Type {
    pub const NONE: Type = Type(0);
    pub const NULL: Type = Type(1);
    pub const BOOLEAN: Type = Type(2);
    pub const INTEGER: Type = Type(4);
    pub const DOUBLE: Type = Type(8);
    pub const STRING: Type = Type(16);
    pub const ARRAY: Type = Type(32);
    pub const OBJECT: Type = Type(64);

    /// Integer or Double.
    pub const NUMBER: Type = Type(4 | 8);
    /// Array or Object.
    pub const CONTAINER: Type = Type(32 | 64);

    const NAMES: [(Type, &'static str); 7] = [
        (Type::NULL, "Null"),
        (Type::BOOLEAN, "Boolean"),
        (Type::INTEGER, "Integer"),
        (Type::DOUBLE, "Double"),
        (Type::STRING, "String"),
        (Type::ARRAY, "Array"),
        (Type::OBJECT, "Object"),
    ];

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Type {
        Type(bits & 0x7f)
    }

    /// True when every kind in `other` is also in `self`.
    pub const fn contains(self, other: Type) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Type {
    type Output = Type;

    fn bitor(self, rhs: Type) -> Type {
        Type(self.0 | rhs.0)
    }
}

impl BitAnd for Type {
    type Output = Type;

    fn bitand(self, rhs: Type) -> Type {
        Type(self.0 & rhs.0)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, name) in Type::NAMES {
            if self.0 & kind.0 != 0 {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("Unknown")?;
        }
        Ok(())
    }
}
