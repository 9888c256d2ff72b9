/*
 *
 *    Copyright (c) 2020-2022 Project CHIP Authors
 *
 *    Licensed under the Apache License, Version 2.0 (the "License");
 *    you may not use this file except in compliance with the License.
 *    You may obtain a copy of the License at
 *
 *        http://www.apache.org/licenses/LICENSE-2.0
 *
 *    Unless required by applicable law or agreed to in writing, software
 *    distributed under the License is distributed on an "AS IS" BASIS,
 *    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *    See the License for the specific language governing permissions and
 *    limitations under the License.
 */

//! The storage representation of attribute slots.
//!
//! A slot is declared with one of the closed set of [`StorageKind`]s and
//! holds a [`StoredValue`] of that kind for the lifetime of the store.
//! `StoredValue` carries exactly the bytes the slot holds; in particular the
//! numeric null sentinels are *not* interpreted here - that is the job of
//! the `FromStored`/`ToStored` conversion layer.

use heapless::{String, Vec};
use strum::FromRepr;

use crate::error::{Error, ErrorCode};

/// Capacity, in bytes, of the buffer backing a character-string slot.
///
/// A slot's declared maximum length may be smaller, never larger.
pub const MAX_STRING_SIZE: usize = 256;

/// Capacity, in bytes, of the buffer backing an octet-span slot.
pub const MAX_OCTETS_SIZE: usize = 256;

/// The closed set of storage representations a slot can be declared with.
///
/// The kind of a slot is fixed by the schema for the lifetime of the store;
/// reads and writes must agree with it exactly - there is no implicit
/// reinterpretation between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKind {
    Bool,
    U8,
    U16,
    U24,
    U32,
    U40,
    U48,
    U56,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Utf8,
    Octets,
}

impl TryFrom<u8> for StorageKind {
    type Error = Error;

    fn try_from(repr: u8) -> Result<Self, Self::Error> {
        Self::from_repr(repr).ok_or_else(|| ErrorCode::InvalidDataType.into())
    }
}

macro_rules! odd_uint {
    ($($name:ident: $repr:ty, $bits:expr;)*) => {
        $(
            #[doc = concat!("A ", stringify!($bits), "-bit unsigned integer, widened to `", stringify!($repr), "` as its working representation.")]
            ///
            /// Values outside the packed width are rejected at construction,
            /// so a stored instance always round-trips without truncation.
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            #[repr(transparent)]
            pub struct $name($repr);

            impl $name {
                /// The number of payload bits of this kind.
                pub const BITS: u32 = $bits;

                /// The all-bits-one maximum of this kind.
                ///
                /// Reserved as the null sentinel in nullable contexts.
                pub const MAX: Self = Self(((1 as $repr) << $bits) - 1);

                /// Create a new value, or `None` if it does not fit the width.
                pub const fn new(value: $repr) -> Option<Self> {
                    if value <= Self::MAX.0 {
                        Some(Self(value))
                    } else {
                        None
                    }
                }

                /// Return the value widened to its working representation.
                pub const fn get(&self) -> $repr {
                    self.0
                }
            }

            impl TryFrom<$repr> for $name {
                type Error = Error;

                fn try_from(value: $repr) -> Result<Self, Self::Error> {
                    Self::new(value).ok_or_else(|| ErrorCode::ConstraintError.into())
                }
            }

            impl From<$name> for $repr {
                fn from(value: $name) -> Self {
                    value.get()
                }
            }
        )*
    };
}

odd_uint! {
    U24: u32, 24;
    U40: u64, 40;
    U48: u64, 48;
    U56: u64, 56;
}

/// The raw stored representation of one attribute slot.
///
/// Bounded kinds (`Utf8`, `Octets`) carry an explicit present/absent flag,
/// since a sentinel cannot be embedded unambiguously in variable-length
/// content; `None` is the absent ("null") state. Numeric kinds embed their
/// null sentinel in the value domain instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoredValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U24(U24),
    U32(u32),
    U40(U40),
    U48(U48),
    U56(U56),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Utf8(Option<String<MAX_STRING_SIZE>>),
    Octets(Option<Vec<u8, MAX_OCTETS_SIZE>>),
}

impl StoredValue {
    /// Return the storage kind this value is an instance of.
    pub const fn kind(&self) -> StorageKind {
        match self {
            Self::Bool(_) => StorageKind::Bool,
            Self::U8(_) => StorageKind::U8,
            Self::U16(_) => StorageKind::U16,
            Self::U24(_) => StorageKind::U24,
            Self::U32(_) => StorageKind::U32,
            Self::U40(_) => StorageKind::U40,
            Self::U48(_) => StorageKind::U48,
            Self::U56(_) => StorageKind::U56,
            Self::U64(_) => StorageKind::U64,
            Self::I8(_) => StorageKind::I8,
            Self::I16(_) => StorageKind::I16,
            Self::I32(_) => StorageKind::I32,
            Self::I64(_) => StorageKind::I64,
            Self::F32(_) => StorageKind::F32,
            Self::F64(_) => StorageKind::F64,
            Self::Utf8(_) => StorageKind::Utf8,
            Self::Octets(_) => StorageKind::Octets,
        }
    }

    /// The initial value of a freshly-declared slot of the given kind:
    /// zero for scalars, absent for bounded kinds.
    pub fn default_for(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Bool => Self::Bool(false),
            StorageKind::U8 => Self::U8(0),
            StorageKind::U16 => Self::U16(0),
            StorageKind::U24 => Self::U24(U24::default()),
            StorageKind::U32 => Self::U32(0),
            StorageKind::U40 => Self::U40(U40::default()),
            StorageKind::U48 => Self::U48(U48::default()),
            StorageKind::U56 => Self::U56(U56::default()),
            StorageKind::U64 => Self::U64(0),
            StorageKind::I8 => Self::I8(0),
            StorageKind::I16 => Self::I16(0),
            StorageKind::I32 => Self::I32(0),
            StorageKind::I64 => Self::I64(0),
            StorageKind::F32 => Self::F32(0.0),
            StorageKind::F64 => Self::F64(0.0),
            StorageKind::Utf8 => Self::Utf8(None),
            StorageKind::Octets => Self::Octets(None),
        }
    }

    /// The length of the present payload of a bounded kind, `None` for
    /// scalar kinds and for absent payloads.
    pub fn payload_len(&self) -> Option<usize> {
        match self {
            Self::Utf8(Some(s)) => Some(s.len()),
            Self::Octets(Some(v)) => Some(v.len()),
            _ => None,
        }
    }

    /// Bit-exact equality; unlike `PartialEq` this treats two NaN payloads
    /// with the same bit pattern as equal.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StorageKind, StoredValue, U24, U40};

    #[test]
    fn odd_width_bounds() {
        assert_eq!(U24::MAX.get(), 0x00FF_FFFF);
        assert_eq!(U24::new(0x00FF_FFFF), Some(U24::MAX));
        assert_eq!(U24::new(0x0100_0000), None);

        assert_eq!(U40::MAX.get(), 0x00FF_FFFF_FFFF);
        assert!(U40::try_from(0x0100_0000_0000).is_err());
    }

    #[test]
    fn kind_tags() {
        assert_eq!(StoredValue::Bool(true).kind(), StorageKind::Bool);
        assert_eq!(StoredValue::Utf8(None).kind(), StorageKind::Utf8);
        assert_eq!(
            StoredValue::default_for(StorageKind::U24).kind(),
            StorageKind::U24
        );
    }

    #[test]
    fn defaults() {
        assert_eq!(StoredValue::default_for(StorageKind::U8), StoredValue::U8(0));
        assert_eq!(
            StoredValue::default_for(StorageKind::Octets),
            StoredValue::Octets(None)
        );
        assert_eq!(StoredValue::default_for(StorageKind::Utf8).payload_len(), None);
    }

    #[test]
    fn nan_bitwise_eq() {
        let a = StoredValue::F32(f32::NAN);
        let b = StoredValue::F32(f32::NAN);

        assert_ne!(a, b);
        assert!(a.bitwise_eq(&b));
    }
}
