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

//! Conversion between the storage representation and working types.
//!
//! Callers operate on natural language types - `u8`, `bool`, `f32`,
//! [`Nullable`] wrappers, bounded strings and octet spans - while slots hold
//! the compact, type-erased [`StoredValue`](crate::value::StoredValue)
//! representation. The [`FromStored`]/[`ToStored`] pair is the fixed,
//! bidirectional mapping between the two.
//!
//! Nullability rides on the same pair: for numeric kinds, "null" is the
//! kind's reserved sentinel bit-pattern (all-bits-one for unsigned kinds,
//! the minimum for signed kinds, NaN for floats); for bounded kinds it is
//! the explicit absent flag. The `nullable_*` method variants implement the
//! sentinel handling, and writing a concrete value that collides with the
//! sentinel through a nullable context is rejected rather than stored as an
//! ambiguous null.

use crate::error::{Error, ErrorCode};
use crate::value::StoredValue;

pub use nullable::*;
pub use octets::*;

pub mod bitflags;

mod nullable;
mod octets;
mod oddint;
mod primitive;
mod str;

/// A working type that can be decoded from the raw stored representation of
/// a slot.
pub trait FromStored: Sized {
    /// Decode from the stored representation.
    ///
    /// Fails with `InvalidDataType` when the stored kind does not match the
    /// working type's storage kind; no reinterpretation is attempted.
    fn from_stored(stored: &StoredValue) -> Result<Self, Error>;

    /// Decode for a nullable context.
    ///
    /// In addition to what `from_stored` does, rejects raw values that
    /// collide with the working type's null sentinel with `ConstraintError`.
    fn nullable_from_stored(stored: &StoredValue) -> Result<Self, Error> {
        Self::from_stored(stored)
    }

    /// Return whether the stored representation encodes "null" for this
    /// working type, with the same kind checking as `from_stored`.
    ///
    /// Working types with no null form fail with `InvalidDataType`.
    fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
        let _ = stored;

        Err(ErrorCode::InvalidDataType.into())
    }
}

/// A working type that can be encoded into the raw stored representation of
/// a slot.
pub trait ToStored {
    /// Encode into the stored representation.
    fn to_stored(&self) -> Result<StoredValue, Error>;

    /// Encode for a nullable context, rejecting values that collide with
    /// the working type's null sentinel with `ConstraintError`.
    fn nullable_to_stored(&self) -> Result<StoredValue, Error> {
        self.to_stored()
    }

    /// The stored encoding of "null" for this working type.
    ///
    /// Working types with no null form fail with `InvalidDataType`.
    fn stored_null() -> Result<StoredValue, Error>
    where
        Self: Sized,
    {
        Err(ErrorCode::InvalidDataType.into())
    }
}

/// Implements `FromStored`/`ToStored` for a `Copy` enum deriving
/// `strum::FromRepr` over the given working integer type.
///
/// Stored discriminants no variant maps to decode as `ConstraintError`;
/// the all-bits-one discriminant doubles as the null sentinel, as for the
/// underlying integer type.
#[macro_export]
macro_rules! attr_enum {
    ($en:ty, $t:ty) => {
        impl $crate::traits::FromStored for $en {
            fn from_stored(
                stored: &$crate::value::StoredValue,
            ) -> Result<Self, $crate::error::Error> {
                let value = <$t as $crate::traits::FromStored>::from_stored(stored)?;

                <$en>::from_repr(value)
                    .ok_or_else(|| $crate::error::ErrorCode::ConstraintError.into())
            }

            fn nullable_from_stored(
                stored: &$crate::value::StoredValue,
            ) -> Result<Self, $crate::error::Error> {
                let value = <$t as $crate::traits::FromStored>::nullable_from_stored(stored)?;

                <$en>::from_repr(value)
                    .ok_or_else(|| $crate::error::ErrorCode::ConstraintError.into())
            }

            fn stored_is_null(
                stored: &$crate::value::StoredValue,
            ) -> Result<bool, $crate::error::Error> {
                <$t as $crate::traits::FromStored>::stored_is_null(stored)
            }
        }

        impl $crate::traits::ToStored for $en {
            fn to_stored(&self) -> Result<$crate::value::StoredValue, $crate::error::Error> {
                $crate::traits::ToStored::to_stored(&(*self as $t))
            }

            fn nullable_to_stored(
                &self,
            ) -> Result<$crate::value::StoredValue, $crate::error::Error> {
                $crate::traits::ToStored::nullable_to_stored(&(*self as $t))
            }

            fn stored_null() -> Result<$crate::value::StoredValue, $crate::error::Error> {
                <$t as $crate::traits::ToStored>::stored_null()
            }
        }
    };
}
