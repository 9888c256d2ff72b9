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

//! The nullable variation of a working type.

use crate::error::Error;
use crate::value::StoredValue;

use super::{FromStored, ToStored};

/// Represents the nullable variation of a working type, where `T` is the
/// non-nullable subdomain of the type.
///
/// I.e. `Nullable<u8>` is the working representation of a nullable 8-bit
/// slot: the raw value `0xFF` reads as "null", every other raw value reads
/// as `Nullable::some(..)`, and writing `Nullable::some(0xFF)` is rejected
/// because it would be indistinguishable from an intentional null.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Nullable<T>(Option<T>);

impl<T> Nullable<T> {
    /// Create a new `Nullable` from an `Option`.
    pub const fn new(value: Option<T>) -> Self {
        Self(value)
    }

    /// Create a new, null `Nullable` value.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Create a new, non-null `Nullable` value.
    pub const fn some(value: T) -> Self {
        Self(Some(value))
    }

    /// Return whether the value is null.
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Return whether the value is not null.
    pub const fn is_some(&self) -> bool {
        self.0.is_some()
    }

    /// Return - as an `Option` - a reference to the wrapped value.
    pub const fn as_opt_ref(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Return - as an `Option` - a mutable reference to the wrapped value.
    pub fn as_opt_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    /// Consume the `Nullable` and return the wrapped value, if any.
    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self::new(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: FromStored> FromStored for Nullable<T> {
    fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
        if T::stored_is_null(stored)? {
            Ok(Self::none())
        } else {
            T::nullable_from_stored(stored).map(Self::some)
        }
    }
}

impl<T: ToStored> ToStored for Nullable<T> {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        match self.as_opt_ref() {
            Some(value) => value.nullable_to_stored(),
            None => T::stored_null(),
        }
    }
}
