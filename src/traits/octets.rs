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

//! Storage support for bounded octet spans (i.e. byte arrays).
//!
//! Support is provided via two dedicated newtypes:
//! - `Octets<'a>` newtype which wraps an ordinary `&[u8]` - for writing
//!   borrowed byte spans
//! - `OctetsOwned<const N>` newtype which wraps a `Vec<u8, N>` for owned
//!   byte spans of fixed maximum length N
//!
//! Newtype wrapping keeps byte spans distinct from other slice-shaped
//! working types, so the stored kind stays unambiguous.

use core::borrow::{Borrow, BorrowMut};
use core::ops::{Deref, DerefMut};

use heapless::Vec;

use crate::error::{Error, ErrorCode};
use crate::value::StoredValue;

/// Newtype for borrowed byte spans (write side).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Octets<'a>(pub &'a [u8]);

impl<'a> Octets<'a> {
    pub const fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }
}

impl Deref for Octets<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl crate::traits::ToStored for Octets<'_> {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        let owned = self
            .0
            .try_into()
            .map_err(|_| Error::from(ErrorCode::NoSpace))?;

        Ok(StoredValue::Octets(Some(owned)))
    }

    fn stored_null() -> Result<StoredValue, Error> {
        Ok(StoredValue::Octets(None))
    }
}

/// Newtype for owned byte spans with a fixed maximum length
/// (represented by a `Vec<u8, N>`)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct OctetsOwned<const N: usize> {
    pub vec: Vec<u8, N>,
}

impl<const N: usize> OctetsOwned<N> {
    /// Create a new empty `OctetsOwned` instance
    pub const fn new() -> Self {
        Self {
            vec: Vec::<u8, N>::new(),
        }
    }
}

impl<const N: usize> Default for OctetsOwned<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Borrow<[u8]> for OctetsOwned<N> {
    fn borrow(&self) -> &[u8] {
        &self.vec
    }
}

impl<const N: usize> BorrowMut<[u8]> for OctetsOwned<N> {
    fn borrow_mut(&mut self) -> &mut [u8] {
        &mut self.vec
    }
}

impl<const N: usize> Deref for OctetsOwned<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<const N: usize> DerefMut for OctetsOwned<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for OctetsOwned<N> {
    type Error = Error;

    fn try_from(slice: &'a [u8]) -> Result<Self, Self::Error> {
        Ok(Self {
            vec: slice.try_into().map_err(|_| ErrorCode::NoSpace)?,
        })
    }
}

impl<const N: usize> crate::traits::FromStored for OctetsOwned<N> {
    fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
        match stored {
            StoredValue::Octets(Some(v)) => v.as_slice().try_into(),
            StoredValue::Octets(None) => Err(ErrorCode::ConstraintError.into()),
            _ => Err(ErrorCode::InvalidDataType.into()),
        }
    }

    fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
        match stored {
            StoredValue::Octets(payload) => Ok(payload.is_none()),
            _ => Err(ErrorCode::InvalidDataType.into()),
        }
    }
}

impl<const N: usize> crate::traits::ToStored for OctetsOwned<N> {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        Octets::new(&self.vec).to_stored()
    }

    fn stored_null() -> Result<StoredValue, Error> {
        Ok(StoredValue::Octets(None))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::traits::{FromStored, Nullable, Octets, OctetsOwned, ToStored};
    use crate::value::StoredValue;

    #[test]
    fn borrowed_write_owned_read() {
        let stored = Octets::new(&[0xDE, 0xAD, 0xBE, 0xEF]).to_stored().unwrap();

        let read = OctetsOwned::<8>::from_stored(&stored).unwrap();
        assert_eq!(&*read, &[0xDE, 0xAD, 0xBE, 0xEF]);

        assert_eq!(
            OctetsOwned::<2>::from_stored(&stored).unwrap_err().code(),
            ErrorCode::NoSpace
        );
    }

    #[test]
    fn absent_flag() {
        let null = Nullable::<OctetsOwned<8>>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::Octets(None));

        assert!(Nullable::<OctetsOwned<8>>::from_stored(&null)
            .unwrap()
            .is_none());
        assert_eq!(
            OctetsOwned::<8>::from_stored(&null).unwrap_err().code(),
            ErrorCode::ConstraintError
        );
    }

    #[test]
    fn string_and_octet_kinds_do_not_alias() {
        let stored = "abc".to_stored().unwrap();

        assert_eq!(
            OctetsOwned::<8>::from_stored(&stored).unwrap_err().code(),
            ErrorCode::InvalidDataType
        );
    }
}
