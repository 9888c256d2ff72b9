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

//! Storage support for bounded utf8 strings.
//!
//! - `&str` is used for writing borrowed strings
//! - `String<N>` (from `heapless`) is used for reading and writing owned
//!   strings of fixed maximum length N
//!
//! String slots carry an explicit present/absent flag instead of a sentinel;
//! reading an absent slot through a non-nullable working type fails with
//! `ConstraintError`, while `Nullable<..>` maps it to null.

use heapless::String;

use crate::error::{Error, ErrorCode};
use crate::value::StoredValue;

impl crate::traits::ToStored for &str {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        let owned = (*self)
            .try_into()
            .map_err(|_| Error::from(ErrorCode::NoSpace))?;

        Ok(StoredValue::Utf8(Some(owned)))
    }

    fn stored_null() -> Result<StoredValue, Error> {
        Ok(StoredValue::Utf8(None))
    }
}

impl<const N: usize> crate::traits::FromStored for String<N> {
    fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
        match stored {
            StoredValue::Utf8(Some(s)) => s
                .as_str()
                .try_into()
                .map_err(|_| ErrorCode::NoSpace.into()),
            StoredValue::Utf8(None) => Err(ErrorCode::ConstraintError.into()),
            _ => Err(ErrorCode::InvalidDataType.into()),
        }
    }

    fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
        match stored {
            StoredValue::Utf8(payload) => Ok(payload.is_none()),
            _ => Err(ErrorCode::InvalidDataType.into()),
        }
    }
}

impl<const N: usize> crate::traits::ToStored for String<N> {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        self.as_str().to_stored()
    }

    fn stored_null() -> Result<StoredValue, Error> {
        Ok(StoredValue::Utf8(None))
    }
}

#[cfg(test)]
mod tests {
    use heapless::String;

    use crate::error::ErrorCode;
    use crate::traits::{FromStored, Nullable, ToStored};
    use crate::value::StoredValue;

    #[test]
    fn borrowed_write_owned_read() {
        let stored = "living room".to_stored().unwrap();

        let read = String::<32>::from_stored(&stored).unwrap();
        assert_eq!(read.as_str(), "living room");

        // The owned bound is the reader's choice and may be too small
        assert_eq!(
            String::<4>::from_stored(&stored).unwrap_err().code(),
            ErrorCode::NoSpace
        );
    }

    #[test]
    fn absent_flag() {
        let null = Nullable::<String<32>>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::Utf8(None));

        assert!(Nullable::<String<32>>::from_stored(&null).unwrap().is_none());

        // Non-nullable reads of an absent slot fail instead of fabricating
        // an empty string
        assert_eq!(
            String::<32>::from_stored(&null).unwrap_err().code(),
            ErrorCode::ConstraintError
        );
    }

    #[test]
    fn empty_is_present() {
        let stored = "".to_stored().unwrap();

        assert!(!<String<8>>::stored_is_null(&stored).unwrap());
        assert_eq!(String::<8>::from_stored(&stored).unwrap().as_str(), "");
    }
}
