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

//! Storage support for the odd-width unsigned integer kinds.
//!
//! Odd widths do not reinterpret as their wider relatives: a 24-bit slot is
//! read through `U24` (and widened to `u32` by the caller via `get()`), not
//! through `u32` directly. The null sentinel is the all-bits-one maximum of
//! the packed width.

use crate::error::{Error, ErrorCode};
use crate::value::{StoredValue, U24, U40, U48, U56};

macro_rules! stored_for_odd_uint {
    ($($t:ident)*) => {
        $(
            impl $crate::traits::FromStored for $t {
                fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    match stored {
                        StoredValue::$t(value) => Ok(*value),
                        _ => Err(ErrorCode::InvalidDataType.into()),
                    }
                }

                fn nullable_from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    let value = Self::from_stored(stored)?;

                    if value != $t::MAX {
                        Ok(value)
                    } else {
                        Err(ErrorCode::ConstraintError.into())
                    }
                }

                fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
                    Ok(Self::from_stored(stored)? == $t::MAX)
                }
            }

            impl $crate::traits::ToStored for $t {
                fn to_stored(&self) -> Result<StoredValue, Error> {
                    Ok(StoredValue::$t(*self))
                }

                fn nullable_to_stored(&self) -> Result<StoredValue, Error> {
                    if *self != $t::MAX {
                        Ok(StoredValue::$t(*self))
                    } else {
                        Err(ErrorCode::ConstraintError.into())
                    }
                }

                fn stored_null() -> Result<StoredValue, Error> {
                    Ok(StoredValue::$t($t::MAX))
                }
            }
        )*
    };
}

stored_for_odd_uint!(U24 U40 U48 U56);

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::traits::{FromStored, Nullable, ToStored};
    use crate::value::{StoredValue, U24};

    #[test]
    fn widened_round_trip() {
        let value = U24::try_from(0x00AB_CDEFu32).unwrap();

        let stored = value.to_stored().unwrap();
        assert_eq!(stored, StoredValue::U24(value));
        assert_eq!(U24::from_stored(&stored).unwrap().get(), 0x00AB_CDEF);
    }

    #[test]
    fn no_reinterpretation_as_wider_kind() {
        let stored = U24::try_from(1u32).unwrap().to_stored().unwrap();

        assert_eq!(
            u32::from_stored(&stored).unwrap_err().code(),
            ErrorCode::InvalidDataType
        );
    }

    #[test]
    fn packed_sentinel() {
        let null = Nullable::<U24>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::U24(U24::MAX));
        assert!(Nullable::<U24>::from_stored(&null).unwrap().is_none());

        assert_eq!(
            Nullable::some(U24::MAX).to_stored().unwrap_err().code(),
            ErrorCode::ConstraintError
        );
    }
}
