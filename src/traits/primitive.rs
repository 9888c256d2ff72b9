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

//! Storage support for Rust primitive types.
//!
//! Fixed-width integers map 1:1 onto their storage kind. The null sentinel
//! of an integer kind is the type maximum for unsigned types and the type
//! minimum for signed types; floats reserve NaN. Plain (non-nullable)
//! decoding hands the raw value through untouched, sentinel included.

use crate::error::{Error, ErrorCode};
use crate::value::StoredValue;

macro_rules! fromstored_for_num {
    ($($t:ident => $var:ident)*) => {
        $(
            impl $crate::traits::FromStored for $t {
                fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    match stored {
                        StoredValue::$var(value) => Ok(*value),
                        _ => Err(ErrorCode::InvalidDataType.into()),
                    }
                }

                fn nullable_from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    let value = Self::from_stored(stored)?;

                    let in_range = if $t::MIN == 0 {
                        value != $t::MAX
                    } else {
                        value != $t::MIN
                    };

                    if in_range {
                        Ok(value)
                    } else {
                        Err(ErrorCode::ConstraintError.into())
                    }
                }

                fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
                    let value = Self::from_stored(stored)?;

                    Ok(if $t::MIN == 0 {
                        value == $t::MAX
                    } else {
                        value == $t::MIN
                    })
                }
            }
        )*
    };
}

macro_rules! tostored_for_num {
    ($($t:ident => $var:ident)*) => {
        $(
            impl $crate::traits::ToStored for $t {
                fn to_stored(&self) -> Result<StoredValue, Error> {
                    Ok(StoredValue::$var(*self))
                }

                fn nullable_to_stored(&self) -> Result<StoredValue, Error> {
                    let in_range = if $t::MIN == 0 {
                        *self != $t::MAX
                    } else {
                        *self != $t::MIN
                    };

                    if in_range {
                        Ok(StoredValue::$var(*self))
                    } else {
                        Err(ErrorCode::ConstraintError.into())
                    }
                }

                fn stored_null() -> Result<StoredValue, Error> {
                    Ok(StoredValue::$var(if $t::MIN == 0 { $t::MAX } else { $t::MIN }))
                }
            }
        )*
    };
}

macro_rules! fromstored_for_float {
    ($($t:ident => $var:ident)*) => {
        $(
            impl $crate::traits::FromStored for $t {
                fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    match stored {
                        StoredValue::$var(value) => Ok(*value),
                        _ => Err(ErrorCode::InvalidDataType.into()),
                    }
                }

                fn nullable_from_stored(stored: &StoredValue) -> Result<Self, Error> {
                    let value = Self::from_stored(stored)?;

                    if value.is_nan() {
                        Err(ErrorCode::ConstraintError.into())
                    } else {
                        Ok(value)
                    }
                }

                fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
                    Ok(Self::from_stored(stored)?.is_nan())
                }
            }
        )*
    };
}

macro_rules! tostored_for_float {
    ($($t:ident => $var:ident)*) => {
        $(
            impl $crate::traits::ToStored for $t {
                fn to_stored(&self) -> Result<StoredValue, Error> {
                    Ok(StoredValue::$var(*self))
                }

                fn nullable_to_stored(&self) -> Result<StoredValue, Error> {
                    if self.is_nan() {
                        Err(ErrorCode::ConstraintError.into())
                    } else {
                        Ok(StoredValue::$var(*self))
                    }
                }

                fn stored_null() -> Result<StoredValue, Error> {
                    Ok(StoredValue::$var($t::NAN))
                }
            }
        )*
    };
}

fromstored_for_num!(u8 => U8 u16 => U16 u32 => U32 u64 => U64 i8 => I8 i16 => I16 i32 => I32 i64 => I64);
tostored_for_num!(u8 => U8 u16 => U16 u32 => U32 u64 => U64 i8 => I8 i16 => I16 i32 => I32 i64 => I64);

fromstored_for_float!(f32 => F32 f64 => F64);
tostored_for_float!(f32 => F32 f64 => F64);

// Booleans cannot embed a sentinel in the one-bit kind, so the schema
// declares nullable booleans as 8-bit slots: 0 is false, 1 is true, 0xFF is
// null. The plain impls below use the boolean kind; the nullable method
// variants use the 8-bit kind.
const NULLABLE_BOOL_FALSE: u8 = 0;
const NULLABLE_BOOL_TRUE: u8 = 1;
const NULLABLE_BOOL_NULL: u8 = u8::MAX;

impl crate::traits::FromStored for bool {
    fn from_stored(stored: &StoredValue) -> Result<Self, Error> {
        match stored {
            StoredValue::Bool(value) => Ok(*value),
            _ => Err(ErrorCode::InvalidDataType.into()),
        }
    }

    fn nullable_from_stored(stored: &StoredValue) -> Result<Self, Error> {
        match u8::from_stored(stored)? {
            NULLABLE_BOOL_FALSE => Ok(false),
            NULLABLE_BOOL_TRUE => Ok(true),
            _ => Err(ErrorCode::ConstraintError.into()),
        }
    }

    fn stored_is_null(stored: &StoredValue) -> Result<bool, Error> {
        Ok(u8::from_stored(stored)? == NULLABLE_BOOL_NULL)
    }
}

impl crate::traits::ToStored for bool {
    fn to_stored(&self) -> Result<StoredValue, Error> {
        Ok(StoredValue::Bool(*self))
    }

    fn nullable_to_stored(&self) -> Result<StoredValue, Error> {
        Ok(StoredValue::U8(if *self {
            NULLABLE_BOOL_TRUE
        } else {
            NULLABLE_BOOL_FALSE
        }))
    }

    fn stored_null() -> Result<StoredValue, Error> {
        Ok(StoredValue::U8(NULLABLE_BOOL_NULL))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::traits::{FromStored, Nullable, ToStored};
    use crate::value::StoredValue;

    #[test]
    fn plain_round_trip() {
        assert_eq!(0x7Fu8.to_stored().unwrap(), StoredValue::U8(0x7F));
        assert_eq!(u8::from_stored(&StoredValue::U8(0x7F)).unwrap(), 0x7F);

        // A plain (non-nullable) read hands the sentinel through untouched
        assert_eq!(u8::from_stored(&StoredValue::U8(0xFF)).unwrap(), 0xFF);
        assert_eq!(i16::from_stored(&StoredValue::I16(i16::MIN)).unwrap(), i16::MIN);
    }

    #[test]
    fn kind_mismatch() {
        assert_eq!(
            u32::from_stored(&StoredValue::Bool(true)).unwrap_err().code(),
            ErrorCode::InvalidDataType
        );
        assert_eq!(
            u16::from_stored(&StoredValue::U8(1)).unwrap_err().code(),
            ErrorCode::InvalidDataType
        );
    }

    #[test]
    fn unsigned_sentinel() {
        let null = Nullable::<u8>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::U8(0xFF));
        assert!(Nullable::<u8>::from_stored(&null).unwrap().is_none());

        let value = Nullable::some(0x7Fu8).to_stored().unwrap();
        assert_eq!(
            Nullable::<u8>::from_stored(&value).unwrap(),
            Nullable::some(0x7F)
        );

        // A concrete value colliding with the sentinel is rejected, not
        // stored as an ambiguous null
        assert_eq!(
            Nullable::some(0xFFu8).to_stored().unwrap_err().code(),
            ErrorCode::ConstraintError
        );
    }

    #[test]
    fn signed_sentinel() {
        let null = Nullable::<i32>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::I32(i32::MIN));
        assert!(Nullable::<i32>::from_stored(&null).unwrap().is_none());

        assert_eq!(
            Nullable::some(i32::MIN).to_stored().unwrap_err().code(),
            ErrorCode::ConstraintError
        );
        assert!(Nullable::some(i32::MAX).to_stored().is_ok());
    }

    #[test]
    fn float_sentinel() {
        let null = Nullable::<f32>::none().to_stored().unwrap();
        assert!(Nullable::<f32>::from_stored(&null).unwrap().is_none());

        assert_eq!(
            Nullable::some(f32::NAN).to_stored().unwrap_err().code(),
            ErrorCode::ConstraintError
        );
        assert!(Nullable::some(1.5f32).to_stored().is_ok());
    }

    #[test]
    fn nullable_bool_is_a_byte() {
        let null = Nullable::<bool>::none().to_stored().unwrap();
        assert_eq!(null, StoredValue::U8(0xFF));
        assert!(Nullable::<bool>::from_stored(&null).unwrap().is_none());

        let stored = Nullable::some(true).to_stored().unwrap();
        assert_eq!(stored, StoredValue::U8(1));
        assert_eq!(
            Nullable::<bool>::from_stored(&stored).unwrap(),
            Nullable::some(true)
        );

        // Bytes other than 0, 1 and the sentinel are out of domain
        assert_eq!(
            Nullable::<bool>::from_stored(&StoredValue::U8(2))
                .unwrap_err()
                .code(),
            ErrorCode::ConstraintError
        );
    }
}
