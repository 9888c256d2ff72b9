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

//! Storage support for `bitflags!` bitmap working types.
//! Bitmaps are stored as their underlying unsigned integer kind.

/// Re-export of the `bitflags!` macro: the standard one, or `defmt::bitflags!`
/// when `defmt` is enabled so that the flags get a `Format` implementation.
#[cfg(not(feature = "defmt"))]
pub use bitflags::bitflags;

#[cfg(feature = "defmt")]
pub use defmt::bitflags;

/// Implements `FromStored`/`ToStored` for the given bitmap type that was
/// created using `bitflags!`, stored as the given underlying integer type.
///
/// NOTE:
///   - stored values carrying flag bits that are not defined for the type
///     are rejected with `InvalidData` rather than silently truncated
#[macro_export]
macro_rules! bitflags_attr {
    ($enum_name:ident, $t:ty) => {
        impl $crate::traits::FromStored for $enum_name {
            fn from_stored(
                stored: &$crate::value::StoredValue,
            ) -> Result<Self, $crate::error::Error> {
                Self::from_bits(<$t as $crate::traits::FromStored>::from_stored(stored)?)
                    .ok_or_else(|| {
                        $crate::error::Error::from($crate::error::ErrorCode::InvalidData)
                    })
            }
        }

        impl $crate::traits::ToStored for $enum_name {
            fn to_stored(&self) -> Result<$crate::value::StoredValue, $crate::error::Error> {
                $crate::traits::ToStored::to_stored(&self.bits())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::traits::{FromStored, ToStored};
    use crate::value::StoredValue;

    bitflags::bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Features: u32 {
            const LIGHTING = 0x01;
            const DEAD_FRONT = 0x02;
        }
    }

    bitflags_attr!(Features, u32);

    #[test]
    fn round_trip() {
        let flags = Features::LIGHTING | Features::DEAD_FRONT;

        let stored = flags.to_stored().unwrap();
        assert_eq!(stored, StoredValue::U32(0x03));
        assert_eq!(Features::from_stored(&stored).unwrap(), flags);
    }

    #[test]
    fn unknown_bits_rejected() {
        assert_eq!(
            Features::from_stored(&StoredValue::U32(0x80)).unwrap_err().code(),
            ErrorCode::InvalidData
        );
    }
}
