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

//! The attribute state store itself.
//!
//! [`AttrStateCache`] is the single source of truth for bridged-device
//! attribute values: a keyed store of typed slots addressed by
//! [`AttrPath`], declared once at construction and alive for the lifetime
//! of the store. All access copies - readers get a copy of the stored
//! bytes, writers hand in a value that is copied into the slot - so the
//! store can be shared by any number of call-sites without handing out
//! references into its storage.

use core::cell::RefCell;
use core::cmp::Ordering;

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;

use log::{debug, warn};

use rand_core::RngCore;

use crate::dataver::Dataver;
use crate::error::{Error, ErrorCode};
use crate::path::AttrPath;
use crate::traits::{FromStored, ToStored};
use crate::value::{StorageKind, StoredValue, MAX_OCTETS_SIZE, MAX_STRING_SIZE};

/// The default maximum number of attribute slots tracked by the store.
pub const DEFAULT_MAX_ATTRS: usize = 128;

/// A type alias for `AttrStateCache` with the default slot capacity.
pub type DefaultAttrStateCache<'a> = AttrStateCache<'a, DEFAULT_MAX_ATTRS>;

/// One entry of the schema: the declaration of a single attribute slot.
///
/// The storage kind (and, for bounded kinds, the maximum payload length)
/// is fixed here and never changes for the lifetime of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttrDef {
    /// The path of the slot
    pub path: AttrPath,
    /// The storage kind of the slot
    pub kind: StorageKind,
    /// The maximum payload length in bytes; only meaningful for the
    /// bounded kinds, where it must be non-zero
    pub max_len: u16,
}

impl AttrDef {
    /// Declare a scalar slot of the given kind.
    ///
    /// For the bounded kinds use `string` / `octets` instead, which carry
    /// the slot's maximum payload length.
    pub const fn new(path: AttrPath, kind: StorageKind) -> Self {
        Self {
            path,
            kind,
            max_len: 0,
        }
    }

    /// Declare a character-string slot with the given maximum length.
    pub const fn string(path: AttrPath, max_len: u16) -> Self {
        Self {
            path,
            kind: StorageKind::Utf8,
            max_len,
        }
    }

    /// Declare an octet-span slot with the given maximum length.
    pub const fn octets(path: AttrPath, max_len: u16) -> Self {
        Self {
            path,
            kind: StorageKind::Octets,
            max_len,
        }
    }

    fn buffer_capacity(&self) -> Option<usize> {
        match self.kind {
            StorageKind::Utf8 => Some(MAX_STRING_SIZE),
            StorageKind::Octets => Some(MAX_OCTETS_SIZE),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Slot {
    value: StoredValue,
    dataver: Dataver,
}

#[derive(Debug)]
struct CacheInner<const N: usize> {
    slots: heapless::Vec<Slot, N>,
}

/// The process-wide store of attribute state, shared by every accessor
/// call-site.
///
/// The `N` type parameter bounds the number of slots the store can track;
/// the schema is the `&[AttrDef]` slice handed to the constructor, sorted
/// ascending by path. The store is generic over the `RawMutex` guarding
/// its state, so hosts pick the synchronization matching their concurrency
/// model (`NoopRawMutex` on a single executor, `StdRawMutex` across OS
/// threads).
///
/// There is deliberately no hidden global instance: the host constructs
/// the store once and passes it by reference to whatever needs attribute
/// access, which also lets tests run against isolated instances.
#[derive(Debug)]
pub struct AttrStateCache<'a, const N: usize = DEFAULT_MAX_ATTRS, M = NoopRawMutex>
where
    M: RawMutex,
{
    defs: &'a [AttrDef],
    state: Mutex<M, RefCell<CacheInner<N>>>,
}

impl<'a, const N: usize, M> AttrStateCache<'a, N, M>
where
    M: RawMutex,
{
    /// Create a store over the given schema, with all data versions
    /// starting at zero.
    ///
    /// Slots start out at their kind's default value (zero for scalars,
    /// absent for bounded kinds); a bridge that needs schema defaults
    /// writes them before exposing the store.
    pub fn new(defs: &'a [AttrDef]) -> Result<Self, Error> {
        Self::create(defs, || Dataver::new(0))
    }

    /// Create a store over the given schema, with randomized initial data
    /// versions so that version sequences differ across process restarts.
    pub fn new_rand<R: RngCore>(defs: &'a [AttrDef], rand: &mut R) -> Result<Self, Error> {
        Self::create(defs, || Dataver::new_rand(rand))
    }

    fn create(defs: &'a [AttrDef], mut dataver: impl FnMut() -> Dataver) -> Result<Self, Error> {
        Self::check_schema(defs)?;

        let mut slots = heapless::Vec::new();
        for def in defs {
            slots
                .push(Slot {
                    value: StoredValue::default_for(def.kind),
                    dataver: dataver(),
                })
                .map_err(|_| Error::from(ErrorCode::NoSpace))?;
        }

        Ok(Self {
            defs,
            state: Mutex::new(RefCell::new(CacheInner { slots })),
        })
    }

    /// The schema this store was declared with.
    pub fn defs(&self) -> &'a [AttrDef] {
        self.defs
    }

    /// Read the raw stored representation of a slot.
    ///
    /// Pure read: a copy of the stored bytes, sentinel uninterpreted.
    pub fn get_raw(&self, path: &AttrPath) -> Result<StoredValue, Error> {
        let index = self.index_of(path)?;

        Ok(self
            .state
            .lock(|state| state.borrow().slots[index].value.clone()))
    }

    /// Replace the raw stored representation of a slot.
    ///
    /// The write is atomic with respect to concurrent readers and
    /// all-or-nothing: on any failure (unknown path, kind mismatch,
    /// payload over the declared maximum) the previously stored value is
    /// left unchanged.
    pub fn set_raw(&self, path: &AttrPath, value: StoredValue) -> Result<(), Error> {
        let index = self.index_of(path)?;
        let def = &self.defs[index];

        if value.kind() != def.kind {
            warn!(
                "Attribute {}: write of kind {:?} to a slot of kind {:?}",
                path,
                value.kind(),
                def.kind
            );
            return Err(ErrorCode::InvalidDataType.into());
        }

        if let Some(len) = value.payload_len() {
            if len > def.max_len as usize {
                debug!(
                    "Attribute {}: payload of {} bytes exceeds the declared maximum of {}",
                    path, len, def.max_len
                );
                return Err(ErrorCode::NoSpace.into());
            }
        }

        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let slot = &mut state.slots[index];

            if !slot.value.bitwise_eq(&value) {
                slot.value = value;
                slot.dataver.changed();
            }
        });

        Ok(())
    }

    /// Read a slot through its working type.
    pub fn get<T: FromStored>(&self, path: &AttrPath) -> Result<T, Error> {
        T::from_stored(&self.get_raw(path)?)
    }

    /// Write a slot through its working type.
    pub fn set<T: ToStored>(&self, path: &AttrPath, value: T) -> Result<(), Error> {
        self.set_raw(path, value.to_stored()?)
    }

    /// Return the current data version of a slot.
    ///
    /// The version is bumped whenever a successful write actually changes
    /// the stored bytes; failed and no-op writes leave it untouched.
    pub fn dataver(&self, path: &AttrPath) -> Result<u32, Error> {
        let index = self.index_of(path)?;

        Ok(self
            .state
            .lock(|state| state.borrow().slots[index].dataver.get()))
    }

    fn index_of(&self, path: &AttrPath) -> Result<usize, Error> {
        self.defs
            .binary_search_by(|def| def.path.cmp(path))
            .map_err(|_| {
                debug!("Attribute {} not found", path);
                ErrorCode::AttributeNotFound.into()
            })
    }

    fn check_schema(defs: &[AttrDef]) -> Result<(), Error> {
        for pair in defs.windows(2) {
            match pair[0].path.cmp(&pair[1].path) {
                Ordering::Less => (),
                Ordering::Equal => {
                    warn!("Attribute {} declared twice", pair[1].path);
                    return Err(ErrorCode::Duplicate.into());
                }
                Ordering::Greater => {
                    warn!("Schema not sorted at attribute {}", pair[1].path);
                    return Err(ErrorCode::InvalidSchema.into());
                }
            }
        }

        for def in defs {
            if let Some(capacity) = def.buffer_capacity() {
                if def.max_len == 0 || def.max_len as usize > capacity {
                    warn!(
                        "Attribute {}: declared maximum of {} bytes is invalid",
                        def.path, def.max_len
                    );
                    return Err(ErrorCode::InvalidSchema.into());
                }
            }
        }

        Ok(())
    }
}
