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

//! Attribute state storage for bridged Matter (Smart-Home) devices.
//!
//! This crate implements the shared store that a Matter bridge keeps its
//! attribute values in: one typed slot per `(endpoint, cluster, attribute)`
//! path, declared up-front by a schema and alive for the lifetime of the
//! process. Accessor layers read and write slots through natural working
//! types - integers of all the Matter widths (including the packed
//! 24/40/48/56-bit ones), booleans, floats, nullable wrappers, bounded
//! strings and octet spans - while storage stays compact and type-erased
//! internally.
//!
//! The store never hands out references into its storage (reads copy out,
//! writes copy in) and guards all state behind a blocking mutex, so a
//! single instance can be shared by any number of concurrent call-sites.
//!
//! # Examples
//! ```
//! use matter_attr_store::path::AttrPath;
//! use matter_attr_store::sync::StdRawMutex;
//! use matter_attr_store::traits::Nullable;
//! use matter_attr_store::value::StorageKind;
//! use matter_attr_store::{AttrDef, AttrStateCache};
//!
//! // An On/Off light with a Level Control cluster on endpoint 1,
//! // declared sorted by path
//! const DEFS: &[AttrDef] = &[
//!     AttrDef::new(AttrPath::new(1, 0x0006, 0x0000), StorageKind::Bool),
//!     AttrDef::new(AttrPath::new(1, 0x0008, 0x0000), StorageKind::U8),
//! ];
//!
//! let store = AttrStateCache::<16, StdRawMutex>::new(DEFS).unwrap();
//!
//! let on_off = AttrPath::new(1, 0x0006, 0x0000);
//! store.set(&on_off, true).unwrap();
//! assert_eq!(store.get::<bool>(&on_off).unwrap(), true);
//!
//! // CurrentLevel is nullable: null travels as the type's reserved sentinel
//! let current_level = AttrPath::new(1, 0x0008, 0x0000);
//! store.set(&current_level, Nullable::<u8>::none()).unwrap();
//! assert!(store.get::<Nullable<u8>>(&current_level).unwrap().is_none());
//!
//! store.set(&current_level, Nullable::some(0x7Fu8)).unwrap();
//! assert_eq!(
//!     store.get::<Nullable<u8>>(&current_level).unwrap(),
//!     Nullable::some(0x7F)
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod dataver;
pub mod error;
pub mod path;
pub mod store;
pub mod sync;
pub mod traits;
pub mod value;

pub use store::*;
