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

use core::num::Wrapping;

use rand_core::RngCore;

/// A wrapping change counter tracking the data version of one attribute slot.
///
/// Reporting layers compare versions across reads to detect changes, so the
/// initial value is best randomized per process start.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dataver(#[cfg_attr(feature = "defmt", defmt(Debug2Format))] Wrapping<u32>);

impl Dataver {
    /// Create a new data version with a random initial value.
    pub fn new_rand<R: RngCore>(rand: &mut R) -> Self {
        Self::new(rand.next_u32())
    }

    /// Create a new data version with the given initial value.
    pub const fn new(initial: u32) -> Self {
        Self(Wrapping(initial))
    }

    /// Return the current version.
    pub fn get(&self) -> u32 {
        self.0 .0
    }

    /// Bump the version and return the new value.
    pub fn changed(&mut self) -> u32 {
        self.0 += Wrapping(1);

        self.get()
    }
}
