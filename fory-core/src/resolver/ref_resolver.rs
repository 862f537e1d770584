// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::buffer::Writer;
use crate::error::Error;
use crate::types::RefFlag;
use std::any::Any;
use std::collections::HashMap;

/// Write-side reference state: maps shared-handle data pointers to the
/// ref-id assigned at first emission. The graph being written keeps every
/// tracked allocation alive, so a pointer uniquely identifies an object for
/// the duration of one stream.
#[derive(Default)]
pub struct RefWriter {
    written: HashMap<usize, u32>,
    next_ref_id: u32,
}

impl RefWriter {
    pub fn new() -> RefWriter {
        RefWriter::default()
    }

    /// Emits the ref flag for a shared handle. Returns true when the object
    /// was already written (a Ref back-reference was emitted and the caller
    /// must not write the body); false when RefValue was emitted and the
    /// object now owns the next ref-id.
    pub fn try_write_ref(&mut self, writer: &mut Writer, ptr: usize) -> bool {
        if let Some(&ref_id) = self.written.get(&ptr) {
            writer.write_i8(RefFlag::Ref as i8);
            writer.write_varuint32(ref_id);
            true
        } else {
            writer.write_i8(RefFlag::RefValue as i8);
            self.written.insert(ptr, self.next_ref_id);
            self.next_ref_id += 1;
            false
        }
    }

    pub fn clear(&mut self) {
        self.written.clear();
        self.next_ref_id = 0;
    }
}

/// Read-side reference state: an ordered arena of already-materialized
/// shared handles, indexable by ref-id. Slots are reserved before the body
/// is read so cycles can resolve to partially-constructed containers.
#[derive(Default)]
pub struct RefReader {
    slots: Vec<Option<Box<dyn Any>>>,
}

impl RefReader {
    pub fn new() -> RefReader {
        RefReader::default()
    }

    /// Claims the next ref-id. The slot stays unregistered until `store` is
    /// called; a Ref arriving in between is a stream integrity error unless
    /// the container registered itself first.
    pub fn reserve(&mut self) -> u32 {
        self.slots.push(None);
        (self.slots.len() - 1) as u32
    }

    pub fn store(&mut self, ref_id: u32, handle: Box<dyn Any>) -> Result<(), Error> {
        let slot = self
            .slots
            .get_mut(ref_id as usize)
            .ok_or_else(|| Error::ref_integrity(format!("ref-id {ref_id} was never reserved")))?;
        *slot = Some(handle);
        Ok(())
    }

    pub fn get<T: Clone + 'static>(&self, ref_id: u32) -> Result<T, Error> {
        let slot = self.slots.get(ref_id as usize).ok_or_else(|| {
            Error::ref_integrity(format!(
                "ref-id {ref_id} out of range, only {} objects seen",
                self.slots.len()
            ))
        })?;
        let handle = slot.as_ref().ok_or_else(|| {
            Error::ref_integrity(format!("ref-id {ref_id} references an unregistered object"))
        })?;
        handle.downcast_ref::<T>().cloned().ok_or_else(|| {
            Error::ref_integrity(format!("ref-id {ref_id} holds a different type"))
        })
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
