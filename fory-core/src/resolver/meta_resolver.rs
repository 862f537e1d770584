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

//! Per-stream "meta share" for TypeMeta: the first occurrence of a struct's
//! definition is emitted inline as `index << 1` followed by the definition
//! bytes; later occurrences reference it with `(index << 1) | 1`.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::meta::TypeMeta;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct MetaWriterResolver {
    index: HashMap<std::any::TypeId, u32>,
}

impl MetaWriterResolver {
    pub fn push(&mut self, writer: &mut Writer, key: std::any::TypeId, type_def: &[u8]) {
        if let Some(&idx) = self.index.get(&key) {
            writer.write_varuint32((idx << 1) | 1);
        } else {
            let idx = self.index.len() as u32;
            writer.write_varuint32(idx << 1);
            writer.write_bytes(type_def);
            self.index.insert(key, idx);
        }
    }

    pub fn reset(&mut self) {
        self.index.clear();
    }
}

#[derive(Default)]
pub struct MetaReaderResolver {
    table: Vec<Rc<TypeMeta>>,
}

impl MetaReaderResolver {
    pub fn read(&mut self, reader: &mut Reader) -> Result<Rc<TypeMeta>, Error> {
        let header = reader.read_varuint32()?;
        if header & 1 == 1 {
            let idx = (header >> 1) as usize;
            self.table.get(idx).cloned().ok_or_else(|| {
                Error::ref_integrity(format!(
                    "type meta index {idx} out of range, only {} interned",
                    self.table.len()
                ))
            })
        } else {
            let meta = Rc::new(TypeMeta::from_bytes(reader)?);
            self.table.push(meta.clone());
            Ok(meta)
        }
    }

    pub fn reset(&mut self) {
        self.table.clear();
    }
}
