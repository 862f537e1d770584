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

//! Per-stream interning of MetaStrings. First occurrence writes
//! `len << 1`, the encoding tag, and the packed body; later occurrences
//! write `(index << 1) | 1`, where index is the first-emission order.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::meta::{Encoding, MetaString, MetaStringDecoder};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct MetaStringWriterResolver {
    index: HashMap<MetaString, u32>,
}

impl MetaStringWriterResolver {
    pub fn write_meta_string(&mut self, writer: &mut Writer, ms: &MetaString) {
        if let Some(&idx) = self.index.get(ms) {
            writer.write_varuint32((idx << 1) | 1);
        } else {
            let idx = self.index.len() as u32;
            writer.write_varuint32((ms.bytes.len() as u32) << 1);
            writer.write_u8(ms.encoding as u8);
            writer.write_bytes(&ms.bytes);
            self.index.insert(ms.clone(), idx);
        }
    }

    pub fn reset(&mut self) {
        self.index.clear();
    }
}

#[derive(Default)]
pub struct MetaStringReaderResolver {
    table: Vec<Rc<MetaString>>,
}

impl MetaStringReaderResolver {
    pub fn read_meta_string(
        &mut self,
        reader: &mut Reader,
        decoder: &MetaStringDecoder,
    ) -> Result<Rc<MetaString>, Error> {
        let header = reader.read_varuint32()?;
        if header & 1 == 1 {
            let idx = (header >> 1) as usize;
            self.table.get(idx).cloned().ok_or_else(|| {
                Error::ref_integrity(format!(
                    "meta string index {idx} out of range, only {} interned",
                    self.table.len()
                ))
            })
        } else {
            let len = (header >> 1) as usize;
            let encoding = Encoding::try_from_u8(reader.read_u8()?)?;
            let bytes = reader.read_bytes(len)?;
            let ms = Rc::new(decoder.decode(bytes, encoding)?);
            self.table.push(ms.clone());
            Ok(ms)
        }
    }

    pub fn reset(&mut self) {
        self.table.clear();
    }
}
