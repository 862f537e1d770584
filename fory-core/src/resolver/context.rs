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

//! Per-stream state. A context is owned by exactly one serialize or
//! deserialize call; `reset` returns it to its initial state so callers may
//! pool contexts instead of reallocating them.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::fory::Fory;
use crate::meta::{MetaString, MetaStringDecoder, TypeMeta};
use crate::resolver::meta_resolver::{MetaReaderResolver, MetaWriterResolver};
use crate::resolver::metastring_resolver::{MetaStringReaderResolver, MetaStringWriterResolver};
use crate::resolver::ref_resolver::{RefReader, RefWriter};
use crate::resolver::type_resolver::TypeResolver;
use crate::types::Mode;
use std::rc::Rc;

pub struct WriteContext<'a> {
    pub writer: Writer,
    fory: &'a Fory,
    pub ref_writer: RefWriter,
    metastring_resolver: MetaStringWriterResolver,
    meta_resolver: MetaWriterResolver,
}

impl<'a> WriteContext<'a> {
    pub fn new(fory: &'a Fory) -> WriteContext<'a> {
        WriteContext {
            writer: Writer::default(),
            fory,
            ref_writer: RefWriter::new(),
            metastring_resolver: MetaStringWriterResolver::default(),
            meta_resolver: MetaWriterResolver::default(),
        }
    }

    pub fn get_fory(&self) -> &'a Fory {
        self.fory
    }

    pub fn get_type_resolver(&self) -> &'a TypeResolver {
        self.fory.get_type_resolver()
    }

    pub fn mode(&self) -> Mode {
        self.fory.get_mode()
    }

    pub fn write_meta_string(&mut self, ms: &MetaString) {
        self.metastring_resolver
            .write_meta_string(&mut self.writer, ms);
    }

    pub fn push_type_meta(&mut self, key: std::any::TypeId, type_def: &[u8]) {
        self.meta_resolver.push(&mut self.writer, key, type_def);
    }

    pub fn reset(&mut self) {
        self.writer.clear();
        self.ref_writer.clear();
        self.metastring_resolver.reset();
        self.meta_resolver.reset();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

pub struct ReadContext<'a, 'b> {
    pub reader: &'b mut Reader<'a>,
    fory: &'b Fory,
    pub ref_reader: RefReader,
    metastring_resolver: MetaStringReaderResolver,
    meta_resolver: MetaReaderResolver,
}

impl<'a, 'b> ReadContext<'a, 'b> {
    pub fn new(fory: &'b Fory, reader: &'b mut Reader<'a>) -> ReadContext<'a, 'b> {
        ReadContext {
            reader,
            fory,
            ref_reader: RefReader::new(),
            metastring_resolver: MetaStringReaderResolver::default(),
            meta_resolver: MetaReaderResolver::default(),
        }
    }

    pub fn get_fory(&self) -> &'b Fory {
        self.fory
    }

    pub fn get_type_resolver(&self) -> &'b TypeResolver {
        self.fory.get_type_resolver()
    }

    pub fn mode(&self) -> Mode {
        self.fory.get_mode()
    }

    pub fn read_meta_string(
        &mut self,
        decoder: &MetaStringDecoder,
    ) -> Result<Rc<MetaString>, Error> {
        self.metastring_resolver
            .read_meta_string(self.reader, decoder)
    }

    pub fn read_type_meta(&mut self) -> Result<Rc<TypeMeta>, Error> {
        self.meta_resolver.read(self.reader)
    }

    pub fn reset(&mut self) {
        self.ref_reader.clear();
        self.metastring_resolver.reset();
        self.meta_resolver.reset();
    }
}
