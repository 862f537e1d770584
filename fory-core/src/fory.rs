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

//! The top-level driver: one header byte, then the root value written as a
//! reference-trackable value. Every per-stream table (references,
//! MetaStrings, TypeMetas) lives in the context created per call.

use crate::buffer::Reader;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{Serializer, StructSerializer};
use crate::types::config_flags::{IS_CROSS_LANGUAGE_FLAG, IS_NULL_FLAG, IS_OUT_OF_BAND_FLAG};
use crate::types::{Mode, RefMode};

pub struct Fory {
    type_resolver: TypeResolver,
}

impl Default for Fory {
    fn default() -> Self {
        Fory::new(Mode::SchemaConsistent)
    }
}

impl Fory {
    pub fn new(mode: Mode) -> Fory {
        Fory {
            type_resolver: TypeResolver::new(mode),
        }
    }

    /// Builder-style mode selection; call before any registration, the
    /// registry is rebuilt for the new mode.
    pub fn mode(self, mode: Mode) -> Fory {
        Fory::new(mode)
    }

    pub fn get_mode(&self) -> Mode {
        self.type_resolver.mode()
    }

    pub fn get_type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    /// Registers a struct under a numeric id (ids below 64 are reserved).
    pub fn register<T: StructSerializer>(&mut self, id: u32) -> Result<(), Error> {
        self.type_resolver
            .register_by_id::<T>(id, crate::types::UserKind::Struct, Some(T::fory_fields))
    }

    pub fn register_by_namespace<T: StructSerializer>(
        &mut self,
        namespace: &str,
        type_name: &str,
    ) -> Result<(), Error> {
        self.type_resolver.register_by_name::<T>(
            namespace,
            type_name,
            crate::types::UserKind::Struct,
            Some(T::fory_fields),
        )
    }

    pub fn register_by_name<T: StructSerializer>(&mut self, type_name: &str) -> Result<(), Error> {
        self.register_by_namespace::<T>("", type_name)
    }

    /// Registers a type that carries its own body codec: enums and
    /// extension types.
    pub fn register_serializer<T: Serializer>(&mut self, id: u32) -> Result<(), Error> {
        self.type_resolver
            .register_by_id::<T>(id, T::fory_user_kind(), None)
    }

    pub fn register_serializer_by_namespace<T: Serializer>(
        &mut self,
        namespace: &str,
        type_name: &str,
    ) -> Result<(), Error> {
        self.type_resolver
            .register_by_name::<T>(namespace, type_name, T::fory_user_kind(), None)
    }

    pub fn register_serializer_by_name<T: Serializer>(
        &mut self,
        type_name: &str,
    ) -> Result<(), Error> {
        self.register_serializer_by_namespace::<T>("", type_name)
    }

    pub fn serialize<T: Serializer>(&self, record: &T) -> Result<Vec<u8>, Error> {
        let mut context = WriteContext::new(self);
        self.write_root(record, &mut context)?;
        Ok(context.into_bytes())
    }

    /// Appends one stream to `buf`, returning the number of bytes written.
    /// Streams are self-delimiting, so several can share one buffer.
    pub fn serialize_to<T: Serializer>(
        &self,
        record: &T,
        buf: &mut Vec<u8>,
    ) -> Result<usize, Error> {
        let bytes = self.serialize(record)?;
        buf.extend_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn write_root<T: Serializer>(
        &self,
        record: &T,
        context: &mut WriteContext,
    ) -> Result<(), Error> {
        context.writer.reserve(T::fory_reserved_space() + 2);
        if record.fory_is_none() {
            context
                .writer
                .write_u8(IS_NULL_FLAG | IS_CROSS_LANGUAGE_FLAG);
            return Ok(());
        }
        context.writer.write_u8(IS_CROSS_LANGUAGE_FLAG);
        record.fory_write(context, RefMode::Tracking, true)
    }

    pub fn deserialize<T: Serializer>(&self, bf: &[u8]) -> Result<T, Error> {
        let mut reader = Reader::new(bf);
        self.deserialize_from(&mut reader)
    }

    /// Reads one stream from the reader's current position, leaving the
    /// cursor after it.
    pub fn deserialize_from<T: Serializer>(&self, reader: &mut Reader) -> Result<T, Error> {
        let mut context = ReadContext::new(self, reader);
        let bitmap = context.reader.read_u8()?;
        ensure!(
            bitmap & IS_CROSS_LANGUAGE_FLAG != 0,
            Error::UnsupportedStream("the cross-language bit is not set".into())
        );
        ensure!(
            bitmap & IS_OUT_OF_BAND_FLAG == 0,
            Error::UnsupportedStream("out-of-band buffers are reserved and not supported".into())
        );
        ensure!(
            bitmap & !(IS_NULL_FLAG | IS_CROSS_LANGUAGE_FLAG) == 0,
            Error::UnsupportedStream(format!("reserved header bits set: {bitmap:#010b}").into())
        );
        if bitmap & IS_NULL_FLAG != 0 {
            return Ok(T::fory_default());
        }
        T::fory_read(&mut context, RefMode::Tracking, true)
    }
}
