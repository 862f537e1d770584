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

//! Typed-data arrays: varuint32 element count followed by the raw
//! little-endian element bytes. `Vec<u8>` is the BINARY kind.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::Serializer;
use crate::types::{
    BINARY, BOOL_ARRAY, FLOAT32_ARRAY, FLOAT64_ARRAY, INT16_ARRAY, INT32_ARRAY, INT64_ARRAY,
    INT8_ARRAY,
};
use std::mem;

impl Serializer for Vec<u8> {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_varuint32(self.len() as u32);
        context.writer.write_bytes(self);
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = context.reader.read_varuint32()? as usize;
        Ok(context.reader.read_bytes(len)?.to_vec())
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(BINARY)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl Serializer for Vec<bool> {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_varuint32(self.len() as u32);
        context.writer.reserve(self.len());
        for v in self {
            context.writer.write_u8(*v as u8);
        }
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = context.reader.read_varuint32()? as usize;
        let bytes = context.reader.read_bytes(len)?;
        Ok(bytes.iter().map(|b| *b != 0).collect())
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(BOOL_ARRAY)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

macro_rules! impl_typed_array {
    ($ty:ty, $type_id:expr, $write:ident, $read:ident) => {
        impl Serializer for Vec<$ty> {
            fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                context.writer.write_varuint32(self.len() as u32);
                context.writer.reserve(self.len() * mem::size_of::<$ty>());
                for v in self {
                    context.writer.$write(*v);
                }
                Ok(())
            }

            fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
                let len = context.reader.read_varuint32()? as usize;
                let available = context.reader.remaining() / mem::size_of::<$ty>();
                let mut items = Vec::with_capacity(len.min(available));
                for _ in 0..len {
                    items.push(context.reader.$read()?);
                }
                Ok(items)
            }

            fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
                Ok($type_id)
            }

            fn fory_reserved_space() -> usize {
                mem::size_of::<u32>()
            }
        }
    };
}

impl_typed_array!(i8, INT8_ARRAY, write_i8, read_i8);
impl_typed_array!(i16, INT16_ARRAY, write_i16, read_i16);
impl_typed_array!(i32, INT32_ARRAY, write_i32, read_i32);
impl_typed_array!(i64, INT64_ARRAY, write_i64, read_i64);
impl_typed_array!(f32, FLOAT32_ARRAY, write_f32, read_f32);
impl_typed_array!(f64, FLOAT64_ARRAY, write_f64, read_f64);
