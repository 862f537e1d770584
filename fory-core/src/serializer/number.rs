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

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{FLOAT32, FLOAT64, INT16, INT8, UINT8, VAR_INT32, VAR_INT64};
use std::mem;

macro_rules! impl_num_serializer {
    ($ty:ty, $type_id:expr, $write:ident, $read:ident) => {
        impl Serializer for $ty {
            fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                context.writer.$write(*self);
                Ok(())
            }

            fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
                context.reader.$read()
            }

            fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
                Ok($type_id)
            }

            fn fory_reserved_space() -> usize {
                mem::size_of::<$ty>()
            }
        }

        impl ForyDefault for $ty {
            fn fory_default() -> Self {
                0 as $ty
            }
        }
    };
}

impl_num_serializer!(i8, INT8, write_i8, read_i8);
impl_num_serializer!(u8, UINT8, write_u8, read_u8);
impl_num_serializer!(i16, INT16, write_i16, read_i16);
impl_num_serializer!(i32, VAR_INT32, write_varint32, read_varint32);
impl_num_serializer!(i64, VAR_INT64, write_varint64, read_varint64);
impl_num_serializer!(f32, FLOAT32, write_f32, read_f32);
impl_num_serializer!(f64, FLOAT64, write_f64, read_f64);
