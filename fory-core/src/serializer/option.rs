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
use crate::meta::FieldType;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::util::read_ref_flag;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, RefFlag, RefMode};

impl<T: Serializer> Serializer for Option<T> {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        match self {
            Some(value) => value.fory_write_data(context),
            None => Err(Error::invalid_value("null value in a non-nullable slot")),
        }
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(Some(T::fory_read_data(context)?))
    }

    fn fory_get_type_id(resolver: &TypeResolver) -> Result<u32, Error> {
        T::fory_get_type_id(resolver)
    }

    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        Ok(T::fory_field_type(resolver)?.nullable())
    }

    fn fory_is_none(&self) -> bool {
        self.is_none()
    }

    fn fory_is_nullable() -> bool {
        true
    }

    fn fory_is_shared_ref() -> bool {
        T::fory_is_shared_ref()
    }

    fn fory_reserved_space() -> usize {
        T::fory_reserved_space()
    }

    fn fory_write(
        &self,
        context: &mut WriteContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<(), Error> {
        // an optional value always has a flag byte, even in a slot declared
        // non-nullable
        let mode = if mode == RefMode::None {
            RefMode::NullOnly
        } else {
            mode
        };
        match self {
            None => {
                context.writer.write_i8(RefFlag::Null as i8);
                Ok(())
            }
            Some(value) => value.fory_write(context, mode, with_type),
        }
    }

    fn fory_read(
        context: &mut ReadContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<Self, Error> {
        let mode = if mode == RefMode::None {
            RefMode::NullOnly
        } else {
            mode
        };
        let flag_offset = context.reader.cursor();
        if read_ref_flag(context)? == RefFlag::Null {
            return Ok(None);
        }
        context.reader.set_cursor(flag_offset);
        Ok(Some(T::fory_read(context, mode, with_type)?))
    }
}

impl<T> ForyDefault for Option<T> {
    fn fory_default() -> Self {
        None
    }
}

impl<T: Serializer> ForyGeneralList for Option<T> {}
