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

//! `Rc<T>` is the reference-trackable handle: under a tracking field the
//! first occurrence claims a ref-id and later occurrences write a
//! backreference, preserving shared identity across the round trip.

use crate::error::Error;
use crate::meta::FieldType;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::util::read_ref_flag;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, RefFlag, RefMode};
use std::rc::Rc;

impl<T: Serializer> Serializer for Rc<T> {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        T::fory_write_data(self.as_ref(), context)
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(Rc::new(T::fory_read_data(context)?))
    }

    fn fory_get_type_id(resolver: &TypeResolver) -> Result<u32, Error> {
        T::fory_get_type_id(resolver)
    }

    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        Ok(T::fory_field_type(resolver)?.tracking())
    }

    fn fory_is_none(&self) -> bool {
        self.as_ref().fory_is_none()
    }

    fn fory_is_shared_ref() -> bool {
        true
    }

    fn fory_reserved_space() -> usize {
        std::mem::size_of::<u32>()
    }

    fn fory_write(
        &self,
        context: &mut WriteContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<(), Error> {
        if mode != RefMode::Tracking {
            // untracked slot: serialize the pointee as a plain value
            return (**self).fory_write(context, mode, with_type);
        }
        let ptr = Rc::as_ptr(self) as *const u8 as usize;
        if context.ref_writer.try_write_ref(&mut context.writer, ptr) {
            return Ok(());
        }
        if with_type {
            Self::fory_write_type_info(context)?;
        }
        T::fory_write_data(self.as_ref(), context)
    }

    fn fory_read(
        context: &mut ReadContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<Self, Error> {
        if mode != RefMode::Tracking {
            return Ok(Rc::new(T::fory_read(context, mode, with_type)?));
        }
        match read_ref_flag(context)? {
            RefFlag::Null => Ok(Rc::new(T::fory_default())),
            RefFlag::NotNullValue => {
                if with_type {
                    T::fory_read_type_info(context)?;
                }
                Ok(Rc::new(T::fory_read_data(context)?))
            }
            RefFlag::Ref => {
                let ref_id = context.reader.read_varuint32()?;
                context.ref_reader.get::<Rc<T>>(ref_id)
            }
            RefFlag::RefValue => {
                let ref_id = context.ref_reader.reserve();
                T::fory_read_rc_at(context, ref_id, with_type)
            }
        }
    }
}

impl<T: ForyDefault> ForyDefault for Rc<T> {
    fn fory_default() -> Self {
        Rc::new(T::fory_default())
    }
}

impl<T: Serializer> ForyGeneralList for Rc<T> {}
