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

//! `RefCell<T>` is transparent on the wire. Its one special duty is the
//! first-occurrence read under a tracking slot: the fresh shared handle is
//! registered in its ref-id slot before the inner value is read, so a cycle
//! arriving inside the body resolves to the handle being filled.

use crate::error::Error;
use crate::meta::FieldType;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, RefMode};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

impl<T: Serializer> Serializer for RefCell<T> {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        self.borrow().fory_write_data(context)
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(RefCell::new(T::fory_read_data(context)?))
    }

    fn fory_get_type_id(resolver: &TypeResolver) -> Result<u32, Error> {
        T::fory_get_type_id(resolver)
    }

    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        T::fory_field_type(resolver)
    }

    fn fory_is_none(&self) -> bool {
        self.borrow().fory_is_none()
    }

    fn fory_is_nullable() -> bool {
        T::fory_is_nullable()
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
        self.borrow().fory_write(context, mode, with_type)
    }

    fn fory_read(
        context: &mut ReadContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<Self, Error> {
        Ok(RefCell::new(T::fory_read(context, mode, with_type)?))
    }

    fn fory_read_rc_at(
        context: &mut ReadContext,
        ref_id: u32,
        with_type: bool,
    ) -> Result<Rc<Self>, Error> {
        if with_type {
            T::fory_read_type_info(context)?;
        }
        let handle = Rc::new(RefCell::new(T::fory_default()));
        context.ref_reader.store(ref_id, Box::new(handle.clone()))?;
        *handle.borrow_mut() = T::fory_read_data(context)?;
        Ok(handle)
    }

    fn fory_read_arc_at(
        context: &mut ReadContext,
        ref_id: u32,
        with_type: bool,
    ) -> Result<Arc<Self>, Error> {
        if with_type {
            T::fory_read_type_info(context)?;
        }
        let handle = Arc::new(RefCell::new(T::fory_default()));
        context.ref_reader.store(ref_id, Box::new(handle.clone()))?;
        *handle.borrow_mut() = T::fory_read_data(context)?;
        Ok(handle)
    }
}

impl<T: ForyDefault> ForyDefault for RefCell<T> {
    fn fory_default() -> Self {
        RefCell::new(T::fory_default())
    }
}

impl<T: Serializer> ForyGeneralList for RefCell<T> {}
