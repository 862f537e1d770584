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

mod arc;
mod bool;
mod box_;
pub mod collection;
mod datetime;
pub mod enum_;
mod list;
mod map;
mod number;
mod option;
mod primitive_list;
mod rc;
mod refcell;
mod set;
pub mod skip;
mod string;
pub mod struct_;
pub mod util;

use crate::error::Error;
use crate::meta::{FieldSpec, FieldType};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::types::{is_user_type_id, RefFlag, RefMode, UserKind};
use std::rc::Rc;
use std::sync::Arc;

pub use struct_::{read_field, write_field};
pub use util::read_ref_flag;

/// The type's zero value, used for fields the wire does not carry.
pub trait ForyDefault: Sized {
    fn fory_default() -> Self;
}

/// One wire kind's codec plus the ref/null driver around it. Built-in types
/// implement this in the modules below; a code-generation front-end emits
/// impls for user structs and enums (the integration tests write the same
/// impls by hand).
pub trait Serializer: ForyDefault + 'static {
    /// Body only; flags and the value-site type id are written by
    /// `fory_write`. For user kinds the body starts with the type's own
    /// identity (name pair, struct hash or TypeMeta reference).
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error>;

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error>;

    /// The id carried at value sites: a built-in id, a registered user id,
    /// or the NAMED_* id of the kind.
    fn fory_get_type_id(resolver: &TypeResolver) -> Result<u32, Error>;

    /// The node this type contributes to a struct's field type tree.
    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        let type_id = Self::fory_get_type_id(resolver)?;
        if is_user_type_id(type_id) || util::is_named_type_id(type_id) {
            Ok(FieldType::new(resolver.field_kind::<Self>()?))
        } else {
            Ok(FieldType::new(type_id))
        }
    }

    /// How `register_serializer` classifies this type; enums override.
    fn fory_user_kind() -> UserKind {
        UserKind::Ext
    }

    fn fory_is_none(&self) -> bool {
        false
    }

    fn fory_is_nullable() -> bool {
        false
    }

    fn fory_is_shared_ref() -> bool {
        false
    }

    fn fory_reserved_space() -> usize {
        0
    }

    fn fory_write_type_info(context: &mut WriteContext) -> Result<(), Error> {
        let type_id = Self::fory_get_type_id(context.get_type_resolver())?;
        context.writer.write_varuint32(type_id);
        Ok(())
    }

    fn fory_read_type_info(context: &mut ReadContext) -> Result<(), Error> {
        let local = Self::fory_get_type_id(context.get_type_resolver())?;
        let remote = context.reader.read_varuint32()?;
        crate::ensure!(local == remote, Error::type_mismatch(local, remote));
        Ok(())
    }

    /// Writes the value with the ref/null protocol selected by `mode`, the
    /// value-site type id when `with_type`, then the body. `Option`, `Rc`
    /// and `Arc` override this to implement null and reference flags.
    fn fory_write(
        &self,
        context: &mut WriteContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<(), Error> {
        if mode.has_ref_flag() {
            if self.fory_is_none() {
                context.writer.write_i8(RefFlag::Null as i8);
                return Ok(());
            }
            context.writer.write_i8(RefFlag::NotNullValue as i8);
        }
        if with_type {
            Self::fory_write_type_info(context)?;
        }
        self.fory_write_data(context)
    }

    fn fory_read(
        context: &mut ReadContext,
        mode: RefMode,
        with_type: bool,
    ) -> Result<Self, Error> {
        if !mode.has_ref_flag() {
            if with_type {
                Self::fory_read_type_info(context)?;
            }
            return Self::fory_read_data(context);
        }
        match read_ref_flag(context)? {
            RefFlag::Null => Ok(Self::fory_default()),
            RefFlag::NotNullValue => {
                if with_type {
                    Self::fory_read_type_info(context)?;
                }
                Self::fory_read_data(context)
            }
            RefFlag::RefValue => {
                // keep the ref-id sequence aligned with the producer even
                // though this local type carries no shared identity
                context.ref_reader.reserve();
                if with_type {
                    Self::fory_read_type_info(context)?;
                }
                Self::fory_read_data(context)
            }
            RefFlag::Ref => Err(Error::ref_integrity(
                "backreference to a value the local type does not track",
            )),
        }
    }

    /// Reads a first-occurrence value into a fresh `Rc` registered at
    /// `ref_id`. `RefCell` overrides this to register the handle before the
    /// body is read, which is what lets cycles resolve.
    fn fory_read_rc_at(
        context: &mut ReadContext,
        ref_id: u32,
        with_type: bool,
    ) -> Result<Rc<Self>, Error> {
        if with_type {
            Self::fory_read_type_info(context)?;
        }
        let value = Rc::new(Self::fory_read_data(context)?);
        context.ref_reader.store(ref_id, Box::new(value.clone()))?;
        Ok(value)
    }

    fn fory_read_arc_at(
        context: &mut ReadContext,
        ref_id: u32,
        with_type: bool,
    ) -> Result<Arc<Self>, Error> {
        if with_type {
            Self::fory_read_type_info(context)?;
        }
        let value = Arc::new(Self::fory_read_data(context)?);
        context.ref_reader.store(ref_id, Box::new(value.clone()))?;
        Ok(value)
    }
}

/// The contract between the core and struct code generation: the declared
/// field list plus per-field accessors dispatched by field name.
pub trait StructSerializer: Serializer {
    /// Declared fields in declaration order; the resolver computes the
    /// canonical wire order, the structure hash and the encoded TypeMeta.
    fn fory_fields(resolver: &TypeResolver) -> Result<Vec<FieldSpec>, Error>;

    fn fory_write_field(&self, spec: &FieldSpec, context: &mut WriteContext)
        -> Result<(), Error>;

    fn fory_read_field(&mut self, spec: &FieldSpec, context: &mut ReadContext)
        -> Result<(), Error>;
}
