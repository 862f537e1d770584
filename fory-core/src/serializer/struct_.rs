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

//! Struct bodies. Schema-consistent: the 32-bit structure hash followed by
//! the fields in canonical order. Compatible: a TypeMeta intern marker
//! (first occurrence inline) followed by the producer's fields; the reader
//! aligns the wire field list against its own by sort key, skips wire fields
//! it does not declare, and defaults local fields the wire does not carry.

use crate::ensure;
use crate::error::Error;
use crate::meta::FieldSpec;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::skip::skip_field;
use crate::serializer::util::{read_named_identity, write_named_identity};
use crate::serializer::{Serializer, StructSerializer};
use crate::types::{Mode, RefMode};
use std::collections::HashMap;

pub fn write_struct_data<T: StructSerializer>(
    value: &T,
    context: &mut WriteContext,
) -> Result<(), Error> {
    write_named_identity::<T>(context)?;
    let layout = context.get_type_resolver().struct_layout::<T>()?;
    match context.mode() {
        Mode::SchemaConsistent => context.writer.write_i32(layout.hash),
        Mode::Compatible => {
            context.push_type_meta(std::any::TypeId::of::<T>(), &layout.type_def)
        }
    }
    for spec in &layout.specs {
        value.fory_write_field(spec, context)?;
    }
    Ok(())
}

pub fn read_struct_data<T: StructSerializer>(context: &mut ReadContext) -> Result<T, Error> {
    read_named_identity::<T>(context)?;
    let layout = context.get_type_resolver().struct_layout::<T>()?;
    match context.mode() {
        Mode::SchemaConsistent => {
            let offset = context.reader.cursor();
            let received = context.reader.read_i32()?;
            ensure!(
                received == layout.hash,
                Error::HashMismatch {
                    expected: layout.hash,
                    received,
                    offset,
                }
            );
            let mut value = T::fory_default();
            for spec in &layout.specs {
                value.fory_read_field(spec, context)?;
            }
            Ok(value)
        }
        Mode::Compatible => {
            let wire_meta = context.read_type_meta()?;
            let local_by_key: HashMap<String, &FieldSpec> = layout
                .specs
                .iter()
                .map(|spec| (spec.sort_key(), spec))
                .collect();
            let mut value = T::fory_default();
            for wire_spec in &wire_meta.field_specs {
                match local_by_key.get(&wire_spec.sort_key()) {
                    Some(local_spec)
                        if local_spec.field_type.same_shape(&wire_spec.field_type) =>
                    {
                        // read with the wire's flag protocol, the local codec
                        let merged = FieldSpec {
                            name: local_spec.name.clone(),
                            field_id: local_spec.field_id,
                            field_type: local_spec.field_type.clone(),
                            nullable: wire_spec.nullable,
                            tracking_ref: wire_spec.tracking_ref,
                        };
                        value.fory_read_field(&merged, context)?;
                    }
                    _ => skip_field(context, wire_spec)?,
                }
            }
            Ok(value)
        }
    }
}

/// Per-field write: the ref/null protocol is fixed by the field spec, the
/// value-site type id is never repeated for fields (the field type tree
/// already declares the kind).
pub fn write_field<T: Serializer>(
    value: &T,
    spec: &FieldSpec,
    context: &mut WriteContext,
) -> Result<(), Error> {
    value.fory_write(
        context,
        RefMode::from_flags(spec.nullable, spec.tracking_ref),
        false,
    )
}

pub fn read_field<T: Serializer>(
    spec: &FieldSpec,
    context: &mut ReadContext,
) -> Result<T, Error> {
    T::fory_read(
        context,
        RefMode::from_flags(spec.nullable, spec.tracking_ref),
        false,
    )
}
