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

//! Wire-driven skipping of values the local schema does not declare. The
//! wire field spec says exactly how many bytes a skippable kind occupies;
//! kinds whose length needs a registered decoder fail with UnknownTypeId.

use crate::error::Error;
use crate::meta::{FieldSpec, FieldType, NAMESPACE_DECODER, TYPE_NAME_DECODER};
use crate::resolver::context::ReadContext;
use crate::serializer::collection::{
    element_mode, HAS_NULL, NOT_DECL_ELEMENT_TYPE, NOT_SAME_TYPE, TRACKING_REF,
};
use crate::serializer::util::read_ref_flag;
use crate::types::{
    RefFlag, RefMode, BINARY, BOOL, BOOL_ARRAY, COMPATIBLE_STRUCT, DURATION, ENUM, FLOAT32,
    FLOAT32_ARRAY, FLOAT64, FLOAT64_ARRAY, INT16, INT16_ARRAY, INT32, INT32_ARRAY, INT64,
    INT64_ARRAY, INT8, INT8_ARRAY, LIST, LOCAL_DATE, MAP, NAMED_COMPATIBLE_STRUCT,
    NAMED_COMPATIBLE_STRUCT_ALT, NAMED_ENUM, SET, SLI_INT64, STRING, TIMESTAMP, UINT8, UNKNOWN,
    VAR_INT32, VAR_INT64,
};

/// Consumes one field value per its wire spec: the ref/null flag protocol,
/// then the body.
pub fn skip_field(context: &mut ReadContext, spec: &FieldSpec) -> Result<(), Error> {
    let mode = RefMode::from_flags(spec.nullable, spec.tracking_ref);
    if mode.has_ref_flag() {
        match read_ref_flag(context)? {
            RefFlag::Null => return Ok(()),
            RefFlag::Ref => {
                context.reader.read_varuint32()?;
                return Ok(());
            }
            RefFlag::RefValue => {
                context.ref_reader.reserve();
            }
            RefFlag::NotNullValue => {}
        }
    }
    skip_value(context, &spec.field_type)
}

pub fn skip_value(context: &mut ReadContext, field_type: &FieldType) -> Result<(), Error> {
    match field_type.type_id {
        BOOL | INT8 | UINT8 => context.reader.skip(1),
        INT16 => context.reader.skip(2),
        INT32 | FLOAT32 | LOCAL_DATE => context.reader.skip(4),
        INT64 | FLOAT64 | DURATION => context.reader.skip(8),
        TIMESTAMP => context.reader.skip(12),
        VAR_INT32 => context.reader.read_varuint32().map(|_| ()),
        VAR_INT64 => context.reader.read_varuint64().map(|_| ()),
        SLI_INT64 => context.reader.read_sli64().map(|_| ()),
        STRING | BINARY | BOOL_ARRAY | INT8_ARRAY => {
            let len = context.reader.read_varuint32()? as usize;
            context.reader.skip(len)
        }
        INT16_ARRAY => skip_array(context, 2),
        INT32_ARRAY | FLOAT32_ARRAY => skip_array(context, 4),
        INT64_ARRAY | FLOAT64_ARRAY => skip_array(context, 8),
        ENUM => context.reader.read_varuint32().map(|_| ()),
        NAMED_ENUM => {
            skip_name_pair(context)?;
            context.reader.read_varuint32().map(|_| ())
        }
        COMPATIBLE_STRUCT => skip_compatible_struct(context),
        NAMED_COMPATIBLE_STRUCT | NAMED_COMPATIBLE_STRUCT_ALT => {
            skip_name_pair(context)?;
            skip_compatible_struct(context)
        }
        LIST | SET => skip_collection(context, field_type),
        MAP => skip_map(context, field_type),
        other => Err(Error::UnknownTypeId {
            type_id: other,
            offset: context.reader.cursor(),
        }),
    }
}

fn skip_array(context: &mut ReadContext, element_size: usize) -> Result<(), Error> {
    let len = context.reader.read_varuint32()? as usize;
    context.reader.skip(len * element_size)
}

fn skip_name_pair(context: &mut ReadContext) -> Result<(), Error> {
    context.read_meta_string(&NAMESPACE_DECODER)?;
    context.read_meta_string(&TYPE_NAME_DECODER)?;
    Ok(())
}

/// A compatible struct is skippable without any local registration: its
/// interned TypeMeta describes every field on the wire.
fn skip_compatible_struct(context: &mut ReadContext) -> Result<(), Error> {
    let meta = context.read_type_meta()?;
    for spec in &meta.field_specs {
        skip_field(context, spec)?;
    }
    Ok(())
}

fn skip_collection(context: &mut ReadContext, field_type: &FieldType) -> Result<(), Error> {
    let len = context.reader.read_varuint32()? as usize;
    if len == 0 {
        return Ok(());
    }
    let header = context.reader.read_u8()?;
    let mut element_type = field_type
        .generics
        .first()
        .cloned()
        .unwrap_or_else(|| FieldType::new(UNKNOWN));
    let per_element_type = header & NOT_SAME_TYPE != 0;
    if header & NOT_DECL_ELEMENT_TYPE != 0 && !per_element_type {
        element_type = FieldType::new(context.reader.read_varuint32()?);
    }
    let mode = element_mode(header & TRACKING_REF != 0, header & HAS_NULL != 0);
    for _ in 0..len {
        if mode.has_ref_flag() {
            match read_ref_flag(context)? {
                RefFlag::Null => continue,
                RefFlag::Ref => {
                    context.reader.read_varuint32()?;
                    continue;
                }
                RefFlag::RefValue => {
                    context.ref_reader.reserve();
                }
                RefFlag::NotNullValue => {}
            }
        }
        if per_element_type {
            let element_id = context.reader.read_varuint32()?;
            skip_value(context, &FieldType::new(element_id))?;
        } else {
            skip_value(context, &element_type)?;
        }
    }
    Ok(())
}

fn skip_map(context: &mut ReadContext, field_type: &FieldType) -> Result<(), Error> {
    let len = context.reader.read_varuint32()? as usize;
    let unknown = FieldType::new(UNKNOWN);
    let key_type = field_type.generics.first().unwrap_or(&unknown);
    let value_type = field_type.generics.get(1).unwrap_or(&unknown);
    for _ in 0..len {
        skip_entry(context, key_type)?;
        skip_entry(context, value_type)?;
    }
    Ok(())
}

fn skip_entry(context: &mut ReadContext, entry_type: &FieldType) -> Result<(), Error> {
    let mode = element_mode(entry_type.tracking_ref, entry_type.nullable);
    if mode.has_ref_flag() {
        match read_ref_flag(context)? {
            RefFlag::Null => return Ok(()),
            RefFlag::Ref => {
                context.reader.read_varuint32()?;
                return Ok(());
            }
            RefFlag::RefValue => {
                context.ref_reader.reserve();
            }
            RefFlag::NotNullValue => {}
        }
    }
    skip_value(context, entry_type)
}
