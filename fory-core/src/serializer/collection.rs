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

//! Shared LIST/SET body: varuint32 length, a flag byte, an optional shared
//! element type id, then the elements. Empty collections stop after the
//! length.

use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::is_named_type_id;
use crate::serializer::Serializer;
use crate::types::{is_user_type_id, RefMode};

/// Collection flag bits.
pub const TRACKING_REF: u8 = 0b1;
pub const HAS_NULL: u8 = 0b10;
/// The element type is not pinned by the receiver's declaration; a shared
/// varuint32 element type id follows the flag byte.
pub const NOT_DECL_ELEMENT_TYPE: u8 = 0b100;
/// Elements are not all one runtime type; every element carries its own
/// type id between its ref flag and its body.
pub const NOT_SAME_TYPE: u8 = 0b1000;

#[inline]
pub fn element_mode(tracking: bool, nullable: bool) -> RefMode {
    if tracking {
        RefMode::Tracking
    } else if nullable {
        RefMode::NullOnly
    } else {
        RefMode::None
    }
}

#[inline]
pub fn is_user_value_site(type_id: u32) -> bool {
    is_user_type_id(type_id) || is_named_type_id(type_id)
}

pub fn write_collection<'t, T, I>(
    items: I,
    len: usize,
    context: &mut WriteContext,
) -> Result<(), Error>
where
    T: Serializer,
    I: Iterator<Item = &'t T>,
    T: 't,
{
    context.writer.write_varuint32(len as u32);
    if len == 0 {
        return Ok(());
    }
    let element_id = T::fory_get_type_id(context.get_type_resolver())?;
    let tracking = T::fory_is_shared_ref();
    let nullable = T::fory_is_nullable();
    let mut header = 0u8;
    if tracking {
        header |= TRACKING_REF;
    }
    if nullable {
        header |= HAS_NULL;
    }
    let undeclared = is_user_value_site(element_id);
    if undeclared {
        header |= NOT_DECL_ELEMENT_TYPE;
    }
    context.writer.write_u8(header);
    if undeclared {
        context.writer.write_varuint32(element_id);
    }
    let mode = element_mode(tracking, nullable);
    for item in items {
        item.fory_write(context, mode, false)?;
    }
    Ok(())
}

pub fn read_collection_items<T: Serializer>(context: &mut ReadContext) -> Result<Vec<T>, Error> {
    let len = context.reader.read_varuint32()? as usize;
    if len == 0 {
        return Ok(Vec::new());
    }
    let header = context.reader.read_u8()?;
    let per_element_type = header & NOT_SAME_TYPE != 0;
    if header & NOT_DECL_ELEMENT_TYPE != 0 && !per_element_type {
        let local_id = T::fory_get_type_id(context.get_type_resolver())?;
        let remote_id = context.reader.read_varuint32()?;
        ensure!(
            remote_id == local_id,
            Error::type_mismatch(local_id, remote_id)
        );
    }
    let mode = element_mode(header & TRACKING_REF != 0, header & HAS_NULL != 0);
    let mut items = Vec::with_capacity(len.min(context.reader.remaining()).max(1));
    for _ in 0..len {
        items.push(T::fory_read(context, mode, per_element_type)?);
    }
    Ok(items)
}
