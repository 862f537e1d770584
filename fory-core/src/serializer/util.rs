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
use crate::meta::{NAMESPACE_DECODER, TYPE_NAME_DECODER};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{RefFlag, NAMED_COMPATIBLE_STRUCT, NAMED_ENUM, NAMED_EXT, NAMED_STRUCT};

#[inline]
pub fn is_named_type_id(type_id: u32) -> bool {
    matches!(
        type_id,
        NAMED_STRUCT | NAMED_COMPATIBLE_STRUCT | NAMED_ENUM | NAMED_EXT
    )
}

pub fn read_ref_flag(context: &mut ReadContext) -> Result<RefFlag, Error> {
    let raw = context.reader.read_i8()?;
    RefFlag::try_from(raw).map_err(|_| Error::invalid_value(format!("unknown ref flag {raw}")))
}

/// For a by-name registration, emits the namespace/type-name pair through
/// the per-stream MetaString intern table. By-id registrations carry their
/// identity in the value-site id and write nothing here.
pub fn write_named_identity<T: 'static>(context: &mut WriteContext) -> Result<(), Error> {
    let (namespace, type_name) = {
        let info = context.get_type_resolver().type_info::<T>()?;
        if !info.register_by_name {
            return Ok(());
        }
        (info.namespace.clone(), info.type_name.clone())
    };
    context.write_meta_string(&namespace);
    context.write_meta_string(&type_name);
    Ok(())
}

pub fn read_named_identity<T: 'static>(context: &mut ReadContext) -> Result<(), Error> {
    let resolver = context.get_type_resolver();
    let info = resolver.type_info::<T>()?;
    if !info.register_by_name {
        return Ok(());
    }
    let expected_namespace = info.namespace.original.clone();
    let expected_type_name = info.type_name.original.clone();
    let namespace = context.read_meta_string(&NAMESPACE_DECODER)?;
    let type_name = context.read_meta_string(&TYPE_NAME_DECODER)?;
    if namespace.original != expected_namespace || type_name.original != expected_type_name {
        if !context
            .get_type_resolver()
            .is_name_registered(&namespace.original, &type_name.original)
        {
            return Err(Error::UnknownNamedType {
                namespace: namespace.original.clone(),
                type_name: type_name.original.clone(),
            });
        }
        return Err(Error::invalid_value(format!(
            "stream carries named type {:?}.{:?}, caller expects {:?}.{:?}",
            namespace.original, type_name.original, expected_namespace, expected_type_name
        )));
    }
    Ok(())
}
