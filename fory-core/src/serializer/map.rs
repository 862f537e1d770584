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

//! MAP body, canonical simple form: varuint32 entry count, then each entry
//! as one key and one value written per the declared key/value types.

use crate::error::Error;
use crate::meta::FieldType;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::collection::element_mode;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, RefMode, MAP};
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

fn entry_mode<T: Serializer>() -> RefMode {
    element_mode(T::fory_is_shared_ref(), T::fory_is_nullable())
}

impl<K, V> Serializer for HashMap<K, V>
where
    K: Serializer + Eq + Hash,
    V: Serializer,
{
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_varuint32(self.len() as u32);
        let key_mode = entry_mode::<K>();
        let value_mode = entry_mode::<V>();
        for (key, value) in self {
            key.fory_write(context, key_mode, false)?;
            value.fory_write(context, value_mode, false)?;
        }
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = context.reader.read_varuint32()? as usize;
        let key_mode = entry_mode::<K>();
        let value_mode = entry_mode::<V>();
        let mut map = HashMap::with_capacity(len.min(context.reader.remaining()).max(1));
        for _ in 0..len {
            let key = K::fory_read(context, key_mode, false)?;
            let value = V::fory_read(context, value_mode, false)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(MAP)
    }

    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        Ok(FieldType::map_of(
            K::fory_field_type(resolver)?,
            V::fory_field_type(resolver)?,
        ))
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl<K, V> ForyDefault for HashMap<K, V> {
    fn fory_default() -> Self {
        HashMap::new()
    }
}

impl<K: Serializer + Eq + Hash, V: Serializer> ForyGeneralList for HashMap<K, V> {}
