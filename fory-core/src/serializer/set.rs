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
use crate::serializer::collection::{read_collection_items, write_collection};
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, SET};
use std::collections::HashSet;
use std::hash::Hash;
use std::mem;

impl<T> Serializer for HashSet<T>
where
    T: Serializer + Eq + Hash,
{
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_collection(self.iter(), self.len(), context)
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(read_collection_items(context)?.into_iter().collect())
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(SET)
    }

    fn fory_field_type(resolver: &TypeResolver) -> Result<FieldType, Error> {
        Ok(FieldType::set_of(T::fory_field_type(resolver)?))
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl<T> ForyDefault for HashSet<T> {
    fn fory_default() -> Self {
        HashSet::new()
    }
}

impl<T: Serializer + Eq + Hash> ForyGeneralList for HashSet<T> {}
