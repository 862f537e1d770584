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
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, STRING};
use std::mem;

impl Serializer for String {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_varuint32(self.len() as u32);
        context.writer.write_bytes(self.as_bytes());
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = context.reader.read_varuint32()? as usize;
        let bytes = context.reader.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::invalid_value("string body is not valid utf-8"))
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(STRING)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl ForyDefault for String {
    fn fory_default() -> Self {
        String::new()
    }
}

impl ForyGeneralList for String {}
