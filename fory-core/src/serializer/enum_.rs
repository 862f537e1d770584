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

//! Enum bodies: the varuint32 ordinal, preceded by the name pair when the
//! enum is registered by name. The wire carries ordinals, never symbol
//! names, so producer and consumer orderings must agree.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::{read_named_identity, write_named_identity};

pub fn write_ordinal<T: 'static>(context: &mut WriteContext, ordinal: u32) -> Result<(), Error> {
    write_named_identity::<T>(context)?;
    context.writer.write_varuint32(ordinal);
    Ok(())
}

pub fn read_ordinal<T: 'static>(context: &mut ReadContext) -> Result<u32, Error> {
    read_named_identity::<T>(context)?;
    context.reader.read_varuint32()
}
