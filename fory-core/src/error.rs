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

use crate::types::format_type_id;
use std::borrow::Cow;
use thiserror::Error;

pub use anyhow::Error as AnyhowError;

fn type_id_name(type_id: &u32) -> String {
    format_type_id(*type_id)
}

/// Errors raised by the codec. All of them are fatal to the current stream:
/// a failed encode must be discarded by the caller and a failed decode never
/// exposes a partially built object.
#[derive(Error, Debug)]
pub enum Error {
    #[error("stream ended at offset {offset}, needed {needed} more byte(s)")]
    Eof { offset: usize, needed: usize },

    #[error("varint did not terminate within {budget} bytes at offset {offset}")]
    Overflow { offset: usize, budget: usize },

    #[error("unsupported stream: {0}")]
    UnsupportedStream(Cow<'static, str>),

    #[error("no serializer for wire type id {type_id} ({}) at offset {offset}", type_id_name(.type_id))]
    UnknownTypeId { type_id: u32, offset: usize },

    #[error("no serializer for named type {namespace:?}.{type_name:?}")]
    UnknownNamedType {
        namespace: String,
        type_name: String,
    },

    #[error("struct hash mismatch at offset {offset}: expected {expected}, received {received}")]
    HashMismatch {
        expected: i32,
        received: i32,
        offset: usize,
    },

    #[error("invalid value: {0}")]
    InvalidValue(Cow<'static, str>),

    #[error("reference integrity: {0}")]
    RefIntegrity(Cow<'static, str>),

    #[error("illegal registration: {0}")]
    Registration(Cow<'static, str>),

    #[error("meta string codec: {0}")]
    Encoding(Cow<'static, str>),

    #[error("local type id {local} ({}) cannot read wire type id {remote} ({})", type_id_name(.local), type_id_name(.remote))]
    TypeMismatch { local: u32, remote: u32 },

    #[error(transparent)]
    Other(#[from] AnyhowError),
}

impl Error {
    pub fn encode_error(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::Encoding(msg.into())
    }

    pub fn invalid_value(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::InvalidValue(msg.into())
    }

    pub fn ref_integrity(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::RefIntegrity(msg.into())
    }

    pub fn registration(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::Registration(msg.into())
    }

    pub fn type_mismatch(local: u32, remote: u32) -> Self {
        Error::TypeMismatch { local, remote }
    }
}
