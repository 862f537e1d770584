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

//! Apache Fory is a cross-language binary object serialization framework:
//! language runtimes encode in-memory object graphs into a common byte
//! stream and decode streams produced by any other runtime.
//!
//! This crate is the public face of the Rust core. Build a [`Fory`], pick a
//! [`Mode`], register the types the stream will carry, then call
//! [`Fory::serialize`] / [`Fory::deserialize`]:
//!
//! - `Mode::SchemaConsistent` (default): producer and consumer must agree
//!   on every struct's field set, guarded by a 32-bit structure hash.
//! - `Mode::Compatible`: every struct value carries an interned description
//!   of its field layout, so peers may add or remove fields independently.
//!
//! Shared references and cycles are preserved through `Rc`/`Arc` (with
//! `RefCell` for graphs that need interior mutability).

pub use fory_core::buffer::{Reader, Writer};
pub use fory_core::error::Error;
pub use fory_core::fory::Fory;
pub use fory_core::meta::{FieldSpec, FieldType};
pub use fory_core::serializer::{ForyDefault, Serializer, StructSerializer};
pub use fory_core::types::{Mode, RefMode, TypeId, UserKind};

pub use fory_core::{buffer, error, meta, resolver, serializer, types, util};
