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

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(i8)]
pub enum RefFlag {
    Null = -3,
    // Ref points back at an object already written in this stream; the
    // varuint32 ref-id follows.
    Ref = -2,
    // Non-null value of a type that is not reference-trackable.
    NotNullValue = -1,
    // First occurrence of a reference-trackable value; it claims the next
    // ref-id.
    RefValue = 0,
}

/// Per-field reference handling, derived from the field spec's `nullable` and
/// `tracking_ref` bits. The per-value header only distinguishes
/// present/null/ref-to-prior; which flags can legally appear is fixed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RefMode {
    /// No ref/null byte on the wire at all (non-nullable primitives).
    #[default]
    None = 0,
    /// Null check only: NullFlag (-3) or NotNullValue (-1).
    NullOnly = 1,
    /// Full reference tracking with cycle support.
    Tracking = 2,
}

impl RefMode {
    #[inline]
    pub const fn from_flags(nullable: bool, tracking_ref: bool) -> Self {
        match (nullable, tracking_ref) {
            (false, false) => RefMode::None,
            (true, false) => RefMode::NullOnly,
            (_, true) => RefMode::Tracking,
        }
    }

    #[inline]
    pub const fn has_ref_flag(self) -> bool {
        !matches!(self, RefMode::None)
    }
}

/// Built-in wire type ids. Ids below `FIRST_USER_TYPE_ID` are reserved; user
/// types registered by id carry their own id (>= 64) on the wire, user types
/// registered by name carry the NAMED_* id of their kind plus a
/// namespace/type-name MetaString pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum TypeId {
    UNKNOWN = 0,
    BOOL = 1,
    INT8 = 2,
    INT16 = 3,
    INT32 = 4,
    VAR_INT32 = 5,
    INT64 = 6,
    VAR_INT64 = 7,
    SLI_INT64 = 8,
    UINT8 = 9,
    FLOAT32 = 10,
    FLOAT64 = 11,
    STRING = 12,
    ENUM = 13,
    NAMED_ENUM = 14,
    STRUCT = 15,
    COMPATIBLE_STRUCT = 16,
    NAMED_STRUCT = 17,
    NAMED_COMPATIBLE_STRUCT = 18,
    EXT = 19,
    NAMED_EXT = 20,
    LIST = 21,
    SET = 22,
    MAP = 23,
    DURATION = 24,
    TIMESTAMP = 25,
    LOCAL_DATE = 26,
    DECIMAL = 27,
    BINARY = 28,
    // Uniform id of the typed-array kind; concrete arrays follow below.
    ARRAY = 29,
    // Legacy alias kept for streams produced before the id table settled.
    NAMED_COMPATIBLE_STRUCT_ALT = 30,
    BOOL_ARRAY = 31,
    INT8_ARRAY = 32,
    INT16_ARRAY = 33,
    INT32_ARRAY = 34,
    INT64_ARRAY = 35,
    FLOAT32_ARRAY = 36,
    FLOAT64_ARRAY = 37,
}

pub const UNKNOWN: u32 = TypeId::UNKNOWN as u32;
pub const BOOL: u32 = TypeId::BOOL as u32;
pub const INT8: u32 = TypeId::INT8 as u32;
pub const INT16: u32 = TypeId::INT16 as u32;
pub const INT32: u32 = TypeId::INT32 as u32;
pub const VAR_INT32: u32 = TypeId::VAR_INT32 as u32;
pub const INT64: u32 = TypeId::INT64 as u32;
pub const VAR_INT64: u32 = TypeId::VAR_INT64 as u32;
pub const SLI_INT64: u32 = TypeId::SLI_INT64 as u32;
pub const UINT8: u32 = TypeId::UINT8 as u32;
pub const FLOAT32: u32 = TypeId::FLOAT32 as u32;
pub const FLOAT64: u32 = TypeId::FLOAT64 as u32;
pub const STRING: u32 = TypeId::STRING as u32;
pub const ENUM: u32 = TypeId::ENUM as u32;
pub const NAMED_ENUM: u32 = TypeId::NAMED_ENUM as u32;
pub const STRUCT: u32 = TypeId::STRUCT as u32;
pub const COMPATIBLE_STRUCT: u32 = TypeId::COMPATIBLE_STRUCT as u32;
pub const NAMED_STRUCT: u32 = TypeId::NAMED_STRUCT as u32;
pub const NAMED_COMPATIBLE_STRUCT: u32 = TypeId::NAMED_COMPATIBLE_STRUCT as u32;
pub const EXT: u32 = TypeId::EXT as u32;
pub const NAMED_EXT: u32 = TypeId::NAMED_EXT as u32;
pub const LIST: u32 = TypeId::LIST as u32;
pub const SET: u32 = TypeId::SET as u32;
pub const MAP: u32 = TypeId::MAP as u32;
pub const DURATION: u32 = TypeId::DURATION as u32;
pub const TIMESTAMP: u32 = TypeId::TIMESTAMP as u32;
pub const LOCAL_DATE: u32 = TypeId::LOCAL_DATE as u32;
pub const DECIMAL: u32 = TypeId::DECIMAL as u32;
pub const BINARY: u32 = TypeId::BINARY as u32;
pub const ARRAY: u32 = TypeId::ARRAY as u32;
pub const NAMED_COMPATIBLE_STRUCT_ALT: u32 = TypeId::NAMED_COMPATIBLE_STRUCT_ALT as u32;
pub const BOOL_ARRAY: u32 = TypeId::BOOL_ARRAY as u32;
pub const INT8_ARRAY: u32 = TypeId::INT8_ARRAY as u32;
pub const INT16_ARRAY: u32 = TypeId::INT16_ARRAY as u32;
pub const INT32_ARRAY: u32 = TypeId::INT32_ARRAY as u32;
pub const INT64_ARRAY: u32 = TypeId::INT64_ARRAY as u32;
pub const FLOAT32_ARRAY: u32 = TypeId::FLOAT32_ARRAY as u32;
pub const FLOAT64_ARRAY: u32 = TypeId::FLOAT64_ARRAY as u32;

/// Ids below this are reserved for built-in kinds.
pub const FIRST_USER_TYPE_ID: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    // Producer and consumer must agree on the field set; enforced by the
    // 32-bit structure hash.
    SchemaConsistent,
    // Producer embeds a TypeMeta describing its field layout, so peers can
    // add/remove fields independently.
    Compatible,
}

/// Marker for element types whose `Vec<T>` is a general LIST. Primitive
/// elements are excluded: their `Vec<T>` maps to a typed-data array with its
/// own built-in id.
pub trait ForyGeneralList {}

/// What a registered user type is, as far as the wire is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Struct,
    Enum,
    Ext,
}

pub mod config_flags {
    pub const IS_NULL_FLAG: u8 = 1 << 0;
    pub const IS_CROSS_LANGUAGE_FLAG: u8 = 1 << 1;
    pub const IS_OUT_OF_BAND_FLAG: u8 = 1 << 2;
}

#[inline(always)]
pub const fn is_struct_kind(type_id: u32) -> bool {
    matches!(
        type_id,
        STRUCT | COMPATIBLE_STRUCT
            | NAMED_STRUCT
            | NAMED_COMPATIBLE_STRUCT
            | NAMED_COMPATIBLE_STRUCT_ALT
    )
}

#[inline(always)]
pub const fn is_enum_kind(type_id: u32) -> bool {
    matches!(type_id, ENUM | NAMED_ENUM)
}

#[inline(always)]
pub const fn is_ext_kind(type_id: u32) -> bool {
    matches!(type_id, EXT | NAMED_EXT)
}

#[inline(always)]
pub const fn is_typed_array(type_id: u32) -> bool {
    matches!(
        type_id,
        BOOL_ARRAY
            | INT8_ARRAY
            | INT16_ARRAY
            | INT32_ARRAY
            | INT64_ARRAY
            | FLOAT32_ARRAY
            | FLOAT64_ARRAY
    )
}

#[inline(always)]
pub const fn is_user_type_id(type_id: u32) -> bool {
    type_id >= FIRST_USER_TYPE_ID
}

#[inline(always)]
pub const fn is_primitive_value(type_id: u32) -> bool {
    matches!(
        type_id,
        BOOL | INT8 | INT16 | INT32 | VAR_INT32 | INT64 | VAR_INT64 | SLI_INT64 | UINT8 | FLOAT32
            | FLOAT64
    )
}

/// var-int32 and var-int64 are the "compressed" primitive kinds for field
/// ordering purposes.
#[inline(always)]
pub const fn is_compressed_primitive(type_id: u32) -> bool {
    matches!(type_id, VAR_INT32 | VAR_INT64)
}

/// Declared byte size of a primitive kind, used by the field sort.
pub const fn primitive_byte_size(type_id: u32) -> u32 {
    match type_id {
        BOOL | INT8 | UINT8 => 1,
        INT16 => 2,
        INT32 | VAR_INT32 | FLOAT32 => 4,
        _ => 8,
    }
}

const MAX_INT31: u64 = (1 << 31) - 1;

/// One step of the structure-hash recurrence: `hash*31 + id`, folded back
/// into the signed 32-bit range by repeated division by 7. Every language
/// binding must reproduce this exactly for the hash to match.
pub fn fold_field_hash(hash: u32, id: u32) -> u32 {
    let mut h = (hash as u64) * 31 + id as u64;
    while h >= MAX_INT31 {
        h /= 7;
    }
    h as u32
}

/// The uniform wire id a kind contributes to the structure hash: all struct
/// kinds share STRUCT, all enum kinds ENUM, all ext kinds EXT, typed arrays
/// ARRAY, and the unsigned byte folds as its signed counterpart.
pub fn uniform_hash_id(type_id: u32) -> u32 {
    if is_user_type_id(type_id) || is_struct_kind(type_id) {
        STRUCT
    } else if is_enum_kind(type_id) {
        ENUM
    } else if is_ext_kind(type_id) {
        EXT
    } else if is_typed_array(type_id) {
        ARRAY
    } else if type_id == UINT8 {
        INT8
    } else {
        type_id
    }
}

/// Formats a wire type id for error messages.
pub fn format_type_id(type_id: u32) -> String {
    if is_user_type_id(type_id) {
        return format!("USER({type_id})");
    }
    let name = match TypeId::try_from(type_id as u8) {
        Ok(id) => match id {
            TypeId::UNKNOWN => "UNKNOWN",
            TypeId::BOOL => "BOOL",
            TypeId::INT8 => "INT8",
            TypeId::INT16 => "INT16",
            TypeId::INT32 => "INT32",
            TypeId::VAR_INT32 => "VAR_INT32",
            TypeId::INT64 => "INT64",
            TypeId::VAR_INT64 => "VAR_INT64",
            TypeId::SLI_INT64 => "SLI_INT64",
            TypeId::UINT8 => "UINT8",
            TypeId::FLOAT32 => "FLOAT32",
            TypeId::FLOAT64 => "FLOAT64",
            TypeId::STRING => "STRING",
            TypeId::ENUM => "ENUM",
            TypeId::NAMED_ENUM => "NAMED_ENUM",
            TypeId::STRUCT => "STRUCT",
            TypeId::COMPATIBLE_STRUCT => "COMPATIBLE_STRUCT",
            TypeId::NAMED_STRUCT => "NAMED_STRUCT",
            TypeId::NAMED_COMPATIBLE_STRUCT => "NAMED_COMPATIBLE_STRUCT",
            TypeId::EXT => "EXT",
            TypeId::NAMED_EXT => "NAMED_EXT",
            TypeId::LIST => "LIST",
            TypeId::SET => "SET",
            TypeId::MAP => "MAP",
            TypeId::DURATION => "DURATION",
            TypeId::TIMESTAMP => "TIMESTAMP",
            TypeId::LOCAL_DATE => "LOCAL_DATE",
            TypeId::DECIMAL => "DECIMAL",
            TypeId::BINARY => "BINARY",
            TypeId::ARRAY => "ARRAY",
            TypeId::NAMED_COMPATIBLE_STRUCT_ALT => "NAMED_COMPATIBLE_STRUCT",
            TypeId::BOOL_ARRAY => "BOOL_ARRAY",
            TypeId::INT8_ARRAY => "INT8_ARRAY",
            TypeId::INT16_ARRAY => "INT16_ARRAY",
            TypeId::INT32_ARRAY => "INT32_ARRAY",
            TypeId::INT64_ARRAY => "INT64_ARRAY",
            TypeId::FLOAT32_ARRAY => "FLOAT32_ARRAY",
            TypeId::FLOAT64_ARRAY => "FLOAT64_ARRAY",
        },
        Err(_) => "RESERVED",
    };
    name.to_string()
}
