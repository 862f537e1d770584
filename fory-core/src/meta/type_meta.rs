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

//! On-wire description of a struct's sorted field list plus its identity.
//! In compatible mode every struct value carries one of these (interned per
//! stream) so consumers with a different field set can still decode.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::meta::hash::murmurhash3_x64_128;
use crate::meta::meta_string::{
    Encoding, MetaString, MetaStringDecoder, FIELD_NAME_DECODER, FIELD_NAME_ENCODER,
    FIELD_NAME_ENCODINGS, NAMESPACE_DECODER, TYPE_NAME_DECODER,
};
use crate::types::{TypeId, LIST, MAP, SET};
use crate::util::to_snake_case;

// 64-bit header: | compressed:1 | has_fields:1 | fingerprint:41 | reserved:13 | body_len:8 |
const HEADER_LEN_MASK: u64 = 0xFF;
const HEADER_HAS_FIELDS_BIT: u64 = 1 << 62;
const HEADER_COMPRESSED_BIT: u64 = 1 << 63;
const FINGERPRINT_SHIFT: u32 = 21;

const FIELD_HEADER_SIZE_MAX: u32 = 0b1111;
const CLASS_HEADER_FIELDS_MAX: u32 = 0b11111;
const CLASS_HEADER_BY_NAME_BIT: u8 = 0b10_0000;

/// A node in a field's type tree. The outer node is written as a bare id
/// byte; collection element/key/value nodes carry their nullability and
/// ref-tracking bits packed into a varuint32.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub type_id: u32,
    pub nullable: bool,
    pub tracking_ref: bool,
    pub generics: Vec<FieldType>,
}

impl FieldType {
    pub fn new(type_id: u32) -> FieldType {
        FieldType {
            type_id,
            nullable: false,
            tracking_ref: false,
            generics: vec![],
        }
    }

    pub fn list_of(element: FieldType) -> FieldType {
        FieldType {
            type_id: LIST,
            nullable: false,
            tracking_ref: false,
            generics: vec![element],
        }
    }

    pub fn set_of(element: FieldType) -> FieldType {
        FieldType {
            type_id: SET,
            nullable: false,
            tracking_ref: false,
            generics: vec![element],
        }
    }

    pub fn map_of(key: FieldType, value: FieldType) -> FieldType {
        FieldType {
            type_id: MAP,
            nullable: false,
            tracking_ref: false,
            generics: vec![key, value],
        }
    }

    pub fn nullable(mut self) -> FieldType {
        self.nullable = true;
        self
    }

    pub fn tracking(mut self) -> FieldType {
        self.tracking_ref = true;
        self
    }

    /// Structural equality on wire kinds only; flag bits are carried by the
    /// enclosing field header or collection header instead.
    pub fn same_shape(&self, other: &FieldType) -> bool {
        self.type_id == other.type_id
            && self.generics.len() == other.generics.len()
            && self
                .generics
                .iter()
                .zip(other.generics.iter())
                .all(|(a, b)| a.same_shape(b))
    }

    fn write(&self, writer: &mut Writer, as_generic: bool) {
        if as_generic {
            let header =
                (self.type_id << 2) | ((self.nullable as u32) << 1) | self.tracking_ref as u32;
            writer.write_varuint32(header);
        } else {
            writer.write_u8(self.type_id as u8);
        }
        match self.type_id {
            LIST | SET => {
                self.generics[0].write(writer, true);
            }
            MAP => {
                self.generics[0].write(writer, true);
                self.generics[1].write(writer, true);
            }
            _ => {}
        }
    }

    fn read(reader: &mut Reader, as_generic: bool) -> Result<FieldType, Error> {
        let (type_id, nullable, tracking_ref) = if as_generic {
            let header = reader.read_varuint32()?;
            (header >> 2, header & 0b10 != 0, header & 0b1 != 0)
        } else {
            (reader.read_u8()? as u32, false, false)
        };
        let generics = match type_id {
            LIST | SET => vec![FieldType::read(reader, true)?],
            MAP => vec![FieldType::read(reader, true)?, FieldType::read(reader, true)?],
            _ => vec![],
        };
        Ok(FieldType {
            type_id,
            nullable,
            tracking_ref,
            generics,
        })
    }
}

/// One declared struct field: identity (name or compact numeric id), type
/// tree, and the nullability/ref-tracking bits that fix the per-value flag
/// protocol for this field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub field_id: Option<u32>,
    pub field_type: FieldType,
    pub nullable: bool,
    pub tracking_ref: bool,
}

impl FieldSpec {
    pub fn new(name: &str, mut field_type: FieldType) -> FieldSpec {
        // top-level flags live in the field header, not the type tree
        let nullable = std::mem::take(&mut field_type.nullable);
        let tracking_ref = std::mem::take(&mut field_type.tracking_ref);
        FieldSpec {
            name: to_snake_case(name),
            field_id: None,
            field_type,
            nullable,
            tracking_ref,
        }
    }

    pub fn with_id(field_id: u32, mut field_type: FieldType) -> FieldSpec {
        let nullable = std::mem::take(&mut field_type.nullable);
        let tracking_ref = std::mem::take(&mut field_type.tracking_ref);
        FieldSpec {
            name: String::new(),
            field_id: Some(field_id),
            field_type,
            nullable,
            tracking_ref,
        }
    }

    /// The canonical comparator value: the numeric id in decimal when
    /// present, the snake_case name otherwise.
    pub fn sort_key(&self) -> String {
        match self.field_id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }

    fn write(&self, writer: &mut Writer) -> Result<(), Error> {
        // header: | name_encoding:2 | size:4 | nullable:1 | tracking_ref:1 |
        let (tag, name_bytes, size) = match self.field_id {
            Some(id) => (0b11u8, None, id),
            None => {
                let encoded = FIELD_NAME_ENCODER
                    .encode_with_encodings(&self.name, FIELD_NAME_ENCODINGS)?;
                if encoded.bytes.is_empty() {
                    return Err(Error::encode_error("field name cannot be empty"));
                }
                let size = encoded.bytes.len() as u32 - 1;
                (encoded.encoding as u8, Some(encoded), size)
            }
        };
        let mut header = (tag << 6) | ((size.min(FIELD_HEADER_SIZE_MAX) as u8) << 2);
        if self.nullable {
            header |= 0b10;
        }
        if self.tracking_ref {
            header |= 0b1;
        }
        writer.write_u8(header);
        if size >= FIELD_HEADER_SIZE_MAX {
            writer.write_varuint32(size - FIELD_HEADER_SIZE_MAX);
        }
        self.field_type.write(writer, false);
        if let Some(encoded) = name_bytes {
            writer.write_bytes(&encoded.bytes);
        }
        Ok(())
    }

    fn read(reader: &mut Reader) -> Result<FieldSpec, Error> {
        let header = reader.read_u8()?;
        let tag = header >> 6;
        let mut size = ((header >> 2) & 0b1111) as u32;
        if size == FIELD_HEADER_SIZE_MAX {
            size += reader.read_varuint32()?;
        }
        let nullable = header & 0b10 != 0;
        let tracking_ref = header & 0b1 != 0;
        let field_type = FieldType::read(reader, false)?;
        if tag == 0b11 {
            return Ok(FieldSpec {
                name: String::new(),
                field_id: Some(size),
                field_type,
                nullable,
                tracking_ref,
            });
        }
        let encoding = Encoding::try_from_u8(tag)?;
        let name_bytes = reader.read_bytes(size as usize + 1)?;
        let name = FIELD_NAME_DECODER.decode(name_bytes, encoding)?.original;
        Ok(FieldSpec {
            name,
            field_id: None,
            field_type,
            nullable,
            tracking_ref,
        })
    }
}

#[derive(Debug)]
pub struct TypeMeta {
    pub type_id: u32,
    pub register_by_name: bool,
    pub namespace: MetaString,
    pub type_name: MetaString,
    pub field_specs: Vec<FieldSpec>,
}

impl TypeMeta {
    pub fn from_fields(
        type_id: u32,
        namespace: MetaString,
        type_name: MetaString,
        register_by_name: bool,
        field_specs: Vec<FieldSpec>,
    ) -> TypeMeta {
        TypeMeta {
            type_id,
            register_by_name,
            namespace,
            type_name,
            field_specs,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut body = Writer::default();
        let num_fields = self.field_specs.len() as u32;
        let mut class_header = num_fields.min(CLASS_HEADER_FIELDS_MAX) as u8;
        if self.register_by_name {
            class_header |= CLASS_HEADER_BY_NAME_BIT;
        }
        body.write_u8(class_header);
        if num_fields >= CLASS_HEADER_FIELDS_MAX {
            body.write_varuint32(num_fields - CLASS_HEADER_FIELDS_MAX);
        }
        if self.register_by_name {
            write_meta_string_raw(&mut body, &self.namespace);
            write_meta_string_raw(&mut body, &self.type_name);
        } else {
            body.write_u8(TypeId::COMPATIBLE_STRUCT as u8);
            body.write_varuint32(self.type_id);
        }
        for spec in &self.field_specs {
            spec.write(&mut body)?;
        }

        let body = body.into_inner();
        let body_len = body.len() as u64;
        let mut header = body_len.min(HEADER_LEN_MASK) | HEADER_HAS_FIELDS_BIT;
        header |= fingerprint41(&body) << FINGERPRINT_SHIFT;
        let mut out = Writer::default();
        out.write_u64(header);
        if body_len >= HEADER_LEN_MASK {
            out.write_varuint32((body_len - HEADER_LEN_MASK) as u32);
        }
        out.write_bytes(&body);
        Ok(out.into_inner())
    }

    pub fn from_bytes(reader: &mut Reader) -> Result<TypeMeta, Error> {
        let header = reader.read_u64()?;
        if header & HEADER_COMPRESSED_BIT != 0 {
            return Err(Error::UnsupportedStream(
                "compressed type meta is reserved and not supported".into(),
            ));
        }
        let mut body_len = header & HEADER_LEN_MASK;
        if body_len == HEADER_LEN_MASK {
            body_len += reader.read_varuint32()? as u64;
        }
        let body_start = reader.cursor();

        let class_header = reader.read_u8()?;
        let register_by_name = class_header & CLASS_HEADER_BY_NAME_BIT != 0;
        let mut num_fields = (class_header & CLASS_HEADER_FIELDS_MAX as u8) as u32;
        if num_fields == CLASS_HEADER_FIELDS_MAX {
            num_fields += reader.read_varuint32()?;
        }
        let (type_id, namespace, type_name) = if register_by_name {
            let namespace = read_meta_string_raw(reader, &NAMESPACE_DECODER)?;
            let type_name = read_meta_string_raw(reader, &TYPE_NAME_DECODER)?;
            (
                TypeId::NAMED_COMPATIBLE_STRUCT as u32,
                namespace,
                type_name,
            )
        } else {
            let _kind = reader.read_u8()?;
            let type_id = reader.read_varuint32()?;
            (type_id, MetaString::default(), MetaString::default())
        };
        let mut field_specs = Vec::with_capacity(num_fields as usize);
        for _ in 0..num_fields {
            field_specs.push(FieldSpec::read(reader)?);
        }
        if (reader.cursor() - body_start) as u64 != body_len {
            return Err(Error::encode_error(format!(
                "type meta body length mismatch: header says {body_len}, parsed {}",
                reader.cursor() - body_start
            )));
        }
        Ok(TypeMeta {
            type_id,
            register_by_name,
            namespace,
            type_name,
            field_specs,
        })
    }
}

/// Standalone (non-interned) MetaString form used inside TypeMeta bodies so
/// a type's encoded definition is deterministic and cacheable.
fn write_meta_string_raw(writer: &mut Writer, ms: &MetaString) {
    writer.write_varuint32(ms.bytes.len() as u32);
    writer.write_u8(ms.encoding as u8);
    writer.write_bytes(&ms.bytes);
}

fn read_meta_string_raw(
    reader: &mut Reader,
    decoder: &MetaStringDecoder,
) -> Result<MetaString, Error> {
    let len = reader.read_varuint32()? as usize;
    let encoding = Encoding::try_from_u8(reader.read_u8()?)?;
    let bytes = reader.read_bytes(len)?;
    decoder.decode(bytes, encoding)
}

/// 41-bit fingerprint of the meta body: MurmurHash3 x64 128 with seed 47,
/// first 64 bits, absolute value, shifted down to leave room for the flag
/// and length bits.
fn fingerprint41(body: &[u8]) -> u64 {
    let (h1, _) = murmurhash3_x64_128(body, 47);
    ((h1 as i64).unsigned_abs() >> 22) & ((1 << 41) - 1)
}
