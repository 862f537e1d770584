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

use crate::ensure;
use crate::error::Error;
use crate::meta::{FieldSpec, MetaString, TypeMeta, NAMESPACE_ENCODER, TYPE_NAME_ENCODER};
use crate::types::{
    fold_field_hash, is_compressed_primitive, is_primitive_value, is_typed_array,
    primitive_byte_size, uniform_hash_id, Mode, UserKind, BINARY, COMPATIBLE_STRUCT, DECIMAL,
    DURATION, ENUM, EXT, FIRST_USER_TYPE_ID, LIST, LOCAL_DATE, MAP, NAMED_COMPATIBLE_STRUCT,
    NAMED_ENUM, NAMED_EXT, NAMED_STRUCT, SET, STRING, STRUCT, TIMESTAMP,
};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

pub type FieldsFn = fn(&TypeResolver) -> Result<Vec<FieldSpec>, Error>;

/// Immutable registration record for one user type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    /// The id carried at value sites: the user id for by-id registration,
    /// the NAMED_* id of the kind for by-name registration.
    pub type_id: u32,
    pub user_id: u32,
    pub register_by_name: bool,
    pub kind: UserKind,
    pub namespace: MetaString,
    pub type_name: MetaString,
}

/// Per-struct derived data, built lazily on first use so structs can be
/// registered before the types of their fields.
pub struct StructLayout {
    /// Fields in canonical wire order.
    pub specs: Vec<FieldSpec>,
    pub hash: i32,
    /// Encoded TypeMeta, emitted through the per-stream intern table in
    /// compatible mode.
    pub type_def: Vec<u8>,
}

pub struct TypeResolver {
    mode: Mode,
    infos: HashMap<std::any::TypeId, TypeInfo>,
    ids: HashMap<u32, std::any::TypeId>,
    names: HashMap<(String, String), std::any::TypeId>,
    fields_fns: HashMap<std::any::TypeId, FieldsFn>,
    layouts: RefCell<HashMap<std::any::TypeId, Rc<StructLayout>>>,
}

impl TypeResolver {
    pub fn new(mode: Mode) -> TypeResolver {
        TypeResolver {
            mode,
            infos: HashMap::new(),
            ids: HashMap::new(),
            names: HashMap::new(),
            fields_fns: HashMap::new(),
            layouts: RefCell::new(HashMap::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn register_by_id<T: 'static>(
        &mut self,
        user_id: u32,
        kind: UserKind,
        fields_fn: Option<FieldsFn>,
    ) -> Result<(), Error> {
        ensure!(
            user_id >= FIRST_USER_TYPE_ID,
            Error::registration(format!(
                "type id {user_id} is reserved for built-in kinds, user ids start at {FIRST_USER_TYPE_ID}"
            ))
        );
        let rs_type = std::any::TypeId::of::<T>();
        ensure!(
            !self.infos.contains_key(&rs_type),
            Error::registration(format!(
                "{} is already registered",
                std::any::type_name::<T>()
            ))
        );
        ensure!(
            !self.ids.contains_key(&user_id),
            Error::registration(format!("type id {user_id} is already registered"))
        );
        self.infos.insert(
            rs_type,
            TypeInfo {
                type_id: user_id,
                user_id,
                register_by_name: false,
                kind,
                namespace: MetaString::default(),
                type_name: MetaString::default(),
            },
        );
        self.ids.insert(user_id, rs_type);
        if let Some(f) = fields_fn {
            self.fields_fns.insert(rs_type, f);
        }
        Ok(())
    }

    pub fn register_by_name<T: 'static>(
        &mut self,
        namespace: &str,
        type_name: &str,
        kind: UserKind,
        fields_fn: Option<FieldsFn>,
    ) -> Result<(), Error> {
        let rs_type = std::any::TypeId::of::<T>();
        ensure!(
            !self.infos.contains_key(&rs_type),
            Error::registration(format!(
                "{} is already registered",
                std::any::type_name::<T>()
            ))
        );
        let key = (namespace.to_string(), type_name.to_string());
        ensure!(
            !self.names.contains_key(&key),
            Error::registration(format!(
                "named type {namespace:?}.{type_name:?} is already registered"
            ))
        );
        let type_id = match kind {
            UserKind::Struct => match self.mode {
                Mode::SchemaConsistent => NAMED_STRUCT,
                Mode::Compatible => NAMED_COMPATIBLE_STRUCT,
            },
            UserKind::Enum => NAMED_ENUM,
            UserKind::Ext => NAMED_EXT,
        };
        self.infos.insert(
            rs_type,
            TypeInfo {
                type_id,
                user_id: 0,
                register_by_name: true,
                kind,
                namespace: NAMESPACE_ENCODER.encode(namespace)?,
                type_name: TYPE_NAME_ENCODER.encode(type_name)?,
            },
        );
        self.names.insert(key, rs_type);
        if let Some(f) = fields_fn {
            self.fields_fns.insert(rs_type, f);
        }
        Ok(())
    }

    pub fn type_info<T: 'static>(&self) -> Result<&TypeInfo, Error> {
        self.infos
            .get(&std::any::TypeId::of::<T>())
            .ok_or_else(|| {
                Error::registration(format!(
                    "{} is not registered",
                    std::any::type_name::<T>()
                ))
            })
    }

    pub fn registered_type_id<T: 'static>(&self) -> Result<u32, Error> {
        Ok(self.type_info::<T>()?.type_id)
    }

    pub fn is_name_registered(&self, namespace: &str, type_name: &str) -> bool {
        self.names
            .contains_key(&(namespace.to_string(), type_name.to_string()))
    }

    /// The wire kind a field of this type declares inside a TypeMeta.
    pub fn field_kind<T: 'static>(&self) -> Result<u32, Error> {
        let info = self.type_info::<T>()?;
        Ok(match info.kind {
            UserKind::Struct => match (info.register_by_name, self.mode) {
                (false, Mode::SchemaConsistent) => STRUCT,
                (false, Mode::Compatible) => COMPATIBLE_STRUCT,
                (true, Mode::SchemaConsistent) => NAMED_STRUCT,
                (true, Mode::Compatible) => NAMED_COMPATIBLE_STRUCT,
            },
            UserKind::Enum => {
                if info.register_by_name {
                    NAMED_ENUM
                } else {
                    ENUM
                }
            }
            UserKind::Ext => {
                if info.register_by_name {
                    NAMED_EXT
                } else {
                    EXT
                }
            }
        })
    }

    pub fn struct_layout<T: 'static>(&self) -> Result<Rc<StructLayout>, Error> {
        let rs_type = std::any::TypeId::of::<T>();
        if let Some(layout) = self.layouts.borrow().get(&rs_type) {
            return Ok(layout.clone());
        }
        let info = self.type_info::<T>()?.clone();
        let fields_fn = self.fields_fns.get(&rs_type).copied().ok_or_else(|| {
            Error::registration(format!(
                "{} carries no field list",
                std::any::type_name::<T>()
            ))
        })?;
        let mut specs = fields_fn(self)?;
        sort_field_specs(&mut specs);
        let hash = struct_hash(&specs);
        let type_def = TypeMeta::from_fields(
            info.user_id,
            info.namespace,
            info.type_name,
            info.register_by_name,
            specs.clone(),
        )
        .to_bytes()?;
        let layout = Rc::new(StructLayout {
            specs,
            hash,
            type_def,
        });
        self.layouts
            .borrow_mut()
            .insert(rs_type, layout.clone());
        Ok(layout)
    }
}

/// Field bins, kept in this order on the wire:
/// 1. non-nullable primitive values
/// 2. nullable primitive values
/// 3. other built-in scalars (string, time kinds, binary, typed arrays)
/// 4. lists  5. sets  6. maps  7. user types
fn field_bin(spec: &FieldSpec) -> u8 {
    let type_id = spec.field_type.type_id;
    if is_primitive_value(type_id) {
        if spec.nullable {
            2
        } else {
            1
        }
    } else if type_id == LIST {
        4
    } else if type_id == SET {
        5
    } else if type_id == MAP {
        6
    } else if is_builtin_scalar(type_id) {
        3
    } else {
        7
    }
}

fn is_builtin_scalar(type_id: u32) -> bool {
    matches!(
        type_id,
        STRING | TIMESTAMP | LOCAL_DATE | DURATION | BINARY | DECIMAL
    ) || is_typed_array(type_id)
}

fn compare_fields(a: &FieldSpec, b: &FieldSpec) -> Ordering {
    let bin_a = field_bin(a);
    let bin_b = field_bin(b);
    if bin_a != bin_b {
        return bin_a.cmp(&bin_b);
    }
    let id_a = a.field_type.type_id;
    let id_b = b.field_type.type_id;
    if bin_a <= 2 {
        // primitives: uncompressed first, wider first, higher id first
        let compressed = is_compressed_primitive(id_a).cmp(&is_compressed_primitive(id_b));
        if compressed != Ordering::Equal {
            return compressed;
        }
        let size = primitive_byte_size(id_b).cmp(&primitive_byte_size(id_a));
        if size != Ordering::Equal {
            return size;
        }
        let id = id_b.cmp(&id_a);
        if id != Ordering::Equal {
            return id;
        }
    } else {
        let id = id_a.cmp(&id_b);
        if id != Ordering::Equal {
            return id;
        }
    }
    a.sort_key().cmp(&b.sort_key())
}

/// Canonical field order: a pure function of the field set, identical in
/// every language binding.
pub fn sort_field_specs(specs: &mut [FieldSpec]) {
    specs.sort_by(compare_fields);
}

/// 32-bit structure hash over the sorted field list; zero is remapped to 1.
pub fn struct_hash(specs: &[FieldSpec]) -> i32 {
    let mut hash: u32 = 17;
    for spec in specs {
        hash = fold_field_hash(hash, uniform_hash_id(spec.field_type.type_id));
    }
    if hash == 0 {
        1
    } else {
        hash as i32
    }
}
