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

//! Test support for the integration suite. The macros below emit exactly
//! the impls a code-generation front-end produces for user structs and
//! enums; the suite uses them so the wire-level scenarios stay readable.

/// Implements `Serializer`, `StructSerializer`, `ForyDefault` and the
/// general-list marker for a plain struct, dispatching per-field access by
/// field name.
#[macro_export]
macro_rules! fory_object {
    (struct $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl ::fory_core::serializer::ForyDefault for $name {
            fn fory_default() -> Self {
                Self {
                    $($field: ::fory_core::serializer::ForyDefault::fory_default()),*
                }
            }
        }

        impl ::fory_core::serializer::Serializer for $name {
            fn fory_write_data(
                &self,
                context: &mut ::fory_core::resolver::context::WriteContext,
            ) -> Result<(), ::fory_core::error::Error> {
                ::fory_core::serializer::struct_::write_struct_data(self, context)
            }

            fn fory_read_data(
                context: &mut ::fory_core::resolver::context::ReadContext,
            ) -> Result<Self, ::fory_core::error::Error> {
                ::fory_core::serializer::struct_::read_struct_data(context)
            }

            fn fory_get_type_id(
                resolver: &::fory_core::resolver::type_resolver::TypeResolver,
            ) -> Result<u32, ::fory_core::error::Error> {
                resolver.registered_type_id::<Self>()
            }
        }

        impl ::fory_core::serializer::StructSerializer for $name {
            fn fory_fields(
                resolver: &::fory_core::resolver::type_resolver::TypeResolver,
            ) -> Result<Vec<::fory_core::meta::FieldSpec>, ::fory_core::error::Error> {
                Ok(vec![
                    $(::fory_core::meta::FieldSpec::new(
                        stringify!($field),
                        <$ty as ::fory_core::serializer::Serializer>::fory_field_type(resolver)?,
                    )),*
                ])
            }

            fn fory_write_field(
                &self,
                spec: &::fory_core::meta::FieldSpec,
                context: &mut ::fory_core::resolver::context::WriteContext,
            ) -> Result<(), ::fory_core::error::Error> {
                $(
                    if spec.name == stringify!($field) {
                        return ::fory_core::serializer::write_field(&self.$field, spec, context);
                    }
                )*
                Err(::fory_core::error::Error::invalid_value(format!(
                    "{} has no field named {}",
                    stringify!($name),
                    spec.name
                )))
            }

            fn fory_read_field(
                &mut self,
                spec: &::fory_core::meta::FieldSpec,
                context: &mut ::fory_core::resolver::context::ReadContext,
            ) -> Result<(), ::fory_core::error::Error> {
                $(
                    if spec.name == stringify!($field) {
                        self.$field = ::fory_core::serializer::read_field(spec, context)?;
                        return Ok(());
                    }
                )*
                Err(::fory_core::error::Error::invalid_value(format!(
                    "{} has no field named {}",
                    stringify!($name),
                    spec.name
                )))
            }
        }

        impl ::fory_core::types::ForyGeneralList for $name {}
    };
}

/// Implements `Serializer` and friends for a field-less enum with explicit
/// ordinals.
#[macro_export]
macro_rules! fory_enum {
    ($name:ident { $first:ident = $first_ord:expr $(, $variant:ident = $ord:expr)* $(,)? }) => {
        impl ::fory_core::serializer::ForyDefault for $name {
            fn fory_default() -> Self {
                Self::$first
            }
        }

        impl ::fory_core::serializer::Serializer for $name {
            fn fory_write_data(
                &self,
                context: &mut ::fory_core::resolver::context::WriteContext,
            ) -> Result<(), ::fory_core::error::Error> {
                ::fory_core::serializer::enum_::write_ordinal::<Self>(context, *self as u32)
            }

            fn fory_read_data(
                context: &mut ::fory_core::resolver::context::ReadContext,
            ) -> Result<Self, ::fory_core::error::Error> {
                let ordinal = ::fory_core::serializer::enum_::read_ordinal::<Self>(context)?;
                if ordinal == $first_ord {
                    return Ok(Self::$first);
                }
                $(
                    if ordinal == $ord {
                        return Ok(Self::$variant);
                    }
                )*
                Err(::fory_core::error::Error::invalid_value(format!(
                    "{} has no variant with ordinal {ordinal}",
                    stringify!($name)
                )))
            }

            fn fory_get_type_id(
                resolver: &::fory_core::resolver::type_resolver::TypeResolver,
            ) -> Result<u32, ::fory_core::error::Error> {
                resolver.registered_type_id::<Self>()
            }

            fn fory_user_kind() -> ::fory_core::types::UserKind {
                ::fory_core::types::UserKind::Enum
            }
        }

        impl ::fory_core::types::ForyGeneralList for $name {}
    };
}
