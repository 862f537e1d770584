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

use fory_core::error::Error;
use fory_core::fory::Fory;
use fory_core::types::TypeId;
use fory_tests::{fory_enum, fory_object};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Color {
    Green = 0,
    Red = 1,
    Blue = 2,
}
fory_enum!(Color { Green = 0, Red = 1, Blue = 2 });

#[derive(Debug, PartialEq)]
struct Palette {
    primary: Color,
    accent: Option<Color>,
}
fory_object!(struct Palette {
    primary: Color,
    accent: Option<Color>,
});

#[test]
fn ordinals_roundtrip() {
    let mut fory = Fory::default();
    fory.register_serializer::<Color>(110).unwrap();
    for color in [Color::Green, Color::Red, Color::Blue] {
        let bytes = fory.serialize(&color).unwrap();
        let back: Color = fory.deserialize(&bytes).unwrap();
        assert_eq!(back, color);
    }
}

#[test]
fn enum_wire_is_the_ordinal() {
    let mut fory = Fory::default();
    fory.register_serializer::<Color>(110).unwrap();
    let bytes = fory.serialize(&Color::Blue).unwrap();
    // header, not-null flag, varuint32 user id, varuint32 ordinal
    assert_eq!(bytes, vec![0b10, -1i8 as u8, 110, 2]);
}

#[test]
fn unknown_ordinal_is_rejected() {
    let mut fory = Fory::default();
    fory.register_serializer::<Color>(110).unwrap();
    let mut bytes = fory.serialize(&Color::Blue).unwrap();
    *bytes.last_mut().unwrap() = 9;
    assert!(matches!(
        fory.deserialize::<Color>(&bytes),
        Err(Error::InvalidValue(_))
    ));
}

#[test]
fn enums_inside_structs() {
    let mut fory = Fory::default();
    fory.register_serializer::<Color>(110).unwrap();
    fory.register::<Palette>(111).unwrap();
    let palette = Palette {
        primary: Color::Red,
        accent: None,
    };
    let bytes = fory.serialize(&palette).unwrap();
    let back: Palette = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, palette);

    let palette = Palette {
        primary: Color::Green,
        accent: Some(Color::Blue),
    };
    let bytes = fory.serialize(&palette).unwrap();
    let back: Palette = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, palette);
}

#[test]
fn named_enum_carries_its_name_pair() {
    let mut fory = Fory::default();
    fory.register_serializer_by_name::<Color>("color").unwrap();
    let bytes = fory.serialize(&Color::Red).unwrap();
    // value-site id is the named-enum kind, not a user id
    assert_eq!(bytes[2], TypeId::NAMED_ENUM as u8);
    let back: Color = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, Color::Red);
}

#[test]
fn enum_lists_roundtrip() {
    let mut fory = Fory::default();
    fory.register_serializer::<Color>(110).unwrap();
    let colors = vec![Color::Blue, Color::Blue, Color::Green];
    let bytes = fory.serialize(&colors).unwrap();
    let back: Vec<Color> = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, colors);
}
