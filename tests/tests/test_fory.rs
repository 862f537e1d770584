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

use fory_core::buffer::Reader;
use fory_core::error::Error;
use fory_core::fory::Fory;
use fory_core::resolver::context::{ReadContext, WriteContext};
use fory_core::serializer::Serializer;
use fory_core::types::RefMode;
use fory_tests::fory_object;

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}
fory_object!(struct Point { x: i32, y: i32 });

#[derive(Debug, PartialEq)]
struct Data1 {
    value: i32,
    data2: Data2,
}
fory_object!(struct Data1 { value: i32, data2: Data2 });

#[derive(Debug, PartialEq)]
struct Data2 {
    value: i32,
}
fory_object!(struct Data2 { value: i32 });

#[test]
fn primitive_sequence_roundtrips_bit_exact() {
    let fory = Fory::default();
    let mut context = WriteContext::new(&fory);
    true.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    false.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    (-1i32).fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i8::MAX.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i8::MIN.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i16::MAX.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i16::MIN.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i32::MAX.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    i32::MIN.fory_write(&mut context, RefMode::Tracking, true).unwrap();
    0x7fff_ffff_ffff_ffffi64
        .fory_write(&mut context, RefMode::Tracking, true)
        .unwrap();
    (0x8000_0000_0000_0000u64 as i64)
        .fory_write(&mut context, RefMode::Tracking, true)
        .unwrap();
    (-1.0f32).fory_write(&mut context, RefMode::Tracking, true).unwrap();
    (-1.0f64).fory_write(&mut context, RefMode::Tracking, true).unwrap();
    "str".to_string()
        .fory_write(&mut context, RefMode::Tracking, true)
        .unwrap();
    let bytes = context.into_bytes();

    let mut reader = Reader::new(&bytes);
    let mut context = ReadContext::new(&fory, &mut reader);
    assert!(bool::fory_read(&mut context, RefMode::Tracking, true).unwrap());
    assert!(!bool::fory_read(&mut context, RefMode::Tracking, true).unwrap());
    assert_eq!(i32::fory_read(&mut context, RefMode::Tracking, true).unwrap(), -1);
    assert_eq!(i8::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i8::MAX);
    assert_eq!(i8::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i8::MIN);
    assert_eq!(i16::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i16::MAX);
    assert_eq!(i16::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i16::MIN);
    assert_eq!(i32::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i32::MAX);
    assert_eq!(i32::fory_read(&mut context, RefMode::Tracking, true).unwrap(), i32::MIN);
    assert_eq!(
        i64::fory_read(&mut context, RefMode::Tracking, true).unwrap(),
        0x7fff_ffff_ffff_ffff
    );
    assert_eq!(
        i64::fory_read(&mut context, RefMode::Tracking, true).unwrap(),
        0x8000_0000_0000_0000u64 as i64
    );
    assert_eq!(
        f32::fory_read(&mut context, RefMode::Tracking, true)
            .unwrap()
            .to_bits(),
        (-1.0f32).to_bits()
    );
    assert_eq!(
        f64::fory_read(&mut context, RefMode::Tracking, true)
            .unwrap()
            .to_bits(),
        (-1.0f64).to_bits()
    );
    assert_eq!(
        String::fory_read(&mut context, RefMode::Tracking, true).unwrap(),
        "str"
    );
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn null_root_is_one_header_byte() {
    let fory = Fory::default();
    let bytes = fory.serialize(&None::<i32>).unwrap();
    assert_eq!(bytes, vec![0b11]);
    let back: Option<i32> = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, None);
}

#[test]
fn header_bits_are_enforced() {
    let fory = Fory::default();
    // cross-language bit missing
    assert!(matches!(
        fory.deserialize::<i32>(&[0b0]),
        Err(Error::UnsupportedStream(_))
    ));
    // out-of-band bit set
    assert!(matches!(
        fory.deserialize::<i32>(&[0b110]),
        Err(Error::UnsupportedStream(_))
    ));
    // reserved high bit set
    assert!(matches!(
        fory.deserialize::<i32>(&[0b1000_0010]),
        Err(Error::UnsupportedStream(_))
    ));
    // empty stream
    assert!(matches!(fory.deserialize::<i32>(&[]), Err(Error::Eof { .. })));
}

#[test]
fn nested_struct_register_order() {
    let mut fory = Fory::default();
    // outer registered first; field layouts are built lazily so the inner
    // type does not have to exist yet
    fory.register::<Data1>(100).unwrap();
    fory.register::<Data2>(101).unwrap();
    let data = Data1 {
        value: 42,
        data2: Data2 { value: 24 },
    };
    let bytes = fory.serialize(&data).unwrap();
    let result: Data1 = fory.deserialize(&bytes).unwrap();
    assert_eq!(data, result);
}

#[test]
fn serialize_to_appends_streams() {
    let mut fory = Fory::default();
    fory.register::<Point>(100).unwrap();
    let p1 = Point { x: 1, y: 2 };
    let p2 = Point { x: -3, y: 4 };

    let expected_first = fory.serialize(&p1).unwrap();
    let expected_second = fory.serialize(&p2).unwrap();

    let mut buf = Vec::new();
    let len_first = fory.serialize_to(&p1, &mut buf).unwrap();
    assert_eq!(len_first, expected_first.len());
    assert_eq!(&buf[..len_first], &expected_first);
    let len_second = fory.serialize_to(&p2, &mut buf).unwrap();
    assert_eq!(&buf[len_first..], &expected_second);
    assert_eq!(buf.len(), len_first + len_second);

    let mut reader = Reader::new(&buf);
    let d1: Point = fory.deserialize_from(&mut reader).unwrap();
    let d2: Point = fory.deserialize_from(&mut reader).unwrap();
    assert_eq!(d1, p1);
    assert_eq!(d2, p2);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn roots_share_no_state_across_calls() {
    let mut fory = Fory::default();
    fory.register::<Point>(100).unwrap();
    let p = Point { x: 7, y: 9 };
    let first = fory.serialize(&p).unwrap();
    let second = fory.serialize(&p).unwrap();
    // per-stream tables reset between calls, so streams are identical
    assert_eq!(first, second);
}
