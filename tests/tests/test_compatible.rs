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

//! Schema evolution: producers and consumers with drifting field sets.

use fory_core::fory::Fory;
use fory_core::types::Mode;
use fory_tests::fory_object;
use std::collections::HashMap;

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

#[derive(Debug, PartialEq)]
struct FullRecord {
    a: i32,
    b: String,
    c: f64,
}
fory_object!(struct FullRecord { a: i32, b: String, c: f64 });

#[derive(Debug, PartialEq)]
struct SlimRecord {
    a: i32,
    c: f64,
}
fory_object!(struct SlimRecord { a: i32, c: f64 });

#[derive(Debug, PartialEq)]
struct WideRecord {
    a: i32,
    b: String,
    c: f64,
    d: Vec<String>,
}
fory_object!(struct WideRecord {
    a: i32,
    b: String,
    c: f64,
    d: Vec<String>,
});

#[test]
fn same_schema_compatible_roundtrip() {
    let mut fory = Fory::default().mode(Mode::Compatible);
    fory.register::<FullRecord>(120).unwrap();
    let record = FullRecord {
        a: 1,
        b: "x".to_string(),
        c: 2.5,
    };
    let bytes = fory.serialize(&record).unwrap();
    let back: FullRecord = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, record);
}

#[test]
fn consumer_missing_a_field_skips_it() {
    let mut producer = Fory::default().mode(Mode::Compatible);
    producer.register::<FullRecord>(120).unwrap();
    let mut consumer = Fory::default().mode(Mode::Compatible);
    consumer.register::<SlimRecord>(120).unwrap();

    let bytes = producer
        .serialize(&FullRecord {
            a: 1,
            b: "x".to_string(),
            c: 2.5,
        })
        .unwrap();
    let slim: SlimRecord = consumer.deserialize(&bytes).unwrap();
    assert_eq!(slim, SlimRecord { a: 1, c: 2.5 });
}

#[test]
fn consumer_with_extra_fields_defaults_them() {
    let mut producer = Fory::default().mode(Mode::Compatible);
    producer.register::<SlimRecord>(120).unwrap();
    let mut consumer = Fory::default().mode(Mode::Compatible);
    consumer.register::<WideRecord>(120).unwrap();

    let bytes = producer.serialize(&SlimRecord { a: 9, c: -1.5 }).unwrap();
    let wide: WideRecord = consumer.deserialize(&bytes).unwrap();
    assert_eq!(
        wide,
        WideRecord {
            a: 9,
            b: String::new(),
            c: -1.5,
            d: vec![],
        }
    );
}

#[derive(Debug, PartialEq)]
struct Nested {
    tag: String,
}
fory_object!(struct Nested { tag: String });

#[derive(Debug, PartialEq)]
struct LoadedRecord {
    keep: i32,
    extra_text: String,
    extra_list: Vec<String>,
    extra_map: HashMap<String, i32>,
    extra_opt: Option<f64>,
    extra_nested: Nested,
    extra_bytes: Vec<u8>,
}
fory_object!(struct LoadedRecord {
    keep: i32,
    extra_text: String,
    extra_list: Vec<String>,
    extra_map: HashMap<String, i32>,
    extra_opt: Option<f64>,
    extra_nested: Nested,
    extra_bytes: Vec<u8>,
});

#[derive(Debug, PartialEq)]
struct BareRecord {
    keep: i32,
}
fory_object!(struct BareRecord { keep: i32 });

#[test]
fn every_unknown_field_kind_is_skipped() {
    let mut producer = Fory::default().mode(Mode::Compatible);
    producer.register::<LoadedRecord>(121).unwrap();
    producer.register::<Nested>(122).unwrap();
    // the consumer knows nothing about Nested; the wire TypeMeta alone
    // drives the skip
    let mut consumer = Fory::default().mode(Mode::Compatible);
    consumer.register::<BareRecord>(121).unwrap();

    let record = LoadedRecord {
        keep: 77,
        extra_text: "gone".to_string(),
        extra_list: vec!["a".to_string(), "b".to_string()],
        extra_map: [("k".to_string(), 1i32)].into_iter().collect(),
        extra_opt: Some(3.25),
        extra_nested: Nested {
            tag: "inner".to_string(),
        },
        extra_bytes: vec![1, 2, 3],
    };
    let bytes = producer.serialize(&record).unwrap();
    let bare: BareRecord = consumer.deserialize(&bytes).unwrap();
    assert_eq!(bare, BareRecord { keep: 77 });
}

#[test]
fn wire_null_lands_as_local_default() {
    #[derive(Debug, PartialEq)]
    struct NullableSide {
        m: Option<i32>,
    }
    fory_object!(struct NullableSide { m: Option<i32> });

    #[derive(Debug, PartialEq)]
    struct PlainSide {
        m: i32,
    }
    fory_object!(struct PlainSide { m: i32 });

    let mut producer = Fory::default().mode(Mode::Compatible);
    producer.register::<NullableSide>(123).unwrap();
    let mut consumer = Fory::default().mode(Mode::Compatible);
    consumer.register::<PlainSide>(123).unwrap();

    let bytes = producer.serialize(&NullableSide { m: None }).unwrap();
    let plain: PlainSide = consumer.deserialize(&bytes).unwrap();
    assert_eq!(plain, PlainSide { m: 0 });

    let bytes = producer.serialize(&NullableSide { m: Some(5) }).unwrap();
    let plain: PlainSide = consumer.deserialize(&bytes).unwrap();
    assert_eq!(plain, PlainSide { m: 5 });
}

#[derive(Debug, PartialEq, Clone)]
struct NamedItem {
    label: String,
    rank: i32,
}
fory_object!(struct NamedItem { label: String, rank: i32 });

#[test]
fn type_meta_is_shared_across_a_stream() {
    let mut fory = Fory::default().mode(Mode::Compatible);
    fory.register_by_namespace::<NamedItem>("demo", "NamedItem")
        .unwrap();

    let items = vec![
        NamedItem {
            label: "one".to_string(),
            rank: 1,
        },
        NamedItem {
            label: "two".to_string(),
            rank: 2,
        },
        NamedItem {
            label: "three".to_string(),
            rank: 3,
        },
    ];
    let bytes = fory.serialize(&items).unwrap();

    // the encoded definition appears exactly once; the two later struct
    // occurrences reference intern slot 0
    let type_def = fory
        .get_type_resolver()
        .struct_layout::<NamedItem>()
        .unwrap()
        .type_def
        .clone();
    assert_eq!(count_occurrences(&bytes, &type_def), 1);

    let back: Vec<NamedItem> = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, items);
}

#[test]
fn field_type_drift_is_skipped_not_misread() {
    #[derive(Debug, PartialEq)]
    struct TextSide {
        v: String,
    }
    fory_object!(struct TextSide { v: String });

    #[derive(Debug, PartialEq)]
    struct IntSide {
        v: i32,
    }
    fory_object!(struct IntSide { v: i32 });

    let mut producer = Fory::default().mode(Mode::Compatible);
    producer.register::<TextSide>(124).unwrap();
    let mut consumer = Fory::default().mode(Mode::Compatible);
    consumer.register::<IntSide>(124).unwrap();

    let bytes = producer
        .serialize(&TextSide {
            v: "not a number".to_string(),
        })
        .unwrap();
    let back: IntSide = consumer.deserialize(&bytes).unwrap();
    assert_eq!(back, IntSide { v: 0 });
}
