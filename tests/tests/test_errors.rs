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

use fory_core::fory::Fory;
use fory_core::error::Error;
use fory_core::types::RefFlag;
use fory_tests::fory_object;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
struct Record {
    id: i32,
    name: String,
}
fory_object!(struct Record { id: i32, name: String });

#[test]
fn truncated_streams_fail_with_eof() {
    let mut fory = Fory::default();
    fory.register::<Record>(100).unwrap();
    let bytes = fory
        .serialize(&Record {
            id: 5,
            name: "hello".to_string(),
        })
        .unwrap();
    for cut in 1..bytes.len() {
        let err = fory.deserialize::<Record>(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, Error::Eof { .. } | Error::HashMismatch { .. }),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn backreference_to_an_unknown_slot_is_rejected() {
    let fory = Fory::default();
    // header, Ref flag, ref-id 5: nothing was ever registered
    let bytes = [0b10u8, RefFlag::Ref as i8 as u8, 5];
    assert!(matches!(
        fory.deserialize::<Rc<String>>(&bytes),
        Err(Error::RefIntegrity(_))
    ));
}

#[test]
fn unknown_ref_flags_are_rejected() {
    let fory = Fory::default();
    let bytes = [0b10u8, -7i8 as u8];
    assert!(matches!(
        fory.deserialize::<String>(&bytes),
        Err(Error::InvalidValue(_))
    ));
}

#[test]
fn type_id_mismatch_is_reported() {
    let fory = Fory::default();
    let bytes = fory.serialize(&"text".to_string()).unwrap();
    match fory.deserialize::<i32>(&bytes) {
        Err(Error::TypeMismatch { local, remote }) => {
            assert_ne!(local, remote);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn unknown_named_type_is_reported() {
    #[derive(Debug, PartialEq)]
    struct Mine {
        v: i32,
    }
    fory_object!(struct Mine { v: i32 });

    #[derive(Debug, PartialEq)]
    struct Theirs {
        v: i32,
    }
    fory_object!(struct Theirs { v: i32 });

    let mut producer = Fory::default();
    producer
        .register_by_namespace::<Mine>("demo", "mine")
        .unwrap();
    let mut consumer = Fory::default();
    consumer
        .register_by_namespace::<Theirs>("demo", "theirs")
        .unwrap();

    let bytes = producer.serialize(&Mine { v: 3 }).unwrap();
    match consumer.deserialize::<Theirs>(&bytes) {
        Err(Error::UnknownNamedType {
            namespace,
            type_name,
        }) => {
            assert_eq!(namespace, "demo");
            assert_eq!(type_name, "mine");
        }
        other => panic!("expected UnknownNamedType, got {other:?}"),
    }
}

#[test]
fn hash_mismatch_reports_both_values() {
    #[derive(Debug, PartialEq)]
    struct Narrow {
        a: i32,
    }
    fory_object!(struct Narrow { a: i32 });

    #[derive(Debug, PartialEq)]
    struct Wide {
        a: i32,
        b: f64,
    }
    fory_object!(struct Wide { a: i32, b: f64 });

    let mut producer = Fory::default();
    producer.register::<Wide>(100).unwrap();
    let mut consumer = Fory::default();
    consumer.register::<Narrow>(100).unwrap();

    let bytes = producer.serialize(&Wide { a: 1, b: 2.0 }).unwrap();
    let message = match consumer.deserialize::<Narrow>(&bytes) {
        Err(err @ Error::HashMismatch { .. }) => err.to_string(),
        other => panic!("expected HashMismatch, got {other:?}"),
    };
    assert!(message.contains("expected"));
    assert!(message.contains("received"));
}

#[test]
fn partial_failures_leak_nothing_to_the_caller() {
    let mut fory = Fory::default();
    fory.register::<Record>(100).unwrap();
    let good = fory
        .serialize(&Record {
            id: 1,
            name: "ok".to_string(),
        })
        .unwrap();
    // a failed decode leaves the instance reusable for the next stream
    let _ = fory.deserialize::<Record>(&good[..good.len() - 2]).unwrap_err();
    let back: Record = fory.deserialize(&good).unwrap();
    assert_eq!(back.id, 1);
}
