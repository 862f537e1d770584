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
use fory_tests::fory_object;

#[derive(Debug, PartialEq)]
struct Alpha {
    value: i32,
}
fory_object!(struct Alpha { value: i32 });

#[derive(Debug, PartialEq)]
struct Beta {
    value: i32,
}
fory_object!(struct Beta { value: i32 });

#[test]
fn reserved_ids_are_rejected() {
    let mut fory = Fory::default();
    for id in [0u32, 1, 30, 63] {
        assert!(matches!(
            fory.register::<Alpha>(id),
            Err(Error::Registration(_))
        ));
    }
    fory.register::<Alpha>(64).unwrap();
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut fory = Fory::default();
    fory.register::<Alpha>(100).unwrap();
    assert!(matches!(
        fory.register::<Beta>(100),
        Err(Error::Registration(_))
    ));
}

#[test]
fn re_registering_a_type_is_rejected() {
    let mut fory = Fory::default();
    fory.register::<Alpha>(100).unwrap();
    assert!(matches!(
        fory.register::<Alpha>(101),
        Err(Error::Registration(_))
    ));
}

#[test]
fn duplicate_names_are_rejected() {
    let mut fory = Fory::default();
    fory.register_by_namespace::<Alpha>("demo", "record").unwrap();
    assert!(matches!(
        fory.register_by_namespace::<Beta>("demo", "record"),
        Err(Error::Registration(_))
    ));
    fory.register_by_namespace::<Beta>("demo", "other").unwrap();
}

#[test]
fn unregistered_types_cannot_serialize() {
    let fory = Fory::default();
    assert!(matches!(
        fory.serialize(&Alpha { value: 1 }),
        Err(Error::Registration(_))
    ));
}
