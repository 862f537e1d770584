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
use fory_core::meta::NAMESPACE_ENCODER;
use fory_core::types::{Mode, TypeId};
use fory_tests::fory_object;

#[derive(Debug, PartialEq)]
struct Animal {
    name: String,
    legs: i32,
}
fory_object!(struct Animal { name: String, legs: i32 });

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

#[test]
fn named_struct_roundtrip() {
    let mut fory = Fory::default();
    fory.register_by_namespace::<Animal>("org.example", "Animal")
        .unwrap();
    let animal = Animal {
        name: "cat".to_string(),
        legs: 4,
    };
    let bytes = fory.serialize(&animal).unwrap();
    assert_eq!(bytes[2], TypeId::NAMED_STRUCT as u8);
    let back: Animal = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, animal);
}

#[test]
fn namespace_bytes_are_interned_once_per_stream() {
    let mut fory = Fory::default();
    fory.register_by_namespace::<Animal>("org.example", "Animal")
        .unwrap();
    let animals = vec![
        Animal {
            name: "cat".to_string(),
            legs: 4,
        },
        Animal {
            name: "hen".to_string(),
            legs: 2,
        },
        Animal {
            name: "ant".to_string(),
            legs: 6,
        },
    ];
    let bytes = fory.serialize(&animals).unwrap();
    let namespace_bytes = NAMESPACE_ENCODER.encode("org.example").unwrap().bytes;
    assert_eq!(count_occurrences(&bytes, &namespace_bytes), 1);
    let back: Vec<Animal> = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, animals);
}

#[test]
fn named_compatible_struct_roundtrip() {
    let mut fory = Fory::default().mode(Mode::Compatible);
    fory.register_by_name::<Animal>("Animal").unwrap();
    let animal = Animal {
        name: "dog".to_string(),
        legs: 4,
    };
    let bytes = fory.serialize(&animal).unwrap();
    assert_eq!(bytes[2], TypeId::NAMED_COMPATIBLE_STRUCT as u8);
    let back: Animal = fory.deserialize(&bytes).unwrap();
    assert_eq!(back, animal);
}

#[test]
fn separate_registries_with_the_same_name_interoperate() {
    let mut producer = Fory::default();
    producer
        .register_by_namespace::<Animal>("org.example", "Animal")
        .unwrap();
    let mut consumer = Fory::default();
    consumer
        .register_by_namespace::<Animal>("org.example", "Animal")
        .unwrap();

    let animal = Animal {
        name: "owl".to_string(),
        legs: 2,
    };
    let bytes = producer.serialize(&animal).unwrap();
    let back: Animal = consumer.deserialize(&bytes).unwrap();
    assert_eq!(back, animal);
}
