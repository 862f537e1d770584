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
use fory_tests::fory_object;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct CircularRef {
    name: String,
    self_ref: Option<Rc<RefCell<CircularRef>>>,
}
fory_object!(struct CircularRef {
    name: String,
    self_ref: Option<Rc<RefCell<CircularRef>>>,
});

#[derive(Debug, PartialEq)]
struct Inner {
    id: i32,
    name: String,
}
fory_object!(struct Inner { id: i32, name: String });

#[derive(Debug, PartialEq)]
struct Outer {
    inner1: Rc<RefCell<Inner>>,
    inner2: Rc<RefCell<Inner>>,
}
fory_object!(struct Outer {
    inner1: Rc<RefCell<Inner>>,
    inner2: Rc<RefCell<Inner>>,
});

#[test]
fn self_referential_cycle_is_restored() {
    let mut fory = Fory::default();
    fory.register::<CircularRef>(100).unwrap();

    let a = Rc::new(RefCell::new(CircularRef {
        name: "a".to_string(),
        self_ref: None,
    }));
    a.borrow_mut().self_ref = Some(a.clone());

    let bytes = fory.serialize(&a).unwrap();
    let restored: Rc<RefCell<CircularRef>> = fory.deserialize(&bytes).unwrap();

    assert_eq!(restored.borrow().name, "a");
    let inner = restored.borrow().self_ref.clone().unwrap();
    assert!(Rc::ptr_eq(&restored, &inner));

    // break the cycles so the test does not leak
    a.borrow_mut().self_ref = None;
    restored.borrow_mut().self_ref = None;
}

#[test]
fn shared_reference_identity_is_preserved() {
    let mut fory = Fory::default();
    fory.register::<Inner>(101).unwrap();
    fory.register::<Outer>(102).unwrap();

    let inner = Rc::new(RefCell::new(Inner {
        id: 7,
        name: "x".to_string(),
    }));
    let outer = Outer {
        inner1: inner.clone(),
        inner2: inner,
    };

    let bytes = fory.serialize(&outer).unwrap();
    let restored: Outer = fory.deserialize(&bytes).unwrap();

    assert!(Rc::ptr_eq(&restored.inner1, &restored.inner2));
    assert_eq!(restored.inner1.borrow().id, 7);
    // identity, not copies: a write through one handle shows through the other
    restored.inner1.borrow_mut().name = "changed".to_string();
    assert_eq!(restored.inner2.borrow().name, "changed");
}

#[test]
fn repeated_rc_in_a_list_deduplicates() {
    let fory = Fory::default();
    let value = Rc::new("shared".to_string());
    let list = vec![value.clone(), value.clone(), value];

    let bytes = fory.serialize(&list).unwrap();
    let restored: Vec<Rc<String>> = fory.deserialize(&bytes).unwrap();

    assert_eq!(restored.len(), 3);
    assert_eq!(*restored[0], "shared");
    assert!(Rc::ptr_eq(&restored[0], &restored[1]));
    assert!(Rc::ptr_eq(&restored[0], &restored[2]));

    // the body is written once; later occurrences are backreferences
    let single = fory.serialize(&vec![Rc::new("shared".to_string())]).unwrap();
    assert!(bytes.len() < single.len() * 2);
}

#[test]
fn arc_tracking_roundtrip() {
    let fory = Fory::default();
    let value = Arc::new("shared".to_string());
    let list = vec![value.clone(), value];

    let bytes = fory.serialize(&list).unwrap();
    let restored: Vec<Arc<String>> = fory.deserialize(&bytes).unwrap();
    assert!(Arc::ptr_eq(&restored[0], &restored[1]));
    assert_eq!(*restored[0], "shared");
}

#[test]
fn distinct_allocations_stay_distinct() {
    let fory = Fory::default();
    let list = vec![Rc::new("a".to_string()), Rc::new("a".to_string())];
    let bytes = fory.serialize(&list).unwrap();
    let restored: Vec<Rc<String>> = fory.deserialize(&bytes).unwrap();
    // equal values but separate identities on both sides
    assert_eq!(*restored[0], *restored[1]);
    assert!(!Rc::ptr_eq(&restored[0], &restored[1]));
}
