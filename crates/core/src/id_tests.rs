// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("tst-");
}

#[test]
fn new_ids_carry_prefix_and_are_unique() {
    let a = TestId::new();
    let b = TestId::new();
    assert!(a.as_str().starts_with("tst-"));
    assert_eq!(a.suffix().len(), 19);
    assert_ne!(a, b);
}

#[test]
fn from_string_keeps_value_verbatim() {
    let id = TestId::from_string("external-id");
    assert_eq!(id, "external-id");
    assert_eq!(id.suffix(), "external-id");
    assert_eq!(id.to_string(), "external-id");
}

#[test]
fn hash_map_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(TestId::from("k"), 42);
    assert_eq!(map.get("k"), Some(&42));
}

#[test]
fn serializes_transparently() {
    let id = TestId::from("tst-abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"tst-abc\"");
    let back: TestId = serde_json::from_str("\"tst-abc\"").unwrap();
    assert_eq!(back, id);
}
