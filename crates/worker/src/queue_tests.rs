// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use modscan_core::test_support::source_task;

#[tokio::test]
async fn repeated_keys_are_dropped() {
    let queue = MemoryQueue::new();
    let a = source_task("example.com/a", "v1.0.0", 5);
    let b = source_task("example.com/b", "v1.0.0", 5);

    assert!(queue.enqueue(&a).await.unwrap());
    assert!(queue.enqueue(&b).await.unwrap());
    assert!(!queue.enqueue(&a).await.unwrap());

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.tasks(), vec![a, b]);
}

#[tokio::test]
async fn importer_count_is_not_part_of_the_key() {
    let queue = MemoryQueue::new();
    assert!(queue.enqueue(&source_task("example.com/a", "v1.0.0", 5)).await.unwrap());
    assert!(!queue.enqueue(&source_task("example.com/a", "v1.0.0", 50)).await.unwrap());
    assert!(!queue.is_empty());
}
