// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rxlens_core::{RxError, StreamItem};
use rxlens_stream::{merge_all, DistinctUntilChangedExt, ValueStreamExt};
use rxlens_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream, unwrap_value,
};
use futures::StreamExt;

#[tokio::test]
async fn distinct_until_changed_suppresses_consecutive_duplicates() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    let mut distinct = stream.distinct_until_changed();

    // Act
    for value in [1, 1, 2, 2, 2, 1] {
        tx.send(value)?;
    }
    drop(tx);

    // Assert
    let values: Vec<i32> = distinct.by_ref().map(unwrap_item).collect().await;
    assert_eq!(values, vec![1, 2, 1]);
    Ok(())
}

#[tokio::test]
async fn distinct_until_changed_forwards_errors_without_resetting() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors();
    let mut distinct = stream.distinct_until_changed();

    // Act & Assert
    tx.send(StreamItem::Value("a"))?;
    assert_eq!(unwrap_value(distinct.next().await), "a");

    tx.send(StreamItem::Error(RxError::stream_error("oops")))?;
    assert!(unwrap_stream(&mut distinct, 500).await.is_error());

    tx.send(StreamItem::Value("a"))?;
    assert_no_element_emitted(&mut distinct, 50).await;
    Ok(())
}

#[tokio::test]
async fn map_value_and_filter_value_leave_errors_alone() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors();
    let mut evens_doubled = stream
        .filter_value(|value: &i32| value % 2 == 0)
        .map_value(|value| value * 2);

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(RxError::stream_error("bad")))?;
    tx.send(StreamItem::Value(4))?;

    // Assert
    assert_eq!(unwrap_value(evens_doubled.next().await), 4);
    assert!(unwrap_stream(&mut evens_doubled, 500).await.is_error());
    assert_eq!(unwrap_value(evens_doubled.next().await), 8);
    Ok(())
}

#[tokio::test]
async fn merge_all_interleaves_in_arrival_order_and_ends_with_all_inputs() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let mut merged = merge_all(vec![a, b]);

    // Act & Assert
    tx_a.send(1)?;
    assert_eq!(unwrap_value(merged.next().await), 1);
    tx_b.send(2)?;
    assert_eq!(unwrap_value(merged.next().await), 2);
    tx_a.send(3)?;
    assert_eq!(unwrap_value(merged.next().await), 3);

    drop(tx_a);
    assert_no_element_emitted(&mut merged, 50).await;
    drop(tx_b);
    assert_stream_ended(&mut merged, 500).await;
    Ok(())
}

fn unwrap_item(item: StreamItem<i32>) -> i32 {
    item.unwrap()
}
