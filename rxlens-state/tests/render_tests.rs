// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rxlens_core::{RxError, StreamItem};
use rxlens_state::{render, try_render, RENDER_DEBOUNCE};
use rxlens_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream,
};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{advance, pause};

#[derive(Debug)]
struct EmptyFrame;

impl fmt::Display for EmptyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nothing to render")
    }
}

impl std::error::Error for EmptyFrame {}

fn frame(parts: &[&str]) -> Result<String, EmptyFrame> {
    if parts.iter().all(|part| part.is_empty()) {
        Err(EmptyFrame)
    } else {
        Ok(parts.join(" | "))
    }
}

#[tokio::test]
async fn render_collapses_a_batch_of_changes_into_one_call() -> anyhow::Result<()> {
    // Arrange
    pause();
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let (tx_title, title) = test_channel();
    let (tx_body, body) = test_channel();
    let mut frames = render(vec![title, body], move |parts: &[&str]| {
        counted.fetch_add(1, Ordering::SeqCst);
        parts.join(" | ")
    });

    // Act
    tx_title.send("Inbox")?;
    tx_body.send("empty")?;
    tx_body.send("3 messages")?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE).await;

    // Assert
    assert_eq!(
        unwrap_stream(&mut frames, 100).await,
        StreamItem::Value("Inbox | 3 messages".to_string())
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn render_waits_for_every_input() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx_a, a) = test_channel();
    let (_tx_b, b) = test_channel();
    let mut frames = render(vec![a, b], |values: &[i32]| values.len());

    // Act
    tx_a.send(1)?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE * 10).await;

    // Assert
    assert_no_element_emitted(&mut frames, 0).await;
    Ok(())
}

#[tokio::test]
async fn render_runs_again_for_each_settled_batch() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let mut frames = render(vec![a, b], |values: &[i32]| values.iter().sum::<i32>());

    tx_a.send(1)?;
    tx_b.send(2)?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE).await;
    assert_eq!(unwrap_stream(&mut frames, 100).await, StreamItem::Value(3));

    // Act
    tx_a.send(10)?;
    tx_b.send(20)?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE).await;

    // Assert
    assert_eq!(unwrap_stream(&mut frames, 100).await, StreamItem::Value(30));
    Ok(())
}

#[tokio::test]
async fn try_render_ends_after_the_first_failed_frame() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx_title, title) = test_channel();
    let (tx_body, body) = test_channel();
    let mut frames = try_render(vec![title, body], frame);

    tx_title.send("Inbox")?;
    tx_body.send("empty")?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE).await;
    assert_eq!(
        unwrap_stream(&mut frames, 100).await,
        StreamItem::Value("Inbox | empty".to_string())
    );

    // Act
    tx_title.send("")?;
    tx_body.send("")?;
    assert_no_element_emitted(&mut frames, 0).await;
    advance(RENDER_DEBOUNCE).await;

    // Assert
    let error = unwrap_stream(&mut frames, 100)
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected an error item"))?;
    assert!(matches!(error, RxError::UserError(_)));
    assert_stream_ended(&mut frames, 100).await;
    Ok(())
}
