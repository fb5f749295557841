// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rxlens_core::{RxError, RxSubject, StreamItem, SubjectError};
use futures::StreamExt;

#[tokio::test]
async fn broadcasts_to_multiple_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::<i32>::new();
    let mut a = subject.subscribe()?;
    let mut b = subject.subscribe()?;

    // Act
    subject.next(1)?;

    // Assert
    assert_eq!(a.next().await, Some(StreamItem::Value(1)));
    assert_eq!(b.next().await, Some(StreamItem::Value(1)));
    Ok(())
}

#[tokio::test]
async fn plain_subject_does_not_replay_to_late_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::<i32>::new();
    subject.next(1)?;

    // Act
    let mut late = subject.subscribe()?;
    subject.next(2)?;
    subject.close();

    // Assert
    assert_eq!(late.next().await, Some(StreamItem::Value(2)));
    assert_eq!(late.next().await, None);
    assert_eq!(subject.latest(), None);
    Ok(())
}

#[tokio::test]
async fn replay_subject_hands_latest_to_late_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::replay();
    subject.next("a")?;
    subject.next("b")?;

    // Act
    let mut late = subject.subscribe()?;

    // Assert
    assert_eq!(late.next().await, Some(StreamItem::Value("b")));
    assert_eq!(subject.latest(), Some("b"));
    Ok(())
}

#[tokio::test]
async fn replay_with_seeds_the_first_subscriber() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::replay_with(10);

    // Act
    let mut stream = subject.subscribe()?;
    subject.next(11)?;

    // Assert
    assert_eq!(stream.next().await, Some(StreamItem::Value(10)));
    assert_eq!(stream.next().await, Some(StreamItem::Value(11)));
    Ok(())
}

#[tokio::test]
async fn error_is_propagated_and_closes() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::<i32>::new();
    let mut stream = subject.subscribe()?;

    // Act
    subject.error(RxError::stream_error("boom"))?;

    // Assert
    assert!(matches!(stream.next().await, Some(StreamItem::Error(_))));
    assert_eq!(stream.next().await, None);
    assert!(subject.is_closed());
    Ok(())
}

#[tokio::test]
async fn closed_replay_subject_replays_latest_then_terminal_error() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::replay_with(1);
    subject.next(2)?;
    subject.error(RxError::arity_mismatch(1, 2))?;

    // Act
    let mut late = subject.subscribe()?;

    // Assert
    assert_eq!(late.next().await, Some(StreamItem::Value(2)));
    assert!(matches!(
        late.next().await,
        Some(StreamItem::Error(RxError::ArityMismatch {
            expected: 1,
            found: 2
        }))
    ));
    assert_eq!(late.next().await, None);
    Ok(())
}

#[tokio::test]
async fn closed_plain_subject_rejects_subscribers_and_sends() {
    // Arrange
    let subject = RxSubject::<i32>::new();

    // Act
    subject.close();

    // Assert
    assert!(matches!(subject.subscribe(), Err(SubjectError::Closed)));
    assert_eq!(subject.next(1), Err(SubjectError::Closed));
    assert_eq!(
        subject.error(RxError::stream_error("late")),
        Err(SubjectError::Closed)
    );
}

#[tokio::test]
async fn dropped_subscribers_are_pruned_on_send() -> anyhow::Result<()> {
    // Arrange
    let subject = RxSubject::<i32>::new();
    let keep = subject.subscribe()?;
    let gone = subject.subscribe()?;
    assert_eq!(subject.subscriber_count(), 2);

    // Act
    drop(gone);
    subject.next(1)?;

    // Assert
    assert_eq!(subject.subscriber_count(), 1);
    drop(keep);
    Ok(())
}
