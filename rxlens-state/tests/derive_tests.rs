// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rxlens_core::RxError;
use rxlens_state::{derive, derive_n, try_derive, try_derive_n, Lens, Store, Transition};
use rxlens_test_utils::{
    assert_no_element_emitted, assert_stream_ended, state::app_state, test_channel,
    unwrap_stream, unwrap_value,
};
use futures::StreamExt;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug)]
struct DivideByZero;

impl fmt::Display for DivideByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "division by zero")
    }
}

impl std::error::Error for DivideByZero {}

fn ratio(values: &[i32]) -> Result<i32, DivideByZero> {
    if values[1] == 0 {
        Err(DivideByZero)
    } else {
        Ok(values[0] / values[1])
    }
}

#[tokio::test]
async fn derive_n_waits_for_every_input_then_recomputes() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let sum = derive_n(vec![a, b], |values: &[i32]| values.iter().sum::<i32>());
    let mut sums = sum.to_stream();

    // Act & Assert
    tx_a.send(1)?;
    assert_no_element_emitted(&mut sums, 50).await;

    tx_b.send(10)?;
    assert_eq!(unwrap_value(sums.next().await), 11);

    tx_a.send(3)?;
    assert_eq!(unwrap_value(sums.next().await), 13);
    Ok(())
}

#[tokio::test]
async fn derive_n_drops_results_equal_to_the_previous_one() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let larger = derive_n(vec![a, b], |values: &[i32]| values[0].max(values[1]));
    let mut maxima = larger.to_stream();

    tx_a.send(5)?;
    tx_b.send(1)?;
    assert_eq!(unwrap_value(maxima.next().await), 5);

    // Act
    tx_b.send(2)?;
    tx_b.send(4)?;

    // Assert
    assert_no_element_emitted(&mut maxima, 50).await;

    tx_b.send(9)?;
    assert_eq!(unwrap_value(maxima.next().await), 9);
    Ok(())
}

#[tokio::test]
async fn derived_value_is_replayed_to_late_subscribers() -> anyhow::Result<()> {
    // Arrange
    let (tx, values) = test_channel();
    let doubled = derive(values, |n: i32| n * 2);
    let mut early = doubled.to_stream();
    tx.send(21)?;
    assert_eq!(unwrap_value(early.next().await), 42);

    // Act
    let mut late = doubled.to_stream();

    // Assert
    assert_eq!(unwrap_value(late.next().await), 42);
    assert_eq!(doubled.latest(), Some(42));
    Ok(())
}

#[tokio::test]
async fn derivation_over_store_views_sees_consistent_inputs() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);
    let greeting = derive_n(
        vec![
            store.view("user.name").to_stream(),
            store.view("user.age").to_stream(),
        ],
        |values: &[Value]| format!("{} ({})", values[0].as_str().unwrap_or("?"), values[1]),
    );
    let mut greetings = greeting.to_stream();
    assert_eq!(unwrap_value(greetings.next().await), "Alice (30)");

    // Act
    let age = Lens::new("user.age");
    tx.send(Transition::new(move |state| age.set(state, json!(31))))?;

    // Assert
    assert_eq!(unwrap_value(greetings.next().await), "Alice (31)");
    Ok(())
}

#[tokio::test]
async fn try_derive_error_ends_every_subscriber() -> anyhow::Result<()> {
    // Arrange
    let (tx, values) = test_channel();
    let inverse = try_derive(values, |n: i32| ratio(&[100, n]));
    let mut first = inverse.to_stream();
    let mut second = inverse.to_stream();

    tx.send(4)?;
    assert_eq!(unwrap_value(first.next().await), 25);
    assert_eq!(unwrap_value(second.next().await), 25);

    // Act
    tx.send(0)?;
    tx.send(5)?;

    // Assert
    for subscriber in [&mut first, &mut second] {
        let error = unwrap_stream(&mut *subscriber, 500)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected an error item"))?;
        assert!(matches!(error, RxError::UserError(_)));
        assert!(error.to_string().contains("division by zero"));
        assert_stream_ended(subscriber, 500).await;
    }
    assert!(inverse.is_closed());
    Ok(())
}

#[tokio::test]
async fn try_derive_n_error_ends_the_derivation() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let quotient = try_derive_n(vec![a, b], ratio);
    let mut quotients = quotient.to_stream();

    tx_a.send(12)?;
    tx_b.send(3)?;
    assert_eq!(unwrap_value(quotients.next().await), 4);

    // Act
    tx_b.send(0)?;

    // Assert
    assert!(unwrap_stream(&mut quotients, 500).await.is_error());
    assert_stream_ended(&mut quotients, 500).await;
    drop((tx_a, tx_b));
    Ok(())
}

#[tokio::test]
async fn try_derive_n_successes_behave_like_derive_n() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, a) = test_channel();
    let (tx_b, b) = test_channel();
    let quotient = try_derive_n(vec![a, b], ratio);
    let mut quotients = quotient.to_stream();

    // Act & Assert
    tx_a.send(8)?;
    tx_b.send(2)?;
    assert_eq!(unwrap_value(quotients.next().await), 4);

    tx_a.send(9)?;
    assert_no_element_emitted(&mut quotients, 50).await;

    tx_a.send(16)?;
    assert_eq!(unwrap_value(quotients.next().await), 8);
    Ok(())
}

#[tokio::test]
async fn panicking_combiner_completes_subscribers() -> anyhow::Result<()> {
    // Arrange
    let (tx, values) = test_channel();
    let checked = derive(values, |n: i32| {
        if n == 2 {
            panic!("combiner rejected {n}");
        }
        n
    });
    let mut early = checked.to_stream();

    tx.send(1)?;
    assert_eq!(unwrap_value(early.next().await), 1);

    // Act
    tx.send(2)?;

    // Assert
    assert_stream_ended(&mut early, 500).await;
    assert!(checked.is_closed());

    let mut late = checked.to_stream();
    assert_eq!(unwrap_value(late.next().await), 1);
    assert_stream_ended(&mut late, 500).await;
    Ok(())
}
