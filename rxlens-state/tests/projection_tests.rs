// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rxlens_state::{pluck, pluck_n, view, Lens, ProjectionCache, Store, Transition};
use rxlens_test_utils::{
    assert_no_element_emitted, state::app_state, test_channel, unwrap_value,
};
use futures::StreamExt;
use serde_json::{json, Value};

fn set(path: &str, value: Value) -> Transition {
    let lens = Lens::new(path);
    Transition::new(move |state| lens.set(state, value.clone()))
}

#[tokio::test]
async fn pluck_projects_every_state_without_deduplicating() -> anyhow::Result<()> {
    // Arrange
    let (tx, states) = test_channel();
    let names = pluck(states, "user.name");
    let mut names = names.subscribe()?;

    // Act
    tx.send(app_state())?;
    tx.send(Lens::new("counter").set(app_state(), json!(1)))?;

    // Assert
    assert_eq!(unwrap_value(names.next().await), json!("Alice"));
    assert_eq!(unwrap_value(names.next().await), json!("Alice"));
    Ok(())
}

#[tokio::test]
async fn pluck_yields_null_for_absent_paths() -> anyhow::Result<()> {
    // Arrange
    let (tx, states) = test_channel();
    let mut missing = pluck(states, "user.phone.mobile").subscribe()?;

    // Act
    tx.send(app_state())?;

    // Assert
    assert_eq!(unwrap_value(missing.next().await), Value::Null);
    Ok(())
}

#[tokio::test]
async fn pluck_n_reads_paths_in_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, states) = test_channel();
    let mut pairs = pluck_n(states, ["user.age", "todos.1", "counter"]).subscribe()?;

    // Act
    tx.send(app_state())?;

    // Assert
    assert_eq!(
        unwrap_value(pairs.next().await),
        vec![json!(30), json!("ship"), json!(0)]
    );
    Ok(())
}

#[tokio::test]
async fn pluck_is_not_memoized() {
    // Arrange
    let (_tx, updates) = test_channel::<Transition>();
    let store = Store::new(app_state(), updates);

    // Act
    let first = store.pluck("counter");
    let second = store.pluck("counter");

    // Assert
    assert!(!first.ptr_eq(&second));
}

#[tokio::test]
async fn view_replays_current_value_and_skips_unrelated_changes() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);
    let mut city = store.view("user.address.city").to_stream();
    assert_eq!(unwrap_value(city.next().await), json!("Zurich"));

    // Act
    tx.send(set("counter", json!(1)))?;
    tx.send(set("user.name", json!("Bob")))?;

    // Assert
    assert_no_element_emitted(&mut city, 50).await;

    tx.send(set("user.address.city", json!("Bern")))?;
    assert_eq!(unwrap_value(city.next().await), json!("Bern"));
    Ok(())
}

#[tokio::test]
async fn view_is_memoized_per_path() {
    // Arrange
    let (_tx, updates) = test_channel::<Transition>();
    let store = Store::new(app_state(), updates);

    // Act
    let first = store.view("user.name");
    let second = store.view(Lens::from_segments(["user", "name"]));
    let other = store.view("user.age");

    // Assert
    assert!(first.ptr_eq(&second));
    assert!(!first.ptr_eq(&other));
    assert_eq!(store.projections().len(), 2);
}

#[tokio::test]
async fn repeated_views_share_one_upstream_subscription() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);

    // Act
    let mut subscribers = Vec::new();
    for _ in 0..5 {
        subscribers.push(store.view("counter").to_stream());
    }
    tx.send(set("counter", json!(3)))?;

    // Assert
    assert_eq!(store.state_stream().subscriber_count(), 1);
    for subscriber in &mut subscribers {
        assert_eq!(unwrap_value(subscriber.next().await), json!(0));
        assert_eq!(unwrap_value(subscriber.next().await), json!(3));
    }
    Ok(())
}

#[tokio::test]
async fn view_n_emits_when_any_path_changes() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);
    let mut profile = store.view_n(["user.name", "user.age"]).to_stream();
    assert_eq!(
        unwrap_value(profile.next().await),
        vec![json!("Alice"), json!(30)]
    );

    // Act
    tx.send(set("todos", json!([])))?;
    tx.send(set("user.age", json!(31)))?;

    // Assert
    assert_eq!(
        unwrap_value(profile.next().await),
        vec![json!("Alice"), json!(31)]
    );
    Ok(())
}

#[tokio::test]
async fn view_n_is_keyed_by_the_ordered_paths() {
    // Arrange
    let (_tx, updates) = test_channel::<Transition>();
    let store = Store::new(app_state(), updates);

    // Act
    let forward = store.view_n(["counter", "user.name"]);
    let again = store.view_n(["counter", "user.name"]);
    let reversed = store.view_n(["user.name", "counter"]);

    // Assert
    assert!(forward.ptr_eq(&again));
    assert!(!forward.ptr_eq(&reversed));
}

#[tokio::test]
async fn separate_caches_never_share_projections() {
    // Arrange
    let (_tx, updates) = test_channel::<Transition>();
    let store = Store::new(app_state(), updates);
    let first = ProjectionCache::new(store.state_stream().clone());
    let second = ProjectionCache::new(store.state_stream().clone());

    // Act
    let a = view(&first, "counter");
    let b = view(&second, "counter");

    // Assert
    assert!(!a.ptr_eq(&b));
    assert!(view(&first, "counter").ptr_eq(&a));
    assert!(second.source().ptr_eq(store.state_stream()));
}

#[tokio::test]
async fn view_computes_once_per_state_regardless_of_subscribers() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);
    let mut subscribers = Vec::new();
    for _ in 0..5 {
        subscribers.push(store.view("counter").to_stream());
    }

    // Act
    tx.send(set("counter", json!(1)))?;
    tx.send(set("counter", json!(2)))?;

    // Assert
    for subscriber in &mut subscribers {
        assert_eq!(unwrap_value(subscriber.next().await), json!(0));
        assert_eq!(unwrap_value(subscriber.next().await), json!(1));
        assert_eq!(unwrap_value(subscriber.next().await), json!(2));
    }
    assert_eq!(store.projections().computations(), 3);
    Ok(())
}

#[tokio::test]
async fn unrelated_states_are_still_computed_once_each() -> anyhow::Result<()> {
    // Arrange
    let (tx, updates) = test_channel();
    let store = Store::new(app_state(), updates);
    let mut first = store.view("counter").to_stream();
    let mut second = store.view("counter").to_stream();
    assert_eq!(unwrap_value(first.next().await), json!(0));
    assert_eq!(unwrap_value(second.next().await), json!(0));

    // Act
    tx.send(set("user.name", json!("Bob")))?;
    tx.send(set("user.age", json!(40)))?;
    assert_no_element_emitted(&mut first, 50).await;
    assert_no_element_emitted(&mut second, 50).await;

    // Assert
    assert_eq!(store.projections().computations(), 3);
    Ok(())
}
