// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Canned state trees and events.

use serde::Serialize;
use serde_json::{json, Value};

/// A small application state: a counter, a user profile and a todo list.
pub fn app_state() -> Value {
    json!({
        "counter": 0,
        "user": {
            "name": "Alice",
            "age": 30,
            "address": { "city": "Zurich" }
        },
        "todos": ["write tests", "ship"],
        "flags": { "visible": true, "busy": false }
    })
}

pub fn counter_state(count: i64) -> Value {
    json!({ "counter": count })
}

/// Event payload fed to `to_set_state` in tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Login {
    pub name: String,
    pub age: u32,
}

pub fn login_bob() -> Login {
    Login {
        name: "Bob".to_string(),
        age: 41,
    }
}

/// Serializing this always fails, to exercise the error path of serializing mutators.
#[derive(Debug, Clone)]
pub struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("refusing to serialize"))
    }
}
