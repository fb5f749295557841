// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Path-addressed accessors over immutable state trees.
//!
//! A [`Lens`] is an ordered list of path segments. A segment addresses an object
//! key, or an array slot when the node it is applied to is an array and the segment
//! parses as an index. The empty path is the identity lens.
//!
//! `Value::Null` doubles as "absent": reading a missing path yields `Null`, and
//! writing `Null` over a missing path leaves the state untouched. Together this
//! makes both lens laws hold for every path:
//!
//! ```
//! use rxlens_state::Lens;
//! use serde_json::json;
//!
//! let lens = Lens::new("user.name");
//! let state = json!({ "user": { "name": "Alice" } });
//!
//! let renamed = lens.set(state.clone(), json!("Bob"));
//! assert_eq!(lens.get(&renamed), json!("Bob"));
//! assert_eq!(lens.set(state.clone(), lens.get(&state)), state);
//! ```

use crate::State;
use serde_json::{Map, Value};
use std::fmt;

/// A composable path into a [`State`] tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lens {
    segments: Vec<String>,
}

impl Lens {
    /// Parses a dotted path. The empty string is the identity lens.
    #[must_use]
    pub fn new(path: &str) -> Self {
        if path.is_empty() {
            return Self::identity();
        }
        Self {
            segments: path.split('.').map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lens that focuses `other` inside the focus of `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }

    /// The dotted form of this path.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join(".")
    }

    /// Reads the focused value, `Null` when any segment is missing.
    #[must_use]
    pub fn get(&self, state: &State) -> Value {
        self.segments
            .iter()
            .try_fold(state, |node, segment| child(node, segment))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Returns `state` with the focused value replaced by `value`.
    ///
    /// Missing intermediate nodes are created as objects and scalars on the path
    /// are replaced by objects. Writing past the end of an array pads it with
    /// `Null`, up to [`MAX_ARRAY_PADDING`] slots; an index further out appends.
    /// Such a write cannot be read back at the requested index.
    #[must_use]
    pub fn set(&self, state: State, value: Value) -> State {
        if value.is_null() && self.get(&state).is_null() {
            return state;
        }
        set_in(state, &self.segments, value)
    }

    /// Applies `f` to the focused value.
    #[must_use]
    pub fn over<F>(&self, state: State, f: F) -> State
    where
        F: FnOnce(Value) -> Value,
    {
        let focused = self.get(&state);
        self.set(state, f(focused))
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn set_in(node: Value, segments: &[String], value: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return value;
    };

    match (node, head.parse::<usize>()) {
        (Value::Array(mut items), Ok(index)) => {
            let index = padded_slot(&mut items, index);
            let slot = items[index].take();
            items[index] = set_in(slot, rest, value);
            Value::Array(items)
        }
        (Value::Object(mut fields), _) => {
            let slot = fields.entry(head.clone()).or_insert(Value::Null);
            let current = slot.take();
            *slot = set_in(current, rest, value);
            Value::Object(fields)
        }
        _ => {
            let mut fields = Map::new();
            fields.insert(head.clone(), set_in(Value::Null, rest, value));
            Value::Object(fields)
        }
    }
}

/// Most `Null` slots a single `set` will insert in front of an array write.
pub const MAX_ARRAY_PADDING: usize = 1024;

// Makes `index` addressable and returns the slot actually written: indexes more
// than `MAX_ARRAY_PADDING` past the end append instead.
fn padded_slot(items: &mut Vec<Value>, index: usize) -> usize {
    let len = items.len();
    if index < len {
        return index;
    }
    if index - len > MAX_ARRAY_PADDING {
        items.push(Value::Null);
        return len;
    }
    items.resize(index + 1, Value::Null);
    index
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<&str> for Lens {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Lens {
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}

impl From<&Lens> for Lens {
    fn from(lens: &Lens) -> Self {
        lens.clone()
    }
}

/// Boolean reading of a state value.
///
/// `false`, `null`, `0` and `""` are falsy; everything else, including empty
/// arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
