//! End-to-end behaviour of the codec, one file per property group.

use serde_json::Value;

mod polymorphism;
mod references;
mod round_trip;
mod scenarios;
mod settings;

/// Parses produced text for structural assertions.
fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}
