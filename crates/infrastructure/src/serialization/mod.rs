//! JSON encoding for files written by the client.

mod json;

pub use json::*;
