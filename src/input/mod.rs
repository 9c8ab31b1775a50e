//! Content loaded from outside the crate's code.

pub mod catalog;
