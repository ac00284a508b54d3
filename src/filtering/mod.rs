// src/filtering/mod.rs

//! Provides the ignore-set filter applied to group and project listings.
//!
//! The filter is a pure function over a listing: entries whose name is in the
//! configured ignore set are dropped, everything else is kept in its original
//! order. Names are compared exactly (case-sensitive, whole-name equality).

mod ignore_set;

pub use ignore_set::{filter_ignored, IgnoreSet, Named};
