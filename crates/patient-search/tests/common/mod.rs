//! Test infrastructure for patient search predicates.
//!
//! Provides patient record fixtures, configuration builders and an in-memory
//! evaluator that executes predicate trees the way a relational store would.

#![allow(dead_code)]

pub mod assertions;
pub mod evaluator;
pub mod fixtures;

pub use assertions::*;
pub use evaluator::*;
pub use fixtures::*;
