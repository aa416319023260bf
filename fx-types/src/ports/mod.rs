//! Port traits (interfaces for adapters).
//!
//! The HTTP adapter and every pipeline stage implement the same
//! `Converter` contract, so stages can wrap each other in any order.

mod converter;

pub use converter::Converter;
