//! Value capture, flattening, structural comparison, and binary encoding for regression tests.

/// Generic value model, flattener, comparator, codecs, and result containers.
pub mod data;
