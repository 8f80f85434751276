//! Purpose: Shared library crate used by the `tigerline` CLI and tests.
//! Exports: `core` (versions, record layouts, decoding, layers, errors), `notice`.
//! Role: Reads TIGER/Line fixed-width record files as feature layers.
//! Invariants: Reads only; nothing in the crate writes to a dataset directory.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
pub mod notice;
