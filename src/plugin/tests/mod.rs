//! Test modules for the plugin system
//!
//! Dispatch, analyzer and error tests built on the mock algorithm in `utils`.

mod error;
mod utils;
