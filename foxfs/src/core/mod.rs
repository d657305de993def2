// SPDX-License-Identifier: MIT

// === Sub-modules ===
pub mod errors;
pub mod macros;
pub mod report;

// === Error types ===
pub use errors::*;
pub use report::*;
