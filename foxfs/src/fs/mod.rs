// SPDX-License-Identifier: MIT

pub mod checker;
pub mod constant;
pub mod formatter;
pub mod meta;
pub mod types;
pub mod volume;

pub use checker::FoxChecker;
pub use formatter::FoxFormatter;
pub use meta::FoxMeta;
pub use volume::{DirListing, FoxVolume};
