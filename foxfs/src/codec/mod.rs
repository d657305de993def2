// SPDX-License-Identifier: MIT
//! Width resolution, field-width configuration, schema registry and the
//! structure codec.

pub mod category;
pub mod config;
pub mod engine;
pub mod schema;
pub mod value;
pub mod width;

pub use category::*;
pub use config::*;
pub use engine::{FieldLayout, decode, encode, encode_into, layout, size_of};
pub use schema::*;
pub use value::*;
pub use width::{WIDTH_CLASS_BYTES, WidthClass, resolve};
