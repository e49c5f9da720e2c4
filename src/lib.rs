//! Pointer fundamentals, told in Rust's reference idiom.
//!
//! Two narrated demos live here: [`basic`] walks a [`Handle`] through its
//! lifecycle (unbound, null, bound, aliased mutation) and [`functions`] passes
//! references into free functions, including one that hands heap ownership
//! back to the caller.

pub mod basic;
pub mod config;
pub mod error;
pub mod functions;
pub mod handle;
pub mod narrate;

pub use config::DemoConfig;
pub use error::{DemoError, HandleError};
pub use handle::Handle;
pub use narrate::Narrator;
