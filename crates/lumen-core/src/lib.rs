//! Framework-independent state behind the Lumen components.
//!
//! Nothing in this crate renders markup. The Dioxus layer in `lumen-ui`
//! feeds props and DOM events in and reads derived state back out.

pub mod common;
pub mod config;
pub mod error;
pub mod modal;
pub mod select;
pub mod value;

pub use common::*;
pub use config::*;
pub use error::*;
pub use modal::*;
pub use select::*;
pub use value::*;
