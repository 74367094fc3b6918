//! Lumen web components for Dioxus.
//!
//! Interaction state lives in [`lumen_core`]; this crate turns props into
//! markup, wires DOM events into the core engines and reports changes back
//! through `on_change` handlers.

pub mod classes;
pub mod components;
mod dom;
pub mod event;
pub mod provider;

pub use components::*;
pub use event::*;
pub use provider::*;

pub use lumen_core;
pub use lumen_core::{
    ButtonVariant, Change, Color, FieldVariant, LabelPlacement, LumenConfig, SelectKey,
    SelectOption, Selection, Size, Slot,
};
