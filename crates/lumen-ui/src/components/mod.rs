// Standalone inputs
pub mod button;
pub mod checkbox;
pub mod switch;
pub mod text_field;

// Stateful overlays
pub mod modal;
pub mod select;

pub use button::*;
pub use checkbox::*;
pub use modal::*;
pub use select::*;
pub use switch::*;
pub use text_field::*;
