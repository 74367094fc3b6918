mod component;
mod layer;
pub use component::*;
pub use layer::*;
