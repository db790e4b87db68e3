//! Effects module - the feel layer fed by gameplay and drained by rendering.

mod feedback;
mod particles;

pub use feedback::*;
pub use particles::*;
