//! Physics module - boxes, bodies, and platform collision.

mod body;
mod collision;

pub use body::*;
pub use collision::*;
