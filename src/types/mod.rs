//! Type definitions for contribheat

mod contribution;
mod error;
pub mod palette;

pub use contribution::*;
pub use error::*;
pub use palette::{ColorPattern, CountRange, PALETTES};
