//! Pure domain types with minimal dependencies
//!
//! Types here have no UI, engine or I/O dependencies.

pub mod direction;
pub mod geometry;
pub mod options;
pub mod symbol;
pub mod symbology;

pub use direction::*;
pub use geometry::*;
pub use options::*;
pub use symbol::*;
pub use symbology::*;
