//! Grid addressing and obstacle occupancy

pub mod dimensions;
pub mod obstacles;

// Re-export main types
pub use dimensions::*;
pub use obstacles::*;
