pub mod allocator;
pub mod font;
pub mod platform;
pub mod raster;

pub use allocator::*;
pub use font::*;
pub use platform::*;
pub use raster::*;
