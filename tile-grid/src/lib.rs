//! Tile extents and pixel coordinate transformations
//!
//! ## Pixel <-> geographic coordinates
//!
//! ```rust
//! use tile_grid::{CoordTransform, Extent, TileRequest};
//!
//! let request = TileRequest::new(
//!     256,
//!     256,
//!     Extent {
//!         minx: 0.0,
//!         miny: 0.0,
//!         maxx: 2.0,
//!         maxy: 2.0,
//!     },
//! );
//! let ctrans = CoordTransform::new(&request).unwrap();
//! assert_eq!(ctrans.backward(0.0, 0.0), (0.0, 2.0));
//! assert_eq!(ctrans.forward(2.0, 0.0), (256.0, 256.0));
//! ```

mod extent;
mod transform;
#[cfg(test)]
mod transform_test;

pub use extent::{Extent, InvalidExtent, TileRequest};
pub use transform::CoordTransform;
