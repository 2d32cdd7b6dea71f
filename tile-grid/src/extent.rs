//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile extents

use std::fmt;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// Extent or pixel size which can't be mapped onto a raster
#[derive(thiserror::Error, PartialEq, Clone, Debug)]
pub enum InvalidExtent {
    #[error("{0} has no positive width and height")]
    Empty(Extent),
    #[error("{0} has non-finite bounds")]
    NotFinite(Extent),
    #[error("Invalid tile size {0}x{1}")]
    PixelSize(u32, u32),
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    /// Check bounds for usage as a raster extent
    pub fn validate(&self) -> Result<(), InvalidExtent> {
        let bounds = [self.minx, self.miny, self.maxx, self.maxy];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(InvalidExtent::NotFinite(self.clone()));
        }
        // negated comparison also catches NaN widths of huge extents
        if !(self.width() > 0.0 && self.height() > 0.0) {
            return Err(InvalidExtent::Empty(self.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extent({},{},{},{})",
            self.minx, self.miny, self.maxx, self.maxy
        )
    }
}

/// Rendering request for a single tile
#[derive(PartialEq, Clone, Debug)]
pub struct TileRequest {
    /// The width of the output raster, in pixels.
    pub width: u32,
    /// The height of the output raster, in pixels.
    pub height: u32,
    /// The geographical extent covered by the tile.
    pub extent: Extent,
}

impl TileRequest {
    pub fn new(width: u32, height: u32, extent: Extent) -> TileRequest {
        TileRequest {
            width,
            height,
            extent,
        }
    }
}
