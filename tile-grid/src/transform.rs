//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::extent::{Extent, InvalidExtent, TileRequest};

/// Affine mapping between pixel space and geographic coordinates.
///
/// Pixel origin is the top left corner of the tile, pixel y grows southwards.
#[derive(Clone, Debug)]
pub struct CoordTransform {
    extent: Extent,
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
    offset_x: f64,
    offset_y: f64,
}

impl CoordTransform {
    pub fn new(request: &TileRequest) -> Result<CoordTransform, InvalidExtent> {
        CoordTransform::with_offset(request, 0.0, 0.0)
    }

    /// Transformation with a pixel offset subtracted from forward results
    pub fn with_offset(
        request: &TileRequest,
        offset_x: f64,
        offset_y: f64,
    ) -> Result<CoordTransform, InvalidExtent> {
        request.extent.validate()?;
        if request.width == 0 || request.height == 0 {
            return Err(InvalidExtent::PixelSize(request.width, request.height));
        }
        let extent = request.extent.clone();
        Ok(CoordTransform {
            sx: request.width as f64 / extent.width(),
            sy: request.height as f64 / extent.height(),
            extent,
            width: request.width,
            height: request.height,
            offset_x,
            offset_y,
        })
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Pixel size of the raster (width, height)
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Geographic coordinates to pixel
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let px = (x - self.extent.minx) * self.sx - self.offset_x;
        let py = (self.extent.maxy - y) * self.sy - self.offset_y;
        (px, py)
    }

    /// Pixel to geographic coordinates
    pub fn backward(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.extent.minx + (px + self.offset_x) / self.sx;
        let y = self.extent.maxy - (py + self.offset_y) / self.sy;
        (x, y)
    }
}
