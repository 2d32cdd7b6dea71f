//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometric predicates used for rasterization

use geo::{Coord, Geometry, Intersects, Rect};

pub trait GeometryProvider {
    type Geometry;
    /// Test geometry against the box spanned by two opposite corners
    fn intersects(&self, corner: (f64, f64), opposite: (f64, f64), geometry: &Self::Geometry)
        -> bool;
}

/// Planar intersection tests on `geo` geometries
#[derive(Clone, Copy, Default, Debug)]
pub struct CartesianProvider;

impl CartesianProvider {
    pub fn bbox(corner: (f64, f64), opposite: (f64, f64)) -> Rect<f64> {
        Rect::new(
            Coord {
                x: corner.0,
                y: corner.1,
            },
            Coord {
                x: opposite.0,
                y: opposite.1,
            },
        )
    }
}

impl GeometryProvider for CartesianProvider {
    type Geometry = Geometry<f64>;

    fn intersects(
        &self,
        corner: (f64, f64),
        opposite: (f64, f64),
        geometry: &Geometry<f64>,
    ) -> bool {
        geometry.intersects(&CartesianProvider::bbox(corner, opposite))
    }
}
