//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Rasterization of features into a UTFGrid

use crate::core::feature::Feature;
use crate::core::geom::GeometryProvider;
use crate::core::grid::{AttributeRecord, Grid, GridError};
use crate::datasource::{FeatureSource, SourceError};
use serde_json::Value;
use tile_grid::{CoordTransform, InvalidExtent};

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    InvalidExtent(#[from] InvalidExtent),
    #[error("No valid fields, field names were {requested:?} (available: {available:?})")]
    InvalidFieldSelection {
        requested: Vec<String>,
        available: Vec<String>,
    },
    #[error(transparent)]
    FeatureSource(#[from] SourceError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Requested field names available in the schema, in request order without duplicates
pub fn select_fields(requested: &[String], schema: &[String]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for name in requested {
        if schema.contains(name) && !fields.contains(name) {
            fields.push(name.clone());
        }
    }
    fields
}

pub struct Renderer<'a, P> {
    grid: &'a mut Grid,
    ctrans: &'a CoordTransform,
    provider: &'a P,
}

impl<'a, P: GeometryProvider> Renderer<'a, P> {
    pub fn new(grid: &'a mut Grid, ctrans: &'a CoordTransform, provider: &'a P) -> Self {
        Renderer {
            grid,
            ctrans,
            provider,
        }
    }

    /// Fill the grid with the first intersecting feature per cell.
    ///
    /// Each cell is sampled with the footprint of its top left pixel.
    /// Returns the number of cells with a feature.
    pub fn apply<S>(&mut self, source: &mut S, field_names: &[String]) -> Result<usize, RenderError>
    where
        S: FeatureSource,
        S::Feature: Feature<Geometry = P::Geometry>,
    {
        let schema = source.schema_attribute_names()?;
        let fields = select_fields(field_names, &schema);
        if fields.is_empty() {
            return Err(RenderError::InvalidFieldSelection {
                requested: field_names.to_vec(),
                available: schema,
            });
        }
        for name in field_names {
            if !fields.contains(name) {
                warn!("Field `{}` not found in datasource", name);
            }
        }
        debug!("Selected fields: {:?}", fields);

        let (width, height) = self.ctrans.pixel_size();
        self.grid.allocate(width, height);
        let resolution = self.grid.resolution() as f64;
        let (cols, rows) = (self.grid.width(), self.grid.height());
        info!(
            "Rendering {}x{} tile {} with resolution {} ({}x{} cells)",
            width,
            height,
            self.ctrans.extent(),
            self.grid.resolution(),
            cols,
            rows
        );

        source.reset()?;
        let mut matches = 0;
        for row in 0..rows {
            let y = row as f64 * resolution;
            for col in 0..cols {
                let x = col as f64 * resolution;
                let (minx, maxy) = self.ctrans.backward(x, y);
                let (maxx, miny) = self.ctrans.backward(x + 1.0, y + 1.0);
                let hit = self.first_intersecting(source, (minx, maxy), (maxx, miny), &fields)?;
                source.reset()?;
                if let Some((feature_id, attributes)) = hit {
                    if !self.grid.feature_cache.contains_key(&feature_id) {
                        self.grid.cache_feature(&feature_id, attributes);
                    }
                    self.grid.set_feature_id(col, row, feature_id);
                    matches += 1;
                }
            }
            debug!("Row {}/{} rendered", row + 1, rows);
        }
        info!(
            "{} of {} cells matched {} distinct features",
            matches,
            rows * cols,
            self.grid.feature_cache.len()
        );
        Ok(matches)
    }

    /// Scan features in native order and stop at the first hit
    fn first_intersecting<S>(
        &self,
        source: &mut S,
        corner: (f64, f64),
        opposite: (f64, f64),
        fields: &[String],
    ) -> Result<Option<(String, AttributeRecord)>, SourceError>
    where
        S: FeatureSource,
        S::Feature: Feature<Geometry = P::Geometry>,
    {
        while let Some(feat) = source.next_feature()? {
            let hit = match feat.geometry() {
                Some(geometry) => self.provider.intersects(corner, opposite, geometry),
                None => false,
            };
            if hit {
                let attributes = feat
                    .attributes()
                    .iter()
                    .filter(|attr| fields.contains(&attr.key))
                    .map(|attr| (attr.key.clone(), Value::from(&attr.value)))
                    .collect();
                return Ok(Some((feat.fid().to_string(), attributes)));
            }
        }
        Ok(None)
    }
}
