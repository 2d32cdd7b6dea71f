//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile rendering from an application configuration

use crate::core::config::{ApplicationCfg, OutputCfg};
use crate::core::geom::CartesianProvider;
use crate::core::grid::{Grid, UtfGrid};
use crate::core::renderer::{RenderError, Renderer};
use crate::core::Config;
use crate::datasource::GeojsonSource;
use std::fs;
use std::time::Instant;
use tile_grid::{CoordTransform, TileRequest};


/// UTFGrid service
pub struct UtfGridService {
    pub request: TileRequest,
    pub offset: (f64, f64),
    pub resolution: u32,
    pub fields: Vec<String>,
    pub output: OutputCfg,
    datasource: GeojsonSource,
}

impl UtfGridService {
    pub fn from_config(config: &ApplicationCfg) -> Result<UtfGridService, String> {
        let request = TileRequest::from_config(&config.tile)?;
        // Validate resolution early
        let grid = Grid::from_config(&config.grid)?;
        let datasource = GeojsonSource::from_config(&config.datasource)?;
        Ok(UtfGridService {
            request,
            offset: (config.tile.offset_x, config.tile.offset_y),
            resolution: grid.resolution(),
            fields: config.grid.fields.clone(),
            output: config.output.clone(),
            datasource,
        })
    }

    /// Render the configured tile
    pub fn render(&mut self) -> Result<UtfGrid, RenderError> {
        let ctrans = CoordTransform::with_offset(&self.request, self.offset.0, self.offset.1)?;
        let mut grid = Grid::new(self.resolution)?;
        let now = Instant::now();
        Renderer::new(&mut grid, &ctrans, &CartesianProvider)
            .apply(&mut self.datasource, &self.fields)?;
        let utfgrid = grid.encode()?;
        debug!(
            "{}: rendered in {}ms",
            self.datasource.path,
            now.elapsed().as_millis()
        );
        Ok(utfgrid)
    }

    /// Render and write JSON to the configured output
    pub fn render_to_output(&mut self) -> Result<(), String> {
        let utfgrid = self.render().map_err(|e| e.to_string())?;
        let json = to_json(&utfgrid, self.output.pretty).map_err(|e| e.to_string())?;
        match self.output.path {
            Some(ref path) => {
                fs::write(path, json).map_err(|e| format!("Error writing {}: {}", path, e))?;
                info!("UTFGrid written to {}", path);
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

pub fn to_json(utfgrid: &UtfGrid, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(utfgrid)
    } else {
        serde_json::to_string(utfgrid)
    }
}
