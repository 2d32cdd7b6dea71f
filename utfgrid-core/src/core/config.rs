//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::grid::{Grid, DEFAULT_RESOLUTION};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs;
use std::io;
use tera::{Context, Tera};
use tile_grid::{Extent, TileRequest};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub datasource: DatasourceCfg,
    pub tile: TileCfg,
    pub grid: GridCfg,
    #[serde(default)]
    pub output: OutputCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatasourceCfg {
    /// GeoJSON file with a FeatureCollection
    pub path: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<&ExtentCfg> for Extent {
    fn from(cfg: &ExtentCfg) -> Extent {
        Extent {
            minx: cfg.minx,
            miny: cfg.miny,
            maxx: cfg.maxx,
            maxy: cfg.maxy,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TileCfg {
    /// The width and height of the rendered tile, in pixels.
    pub width: u32,
    pub height: u32,
    /// The geographical extent covered by the tile, in ground units.
    /// Must be specified as 4 floating point numbers ordered as minx, miny, maxx, maxy.
    pub extent: ExtentCfg,
    /// Pixel offset applied to the coordinate transformation
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    /// Pixel stride of one grid cell
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Feature attributes included in the grid data
    pub fields: Vec<String>,
}

pub fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// Output file (Default: stdout)
    pub path: Option<String>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputCfg {
    fn default() -> Self {
        OutputCfg {
            path: None,
            pretty: default_pretty(),
        }
    }
}

pub fn default_pretty() -> bool {
    true
}

pub const DEFAULT_CONFIG: &'static str = r#"
[datasource]
path = ""

[tile]
width = 256
height = 256
extent = { minx = -180.0, miny = -90.0, maxx = 180.0, maxy = 90.0 }

[grid]
resolution = 4
fields = []

[output]
pretty = true
"#;

impl<'a> Config<'a, TileCfg> for TileRequest {
    fn from_config(tile_cfg: &TileCfg) -> Result<Self, String> {
        let extent = Extent::from(&tile_cfg.extent);
        extent.validate().map_err(|e| e.to_string())?;
        if tile_cfg.width == 0 || tile_cfg.height == 0 {
            return Err(format!(
                "Invalid tile size {}x{}",
                tile_cfg.width, tile_cfg.height
            ));
        }
        Ok(TileRequest::new(tile_cfg.width, tile_cfg.height, extent))
    }
    fn gen_config() -> String {
        let toml = r#"
[tile]
width = 256
height = 256
extent = { minx = -180.0, miny = -90.0, maxx = 180.0, maxy = 90.0 }
"#;
        toml.to_string()
    }
}

impl<'a> Config<'a, GridCfg> for Grid {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, String> {
        Grid::new(grid_cfg.resolution).map_err(|e| e.to_string())
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
resolution = 4
fields = ["NAME"]
"#;
        toml.to_string()
    }
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let config_toml = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => "Could not find config file!".to_string(),
        _ => format!("Error while reading config: [{}]", err),
    })?;
    parse_config(config_toml, path)
}

/// Expand `{{ env.VAR }}` expressions in the configuration template
fn render_template(config_toml: &str, name: &str) -> Result<String, String> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let env: HashMap<String, String> = env::vars().collect();
    let mut context = Context::new();
    context.insert("env", &env);
    tera.render(name, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    let old_syntax = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if old_syntax.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }
    render_template(&config_toml, path)?
        .parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
