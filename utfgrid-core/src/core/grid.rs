//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Sparse feature raster and UTFGrid encoding

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Pixel stride of one grid cell
pub const DEFAULT_RESOLUTION: u32 = 4;

/// First codepoint assigned to a grid key
const FIRST_CODEPOINT: u32 = 32;

/// Selected feature attributes by name
pub type AttributeRecord = Map<String, Value>;

#[derive(thiserror::Error, PartialEq, Debug)]
pub enum GridError {
    #[error("Invalid grid resolution {0}")]
    InvalidResolution(u32),
    #[error("Too many distinct features for UTFGrid encoding ({0} keys)")]
    TooManyKeys(usize),
}

/// Encoded UTFGrid
#[derive(Serialize, PartialEq, Debug)]
pub struct UtfGrid {
    pub grid: Vec<String>,
    pub keys: Vec<String>,
    pub data: Map<String, Value>,
}

/// Skip the codepoints of `"` and `\` which need escaping in JSON strings
pub fn escape_codepoint(codepoint: u32) -> u32 {
    match codepoint {
        34 | 92 => codepoint + 1,
        _ => codepoint,
    }
}

/// Sequence of codepoints handed out to new grid keys
struct CodepointCounter {
    next: u32,
}

impl CodepointCounter {
    fn new() -> CodepointCounter {
        CodepointCounter {
            next: FIRST_CODEPOINT,
        }
    }

    fn assign(&mut self, nkeys: usize) -> Result<char, GridError> {
        let codepoint = escape_codepoint(self.next);
        // Fails when entering the surrogate range
        let c = std::char::from_u32(codepoint).ok_or(GridError::TooManyKeys(nkeys))?;
        self.next = codepoint + 1;
        Ok(c)
    }
}

/// Feature ids per raster cell
#[derive(Debug)]
pub struct Grid {
    resolution: u32,
    rows: Vec<Vec<String>>,
    pub feature_cache: HashMap<String, AttributeRecord>,
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            resolution: DEFAULT_RESOLUTION,
            rows: Vec::new(),
            feature_cache: HashMap::new(),
        }
    }
}

impl Grid {
    pub fn new(resolution: u32) -> Result<Grid, GridError> {
        if resolution == 0 {
            return Err(GridError::InvalidResolution(resolution));
        }
        Ok(Grid {
            resolution,
            ..Default::default()
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of cells needed to cover `pixels` with the grid resolution
    pub fn cell_count(&self, pixels: u32) -> usize {
        let res = self.resolution as u64;
        ((pixels as u64 + res - 1) / res) as usize
    }

    /// Reset to empty cells covering a raster of the given pixel size
    pub fn allocate(&mut self, pixel_width: u32, pixel_height: u32) {
        let cols = self.cell_count(pixel_width);
        let rows = self.cell_count(pixel_height);
        self.rows = vec![vec![String::new(); cols]; rows];
        self.feature_cache.clear();
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Feature id of a cell, empty if no feature was found
    pub fn feature_id(&self, col: usize, row: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|id| id.as_str())
    }

    pub fn set_feature_id(&mut self, col: usize, row: usize, feature_id: String) {
        self.rows[row][col] = feature_id;
    }

    pub fn cache_feature(&mut self, feature_id: &str, attributes: AttributeRecord) {
        self.feature_cache.insert(feature_id.to_string(), attributes);
    }

    /// Encode cells into UTFGrid rows with key dictionary
    pub fn encode(&self) -> Result<UtfGrid, GridError> {
        let mut keys: HashMap<&str, char> = HashMap::new();
        let mut key_order: Vec<&str> = Vec::new();
        let mut data = Map::new();
        let mut codepoints = CodepointCounter::new();
        let mut utf_rows = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut row_utf = String::with_capacity(row.len());
            for feature_id in row {
                let c = match keys.get(feature_id.as_str()) {
                    Some(c) => *c,
                    None => {
                        let c = codepoints.assign(key_order.len())?;
                        keys.insert(feature_id.as_str(), c);
                        key_order.push(feature_id.as_str());
                        if let Some(attributes) = self.feature_cache.get(feature_id) {
                            data.insert(feature_id.clone(), Value::Object(attributes.clone()));
                        }
                        c
                    }
                };
                row_utf.push(c);
            }
            utf_rows.push(row_utf);
        }
        debug!(
            "Encoded {}x{} grid with {} keys",
            self.width(),
            self.height(),
            key_order.len()
        );

        Ok(UtfGrid {
            grid: utf_rows,
            keys: key_order.into_iter().map(|key| key.to_string()).collect(),
            data,
        })
    }
}
