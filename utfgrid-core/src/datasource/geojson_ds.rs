//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::DatasourceCfg;
use crate::core::feature::{FeatureAttr, FeatureAttrValType, FeatureStruct};
use crate::core::Config;
use crate::datasource::{FeatureSource, MemorySource, SourceError};
use geo::Geometry;
use geojson::GeoJson;
use std::convert::TryFrom;
use std::fs;

/// GeoJSON FeatureCollection read into memory.
///
/// Feature ids are the positions in the collection.
pub struct GeojsonSource {
    pub path: String,
    features: MemorySource<Geometry<f64>>,
}

impl GeojsonSource {
    pub fn open(path: &str) -> Result<GeojsonSource, SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_string(),
            source,
        })?;
        GeojsonSource::parse(&content, path)
    }

    /// Parse GeoJSON text, `path` is used for messages only
    pub fn parse(geojson: &str, path: &str) -> Result<GeojsonSource, SourceError> {
        let collection = match geojson.parse::<GeoJson>() {
            Ok(GeoJson::FeatureCollection(fc)) => fc,
            Ok(_) => return Err(SourceError::NotFeatureCollection(path.to_string())),
            Err(source) => {
                return Err(SourceError::Parse {
                    path: path.to_string(),
                    source,
                })
            }
        };
        let mut features = Vec::with_capacity(collection.features.len());
        for (idx, feature) in collection.features.into_iter().enumerate() {
            let fid = idx as u64;
            let geometry = match feature.geometry {
                Some(geometry) => Some(Geometry::<f64>::try_from(geometry).map_err(|e| {
                    SourceError::Geometry {
                        fid,
                        reason: e.to_string(),
                    }
                })?),
                None => {
                    warn!("{}: feature {} has no geometry", path, fid);
                    None
                }
            };
            let attributes = feature
                .properties
                .iter()
                .flat_map(|props| props.iter())
                .map(|(key, value)| FeatureAttr::new(key, FeatureAttrValType::from(value)))
                .collect();
            features.push(FeatureStruct {
                fid,
                attributes,
                geometry,
            });
        }
        info!("{}: {} features", path, features.len());
        Ok(GeojsonSource {
            path: path.to_string(),
            features: MemorySource::new(features),
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureSource for GeojsonSource {
    type Feature = FeatureStruct<Geometry<f64>>;

    fn reset(&mut self) -> Result<(), SourceError> {
        self.features.reset()
    }
    fn next_feature(&mut self) -> Result<Option<&Self::Feature>, SourceError> {
        self.features.next_feature()
    }
    fn schema_attribute_names(&self) -> Result<Vec<String>, SourceError> {
        self.features.schema_attribute_names()
    }
}

impl<'a> Config<'a, DatasourceCfg> for GeojsonSource {
    fn from_config(ds_cfg: &DatasourceCfg) -> Result<Self, String> {
        if ds_cfg.path.is_empty() {
            return Err("Missing datasource path".to_string());
        }
        GeojsonSource::open(&ds_cfg.path).map_err(|e| e.to_string())
    }
    fn gen_config() -> String {
        let toml = r#"
[datasource]
path = "data/countries.geojson"
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            r#"
[datasource]
path = "{}"
"#,
            self.path
        )
    }
}
