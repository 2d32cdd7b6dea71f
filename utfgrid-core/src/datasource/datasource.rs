//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::{Feature, FeatureStruct};

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Error parsing {path}: {source}")]
    Parse {
        path: String,
        source: geojson::Error,
    },
    #[error("{0} is not a GeoJSON FeatureCollection")]
    NotFeatureCollection(String),
    #[error("Invalid geometry of feature {fid}: {reason}")]
    Geometry { fid: u64, reason: String },
}

/// Sequential feature access with rewind
pub trait FeatureSource {
    type Feature: Feature;

    /// Rewind iteration to the first feature
    fn reset(&mut self) -> Result<(), SourceError>;
    /// Next feature in native order, `None` at the end
    fn next_feature(&mut self) -> Result<Option<&Self::Feature>, SourceError>;
    /// All attribute names available in this source
    fn schema_attribute_names(&self) -> Result<Vec<String>, SourceError>;
}

/// Features held in memory
#[derive(Clone, Debug)]
pub struct MemorySource<G> {
    features: Vec<FeatureStruct<G>>,
    schema: Vec<String>,
    pos: usize,
}

impl<G> MemorySource<G> {
    /// Source with schema collected from feature attributes in first-seen order
    pub fn new(features: Vec<FeatureStruct<G>>) -> MemorySource<G> {
        let mut schema: Vec<String> = Vec::new();
        for attr in features.iter().flat_map(|f| f.attributes.iter()) {
            if !schema.contains(&attr.key) {
                schema.push(attr.key.clone());
            }
        }
        MemorySource::with_schema(schema, features)
    }

    pub fn with_schema(schema: Vec<String>, features: Vec<FeatureStruct<G>>) -> MemorySource<G> {
        MemorySource {
            features,
            schema,
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<G> FeatureSource for MemorySource<G> {
    type Feature = FeatureStruct<G>;

    fn reset(&mut self) -> Result<(), SourceError> {
        self.pos = 0;
        Ok(())
    }
    fn next_feature(&mut self) -> Result<Option<&FeatureStruct<G>>, SourceError> {
        let feature = self.features.get(self.pos);
        if feature.is_some() {
            self.pos += 1;
        }
        Ok(feature)
    }
    fn schema_attribute_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.schema.clone())
    }
}
