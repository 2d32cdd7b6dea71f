//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use serde_json::Value;

/// Supported feature attribute value types
#[derive(Clone, PartialEq, Debug)]
pub enum FeatureAttrValType {
    String(String),
    Double(f64),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Null,
}

impl From<&Value> for FeatureAttrValType {
    /// Nested arrays and objects are kept as their JSON text
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FeatureAttrValType::Null,
            Value::Bool(b) => FeatureAttrValType::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FeatureAttrValType::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FeatureAttrValType::UInt(u)
                } else {
                    FeatureAttrValType::Double(n.as_f64().unwrap_or(std::f64::NAN))
                }
            }
            Value::String(s) => FeatureAttrValType::String(s.clone()),
            Value::Array(_) | Value::Object(_) => FeatureAttrValType::String(value.to_string()),
        }
    }
}

impl From<&FeatureAttrValType> for Value {
    fn from(value: &FeatureAttrValType) -> Self {
        match value {
            FeatureAttrValType::String(s) => Value::String(s.clone()),
            // NaN and infinite values have no JSON representation
            FeatureAttrValType::Double(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FeatureAttrValType::Int(v) => Value::from(*v),
            FeatureAttrValType::UInt(v) => Value::from(*v),
            FeatureAttrValType::Bool(v) => Value::Bool(*v),
            FeatureAttrValType::Null => Value::Null,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct FeatureAttr {
    pub key: String,
    pub value: FeatureAttrValType,
}

impl FeatureAttr {
    pub fn new(key: &str, value: FeatureAttrValType) -> FeatureAttr {
        FeatureAttr {
            key: key.to_string(),
            value,
        }
    }
}

pub trait Feature {
    type Geometry;
    /// Index unique within the source and stable across resets
    fn fid(&self) -> u64;
    fn attributes(&self) -> &[FeatureAttr];
    fn geometry(&self) -> Option<&Self::Geometry>;
}

/// Basic Feature implementation
#[derive(Clone, Debug)]
pub struct FeatureStruct<G> {
    pub fid: u64,
    pub attributes: Vec<FeatureAttr>,
    pub geometry: Option<G>,
}

impl<G> Feature for FeatureStruct<G> {
    type Geometry = G;

    fn fid(&self) -> u64 {
        self.fid
    }
    fn attributes(&self) -> &[FeatureAttr] {
        &self.attributes
    }
    fn geometry(&self) -> Option<&G> {
        self.geometry.as_ref()
    }
}
