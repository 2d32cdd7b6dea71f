//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate serde_json;

pub mod core;
pub mod datasource;
pub mod service;

pub use crate::core::grid::{Grid, GridError, UtfGrid};
pub use crate::core::renderer::{RenderError, Renderer};
pub use crate::datasource::{FeatureSource, SourceError};
