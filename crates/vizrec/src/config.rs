// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::{ConfigError, ConfigResult, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CARDINALITY_THRESHOLD: usize = 15;

const DEFAULT_TIME_DIMENSIONS: &[&str] = &[
    "created_week",
    "closed_week",
    "created_date",
    "closed_date",
    "created_month",
    "closed_month",
    "created_year",
    "closed_year",
    "created_year_datepart",
    "created_month_datepart",
    "created_day_datepart",
    "created_hour_datepart",
    "closed_year_datepart",
    "closed_month_datepart",
    "closed_day_datepart",
    "closed_hour_datepart",
];
const DEFAULT_GEO_DIMENSIONS: &[&str] = &[
    "borough",
    "county",
    "location",
    "incident_zip",
    "neighborhood_name",
];
const DEFAULT_REGION_DIMENSIONS: &[&str] =
    &["borough", "county", "neighborhood_name", "incident_zip"];
const DEFAULT_ADDITIVE_MEASURES: &[&str] = &["num_of_requests", "population"];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Fixed lookup tables for the recommendation engine. Read once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub time_dimensions: Vec<String>,
    pub geo_dimensions: Vec<String>,
    pub additive_measures: Vec<String>,
    /// Non-time dimensions above this many distinct values are high cardinality.
    pub cardinality_threshold: usize,
    pub point_dimension: String,
    pub region_dimensions: Vec<String>,
    /// Count geographic dimensions as categorical as well. Set to false to
    /// keep the three kinds disjoint.
    pub geo_is_categorical: bool,
}
impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            time_dimensions: owned(DEFAULT_TIME_DIMENSIONS),
            geo_dimensions: owned(DEFAULT_GEO_DIMENSIONS),
            additive_measures: owned(DEFAULT_ADDITIVE_MEASURES),
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
            point_dimension: "location".to_string(),
            region_dimensions: owned(DEFAULT_REGION_DIMENSIONS),
            geo_is_categorical: true,
        }
    }
}
impl RecommenderConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading recommender configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        let config: RecommenderConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        info!(
            "Recommender configuration: {} time, {} geo, {} additive, threshold {}",
            config.time_dimensions.len(),
            config.geo_dimensions.len(),
            config.additive_measures.len(),
            config.cardinality_threshold
        );
        Ok(config)
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if self.point_dimension.trim().is_empty() {
            return Err(ConfigError::MissingRequiredConfig {
                field: "point_dimension".to_string(),
            });
        }
        let time: HashSet<&str> = self.time_dimensions.iter().map(String::as_str).collect();
        let mut overlap: Vec<&str> = self
            .geo_dimensions
            .iter()
            .map(String::as_str)
            .filter(|d| time.contains(d))
            .collect();
        if !overlap.is_empty() {
            overlap.sort_unstable();
            return Err(ConfigError::ConflictingOptions {
                details: format!(
                    "dimensions listed as both temporal and geographic: {}",
                    overlap.join(", ")
                ),
            });
        }
        let point = self.point_dimension.to_lowercase();
        if self
            .region_dimensions
            .iter()
            .any(|r| r.to_lowercase() == point)
        {
            return Err(ConfigError::ConflictingOptions {
                details: format!(
                    "point dimension '{}' is also listed as a region",
                    self.point_dimension
                ),
            });
        }
        if self.cardinality_threshold == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "cardinality_threshold must be greater than 0".to_string(),
            });
        }
        if !self
            .geo_dimensions
            .iter()
            .any(|g| g.to_lowercase() == point)
        {
            warn!(
                "Point dimension '{}' is not a geo dimension; heatmaps will never be offered",
                self.point_dimension
            );
        }
        Ok(())
    }
}
