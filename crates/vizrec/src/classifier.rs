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

use crate::config::RecommenderConfig;
use std::collections::HashSet;

/// Dimensions of one query split by kind, each in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionClasses<'a> {
    pub time: Vec<&'a str>,
    pub geo: Vec<&'a str>,
    pub categorical: Vec<&'a str>,
}
impl DimensionClasses<'_> {
    pub fn is_time(&self, dimension: &str) -> bool {
        self.time.contains(&dimension)
    }
}

pub trait DimensionClassifier {
    fn classify<'a>(&self, dimensions: &'a [String]) -> DimensionClasses<'a>;
}

pub trait AdditivityRegistry {
    fn is_additive(&self, measure_alias: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct NameSetClassifier {
    time: HashSet<String>,
    geo: HashSet<String>,
    geo_is_categorical: bool,
}
impl NameSetClassifier {
    pub fn new<T, G>(time: T, geo: G) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            time: time.into_iter().map(Into::into).collect(),
            geo: geo.into_iter().map(Into::into).collect(),
            geo_is_categorical: true,
        }
    }
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(
            config.time_dimensions.iter().cloned(),
            config.geo_dimensions.iter().cloned(),
        )
        .with_geo_as_categorical(config.geo_is_categorical)
    }
    pub fn with_geo_as_categorical(mut self, enabled: bool) -> Self {
        self.geo_is_categorical = enabled;
        self
    }
}
impl DimensionClassifier for NameSetClassifier {
    fn classify<'a>(&self, dimensions: &'a [String]) -> DimensionClasses<'a> {
        let mut classes = DimensionClasses::default();
        for dim in dimensions {
            let is_time = self.time.contains(dim);
            let is_geo = self.geo.contains(dim);
            if is_time {
                classes.time.push(dim);
            }
            if is_geo {
                classes.geo.push(dim);
            }
            if !is_time && (!is_geo || self.geo_is_categorical) {
                classes.categorical.push(dim);
            }
        }
        classes
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdditiveMeasureSet {
    aliases: HashSet<String>,
}
impl AdditiveMeasureSet {
    pub fn new<I>(aliases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(config.additive_measures.iter().cloned())
    }
}
impl AdditivityRegistry for AdditiveMeasureSet {
    fn is_additive(&self, measure_alias: &str) -> bool {
        self.aliases.contains(measure_alias)
    }
}
