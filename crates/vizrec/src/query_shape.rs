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

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Distinct-value counts per dimension for the current result set.
pub type DimensionStats = HashMap<String, usize>;

pub fn cardinality_of(stats: &DimensionStats, dimension: &str) -> usize {
    stats.get(dimension).copied().unwrap_or(0)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}
impl Measure {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            expression: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNDefinition {
    #[serde(default)]
    pub order_by_key: Vec<String>,
    #[serde(rename = "topN")]
    pub top_n: u64,
}

/// Shape of an aggregation query: grouping dimensions, aggregated measures and
/// an optional ranking restriction. Filters and other metadata carried by the
/// full query definition are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryShape {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dimensions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub measures: Vec<Measure>,
    #[serde(rename = "topN", default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<TopNDefinition>,
}
impl QueryShape {
    pub fn new<I, S>(dimensions: I, measures: Vec<Measure>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            measures,
            top_n: None,
        }
    }
    pub fn with_top_n(mut self, top_n: TopNDefinition) -> Self {
        self.top_n = Some(top_n);
        self
    }
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.measures.is_empty()
    }
    pub fn measure_aliases(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().map(|m| m.alias.as_str())
    }
    /// Copy of this shape with dimensions sorted by cardinality, highest first.
    /// Ties keep their original relative order.
    pub fn ordered_by_cardinality(&self, stats: &DimensionStats) -> QueryShape {
        if self.dimensions.len() <= 1 || stats.is_empty() {
            return self.clone();
        }
        let mut dimensions = self.dimensions.clone();
        dimensions.sort_by(|a, b| cardinality_of(stats, b).cmp(&cardinality_of(stats, a)));
        QueryShape {
            dimensions,
            ..self.clone()
        }
    }
}

/// JSON envelope for a single recommendation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(alias = "aggregationDefinition")]
    pub query: QueryShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_stats: Option<DimensionStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_length: Option<usize>,
}
