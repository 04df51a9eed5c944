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

use crate::classifier::{AdditivityRegistry, DimensionClassifier};
use crate::query_shape::{cardinality_of, DimensionStats, QueryShape};
use serde::Serialize;

/// What a lone geographic dimension can be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoTarget {
    Point,
    Region,
    Other,
}

/// Engine settings the feature derivation depends on.
#[derive(Debug, Clone)]
pub struct FeatureSettings {
    pub cardinality_threshold: usize,
    pub point_dimension: String,
    pub region_dimensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub dimension_count: usize,
    pub time_count: usize,
    pub geo_count: usize,
    pub categorical_count: usize,
    pub measure_count: usize,
    pub additive_measure_count: usize,
    pub all_measures_additive: bool,
    pub high_cardinality: bool,
    pub is_topn: bool,
    pub is_not_location: bool,
    pub geo_target: Option<GeoTarget>,
}
impl FeatureSummary {
    pub fn derive<C, A>(
        shape: &QueryShape,
        stats: Option<&DimensionStats>,
        classifier: &C,
        additivity: &A,
        settings: &FeatureSettings,
    ) -> Self
    where
        C: DimensionClassifier + ?Sized,
        A: AdditivityRegistry + ?Sized,
    {
        let classes = classifier.classify(&shape.dimensions);
        let measure_count = shape.measures.len();
        let additive_measure_count = shape
            .measure_aliases()
            .filter(|alias| is_measure_additive(additivity, alias))
            .count();
        let high_cardinality = match stats {
            Some(stats) if !shape.dimensions.is_empty() => all_dimensions_exceed_cardinality(
                &shape.dimensions,
                |dim| classes.is_time(dim),
                stats,
                settings.cardinality_threshold,
            ),
            _ => false,
        };
        let is_not_location = shape
            .dimensions
            .first()
            .map_or(true, |first| *first != settings.point_dimension);
        let geo_target = match classes.geo.as_slice() {
            [only] => Some(geo_target_for(only, settings)),
            _ => None,
        };
        Self {
            dimension_count: shape.dimensions.len(),
            time_count: classes.time.len(),
            geo_count: classes.geo.len(),
            categorical_count: classes.categorical.len(),
            measure_count,
            additive_measure_count,
            all_measures_additive: additive_measure_count == measure_count,
            high_cardinality,
            is_topn: is_topn_query(shape),
            is_not_location,
            geo_target,
        }
    }
}

fn geo_target_for(dimension: &str, settings: &FeatureSettings) -> GeoTarget {
    let name = dimension.to_lowercase();
    if name == settings.point_dimension.to_lowercase() {
        GeoTarget::Point
    } else if settings
        .region_dimensions
        .iter()
        .any(|r| r.to_lowercase() == name)
    {
        GeoTarget::Region
    } else {
        GeoTarget::Other
    }
}

pub fn is_measure_additive<A>(additivity: &A, measure_alias: &str) -> bool
where
    A: AdditivityRegistry + ?Sized,
{
    additivity.is_additive(measure_alias)
}

/// True when every non-time dimension has strictly more distinct values than
/// `threshold`. Missing stats count as 0; no non-time dimensions gives false.
pub fn all_dimensions_exceed_cardinality<F>(
    dimensions: &[String],
    is_time: F,
    stats: &DimensionStats,
    threshold: usize,
) -> bool
where
    F: Fn(&str) -> bool,
{
    let mut non_time = dimensions.iter().filter(|dim| !is_time(dim.as_str())).peekable();
    if non_time.peek().is_none() {
        return false;
    }
    non_time.all(|dim| cardinality_of(stats, dim) > threshold)
}

pub fn is_topn_query(shape: &QueryShape) -> bool {
    shape.top_n.is_some()
}
