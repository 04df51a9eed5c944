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

//! Chart-type recommendation for aggregation query results.
//!
//! Given the shape of a query (its dimensions, measures and an optional top-N
//! restriction) and optional per-dimension cardinalities, [`recommend`] returns
//! every chart type that can render the result plus a single ideal pick.

pub mod chart_type;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod query_shape;
pub mod rules;

pub use chart_type::ChartType;
pub use classifier::{
    AdditiveMeasureSet, AdditivityRegistry, DimensionClasses, DimensionClassifier,
    NameSetClassifier,
};
pub use config::{RecommenderConfig, DEFAULT_CARDINALITY_THRESHOLD};
pub use engine::{Outcome, RecommendationEngine, RecommendationTrace};
pub use error::{ConfigError, ErrorReporter, Result, SerialisationError, VizRecError};
pub use features::{FeatureSummary, GeoTarget};
pub use query_shape::{DimensionStats, Measure, QueryShape, RecommendationRequest, TopNDefinition};
pub use rules::{Recommendation, RuleId};

use once_cell::sync::Lazy;

static DEFAULT_ENGINE: Lazy<RecommendationEngine> = Lazy::new(RecommendationEngine::default);

/// Recommends charts using the built-in dimension and measure tables.
pub fn recommend(
    shape: &QueryShape,
    dimension_stats: Option<&DimensionStats>,
    dataset_length: Option<usize>,
) -> Recommendation {
    DEFAULT_ENGINE.recommend(shape, dimension_stats, dataset_length)
}

pub fn default_engine() -> &'static RecommendationEngine {
    &DEFAULT_ENGINE
}
