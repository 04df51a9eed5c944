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

use crate::classifier::{
    AdditiveMeasureSet, AdditivityRegistry, DimensionClassifier, NameSetClassifier,
};
use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::features::{FeatureSettings, FeatureSummary};
use crate::query_shape::{DimensionStats, QueryShape, RecommendationRequest};
use crate::rules::{apply_rules, Recommendation, RuleId};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Why evaluation stopped where it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    SingleRow,
    EmptyQuery,
    TooManyDimensions,
    NoMeasures,
    Rules { fired: Vec<RuleId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationTrace {
    pub recommendation: Recommendation,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSummary>,
}
impl RecommendationTrace {
    fn short_circuit(outcome: Outcome, features: Option<FeatureSummary>) -> Self {
        Self {
            recommendation: Recommendation::table(),
            outcome,
            features,
        }
    }
    pub fn fired_rules(&self) -> &[RuleId] {
        match &self.outcome {
            Outcome::Rules { fired } => fired,
            _ => &[],
        }
    }
}

pub struct RecommendationEngine<C = NameSetClassifier, A = AdditiveMeasureSet> {
    classifier: C,
    additivity: A,
    settings: FeatureSettings,
}
impl RecommendationEngine {
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_collaborators(
            &config,
            NameSetClassifier::from_config(&config),
            AdditiveMeasureSet::from_config(&config),
        ))
    }
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(RecommenderConfig::from_yaml_file(path)?)
    }
}
impl Default for RecommendationEngine {
    fn default() -> Self {
        let config = RecommenderConfig::default();
        Self::with_collaborators(
            &config,
            NameSetClassifier::from_config(&config),
            AdditiveMeasureSet::from_config(&config),
        )
    }
}
impl<C, A> RecommendationEngine<C, A>
where
    C: DimensionClassifier,
    A: AdditivityRegistry,
{
    pub fn with_collaborators(config: &RecommenderConfig, classifier: C, additivity: A) -> Self {
        Self {
            classifier,
            additivity,
            settings: FeatureSettings {
                cardinality_threshold: config.cardinality_threshold,
                point_dimension: config.point_dimension.clone(),
                region_dimensions: config.region_dimensions.clone(),
            },
        }
    }

    pub fn cardinality_threshold(&self) -> usize {
        self.settings.cardinality_threshold
    }

    /// Returns the charts that can render `shape` and the single best pick.
    pub fn recommend(
        &self,
        shape: &QueryShape,
        dimension_stats: Option<&DimensionStats>,
        dataset_length: Option<usize>,
    ) -> Recommendation {
        self.explain(shape, dimension_stats, dataset_length)
            .recommendation
    }

    pub fn explain(
        &self,
        shape: &QueryShape,
        dimension_stats: Option<&DimensionStats>,
        dataset_length: Option<usize>,
    ) -> RecommendationTrace {
        let trace = self.evaluate(shape, dimension_stats, dataset_length);
        info!(
            "Chart options: {:?}, ideal: {}",
            trace.recommendation.available, trace.recommendation.ideal
        );
        trace
    }

    pub fn recommend_request(&self, request: &RecommendationRequest) -> Recommendation {
        self.recommend(
            &request.query,
            request.dimension_stats.as_ref(),
            request.dataset_length,
        )
    }

    pub fn recommend_json(&self, request_json: &str) -> Result<Recommendation> {
        let request: RecommendationRequest = serde_json::from_str(request_json)?;
        Ok(self.recommend_request(&request))
    }

    fn evaluate(
        &self,
        shape: &QueryShape,
        dimension_stats: Option<&DimensionStats>,
        dataset_length: Option<usize>,
    ) -> RecommendationTrace {
        if dataset_length == Some(1) {
            debug!("Single-row result, only a table makes sense");
            return RecommendationTrace::short_circuit(Outcome::SingleRow, None);
        }
        if shape.is_empty() {
            debug!("Query has neither dimensions nor measures");
            return RecommendationTrace::short_circuit(Outcome::EmptyQuery, None);
        }

        let features = FeatureSummary::derive(
            shape,
            dimension_stats,
            &self.classifier,
            &self.additivity,
            &self.settings,
        );
        debug!("Derived features: {:?}", features);

        if features.dimension_count > 2 {
            return RecommendationTrace::short_circuit(Outcome::TooManyDimensions, Some(features));
        }
        if features.measure_count == 0 {
            return RecommendationTrace::short_circuit(Outcome::NoMeasures, Some(features));
        }

        let (recommendation, fired) = apply_rules(&features);
        RecommendationTrace {
            recommendation,
            outcome: Outcome::Rules { fired },
            features: Some(features),
        }
    }
}
