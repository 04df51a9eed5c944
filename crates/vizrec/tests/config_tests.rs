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

use std::io::Write;
use tempfile::NamedTempFile;
use vizrec::{
    ChartType, ConfigError, DimensionStats, Measure, QueryShape, RecommendationEngine,
    RecommenderConfig, VizRecError,
};

fn write_temp_yaml(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{content}").unwrap();
    temp_file
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/recommender.yml");
    let config = RecommenderConfig::from_yaml_file(path).unwrap();
    assert_eq!(config, RecommenderConfig::default());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let temp_file = write_temp_yaml(
        r#"
cardinality_threshold: 5
additive_measures:
  - trips
"#,
    );
    let config = RecommenderConfig::from_yaml_file(temp_file.path()).unwrap();
    assert_eq!(config.cardinality_threshold, 5);
    assert_eq!(config.additive_measures, vec!["trips".to_string()]);
    assert_eq!(config.point_dimension, "location");
    assert!(config.time_dimensions.contains(&"created_date".to_string()));
}

#[test]
fn test_engine_uses_loaded_threshold() {
    let temp_file = write_temp_yaml(
        r#"
cardinality_threshold: 3
time_dimensions: [day]
geo_dimensions: [location]
"#,
    );
    let engine = RecommendationEngine::from_config_file(temp_file.path()).unwrap();
    assert_eq!(engine.cardinality_threshold(), 3);

    let shape = QueryShape::new(["agency", "status"], vec![Measure::new("n")]);
    let stats: DimensionStats = [("agency".to_string(), 4), ("status".to_string(), 4)]
        .into_iter()
        .collect();
    let rec = engine.recommend(&shape, Some(&stats), None);
    assert!(!rec.contains(ChartType::GroupedBarChart));
}

#[test]
fn test_conflicting_dimension_sets_are_rejected() {
    let temp_file = write_temp_yaml(
        r#"
time_dimensions: [created_date, borough]
"#,
    );
    let result = RecommenderConfig::from_yaml_file(temp_file.path());
    match result {
        Err(VizRecError::Config(ConfigError::ConflictingOptions { details })) => {
            assert!(details.contains("borough"));
        }
        other => panic!("expected conflicting options, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_a_serialisation_error() {
    let temp_file = write_temp_yaml("cardinality_threshold: [not, a, number]\n");
    let err = RecommenderConfig::from_yaml_file(temp_file.path()).unwrap_err();
    assert_eq!(err.category(), "Serialisation");
}

#[test]
fn test_missing_file_reports_path() {
    let err = RecommenderConfig::from_yaml_file("does/not/exist.yml").unwrap_err();
    assert!(matches!(
        err,
        VizRecError::Config(ConfigError::ConfigFileError { .. })
    ));
    assert!(err.to_string().contains("does/not/exist.yml"));
    assert!(!err.suggestions().is_empty());
}

#[test]
fn test_invalid_config_is_rejected_by_engine() {
    let config = RecommenderConfig {
        cardinality_threshold: 0,
        ..Default::default()
    };
    assert!(RecommendationEngine::new(config).is_err());
}

#[test]
fn test_yaml_can_opt_into_strict_partition() {
    let temp_file = write_temp_yaml("geo_is_categorical: false\n");
    let engine = RecommendationEngine::from_config_file(temp_file.path()).unwrap();
    let shape = QueryShape::new(["borough"], vec![Measure::new("num_of_requests")]);

    let rec = engine.recommend(&shape, None, None);
    assert!(!rec.contains(ChartType::SingleBarChart));
    assert_eq!(rec.ideal, ChartType::ChoroplethMap);

    let rec = vizrec::recommend(&shape, None, None);
    assert!(rec.contains(ChartType::SingleBarChart));
}
