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

use crate::chart_type::ChartType;
use crate::features::{FeatureSummary, GeoTarget};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "availableChartTypes")]
    pub available: Vec<ChartType>,
    #[serde(rename = "chartType")]
    pub ideal: ChartType,
}
impl Recommendation {
    pub fn table() -> Self {
        Self {
            available: vec![ChartType::Table],
            ideal: ChartType::Table,
        }
    }
    pub fn contains(&self, chart: ChartType) -> bool {
        self.available.contains(&chart)
    }
    fn offer(mut self, chart: ChartType) -> Self {
        if !self.available.contains(&chart) {
            self.available.push(chart);
        }
        self
    }
    fn prefer(mut self, chart: ChartType) -> Self {
        self = self.offer(chart);
        self.ideal = chart;
        self
    }
    fn withdraw(mut self, chart: ChartType) -> Self {
        self.available.retain(|c| *c != chart);
        self
    }
}
impl Default for Recommendation {
    fn default() -> Self {
        Self::table()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    SingleBar,
    LineChart,
    NestedBar,
    GroupedBar,
    Treemap,
    Geospatial,
}
impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SingleBar => "single_bar",
            RuleId::LineChart => "line_chart",
            RuleId::NestedBar => "nested_bar",
            RuleId::GroupedBar => "grouped_bar",
            RuleId::Treemap => "treemap",
            RuleId::Geospatial => "geospatial",
        }
    }
}
impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type RuleFn = fn(&FeatureSummary, Recommendation) -> Recommendation;

pub struct Rule {
    pub id: RuleId,
    pub apply: RuleFn,
}

/// Evaluated top to bottom; a later rule may override the ideal set by an
/// earlier one, so the order is part of the contract.
pub static RULES: [Rule; 6] = [
    Rule {
        id: RuleId::SingleBar,
        apply: single_bar,
    },
    Rule {
        id: RuleId::LineChart,
        apply: line_chart,
    },
    Rule {
        id: RuleId::NestedBar,
        apply: nested_bar,
    },
    Rule {
        id: RuleId::GroupedBar,
        apply: grouped_bar,
    },
    Rule {
        id: RuleId::Treemap,
        apply: treemap,
    },
    Rule {
        id: RuleId::Geospatial,
        apply: geospatial,
    },
];

pub fn apply_rules(features: &FeatureSummary) -> (Recommendation, Vec<RuleId>) {
    RULES.iter().fold(
        (Recommendation::table(), Vec::new()),
        |(current, mut fired), rule| {
            let before = current.clone();
            let next = (rule.apply)(features, current);
            if next != before {
                debug!(
                    "Rule '{}' fired: available={:?}, ideal={}",
                    rule.id, next.available, next.ideal
                );
                fired.push(rule.id);
            }
            (next, fired)
        },
    )
}

fn single_bar(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if f.categorical_count == 1
        && f.measure_count == 1
        && f.time_count == 0
        && f.is_not_location
    {
        return rec.prefer(ChartType::SingleBarChart);
    }
    rec
}

// Time dimensions are excluded from the cardinality check, so high_cardinality
// here only reflects an accompanying categorical dimension.
fn line_chart(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if f.time_count != 1 || f.measure_count != 1 || f.high_cardinality {
        return rec;
    }
    let rec = rec.prefer(ChartType::LineChart);
    if f.categorical_count == 1 && f.additive_measure_count == f.measure_count {
        return rec
            .offer(ChartType::StackedAreaChart)
            .offer(ChartType::StackedAreaChart100);
    }
    rec
}

fn nested_bar(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if (1..=2).contains(&f.dimension_count)
        && (1..=2).contains(&f.measure_count)
        && (f.categorical_count > 1 || f.measure_count > 1)
    {
        return rec.prefer(ChartType::NestedBarChart);
    }
    rec
}

fn grouped_bar(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if f.categorical_count != 2 || f.measure_count != 1 || f.high_cardinality {
        return rec;
    }
    let rec = rec.prefer(ChartType::GroupedBarChart);
    if f.all_measures_additive {
        return rec
            .offer(ChartType::StackedBarChart)
            .offer(ChartType::StackedBarChart100)
            .prefer(ChartType::StackedBarChart);
    }
    rec
}

fn treemap(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if (1..=2).contains(&f.dimension_count)
        && f.measure_count == 1
        && f.time_count == 0
        && f.all_measures_additive
        && f.is_not_location
        && !f.is_topn
    {
        return rec.offer(ChartType::Treemap);
    }
    rec
}

fn geospatial(f: &FeatureSummary, rec: Recommendation) -> Recommendation {
    if f.geo_count != 1 || f.dimension_count != 1 || f.measure_count != 1 {
        return rec;
    }
    match f.geo_target {
        Some(GeoTarget::Point) => rec
            .prefer(ChartType::Heatmap)
            .withdraw(ChartType::Table),
        Some(GeoTarget::Region) => rec.prefer(ChartType::ChoroplethMap),
        Some(GeoTarget::Other) | None => rec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureSummary {
        FeatureSummary {
            dimension_count: 1,
            time_count: 0,
            geo_count: 0,
            categorical_count: 1,
            measure_count: 1,
            additive_measure_count: 0,
            all_measures_additive: false,
            high_cardinality: false,
            is_topn: false,
            is_not_location: true,
            geo_target: None,
        }
    }

    #[test]
    fn rules_run_in_documented_order() {
        let order: Vec<RuleId> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(
            order,
            vec![
                RuleId::SingleBar,
                RuleId::LineChart,
                RuleId::NestedBar,
                RuleId::GroupedBar,
                RuleId::Treemap,
                RuleId::Geospatial,
            ]
        );
    }

    #[test]
    fn offer_never_duplicates() {
        let rec = Recommendation::table()
            .offer(ChartType::Treemap)
            .offer(ChartType::Treemap)
            .prefer(ChartType::Table);
        assert_eq!(rec.available, vec![ChartType::Table, ChartType::Treemap]);
        assert_eq!(rec.ideal, ChartType::Table);
    }

    #[test]
    fn single_categorical_gives_bar() {
        let (rec, fired) = apply_rules(&features());
        assert_eq!(rec.available, vec![ChartType::Table, ChartType::SingleBarChart]);
        assert_eq!(rec.ideal, ChartType::SingleBarChart);
        assert_eq!(fired, vec![RuleId::SingleBar]);
    }

    #[test]
    fn treemap_keeps_ideal() {
        let f = FeatureSummary {
            additive_measure_count: 1,
            all_measures_additive: true,
            ..features()
        };
        let (rec, fired) = apply_rules(&f);
        assert_eq!(
            rec.available,
            vec![ChartType::Table, ChartType::SingleBarChart, ChartType::Treemap]
        );
        assert_eq!(rec.ideal, ChartType::SingleBarChart);
        assert_eq!(fired, vec![RuleId::SingleBar, RuleId::Treemap]);
    }

    #[test]
    fn topn_suppresses_treemap() {
        let f = FeatureSummary {
            additive_measure_count: 1,
            all_measures_additive: true,
            is_topn: true,
            ..features()
        };
        let (rec, _) = apply_rules(&f);
        assert!(!rec.contains(ChartType::Treemap));
    }

    #[test]
    fn two_measures_prefer_nested_bar() {
        let f = FeatureSummary {
            measure_count: 2,
            ..features()
        };
        let (rec, fired) = apply_rules(&f);
        assert_eq!(rec.available, vec![ChartType::Table, ChartType::NestedBarChart]);
        assert_eq!(rec.ideal, ChartType::NestedBarChart);
        assert_eq!(fired, vec![RuleId::NestedBar]);
    }

    #[test]
    fn grouped_then_stacked_then_nested_order() {
        let f = FeatureSummary {
            dimension_count: 2,
            categorical_count: 2,
            additive_measure_count: 1,
            all_measures_additive: true,
            ..features()
        };
        let (rec, fired) = apply_rules(&f);
        assert_eq!(
            rec.available,
            vec![
                ChartType::Table,
                ChartType::NestedBarChart,
                ChartType::GroupedBarChart,
                ChartType::StackedBarChart,
                ChartType::StackedBarChart100,
                ChartType::Treemap,
            ]
        );
        assert_eq!(rec.ideal, ChartType::StackedBarChart);
        assert_eq!(
            fired,
            vec![RuleId::NestedBar, RuleId::GroupedBar, RuleId::Treemap]
        );
    }

    #[test]
    fn unmapped_geo_leaves_recommendation_alone() {
        let f = FeatureSummary {
            categorical_count: 0,
            geo_count: 1,
            geo_target: Some(GeoTarget::Other),
            ..features()
        };
        let (rec, fired) = apply_rules(&f);
        assert_eq!(rec, Recommendation::table());
        assert!(fired.is_empty());
    }
}
