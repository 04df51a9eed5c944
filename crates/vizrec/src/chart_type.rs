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

use crate::error::SerialisationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Table,
    SingleBarChart,
    LineChart,
    StackedAreaChart,
    #[serde(rename = "stacked_area_chart_100")]
    StackedAreaChart100,
    NestedBarChart,
    GroupedBarChart,
    StackedBarChart,
    #[serde(rename = "stacked_bar_chart_100")]
    StackedBarChart100,
    Treemap,
    Heatmap,
    ChoroplethMap,
}
impl ChartType {
    pub const ALL: [ChartType; 12] = [
        ChartType::Table,
        ChartType::SingleBarChart,
        ChartType::LineChart,
        ChartType::StackedAreaChart,
        ChartType::StackedAreaChart100,
        ChartType::NestedBarChart,
        ChartType::GroupedBarChart,
        ChartType::StackedBarChart,
        ChartType::StackedBarChart100,
        ChartType::Treemap,
        ChartType::Heatmap,
        ChartType::ChoroplethMap,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Table => "table",
            ChartType::SingleBarChart => "single_bar_chart",
            ChartType::LineChart => "line_chart",
            ChartType::StackedAreaChart => "stacked_area_chart",
            ChartType::StackedAreaChart100 => "stacked_area_chart_100",
            ChartType::NestedBarChart => "nested_bar_chart",
            ChartType::GroupedBarChart => "grouped_bar_chart",
            ChartType::StackedBarChart => "stacked_bar_chart",
            ChartType::StackedBarChart100 => "stacked_bar_chart_100",
            ChartType::Treemap => "treemap",
            ChartType::Heatmap => "heatmap",
            ChartType::ChoroplethMap => "choropleth_map",
        }
    }
    /// Charts that sum measures across groups.
    pub fn requires_additive_measures(&self) -> bool {
        matches!(
            self,
            ChartType::StackedAreaChart
                | ChartType::StackedAreaChart100
                | ChartType::StackedBarChart
                | ChartType::StackedBarChart100
                | ChartType::Treemap
        )
    }
}
impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for ChartType {
    type Err = SerialisationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .iter()
            .copied()
            .find(|chart| chart.as_str() == s)
            .ok_or_else(|| SerialisationError::UnknownChartType {
                identifier: s.to_string(),
            })
    }
}
