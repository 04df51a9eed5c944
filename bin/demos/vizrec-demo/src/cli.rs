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

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vizrec-demo")]
#[command(about = "Recommend chart types for an aggregation query result")]
#[command(version)]
pub struct Args {
    #[arg(
        value_name = "REQUEST",
        help = "JSON recommendation request file, or '-' to read standard input"
    )]
    pub request: PathBuf,

    #[arg(long, help = "YAML recommender configuration (built-in tables if omitted)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Sort dimensions by cardinality before recommending")]
    pub reorder: bool,

    #[arg(long, help = "Print the derived features and the rules that fired")]
    pub explain: bool,

    #[arg(long, help = "Disable coloured error output")]
    pub no_color: bool,

    #[arg(long, value_enum, help = "Set the logging level")]
    pub log_level: Option<LogLevel>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
