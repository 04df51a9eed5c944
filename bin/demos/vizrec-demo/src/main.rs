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

mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::Args;
use std::io::Read;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vizrec::{ErrorReporter, RecommendationEngine, RecommendationRequest};

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let reporter = if args.no_color {
        ErrorReporter::plain()
    } else {
        ErrorReporter::new()
    };

    run(&args).map_err(|e| {
        eprint!("{}", reporter.report(&e));
        anyhow!(e.user_message())
    })
}

fn run(args: &Args) -> vizrec::Result<()> {
    let loaded;
    let engine: &RecommendationEngine = match &args.config {
        Some(path) => {
            loaded = RecommendationEngine::from_config_file(path)?;
            &loaded
        }
        None => vizrec::default_engine(),
    };

    let mut request: RecommendationRequest = serde_json::from_str(&read_request(&args.request)?)?;
    if args.reorder {
        if let Some(stats) = &request.dimension_stats {
            request.query = request.query.ordered_by_cardinality(stats);
            info!("Dimensions reordered by cardinality: {:?}", request.query.dimensions);
        }
    }

    let output = if args.explain {
        serde_json::to_string_pretty(&engine.explain(
            &request.query,
            request.dimension_stats.as_ref(),
            request.dataset_length,
        ))?
    } else {
        serde_json::to_string_pretty(&engine.recommend_request(&request))?
    };
    println!("{output}");
    Ok(())
}

fn read_request(path: &Path) -> vizrec::Result<String> {
    let mut content = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut content)?;
    } else {
        content = std::fs::read_to_string(path)?;
    }
    Ok(content)
}
