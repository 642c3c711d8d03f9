mod app;
mod catalog;
mod encode;
mod export;
mod graph;
mod interaction;
mod layout;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::catalog::{Catalog, load_catalog};
use crate::graph::EntityGraph;
use crate::interaction::Visualization;
use crate::layout::LayoutConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON array of university records; the built-in sample is used when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long)]
    max_iterations: Option<usize>,

    #[arg(long)]
    iterations_per_tick: Option<usize>,

    #[arg(long)]
    spring_length: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    gravitational_constant: Option<f32>,

    #[arg(long)]
    central_gravity: Option<f32>,

    #[arg(long)]
    min_velocity: Option<f32>,

    /// Run the layout to completion and print node positions as JSON instead of opening a window.
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn layout_config(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        LayoutConfig {
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            iterations_per_tick: self
                .iterations_per_tick
                .unwrap_or(defaults.iterations_per_tick),
            spring_length: self.spring_length.unwrap_or(defaults.spring_length),
            gravitational_constant: self
                .gravitational_constant
                .unwrap_or(defaults.gravitational_constant),
            central_gravity: self.central_gravity.unwrap_or(defaults.central_gravity),
            min_velocity: self.min_velocity.unwrap_or(defaults.min_velocity),
            ..defaults
        }
    }

    fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::sample()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uninet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let catalog = args.load_catalog()?;
    let stats = catalog.stats();
    tracing::info!(
        entities = stats.total,
        source = ?args.catalog,
        "loaded catalog"
    );

    let graph = EntityGraph::build(&catalog);
    if args.headless {
        let snapshot = export::settle(&graph, args.layout_config());
        return export::write_snapshot(&snapshot, std::io::stdout().lock());
    }

    let visualization = Visualization::mount(graph, args.layout_config());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "uninet",
        options,
        Box::new(move |cc| Ok(Box::new(app::UniNetApp::new(cc, visualization, stats)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_layout_defaults() {
        let args = Args::parse_from([
            "uninet",
            "--max-iterations",
            "250",
            "--gravitational-constant",
            "-3500",
            "--spring-length",
            "150",
        ]);
        let config = args.layout_config();

        assert_eq!(config.max_iterations, 250);
        assert_eq!(config.gravitational_constant, -3_500.0);
        assert_eq!(config.spring_length, 150.0);
        assert_eq!(config.central_gravity, LayoutConfig::default().central_gravity);
    }

    #[test]
    fn sample_is_used_without_a_catalog_path() {
        let args = Args::parse_from(["uninet"]);
        assert_eq!(args.load_catalog().unwrap().len(), 26);
        assert_eq!(args.layout_config(), LayoutConfig::default());
        assert!(!args.headless);
    }
}
