mod app;

use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use clap::Parser;
use cograph::layout::{self, LayoutParams};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "3D force-directed viewer for character co-occurrence graphs")]
struct Args {
    /// Graph dataset: `{ "nodes": [{ "name", "group" }], "links": [{ "source", "target" }] }`
    #[arg(default_value = "data/characters.json")]
    data: PathBuf,

    /// Seed for the initial random placement. Drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = layout::ITERATIONS)]
    iterations: usize,

    #[arg(long, default_value_t = layout::REPULSION)]
    repulsion: f32,

    #[arg(long, default_value_t = layout::ATTRACTION)]
    attraction: f32,

    #[arg(long, default_value_t = layout::DAMPING)]
    damping: f32,

    #[arg(long, default_value_t = layout::SOFTENING)]
    softening: f32,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            iterations: self.iterations,
            repulsion: self.repulsion,
            softening: self.softening,
            attraction: self.attraction,
            damping: self.damping,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let params = args
        .layout_params()
        .validate()
        .context("invalid layout parameters")?;
    tracing::info!(data = %args.data.display(), seed = ?args.seed, ?params, "starting viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let Args { data, seed, .. } = args;
    eframe::run_native(
        "cograph",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphViewerApp::new(cc, data, seed, params)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
