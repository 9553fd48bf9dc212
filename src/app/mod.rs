use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context as _, Result, bail};
use cograph::camera::OrbitCamera;
use cograph::dataset::load_dataset;
use cograph::graph::Graph;
use cograph::hover::HoverController;
use cograph::layout::{ForceLayout, LayoutParams, LayoutReport};
use eframe::egui::{self, Context};

use self::scene::Scene;
use self::tooltip::TooltipOverlay;

mod interaction;
mod render_utils;
mod scene;
mod tooltip;
mod ui;
mod view;

type LoadResult = Result<LoadedGraph, String>;

pub struct GraphViewerApp {
    data_path: PathBuf,
    params: LayoutParams,
    seed: Option<u64>,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct LoadedGraph {
    graph: Graph,
    report: LayoutReport,
    seed: u64,
}

struct ViewModel {
    graph: Graph,
    report: LayoutReport,
    seed: u64,
    scene: Scene,
    camera: OrbitCamera,
    hover: HoverController,
    tooltip: TooltipOverlay,
    search: String,
    show_edges: bool,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

/// Runs on the load thread. The graph is shown only once this returns.
fn build_graph(path: &Path, seed: u64, params: LayoutParams) -> Result<LoadedGraph> {
    let dataset = load_dataset(path)?;
    let mut graph = Graph::from_dataset(&dataset, seed)
        .with_context(|| format!("dataset {} failed integrity checks", path.display()))?;

    let layout = ForceLayout::new(params).context("invalid layout parameters")?;
    let report = layout.run(&mut graph);
    if report.diverged() {
        bail!(
            "layout diverged: {} of {} nodes ended with non-finite coordinates; \
             a node has too many links for attraction {} and damping {}, try lower values",
            report.diverged_nodes,
            graph.node_count(),
            params.attraction,
            params.damping
        );
    }

    Ok(LoadedGraph {
        graph,
        report,
        seed,
    })
}

impl GraphViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: PathBuf,
        seed: Option<u64>,
        params: LayoutParams,
    ) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(data_path.clone(), seed, params),
        };

        Self {
            data_path,
            params,
            seed,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(
        data_path: PathBuf,
        seed: Option<u64>,
        params: LayoutParams,
    ) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let seed = seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "no seed given, drew one at random");
            seed
        });

        thread::spawn(move || {
            let result = build_graph(&data_path, seed, params).map_err(|error| {
                tracing::error!("failed to build graph: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for GraphViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(loaded))),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Laying out character graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load character graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading {
                            rx: Self::spawn_load(self.data_path.clone(), self.seed, self.params),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let mut relayout_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut relayout_requested, is_reloading);

                if relayout_requested && self.reload_rx.is_none() {
                    // a fresh seed every time; `--seed` only pins the first layout
                    self.reload_rx =
                        Some(Self::spawn_load(self.data_path.clone(), None, self.params));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(loaded))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
