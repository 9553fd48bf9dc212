use std::collections::VecDeque;
use std::path::Path;

use cograph::camera::OrbitCamera;
use cograph::hover::HoverController;
use cograph::palette::group_color;
use eframe::egui::{self, Align, Context, Layout, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::color32;
use super::super::scene::Scene;
use super::super::tooltip::TooltipOverlay;
use super::super::{LoadedGraph, ViewModel};

const SEARCH_RESULT_ROWS: usize = 60;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn new(loaded: LoadedGraph) -> Self {
        let LoadedGraph {
            graph,
            report,
            seed,
        } = loaded;
        let scene = Scene::build(&graph);
        let camera = OrbitCamera::framing(graph.nodes().iter().map(|node| node.position));

        Self {
            graph,
            report,
            seed,
            scene,
            camera,
            hover: HoverController::default(),
            tooltip: TooltipOverlay::default(),
            search: String::new(),
            show_edges: true,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        relayout_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("cograph");
                    ui.separator();
                    ui.label(format!("data: {}", data_path.display()));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("edges: {}", self.graph.edge_count()));
                    ui.label(format!("seed: {}", self.seed));
                    ui.label(self.layout_summary_text());
                    let relayout_button =
                        ui.add_enabled(!is_loading, egui::Button::new("New layout"));
                    if relayout_button.clicked() {
                        *relayout_requested = true;
                    }
                    if is_loading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("characters")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Hovered");
        self.draw_hovered_details(ui);

        ui.separator();
        ui.checkbox(&mut self.show_edges, "Show edges");
        ui.checkbox(&mut self.show_fps_bar, "Show FPS");
        ui.label(RichText::new("Drag: orbit, Scroll: zoom, R: reset view").weak());

        ui.separator();
        ui.heading("Characters");
        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("fuzzy search")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        let rows = self.search_rows();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if rows.is_empty() {
                    ui.label("No characters match.");
                }
                for index in rows {
                    let body = &self.scene.bodies[index];
                    let label = RichText::new(&body.name).color(color32(group_color(body.group)));
                    let position = body.position;
                    if ui
                        .selectable_label(self.hover.hovered() == Some(body.id()), label)
                        .on_hover_text(format!("group {}", body.group))
                        .clicked()
                    {
                        self.camera.focus(position);
                    }
                }
            });
    }

    fn draw_hovered_details(&self, ui: &mut Ui) {
        let Some(node) = self.hover.hovered().and_then(|id| self.graph.node(id)) else {
            ui.label(RichText::new("Point at a character to inspect it.").weak());
            return;
        };

        let degree = self.graph.neighbors(node.id()).count();
        egui::Grid::new("hovered_details")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("name");
                ui.label(RichText::new(&node.name).strong());
                ui.end_row();
                ui.label("group");
                ui.label(node.group.to_string());
                ui.end_row();
                ui.label("links");
                ui.label(degree.to_string());
                ui.end_row();
            });
    }

    /// Body indices matching the search query, best match first.
    fn search_rows(&self) -> Vec<usize> {
        let query = self.search.trim();
        if query.is_empty() {
            let mut rows = (0..self.scene.bodies.len()).collect::<Vec<_>>();
            rows.sort_by(|a, b| self.scene.bodies[*a].name.cmp(&self.scene.bodies[*b].name));
            rows.truncate(SEARCH_RESULT_ROWS);
            return rows;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .scene
            .bodies
            .iter()
            .enumerate()
            .filter_map(|(index, body)| {
                fuzzy_match_score(&matcher, &body.name, query).map(|score| (index, score))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
            .into_iter()
            .take(SEARCH_RESULT_ROWS)
            .map(|(index, _)| index)
            .collect()
    }
}
