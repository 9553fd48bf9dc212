use cograph::palette::EDGE_COLOR;
use eframe::egui::{Color32, Sense, Stroke, Ui};

use super::ViewModel;
use super::render_utils::{
    blend_color, circle_visible, color32, depth_shade, draw_background, edge_visible,
};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        let input_changed = self.handle_camera_input(ui, &response);
        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let camera_moving = self.camera.ease(frame_delta_seconds);
        if camera_moving || input_changed {
            ui.ctx().request_repaint();
        }

        // hover before projecting so a highlighted body is drawn at its new scale
        self.update_hover(ui, rect);
        self.scene.project(&self.camera, rect);

        let hovered = self.hover.hovered();
        let edge_color = color32(EDGE_COLOR);

        if self.show_edges {
            for edge in &self.scene.edges {
                let (Some(start), Some(end)) = (
                    self.scene.screen_node(edge.source.index()),
                    self.scene.screen_node(edge.target.index()),
                ) else {
                    continue;
                };
                if !edge_visible(rect, start.position, end.position, 2.0) {
                    continue;
                }

                let stroke = if hovered.is_some_and(|id| edge.touches(id)) {
                    Stroke::new(2.0, blend_color(edge_color, Color32::WHITE, 0.55))
                } else {
                    let depth = self.scene.depth_fraction((start.depth + end.depth) * 0.5);
                    Stroke::new(1.0, depth_shade(edge_color, depth))
                };
                painter.line_segment([start.position, end.position], stroke);
            }
        }

        for &index in self.scene.draw_order() {
            let Some(screen) = self.scene.screen_node(index) else {
                continue;
            };
            if !circle_visible(rect, screen.position, screen.radius) {
                continue;
            }

            let body = &self.scene.bodies[index];
            let is_hovered = hovered == Some(body.id());
            let base = color32(body.visual.color);
            let fill = if is_hovered {
                base
            } else {
                depth_shade(base, self.scene.depth_fraction(screen.depth))
            };
            let outline = if is_hovered {
                Stroke::new(1.6, Color32::WHITE)
            } else {
                Stroke::new(0.8, blend_color(fill, Color32::BLACK, 0.45))
            };

            painter.circle(screen.position, screen.radius, fill, outline);
        }

        self.tooltip.draw(&painter, rect);
        let cursor_icon = self.tooltip.cursor_icon();
        ui.output_mut(|output| output.cursor_icon = cursor_icon);
    }
}
