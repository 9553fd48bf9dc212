use cograph::pick;
use eframe::egui::{self, Key, Rect, Ui};
use glam::Vec2;

use super::ViewModel;
use super::render_utils::{screen_to_ndc, to_vec2};

impl ViewModel {
    /// Orbit, zoom and reset. Returns `true` when the camera goal changed.
    pub(in crate::app) fn handle_camera_input(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
    ) -> bool {
        let mut changed = false;

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(Vec2::new(delta.x, delta.y));
            changed = true;
        }

        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                self.camera.zoom(scroll);
                changed = true;
            }
        }

        if ui.input(|input| input.key_pressed(Key::R)) && !ui.ctx().wants_keyboard_input() {
            self.camera.reset();
            changed = true;
        }

        changed
    }

    /// Casts the pointer into the scene and feeds the result to the hover machine.
    pub(in crate::app) fn update_hover(&mut self, ui: &Ui, rect: Rect) {
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer));

        let Some(pointer) = pointer else {
            self.hover.clear(&mut self.scene.bodies, &mut self.tooltip);
            return;
        };

        let aspect = rect.width() / rect.height().max(1.0);
        let ray = self.camera.ray_from_ndc(screen_to_ndc(rect, pointer), aspect);
        let picked = pick::resolve(&ray, &self.scene.bodies);

        self.hover.update(
            picked,
            to_vec2(pointer),
            &mut self.scene.bodies,
            &mut self.tooltip,
        );
    }
}
