use cograph::hover::{CursorStyle, HoverSink};
use cograph::pick::PickableBody;
use eframe::egui::{self, Color32, FontId, Painter, Pos2, Rect, Stroke, vec2};
use glam::Vec2;

use super::render_utils::to_pos2;

const POINTER_OFFSET: egui::Vec2 = vec2(14.0, 14.0);
const PADDING: f32 = 6.0;

/// Screen-space hover label. Fed by `HoverController` through [`HoverSink`].
#[derive(Debug, Default)]
pub(super) struct TooltipOverlay {
    visible: bool,
    text: String,
    group: Option<u32>,
    anchor: Pos2,
    cursor: CursorStyle,
}

impl TooltipOverlay {
    pub(super) fn cursor_icon(&self) -> egui::CursorIcon {
        match self.cursor {
            CursorStyle::Default => egui::CursorIcon::Default,
            CursorStyle::Interactive => egui::CursorIcon::PointingHand,
        }
    }

    pub(super) fn draw(&self, painter: &Painter, rect: Rect) {
        if !self.visible {
            return;
        }

        let title = painter.layout_no_wrap(
            self.text.clone(),
            FontId::proportional(14.0),
            Color32::from_rgb(236, 239, 244),
        );
        let subtitle = self.group.map(|group| {
            painter.layout_no_wrap(
                format!("group {group}"),
                FontId::proportional(11.0),
                Color32::from_rgb(160, 168, 180),
            )
        });

        let subtitle_size = subtitle
            .as_ref()
            .map_or(egui::Vec2::ZERO, |galley| galley.size());
        let content = vec2(
            title.size().x.max(subtitle_size.x),
            title.size().y + subtitle_size.y,
        );
        let size = content + vec2(PADDING, PADDING) * 2.0;

        let mut min = self.anchor + POINTER_OFFSET;
        if min.x + size.x > rect.right() {
            min.x = self.anchor.x - POINTER_OFFSET.x - size.x;
        }
        if min.y + size.y > rect.bottom() {
            min.y = self.anchor.y - POINTER_OFFSET.y - size.y;
        }
        min.x = min.x.max(rect.left());
        min.y = min.y.max(rect.top());

        let frame = Rect::from_min_size(min, size);
        painter.rect(
            frame,
            4.0,
            Color32::from_rgba_unmultiplied(24, 28, 36, 235),
            Stroke::new(1.0, Color32::from_rgb(70, 78, 92)),
            egui::StrokeKind::Inside,
        );

        let text_origin = frame.min + vec2(PADDING, PADDING);
        let title_height = title.size().y;
        painter.galley(text_origin, title, Color32::WHITE);
        if let Some(subtitle) = subtitle {
            painter.galley(
                text_origin + vec2(0.0, title_height),
                subtitle,
                Color32::WHITE,
            );
        }
    }
}

impl HoverSink for TooltipOverlay {
    fn highlight_applied(&mut self, body: &PickableBody) {
        self.group = Some(body.group);
    }

    fn highlight_reverted(&mut self, _body: &PickableBody) {
        self.group = None;
    }

    fn tooltip_show(&mut self, text: &str, at: Vec2) {
        self.visible = true;
        text.clone_into(&mut self.text);
        self.anchor = to_pos2(at);
    }

    fn tooltip_hide(&mut self) {
        self.visible = false;
        self.text.clear();
    }

    fn cursor_changed(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn tooltip_moved(&mut self, at: Vec2) {
        self.anchor = to_pos2(at);
    }
}
