use cograph::palette::Rgba;
use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::Vec2;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(14, 17, 23);

pub(super) fn color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub(super) fn to_pos2(point: Vec2) -> Pos2 {
    Pos2::new(point.x, point.y)
}

pub(super) fn to_vec2(pos: Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

/// Fades farther bodies into the background.
pub(super) fn depth_shade(color: Color32, depth_fraction: f32) -> Color32 {
    blend_color(color, BACKGROUND, depth_fraction * 0.55)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let center = rect.center();
    let max_radius = rect.width().min(rect.height()) * 0.48;
    for ring in 1..=4 {
        painter.circle_stroke(
            center,
            max_radius * ring as f32 / 4.0,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 28)),
        );
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

/// Screen pixel to normalized device coordinates, y up.
pub(super) fn screen_to_ndc(rect: Rect, screen: Pos2) -> Vec2 {
    let x = (screen.x - rect.left()) / rect.width().max(1.0);
    let y = (screen.y - rect.top()) / rect.height().max(1.0);
    Vec2::new(x * 2.0 - 1.0, 1.0 - y * 2.0)
}

pub(super) fn ndc_to_screen(rect: Rect, ndc: Vec2) -> Pos2 {
    Pos2::new(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_max(Pos2::new(100.0, 50.0), Pos2::new(900.0, 650.0))
    }

    #[test]
    fn canvas_corners_map_to_ndc_corners() {
        let rect = canvas();
        assert_eq!(screen_to_ndc(rect, rect.left_top()), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(rect, rect.right_bottom()), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc(rect, rect.center()), Vec2::ZERO);
    }

    #[test]
    fn ndc_conversion_is_inverse() {
        let rect = canvas();
        let pointer = Pos2::new(321.0, 123.0);
        let back = ndc_to_screen(rect, screen_to_ndc(rect, pointer));
        assert!((back - pointer).length() < 1e-3);
    }

    #[test]
    fn edges_crossing_the_canvas_stay_visible() {
        let rect = canvas();
        let crossing = edge_visible(rect, Pos2::new(0.0, 300.0), Pos2::new(1000.0, 300.0), 2.0);
        let outside = edge_visible(rect, Pos2::new(0.0, 0.0), Pos2::new(50.0, 20.0), 2.0);
        assert!(crossing);
        assert!(!outside);
        assert!(circle_visible(rect, Pos2::new(95.0, 60.0), 10.0));
        assert!(!circle_visible(rect, Pos2::new(80.0, 60.0), 10.0));
    }

    #[test]
    fn library_colors_keep_straight_alpha() {
        let color = color32(Rgba::rgba(156, 170, 190, 150));
        assert_eq!(color.a(), 150);
        assert_eq!(color32(Rgba::WHITE), Color32::WHITE);
        assert_eq!(to_vec2(to_pos2(Vec2::new(3.0, -4.0))), Vec2::new(3.0, -4.0));
    }
}
