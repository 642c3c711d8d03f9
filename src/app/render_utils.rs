use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::layout::WorldBounds;

const FIT_MARGIN: f32 = 0.9;
pub(super) const MIN_ZOOM: f32 = 0.05;
pub(super) const MAX_ZOOM: f32 = 6.0;

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

/// Fades toward the canvas background for nodes outside the active highlight.
pub(super) fn fade_color(color: Color32) -> Color32 {
    blend_color(color, Color32::from_rgb(236, 239, 243), 0.78)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(248, 249, 251));

    let step = (80.0 * zoom.clamp(0.6, 1.8)).max(24.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(200, 206, 214, 90));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

/// Pan and zoom that frame `bounds` inside `viewport`.
pub(super) fn fit_view(viewport: Rect, bounds: WorldBounds) -> (Vec2, f32) {
    let size = bounds.size();
    let zoom_x = viewport.width() / size.x.max(1.0);
    let zoom_y = viewport.height() / size.y.max(1.0);
    let zoom = (zoom_x.min(zoom_y) * FIT_MARGIN).clamp(MIN_ZOOM, MAX_ZOOM);
    (-bounds.center() * zoom, zoom)
}
