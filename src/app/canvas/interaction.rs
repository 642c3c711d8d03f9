use eframe::egui::{self, Pos2, Rect, Ui};

use crate::layout::WorldBounds;

use super::super::ViewModel;
use super::super::render_utils::{MAX_ZOOM, MIN_ZOOM, fit_view, screen_to_world};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
            || response.dragged_by(egui::PointerButton::Primary)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_index(
        pointer: Option<Pos2>,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = pointer?;
        screen_positions
            .iter()
            .zip(screen_radii.iter())
            .enumerate()
            .filter_map(|(index, (position, radius))| {
                let distance = position.distance(pointer);
                (distance <= *radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn fit_to(&mut self, rect: Rect, bounds: WorldBounds) {
        let (pan, zoom) = fit_view(rect, bounds);
        self.pan = pan;
        self.zoom = zoom;
    }

    /// Fulfils the controller's pending viewport request, if any.
    pub(in crate::app) fn apply_viewport_request(&mut self, rect: Rect) {
        let Some(request) = self.viz.take_viewport_request() else {
            return;
        };

        let bounds = self
            .viz
            .layout()
            .and_then(|layout| layout.bounds_of(request.nodes.iter().copied()));
        match bounds {
            Some(bounds) => self.fit_to(rect, bounds),
            None => tracing::warn!(
                nodes = request.nodes.len(),
                "viewport request had no positioned nodes"
            ),
        }
    }
}
