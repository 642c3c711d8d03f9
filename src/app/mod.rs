use eframe::egui::{Context, Vec2};

use crate::catalog::{CatalogStats, Region};
use crate::interaction::{Command, Outcome, Visualization};

mod canvas;
mod render_utils;
mod ui;

pub struct UniNetApp {
    model: ViewModel,
}

struct ViewModel {
    viz: Visualization,
    stats: CatalogStats,
    region_choice: Option<Region>,
    search: String,
    pan: Vec2,
    zoom: f32,
}

impl UniNetApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, viz: Visualization, stats: CatalogStats) -> Self {
        Self {
            model: ViewModel::new(viz, stats),
        }
    }
}

impl eframe::App for UniNetApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.model.viz.dispatch(Command::Teardown);
    }
}

impl ViewModel {
    fn new(viz: Visualization, stats: CatalogStats) -> Self {
        Self {
            viz,
            stats,
            region_choice: None,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Single entry point for user events coming from any panel.
    fn send(&mut self, command: Command) -> Outcome {
        let outcome = self.viz.dispatch(command);
        if outcome == Outcome::Reset {
            self.region_choice = None;
            self.search.clear();
        }
        outcome
    }
}
