use eframe::egui::{self, Align, Context, Layout, RichText};

use crate::interaction::Command;
use crate::layout::{FreezeReason, Phase};
use crate::util::format_count;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Vietnam Universities Network");
                    ui.separator();
                    ui.label(format!("universities: {}", self.stats.total));
                    ui.label(format!(
                        "total students: {}",
                        format_count(self.stats.total_students)
                    ));
                    ui.label(format!(
                        "avg students: {}",
                        format_count(self.stats.avg_students)
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let label = if self.viz.is_mounted() {
                            "Rebuild layout"
                        } else {
                            "Start layout"
                        };
                        if ui.button(label).clicked() {
                            self.send(Command::Remount);
                        }
                        ui.label(self.layout_status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn layout_status_text(&self) -> RichText {
        let Some(layout) = self.viz.layout() else {
            return RichText::new("layout: released").weak();
        };

        let iterations = layout.iterations();
        match (layout.phase(), layout.freeze_reason()) {
            (Phase::Running, _) => RichText::new(format!("layout: running ({iterations} steps)")),
            (Phase::Frozen, Some(FreezeReason::IterationCap)) => {
                RichText::new(format!("layout: frozen at cap ({iterations} steps)"))
            }
            (Phase::Frozen, _) => {
                RichText::new(format!("layout: stabilized ({iterations} steps)")).strong()
            }
        }
    }
}
