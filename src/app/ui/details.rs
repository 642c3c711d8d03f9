use eframe::egui::{Grid, RichText, Ui};

use crate::interaction::{Command, Selection};
use crate::util::format_count;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("University Details");
            if self.viz.selected_entity().is_some() && ui.small_button("×").clicked() {
                self.send(Command::ClearSelection);
            }
        });
        ui.add_space(6.0);

        if let Selection::Highlight(indices) = self.viz.selection() {
            ui.label(format!(
                "{} universities highlighted by the current filter.",
                indices.len()
            ));
            ui.small("Click a node to inspect it.");
            return;
        }

        let Some(entity) = self.viz.selected_entity() else {
            ui.label("Select a university in the graph.");
            return;
        };

        ui.label(RichText::new(entity.name.as_str()).strong());
        ui.add_space(6.0);

        Grid::new("entity_attributes")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Region");
                ui.label(entity.region.label());
                ui.end_row();

                ui.label("Students");
                ui.label(format_count(u64::from(entity.students)));
                ui.end_row();

                ui.label("Faculty");
                ui.label(format_count(u64::from(entity.faculty)));
                ui.end_row();

                ui.label("Founded");
                ui.label(entity.founded.to_string());
                ui.end_row();

                ui.label("Type");
                ui.label(entity.kind.as_str());
                ui.end_row();
            });
    }
}
