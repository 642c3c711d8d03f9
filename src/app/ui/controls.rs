use eframe::egui::{self, RichText, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::catalog::Region;
use crate::graph::EntityGraph;
use crate::interaction::{Command, FilterQuery};

use super::super::ViewModel;

const MAX_SUGGESTIONS: usize = 5;

/// Best fuzzy name matches for the search box, highest score first.
fn name_suggestions(graph: &EntityGraph, query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored = graph
        .nodes()
        .iter()
        .filter_map(|node| node.entity())
        .filter_map(|entity| {
            matcher
                .fuzzy_match(&entity.name, query)
                .map(|score| (score, entity.name.as_str()))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_owned())
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Region");
        let selected_text = self.region_choice.map_or("All Regions", Region::label);
        egui::ComboBox::from_id_salt("region_filter")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.region_choice, None, "All Regions");
                for region in Region::ALL {
                    ui.selectable_value(&mut self.region_choice, Some(region), region.label());
                }
            });

        ui.add_space(6.0);
        ui.label("Search");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Case-insensitive match against university names.");

        let suggestions = name_suggestions(self.viz.graph(), &self.search, MAX_SUGGESTIONS);
        let exact = suggestions.len() == 1 && suggestions[0] == self.search;
        if !suggestions.is_empty() && !exact {
            ui.add_space(2.0);
            for name in suggestions {
                if ui.small_button(name.as_str()).clicked() {
                    self.search = name;
                }
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                let query = FilterQuery::new(self.region_choice, Some(&self.search));
                self.send(Command::ApplyFilter(query));
            }
            if ui.button("Reset").clicked() {
                self.send(Command::Reset);
            }
        });

        match self.viz.last_match_count() {
            Some(0) => {
                ui.label(RichText::new("No universities match this filter.").weak());
            }
            Some(count) => {
                ui.label(format!("{count} matching universities highlighted"));
            }
            None => {}
        }

        let applied = self.viz.filter();
        if applied.region.is_some() || applied.search.is_some() {
            let region = applied.region.map_or("any region", |region| region.label());
            let search = applied.search.as_deref().unwrap_or("any name");
            ui.small(format!("Applied: {region}, {search}"));
        }

        ui.separator();
        self.draw_legend(ui);
    }

    fn draw_legend(&self, ui: &mut Ui) {
        ui.label(RichText::new("Legend").strong());
        for (region, count) in self.stats.per_region {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 3.0, region.base_color());
                ui.label(format!("{region} Region ({count})"));
            });
        }
        ui.add_space(4.0);
        ui.small("Node size: students. Fill intensity: faculty.");
        ui.small("Dashed edges link universities in the same region.");
    }
}
