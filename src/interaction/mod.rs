//! Commands against one mounted visualization: selection, filtering, reset
//! and teardown. Every mutation of the layout state goes through here.

mod filter;

use std::collections::BTreeSet;

use crate::catalog::{Entity, Region};
use crate::graph::{EntityGraph, NodeId};
use crate::layout::{LayoutConfig, LayoutEngine, Phase};

pub use filter::{FilterOutcome, FilterQuery};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Entity(usize),
    Highlight(BTreeSet<usize>),
}

impl Selection {
    pub fn contains(&self, index: usize) -> bool {
        match self {
            Self::None => false,
            Self::Entity(selected) => *selected == index,
            Self::Highlight(indices) => indices.contains(&index),
        }
    }
}

/// Ask the presentation layer to frame exactly these nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportRequest {
    pub nodes: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SelectNode(NodeId),
    ApplyFilter(FilterQuery),
    ClearSelection,
    Reset,
    Teardown,
    Remount,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Selected(Option<Entity>),
    Filtered(FilterOutcome),
    SelectionCleared,
    Reset,
    TornDown,
    Remounted,
}

pub struct Visualization {
    graph: EntityGraph,
    layout_config: LayoutConfig,
    engine: Option<LayoutEngine>,
    selection: Selection,
    filter: FilterQuery,
    last_match_count: Option<usize>,
    pending_viewport: Option<ViewportRequest>,
}

impl Visualization {
    pub fn mount(graph: EntityGraph, layout_config: LayoutConfig) -> Self {
        let engine = LayoutEngine::new(&graph, layout_config);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "mounted visualization"
        );

        Self {
            graph,
            layout_config,
            engine: Some(engine),
            selection: Selection::None,
            filter: FilterQuery::default(),
            last_match_count: None,
            pending_viewport: None,
        }
    }

    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    pub fn layout(&self) -> Option<&LayoutEngine> {
        self.engine.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &FilterQuery {
        &self.filter
    }

    pub fn last_match_count(&self) -> Option<usize> {
        self.last_match_count
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        match self.selection {
            Selection::Entity(index) => self.graph.node(index).and_then(|node| node.entity()),
            _ => None,
        }
    }

    /// With no highlight active every node is emphasized.
    pub fn is_emphasized(&self, index: usize) -> bool {
        match &self.selection {
            Selection::Highlight(indices) => indices.contains(&index),
            _ => true,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::SelectNode(id) => Outcome::Selected(self.select_node(id).cloned()),
            Command::ApplyFilter(query) => {
                Outcome::Filtered(self.apply_filter(query.region, query.search.as_deref()))
            }
            Command::ClearSelection => {
                self.clear_selection();
                Outcome::SelectionCleared
            }
            Command::Reset => {
                self.reset();
                Outcome::Reset
            }
            Command::Teardown => {
                self.teardown();
                Outcome::TornDown
            }
            Command::Remount => {
                self.remount();
                Outcome::Remounted
            }
        }
    }

    /// Group anchors and unknown ids resolve to `None` and leave the
    /// current selection untouched.
    pub fn select_node(&mut self, id: NodeId) -> Option<&Entity> {
        let index = self.graph.index_of(id)?;
        let node = self.graph.node(index)?;
        node.entity()?;

        self.selection = Selection::Entity(index);
        let entity = self.graph.node(index).and_then(|node| node.entity());
        if let Some(entity) = entity {
            tracing::debug!(id = entity.id, name = %entity.name, "selected entity");
        }
        entity
    }

    pub fn apply_filter(&mut self, region: Option<Region>, search: Option<&str>) -> FilterOutcome {
        let query = FilterQuery::new(region, search);
        let outcome = query.evaluate(&self.graph);
        self.filter = query;
        self.last_match_count = Some(outcome.match_count());

        tracing::debug!(
            region = ?self.filter.region,
            search = ?self.filter.search,
            matches = outcome.match_count(),
            "applied filter"
        );

        if outcome.is_empty() {
            return outcome;
        }

        self.selection = Selection::Highlight(outcome.matches.iter().copied().collect());
        if self.engine.is_some() {
            self.pending_viewport = Some(ViewportRequest {
                nodes: outcome.matches.clone(),
            });
        }
        outcome
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn reset(&mut self) {
        self.filter = FilterQuery::default();
        self.selection = Selection::None;
        self.last_match_count = None;
        tracing::debug!("reset filter and selection");
    }

    /// Advances the layout by one batch. Queues a fit-all request on the
    /// step that freezes the layout.
    pub fn tick(&mut self) -> Option<Phase> {
        let engine = self.engine.as_mut()?;
        if engine.is_frozen() {
            return Some(Phase::Frozen);
        }

        let phase = engine.tick();
        if phase == Phase::Frozen && self.pending_viewport.is_none() {
            self.pending_viewport = Some(ViewportRequest {
                nodes: (0..self.graph.node_count()).collect(),
            });
        }
        Some(phase)
    }

    pub fn take_viewport_request(&mut self) -> Option<ViewportRequest> {
        self.pending_viewport.take()
    }

    /// Drops the layout engine. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(engine) = self.engine.take() {
            tracing::info!(iterations = engine.iterations(), "tore down layout engine");
        }
        self.pending_viewport = None;
    }

    /// Tears down and starts a fresh layout for the same graph.
    pub fn remount(&mut self) {
        self.teardown();
        self.engine = Some(LayoutEngine::new(&self.graph, self.layout_config));
        tracing::info!("remounted layout engine");
    }
}

impl Drop for Visualization {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;

    fn mounted() -> Visualization {
        Visualization::mount(EntityGraph::build(&Catalog::sample()), LayoutConfig::default())
    }

    fn matched_ids(viz: &Visualization, outcome: &FilterOutcome) -> Vec<u32> {
        outcome
            .matches
            .iter()
            .filter_map(|&index| viz.graph().node(index)?.entity().map(|entity| entity.id))
            .collect()
    }

    #[test]
    fn selecting_an_entity_surfaces_its_record() {
        let mut viz = mounted();
        let entity = viz.select_node(NodeId::Entity(12)).cloned().unwrap();

        assert_eq!(entity.name, "Hue University");
        assert_eq!(entity.region, Region::Central);
        assert_eq!(entity.students, 35_000);
        assert_eq!(entity.faculty, 1_800);
        assert_eq!(entity.founded, 1957);
        assert_eq!(entity.kind, "Public");

        let index = viz.graph().index_of(NodeId::Entity(12)).unwrap();
        assert_eq!(viz.selection(), &Selection::Entity(index));
        assert_eq!(viz.selected_entity().map(|e| e.id), Some(12));
    }

    #[test]
    fn group_nodes_are_not_selectable() {
        let mut viz = mounted();
        viz.select_node(NodeId::Entity(3));
        let before = viz.selection().clone();

        assert!(viz.select_node(NodeId::Group(Region::North)).is_none());
        assert_eq!(viz.selection(), &before);
    }

    #[test]
    fn unknown_node_is_a_miss() {
        let mut viz = mounted();
        assert!(viz.select_node(NodeId::Entity(10)).is_none());
        assert_eq!(viz.selection(), &Selection::None);
    }

    #[test]
    fn region_and_search_filter() {
        let mut viz = mounted();
        let outcome = viz.apply_filter(Some(Region::North), Some("Hanoi"));

        assert_eq!(matched_ids(&viz, &outcome), vec![1, 2, 3, 5, 8]);
        for &index in &outcome.matches {
            let entity = viz.graph().node(index).unwrap().entity().unwrap();
            assert_eq!(entity.region, Region::North);
            assert!(entity.name.to_lowercase().contains("hanoi"));
        }

        let expected: BTreeSet<usize> = outcome.matches.iter().copied().collect();
        assert_eq!(viz.selection(), &Selection::Highlight(expected));
        assert_eq!(
            viz.take_viewport_request(),
            Some(ViewportRequest {
                nodes: outcome.matches.clone()
            })
        );
        assert_eq!(viz.last_match_count(), Some(5));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut viz = mounted();
        let outcome = viz.apply_filter(None, Some("hcmc"));
        assert_eq!(matched_ids(&viz, &outcome), vec![21, 22, 23, 24, 26]);
    }

    #[test]
    fn empty_filter_result_keeps_view() {
        let mut viz = mounted();
        viz.select_node(NodeId::Entity(5));
        let before = viz.selection().clone();

        let outcome = viz.apply_filter(Some(Region::North), Some("zzz"));

        assert!(outcome.is_empty());
        assert_eq!(viz.take_viewport_request(), None);
        assert_eq!(viz.selection(), &before);
        assert_eq!(viz.last_match_count(), Some(0));
    }

    #[test]
    fn region_only_filter_matches_every_member() {
        let mut viz = mounted();
        let outcome = viz.apply_filter(Some(Region::Central), None);
        assert_eq!(
            matched_ids(&viz, &outcome),
            vec![11, 12, 13, 14, 15, 16, 17, 18]
        );
    }

    #[test]
    fn reset_clears_state_without_rebuilding() {
        let mut viz = mounted();
        let nodes_before = viz.graph().nodes().as_ptr();
        let edges_before = viz.graph().edges().to_vec();

        viz.apply_filter(Some(Region::South), Some("university"));
        assert!(!viz.is_emphasized(viz.graph().index_of(NodeId::Entity(1)).unwrap()));

        viz.reset();

        assert_eq!(viz.selection(), &Selection::None);
        assert_eq!(viz.filter(), &FilterQuery::default());
        assert_eq!(viz.last_match_count(), None);
        assert!((0..viz.graph().node_count()).all(|index| viz.is_emphasized(index)));
        assert!(std::ptr::eq(viz.graph().nodes().as_ptr(), nodes_before));
        assert_eq!(viz.graph().edges(), edges_before.as_slice());
        assert!(viz.is_mounted());
    }

    #[test]
    fn reset_keeps_layout_progress() {
        let mut viz = mounted();
        viz.tick();
        let iterations = viz.layout().unwrap().iterations();
        viz.reset();
        assert_eq!(viz.layout().unwrap().iterations(), iterations);
    }

    #[test]
    fn freezing_requests_a_fit_of_every_node() {
        let config = LayoutConfig {
            max_iterations: 2,
            min_velocity: 0.0,
            ..LayoutConfig::default()
        };
        let mut viz = Visualization::mount(EntityGraph::build(&Catalog::sample()), config);

        assert_eq!(viz.tick(), Some(Phase::Frozen));
        let request = viz.take_viewport_request().unwrap();
        assert_eq!(request.nodes.len(), viz.graph().node_count());

        assert_eq!(viz.tick(), Some(Phase::Frozen));
        assert_eq!(viz.take_viewport_request(), None);
    }

    #[test]
    fn teardown_stops_the_layout() {
        let mut viz = mounted();
        viz.teardown();
        viz.teardown();

        assert!(!viz.is_mounted());
        assert_eq!(viz.tick(), None);

        let outcome = viz.apply_filter(Some(Region::North), Some("Hanoi"));
        assert_eq!(outcome.match_count(), 5);
        assert_eq!(viz.take_viewport_request(), None);
    }

    #[test]
    fn remount_starts_a_fresh_layout() {
        let mut viz = mounted();
        viz.tick();
        viz.remount();
        let layout = viz.layout().unwrap();
        assert_eq!(layout.iterations(), 0);
        assert_eq!(layout.phase(), Phase::Running);
    }

    #[test]
    fn commands_route_through_dispatch() {
        let mut viz = mounted();

        let selected = viz.dispatch(Command::SelectNode(NodeId::Entity(21)));
        assert!(matches!(selected, Outcome::Selected(Some(ref e)) if e.id == 21));

        let filtered = viz.dispatch(Command::ApplyFilter(FilterQuery::new(
            Some(Region::North),
            Some("zzz"),
        )));
        assert!(matches!(filtered, Outcome::Filtered(ref o) if o.is_empty()));

        assert_eq!(viz.dispatch(Command::ClearSelection), Outcome::SelectionCleared);
        assert_eq!(viz.selection(), &Selection::None);
        assert_eq!(viz.dispatch(Command::Reset), Outcome::Reset);
        assert_eq!(viz.dispatch(Command::Teardown), Outcome::TornDown);
        assert!(!viz.is_mounted());
        assert_eq!(viz.dispatch(Command::Remount), Outcome::Remounted);
        assert_eq!(viz.layout().map(LayoutEngine::iterations), Some(0));
    }
}
