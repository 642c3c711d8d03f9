use crate::catalog::Region;
use crate::graph::EntityGraph;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub region: Option<Region>,
    pub search: Option<String>,
}

impl FilterQuery {
    /// Blank search text counts as no search; anything else is matched
    /// exactly as typed, surrounding whitespace included.
    pub fn new(region: Option<Region>, search: Option<&str>) -> Self {
        let search = search
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned);
        Self { region, search }
    }

    pub(super) fn evaluate(&self, graph: &EntityGraph) -> FilterOutcome {
        let needle = self.search.as_deref().map(str::to_lowercase);

        let matches = graph
            .entity_indices()
            .filter(|&index| {
                let Some(entity) = graph.node(index).and_then(|node| node.entity()) else {
                    return false;
                };
                if self.region.is_some_and(|region| region != entity.region) {
                    return false;
                }
                needle
                    .as_deref()
                    .is_none_or(|needle| entity.name.to_lowercase().contains(needle))
            })
            .collect();

        FilterOutcome { matches }
    }
}

/// Entity node indices in graph order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub matches: Vec<usize>,
}

impl FilterOutcome {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn blank_search_is_dropped() {
        assert_eq!(FilterQuery::new(None, Some("   ")), FilterQuery::default());
        assert_eq!(FilterQuery::new(None, Some("")), FilterQuery::default());
        assert_eq!(
            FilterQuery::new(Some(Region::South), Some(" Can ")).search.as_deref(),
            Some(" Can ")
        );
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_search() {
        let graph = EntityGraph::build(&Catalog::sample());
        let name_of = |index: usize| graph.nodes()[index].label.clone();

        let leading = FilterQuery::new(None, Some(" University")).evaluate(&graph);
        assert_eq!(leading.match_count(), 24);
        let names = leading.matches.iter().map(|&i| name_of(i)).collect::<Vec<_>>();
        assert!(!names.iter().any(|name| name == "University of Da Nang"));

        let trailing = FilterQuery::new(None, Some("Hanoi ")).evaluate(&graph);
        let ids = trailing
            .matches
            .iter()
            .filter_map(|&i| graph.nodes()[i].entity().map(|entity| entity.id))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 3, 5, 8]);
    }

    #[test]
    fn unrestricted_query_matches_every_entity() {
        let graph = EntityGraph::build(&Catalog::sample());
        let outcome = FilterQuery::default().evaluate(&graph);
        assert_eq!(outcome.match_count(), 26);
        assert!(outcome.matches.iter().all(|&i| !graph.nodes()[i].is_group()));
    }

    #[test]
    fn group_labels_never_match() {
        let graph = EntityGraph::build(&Catalog::sample());
        let outcome = FilterQuery::new(None, Some("North")).evaluate(&graph);
        assert!(outcome.is_empty());
    }
}
