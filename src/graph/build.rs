use std::collections::HashMap;

use crate::catalog::{Catalog, Entity};
use crate::encode::{
    GROUP_NODE_SIZE, HIERARCHY_EDGE_ALPHA, SIMILARITY_EDGE_COLOR, SizeScale, entity_color,
    with_alpha,
};
use crate::util::truncate_label;

use super::{EdgeKind, EntityGraph, GraphEdge, GraphNode, LABEL_MAX_CHARS, NodeId, NodeKind};

const SIMILARITY_PEERS: usize = 2;
const HIERARCHY_EDGE_WIDTH: f32 = 2.0;
const SIMILARITY_EDGE_WIDTH: f32 = 1.0;

impl EntityGraph {
    pub fn build(catalog: &Catalog) -> Self {
        let entities = catalog.entities();
        let regions = catalog.present_regions();
        let scale = SizeScale::for_catalog(catalog);

        let node_total = regions.len() + entities.len();
        let mut nodes = Vec::with_capacity(node_total);
        let mut edges = Vec::with_capacity(entities.len() * 2);
        let mut index_by_id = HashMap::with_capacity(node_total);

        for region in regions {
            index_by_id.insert(NodeId::Group(region), nodes.len());
            nodes.push(GraphNode {
                kind: NodeKind::Group(region),
                label: region.label().to_owned(),
                size: GROUP_NODE_SIZE,
                color: region.base_color(),
                border: region.base_color(),
            });
        }

        for entity in entities {
            let entity_index = nodes.len();
            index_by_id.insert(NodeId::Entity(entity.id), entity_index);
            nodes.push(GraphNode {
                kind: NodeKind::Entity(entity.clone()),
                label: truncate_label(&entity.name, LABEL_MAX_CHARS),
                size: scale.size(entity.students),
                color: entity_color(entity.region, entity.faculty),
                border: entity.region.base_color(),
            });

            let group_index = index_by_id[&NodeId::Group(entity.region)];
            edges.push(GraphEdge {
                from: group_index,
                to: entity_index,
                kind: EdgeKind::Hierarchy,
                color: with_alpha(entity.region.base_color(), HIERARCHY_EDGE_ALPHA),
                width: HIERARCHY_EDGE_WIDTH,
                dashed: false,
            });
        }

        for entity in entities {
            for peer in same_group_peers(entities, entity).take(SIMILARITY_PEERS) {
                // Only the lower id emits, so a pair never appears twice.
                if entity.id >= peer.id {
                    continue;
                }

                edges.push(GraphEdge {
                    from: index_by_id[&NodeId::Entity(entity.id)],
                    to: index_by_id[&NodeId::Entity(peer.id)],
                    kind: EdgeKind::Similarity,
                    color: SIMILARITY_EDGE_COLOR,
                    width: SIMILARITY_EDGE_WIDTH,
                    dashed: true,
                });
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "built entity graph"
        );

        Self {
            nodes,
            edges,
            index_by_id,
        }
    }
}

fn same_group_peers<'a>(
    entities: &'a [Entity],
    entity: &'a Entity,
) -> impl Iterator<Item = &'a Entity> + 'a {
    entities
        .iter()
        .filter(move |other| other.region == entity.region && other.id != entity.id)
}
