mod build;

use std::collections::HashMap;

use eframe::egui::Color32;

use crate::catalog::{Entity, Region};

pub const LABEL_MAX_CHARS: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Group(Region),
    Entity(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group(Region),
    Entity(Entity),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub kind: NodeKind,
    pub label: String,
    pub size: f32,
    pub color: Color32,
    pub border: Color32,
}

impl GraphNode {
    pub fn id(&self) -> NodeId {
        match &self.kind {
            NodeKind::Group(region) => NodeId::Group(*region),
            NodeKind::Entity(entity) => NodeId::Entity(entity.id),
        }
    }

    pub fn region(&self) -> Region {
        match &self.kind {
            NodeKind::Group(region) => *region,
            NodeKind::Entity(entity) => entity.region,
        }
    }

    pub fn entity(&self) -> Option<&Entity> {
        match &self.kind {
            NodeKind::Entity(entity) => Some(entity),
            NodeKind::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Hierarchy,
    Similarity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
    pub color: Color32,
    pub width: f32,
    pub dashed: bool,
}

/// Read-only node/edge set produced once per catalog load.
#[derive(Clone, Debug)]
pub struct EntityGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index_by_id: HashMap<NodeId, usize>,
}

impl EntityGraph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn entity_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_group())
            .map(|(index, _)| index)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }
}
