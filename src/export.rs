use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::graph::{EdgeKind, EntityGraph, NodeId};
use crate::layout::{FreezeReason, LayoutConfig, LayoutEngine};

/// Final node placement of a layout run without a window.
#[derive(Debug, Serialize)]
pub struct LayoutSnapshot {
    pub iterations: usize,
    pub stabilized: bool,
    pub hierarchy_edges: usize,
    pub similarity_edges: usize,
    pub nodes: Vec<PlacedNode>,
}

#[derive(Debug, Serialize)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    pub region: &'static str,
    pub group: bool,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

fn node_key(id: NodeId) -> String {
    match id {
        NodeId::Group(region) => format!("group:{}", region.label()),
        NodeId::Entity(id) => id.to_string(),
    }
}

pub fn settle(graph: &EntityGraph, config: LayoutConfig) -> LayoutSnapshot {
    let mut engine = LayoutEngine::new(graph, config);
    let reason = engine.run_to_freeze();
    tracing::debug!(?reason, iterations = engine.iterations(), "headless layout settled");

    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let position = engine.position(index)?;
            Some(PlacedNode {
                id: node_key(node.id()),
                label: node.label.clone(),
                region: node.region().label(),
                group: node.is_group(),
                size: node.size,
                x: position.x,
                y: position.y,
            })
        })
        .collect();

    LayoutSnapshot {
        iterations: engine.iterations(),
        stabilized: reason == FreezeReason::Stabilized,
        hierarchy_edges: graph.edges_of_kind(EdgeKind::Hierarchy).count(),
        similarity_edges: graph.edges_of_kind(EdgeKind::Similarity).count(),
        nodes,
    }
}

pub fn write_snapshot(snapshot: &LayoutSnapshot, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot).context("failed to serialize layout")?;
    writeln!(writer).context("failed to write layout")?;
    Ok(())
}
