use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

#[derive(Clone, Copy)]
pub(super) struct RepulsionParams {
    pub(super) strength: f32,
    pub(super) softening: f32,
    pub(super) theta: f32,
}

fn fallback_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn repulsion_between(
    point: Vec2,
    other: Vec2,
    mass_product: f32,
    params: RepulsionParams,
    direction_seed: (usize, usize),
) -> Vec2 {
    let delta = point - other;
    let distance_sq = delta.length_sq();
    let distance = distance_sq.sqrt();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        fallback_direction(direction_seed.0, direction_seed.1)
    };
    direction * (params.strength * mass_product / (distance_sq + params.softening))
}

pub(super) fn accumulate_repulsion_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    masses: &[f32],
    params: RepulsionParams,
    force: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];
    let own_mass = masses[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            *force += repulsion_between(
                point,
                positions[other_index],
                own_mass * masses[other_index],
                params,
                (index, other_index),
            );
        }
        return;
    }

    let delta = point - node.center_of_mass;
    let distance_sq = delta.length_sq().max(0.0001);
    let distance = distance_sq.sqrt();
    let can_approximate =
        !node.bounds.contains(point) && (node.bounds.side_length() / distance) < params.theta;

    if can_approximate {
        let direction = delta / distance;
        *force += direction * (params.strength * own_mass * node.mass)
            / (distance_sq + params.softening);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_repulsion_for_node(child, index, positions, masses, params, force);
    }
}

/// Hooke spring along an edge; positive when stretched beyond `rest_length`.
pub(super) fn spring_force(from: Vec2, to: Vec2, rest_length: f32, constant: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= 0.0001 {
        return Vec2::ZERO;
    }
    delta / distance * ((distance - rest_length) * constant)
}

pub(super) fn central_gravity(position: Vec2, strength: f32) -> Vec2 {
    let distance = position.length();
    if distance <= 0.0001 {
        return Vec2::ZERO;
    }
    -position / distance * strength
}
