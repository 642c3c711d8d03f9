//! Force-directed placement for an [`EntityGraph`].
//!
//! The engine runs a Barnes-Hut simulation until either the largest node
//! speed drops under `min_velocity` or `max_iterations` steps have run, then
//! freezes. A frozen engine never moves a node again; callers that want a new
//! layout build a new engine.

mod forces;
mod quadtree;

use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::graph::EntityGraph;
use crate::util::stable_pair;

use forces::{RepulsionParams, accumulate_repulsion_for_node, central_gravity, spring_force};
use quadtree::QuadNode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Negative values repel.
    pub gravitational_constant: f32,
    pub central_gravity: f32,
    pub spring_length: f32,
    pub spring_constant: f32,
    pub damping: f32,
    pub timestep: f32,
    pub max_velocity: f32,
    pub min_velocity: f32,
    pub theta: f32,
    pub max_iterations: usize,
    pub iterations_per_tick: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: -2_000.0,
            central_gravity: 0.3,
            spring_length: 200.0,
            spring_constant: 0.04,
            damping: 0.09,
            timestep: 0.5,
            max_velocity: 50.0,
            min_velocity: 0.1,
            theta: 0.5,
            max_iterations: 1_000,
            iterations_per_tick: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreezeReason {
    Stabilized,
    IterationCap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

struct Body {
    position: Vec2,
    velocity: Vec2,
    mass: f32,
    radius: f32,
}

#[derive(Default)]
struct Scratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    masses: Vec<f32>,
}

pub struct LayoutEngine {
    config: LayoutConfig,
    bodies: Vec<Body>,
    springs: Vec<(usize, usize)>,
    phase: Phase,
    freeze_reason: Option<FreezeReason>,
    iterations: usize,
    scratch: Scratch,
}

impl LayoutEngine {
    pub fn new(graph: &EntityGraph, config: LayoutConfig) -> Self {
        let n = graph.node_count();
        let ring_radius = (n as f32).sqrt() * config.spring_length * 0.5;
        let jitter = config.spring_length * 0.25;

        let bodies = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let angle = (index as f32 / n.max(1) as f32) * TAU;
                let (jx, jy) = stable_pair(&node.id());
                Body {
                    position: vec2(angle.cos(), angle.sin()) * ring_radius
                        + vec2(jx, jy) * jitter,
                    velocity: Vec2::ZERO,
                    mass: 1.0,
                    radius: node.size,
                }
            })
            .collect();

        let springs = graph
            .edges()
            .iter()
            .filter(|edge| edge.from != edge.to && edge.from < n && edge.to < n)
            .map(|edge| (edge.from, edge.to))
            .collect();

        Self {
            config,
            bodies,
            springs,
            phase: Phase::Running,
            freeze_reason: None,
            iterations: 0,
            scratch: Scratch::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_frozen(&self) -> bool {
        self.phase == Phase::Frozen
    }

    pub fn freeze_reason(&self) -> Option<FreezeReason> {
        self.freeze_reason
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Positions are only settled once [`Phase::Frozen`] is reached.
    pub fn positions(&self) -> Vec<Vec2> {
        self.bodies.iter().map(|body| body.position).collect()
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.get(index).map(|body| body.position)
    }

    /// Bounding box of the given nodes, padded by each node's size.
    pub fn bounds_of(&self, indices: impl IntoIterator<Item = usize>) -> Option<WorldBounds> {
        let mut bounds: Option<WorldBounds> = None;
        for body in indices.into_iter().filter_map(|index| self.bodies.get(index)) {
            let pad = vec2(body.radius, body.radius);
            let min = body.position - pad;
            let max = body.position + pad;
            bounds = Some(match bounds {
                Some(current) => WorldBounds {
                    min: current.min.min(min),
                    max: current.max.max(max),
                },
                None => WorldBounds { min, max },
            });
        }
        bounds
    }

    /// Runs up to `iterations_per_tick` steps, then hands control back.
    pub fn tick(&mut self) -> Phase {
        for _ in 0..self.config.iterations_per_tick.max(1) {
            if self.step() == Phase::Frozen {
                break;
            }
        }
        self.phase
    }

    pub fn run_to_freeze(&mut self) -> FreezeReason {
        loop {
            self.step();
            if let Some(reason) = self.freeze_reason {
                return reason;
            }
        }
    }

    pub fn step(&mut self) -> Phase {
        if self.phase == Phase::Frozen {
            return Phase::Frozen;
        }

        let node_count = self.bodies.len();
        if node_count < 2 {
            self.freeze(FreezeReason::Stabilized);
            return self.phase;
        }
        if self.iterations >= self.config.max_iterations {
            self.freeze(FreezeReason::IterationCap);
            return self.phase;
        }

        self.accumulate_forces();
        let max_speed = self.integrate();
        self.iterations += 1;

        if max_speed < self.config.min_velocity {
            self.freeze(FreezeReason::Stabilized);
        } else if self.iterations >= self.config.max_iterations {
            self.freeze(FreezeReason::IterationCap);
        }

        self.phase
    }

    fn accumulate_forces(&mut self) {
        let node_count = self.bodies.len();
        let scratch = &mut self.scratch;
        scratch.forces.clear();
        scratch.forces.resize(node_count, Vec2::ZERO);
        scratch.positions.clear();
        scratch.masses.clear();
        for body in &self.bodies {
            scratch.positions.push(body.position);
            scratch.masses.push(body.mass);
        }

        let forces = &mut scratch.forces;
        let positions = &scratch.positions;
        let masses = &scratch.masses;

        let params = RepulsionParams {
            strength: (-self.config.gravitational_constant).max(0.0),
            softening: 1.0,
            theta: self.config.theta,
        };
        if params.strength > 0.0
            && let Some(tree) = QuadNode::build(positions, masses)
        {
            for (index, force) in forces.iter_mut().enumerate() {
                accumulate_repulsion_for_node(&tree, index, positions, masses, params, force);
            }
        }

        for &(from, to) in &self.springs {
            let pull = spring_force(
                positions[from],
                positions[to],
                self.config.spring_length,
                self.config.spring_constant,
            );
            forces[from] += pull;
            forces[to] -= pull;
        }

        for (force, &position) in forces.iter_mut().zip(positions.iter()) {
            *force += central_gravity(position, self.config.central_gravity);
        }
    }

    fn integrate(&mut self) -> f32 {
        let timestep = self.config.timestep;
        let max_velocity = self.config.max_velocity;
        let mut max_speed = 0.0_f32;

        for (body, force) in self.bodies.iter_mut().zip(self.scratch.forces.iter()) {
            let acceleration = (*force - body.velocity * self.config.damping) / body.mass;
            let mut velocity = body.velocity + acceleration * timestep;
            let speed = velocity.length();
            if speed > max_velocity {
                velocity *= max_velocity / speed;
            }

            body.velocity = velocity;
            body.position += velocity * timestep;
            max_speed = max_speed.max(velocity.length());
        }

        max_speed
    }

    fn freeze(&mut self, reason: FreezeReason) {
        for body in &mut self.bodies {
            body.velocity = Vec2::ZERO;
        }
        self.phase = Phase::Frozen;
        self.freeze_reason = Some(reason);

        match reason {
            FreezeReason::Stabilized => tracing::info!(
                iterations = self.iterations,
                "layout stabilized, physics disabled"
            ),
            FreezeReason::IterationCap => tracing::debug!(
                iterations = self.iterations,
                "layout hit iteration cap before stabilizing, freezing anyway"
            ),
        }
    }
}
