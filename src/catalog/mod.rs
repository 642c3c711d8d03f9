mod load;
mod sample;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use eframe::egui::Color32;
use thiserror::Error;

pub use load::{load_catalog, parse_catalog};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("entity id {0} appears more than once")]
    DuplicateId(u32),
    #[error("entity ids must be positive (found 0 for {name:?})")]
    NonPositiveId { name: String },
    #[error("entity {id} has unknown group {group:?}")]
    UnknownGroup { id: u32, group: String },
}

/// Geographic partition of the catalog. Declaration order is the order in
/// which group anchors are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    North,
    Central,
    South,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::North, Region::Central, Region::South];

    pub fn label(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::Central => "Central",
            Self::South => "South",
        }
    }

    pub fn base_color(self) -> Color32 {
        match self {
            Self::North => Color32::from_rgb(0xe7, 0x4c, 0x3c),
            Self::Central => Color32::from_rgb(0x34, 0x98, 0xdb),
            Self::South => Color32::from_rgb(0x27, 0xae, 0x60),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.label() == value)
            .ok_or(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    pub region: Region,
    pub students: u32,
    pub faculty: u32,
    pub founded: i32,
    pub kind: String,
}

/// Validated, ordered entity table. Row order is significant: it drives node
/// order and similarity peer selection.
#[derive(Clone, Debug)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn new(entities: Vec<Entity>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if entity.id == 0 {
                return Err(CatalogError::NonPositiveId {
                    name: entity.name.clone(),
                });
            }
            if !seen.insert(entity.id) {
                return Err(CatalogError::DuplicateId(entity.id));
            }
        }

        Ok(Self { entities })
    }

    pub fn sample() -> Self {
        Self {
            entities: sample::sample_entities(),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Regions that have at least one entity, in enumeration order.
    pub fn present_regions(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|region| self.entities.iter().any(|entity| entity.region == *region))
            .collect()
    }

    pub fn max_students(&self) -> u32 {
        self.entities
            .iter()
            .map(|entity| entity.students)
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> CatalogStats {
        let total = self.entities.len();
        let total_students = self
            .entities
            .iter()
            .map(|entity| u64::from(entity.students))
            .sum::<u64>();
        let avg_students = if total == 0 {
            0
        } else {
            (total_students as f64 / total as f64).round() as u64
        };

        let per_region = Region::ALL.map(|region| {
            let count = self
                .entities
                .iter()
                .filter(|entity| entity.region == region)
                .count();
            (region, count)
        });

        CatalogStats {
            total,
            total_students,
            avg_students,
            per_region,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub total_students: u64,
    pub avg_students: u64,
    pub per_region: [(Region, usize); 3],
}

#[cfg(test)]
pub(crate) fn entity(id: u32, name: &str, region: Region, students: u32, faculty: u32) -> Entity {
    Entity {
        id,
        name: name.to_owned(),
        region,
        students,
        faculty,
        founded: 1956,
        kind: "Public".to_owned(),
    }
}
