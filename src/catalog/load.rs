use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Catalog, CatalogError, Entity, Region};

#[derive(Clone, Debug, Deserialize)]
struct RawEntity {
    id: u32,
    name: String,
    region: String,
    students: u32,
    faculty: u32,
    founded: i32,
    #[serde(rename = "type")]
    kind: String,
}

impl RawEntity {
    fn into_entity(self) -> Result<Entity, CatalogError> {
        let region = self
            .region
            .parse::<Region>()
            .map_err(|()| CatalogError::UnknownGroup {
                id: self.id,
                group: self.region.clone(),
            })?;

        Ok(Entity {
            id: self.id,
            name: self.name,
            region,
            students: self.students,
            faculty: self.faculty,
            founded: self.founded,
            kind: self.kind,
        })
    }
}

pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    let records: Vec<RawEntity> =
        serde_json::from_str(raw).context("catalog must be a JSON array of entity records")?;

    let entities = records
        .into_iter()
        .map(RawEntity::into_entity)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(entities)?)
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("invalid catalog in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_order() {
        let catalog = parse_catalog(
            r#"[
                {"id": 7, "name": "Vinh University", "region": "Central", "students": 28000, "faculty": 1300, "founded": 1959, "type": "Public"},
                {"id": 3, "name": "Hanoi University", "region": "North", "students": 25000, "faculty": 1200, "founded": 1959, "type": "Public"}
            ]"#,
        )
        .unwrap();

        let ids = catalog.entities().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(catalog.entities()[1].region, Region::North);
        assert_eq!(catalog.entities()[0].kind, "Public");
    }

    #[test]
    fn unknown_region_is_a_typed_error() {
        let error = parse_catalog(
            r#"[{"id": 1, "name": "X", "region": "Highlands", "students": 100, "faculty": 10, "founded": 2001, "type": "Private"}]"#,
        )
        .unwrap_err();
        assert_eq!(
            error.downcast_ref::<CatalogError>(),
            Some(&CatalogError::UnknownGroup {
                id: 1,
                group: "Highlands".to_owned()
            })
        );
    }

    #[test]
    fn duplicate_ids_fail_the_whole_load() {
        let error = parse_catalog(
            r#"[
                {"id": 1, "name": "A", "region": "North", "students": 100, "faculty": 10, "founded": 2001, "type": "Public"},
                {"id": 1, "name": "B", "region": "South", "students": 200, "faculty": 20, "founded": 1990, "type": "Public"}
            ]"#,
        )
        .unwrap_err();
        assert_eq!(
            error.downcast_ref::<CatalogError>(),
            Some(&CatalogError::DuplicateId(1))
        );
    }

    #[test]
    fn missing_attribute_fails_the_load() {
        let error = parse_catalog(
            r#"[{"id": 4, "name": "Hue University", "region": "Central", "students": 35000, "founded": 1957, "type": "Public"}]"#,
        )
        .unwrap_err();
        assert!(error.downcast_ref::<CatalogError>().is_none());
        assert!(format!("{error:#}").contains("faculty"));
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(parse_catalog(r#"{"id": 1}"#).is_err());
    }
}
