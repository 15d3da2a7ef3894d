use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        branches::{BranchEntity, BranchImageEntity, EditBranchEntity, InsertBranchEntity},
        dishes::DishEntity,
    },
    value_objects::{dishes::DishDto, events::EventDto},
};

pub const DEFAULT_TOTAL_TABLES: i32 = 20;

/// Rejects, never clamps, a table pair outside `0 <= available <= total`.
pub fn validate_table_counts(total_tables: i32, available_tables: i32) -> Result<()> {
    if total_tables < 0 {
        bail!("total tables must not be negative");
    }
    if available_tables < 0 {
        bail!("available tables must not be negative");
    }
    if available_tables > total_tables {
        bail!("available tables ({available_tables}) cannot exceed total tables ({total_tables})");
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchModel {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_tables: Option<i32>,
    #[serde(default)]
    pub available_tables: Option<i32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub dish_ids: Vec<Uuid>,
}

impl BranchModel {
    fn validate_fields(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("branch name is required");
        }
        if self.address.trim().is_empty() {
            bail!("branch address is required");
        }
        Ok(())
    }

    /// New branches start with every table free.
    pub fn to_insert_entity(&self) -> Result<InsertBranchEntity> {
        self.validate_fields()?;
        let total_tables = self.total_tables.unwrap_or(DEFAULT_TOTAL_TABLES);
        let available_tables = self.available_tables.unwrap_or(total_tables);
        validate_table_counts(total_tables, available_tables)?;

        Ok(InsertBranchEntity {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            opening_hours: self.opening_hours.clone(),
            description: self.description.clone(),
            total_tables,
            available_tables,
        })
    }

    /// Missing counts keep the current values of `existing`.
    pub fn to_edit_entity(&self, existing: &BranchEntity) -> Result<EditBranchEntity> {
        self.validate_fields()?;
        let total_tables = self.total_tables.unwrap_or(existing.total_tables);
        let available_tables = self.available_tables.unwrap_or(existing.available_tables);
        validate_table_counts(total_tables, available_tables)?;

        Ok(EditBranchEntity {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            opening_hours: self.opening_hours.clone(),
            description: self.description.clone(),
            total_tables,
            available_tables,
        })
    }

    pub fn gallery(&self, branch_id: Uuid) -> Vec<BranchImageEntity> {
        self.images
            .iter()
            .filter(|url| !url.trim().is_empty())
            .enumerate()
            .map(|(position, url)| BranchImageEntity {
                id: Uuid::new_v4(),
                branch_id,
                url: url.trim().to_string(),
                position: position as i32,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub total_tables: i32,
    pub available_tables: i32,
}

impl From<BranchEntity> for BranchDto {
    fn from(value: BranchEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            phone: value.phone,
            email: value.email,
            image: value.image,
            opening_hours: value.opening_hours,
            description: value.description,
            total_tables: value.total_tables,
            available_tables: value.available_tables,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchDetailDto {
    pub branch: BranchDto,
    pub images: Vec<String>,
    pub dishes: Vec<DishDto>,
    pub active_events: Vec<EventDto>,
}

impl BranchDetailDto {
    pub fn new(
        branch: BranchEntity,
        mut images: Vec<BranchImageEntity>,
        dishes: Vec<DishEntity>,
        active_events: Vec<EventDto>,
    ) -> Self {
        images.sort_by_key(|image| image.position);
        Self {
            branch: branch.into(),
            images: images.into_iter().map(|image| image.url).collect(),
            dishes: dishes.into_iter().map(DishDto::from).collect(),
            active_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model() -> BranchModel {
        BranchModel {
            name: "District 1".to_string(),
            address: "1 Le Loi".to_string(),
            phone: None,
            email: None,
            image: None,
            opening_hours: None,
            description: None,
            total_tables: None,
            available_tables: None,
            images: vec!["a.jpg".to_string(), " ".to_string(), "b.jpg".to_string()],
            dish_ids: vec![],
        }
    }

    #[test]
    fn new_branch_defaults_to_twenty_free_tables() {
        let entity = model().to_insert_entity().unwrap();
        assert_eq!(entity.total_tables, DEFAULT_TOTAL_TABLES);
        assert_eq!(entity.available_tables, DEFAULT_TOTAL_TABLES);
    }

    #[test]
    fn available_above_total_is_rejected() {
        let mut model = model();
        model.total_tables = Some(10);
        model.available_tables = Some(11);
        assert!(model.to_insert_entity().is_err());

        assert!(validate_table_counts(10, -1).is_err());
        assert!(validate_table_counts(10, 10).is_ok());
        assert!(validate_table_counts(0, 0).is_ok());
    }

    #[test]
    fn edit_keeps_existing_counts_when_omitted() {
        let existing = BranchEntity {
            id: Uuid::new_v4(),
            name: "old".to_string(),
            address: "old".to_string(),
            phone: None,
            email: None,
            image: None,
            opening_hours: None,
            description: None,
            total_tables: 12,
            available_tables: 3,
            created_at: Utc::now(),
        };

        let edit = model().to_edit_entity(&existing).unwrap();
        assert_eq!(edit.total_tables, 12);
        assert_eq!(edit.available_tables, 3);
    }

    #[test]
    fn gallery_skips_blank_urls_and_keeps_order() {
        let branch_id = Uuid::new_v4();
        let gallery = model().gallery(branch_id);
        let urls: Vec<_> = gallery.iter().map(|g| (g.url.as_str(), g.position)).collect();
        assert_eq!(urls, vec![("a.jpg", 0), ("b.jpg", 1)]);
    }
}
