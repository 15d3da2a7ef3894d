use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::dishes::{DishEntity, EditDishEntity, InsertDishEntity},
    value_objects::{
        enums::dish_categories::DishCategory,
        pricing::{MAX_DISH_PRICE, validate_discount_percent},
    },
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DishFilter {
    pub category: Option<DishCategory>,
    pub search: Option<String>,
}

impl DishFilter {
    /// Trimmed, non-empty search term.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishModel {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub image: Option<String>,
    pub category: DishCategory,
    #[serde(default)]
    pub discount: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub event_id: Option<String>,
}

fn default_available() -> bool {
    true
}

impl DishModel {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("dish name is required");
        }
        if self.price < 0 {
            bail!("price must not be negative");
        }
        if self.price > MAX_DISH_PRICE {
            bail!("price must not exceed {MAX_DISH_PRICE}");
        }
        validate_discount_percent(self.discount)
    }

    /// An empty or blank event id from a form means "no event".
    pub fn event_id(&self) -> Result<Option<Uuid>> {
        match self.event_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(Uuid::parse_str(raw)?)),
        }
    }

    pub fn to_insert_entity(&self) -> Result<InsertDishEntity> {
        self.validate()?;
        Ok(InsertDishEntity {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.to_string(),
            discount: self.discount,
            available: self.available,
            event_id: self.event_id()?,
        })
    }

    pub fn to_edit_entity(&self) -> Result<EditDishEntity> {
        self.validate()?;
        Ok(EditDishEntity {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.to_string(),
            discount: self.discount,
            available: self.available,
            event_id: self.event_id()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DishDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub category: String,
    pub discount: i32,
    pub available: bool,
    pub event_id: Option<Uuid>,
}

impl From<DishEntity> for DishDto {
    fn from(value: DishEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            image: value.image,
            category: value.category,
            discount: value.discount,
            available: value.available,
            event_id: value.event_id,
        }
    }
}
