use anyhow::{Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::blogs::{EditBlogEntity, InsertBlogEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogModel {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl BlogModel {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            bail!("blog title and content are required");
        }
        Ok(())
    }

    pub fn to_insert_entity(&self) -> Result<InsertBlogEntity> {
        self.validate()?;
        Ok(InsertBlogEntity {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
        })
    }

    pub fn to_edit_entity(&self) -> Result<EditBlogEntity> {
        self.validate()?;
        Ok(EditBlogEntity {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
            updated_at: Utc::now(),
        })
    }
}
