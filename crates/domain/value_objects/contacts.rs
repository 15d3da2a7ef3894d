use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::contacts::InsertContactEntity,
    value_objects::enums::contact_statuses::ContactStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactModel {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactModel {
    pub fn to_insert_entity(&self) -> Result<InsertContactEntity> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            bail!("name, email and message are required");
        }
        if !email.contains('@') {
            bail!("email address is not valid");
        }

        Ok(InsertContactEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            status: ContactStatus::New.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusModel {
    pub status: ContactStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_starts_unread() {
        let model = ContactModel {
            name: " Lan ".to_string(),
            email: "lan@example.com".to_string(),
            message: "Do you cater weddings?".to_string(),
        };
        let entity = model.to_insert_entity().unwrap();
        assert_eq!(entity.name, "Lan");
        assert_eq!(entity.status, "new");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let model = ContactModel {
            name: "Lan".to_string(),
            email: "not-an-email".to_string(),
            message: "hi".to_string(),
        };
        assert!(model.to_insert_entity().is_err());

        let model = ContactModel {
            name: "".to_string(),
            email: "lan@example.com".to_string(),
            message: "hi".to_string(),
        };
        assert!(model.to_insert_entity().is_err());
    }
}
