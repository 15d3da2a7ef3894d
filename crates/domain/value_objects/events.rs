use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::events::{EditEventEntity, EventEntity, InsertEventEntity},
    value_objects::{enums::discount_types::DiscountType, pricing::validate_discount_percent},
};

/// Form inputs for multi-selects arrive either as a single value or as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(
        match Option::<OneOrMany<T>>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(OneOrMany::One(value)) => vec![value],
            Some(OneOrMany::Many(values)) => values,
        },
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventModel {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub discount: i32,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default, deserialize_with = "one_or_many")]
    pub branches: Vec<Uuid>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub dishes: Vec<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Targeting after normalisation. The branch and dish lists are never both non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTargeting {
    pub discount_type: DiscountType,
    pub is_global: bool,
    pub branches: Vec<Uuid>,
    pub dishes: Vec<Uuid>,
}

impl EventTargeting {
    pub fn normalize(
        discount_type: DiscountType,
        is_global: bool,
        mut branches: Vec<Uuid>,
        mut dishes: Vec<Uuid>,
    ) -> Self {
        branches.sort();
        branches.dedup();
        dishes.sort();
        dishes.dedup();

        match discount_type {
            DiscountType::Branch if is_global => Self {
                discount_type,
                is_global: true,
                branches: Vec::new(),
                dishes: Vec::new(),
            },
            DiscountType::Branch => Self {
                discount_type,
                is_global: false,
                branches,
                dishes: Vec::new(),
            },
            DiscountType::Dish => Self {
                discount_type,
                is_global: false,
                branches: Vec::new(),
                dishes,
            },
            DiscountType::None => Self {
                discount_type,
                is_global: false,
                branches: Vec::new(),
                dishes: Vec::new(),
            },
        }
    }

    pub fn applies_to_branch(&self, branch_id: Uuid) -> bool {
        self.is_global || self.branches.contains(&branch_id)
    }
}

/// A validated event ready to persist together with its targeting links.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub targeting: EventTargeting,
}

impl EventModel {
    pub fn normalize(&self) -> Result<NormalizedEvent> {
        let title = self.title.trim();
        if title.is_empty() {
            bail!("event title is required");
        }
        if self.start_date >= self.end_date {
            bail!("event start date must be before its end date");
        }
        validate_discount_percent(self.discount)?;

        Ok(NormalizedEvent {
            title: title.to_string(),
            description: self.description.clone(),
            image: self.image.clone(),
            discount: self.discount,
            start_date: self.start_date,
            end_date: self.end_date,
            targeting: EventTargeting::normalize(
                self.discount_type,
                self.is_global,
                self.branches.clone(),
                self.dishes.clone(),
            ),
        })
    }
}

impl NormalizedEvent {
    pub fn to_insert_entity(&self) -> InsertEventEntity {
        InsertEventEntity {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            discount: self.discount,
            discount_type: self.targeting.discount_type.to_string(),
            is_global: self.targeting.is_global,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn to_edit_entity(&self) -> EditEventEntity {
        EditEventEntity {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            discount: self.discount,
            discount_type: self.targeting.discount_type.to_string(),
            is_global: self.targeting.is_global,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

pub fn is_active_at(event: &EventEntity, now: DateTime<Utc>) -> bool {
    event.start_date <= now && now <= event.end_date
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: i32,
    pub discount_type: DiscountType,
    pub is_global: bool,
    pub branches: Vec<Uuid>,
    pub dishes: Vec<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl EventDto {
    pub fn new(event: EventEntity, branches: Vec<Uuid>, dishes: Vec<Uuid>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            image: event.image,
            discount: event.discount,
            discount_type: DiscountType::from_str(&event.discount_type),
            is_global: event.is_global,
            branches,
            dishes,
            start_date: event.start_date,
            end_date: event.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn model(discount_type: DiscountType, is_global: bool) -> EventModel {
        let start = Utc::now();
        EventModel {
            title: "Tet sale".to_string(),
            description: None,
            image: None,
            discount: 15,
            discount_type,
            is_global,
            branches: vec![Uuid::new_v4()],
            dishes: vec![Uuid::new_v4()],
            start_date: start,
            end_date: start + Duration::days(7),
        }
    }

    #[test]
    fn branch_discount_keeps_branches_and_clears_dishes() {
        let event = model(DiscountType::Branch, false).normalize().unwrap();
        assert_eq!(event.targeting.branches.len(), 1);
        assert!(event.targeting.dishes.is_empty());
        assert!(!event.targeting.is_global);
    }

    #[test]
    fn global_branch_discount_has_no_branch_list() {
        let event = model(DiscountType::Branch, true).normalize().unwrap();
        assert!(event.targeting.is_global);
        assert!(event.targeting.branches.is_empty());
        assert!(event.targeting.dishes.is_empty());
        assert!(event.targeting.applies_to_branch(Uuid::new_v4()));
    }

    #[test]
    fn dish_discount_is_never_global() {
        let event = model(DiscountType::Dish, true).normalize().unwrap();
        assert!(!event.targeting.is_global);
        assert!(event.targeting.branches.is_empty());
        assert_eq!(event.targeting.dishes.len(), 1);
    }

    #[test]
    fn no_discount_clears_all_targeting() {
        let event = model(DiscountType::None, true).normalize().unwrap();
        assert!(!event.targeting.is_global);
        assert!(event.targeting.branches.is_empty());
        assert!(event.targeting.dishes.is_empty());
    }

    #[test]
    fn rejects_bad_dates_title_and_discount() {
        let mut reversed = model(DiscountType::None, false);
        reversed.end_date = reversed.start_date;
        assert!(reversed.normalize().is_err());

        let mut untitled = model(DiscountType::None, false);
        untitled.title = " ".to_string();
        assert!(untitled.normalize().is_err());

        let mut discount = model(DiscountType::None, false);
        discount.discount = 150;
        assert!(discount.normalize().is_err());
    }

    #[test]
    fn multi_select_accepts_single_value_or_list() {
        let id = Uuid::new_v4();
        let single = serde_json::json!({
            "title": "One",
            "discount_type": "branch",
            "branches": id.to_string(),
            "start_date": "2026-01-01T00:00:00Z",
            "end_date": "2026-01-02T00:00:00Z",
        });
        let model: EventModel = serde_json::from_value(single).unwrap();
        assert_eq!(model.branches, vec![id]);
        assert!(model.dishes.is_empty());

        let many = serde_json::json!({
            "title": "Many",
            "discount_type": "dish",
            "dishes": [id.to_string(), Uuid::new_v4().to_string()],
            "start_date": "2026-01-01T00:00:00Z",
            "end_date": "2026-01-02T00:00:00Z",
        });
        let model: EventModel = serde_json::from_value(many).unwrap();
        assert_eq!(model.dishes.len(), 2);
    }
}
