use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use crates::domain::{
    entities::events::EventEntity,
    repositories::events::EventRepository,
    value_objects::events::{EventDto, EventModel, is_active_at},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct EventUseCase<E>
where
    E: EventRepository + Send + Sync + 'static,
{
    event_repo: Arc<E>,
}

impl<E> EventUseCase<E>
where
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(event_repo: Arc<E>) -> Self {
        Self { event_repo }
    }

    pub async fn list(&self) -> UseCaseResult<Vec<EventDto>> {
        let events = self
            .event_repo
            .list()
            .await
            .map_err(storage_failure("events: failed to list events"))?;
        self.with_targets(events).await
    }

    /// Events running at `now`, newest first.
    pub async fn active(&self, now: DateTime<Utc>) -> UseCaseResult<Vec<EventDto>> {
        let events = self
            .event_repo
            .list()
            .await
            .map_err(storage_failure("events: failed to list events"))?
            .into_iter()
            .filter(|event| is_active_at(event, now))
            .collect();
        self.with_targets(events).await
    }

    pub async fn get(&self, event_id: Uuid) -> UseCaseResult<EventDto> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await
            .map_err(storage_failure("events: failed to load event"))?
            .ok_or(RestaurantError::NotFound("event"))?;

        let mut dtos = self.with_targets(vec![event]).await?;
        dtos.pop().ok_or(RestaurantError::NotFound("event"))
    }

    pub async fn create(&self, model: EventModel) -> UseCaseResult<Uuid> {
        let event = model.normalize().map_err(|err| {
            warn!(status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "events: rejected event");
            RestaurantError::validation(err)
        })?;

        let event_id = self
            .event_repo
            .create(
                event.to_insert_entity(),
                event.targeting.branches.clone(),
                event.targeting.dishes.clone(),
            )
            .await
            .map_err(storage_failure("events: failed to create event"))?;

        info!(
            %event_id,
            discount_type = %event.targeting.discount_type,
            is_global = event.targeting.is_global,
            "events: event created"
        );
        Ok(event_id)
    }

    pub async fn update(&self, event_id: Uuid, model: EventModel) -> UseCaseResult<()> {
        let event = model.normalize().map_err(|err| {
            warn!(%event_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "events: rejected event update");
            RestaurantError::validation(err)
        })?;

        let updated = self
            .event_repo
            .update(
                event_id,
                event.to_edit_entity(),
                event.targeting.branches.clone(),
                event.targeting.dishes.clone(),
            )
            .await
            .map_err(storage_failure("events: failed to update event"))?;
        if updated == 0 {
            return Err(RestaurantError::NotFound("event"));
        }

        info!(%event_id, "events: event updated");
        Ok(())
    }

    pub async fn delete(&self, event_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .event_repo
            .delete(event_id)
            .await
            .map_err(storage_failure("events: failed to delete event"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("event"));
        }
        info!(%event_id, "events: event deleted");
        Ok(())
    }

    async fn with_targets(&self, events: Vec<EventEntity>) -> UseCaseResult<Vec<EventDto>> {
        let mut dtos = Vec::with_capacity(events.len());
        for event in events {
            let (branches, dishes) = self
                .event_repo
                .targets(event.id)
                .await
                .map_err(storage_failure("events: failed to load event targets"))?;
            dtos.push(EventDto::new(event, branches, dishes));
        }
        Ok(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crates::domain::{
        repositories::events::MockEventRepository,
        value_objects::enums::discount_types::DiscountType,
    };

    fn model(discount_type: DiscountType, is_global: bool) -> EventModel {
        let start_date = Utc::now();
        EventModel {
            title: "Lunar new year".to_string(),
            description: None,
            image: None,
            discount: 15,
            discount_type,
            is_global,
            branches: vec![Uuid::new_v4()],
            dishes: vec![Uuid::new_v4()],
            start_date,
            end_date: start_date + Duration::days(7),
        }
    }

    #[tokio::test]
    async fn dish_event_is_stored_without_branch_targets() {
        let mut repo = MockEventRepository::new();
        repo.expect_create()
            .withf(|insert, branch_ids, dish_ids| {
                insert.discount_type == "dish"
                    && !insert.is_global
                    && branch_ids.is_empty()
                    && dish_ids.len() == 1
            })
            .times(1)
            .returning(|insert, _, _| {
                let id = insert.id;
                Box::pin(async move { Ok(id) })
            });
        let usecase = EventUseCase::new(Arc::new(repo));

        usecase.create(model(DiscountType::Dish, true)).await.unwrap();
    }

    #[tokio::test]
    async fn global_branch_event_drops_both_target_lists() {
        let mut repo = MockEventRepository::new();
        repo.expect_create()
            .withf(|insert, branch_ids, dish_ids| {
                insert.is_global && branch_ids.is_empty() && dish_ids.is_empty()
            })
            .times(1)
            .returning(|insert, _, _| {
                let id = insert.id;
                Box::pin(async move { Ok(id) })
            });
        let usecase = EventUseCase::new(Arc::new(repo));

        usecase.create(model(DiscountType::Branch, true)).await.unwrap();
    }

    #[tokio::test]
    async fn reversed_dates_are_rejected() {
        let mut repo = MockEventRepository::new();
        repo.expect_create().never();
        let usecase = EventUseCase::new(Arc::new(repo));

        let mut event = model(DiscountType::None, false);
        std::mem::swap(&mut event.start_date, &mut event.end_date);

        assert!(matches!(
            usecase.create(event).await,
            Err(RestaurantError::Validation(_))
        ));
    }
}
