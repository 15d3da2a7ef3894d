use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use crates::domain::{
    repositories::{branches::BranchRepository, events::EventRepository},
    value_objects::{
        branches::{BranchDetailDto, BranchDto, BranchModel},
        events::EventDto,
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct BranchUseCase<B, E>
where
    B: BranchRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    branch_repo: Arc<B>,
    event_repo: Arc<E>,
}

impl<B, E> BranchUseCase<B, E>
where
    B: BranchRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(branch_repo: Arc<B>, event_repo: Arc<E>) -> Self {
        Self {
            branch_repo,
            event_repo,
        }
    }

    pub async fn list(&self) -> UseCaseResult<Vec<BranchDto>> {
        let branches = self
            .branch_repo
            .list()
            .await
            .map_err(storage_failure("branches: failed to list branches"))?;
        Ok(branches.into_iter().map(BranchDto::from).collect())
    }

    /// Branch with its gallery, menu and the events running there at `now`.
    pub async fn detail(&self, branch_id: Uuid, now: DateTime<Utc>) -> UseCaseResult<BranchDetailDto> {
        let branch = self
            .branch_repo
            .find_by_id(branch_id)
            .await
            .map_err(storage_failure("branches: failed to load branch"))?
            .ok_or(RestaurantError::NotFound("branch"))?;

        let images = self
            .branch_repo
            .images(branch_id)
            .await
            .map_err(storage_failure("branches: failed to load gallery"))?;
        let menu = self
            .branch_repo
            .menu(branch_id)
            .await
            .map_err(storage_failure("branches: failed to load menu"))?;

        let events = self
            .event_repo
            .active_for_branch(branch_id, now)
            .await
            .map_err(storage_failure("branches: failed to load active events"))?;
        let mut active_events = Vec::with_capacity(events.len());
        for event in events {
            let (branches, dishes) = self
                .event_repo
                .targets(event.id)
                .await
                .map_err(storage_failure("branches: failed to load event targets"))?;
            active_events.push(EventDto::new(event, branches, dishes));
        }

        Ok(BranchDetailDto::new(branch, images, menu, active_events))
    }

    pub async fn create(&self, model: BranchModel) -> UseCaseResult<Uuid> {
        let entity = model.to_insert_entity().map_err(|err| {
            warn!(status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "branches: rejected branch");
            RestaurantError::validation(err)
        })?;
        let gallery = model.gallery(entity.id);

        let branch_id = self
            .branch_repo
            .create(entity, gallery, model.dish_ids.clone())
            .await
            .map_err(storage_failure("branches: failed to create branch"))?;

        info!(%branch_id, "branches: branch created");
        Ok(branch_id)
    }

    pub async fn update(&self, branch_id: Uuid, model: BranchModel) -> UseCaseResult<()> {
        let existing = self
            .branch_repo
            .find_by_id(branch_id)
            .await
            .map_err(storage_failure("branches: failed to load branch"))?
            .ok_or(RestaurantError::NotFound("branch"))?;

        let entity = model.to_edit_entity(&existing).map_err(|err| {
            warn!(
                %branch_id,
                status = StatusCode::BAD_REQUEST.as_u16(),
                reason = %err,
                "branches: rejected branch update"
            );
            RestaurantError::validation(err)
        })?;

        let updated = self
            .branch_repo
            .update(branch_id, entity, model.gallery(branch_id), model.dish_ids.clone())
            .await
            .map_err(storage_failure("branches: failed to update branch"))?;
        if updated == 0 {
            return Err(RestaurantError::NotFound("branch"));
        }

        info!(%branch_id, "branches: branch updated");
        Ok(())
    }

    pub async fn delete(&self, branch_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .branch_repo
            .delete(branch_id)
            .await
            .map_err(storage_failure("branches: failed to delete branch"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("branch"));
        }
        info!(%branch_id, "branches: branch deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::branches::BranchEntity,
        repositories::{branches::MockBranchRepository, events::MockEventRepository},
    };
    use mockall::predicate::eq;

    fn branch(total_tables: i32, available_tables: i32) -> BranchEntity {
        BranchEntity {
            id: Uuid::new_v4(),
            name: "District 1".to_string(),
            address: "12 Le Loi".to_string(),
            phone: None,
            email: None,
            image: None,
            opening_hours: None,
            description: None,
            total_tables,
            available_tables,
            created_at: Utc::now(),
        }
    }

    fn model(total_tables: Option<i32>, available_tables: Option<i32>) -> BranchModel {
        BranchModel {
            name: "District 1".to_string(),
            address: "12 Le Loi".to_string(),
            phone: None,
            email: None,
            image: None,
            opening_hours: None,
            description: None,
            total_tables,
            available_tables,
            images: vec!["a.jpg".to_string(), " ".to_string(), "b.jpg".to_string()],
            dish_ids: vec![],
        }
    }

    #[tokio::test]
    async fn new_branch_defaults_to_twenty_free_tables() {
        let mut branch_repo = MockBranchRepository::new();
        branch_repo
            .expect_create()
            .withf(|insert, images, _| {
                insert.total_tables == 20 && insert.available_tables == 20 && images.len() == 2
            })
            .times(1)
            .returning(|insert, _, _| {
                let id = insert.id;
                Box::pin(async move { Ok(id) })
            });
        let usecase = BranchUseCase::new(Arc::new(branch_repo), Arc::new(MockEventRepository::new()));

        usecase.create(model(None, None)).await.unwrap();
    }

    #[tokio::test]
    async fn update_rejects_available_above_total() {
        let existing = branch(20, 5);
        let branch_id = existing.id;
        let mut branch_repo = MockBranchRepository::new();
        branch_repo
            .expect_find_by_id()
            .with(eq(branch_id))
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
        branch_repo.expect_update().never();
        let usecase = BranchUseCase::new(Arc::new(branch_repo), Arc::new(MockEventRepository::new()));

        let result = usecase.update(branch_id, model(Some(10), Some(11))).await;

        assert!(matches!(result, Err(RestaurantError::Validation(_))));
    }
}
