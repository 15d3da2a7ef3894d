use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::dishes::DishRepository,
    value_objects::dishes::{DishDto, DishFilter, DishModel},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct DishUseCase<D>
where
    D: DishRepository + Send + Sync + 'static,
{
    dish_repo: Arc<D>,
}

impl<D> DishUseCase<D>
where
    D: DishRepository + Send + Sync + 'static,
{
    pub fn new(dish_repo: Arc<D>) -> Self {
        Self { dish_repo }
    }

    pub async fn list(&self, filter: DishFilter) -> UseCaseResult<Vec<DishDto>> {
        let dishes = self
            .dish_repo
            .list(filter)
            .await
            .map_err(storage_failure("dishes: failed to list dishes"))?;

        Ok(dishes.into_iter().map(DishDto::from).collect())
    }

    pub async fn get(&self, dish_id: Uuid) -> UseCaseResult<DishDto> {
        self.dish_repo
            .find_by_id(dish_id)
            .await
            .map_err(storage_failure("dishes: failed to load dish"))?
            .map(DishDto::from)
            .ok_or(RestaurantError::NotFound("dish"))
    }

    pub async fn create(&self, model: DishModel) -> UseCaseResult<Uuid> {
        let entity = model.to_insert_entity().map_err(|err| {
            warn!(
                status = StatusCode::BAD_REQUEST.as_u16(),
                reason = %err,
                "dishes: rejected dish"
            );
            RestaurantError::validation(err)
        })?;

        let dish_id = self
            .dish_repo
            .create(entity)
            .await
            .map_err(storage_failure("dishes: failed to create dish"))?;

        info!(%dish_id, "dishes: dish created");
        Ok(dish_id)
    }

    pub async fn update(&self, dish_id: Uuid, model: DishModel) -> UseCaseResult<()> {
        let entity = model.to_edit_entity().map_err(|err| {
            warn!(
                %dish_id,
                status = StatusCode::BAD_REQUEST.as_u16(),
                reason = %err,
                "dishes: rejected dish update"
            );
            RestaurantError::validation(err)
        })?;

        let updated = self
            .dish_repo
            .update(dish_id, entity)
            .await
            .map_err(storage_failure("dishes: failed to update dish"))?;
        if updated == 0 {
            return Err(RestaurantError::NotFound("dish"));
        }

        info!(%dish_id, "dishes: dish updated");
        Ok(())
    }

    pub async fn delete(&self, dish_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .dish_repo
            .delete(dish_id)
            .await
            .map_err(storage_failure("dishes: failed to delete dish"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("dish"));
        }

        info!(%dish_id, "dishes: dish deleted");
        Ok(())
    }
}
