use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    entities::contacts::ContactEntity,
    repositories::contacts::ContactRepository,
    value_objects::contacts::{ContactModel, ContactStatusModel},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct ContactUseCase<C>
where
    C: ContactRepository + Send + Sync + 'static,
{
    contact_repo: Arc<C>,
}

impl<C> ContactUseCase<C>
where
    C: ContactRepository + Send + Sync + 'static,
{
    pub fn new(contact_repo: Arc<C>) -> Self {
        Self { contact_repo }
    }

    pub async fn submit(&self, model: ContactModel) -> UseCaseResult<Uuid> {
        let entity = model.to_insert_entity().map_err(|err| {
            warn!(status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "contacts: rejected message");
            RestaurantError::validation(err)
        })?;

        let contact_id = self
            .contact_repo
            .create(entity)
            .await
            .map_err(storage_failure("contacts: failed to store message"))?;
        info!(%contact_id, "contacts: message received");
        Ok(contact_id)
    }

    pub async fn list(&self) -> UseCaseResult<Vec<ContactEntity>> {
        self.contact_repo
            .list()
            .await
            .map_err(storage_failure("contacts: failed to list messages"))
    }

    pub async fn update_status(
        &self,
        contact_id: Uuid,
        model: ContactStatusModel,
    ) -> UseCaseResult<()> {
        let updated = self
            .contact_repo
            .update_status(contact_id, model.status.to_string())
            .await
            .map_err(storage_failure("contacts: failed to update status"))?;
        if updated == 0 {
            return Err(RestaurantError::NotFound("contact"));
        }
        info!(%contact_id, status = %model.status, "contacts: status updated");
        Ok(())
    }

    pub async fn delete(&self, contact_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .contact_repo
            .delete(contact_id)
            .await
            .map_err(storage_failure("contacts: failed to delete message"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("contact"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        repositories::contacts::MockContactRepository,
        value_objects::enums::contact_statuses::ContactStatus,
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn submission_requires_all_fields() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().never();
        let usecase = ContactUseCase::new(Arc::new(repo));

        let result = usecase
            .submit(ContactModel {
                name: "An".to_string(),
                email: String::new(),
                message: "Do you open on Tet?".to_string(),
            })
            .await;

        assert!(matches!(result, Err(RestaurantError::Validation(_))));
    }

    #[tokio::test]
    async fn status_is_stored_lowercase() {
        let contact_id = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_update_status()
            .with(eq(contact_id), eq("replied".to_string()))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(1) }));
        let usecase = ContactUseCase::new(Arc::new(repo));

        usecase
            .update_status(
                contact_id,
                ContactStatusModel {
                    status: ContactStatus::Replied,
                },
            )
            .await
            .unwrap();
    }
}
