use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::notifications::NotificationRepository,
    value_objects::{
        enums::notification_statuses::NotificationStatus, notifications::NotificationDto,
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct NotificationUseCase<N>
where
    N: NotificationRepository + Send + Sync + 'static,
{
    notification_repo: Arc<N>,
}

impl<N> NotificationUseCase<N>
where
    N: NotificationRepository + Send + Sync + 'static,
{
    pub fn new(notification_repo: Arc<N>) -> Self {
        Self { notification_repo }
    }

    pub async fn list_pending(&self) -> UseCaseResult<Vec<NotificationDto>> {
        let notifications = self
            .notification_repo
            .list_pending()
            .await
            .map_err(storage_failure("notifications: failed to list pending"))?;
        Ok(notifications.into_iter().map(NotificationDto::from).collect())
    }

    pub async fn mark_read(&self, notification_id: Uuid) -> UseCaseResult<()> {
        self.move_to(notification_id, NotificationStatus::Read).await
    }

    pub async fn resolve(&self, notification_id: Uuid) -> UseCaseResult<()> {
        self.move_to(notification_id, NotificationStatus::Resolved).await
    }

    async fn move_to(&self, notification_id: Uuid, next: NotificationStatus) -> UseCaseResult<()> {
        let notification = self
            .notification_repo
            .find_by_id(notification_id)
            .await
            .map_err(storage_failure("notifications: failed to load notification"))?
            .ok_or(RestaurantError::NotFound("notification"))?;

        let current = NotificationStatus::from_str(&notification.status)
            .filter(|current| current.can_transition_to(next))
            .ok_or_else(|| {
                warn!(
                    %notification_id,
                    from = %notification.status,
                    to = %next,
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    "notifications: transition not allowed"
                );
                RestaurantError::InvalidState(format!(
                    "notification cannot move from {} to {next}",
                    notification.status
                ))
            })?;

        let updated = self
            .notification_repo
            .update_status(notification_id, current, next)
            .await
            .map_err(storage_failure("notifications: failed to update status"))?;
        if updated == 0 {
            return Err(RestaurantError::InvalidState(
                "notification status changed concurrently".to_string(),
            ));
        }

        info!(%notification_id, from = %current, to = %next, "notifications: status updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::notifications::NotificationEntity,
        repositories::notifications::MockNotificationRepository,
    };
    use mockall::predicate::eq;

    fn notification(status: NotificationStatus) -> NotificationEntity {
        NotificationEntity {
            id: Uuid::new_v4(),
            kind: "large_order".to_string(),
            order_id: Some(Uuid::new_v4()),
            reservation_id: None,
            user_id: Uuid::new_v4(),
            amount: 150_000_000,
            message: "High value order: 150.000.000 from customer Le C".to_string(),
            user_note: Some("No special request".to_string()),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    fn repo_with(found: NotificationEntity) -> MockNotificationRepository {
        let mut repo = MockNotificationRepository::new();
        repo.expect_find_by_id()
            .with(eq(found.id))
            .returning(move |_| {
                let found = found.clone();
                Box::pin(async move { Ok(Some(found)) })
            });
        repo
    }

    #[tokio::test]
    async fn pending_can_be_resolved_directly() {
        let pending = notification(NotificationStatus::Pending);
        let notification_id = pending.id;
        let mut repo = repo_with(pending);
        repo.expect_update_status()
            .with(
                eq(notification_id),
                eq(NotificationStatus::Pending),
                eq(NotificationStatus::Resolved),
            )
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(1) }));

        NotificationUseCase::new(Arc::new(repo))
            .resolve(notification_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn resolved_cannot_go_back_to_read() {
        let resolved = notification(NotificationStatus::Resolved);
        let notification_id = resolved.id;
        let mut repo = repo_with(resolved);
        repo.expect_update_status().never();

        let result = NotificationUseCase::new(Arc::new(repo))
            .mark_read(notification_id)
            .await;

        assert!(matches!(result, Err(RestaurantError::InvalidState(_))));
    }
}
