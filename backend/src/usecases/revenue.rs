use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use crates::domain::{
    repositories::revenue::RevenueRepository,
    value_objects::revenue::{RevenueEvent, RevenuePeriod, RevenueQuery, RevenueReport},
};
use tracing::{info, warn};

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct RevenueUseCase<R>
where
    R: RevenueRepository + Send + Sync + 'static,
{
    revenue_repo: Arc<R>,
}

impl<R> RevenueUseCase<R>
where
    R: RevenueRepository + Send + Sync + 'static,
{
    pub fn new(revenue_repo: Arc<R>) -> Self {
        Self { revenue_repo }
    }

    /// Merges completed payments and paid cash orders without a payment record into one
    /// stream of revenue events for the requested period.
    pub async fn report(&self, query: RevenueQuery, now: DateTime<Utc>) -> UseCaseResult<RevenueReport> {
        let period = RevenuePeriod::resolve(&query, now).map_err(|err| {
            warn!(status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "revenue: invalid period");
            RestaurantError::validation(err)
        })?;

        let payments = self
            .revenue_repo
            .completed_payments(period.start, period.end)
            .await
            .map_err(storage_failure("revenue: failed to load payments"))?;
        let cod_orders = self
            .revenue_repo
            .cod_orders_without_payment(period.start, period.end)
            .await
            .map_err(storage_failure("revenue: failed to load cash orders"))?;

        let events: Vec<RevenueEvent> = payments
            .iter()
            .filter_map(RevenueEvent::from_payment)
            .chain(cod_orders.iter().map(RevenueEvent::from_cod_order))
            .collect();

        let report = RevenueReport::aggregate(&period, events);
        info!(
            year = report.year,
            month = ?report.month,
            total_revenue = report.total_revenue,
            "revenue: report built"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crates::domain::{
        entities::{orders::OrderEntity, payments::PaymentEntity},
        repositories::revenue::MockRevenueRepository,
    };
    use uuid::Uuid;

    fn payment(method: &str, amount: i64, at: DateTime<Utc>, reservation: bool) -> PaymentEntity {
        let reference = Uuid::new_v4();
        PaymentEntity {
            id: Uuid::new_v4(),
            order_id: (!reservation).then_some(reference),
            reservation_id: reservation.then_some(reference),
            user_id: Uuid::new_v4(),
            amount,
            discount: 1_000,
            final_amount: amount,
            payment_method: method.to_string(),
            status: "completed".to_string(),
            qr_code: None,
            transaction_id: None,
            paid_at: Some(at),
            created_at: at,
        }
    }

    fn cod_order(final_price: i64, at: DateTime<Utc>) -> OrderEntity {
        OrderEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            order_type: "takeaway".to_string(),
            branch_id: None,
            guests: None,
            payment_timing: "cod".to_string(),
            total_price: final_price,
            discount: 0,
            final_price,
            status: "completed".to_string(),
            payment_status: "paid".to_string(),
            payment_method: Some("cash".to_string()),
            delivery_address: None,
            full_name: None,
            email: None,
            phone: None,
            special_requests: None,
            paid_at: Some(at),
            admin_notified: false,
            large_order_note: None,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn merges_payments_and_cash_orders_into_one_report() {
        let march = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();

        let mut repo = MockRevenueRepository::new();
        repo.expect_completed_payments().returning(move |_, _| {
            Box::pin(async move {
                Ok(vec![
                    payment("bank", 180_000, march, false),
                    payment("momo", 145_000, july, true),
                ])
            })
        });
        repo.expect_cod_orders_without_payment()
            .returning(move |_, _| Box::pin(async move { Ok(vec![cod_order(90_000, july)]) }));

        let report = RevenueUseCase::new(Arc::new(repo))
            .report(
                RevenueQuery {
                    year: Some(2025),
                    month: None,
                },
                july,
            )
            .await
            .unwrap();

        assert_eq!(report.total_revenue, 415_000);
        assert_eq!(report.order_revenue, 270_000);
        assert_eq!(report.order_count, 2);
        assert_eq!(report.reservation_revenue, 145_000);
        assert_eq!(report.by_method.cash, 90_000);
        assert_eq!(report.by_method.bank, 180_000);
        assert_eq!(report.monthly.len(), 12);
        assert_eq!(report.monthly[6].revenue, 235_000);
    }

    #[tokio::test]
    async fn month_out_of_range_is_validation() {
        let mut repo = MockRevenueRepository::new();
        repo.expect_completed_payments().never();

        let result = RevenueUseCase::new(Arc::new(repo))
            .report(
                RevenueQuery {
                    year: Some(2025),
                    month: Some(13),
                },
                Utc::now(),
            )
            .await;

        assert!(matches!(result, Err(RestaurantError::Validation(_))));
    }
}
