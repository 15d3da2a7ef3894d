use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use crates::domain::{
    entities::reservations::ReservationEntity,
    repositories::{
        availability::TableAvailabilityRepository, dishes::DishRepository,
        payments::PaymentRepository, reservations::ReservationRepository,
    },
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::{
            paid_statuses::PaidStatus, payment_methods::PaymentMethod,
            reservation_statuses::ReservationStatus,
        },
        orders::NextStep,
        payments::{
            BankQrAccount, ConfirmPaymentModel, PaymentPageDto, ReservationSettlement,
            parse_payment_method, payment_reference,
        },
        pricing::{PriceBreakdown, catalog_by_id, price_lines},
        reservations::{
            PlaceReservationRequest, PlacedReservation, ReservationDetailDto, ReservationDraft,
            ReservationDto, validate_reservation_time,
        },
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

const PAYMENT_KIND: &str = "reservation";

pub struct ReservationUseCase<R, D, T, P>
where
    R: ReservationRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    T: TableAvailabilityRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    reservation_repo: Arc<R>,
    dish_repo: Arc<D>,
    availability_repo: Arc<T>,
    payment_repo: Arc<P>,
    bank_qr: BankQrAccount,
}

impl<R, D, T, P> ReservationUseCase<R, D, T, P>
where
    R: ReservationRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    T: TableAvailabilityRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(
        reservation_repo: Arc<R>,
        dish_repo: Arc<D>,
        availability_repo: Arc<T>,
        payment_repo: Arc<P>,
        bank_qr: BankQrAccount,
    ) -> Self {
        Self {
            reservation_repo,
            dish_repo,
            availability_repo,
            payment_repo,
            bank_qr,
        }
    }

    /// Books a table and prices the pre-ordered dishes. The reservation is only usable once
    /// paid, so the result always points at its payment page.
    pub async fn place(
        &self,
        user_id: Uuid,
        request: PlaceReservationRequest,
        now: DateTime<Utc>,
    ) -> UseCaseResult<PlacedReservation> {
        let branch_id = request.branch_id;
        info!(%user_id, %branch_id, date = %request.date, guests = request.guests, "reservations: placing reservation");

        validate_reservation_time(request.date, request.time, now).map_err(|err| {
            warn!(%user_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "reservations: slot not in the future");
            RestaurantError::InvalidDateTime(err.to_string())
        })?;
        request.validate(now).map_err(|err| {
            warn!(%user_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "reservations: rejected request");
            RestaurantError::validation(err)
        })?;

        let branch = self
            .availability_repo
            .find_branch(branch_id)
            .await
            .map_err(storage_failure("reservations: failed to load branch"))?
            .ok_or(RestaurantError::NotFound("branch"))?;
        if branch.available_tables < 1 {
            warn!(%user_id, %branch_id, status = StatusCode::BAD_REQUEST.as_u16(), "reservations: branch is fully booked");
            return Err(RestaurantError::NoCapacity);
        }

        let lines = request.dish_lines();
        let pricing = if lines.is_empty() {
            PriceBreakdown::default()
        } else {
            let dishes = self
                .dish_repo
                .find_by_ids(lines.iter().map(|line| line.dish_id).collect())
                .await
                .map_err(storage_failure("reservations: failed to load dishes"))?;
            price_lines(&lines, &catalog_by_id(dishes))
        };

        let draft = ReservationDraft::build(user_id, &request, &pricing);
        let reservation = match self
            .reservation_repo
            .place(draft)
            .await
            .map_err(storage_failure("reservations: failed to place reservation"))?
        {
            Placement::Placed(reservation) => reservation,
            Placement::NoTableAvailable => {
                warn!(%user_id, %branch_id, status = StatusCode::BAD_REQUEST.as_u16(), "reservations: last table taken concurrently");
                return Err(RestaurantError::NoCapacity);
            }
        };

        info!(
            reservation_id = %reservation.id,
            %user_id,
            total_amount = reservation.total_amount,
            "reservations: reservation placed"
        );

        Ok(PlacedReservation {
            reservation_id: reservation.id,
            total_amount: reservation.total_amount,
            next: NextStep::ReservationPayment {
                reservation_id: reservation.id,
            },
        })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> UseCaseResult<Vec<ReservationDto>> {
        let reservations = self
            .reservation_repo
            .list_by_user(user_id)
            .await
            .map_err(storage_failure("reservations: failed to list user reservations"))?;
        self.with_items(reservations).await
    }

    pub async fn list_all(&self) -> UseCaseResult<Vec<ReservationDto>> {
        let reservations = self
            .reservation_repo
            .list_all()
            .await
            .map_err(storage_failure("reservations: failed to list reservations"))?;
        self.with_items(reservations).await
    }

    pub async fn detail(&self, reservation_id: Uuid) -> UseCaseResult<ReservationDetailDto> {
        let reservation = self.load(reservation_id).await?;
        self.detail_of(reservation).await
    }

    pub async fn detail_for_user(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
    ) -> UseCaseResult<ReservationDetailDto> {
        let reservation = self.load(reservation_id).await?;
        ensure_owner(&reservation, user_id)?;
        self.detail_of(reservation).await
    }

    pub async fn payment_page(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
    ) -> UseCaseResult<PaymentPageDto> {
        let reservation = self.payable(user_id, reservation_id).await?;
        PaymentPageDto::new(
            PAYMENT_KIND,
            reservation.id,
            (
                reservation.total_amount,
                reservation.food_discount,
                reservation.total_amount,
            ),
            &self.bank_qr,
        )
        .map_err(RestaurantError::Persistence)
    }

    pub async fn confirm_payment(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
        model: ConfirmPaymentModel,
    ) -> UseCaseResult<ReservationDetailDto> {
        let method = parse_payment_method(&model.payment_method).map_err(|err| {
            warn!(%reservation_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "reservations: unknown payment method");
            RestaurantError::validation(err)
        })?;
        let reservation = self.payable(user_id, reservation_id).await?;

        let qr_code = match method {
            PaymentMethod::Bank => Some(
                self.bank_qr
                    .qr_url(
                        reservation.total_amount,
                        &payment_reference(PAYMENT_KIND, reservation.id),
                    )
                    .map_err(RestaurantError::Persistence)?,
            ),
            PaymentMethod::Momo | PaymentMethod::Cash => None,
        };
        let settlement = ReservationSettlement::new(&reservation, method, qr_code, Utc::now());

        let settled = self
            .reservation_repo
            .settle(reservation_id, settlement)
            .await
            .map_err(storage_failure("reservations: failed to record payment"))?;
        if !settled {
            warn!(%reservation_id, status = StatusCode::BAD_REQUEST.as_u16(), "reservations: paid concurrently");
            return Err(RestaurantError::AlreadyPaid);
        }

        info!(%reservation_id, %user_id, payment_method = %method, "reservations: payment confirmed");
        self.detail(reservation_id).await
    }

    /// Admin status change. Cancelling gives the table back to the branch.
    pub async fn update_status(
        &self,
        reservation_id: Uuid,
        next: ReservationStatus,
    ) -> UseCaseResult<()> {
        let reservation = self.load(reservation_id).await?;
        let current = ReservationStatus::from_str(&reservation.status).ok_or_else(|| {
            RestaurantError::InvalidState(format!(
                "reservation has unknown status '{}'",
                reservation.status
            ))
        })?;

        if !current.can_transition_to(next) {
            warn!(
                %reservation_id,
                from = %current,
                to = %next,
                status = StatusCode::BAD_REQUEST.as_u16(),
                "reservations: transition not allowed"
            );
            return Err(RestaurantError::InvalidState(format!(
                "reservation cannot move from {current} to {next}"
            )));
        }

        let release_table_at =
            (next == ReservationStatus::Cancelled).then_some(reservation.branch_id);

        match self
            .reservation_repo
            .transition(reservation_id, current, next, release_table_at)
            .await
            .map_err(storage_failure("reservations: failed to update status"))?
        {
            StatusUpdate::Applied { table_released } => {
                if release_table_at.is_some() && !table_released {
                    warn!(%reservation_id, "reservations: branch already at capacity, table not released");
                }
                info!(%reservation_id, from = %current, to = %next, table_released, "reservations: status updated");
                Ok(())
            }
            StatusUpdate::Conflict => Err(RestaurantError::InvalidState(
                "reservation status changed concurrently".to_string(),
            )),
        }
    }

    /// Deletes the reservation, giving its table back when it still holds one.
    pub async fn delete(&self, reservation_id: Uuid) -> UseCaseResult<()> {
        let reservation = self.load(reservation_id).await?;
        let finished = ReservationStatus::from_str(&reservation.status).is_some_and(|status| {
            matches!(status, ReservationStatus::Completed | ReservationStatus::Cancelled)
        });
        let release_table_at = (!finished).then_some(reservation.branch_id);

        let deleted = self
            .reservation_repo
            .delete(reservation_id, release_table_at)
            .await
            .map_err(storage_failure("reservations: failed to delete reservation"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("reservation"));
        }
        info!(%reservation_id, table_released = release_table_at.is_some(), "reservations: reservation deleted");
        Ok(())
    }

    async fn load(&self, reservation_id: Uuid) -> UseCaseResult<ReservationEntity> {
        self.reservation_repo
            .find_by_id(reservation_id)
            .await
            .map_err(storage_failure("reservations: failed to load reservation"))?
            .ok_or(RestaurantError::NotFound("reservation"))
    }

    async fn payable(&self, user_id: Uuid, reservation_id: Uuid) -> UseCaseResult<ReservationEntity> {
        let reservation = self.load(reservation_id).await?;
        ensure_owner(&reservation, user_id)?;

        if PaidStatus::from_str(&reservation.payment_status) == PaidStatus::Paid {
            warn!(%reservation_id, status = StatusCode::BAD_REQUEST.as_u16(), "reservations: already paid");
            return Err(RestaurantError::AlreadyPaid);
        }
        let payable = ReservationStatus::from_str(&reservation.status)
            .is_some_and(|status| status.can_transition_to(ReservationStatus::Confirmed));
        if !payable {
            return Err(RestaurantError::InvalidState(format!(
                "reservation in status {} cannot be paid",
                reservation.status
            )));
        }
        Ok(reservation)
    }

    async fn detail_of(&self, reservation: ReservationEntity) -> UseCaseResult<ReservationDetailDto> {
        let items = self
            .reservation_repo
            .items(reservation.id)
            .await
            .map_err(storage_failure("reservations: failed to load reservation items"))?;
        let payment = self
            .payment_repo
            .find_by_reservation(reservation.id)
            .await
            .map_err(storage_failure("reservations: failed to load payment"))?;
        Ok(ReservationDetailDto::new(reservation, items, payment))
    }

    async fn with_items(&self, reservations: Vec<ReservationEntity>) -> UseCaseResult<Vec<ReservationDto>> {
        let mut dtos = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let items = self
                .reservation_repo
                .items(reservation.id)
                .await
                .map_err(storage_failure("reservations: failed to load reservation items"))?;
            dtos.push(ReservationDto::new(reservation, items));
        }
        Ok(dtos)
    }
}

fn ensure_owner(reservation: &ReservationEntity, user_id: Uuid) -> UseCaseResult<()> {
    if reservation.user_id != user_id {
        warn!(
            reservation_id = %reservation.id,
            %user_id,
            status = StatusCode::FORBIDDEN.as_u16(),
            "reservations: reservation belongs to another user"
        );
        return Err(RestaurantError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Duration;
    use crates::domain::{
        entities::{dishes::DishEntity, reservations::ReservationItemEntity},
        repositories::{
            dishes::MockDishRepository, payments::MockPaymentRepository,
            reservations::MockReservationRepository,
        },
        value_objects::{pricing::LineRequest, reservations::DEPOSIT_AMOUNT},
    };
    use mockall::predicate::eq;

    use crate::usecases::availability::tests::{LockedBranch, branch};

    fn account() -> BankQrAccount {
        BankQrAccount {
            bank_id: "970422".to_string(),
            account_no: "0123456789".to_string(),
            account_name: "RESTAURANT".to_string(),
        }
    }

    fn request(branch_id: Uuid, at: DateTime<Utc>, dishes: Vec<LineRequest>) -> PlaceReservationRequest {
        PlaceReservationRequest {
            branch_id,
            date: at.date_naive(),
            time: at.time(),
            guests: 4,
            special_requests: None,
            dishes,
        }
    }

    fn stored(draft: &ReservationDraft) -> ReservationEntity {
        let r = &draft.reservation;
        ReservationEntity {
            id: r.id,
            user_id: r.user_id,
            branch_id: r.branch_id,
            date: r.date,
            time: r.time,
            guests: r.guests,
            special_requests: r.special_requests.clone(),
            deposit_amount: r.deposit_amount,
            food_total: r.food_total,
            food_discount: r.food_discount,
            total_amount: r.total_amount,
            status: r.status.clone(),
            payment_status: r.payment_status.clone(),
            payment_method: None,
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    /// Reservation store whose placement claims from the shared locked branch.
    struct LockedReservations {
        tables: Arc<LockedBranch>,
    }

    #[async_trait]
    impl ReservationRepository for LockedReservations {
        async fn place(&self, draft: ReservationDraft) -> Result<Placement<ReservationEntity>> {
            tokio::task::yield_now().await;
            Ok(match self.tables.try_claim() {
                Some(_) => Placement::Placed(stored(&draft)),
                None => Placement::NoTableAvailable,
            })
        }

        async fn find_by_id(&self, _reservation_id: Uuid) -> Result<Option<ReservationEntity>> {
            Ok(None)
        }

        async fn items(&self, _reservation_id: Uuid) -> Result<Vec<ReservationItemEntity>> {
            Ok(vec![])
        }

        async fn list_all(&self) -> Result<Vec<ReservationEntity>> {
            Ok(vec![])
        }

        async fn list_by_user(&self, _user_id: Uuid) -> Result<Vec<ReservationEntity>> {
            Ok(vec![])
        }

        async fn settle(&self, _reservation_id: Uuid, _settlement: ReservationSettlement) -> Result<bool> {
            Ok(false)
        }

        async fn transition(
            &self,
            _reservation_id: Uuid,
            _expected: ReservationStatus,
            _next: ReservationStatus,
            _release_table_at: Option<Uuid>,
        ) -> Result<StatusUpdate> {
            Ok(StatusUpdate::Conflict)
        }

        async fn delete(&self, _reservation_id: Uuid, _release_table_at: Option<Uuid>) -> Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn two_racing_reservations_for_the_last_table_let_exactly_one_through() {
        let last_table = branch(20, 1);
        let branch_id = last_table.id;
        let tables = Arc::new(LockedBranch::new(last_table));
        let usecase = Arc::new(ReservationUseCase::new(
            Arc::new(LockedReservations {
                tables: Arc::clone(&tables),
            }),
            Arc::new(MockDishRepository::new()),
            Arc::clone(&tables),
            Arc::new(MockPaymentRepository::new()),
            account(),
        ));
        let at = Utc::now() + Duration::days(1);

        let attempts: Vec<_> = (0..2)
            .map(|_| {
                let usecase = Arc::clone(&usecase);
                tokio::spawn(async move {
                    usecase
                        .place(Uuid::new_v4(), request(branch_id, at, vec![]), Utc::now())
                        .await
                })
            })
            .collect();
        let mut results = Vec::new();
        for attempt in attempts {
            results.push(attempt.await.unwrap());
        }

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(RestaurantError::NoCapacity)))
                .count(),
            1
        );
        assert_eq!(tables.available(), 0);
    }

    #[tokio::test]
    async fn full_branch_is_no_capacity_and_keeps_zero_tables() {
        let full = branch(20, 0);
        let branch_id = full.id;
        let tables = Arc::new(LockedBranch::new(full));
        let mut reservations = MockReservationRepository::new();
        reservations.expect_place().never();
        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockDishRepository::new()),
            Arc::clone(&tables),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let result = usecase
            .place(
                Uuid::new_v4(),
                request(branch_id, Utc::now() + Duration::hours(3), vec![]),
                Utc::now(),
            )
            .await;

        assert!(matches!(result, Err(RestaurantError::NoCapacity)));
        assert_eq!(tables.available(), 0);
    }

    #[tokio::test]
    async fn past_slot_is_rejected_before_any_lookup() {
        let mut reservations = MockReservationRepository::new();
        reservations.expect_place().never();
        let tables = Arc::new(LockedBranch::new(branch(20, 20)));
        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockDishRepository::new()),
            tables,
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let now = Utc::now();
        let result = usecase
            .place(Uuid::new_v4(), request(Uuid::new_v4(), now - Duration::minutes(5), vec![]), now)
            .await;

        assert!(matches!(result, Err(RestaurantError::InvalidDateTime(_))));
    }

    #[tokio::test]
    async fn a_guestless_reservation_is_a_validation_error() {
        let mut reservations = MockReservationRepository::new();
        reservations.expect_place().never();
        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockDishRepository::new()),
            Arc::new(LockedBranch::new(branch(20, 20))),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let mut empty_table = request(Uuid::new_v4(), Utc::now() + Duration::days(1), vec![]);
        empty_table.guests = 0;
        let result = usecase.place(Uuid::new_v4(), empty_table, Utc::now()).await;

        assert!(matches!(result, Err(RestaurantError::Validation(_))));
    }

    #[tokio::test]
    async fn deposit_and_discounted_food_make_the_total() {
        let open = branch(20, 5);
        let branch_id = open.id;
        let goi_cuon = DishEntity {
            id: Uuid::new_v4(),
            name: "Goi cuon".to_string(),
            description: None,
            price: 25_000,
            image: None,
            category: "appetizer".to_string(),
            discount: 10,
            available: true,
            event_id: None,
            created_at: Utc::now(),
        };
        let dish_id = goi_cuon.id;

        let mut dishes = MockDishRepository::new();
        dishes
            .expect_find_by_ids()
            .with(eq(vec![dish_id]))
            .returning(move |_| {
                let goi_cuon = goi_cuon.clone();
                Box::pin(async move { Ok(vec![goi_cuon]) })
            });
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_place()
            .withf(|draft| draft.reservation.total_amount == 145_000 && draft.items.len() == 1)
            .times(1)
            .returning(|draft| {
                let reservation = stored(&draft);
                Box::pin(async move { Ok(Placement::Placed(reservation)) })
            });

        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(dishes),
            Arc::new(LockedBranch::new(open)),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let placed = usecase
            .place(
                Uuid::new_v4(),
                request(
                    branch_id,
                    Utc::now() + Duration::days(2),
                    vec![LineRequest { dish_id, quantity: 2 }],
                ),
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(placed.total_amount, 145_000);
        assert_eq!(
            placed.next,
            NextStep::ReservationPayment {
                reservation_id: placed.reservation_id
            }
        );
    }

    #[tokio::test]
    async fn dishes_taken_off_sale_are_not_charged() {
        let open = branch(20, 5);
        let branch_id = open.id;
        let bun_cha = DishEntity {
            id: Uuid::new_v4(),
            name: "Bun cha".to_string(),
            description: None,
            price: 60_000,
            image: None,
            category: "main".to_string(),
            discount: 0,
            available: false,
            event_id: None,
            created_at: Utc::now(),
        };
        let dish_id = bun_cha.id;

        let mut dishes = MockDishRepository::new();
        dishes.expect_find_by_ids().returning(move |_| {
            let bun_cha = bun_cha.clone();
            Box::pin(async move { Ok(vec![bun_cha]) })
        });
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_place()
            .withf(|draft| {
                draft.reservation.total_amount == DEPOSIT_AMOUNT
                    && draft.reservation.food_total == 0
                    && draft.items.is_empty()
            })
            .times(1)
            .returning(|draft| {
                let reservation = stored(&draft);
                Box::pin(async move { Ok(Placement::Placed(reservation)) })
            });

        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(dishes),
            Arc::new(LockedBranch::new(open)),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let placed = usecase
            .place(
                Uuid::new_v4(),
                request(
                    branch_id,
                    Utc::now() + Duration::days(2),
                    vec![LineRequest { dish_id, quantity: 3 }],
                ),
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(placed.total_amount, DEPOSIT_AMOUNT);
    }

    #[tokio::test]
    async fn deleting_releases_the_table_unless_the_reservation_is_finished() {
        for (status, released) in [
            (ReservationStatus::Pending, true),
            (ReservationStatus::Confirmed, true),
            (ReservationStatus::Completed, false),
            (ReservationStatus::Cancelled, false),
        ] {
            let branch_id = Uuid::new_v4();
            let draft = ReservationDraft::build(
                Uuid::new_v4(),
                &request(branch_id, Utc::now() + Duration::days(1), vec![]),
                &PriceBreakdown::default(),
            );
            let mut existing = stored(&draft);
            existing.status = status.to_string();
            let reservation_id = existing.id;

            let mut reservations = MockReservationRepository::new();
            reservations.expect_find_by_id().returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
            reservations
                .expect_delete()
                .with(eq(reservation_id), eq(released.then_some(branch_id)))
                .times(1)
                .returning(|_, _| Box::pin(async { Ok(1) }));

            let usecase = ReservationUseCase::new(
                Arc::new(reservations),
                Arc::new(MockDishRepository::new()),
                Arc::new(LockedBranch::new(branch(20, 19))),
                Arc::new(MockPaymentRepository::new()),
                account(),
            );

            usecase.delete(reservation_id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn cancelling_releases_the_table_at_the_branch() {
        let user_id = Uuid::new_v4();
        let branch_id = Uuid::new_v4();
        let draft = ReservationDraft::build(
            user_id,
            &request(branch_id, Utc::now() + Duration::days(1), vec![]),
            &PriceBreakdown::default(),
        );
        let pending = stored(&draft);
        let reservation_id = pending.id;

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_id()
            .with(eq(reservation_id))
            .returning(move |_| {
                let pending = pending.clone();
                Box::pin(async move { Ok(Some(pending)) })
            });
        reservations
            .expect_transition()
            .with(
                eq(reservation_id),
                eq(ReservationStatus::Pending),
                eq(ReservationStatus::Cancelled),
                eq(Some(branch_id)),
            )
            .times(1)
            .returning(|_, _, _, _| {
                Box::pin(async {
                    Ok(StatusUpdate::Applied {
                        table_released: true,
                    })
                })
            });

        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockDishRepository::new()),
            Arc::new(LockedBranch::new(branch(20, 19))),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        usecase
            .update_status(reservation_id, ReservationStatus::Cancelled)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn paying_twice_is_already_paid() {
        let user_id = Uuid::new_v4();
        let draft = ReservationDraft::build(
            user_id,
            &request(Uuid::new_v4(), Utc::now() + Duration::days(1), vec![]),
            &PriceBreakdown::default(),
        );
        let mut paid = stored(&draft);
        paid.status = ReservationStatus::Confirmed.to_string();
        paid.payment_status = PaidStatus::Paid.to_string();
        let reservation_id = paid.id;

        let mut reservations = MockReservationRepository::new();
        reservations.expect_find_by_id().returning(move |_| {
            let paid = paid.clone();
            Box::pin(async move { Ok(Some(paid)) })
        });
        reservations.expect_settle().never();

        let usecase = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockDishRepository::new()),
            Arc::new(LockedBranch::new(branch(20, 19))),
            Arc::new(MockPaymentRepository::new()),
            account(),
        );

        let result = usecase
            .confirm_payment(
                user_id,
                reservation_id,
                ConfirmPaymentModel {
                    payment_method: "momo".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RestaurantError::AlreadyPaid)));
    }
}
