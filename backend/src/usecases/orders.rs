use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    entities::orders::OrderEntity,
    repositories::{
        availability::TableAvailabilityRepository, dishes::DishRepository,
        orders::OrderRepository, payments::PaymentRepository,
        session_carts::SessionCartRepository,
    },
    value_objects::{
        availability::{Placement, StatusUpdate},
        enums::{
            order_statuses::OrderStatus, order_types::OrderType, paid_statuses::PaidStatus,
            payment_methods::PaymentMethod, payment_timings::PaymentTiming,
        },
        orders::{
            NextStep, OrderDetailDto, OrderDraft, OrderDto, PlaceOrderRequest, PlacedOrder,
            cod_allowed,
        },
        payments::{
            BankQrAccount, ConfirmPaymentModel, OrderSettlement, PaymentPageDto,
            parse_payment_method, payment_reference,
        },
        pricing::{catalog_by_id, price_lines},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

const PAYMENT_KIND: &str = "order";

pub struct OrderUseCase<O, S, D, T, P>
where
    O: OrderRepository + Send + Sync + 'static,
    S: SessionCartRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    T: TableAvailabilityRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    cart_repo: Arc<S>,
    dish_repo: Arc<D>,
    availability_repo: Arc<T>,
    payment_repo: Arc<P>,
    bank_qr: BankQrAccount,
}

impl<O, S, D, T, P> OrderUseCase<O, S, D, T, P>
where
    O: OrderRepository + Send + Sync + 'static,
    S: SessionCartRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    T: TableAvailabilityRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(
        order_repo: Arc<O>,
        cart_repo: Arc<S>,
        dish_repo: Arc<D>,
        availability_repo: Arc<T>,
        payment_repo: Arc<P>,
        bank_qr: BankQrAccount,
    ) -> Self {
        Self {
            order_repo,
            cart_repo,
            dish_repo,
            availability_repo,
            payment_repo,
            bank_qr,
        }
    }

    /// Turns the session cart into an order. The table claim, the order, its items and
    /// the escalation notification are written together; the cart is cleared afterwards.
    pub async fn place(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        request: PlaceOrderRequest,
    ) -> UseCaseResult<PlacedOrder> {
        info!(
            %user_id,
            order_type = %request.order_type,
            payment_timing = %request.payment_timing,
            "orders: placing order"
        );

        let cart = self
            .cart_repo
            .load(session_id)
            .await
            .map_err(storage_failure("orders: failed to load cart"))?;
        if cart.is_empty() {
            warn!(%user_id, status = StatusCode::BAD_REQUEST.as_u16(), "orders: empty cart");
            return Err(RestaurantError::Validation("your cart is empty".to_string()));
        }

        if let Some(branch_id) = request.table_branch().map_err(RestaurantError::validation)? {
            let branch = self
                .availability_repo
                .find_branch(branch_id)
                .await
                .map_err(storage_failure("orders: failed to load branch"))?
                .ok_or(RestaurantError::NotFound("branch"))?;
            if branch.available_tables < 1 {
                warn!(
                    %user_id,
                    %branch_id,
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    "orders: branch is fully booked"
                );
                return Err(RestaurantError::NoCapacity);
            }
        }

        let dishes = self
            .dish_repo
            .find_by_ids(cart.dish_ids())
            .await
            .map_err(storage_failure("orders: failed to load dishes"))?;
        let pricing = price_lines(&cart.quantities(), &catalog_by_id(dishes));

        if request.payment_timing == PaymentTiming::Cod && !cod_allowed(pricing.final_price) {
            warn!(
                %user_id,
                final_price = pricing.final_price,
                status = StatusCode::BAD_REQUEST.as_u16(),
                "orders: cash on delivery over the ceiling"
            );
            return Err(RestaurantError::PaymentMethodRestricted);
        }

        let draft = OrderDraft::build(user_id, &request, &pricing).map_err(|err| {
            warn!(%user_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "orders: rejected order");
            RestaurantError::validation(err)
        })?;
        let escalated = draft.notification.is_some();

        let order = match self
            .order_repo
            .place(draft)
            .await
            .map_err(storage_failure("orders: failed to place order"))?
        {
            Placement::Placed(order) => order,
            Placement::NoTableAvailable => {
                warn!(
                    %user_id,
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    "orders: last table taken concurrently"
                );
                return Err(RestaurantError::NoCapacity);
            }
        };

        if let Err(err) = self.cart_repo.clear(session_id).await {
            warn!(%session_id, order_id = %order.id, error = ?err, "orders: cart not cleared after placement");
        }

        if escalated {
            info!(order_id = %order.id, final_price = order.final_price, "orders: large order escalated to admin");
        }
        info!(order_id = %order.id, %user_id, final_price = order.final_price, "orders: order placed");

        let next = match request.payment_timing {
            PaymentTiming::Prepaid => NextStep::OrderPayment { order_id: order.id },
            PaymentTiming::Cod => NextStep::Profile,
        };

        Ok(PlacedOrder {
            order_id: order.id,
            final_price: order.final_price,
            admin_notified: order.admin_notified,
            next,
        })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> UseCaseResult<Vec<OrderDto>> {
        let orders = self
            .order_repo
            .list_by_user(user_id)
            .await
            .map_err(storage_failure("orders: failed to list user orders"))?;
        self.with_items(orders).await
    }

    pub async fn list_all(&self) -> UseCaseResult<Vec<OrderDto>> {
        let orders = self
            .order_repo
            .list_all()
            .await
            .map_err(storage_failure("orders: failed to list orders"))?;
        self.with_items(orders).await
    }

    pub async fn detail(&self, order_id: Uuid) -> UseCaseResult<OrderDetailDto> {
        let order = self.load(order_id).await?;
        self.detail_of(order).await
    }

    pub async fn detail_for_user(&self, user_id: Uuid, order_id: Uuid) -> UseCaseResult<OrderDetailDto> {
        let order = self.load(order_id).await?;
        ensure_owner(&order, user_id)?;
        self.detail_of(order).await
    }

    pub async fn payment_page(&self, user_id: Uuid, order_id: Uuid) -> UseCaseResult<PaymentPageDto> {
        let order = self.payable(user_id, order_id).await?;
        PaymentPageDto::new(
            PAYMENT_KIND,
            order.id,
            (order.total_price, order.discount, order.final_price),
            &self.bank_qr,
        )
        .map_err(RestaurantError::Persistence)
    }

    /// Customer confirmation of a prepaid order. A second confirmation is `AlreadyPaid`
    /// and leaves the order and its payment untouched.
    pub async fn confirm_payment(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        model: ConfirmPaymentModel,
    ) -> UseCaseResult<OrderDetailDto> {
        let method = parse_payment_method(&model.payment_method).map_err(|err| {
            warn!(%order_id, status = StatusCode::BAD_REQUEST.as_u16(), reason = %err, "orders: unknown payment method");
            RestaurantError::validation(err)
        })?;
        let order = self.payable(user_id, order_id).await?;

        let qr_code = match method {
            PaymentMethod::Bank => Some(
                self.bank_qr
                    .qr_url(order.final_price, &payment_reference(PAYMENT_KIND, order.id))
                    .map_err(RestaurantError::Persistence)?,
            ),
            PaymentMethod::Momo | PaymentMethod::Cash => None,
        };
        let settlement = OrderSettlement::prepaid(&order, method, qr_code, Utc::now());

        let settled = self
            .order_repo
            .settle(order_id, settlement)
            .await
            .map_err(storage_failure("orders: failed to record payment"))?;
        if !settled {
            warn!(%order_id, status = StatusCode::BAD_REQUEST.as_u16(), "orders: paid concurrently");
            return Err(RestaurantError::AlreadyPaid);
        }

        info!(%order_id, %user_id, payment_method = %method, "orders: payment confirmed");
        self.detail(order_id).await
    }

    /// Admin status change through the transition table. Cancelling a dine-in order
    /// gives its table back.
    pub async fn update_status(&self, order_id: Uuid, next: OrderStatus) -> UseCaseResult<()> {
        let order = self.load(order_id).await?;
        let current = OrderStatus::from_str(&order.status).ok_or_else(|| {
            RestaurantError::InvalidState(format!("order has unknown status '{}'", order.status))
        })?;

        if !current.can_transition_to(next) {
            warn!(
                %order_id,
                from = %current,
                to = %next,
                status = StatusCode::BAD_REQUEST.as_u16(),
                "orders: transition not allowed"
            );
            return Err(RestaurantError::InvalidState(format!(
                "order cannot move from {current} to {next}"
            )));
        }

        // Only a settlement marks an order paid.
        let unpaid = PaidStatus::from_str(&order.payment_status) != PaidStatus::Paid;
        if next == OrderStatus::Paid {
            warn!(%order_id, status = StatusCode::BAD_REQUEST.as_u16(), "orders: paid set without a payment");
            return Err(RestaurantError::InvalidState(
                "orders become paid by confirming their payment".to_string(),
            ));
        }
        if next == OrderStatus::Completed && unpaid {
            warn!(%order_id, status = StatusCode::BAD_REQUEST.as_u16(), "orders: completing an unpaid order");
            return Err(RestaurantError::InvalidState(
                "an unpaid order cannot be completed, use cash on delivery completion instead"
                    .to_string(),
            ));
        }

        let release_table_at = if next == OrderStatus::Cancelled {
            held_table(&order)
        } else {
            None
        };

        match self
            .order_repo
            .transition(order_id, current, next, release_table_at)
            .await
            .map_err(storage_failure("orders: failed to update status"))?
        {
            StatusUpdate::Applied { table_released } => {
                if release_table_at.is_some() && !table_released {
                    warn!(%order_id, "orders: branch already at capacity, table not released");
                }
                info!(%order_id, from = %current, to = %next, table_released, "orders: status updated");
                Ok(())
            }
            StatusUpdate::Conflict => Err(RestaurantError::InvalidState(
                "order status changed concurrently".to_string(),
            )),
        }
    }

    /// Admin completion of a cash on delivery order: records the cash payment and
    /// completes the order.
    pub async fn complete_cod(&self, order_id: Uuid) -> UseCaseResult<()> {
        let order = self.load(order_id).await?;

        if PaymentTiming::from_str(&order.payment_timing) != Some(PaymentTiming::Cod) {
            return Err(RestaurantError::InvalidState(
                "only cash on delivery orders can be completed this way".to_string(),
            ));
        }
        if PaidStatus::from_str(&order.payment_status) == PaidStatus::Paid {
            return Err(RestaurantError::AlreadyPaid);
        }
        if OrderStatus::from_str(&order.status).is_none_or(|status| status.is_terminal()) {
            return Err(RestaurantError::InvalidState(format!(
                "order in status {} cannot be completed",
                order.status
            )));
        }

        let settled = self
            .order_repo
            .settle(order_id, OrderSettlement::cash_on_delivery(&order, Utc::now()))
            .await
            .map_err(storage_failure("orders: failed to complete cash order"))?;
        if !settled {
            return Err(RestaurantError::AlreadyPaid);
        }

        info!(%order_id, final_price = order.final_price, "orders: cash on delivery completed");
        Ok(())
    }

    /// Deletes the order. A dine-in order that still holds its table gives it back in the
    /// same unit of work.
    pub async fn delete(&self, order_id: Uuid) -> UseCaseResult<()> {
        let order = self.load(order_id).await?;
        let release_table_at = held_table(&order);

        let deleted = self
            .order_repo
            .delete(order_id, release_table_at)
            .await
            .map_err(storage_failure("orders: failed to delete order"))?;
        if deleted == 0 {
            return Err(RestaurantError::NotFound("order"));
        }
        info!(%order_id, table_released = release_table_at.is_some(), "orders: order deleted");
        Ok(())
    }

    async fn load(&self, order_id: Uuid) -> UseCaseResult<OrderEntity> {
        self.order_repo
            .find_by_id(order_id)
            .await
            .map_err(storage_failure("orders: failed to load order"))?
            .ok_or(RestaurantError::NotFound("order"))
    }

    /// An order the user owns, paid in advance and still awaiting that payment.
    async fn payable(&self, user_id: Uuid, order_id: Uuid) -> UseCaseResult<OrderEntity> {
        let order = self.load(order_id).await?;
        ensure_owner(&order, user_id)?;

        if PaidStatus::from_str(&order.payment_status) == PaidStatus::Paid {
            warn!(%order_id, status = StatusCode::BAD_REQUEST.as_u16(), "orders: already paid");
            return Err(RestaurantError::AlreadyPaid);
        }
        if PaymentTiming::from_str(&order.payment_timing) == Some(PaymentTiming::Cod) {
            return Err(RestaurantError::InvalidState(
                "cash on delivery orders are paid on completion".to_string(),
            ));
        }
        let payable = OrderStatus::from_str(&order.status)
            .is_some_and(|status| status.can_transition_to(OrderStatus::Paid));
        if !payable {
            return Err(RestaurantError::InvalidState(format!(
                "order in status {} cannot be paid",
                order.status
            )));
        }
        Ok(order)
    }

    async fn detail_of(&self, order: OrderEntity) -> UseCaseResult<OrderDetailDto> {
        let items = self
            .order_repo
            .items(order.id)
            .await
            .map_err(storage_failure("orders: failed to load order items"))?;
        let payment = self
            .payment_repo
            .find_by_order(order.id)
            .await
            .map_err(storage_failure("orders: failed to load payment"))?;
        Ok(OrderDetailDto::new(order, items, payment))
    }

    async fn with_items(&self, orders: Vec<OrderEntity>) -> UseCaseResult<Vec<OrderDto>> {
        let mut dtos = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self
                .order_repo
                .items(order.id)
                .await
                .map_err(storage_failure("orders: failed to load order items"))?;
            dtos.push(OrderDto::new(order, items));
        }
        Ok(dtos)
    }
}

/// Branch whose table this order still occupies: dine-in and not yet finished.
fn held_table(order: &OrderEntity) -> Option<Uuid> {
    let dine_in = OrderType::from_str(&order.order_type) == Some(OrderType::DineIn);
    let finished = OrderStatus::from_str(&order.status).is_some_and(|status| status.is_terminal());
    if dine_in && !finished {
        order.branch_id
    } else {
        None
    }
}

fn ensure_owner(order: &OrderEntity, user_id: Uuid) -> UseCaseResult<()> {
    if order.user_id != user_id {
        warn!(
            order_id = %order.id,
            %user_id,
            status = StatusCode::FORBIDDEN.as_u16(),
            "orders: order belongs to another user"
        );
        return Err(RestaurantError::Forbidden);
    }
    Ok(())
}
