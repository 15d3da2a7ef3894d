use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::{
        branches::BranchRepository, dishes::DishRepository, session_carts::SessionCartRepository,
    },
    value_objects::{
        branches::BranchDto,
        carts::{AddToCartModel, CartLine, CartView, CheckoutSummary},
        pricing::{catalog_by_id, price_lines},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::{RestaurantError, UseCaseResult, storage_failure};

pub struct CartUseCase<S, D, B>
where
    S: SessionCartRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    B: BranchRepository + Send + Sync + 'static,
{
    cart_repo: Arc<S>,
    dish_repo: Arc<D>,
    branch_repo: Arc<B>,
}

impl<S, D, B> CartUseCase<S, D, B>
where
    S: SessionCartRepository + Send + Sync + 'static,
    D: DishRepository + Send + Sync + 'static,
    B: BranchRepository + Send + Sync + 'static,
{
    pub fn new(cart_repo: Arc<S>, dish_repo: Arc<D>, branch_repo: Arc<B>) -> Self {
        Self {
            cart_repo,
            dish_repo,
            branch_repo,
        }
    }

    pub async fn view(&self, session_id: Uuid) -> UseCaseResult<CartView> {
        let cart = self
            .cart_repo
            .load(session_id)
            .await
            .map_err(storage_failure("cart: failed to load cart"))?;
        Ok(CartView::from(cart))
    }

    pub async fn add(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        model: AddToCartModel,
    ) -> UseCaseResult<CartView> {
        let dish = self
            .dish_repo
            .find_by_id(model.dish_id)
            .await
            .map_err(storage_failure("cart: failed to load dish"))?
            .ok_or(RestaurantError::NotFound("dish"))?;

        let line = CartLine::from_dish(&dish, model.quantity).map_err(|err| {
            warn!(
                %session_id,
                dish_id = %model.dish_id,
                quantity = model.quantity,
                status = StatusCode::BAD_REQUEST.as_u16(),
                reason = %err,
                "cart: rejected line"
            );
            RestaurantError::validation(err)
        })?;

        let cart = self
            .cart_repo
            .load(session_id)
            .await
            .map_err(storage_failure("cart: failed to load cart"))?
            .with_added(line);

        self.cart_repo
            .save(session_id, user_id, cart.clone())
            .await
            .map_err(storage_failure("cart: failed to save cart"))?;

        info!(%session_id, dish_id = %model.dish_id, quantity = model.quantity, "cart: dish added");
        Ok(CartView::from(cart))
    }

    pub async fn remove(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        dish_id: Uuid,
    ) -> UseCaseResult<CartView> {
        let cart = self
            .cart_repo
            .load(session_id)
            .await
            .map_err(storage_failure("cart: failed to load cart"))?
            .without(dish_id);

        self.cart_repo
            .save(session_id, user_id, cart.clone())
            .await
            .map_err(storage_failure("cart: failed to save cart"))?;

        info!(%session_id, %dish_id, "cart: dish removed");
        Ok(CartView::from(cart))
    }

    /// Re-prices the cart against the live catalog and lists the branches that serve it.
    pub async fn checkout_summary(&self, session_id: Uuid) -> UseCaseResult<CheckoutSummary> {
        let cart = self
            .cart_repo
            .load(session_id)
            .await
            .map_err(storage_failure("cart: failed to load cart"))?;
        if cart.is_empty() {
            warn!(%session_id, status = StatusCode::BAD_REQUEST.as_u16(), "cart: checkout with empty cart");
            return Err(RestaurantError::Validation("your cart is empty".to_string()));
        }

        let dishes = self
            .dish_repo
            .find_by_ids(cart.dish_ids())
            .await
            .map_err(storage_failure("cart: failed to load dishes"))?;
        let pricing = price_lines(&cart.quantities(), &catalog_by_id(dishes));

        let priced_dishes = pricing.lines.iter().map(|line| line.dish_id).collect();
        let branches = self
            .branch_repo
            .serving_all(priced_dishes)
            .await
            .map_err(storage_failure("cart: failed to load serving branches"))?;

        Ok(CheckoutSummary::new(
            pricing,
            branches.into_iter().map(BranchDto::from).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::dishes::DishEntity,
        repositories::{
            branches::MockBranchRepository, dishes::MockDishRepository,
            session_carts::MockSessionCartRepository,
        },
        value_objects::carts::Cart,
    };
    use mockall::predicate::eq;

    fn dish(price: i64, discount: i32) -> DishEntity {
        DishEntity {
            id: Uuid::new_v4(),
            name: "Com tam".to_string(),
            description: None,
            price,
            image: None,
            category: "main".to_string(),
            discount,
            available: true,
            event_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn adding_merges_into_the_stored_cart() {
        let session_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let com_tam = dish(100_000, 10);
        let stored = Cart::default().with_added(CartLine::from_dish(&com_tam, 1).unwrap());

        let mut dish_repo = MockDishRepository::new();
        let found = com_tam.clone();
        dish_repo
            .expect_find_by_id()
            .with(eq(com_tam.id))
            .returning(move |_| {
                let found = found.clone();
                Box::pin(async move { Ok(Some(found)) })
            });

        let mut cart_repo = MockSessionCartRepository::new();
        cart_repo
            .expect_load()
            .with(eq(session_id))
            .returning(move |_| {
                let stored = stored.clone();
                Box::pin(async move { Ok(stored) })
            });
        cart_repo
            .expect_save()
            .withf(move |sid, uid, cart| {
                *sid == session_id && *uid == user_id && cart.lines[0].quantity == 2
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let usecase = CartUseCase::new(
            Arc::new(cart_repo),
            Arc::new(dish_repo),
            Arc::new(MockBranchRepository::new()),
        );

        let view = usecase
            .add(
                session_id,
                user_id,
                AddToCartModel {
                    dish_id: com_tam.id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        assert_eq!(view.total_price, 200_000);
        assert_eq!(view.discount, 20_000);
        assert_eq!(view.final_price, 180_000);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_touching_the_cart() {
        let com_tam = dish(60_000, 0);
        let mut dish_repo = MockDishRepository::new();
        let found = com_tam.clone();
        dish_repo.expect_find_by_id().returning(move |_| {
            let found = found.clone();
            Box::pin(async move { Ok(Some(found)) })
        });
        let mut cart_repo = MockSessionCartRepository::new();
        cart_repo.expect_save().never();

        let usecase = CartUseCase::new(
            Arc::new(cart_repo),
            Arc::new(dish_repo),
            Arc::new(MockBranchRepository::new()),
        );

        let result = usecase
            .add(
                Uuid::new_v4(),
                Uuid::new_v4(),
                AddToCartModel {
                    dish_id: com_tam.id,
                    quantity: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(RestaurantError::Validation(_))));
    }

    #[tokio::test]
    async fn checkout_summary_flags_cod_over_the_ceiling() {
        let session_id = Uuid::new_v4();
        let banquet = dish(5_000_001, 0);
        let stored = Cart::default().with_added(CartLine::from_dish(&banquet, 2).unwrap());

        let mut cart_repo = MockSessionCartRepository::new();
        cart_repo.expect_load().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(stored) })
        });
        let mut dish_repo = MockDishRepository::new();
        let live = banquet.clone();
        dish_repo.expect_find_by_ids().returning(move |_| {
            let live = live.clone();
            Box::pin(async move { Ok(vec![live]) })
        });
        let mut branch_repo = MockBranchRepository::new();
        branch_repo
            .expect_serving_all()
            .with(eq(vec![banquet.id]))
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = CartUseCase::new(
            Arc::new(cart_repo),
            Arc::new(dish_repo),
            Arc::new(branch_repo),
        );

        let summary = usecase.checkout_summary(session_id).await.unwrap();

        assert_eq!(summary.final_price, 10_000_002);
        assert!(summary.cod_restricted);
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() {
        let mut cart_repo = MockSessionCartRepository::new();
        cart_repo
            .expect_load()
            .returning(|_| Box::pin(async { Ok(Cart::default()) }));
        let usecase = CartUseCase::new(
            Arc::new(cart_repo),
            Arc::new(MockDishRepository::new()),
            Arc::new(MockBranchRepository::new()),
        );

        assert!(matches!(
            usecase.checkout_summary(Uuid::new_v4()).await,
            Err(RestaurantError::Validation(_))
        ));
    }
}
