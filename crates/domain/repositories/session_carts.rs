use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::carts::Cart;

#[async_trait]
#[automock]
pub trait SessionCartRepository {
    /// Empty cart when the session has none stored.
    async fn load(&self, session_id: Uuid) -> Result<Cart>;
    async fn save(&self, session_id: Uuid, user_id: Uuid, cart: Cart) -> Result<()>;
    async fn clear(&self, session_id: Uuid) -> Result<()>;
}
