use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::dishes::DishEntity,
    value_objects::{
        branches::BranchDto,
        orders::cod_allowed,
        pricing::{LineRequest, PriceBreakdown, PricedLine, item_discount},
    },
};

/// One cart line. Price and discount are snapshotted when the dish is added and are
/// refreshed whenever the same dish is added again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub dish_id: Uuid,
    pub name: String,
    pub unit_price: i64,
    pub discount_percent: i32,
    pub quantity: i32,
}

impl CartLine {
    pub fn from_dish(dish: &DishEntity, quantity: i32) -> Result<Self> {
        if quantity <= 0 {
            bail!("quantity must be a positive integer");
        }
        if !dish.available {
            bail!("dish '{}' is not available", dish.name);
        }

        Ok(Self {
            dish_id: dish.id,
            name: dish.name.clone(),
            unit_price: dish.price,
            discount_percent: dish.discount,
            quantity,
        })
    }
}

/// Session-scoped cart. Operations consume the cart and hand back the new value, so
/// callers always persist exactly what they computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn with_added(mut self, line: CartLine) -> Self {
        match self.lines.iter_mut().find(|l| l.dish_id == line.dish_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                existing.name = line.name;
                existing.unit_price = line.unit_price;
                existing.discount_percent = line.discount_percent;
            }
            None => self.lines.push(line),
        }
        self
    }

    pub fn without(mut self, dish_id: Uuid) -> Self {
        self.lines.retain(|l| l.dish_id != dish_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn dish_ids(&self) -> Vec<Uuid> {
        self.lines.iter().map(|l| l.dish_id).collect()
    }

    pub fn quantities(&self) -> Vec<LineRequest> {
        self.lines
            .iter()
            .map(|l| LineRequest {
                dish_id: l.dish_id,
                quantity: l.quantity,
            })
            .collect()
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }
}

/// Cart as shown to the user, totalled from the add-time snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub item_count: i64,
    pub total_price: i64,
    pub discount: i64,
    pub final_price: i64,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let total_price: i64 = cart
            .lines
            .iter()
            .map(|l| l.unit_price * i64::from(l.quantity))
            .sum();
        let discount: i64 = cart
            .lines
            .iter()
            .map(|l| item_discount(l.unit_price * i64::from(l.quantity), l.discount_percent))
            .sum();

        Self {
            item_count: cart.item_count(),
            lines: cart.lines,
            total_price,
            discount,
            final_price: total_price - discount,
        }
    }
}

/// Cart re-priced against the live catalog, with the branches able to serve all of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSummary {
    pub lines: Vec<PricedLine>,
    pub total_price: i64,
    pub discount: i64,
    pub final_price: i64,
    pub cod_restricted: bool,
    pub branches: Vec<BranchDto>,
}

impl CheckoutSummary {
    pub fn new(pricing: PriceBreakdown, branches: Vec<BranchDto>) -> Self {
        Self {
            cod_restricted: !cod_allowed(pricing.final_price),
            lines: pricing.lines,
            total_price: pricing.total_price,
            discount: pricing.discount,
            final_price: pricing.final_price,
            branches,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartModel {
    pub dish_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dish(name: &str, price: i64, discount: i32) -> DishEntity {
        DishEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
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

    #[test]
    fn adding_same_dish_merges_quantity_and_refreshes_snapshot() {
        let mut pho = dish("Pho", 60_000, 0);
        let cart = Cart::default().with_added(CartLine::from_dish(&pho, 1).unwrap());

        pho.price = 65_000;
        pho.discount = 5;
        let cart = cart.with_added(CartLine::from_dish(&pho, 2).unwrap());

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.lines[0].unit_price, 65_000);
        assert_eq!(cart.lines[0].discount_percent, 5);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn removing_a_dish_leaves_the_others() {
        let pho = dish("Pho", 60_000, 0);
        let tea = dish("Tea", 15_000, 0);
        let cart = Cart::default()
            .with_added(CartLine::from_dish(&pho, 1).unwrap())
            .with_added(CartLine::from_dish(&tea, 2).unwrap())
            .without(pho.id);

        assert_eq!(cart.dish_ids(), vec![tea.id]);
        assert!(!cart.is_empty());
        assert!(cart.without(tea.id).is_empty());
    }

    #[test]
    fn rejects_non_positive_quantity_and_unavailable_dish() {
        let mut pho = dish("Pho", 60_000, 0);
        assert!(CartLine::from_dish(&pho, 0).is_err());
        assert!(CartLine::from_dish(&pho, -2).is_err());

        pho.available = false;
        assert!(CartLine::from_dish(&pho, 1).is_err());
    }

    #[test]
    fn view_totals_use_snapshots() {
        let pho = dish("Pho", 100_000, 10);
        let view = CartView::from(Cart::default().with_added(CartLine::from_dish(&pho, 2).unwrap()));

        assert_eq!(view.item_count, 2);
        assert_eq!(view.total_price, 200_000);
        assert_eq!(view.discount, 20_000);
        assert_eq!(view.final_price, 180_000);
    }

    #[test]
    fn cart_round_trips_through_json_lines() {
        let pho = dish("Pho", 60_000, 10);
        let cart = Cart::default().with_added(CartLine::from_dish(&pho, 2).unwrap());

        let value = serde_json::to_value(&cart.lines).unwrap();
        let lines: Vec<CartLine> = serde_json::from_value(value).unwrap();

        assert_eq!(Cart::new(lines), cart);
    }
}
