use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::dishes::DishEntity;

pub const MAX_DISCOUNT_PERCENT: i32 = 100;

/// Upper bound on a catalog price. Keeps line totals well inside `i64`.
pub const MAX_DISH_PRICE: i64 = 1_000_000_000;

/// A requested (dish, quantity) pair, before the dish is resolved against the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineRequest {
    pub dish_id: Uuid,
    pub quantity: i32,
}

/// A line resolved against the catalog. Unit price and discount are the values stored on
/// the dish at pricing time and are what orders and reservations persist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricedLine {
    pub dish_id: Uuid,
    pub name: String,
    pub unit_price: i64,
    pub discount_percent: i32,
    pub quantity: i32,
    pub item_total: i64,
    pub item_discount: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub lines: Vec<PricedLine>,
    pub total_price: i64,
    pub discount: i64,
    pub final_price: i64,
}

pub fn validate_discount_percent(discount_percent: i32) -> Result<()> {
    if !(0..=MAX_DISCOUNT_PERCENT).contains(&discount_percent) {
        bail!("discount must be between 0 and {MAX_DISCOUNT_PERCENT} percent");
    }
    Ok(())
}

/// `discount_percent / 100 * item_total`, rounded half-up to a whole currency unit.
/// Amounts are never negative, so integer arithmetic with a +50 bias is exact.
pub fn item_discount(item_total: i64, discount_percent: i32) -> i64 {
    let percent = i128::from(discount_percent.clamp(0, MAX_DISCOUNT_PERCENT));
    let discount = (i128::from(item_total) * percent + 50) / 100;
    i64::try_from(discount).unwrap_or(item_total)
}

/// Prices every request against `catalog`. Requests whose dish is missing from the catalog,
/// is no longer available, or whose quantity is not positive are dropped instead of failing
/// the whole computation.
pub fn price_lines(requests: &[LineRequest], catalog: &HashMap<Uuid, DishEntity>) -> PriceBreakdown {
    let mut breakdown = PriceBreakdown::default();

    for request in requests {
        if request.quantity <= 0 {
            continue;
        }
        let Some(dish) = catalog.get(&request.dish_id).filter(|dish| dish.available) else {
            continue;
        };

        let item_total = dish.price.saturating_mul(i64::from(request.quantity));
        let item_discount = item_discount(item_total, dish.discount);

        breakdown.total_price = breakdown.total_price.saturating_add(item_total);
        breakdown.discount = breakdown.discount.saturating_add(item_discount);
        breakdown.lines.push(PricedLine {
            dish_id: dish.id,
            name: dish.name.clone(),
            unit_price: dish.price,
            discount_percent: dish.discount,
            quantity: request.quantity,
            item_total,
            item_discount,
        });
    }

    breakdown.final_price = breakdown.total_price - breakdown.discount;
    breakdown
}

pub fn catalog_by_id(dishes: Vec<DishEntity>) -> HashMap<Uuid, DishEntity> {
    dishes.into_iter().map(|dish| (dish.id, dish)).collect()
}

/// Formats an amount with `.` thousands separators, e.g. `150.000.000`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dish(price: i64, discount: i32) -> DishEntity {
        DishEntity {
            id: Uuid::new_v4(),
            name: format!("dish-{price}"),
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
    fn single_line_with_ten_percent_discount() {
        let pho = dish(100_000, 10);
        let requests = [LineRequest {
            dish_id: pho.id,
            quantity: 2,
        }];
        let catalog = catalog_by_id(vec![pho]);

        let breakdown = price_lines(&requests, &catalog);

        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.lines[0].item_total, 200_000);
        assert_eq!(breakdown.lines[0].item_discount, 20_000);
        assert_eq!(breakdown.total_price, 200_000);
        assert_eq!(breakdown.discount, 20_000);
        assert_eq!(breakdown.final_price, 180_000);
    }

    #[test]
    fn aggregates_sum_over_lines() {
        let a = dish(45_000, 0);
        let b = dish(120_000, 25);
        let c = dish(30_000, 100);
        let requests = [
            LineRequest { dish_id: a.id, quantity: 3 },
            LineRequest { dish_id: b.id, quantity: 1 },
            LineRequest { dish_id: c.id, quantity: 2 },
        ];
        let catalog = catalog_by_id(vec![a, b, c]);

        let breakdown = price_lines(&requests, &catalog);

        let total: i64 = breakdown.lines.iter().map(|l| l.item_total).sum();
        let discount: i64 = breakdown.lines.iter().map(|l| l.item_discount).sum();
        assert_eq!(breakdown.total_price, total);
        assert_eq!(breakdown.discount, discount);
        assert_eq!(breakdown.total_price, 135_000 + 120_000 + 60_000);
        assert_eq!(breakdown.discount, 30_000 + 60_000);
        assert_eq!(breakdown.final_price, 315_000 - 90_000);
    }

    #[test]
    fn missing_dishes_and_empty_quantities_are_dropped() {
        let known = dish(50_000, 0);
        let requests = [
            LineRequest { dish_id: Uuid::new_v4(), quantity: 4 },
            LineRequest { dish_id: known.id, quantity: 0 },
            LineRequest { dish_id: known.id, quantity: 1 },
        ];
        let catalog = catalog_by_id(vec![known]);

        let breakdown = price_lines(&requests, &catalog);

        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.final_price, 50_000);
    }

    #[test]
    fn unavailable_dishes_are_dropped() {
        let on_sale = dish(40_000, 0);
        let mut withdrawn = dish(90_000, 10);
        withdrawn.available = false;
        let requests = [
            LineRequest { dish_id: withdrawn.id, quantity: 2 },
            LineRequest { dish_id: on_sale.id, quantity: 1 },
        ];
        let catalog = catalog_by_id(vec![on_sale.clone(), withdrawn]);

        let breakdown = price_lines(&requests, &catalog);

        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.lines[0].dish_id, on_sale.id);
        assert_eq!(breakdown.final_price, 40_000);
    }

    #[test]
    fn huge_quantities_do_not_overflow() {
        let pricey = dish(MAX_DISH_PRICE, 100);
        let requests = [LineRequest { dish_id: pricey.id, quantity: i32::MAX }];
        let catalog = catalog_by_id(vec![pricey]);

        let breakdown = price_lines(&requests, &catalog);

        assert_eq!(breakdown.total_price, MAX_DISH_PRICE * i64::from(i32::MAX));
        assert_eq!(breakdown.discount, breakdown.total_price);
        assert_eq!(breakdown.final_price, 0);
        assert_eq!(item_discount(i64::MAX, 100), i64::MAX);
    }

    #[test]
    fn fractional_discounts_round_half_up() {
        assert_eq!(item_discount(15, 10), 2);
        assert_eq!(item_discount(14, 10), 1);
        assert_eq!(item_discount(25, 2), 1);
        assert_eq!(item_discount(24, 2), 0);
    }

    #[test]
    fn discount_range_is_enforced() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(100).is_ok());
        assert!(validate_discount_percent(-1).is_err());
        assert!(validate_discount_percent(101).is_err());
    }

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(100_000), "100.000");
        assert_eq!(format_amount(150_000_000), "150.000.000");
    }
}
