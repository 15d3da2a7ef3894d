use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{orders::OrderEntity, payments::PaymentEntity},
    value_objects::enums::{payment_methods::PaymentMethod, payment_statuses::PaymentStatus},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevenueView {
    Yearly,
    Monthly,
}

/// Half-open `[start, end)` window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenuePeriod {
    pub year: i32,
    pub month: Option<u32>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("{year}-{month:02} is not a valid period"))
}

impl RevenuePeriod {
    pub fn resolve(query: &RevenueQuery, now: DateTime<Utc>) -> Result<Self> {
        let year = query.year.unwrap_or_else(|| now.year());

        match query.month {
            None => Ok(Self {
                year,
                month: None,
                start: first_instant(year, 1)?,
                end: first_instant(year + 1, 1)?,
            }),
            Some(month) if (1..=12).contains(&month) => {
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                Ok(Self {
                    year,
                    month: Some(month),
                    start: first_instant(year, month)?,
                    end: first_instant(next_year, next_month)?,
                })
            }
            Some(month) => bail!("month must be between 1 and 12, got {month}"),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn view(&self) -> RevenueView {
        match self.month {
            Some(_) => RevenueView::Monthly,
            None => RevenueView::Yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevenueSource {
    Order,
    Reservation,
}

/// One completed monetary event, regardless of whether it came from a payment record
/// or from a cash on delivery order that never got one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueEvent {
    pub source: RevenueSource,
    pub reference_id: Uuid,
    pub method: PaymentMethod,
    pub amount: i64,
    pub discount: i64,
    pub at: DateTime<Utc>,
}

impl RevenueEvent {
    /// `None` for payments that are not completed or reference nothing.
    pub fn from_payment(payment: &PaymentEntity) -> Option<Self> {
        if PaymentStatus::from_str(&payment.status) != Some(PaymentStatus::Completed) {
            return None;
        }
        let (source, reference_id) = match (payment.order_id, payment.reservation_id) {
            (Some(order_id), _) => (RevenueSource::Order, order_id),
            (None, Some(reservation_id)) => (RevenueSource::Reservation, reservation_id),
            (None, None) => return None,
        };

        Some(Self {
            source,
            reference_id,
            method: PaymentMethod::from_str(&payment.payment_method)?,
            amount: payment.final_amount,
            discount: payment.discount,
            at: payment.paid_at.unwrap_or(payment.created_at),
        })
    }

    pub fn from_cod_order(order: &OrderEntity) -> Self {
        Self {
            source: RevenueSource::Order,
            reference_id: order.id,
            method: PaymentMethod::Cash,
            amount: order.final_price,
            discount: order.discount,
            at: order.paid_at.unwrap_or(order.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodTotals {
    pub bank: i64,
    pub momo: i64,
    pub cash: i64,
}

impl MethodTotals {
    fn add(&mut self, method: PaymentMethod, amount: i64) {
        match method {
            PaymentMethod::Bank => self.bank += amount,
            PaymentMethod::Momo => self.momo += amount,
            PaymentMethod::Cash => self.cash += amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: u32,
    pub revenue: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueReport {
    pub year: i32,
    pub month: Option<u32>,
    pub view: RevenueView,
    pub total_revenue: i64,
    pub total_discount: i64,
    pub order_revenue: i64,
    pub order_count: i64,
    pub reservation_revenue: i64,
    pub reservation_count: i64,
    pub by_method: MethodTotals,
    pub monthly: Vec<MonthlyRevenue>,
    pub events: Vec<RevenueEvent>,
}

impl RevenueReport {
    /// Aggregates the events falling inside `period`; events outside it are ignored.
    pub fn aggregate(period: &RevenuePeriod, events: Vec<RevenueEvent>) -> Self {
        let view = period.view();
        let mut report = Self {
            year: period.year,
            month: period.month,
            view,
            total_revenue: 0,
            total_discount: 0,
            order_revenue: 0,
            order_count: 0,
            reservation_revenue: 0,
            reservation_count: 0,
            by_method: MethodTotals::default(),
            monthly: match view {
                RevenueView::Yearly => (1..=12)
                    .map(|month| MonthlyRevenue {
                        month,
                        revenue: 0,
                        count: 0,
                    })
                    .collect(),
                RevenueView::Monthly => Vec::new(),
            },
            events: Vec::new(),
        };

        let mut events: Vec<_> = events
            .into_iter()
            .filter(|event| period.contains(event.at))
            .collect();
        events.sort_by(|a, b| b.at.cmp(&a.at));

        for event in &events {
            report.total_revenue += event.amount;
            report.total_discount += event.discount;
            report.by_method.add(event.method, event.amount);

            match event.source {
                RevenueSource::Order => {
                    report.order_revenue += event.amount;
                    report.order_count += 1;
                }
                RevenueSource::Reservation => {
                    report.reservation_revenue += event.amount;
                    report.reservation_count += 1;
                }
            }

            if let Some(bucket) = report.monthly.get_mut(event.at.month0() as usize) {
                bucket.revenue += event.amount;
                bucket.count += 1;
            }
        }

        report.events = events;
        report
    }
}
