//! Synthetic dashboard metrics.
//!
//! Values are random within fixed ranges; nothing here is backed by real
//! aggregation.
//!
//! | card        | raw value        | change        |
//! |-------------|------------------|---------------|
//! | revenue     | 25 000 – 35 000  | -10 % – +20 % |
//! | revenue (*) | 25 000 – 34 999  | +5 % – +24 %  |
//! | orders      | 120 – 169        | +3 % – +17 %  |
//! | users       | 2 000 – 2 499    | +8 % – +25 %  |
//! | restaurants | 80 – 99          | +2 % – +11 %  |
//!
//! (*) revenue card inside the four-card metrics list.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::metric::{ChangeType, DashboardMetric};

const REVENUE_RANGE: RangeInclusive<u64> = 25_000..=35_000;
const REVENUE_CHANGE_RANGE: RangeInclusive<i32> = -10..=20;

const CARD_REVENUE_RANGE: RangeInclusive<u64> = 25_000..=34_999;
const CARD_REVENUE_CHANGE: RangeInclusive<i32> = 5..=24;
const ORDERS_RANGE: RangeInclusive<u64> = 120..=169;
const ORDERS_CHANGE: RangeInclusive<i32> = 3..=17;
const USERS_RANGE: RangeInclusive<u64> = 2_000..=2_499;
const USERS_CHANGE: RangeInclusive<i32> = 8..=25;
const RESTAURANTS_RANGE: RangeInclusive<u64> = 80..=99;
const RESTAURANTS_CHANGE: RangeInclusive<i32> = 2..=11;

const CURRENCY_CODE: &str = "INR";
const CURRENCY_SYMBOL: &str = "₹";

/// Random metric generator over any RNG, so tests can seed it.
pub struct MetricsGenerator<R: Rng> {
    rng: R,
}

impl MetricsGenerator<rand::rngs::ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> MetricsGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Total revenue card with a change that may be negative.
    pub fn revenue(&mut self) -> DashboardMetric {
        let revenue = self.rng.random_range(REVENUE_RANGE);
        let change = self.rng.random_range(REVENUE_CHANGE_RANGE);
        let mut card = revenue_card(revenue, change);
        card.currency = Some(CURRENCY_CODE.to_string());
        card
    }

    /// The four overview cards: revenue, orders, users, restaurants.
    pub fn overview(&mut self) -> Vec<DashboardMetric> {
        let revenue = self.rng.random_range(CARD_REVENUE_RANGE);
        let orders = self.rng.random_range(ORDERS_RANGE);
        let users = self.rng.random_range(USERS_RANGE);
        let restaurants = self.rng.random_range(RESTAURANTS_RANGE);

        vec![
            revenue_card(revenue, self.rng.random_range(CARD_REVENUE_CHANGE)),
            card(
                "Total Orders",
                orders.to_string(),
                self.rng.random_range(ORDERS_CHANGE),
                "📦",
                orders,
            ),
            card(
                "Total Users",
                group_thousands(users),
                self.rng.random_range(USERS_CHANGE),
                "👥",
                users,
            ),
            card(
                "Restaurants",
                restaurants.to_string(),
                self.rng.random_range(RESTAURANTS_CHANGE),
                "🏪",
                restaurants,
            ),
        ]
    }
}

fn revenue_card(revenue: u64, change: i32) -> DashboardMetric {
    card(
        "Total Revenue",
        format!("{CURRENCY_SYMBOL}{}", group_thousands(revenue)),
        change,
        "💰",
        revenue,
    )
}

fn card(title: &str, value: String, change: i32, icon: &str, raw_value: u64) -> DashboardMetric {
    DashboardMetric {
        title: title.to_string(),
        value,
        change: format_change(change),
        change_type: ChangeType::of(change),
        icon: icon.to_string(),
        raw_value,
        currency: None,
    }
}

/// `29431` → `29,431`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `12` → `+12%`, `-3` → `-3%`, `0` → `0%`.
pub fn format_change(percent: i32) -> String {
    if percent > 0 {
        format!("+{percent}%")
    } else {
        format!("{percent}%")
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn digits(value: &str) -> u64 {
        value
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap()
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(29_431), "29,431");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn change_formatting() {
        assert_eq!(format_change(12), "+12%");
        assert_eq!(format_change(-3), "-3%");
        assert_eq!(format_change(0), "0%");
        assert_eq!(ChangeType::of(0), ChangeType::Positive);
        assert_eq!(ChangeType::of(-1), ChangeType::Negative);
    }

    #[test]
    fn revenue_stays_in_range() {
        let mut generator = MetricsGenerator::new(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            let card = generator.revenue();
            assert!(REVENUE_RANGE.contains(&card.raw_value));
            assert!(card.value.starts_with('₹'));
            assert_eq!(digits(&card.value), card.raw_value);
            assert_eq!(card.currency.as_deref(), Some("INR"));

            let change: i32 = card.change.trim_end_matches('%').parse().unwrap();
            assert!(REVENUE_CHANGE_RANGE.contains(&change));
            assert_eq!(card.change_type, ChangeType::of(change));
        }
    }

    #[test]
    fn overview_cards_stay_in_range() {
        let mut generator = MetricsGenerator::new(StdRng::seed_from_u64(42));
        for _ in 0..500 {
            let cards = generator.overview();
            assert_eq!(cards.len(), 4);

            let ranges = [
                (&CARD_REVENUE_RANGE, &CARD_REVENUE_CHANGE),
                (&ORDERS_RANGE, &ORDERS_CHANGE),
                (&USERS_RANGE, &USERS_CHANGE),
                (&RESTAURANTS_RANGE, &RESTAURANTS_CHANGE),
            ];
            for (card, (value_range, change_range)) in cards.iter().zip(ranges) {
                assert!(value_range.contains(&card.raw_value), "{card:?}");
                assert!(card.change.starts_with('+'));
                let change: i32 = card.change.trim_end_matches('%').parse().unwrap();
                assert!(change_range.contains(&change));
                assert_eq!(card.change_type, ChangeType::Positive);
                assert_eq!(digits(&card.value), card.raw_value);
            }
        }
    }

    #[test]
    fn overview_titles() {
        let cards = MetricsGenerator::from_thread_rng().overview();
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Total Revenue", "Total Orders", "Total Users", "Restaurants"]
        );
        assert!(cards[2].value.contains(','));
    }
}
