//! Synthetic sales data for demos and tests.
//!
//! Produces one row per SKU per day with a Poisson base volume, a weekend
//! boost and a yearly seasonal swing. The RNG is seeded so a given
//! `(end, days, seed)` always yields the same rows.

use super::record::TransactionRecord;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Fixed sample catalog: (sku, product name, category)
pub const SAMPLE_CATALOG: [(&str, &str, &str); 15] = [
    ("SKU-001", "Premium Coffee Beans", "Beverages"),
    ("SKU-002", "Organic Tea Blend", "Beverages"),
    ("SKU-003", "Artisan Chocolate", "Confectionery"),
    ("SKU-004", "Natural Honey", "Pantry"),
    ("SKU-005", "Gourmet Crackers", "Snacks"),
    ("SKU-006", "Specialty Jam", "Pantry"),
    ("SKU-007", "Craft Beer Pack", "Beverages"),
    ("SKU-008", "Wine Selection", "Beverages"),
    ("SKU-009", "Cheese Platter", "Dairy"),
    ("SKU-010", "Nuts & Seeds Mix", "Snacks"),
    ("SKU-011", "Dried Fruits", "Snacks"),
    ("SKU-012", "Herbal Soap", "Personal Care"),
    ("SKU-013", "Essential Oil", "Personal Care"),
    ("SKU-014", "Handmade Candle", "Home"),
    ("SKU-015", "Ceramic Mug", "Home"),
];

const WEEKEND_BOOST: f64 = 1.3;
const SEASONAL_AMPLITUDE: f64 = 0.3;

/// Generate sample records for every day in `[end - days, end]`
///
/// **Public** - main entry point for the sample source
///
/// Days on which a SKU sells nothing are omitted.
pub fn generate_sample(end: NaiveDate, days: u32, seed: u64) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = end - Duration::days(i64::from(days));
    let mut records = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let weekend = if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            WEEKEND_BOOST
        } else {
            1.0
        };
        let seasonal =
            1.0 + SEASONAL_AMPLITUDE * (f64::from(date.ordinal()) / 365.0 * 2.0 * PI).sin();

        for (i, (sku, name, category)) in SAMPLE_CATALOG.iter().enumerate() {
            let base = poisson(&mut rng, 5.0 + i as f64 * 2.0);
            let quantity = (base as f64 * weekend * seasonal) as u64;
            let price = 10.0 + i as f64 * 3.0 + rng.gen_range(-2.0..2.0);

            if quantity > 0 {
                records.push(TransactionRecord::new(
                    date,
                    *sku,
                    *name,
                    *category,
                    quantity,
                    round_cents(price),
                ));
            }
        }
    }

    debug!(
        "Generated {} sample records from {} to {} (seed {})",
        records.len(),
        start,
        end,
        seed
    );

    records
}

/// Knuth's multiplication method; fine for the small means used here
fn poisson(rng: &mut StdRng, lambda: f64) -> u64 {
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p = 1.0;

    loop {
        p *= rng.gen::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
