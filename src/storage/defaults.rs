//! Synthetic worker directory entries.
//!
//! An empty directory is filled with believable workers so a fresh install
//! has something to browse. Names come from `fake`; the other attributes
//! are drawn from fixed ranges.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::Rng;

use crate::config::{SEED_EXPERIENCE_YEARS, SEED_PRICE, SEED_RATING_TENTHS};
use crate::storage::types::{JobCategory, WorkerProfile};

/// Prefix of synthetic worker ids.
pub const SEED_ID_PREFIX: &str = "seed-";

/// Generate `count` synthetic workers.
///
/// Job categories cycle in [`JobCategory::ALL`] order so every category is
/// represented once `count >= 4`.
pub fn generate_seed_workers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<WorkerProfile> {
    (0..count).map(|i| seed_worker(rng, i)).collect()
}

/// Contact address of the synthetic worker numbered `n`.
pub fn seed_email(n: usize) -> String {
    format!("worker{}@example.com", n)
}

fn seed_worker<R: Rng + ?Sized>(rng: &mut R, index: usize) -> WorkerProfile {
    let first: String = FirstName(EN).fake_with_rng(rng);
    let last: String = LastName(EN).fake_with_rng(rng);
    let job_type = JobCategory::ALL[index % JobCategory::ALL.len()];

    WorkerProfile {
        id: format!("{}{}", SEED_ID_PREFIX, index),
        name: format!("{} {}", first, last),
        email: seed_email(index),
        phone: format!("+213 {}", rng.random_range(500_000_000u32..600_000_000)),
        job_type,
        experience_years: rng.random_range(SEED_EXPERIENCE_YEARS.0..=SEED_EXPERIENCE_YEARS.1),
        price: f64::from(rng.random_range(SEED_PRICE.0..=SEED_PRICE.1)),
        rating: random_rating(rng, SEED_RATING_TENTHS),
        diploma_name: None,
        cv_name: None,
        certificate_names: Vec::new(),
    }
}

/// Draw a one-decimal rating between `bounds` (inclusive, in tenths).
pub fn random_rating<R: Rng + ?Sized>(rng: &mut R, bounds: (u32, u32)) -> f64 {
    f64::from(rng.random_range(bounds.0..=bounds.1)) / 10.0
}
