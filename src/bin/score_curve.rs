// src/bin/score_curve.rs
//
// Sweeps an offer's price across 0.5×..2.0× the customer's reference price
// and prints one JSON sample per step. Pipe the output into whatever plots
// it; this binary only produces the curve data.
//
// Run with:  cargo run --bin score_curve
// Logs:      RUST_LOG=buyer_model=debug cargo run --bin score_curve

use buyer_model::{Customer, Evaluation, ProductOffer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const SWEEP_SAMPLES: usize = 100;
const HISTORY_SIGHTINGS: usize = 12;

/// One point of the score-vs-price curve, bundled with everything a
/// plotting frontend needs to annotate it.
#[derive(Serialize)]
struct CurveSample<'a> {
    price: f64,
    offer: &'a ProductOffer,
    evaluation: Evaluation,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut customer = Customer::with_default_sensitivity(vec![3.0, 6.0, 8.0], 27.0);

    // Seed a plausible history: one chocolate bar seen a dozen times at
    // prices wobbling around a dollar.
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..HISTORY_SIGHTINGS {
        let sighting = ProductOffer::new(
            rng.gen_range(0.90..=1.10),
            "snickers",
            1,
            vec![5.0, 5.0, 5.0],
        );
        customer.record_observation(&sighting);
    }

    let probe = ProductOffer::new(1.0, "snickers", 1, vec![5.0, 5.0, 5.0]);
    let baseline = customer
        .appraise(&probe)
        .expect("seeded customer must appraise the probe");
    let reference = baseline
        .reference_price
        .expect("direct match must produce a reference price");

    // Same memory snapshot for every sample: appraise never records, so
    // the probes cannot contaminate the history they are plotted against.
    for step in 0..SWEEP_SAMPLES {
        let t = step as f64 / (SWEEP_SAMPLES - 1) as f64;
        let price = reference * (0.5 + 1.5 * t);
        let offer = ProductOffer::new(price, probe.sku.clone(), probe.category, probe.features.clone());

        let evaluation = customer
            .appraise(&offer)
            .expect("sweep offers share the probe's shape");
        let sample = CurveSample {
            price,
            offer: &offer,
            evaluation,
        };
        println!(
            "{}",
            serde_json::to_string(&sample).expect("curve samples are plain data")
        );
    }
}
