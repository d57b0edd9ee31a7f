//! Scales a buffer in place and sums it back.
//!
//! Run with `RUST_LOG=trace` to see the phase split of each traversal.

use simdwalk::ops::{Scale, Sum};
use simdwalk::simd::{native_lanes, BACKEND, REGISTER_BYTES};
use simdwalk::utils::AlignedVec;

/// Multiplies every element of `data` by `factor`.
fn scale(data: &mut [f32], factor: f32) {
    simdwalk::for_each_mut(data, Scale::new(factor));
}

fn main() -> simdwalk::Result<()> {
    env_logger::init();

    println!(
        "backend: {BACKEND} ({REGISTER_BYTES}-byte registers, {} f32 lanes)",
        native_lanes::<f32>()
    );

    let values: Vec<f32> = (1..=7).map(|i| i as f32).collect();
    let mut buffer = AlignedVec::from_slice(&values, REGISTER_BYTES)?;

    println!("input:  {:?}", &buffer[..]);
    scale(&mut buffer, 10.0);
    println!("scaled: {:?}", &buffer[..]);

    let total = simdwalk::for_each(&buffer, Sum::<f32>::default());
    println!("sum:    {}", total.value());

    // Starting one element in, the first lanes are visited as scalars.
    let plan = simdwalk::plan(&buffer[1..]);
    println!("offset plan: {plan}");

    Ok(())
}
