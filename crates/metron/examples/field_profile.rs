use anyhow::{Context, Result};
use metron::array::Array;
use metron::axes::Axes;
use metron::axis::{Axis, Coordinates};
use metron::indexer::IndexSpec;
use metron::Scalar;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;

/// Soil temperature over depth and time of day: a damped surface
/// oscillation plus measurement noise.
fn synthesize(depths: &[f64], hours: &[f64]) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut values = Vec::with_capacity(depths.len() * hours.len());
    for depth in depths {
        let damping = (-depth / 0.6).exp();
        for hour in hours {
            let phase = std::f64::consts::TAU * hour / 24.0;
            let noise = rng.gen_range(-0.05..0.05);
            values.push(283.0 + 8.0 * damping * phase.sin() + noise);
        }
    }
    values
}

fn main() -> Result<()> {
    env_logger::init();

    let depths: Vec<f64> = (0..6).map(|i| 0.25 * i as f64).collect();
    let hours: Vec<f64> = (0..8).map(|i| 3.0 * i as f64).collect();

    let values = ArrayD::from_shape_vec(
        IxDyn(&[depths.len(), hours.len()]),
        synthesize(&depths, &hours),
    )
    .context("field values do not fill the grid")?;

    let axes = Axes::try_from_pairs([
        ("depth", Axis::Coordinates(Coordinates::new(depths, "m"))),
        ("time", Axis::Coordinates(Coordinates::new(hours, "h"))),
    ])?;
    let field = Array::try_new(values, "K", axes)?;
    println!("field: {}", field);

    // The vertical gradient draws its spacing, and its unit, from the
    // depth axis.
    let lapse = field.gradient_along("depth")?;
    println!("steepest lapse: {}", lapse.at(&[0, 2])?);

    // Coordinate lookups convert the target first: 80 cm lands on the
    // 0.75 m ring.
    let ring = field.nearest("depth", &Scalar::new(80.0, "cm"))?;
    println!("nearest ring to 80 cm: position {}", ring);

    // Slice out the morning hours; the time axis follows the values.
    let morning = field.select(&[
        IndexSpec::All,
        IndexSpec::Range {
            start: None,
            stop: Some(4),
            step: 1,
        },
    ])?;
    println!("morning window: {}", morning);

    // Average over time for the mean vertical profile.
    let profile = morning.mean_axis(-1)?;
    println!("mean profile: {}", profile);

    // Integrate over depth for the column total at each hour.
    let column = field.trapz(Some(0))?;
    println!("column integral: {}", column);

    Ok(())
}
