use anyhow::Result;
use metron::{Scalar, Vector};

fn main() -> Result<()> {
    env_logger::init();

    // A highway speed, converted into coherent units.
    let speed = Scalar::new(120.0, "km / h");
    let coherent = speed.withunit("m / s")?;
    println!("{} = {}", speed, coherent);

    // Kinetic energy of a 1500 kg car at that speed.
    let mass = Scalar::new(1500.0, "kg");
    let energy = 0.5 * &(&mass * &coherent.powi(2));
    println!("kinetic energy: {}", energy.withunit("kJ")?);

    // Free fall sampled every half second.
    let gravity = Scalar::new(9.81, "m / s^2");
    let times = Vector::new(vec![0.0, 0.5, 1.0, 1.5, 2.0], "s");
    let drops = &(&times.powi(2) * &gravity) * 0.5;
    println!("fall distance: {}", drops);

    // The derivative against the sample times recovers the speeds.
    let speeds = drops.gradient_points(&times)?;
    println!("fall speed:    {}", speeds);

    // Additive arithmetic refuses incommensurable operands.
    let distance = Scalar::new(3.0, "m");
    let duration = Scalar::new(2.0, "s");
    if let Err(error) = distance.try_add(&duration) {
        println!("refused: {}", error);
    }

    // Trigonometry reads the stored value as-is, so degrees must be
    // rescaled to radians first.
    let angle = Scalar::new(30.0, "deg").withunit("rad")?;
    println!("sin(30 deg) = {:.3}", angle.sin()?.data());

    Ok(())
}
