use std::time::Instant;

use log::{debug, log_enabled, Level};
use mandelbrot_bench::{
    big_float::BigFloat,
    config::{Config, ConfigError, Mode},
    grid::{self, Output},
    histogram::IterationHistogram,
    numeric::Scalar,
};

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let config = Config::default();
    benchmark::<f64>(&config)?;
    benchmark::<BigFloat>(&config)?;

    Ok(())
}

fn benchmark<N: Scalar>(config: &Config) -> Result<(), ConfigError> {
    println!(
        "Mandelbrot escape-time benchmark: {}",
        N::name(config.precision_bits)
    );

    let start = Instant::now();
    let output = grid::render::<N>(config)?;
    let elapsed = start.elapsed();

    debug!("{:?}", output);
    println!("Took {:?}", elapsed);

    // Untimed second pass that keeps the counts.
    if log_enabled!(Level::Debug) {
        let config = config.clone().with_mode(Mode::Materialize);
        if let Output::Frame(frame) = grid::render::<N>(&config)? {
            debug!("{}", IterationHistogram::from_frame(&frame));
        }
    }

    Ok(())
}
