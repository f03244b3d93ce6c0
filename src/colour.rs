//! Colouring algorithms.

/// Grayscale intensity for an escape count: `floor(255 * sqrt(iteration / max_iterations))`.
///
/// Points that never escaped (`iteration >= max_iterations`) are black.
pub fn grayscale(iteration: u32, max_iterations: u32) -> u8 {
    if iteration >= max_iterations {
        return 0;
    }

    let ratio = f64::from(iteration) / f64::from(max_iterations);
    (255.0 * ratio.sqrt()).floor() as u8
}
