use gradnet_core::Sample;

// Shared helpers for the integration tests.
// Added allow(dead_code) because each test binary only uses part of this module.

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two well separated clusters on a fixed grid: class 0 near (0.2, 0.2), class 1 near (0.8, 0.8).
#[allow(dead_code)]
pub fn separable_samples() -> Vec<Sample> {
    let offsets = [-0.1, -0.05, 0.0, 0.05, 0.1];
    let mut samples = Vec::new();
    for &dx in &offsets {
        for &dy in &offsets {
            samples.push(Sample::new(vec![0.2 + dx, 0.2 + dy], 0));
            samples.push(Sample::new(vec![0.8 + dx, 0.8 + dy], 1));
        }
    }
    samples
}
