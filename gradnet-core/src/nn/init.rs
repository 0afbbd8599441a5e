use crate::error::GradNetError;
use crate::graph::Graph;
use crate::node::NodeId;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draws one sample from `N(0, stddev²)` using the caller's generator.
///
/// # Errors
/// Returns `InvalidInitialization` if `stddev` is negative or not finite.
pub fn normal_sample<R: Rng + ?Sized>(rng: &mut R, stddev: f64) -> Result<f64, GradNetError> {
    if !(stddev.is_finite() && stddev >= 0.0) {
        return Err(GradNetError::InvalidInitialization(format!(
            "normal(0, {}): standard deviation must be finite and non-negative",
            stddev
        )));
    }
    let dist = Normal::new(0.0, stddev).map_err(|e| {
        GradNetError::InvalidInitialization(format!("normal(0, {}): {}", stddev, e))
    })?;
    Ok(dist.sample(rng))
}

/// Registers a parameter whose initial value is drawn from `N(0, stddev²)`.
///
/// The generator is owned by the caller, so a fixed seed gives the same network every run.
pub fn normal_parameter<R: Rng + ?Sized>(
    graph: &mut Graph,
    rng: &mut R,
    stddev: f64,
) -> Result<NodeId, GradNetError> {
    let value = normal_sample(rng, stddev)?;
    Ok(graph.parameter(value))
}

/// Redraws every trainable parameter of `graph` from `N(0, stddev²)`, in registration order.
pub fn normal_<R: Rng + ?Sized>(
    graph: &mut Graph,
    rng: &mut R,
    stddev: f64,
) -> Result<(), GradNetError> {
    let params = graph.parameters().to_vec();
    for param in params {
        let value = normal_sample(rng, stddev)?;
        graph.set_value(param, value)?;
    }
    Ok(())
}

/// Sets every trainable parameter to 0.
pub fn zeros_(graph: &mut Graph) -> Result<(), GradNetError> {
    fill_(graph, 0.0)
}

/// Sets every trainable parameter to `value`.
pub fn fill_(graph: &mut Graph, value: f64) -> Result<(), GradNetError> {
    let params = graph.parameters().to_vec();
    for param in params {
        graph.set_value(param, value)?;
    }
    Ok(())
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
