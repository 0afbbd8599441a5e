use crate::error::GradNetError;
use crate::graph::Graph;
use crate::node::NodeId;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for parameter {parameter_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        parameter_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Gradient is NaN or infinite for parameter {parameter_index}: analytical {analytical:?}, numerical {numerical:?}")]
    NonFinite {
        parameter_index: usize,
        analytical: f64,
        numerical: f64,
    },

    #[error("Gradient check requires a sorted graph")]
    Unsorted,

    #[error(transparent)]
    Graph(#[from] GradNetError),
}

/// Compares the back-propagated gradient of `cost` with respect to every trainable
/// parameter against the centered finite difference `(f(p+ε) - f(p-ε)) / 2ε`.
///
/// A parameter passes when the two agree within `tolerance`, either absolutely or
/// relative to the larger magnitude. Parameter values are restored afterwards and the
/// graph is left holding the analytical gradients.
pub fn check_gradients(
    graph: &mut Graph,
    cost: NodeId,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    if !graph.is_sorted() {
        return Err(GradCheckError::Unsorted);
    }

    graph.evaluate_all();
    graph.backpropagate_from(cost)?;
    let params = graph.parameters().to_vec();
    let analytical = params
        .iter()
        .map(|&p| graph.grad(p))
        .collect::<Result<Vec<f64>, _>>()?;

    let mut outcome = Ok(());
    for (i, &param) in params.iter().enumerate() {
        let original = graph.value(param)?;

        graph.set_value(param, original + epsilon)?;
        graph.evaluate_all();
        let loss_plus = graph.value(cost)?;

        graph.set_value(param, original - epsilon)?;
        graph.evaluate_all();
        let loss_minus = graph.value(cost)?;

        graph.set_value(param, original)?;

        let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
        let analytic = analytical[i];
        if !numerical.is_finite() || !analytic.is_finite() {
            outcome = Err(GradCheckError::NonFinite {
                parameter_index: i,
                analytical: analytic,
                numerical,
            });
            break;
        }
        if !relative_eq!(
            analytic,
            numerical,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            outcome = Err(GradCheckError::GradientMismatch {
                parameter_index: i,
                analytical: analytic,
                numerical,
                difference: (analytic - numerical).abs(),
            });
            break;
        }
    }

    graph.evaluate_all();
    graph.backpropagate_from(cost)?;
    outcome
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
