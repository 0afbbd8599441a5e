use super::{Accumulator, NodeId, Operation, Values};

/// `Σ (aᵢ - bᵢ)²` over an ordered list of `(a, b)` pairs. Used as the cost node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SquaredError {
    terms: Vec<(NodeId, NodeId)>,
}

impl SquaredError {
    pub fn new() -> Self {
        SquaredError { terms: Vec::new() }
    }

    pub fn with_terms(terms: Vec<(NodeId, NodeId)>) -> Self {
        SquaredError { terms }
    }

    pub fn add_term(&mut self, a: NodeId, b: NodeId) {
        self.terms.push((a, b));
    }

    pub fn terms(&self) -> &[(NodeId, NodeId)] {
        &self.terms
    }
}

impl Operation for SquaredError {
    fn evaluate(&self, values: Values<'_>) -> Option<f64> {
        Some(
            self.terms
                .iter()
                .map(|&(a, b)| (values.get(a) - values.get(b)).powi(2))
                .sum(),
        )
    }

    fn backpropagate(&self, grad: f64, values: Values<'_>, acc: &mut Accumulator<'_>) {
        for &(a, b) in &self.terms {
            let (va, vb) = (values.get(a), values.get(b));
            acc.accumulate(a, grad * 2.0 * (va - vb));
            acc.accumulate(b, grad * 2.0 * (vb - va));
        }
    }

    fn visit_dependencies(&self, visitor: &mut dyn FnMut(NodeId)) {
        for &(a, b) in &self.terms {
            visitor(a);
            visitor(b);
        }
    }
}
