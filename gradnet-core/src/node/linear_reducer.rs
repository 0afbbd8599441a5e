use super::{Accumulator, NodeId, Operation, Values};

/// `bias + Σ aᵢ·bᵢ` over an ordered list of `(a, b)` terms.
///
/// The building block of a fully-connected unit: one term per incoming
/// `(activation, weight)` pair plus a learnable bias.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearReducer {
    bias: NodeId,
    terms: Vec<(NodeId, NodeId)>,
}

impl LinearReducer {
    /// Creates a reducer with no terms; its value is just the bias.
    pub fn new(bias: NodeId) -> Self {
        LinearReducer {
            bias,
            terms: Vec::new(),
        }
    }

    pub fn with_terms(bias: NodeId, terms: Vec<(NodeId, NodeId)>) -> Self {
        LinearReducer { bias, terms }
    }

    pub fn add_term(&mut self, a: NodeId, b: NodeId) {
        self.terms.push((a, b));
    }

    pub fn bias(&self) -> NodeId {
        self.bias
    }

    pub fn terms(&self) -> &[(NodeId, NodeId)] {
        &self.terms
    }
}

impl Operation for LinearReducer {
    fn evaluate(&self, values: Values<'_>) -> Option<f64> {
        let sum = self
            .terms
            .iter()
            .fold(values.get(self.bias), |acc, &(a, b)| {
                acc + values.get(a) * values.get(b)
            });
        Some(sum)
    }

    fn backpropagate(&self, grad: f64, values: Values<'_>, acc: &mut Accumulator<'_>) {
        acc.accumulate(self.bias, grad);
        for &(a, b) in &self.terms {
            acc.accumulate(a, grad * values.get(b));
            acc.accumulate(b, grad * values.get(a));
        }
    }

    fn visit_dependencies(&self, visitor: &mut dyn FnMut(NodeId)) {
        visitor(self.bias);
        for &(a, b) in &self.terms {
            visitor(a);
            visitor(b);
        }
    }
}
