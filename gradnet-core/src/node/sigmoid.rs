use super::{Accumulator, NodeId, Operation, Values};

/// Logistic squashing of a single input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    input: NodeId,
}

impl Sigmoid {
    pub fn new(input: NodeId) -> Self {
        Sigmoid { input }
    }

    pub fn input(&self) -> NodeId {
        self.input
    }
}

/// `1 / (1 + e^(-x))`, computed without overflowing `exp` for large |x|.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Operation for Sigmoid {
    fn evaluate(&self, values: Values<'_>) -> Option<f64> {
        Some(logistic(values.get(self.input)))
    }

    // d/dx σ(x) = σ(x)(1 - σ(x)), equal to e^x / (1 + e^x)^2 without its overflow at large x.
    fn backpropagate(&self, grad: f64, values: Values<'_>, acc: &mut Accumulator<'_>) {
        let s = logistic(values.get(self.input));
        acc.accumulate(self.input, grad * s * (1.0 - s));
    }

    fn visit_dependencies(&self, visitor: &mut dyn FnMut(NodeId)) {
        visitor(self.input);
    }
}
