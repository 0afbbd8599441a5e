use super::{Accumulator, NodeId, Operation, Values};

/// A value fed from outside the graph (a feature, a target label).
///
/// Inputs have no dependencies. Their accumulator is filled during a backward pass
/// but nothing consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    initial: f64,
}

impl Input {
    pub fn new(initial: f64) -> Self {
        Input { initial }
    }

    /// Value the node holds right after registration.
    pub fn initial_value(&self) -> f64 {
        self.initial
    }
}

impl Operation for Input {
    fn evaluate(&self, _values: Values<'_>) -> Option<f64> {
        None
    }

    fn backpropagate(&self, _grad: f64, _values: Values<'_>, _acc: &mut Accumulator<'_>) {}

    fn visit_dependencies(&self, _visitor: &mut dyn FnMut(NodeId)) {}
}

/// A trainable leaf, adjusted by [`Graph::update_parameters`](crate::graph::Graph::update_parameters).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Parameter {
    initial: f64,
}

impl Parameter {
    pub fn new(initial: f64) -> Self {
        Parameter { initial }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial
    }
}

impl Operation for Parameter {
    fn evaluate(&self, _values: Values<'_>) -> Option<f64> {
        None
    }

    fn backpropagate(&self, _grad: f64, _values: Values<'_>, _acc: &mut Accumulator<'_>) {}

    fn visit_dependencies(&self, _visitor: &mut dyn FnMut(NodeId)) {}
}
