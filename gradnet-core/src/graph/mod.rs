//! The graph container: node arena, trainable set and the three passes.
//!
//! A graph is built in two phases. During construction nodes are registered (each
//! registration hands back a [`NodeId`]) and wired with [`Graph::add_term`]. Then
//! [`Graph::sort`] orders the nodes so that every dependency precedes its dependents,
//! after which the training loop repeatedly calls [`Graph::evaluate_all`],
//! [`Graph::backpropagate_from`] and [`Graph::update_parameters`].
//!
//! ```rust
//! use gradnet_core::graph::Graph;
//!
//! let mut graph = Graph::new();
//! let x = graph.input(1.0);
//! let w = graph.parameter(0.5);
//! let b = graph.parameter(0.0);
//! let z = graph.linear_reducer(b);
//! graph.add_term(z, x, w).unwrap();
//! let y = graph.sigmoid(z);
//! graph.sort().unwrap();
//!
//! graph.evaluate_all();
//! graph.backpropagate_from(y).unwrap();
//! assert!((graph.value(y).unwrap() - 0.6224593312).abs() < 1e-9);
//! assert!((graph.grad(w).unwrap() - 0.2350037122).abs() < 1e-9);
//! ```

use crate::error::GradNetError;
use crate::node::{
    Accumulator, GraphId, Input, LinearReducer, Node, NodeId, Operation, Parameter, Sigmoid,
    SquaredError, Values,
};
use log::{debug, warn};

pub mod topo;

/// Owns every node of one computation graph.
///
/// Node state is kept per arena slot: `nodes[i]`, `values[i]` and `grads[i]` all
/// describe the node whose [`NodeId::index`] is `i`. Sorting only rewrites `order`.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    nodes: Vec<Node>,
    values: Vec<f64>,
    grads: Vec<f64>,
    order: Vec<usize>,
    parameters: Vec<NodeId>,
    sorted: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            id: GraphId::next(),
            nodes: Vec::new(),
            values: Vec::new(),
            grads: Vec::new(),
            order: Vec::new(),
            parameters: Vec::new(),
            sorted: true,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Takes ownership of `node` and returns its handle.
    ///
    /// Leaves start at their initial value, computed nodes at 0. Parameters are also
    /// added to the trainable set. The new node is appended to the stored order, which
    /// therefore needs a fresh [`sort`](Graph::sort) before the next pass.
    pub fn register(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.id, self.nodes.len());
        let initial = match &node {
            Node::Input(input) => input.initial_value(),
            Node::Parameter(param) => param.initial_value(),
            _ => 0.0,
        };
        let is_parameter = matches!(node, Node::Parameter(_));

        self.nodes.push(node);
        self.values.push(initial);
        self.grads.push(0.0);
        self.order.push(id.index());
        self.sorted = false;

        if is_parameter {
            self.register_parameter(id);
        }
        id
    }

    /// Appends `id` to the trainable set. Called by [`register`](Graph::register).
    pub(crate) fn register_parameter(&mut self, id: NodeId) {
        self.parameters.push(id);
    }

    pub fn input(&mut self, value: f64) -> NodeId {
        self.register(Input::new(value).into())
    }

    pub fn parameter(&mut self, value: f64) -> NodeId {
        self.register(Parameter::new(value).into())
    }

    /// Registers a [`LinearReducer`] over `bias`; add its terms with [`add_term`](Graph::add_term).
    pub fn linear_reducer(&mut self, bias: NodeId) -> NodeId {
        self.register(LinearReducer::new(bias).into())
    }

    pub fn sigmoid(&mut self, input: NodeId) -> NodeId {
        self.register(Sigmoid::new(input).into())
    }

    /// Registers an empty [`SquaredError`]; add its pairs with [`add_term`](Graph::add_term).
    pub fn squared_error(&mut self) -> NodeId {
        self.register(SquaredError::new().into())
    }

    /// Appends the term `(a, b)` to a linear reducer or squared-error node.
    ///
    /// `a` and `b` are not checked here; a handle this graph does not own is
    /// reported by the next [`sort`](Graph::sort) as a dangling reference.
    pub fn add_term(&mut self, node: NodeId, a: NodeId, b: NodeId) -> Result<(), GradNetError> {
        let slot = self.slot(node)?;
        match &mut self.nodes[slot] {
            Node::LinearReducer(lr) => lr.add_term(a, b),
            Node::SquaredError(se) => se.add_term(a, b),
            _ => return Err(GradNetError::TermsNotSupported { node }),
        }
        self.sorted = false;
        Ok(())
    }

    /// Resets every accumulator to zero, then evaluates each node once in stored order.
    ///
    /// Requires a successful [`sort`](Graph::sort) with no registration or wiring
    /// since. The order is not re-validated: running on an unsorted graph reads stale
    /// dependency values.
    pub fn evaluate_all(&mut self) {
        if !self.sorted {
            warn!("evaluate_all() called on a graph that is not sorted; results may be stale.");
        }
        self.grads.iter_mut().for_each(|g| *g = 0.0);
        for &slot in &self.order {
            if let Some(value) = self.nodes[slot].evaluate(Values::new(&self.values)) {
                self.values[slot] = value;
            }
        }
    }

    /// Seeds `cost` with a gradient of 1 and back-propagates every node in reverse
    /// stored order.
    ///
    /// Must follow an [`evaluate_all`](Graph::evaluate_all) so that values are fresh
    /// and the other accumulators are zero.
    pub fn backpropagate_from(&mut self, cost: NodeId) -> Result<(), GradNetError> {
        let cost_slot = self.slot(cost)?;
        if !self.sorted {
            warn!("backpropagate_from() called on a graph that is not sorted; gradients may be wrong.");
        }
        self.grads[cost_slot] = 1.0;

        let values = Values::new(&self.values);
        let mut acc = Accumulator::new(&mut self.grads);
        for &slot in self.order.iter().rev() {
            // A node's accumulator is complete once all of its dependents have run.
            let grad = acc.get(slot);
            self.nodes[slot].backpropagate(grad, values, &mut acc);
        }
        Ok(())
    }

    /// Plain gradient descent: `value -= learning_rate * grad` for every trainable parameter.
    pub fn update_parameters(&mut self, learning_rate: f64) {
        for param in &self.parameters {
            let slot = param.index();
            self.values[slot] -= learning_rate * self.grads[slot];
        }
        debug!(
            "update_parameters: stepped {} parameter(s) with lr {}",
            self.parameters.len(),
            learning_rate
        );
    }

    // --- Accessors ---

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the stored order reflects every node and edge registered so far.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.graph() == self.id && id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GradNetError> {
        Ok(&self.nodes[self.slot(id)?])
    }

    /// Current value of `id` (the last forward result, or the value last set).
    pub fn value(&self, id: NodeId) -> Result<f64, GradNetError> {
        Ok(self.values[self.slot(id)?])
    }

    /// Gradient accumulator of `id` after the last backward pass.
    pub fn grad(&self, id: NodeId) -> Result<f64, GradNetError> {
        Ok(self.grads[self.slot(id)?])
    }

    /// Sets the value of an input or parameter.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), GradNetError> {
        let slot = self.slot(id)?;
        if !self.nodes[slot].is_leaf() {
            return Err(GradNetError::NotALeaf { node: id });
        }
        self.values[slot] = value;
        Ok(())
    }

    /// Dependency occurrences of `id`, in the node's natural order.
    pub fn dependencies(&self, id: NodeId) -> Result<Vec<NodeId>, GradNetError> {
        Ok(self.node(id)?.dependencies())
    }

    /// The stored evaluation order.
    pub fn order(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .map(|&slot| NodeId::new(self.id, slot))
            .collect()
    }

    /// Number of trainable parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// The `index`-th trainable parameter, in registration order.
    pub fn get_parameter(&self, index: usize) -> Option<NodeId> {
        self.parameters.get(index).copied()
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.parameters
    }

    fn slot(&self, id: NodeId) -> Result<usize, GradNetError> {
        if self.contains(id) {
            Ok(id.index())
        } else {
            Err(GradNetError::UnknownNode { node: id })
        }
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
