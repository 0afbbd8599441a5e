//! Scalar node variants and the contract they share.
//!
//! Every node in a [`Graph`](crate::graph::Graph) is one of a closed set of variants
//! wrapped by [`Node`]. A variant only stores its own wiring (the [`NodeId`]s it reads);
//! the current value and gradient accumulator of each node live in per-slot arrays owned
//! by the graph and are handed to the variants through [`Values`] and [`Accumulator`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod leaf;
pub mod linear_reducer;
pub mod sigmoid;
pub mod squared_error;

pub use leaf::{Input, Parameter};
pub use linear_reducer::LinearReducer;
pub use sigmoid::Sigmoid;
pub use squared_error::SquaredError;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a graph, used to tell its node handles apart from another graph's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle to a node: the owning graph plus the node's slot in that graph's arena.
///
/// Slots are assigned at registration and never change, so a `NodeId` stays valid
/// across sorting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: GraphId,
    index: usize,
}

impl NodeId {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        NodeId { graph, index }
    }

    /// The graph this handle was issued by.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Arena slot of the node (its registration index).
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.graph, self.index)
    }
}

/// Read-only view over the current value of every node in a graph.
#[derive(Clone, Copy)]
pub struct Values<'a> {
    values: &'a [f64],
}

impl<'a> Values<'a> {
    pub(crate) fn new(values: &'a [f64]) -> Self {
        Values { values }
    }

    /// Current value of `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a slot of the viewed graph. Passes only run on sorted
    /// graphs, whose dependencies have all been checked.
    #[inline]
    pub fn get(&self, id: NodeId) -> f64 {
        self.values[id.index]
    }
}

/// Write access to the gradient accumulators of a graph during a backward pass.
pub struct Accumulator<'a> {
    grads: &'a mut [f64],
}

impl<'a> Accumulator<'a> {
    pub(crate) fn new(grads: &'a mut [f64]) -> Self {
        Accumulator { grads }
    }

    /// Adds `delta` to the accumulator of `target`.
    ///
    /// This is the only way variants touch accumulators; contributions from every
    /// dependent and every repeated occurrence simply add up.
    #[inline]
    pub fn accumulate(&mut self, target: NodeId, delta: f64) {
        self.grads[target.index] += delta;
    }

    pub(crate) fn get(&self, slot: usize) -> f64 {
        self.grads[slot]
    }
}

/// The contract shared by all node variants.
pub trait Operation {
    /// Recomputes the node's value from the current values of its dependencies.
    ///
    /// Returns `None` for leaves, whose stored value is set from outside and is left
    /// untouched by the forward pass.
    fn evaluate(&self, values: Values<'_>) -> Option<f64>;

    /// Pushes this node's share of the chain rule into its dependencies.
    ///
    /// `grad` is the node's own accumulated gradient (d cost / d value).
    fn backpropagate(&self, grad: f64, values: Values<'_>, acc: &mut Accumulator<'_>);

    /// Calls `visitor` once per dependency occurrence, repeats included, in the
    /// variant's natural order.
    fn visit_dependencies(&self, visitor: &mut dyn FnMut(NodeId));
}

/// A node of the computation graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Input(Input),
    Parameter(Parameter),
    LinearReducer(LinearReducer),
    Sigmoid(Sigmoid),
    SquaredError(SquaredError),
}

impl Node {
    /// Short variant name, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Input(_) => "input",
            Node::Parameter(_) => "parameter",
            Node::LinearReducer(_) => "linear_reducer",
            Node::Sigmoid(_) => "sigmoid",
            Node::SquaredError(_) => "squared_error",
        }
    }

    /// Whether the node's value is set from outside rather than computed.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Input(_) | Node::Parameter(_))
    }

    /// Collects the dependency occurrences of this node, repeats included.
    pub fn dependencies(&self) -> Vec<NodeId> {
        let mut deps = Vec::new();
        self.visit_dependencies(&mut |dep| deps.push(dep));
        deps
    }
}

impl Operation for Node {
    fn evaluate(&self, values: Values<'_>) -> Option<f64> {
        match self {
            Node::Input(n) => n.evaluate(values),
            Node::Parameter(n) => n.evaluate(values),
            Node::LinearReducer(n) => n.evaluate(values),
            Node::Sigmoid(n) => n.evaluate(values),
            Node::SquaredError(n) => n.evaluate(values),
        }
    }

    fn backpropagate(&self, grad: f64, values: Values<'_>, acc: &mut Accumulator<'_>) {
        match self {
            Node::Input(n) => n.backpropagate(grad, values, acc),
            Node::Parameter(n) => n.backpropagate(grad, values, acc),
            Node::LinearReducer(n) => n.backpropagate(grad, values, acc),
            Node::Sigmoid(n) => n.backpropagate(grad, values, acc),
            Node::SquaredError(n) => n.backpropagate(grad, values, acc),
        }
    }

    fn visit_dependencies(&self, visitor: &mut dyn FnMut(NodeId)) {
        match self {
            Node::Input(n) => n.visit_dependencies(visitor),
            Node::Parameter(n) => n.visit_dependencies(visitor),
            Node::LinearReducer(n) => n.visit_dependencies(visitor),
            Node::Sigmoid(n) => n.visit_dependencies(visitor),
            Node::SquaredError(n) => n.visit_dependencies(visitor),
        }
    }
}

impl From<Input> for Node {
    fn from(node: Input) -> Self {
        Node::Input(node)
    }
}

impl From<Parameter> for Node {
    fn from(node: Parameter) -> Self {
        Node::Parameter(node)
    }
}

impl From<LinearReducer> for Node {
    fn from(node: LinearReducer) -> Self {
        Node::LinearReducer(node)
    }
}

impl From<Sigmoid> for Node {
    fn from(node: Sigmoid) -> Self {
        Node::Sigmoid(node)
    }
}

impl From<SquaredError> for Node {
    fn from(node: SquaredError) -> Self {
        Node::SquaredError(node)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
