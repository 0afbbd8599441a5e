use crate::error::GradNetError;
use crate::graph::Graph;
use crate::nn::init::normal_parameter;
use crate::node::NodeId;
use log::{debug, info};
use rand::Rng;

/// Shape and initialization of a fully-connected sigmoid network.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpConfig {
    /// Number of input features.
    pub inputs: usize,
    /// Units per layer, hidden layers first; the last entry is the number of classes.
    pub layer_sizes: Vec<usize>,
    /// Standard deviation of the normal draw for every bias.
    pub bias_stddev: f64,
}

impl Default for MlpConfig {
    /// 28x28 inputs, one hidden layer of 30 units, 10 classes.
    fn default() -> Self {
        MlpConfig {
            inputs: 28 * 28,
            layer_sizes: vec![30, 10],
            bias_stddev: 1.0,
        }
    }
}

impl MlpConfig {
    pub fn new(inputs: usize, layer_sizes: Vec<usize>) -> Self {
        MlpConfig {
            inputs,
            layer_sizes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), GradNetError> {
        if self.inputs == 0 {
            return Err(GradNetError::InvalidConfig(
                "network needs at least one input".to_string(),
            ));
        }
        if self.layer_sizes.is_empty() {
            return Err(GradNetError::InvalidConfig(
                "network needs at least one layer".to_string(),
            ));
        }
        if let Some(pos) = self.layer_sizes.iter().position(|&n| n == 0) {
            return Err(GradNetError::InvalidConfig(format!(
                "layer {} has no units",
                pos
            )));
        }
        if !(self.bias_stddev.is_finite() && self.bias_stddev >= 0.0) {
            return Err(GradNetError::InvalidConfig(format!(
                "bias_stddev must be a finite non-negative number, got {}",
                self.bias_stddev
            )));
        }
        Ok(())
    }

    pub fn classes(&self) -> usize {
        self.layer_sizes.last().copied().unwrap_or(0)
    }
}

/// A sorted graph wired as a fully-connected sigmoid classifier with a squared-error cost.
///
/// Each unit is `sigmoid(bias + Σ previous·weight)`; the cost pairs every output with
/// a one-hot target input.
#[derive(Debug)]
pub struct Mlp {
    graph: Graph,
    inputs: Vec<NodeId>,
    targets: Vec<NodeId>,
    outputs: Vec<NodeId>,
    cost: NodeId,
}

impl Mlp {
    /// Builds and sorts the network, drawing every parameter from `rng`.
    ///
    /// Biases are drawn from `N(0, bias_stddev²)`. Weights feeding a layer of `n` units
    /// are drawn from `N(0, 1/n)`.
    pub fn build<R: Rng + ?Sized>(config: &MlpConfig, rng: &mut R) -> Result<Self, GradNetError> {
        config.validate()?;
        let mut graph = Graph::new();

        let inputs: Vec<NodeId> = (0..config.inputs).map(|_| graph.input(0.0)).collect();
        let targets: Vec<NodeId> = (0..config.classes()).map(|_| graph.input(0.0)).collect();

        let mut previous = inputs.clone();
        for (layer, &size) in config.layer_sizes.iter().enumerate() {
            let weight_stddev = (1.0 / size as f64).sqrt();
            let mut units = Vec::with_capacity(size);
            for _ in 0..size {
                let bias = normal_parameter(&mut graph, rng, config.bias_stddev)?;
                let reducer = graph.linear_reducer(bias);
                for &prev in &previous {
                    let weight = normal_parameter(&mut graph, rng, weight_stddev)?;
                    graph.add_term(reducer, prev, weight)?;
                }
                units.push(graph.sigmoid(reducer));
            }
            debug!(
                "Mlp::build: layer {} has {} unit(s) over {} input(s)",
                layer,
                size,
                previous.len()
            );
            previous = units;
        }
        let outputs = previous;

        let cost = graph.squared_error();
        for (&output, &target) in outputs.iter().zip(&targets) {
            graph.add_term(cost, output, target)?;
        }

        graph.sort()?;
        info!(
            "Built network {} -> {:?}: {} nodes, {} parameters",
            config.inputs,
            config.layer_sizes,
            graph.len(),
            graph.num_parameters()
        );

        Ok(Mlp {
            graph,
            inputs,
            targets,
            outputs,
            cost,
        })
    }

    /// Loads `features` into the inputs and a one-hot encoding of `label` into the targets.
    pub fn set_sample(&mut self, features: &[f64], label: usize) -> Result<(), GradNetError> {
        if features.len() != self.inputs.len() {
            return Err(GradNetError::FeatureCountMismatch {
                expected: self.inputs.len(),
                actual: features.len(),
            });
        }
        if label >= self.targets.len() {
            return Err(GradNetError::LabelOutOfRange {
                label,
                classes: self.targets.len(),
            });
        }
        for (&input, &value) in self.inputs.iter().zip(features) {
            self.graph.set_value(input, value)?;
        }
        for (class, &target) in self.targets.iter().enumerate() {
            let value = if class == label { 1.0 } else { 0.0 };
            self.graph.set_value(target, value)?;
        }
        Ok(())
    }

    /// Index of the largest output after the last forward pass. Ties go to the lowest index.
    pub fn predicted_label(&self) -> Result<usize, GradNetError> {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (class, &output) in self.outputs.iter().enumerate() {
            let value = self.graph.value(output)?;
            if value > best_value {
                best = class;
                best_value = value;
            }
        }
        Ok(best)
    }

    pub fn cost_value(&self) -> Result<f64, GradNetError> {
        self.graph.value(self.cost)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn cost(&self) -> NodeId {
        self.cost
    }

    pub fn num_classes(&self) -> usize {
        self.outputs.len()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
