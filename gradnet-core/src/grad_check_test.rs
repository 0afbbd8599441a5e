use super::*;
use crate::nn::init::normal_parameter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A small random network with shared nodes, repeated terms and a squared-error cost.
fn random_graph(seed: u64) -> (Graph, NodeId) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();

    let inputs: Vec<NodeId> = (0..3).map(|_| graph.input(rng.gen_range(-1.0..1.0))).collect();
    let mut layer = inputs.clone();
    for _ in 0..2 {
        let mut next = Vec::new();
        for _ in 0..3 {
            let bias = normal_parameter(&mut graph, &mut rng, 0.5).unwrap();
            let z = graph.linear_reducer(bias);
            for &prev in &layer {
                let w = normal_parameter(&mut graph, &mut rng, 0.8).unwrap();
                graph.add_term(z, prev, w).unwrap();
            }
            // Reuse one weight twice so some parameters receive two contributions.
            let shared = normal_parameter(&mut graph, &mut rng, 0.8).unwrap();
            graph.add_term(z, layer[0], shared).unwrap();
            graph.add_term(z, layer[1], shared).unwrap();
            next.push(graph.sigmoid(z));
        }
        layer = next;
    }

    let cost = graph.squared_error();
    for &out in &layer {
        let target = graph.input(rng.gen_range(0.0..1.0));
        graph.add_term(cost, out, target).unwrap();
    }
    // The cost also reads one hidden unit directly.
    graph.add_term(cost, layer[0], inputs[2]).unwrap();
    graph.sort().unwrap();
    (graph, cost)
}

#[test]
fn test_random_graphs_match_finite_differences() {
    for seed in 0..5 {
        let (mut graph, cost) = random_graph(seed);
        check_gradients(&mut graph, cost, 1e-5, 1e-4).unwrap();
    }
}

#[test]
fn test_check_restores_parameters() {
    let (mut graph, cost) = random_graph(42);
    let before: Vec<f64> = graph
        .parameters()
        .iter()
        .map(|&p| graph.value(p).unwrap())
        .collect();
    check_gradients(&mut graph, cost, 1e-5, 1e-4).unwrap();
    let after: Vec<f64> = graph
        .parameters()
        .iter()
        .map(|&p| graph.value(p).unwrap())
        .collect();
    assert_eq!(before, after);
    assert_eq!(graph.grad(cost).unwrap(), 1.0);
}

#[test]
fn test_unsorted_graph_is_rejected() {
    let mut graph = Graph::new();
    let x = graph.input(1.0);
    let p = graph.parameter(0.5);
    let cost = graph.squared_error();
    graph.add_term(cost, x, p).unwrap();
    assert_eq!(
        check_gradients(&mut graph, cost, 1e-5, 1e-4),
        Err(GradCheckError::Unsorted)
    );
}

#[test]
fn test_mismatch_is_reported_for_a_rough_step() {
    // With a step this large the central difference misses the sigmoid's curvature.
    let mut graph = Graph::new();
    let p = graph.parameter(1.0);
    let s = graph.sigmoid(p);
    let zero = graph.input(0.0);
    let cost = graph.squared_error();
    graph.add_term(cost, s, zero).unwrap();
    graph.sort().unwrap();
    match check_gradients(&mut graph, cost, 5.0, 1e-6) {
        Err(GradCheckError::GradientMismatch { parameter_index, .. }) => {
            assert_eq!(parameter_index, 0)
        }
        other => panic!("Expected GradientMismatch, got {:?}", other),
    }
}
