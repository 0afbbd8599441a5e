use super::*;
use approx::assert_relative_eq;

/// y = sigmoid(w * x + b)
fn neuron(x: f64, w: f64, b: f64) -> (Graph, NodeId, NodeId, NodeId) {
    let mut graph = Graph::new();
    let x = graph.input(x);
    let w = graph.parameter(w);
    let b = graph.parameter(b);
    let z = graph.linear_reducer(b);
    graph.add_term(z, x, w).unwrap();
    let y = graph.sigmoid(z);
    graph.sort().unwrap();
    (graph, w, b, y)
}

#[test]
fn test_single_neuron_forward_and_backward() {
    let (mut graph, w, b, y) = neuron(1.0, 0.5, 0.0);
    graph.evaluate_all();
    let out = graph.value(y).unwrap();
    assert_relative_eq!(out, 0.6224593312, epsilon = 1e-9);

    graph.backpropagate_from(y).unwrap();
    assert_relative_eq!(graph.grad(y).unwrap(), 1.0);
    assert_relative_eq!(graph.grad(w).unwrap(), 0.2350037122, epsilon = 1e-9);
    assert_relative_eq!(graph.grad(w).unwrap(), out * (1.0 - out), epsilon = 1e-12);
    // dy/db = y(1 - y) as well, since x = 1.
    assert_relative_eq!(graph.grad(b).unwrap(), graph.grad(w).unwrap(), epsilon = 1e-12);
}

#[test]
fn test_register_assigns_slots_and_initial_values() {
    let mut graph = Graph::new();
    assert!(graph.is_empty());
    let a = graph.input(2.0);
    let p = graph.parameter(-1.5);
    let s = graph.sigmoid(a);
    assert_eq!((a.index(), p.index(), s.index()), (0, 1, 2));
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.value(a).unwrap(), 2.0);
    assert_eq!(graph.value(p).unwrap(), -1.5);
    assert_eq!(graph.value(s).unwrap(), 0.0);
    assert!(!graph.is_sorted());
}

#[test]
fn test_parameters_tracked_in_registration_order() {
    let mut graph = Graph::new();
    let p0 = graph.parameter(0.1);
    let _x = graph.input(0.0);
    let p1 = graph.register(Node::Parameter(Parameter::new(0.2)));
    assert_eq!(graph.num_parameters(), 2);
    assert_eq!(graph.get_parameter(0), Some(p0));
    assert_eq!(graph.get_parameter(1), Some(p1));
    assert_eq!(graph.get_parameter(2), None);
    assert_eq!(graph.parameters(), &[p0, p1]);
}

#[test]
fn test_evaluate_resets_accumulators() {
    let (mut graph, w, _b, y) = neuron(1.0, 0.5, 0.0);
    graph.evaluate_all();
    graph.backpropagate_from(y).unwrap();
    assert!(graph.grad(w).unwrap() != 0.0);
    graph.evaluate_all();
    for id in graph.order() {
        assert_eq!(graph.grad(id).unwrap(), 0.0);
    }
}

#[test]
fn test_evaluate_is_idempotent() {
    let (mut graph, _w, _b, _y) = neuron(0.3, -0.7, 0.2);
    graph.evaluate_all();
    let first: Vec<f64> = graph.order().iter().map(|&id| graph.value(id).unwrap()).collect();
    graph.evaluate_all();
    let second: Vec<f64> = graph.order().iter().map(|&id| graph.value(id).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_update_parameters_descends() {
    let (mut graph, w, b, y) = neuron(1.0, 0.5, 0.0);
    graph.evaluate_all();
    graph.backpropagate_from(y).unwrap();
    let (gw, gb) = (graph.grad(w).unwrap(), graph.grad(b).unwrap());
    graph.update_parameters(0.1);
    assert_relative_eq!(graph.value(w).unwrap(), 0.5 - 0.1 * gw);
    assert_relative_eq!(graph.value(b).unwrap(), 0.0 - 0.1 * gb);
}

#[test]
fn test_update_leaves_inputs_alone() {
    let mut graph = Graph::new();
    let x = graph.input(2.0);
    let p = graph.parameter(1.0);
    let cost = graph.squared_error();
    graph.add_term(cost, x, p).unwrap();
    graph.sort().unwrap();
    graph.evaluate_all();
    graph.backpropagate_from(cost).unwrap();
    // d/dx (x - p)^2 = 2(x - p) = 2, d/dp = -2
    assert_relative_eq!(graph.grad(x).unwrap(), 2.0);
    assert_relative_eq!(graph.grad(p).unwrap(), -2.0);
    graph.update_parameters(0.25);
    assert_eq!(graph.value(x).unwrap(), 2.0);
    assert_relative_eq!(graph.value(p).unwrap(), 1.5);
}

#[test]
fn test_fan_in_superposition_across_dependents() {
    // d feeds two reducers, both feeding the cost.
    let mut graph = Graph::new();
    let d = graph.input(1.5);
    let wa = graph.parameter(2.0);
    let wb = graph.parameter(-3.0);
    let zero = graph.input(0.0);
    let a = graph.linear_reducer(zero);
    graph.add_term(a, d, wa).unwrap();
    let b = graph.linear_reducer(zero);
    graph.add_term(b, d, wb).unwrap();
    let sum = graph.linear_reducer(zero);
    let one = graph.input(1.0);
    graph.add_term(sum, a, one).unwrap();
    graph.add_term(sum, b, one).unwrap();
    graph.sort().unwrap();

    graph.evaluate_all();
    graph.backpropagate_from(sum).unwrap();
    // sum = d*wa + d*wb, so d sum / d d = wa + wb.
    assert_relative_eq!(graph.grad(d).unwrap(), 2.0 + -3.0);
    assert_relative_eq!(graph.grad(a).unwrap(), 1.0);
    assert_relative_eq!(graph.grad(b).unwrap(), 1.0);
}

#[test]
fn test_fan_in_superposition_within_one_node() {
    let mut graph = Graph::new();
    let bias = graph.parameter(0.0);
    let x = graph.parameter(3.0);
    let w = graph.parameter(0.5);
    let z = graph.linear_reducer(bias);
    graph.add_term(z, x, w).unwrap();
    graph.add_term(z, x, w).unwrap();
    graph.add_term(z, x, x).unwrap();
    graph.sort().unwrap();

    graph.evaluate_all();
    assert_relative_eq!(graph.value(z).unwrap(), 3.0 * 0.5 * 2.0 + 9.0);
    graph.backpropagate_from(z).unwrap();
    // dz/dx = w + w + 2x
    assert_relative_eq!(graph.grad(x).unwrap(), 0.5 + 0.5 + 6.0);
    assert_relative_eq!(graph.grad(w).unwrap(), 6.0);
    assert_relative_eq!(graph.grad(bias).unwrap(), 1.0);
}

#[test]
fn test_set_value_only_on_leaves() {
    let (mut graph, w, _b, y) = neuron(1.0, 0.5, 0.0);
    graph.set_value(w, 2.0).unwrap();
    assert_eq!(graph.value(w).unwrap(), 2.0);
    assert_eq!(
        graph.set_value(y, 1.0),
        Err(GradNetError::NotALeaf { node: y })
    );
}

#[test]
fn test_add_term_errors() {
    let mut graph = Graph::new();
    let x = graph.input(1.0);
    let s = graph.sigmoid(x);
    assert_eq!(
        graph.add_term(s, x, x),
        Err(GradNetError::TermsNotSupported { node: s })
    );

    let other = Graph::new().input(0.0);
    assert_eq!(
        graph.add_term(other, x, x),
        Err(GradNetError::UnknownNode { node: other })
    );
}

#[test]
fn test_foreign_handles_are_rejected_by_accessors() {
    let mut other = Graph::new();
    let foreign = other.input(1.0);
    let (mut graph, _w, _b, _y) = neuron(1.0, 0.5, 0.0);
    assert!(!graph.contains(foreign));
    assert!(graph.value(foreign).is_err());
    assert!(graph.grad(foreign).is_err());
    assert!(graph.backpropagate_from(foreign).is_err());
}

#[test]
fn test_wiring_after_sort_invalidates_order() {
    let (mut graph, w, b, y) = neuron(1.0, 0.5, 0.0);
    assert!(graph.is_sorted());
    let z = graph.dependencies(y).unwrap()[0];
    graph.add_term(z, w, b).unwrap();
    assert!(!graph.is_sorted());
    graph.sort().unwrap();
    assert!(graph.is_sorted());
}

#[test]
fn test_repeated_passes_give_same_gradients() {
    let (mut graph, w, _b, y) = neuron(1.0, 0.5, 0.0);
    graph.evaluate_all();
    graph.backpropagate_from(y).unwrap();
    let once = graph.grad(w).unwrap();
    graph.evaluate_all();
    graph.backpropagate_from(y).unwrap();
    assert_relative_eq!(graph.grad(w).unwrap(), once);
}
