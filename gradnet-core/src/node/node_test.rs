use super::*;
use approx::assert_relative_eq;

fn ids(n: usize) -> Vec<NodeId> {
    let graph = GraphId::next();
    (0..n).map(|i| NodeId::new(graph, i)).collect()
}

#[test]
fn test_leaves_do_nothing() {
    let values = [3.0];
    let mut grads = [0.0];
    for node in [Node::from(Input::new(3.0)), Node::from(Parameter::new(3.0))] {
        assert!(node.is_leaf());
        assert_eq!(node.evaluate(Values::new(&values)), None);
        node.backpropagate(1.0, Values::new(&values), &mut Accumulator::new(&mut grads));
        assert!(node.dependencies().is_empty());
    }
    assert_eq!(grads, [0.0]);
}

#[test]
fn test_linear_reducer_evaluate_and_backpropagate() {
    let id = ids(5);
    // bias = 0.5, terms (2 * 3) + (4 * -1)
    let values = [0.5, 2.0, 3.0, 4.0, -1.0];
    let lr = LinearReducer::with_terms(id[0], vec![(id[1], id[2]), (id[3], id[4])]);
    assert_relative_eq!(lr.evaluate(Values::new(&values)).unwrap(), 2.5);

    let mut grads = [0.0; 5];
    lr.backpropagate(2.0, Values::new(&values), &mut Accumulator::new(&mut grads));
    assert_relative_eq!(grads[0], 2.0);
    assert_relative_eq!(grads[1], 6.0);
    assert_relative_eq!(grads[2], 4.0);
    assert_relative_eq!(grads[3], -2.0);
    assert_relative_eq!(grads[4], 8.0);
}

#[test]
fn test_linear_reducer_repeated_term_superposes() {
    let id = ids(3);
    // value = b + x*x, d/dx = 2x, contributed as x + x by the two occurrences.
    let values = [0.0, 3.0, 0.0];
    let mut lr = LinearReducer::new(id[0]);
    lr.add_term(id[1], id[1]);
    assert_relative_eq!(lr.evaluate(Values::new(&values)).unwrap(), 9.0);

    let mut grads = [0.0; 3];
    lr.backpropagate(1.0, Values::new(&values), &mut Accumulator::new(&mut grads));
    assert_relative_eq!(grads[1], 6.0);
    assert_eq!(Node::from(lr).dependencies(), vec![id[0], id[1], id[1]]);
}

#[test]
fn test_sigmoid_matches_closed_form() {
    let id = ids(2);
    let values = [0.5, 0.0];
    let s = Sigmoid::new(id[0]);
    let y = s.evaluate(Values::new(&values)).unwrap();
    assert_relative_eq!(y, 0.6224593312018546, epsilon = 1e-12);

    let mut grads = [0.0; 2];
    s.backpropagate(1.0, Values::new(&values), &mut Accumulator::new(&mut grads));
    let e = 0.5f64.exp();
    assert_relative_eq!(grads[0], e / (1.0 + e).powi(2), epsilon = 1e-12);
}

#[test]
fn test_sigmoid_large_inputs_stay_finite() {
    let id = ids(1);
    for x in [-1000.0, -50.0, 50.0, 1000.0] {
        let values = [x];
        let mut grads = [0.0];
        let s = Sigmoid::new(id[0]);
        let y = s.evaluate(Values::new(&values)).unwrap();
        assert!(y.is_finite() && (0.0..=1.0).contains(&y));
        s.backpropagate(1.0, Values::new(&values), &mut Accumulator::new(&mut grads));
        assert!(grads[0].is_finite());
        assert!(grads[0] >= 0.0 && grads[0] < 1e-20);
    }
}

#[test]
fn test_squared_error() {
    let id = ids(4);
    let values = [1.0, 0.0, 0.25, 1.0];
    let se = SquaredError::with_terms(vec![(id[0], id[1]), (id[2], id[3])]);
    assert_relative_eq!(se.evaluate(Values::new(&values)).unwrap(), 1.5625);

    let mut grads = [0.0; 4];
    se.backpropagate(1.0, Values::new(&values), &mut Accumulator::new(&mut grads));
    assert_relative_eq!(grads[0], 2.0);
    assert_relative_eq!(grads[1], -2.0);
    assert_relative_eq!(grads[2], -1.5);
    assert_relative_eq!(grads[3], 1.5);
}

#[test]
fn test_empty_squared_error_is_zero() {
    let se = SquaredError::new();
    assert_eq!(se.evaluate(Values::new(&[])), Some(0.0));
}

#[test]
fn test_dependency_order() {
    let id = ids(5);
    let lr = LinearReducer::with_terms(id[4], vec![(id[0], id[1]), (id[2], id[3])]);
    assert_eq!(
        Node::from(lr).dependencies(),
        vec![id[4], id[0], id[1], id[2], id[3]]
    );
    assert_eq!(Node::from(Sigmoid::new(id[2])).dependencies(), vec![id[2]]);
}
