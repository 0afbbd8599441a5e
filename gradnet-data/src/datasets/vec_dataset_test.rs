// gradnet-data/src/datasets/vec_dataset_test.rs

use super::*;
use gradnet_core::Sample;

#[test]
fn test_vec_dataset_get_valid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.get(0).unwrap(), 10);
    assert_eq!(dataset.get(2).unwrap(), 30);
}

#[test]
fn test_vec_dataset_get_invalid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    match dataset.get(3) {
        Err(DataError::IndexOutOfBounds { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("Expected IndexOutOfBounds error, got {:?}", other),
    }
}

#[test]
fn test_vec_dataset_empty() {
    let dataset: VecDataset<i32> = VecDataset::default();
    assert!(dataset.is_empty());
    assert!(dataset.get(0).is_err());
}

#[test]
fn test_vec_dataset_of_samples() {
    let dataset = VecDataset::from(vec![
        Sample::new(vec![0.0, 1.0], 1),
        Sample::new(vec![1.0, 0.0], 0),
    ]);
    assert_eq!(dataset.get(1).unwrap().label, 0);
    assert_eq!(dataset.as_slice()[0].features, vec![0.0, 1.0]);
    assert_eq!(dataset.into_inner().len(), 2);
}
