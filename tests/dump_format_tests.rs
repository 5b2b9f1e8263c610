//! Exact-output tests for the array dump text format: shape header,
//! 10-character scientific-notation fields, and blank-line separation
//! of higher-dimension slices.

use ndarray::{ArrayD, IxDyn};
use siminput::ArrayCompare;

fn dump(shape: &[usize], values: Vec<f64>) -> String {
    let dir = tempfile::tempdir().unwrap();
    let array = ArrayD::from_shape_vec(IxDyn(shape), values).unwrap();
    ArrayCompare::new(dir.path()).save("dump.txt", &array).unwrap();
    std::fs::read_to_string(dir.path().join("dump.txt")).unwrap()
}

#[test]
fn test_rank_one_format() {
    let text = dump(&[2], vec![1.0, 2.5]);
    assert_eq!(text, "(2,)\n 1.000e+00\n 2.500e+00\n");
}

#[test]
fn test_rank_two_format() {
    let text = dump(&[2, 2], vec![0.0, 1.0, -2.0, 0.035]);
    assert_eq!(
        text,
        "(2, 2)\n 0.000e+00  1.000e+00\n-2.000e+00  3.500e-02\n"
    );
}

#[test]
fn test_rank_three_blank_line_per_slice() {
    let text = dump(&[2, 1, 2], vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        text,
        "(2, 1, 2)\n 1.000e+00  2.000e+00\n\n 3.000e+00  4.000e+00\n\n"
    );
}

#[test]
fn test_rank_four_nested_blank_lines() {
    let text = dump(&[1, 1, 1, 2], vec![7.0, 8.0]);
    assert_eq!(text, "(1, 1, 1, 2)\n 7.000e+00  8.000e+00\n\n\n");
}

#[test]
fn test_rank_zero_and_five_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let compare = ArrayCompare::new(dir.path());

    let scalar = ArrayD::from_elem(IxDyn(&[]), 1.0);
    assert!(compare.save("scalar.txt", &scalar).is_err());

    let rank5 = ArrayD::<f64>::zeros(IxDyn(&[1, 1, 1, 1, 1]));
    assert!(compare.save("rank5.txt", &rank5).is_err());
}
