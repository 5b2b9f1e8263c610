//! Property-based tests for the traversal and tokenization laws that
//! hold for arbitrary inputs: coordinate enumeration counts, leaf
//! counting, and end-trimming of numeric tokens.

use proptest::prelude::*;
use siminput::{clean_numeric, split_data_line, IndexIter, Value};

fn tree_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12..1.0e12).prop_map(Value::Float),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::List)
    })
}

fn direct_leaf_count(value: &Value) -> usize {
    match value {
        Value::List(items) => items.iter().map(direct_leaf_count).sum(),
        _ => 1,
    }
}

proptest! {
    #[test]
    fn prop_leaf_count_matches_direct_recursion(tree in tree_strategy()) {
        let expected = match &tree {
            Value::Null => 0,
            other => direct_leaf_count(other),
        };
        prop_assert_eq!(tree.leaf_count(), expected);
    }

    #[test]
    fn prop_walk_yields_only_scalars(tree in tree_strategy()) {
        for record in tree.walk() {
            prop_assert!(record.value.is_scalar());
        }
    }

    #[test]
    fn prop_walk_is_restartable(tree in tree_strategy()) {
        let first: Vec<&Value> = tree.leaves().collect();
        let second: Vec<&Value> = tree.leaves().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_index_iter_enumerates_row_major(
        shape in prop::collection::vec(1usize..5, 1..4)
    ) {
        let expected: usize = shape.iter().product();
        let coords: Vec<Vec<usize>> = IndexIter::new(&shape).collect();
        prop_assert_eq!(coords.len(), expected);

        for coord in &coords {
            for (component, size) in coord.iter().zip(&shape) {
                prop_assert!(component < size);
            }
        }
        // strictly increasing lexicographic order rules out duplicates
        // and is exactly row-major order
        for pair in coords.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert_eq!(coords.first().unwrap(), &vec![0; shape.len()]);
        let last: Vec<usize> = shape.iter().map(|size| size - 1).collect();
        prop_assert_eq!(coords.last().unwrap(), &last);
    }

    #[test]
    fn prop_clean_numeric_leaves_numeric_ends(text in ".{0,20}") {
        let cleaned = clean_numeric(&text);
        if !cleaned.is_empty() {
            let numeric = |c: char| c.is_ascii_digit() || c == '.' || c == '-';
            prop_assert!(numeric(cleaned.chars().next().unwrap()));
            prop_assert!(numeric(cleaned.chars().last().unwrap()));
        }
    }

    #[test]
    fn prop_split_plain_tokens_matches_whitespace_split(
        tokens in prop::collection::vec("[a-z0-9]{1,6}", 0..6)
    ) {
        let line = tokens.join("  ");
        prop_assert_eq!(split_data_line(&line, false), tokens);
    }
}
