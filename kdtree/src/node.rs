use nalgebra::{RealField, Vector3, Vector4};

use crate::ResultSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Node<T> {
    Leaf {
        index: usize,
    },
    Branch {
        children: [usize; 2],
        dim: usize,
        value: T,
    },
}

/// Picks the dimension with the largest spread among `indices`.
fn split_dim<T: RealField>(coords: &[&Vector4<T>], indices: &[usize]) -> usize {
    let num = nalgebra::convert::<f64, T>(indices.len() as f64);
    let sum = { indices.iter() }
        .map(|&i| coords[i].xyz())
        .fold(Vector3::zeros(), |acc, coord| acc + coord);
    let mean = sum / num;

    let var = { indices.iter() }.map(|&i| coords[i].xyz()).fold(
        Vector3::zeros(),
        |acc, coord| {
            let diff = coord - mean.clone();
            acc + diff.component_mul(&diff)
        },
    );
    var.imax()
}

/// Builds the subtree over `indices` into `nodes` and returns its slot.
///
/// The split is made at the median along the chosen dimension, so points on
/// the left are `<= value` and points on the right are `>= value`.
pub(crate) fn build<T: RealField>(
    nodes: &mut Vec<Node<T>>,
    coords: &[&Vector4<T>],
    indices: &mut [usize],
) -> usize {
    if let [index] = *indices {
        nodes.push(Node::Leaf { index });
        return nodes.len() - 1;
    }

    let dim = split_dim(coords, indices);
    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        { coords[a][dim].partial_cmp(&coords[b][dim]) }.unwrap_or(std::cmp::Ordering::Equal)
    });
    let value = coords[indices[mid]][dim].clone();

    let slot = nodes.len();
    nodes.push(Node::Leaf { index: usize::MAX });

    let (left, right) = indices.split_at_mut(mid);
    let left = build(nodes, coords, left);
    let right = build(nodes, coords, right);

    nodes[slot] = Node::Branch {
        children: [left, right],
        dim,
        value,
    };
    slot
}

pub(crate) fn search<T: RealField>(
    nodes: &[Node<T>],
    coords: &[&Vector4<T>],
    slot: usize,
    pivot: &Vector4<T>,
    result: &mut impl ResultSet<Key = T, Value = usize>,
) {
    match nodes[slot] {
        Node::Leaf { index } => {
            let distance = (coords[index].xyz() - pivot.xyz()).norm();
            result.push(distance, index);
        }
        Node::Branch {
            children: [left, right],
            dim,
            ref value,
        } => {
            let (next, other) = if pivot[dim] < *value {
                (left, right)
            } else {
                (right, left)
            };

            search(nodes, coords, next, pivot, result);

            let min_distance = (pivot[dim].clone() - value.clone()).abs();
            if !result.is_full() || result.max_key() >= Some(&min_distance) {
                search(nodes, coords, other, pivot, result)
            }
        }
    }
}
