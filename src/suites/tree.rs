//! Full binary tree construction; an allocator and pointer-chasing workload.

use std::hint::black_box;

use super::{Suite, Workload};

struct Node {
    // Construction cost is the benchmark; the links are never walked.
    #[allow(dead_code)]
    left: Option<Box<Node>>,
    #[allow(dead_code)]
    right: Option<Box<Node>>,
}

fn make_tree(depth: u32) -> Box<Node> {
    if depth == 0 {
        return Box::new(Node {
            left: None,
            right: None,
        });
    }
    let left = make_tree(depth - 1);
    let right = make_tree(depth - 1);
    Box::new(Node {
        left: Some(left),
        right: Some(right),
    })
}

pub fn suite(depth: u32, iterations: u32) -> Suite {
    let workload = Workload::new(format!("make_tree({depth})"), iterations, 1, move || {
        black_box(make_tree(black_box(depth)));
    });
    Suite {
        name: "tree",
        workloads: vec![workload],
    }
}

#[cfg(test)]
mod tests {
    use super::{make_tree, Node};

    fn count(node: &Node) -> usize {
        1 + node.left.as_deref().map_or(0, count) + node.right.as_deref().map_or(0, count)
    }

    #[test]
    fn builds_a_full_tree() {
        // depth d yields 2^(d+1) - 1 nodes
        assert_eq!(count(&make_tree(0)), 1);
        assert_eq!(count(&make_tree(4)), 31);
    }
}
