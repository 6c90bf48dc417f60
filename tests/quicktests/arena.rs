use std::collections::HashSet;

use ordered_tree::Tree;

use crate::{build, subtree_nodes};

quickcheck::quickcheck! {
    /// Left of a node is strictly smaller, right of it is greater or equal, for every node.
    fn invariant_holds_everywhere(xs: Vec<i8>) -> bool {
        let tree = build(&xs);

        subtree_nodes(&tree, tree.root()).into_iter().all(|node| {
            let key = tree.key(node).unwrap();
            let left = tree.left(node).unwrap();
            let right = tree.right(node).unwrap();

            subtree_nodes(&tree, left)
                .into_iter()
                .all(|n| tree.key(n).unwrap() < key)
                && subtree_nodes(&tree, right)
                    .into_iter()
                    .all(|n| tree.key(n).unwrap() >= key)
        })
    }
}

quickcheck::quickcheck! {
    fn contains_variants_agree(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = build(&xs);

        xs.iter()
            .chain(probes.iter())
            .map(|&x| i32::from(x))
            .all(|x| tree.contains(&x) == tree.contains_recursive(&x))
    }
}

quickcheck::quickcheck! {
    fn extremum_variants_agree(xs: Vec<i8>) -> bool {
        let tree = build(&xs);

        tree.min() == tree.min_recursive()
            && tree.max() == tree.max_recursive()
            && tree.min() == xs.iter().map(|&x| i32::from(x)).min().as_ref()
            && tree.max() == xs.iter().map(|&x| i32::from(x)).max().as_ref()
    }
}

quickcheck::quickcheck! {
    /// The iterative and recursive queries also agree on every subtree, not just the root.
    fn subtree_variants_agree(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = build(&xs);

        subtree_nodes(&tree, tree.root()).into_iter().all(|node| {
            let start = Some(node);
            let min = tree.min_from(start).unwrap();
            let max = tree.max_from(start).unwrap();
            let range = tree.range_from(start).unwrap();

            min == tree.min_recursive_from(start).unwrap()
                && max == tree.max_recursive_from(start).unwrap()
                && range == Some(max.unwrap() - min.unwrap())
                && probes.iter().map(|&p| i32::from(p)).all(|p| {
                    let in_subtree = subtree_nodes(&tree, start)
                        .into_iter()
                        .any(|n| tree.key(n).unwrap() == &p);
                    tree.contains_recursive_from(&p, start).unwrap() == in_subtree
                })
        })
    }
}

quickcheck::quickcheck! {
    fn queries_do_not_mutate(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = build(&xs);
        let before = tree.sideways().to_string();

        for p in &probes {
            let p = i32::from(*p);
            tree.contains(&p);
            tree.contains_recursive(&p);
            tree.find(&p);
        }
        let _ = (tree.min(), tree.max(), tree.min_recursive(), tree.max_recursive());
        let _ = tree.range();

        tree.sideways().to_string() == before
    }
}

quickcheck::quickcheck! {
    /// Contents depend only on which keys went in, never on the order they went in.
    fn contents_ignore_insertion_order(xs: Vec<i8>) -> bool {
        let forwards = build(&xs);
        let mut reversed_keys = xs.clone();
        reversed_keys.reverse();
        let backwards = build(&reversed_keys);
        let mut sorted_keys = xs.clone();
        sorted_keys.sort_unstable();
        let sorted = build(&sorted_keys);

        let keys = |tree: &Tree<i32>| tree.iter().copied().collect::<Vec<_>>();
        keys(&forwards) == keys(&backwards)
            && keys(&forwards) == keys(&sorted)
            && forwards.len() == xs.len()
    }
}

quickcheck::quickcheck! {
    fn insert_variants_hold_the_same_keys(xs: Vec<i8>) -> bool {
        let iterative = build(&xs);
        let mut recursive = Tree::new();
        for x in &xs {
            recursive.insert_recursive(i32::from(*x));
        }

        iterative.iter().eq(recursive.iter())
            && iterative.height() == recursive.height()
            && iterative.sideways().to_string() == recursive.sideways().to_string()
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = build(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|&x| !tree.contains(&i32::from(x)) && tree.find(&i32::from(x)).is_none())
    }
}

#[test]
fn handles_do_not_cross_trees() {
    let a: Tree<i32> = vec![1, 2, 3].into_iter().collect();
    let b: Tree<i32> = vec![1, 2, 3].into_iter().collect();

    let node = a.find(&2).unwrap();
    assert_eq!(a.range_from(Some(node)), Ok(Some(1)));
    assert_eq!(
        b.range_from(Some(node)),
        Err(ordered_tree::Error::ForeignNode(node))
    );
}
