use std::cmp::Ordering;
use std::fmt::Display;

use crate::keyed::FieldKeyed;
use crate::node::{Link, Node, rotate_left, rotate_right};
use crate::render;

/// A self-balancing binary search tree over any totally-ordered element.
///
/// Insertion keeps the AVL balance bound (left and right subtree heights
/// differ by at most one at every node) via single and double rotations.
/// Removal splices by in-order predecessor and does not rebalance; see
/// [`AvlTree::remove`].
#[derive(Clone, Debug)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of elements stored. Always equal to the number of nodes
    /// reachable from the root.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// In-order traversal, ascending by the element order.
    pub fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a T),
    {
        fn walk<'a, T, F: FnMut(&'a T)>(link: &'a Link<T>, f: &mut F) {
            if let Some(n) = link {
                walk(&n.left, f);
                f(&n.elem);
                walk(&n.right, f);
            }
        }
        walk(&self.root, &mut f);
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `elem`, rebalancing on the way back up. An element equal
    /// to one already stored leaves the tree untouched and returns
    /// `false`; the length only grows on a genuine insert.
    pub fn insert(&mut self, elem: T) -> bool {
        let (root, step) = insert_at(self.root.take(), elem);
        self.root = Some(root);
        match step {
            InsertStep::Duplicate => false,
            InsertStep::Inserted(_) => {
                self.len += 1;
                true
            }
        }
    }

    /// Removes the element equal to `target`, reporting whether a node
    /// was detached. A missing target leaves the tree unchanged.
    ///
    /// The removal path performs no height maintenance and no rotations,
    /// so the balance bound is only guaranteed while no removals have
    /// run; a removal-heavy workload can degrade lookups toward O(n).
    pub fn remove(&mut self, target: &T) -> bool {
        let (root, removed) = remove_at(self.root.take(), target);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Checks the ordering invariant and that the stored length matches
    /// the reachable node count. Holds after any operation sequence.
    pub fn assert_valid(&self) -> Result<(), String> {
        let count = count_nodes(&self.root);
        if count != self.len {
            return Err(format!("Length mismatch: expected {count}, got {}", self.len));
        }
        let mut items = Vec::with_capacity(self.len);
        self.for_each(|e| items.push(e));
        for pair in items.windows(2) {
            if pair[0] >= pair[1] {
                return Err("Node order violated".to_string());
            }
        }
        Ok(())
    }

    /// [`assert_valid`](Self::assert_valid) plus stored-height accuracy
    /// and the AVL balance bound at every node. Only guaranteed while no
    /// removals have run.
    pub fn assert_balanced(&self) -> Result<(), String> {
        self.assert_valid()?;
        check_heights(&self.root).map(|_| ())
    }
}

impl<T: Ord + FieldKeyed> AvlTree<T> {
    /// All stored elements whose primary field equals `key`.
    ///
    /// The primary field dominates the element order, so a mismatching
    /// node bounds the key to one side and the descent prunes the other;
    /// a matching node may hide further matches in both subtrees (the
    /// subordinate tie-break components decide the side), so both are
    /// searched. Results come back in ascending element order.
    pub fn find_by_primary(&self, key: &str) -> Vec<&T> {
        let mut out = Vec::new();
        collect_primary(&self.root, key, &mut out);
        out
    }

    /// All stored elements whose secondary field equals `key`.
    ///
    /// The secondary field gives the ordering nothing to prune on, so
    /// every node is visited, O(n), and results come back in ascending
    /// primary order rather than grouped by the queried field.
    pub fn find_by_secondary(&self, key: &str) -> Vec<&T> {
        let mut out = Vec::new();
        self.for_each(|e| {
            if e.secondary_key() == key {
                out.push(e);
            }
        });
        out
    }
}

impl<T: Display> AvlTree<T> {
    /// In-order rendering with a two-space separator after every
    /// element, the last included.
    pub fn to_flat_string(&self) -> String {
        let mut out = String::new();
        render::flat(&self.root, &mut out);
        out
    }

    /// Preorder structural dump with `|--` branch markers and explicit
    /// `null` lines for absent children.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        render::tree_format(&self.root, 0, &mut out);
        out
    }
}

enum InsertStep {
    /// An equal element was already present; the subtree is unchanged.
    Duplicate,
    /// A node was created below. Carries how the new element compared
    /// against this subtree's root at descent time, which the parent
    /// needs to pick a rotation case.
    Inserted(Option<Ordering>),
}

fn insert_at<T: Ord>(link: Link<T>, elem: T) -> (Box<Node<T>>, InsertStep) {
    let Some(mut n) = link else {
        return (Box::new(Node::new(elem)), InsertStep::Inserted(None));
    };
    let cmp = elem.cmp(&n.elem);
    let step = match cmp {
        Ordering::Equal => return (n, InsertStep::Duplicate),
        Ordering::Less => {
            let (child, step) = insert_at(n.left.take(), elem);
            n.left = Some(child);
            step
        }
        Ordering::Greater => {
            let (child, step) = insert_at(n.right.take(), elem);
            n.right = Some(child);
            step
        }
    };
    match step {
        InsertStep::Duplicate => (n, InsertStep::Duplicate),
        InsertStep::Inserted(via) => (rebalance(n, via), InsertStep::Inserted(Some(cmp))),
    }
}

/// Recomputes `n`'s height and, if the balance bound broke, applies one
/// of the four rotation cases. The case is selected by `via`: how the
/// inserted key compared against the child subtree the insertion
/// descended into, which is the heavier child of an unbalanced node.
fn rebalance<T: Ord>(mut n: Box<Node<T>>, via: Option<Ordering>) -> Box<Node<T>> {
    n.update_height();
    let bf = n.balance_factor();
    if (-1..=1).contains(&bf) {
        return n;
    }
    // An unbalanced node's grown child has height >= 2, so a comparison
    // happened there during descent.
    let via = via.expect("unbalanced node grew via an interior child");
    match (bf > 1, via == Ordering::Less) {
        // left-left
        (true, true) => rotate_right(n),
        // left-right
        (true, false) => {
            let l = n.left.take().expect("left-heavy node has a left child");
            n.left = Some(rotate_left(l));
            rotate_right(n)
        }
        // right-right
        (false, false) => rotate_left(n),
        // right-left
        (false, true) => {
            let r = n.right.take().expect("right-heavy node has a right child");
            n.right = Some(rotate_right(r));
            rotate_left(n)
        }
    }
}

fn remove_at<T: Ord>(link: Link<T>, target: &T) -> (Link<T>, bool) {
    let Some(mut n) = link else {
        return (None, false);
    };
    match target.cmp(&n.elem) {
        Ordering::Less => {
            let (child, removed) = remove_at(n.left.take(), target);
            n.left = child;
            (Some(n), removed)
        }
        Ordering::Greater => {
            let (child, removed) = remove_at(n.right.take(), target);
            n.right = child;
            (Some(n), removed)
        }
        Ordering::Equal => (splice(n), true),
    }
}

/// Detaches the subtree root. A node with at most one child is replaced
/// by that child; with two children the in-order predecessor's payload
/// moves up and the predecessor node is unlinked from the left subtree.
fn splice<T: Ord>(mut n: Box<Node<T>>) -> Link<T> {
    match (n.left.take(), n.right.take()) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => {
            let (rest, pred) = take_max(left);
            n.elem = pred;
            n.left = rest;
            n.right = Some(right);
            Some(n)
        }
    }
}

/// Unlinks the rightmost node of the subtree, yielding the remaining
/// subtree and the detached maximum element.
fn take_max<T>(mut n: Box<Node<T>>) -> (Link<T>, T) {
    match n.right.take() {
        Some(r) => {
            let (rest, max) = take_max(r);
            n.right = rest;
            (Some(n), max)
        }
        None => {
            let Node { left, elem, .. } = *n;
            (left, elem)
        }
    }
}

fn collect_primary<'a, T: FieldKeyed>(link: &'a Link<T>, key: &str, out: &mut Vec<&'a T>) {
    let Some(n) = link else { return };
    match key.cmp(n.elem.primary_key()) {
        Ordering::Less => collect_primary(&n.left, key, out),
        Ordering::Greater => collect_primary(&n.right, key, out),
        Ordering::Equal => {
            collect_primary(&n.left, key, out);
            out.push(&n.elem);
            collect_primary(&n.right, key, out);
        }
    }
}

fn count_nodes<T>(link: &Link<T>) -> usize {
    link.as_ref()
        .map_or(0, |n| 1 + count_nodes(&n.left) + count_nodes(&n.right))
}

fn check_heights<T>(link: &Link<T>) -> Result<i32, String> {
    let Some(n) = link else { return Ok(0) };
    let lh = check_heights(&n.left)?;
    let rh = check_heights(&n.right)?;
    let height = 1 + lh.max(rh);
    if n.height != height {
        return Err(format!("Height mismatch: expected {height}, got {}", n.height));
    }
    if !(-1..=1).contains(&(lh - rh)) {
        return Err(format!("Balance violated: factor {}", lh - rh));
    }
    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> AvlTree<i32> {
        let mut tree = AvlTree::new();
        for &k in keys {
            tree.insert(k);
        }
        tree
    }

    fn in_order(tree: &AvlTree<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        tree.for_each(|&k| out.push(k));
        out
    }

    // ── Insertion ──────────────────────────────────────────────────────

    #[test]
    fn insert_into_empty_tree() {
        let mut tree = AvlTree::new();
        assert!(tree.is_empty());
        assert!(tree.insert(7));
        assert_eq!(tree.len(), 1);
        assert_eq!(in_order(&tree), vec![7]);
    }

    #[test]
    fn duplicate_insert_is_a_structural_no_op() {
        let mut tree = tree_of(&[5, 3, 8]);
        let before = tree.to_tree_string();
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_tree_string(), before);
        tree.assert_balanced().unwrap();
    }

    #[test]
    fn ascending_run_rotates_left_at_root() {
        let tree = tree_of(&[1, 2, 3]);
        // A single left rotation leaves 2 at the root.
        assert_eq!(
            tree.to_tree_string(),
            "\n2\n|--1\n   |--null\n   |--null\n|--3\n   |--null\n   |--null"
        );
        tree.assert_balanced().unwrap();
    }

    #[test]
    fn descending_run_rotates_right_at_root() {
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(
            tree.to_tree_string(),
            "\n2\n|--1\n   |--null\n   |--null\n|--3\n   |--null\n   |--null"
        );
        tree.assert_balanced().unwrap();
    }

    #[test]
    fn left_right_case_promotes_the_middle_key() {
        // 3, 1, 2: inserted key lands between the unbalanced node and
        // its left child, forcing the double rotation.
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(in_order(&tree), vec![1, 2, 3]);
        assert_eq!(
            tree.to_tree_string(),
            "\n2\n|--1\n   |--null\n   |--null\n|--3\n   |--null\n   |--null"
        );
        tree.assert_balanced().unwrap();
    }

    #[test]
    fn right_left_case_promotes_the_middle_key() {
        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(
            tree.to_tree_string(),
            "\n2\n|--1\n   |--null\n   |--null\n|--3\n   |--null\n   |--null"
        );
        tree.assert_balanced().unwrap();
    }

    // ── Removal ────────────────────────────────────────────────────────

    #[test]
    fn remove_absent_target_reports_not_found() {
        let mut tree = tree_of(&[5, 3, 8]);
        let before = tree.to_tree_string();
        assert!(!tree.remove(&99));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_tree_string(), before);
    }

    #[test]
    fn remove_from_empty_tree_reports_not_found() {
        let mut tree: AvlTree<i32> = AvlTree::new();
        assert!(!tree.remove(&1));
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn remove_leaf() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert!(tree.remove(&3));
        assert_eq!(tree.len(), 2);
        assert_eq!(in_order(&tree), vec![1, 2]);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn remove_single_child_node_splices_the_child_up() {
        let mut tree = tree_of(&[5, 3, 8, 9]);
        assert!(tree.remove(&8));
        assert_eq!(in_order(&tree), vec![3, 5, 9]);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn remove_two_child_root_substitutes_the_predecessor() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert!(tree.remove(&2));
        assert_eq!(tree.len(), 2);
        // The in-order predecessor (1) takes over the root.
        assert_eq!(
            tree.to_tree_string(),
            "\n1\n|--null\n|--3\n   |--null\n   |--null"
        );
        tree.assert_valid().unwrap();
    }

    #[test]
    fn remove_two_child_node_with_deep_predecessor() {
        let mut tree = tree_of(&[8, 4, 12, 2, 6, 10, 14, 5, 7]);
        assert!(tree.remove(&8));
        assert_eq!(in_order(&tree), vec![2, 4, 5, 6, 7, 10, 12, 14]);
        assert_eq!(tree.len(), 8);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn remove_decrements_length_by_exactly_one() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4]);
        assert!(tree.remove(&3));
        assert_eq!(tree.len(), 4);
        assert!(!tree.remove(&3));
        assert_eq!(tree.len(), 4);
    }

    // ── Rendering ──────────────────────────────────────────────────────

    #[test]
    fn flat_string_is_in_order_with_trailing_separator() {
        let tree = tree_of(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.to_flat_string(), "1  3  4  5  8  ");
    }

    #[test]
    fn flat_string_of_empty_tree_is_empty() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.to_flat_string(), "");
    }

    #[test]
    fn tree_string_of_empty_tree_is_a_null_line() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.to_tree_string(), "\nnull");
    }

    #[test]
    fn tree_string_indents_three_spaces_per_level() {
        let tree = tree_of(&[2, 1, 3, 4]);
        assert_eq!(
            tree.to_tree_string(),
            "\n2\
             \n|--1\n   |--null\n   |--null\
             \n|--3\n   |--null\n   |--4\n      |--null\n      |--null"
        );
    }

    // ── Field searches ─────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Entry {
        key: String,
        rank: u32,
        tag: String,
    }

    impl Entry {
        fn new(key: &str, rank: u32, tag: &str) -> Self {
            Self {
                key: key.to_string(),
                rank,
                tag: tag.to_string(),
            }
        }
    }

    impl FieldKeyed for Entry {
        fn primary_key(&self) -> &str {
            &self.key
        }

        fn secondary_key(&self) -> &str {
            &self.tag
        }
    }

    #[test]
    fn primary_search_collects_matches_from_both_subtrees() {
        let mut tree = AvlTree::new();
        // Equal primary keys with different ranks land on both sides of
        // the first "m" node inserted.
        tree.insert(Entry::new("m", 5, "x"));
        tree.insert(Entry::new("a", 1, "x"));
        tree.insert(Entry::new("z", 9, "y"));
        tree.insert(Entry::new("m", 2, "y"));
        tree.insert(Entry::new("m", 8, "z"));

        let hits = tree.find_by_primary("m");
        let ranks: Vec<u32> = hits.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![2, 5, 8]);
    }

    #[test]
    fn primary_search_misses_cleanly() {
        let mut tree = AvlTree::new();
        tree.insert(Entry::new("b", 1, "x"));
        assert!(tree.find_by_primary("q").is_empty());
    }

    #[test]
    fn secondary_scan_returns_matches_in_primary_order() {
        let mut tree = AvlTree::new();
        tree.insert(Entry::new("m", 5, "x"));
        tree.insert(Entry::new("a", 1, "x"));
        tree.insert(Entry::new("z", 9, "x"));
        tree.insert(Entry::new("k", 3, "y"));

        let hits = tree.find_by_secondary("x");
        let keys: Vec<&str> = hits.iter().map(|e| e.key.as_str()).collect();
        // "x" entries sit in different subtrees but come back sorted by
        // the primary order.
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn secondary_scan_is_a_subset_of_the_whole_tree() {
        let mut tree = AvlTree::new();
        for (k, r, t) in [("a", 1, "x"), ("b", 2, "y"), ("c", 3, "x")] {
            tree.insert(Entry::new(k, r, t));
        }
        let all: Vec<&Entry> = {
            let mut v = Vec::new();
            tree.for_each(|e| v.push(e));
            v
        };
        for hit in tree.find_by_secondary("x") {
            assert!(all.contains(&hit));
        }
    }
}
