//! In-memory view of the category forest.
//!
//! Built from one snapshot of the category table and keyed by parent id.
//! Every walk is iterative and tracks visited ids, so rows that point at each
//! other (or at a missing parent) cannot make a traversal loop.

use std::collections::{HashMap, HashSet};

use super::domain::Category;

/// Separator between category names in a breadcrumb.
pub const SEPARATOR: &str = " > ";

#[derive(Debug, Default, Clone)]
pub struct CategoryTree {
    nodes: HashMap<i32, Category>,
    /// parent id -> child ids, ascending
    children: HashMap<i32, Vec<i32>>,
}

impl CategoryTree {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut nodes = HashMap::new();
        let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
        for c in categories {
            if let Some(parent) = c.parent_category_id.filter(|p| *p != c.id) {
                children.entry(parent).or_default().push(c.id);
            }
            nodes.insert(c.id, c);
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }
        Self { nodes, children }
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn get(&self, id: i32) -> Option<&Category> { self.nodes.get(&id) }

    /// Direct children of `id`, ascending.
    pub fn children(&self, id: i32) -> &[i32] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every id below `id`, in pre-order. `id` itself is never included.
    pub fn descendant_ids(&self, id: i32) -> Vec<i32> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<i32> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// One breadcrumb per leaf reachable from `id`, each starting at `id`.
    /// A leaf yields just its own name. `None` when `id` is unknown.
    pub fn descendant_leaf_paths(&self, id: i32) -> Option<Vec<String>> {
        let root = self.nodes.get(&id)?;
        let mut paths = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack = vec![(id, root.name.clone())];
        while let Some((node, path)) = stack.pop() {
            let next: Vec<&Category> = self
                .children(node)
                .iter()
                .filter(|c| visited.insert(**c))
                .filter_map(|c| self.nodes.get(c))
                .collect();
            if next.is_empty() {
                paths.push(path);
                continue;
            }
            for child in next.into_iter().rev() {
                stack.push((child.id, format!("{path}{SEPARATOR}{}", child.name)));
            }
        }
        Some(paths)
    }

    /// Ids from `id` up to its root, starting with `id`. Stops at a missing
    /// parent or at the first repeated id.
    pub fn lineage(&self, id: i32) -> Vec<i32> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            if !visited.insert(cid) {
                break;
            }
            let Some(node) = self.nodes.get(&cid) else { break };
            chain.push(cid);
            current = node.parent_category_id;
        }
        chain
    }

    /// Root-to-self breadcrumb, e.g. `"Fiction > Sci-Fi"`. `None` when `id` is unknown.
    pub fn ancestor_path(&self, id: i32) -> Option<String> {
        let lineage = self.lineage(id);
        if lineage.is_empty() {
            return None;
        }
        let names: Vec<&str> = lineage
            .iter()
            .rev()
            .filter_map(|cid| self.nodes.get(cid))
            .map(|c| c.name.as_str())
            .collect();
        Some(names.join(SEPARATOR))
    }

    /// Whether `ancestor` appears on the parent chain of `id` (excluding `id`).
    pub fn is_ancestor(&self, ancestor: i32, id: i32) -> bool {
        self.lineage(id).into_iter().skip(1).any(|cid| cid == ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i32, name: &str, parent: Option<i32>) -> Category {
        Category { id, name: name.to_string(), parent_category_id: parent }
    }

    /// X(1) -> {A(2), B(3)}, A -> {C(4)}
    fn sample() -> CategoryTree {
        CategoryTree::new(vec![
            cat(1, "X", None),
            cat(2, "A", Some(1)),
            cat(3, "B", Some(1)),
            cat(4, "C", Some(2)),
        ])
    }

    #[test]
    fn descendant_ids_are_preorder_and_exclude_self() {
        let tree = sample();
        assert_eq!(tree.descendant_ids(1), vec![2, 4, 3]);
        assert_eq!(tree.descendant_ids(2), vec![4]);
        assert!(tree.descendant_ids(4).is_empty());
    }

    #[test]
    fn descendant_ids_of_unknown_id_is_empty() {
        assert!(sample().descendant_ids(99).is_empty());
    }

    #[test]
    fn leaf_yields_own_name() {
        assert_eq!(sample().descendant_leaf_paths(4), Some(vec!["C".to_string()]));
    }

    #[test]
    fn leaf_paths_fan_out_per_leaf() {
        // X -> A -> {B, C}
        let tree = CategoryTree::new(vec![
            cat(1, "X", None),
            cat(2, "A", Some(1)),
            cat(3, "B", Some(2)),
            cat(4, "C", Some(2)),
        ]);
        assert_eq!(
            tree.descendant_leaf_paths(1).unwrap(),
            vec!["X > A > B".to_string(), "X > A > C".to_string()]
        );
        assert_eq!(tree.descendant_leaf_paths(2).unwrap(), vec!["A > B", "A > C"]);
    }

    #[test]
    fn leaf_paths_unknown_id() {
        assert_eq!(sample().descendant_leaf_paths(42), None);
    }

    #[test]
    fn ancestor_path_walks_to_root() {
        let tree = sample();
        assert_eq!(tree.ancestor_path(4).as_deref(), Some("X > A > C"));
        assert_eq!(tree.ancestor_path(1).as_deref(), Some("X"));
        assert_eq!(tree.ancestor_path(7), None);
    }

    #[test]
    fn ancestor_path_stops_at_missing_parent() {
        let tree = CategoryTree::new(vec![cat(5, "Orphan", Some(404)), cat(6, "Kid", Some(5))]);
        assert_eq!(tree.ancestor_path(6).as_deref(), Some("Orphan > Kid"));
    }

    #[test]
    fn is_ancestor_follows_parent_chain() {
        let tree = sample();
        assert!(tree.is_ancestor(1, 4));
        assert!(tree.is_ancestor(2, 4));
        assert!(!tree.is_ancestor(3, 4));
        assert!(!tree.is_ancestor(4, 4));
    }

    #[test]
    fn cyclic_rows_terminate() {
        // 1 -> 2 -> 3 -> 1, plus a self-parented row
        let tree = CategoryTree::new(vec![
            cat(1, "One", Some(3)),
            cat(2, "Two", Some(1)),
            cat(3, "Three", Some(2)),
            cat(9, "Selfish", Some(9)),
        ]);
        assert_eq!(tree.descendant_ids(1), vec![2, 3]);
        assert_eq!(tree.descendant_leaf_paths(1).unwrap(), vec!["One > Two > Three"]);
        assert_eq!(tree.lineage(1), vec![1, 3, 2]);
        assert_eq!(tree.descendant_leaf_paths(9).unwrap(), vec!["Selfish"]);
        assert_eq!(tree.ancestor_path(9).as_deref(), Some("Selfish"));
    }
}
