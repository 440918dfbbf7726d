//! Reply Tree
//!
//! Comments may answer other comments. The tree is held as an arena: each
//! comment id maps to a slot, and every slot stores its parent slot and its
//! child slots. Nothing owns anything else, so removing or walking a branch
//! never fights the borrow checker.
//!
//! Visibility does not consult the tree. It is used when deleting a comment,
//! where every reply beneath it has to go first.

use std::collections::HashMap;

use uuid::Uuid;

/// Adjacency list over comment ids.
#[derive(Debug, Clone, Default)]
pub struct CommentTree {
    ids: Vec<Uuid>,
    index: HashMap<Uuid, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl CommentTree {
    /// Build a tree from `(id, parent_id)` pairs.
    ///
    /// A parent id that does not appear among the ids makes its comment a
    /// root. Duplicate ids keep their first occurrence.
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, Option<Uuid>)>,
    {
        let mut tree = CommentTree::default();
        let mut pending = Vec::new();

        for (id, parent) in edges {
            if tree.index.contains_key(&id) {
                continue;
            }
            let slot = tree.ids.len();
            tree.ids.push(id);
            tree.index.insert(id, slot);
            tree.parents.push(None);
            tree.children.push(Vec::new());
            pending.push((slot, parent));
        }

        for (slot, parent) in pending {
            let Some(parent_slot) = parent.and_then(|p| tree.index.get(&p).copied()) else {
                continue;
            };
            if parent_slot == slot {
                continue;
            }
            tree.parents[slot] = Some(parent_slot);
            tree.children[parent_slot].push(slot);
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// Parent of `id`, if it has one in this tree.
    pub fn parent(&self, id: Uuid) -> Option<Uuid> {
        let slot = *self.index.get(&id)?;
        self.parents[slot].map(|p| self.ids[p])
    }

    /// Direct replies to `id`, in insertion order.
    pub fn children(&self, id: Uuid) -> Vec<Uuid> {
        match self.index.get(&id) {
            Some(&slot) => self.children[slot].iter().map(|&c| self.ids[c]).collect(),
            None => Vec::new(),
        }
    }

    /// Comments without a parent, in insertion order.
    pub fn roots(&self) -> Vec<Uuid> {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(slot, _)| self.ids[slot])
            .collect()
    }

    /// `root` and everything beneath it, descendants before ancestors.
    ///
    /// Deleting rows in this order never leaves a reply pointing at a
    /// removed parent. Returns an empty list when `root` is unknown.
    pub fn subtree(&self, root: Uuid) -> Vec<Uuid> {
        let Some(&start) = self.index.get(&root) else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited = vec![false; self.ids.len()];
        // (slot, children already pushed)
        let mut stack = vec![(start, false)];

        while let Some((slot, expanded)) = stack.pop() {
            if expanded {
                order.push(self.ids[slot]);
                continue;
            }
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            stack.push((slot, true));
            for &child in self.children[slot].iter().rev() {
                if !visited[child] {
                    stack.push((child, false));
                }
            }
        }

        order
    }
}
