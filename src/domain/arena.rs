//! Arena-backed binary search tree of profiles keyed by name.

use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument, trace};

use crate::domain::entities::Profile;
use crate::domain::sequence::ReferenceSequences;

/// Tree node: a name key, the profile it owns, and links to its children.
#[derive(Debug)]
pub struct TreeNode {
    name: String,
    profile: Profile,
    left: Option<Index>,
    right: Option<Index>,
}

impl TreeNode {
    fn leaf(name: String, profile: Profile) -> Self {
        Self {
            name,
            profile,
            left: None,
            right: None,
        }
    }

    /// Full name, "Last, First"
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn left(&self) -> Option<Index> {
        self.left
    }

    pub fn right(&self) -> Option<Index> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.profile.is_of_interest() { "*" } else { "" };
        write!(f, "{}{}", self.name, mark)
    }
}

/// Unbalanced binary search tree of profiles keyed by full name.
///
/// Nodes live in a generational arena and link to their children by index.
/// The arena holds exactly the nodes reachable from `root`: removal releases
/// the slot of the removed node.
///
/// Ordering: every key in a left subtree is strictly less than its ancestor's
/// key, every key in a right subtree is greater or equal. Keys are expected to
/// be unique. Inserting a duplicate is accepted and routes right; searches stop
/// at the first (shallowest) node with a matching key.
///
/// Keys compare byte-wise, which is Unicode code point order.
#[derive(Debug)]
pub struct ProfileTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for ProfileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a new leaf. No rebalancing.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, name: impl Into<String>, profile: Profile) -> Index {
        let name = name.into();

        // (parent, attach to its left slot)
        let mut parent: Option<(Index, bool)> = None;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            let go_left = name.as_str() < node.name.as_str();
            parent = Some((idx, go_left));
            current = if go_left { node.left } else { node.right };
        }

        let new_idx = self.arena.insert(TreeNode::leaf(name, profile));
        match parent {
            None => self.root = Some(new_idx),
            Some((p, true)) => self.arena[p].left = Some(new_idx),
            Some((p, false)) => self.arena[p].right = Some(new_idx),
        }
        new_idx
    }

    /// Find the node holding `name`, together with its parent.
    fn find(&self, name: &str) -> Option<(Option<Index>, Index)> {
        let mut parent = None;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            if node.name == name {
                return Some((parent, idx));
            }
            parent = Some(idx);
            current = if name < node.name.as_str() {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.find(name).map(|(_, idx)| &self.arena[idx].profile)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Number of profiles whose flag equals `of_interest`.
    #[instrument(level = "debug", skip(self))]
    pub fn count(&self, of_interest: bool) -> usize {
        self.count_from(self.root, of_interest)
    }

    fn count_from(&self, idx: Option<Index>, of_interest: bool) -> usize {
        let Some(idx) = idx else {
            return 0;
        };
        let node = &self.arena[idx];
        let own = usize::from(node.profile.is_of_interest() == of_interest);
        own + self.count_from(node.left, of_interest) + self.count_from(node.right, of_interest)
    }

    /// Recompute the flag of every profile against the reference sequences.
    #[instrument(level = "debug", skip_all)]
    pub fn classify(&mut self, sequences: &ReferenceSequences) {
        // every arena slot is a tree node, so this visits each node once
        for (_, node) in self.arena.iter_mut() {
            let flagged = node.profile.evaluate(sequences);
            trace!(name = %node.name, flagged, "classified");
            node.profile.set_of_interest(flagged);
        }
    }

    /// Names of all unflagged profiles in level order, left before right.
    #[instrument(level = "debug", skip(self))]
    pub fn unmarked(&self) -> Vec<String> {
        let expected = self.count(false);
        let mut names = Vec::with_capacity(expected);
        let mut queue = VecDeque::new();
        queue.extend(self.root);

        while let Some(idx) = queue.pop_front() {
            let node = &self.arena[idx];
            if !node.profile.is_of_interest() {
                names.push(node.name.clone());
            }
            queue.extend(node.left);
            queue.extend(node.right);
        }

        debug_assert_eq!(names.len(), expected, "level order and count disagree");
        names
    }

    /// Remove the node holding `name`. Absent names are a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, name: &str) {
        let Some((parent, target)) = self.find(name) else {
            debug!("not found, nothing to remove");
            return;
        };

        let (left, right) = {
            let node = &self.arena[target];
            (node.left, node.right)
        };

        match (left, right) {
            (Some(_), Some(right)) => {
                // in-order successor: leftmost node of the right subtree
                let mut successor_parent = target;
                let mut successor = right;
                while let Some(next) = self.arena[successor].left {
                    successor_parent = successor;
                    successor = next;
                }

                let successor_right = self.arena[successor].right;
                if successor_parent == target {
                    self.arena[target].right = successor_right;
                } else {
                    self.arena[successor_parent].left = successor_right;
                }

                if let Some(moved) = self.arena.remove(successor) {
                    trace!(successor = %moved.name, "moving successor payload");
                    let node = &mut self.arena[target];
                    node.name = moved.name;
                    node.profile = moved.profile;
                }
            }
            (child, None) | (None, child) => {
                self.replace_child(parent, target, child);
                self.arena.remove(target);
            }
        }
    }

    /// Point `parent`'s link to `old` at `new` instead, or the root if there is no parent.
    fn replace_child(&mut self, parent: Option<Index>, old: Index, new: Option<Index>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = &mut self.arena[p];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Remove every unflagged profile, in level order.
    #[instrument(level = "debug", skip(self))]
    pub fn cleanup(&mut self) -> Vec<String> {
        let names = self.unmarked();
        for name in &names {
            self.remove(name);
        }
        debug!("removed {} unflagged profiles", names.len());
        names
    }

    /// All names in order.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        self.collect_in_order(self.root, &mut names);
        names
    }

    fn collect_in_order(&self, idx: Option<Index>, names: &mut Vec<String>) {
        if let Some(idx) = idx {
            let node = &self.arena[idx];
            self.collect_in_order(node.left, names);
            names.push(node.name.clone());
            self.collect_in_order(node.right, names);
        }
    }

    /// Height in nodes; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    fn depth_from(&self, idx: Option<Index>) -> usize {
        match idx {
            Some(idx) => {
                let node = &self.arena[idx];
                1 + self.depth_from(node.left).max(self.depth_from(node.right))
            }
            None => 0,
        }
    }

    /// Pre-order iterator.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Render as a `termtree` with `L`/`R` markers on child positions.
    pub fn to_display_tree(&self) -> Tree<String> {
        match self.root {
            Some(root) => self.display_subtree(root, ""),
            None => Tree::new("(empty)".to_string()),
        }
    }

    fn display_subtree(&self, idx: Index, side: &str) -> Tree<String> {
        let node = &self.arena[idx];
        let mut tree = Tree::new(format!("{}{}", side, node));
        if let Some(left) = node.left {
            tree.push(self.display_subtree(left, "L: "));
        }
        if let Some(right) = node.right {
            tree.push(self.display_subtree(right, "R: "));
        }
        tree
    }
}

pub struct TreeIterator<'a> {
    tree: &'a ProfileTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a ProfileTree) -> Self {
        let mut stack = Vec::new();
        stack.extend(tree.root);
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.get_node(idx)?;
        // right first so the left child is visited first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((idx, node))
    }
}
