//! Interchangeable controllers as a disjoint-set forest.
//!
//! Controllers in the same class are treated as substitutes for authority
//! purposes. The forest uses path compression and union by rank, so `find`
//! and `union` run in near-constant amortized time.

use crate::id::Controller;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct InterchangeableControllers {
    index: BTreeMap<Controller, usize>,
    members: Vec<Controller>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl InterchangeableControllers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest with every controller in its own singleton class.
    pub fn with_controllers(controllers: impl IntoIterator<Item = Controller>) -> Self {
        let mut set = Self::new();
        for controller in controllers {
            set.insert(controller);
        }
        set
    }

    /// Number of controllers tracked.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, controller: &Controller) -> bool {
        self.index.contains_key(controller)
    }

    /// Register `controller` as a singleton class. Returns false if it was
    /// already tracked.
    pub fn insert(&mut self, controller: Controller) -> bool {
        if self.contains(&controller) {
            return false;
        }
        self.slot_of(controller);
        true
    }

    fn slot_of(&mut self, controller: Controller) -> usize {
        if let Some(&slot) = self.index.get(&controller) {
            return slot;
        }
        let slot = self.members.len();
        self.index.insert(controller.clone(), slot);
        self.members.push(controller);
        self.parent.push(slot);
        self.rank.push(0);
        slot
    }

    /// Representative of `controller`'s class, compressing the path.
    ///
    /// An untracked controller is inserted as a singleton first.
    pub fn find(&mut self, controller: &Controller) -> Controller {
        let slot = self.slot_of(controller.clone());
        let root = self.find_slot(slot);
        self.members[root].clone()
    }

    /// Representative of `controller`'s class without mutating the forest.
    ///
    /// Returns `None` for an untracked controller.
    pub fn find_root(&self, controller: &Controller) -> Option<&Controller> {
        let mut slot = *self.index.get(controller)?;
        while self.parent[slot] != slot {
            slot = self.parent[slot];
        }
        Some(&self.members[slot])
    }

    /// Merge the classes of `a` and `b`. Returns false if already merged.
    pub fn union(&mut self, a: &Controller, b: &Controller) -> bool {
        let a_slot = self.slot_of(a.clone());
        let b_slot = self.slot_of(b.clone());
        let a_root = self.find_slot(a_slot);
        let b_root = self.find_slot(b_slot);
        if a_root == b_root {
            return false;
        }

        match self.rank[a_root].cmp(&self.rank[b_root]) {
            std::cmp::Ordering::Less => self.parent[a_root] = b_root,
            std::cmp::Ordering::Greater => self.parent[b_root] = a_root,
            std::cmp::Ordering::Equal => {
                self.parent[b_root] = a_root;
                self.rank[a_root] += 1;
            }
        }
        true
    }

    /// Whether `a` and `b` are tracked and share a class.
    pub fn are_interchangeable(&self, a: &Controller, b: &Controller) -> bool {
        match (self.find_root(a), self.find_root(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// All classes, each sorted, ordered by their smallest member.
    pub fn classes(&self) -> Vec<BTreeSet<Controller>> {
        let mut by_root: BTreeMap<&Controller, BTreeSet<Controller>> = BTreeMap::new();
        for controller in self.index.keys() {
            if let Some(root) = self.find_root(controller) {
                by_root
                    .entry(root)
                    .or_default()
                    .insert(controller.clone());
            }
        }
        let mut classes: Vec<BTreeSet<Controller>> = by_root.into_values().collect();
        classes.sort_by(|x, y| x.first().cmp(&y.first()));
        classes
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = slot;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str) -> Controller {
        Controller::new(id)
    }

    #[test]
    fn singletons_are_their_own_representative() {
        let mut set = InterchangeableControllers::with_controllers([c("A"), c("B")]);
        assert_eq!(set.len(), 2);
        assert!(!set.insert(c("A")));
        assert_eq!(set.find(&c("A")), c("A"));
        assert!(!set.are_interchangeable(&c("A"), &c("B")));
    }

    #[test]
    fn union_is_transitive() {
        let mut set = InterchangeableControllers::new();
        assert!(set.union(&c("A"), &c("B")));
        assert!(set.union(&c("C"), &c("D")));
        assert!(set.union(&c("B"), &c("D")));
        assert!(!set.union(&c("A"), &c("C")));

        assert!(set.are_interchangeable(&c("A"), &c("D")));
        assert_eq!(set.find(&c("C")), set.find(&c("A")));
        assert_eq!(set.classes().len(), 1);
    }

    #[test]
    fn find_inserts_unknown_controller() {
        let mut set = InterchangeableControllers::new();
        assert!(set.find_root(&c("ghost")).is_none());
        assert_eq!(set.find(&c("ghost")), c("ghost"));
        assert!(set.contains(&c("ghost")));
    }

    #[test]
    fn unknown_controllers_are_not_interchangeable() {
        let set = InterchangeableControllers::with_controllers([c("A")]);
        assert!(!set.are_interchangeable(&c("A"), &c("Z")));
    }

    #[test]
    fn path_compression_flattens_chains() {
        let mut set = InterchangeableControllers::new();
        // Equal ranks make the first argument's root the parent.
        set.union(&c("B"), &c("C"));
        set.union(&c("A"), &c("B"));
        set.union(&c("D"), &c("E"));
        set.union(&c("D"), &c("A"));

        let root = set.find(&c("C"));
        let c_slot = set.index[&c("C")];
        assert_eq!(set.members[set.parent[c_slot]], root);
    }

    #[test]
    fn classes_are_canonical() {
        let mut set = InterchangeableControllers::with_controllers([c("Z"), c("M"), c("A")]);
        set.union(&c("Z"), &c("M"));
        let classes = set.classes();
        assert_eq!(
            classes,
            vec![
                BTreeSet::from([c("A")]),
                BTreeSet::from([c("M"), c("Z")]),
            ]
        );
    }
}
