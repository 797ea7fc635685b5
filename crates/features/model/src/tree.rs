use crate::facet::Facet;
use crate::node::Node;
use crate::reference::Reference;
use crate::value::Value;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use tracing::{debug, warn};

/// Handle to a node in a [`Tree`].
///
/// Ids of removed nodes go stale: every tree operation treats them as unknown,
/// even after the graph hands their index to a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: NodeIndex,
    serial: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) node: Node,
    pub(crate) children: Vec<NodeId>,
    pub(crate) facet: Option<Facet>,
    serial: u64,
}

/// Direct-child lookup key.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    /// Case-insensitive idShort match.
    IdShort(&'a str),
    /// Key-chain equality of the semantic id.
    SemanticId(&'a Reference),
}

impl Lookup<'_> {
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::IdShort(id_short) => node.id_short().eq_ignore_ascii_case(id_short),
            Self::SemanticId(semantic_id) => node.semantic_id == **semantic_id,
        }
    }
}

/// Arena owning every node of one or more submodel trees.
///
/// Nodes live in a stable graph whose edges point from parent to child; the
/// child order is kept on the parent entry. Nodes start detached after
/// [`Tree::insert`] and are linked with [`Tree::add`]. A node has at most one
/// parent; moving it requires [`Tree::detach`] first.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    graph: StableDiGraph<Entry, ()>,
    next_serial: u64,
}

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Stores a detached node.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let serial = self.next_serial;
        self.next_serial += 1;
        let index =
            self.graph.add_node(Entry { node, children: Vec::new(), facet: None, serial });
        NodeId { index, serial }
    }

    pub(crate) fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.graph.node_weight(id.index).filter(|entry| entry.serial == id.serial)
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        self.graph.node_weight_mut(id.index).filter(|entry| entry.serial == id.serial)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.entry(id).map(|entry| &entry.node)
    }

    /// Mutable access to a node's payload. Structure is only changed through tree methods.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.entry_mut(id).map(|entry| &mut entry.node)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id)?;
        let index = self.graph.neighbors_directed(id.index, Direction::Incoming).next()?;
        self.graph.node_weight(index).map(|entry| NodeId { index, serial: entry.serial })
    }

    /// Direct children in insertion order; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entry(id).map_or(&[], |entry| entry.children.as_slice())
    }

    #[must_use]
    pub fn facet(&self, id: NodeId) -> Option<&Facet> {
        self.entry(id).and_then(|entry| entry.facet.as_ref())
    }

    /// `true` when `ancestor` is `id` itself or lies on its parent chain.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Appends `child` to a collection or ordered list.
    ///
    /// Rejected (returns `false`) when either id is unknown, `parent` is not a container,
    /// `child` already has a parent, or the link would create a cycle.
    ///
    /// Ordered lists are expected to be homogeneous and to hold anonymous items.
    /// Mismatches are the caller's responsibility; they are logged, not refused.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_child(parent, usize::MAX, child)
    }

    /// Inserts `node` and appends it to `parent`. A refused link frees the node again.
    pub fn append(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        let id = self.insert(node);
        if self.add(parent, id) {
            Some(id)
        } else {
            debug!(?parent, "child could not be linked, discarding it");
            self.destroy(id);
            None
        }
    }

    /// Like [`Tree::add`], placing `child` at `index` (clamped to the child count).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> bool {
        let (Some(parent_entry), Some(child_entry)) = (self.entry(parent), self.entry(child))
        else {
            debug!(?parent, ?child, "add rejected: unknown node");
            return false;
        };
        if !parent_entry.node.is_container() {
            debug!(parent = parent_entry.node.id_short(), "add rejected: parent is not a container");
            return false;
        }
        if self.parent(child).is_some() {
            debug!(child = child_entry.node.id_short(), "add rejected: node already has a parent");
            return false;
        }
        if let Value::OrderedList(spec) = &parent_entry.node.value
            && child_entry.node.model_type != spec.element_type
        {
            warn!(
                list = parent_entry.node.id_short(),
                expected = %spec.element_type,
                found = %child_entry.node.model_type,
                "heterogeneous ordered list element"
            );
        }
        if self.is_ancestor(child, parent) {
            debug!(?parent, ?child, "add rejected: cycle");
            return false;
        }

        if let Some(entry) = self.entry_mut(parent) {
            let at = index.min(entry.children.len());
            entry.children.insert(at, child);
        }
        self.graph.add_edge(parent.index, child.index, ());
        self.adopt(child);
        true
    }

    /// Unlinks `child` from its parent without destroying it.
    ///
    /// Actions anywhere in the detached subtree that lost their step are released.
    pub fn detach(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        if let Some(entry) = self.entry_mut(parent) {
            entry.children.retain(|id| *id != child);
        }
        if let Some(edge) = self.graph.find_edge(parent.index, child.index) {
            self.graph.remove_edge(edge);
        }
        self.release(child);
        true
    }

    /// Detaches `id` and frees it together with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.entry(current).is_none() {
                continue;
            }
            if let Some(entry) = self.graph.remove_node(current.index) {
                stack.extend(entry.children);
            }
        }
        true
    }

    /// Destroys the first direct child matching `predicate`.
    pub fn remove(&mut self, parent: NodeId, mut predicate: impl FnMut(&Node) -> bool) -> bool {
        let target = self
            .children(parent)
            .iter()
            .copied()
            .find(|child| self.get(*child).is_some_and(&mut predicate));
        target.is_some_and(|child| self.destroy(child))
    }

    /// Linear search over the direct children of `parent`.
    #[must_use]
    pub fn find(&self, parent: NodeId, lookup: Lookup<'_>) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.get(*child).is_some_and(|node| lookup.matches(node)))
    }

    /// Follows a chain of idShorts down from `root`.
    #[must_use]
    pub fn find_path(&self, root: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter().try_fold(root, |current, id_short| self.find(current, Lookup::IdShort(id_short)))
    }

    /// Destroys every child of `parent` and returns how many were removed.
    pub fn clear(&mut self, parent: NodeId) -> usize {
        let children = self.children(parent).to_vec();
        children.into_iter().filter(|child| self.destroy(*child)).count()
    }

    /// `root` followed by all of its descendants, pre-order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }
}
