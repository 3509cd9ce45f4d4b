use egui::Pos2;
use indexmap::IndexMap;
use log::debug;
use petgraph::{
    stable_graph::{EdgeReference, NodeIndex, StableGraph},
    visit::{EdgeRef, IntoEdgeReferences},
};

use crate::{
    error::non_blank, Error, Node, NodeKind, Relation, RelationKind, RelationRef, Result,
};

type StableGraphType = StableGraph<Node, Relation>;

/// Semantic network storage: uniquely named nodes joined by kinded, directed relations.
///
/// Wraps a [`petgraph::stable_graph::StableGraph`] and keeps a name index next to it so that
/// nodes are addressed by name and enumerated in insertion order. Every invariant is checked
/// here: unique names, no self relations, no duplicate `(from, to, kind)` triples.
///
/// Removing a node also removes every relation touching it.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    g: StableGraphType,
    by_name: IndexMap<String, NodeIndex>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn g(&self) -> &StableGraphType {
        &self.g
    }

    /// Adds a node under a trimmed `name`.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for a blank name, [`Error::DuplicateName`] when the name is taken.
    /// The existing node is left untouched in both cases.
    pub fn add_node(&mut self, name: &str, kind: NodeKind, location: Pos2) -> Result<()> {
        let name = non_blank(name, "node name")?;
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let idx = self.g.add_node(Node::new(name.to_string(), kind, location));
        self.by_name.insert(name.to_string(), idx);
        debug!("node '{name}' ({kind}) added at {location:?}");
        Ok(())
    }

    /// Adds a directed relation between two existing nodes.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for blank endpoints, [`Error::SelfRelation`] when both endpoints
    /// are the same node, [`Error::UnknownNode`] for a missing endpoint and
    /// [`Error::DuplicateRelation`] when the exact triple is already stored.
    pub fn add_relation(&mut self, from: &str, to: &str, kind: RelationKind) -> Result<()> {
        let from = non_blank(from, "relation source")?;
        let to = non_blank(to, "relation target")?;
        if from == to {
            return Err(Error::SelfRelation(from.to_string()));
        }
        let idx_from = self.index_of(from)?;
        let idx_to = self.index_of(to)?;

        if self
            .g
            .edges_connecting(idx_from, idx_to)
            .any(|e| e.weight().kind() == kind)
        {
            return Err(Error::DuplicateRelation {
                from: from.to_string(),
                to: to.to_string(),
                kind,
            });
        }

        self.g.add_edge(idx_from, idx_to, Relation::new(kind));
        debug!("relation '{from}' -[{kind}]-> '{to}' added");
        Ok(())
    }

    /// Removes a node together with all relations incident to it.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] when no node has this name.
    pub fn remove_node(&mut self, name: &str) -> Result<Node> {
        let idx = self
            .by_name
            .shift_remove(name.trim())
            .ok_or_else(|| Error::UnknownNode(name.trim().to_string()))?;
        let dropped = self.g.edges_directed(idx, petgraph::Direction::Outgoing).count()
            + self.g.edges_directed(idx, petgraph::Direction::Incoming).count();
        let node = self
            .g
            .remove_node(idx)
            .ok_or_else(|| Error::UnknownNode(name.trim().to_string()))?;
        debug!(
            "node '{}' removed with {dropped} incident relation(s)",
            node.name()
        );
        Ok(node)
    }

    pub fn clear(&mut self) {
        self.g.clear();
        self.by_name.clear();
        debug!("graph cleared");
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.by_name
            .get(name)
            .and_then(|idx| self.g.node_weight(*idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.by_name
            .values()
            .filter_map(|idx| self.g.node_weight(*idx))
    }

    pub fn relations(&self) -> impl Iterator<Item = RelationRef<'_>> {
        self.g.edge_references().map(|e| self.relation_ref(e))
    }

    /// Relations in which `name` takes part, in either direction.
    pub fn relations_of<'a>(&'a self, name: &str) -> impl Iterator<Item = RelationRef<'a>> + 'a {
        let idx = self.by_name.get(name).copied();
        self.g
            .edge_references()
            .filter(move |e| Some(e.source()) == idx || Some(e.target()) == idx)
            .map(|e| self.relation_ref(e))
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.g.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.g.node_count() == 0
    }

    /// Node locations in insertion order.
    pub fn locations(&self) -> Vec<Pos2> {
        self.nodes().map(Node::location).collect()
    }

    /// Moves a node. Used by layout passes and drags.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] when no node has this name.
    pub fn set_location(&mut self, name: &str, location: Pos2) -> Result<()> {
        let idx = self.index_of(name)?;
        if let Some(n) = self.g.node_weight_mut(idx) {
            n.set_location(location);
        }
        Ok(())
    }

    pub(crate) fn node_indices(&self) -> Vec<NodeIndex> {
        self.by_name.values().copied().collect()
    }

    pub(crate) fn location_at(&self, idx: NodeIndex) -> Option<Pos2> {
        self.g.node_weight(idx).map(Node::location)
    }

    pub(crate) fn set_location_at(&mut self, idx: NodeIndex, location: Pos2) {
        if let Some(n) = self.g.node_weight_mut(idx) {
            n.set_location(location);
        }
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }

    fn relation_ref<'a>(&'a self, e: EdgeReference<'a, Relation>) -> RelationRef<'a> {
        RelationRef {
            from: self.g[e.source()].name(),
            to: self.g[e.target()].name(),
            kind: e.weight().kind(),
        }
    }
}
