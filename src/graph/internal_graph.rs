use custom_debug_derive::Debug;
use std::{
    collections::{BTreeSet, HashMap},
    ops::Range,
};

use super::{GraphError, VertexIndex, Weight, DEFAULT_WEIGHT};

/// Simple undirected graph that grows by edge insertion.
/// Vertices are numbered in order of first appearance.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    #[debug(skip)]
    label_lookup: HashMap<String, VertexIndex>,
    #[debug(skip)]
    edge_lookup: HashMap<(VertexIndex, VertexIndex), usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub index: VertexIndex,
    pub label: String,
    pub edges_to: Vec<VertexIndex>,
}

/// Undirected edge, stored with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: VertexIndex,
    pub end: VertexIndex,
    pub weight: Weight,
}

fn edge_key(start: VertexIndex, end: VertexIndex) -> (VertexIndex, VertexIndex) {
    if start < end {
        (start, end)
    } else {
        (end, start)
    }
}

impl Graph {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_indices(&self) -> Range<VertexIndex> {
        0..self.vertices.len()
    }

    fn intern(&mut self, label: &str) -> VertexIndex {
        if let Some(index) = self.label_lookup.get(label) {
            return *index;
        }

        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, label));
        self.label_lookup.insert(label.to_string(), index);
        index
    }

    pub fn add_edge(&mut self, start: &str, end: &str) -> Result<(), GraphError> {
        self.add_weighted_edge(start, end, DEFAULT_WEIGHT)
    }

    /// Insert the edge or, if both endpoints are already
    /// adjacent, overwrite the stored weight.
    pub fn add_weighted_edge(
        &mut self,
        start: &str,
        end: &str,
        weight: Weight,
    ) -> Result<(), GraphError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        if start == end {
            return Err(GraphError::SelfLoop(start.to_string()));
        }

        let start = self.intern(start);
        let end = self.intern(end);
        let key = edge_key(start, end);

        if let Some(position) = self.edge_lookup.get(&key) {
            self.edges[*position].weight = weight;
            return Ok(());
        }

        self.edge_lookup.insert(key, self.edges.len());
        self.edges.push(Edge {
            start: key.0,
            end: key.1,
            weight,
        });
        self.vertices[start].add_edge(end);
        self.vertices[end].add_edge(start);

        Ok(())
    }

    pub fn index_of(&self, label: &str) -> Option<VertexIndex> {
        self.label_lookup.get(label).copied()
    }

    pub fn label(&self, index: VertexIndex) -> &str {
        &self.vertices[index].label
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.iter().map(|vertex| vertex.label.as_str())
    }

    pub fn edges_from(&self, index: VertexIndex) -> &[VertexIndex] {
        &self.vertices[index].edges_to
    }

    pub fn vertex_degree(&self, index: VertexIndex) -> usize {
        self.vertices[index].edges_to.len()
    }

    pub fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter().map(|vertex| vertex.edges_to.len())
    }

    pub fn has_edge_between(&self, start: VertexIndex, end: VertexIndex) -> bool {
        self.edge_lookup.contains_key(&edge_key(start, end))
    }

    pub fn neighbours(&self, label: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let index = self.index_of(label)?;
        Some(
            self.edges_from(index)
                .iter()
                .map(move |end| self.label(*end)),
        )
    }

    pub fn degree(&self, label: &str) -> Option<usize> {
        self.index_of(label).map(|index| self.vertex_degree(index))
    }

    pub fn lookup_edge(&self, start: &str, end: &str) -> bool {
        match (self.index_of(start), self.index_of(end)) {
            (Some(start), Some(end)) => self.has_edge_between(start, end),
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn weight(&self, start: &str, end: &str) -> Option<Weight> {
        let key = edge_key(self.index_of(start)?, self.index_of(end)?);
        self.edge_lookup
            .get(&key)
            .map(|position| self.edges[*position].weight)
    }

    /// Every undirected edge exactly once, in insertion order.
    pub fn iterate_edges(&self) -> impl Iterator<Item = (&str, &str, Weight)> + '_ {
        self.edges
            .iter()
            .map(move |edge| (self.label(edge.start), self.label(edge.end), edge.weight))
    }

    /// Order independent view of the edges, used for comparisons.
    pub fn edge_set(&self) -> BTreeSet<(&str, &str, Weight)> {
        self.iterate_edges()
            .map(|(start, end, weight)| {
                if start <= end {
                    (start, end, weight)
                } else {
                    (end, start, weight)
                }
            })
            .collect()
    }
}

/// Two graphs are equal if they have the same labelled, weighted edges,
/// no matter in which order those were inserted.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.edge_set() == other.edge_set()
    }
}

impl Eq for Graph {}

impl Vertex {
    pub fn new(index: VertexIndex, label: &str) -> Self {
        Vertex {
            index,
            label: label.to_string(),
            edges_to: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, end: VertexIndex) {
        self.edges_to.push(end);
    }
}
