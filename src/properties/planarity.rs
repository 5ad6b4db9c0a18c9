//! Planarity testing.
//!
//! The exact test is the left-right planarity criterion of de Fraysseix and
//! Rosenstiehl in the formulation of Brandes ("The Left-Right Planarity Test",
//! 2009). A depth-first search orients the graph and computes lowpoints; a
//! second search processes the out-edges of every vertex ordered by nesting
//! depth and keeps a stack of conflict pairs. The graph is planar iff the
//! return edges of every vertex can be split into a left and a right side
//! without conflicts. Only the decision is computed, no embedding.

use std::collections::{HashMap, HashSet};

use crate::{
    graph::{Graph, VertexIndex},
    misc::PlanarityMethod,
};

/// Oriented edge `(tail, head)`.
type Arc = (VertexIndex, VertexIndex);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Interval {
    low: Option<Arc>,
    high: Option<Arc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ConflictPair {
    left: Interval,
    right: Interval,
}

impl Interval {
    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

/// Depth-first search frame: the vertex, the position of its next
/// out-arc and the tree arc whose subtree is currently being searched.
struct Frame {
    vertex: VertexIndex,
    next: usize,
    pending: Option<Arc>,
}

impl Frame {
    fn new(vertex: VertexIndex) -> Self {
        Frame {
            vertex,
            next: 0,
            pending: None,
        }
    }
}

struct LrState<'g> {
    graph: &'g Graph,
    height: Vec<Option<usize>>,
    parent_edge: Vec<Option<Arc>>,
    lowpt: HashMap<Arc, usize>,
    lowpt2: HashMap<Arc, usize>,
    nesting_depth: HashMap<Arc, usize>,
    /// Oriented out-arcs of every vertex, heads only.
    ordered_adjs: Vec<Vec<VertexIndex>>,
    oriented: HashSet<Arc>,
    roots: Vec<VertexIndex>,
    // testing phase
    stack: Vec<ConflictPair>,
    stack_bottom: HashMap<Arc, usize>,
    lowpt_edge: HashMap<Arc, Arc>,
    reference: HashMap<Arc, Arc>,
}

impl<'g> LrState<'g> {
    fn new(graph: &'g Graph) -> Self {
        let n = graph.size();
        LrState {
            graph,
            height: vec![None; n],
            parent_edge: vec![None; n],
            lowpt: HashMap::new(),
            lowpt2: HashMap::new(),
            nesting_depth: HashMap::new(),
            ordered_adjs: vec![Vec::new(); n],
            oriented: HashSet::new(),
            roots: Vec::new(),
            stack: Vec::new(),
            stack_bottom: HashMap::new(),
            lowpt_edge: HashMap::new(),
            reference: HashMap::new(),
        }
    }

    fn run(mut self) -> bool {
        for vertex in self.graph.vertex_indices() {
            if self.height[vertex].is_none() {
                self.height[vertex] = Some(0);
                self.roots.push(vertex);
                self.orient(vertex);
            }
        }

        for vertex in self.graph.vertex_indices() {
            let nesting_depth = &self.nesting_depth;
            self.ordered_adjs[vertex].sort_by_key(|head| nesting_depth[&(vertex, *head)]);
        }

        let roots = std::mem::take(&mut self.roots);
        roots.into_iter().all(|root| self.test(root))
    }

    fn height_of(&self, vertex: VertexIndex) -> usize {
        self.height[vertex].unwrap_or(0)
    }

    /// First pass: orient every edge away from the DFS root and compute
    /// lowpoints and nesting depths.
    fn orient(&mut self, root: VertexIndex) {
        let graph = self.graph;
        let mut frames = vec![Frame::new(root)];

        while let Some(frame) = frames.last_mut() {
            let vertex = frame.vertex;
            let heads = graph.edges_from(vertex);
            if frame.next == heads.len() {
                frames.pop();
                continue;
            }

            let head = heads[frame.next];
            let arc = (vertex, head);

            if frame.pending.take().is_none() {
                if self.oriented.contains(&arc) || self.oriented.contains(&(head, vertex)) {
                    frame.next += 1;
                    continue;
                }

                let vertex_height = self.height_of(vertex);
                self.oriented.insert(arc);
                self.ordered_adjs[vertex].push(head);
                self.lowpt.insert(arc, vertex_height);
                self.lowpt2.insert(arc, vertex_height);

                match self.height[head] {
                    None => {
                        // tree edge, finish it once the subtree is done
                        self.parent_edge[head] = Some(arc);
                        self.height[head] = Some(vertex_height + 1);
                        frame.pending = Some(arc);
                        frames.push(Frame::new(head));
                        continue;
                    }
                    Some(head_height) => {
                        // back edge
                        self.lowpt.insert(arc, head_height);
                    }
                }
            }

            self.finish_orientation(arc);
            frame.next += 1;
        }
    }

    /// Nesting depth of `arc` and lowpoints of the parent edge of its tail.
    fn finish_orientation(&mut self, arc: Arc) {
        let vertex = arc.0;
        let vertex_height = self.height_of(vertex);
        let arc_lowpt = self.lowpt[&arc];
        let arc_lowpt2 = self.lowpt2[&arc];

        let mut depth = 2 * arc_lowpt;
        if arc_lowpt2 < vertex_height {
            // chordal
            depth += 1;
        }
        self.nesting_depth.insert(arc, depth);

        if let Some(parent) = self.parent_edge[vertex] {
            let parent_lowpt = self.lowpt[&parent];
            let parent_lowpt2 = self.lowpt2[&parent];
            if arc_lowpt < parent_lowpt {
                self.lowpt2.insert(parent, parent_lowpt.min(arc_lowpt2));
                self.lowpt.insert(parent, arc_lowpt);
            } else if arc_lowpt > parent_lowpt {
                self.lowpt2.insert(parent, parent_lowpt2.min(arc_lowpt));
            } else {
                self.lowpt2.insert(parent, parent_lowpt2.min(arc_lowpt2));
            }
        }
    }

    fn conflicting(&self, interval: &Interval, arc: Arc) -> bool {
        match interval.high {
            Some(high) => self.lowpt[&high] > self.lowpt[&arc],
            None => false,
        }
    }

    fn lowest(&self, pair: &ConflictPair) -> usize {
        let low_of = |interval: &Interval| interval.low.map(|low| self.lowpt[&low]);
        match (low_of(&pair.left), low_of(&pair.right)) {
            (None, Some(right)) => right,
            (Some(left), None) => left,
            (Some(left), Some(right)) => left.min(right),
            (None, None) => usize::MAX,
        }
    }

    /// Second pass: check that the return edges can be split into
    /// two sides consistently.
    fn test(&mut self, root: VertexIndex) -> bool {
        let mut frames = vec![Frame::new(root)];

        while let Some(frame) = frames.last_mut() {
            let vertex = frame.vertex;
            let position = frame.next;
            if position == self.ordered_adjs[vertex].len() {
                frames.pop();
                if let Some(parent) = self.parent_edge[vertex] {
                    self.remove_back_edges(parent);
                }
                continue;
            }

            let head = self.ordered_adjs[vertex][position];
            let arc = (vertex, head);

            if frame.pending.take().is_none() {
                self.stack_bottom.insert(arc, self.stack.len());

                if self.parent_edge[head] == Some(arc) {
                    // tree edge, integrate it once the subtree is done
                    frame.pending = Some(arc);
                    frames.push(Frame::new(head));
                    continue;
                }

                // back edge
                self.lowpt_edge.insert(arc, arc);
                self.stack.push(ConflictPair {
                    left: Interval::default(),
                    right: Interval {
                        low: Some(arc),
                        high: Some(arc),
                    },
                });
            }

            if !self.integrate_return_edges(arc, position) {
                return false;
            }
            frame.next += 1;
        }

        true
    }

    fn integrate_return_edges(&mut self, arc: Arc, position: usize) -> bool {
        let vertex = arc.0;
        let parent = self.parent_edge[vertex];

        if self.lowpt[&arc] >= self.height_of(vertex) {
            return true;
        }

        if position == 0 {
            if let (Some(parent), Some(lowest_return)) =
                (parent, self.lowpt_edge.get(&arc).copied())
            {
                self.lowpt_edge.insert(parent, lowest_return);
            }
            true
        } else {
            self.add_constraints(arc, parent)
        }
    }

    fn set_reference(&mut self, arc: Arc, target: Option<Arc>) {
        match target {
            Some(target) => {
                self.reference.insert(arc, target);
            }
            None => {
                self.reference.remove(&arc);
            }
        }
    }

    fn add_constraints(&mut self, arc: Arc, parent: Option<Arc>) -> bool {
        let parent = match parent {
            Some(parent) => parent,
            // The out-arcs of a root never have return edges.
            None => return true,
        };
        let bottom = self.stack_bottom[&arc];
        let mut merged = ConflictPair::default();

        // merge return edges of arc into merged.right
        while let Some(mut pair) = self.stack.pop() {
            if !pair.left.is_empty() {
                pair.swap();
            }
            if !pair.left.is_empty() {
                return false;
            }

            if let (Some(low), Some(high)) = (pair.right.low, pair.right.high) {
                if self.lowpt[&low] > self.lowpt[&parent] {
                    // merge intervals
                    match merged.right.low {
                        None => merged.right.high = Some(high),
                        Some(merged_low) => self.set_reference(merged_low, Some(high)),
                    }
                    merged.right.low = Some(low);
                } else {
                    // align
                    let aligned = self.lowpt_edge.get(&parent).copied();
                    self.set_reference(low, aligned);
                }
            }

            if self.stack.len() <= bottom {
                break;
            }
        }

        // merge conflicting return edges of the earlier siblings into merged.left
        while let Some(top) = self.stack.last().copied() {
            if !self.conflicting(&top.left, arc) && !self.conflicting(&top.right, arc) {
                break;
            }

            let mut pair = top;
            self.stack.pop();
            if self.conflicting(&pair.right, arc) {
                pair.swap();
            }
            if self.conflicting(&pair.right, arc) {
                return false;
            }

            // merge interval below lowpt(arc) into merged.right
            if let Some(merged_low) = merged.right.low {
                self.set_reference(merged_low, pair.right.high);
            }
            if pair.right.low.is_some() {
                merged.right.low = pair.right.low;
            }

            match merged.left.low {
                None => merged.left.high = pair.left.high,
                Some(merged_low) => self.set_reference(merged_low, pair.left.high),
            }
            merged.left.low = pair.left.low;
        }

        if !(merged.left.is_empty() && merged.right.is_empty()) {
            self.stack.push(merged);
        }

        true
    }

    fn trim_interval(&self, interval: &mut Interval, tail: VertexIndex) {
        while let Some(high) = interval.high {
            if high.1 != tail {
                break;
            }
            interval.high = self.reference.get(&high).copied();
        }
    }

    /// Drop the back edges that end at the tail of `parent`.
    fn remove_back_edges(&mut self, parent: Arc) {
        let tail = parent.0;
        let tail_height = self.height_of(tail);

        // drop entire conflict pairs
        while let Some(top) = self.stack.last() {
            if self.lowest(top) != tail_height {
                break;
            }
            self.stack.pop();
        }

        // one more conflict pair to consider
        if let Some(mut pair) = self.stack.pop() {
            self.trim_interval(&mut pair.left, tail);
            if pair.left.high.is_none() {
                if let Some(left_low) = pair.left.low.take() {
                    self.set_reference(left_low, pair.right.low);
                }
            }

            self.trim_interval(&mut pair.right, tail);
            if pair.right.high.is_none() {
                if let Some(right_low) = pair.right.low.take() {
                    self.set_reference(right_low, pair.left.low);
                }
            }

            self.stack.push(pair);
        }

        // side of parent is side of a highest return edge
        if self.lowpt[&parent] < tail_height {
            let highest = match self.stack.last() {
                Some(top) => match (top.left.high, top.right.high) {
                    (Some(left), Some(right)) if self.lowpt[&left] > self.lowpt[&right] => {
                        Some(left)
                    }
                    (Some(left), None) => Some(left),
                    (_, right) => right,
                },
                None => None,
            };
            self.set_reference(parent, highest);
        }
    }
}

/// Exact planarity test.
pub fn is_planar(graph: &Graph) -> bool {
    let (n, m) = (graph.size(), graph.number_edges());

    // Euler's formula bounds the edges of simple planar graphs.
    if n > 2 && m > 3 * n - 6 {
        return false;
    }

    LrState::new(graph).run()
}

/// Degree based guess at a K5 or K3,3 subgraph: reports non-planar once
/// five vertices of degree at least five are seen, or when the third vertex
/// of degree at least three only has neighbours of degree at least three.
///
/// This is not a planarity test. It rejects planar graphs such as K4 or the
/// cube and accepts non-planar ones such as subdivisions of K5.
pub fn is_planar_heuristic(graph: &Graph) -> bool {
    let high_degree = graph
        .vertex_indices()
        .filter(|vertex| graph.vertex_degree(*vertex) >= 5)
        .count();
    if high_degree >= 5 {
        return false;
    }

    let third = graph
        .vertex_indices()
        .filter(|vertex| graph.vertex_degree(*vertex) >= 3)
        .nth(2);
    match third {
        Some(vertex) => !graph
            .edges_from(vertex)
            .iter()
            .all(|neighbour| graph.vertex_degree(*neighbour) >= 3),
        None => true,
    }
}

pub fn is_planar_with(graph: &Graph, method: PlanarityMethod) -> bool {
    match method {
        PlanarityMethod::Exact => is_planar(graph),
        PlanarityMethod::Heuristic => is_planar_heuristic(graph),
    }
}
