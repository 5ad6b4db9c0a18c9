//! Global invariants: Eulerian test, greedy colouring
//! and the Hamiltonian cycle search.

use crate::{
    graph::{Graph, VertexIndex},
    Error,
};

use super::structure::is_connected;

/// Connected and every vertex has even degree.
pub fn is_eulerian(graph: &Graph) -> bool {
    is_connected(graph) && graph.degrees().all(|degree| degree % 2 == 0)
}

/// Colour the vertices one after another in index order, giving each
/// the smallest colour none of its already coloured neighbours uses.
pub fn greedy_colouring(graph: &Graph) -> Vec<usize> {
    let mut colouring: Vec<Option<usize>> = vec![None; graph.size()];
    // taken[c] == vertex means colour c is blocked while colouring vertex.
    let mut taken = vec![usize::MAX; graph.size() + 1];

    for vertex in graph.vertex_indices() {
        for &neighbour in graph.edges_from(vertex) {
            if let Some(colour) = colouring[neighbour] {
                taken[colour] = vertex;
            }
        }

        let colour = (0..).find(|colour| taken[*colour] != vertex).unwrap_or(0);
        colouring[vertex] = Some(colour);
    }

    colouring.into_iter().flatten().collect()
}

/// Number of colours used by [`greedy_colouring`].
///
/// This is an upper bound on the chromatic number, never more than the
/// maximum degree plus one, and it depends on the vertex order. It is
/// exact for empty graphs, forests, even cycles and complete graphs but
/// can overshoot on others. The empty graph needs zero colours.
pub fn chromatic_number(graph: &Graph) -> usize {
    greedy_colouring(graph)
        .into_iter()
        .max()
        .map_or(0, |colour| colour + 1)
}

/// Backtracking search for a simple path through all vertices whose
/// ends are adjacent.
struct HamiltonianSearch<'g> {
    graph: &'g Graph,
    visited: Vec<bool>,
    path: Vec<VertexIndex>,
    steps: u64,
    budget: Option<u64>,
}

impl<'g> HamiltonianSearch<'g> {
    fn new(graph: &'g Graph, budget: Option<u64>) -> Self {
        HamiltonianSearch {
            graph,
            visited: vec![false; graph.size()],
            path: Vec::with_capacity(graph.size()),
            steps: 0,
            budget,
        }
    }

    fn enter(&mut self, vertex: VertexIndex) -> Result<(), Error> {
        self.steps += 1;
        if let Some(budget) = self.budget {
            if self.steps > budget {
                return Err(Error::SearchBudgetExhausted { steps: budget });
            }
        }

        self.visited[vertex] = true;
        self.path.push(vertex);
        Ok(())
    }

    fn leave(&mut self) {
        if let Some(vertex) = self.path.pop() {
            self.visited[vertex] = false;
        }
    }

    /// Depth-first extension of the path starting at `start`. Every
    /// frame holds the position of the next neighbour to try.
    fn search(&mut self, start: VertexIndex) -> Result<bool, Error> {
        let graph = self.graph;
        self.enter(start)?;
        let mut frames = vec![(start, 0)];

        while let Some((vertex, next)) = frames.last_mut() {
            let vertex = *vertex;

            if self.path.len() == graph.size() {
                if graph.has_edge_between(vertex, self.path[0]) {
                    return Ok(true);
                }
            } else {
                let neighbours = graph.edges_from(vertex);
                let unvisited = neighbours[*next..]
                    .iter()
                    .position(|neighbour| !self.visited[*neighbour]);

                if let Some(offset) = unvisited {
                    let head = neighbours[*next + offset];
                    *next += offset + 1;
                    self.enter(head)?;
                    frames.push((head, 0));
                    continue;
                }
            }

            frames.pop();
            self.leave();
        }

        Ok(false)
    }
}

/// Find a Hamiltonian cycle, returned as the order in which it visits
/// the vertices. The search is exponential in the worst case; once it
/// has extended paths `budget` times it fails with
/// [`Error::SearchBudgetExhausted`].
pub fn hamiltonian_cycle(
    graph: &Graph,
    budget: Option<u64>,
) -> Result<Option<Vec<VertexIndex>>, Error> {
    // A cycle through distinct vertices needs at least three of them.
    if graph.size() < 3 || !is_connected(graph) || graph.degrees().any(|degree| degree < 2) {
        return Ok(None);
    }

    // Every vertex lies on a Hamiltonian cycle, so one start is enough.
    let mut search = HamiltonianSearch::new(graph, budget);
    if search.search(0)? {
        Ok(Some(search.path))
    } else {
        Ok(None)
    }
}

pub fn is_hamiltonian(graph: &Graph, budget: Option<u64>) -> Result<bool, Error> {
    hamiltonian_cycle(graph, budget).map(|cycle| cycle.is_some())
}
