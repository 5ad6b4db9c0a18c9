//! Structural predicates. Each of them reports
//! `false` for the empty graph.

use std::collections::VecDeque;

use crate::graph::{Graph, VertexIndex};

/// Breadth-first search from `start`; returns which vertices were reached.
pub(crate) fn reachable_from(graph: &Graph, start: VertexIndex) -> Vec<bool> {
    let mut visited = vec![false; graph.size()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(vertex) = queue.pop_front() {
        for &neighbour in graph.edges_from(vertex) {
            if !visited[neighbour] {
                visited[neighbour] = true;
                queue.push_back(neighbour);
            }
        }
    }

    visited
}

pub fn is_connected(graph: &Graph) -> bool {
    if graph.is_empty() {
        return false;
    }

    reachable_from(graph, 0).into_iter().all(|reached| reached)
}

/// Depth-first search restarted from every unvisited vertex.
/// A neighbour that is still on the search stack and isn't
/// the vertex we came from closes a cycle.
pub fn has_cycle(graph: &Graph) -> bool {
    let mut visited = vec![false; graph.size()];
    let mut on_stack = vec![false; graph.size()];

    graph
        .vertex_indices()
        .any(|root| !visited[root] && cycle_from(graph, root, &mut visited, &mut on_stack))
}

fn cycle_from(
    graph: &Graph,
    root: VertexIndex,
    visited: &mut [bool],
    on_stack: &mut [bool],
) -> bool {
    // (vertex, parent, position of the next neighbour to look at)
    let mut stack: Vec<(VertexIndex, Option<VertexIndex>, usize)> = vec![(root, None, 0)];
    visited[root] = true;
    on_stack[root] = true;

    while let Some(frame) = stack.last_mut() {
        let (vertex, parent) = (frame.0, frame.1);

        if let Some(&neighbour) = graph.edges_from(vertex).get(frame.2) {
            frame.2 += 1;
            if !visited[neighbour] {
                visited[neighbour] = true;
                on_stack[neighbour] = true;
                stack.push((neighbour, Some(vertex), 0));
            } else if on_stack[neighbour] && Some(neighbour) != parent {
                return true;
            }
        } else {
            on_stack[vertex] = false;
            stack.pop();
        }
    }

    false
}

/// Two-colouring by breadth-first search. Every component is
/// coloured, so an odd cycle anywhere makes the graph non-bipartite.
pub fn is_bipartite(graph: &Graph) -> bool {
    if graph.is_empty() {
        return false;
    }

    let mut colour: Vec<Option<bool>> = vec![None; graph.size()];

    for root in graph.vertex_indices() {
        if colour[root].is_some() {
            continue;
        }

        colour[root] = Some(false);
        let mut queue = VecDeque::from([root]);

        while let Some(vertex) = queue.pop_front() {
            let side = colour[vertex];
            for &neighbour in graph.edges_from(vertex) {
                match colour[neighbour] {
                    None => {
                        colour[neighbour] = side.map(|side| !side);
                        queue.push_back(neighbour);
                    }
                    Some(other) if Some(other) == side => return false,
                    Some(_) => (),
                }
            }
        }
    }

    true
}

/// Connected, and a parent-tracking breadth-first search
/// never reaches an already visited vertex a second time.
pub fn is_tree(graph: &Graph) -> bool {
    if !is_connected(graph) {
        return false;
    }

    let mut visited = vec![false; graph.size()];
    let mut queue = VecDeque::from([(0, None)]);
    let mut number_visited = 1;
    visited[0] = true;

    while let Some((vertex, parent)) = queue.pop_front() {
        for &neighbour in graph.edges_from(vertex) {
            if Some(neighbour) == parent {
                continue;
            }
            if visited[neighbour] {
                return false;
            }
            visited[neighbour] = true;
            number_visited += 1;
            queue.push_back((neighbour, Some(vertex)));
        }
    }

    number_visited == graph.size()
}

/// Every pair of distinct vertices is adjacent. Since the graph is
/// simple this holds iff every vertex has degree `n - 1`.
pub fn is_complete(graph: &Graph) -> bool {
    if graph.is_empty() {
        return false;
    }

    let n = graph.size();
    graph.degrees().all(|degree| degree == n - 1)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::properties::testing::*;

    #[test]
    fn test_triangle() {
        let graph = from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert!(is_connected(&graph));
        assert!(has_cycle(&graph));
        assert!(!is_tree(&graph));
        assert!(!is_bipartite(&graph));
        assert!(is_complete(&graph));
    }

    #[test]
    fn test_path() {
        let graph = from_edges(&[("A", "B"), ("B", "C")]);
        assert!(is_connected(&graph));
        assert!(!has_cycle(&graph));
        assert!(is_tree(&graph));
        assert!(is_bipartite(&graph));
        assert!(!is_complete(&graph));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new_empty();
        assert!(!is_connected(&graph));
        assert!(!is_bipartite(&graph));
        assert!(!has_cycle(&graph));
        assert!(!is_tree(&graph));
        assert!(!is_complete(&graph));
    }

    #[test]
    fn test_single_edge() {
        let graph = from_edges(&[("A", "B")]);
        assert!(is_connected(&graph));
        assert!(!has_cycle(&graph));
        assert!(is_tree(&graph));
        assert!(is_bipartite(&graph));
        assert!(is_complete(&graph));
    }

    #[test]
    fn test_star() {
        let graph = star(5);
        assert!(is_tree(&graph));
        assert!(is_bipartite(&graph));
        assert!(!has_cycle(&graph));
    }

    #[test]
    fn test_disconnected() {
        // A path next to a triangle.
        let graph = from_edges(&[("a", "b"), ("x", "y"), ("y", "z"), ("z", "x")]);
        assert!(!is_connected(&graph));
        assert!(has_cycle(&graph));
        assert!(!is_tree(&graph));
        assert!(!is_bipartite(&graph));
        assert!(!is_complete(&graph));

        let forest = from_edges(&[("a", "b"), ("c", "d"), ("d", "e")]);
        assert!(!has_cycle(&forest));
        assert!(!is_tree(&forest));
        assert!(is_bipartite(&forest));
    }

    #[test]
    fn test_even_and_odd_cycles() {
        for n in 3..10 {
            let graph = cycle(n);
            assert!(has_cycle(&graph));
            assert!(is_connected(&graph));
            assert_eq!(n % 2 == 0, is_bipartite(&graph), "cycle of length {}", n);
        }
    }

    #[test]
    fn test_complete_graphs() {
        for n in 2..8 {
            assert!(is_complete(&complete(n)));
        }
        assert!(!is_complete(&complete_bipartite(2, 2)));
        assert!(is_bipartite(&complete_bipartite(3, 3)));
        assert!(has_cycle(&complete_bipartite(2, 2)));
    }

    fn arb_graph() -> impl Strategy<Value = Graph> {
        prop::collection::vec((0usize..9, 0usize..9), 0..20).prop_map(|pairs| {
            let edges: Vec<(usize, usize)> =
                pairs.into_iter().filter(|(start, end)| start != end).collect();
            numbered(&edges)
        })
    }

    proptest! {
        /// A tree is exactly a connected acyclic graph.
        #[test]
        fn tree_is_connected_and_acyclic(graph in arb_graph()) {
            prop_assert_eq!(is_tree(&graph), is_connected(&graph) && !has_cycle(&graph));
        }

        #[test]
        fn complete_implies_connected(graph in arb_graph()) {
            prop_assert!(!is_complete(&graph) || is_connected(&graph));
        }

        /// Forests have exactly `n - c` edges, graphs with cycles more.
        #[test]
        fn acyclic_iff_forest_edge_count(graph in arb_graph()) {
            let mut components = 0;
            let mut seen = vec![false; graph.size()];
            for vertex in graph.vertex_indices() {
                if !seen[vertex] {
                    components += 1;
                    for (other, reached) in reachable_from(&graph, vertex).into_iter().enumerate() {
                        seen[other] |= reached;
                    }
                }
            }
            prop_assert_eq!(!has_cycle(&graph), graph.number_edges() + components == graph.size());
        }
    }
}
