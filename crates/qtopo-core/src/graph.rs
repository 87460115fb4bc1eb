//! Minimal undirected graph over integer node ids.
//!
//! Nodes are `0..capacity`. A node can be absent, which is how pruned grid
//! graphs keep their original cell indices as node ids: pruning marks the
//! unused cells absent and drops every edge touching them. All queries are
//! unweighted, so shortest paths are plain BFS.

use std::collections::VecDeque;

/// Undirected, unweighted graph with a node-presence mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    present: Vec<bool>,
    num_edges: usize,
}

impl Graph {
    /// Create a graph with nodes `0..n` and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![vec![]; n],
            present: vec![true; n],
            num_edges: 0,
        }
    }

    /// Add an undirected edge. Self-loops and duplicate edges are ignored.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.num_edges += 1;
    }

    /// Check whether `a` and `b` are directly connected.
    #[inline]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Whether node `v` is part of the graph.
    #[inline]
    pub fn contains_node(&self, v: usize) -> bool {
        self.present.get(v).copied().unwrap_or(false)
    }

    /// Neighbours of `v` in insertion order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[v].iter().copied()
    }

    /// Largest node id plus one.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.present.len()
    }

    /// Number of present nodes.
    pub fn num_nodes(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Edges `(a, b)` with `a < b`, ordered by `a` then insertion.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, nbrs)| nbrs.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    /// The subgraph induced by `keep`.
    ///
    /// Node ids are unchanged; nodes outside `keep` become absent and lose
    /// all their edges.
    pub fn induced_subgraph(&self, keep: &[usize]) -> Graph {
        let mut present = vec![false; self.capacity()];
        for &v in keep {
            present[v] = true;
        }

        let mut num_edges = 0;
        let adjacency: Vec<Vec<usize>> = self
            .adjacency
            .iter()
            .enumerate()
            .map(|(v, nbrs)| {
                if !present[v] {
                    return vec![];
                }
                let kept: Vec<usize> = nbrs.iter().copied().filter(|&u| present[u]).collect();
                num_edges += kept.len();
                kept
            })
            .collect();

        Graph {
            adjacency,
            present,
            num_edges: num_edges / 2,
        }
    }

    /// Whether every present node is reachable from every other.
    ///
    /// A graph without present nodes is not connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.present.iter().position(|&p| p) else {
            return false;
        };
        let reached = self
            .bfs_distances(start)
            .iter()
            .filter(|d| d.is_some())
            .count();
        reached == self.num_nodes()
    }

    /// BFS hop counts from `source` to every node (`None` if unreachable).
    pub fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.capacity()];
        if !self.contains_node(source) {
            return dist;
        }
        dist[source] = Some(0);
        let mut queue = VecDeque::from([source]);

        while let Some(current) = queue.pop_front() {
            let next = dist[current].map_or(0, |d| d + 1);
            for &neighbor in &self.adjacency[current] {
                if dist[neighbor].is_none() {
                    dist[neighbor] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }

        dist
    }

    /// Shortest-path hop count between `from` and `to`.
    pub fn distance(&self, from: usize, to: usize) -> Option<usize> {
        if !self.contains_node(from) || !self.contains_node(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }
        self.bfs_parents(from, to)
            .map(|parents| Self::walk_back(&parents, from, to).len() - 1)
    }

    /// Shortest path from `from` to `to`, both endpoints included.
    ///
    /// Ties are broken by neighbour insertion order, so the result is
    /// deterministic for a given construction order.
    pub fn shortest_path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if !self.contains_node(from) || !self.contains_node(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }
        self.bfs_parents(from, to)
            .map(|parents| Self::walk_back(&parents, from, to))
    }

    /// BFS from `from`, stopping once `to` is discovered.
    fn bfs_parents(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut parent = vec![usize::MAX; self.capacity()];
        parent[from] = from;
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for &neighbor in &self.adjacency[current] {
                if parent[neighbor] == usize::MAX {
                    parent[neighbor] = current;
                    if neighbor == to {
                        return Some(parent);
                    }
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    fn walk_back(parent: &[usize], from: usize, to: usize) -> Vec<usize> {
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = parent[current];
            path.push(current);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    #[test]
    fn test_add_edge_dedup() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.add_edge(2, 2);
        assert_eq!(g.num_edges(), 1);
        assert!(g.has_edge(1, 0));
        assert!(!g.has_edge(2, 2));
    }

    #[test]
    fn test_distance_and_path() {
        let g = path_graph(5);
        assert_eq!(g.distance(0, 4), Some(4));
        assert_eq!(g.distance(3, 3), Some(0));
        assert_eq!(g.shortest_path(1, 3), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_disconnected() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        assert!(!g.is_connected());
        assert_eq!(g.distance(0, 3), None);
        assert_eq!(g.shortest_path(0, 3), None);
    }

    #[test]
    fn test_induced_subgraph_keeps_ids() {
        let g = path_graph(5);
        let sub = g.induced_subgraph(&[0, 1, 3, 4]);
        assert_eq!(sub.num_nodes(), 4);
        assert_eq!(sub.num_edges(), 2);
        assert!(!sub.contains_node(2));
        assert!(!sub.is_connected());

        let sub = g.induced_subgraph(&[1, 2, 3]);
        assert!(sub.is_connected());
        assert_eq!(sub.distance(1, 3), Some(2));
        assert_eq!(sub.distance(0, 1), None);
    }

    #[test]
    fn test_empty_graph_not_connected() {
        let g = Graph::new(3).induced_subgraph(&[]);
        assert!(!g.is_connected());
    }

    #[test]
    fn test_edges_listing() {
        let mut g = Graph::new(3);
        g.add_edge(2, 0);
        g.add_edge(1, 2);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 2), (1, 2)]);
    }
}
