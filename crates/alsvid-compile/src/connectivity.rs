//! Device connectivity: an undirected graph over physical qubit indices.

use std::collections::VecDeque;

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::error::{CompileError, CompileResult};

/// The connectivity graph of a target device.
///
/// Nodes are physical qubit indices `0..num_qubits`; an edge means the pair
/// can host a two-qubit gate. Constructed from an adjacency list
/// (`{"0": [1, 2], …}`) or one of the factory topologies.
#[derive(Debug, Clone)]
pub struct Connectivity {
    graph: UnGraph<u32, ()>,
}

impl Connectivity {
    /// Create a connectivity with `num_qubits` nodes and no edges.
    pub fn new(num_qubits: u32) -> Self {
        let mut graph = UnGraph::default();
        for i in 0..num_qubits {
            graph.add_node(i);
        }
        Self { graph }
    }

    /// Build from an adjacency list keyed by stringified qubit indices.
    ///
    /// Every mentioned index becomes a node; edges are deduplicated across
    /// both directions.
    pub fn from_adjacency<'a>(
        adjacency: impl IntoIterator<Item = (&'a str, &'a [u32])>,
    ) -> CompileResult<Self> {
        let mut edges: Vec<(u32, u32)> = vec![];
        let mut max_index = 0u32;
        let mut seen_any = false;
        for (key, neighbors) in adjacency {
            let from: u32 = key.parse().map_err(|_| {
                CompileError::InvalidConfig(format!("connectivity key '{key}' is not a qubit index"))
            })?;
            seen_any = true;
            max_index = max_index.max(from);
            for &to in neighbors {
                max_index = max_index.max(to);
                edges.push((from, to));
            }
        }
        if !seen_any {
            return Err(CompileError::InvalidConfig(
                "connectivity is empty".to_string(),
            ));
        }
        let mut connectivity = Self::new(max_index + 1);
        for (from, to) in edges {
            connectivity.add_edge(from, to);
        }
        Ok(connectivity)
    }

    /// Build from a JSON adjacency object, e.g. `{"0": [1], "1": [0]}`.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        let map: std::collections::BTreeMap<String, Vec<u32>> = serde_json::from_str(json)
            .map_err(|e| CompileError::InvalidConfig(format!("bad connectivity JSON: {e}")))?;
        Self::from_adjacency(map.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
    }

    /// Add an undirected edge; duplicates (in either direction) are ignored.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        let (na, nb) = (NodeIndex::new(a as usize), NodeIndex::new(b as usize));
        if !self.graph.contains_edge(na, nb) {
            self.graph.add_edge(na, nb, ());
        }
    }

    /// Linear chain 0-1-2-…-(n−1).
    pub fn linear(num_qubits: u32) -> Self {
        let mut c = Self::new(num_qubits);
        for i in 0..num_qubits.saturating_sub(1) {
            c.add_edge(i, i + 1);
        }
        c
    }

    /// Ring 0-1-…-(n−1)-0.
    pub fn ring(num_qubits: u32) -> Self {
        let mut c = Self::linear(num_qubits);
        if num_qubits > 2 {
            c.add_edge(num_qubits - 1, 0);
        }
        c
    }

    /// Fully connected graph.
    pub fn full(num_qubits: u32) -> Self {
        let mut c = Self::new(num_qubits);
        for i in 0..num_qubits {
            for j in (i + 1)..num_qubits {
                c.add_edge(i, j);
            }
        }
        c
    }

    /// Number of physical qubits.
    pub fn num_qubits(&self) -> u32 {
        self.graph.node_count() as u32
    }

    /// Check if two qubits are directly connected.
    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        let (na, nb) = (NodeIndex::new(a as usize), NodeIndex::new(b as usize));
        a < self.num_qubits() && b < self.num_qubits() && self.graph.contains_edge(na, nb)
    }

    /// Neighbors of a qubit.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.graph
            .neighbors(NodeIndex::new(qubit as usize))
            .map(|n| n.index() as u32)
    }

    /// BFS shortest path between two qubits, endpoints included.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        if from >= self.num_qubits() || to >= self.num_qubits() {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut predecessor: FxHashMap<u32, u32> = FxHashMap::default();
        let mut queue = VecDeque::new();
        predecessor.insert(from, from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if predecessor.contains_key(&neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, current);
                if neighbor == to {
                    let mut path = vec![to];
                    let mut node = to;
                    while node != from {
                        node = predecessor[&node];
                        path.push(node);
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// A* path between two qubits with an optional heuristic over node
    /// indices, endpoints included. Falls back to uniform-cost search when no
    /// heuristic is given.
    pub fn astar_path(
        &self,
        from: u32,
        to: u32,
        heuristic: Option<&dyn Fn(u32, u32) -> f64>,
    ) -> Option<Vec<u32>> {
        if from >= self.num_qubits() || to >= self.num_qubits() {
            return None;
        }
        let goal = NodeIndex::new(to as usize);
        let (_, path) = petgraph::algo::astar(
            &self.graph,
            NodeIndex::new(from as usize),
            |n| n == goal,
            |_| 1.0f64,
            |n| match heuristic {
                Some(h) => h(n.index() as u32, to),
                None => 0.0,
            },
        )?;
        Some(path.into_iter().map(|n| n.index() as u32).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_topology() {
        let c = Connectivity::linear(5);
        assert!(c.is_connected(0, 1));
        assert!(c.is_connected(1, 0));
        assert!(!c.is_connected(0, 2));
        assert_eq!(c.shortest_path(0, 4).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(c.shortest_path(2, 2).unwrap(), vec![2]);
    }

    #[test]
    fn disconnected_pair_has_no_path() {
        let mut c = Connectivity::new(4);
        c.add_edge(0, 1);
        c.add_edge(2, 3);
        assert!(c.shortest_path(0, 3).is_none());
        assert!(c.astar_path(0, 3, None).is_none());
    }

    #[test]
    fn from_json_adjacency() {
        let c = Connectivity::from_json(r#"{"0": [1], "1": [0, 2], "2": [1]}"#).unwrap();
        assert_eq!(c.num_qubits(), 3);
        assert!(c.is_connected(1, 2));
        assert!(!c.is_connected(0, 2));

        assert!(Connectivity::from_json(r#"{"zero": [1]}"#).is_err());
    }

    #[test]
    fn astar_matches_bfs_length() {
        let c = Connectivity::ring(6);
        let bfs = c.shortest_path(0, 3).unwrap();
        let astar = c.astar_path(0, 3, None).unwrap();
        assert_eq!(bfs.len(), astar.len());
    }
}
