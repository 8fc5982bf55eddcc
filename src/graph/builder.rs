use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Directed graph of currencies connected by direct conversion edges
pub struct RatioGraph {
    graph: DiGraph<String, ()>,
    symbol_to_node: HashMap<String, NodeIndex>,
    /// Nodes declared with their own adjacency entry, as opposed to nodes
    /// that only exist because another currency names them as a neighbor
    listed: HashSet<NodeIndex>,
}

impl Default for RatioGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RatioGraph {
    /// Create a new empty currency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            symbol_to_node: HashMap::new(),
            listed: HashSet::new(),
        }
    }

    /// Get or create a node for a currency symbol
    fn get_or_create_node(&mut self, symbol: &str) -> NodeIndex {
        if let Some(&node) = self.symbol_to_node.get(symbol) {
            node
        } else {
            let node = self.graph.add_node(symbol.to_string());
            self.symbol_to_node.insert(symbol.to_string(), node);
            node
        }
    }

    /// List a currency with its direct neighbors, in priority order.
    ///
    /// Traversal tries neighbors in exactly this order. Listing the same
    /// currency again appends further neighbors after the existing ones.
    pub fn list_currency(&mut self, symbol: &str, neighbors: &[&str]) {
        let node = self.get_or_create_node(symbol);
        self.listed.insert(node);

        for neighbor in neighbors {
            let target = self.get_or_create_node(neighbor);
            self.graph.add_edge(node, target, ());
            tracing::trace!("edge {} -> {}", symbol, neighbor);
        }
    }

    /// Get the node index for a currency symbol
    pub fn get_node(&self, symbol: &str) -> Option<NodeIndex> {
        self.symbol_to_node.get(symbol).copied()
    }

    /// Get the currency symbol for a node index
    pub fn get_symbol(&self, node: NodeIndex) -> Option<&str> {
        self.graph.node_weight(node).map(String::as_str)
    }

    /// Whether the node was listed with its own adjacency entry
    pub fn is_listed(&self, node: NodeIndex) -> bool {
        self.listed.contains(&node)
    }

    /// Neighbors of a node in the order they were declared.
    ///
    /// petgraph walks a node's adjacency newest edge first, so the walk is
    /// reversed here to restore declaration order.
    pub fn neighbors_in_order(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.reverse();
        neighbors
    }

    /// Number of currencies in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of direct conversion edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
