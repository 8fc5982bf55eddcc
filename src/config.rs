//! Demo market configuration

use crate::graph::RatioGraph;
use crate::rates::RateTable;

/// Default demo conversion: one euro into pounds
pub const DEMO_SOURCE: &str = "eur";
pub const DEMO_DESTINATION: &str = "gbp";

/// Currencies and their direct neighbors, in traversal priority order
pub const DEMO_ADJACENCY: &[(&str, &[&str])] = &[
    ("eur", &["usd", "gbp"]),
    ("usd", &["eur"]),
    ("gbp", &["eur"]),
];

/// Directly quoted rates; reverse directions are derived at lookup time
pub const DEMO_RATES: &[(&str, &str, f64)] = &[("eur", "usd", 0.8), ("eur", "gbp", 1.1)];

/// Build the demo currency graph from the literal adjacency data
pub fn demo_graph() -> RatioGraph {
    let mut graph = RatioGraph::new();
    for (symbol, neighbors) in DEMO_ADJACENCY {
        graph.list_currency(symbol, neighbors);
    }
    graph
}

/// Build the demo rate table from the literal quotes
pub fn demo_rate_table() -> RateTable {
    let mut table = RateTable::new();
    for (from, to, rate) in DEMO_RATES {
        table.insert(from, to, *rate);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_graph_shape() {
        let graph = demo_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_demo_rates_loaded() {
        let table = demo_rate_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate("eur", "usd").unwrap(), 0.8);
    }
}
