use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use thiserror::Error;

use super::builder::RatioGraph;
use crate::rates::{RateTable, UnknownRate};

/// Failures while resolving a conversion ratio.
///
/// A destination that simply cannot be reached is not an error; it is the
/// `None` outcome of [`RatioFinder::find_ratio`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// The currency has no adjacency listing in the graph
    #[error("currency {0} is not listed in the graph")]
    MissingCurrency(String),

    #[error(transparent)]
    UnknownRate(#[from] UnknownRate),
}

/// Depth-first search for a conversion ratio between two currencies.
///
/// The search multiplies edge rates along the first path it discovers, in
/// declared neighbor order, and returns immediately on success. It does not
/// look for alternate paths, so when several paths with different implied
/// rates exist, whichever one the neighbor ordering reaches first wins. Rate
/// consistency across paths is not checked.
pub struct RatioFinder<'a> {
    graph: &'a RatioGraph,
    rates: &'a RateTable,
}

impl<'a> RatioFinder<'a> {
    /// Create a new ratio finder over a graph and its rate table
    pub fn new(graph: &'a RatioGraph, rates: &'a RateTable) -> Self {
        Self { graph, rates }
    }

    /// Compute the conversion ratio from `source` to `destination`.
    ///
    /// Returns `Ok(Some(ratio))` for the first discovered path,
    /// `Ok(None)` when no path exists, and an error when `source` (or any
    /// currency the search recurses into) has no adjacency listing, or when
    /// a traversed edge has no quoted rate in either direction.
    ///
    /// An identity query returns 1 before any graph lookup, even for a
    /// symbol the graph has never seen.
    pub fn find_ratio(&self, source: &str, destination: &str) -> Result<Option<f64>, RatioError> {
        // Zero-length path: converting a currency to itself
        if source == destination {
            return Ok(Some(1.0));
        }

        let Some(src) = self.graph.get_node(source) else {
            return Err(RatioError::MissingCurrency(source.to_string()));
        };
        // The destination may be absent entirely; the search then exhausts
        // the reachable region and reports no path
        let dest = self.graph.get_node(destination);

        tracing::debug!(
            "searching conversion path {} -> {} ({} currencies, {} edges)",
            source,
            destination,
            self.graph.node_count(),
            self.graph.edge_count()
        );

        let mut visited = HashSet::new();
        let result = self.search(src, dest, &mut visited)?;

        match result {
            Some(ratio) => tracing::debug!("{} -> {} ratio {}", source, destination, ratio),
            None => tracing::debug!("no conversion path {} -> {}", source, destination),
        }

        Ok(result)
    }

    /// Recursive step of the search.
    ///
    /// The visited set is shared across the whole call tree and never rolled
    /// back: a node consumed by an earlier failing branch stays unavailable
    /// to sibling branches, so the search can report "no path" where a
    /// longer route through an already-visited node would have worked.
    fn search(
        &self,
        node: NodeIndex,
        dest: Option<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> Result<Option<f64>, RatioError> {
        if Some(node) == dest {
            return Ok(Some(1.0));
        }

        let symbol = match self.graph.get_symbol(node) {
            Some(s) => s,
            None => return Ok(None),
        };

        if !self.graph.is_listed(node) {
            return Err(RatioError::MissingCurrency(symbol.to_string()));
        }

        for next in self.graph.neighbors_in_order(node) {
            if visited.contains(&next) {
                tracing::trace!("skipping neighbor of {} - already visited", symbol);
                continue;
            }
            visited.insert(next);

            if let Some(subratio) = self.search(next, dest, visited)? {
                // The edge rate is only consulted once the branch has
                // reached the destination, so a missing quote on a dead
                // branch never surfaces
                let next_symbol = self.graph.get_symbol(next).unwrap_or("?");
                let rate = self.rates.rate(symbol, next_symbol)?;
                return Ok(Some(subratio * rate));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{demo_graph, demo_rate_table};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_identity_ratio_without_listing() {
        let graph = RatioGraph::new();
        let rates = RateTable::new();
        let finder = RatioFinder::new(&graph, &rates);

        assert_eq!(finder.find_ratio("xyz", "xyz").unwrap(), Some(1.0));
    }

    #[test]
    fn test_direct_edge() {
        let graph = demo_graph();
        let rates = demo_rate_table();
        let finder = RatioFinder::new(&graph, &rates);

        let ratio = finder.find_ratio("eur", "usd").unwrap().unwrap();
        assert!(approx(ratio, 0.8));
    }

    #[test]
    fn test_demo_market_ratio() {
        let graph = demo_graph();
        let rates = demo_rate_table();
        let finder = RatioFinder::new(&graph, &rates);

        let ratio = finder.find_ratio("eur", "gbp").unwrap().unwrap();
        assert!(approx(ratio, 1.1));
    }

    #[test]
    fn test_derived_reciprocal_edge() {
        let graph = demo_graph();
        let rates = demo_rate_table();
        let finder = RatioFinder::new(&graph, &rates);

        let ratio = finder.find_ratio("gbp", "eur").unwrap().unwrap();
        assert!(approx(ratio, 1.0 / 1.1));
    }

    #[test]
    fn test_path_product_after_dead_end() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b", "c"]);
        graph.list_currency("b", &[]);
        graph.list_currency("c", &["d"]);
        graph.list_currency("d", &[]);

        let mut rates = RateTable::new();
        rates.insert("a", "b", 2.0);
        rates.insert("a", "c", 3.0);
        rates.insert("c", "d", 4.0);

        let finder = RatioFinder::new(&graph, &rates);
        let ratio = finder.find_ratio("a", "d").unwrap().unwrap();

        // b is tried first, dead-ends, then a -> c -> d succeeds
        assert!(approx(ratio, 12.0));
    }

    #[test]
    fn test_first_declared_branch_wins() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b", "c"]);
        graph.list_currency("b", &["c"]);
        graph.list_currency("c", &["d"]);
        graph.list_currency("d", &[]);

        let mut rates = RateTable::new();
        rates.insert("a", "b", 2.0);
        rates.insert("b", "c", 10.0);
        rates.insert("c", "d", 4.0);
        rates.insert("a", "c", 3.0);

        let finder = RatioFinder::new(&graph, &rates);
        let ratio = finder.find_ratio("a", "d").unwrap().unwrap();

        // The a -> b -> c -> d branch is discovered first and returns 80;
        // the shorter a -> c -> d path (product 12) is never tried
        assert!(approx(ratio, 80.0));
    }

    #[test]
    fn test_unreachable_destination_is_no_path() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b"]);
        graph.list_currency("b", &[]);

        let mut rates = RateTable::new();
        rates.insert("a", "b", 2.0);

        let finder = RatioFinder::new(&graph, &rates);
        assert_eq!(finder.find_ratio("a", "c").unwrap(), None);
    }

    #[test]
    fn test_missing_source_is_error() {
        let graph = demo_graph();
        let rates = demo_rate_table();
        let finder = RatioFinder::new(&graph, &rates);

        let err = finder.find_ratio("xyz", "eur").unwrap_err();
        assert_eq!(err, RatioError::MissingCurrency("xyz".to_string()));
    }

    #[test]
    fn test_unlisted_source_is_error() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b"]);

        let rates = RateTable::new();
        let finder = RatioFinder::new(&graph, &rates);

        // b exists as a node but never declared its own neighbors
        let err = finder.find_ratio("b", "c").unwrap_err();
        assert_eq!(err, RatioError::MissingCurrency("b".to_string()));
    }

    #[test]
    fn test_unlisted_neighbor_mid_search_is_error() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b"]);

        let mut rates = RateTable::new();
        rates.insert("a", "b", 2.0);

        let finder = RatioFinder::new(&graph, &rates);
        let err = finder.find_ratio("a", "c").unwrap_err();
        assert_eq!(err, RatioError::MissingCurrency("b".to_string()));
    }

    #[test]
    fn test_missing_rate_on_successful_path_is_error() {
        let mut graph = RatioGraph::new();
        graph.list_currency("a", &["b"]);
        graph.list_currency("b", &[]);

        let rates = RateTable::new();
        let finder = RatioFinder::new(&graph, &rates);

        let err = finder.find_ratio("a", "b").unwrap_err();
        assert_eq!(
            err,
            RatioError::UnknownRate(UnknownRate {
                from: "a".to_string(),
                to: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_repeated_queries_do_not_interfere() {
        let graph = demo_graph();
        let rates = demo_rate_table();
        let finder = RatioFinder::new(&graph, &rates);

        let first = finder.find_ratio("eur", "gbp").unwrap().unwrap();
        let second = finder.find_ratio("eur", "gbp").unwrap().unwrap();

        assert_eq!(first, second);
    }
}
