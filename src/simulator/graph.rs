//! Dependency graph builder.
//!
//! Derives a directed graph over activities from work-product flow: an edge
//! producer → consumer exists whenever the consumer's trigger references a
//! work product the producer's `result` generates. Activities with an empty
//! trigger are roots; they stay in the graph (they occupy resources and may
//! feed downstream consumers) and are flagged on the output instead.
//!
//! # Cycle Handling
//!
//! A cycle among activities is a fatal input error. Detection runs before
//! scheduling via DFS with an in-stack set; the error names every activity
//! on the detected cycle.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::collections::{HashMap, HashSet};

use crate::error::SimulationError;
use crate::models::Activity;

/// Adjacency and in-degree view of an activity set.
///
/// Indices are positions in the input slice; stable input order is
/// preserved everywhere so scheduling stays deterministic.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    producers_by_product: HashMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph for an activity set.
    ///
    /// # Errors
    /// [`SimulationError::CycleDetected`] if the trigger/result relation
    /// contains a cycle.
    pub fn build(activities: &[Activity]) -> Result<Self, SimulationError> {
        let mut producers_by_product: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, activity) in activities.iter().enumerate() {
            if let Some(product) = &activity.result {
                producers_by_product
                    .entry(product.clone())
                    .or_default()
                    .push(idx);
            }
        }

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); activities.len()];
        let mut in_degree = vec![0usize; activities.len()];

        for (consumer, activity) in activities.iter().enumerate() {
            // Duplicate edges between the same pair collapse to one so the
            // in-degree matches the decrement count during scheduling.
            let mut predecessors = HashSet::new();
            for entry in &activity.trigger {
                if let Some(producers) = producers_by_product.get(&entry.work_product_id) {
                    for &producer in producers {
                        if producer != consumer && predecessors.insert(producer) {
                            successors[producer].push(consumer);
                            in_degree[consumer] += 1;
                        }
                    }
                }
            }
        }

        // Successor lists follow input order regardless of trigger order.
        for list in &mut successors {
            list.sort_unstable();
        }

        let graph = Self {
            successors,
            in_degree,
            producers_by_product,
        };
        if let Some(cycle) = graph.find_cycle() {
            return Err(SimulationError::CycleDetected {
                activity_ids: cycle
                    .into_iter()
                    .map(|i| activities[i].id.clone())
                    .collect(),
            });
        }
        Ok(graph)
    }

    /// Number of activities in the graph.
    pub fn len(&self) -> usize {
        self.in_degree.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.in_degree.is_empty()
    }

    /// Direct consumers of the activity at `idx`.
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.successors[idx]
    }

    /// In-degree per activity, cloneable as mutable scheduling state.
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Indices of activities producing the given work product.
    pub fn producers_of(&self, work_product_id: &str) -> &[usize] {
        self.producers_by_product
            .get(work_product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Indices with no incoming edges, in input order.
    pub fn roots(&self) -> Vec<usize> {
        self.in_degree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// DFS cycle search. Returns the activities on the first cycle found.
    fn find_cycle(&self) -> Option<Vec<usize>> {
        let mut visited = vec![false; self.len()];
        let mut in_stack = vec![false; self.len()];
        let mut path = Vec::new();

        for start in 0..self.len() {
            if !visited[start] {
                if let Some(cycle) =
                    self.cycle_dfs(start, &mut visited, &mut in_stack, &mut path)
                {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn cycle_dfs(
        &self,
        node: usize,
        visited: &mut [bool],
        in_stack: &mut [bool],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        visited[node] = true;
        in_stack[node] = true;
        path.push(node);

        for &next in &self.successors[node] {
            if in_stack[next] {
                // Back edge: the cycle is the path suffix starting at `next`.
                let pos = path.iter().position(|&n| n == next).unwrap_or(0);
                return Some(path[pos..].to_vec());
            }
            if !visited[next] {
                if let Some(cycle) = self.cycle_dfs(next, visited, in_stack, path) {
                    return Some(cycle);
                }
            }
        }

        in_stack[node] = false;
        path.pop();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producer(id: &str, product: &str) -> Activity {
        Activity::new(id).with_result(product)
    }

    #[test]
    fn test_edges_from_work_product_flow() {
        let activities = vec![
            producer("write", "draft"),
            Activity::new("review")
                .with_trigger("draft")
                .with_result("report"),
            Activity::new("approve").with_trigger("report"),
        ];
        let graph = DependencyGraph::build(&activities).unwrap();

        assert_eq!(graph.successors(0), &[1]);
        assert_eq!(graph.successors(1), &[2]);
        assert_eq!(graph.in_degrees(), &[0, 1, 1]);
        assert_eq!(graph.roots(), vec![0]);
        assert_eq!(graph.producers_of("draft"), &[0]);
    }

    #[test]
    fn test_multiple_trigger_products_dedup() {
        // One producer feeding two trigger entries of the same consumer
        // contributes a single edge.
        let activities = vec![
            Activity::new("p")
                .with_result("doc"),
            Activity::new("c")
                .with_trigger("doc")
                .with_trigger_at("doc", 50.0),
        ];
        let graph = DependencyGraph::build(&activities).unwrap();
        assert_eq!(graph.successors(0), &[1]);
        assert_eq!(graph.in_degrees()[1], 1);
    }

    #[test]
    fn test_self_production_is_not_an_edge() {
        // An activity refining its own result product does not depend on
        // itself.
        let activities = vec![Activity::new("refine")
            .with_trigger("doc")
            .with_result("doc")];
        let graph = DependencyGraph::build(&activities).unwrap();
        assert_eq!(graph.in_degrees(), &[0]);
        assert!(graph.successors(0).is_empty());
    }

    #[test]
    fn test_empty_trigger_roots() {
        let activities = vec![
            Activity::new("kickoff").with_result("plan"),
            Activity::new("standalone"),
            Activity::new("work").with_trigger("plan"),
        ];
        let graph = DependencyGraph::build(&activities).unwrap();
        assert_eq!(graph.roots(), vec![0, 1]);
    }

    #[test]
    fn test_cycle_detected() {
        let activities = vec![
            Activity::new("a").with_trigger("b-out").with_result("a-out"),
            Activity::new("b").with_trigger("a-out").with_result("b-out"),
        ];
        let err = DependencyGraph::build(&activities).unwrap_err();
        match err {
            SimulationError::CycleDetected { activity_ids } => {
                assert!(activity_ids.contains(&"a".to_string()));
                assert!(activity_ids.contains(&"b".to_string()));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn test_diamond_is_acyclic() {
        let activities = vec![
            producer("spec", "spec-doc"),
            Activity::new("dev").with_trigger("spec-doc").with_result("code"),
            Activity::new("test").with_trigger("spec-doc").with_result("results"),
            Activity::new("ship").with_trigger("code").with_trigger("results"),
        ];
        let graph = DependencyGraph::build(&activities).unwrap();
        assert_eq!(graph.in_degrees(), &[0, 1, 1, 2]);
        assert_eq!(graph.successors(0), &[1, 2]);
    }
}
