//! Centrality measures over certification chains (Brandes accumulation).
//!
//! Shortest paths start at enabled members and follow certifications from
//! issuer to target. A disabled member may relay a path but never ends one.

use std::collections::VecDeque;

use crate::graph::WebOfTrust;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accumulation {
    /// Fraction of shortest paths going through a node.
    Betweenness,
    /// Number of shortest paths going through a node.
    Stress,
}

impl WebOfTrust {
    /// Betweenness centrality of every node, truncated to an integer.
    pub fn betweenness_centralities(&self) -> Vec<u64> {
        self.centralities(Accumulation::Betweenness, None)
    }

    /// Stress centrality of every node.
    pub fn stress_centralities(&self) -> Vec<u64> {
        self.centralities(Accumulation::Stress, None)
    }

    /// Stress centrality counting only paths of at most `step_max` hops.
    pub fn distance_stress_centralities(&self, step_max: u32) -> Vec<u64> {
        self.centralities(Accumulation::Stress, Some(step_max))
    }

    fn centralities(&self, kind: Accumulation, step_max: Option<u32>) -> Vec<u64> {
        let size = self.nodes.len();
        let mut centralities = vec![0.0_f64; size];

        for source in self.enabled() {
            let mut stack = Vec::with_capacity(size);
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); size];
            let mut sigma = vec![0.0_f64; size];
            let mut depth: Vec<Option<u32>> = vec![None; size];
            let mut queue = VecDeque::with_capacity(size);

            sigma[source.0] = 1.0;
            depth[source.0] = Some(0);
            queue.push_back(source.0);

            while let Some(v) = queue.pop_front() {
                stack.push(v);
                let Some(dv) = depth[v] else { continue };
                if step_max.is_some_and(|max| dv >= max) {
                    continue;
                }
                for w in &self.nodes[v].certified {
                    let w = w.0;
                    if depth[w].is_none() {
                        depth[w] = Some(dv + 1);
                        queue.push_back(w);
                    }
                    if depth[w] == Some(dv + 1) {
                        sigma[w] += sigma[v];
                        predecessors[w].push(v);
                    }
                }
            }

            // Stack pops nodes by non-increasing distance from the source.
            let mut delta = vec![0.0_f64; size];
            while let Some(w) = stack.pop() {
                let ends_here = if self.nodes[w].enabled { 1.0 } else { 0.0 };
                for &v in &predecessors[w] {
                    delta[v] += match kind {
                        Accumulation::Betweenness => sigma[v] / sigma[w] * (ends_here + delta[w]),
                        Accumulation::Stress => sigma[v] * (ends_here + delta[w] / sigma[w]),
                    };
                }
                if w != source.0 {
                    centralities[w] += delta[w];
                }
            }
        }

        tracing::debug!(kind = ?kind, ?step_max, nodes = size, "centralities computed");
        centralities.into_iter().map(|c| c as u64).collect()
    }
}
