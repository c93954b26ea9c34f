//! Certification chains between two members, for diagnostics.

use crate::error::WotError;
use crate::graph::WebOfTrust;
use crate::types::WotId;

impl WebOfTrust {
    /// Every simple chain of certifications leading from `from` to `to` in
    /// at most `max_distance` hops. Each path lists the nodes from `from` to
    /// `to` inclusive. Paths come out in lexicographic order of their nodes.
    pub fn find_paths(
        &self,
        from: WotId,
        to: WotId,
        max_distance: u32,
    ) -> Result<Vec<Vec<WotId>>, WotError> {
        self.node(from)?;
        self.node(to)?;

        let mut paths = Vec::new();
        if max_distance == 0 || from == to {
            return Ok(paths);
        }

        let mut on_path = vec![false; self.nodes.len()];
        let mut path = vec![from];
        on_path[from.0] = true;
        self.walk(to, max_distance as usize, &mut path, &mut on_path, &mut paths);

        tracing::debug!(%from, %to, max_distance, found = paths.len(), "paths enumerated");
        Ok(paths)
    }

    fn walk(
        &self,
        to: WotId,
        max_distance: usize,
        path: &mut Vec<WotId>,
        on_path: &mut [bool],
        paths: &mut Vec<Vec<WotId>>,
    ) {
        let Some(&current) = path.last() else {
            return;
        };
        for &next in &self.nodes[current.0].certified {
            if on_path[next.0] {
                continue;
            }
            if next == to {
                let mut found = path.clone();
                found.push(next);
                paths.push(found);
                continue;
            }
            // Hops used so far is path.len() - 1; going through `next` needs
            // at least two more to end on `to`.
            if path.len() < max_distance {
                on_path[next.0] = true;
                path.push(next);
                self.walk(to, max_distance, path, on_path, paths);
                path.pop();
                on_path[next.0] = false;
            }
        }
    }
}
