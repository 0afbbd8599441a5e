use super::Graph;
use crate::error::StructuralError;
use crate::node::{NodeId, Operation};
use log::{debug, info, warn};
use std::collections::VecDeque;

impl Graph {
    /// Reorders the nodes so that every dependency comes before the nodes that read it.
    ///
    /// Kahn's algorithm over the "depended-upon-by" relation: nodes nothing depends on
    /// (the cost) come out first, leaves last, and the result is reversed before being
    /// installed. On error the stored order is left exactly as it was.
    ///
    /// # Errors
    /// * [`StructuralError::DanglingReference`] if a node reads a handle this graph does
    ///   not own.
    /// * [`StructuralError::Cycle`] if some nodes depend on each other in a loop.
    pub fn sort(&mut self) -> Result<(), StructuralError> {
        match self.topological_order() {
            Ok(order) => {
                self.order = order;
                self.sorted = true;
                info!("Topological sort ordered {} node(s).", self.order.len());
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    fn topological_order(&self) -> Result<Vec<usize>, StructuralError> {
        let n = self.nodes.len();

        // incoming[d] = number of dependency occurrences that reference d.
        let mut incoming = vec![0usize; n];
        for &slot in &self.order {
            let mut dangling = None;
            self.nodes[slot].visit_dependencies(&mut |dep| {
                if self.contains(dep) {
                    incoming[dep.index()] += 1;
                } else if dangling.is_none() {
                    dangling = Some(dep);
                }
            });
            if let Some(dependency) = dangling {
                return Err(StructuralError::DanglingReference {
                    node: NodeId::new(self.id, slot),
                    dependency,
                });
            }
        }

        let mut queue: VecDeque<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&slot| incoming[slot] == 0)
            .collect();
        debug!("topological_order: {} of {} node(s) have no dependents", queue.len(), n);

        let mut ordered = Vec::with_capacity(n);
        while let Some(slot) = queue.pop_front() {
            ordered.push(slot);
            self.nodes[slot].visit_dependencies(&mut |dep| {
                let count = &mut incoming[dep.index()];
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dep.index());
                }
            });
        }

        if ordered.len() < n {
            return Err(StructuralError::Cycle {
                unresolved: n - ordered.len(),
            });
        }

        ordered.reverse();
        Ok(ordered)
    }

    /// Checks that every dependency of every node sits strictly earlier in the stored order.
    pub fn is_topologically_ordered(&self) -> bool {
        let mut position = vec![usize::MAX; self.nodes.len()];
        for (pos, &slot) in self.order.iter().enumerate() {
            position[slot] = pos;
        }
        self.order.iter().enumerate().all(|(pos, &slot)| {
            let mut ok = true;
            self.nodes[slot].visit_dependencies(&mut |dep| {
                ok &= self.contains(dep) && position[dep.index()] < pos;
            });
            ok
        })
    }
}

#[cfg(test)]
#[path = "topo_test.rs"]
mod tests;
