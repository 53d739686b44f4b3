//! Structural invariant checks for [`Network`].
//!
//! The checkers are surfaced via [`Network::invariants`] so property tests can
//! assert graph health after each operation without reaching into the
//! adjacency storage.

use thiserror::Error;
use tracing::debug;

use super::Network;

/// Enumerates the structural invariants a [`Network`] maintains.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NetworkInvariant {
    /// Every link endpoint is below the node count.
    NodeRange,
    /// No node is linked to itself.
    NoSelfLinks,
    /// No node lists the same neighbour twice.
    NoDuplicateLinks,
    /// Every directed entry has its reverse.
    Symmetry,
}

impl NetworkInvariant {
    /// Returns all invariants in the order they should be evaluated.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::NodeRange,
            Self::NoSelfLinks,
            Self::NoDuplicateLinks,
            Self::Symmetry,
        ]
    }
}

/// Reports an invariant violation surfaced by [`NetworkInvariantChecker`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NetworkInvariantViolation {
    /// A link references a node that does not exist.
    #[error("link {origin}->{target} references a node outside a network of {size} node(s)")]
    NodeOutOfRange {
        /// Node listing the neighbour.
        origin: usize,
        /// Listed neighbour.
        target: usize,
        /// Node count at the time of the check.
        size: usize,
    },
    /// A node lists itself as a neighbour.
    #[error("node {node} is linked to itself")]
    SelfLink {
        /// Offending node.
        node: usize,
    },
    /// A node lists the same neighbour more than once.
    #[error("node {origin} lists neighbour {target} {count} times")]
    DuplicateLink {
        /// Node listing the neighbour.
        origin: usize,
        /// Repeated neighbour.
        target: usize,
        /// Number of occurrences.
        count: usize,
    },
    /// A directed entry has no matching reverse entry.
    #[error("link {origin}->{target} is missing the reverse link")]
    MissingBacklink {
        /// Node exposing the one-way entry.
        origin: usize,
        /// Node lacking the reverse entry.
        target: usize,
    },
}

/// Helper returned by [`Network::invariants`] to run structural checks.
#[derive(Debug)]
pub struct NetworkInvariantChecker<'network> {
    network: &'network Network,
}

impl<'network> NetworkInvariantChecker<'network> {
    pub(super) fn new(network: &'network Network) -> Self {
        Self { network }
    }

    /// Runs all invariants, returning the first violation encountered.
    ///
    /// # Errors
    /// Returns the first [`NetworkInvariantViolation`] found.
    pub fn check_all(&self) -> Result<(), NetworkInvariantViolation> {
        self.check_many(NetworkInvariant::all())
    }

    /// Runs a custom subset of invariants in the provided order.
    ///
    /// # Errors
    /// Returns the first [`NetworkInvariantViolation`] found.
    pub fn check_many(
        &self,
        invariants: impl IntoIterator<Item = NetworkInvariant>,
    ) -> Result<(), NetworkInvariantViolation> {
        self.run_with_mode(invariants, &mut EvaluationMode::FailFast)
    }

    /// Runs a single invariant.
    ///
    /// # Errors
    /// Returns the first [`NetworkInvariantViolation`] found.
    pub fn check(&self, invariant: NetworkInvariant) -> Result<(), NetworkInvariantViolation> {
        self.check_many([invariant])
    }

    /// Runs the symmetry invariant directly.
    ///
    /// # Errors
    /// Returns the first missing backlink.
    pub fn symmetry(&self) -> Result<(), NetworkInvariantViolation> {
        self.check(NetworkInvariant::Symmetry)
    }

    /// Runs the duplicate-link invariant directly.
    ///
    /// # Errors
    /// Returns the first repeated neighbour.
    pub fn no_duplicate_links(&self) -> Result<(), NetworkInvariantViolation> {
        self.check(NetworkInvariant::NoDuplicateLinks)
    }

    /// Executes every invariant and returns the full set of violations.
    #[must_use]
    pub fn collect_all(&self) -> Vec<NetworkInvariantViolation> {
        self.collect_many(NetworkInvariant::all())
    }

    /// Executes the selected invariants and returns every violation discovered.
    #[must_use]
    pub fn collect_many(
        &self,
        invariants: impl IntoIterator<Item = NetworkInvariant>,
    ) -> Vec<NetworkInvariantViolation> {
        let mut violations = Vec::new();
        let mut mode = EvaluationMode::Collect(&mut violations);
        // Collect mode never short-circuits.
        if let Err(violation) = self.run_with_mode(invariants, &mut mode) {
            violations.push(violation);
        }
        violations
    }

    fn run_with_mode(
        &self,
        invariants: impl IntoIterator<Item = NetworkInvariant>,
        mode: &mut EvaluationMode<'_>,
    ) -> Result<(), NetworkInvariantViolation> {
        for invariant in invariants {
            match invariant {
                NetworkInvariant::NodeRange => check_node_range(self.network, mode)?,
                NetworkInvariant::NoSelfLinks => check_self_links(self.network, mode)?,
                NetworkInvariant::NoDuplicateLinks => check_duplicates(self.network, mode)?,
                NetworkInvariant::Symmetry => check_symmetry(self.network, mode)?,
            }
        }
        Ok(())
    }
}

enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<NetworkInvariantViolation>),
}

impl EvaluationMode<'_> {
    fn record(
        &mut self,
        violation: NetworkInvariantViolation,
    ) -> Result<(), NetworkInvariantViolation> {
        debug!(%violation, "network invariant violated");
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}

fn check_node_range(
    network: &Network,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), NetworkInvariantViolation> {
    let size = network.size();
    for (origin, target) in network.links.directed_entries() {
        if origin >= size || target >= size {
            mode.record(NetworkInvariantViolation::NodeOutOfRange {
                origin,
                target,
                size,
            })?;
        }
    }
    Ok(())
}

fn check_self_links(
    network: &Network,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), NetworkInvariantViolation> {
    for (origin, target) in network.links.directed_entries() {
        if origin == target {
            mode.record(NetworkInvariantViolation::SelfLink { node: origin })?;
        }
    }
    Ok(())
}

fn check_duplicates(
    network: &Network,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), NetworkInvariantViolation> {
    for origin in 0..network.links.slots() {
        let neighbours = network.links.neighbours(origin);
        for (position, &target) in neighbours.iter().enumerate() {
            // Report each repeated neighbour once, at its first occurrence.
            if neighbours.iter().take(position).any(|&seen| seen == target) {
                continue;
            }
            let count = neighbours.iter().filter(|&&other| other == target).count();
            if count > 1 {
                mode.record(NetworkInvariantViolation::DuplicateLink {
                    origin,
                    target,
                    count,
                })?;
            }
        }
    }
    Ok(())
}

fn check_symmetry(
    network: &Network,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), NetworkInvariantViolation> {
    for (origin, target) in network.links.directed_entries() {
        if !network.links.contains(target, origin) {
            mode.record(NetworkInvariantViolation::MissingBacklink { origin, target })?;
        }
    }
    Ok(())
}
