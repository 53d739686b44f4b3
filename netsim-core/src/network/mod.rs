//! Undirected network of valued nodes.
//!
//! A [`Network`] owns one `f64` value per node and a symmetric, self-loop
//! free adjacency relation over node indices. Node identity is the index into
//! the value sequence. Randomized operations borrow a [`RandomSource`] from
//! the caller.

mod adjacency;
mod connect;
mod invariants;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::{error::NetworkError, random::RandomSource};

use self::adjacency::Adjacency;

pub use self::invariants::{NetworkInvariant, NetworkInvariantChecker, NetworkInvariantViolation};

/// Random graph whose nodes carry scalar values.
///
/// Out-of-range queries return neutral defaults (`0`, `0.0` or an empty
/// slice) instead of failing; check [`Network::size`] to tell a missing node
/// from an isolated one.
///
/// # Examples
/// ```
/// use netsim_core::{Network, SamplerConfig, SeededSource};
///
/// let mut source = SeededSource::new(&SamplerConfig::default().with_seed(1))
///     .expect("config is valid");
/// let mut network = Network::new();
/// network.resize(4, &mut source);
/// assert!(network.add_link(0, 1));
/// assert!(network.add_link(1, 2));
/// assert!(network.add_link(2, 3));
/// assert_eq!(network.degree(1), 2);
/// assert_eq!(network.neighbors(0), &[1]);
/// assert_eq!(network.neighbors(3), &[2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    values: Vec<f64>,
    links: Adjacency,
}

impl Network {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjusts the node count to exactly `nodes`.
    ///
    /// An empty network is populated from the source's normal distribution.
    /// A non-empty network grows by appending one uniform draw per new node
    /// and shrinks by dropping trailing nodes. Shrinking also removes every
    /// link that touched a dropped node; surviving links are left intact.
    #[instrument(
        name = "network.resize",
        skip(self, source),
        fields(from = self.values.len(), to = nodes),
    )]
    pub fn resize<R: RandomSource + ?Sized>(&mut self, nodes: usize, source: &mut R) {
        let current = self.values.len();
        match current.cmp(&nodes) {
            Ordering::Equal => {}
            Ordering::Less if current == 0 => {
                self.values = vec![0.0; nodes];
                source.normal(&mut self.values);
                debug!(nodes, "populated empty network from normal draws");
            }
            Ordering::Less => {
                self.values
                    .extend((current..nodes).map(|_| source.uniform_double()));
                debug!(added = nodes - current, "appended uniform node values");
            }
            Ordering::Greater => {
                self.values.truncate(nodes);
                let pruned = self.links.truncate(nodes);
                debug!(removed = current - nodes, pruned, "dropped trailing nodes");
            }
        }
    }

    /// Adds an undirected link between two distinct, existing nodes.
    ///
    /// Returns `false` without mutating when the nodes are equal, either index
    /// is out of range, or the link already exists. See
    /// [`Network::try_add_link`] for the reason.
    pub fn add_link(&mut self, a: usize, b: usize) -> bool {
        self.try_add_link(a, b).is_ok()
    }

    /// Adds an undirected link, reporting why nothing changed on failure.
    ///
    /// # Errors
    /// Returns [`NetworkError::SelfLink`] when `a == b`,
    /// [`NetworkError::NodeOutOfRange`] when either index is not below
    /// [`Network::size`], and [`NetworkError::DuplicateLink`] when the nodes
    /// are already linked.
    ///
    /// # Examples
    /// ```
    /// use netsim_core::{Network, NetworkError, SamplerConfig, SeededSource};
    ///
    /// let mut source = SeededSource::new(&SamplerConfig::default().with_seed(2))
    ///     .expect("config is valid");
    /// let mut network = Network::new();
    /// network.resize(2, &mut source);
    /// network.try_add_link(0, 1).expect("first link is new");
    /// assert_eq!(
    ///     network.try_add_link(1, 0),
    ///     Err(NetworkError::DuplicateLink { a: 1, b: 0 })
    /// );
    /// ```
    pub fn try_add_link(&mut self, a: usize, b: usize) -> Result<(), NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLink { node: a });
        }
        let size = self.size();
        if let Some(node) = [a, b].into_iter().find(|&node| node >= size) {
            return Err(NetworkError::NodeOutOfRange { node, size });
        }
        if self.links.contains(a, b) {
            return Err(NetworkError::DuplicateLink { a, b });
        }
        self.links.insert_pair(a, b);
        Ok(())
    }

    /// Overwrites node values positionally from `values`.
    ///
    /// Every existing value is first reset to zero, then
    /// `min(values.len(), self.size())` entries are copied. Extra input is
    /// ignored and the node count never changes. Returns the number of values
    /// copied.
    pub fn set_values(&mut self, values: &[f64]) -> usize {
        self.values.fill(0.0);
        let copied = values.len().min(self.values.len());
        for (slot, &value) in self.values.iter_mut().zip(values) {
            *slot = value;
        }
        copied
    }

    /// Returns the node count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of neighbours of `node`, or `0` when out of range.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        if node < self.size() {
            self.links.degree(node)
        } else {
            0
        }
    }

    /// Returns the value stored at `node`, or `0.0` when out of range.
    #[must_use]
    pub fn value(&self, node: usize) -> f64 {
        self.values.get(node).copied().unwrap_or(0.0)
    }

    /// Returns all node values in index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns a copy of the node values sorted in descending order.
    ///
    /// NaN values are ordered by [`f64::total_cmp`].
    #[must_use]
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(|left, right| right.total_cmp(left));
        sorted
    }

    /// Returns the nodes linked to `node` in insertion order, or an empty
    /// slice when out of range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        if node < self.size() {
            self.links.neighbours(node)
        } else {
            &[]
        }
    }

    /// Returns the number of undirected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.link_count()
    }

    /// Iterates over every undirected link once, as `(low, high)` pairs.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links
            .directed_entries()
            .filter(|&(source, target)| source < target)
    }

    /// Returns a checker for the structural invariants of this network.
    #[must_use]
    pub fn invariants(&self) -> NetworkInvariantChecker<'_> {
        NetworkInvariantChecker::new(self)
    }
}
