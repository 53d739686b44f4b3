//! Poisson-degree random connection of a [`Network`].

use tracing::{Span, debug, field, instrument, trace};

use super::Network;
use crate::random::RandomSource;

impl Network {
    /// Rebuilds every link from scratch with Poisson-distributed degree
    /// targets.
    ///
    /// All existing links are cleared. One target degree per node is drawn up
    /// front with mean `mean_degree` and clamped to [`Network::size`]. Each
    /// node then draws uniform candidate partners, one per attempt. A failed
    /// attempt (self-link or existing link) extends the node's attempt budget
    /// by one, but the budget never exceeds the node count, so every node
    /// makes at most `size()` attempts.
    ///
    /// Returns the number of links created.
    ///
    /// # Examples
    /// ```
    /// use netsim_core::{Network, SamplerConfig, SeededSource};
    ///
    /// let mut source = SeededSource::new(&SamplerConfig::default().with_seed(8))
    ///     .expect("config is valid");
    /// let mut network = Network::new();
    /// network.resize(50, &mut source);
    /// let created = network.random_connect(3.0, &mut source);
    /// assert_eq!(created, network.link_count());
    /// network.invariants().check_all().expect("random links stay well formed");
    /// ```
    #[instrument(
        name = "network.random_connect",
        skip(self, source),
        fields(nodes = self.size(), links = field::Empty),
    )]
    pub fn random_connect<R: RandomSource + ?Sized>(
        &mut self,
        mean_degree: f64,
        source: &mut R,
    ) -> usize {
        self.links.clear();
        let size = self.size();
        let mut targets = vec![0_usize; size];
        source.poisson(&mut targets, mean_degree);

        let mut created = 0;
        for (node, &drawn) in targets.iter().enumerate() {
            created += self.connect_node(node, drawn.min(size), source);
        }

        Span::current().record("links", created);
        debug!(links = created, "random connection completed");
        created
    }

    fn connect_node<R: RandomSource + ?Sized>(
        &mut self,
        node: usize,
        degree_target: usize,
        source: &mut R,
    ) -> usize {
        let size = self.size();
        let mut budget = degree_target;
        let mut candidate = [0_usize; 1];
        let mut created = 0;
        let mut attempt = 0;
        while attempt < budget {
            source.uniform_int(&mut candidate, 0, size);
            let [partner] = candidate;
            if self.add_link(node, partner) {
                created += 1;
            } else if budget < size {
                budget += 1;
            }
            attempt += 1;
        }
        trace!(node, degree_target, attempts = attempt, created, "node connected");
        created
    }
}
