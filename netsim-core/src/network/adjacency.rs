//! Per-node neighbour storage for [`super::Network`].
//!
//! Every undirected link is stored as two directed entries, one in each
//! endpoint's list. Lists keep insertion order.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Adjacency {
    neighbours: Vec<Vec<usize>>,
}

impl Adjacency {
    pub(crate) fn neighbours(&self, node: usize) -> &[usize] {
        self.neighbours.get(node).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    pub(crate) fn contains(&self, a: usize, b: usize) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Records both directions of the link `a`–`b`.
    ///
    /// Callers are responsible for range, self-link and duplicate checks.
    pub(crate) fn insert_pair(&mut self, a: usize, b: usize) {
        let needed = a.max(b) + 1;
        if self.neighbours.len() < needed {
            self.neighbours.resize_with(needed, Vec::new);
        }
        if let Some(list) = self.neighbours.get_mut(a) {
            list.push(b);
        }
        if let Some(list) = self.neighbours.get_mut(b) {
            list.push(a);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.neighbours.clear();
    }

    /// Drops every entry that references a node `>= nodes`, returning the
    /// number of undirected links removed.
    pub(crate) fn truncate(&mut self, nodes: usize) -> usize {
        if self.neighbours.len() <= nodes {
            return 0;
        }
        let mut removed = 0;
        for list in self.neighbours.iter_mut().take(nodes) {
            let before = list.len();
            list.retain(|&target| target < nodes);
            removed += before - list.len();
        }
        // Links wholly inside the removed tail disappear with their lists.
        let tail_only: usize = self
            .neighbours
            .iter()
            .skip(nodes)
            .map(|list| list.iter().filter(|&&target| target >= nodes).count())
            .sum();
        self.neighbours.truncate(nodes);
        removed + tail_only / 2
    }

    pub(crate) fn directed_entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .flat_map(|(source, list)| list.iter().map(move |&target| (source, target)))
    }

    pub(crate) fn link_count(&self) -> usize {
        self.neighbours.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Number of nodes with an allocated neighbour list.
    pub(crate) fn slots(&self) -> usize {
        self.neighbours.len()
    }

    #[cfg(test)]
    pub(crate) fn push_directed(&mut self, source: usize, target: usize) {
        if self.neighbours.len() <= source {
            self.neighbours.resize_with(source + 1, Vec::new);
        }
        if let Some(list) = self.neighbours.get_mut(source) {
            list.push(target);
        }
    }
}
