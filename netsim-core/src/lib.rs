//! Netsim core library.
//!
//! Models an undirected random network whose nodes carry scalar values. Links
//! are added explicitly or generated by drawing a Poisson-distributed degree
//! target for every node.

mod error;
mod network;
mod random;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{NetworkError, NetworkErrorCode, SamplerError, SamplerErrorCode},
    network::{Network, NetworkInvariant, NetworkInvariantChecker, NetworkInvariantViolation},
    random::{RandomSource, SamplerConfig, SeededSource},
};
