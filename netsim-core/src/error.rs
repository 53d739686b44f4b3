//! Error types for the netsim core library.
//!
//! Defines error enums exposed by the public API together with stable,
//! machine-readable error codes.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reason a link could not be added to a [`crate::Network`].
///
/// Returned by [`crate::Network::try_add_link`]; in every case the network is
/// left unchanged.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NetworkError {
    /// One endpoint does not name an existing node.
    #[error("node {node} is out of range for a network of {size} node(s)")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// Node count at the time of the call.
        size: usize,
    },
    /// Both endpoints name the same node.
    #[error("node {node} cannot be linked to itself")]
    SelfLink {
        /// The node that was passed as both endpoints.
        node: usize,
    },
    /// The two nodes are already linked.
    #[error("nodes {a} and {b} are already linked")]
    DuplicateLink {
        /// First endpoint as supplied by the caller.
        a: usize,
        /// Second endpoint as supplied by the caller.
        b: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// One endpoint does not name an existing node.
        NodeOutOfRange => NodeOutOfRange { .. } => "NETWORK_NODE_OUT_OF_RANGE",
        /// Both endpoints name the same node.
        SelfLink => SelfLink { .. } => "NETWORK_SELF_LINK",
        /// The two nodes are already linked.
        DuplicateLink => DuplicateLink { .. } => "NETWORK_DUPLICATE_LINK",
    }
}

/// Error produced when a [`crate::SamplerConfig`] cannot back a sampler.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    /// Normal distribution parameters were not usable.
    #[error("normal distribution requires a finite mean and a finite, non-negative std dev (got mean={mean}, std_dev={std_dev})")]
    InvalidNormal {
        /// Requested mean.
        mean: f64,
        /// Requested standard deviation.
        std_dev: f64,
    },
    /// Uniform bounds did not describe a finite, non-empty interval.
    #[error("uniform range [{low}, {high}) must be finite and non-empty")]
    InvalidUniformRange {
        /// Inclusive lower bound.
        low: f64,
        /// Exclusive upper bound.
        high: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplerError`] variants.
    enum SamplerErrorCode for SamplerError {
        /// Normal distribution parameters were not usable.
        InvalidNormal => InvalidNormal { .. } => "SAMPLER_INVALID_NORMAL",
        /// Uniform bounds did not describe a finite, non-empty interval.
        InvalidUniformRange => InvalidUniformRange { .. } => "SAMPLER_INVALID_UNIFORM_RANGE",
    }
}
