//! Whole-universe analysis
//!
//! Game trees over every answer, their guesses-to-solve distribution,
//! self-play statistics and the sampling estimator used for large nodes.

mod depth;
mod sampling;
mod self_play;
mod tree;

pub use depth::DepthDistribution;
pub use sampling::{Estimates, SamplingConfig, min_biased_multilevel_sampling};
pub use self_play::{GameRecord, SelfPlayConfig, SelfPlayStatistics, run_self_play};
pub use tree::{BucketStrategy, GameNode, GameTree, NodeId, TreeConfig, exact_worst_fraction};
