//! Minimax partitioning
//!
//! Worst-case bucket sizes and the guess selection rule shared by the
//! adaptive solver and the game tree builder.

mod calculator;
mod selector;

pub use calculator::{bucket_sizes, max_bucket_size, partition, sampled_max_bucket_size};
pub use selector::{select_best_guess, select_by_estimate};
