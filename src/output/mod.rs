//! Terminal output formatting
//!
//! Colored renderings of games and analysis results, and the progress bars
//! used by long-running loops.

pub mod display;
pub mod formatters;

pub use display::{
    DistributionReport, GameReport, SelfPlayReport, TreeReport, print_depth_distribution,
    print_game, print_self_play_statistics, print_tree_summary,
};
