//! Display functions for games and analysis results
//!
//! Each report is a borrowed wrapper implementing [`fmt::Display`], so it can
//! be printed directly or turned into a `String` with `to_string()`.

use super::formatters::{create_progress_bar, hint_tiles};
use crate::analysis::{DepthDistribution, GameTree, SelfPlayStatistics};
use crate::matrix::ScoreMatrix;
use crate::solver::SolvedGame;
use colored::Colorize;
use std::fmt;

const BAR_WIDTH: usize = 40;

/// A solved game, one line per guess
pub struct GameReport<'a>(pub &'a SolvedGame);

impl fmt::Display for GameReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.0;
        let num_slots = game.answer().len();

        writeln!(f, "{}", "─".repeat(60).cyan())?;
        writeln!(f, "Solving: {}", game.answer().text().bright_yellow().bold())?;
        writeln!(f, "{}", "─".repeat(60).cyan())?;

        for (i, (guess, hint)) in game.guesses.iter().zip(&game.hints).enumerate() {
            write!(f, "Turn {}: {} {}", i + 1, guess, hint_tiles(*hint, num_slots))?;
            match game.candidate_sizes.get(i) {
                Some(size) => writeln!(f, "  ({size} candidates)")?,
                None => writeln!(f)?,
            }
        }

        writeln!(
            f,
            "{}",
            format!("✅ Solved in {} guesses!", game.num_guesses())
                .green()
                .bold()
        )
    }
}

/// A guesses-to-solve histogram
pub struct DistributionReport<'a>(pub &'a DepthDistribution);

impl fmt::Display for DistributionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distribution = self.0;
        let max_count = distribution.counts().values().copied().max().unwrap_or(1);

        writeln!(f, "\n📈 {}", "Guess Distribution".bright_cyan().bold())?;
        for (&guesses, &count) in distribution.counts() {
            let percentage = count as f64 / distribution.total() as f64 * 100.0;
            let bar = create_progress_bar(count as f64, max_count as f64, BAR_WIDTH);
            writeln!(
                f,
                "  {guesses} guesses: {} {count:5} ({percentage:5.1}%)",
                bar.green()
            )?;
        }
        writeln!(
            f,
            "  Average guesses: {}",
            format!("{:.3}", distribution.average()).bright_yellow().bold()
        )
    }
}

/// The root of a game tree and its depth distribution
pub struct TreeReport<'a> {
    pub tree: &'a GameTree,
    pub matrix: &'a dyn ScoreMatrix,
}

impl fmt::Display for TreeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.tree.root();

        writeln!(f, "\n{}", "═".repeat(60).cyan())?;
        writeln!(f, " {} ", "GAME TREE".bright_cyan().bold())?;
        writeln!(f, "{}", "═".repeat(60).cyan())?;
        writeln!(f, "  Slots:        {}", self.tree.num_slots())?;
        writeln!(f, "  Answers:      {}", root.answers().len())?;
        writeln!(f, "  Nodes:        {}", self.tree.len())?;
        if let Some(guess) = root.guess() {
            writeln!(
                f,
                "  Opening:      {}",
                self.matrix.code_at(guess).text().bright_yellow().bold()
            )?;
        }
        if let Some(estimate) = root.estimate() {
            writeln!(f, "  Worst bucket: {:.1}%", estimate * 100.0)?;
        }
        write!(
            f,
            "{}",
            DistributionReport(&DepthDistribution::from_tree(self.tree))
        )
    }
}

/// Self-play statistics
pub struct SelfPlayReport<'a>(pub &'a SelfPlayStatistics);

impl fmt::Display for SelfPlayReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        let percent = |n: usize| n as f64 / stats.total_games.max(1) as f64 * 100.0;

        writeln!(f, "\n{}", "═".repeat(70))?;
        writeln!(f, " Self-Play Results ")?;
        writeln!(f, "{}", "═".repeat(70))?;

        writeln!(f, "\n📊 {}", "Overall Performance".bright_cyan().bold())?;
        writeln!(f, "  Opening guess:       {}", stats.opener)?;
        writeln!(f, "  Total games:         {}", stats.total_games)?;
        writeln!(
            f,
            "  Successfully solved: {} {}",
            stats.solved,
            format!("({:.1}%)", percent(stats.solved)).green()
        )?;
        if stats.failed > 0 {
            writeln!(
                f,
                "  Failed to solve:     {} {}",
                stats.failed,
                format!("({:.1}%)", percent(stats.failed)).red()
            )?;
        }
        writeln!(
            f,
            "  Guess range:         {}-{}",
            stats.min_guesses(),
            stats.max_guesses()
        )?;
        writeln!(
            f,
            "  Total time:          {:.2}s",
            stats.total_time.as_secs_f64()
        )?;

        write!(f, "{}", DistributionReport(&stats.distribution))?;

        if let Some((code, guesses)) = &stats.best_game {
            writeln!(f, "\n✨ {}", "Best Performance".green().bold())?;
            writeln!(
                f,
                "  {} solved in {} guess{}",
                code.text().bright_green(),
                guesses,
                if *guesses == 1 { "" } else { "es" }
            )?;
        }

        if !stats.hardest_games.is_empty() {
            writeln!(f, "\n😰 {}", "Hardest Codes".yellow().bold())?;
            for (code, guesses) in stats.hardest_games.iter().take(5) {
                writeln!(f, "  {} ({guesses} guesses)", code.text().yellow())?;
            }
        }

        if !stats.failures.is_empty() {
            writeln!(f, "\n❌ {}", "Unsolved".red().bold())?;
            for code in stats.failures.iter().take(10) {
                writeln!(f, "  {}", code.text().red())?;
            }
        }
        Ok(())
    }
}

pub fn print_game(game: &SolvedGame) {
    print!("{}", GameReport(game));
}

pub fn print_depth_distribution(distribution: &DepthDistribution) {
    print!("{}", DistributionReport(distribution));
}

pub fn print_tree_summary(tree: &GameTree, matrix: &dyn ScoreMatrix) {
    print!("{}", TreeReport { tree, matrix });
}

pub fn print_self_play_statistics(stats: &SelfPlayStatistics) {
    print!("{}", SelfPlayReport(stats));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{SelfPlayConfig, TreeConfig, run_self_play};
    use crate::core::Code;
    use crate::matrix::InMemoryMatrix;
    use crate::solver::{GameOutcome, KnownAnswer, Solver, SolverConfig};

    #[test]
    fn game_lists_every_turn() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let solver = Solver::new(&matrix, SolverConfig::default()).unwrap();
        let outcome = solver
            .play(&mut KnownAnswer::new(Code::new("4*3=12").unwrap()))
            .unwrap();
        let GameOutcome::Solved(game) = outcome else {
            panic!("game not solved");
        };

        let text = GameReport(&game).to_string();
        assert!(text.contains("Turn 1: 10-5=5 🟪⬛⬛⬛🟪⬛"));
        assert!(text.contains("Turn 3: 4*3=12 🟩🟩🟩🟩🟩🟩"));
        assert!(!text.contains("Turn 4"));
    }

    #[test]
    fn distribution_lists_each_guess_count() {
        let mut distribution = DepthDistribution::default();
        for guesses in [2, 3, 3, 3] {
            distribution.record(guesses);
        }

        let text = DistributionReport(&distribution).to_string();
        assert!(text.contains("2 guesses:"));
        assert!(text.contains("3 guesses:"));
        assert!(!text.contains("4 guesses:"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn tree_summary_names_the_opening() {
        let matrix = InMemoryMatrix::for_slots(5).unwrap();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();
        let opening = matrix.code_at(tree.root().guess().unwrap()).text().to_string();

        let text = TreeReport {
            tree: &tree,
            matrix: &matrix,
        }
        .to_string();
        assert!(text.contains(&opening));
        assert!(text.contains("Nodes:"));
        assert!(text.contains("Guess Distribution"));
    }

    #[test]
    fn self_play_report() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let config = SelfPlayConfig {
            limit: Some(20),
            ..SelfPlayConfig::default()
        };
        let stats = run_self_play(&matrix, &config).unwrap();

        let text = SelfPlayReport(&stats).to_string();
        assert!(text.contains("Self-Play Results"));
        assert!(text.contains("10-5=5"));
        assert!(!text.contains("Unsolved"));
    }
}
