//! Game tree construction
//!
//! The tree applies the solver's minimax rule at every reachable candidate
//! set, so it shows how every answer of the universe would be solved. Nodes
//! live in an arena and refer to each other by [`NodeId`]; every index a node
//! stores is a root-level universe index.

use super::sampling::{SamplingConfig, min_biased_multilevel_sampling};
use crate::core::{NerdleError, Score};
use crate::matrix::{MatrixView, ScoreMatrix};
use crate::solver::minimax::{
    max_bucket_size, partition, sampled_max_bucket_size, select_best_guess, select_by_estimate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Position of a node in the tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node
    pub const ROOT: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// How worst-case bucket sizes are computed at each node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BucketStrategy {
    /// Score every guess against every answer of the node
    Exact,
    /// Min-biased multilevel sampling for nodes with more answers than
    /// `min_sample_size`; exact below that
    Multilevel(SamplingConfig),
}

/// Configuration for [`GameTree::build`]
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    pub strategy: BucketStrategy,

    /// Keep 1/factor of the non-candidate guesses at small nodes; 1 disables
    /// coarsening (default: 4)
    pub guess_coarsening_factor: f64,

    /// Coarsen nodes whose answers are at most this fraction of the universe
    /// (default: 0.1)
    pub coarsening_threshold: f64,

    /// Seed for guess coarsening and column sampling
    pub seed: u64,

    /// Print every node as it is processed
    pub verbose: bool,
}

impl TreeConfig {
    /// Exact bucket sizes over the full guess pool at every node
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            strategy: BucketStrategy::Exact,
            guess_coarsening_factor: 1.0,
            coarsening_threshold: 0.1,
            seed: 0,
            verbose: false,
        }
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: BucketStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_coarsening(mut self, factor: f64, threshold: f64) -> Self {
        self.guess_coarsening_factor = factor;
        self.coarsening_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the parameters
    ///
    /// # Errors
    /// Returns [`NerdleError::InvalidConfig`] for a coarsening factor below 1,
    /// a threshold outside `[0, 1]` or an invalid sampling configuration.
    pub fn validate(&self) -> Result<(), NerdleError> {
        if self.guess_coarsening_factor.is_nan() || self.guess_coarsening_factor < 1.0 {
            return Err(NerdleError::InvalidConfig(format!(
                "guess_coarsening_factor must be at least 1, got {}",
                self.guess_coarsening_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.coarsening_threshold) {
            return Err(NerdleError::InvalidConfig(format!(
                "coarsening_threshold must be in [0, 1], got {}",
                self.coarsening_threshold
            )));
        }
        if let BucketStrategy::Multilevel(sampling) = &self.strategy {
            sampling.validate()?;
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::exact().with_coarsening(4.0, 0.1)
    }
}

/// One candidate set in the game tree
#[derive(Debug, Clone)]
pub struct GameNode {
    id: NodeId,
    parent: Option<NodeId>,
    hint: Option<Score>,
    guesses: Rc<[usize]>,
    answers: Vec<usize>,
    guess: Option<usize>,
    estimate: Option<f64>,
    exact: bool,
    children: BTreeMap<Score, NodeId>,
}

impl GameNode {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Score that led here from the parent's guess; `None` at the root
    #[must_use]
    pub const fn hint(&self) -> Option<Score> {
        self.hint
    }

    /// Guess pool considered at this node
    #[must_use]
    pub fn guesses(&self) -> &[usize] {
        &self.guesses
    }

    /// Answers consistent with the path to this node
    #[must_use]
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    /// Root index of the answer at local position `local`
    #[inline]
    #[must_use]
    pub fn answer(&self, local: usize) -> usize {
        self.answers[local]
    }

    /// Guess made at this node; at a leaf, the answer itself
    #[must_use]
    pub const fn guess(&self) -> Option<usize> {
        self.guess
    }

    /// Worst-case bucket fraction of the chosen guess
    #[must_use]
    pub const fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    /// Whether the estimate was computed over every answer of the node
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.exact
    }

    #[must_use]
    pub const fn children(&self) -> &BTreeMap<Score, NodeId> {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Decision tree over every answer of a universe
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<GameNode>,
    leaf_of: Vec<Option<NodeId>>,
    num_slots: usize,
}

impl GameTree {
    /// Build the tree for every answer of `matrix`
    ///
    /// Nodes are expanded in pre-order, children in ascending score order.
    /// Every leaf is checked to hold one answer that is in its guess pool
    /// and scores all Correct against itself, and every answer must end in
    /// exactly one leaf.
    ///
    /// # Errors
    /// Returns [`NerdleError::InvalidConfig`] for bad parameters and
    /// [`NerdleError::InvariantViolation`] if any check fails.
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::analysis::{GameTree, TreeConfig};
    /// use nerdle_solver::matrix::{InMemoryMatrix, ScoreMatrix};
    ///
    /// let matrix = InMemoryMatrix::for_slots(6).unwrap();
    /// let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();
    /// assert_eq!(tree.num_leaves(), matrix.len());
    /// ```
    pub fn build(matrix: &dyn ScoreMatrix, config: &TreeConfig) -> Result<Self, NerdleError> {
        config.validate()?;
        TreeBuilder::new(matrix, config).build()
    }

    #[must_use]
    pub fn root(&self) -> &GameNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree
    #[must_use]
    pub fn node(&self, id: NodeId) -> &GameNode {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn nodes(&self) -> &[GameNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub const fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn leaves(&self) -> impl Iterator<Item = &GameNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    #[must_use]
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Distance from the root
    #[must_use]
    pub fn depth_of(&self, id: NodeId) -> usize {
        std::iter::successors(self.node(id).parent, |&p| self.node(p).parent).count()
    }

    /// Guesses made from the root down to `id`, root first
    ///
    /// A leaf's path ends with its answer.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<usize> {
        let mut path: Vec<usize> = std::iter::successors(Some(id), |&n| self.node(n).parent)
            .filter_map(|n| self.node(n).guess)
            .collect();
        path.reverse();
        path
    }

    /// Guesses that solve `answer`, or `None` if it is not in the universe
    #[must_use]
    pub fn solution_path(&self, answer: usize) -> Option<Vec<usize>> {
        let leaf = (*self.leaf_of.get(answer)?)?;
        Some(self.path_to(leaf))
    }
}

impl fmt::Display for GameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node[{}: guesses={} answers={}",
            self.id.0,
            self.guesses.len(),
            self.answers.len()
        )?;
        if let Some(guess) = self.guess {
            write!(f, " guess={guess}")?;
        }
        if let Some(estimate) = self.estimate {
            write!(f, " worst={estimate:.4}{}", if self.exact { "" } else { "~" })?;
        }
        write!(f, " children={}]", self.children.len())
    }
}

/// Chosen guess at a node and its worst-case fraction
struct Choice {
    guess: usize,
    estimate: f64,
    exact: bool,
}

struct TreeBuilder<'a> {
    matrix: &'a dyn ScoreMatrix,
    config: &'a TreeConfig,
    rng: StdRng,
    nodes: Vec<GameNode>,
    leaf_of: Vec<Option<NodeId>>,
}

impl<'a> TreeBuilder<'a> {
    fn new(matrix: &'a dyn ScoreMatrix, config: &'a TreeConfig) -> Self {
        Self {
            matrix,
            config,
            rng: StdRng::seed_from_u64(config.seed),
            nodes: Vec::new(),
            leaf_of: vec![None; matrix.len()],
        }
    }

    fn build(mut self) -> Result<GameTree, NerdleError> {
        let n = self.matrix.len();
        let universe: Rc<[usize]> = (0..n).collect();
        self.nodes.push(GameNode {
            id: NodeId::ROOT,
            parent: None,
            hint: None,
            guesses: Rc::clone(&universe),
            answers: universe.to_vec(),
            guess: None,
            estimate: None,
            exact: false,
            children: BTreeMap::new(),
        });

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            self.process(id)?;
            if self.config.verbose {
                let depth = std::iter::successors(self.nodes[id.0].parent, |&p| {
                    self.nodes[p.0].parent
                })
                .count();
                println!("{}{}", "  ".repeat(depth), self.nodes[id.0]);
            }
            stack.extend(self.nodes[id.0].children.values().rev());
        }

        let leaves = self.leaf_of.iter().filter(|leaf| leaf.is_some()).count();
        if leaves != n {
            return Err(NerdleError::InvariantViolation(format!(
                "{leaves} leaves for a universe of {n}"
            )));
        }

        Ok(GameTree {
            nodes: self.nodes,
            leaf_of: self.leaf_of,
            num_slots: self.matrix.num_slots(),
        })
    }

    fn process(&mut self, id: NodeId) -> Result<(), NerdleError> {
        if self.nodes[id.0].answers.len() == 1 {
            return self.verify_leaf(id);
        }

        let pool = self.guess_pool(id);
        let view = MatrixView::new(self.matrix, self.nodes[id.0].answers.clone());
        let choice = self.choose(&pool, &view)?;
        let buckets = partition(&view, choice.guess);

        let mut children = BTreeMap::new();
        for (score, locals) in buckets {
            let child = NodeId(self.nodes.len());
            self.nodes.push(GameNode {
                id: child,
                parent: Some(id),
                hint: Some(score),
                guesses: Rc::clone(&pool),
                answers: locals.iter().map(|&l| view.answer(l)).collect(),
                guess: None,
                estimate: None,
                exact: false,
                children: BTreeMap::new(),
            });
            children.insert(score, child);
        }

        let node = &mut self.nodes[id.0];
        node.guesses = pool;
        node.guess = Some(choice.guess);
        node.estimate = Some(choice.estimate);
        node.exact = choice.exact;
        node.children = children;
        Ok(())
    }

    fn verify_leaf(&mut self, id: NodeId) -> Result<(), NerdleError> {
        let node = &mut self.nodes[id.0];
        let answer = node.answers[0];
        let code = self.matrix.code_at(answer);

        if node.guesses.binary_search(&answer).is_err() {
            return Err(NerdleError::InvariantViolation(format!(
                "leaf answer {code} is not in its guess pool"
            )));
        }
        if !self
            .matrix
            .entry(answer, answer)
            .is_all_correct(self.matrix.num_slots())
        {
            return Err(NerdleError::InvariantViolation(format!(
                "{code} does not score all Correct against itself"
            )));
        }
        if self.leaf_of[answer].replace(id).is_some() {
            return Err(NerdleError::InvariantViolation(format!(
                "{code} reached more than one leaf"
            )));
        }

        node.guess = Some(answer);
        node.estimate = Some(1.0);
        node.exact = true;
        Ok(())
    }

    /// The node's guess pool, coarsened when the node is small enough
    fn guess_pool(&mut self, id: NodeId) -> Rc<[usize]> {
        let node = &self.nodes[id.0];
        let n = self.matrix.len();
        let factor = self.config.guess_coarsening_factor;

        let small = node.answers.len() as f64 <= self.config.coarsening_threshold * n as f64;
        if factor <= 1.0 || !small {
            return Rc::clone(&node.guesses);
        }

        let mut is_answer = vec![false; n];
        for &a in &node.answers {
            is_answer[a] = true;
        }
        let others: Vec<usize> = node
            .guesses
            .iter()
            .copied()
            .filter(|&g| !is_answer[g])
            .collect();
        let amount = (((n - node.answers.len()) as f64 / factor) as usize).min(others.len());

        let mut pool = node.answers.clone();
        pool.extend(
            index::sample(&mut self.rng, others.len(), amount)
                .into_iter()
                .map(|i| others[i]),
        );
        pool.sort_unstable();
        pool.into()
    }

    fn choose(&mut self, pool: &[usize], view: &MatrixView<'_>) -> Result<Choice, NerdleError> {
        match self.config.strategy {
            BucketStrategy::Multilevel(sampling) if view.len() > sampling.min_sample_size => {
                let choice = self.choose_sampled(pool, view, &sampling)?;
                if partition(view, choice.guess).len() > 1 {
                    return Ok(choice);
                }
                Self::choose_exact(pool, view)
            }
            _ => Self::choose_exact(pool, view),
        }
    }

    fn choose_exact(pool: &[usize], view: &MatrixView<'_>) -> Result<Choice, NerdleError> {
        let (guess, max) = select_best_guess(pool, view)
            .ok_or_else(|| NerdleError::InvariantViolation("empty guess pool".to_string()))?;
        if max >= view.len() {
            return Err(NerdleError::InvariantViolation(format!(
                "no guess splits a node of {} answers",
                view.len()
            )));
        }
        Ok(Choice {
            guess,
            estimate: max as f64 / view.len() as f64,
            exact: true,
        })
    }

    fn choose_sampled(
        &mut self,
        pool: &[usize],
        view: &MatrixView<'_>,
        sampling: &SamplingConfig,
    ) -> Result<Choice, NerdleError> {
        let estimates = min_biased_multilevel_sampling(
            pool.len(),
            view.len(),
            |row, cols| sampled_max_bucket_size(view, pool[row], cols) as f64 / cols.len() as f64,
            sampling,
            &mut self.rng,
        )?;

        let (guess, estimate) = select_by_estimate(pool, &estimates.values, view)
            .ok_or_else(|| NerdleError::InvariantViolation("empty guess pool".to_string()))?;
        let row = pool
            .iter()
            .position(|&g| g == guess)
            .expect("selected guess comes from the pool");
        Ok(Choice {
            guess,
            estimate,
            exact: estimates.exact[row],
        })
    }
}

/// Worst-case bucket fraction of `guess` over the view, computed exactly
#[must_use]
pub fn exact_worst_fraction(view: &MatrixView<'_>, guess: usize) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    max_bucket_size(view, guess) as f64 / view.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Code;
    use crate::matrix::InMemoryMatrix;

    fn matrix() -> InMemoryMatrix {
        InMemoryMatrix::for_slots(6).unwrap()
    }

    fn check_structure(tree: &GameTree, matrix: &InMemoryMatrix) {
        assert_eq!(tree.num_leaves(), matrix.len());

        for node in tree.nodes() {
            if let Some(parent) = node.parent() {
                let parent = tree.node(parent);
                assert!(node.answers().iter().all(|a| parent.answers().contains(a)));
                let guess = parent.guess().unwrap();
                for &a in node.answers() {
                    assert_eq!(Some(matrix.entry(guess, a)), node.hint());
                }
            }
            if !node.is_leaf() {
                let total: usize = node
                    .children()
                    .values()
                    .map(|&c| tree.node(c).answers().len())
                    .sum();
                assert_eq!(total, node.answers().len());
                assert!(node.children().len() > 1);
            }
        }
    }

    #[test]
    fn exact_tree_covers_universe() {
        let matrix = matrix();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();

        check_structure(&tree, &matrix);
        assert_eq!(tree.root().answers().len(), 206);
        assert_eq!(tree.root().guesses().len(), 206);
        assert!(tree.root().is_exact());
    }

    #[test]
    fn root_guess_matches_solver_opener_rule() {
        let matrix = matrix();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();

        let pool: Vec<usize> = (0..matrix.len()).collect();
        let (best, max) = select_best_guess(&pool, &matrix.view()).unwrap();
        assert_eq!(tree.root().guess(), Some(best));
        assert_eq!(tree.root().estimate(), Some(max as f64 / 206.0));
        assert_eq!(
            exact_worst_fraction(&matrix.view(), best),
            tree.root().estimate().unwrap()
        );
    }

    #[test]
    fn coarsened_tree_covers_universe() {
        let matrix = matrix();
        let config = TreeConfig::exact().with_coarsening(4.0, 0.1).with_seed(11);
        let tree = GameTree::build(&matrix, &config).unwrap();

        check_structure(&tree, &matrix);
        let coarsened = tree
            .nodes()
            .iter()
            .filter(|n| n.guesses().len() < matrix.len())
            .count();
        assert!(coarsened > 0);
        for node in tree.nodes() {
            assert!(node.answers().iter().all(|a| node.guesses().binary_search(a).is_ok()));
        }
    }

    #[test]
    fn multilevel_tree_covers_universe() {
        let matrix = matrix();
        let config =
            TreeConfig::exact().with_strategy(BucketStrategy::Multilevel(SamplingConfig::new(
                50, 1.7,
            )));
        let tree = GameTree::build(&matrix, &config).unwrap();

        check_structure(&tree, &matrix);
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let matrix = matrix();
        let config = TreeConfig::default()
            .with_strategy(BucketStrategy::Multilevel(SamplingConfig::new(40, 1.5)))
            .with_seed(5);
        let a = GameTree::build(&matrix, &config).unwrap();
        let b = GameTree::build(&matrix, &config).unwrap();

        let guesses = |t: &GameTree| t.nodes().iter().map(GameNode::guess).collect::<Vec<_>>();
        assert_eq!(guesses(&a), guesses(&b));
    }

    #[test]
    fn solution_paths_end_at_answer() {
        let matrix = matrix();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();

        for answer in 0..matrix.len() {
            let path = tree.solution_path(answer).unwrap();
            assert_eq!(path.first(), tree.root().guess().as_ref());
            assert_eq!(path.last(), Some(&answer));
        }
        assert_eq!(tree.solution_path(matrix.len()), None);
    }

    #[test]
    fn path_length_is_depth_plus_one_at_leaves() {
        let matrix = matrix();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();

        for leaf in tree.leaves() {
            assert_eq!(tree.path_to(leaf.id()).len(), tree.depth_of(leaf.id()) + 1);
        }
        assert_eq!(tree.depth_of(NodeId::ROOT), 0);
    }

    #[test]
    fn small_universe_tree() {
        let codes: Vec<Code> = ["1+2=3", "2+1=3", "3-1=2", "3-2=1"]
            .iter()
            .map(|t| Code::new(*t).unwrap())
            .collect();
        let matrix = InMemoryMatrix::new(codes).unwrap();
        let tree = GameTree::build(&matrix, &TreeConfig::exact()).unwrap();

        assert_eq!(tree.num_leaves(), 4);
        assert_eq!(tree.num_slots(), 5);
    }

    #[test]
    fn rejects_invalid_config() {
        let matrix = matrix();
        let bad_factor = TreeConfig::exact().with_coarsening(0.5, 0.1);
        assert!(GameTree::build(&matrix, &bad_factor).is_err());

        let bad_threshold = TreeConfig::exact().with_coarsening(2.0, 1.5);
        assert!(GameTree::build(&matrix, &bad_threshold).is_err());

        let bad_sampling =
            TreeConfig::exact().with_strategy(BucketStrategy::Multilevel(SamplingConfig::new(
                10, 3.0,
            )));
        assert!(matches!(
            GameTree::build(&matrix, &bad_sampling),
            Err(NerdleError::InvalidConfig(_))
        ));
    }
}
