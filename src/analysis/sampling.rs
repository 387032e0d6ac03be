//! Min-biased multilevel sampling
//!
//! Estimates a per-row quantity that depends only on the multiset of a row's
//! values (such as the largest bucket fraction) when only small values need
//! to be accurate. Each level scores the active rows on a random column
//! sample, keeps the smaller half and grows the sample, so the total work
//! stays linear in the matrix size while the rows that can win a minimum are
//! eventually scored on every column.

use crate::core::NerdleError;
use rand::Rng;
use rand::seq::index;

/// Tuning for [`min_biased_multilevel_sampling`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Columns in the first sample; smaller inputs are scored exactly (default: 2000)
    pub min_sample_size: usize,

    /// Sample growth per level, strictly between 1 and 2 (default: 1.7)
    pub growth_factor: f64,
}

impl SamplingConfig {
    #[must_use]
    pub const fn new(min_sample_size: usize, growth_factor: f64) -> Self {
        Self {
            min_sample_size,
            growth_factor,
        }
    }

    /// Check the parameters
    ///
    /// # Errors
    /// Returns [`NerdleError::InvalidConfig`] if the sample size is zero or the
    /// growth factor is not strictly between 1 and 2.
    pub fn validate(&self) -> Result<(), NerdleError> {
        if self.min_sample_size == 0 {
            return Err(NerdleError::InvalidConfig(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        if !(self.growth_factor > 1.0 && self.growth_factor < 2.0) {
            return Err(NerdleError::InvalidConfig(format!(
                "growth_factor must be in (1, 2), got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }

    /// Sample size of the level after one of `size` columns, capped at `cols`
    fn grow(&self, size: usize, cols: usize) -> usize {
        let grown = (self.growth_factor * size as f64) as usize;
        grown.max(size + 1).min(cols)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(2000, 1.7)
    }
}

/// Per-row estimates from a sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct Estimates {
    /// Latest estimate of each row
    pub values: Vec<f64>,
    /// Whether the row's estimate was computed on every column
    pub exact: Vec<bool>,
    /// Sampling levels run
    pub levels: usize,
}

impl Estimates {
    /// Row with the smallest estimate; ties go to the lowest row
    #[must_use]
    pub fn argmin(&self) -> Option<usize> {
        (0..self.values.len()).min_by(|&a, &b| {
            self.values[a]
                .total_cmp(&self.values[b])
                .then(a.cmp(&b))
        })
    }
}

/// Estimate `quantity` for every row of a `rows × cols` matrix
///
/// `quantity(row, columns)` evaluates one row restricted to the given column
/// indices. With at most `min_sample_size` columns every row is scored
/// exactly. Otherwise each level scores the active rows on a fresh random
/// sample drawn without replacement, keeps the `⌊len / 2⌋` rows with the
/// smallest estimates (ties by row index) and multiplies the sample size by
/// `growth_factor`. Rows still active when the sample reaches all columns
/// are exact; the rest keep the estimate from the last level they were in.
///
/// # Errors
/// Returns [`NerdleError::InvalidConfig`] if `config` is invalid.
///
/// # Examples
/// ```
/// use nerdle_solver::analysis::{SamplingConfig, min_biased_multilevel_sampling};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// // Row r has value r in every column
/// let quantity = |row: usize, cols: &[usize]| if cols.is_empty() { 0.0 } else { row as f64 };
/// let config = SamplingConfig::new(10, 1.5);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let estimates = min_biased_multilevel_sampling(64, 100, quantity, &config, &mut rng).unwrap();
/// assert_eq!(estimates.argmin(), Some(0));
/// assert!(estimates.exact[0]);
/// ```
pub fn min_biased_multilevel_sampling<Q, R>(
    rows: usize,
    cols: usize,
    mut quantity: Q,
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<Estimates, NerdleError>
where
    Q: FnMut(usize, &[usize]) -> f64,
    R: Rng + ?Sized,
{
    config.validate()?;

    let all_cols: Vec<usize> = (0..cols).collect();
    let mut values = vec![0.0; rows];
    let mut exact = vec![false; rows];

    if cols <= config.min_sample_size {
        for (row, value) in values.iter_mut().enumerate() {
            *value = quantity(row, &all_cols);
        }
        exact.fill(true);
        return Ok(Estimates {
            values,
            exact,
            levels: 1,
        });
    }

    let mut active: Vec<usize> = (0..rows).collect();
    let mut sample_size = config.min_sample_size;
    let mut levels = 0;

    while !active.is_empty() {
        levels += 1;
        let full = sample_size == cols;
        let sample = if full {
            all_cols.clone()
        } else {
            index::sample(rng, cols, sample_size).into_vec()
        };

        for &row in &active {
            values[row] = quantity(row, &sample);
            exact[row] = full;
        }
        if full {
            break;
        }

        active.sort_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));
        active.truncate(active.len() / 2);
        sample_size = config.grow(sample_size, cols);
    }

    Ok(Estimates {
        values,
        exact,
        levels,
    })
}
