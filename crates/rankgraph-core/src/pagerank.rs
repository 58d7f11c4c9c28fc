//! Power-iteration PageRank over an [`AdjacencyStore`], with personalization and dangling-node
//! redistribution. Generalized from a fixed-damping single-pass implementation into a
//! configurable kernel that reports whether and how fast it converged.

use crate::error::{CoreError, Result};
use crate::store::AdjacencyStore;
use tracing::{debug, debug_span, trace, warn};

/// Tunables for a single [`run`] call. `personalization`, `init_score`, and `dangling_weight`,
/// when present, must cover every live node index or [`run`] returns
/// [`CoreError::InvalidInput`].
#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub personalization: Option<Vec<f64>>,
    pub init_score: Option<Vec<f64>>,
    /// Distribution dangling-node mass is redirected to. `None` copies `personalization`.
    pub dangling_weight: Option<Vec<f64>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1.0e-6,
            max_iterations: 100,
            personalization: None,
            init_score: None,
            dangling_weight: None,
        }
    }
}

/// Result of a [`run`] call: the score vector, indexed exactly like the store passed in, plus
/// whether and how fast it converged.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Runs power iteration over every slot in `0..store.slot_count()`. Vacant slots are assigned
/// zero weight and contribute neither rank mass nor out-degree; callers that want to exclude
/// vacant slots should `compact_nodes()` first.
///
/// Convergence is the scaled L1 criterion NetworkX uses: iteration stops once
/// `sum(|r_new[i] - r_old[i]|) < n * tolerance`, where `n` is the number of live nodes.
pub fn run(store: &AdjacencyStore, config: &Config) -> Result<Outcome> {
    let span = debug_span!("pagerank::run", n = store.num_nodes(), m = store.num_edges());
    let _enter = span.enter();

    let slots = store.slot_count();
    let live: Vec<bool> = (0..slots).map(|i| store.is_live(i)).collect();
    let n = store.num_nodes();

    if n == 0 {
        return Ok(Outcome {
            scores: vec![0.0; slots],
            iterations: 0,
            converged: true,
        });
    }

    let personalization = normalize_distribution(
        config.personalization.as_deref(),
        &live,
        slots,
        n,
        "personalization",
    )?;

    let dangling_weight = match config.dangling_weight.as_deref() {
        Some(values) => {
            normalize_distribution(Some(values), &live, slots, n, "dangling_weight")?
        }
        None => personalization.clone(),
    };

    let mut scores =
        normalize_distribution(config.init_score.as_deref(), &live, slots, n, "init_score")?;

    let out_weight: Vec<f64> = (0..slots)
        .map(|i| {
            if !live[i] {
                return 0.0;
            }
            store.out_edges(i).map(|e| e.weight()).sum()
        })
        .collect();

    let mut converged = false;
    let mut last_iter = 0;

    for iter in 1..=config.max_iterations {
        last_iter = iter;
        let dangling_mass: f64 = (0..slots)
            .filter(|&i| live[i] && out_weight[i] == 0.0)
            .map(|i| scores[i])
            .sum();

        let mut next = vec![0.0; slots];
        for src in 0..slots {
            if !live[src] || out_weight[src] == 0.0 {
                continue;
            }
            let contrib = scores[src] / out_weight[src];
            for e in store.out_edges(src) {
                next[e.dst()] += contrib * e.weight();
            }
        }

        for i in 0..slots {
            if !live[i] {
                continue;
            }
            next[i] = config.damping * (next[i] + dangling_mass * dangling_weight[i])
                + (1.0 - config.damping) * personalization[i];
        }

        let delta: f64 = (0..slots)
            .filter(|&i| live[i])
            .map(|i| (next[i] - scores[i]).abs())
            .sum();

        scores = next;
        trace!(iter, delta, "pagerank iteration");

        if delta < n as f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations = last_iter, "pagerank converged");
    } else {
        warn!(
            iterations = last_iter,
            max_iterations = config.max_iterations,
            "pagerank did not converge within max_iterations"
        );
    }

    Ok(Outcome {
        scores,
        iterations: last_iter,
        converged,
    })
}

/// Validates that `values` (if given) covers every live slot with finite non-negative weights,
/// zeroes out vacant slots, and renormalizes to sum to 1 over the live set. Missing input
/// defaults to the uniform distribution over live nodes.
fn normalize_distribution(
    values: Option<&[f64]>,
    live: &[bool],
    slots: usize,
    n: usize,
    field: &str,
) -> Result<Vec<f64>> {
    let mut v = match values {
        Some(values) => {
            if values.len() != slots {
                return Err(CoreError::InvalidInput {
                    reason: format!(
                        "{field} has length {} but the store has {slots} slots",
                        values.len()
                    ),
                });
            }
            values.to_vec()
        }
        None => vec![1.0 / n as f64; slots],
    };

    for (i, &l) in live.iter().enumerate() {
        if !l {
            v[i] = 0.0;
            continue;
        }
        if !v[i].is_finite() || v[i] < 0.0 {
            return Err(CoreError::InvalidInput {
                reason: format!("{field}[{i}] = {} is not finite and non-negative", v[i]),
            });
        }
    }

    let sum: f64 = v.iter().sum();
    if sum <= 0.0 {
        return Err(CoreError::InvalidInput {
            reason: format!("{field} sums to {sum}, must be positive"),
        });
    }
    for (x, &l) in v.iter_mut().zip(live) {
        if l {
            *x /= sum;
        }
    }
    Ok(v)
}
