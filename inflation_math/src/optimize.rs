//! Parameter selection for damped-trend smoothing
//!
//! The smoothing constants are chosen by exhaustive search over a fixed
//! grid, keeping the combination with the smallest one-step squared error.

use crate::forecasting::{DampedTrendSmoothing, SmoothingFit};
use crate::{MathError, Result};

/// Candidate values for each smoothing parameter
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingGrid {
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub phis: Vec<f64>,
}

impl Default for SmoothingGrid {
    fn default() -> Self {
        let steps: Vec<f64> = (1..=19).map(|i| i as f64 * 0.05).collect();
        Self {
            alphas: steps.clone(),
            betas: steps,
            phis: vec![0.80, 0.85, 0.90, 0.95, 0.98],
        }
    }
}

impl SmoothingGrid {
    /// Number of parameter combinations
    pub fn len(&self) -> usize {
        self.alphas.len() * self.betas.len() * self.phis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Best smoother found by the search together with its fit
#[derive(Debug, Clone)]
pub struct OptimizedSmoothing {
    pub smoother: DampedTrendSmoothing,
    pub fit: SmoothingFit,
    /// Combinations that produced a finite error
    pub evaluated: usize,
}

/// Search `grid` for the damped smoother that minimises in-sample SSE.
///
/// Ties keep the first combination in grid order. Fails when no
/// combination yields a finite fit.
pub fn optimize_damped(values: &[f64], grid: &SmoothingGrid) -> Result<OptimizedSmoothing> {
    if grid.is_empty() {
        return Err(MathError::InvalidInput(
            "Smoothing grid has no candidates".to_string(),
        ));
    }

    let mut best: Option<(DampedTrendSmoothing, SmoothingFit)> = None;
    let mut evaluated = 0;
    let mut last_error = None;

    for &alpha in &grid.alphas {
        for &beta in &grid.betas {
            for &phi in &grid.phis {
                let smoother = DampedTrendSmoothing::new(alpha, beta, phi)?;
                match smoother.filter(values) {
                    Ok(fit) => {
                        evaluated += 1;
                        let better = match &best {
                            Some((_, current)) => fit.sse < current.sse,
                            None => true,
                        };
                        if better {
                            best = Some((smoother, fit));
                        }
                    }
                    // Short or non-finite input fails identically for every candidate
                    Err(err @ MathError::InsufficientData(_))
                    | Err(err @ MathError::InvalidInput(_)) => return Err(err),
                    Err(err) => last_error = Some(err),
                }
            }
        }
    }

    match best {
        Some((smoother, fit)) => Ok(OptimizedSmoothing {
            smoother,
            fit,
            evaluated,
        }),
        None => Err(last_error.unwrap_or_else(|| {
            MathError::CalculationError("No smoothing parameters converged".to_string())
        })),
    }
}
