use burn::{prelude::*, tensor::backend::Backend};
use rand::Rng;

use crate::error::{Error, Result};

/// Box-shaped continuous action space `[low, high]`
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl ActionSpace {
    /// Create an action space from per-dimension bounds
    ///
    /// Fails when the bound vectors differ in length, are empty, contain
    /// non-finite values, or when `low > high` for some dimension.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Result<Self> {
        if low.len() != high.len() {
            return Err(Error::DimensionMismatch {
                what: "upper action bound",
                expected: low.len(),
                actual: high.len(),
            });
        }
        if low.is_empty() {
            return Err(Error::InvalidConfig("action space has no dimensions".into()));
        }
        for (i, (l, h)) in low.iter().zip(&high).enumerate() {
            if !l.is_finite() || !h.is_finite() || l > h {
                return Err(Error::InvalidConfig(format!(
                    "invalid bounds [{l}, {h}] for action dimension {i}"
                )));
            }
        }
        Ok(Self { low, high })
    }

    /// Symmetric bounds `[-limit, limit]` on every dimension
    ///
    /// # Panics
    /// If `dim` is zero or `limit` is negative or not finite.
    pub fn symmetric(dim: usize, limit: f32) -> Self {
        assert!(dim > 0, "action space needs at least one dimension");
        assert!(
            limit.is_finite() && limit >= 0.0,
            "action limit must be finite and non-negative, got {limit}"
        );
        Self {
            low: vec![-limit; dim],
            high: vec![limit; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.low.len()
    }

    pub fn low(&self) -> &[f32] {
        &self.low
    }

    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Largest absolute bound over all dimensions, used to scale a tanh policy
    pub fn max_action(&self) -> f32 {
        self.low
            .iter()
            .chain(&self.high)
            .fold(0.0_f32, |acc, x| acc.max(x.abs()))
    }

    /// Draw an action uniformly from the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&l, &h)| if l < h { rng.gen_range(l..h) } else { l })
            .collect()
    }

    /// Clip an action into the box in place
    pub fn clip(&self, action: &mut [f32]) {
        for ((a, &l), &h) in action.iter_mut().zip(&self.low).zip(&self.high) {
            // NaN maps to the lower bound so the result is always inside the box
            *a = if a.is_nan() { l } else { a.clamp(l, h) };
        }
    }

    pub fn contains(&self, action: &[f32]) -> bool {
        action.len() == self.dim()
            && action
                .iter()
                .zip(&self.low)
                .zip(&self.high)
                .all(|((a, l), h)| a >= l && a <= h)
    }

    /// Clip a batch of actions `[batch, action_dim]` into the box
    pub fn clamp_tensor<B: Backend>(&self, actions: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, _] = actions.dims();
        let device = actions.device();
        let low = Tensor::<B, 1>::from_floats(self.low.as_slice(), &device)
            .unsqueeze_dim::<2>(0)
            .repeat_dim(0, batch);
        let high = Tensor::<B, 1>::from_floats(self.high.as_slice(), &device)
            .unsqueeze_dim::<2>(0)
            .repeat_dim(0, batch);

        actions.max_pair(low).min_pair(high)
    }
}
