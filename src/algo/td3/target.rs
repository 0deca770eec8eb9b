//! Pieces of the TD3 critic target

use burn::{prelude::*, tensor::backend::Backend};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// One-step Bellman targets `r + γ · next_q`, with the bootstrap term dropped
/// for terminal transitions
///
/// All tensors are `[batch, 1]`. For a terminal row the result is exactly the
/// reward.
pub fn bellman_targets<B: Backend>(
    rewards: Tensor<B, 2>,
    next_q: Tensor<B, 2>,
    terminals: Tensor<B, 2, Bool>,
    discount: f32,
) -> Tensor<B, 2> {
    rewards + next_q.mul_scalar(discount).mask_fill(terminals, 0.0)
}

/// Clipped Gaussian noise for target policy smoothing, `[batch, action_dim]`
pub fn smoothing_noise<B: Backend, R: Rng + ?Sized>(
    rng: &mut R,
    [batch, action_dim]: [usize; 2],
    std: f32,
    clip: f32,
    device: &B::Device,
) -> Tensor<B, 2> {
    let values = gaussian(rng, batch * action_dim, std)
        .into_iter()
        .map(|x| x.clamp(-clip, clip))
        .collect::<Vec<_>>();

    Tensor::<B, 1>::from_floats(values.as_slice(), device).reshape([batch, action_dim])
}

/// `len` independent samples of N(0, std²)
pub(crate) fn gaussian<R: Rng + ?Sized>(rng: &mut R, len: usize, std: f32) -> Vec<f32> {
    match Normal::new(0.0_f32, std) {
        Ok(normal) if std > 0.0 => (0..len).map(|_| normal.sample(rng)).collect(),
        // Zero (or invalid) std means no noise
        _ => vec![0.0; len],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use rand::{rngs::StdRng, SeedableRng};

    fn column(values: &[f32]) -> Tensor<NdArray, 2> {
        Tensor::<NdArray, 1>::from_floats(values, &NdArrayDevice::default()).reshape([values.len(), 1])
    }

    fn flags(values: &[bool]) -> Tensor<NdArray, 2, Bool> {
        Tensor::<NdArray, 1, Bool>::from_data(
            TensorData::new(values.to_vec(), [values.len()]),
            &NdArrayDevice::default(),
        )
        .reshape([values.len(), 1])
    }

    #[test]
    fn non_terminal_target_bootstraps() {
        let target = bellman_targets(column(&[5.0]), column(&[10.0]), flags(&[false]), 0.99);
        let value = target.into_data().as_slice::<f32>().unwrap()[0];

        assert!((value - 14.9).abs() < 1e-5, "got {value}");
    }

    #[test]
    fn terminal_target_is_exactly_the_reward() {
        let rewards = [5.0, -1.25, 0.3];
        let target = bellman_targets(
            column(&rewards),
            column(&[10.0, 1e6, -7.0]),
            flags(&[true, true, true]),
            0.99,
        );

        assert_eq!(target.into_data().as_slice::<f32>().unwrap(), &rewards);
    }

    #[test]
    fn mixed_batch_masks_only_terminal_rows() {
        let target = bellman_targets(
            column(&[1.0, 1.0]),
            column(&[2.0, 2.0]),
            flags(&[true, false]),
            0.5,
        );

        assert_eq!(target.into_data().as_slice::<f32>().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn smoothing_noise_respects_clip() {
        let mut rng = StdRng::seed_from_u64(1);
        let noise: Tensor<NdArray, 2> =
            smoothing_noise(&mut rng, [64, 3], 10.0, 0.5, &NdArrayDevice::default());

        assert_eq!(noise.dims(), [64, 3]);
        for &x in noise.into_data().as_slice::<f32>().unwrap() {
            assert!((-0.5..=0.5).contains(&x));
        }
    }

    #[test]
    fn zero_std_gives_no_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian(&mut rng, 4, 0.0), vec![0.0; 4]);
    }
}
