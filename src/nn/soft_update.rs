//! Polyak averaging of target networks

use burn::{
    module::Param,
    nn::Linear,
    prelude::*,
    tensor::backend::Backend,
};

use super::MLP;

/// Exponential smoothing of one parameter set toward another
///
/// `soft_update` consumes the target and returns `tau * source + (1 - tau) * target`
/// for every matching parameter. `tau = 1` copies the source, `tau = 0` returns
/// the target unchanged.
///
/// ```ignore
/// target_actor = target_actor.soft_update(&actor.valid(), 0.005);
/// ```
pub trait SoftUpdate {
    fn soft_update(self, source: &Self, tau: f32) -> Self;
}

impl<B: Backend> SoftUpdate for MLP<B> {
    fn soft_update(mut self, source: &Self, tau: f32) -> Self {
        for (target_layer, source_layer) in self.layers.iter_mut().zip(source.layers.iter()) {
            soft_update_linear(target_layer, source_layer, tau);
        }
        self
    }
}

fn soft_update_tensor<B: Backend, const D: usize>(
    this: &mut Param<Tensor<B, D>>,
    that: &Param<Tensor<B, D>>,
    tau: f32,
) {
    // detach keeps the autodiff graph from growing across updates
    *this = this
        .clone()
        .map(|tensor| tensor.mul_scalar(1.0 - tau) + that.val().detach().mul_scalar(tau));
}

fn soft_update_linear<B: Backend>(this: &mut Linear<B>, that: &Linear<B>, tau: f32) {
    soft_update_tensor(&mut this.weight, &that.weight, tau);

    if let (Some(b1), Some(b2)) = (&mut this.bias, &that.bias) {
        soft_update_tensor(b1, b2, tau);
    }
}
