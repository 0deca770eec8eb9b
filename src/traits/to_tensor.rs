use burn::{
    prelude::*,
    tensor::{backend::Backend, BasicOps, Element, TensorData},
};

/// A trait for converting host-side batches to tensors
///
/// Values are converted to the backend's element type, so `Vec<f32>` batches
/// work with any float precision.
///
/// Implemented for `Vec<E>` (one value per row) and `Vec<Vec<E>>` (one
/// fixed-length vector per row), which is how [`TransitionBatch`](crate::memory::TransitionBatch)
/// stores its columns.
pub trait ToTensor<B: Backend, const D: usize, K: BasicOps<B>> {
    fn to_tensor(self, device: &B::Device) -> Tensor<B, D, K>;
}

impl<B, E, K> ToTensor<B, 1, K> for Vec<E>
where
    B: Backend,
    E: Element,
    K: BasicOps<B>,
{
    #[inline]
    fn to_tensor(self, device: &B::Device) -> Tensor<B, 1, K> {
        let len = self.len();
        Tensor::from_data(TensorData::new(self, [len]), device)
    }
}

impl<B, E, K> ToTensor<B, 2, K> for Vec<Vec<E>>
where
    B: Backend,
    E: Element,
    K: BasicOps<B>,
{
    /// Rows must all have the same length
    fn to_tensor(self, device: &B::Device) -> Tensor<B, 2, K> {
        let rows = self.len();
        let cols = self.first().map_or(0, Vec::len);
        debug_assert!(self.iter().all(|row| row.len() == cols), "ragged batch");

        let mut flat = Vec::with_capacity(rows * cols);
        for row in &self {
            flat.extend_from_slice(row);
        }

        Tensor::from_data(TensorData::new(flat, [rows, cols]), device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};

    #[test]
    fn test_vec_f32_to_tensor_1d() {
        let device = NdArrayDevice::default();
        let data = vec![1.0_f32, 2.0, 3.0, 4.0];
        let tensor: Tensor<NdArray, 1> = data.to_tensor(&device);

        assert_eq!(tensor.shape().dims, [4]);
        let tensor_data = tensor.to_data();
        assert_eq!(tensor_data.as_slice::<f32>().unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rows_to_tensor_2d() {
        let device = NdArrayDevice::default();

        // A batch of pendulum states
        let states = vec![
            vec![1.0_f32, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
            vec![10.0, 11.0, 12.0],
        ];

        let tensor: Tensor<NdArray, 2> = states.to_tensor(&device);

        assert_eq!(tensor.shape().dims, [4, 3]);

        let tensor_data = tensor.to_data();
        let expected = vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
            10.0, 11.0, 12.0,
        ];
        assert_eq!(tensor_data.as_slice::<f32>().unwrap(), expected.as_slice());
    }

    #[test]
    fn test_single_row_to_tensor_2d() {
        let device = NdArrayDevice::default();

        let states = vec![vec![1.0_f32, 2.0, 3.0]];
        let tensor: Tensor<NdArray, 2> = states.to_tensor(&device);

        assert_eq!(tensor.shape().dims, [1, 3]);
    }
}
