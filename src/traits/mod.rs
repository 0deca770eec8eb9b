pub mod bool_to_tensor;
pub mod to_tensor;
pub mod trainable;

pub use bool_to_tensor::BoolToTensor;
pub use to_tensor::ToTensor;
pub use trainable::{Checkpointable, TrainableAgent, TrainingMetrics};
