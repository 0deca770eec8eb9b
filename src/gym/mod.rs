//! Reference environments

mod pendulum;

pub use pendulum::Pendulum;
