mod activation;
mod architecture;
mod error;
mod model;
mod weights;

pub mod layers;

pub use activation::{relu, softmax};
pub use architecture::Architecture;
pub use error::{NetworkError, Result};
pub use model::Model;
pub use weights::Weights;
