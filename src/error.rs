use thiserror::Error;

/// Errors raised while assembling a network. The numeric stages themselves
/// never fail once their buffers have been validated.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("shape mismatch for {tensor}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        tensor: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Checks that `actual` matches `expected`, naming the offending tensor otherwise.
pub(crate) fn check_shape(tensor: &'static str, expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch {
            tensor,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}
