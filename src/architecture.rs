use crate::error::{NetworkError, Result};

/// Dimension constants of the conv → pool → flatten → dense network.
///
/// The topology is fixed; only these sizes are configurable, and every tensor
/// shape in the pipeline is derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Architecture {
    /// Side length of the square single-channel input image.
    pub input_size: usize,

    /// Number of convolution filters.
    pub filter_count: usize,

    /// Side length of each square filter.
    pub filter_size: usize,

    /// Side length of the pooling window, which is also its stride.
    pub pool_size: usize,

    /// Number of output classes.
    pub classes: usize,
}

impl Default for Architecture {
    fn default() -> Self {
        Architecture {
            input_size: 28,
            filter_count: 8,
            filter_size: 5,
            pool_size: 2,
            classes: 10,
        }
    }
}

impl Architecture {
    /// Rejects constants that cannot describe a consistent set of tensors.
    pub fn validate(&self) -> Result<()> {
        let constants = [
            ("input_size", self.input_size),
            ("filter_count", self.filter_count),
            ("filter_size", self.filter_size),
            ("pool_size", self.pool_size),
            ("classes", self.classes),
        ];
        if let Some((name, _)) = constants.iter().find(|(_, value)| *value == 0) {
            return Err(NetworkError::InvalidArchitecture(format!("{name} must be non-zero")));
        }

        if self.filter_size > self.input_size {
            return Err(NetworkError::InvalidArchitecture(format!(
                "filter size {} exceeds input size {}",
                self.filter_size, self.input_size
            )));
        }

        let feature_size = self.feature_size();
        if feature_size % self.pool_size != 0 {
            return Err(NetworkError::InvalidArchitecture(format!(
                "feature map size {} is not divisible by pool size {}",
                feature_size, self.pool_size
            )));
        }

        Ok(())
    }

    /// Side length of a feature map after valid, stride-1 convolution.
    pub fn feature_size(&self) -> usize {
        self.input_size - self.filter_size + 1
    }

    /// Side length of a pooled map.
    pub fn pooled_size(&self) -> usize {
        self.feature_size() / self.pool_size
    }

    pub fn flat_len(&self) -> usize {
        self.filter_count * self.pooled_size() * self.pooled_size()
    }

    pub fn input_shape(&self) -> [usize; 3] {
        [1, self.input_size, self.input_size]
    }

    pub fn filter_bank_shape(&self) -> [usize; 3] {
        [self.filter_count, self.filter_size, self.filter_size]
    }

    pub fn feature_map_shape(&self) -> [usize; 3] {
        [self.filter_count, self.feature_size(), self.feature_size()]
    }

    pub fn pooled_shape(&self) -> [usize; 3] {
        [self.filter_count, self.pooled_size(), self.pooled_size()]
    }

    pub fn flat_shape(&self) -> [usize; 2] {
        [self.flat_len(), 1]
    }

    pub fn dense_weights_shape(&self) -> [usize; 2] {
        [self.classes, self.flat_len()]
    }

    pub fn logits_shape(&self) -> [usize; 2] {
        [self.classes, 1]
    }
}
