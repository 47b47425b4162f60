use log::{debug, trace, warn};
use ndarray::{Array1, Array2, Array3, ArrayView3};

use crate::architecture::Architecture;
use crate::error::{check_shape, NetworkError, Result};
use crate::layers::{conv2d, dense, flatten, max_pool};
use crate::weights::Weights;

/// One conv → pool → flatten → dense classifier together with every buffer
/// its forward pass writes.
///
/// Buffers are allocated once at construction and overwritten by each call to
/// [`Model::forward`]. Each stage writes exactly one of them.
#[derive(Debug, Clone)]
pub struct Model {
    architecture: Architecture,
    weights: Weights,
    input: Array3<f32>,
    feature_map: Array3<f32>,
    pooled: Array3<f32>,
    flat: Array2<f32>,
    logits: Array2<f32>,
    probabilities: Array1<f32>,
}

impl Model {
    /// Create a model from an architecture and weights produced for it.
    ///
    /// Fails if the architecture is inconsistent or if any weight tensor does
    /// not have the shape the architecture requires.
    pub fn new(architecture: Architecture, weights: Weights) -> Result<Self> {
        architecture.validate()?;
        if *weights.architecture() != architecture {
            return Err(NetworkError::InvalidArchitecture(format!(
                "weights were built for {:?}, model expects {:?}",
                weights.architecture(),
                architecture
            )));
        }

        debug!(
            "Building model: {}x{} input, {} filters of {}x{}, {} classes, {} parameters",
            architecture.input_size,
            architecture.input_size,
            architecture.filter_count,
            architecture.filter_size,
            architecture.filter_size,
            architecture.classes,
            weights.parameter_count()
        );

        Ok(Model {
            architecture,
            weights,
            input: Array3::zeros(architecture.input_shape()),
            feature_map: Array3::zeros(architecture.feature_map_shape()),
            pooled: Array3::zeros(architecture.pooled_shape()),
            flat: Array2::zeros(architecture.flat_shape()),
            logits: Array2::zeros(architecture.logits_shape()),
            probabilities: Array1::zeros(architecture.classes),
        })
    }

    /// Run one forward pass over `image` (`1 × input_size × input_size`) and
    /// return the class probabilities.
    ///
    /// Non-finite logits are not corrected: overflow in the exponential
    /// surfaces as inf/NaN in the returned probabilities.
    pub fn forward(&mut self, image: ArrayView3<f32>) -> Result<&Array1<f32>> {
        check_shape("input image", &self.architecture.input_shape(), image.shape())?;
        self.input.assign(&image);
        self.run();
        Ok(&self.probabilities)
    }

    /// Same as [`Model::forward`] for a row-major pixel buffer.
    pub fn forward_slice(&mut self, pixels: &[f32]) -> Result<&Array1<f32>> {
        let pixel_count = self.architecture.input_size * self.architecture.input_size;
        check_shape("input image", &[pixel_count], &[pixels.len()])?;
        let image = ArrayView3::from_shape(self.architecture.input_shape(), pixels)?;
        self.forward(image)
    }

    /// Index of the most probable class. Ties resolve to the lowest index.
    pub fn predict(&mut self, image: ArrayView3<f32>) -> Result<usize> {
        let probabilities = self.forward(image)?;

        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = i;
            }
        }
        Ok(best)
    }

    fn run(&mut self) {
        conv2d::forward(
            self.input.view(),
            self.weights.filter_bank().view(),
            self.weights.filter_bias().view(),
            self.feature_map.view_mut(),
        );
        trace!("conv2d: {:?} -> {:?}", self.input.dim(), self.feature_map.dim());

        max_pool::forward(
            self.feature_map.view(),
            self.architecture.pool_size,
            self.pooled.view_mut(),
        );
        trace!("max_pool: {:?} -> {:?}", self.feature_map.dim(), self.pooled.dim());

        flatten::forward(self.pooled.view(), self.flat.view_mut());
        trace!("flatten: {:?} -> {:?}", self.pooled.dim(), self.flat.dim());

        dense::forward(
            self.flat.view(),
            self.weights.dense_weights().view(),
            self.weights.dense_bias().view(),
            self.logits.view_mut(),
            self.probabilities.view_mut(),
        );
        trace!("dense: {:?} -> {:?}", self.flat.dim(), self.probabilities.dim());

        if self.probabilities.iter().any(|p| !p.is_finite()) {
            warn!("Non-finite class probabilities, logits: {:?}", self.logits.column(0));
        }
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Rectified convolution output of the last pass.
    pub fn feature_map(&self) -> &Array3<f32> {
        &self.feature_map
    }

    pub fn pooled(&self) -> &Array3<f32> {
        &self.pooled
    }

    /// Flattened column vector fed to the dense stage.
    pub fn flat(&self) -> &Array2<f32> {
        &self.flat
    }

    pub fn logits(&self) -> &Array2<f32> {
        &self.logits
    }

    pub fn probabilities(&self) -> &Array1<f32> {
        &self.probabilities
    }
}
