use ndarray::{Array1, Array2, Array3};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::architecture::Architecture;
use crate::error::{check_shape, NetworkError, Result};

/// Trained parameters of the network, checked against an [`Architecture`]
/// when built.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    architecture: Architecture,
    filter_bank: Array3<f32>,
    filter_bias: Array1<f32>,
    dense_weights: Array2<f32>,
    dense_bias: Array1<f32>,
}

impl Weights {
    /// Builds a weight set, rejecting any tensor whose shape disagrees with
    /// `architecture`.
    ///
    /// # Arguments
    ///
    /// * `filter_bank` - `filter_count × filter_size × filter_size` convolution kernels
    /// * `filter_bias` - one bias per filter
    /// * `dense_weights` - `classes × flat_len`, rows indexed by class
    /// * `dense_bias` - one bias per class
    pub fn new(
        architecture: Architecture,
        filter_bank: Array3<f32>,
        filter_bias: Array1<f32>,
        dense_weights: Array2<f32>,
        dense_bias: Array1<f32>,
    ) -> Result<Self> {
        architecture.validate()?;

        let weights = Weights {
            architecture,
            filter_bank,
            filter_bias,
            dense_weights,
            dense_bias,
        };
        weights.check(&architecture)?;
        Ok(weights)
    }

    /// Builds a weight set from row-major flat buffers, as a deserializer
    /// would hand them over.
    pub fn from_vecs(
        architecture: Architecture,
        filter_bank: Vec<f32>,
        filter_bias: Vec<f32>,
        dense_weights: Vec<f32>,
        dense_bias: Vec<f32>,
    ) -> Result<Self> {
        architecture.validate()?;

        Self::new(
            architecture,
            Array3::from_shape_vec(architecture.filter_bank_shape(), filter_bank)?,
            Array1::from_vec(filter_bias),
            Array2::from_shape_vec(architecture.dense_weights_shape(), dense_weights)?,
            Array1::from_vec(dense_bias),
        )
    }

    pub fn zeros(architecture: Architecture) -> Result<Self> {
        architecture.validate()?;

        Ok(Weights {
            architecture,
            filter_bank: Array3::zeros(architecture.filter_bank_shape()),
            filter_bias: Array1::zeros(architecture.filter_count),
            dense_weights: Array2::zeros(architecture.dense_weights_shape()),
            dense_bias: Array1::zeros(architecture.classes),
        })
    }

    /// He-normal initialization: weights drawn from `N(0, sqrt(2 / fan_in))`,
    /// biases zero. The fan-in of a filter is its kernel area, the fan-in of a
    /// dense row is the flattened vector length.
    pub fn he_normal<R: Rng + ?Sized>(architecture: Architecture, rng: &mut R) -> Result<Self> {
        architecture.validate()?;

        let filter_fan_in = architecture.filter_size * architecture.filter_size;
        let filter_dist = he_distribution(filter_fan_in)?;
        let filter_bank = Array3::from_shape_fn(architecture.filter_bank_shape(), |_| {
            filter_dist.sample(&mut *rng)
        });

        let dense_dist = he_distribution(architecture.flat_len())?;
        let dense_weights = Array2::from_shape_fn(architecture.dense_weights_shape(), |_| {
            dense_dist.sample(&mut *rng)
        });

        Ok(Weights {
            architecture,
            filter_bank,
            filter_bias: Array1::zeros(architecture.filter_count),
            dense_weights,
            dense_bias: Array1::zeros(architecture.classes),
        })
    }

    fn check(&self, architecture: &Architecture) -> Result<()> {
        check_shape(
            "filter bank",
            &architecture.filter_bank_shape(),
            self.filter_bank.shape(),
        )?;
        check_shape(
            "filter bias",
            &[architecture.filter_count],
            self.filter_bias.shape(),
        )?;
        check_shape(
            "dense weights",
            &architecture.dense_weights_shape(),
            self.dense_weights.shape(),
        )?;
        check_shape("dense bias", &[architecture.classes], self.dense_bias.shape())
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    pub fn filter_bank(&self) -> &Array3<f32> {
        &self.filter_bank
    }

    pub fn filter_bias(&self) -> &Array1<f32> {
        &self.filter_bias
    }

    pub fn dense_weights(&self) -> &Array2<f32> {
        &self.dense_weights
    }

    pub fn dense_bias(&self) -> &Array1<f32> {
        &self.dense_bias
    }

    /// Total number of trainable scalars.
    pub fn parameter_count(&self) -> usize {
        self.filter_bank.len() + self.filter_bias.len() + self.dense_weights.len() + self.dense_bias.len()
    }
}

fn he_distribution(fan_in: usize) -> Result<Normal<f32>> {
    let std_dev = (2.0 / fan_in as f32).sqrt();
    Normal::new(0.0, std_dev).map_err(|e| NetworkError::InvalidArchitecture(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zeros_shapes() {
        let weights = Weights::zeros(Architecture::default()).unwrap();

        assert_eq!(weights.filter_bank().shape(), &[8, 5, 5]);
        assert_eq!(weights.filter_bias().len(), 8);
        assert_eq!(weights.dense_weights().shape(), &[10, 1152]);
        assert_eq!(weights.dense_bias().len(), 10);
    }

    #[test]
    fn test_parameter_count() {
        let weights = Weights::zeros(Architecture::default()).unwrap();

        // 8*5*5 + 8 + 10*1152 + 10
        assert_eq!(weights.parameter_count(), 200 + 8 + 11520 + 10);
    }

    #[test]
    fn test_rejects_transposed_dense_weights() {
        let arch = Architecture::default();
        let result = Weights::new(
            arch,
            Array3::zeros((8, 5, 5)),
            Array1::zeros(8),
            Array2::zeros((1152, 10)),
            Array1::zeros(10),
        );

        match result {
            Err(NetworkError::ShapeMismatch { tensor, expected, actual }) => {
                assert_eq!(tensor, "dense weights");
                assert_eq!(expected, vec![10, 1152]);
                assert_eq!(actual, vec![1152, 10]);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_wrong_bias_length() {
        let arch = Architecture::default();
        let result = Weights::new(
            arch,
            Array3::zeros((8, 5, 5)),
            Array1::zeros(7),
            Array2::zeros((10, 1152)),
            Array1::zeros(10),
        );
        assert!(matches!(
            result,
            Err(NetworkError::ShapeMismatch { tensor: "filter bias", .. })
        ));
    }

    #[test]
    fn test_from_vecs_rejects_short_buffer() {
        let arch = Architecture::default();
        let result = Weights::from_vecs(
            arch,
            vec![0.0; 199],
            vec![0.0; 8],
            vec![0.0; 11520],
            vec![0.0; 10],
        );
        assert!(matches!(result, Err(NetworkError::Shape(_))));
    }

    #[test]
    fn test_from_vecs_row_major() {
        let arch = Architecture::default();
        let filter_bank: Vec<f32> = (0..200).map(|i| i as f32).collect();
        let weights = Weights::from_vecs(
            arch,
            filter_bank,
            vec![0.0; 8],
            vec![0.0; 11520],
            vec![0.0; 10],
        )
        .unwrap();

        // index = 25*z + 5*row + col
        assert_eq!(weights.filter_bank()[[1, 2, 3]], 38.0);
    }

    #[test]
    fn test_he_normal_is_seeded() {
        let arch = Architecture::default();
        let a = Weights::he_normal(arch, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Weights::he_normal(arch, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a, b);
        assert!(a.filter_bank().iter().any(|&w| w != 0.0));
        assert!(a.dense_bias().iter().all(|&b| b == 0.0));
    }
}
