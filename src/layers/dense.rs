use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

use crate::activation::softmax;

/// Affine transform `logits[i] = sum_k(weights[i][k] * input[k]) + bias[i]`.
///
/// `weights` is `classes × inputs` and `input` a column vector. The products
/// are accumulated in increasing `k` and the bias is added last.
pub fn affine(
    input: ArrayView2<f32>,
    weights: ArrayView2<f32>,
    bias: ArrayView1<f32>,
    mut logits: ArrayViewMut2<f32>,
) {
    let (classes, inputs) = weights.dim();
    debug_assert_eq!(input.dim(), (inputs, 1));
    debug_assert_eq!(logits.dim(), (classes, 1));
    debug_assert_eq!(bias.len(), classes);

    for i in 0..classes {
        let mut inner = 0.0;
        for k in 0..inputs {
            inner += weights[[i, k]] * input[[k, 0]];
        }
        logits[[i, 0]] = inner + bias[i];
    }
}

/// Dense stage: affine transform into `logits`, then exponential
/// normalization into `probabilities`.
pub fn forward(
    input: ArrayView2<f32>,
    weights: ArrayView2<f32>,
    bias: ArrayView1<f32>,
    mut logits: ArrayViewMut2<f32>,
    probabilities: ArrayViewMut1<f32>,
) {
    affine(input, weights, bias, logits.view_mut());
    softmax(logits.column(0), probabilities);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_unit_row_selects_input_exactly() {
        let input = Array2::from_shape_fn((1152, 1), |(k, _)| 0.001 * k as f32 + 0.37);
        let mut weights = Array2::<f32>::zeros((10, 1152));
        weights[[4, 517]] = 1.0;
        let bias = Array1::zeros(10);
        let mut logits = Array2::zeros((10, 1));

        affine(input.view(), weights.view(), bias.view(), logits.view_mut());

        assert_eq!(logits[[4, 0]], input[[517, 0]]);
        for i in (0..10).filter(|&i| i != 4) {
            assert_eq!(logits[[i, 0]], 0.0);
        }
    }

    #[test]
    fn test_affine_hand_computed() {
        let input = array![[1.0], [2.0], [3.0]];
        let weights = array![[1.0, 0.0, -1.0], [0.5, 0.5, 0.5]];
        let bias = array![0.25, -3.0];
        let mut logits = Array2::zeros((2, 1));

        affine(input.view(), weights.view(), bias.view(), logits.view_mut());

        assert_eq!(logits, array![[-1.75], [0.0]]);
    }

    #[test]
    fn test_forward_normalizes() {
        let input = array![[1.0], [-1.0]];
        let weights = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let bias = array![0.0, 0.0, 0.0];
        let mut logits = Array2::zeros((3, 1));
        let mut probabilities = Array1::zeros(3);

        forward(
            input.view(),
            weights.view(),
            bias.view(),
            logits.view_mut(),
            probabilities.view_mut(),
        );

        assert_eq!(logits, array![[1.0], [-1.0], [0.0]]);
        let sum = 1.0_f32.exp() + (-1.0_f32).exp() + 1.0;
        assert!((probabilities[0] - 1.0_f32.exp() / sum).abs() < 1e-6);
        assert!((probabilities[1] - (-1.0_f32).exp() / sum).abs() < 1e-6);
        assert!((probabilities[2] - 1.0 / sum).abs() < 1e-6);
    }
}
