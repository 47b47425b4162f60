use ndarray::{ArrayView1, ArrayView3, ArrayViewMut3};

use crate::activation::relu;

/// Valid, stride-1, single-channel convolution followed by the rectifier.
///
/// For every filter `z` and output cell `(row, col)`:
///
/// ```text
/// output[z][row][col] = relu(sum_{kr, kc} input[0][row + kr][col + kc] * filters[z][kr][kc] + bias[z])
/// ```
///
/// The kernel is applied as stored, with no flip, and the bias is added once the
/// whole window has been summed.
///
/// # Arguments
///
/// * `input` - `1 × H × W` image
/// * `filters` - `Z × K × K` filter bank
/// * `bias` - one bias per filter
/// * `output` - `Z × (H - K + 1) × (W - K + 1)` feature maps, fully overwritten
pub fn forward(
    input: ArrayView3<f32>,
    filters: ArrayView3<f32>,
    bias: ArrayView1<f32>,
    mut output: ArrayViewMut3<f32>,
) {
    let (_, input_h, input_w) = input.dim();
    let (filter_count, kernel_h, kernel_w) = filters.dim();
    let (out_filters, output_h, output_w) = output.dim();
    debug_assert_eq!(input.dim().0, 1, "Input must have a single channel");
    debug_assert_eq!(bias.len(), filter_count);
    debug_assert_eq!(out_filters, filter_count);
    debug_assert_eq!(output_h, input_h - kernel_h + 1);
    debug_assert_eq!(output_w, input_w - kernel_w + 1);

    for z in 0..filter_count {
        for row in 0..output_h {
            for col in 0..output_w {
                let mut sum = 0.0;
                for kr in 0..kernel_h {
                    for kc in 0..kernel_w {
                        sum += input[[0, row + kr, col + kc]] * filters[[z, kr, kc]];
                    }
                }
                output[[z, row, col]] = relu(sum + bias[z]);
            }
        }
    }
}
