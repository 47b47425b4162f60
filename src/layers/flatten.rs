use ndarray::{ArrayView3, ArrayViewMut2};

/// Position of pooled cell `(z, row, col)` in the flattened column vector.
///
/// Each filter's map is laid out row-major and the filters are concatenated
/// in order, so for the default 8×12×12 maps this is `144*z + 12*row + col`.
/// Dense weights are trained against exactly this ordering.
pub fn flat_index(z: usize, row: usize, col: usize, height: usize, width: usize) -> usize {
    z * height * width + row * width + col
}

/// Copies `Z × H × W` pooled maps into a `(Z·H·W) × 1` column vector.
pub fn forward(input: ArrayView3<f32>, mut output: ArrayViewMut2<f32>) {
    let (channels, height, width) = input.dim();
    debug_assert_eq!(output.dim(), (channels * height * width, 1));

    for z in 0..channels {
        for row in 0..height {
            for col in 0..width {
                output[[flat_index(z, row, col, height, width), 0]] = input[[z, row, col]];
            }
        }
    }
}
