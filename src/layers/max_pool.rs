use ndarray::{ArrayView3, ArrayViewMut3};

/// Non-overlapping max pooling with a square `pool_size` window and a stride
/// equal to the window, applied independently per filter.
///
/// The running maximum starts at 0 rather than at the first sample, so every
/// window result is floored at 0.
pub fn forward(input: ArrayView3<f32>, pool_size: usize, mut output: ArrayViewMut3<f32>) {
    let (channels, input_h, input_w) = input.dim();
    let (out_channels, output_h, output_w) = output.dim();
    debug_assert_eq!(channels, out_channels);
    debug_assert_eq!(output_h * pool_size, input_h);
    debug_assert_eq!(output_w * pool_size, input_w);

    for c in 0..channels {
        for h in 0..output_h {
            for w in 0..output_w {
                let h_start = h * pool_size;
                let w_start = w * pool_size;

                let mut max_val = 0.0;
                for ph in 0..pool_size {
                    for pw in 0..pool_size {
                        let val = input[[c, h_start + ph, w_start + pw]];
                        if val > max_val {
                            max_val = val;
                        }
                    }
                }

                output[[c, h, w]] = max_val;
            }
        }
    }
}
