use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Rectifier: the value passes through when it is non-negative, anything else
/// (including NaN) becomes 0.
pub fn relu(x: f32) -> f32 {
    if x >= 0.0 {
        x
    } else {
        0.0
    }
}

/// Exponential normalization of `logits` into `output`.
///
/// Each logit is exponentiated as-is and divided by the sum of all
/// exponentials. No max-subtraction is applied, so large logits overflow to
/// infinity and the resulting NaN/inf values reach `output` unchanged.
pub fn softmax(logits: ArrayView1<f32>, mut output: ArrayViewMut1<f32>) {
    debug_assert_eq!(logits.len(), output.len());

    let mut sum = 0.0;
    Zip::from(&mut output).and(&logits).for_each(|out, &logit| {
        let ex = logit.exp();
        *out = ex;
        sum += ex;
    });

    output.mapv_inplace(|ex| ex / sum);
}
