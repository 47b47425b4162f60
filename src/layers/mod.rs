//! The four numeric stages of the network. Each stage reads borrowed views and
//! overwrites a caller-owned output buffer; none of them allocate.

pub mod conv2d;
pub mod dense;
pub mod flatten;
pub mod max_pool;
