pub mod error;
pub mod estimate;
pub mod model;
pub mod pipeline;
pub mod rate;
pub mod reconstruct;
pub mod sampler;
pub mod spectrum;
