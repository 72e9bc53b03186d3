pub mod dataset;
pub mod query;
pub mod resolver;
pub mod sampler;
pub mod series;
pub mod series_look;
pub mod spectrum;
pub mod spline;
pub mod visibility;
