//! Algorithms for inequality analysis

pub mod decomposition;
