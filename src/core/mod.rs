pub mod artifact;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod generator;
pub mod parser;
pub mod renderer;
pub mod sampler;
