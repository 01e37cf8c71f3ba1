#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

pub mod common;
pub mod generator;
pub mod report;
pub mod review;
pub mod sampler;
pub mod store;
pub mod weighted;
