#![doc = include_str!("../README.md")]

pub mod condition;
pub mod constraints;
pub mod example_resolver;
pub mod fixtures;
pub mod schema;
pub mod visibility;
