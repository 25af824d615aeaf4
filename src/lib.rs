//! Citadel Workforce - settlement population growth and worker allocation

pub mod automation;
pub mod city;
pub mod core;
pub mod population;
