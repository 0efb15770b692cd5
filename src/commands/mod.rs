pub mod convert;
pub mod crop;
pub mod ratios;
