pub mod benchfn;
pub mod candidate;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod logging;
pub mod optima;
