//! The sphere benchmark function as a single-shot objective oracle.
//!
//! A candidate is compared against one or more optima,
//! and the squared distance to each optimum is the objective.

#[macro_use]
extern crate failure;
extern crate itertools;
extern crate ndarray;
extern crate num_traits;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;
extern crate tracing;
extern crate tracing_subscriber;

#[macro_use]
mod util;

mod core;

pub use crate::core::benchfn;
pub use crate::core::candidate::Candidate;
pub use crate::core::config::{
    parse_optima_argument, resolve_optima, Config, OptimaSource, OPTIMA_ENV_VAR,
};
pub use crate::core::error::{Error, Result};
pub use crate::core::evaluation::{read_candidate_line, Evaluation, Evaluator};
pub use crate::core::logging::{LogConfig, Verbosity};
pub use crate::core::optima::Optima;
