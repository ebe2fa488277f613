use serde_json::{json, Value};
use std::fmt;
use std::io::BufRead;
use tracing::{debug, trace};

use crate::core::error::{Error, Result};
use crate::{benchfn, Candidate, Optima};

/// Evaluates candidates against a fixed set of optima.
#[derive(Debug, Clone)]
pub struct Evaluator {
    optima: Optima,
}

impl Evaluator {
    pub fn new(optima: Optima) -> Self {
        debug!("optima: {}", optima);
        Evaluator { optima }
    }

    pub fn optima(&self) -> &Optima {
        &self.optima
    }

    /// Squared distance from the candidate to each optimum, in order.
    ///
    /// ```
    /// # use sphere::{Candidate, Evaluator, Optima};
    /// let evaluator = Evaluator::new(Optima::from_json("[[0, 0], [1, 1]]").unwrap());
    /// let ys = evaluator.evaluate(&Candidate::new(vec![1.0, 0.0])).unwrap();
    /// assert_eq!(ys, vec![1.0, 1.0]);
    /// ```
    pub fn evaluate(&self, candidate: &Candidate) -> Result<Vec<f64>> {
        candidate.check_dim(&self.optima)?;
        let ys = benchfn::sphere_distances(candidate.xs(), self.optima.points());
        if let Some(index) = ys.iter().position(|y| !y.is_finite()) {
            return Err(Error::NotFinite { index });
        }
        trace!("objectives: {}", ys);
        Ok(ys.to_vec())
    }

    /// Parse a candidate line, then evaluate it.
    pub fn evaluate_str(&self, text: &str) -> Result<Vec<f64>> {
        let candidate = Candidate::parse(text, &self.optima)?;
        debug!("candidate: {}", candidate.xs());
        self.evaluate(&candidate)
    }

    /// Read exactly one candidate line, then evaluate it.
    pub fn evaluate_reader<R: BufRead>(&self, reader: R) -> Result<Vec<f64>> {
        let line = read_candidate_line(reader)?;
        self.evaluate_str(&line)
    }
}

/// Read one line, failing at end of input.
pub fn read_candidate_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Io(
            "end of input before a candidate line was read".to_owned(),
        ));
    }
    Ok(line)
}

/// Outcome of one evaluation, as reported on stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Success(Vec<f64>),
    Failure(String),
}

impl Evaluation {
    pub fn is_success(&self) -> bool {
        match self {
            Evaluation::Success(_) => true,
            Evaluation::Failure(_) => false,
        }
    }

    pub fn objectives(&self) -> Option<&[f64]> {
        match self {
            Evaluation::Success(ys) => Some(ys.as_slice()),
            Evaluation::Failure(_) => None,
        }
    }

    /// The result object.
    /// A single objective is reported as a scalar, several as an array.
    /// `error` is only present on failure, together with a `null` objective.
    ///
    /// ```
    /// # use sphere::Evaluation;
    /// # use serde_json::json;
    /// assert_eq!(Evaluation::Success(vec![9.0]).to_json(), json!({"objective": 9.0}));
    /// assert_eq!(
    ///     Evaluation::Failure("oops".into()).to_json(),
    ///     json!({"objective": null, "error": "oops"}),
    /// );
    /// ```
    pub fn to_json(&self) -> Value {
        match self {
            Evaluation::Success(ys) if ys.len() == 1 => json!({ "objective": ys[0] }),
            Evaluation::Success(ys) => json!({ "objective": ys }),
            Evaluation::Failure(msg) => json!({ "objective": null, "error": msg }),
        }
    }

    /// The result object on a single line, without trailing newline.
    pub fn to_json_line(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<Result<Vec<f64>>> for Evaluation {
    fn from(result: Result<Vec<f64>>) -> Self {
        match result {
            Ok(ys) => Evaluation::Success(ys),
            Err(err) => err.into(),
        }
    }
}

impl From<Error> for Evaluation {
    fn from(err: Error) -> Self {
        Evaluation::Failure(err.to_string())
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_json_line())
    }
}
