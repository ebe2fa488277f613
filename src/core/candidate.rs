use ndarray::prelude::*;
use serde_json::Value;

use crate::core::error::{Error, Result};
use crate::Optima;

/// A sample at which the objective is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    xs: Array1<f64>,
}

impl Candidate {
    pub fn new(xs: Vec<f64>) -> Self {
        Candidate { xs: xs.into() }
    }

    /// Parse one line of candidate input and check it against the optima.
    ///
    /// The candidate is a JSON array of numbers.
    /// For one-dimensional optima, a bare number is accepted too.
    ///
    /// ```
    /// # use sphere::{Candidate, Optima};
    /// let optima = Optima::default();
    /// assert_eq!(Candidate::parse(" 3\n", &optima).unwrap(), Candidate::new(vec![3.0]));
    /// assert_eq!(Candidate::parse("[3]", &optima).unwrap(), Candidate::new(vec![3.0]));
    /// assert!(Candidate::parse("[1, 2]", &optima).is_err());
    /// ```
    pub fn parse(text: &str, optima: &Optima) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Parse("candidate input is empty".to_owned()));
        }

        let value: Value = serde_json::from_str(text)
            .map_err(|err| Error::Parse(format!("not valid JSON: {}", err)))?;

        let xs = match &value {
            Value::Number(_) if optima.dim() == 1 => vec![number(&value, 0)?],
            Value::Number(_) => {
                return Err(Error::Shape(format!(
                    "got a single number, but optima have dimension {}",
                    optima.dim()
                )))
            }
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(j, x)| number(x, j))
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::Parse(format!(
                    "expected a number or an array of numbers, got: {}",
                    other
                )))
            }
        };

        let candidate = Candidate::new(xs);
        candidate.check_dim(optima)?;
        Ok(candidate)
    }

    /// Fail unless the candidate has the dimension of the optima.
    pub fn check_dim(&self, optima: &Optima) -> Result<()> {
        if self.dim() != optima.dim() {
            return Err(Error::Shape(format!(
                "candidate has dimension {}, but optima have dimension {}",
                self.dim(),
                optima.dim()
            )));
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.xs.len()
    }

    pub fn xs(&self) -> ArrayView1<f64> {
        self.xs.view()
    }
}

fn number(value: &Value, j: usize) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::Parse(format!("element {} is not a number: {}", j, value)))
}
