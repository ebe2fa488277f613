use itertools::Itertools as _;
use ndarray::prelude::*;
use serde_json::Value;
use std::fmt;

use crate::core::error::{Error, Result};

/// The points from which the squared distance of a candidate is measured.
///
/// There is at least one optimum,
/// and all optima have the same non-zero dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Optima {
    points: Array2<f64>,
}

impl Default for Optima {
    /// A single one-dimensional optimum at the origin.
    fn default() -> Self {
        Optima {
            points: Array2::zeros((1, 1)),
        }
    }
}

impl Optima {
    /// Create optima from explicit points.
    ///
    /// ```
    /// # use sphere::Optima;
    /// let optima = Optima::new(&[vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
    /// assert_eq!((optima.len(), optima.dim()), (2, 2));
    /// assert!(Optima::new(&[vec![0.0], vec![1.0, 1.0]]).is_err());
    /// ```
    pub fn new<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        let n_optima = points.len();
        if n_optima == 0 {
            return Err(config_error("at least one optimum is required"));
        }

        let n_dim = points[0].as_ref().len();
        if n_dim == 0 {
            return Err(config_error("optima need at least one dimension"));
        }

        for (i, point) in points.iter().enumerate() {
            let point = point.as_ref();
            if point.len() != n_dim {
                return Err(config_error(format!(
                    "optimum {} has dimension {}, expected {}",
                    i,
                    point.len(),
                    n_dim
                )));
            }
            if let Some(j) = point.iter().position(|x| !x.is_finite()) {
                return Err(config_error(format!(
                    "optimum {} element {} is not finite",
                    i, j
                )));
            }
        }

        let values = points
            .iter()
            .flat_map(|point| point.as_ref().iter().cloned())
            .collect_vec();
        let points = Array2::from_shape_vec((n_optima, n_dim), values)
            .map_err(|err| config_error(err.to_string()))?;

        Ok(Optima { points })
    }

    /// Parse optima from JSON.
    ///
    /// Besides the nested form `[[z11, z12], [z21, z22]]`,
    /// a flat array is a single optimum
    /// and a bare number is a single one-dimensional optimum.
    ///
    /// ```
    /// # use sphere::Optima;
    /// let nested = Optima::from_json("[[1.5, 2]]").unwrap();
    /// assert_eq!(Optima::from_json("[1.5, 2]").unwrap(), nested);
    /// assert_eq!(Optima::from_json("0.0").unwrap(), Optima::default());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| config_error(format!("optima are not valid JSON: {}", err)))?;
        Self::from_value(&value)
    }

    /// Parse optima from YAML, which also accepts JSON.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|err| config_error(format!("optima are not valid YAML: {}", err)))?;
        Self::from_value(&value)
    }

    /// Interpret an already parsed document as optima.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(_) => Self::new(&[vec![number(value, || "optimum".to_owned())?]]),
            Value::Array(items) if items.iter().all(Value::is_array) => {
                let points = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| point(item, |j| format!("optimum {} element {}", i, j)))
                    .collect::<Result<Vec<_>>>()?;
                Self::new(&points)
            }
            Value::Array(_) => Self::new(&[point(value, |j| format!("optimum element {}", j))?]),
            other => Err(config_error(format!(
                "optima must be a number or an array, got: {}",
                other
            ))),
        }
    }

    /// Number of optima.
    pub fn len(&self) -> usize {
        self.points.dim().0
    }

    // Always false, there is at least one optimum.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by all optima.
    pub fn dim(&self) -> usize {
        self.points.dim().1
    }

    /// All optima, one per row.
    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    /// The `i`-th optimum.
    pub fn point(&self, i: usize) -> ArrayView1<f64> {
        self.points.row(i)
    }

    /// The nested-array JSON form.
    pub fn to_json(&self) -> Value {
        Value::from(
            self.points
                .outer_iter()
                .map(|point| point.to_vec())
                .collect_vec(),
        )
    }
}

impl fmt::Display for Optima {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

fn config_error(msg: impl Into<String>) -> Error {
    Error::Config(msg.into())
}

fn number(value: &Value, describe: impl FnOnce() -> String) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| config_error(format!("{} is not a number: {}", describe(), value)))
}

fn point(value: &Value, describe: impl Fn(usize) -> String) -> Result<Vec<f64>> {
    value
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(j, x)| number(x, || describe(j)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_origin() {
        let optima = Optima::default();
        assert_eq!((optima.len(), optima.dim()), (1, 1));
        assert_eq!(optima.point(0).to_vec(), vec![0.0]);
        assert_eq!(optima.to_string(), "[[0.0]]");
    }

    #[test]
    fn parses_nested_optima() {
        let optima = Optima::from_json("[[0, 0], [1, 1]]").unwrap();
        assert_eq!((optima.len(), optima.dim()), (2, 2));
        assert_eq!(optima.point(1).to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn parses_yaml_optima() {
        let optima = Optima::from_yaml("- [0, 0.5]\n- [-1, 2]\n").unwrap();
        assert_eq!(optima, Optima::new(&[[0.0, 0.5], [-1.0, 2.0]]).unwrap());
    }

    #[test]
    fn rejects_malformed_optima() {
        assert_err!(
            Optima::from_json("[]"),
            "configuration error: at least one optimum is required",
        );
        assert_err!(
            Optima::from_json("[[]]"),
            "configuration error: optima need at least one dimension",
        );
        assert_err!(
            Optima::from_json("[[0, 0], [1]]"),
            "configuration error: optimum 1 has dimension 1, expected 2",
        );
        assert_err!(
            Optima::from_json(r#"[[0, "x"]]"#),
            r#"configuration error: optimum 0 element 1 is not a number: "x""#,
        );
        assert_err!(
            Optima::from_json(r#"[1, [2]]"#),
            "configuration error: optimum element 1 is not a number: [2]",
        );
        assert_err!(
            Optima::from_json(r#"{"a": 1}"#),
            r#"configuration error: optima must be a number or an array, got: {"a":1}"#,
        );
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Optima::from_json("[[0,").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("configuration error: optima are not valid JSON:"),
            "message was: {}",
            err
        );
    }

    #[test]
    fn rejects_non_finite_points() {
        assert_err!(
            Optima::new(&[[0.0, std::f64::NAN]]),
            "configuration error: optimum 0 element 1 is not finite",
        );
    }
}
