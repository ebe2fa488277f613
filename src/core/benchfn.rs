use ndarray::prelude::*;
use ndarray::Data;
use num_traits::Float;

/// Sphere function: N-dimensional, symmetric.
///
/// Bounds: unbounded, but -2 <= xi <= 2 is sensible.
///
/// Optimum: f(0, ..., 0) = 0
///
/// ```
/// use ndarray::arr1;
/// use sphere::benchfn::sphere;
/// assert_eq!(sphere(arr1(&[0.0])), 0.0);
/// assert_eq!(sphere(arr1(&[3.0])), 9.0);
/// assert_eq!(sphere(arr1(&[1.0, 2.0])), 5.0);
/// assert_eq!(sphere(arr1(&[0.0f32; 5])), 0.0);
/// ```
///
/// At least one dimension is required:
///
/// ``` should_panic
/// use ndarray::Array1;
/// sphere::benchfn::sphere(Array1::<f64>::zeros(0));  // panics
/// ```
pub fn sphere<A, S>(xs: ArrayBase<S, Ix1>) -> A
where
    S: Data<Elem = A>,
    A: Clone + Float,
{
    assert!(!xs.is_empty(), "at least one dimension required");
    xs.mapv(|x| x.powi(2)).sum()
}

/// Sphere function shifted onto each of several optima.
///
/// Row `i` of `optima` is the optimum `z_i`;
/// entry `i` of the result is `sum_j (xs_j - z_ij)^2`.
///
/// ```
/// use ndarray::{arr1, arr2};
/// use sphere::benchfn::sphere_distances;
/// let optima = arr2(&[[0.0, 0.0], [1.0, 1.0]]);
/// assert_eq!(sphere_distances(arr1(&[1.0, 0.0]), optima.view()), arr1(&[1.0, 1.0]));
/// assert_eq!(sphere_distances(arr1(&[1.0, 1.0]), optima.view()), arr1(&[2.0, 0.0]));
/// ```
pub fn sphere_distances<A, S, T>(xs: ArrayBase<S, Ix1>, optima: ArrayBase<T, Ix2>) -> Array1<A>
where
    S: Data<Elem = A>,
    T: Data<Elem = A>,
    A: Clone + Float,
{
    let (_, n_dim) = optima.dim();
    assert_eq!(
        xs.len(),
        n_dim,
        "sample and optima must have the same dimension"
    );
    optima
        .outer_iter()
        .map(|optimum| sphere(&xs - &optimum))
        .collect()
}
