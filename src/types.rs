use nalgebra::{Point2, Vector2};

/// Dose (or signal) value of a distribution sample.
pub type Dose = f64;

/// A point in the normalized `(position / distance_to_agreement, dose / dose_scale)` plane.
pub type Point = Point2<Dose>;

/// A 2D vector with [`Dose`] components.
pub type Vector = Vector2<Dose>;
