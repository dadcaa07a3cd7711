// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Calibration curve and linear interpolation
//!
//! A curve is the ordered set of (resistance, temperature) points for one
//! probe model. Queries are resolved by a single ascending scan: exact
//! table hits are returned as-is, anything between two rows is linearly
//! interpolated, and anything outside the tabulated range is refused —
//! no extrapolation is ever performed.

use super::{CalibrationError, RangeDirection};

/// One calibration table row: a known resistance and the temperature it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    /// Tabulated resistance in ohms
    pub resistance_ohms: f64,
    /// Temperature in degrees Celsius at that resistance
    pub temperature_celsius: f64,
}

/// Resistance-to-temperature curve for a single probe model.
///
/// Points are strictly ascending by resistance, with no duplicates. The
/// calibration source is required to be pre-sorted; the curve does not
/// re-sort it, so a violation of that contract surfaces as a wrong
/// interpolation rather than being silently papered over.
#[derive(Debug, Clone, Default)]
pub struct CalibrationCurve {
    points: Vec<CalibrationPoint>,
}

impl CalibrationCurve {
    pub(crate) fn new(points: Vec<CalibrationPoint>) -> Self {
        Self { points }
    }

    /// Number of points in the curve.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve holds no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Temperature in Celsius for the given resistance.
    ///
    /// An exact match on a tabulated resistance returns that row's
    /// temperature without interpolation. A resistance falling between two
    /// rows is linearly interpolated between them. A resistance below the
    /// smallest or above the largest tabulated value fails with
    /// [`CalibrationError::OutOfRange`].
    pub fn temperature_for(&self, ohms: f64) -> Result<f64, CalibrationError> {
        let mut lower: Option<&CalibrationPoint> = None;
        for point in &self.points {
            if point.resistance_ohms == ohms {
                return Ok(point.temperature_celsius);
            }
            if point.resistance_ohms < ohms {
                lower = Some(point);
            } else {
                // First row above the query: interpolate against the last
                // row below it, if any.
                return match lower {
                    Some(low) => Ok(interpolate(
                        low.resistance_ohms,
                        low.temperature_celsius,
                        point.resistance_ohms,
                        point.temperature_celsius,
                        ohms,
                    )),
                    None => Err(CalibrationError::OutOfRange {
                        ohms,
                        direction: RangeDirection::TooSmall,
                    }),
                };
            }
        }
        Err(CalibrationError::OutOfRange {
            ohms,
            direction: RangeDirection::TooLarge,
        })
    }
}

/// Linear interpolation: y for `x3` on the line through `(x1, y1)` and `(x2, y2)`.
///
/// `x1 != x2` is guaranteed by the strictly ascending, deduplicated curve.
pub fn interpolate(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64) -> f64 {
    y1 + (y2 - y1) * (x3 - x1) / (x2 - x1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(points: &[(f64, f64)]) -> CalibrationCurve {
        CalibrationCurve::new(
            points
                .iter()
                .map(|&(resistance_ohms, temperature_celsius)| CalibrationPoint {
                    resistance_ohms,
                    temperature_celsius,
                })
                .collect(),
        )
    }

    #[test]
    fn interpolate_is_linear() {
        assert_eq!(interpolate(0.0, 0.0, 10.0, 100.0, 0.0), 0.0);
        assert_eq!(interpolate(0.0, 0.0, 10.0, 100.0, 2.0), 20.0);
        assert_eq!(interpolate(0.0, 0.0, 10.0, 100.0, 5.0), 50.0);
        assert_eq!(interpolate(0.0, 0.0, 10.0, 100.0, 10.0), 100.0);
    }

    #[test]
    fn interpolate_descending_y() {
        assert_eq!(interpolate(0.0, 100.0, 10.0, 0.0, 2.0), 80.0);
        assert_eq!(interpolate(0.0, 100.0, 10.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn exact_rows_bypass_interpolation() {
        let curve = curve(&[(80.31, -50.0), (100.0, 0.0), (138.5, 100.0)]);
        assert_eq!(curve.temperature_for(80.31).unwrap(), -50.0);
        assert_eq!(curve.temperature_for(100.0).unwrap(), 0.0);
        assert_eq!(curve.temperature_for(138.5).unwrap(), 100.0);
    }

    #[test]
    fn bracketed_query_stays_between_rows() {
        let curve = curve(&[(100.0, 0.0), (138.5, 100.0)]);
        let temperature = curve.temperature_for(120.0).unwrap();
        assert!(temperature > 0.0 && temperature < 100.0);
    }

    #[test]
    fn below_smallest_row_is_too_small() {
        let curve = curve(&[(100.0, 0.0), (138.5, 100.0)]);
        match curve.temperature_for(99.9) {
            Err(CalibrationError::OutOfRange { direction, .. }) => {
                assert_eq!(direction, RangeDirection::TooSmall)
            }
            other => panic!("expected out-of-range error, got {:?}", other),
        }
    }

    #[test]
    fn above_largest_row_is_too_large() {
        let curve = curve(&[(100.0, 0.0), (138.5, 100.0)]);
        match curve.temperature_for(138.6) {
            Err(CalibrationError::OutOfRange { direction, .. }) => {
                assert_eq!(direction, RangeDirection::TooLarge)
            }
            other => panic!("expected out-of-range error, got {:?}", other),
        }
    }

    #[test]
    fn empty_curve_rejects_everything() {
        assert!(curve(&[]).temperature_for(100.0).is_err());
    }
}
