//! Straight-line fits of borehole temperature against extracted energy.

/// A line `y = slope·x + intercept`.
///
/// In this crate `x` is the annual extraction in MWh and `y` the observed
/// temperature in °C, so the slope is in K per MWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Goodness of a [`LinearFit`] over the points it was fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitQuality {
    /// Coefficient of determination.
    ///
    /// Equal to one for a perfect fit, including the case of points with no
    /// spread at all.
    pub r_squared: f64,

    /// Root-mean-square residual, in the units of `y`.
    pub rmse: f64,
}

impl LinearFit {
    /// Fits a line to the points by ordinary least squares.
    ///
    /// Two points give the line through both of them. Returns `None` for
    /// fewer than two points or when all `x` values coincide.
    #[must_use]
    pub fn least_squares(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let x_mean = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
            let dx = x - x_mean;
            (sxx + dx * dx, sxy + dx * (y - y_mean))
        });

        if !(sxx > 0.0) {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Evaluates the line at `x`.
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Returns the `x` at which the line reaches `target`.
    ///
    /// The result is infinite or NaN for a flat line.
    #[must_use]
    pub fn root(&self, target: f64) -> f64 {
        (target - self.intercept) / self.slope
    }

    /// Computes R² and RMSE of this line over the points.
    #[must_use]
    pub fn quality(&self, points: &[(f64, f64)]) -> FitQuality {
        if points.is_empty() {
            return FitQuality {
                r_squared: f64::NAN,
                rmse: f64::NAN,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let y_mean = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let ss_res: f64 = points
            .iter()
            .map(|&(x, y)| (y - self.at(x)).powi(2))
            .sum();
        let ss_tot: f64 = points.iter().map(|&(_, y)| (y - y_mean).powi(2)).sum();

        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        FitQuality {
            r_squared,
            rmse: (ss_res / n).sqrt(),
        }
    }
}
