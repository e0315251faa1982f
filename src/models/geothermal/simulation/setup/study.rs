/// Time stepping of the transient solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStepping {
    /// Adaptive steps, for a constant extraction rate.
    Free {
        relative_tolerance: f64,
        /// First step, in years.
        initial_step: f64,
    },

    /// Steps land on every output time, so that monthly load changes are
    /// resolved exactly.
    Strict,
}

/// A transient study with monthly output over the operating period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Study {
    pub num_years: u32,
    pub stepping: TimeStepping,
}

impl Study {
    #[must_use]
    pub fn new(num_years: u32, monthly_profile: bool) -> Self {
        let stepping = if monthly_profile {
            TimeStepping::Strict
        } else {
            TimeStepping::Free {
                relative_tolerance: 1e-3,
                initial_step: 1e-6,
            }
        };
        Self {
            num_years,
            stepping,
        }
    }

    /// Unit of all study times.
    #[must_use]
    pub fn time_unit(&self) -> &'static str {
        "a"
    }

    /// Output times in solver syntax: every month from zero to `num_years`.
    #[must_use]
    pub fn output_times(&self) -> String {
        format!("range(0,1/12,{})", self.num_years)
    }

    /// Number of stored time steps, including the initial state.
    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.num_years as usize * 12 + 1
    }
}
