use std::fmt;

use uom::si::{
    f64::{Length, Velocity},
    length::meter,
    velocity::meter_per_second,
};

use crate::{
    models::geothermal::extraction_limit::{TrialRates, TrialSchedule},
    support::{
        borehole::{MonthlyFractions, Parameters},
        geology::Geology,
    },
};

use super::CaseError;

/// Borehole settings shared by every case of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeTemplate {
    pub borehole_diameter: Length,
    pub num_years: u32,

    /// Monthly load profile, `None` for constant extraction.
    pub monthly_fractions: Option<MonthlyFractions>,
}

impl Default for BoreholeTemplate {
    fn default() -> Self {
        Self {
            borehole_diameter: Length::new::<meter>(0.15),
            num_years: 50,
            monthly_fractions: None,
        }
    }
}

/// The cross product of geologies and borehole configurations to evaluate.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub geologies: Vec<Geology>,
    pub borehole_lengths: Vec<Length>,
    pub borehole_spacings: Vec<Length>,

    /// Uniform groundwater velocities applied to every layer.
    ///
    /// When `None` each geology keeps its own layer velocities.
    pub velocities: Option<Vec<Velocity>>,

    pub template: BoreholeTemplate,
    pub schedule: TrialSchedule,
}

impl BatchPlan {
    /// Creates a plan with the default template and trial schedule.
    #[must_use]
    pub fn new(
        geologies: Vec<Geology>,
        borehole_lengths: Vec<Length>,
        borehole_spacings: Vec<Length>,
    ) -> Self {
        Self {
            geologies,
            borehole_lengths,
            borehole_spacings,
            velocities: None,
            template: BoreholeTemplate::default(),
            schedule: TrialSchedule::default(),
        }
    }

    #[must_use]
    pub fn with_velocities(mut self, velocities: Vec<Velocity>) -> Self {
        self.velocities = Some(velocities);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: BoreholeTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: TrialSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Iterates over the cases, geology first, then length, spacing and
    /// velocity.
    pub fn cases(&self) -> impl Iterator<Item = PlannedCase<'_>> {
        let velocities: Vec<Option<Velocity>> = match &self.velocities {
            Some(velocities) => velocities.iter().copied().map(Some).collect(),
            None => vec![None],
        };

        self.geologies.iter().flat_map(move |geology| {
            let velocities = velocities.clone();
            self.borehole_lengths.iter().flat_map(move |&length| {
                let velocities = velocities.clone();
                self.borehole_spacings.iter().flat_map(move |&spacing| {
                    velocities.clone().into_iter().map(move |velocity| PlannedCase {
                        key: CaseKey {
                            geology: geology.name().to_owned(),
                            borehole_length: length,
                            borehole_spacing: spacing,
                            groundwater_velocity: velocity,
                        },
                        geology,
                        plan: self,
                    })
                })
            })
        })
    }

    /// Number of cases in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.geologies.len()
            * self.borehole_lengths.len()
            * self.borehole_spacings.len()
            * self.velocities.as_ref().map_or(1, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifies a case in the plan and in the result store.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseKey {
    pub geology: String,
    pub borehole_length: Length,
    pub borehole_spacing: Length,

    /// Uniform groundwater velocity, if the plan imposes one.
    pub groundwater_velocity: Option<Velocity>,
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, L={} m, B={} m",
            self.geology,
            self.borehole_length.get::<meter>(),
            self.borehole_spacing.get::<meter>(),
        )?;
        if let Some(velocity) = self.groundwater_velocity {
            write!(f, ", v={} m/s", velocity.get::<meter_per_second>())?;
        }
        Ok(())
    }
}

/// A case of the plan, not yet validated.
#[derive(Debug, Clone)]
pub struct PlannedCase<'a> {
    pub key: CaseKey,
    geology: &'a Geology,
    plan: &'a BatchPlan,
}

impl PlannedCase<'_> {
    /// Builds the geology, parameters and trial rates of the case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] if the velocity or the borehole parameters are
    /// invalid.
    pub fn prepare(&self) -> Result<Case, CaseError> {
        let geology = match self.key.groundwater_velocity {
            Some(velocity) => self.geology.with_uniform_velocity(velocity)?,
            None => self.geology.clone(),
        };

        let template = &self.plan.template;
        let mut params = Parameters::new(
            self.key.borehole_length,
            template.borehole_diameter,
            self.key.borehole_spacing,
            template.num_years,
        )?;
        if let Some(fractions) = template.monthly_fractions {
            params = params.with_monthly_fractions(fractions);
        }

        let rates = self
            .plan
            .schedule
            .rates(self.key.borehole_length, self.key.borehole_spacing);

        Ok(Case {
            key: self.key.clone(),
            geology,
            params,
            rates,
        })
    }
}

/// Everything a runner needs to evaluate one case.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub key: CaseKey,
    pub geology: Geology,
    pub params: Parameters,
    pub rates: TrialRates,
}
