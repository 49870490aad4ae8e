//! Student profile sent alongside a recommendation request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Majors offered in the profile selector.
pub const MAJORS: &[&str] = &[
    "CSE", "MATH", "POLI", "ECON", "ECE", "BILD", "PSYC", "HIST", "COGS",
];

/// Undergraduate college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum College {
    /// Revelle College
    #[default]
    Revelle,
    /// Thurgood Marshall College
    Marshall,
    /// John Muir College
    Muir,
    /// Earl Warren College
    Warren,
    /// Eleanor Roosevelt College
    Roosevelt,
    /// Sixth College
    Sixth,
    /// Seventh College
    Seventh,
}

impl College {
    /// All colleges in selector order.
    pub const ALL: [Self; 7] = [
        Self::Revelle,
        Self::Marshall,
        Self::Muir,
        Self::Warren,
        Self::Roosevelt,
        Self::Sixth,
        Self::Seventh,
    ];

    /// Returns the next college, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for College {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for College {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown college '{s}'. Expected one of: {}",
                    Self::ALL.map(|c| c.to_string()).join(", ")
                )
            })
    }
}

/// Class standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClassYear {
    /// First year
    Freshman,
    /// Second year
    #[default]
    Sophomore,
    /// Third year
    Junior,
    /// Fourth year
    Senior,
}

impl ClassYear {
    /// All class years in selector order.
    pub const ALL: [Self; 4] = [Self::Freshman, Self::Sophomore, Self::Junior, Self::Senior];

    /// Returns the next class year, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|y| *y == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ClassYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for ClassYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|y| y.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown year '{s}'. Expected one of: {}",
                    Self::ALL.map(|y| y.to_string()).join(", ")
                )
            })
    }
}

/// Profile details submitted with every recommendation request.
///
/// The recommender only consumes the taken course ids; the profile is
/// forwarded so servers that do use it receive the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Major department code (one of [`MAJORS`])
    pub major: String,
    /// College
    pub college: College,
    /// Class standing
    pub year: ClassYear,
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            major: "CSE".to_string(),
            college: College::default(),
            year: ClassYear::default(),
        }
    }
}

impl StudentProfile {
    /// Checks that the major is one of the offered majors.
    pub fn validate(&self) -> Result<(), String> {
        if MAJORS.contains(&self.major.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "Unknown major '{}'. Expected one of: {}",
                self.major,
                MAJORS.join(", ")
            ))
        }
    }

    /// Normalizes a major code and checks it is offered.
    pub fn parse_major(value: &str) -> Result<String, String> {
        let major = value.trim().to_ascii_uppercase();
        if MAJORS.contains(&major.as_str()) {
            Ok(major)
        } else {
            Err(format!(
                "Unknown major '{value}'. Expected one of: {}",
                MAJORS.join(", ")
            ))
        }
    }

    /// Advances the major selector, wrapping around.
    pub fn cycle_major(&mut self) {
        let index = MAJORS.iter().position(|m| *m == self.major).unwrap_or(0);
        self.major = MAJORS[(index + 1) % MAJORS.len()].to_string();
    }
}
