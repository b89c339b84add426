//! School buildings
//!
//! The credential-reset path addresses buildings by short code; the batch path only
//! ever sees display names as they appear in the record file.

use super::errors::BuildingCodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to the sanitized building name to form the export file name
pub const EXPORT_FILE_SUFFIX: &str = "_students.csv";

/// Known school buildings
///
/// Each variant maps a short code (used on the command line) to the display name
/// used for secretary lookups and in email text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildingCode {
    /// Oak Hills High School
    Ohhs,
    /// Bridgetown Middle School
    Bms,
    /// Delhi Middle School
    Dms,
    /// Rapid Run Middle School
    Rrms,
    /// C.O. Harrison Elementary
    Coh,
    /// Delshire Elementary
    Des,
    /// J.F. Dulles Elementary
    Jfd,
    /// Oakdale Elementary
    Ode,
    /// Springmyer Elementary
    Ses,
    /// Oak Hills Online Academy
    Ohoa,
}

impl BuildingCode {
    /// All known buildings, in display order
    pub const ALL: [BuildingCode; 10] = [
        BuildingCode::Ohhs,
        BuildingCode::Bms,
        BuildingCode::Dms,
        BuildingCode::Rrms,
        BuildingCode::Coh,
        BuildingCode::Des,
        BuildingCode::Jfd,
        BuildingCode::Ode,
        BuildingCode::Ses,
        BuildingCode::Ohoa,
    ];

    /// Short code as accepted on the command line
    pub fn code(&self) -> &'static str {
        match self {
            BuildingCode::Ohhs => "OHHS",
            BuildingCode::Bms => "BMS",
            BuildingCode::Dms => "DMS",
            BuildingCode::Rrms => "RRMS",
            BuildingCode::Coh => "COH",
            BuildingCode::Des => "DES",
            BuildingCode::Jfd => "JFD",
            BuildingCode::Ode => "ODE",
            BuildingCode::Ses => "SES",
            BuildingCode::Ohoa => "OHOA",
        }
    }

    /// Full building name, as used in `[building_secretaries]` and in email text
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingCode::Ohhs => "Oak Hills High School",
            BuildingCode::Bms => "Bridgetown Middle School",
            BuildingCode::Dms => "Delhi Middle School",
            BuildingCode::Rrms => "Rapid Run Middle School",
            BuildingCode::Coh => "C.O. Harrison Elementary",
            BuildingCode::Des => "Delshire Elementary",
            BuildingCode::Jfd => "J.F. Dulles Elementary",
            BuildingCode::Ode => "Oakdale Elementary",
            BuildingCode::Ses => "Springmyer Elementary",
            BuildingCode::Ohoa => "Oak Hills Online Academy",
        }
    }

    fn expected_codes() -> String {
        Self::ALL
            .iter()
            .map(|b| b.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BuildingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BuildingCode {
    type Err = BuildingCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(BuildingCodeError::Empty);
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BuildingCodeError::NotAlphabetic(code.to_string()));
        }

        let upper = code.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.code() == upper)
            .ok_or_else(|| BuildingCodeError::Unknown {
                code: code.to_string(),
                expected: Self::expected_codes(),
            })
    }
}

/// Strips every character that is not an ASCII letter or digit
///
/// Idempotent: sanitizing an already sanitized name returns it unchanged.
pub fn sanitize_building_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Export file name for a building, e.g. `OakHillsHighSchool_students.csv`
pub fn export_file_name(building: &str) -> String {
    format!("{}{}", sanitize_building_name(building), EXPORT_FILE_SUFFIX)
}
