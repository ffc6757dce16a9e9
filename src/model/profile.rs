//! Faculty profile built by the first-run wizard

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The faculty member this installation belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub joining_year: String,
    /// Teaching load as a percentage, kept as entered
    pub teaching_load: String,
    pub weekly_hours: String,
}

impl FacultyProfile {
    /// Build a profile from wizard field values; unknown keys are ignored
    pub fn from_values(values: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| values.get(key).cloned().unwrap_or_default();
        Self {
            name: get("name"),
            email: get("email"),
            department: get("department"),
            designation: get("designation"),
            joining_year: get("joining_year"),
            teaching_load: get("teaching_load"),
            weekly_hours: get("weekly_hours"),
        }
    }

    /// Flatten back into field values, e.g. to re-run the wizard pre-filled
    pub fn to_values(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        values.insert("name".to_string(), self.name.clone());
        values.insert("email".to_string(), self.email.clone());
        values.insert("department".to_string(), self.department.clone());
        values.insert("designation".to_string(), self.designation.clone());
        values.insert("joining_year".to_string(), self.joining_year.clone());
        values.insert("teaching_load".to_string(), self.teaching_load.clone());
        values.insert("weekly_hours".to_string(), self.weekly_hours.clone());
        values
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_round_trip() {
        let profile = FacultyProfile {
            name: "Dr. A. Sharma".to_string(),
            email: "a.sharma@univ.edu".to_string(),
            department: "Computer Science".to_string(),
            designation: "Associate Professor".to_string(),
            joining_year: "2015".to_string(),
            teaching_load: "60".to_string(),
            weekly_hours: "18".to_string(),
        };
        let back = FacultyProfile::from_values(&profile.to_values());
        assert_eq!(back.name, profile.name);
        assert_eq!(back.weekly_hours, profile.weekly_hours);
    }

    #[test]
    fn test_missing_values_default_empty() {
        let profile = FacultyProfile::from_values(&BTreeMap::new());
        assert!(profile.name.is_empty());
        assert_eq!(profile.display_name(), "Unnamed");
    }
}
