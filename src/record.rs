//! Daily health-metric record

use serde::{Deserialize, Serialize};

use crate::constants::{IMAGE_EXTENSION, IMAGE_KEY_PREFIX};

/// One day of health metrics.
///
/// `title` doubles as the display title and the storage key of the
/// rendered card. Energies are in kilojoules, weight in kilograms.
/// No range checks are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub title: String,
    pub active_energy: f64,
    pub resting_energy: f64,
    pub intake_energy: f64,
    pub weight: f64,
}

impl Record {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Storage key of this record's card, e.g. `weightlog/2023-05-05.jpg`
    pub fn image_key(&self) -> String {
        format!("{}/{}.{}", IMAGE_KEY_PREFIX, self.title, IMAGE_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key() {
        let record = Record::new("2023-05-05");
        assert_eq!(record.image_key(), "weightlog/2023-05-05.jpg");
    }

    #[test]
    fn test_serde_field_names() {
        let json = r#"{"Title":"2023-05-05","ActiveEnergy":3000,"RestingEnergy":10000.0,"IntakeEnergy":5000.00001,"Weight":115.0}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "2023-05-05");
        assert_eq!(record.active_energy, 3000.0);
        assert_eq!(record.weight, 115.0);
    }
}
