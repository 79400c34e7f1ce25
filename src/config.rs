use crate::{error::DogmaError, layout::LayoutSettings, messages::DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DNA_TEMPLATE: &str = "TACGTACGTACGAAATT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Template strand, read 3'->5' by the polymerase. Fixed for the lifetime of a simulation.
    pub dna_template: String,
    pub transcription_speed: f64,
    /// Frames between two transcribed bases at speed 1.0.
    pub base_interval_frames: usize,
    /// Candidates offered per codon, the correct one included.
    pub candidate_count: usize,
    /// Random draws allowed while looking for distinct incorrect candidates.
    pub retry_budget: usize,
    pub seed: Option<u64>,
    pub language: String,
    pub layout: LayoutSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dna_template: DEFAULT_DNA_TEMPLATE.to_string(),
            transcription_speed: 1.0,
            base_interval_frames: 30,
            candidate_count: 3,
            retry_budget: 100,
            seed: None,
            language: DEFAULT_LANGUAGE.to_string(),
            layout: LayoutSettings::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_template(template: &str) -> Self {
        Self {
            dna_template: template.to_string(),
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, DogmaError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &str) -> Result<Self, DogmaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), DogmaError> {
        if self.dna_template.is_empty() {
            return Err(DogmaError::InvalidConfig(
                "DNA template must not be empty".to_string(),
            ));
        }
        if self.transcription_speed.is_nan() || self.transcription_speed <= 0.0 {
            return Err(DogmaError::InvalidConfig(format!(
                "Transcription speed must be positive, got {}",
                self.transcription_speed
            )));
        }
        if self.candidate_count == 0 {
            return Err(DogmaError::InvalidConfig(
                "At least one tRNA candidate is required".to_string(),
            ));
        }
        if self.layout.trna_width <= 0.0 || self.layout.trna_height <= 0.0 {
            return Err(DogmaError::InvalidConfig(
                "tRNA width and height must be positive".to_string(),
            ));
        }
        if self.layout.drop_tolerance_divisor <= 0.0 {
            return Err(DogmaError::InvalidConfig(
                "Drop tolerance divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Ticks per transcribed base: `max(1, floor(base_interval_frames / speed))`.
    pub fn frames_per_base(&self) -> usize {
        let frames = (self.base_interval_frames as f64 / self.transcription_speed).floor();
        if frames.is_finite() && frames >= 1.0 {
            frames as usize
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.dna_template, "TACGTACGTACGAAATT");
        assert_eq!(config.frames_per_base(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_frames_per_base() {
        let mut config = SimulationConfig::default();
        config.transcription_speed = 4.0;
        assert_eq!(config.frames_per_base(), 7);
        config.transcription_speed = 100.0;
        assert_eq!(config.frames_per_base(), 1);
        config.base_interval_frames = 0;
        assert_eq!(config.frames_per_base(), 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{"dna_template": "TACAAAATT", "seed": 7, "layout": {"trna_spawn_jitter": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(config.dna_template, "TACAAAATT");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.candidate_count, 3);
        assert_eq!(config.layout.trna_spawn_jitter, 0.0);
        assert_eq!(config.layout.trna_width, 50.0);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SimulationConfig::from_json_str(r#"{"dna_template": ""}"#).is_err());
        assert!(SimulationConfig::from_json_str(r#"{"transcription_speed": 0.0}"#).is_err());
        assert!(SimulationConfig::from_json_str(r#"{"candidate_count": 0}"#).is_err());
        assert!(SimulationConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"language": "de", "retry_budget": 5}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let config = SimulationConfig::load_from_path(&path).unwrap();
        assert_eq!(config.language, "de");
        assert_eq!(config.retry_budget, 5);
        assert!(SimulationConfig::load_from_path("/nonexistent/dogma.json").is_err());
    }
}
