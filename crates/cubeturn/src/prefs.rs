use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Animation and interaction settings for a [`crate::CubeSimulation`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Seconds per quarter turn.
    pub twist_duration: f32,
    /// Edge length of one cubie.
    pub cubie_size: f32,
    /// Gap between neighboring cubies.
    pub cubie_spacing: f32,
    /// Pointer travel in pixels before a press counts as a drag.
    pub drag_threshold: f32,
}

impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.3,
            cubie_size: 0.5,
            cubie_spacing: 0.015,
            drag_threshold: 30.0,
        }
    }
}

impl AnimationPreferences {
    /// Returns the duration of one quarter turn. Negative or non-finite values
    /// are treated as zero.
    pub fn twist_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.twist_duration).unwrap_or(Duration::ZERO)
    }

    /// Returns the distance between neighboring slot centers.
    pub fn pitch(&self) -> f32 {
        self.cubie_size + self.cubie_spacing
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs() {
        let prefs = AnimationPreferences::default();
        let secs = prefs.twist_duration().as_secs_f64();
        assert!((secs - 0.3).abs() < 1e-6, "{secs}");
        assert!((prefs.pitch() - 0.515).abs() < 1e-6);
    }

    #[test]
    fn test_partial_prefs_use_defaults() {
        let json = r#"{"twist_duration": 1.5}"#;
        let prefs: AnimationPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.twist_duration(), Duration::from_millis(1500));
        assert_eq!(prefs.drag_threshold, 30.0);
    }

    #[test]
    fn test_invalid_duration_is_zero() {
        let prefs = AnimationPreferences {
            twist_duration: -1.0,
            ..Default::default()
        };
        assert_eq!(prefs.twist_duration(), Duration::ZERO);
    }
}
