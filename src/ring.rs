use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Alert,
    Warning,
    Good,
}

impl ColorTier {
    /// Tier for a raw (unclamped) score.
    pub fn for_score(score: f64) -> Self {
        if score < 6.0 {
            ColorTier::Alert
        } else if score < 8.0 {
            ColorTier::Warning
        } else {
            ColorTier::Good
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorTier::Alert => "alert",
            ColorTier::Warning => "warning",
            ColorTier::Good => "good",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ColorTier::Alert => "#ef4444",
            ColorTier::Warning => "#facc15",
            ColorTier::Good => "#22c55e",
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub percent: f64,
    pub color: ColorTier,
    pub stroke_color: &'static str,
    pub circumference: f64,
    pub dash_offset: f64,
}

/// Geometry of the SGPA gauge.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub max: f64,
    pub radius: f64,
    pub stroke: f64,
}

impl Default for RingSpec {
    fn default() -> Self {
        RingSpec {
            max: 10.0,
            radius: 48.0,
            stroke: 8.0,
        }
    }
}

impl RingSpec {
    pub fn compute(&self, score: f64) -> RingParams {
        compute_ring(score, self.max, self.radius)
    }
}

pub fn compute_ring(score: f64, max: f64, radius: f64) -> RingParams {
    let percent = (score / max * 100.0).clamp(0.0, 100.0);
    let color = ColorTier::for_score(score);
    let circumference = 2.0 * PI * radius;
    let dash_offset = circumference - (percent / 100.0) * circumference;

    RingParams {
        percent,
        color,
        stroke_color: color.hex(),
        circumference,
        dash_offset,
    }
}
