//! Grid and sampling configuration authored in meters.
use crate::error::{Error, Result};
use crate::units::meters_to_cm;

/// Configuration for building and baking a height grid.
///
/// Distances are in meters; use the `*_cm` accessors for world units.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Cell width and height in meters.
    pub cell_size_meters: f32,
    /// Padding added around the terrain bounds on every side, in meters.
    pub padding_meters: f32,
    /// Sub-samples per cell along each axis.
    pub samples_per_axis: u32,
    /// Ray start height above the reference elevation, in meters.
    pub trace_above_meters: f32,
    /// Ray end depth below the reference elevation, in meters.
    pub trace_below_meters: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_meters: 100.0,
            padding_meters: 0.0,
            samples_per_axis: 3,
            trace_above_meters: 3000.0,
            trace_below_meters: 3000.0,
        }
    }
}

impl GridConfig {
    /// Creates a new [`GridConfig`] with the given cell size and defaults elsewhere.
    pub fn new(cell_size_meters: f32) -> Self {
        Self {
            cell_size_meters,
            ..Default::default()
        }
    }

    /// Sets the padding.
    pub fn with_padding_meters(mut self, padding_meters: f32) -> Self {
        self.padding_meters = padding_meters;
        self
    }

    /// Sets the sub-sample count per axis.
    pub fn with_samples_per_axis(mut self, samples_per_axis: u32) -> Self {
        self.samples_per_axis = samples_per_axis;
        self
    }

    /// Sets the trace span above and below the reference elevation.
    pub fn with_trace_span_meters(mut self, above: f32, below: f32) -> Self {
        self.trace_above_meters = above;
        self.trace_below_meters = below;
        self
    }

    pub fn cell_size_cm(&self) -> f32 {
        meters_to_cm(self.cell_size_meters)
    }

    pub fn padding_cm(&self) -> f32 {
        meters_to_cm(self.padding_meters)
    }

    pub fn trace_above_cm(&self) -> f32 {
        meters_to_cm(self.trace_above_meters)
    }

    pub fn trace_below_cm(&self) -> f32 {
        meters_to_cm(self.trace_below_meters)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size_meters.is_finite() && self.cell_size_meters > 0.0) {
            return Err(Error::InvalidConfig("cell_size_meters must be > 0".into()));
        }
        if !(self.padding_meters.is_finite() && self.padding_meters >= 0.0) {
            return Err(Error::InvalidConfig("padding_meters must be >= 0".into()));
        }
        if self.samples_per_axis == 0 {
            return Err(Error::InvalidConfig("samples_per_axis must be >= 1".into()));
        }
        if !(self.trace_above_meters.is_finite() && self.trace_below_meters.is_finite()) {
            return Err(Error::InvalidConfig("trace span must be finite".into()));
        }
        if self.trace_above_meters + self.trace_below_meters <= 0.0 {
            return Err(Error::InvalidConfig(
                "trace span must cover a positive height range".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GridConfig::default();
        assert_eq!(config.cell_size_meters, 100.0);
        assert_eq!(config.padding_meters, 0.0);
        assert_eq!(config.samples_per_axis, 3);
        assert_eq!(config.trace_above_cm(), 300_000.0);
        assert_eq!(config.trace_below_cm(), 300_000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters_apply() {
        let config = GridConfig::new(5.0)
            .with_padding_meters(2.0)
            .with_samples_per_axis(4)
            .with_trace_span_meters(10.0, 20.0);
        assert_eq!(config.cell_size_cm(), 500.0);
        assert_eq!(config.padding_cm(), 200.0);
        assert_eq!(config.samples_per_axis, 4);
        assert_eq!(config.trace_above_cm(), 1000.0);
        assert_eq!(config.trace_below_cm(), 2000.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(matches!(
            GridConfig::new(0.0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::new(1.0).with_padding_meters(-1.0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::new(1.0).with_samples_per_axis(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::new(1.0)
                .with_trace_span_meters(0.0, 0.0)
                .validate(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
