use std::collections::HashMap;

use indexmap::IndexMap;

use crate::core::{ContinuousColorScale, EnsembleIdent};
use crate::error::{PlotError, PlotResult};

/// Colors realizations by the value of one continuous model parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterColoring {
    parameter_name: String,
    values: IndexMap<EnsembleIdent, HashMap<u32, f64>>,
    color_scale: ContinuousColorScale,
}

impl ParameterColoring {
    /// Builds a coloring whose scale spans all finite parameter values.
    pub fn new(
        parameter_name: impl Into<String>,
        values: IndexMap<EnsembleIdent, HashMap<u32, f64>>,
    ) -> PlotResult<Self> {
        let parameter_name = parameter_name.into();
        let (min, max) = values
            .iter()
            .filter(|(ensemble, _)| !ensemble.is_delta())
            .flat_map(|(_, per_realization)| per_realization.values().copied())
            .filter(|value| value.is_finite())
            .fold(None, |range: Option<(f64, f64)>, value| match range {
                Some((min, max)) => Some((min.min(value), max.max(value))),
                None => Some((value, value)),
            })
            .ok_or_else(|| {
                PlotError::Configuration(format!(
                    "parameter `{parameter_name}` has no finite values to color by"
                ))
            })?;
        let color_scale = ContinuousColorScale::viridis(min, max)?;
        Ok(Self {
            parameter_name,
            values,
            color_scale,
        })
    }

    #[must_use]
    pub fn with_color_scale(mut self, color_scale: ContinuousColorScale) -> Self {
        self.color_scale = color_scale;
        self
    }

    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    #[must_use]
    pub fn color_scale(&self) -> &ContinuousColorScale {
        &self.color_scale
    }

    /// Whether realizations of `ensemble` can be colored by this parameter.
    #[must_use]
    pub fn is_eligible(&self, ensemble: &EnsembleIdent) -> bool {
        !ensemble.is_delta() && self.values.contains_key(ensemble)
    }

    /// Scale color for one realization, `None` when it has no usable value.
    #[must_use]
    pub fn color_for(&self, ensemble: &EnsembleIdent, realization: u32) -> Option<String> {
        if !self.is_eligible(ensemble) {
            return None;
        }
        self.values
            .get(ensemble)
            .and_then(|per_realization| per_realization.get(&realization))
            .filter(|value| value.is_finite())
            .map(|&value| self.color_scale.color_for_value(value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use super::ParameterColoring;
    use crate::core::EnsembleIdent;

    fn coloring() -> ParameterColoring {
        let mut values = IndexMap::new();
        values.insert(
            EnsembleIdent::regular("case", "iter-0"),
            HashMap::from([(0, 1.0), (1, 3.0), (2, f64::NAN)]),
        );
        values.insert(EnsembleIdent::delta("case", "delta"), HashMap::from([(0, 100.0)]));
        ParameterColoring::new("PERMX", values).expect("coloring")
    }

    #[test]
    fn scale_range_ignores_delta_and_non_finite_values() {
        assert_eq!(coloring().color_scale().range(), (1.0, 3.0));
    }

    #[test]
    fn missing_or_ineligible_values_have_no_color() {
        let coloring = coloring();
        let regular = EnsembleIdent::regular("case", "iter-0");
        assert!(coloring.color_for(&regular, 0).is_some());
        assert!(coloring.color_for(&regular, 2).is_none());
        assert!(coloring.color_for(&regular, 9).is_none());
        assert!(
            coloring
                .color_for(&EnsembleIdent::delta("case", "delta"), 0)
                .is_none()
        );
    }

    #[test]
    fn parameter_without_values_is_a_configuration_error() {
        assert!(ParameterColoring::new("EMPTY", IndexMap::new()).is_err());
    }
}
