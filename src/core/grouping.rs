use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::core::{EnsembleIdent, Frequency, SubplotOwner, VectorSpecification, vector_description};

/// Decides subplot placement and legend grouping for vector specifications.
pub trait GroupingStrategy: fmt::Debug + Send + Sync {
    fn owner(&self) -> SubplotOwner;

    /// Number of distinct subplots the strategy places specifications into.
    fn subplot_count(&self) -> usize;

    /// Subplot of `specification`, or `None` when its key is unknown.
    fn subplot_index(&self, specification: &VectorSpecification) -> Option<usize>;

    fn legend_group(&self, specification: &VectorSpecification) -> String;

    fn trace_name(&self, specification: &VectorSpecification) -> String;

    /// Titles in subplot index order, before any unit information is known.
    fn subplot_titles(&self, frequency: Option<Frequency>) -> Vec<String>;
}

/// One subplot per vector, one legend group per ensemble.
#[derive(Debug, Clone, Default)]
pub struct VectorSubplotGrouping {
    vector_names: IndexSet<String>,
}

impl VectorSubplotGrouping {
    #[must_use]
    pub fn new(specifications: &[VectorSpecification]) -> Self {
        Self {
            vector_names: specifications
                .iter()
                .map(|specification| specification.vector_name.clone())
                .collect(),
        }
    }
}

impl GroupingStrategy for VectorSubplotGrouping {
    fn owner(&self) -> SubplotOwner {
        SubplotOwner::Vector
    }

    fn subplot_count(&self) -> usize {
        self.vector_names.len()
    }

    fn subplot_index(&self, specification: &VectorSpecification) -> Option<usize> {
        self.vector_names.get_index_of(&specification.vector_name)
    }

    fn legend_group(&self, specification: &VectorSpecification) -> String {
        specification.ensemble_ident.to_string()
    }

    fn trace_name(&self, specification: &VectorSpecification) -> String {
        specification.ensemble_display_name.clone()
    }

    fn subplot_titles(&self, frequency: Option<Frequency>) -> Vec<String> {
        self.vector_names
            .iter()
            .map(|name| vector_description(name, frequency))
            .collect()
    }
}

/// One subplot per ensemble, one legend group per vector.
#[derive(Debug, Clone, Default)]
pub struct EnsembleSubplotGrouping {
    ensembles: IndexMap<EnsembleIdent, String>,
}

impl EnsembleSubplotGrouping {
    #[must_use]
    pub fn new(specifications: &[VectorSpecification]) -> Self {
        let mut ensembles = IndexMap::new();
        for specification in specifications {
            ensembles
                .entry(specification.ensemble_ident.clone())
                .or_insert_with(|| specification.ensemble_display_name.clone());
        }
        Self { ensembles }
    }
}

impl GroupingStrategy for EnsembleSubplotGrouping {
    fn owner(&self) -> SubplotOwner {
        SubplotOwner::Ensemble
    }

    fn subplot_count(&self) -> usize {
        self.ensembles.len()
    }

    fn subplot_index(&self, specification: &VectorSpecification) -> Option<usize> {
        self.ensembles.get_index_of(&specification.ensemble_ident)
    }

    fn legend_group(&self, specification: &VectorSpecification) -> String {
        specification.vector_name.clone()
    }

    fn trace_name(&self, specification: &VectorSpecification) -> String {
        specification.vector_name.clone()
    }

    fn subplot_titles(&self, _frequency: Option<Frequency>) -> Vec<String> {
        self.ensembles.values().cloned().collect()
    }
}

/// Selects the grouping strategy for `owner`.
#[must_use]
pub fn grouping_for(
    owner: SubplotOwner,
    specifications: &[VectorSpecification],
) -> Box<dyn GroupingStrategy> {
    match owner {
        SubplotOwner::Vector => Box::new(VectorSubplotGrouping::new(specifications)),
        SubplotOwner::Ensemble => Box::new(EnsembleSubplotGrouping::new(specifications)),
    }
}
