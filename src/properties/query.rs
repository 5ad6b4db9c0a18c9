//! Property query facade: maps a selector to the
//! check that computes it. No algorithms live here.

use itertools::{Itertools, MinMaxResult};
use rayon::prelude::*;
use std::{fmt, str::FromStr};
use tracing::debug;

use crate::{debug::UnknownOption, graph::Graph, misc::Settings, time, Error};

use super::{
    invariants::{chromatic_number, is_eulerian, is_hamiltonian},
    planarity::is_planar_with,
    structure::{has_cycle, is_bipartite, is_complete, is_connected, is_tree},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Degree,
    ChromaticNumber,
    HasCycle,
    IsConnected,
    IsBipartite,
    IsComplete,
    IsEulerian,
    IsHamiltonian,
    IsTree,
    IsPlanar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Count(usize),
    DegreeRange { min: usize, max: usize },
}

impl Property {
    /// Menu order.
    pub const ALL: [Property; 10] = [
        Property::Degree,
        Property::ChromaticNumber,
        Property::HasCycle,
        Property::IsConnected,
        Property::IsBipartite,
        Property::IsComplete,
        Property::IsEulerian,
        Property::IsHamiltonian,
        Property::IsTree,
        Property::IsPlanar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::ChromaticNumber => "chromatic_number",
            Self::HasCycle => "has_cycle",
            Self::IsConnected => "is_connected",
            Self::IsBipartite => "is_bipartite",
            Self::IsComplete => "is_complete",
            Self::IsEulerian => "is_eulerian",
            Self::IsHamiltonian => "is_hamiltonian",
            Self::IsTree => "is_tree",
            Self::IsPlanar => "is_planar",
        }
    }

    /// Menu entry text.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Degree => "Graph degree",
            Self::ChromaticNumber => "Chromatic number",
            Self::HasCycle => "Cyclic graph",
            Self::IsConnected => "Connected graph",
            Self::IsBipartite => "Bipartite graph",
            Self::IsComplete => "Complete graph",
            Self::IsEulerian => "Eulerian graph",
            Self::IsHamiltonian => "Hamiltonian graph",
            Self::IsTree => "Tree",
            Self::IsPlanar => "Planar graph",
        }
    }

    /// Human readable sentence for a computed value.
    pub fn describe(&self, value: &PropertyValue) -> String {
        let adjective = match self {
            Self::IsConnected => "connected",
            Self::IsBipartite => "bipartite",
            Self::IsComplete => "complete",
            Self::IsEulerian => "Eulerian",
            Self::IsHamiltonian => "Hamiltonian",
            Self::IsTree => "a tree",
            Self::IsPlanar => "planar",
            Self::Degree | Self::ChromaticNumber | Self::HasCycle => "",
        };

        match (self, value) {
            (_, PropertyValue::DegreeRange { min, max }) => format!(
                "The maximum degree of the graph is {}.\nThe minimum degree of the graph is {}.",
                max, min
            ),
            (_, PropertyValue::Count(colours)) => format!(
                "Chromatic number of the graph (greedy upper bound): {}",
                colours
            ),
            (Self::HasCycle, PropertyValue::Bool(true)) => "The graph contains cycles.".to_string(),
            (Self::HasCycle, PropertyValue::Bool(false)) => {
                "The graph contains no cycles.".to_string()
            }
            (_, PropertyValue::Bool(true)) => format!("The graph is {}.", adjective),
            (_, PropertyValue::Bool(false)) => format!("The graph is not {}.", adjective),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Property {
    type Err = UnknownOption;

    /// Accepts the selector names and the menu numbers `1` to `10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| Self::ALL.get(index).copied())
                .ok_or_else(|| UnknownOption(s.to_string()));
        }

        Self::ALL
            .iter()
            .find(|property| property.name() == s)
            .copied()
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Count(value) => write!(f, "{}", value),
            Self::DegreeRange { min, max } => write!(f, "{}..={}", min, max),
        }
    }
}

/// Minimum and maximum vertex degree.
pub fn degree_range(graph: &Graph) -> Result<(usize, usize), Error> {
    match graph.degrees().minmax() {
        MinMaxResult::NoElements => Err(Error::EmptyGraph),
        MinMaxResult::OneElement(degree) => Ok((degree, degree)),
        MinMaxResult::MinMax(min, max) => Ok((min, max)),
    }
}

pub fn query(
    graph: &Graph,
    property: Property,
    settings: &Settings,
) -> Result<PropertyValue, Error> {
    use PropertyValue::*;

    let value = match property {
        Property::Degree => {
            let (min, max) = degree_range(graph)?;
            DegreeRange { min, max }
        }
        Property::ChromaticNumber => Count(chromatic_number(graph)),
        Property::HasCycle => Bool(has_cycle(graph)),
        Property::IsConnected => Bool(is_connected(graph)),
        Property::IsBipartite => Bool(is_bipartite(graph)),
        Property::IsComplete => Bool(is_complete(graph)),
        Property::IsEulerian => Bool(is_eulerian(graph)),
        Property::IsHamiltonian => Bool(is_hamiltonian(graph, settings.hamiltonian_budget)?),
        Property::IsTree => Bool(is_tree(graph)),
        Property::IsPlanar => Bool(is_planar_with(graph, settings.planarity)),
    };

    Ok(value)
}

/// Evaluate every property on the rayon pool. The report
/// keeps the menu order and one result per property.
pub fn query_all(
    graph: &Graph,
    settings: &Settings,
) -> Vec<(Property, Result<PropertyValue, Error>)> {
    Property::ALL
        .par_iter()
        .map(|property| {
            time!(elapsed, result, query(graph, *property, settings));
            debug!(property = %property, ?elapsed, "property evaluated");
            (*property, result)
        })
        .collect()
}
