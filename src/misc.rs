use std::{fmt, path::PathBuf, str::FromStr};

use crate::debug::UnknownOption;

/// Number of path extensions the Hamiltonian search
/// may try before it gives up.
pub const DEFAULT_HAMILTONIAN_BUDGET: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanarityMethod {
    /// Left-right planarity test.
    Exact,
    /// Degree based guess for K5 and K3,3. Not a planarity test.
    Heuristic,
}

impl Default for PlanarityMethod {
    fn default() -> Self {
        Self::Exact
    }
}

impl FromStr for PlanarityMethod {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "exact" {
            Ok(Self::Exact)
        } else if s == "heuristic" {
            Ok(Self::Heuristic)
        } else {
            Err(UnknownOption(s.to_string()))
        }
    }
}

impl fmt::Display for PlanarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// How `is_planar` is decided.
    pub planarity: PlanarityMethod,
    /// Step limit for the Hamiltonian search, `None` means unbounded.
    pub hamiltonian_budget: Option<u64>,
    /// Where the `show` action writes the DOT rendering.
    pub dot_output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            planarity: PlanarityMethod::default(),
            hamiltonian_budget: Some(DEFAULT_HAMILTONIAN_BUDGET),
            dot_output: PathBuf::from("graph.dot"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_planarity_method() {
        assert_eq!(Ok(PlanarityMethod::Exact), "exact".parse());
        assert_eq!(Ok(PlanarityMethod::Heuristic), "heuristic".parse());
        assert_eq!(
            Err(UnknownOption("kuratowski".to_string())),
            "kuratowski".parse::<PlanarityMethod>()
        );
    }
}
