//! Debug facilities.
use nom::error::{VerboseError, VerboseErrorKind};
use std::{
    fmt::{self, Debug, Display},
    io,
};

use crate::{graph::GraphError, parser::ParseError};

// Error types and From<...> implementations

/// A command line or menu option that names nothing we know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl Display for UnknownOption {
    #[cfg(not(tarpaulin_include))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option `{}`", self.0)
    }
}

impl std::error::Error for UnknownOption {}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Graph construction error: {0}")]
    GraphError(GraphError),
    #[error("The graph is empty")]
    EmptyGraph,
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Error while parsing record")]
    ParseError(Vec<VerboseErrorKind>),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Vertex label {0:?} cannot be written to a whitespace separated file")]
    UnrepresentableLabel(String),
    #[error("Hamiltonian search gave up after {steps} steps")]
    SearchBudgetExhausted { steps: u64 },
    #[error("{0}")]
    UnknownOption(UnknownOption),
    #[error("I/O error: {0}")]
    IoError(io::Error),
}

impl From<GraphError> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(ge: GraphError) -> Self {
        Self::GraphError(ge)
    }
}

#[cfg(not(tarpaulin_include))]
fn handle_nom_verbose_error<E: Debug>(verbose: VerboseError<E>) -> Vec<VerboseErrorKind> {
    verbose
        .errors
        .into_iter()
        .map(|(input, kind)| {
            tracing::trace!(?input, ?kind, "parser backtrace");
            kind
        })
        .collect()
}

impl<'a> From<nom::Err<ParseError<'a>>> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(pe: nom::Err<ParseError<'a>>) -> Self {
        match pe {
            nom::Err::Error(verbose) | nom::Err::Failure(verbose) => {
                Self::ParseError(handle_nom_verbose_error(verbose))
            }
            // Only complete parsers are used.
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}

impl From<io::Error> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(ie: io::Error) -> Self {
        Self::IoError(ie)
    }
}

impl From<UnknownOption> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(uo: UnknownOption) -> Self {
        Self::UnknownOption(uo)
    }
}

// Debug macros that allow to time single expressions

#[macro_export]
macro_rules! time {
    ($i:ident, $ret:ident, $exp:expr) => {
        let before = std::time::Instant::now();
        let $ret = $exp;
        let $i = before.elapsed();
    };
}

#[macro_export]
macro_rules! parse_single_line {
    ($ret:ident, $exp:expr) => {
        let (res, $ret) = $exp?;
        eof::<crate::parser::Input<'_>, crate::parser::ParseError<'_>>(res)?;
    };
}
