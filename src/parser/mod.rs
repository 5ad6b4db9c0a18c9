//! Parsers for edge lists. Every line holds one
//! record `origin destination [weight]`; the two
//! supported formats only differ in the field separator.

use std::io::BufRead;
use tracing::{debug, warn};

use crate::{
    graph::{Graph, Weight, DEFAULT_WEIGHT},
    parse_single_line, Error,
};

mod csv_parser;
mod txt_parser;

pub use csv_parser::parse_csv_input;
pub use txt_parser::parse_txt_input;

pub type Input<'a> = &'a str;
pub type ParseError<'a> = nom::error::VerboseError<Input<'a>>;
pub type ParseResult<'a, O> = nom::IResult<Input<'a>, O, ParseError<'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub origin: String,
    pub destination: String,
    pub weight: Weight,
}

fn parse_weight(input: Input<'_>) -> Result<Weight, Error> {
    use nom::{character::complete::u32, combinator::eof};

    parse_single_line!(weight, u32::<Input<'_>, ParseError<'_>>(input));
    Ok(weight)
}

impl EdgeRecord {
    /// Build a record from the split fields of one line. Fields after
    /// the third are ignored.
    pub fn from_fields(fields: Vec<String>) -> Result<Self, Error> {
        let mut fields = fields.into_iter();
        let (origin, destination) = match (fields.next(), fields.next()) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                return Err(Error::MalformedRecord(
                    "expected at least two fields".to_string(),
                ))
            }
        };

        let weight = match fields.next() {
            Some(field) => parse_weight(field.trim()).map_err(|_| {
                Error::MalformedRecord(format!("weight {:?} is not a non-negative integer", field))
            })?,
            None => DEFAULT_WEIGHT,
        };

        Ok(EdgeRecord {
            origin,
            destination,
            weight,
        })
    }
}

/// Read an edge list line by line. Blank lines are ignored and malformed
/// records are logged and skipped; I/O errors abort the whole read.
pub(crate) fn read_edge_list<B, F>(input: B, parse_record: F) -> Result<Graph, Error>
where
    B: BufRead,
    F: Fn(Input<'_>) -> Result<EdgeRecord, Error>,
{
    let mut graph = Graph::new_empty();
    let mut skipped = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let added = parse_record(line).and_then(|record| {
            graph
                .add_weighted_edge(&record.origin, &record.destination, record.weight)
                .map_err(Error::from)
        });

        if let Err(error) = added {
            warn!(line = number + 1, %error, "skipping record");
            skipped += 1;
        }
    }

    debug!(
        vertices = graph.size(),
        edges = graph.number_edges(),
        skipped,
        "edge list read"
    );

    Ok(graph)
}

#[cfg(test)]
mod test {
    use super::*;

    fn fields(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn test_record_from_fields() -> Result<(), Error> {
        let record = EdgeRecord::from_fields(fields(&["a", "b"]))?;
        assert_eq!(
            EdgeRecord {
                origin: "a".to_string(),
                destination: "b".to_string(),
                weight: DEFAULT_WEIGHT
            },
            record
        );

        let record = EdgeRecord::from_fields(fields(&["a", "b", "12", "ignored"]))?;
        assert_eq!(12, record.weight);

        Ok(())
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            EdgeRecord::from_fields(fields(&["lonely"])),
            Err(Error::MalformedRecord(_))
        ));
        assert!(matches!(
            EdgeRecord::from_fields(fields(&["a", "b", "heavy"])),
            Err(Error::MalformedRecord(_))
        ));
        assert!(matches!(
            EdgeRecord::from_fields(fields(&["a", "b", "-3"])),
            Err(Error::MalformedRecord(_))
        ));
        assert!(matches!(
            EdgeRecord::from_fields(fields(&["a", "b", "4x"])),
            Err(Error::MalformedRecord(_))
        ));
    }
}
