//! Parser for edge lists stored as comma separated values.
//! Fields may be quoted with `"`, a doubled quote inside a
//! quoted field stands for a single one.

use std::io::BufRead;

use crate::{graph::Graph, parse_single_line, Error};

use super::{read_edge_list, EdgeRecord, Input, ParseResult};

fn parse_quoted_field(input: Input<'_>) -> ParseResult<'_, String> {
    use nom::{
        branch::alt,
        bytes::complete::{is_not, tag},
        character::complete::{char, space0},
        combinator::{map, value},
        multi::fold_many0,
        sequence::{delimited, preceded, terminated},
    };

    let fragment = alt((
        map(is_not("\""), String::from),
        value(String::from("\""), tag("\"\"")),
    ));
    let content = fold_many0(fragment, String::new, |mut field, fragment| {
        field.push_str(&fragment);
        field
    });
    let quoted = delimited(char('"'), content, char('"'));

    preceded(space0, terminated(quoted, space0))(input)
}

fn parse_plain_field(input: Input<'_>) -> ParseResult<'_, String> {
    use nom::{
        bytes::complete::is_not,
        combinator::{map, opt},
    };

    map(opt(is_not(",")), |field: Option<&str>| {
        field.unwrap_or_default().trim().to_string()
    })(input)
}

fn parse_fields(input: Input<'_>) -> ParseResult<'_, Vec<String>> {
    use nom::{branch::alt, character::complete::char, multi::separated_list1};

    separated_list1(char(','), alt((parse_quoted_field, parse_plain_field)))(input)
}

pub fn parse_csv_record(input: Input<'_>) -> Result<EdgeRecord, Error> {
    use nom::combinator::eof;

    parse_single_line!(fields, parse_fields(input));
    EdgeRecord::from_fields(fields)
}

pub fn parse_csv_input<B: BufRead>(input: B) -> Result<Graph, Error> {
    read_edge_list(input, parse_csv_record)
}
