//! Parser for edge lists with whitespace separated fields.

use std::io::BufRead;

use crate::{graph::Graph, parse_single_line, Error};

use super::{read_edge_list, EdgeRecord, Input, ParseResult};

fn parse_fields(input: Input<'_>) -> ParseResult<'_, Vec<String>> {
    use nom::{
        bytes::complete::is_not,
        character::complete::multispace0,
        combinator::map,
        multi::many1,
        sequence::{delimited, preceded},
    };

    let field = map(is_not(" \t\r\n"), String::from);
    delimited(multispace0, many1(preceded(multispace0, field)), multispace0)(input)
}

pub fn parse_txt_record(input: Input<'_>) -> Result<EdgeRecord, Error> {
    use nom::combinator::eof;

    parse_single_line!(fields, parse_fields(input));
    EdgeRecord::from_fields(fields)
}

pub fn parse_txt_input<B: BufRead>(input: B) -> Result<Graph, Error> {
    read_edge_list(input, parse_txt_record)
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use crate::Error;

    use super::*;

    #[test]
    fn test_parse_fields() -> Result<(), Error> {
        let parsed = parse_fields("a b 3")?.1;
        assert_eq!(vec!["a", "b", "3"], parsed);

        let parsed = parse_fields("\t lisboa   porto \t")?.1;
        assert_eq!(vec!["lisboa", "porto"], parsed);

        Ok(())
    }

    #[test]
    fn test_parse_txt_record() -> Result<(), Error> {
        let record = parse_txt_record("u v 2 extra")?;
        assert_eq!(("u", "v", 2), (&*record.origin, &*record.destination, record.weight));

        assert!(matches!(
            parse_txt_record("lonely"),
            Err(Error::MalformedRecord(_))
        ));

        Ok(())
    }

    #[test]
    fn test_parse_txt_input() -> Result<(), Error> {
        let txt = "A B
B C 5
  C   A
";
        let buf = BufReader::new(txt.as_bytes());
        let parsed = parse_txt_input(buf)?;

        let mut graph = Graph::new_empty();
        graph.add_edge("A", "B")?;
        graph.add_weighted_edge("B", "C", 5)?;
        graph.add_edge("C", "A")?;

        assert_eq!(graph, parsed);

        Ok(())
    }

    #[test]
    fn test_single_field_row_is_skipped() -> Result<(), Error> {
        let txt = "A B
orphan
B C
C D
";
        let buf = BufReader::new(txt.as_bytes());
        let parsed = parse_txt_input(buf)?;

        assert_eq!(3, parsed.number_edges());
        assert_eq!(None, parsed.index_of("orphan"));

        Ok(())
    }
}
