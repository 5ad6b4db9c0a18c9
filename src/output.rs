//! Writers for the edge list formats and Graphviz DOT.

use itertools::Itertools;
use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::{
    graph::{Graph, DEFAULT_WEIGHT},
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Txt,
    Dot,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("txt") => Ok(Self::Txt),
            Some("dot") | Some("gv") => Ok(Self::Dot),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn csv_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field.contains(&[',', '"', '\n', '\r'][..]) || field.trim() != field;

    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn write_csv(writer: &mut impl Write, graph: &Graph) -> Result<(), Error> {
    for (start, end, weight) in graph.iterate_edges() {
        writeln!(writer, "{},{},{}", csv_field(start), csv_field(end), weight)?;
    }

    writer.flush().map_err(Error::from)
}

/// Whitespace separated edge list. Fails before writing anything if a
/// label cannot be told apart from the separator.
pub fn write_txt(writer: &mut impl Write, graph: &Graph) -> Result<(), Error> {
    if let Some(label) = graph
        .labels()
        .find(|label| label.contains(char::is_whitespace))
    {
        return Err(Error::UnrepresentableLabel(label.to_string()));
    }

    for (start, end, weight) in graph.iterate_edges() {
        writeln!(writer, "{} {} {}", start, end, weight)?;
    }

    writer.flush().map_err(Error::from)
}

fn dot_id(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Undirected DOT document, edge weights other than one become labels.
/// Isolated vertices cannot occur, so the edges name every vertex.
pub fn write_dot(writer: &mut impl Write, graph: &Graph) -> Result<(), Error> {
    writeln!(writer, "graph G {{")?;

    for (start, end, weight) in graph.iterate_edges() {
        write!(writer, "    {} -- {}", dot_id(start), dot_id(end))?;
        if weight != DEFAULT_WEIGHT {
            write!(writer, " [label={}]", weight)?;
        }
        writeln!(writer, ";")?;
    }

    writeln!(writer, "}}")?;
    writer.flush().map_err(Error::from)
}

/// Adjacency overview for the terminal, one vertex per line.
pub fn write_adjacency(writer: &mut impl Write, graph: &Graph) -> Result<(), Error> {
    for label in graph.labels() {
        let neighbours = graph
            .neighbours(label)
            .into_iter()
            .flatten()
            .join(", ");
        let degree = graph.degree(label).unwrap_or_default();
        writeln!(writer, "{} (degree {}): {}", label, degree, neighbours)?;
    }

    Ok(())
}

/// Save the graph in the format given by the extension of `path`.
/// Nothing is created if the format is unknown or a label can not be
/// represented in it.
pub fn save_graph(graph: &Graph, path: &Path) -> Result<(), Error> {
    let format = OutputFormat::from_path(path)?;

    // Render first so a failing writer leaves no half written file.
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Csv => write_csv(&mut buffer, graph)?,
        OutputFormat::Txt => write_txt(&mut buffer, graph)?,
        OutputFormat::Dot => write_dot(&mut buffer, graph)?,
    }

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&buffer)?;
    file.flush()?;

    info!(
        path = %path.display(),
        ?format,
        edges = graph.number_edges(),
        "graph saved"
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use tempfile::tempdir;

    use super::*;
    use crate::input::load_graph;

    fn sample() -> Result<Graph, Error> {
        let mut graph = Graph::new_empty();
        graph.add_weighted_edge("Lisboa", "Porto", 313)?;
        graph.add_edge("Porto", "Braga")?;
        graph.add_weighted_edge("Braga", "Lisboa", 0)?;
        Ok(graph)
    }

    #[test]
    fn test_write_csv() -> Result<(), Error> {
        let mut graph = Graph::new_empty();
        graph.add_weighted_edge("Smith, John", "say \"hi\"", 2)?;
        graph.add_edge(" padded", "plain")?;

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &graph)?;

        assert_eq!(
            "\"Smith, John\",\"say \"\"hi\"\"\",2\n\" padded\",plain,1\n",
            String::from_utf8(buffer).unwrap()
        );

        Ok(())
    }

    #[test]
    fn test_write_txt_rejects_spaces() -> Result<(), Error> {
        let mut graph = sample()?;
        graph.add_edge("São Paulo", "Porto")?;

        let mut buffer = Vec::new();
        assert!(matches!(
            write_txt(&mut buffer, &graph),
            Err(Error::UnrepresentableLabel(label)) if label == "São Paulo"
        ));
        assert!(buffer.is_empty());

        let dir = tempdir()?;
        let path = dir.path().join("graph.txt");
        assert!(save_graph(&graph, &path).is_err());
        assert!(!path.exists());

        Ok(())
    }

    #[test]
    fn test_write_dot() -> Result<(), Error> {
        let mut graph = Graph::new_empty();
        graph.add_edge("a", "b")?;
        graph.add_weighted_edge("b", "say \"c\"", 4)?;

        let mut buffer = Vec::new();
        write_dot(&mut buffer, &graph)?;

        assert_eq!(
            "graph G {\n    \"a\" -- \"b\";\n    \"b\" -- \"say \\\"c\\\"\" [label=4];\n}\n",
            String::from_utf8(buffer).unwrap()
        );

        Ok(())
    }

    #[test]
    fn test_write_adjacency() -> Result<(), Error> {
        let mut buffer = Vec::new();
        write_adjacency(&mut buffer, &sample()?)?;

        assert_eq!(
            concat!(
                "Lisboa (degree 2): Porto, Braga\n",
                "Porto (degree 2): Lisboa, Braga\n",
                "Braga (degree 2): Porto, Lisboa\n"
            ),
            String::from_utf8(buffer).unwrap()
        );

        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), Error> {
        let graph = sample()?;
        let dir = tempdir()?;

        for name in ["graph.csv", "graph.txt"] {
            let path = dir.path().join(name);
            save_graph(&graph, &path)?;
            assert_eq!(graph, load_graph(&path)?);
        }

        Ok(())
    }

    #[test]
    fn test_save_unsupported() -> Result<(), Error> {
        let dir = tempdir()?;
        let path = dir.path().join("graph.xml");

        assert!(matches!(
            save_graph(&sample()?, &path),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(!path.exists());

        Ok(())
    }

    fn arb_graph(label: &'static str) -> impl Strategy<Value = Graph> {
        prop::collection::vec((label, label, 0u32..100), 1..12).prop_map(|edges| {
            let mut graph = Graph::new_empty();
            for (start, end, weight) in &edges {
                // Blank labels and self-loops are rejected by the store.
                let _ = graph.add_weighted_edge(start, end, *weight);
            }
            graph
        })
    }

    proptest! {
        #[test]
        fn csv_round_trip_keeps_edges(graph in arb_graph("[a-zA-Z0-9 ,\"]{1,6}")) {
            prop_assume!(!graph.is_empty());

            let mut buffer = Vec::new();
            write_csv(&mut buffer, &graph).unwrap();
            let reloaded = crate::parser::parse_csv_input(&buffer[..]).unwrap();

            prop_assert_eq!(graph, reloaded);
        }

        #[test]
        fn txt_round_trip_keeps_edges(graph in arb_graph("[a-zA-Z0-9_,\"-]{1,6}")) {
            prop_assume!(!graph.is_empty());

            let mut buffer = Vec::new();
            write_txt(&mut buffer, &graph).unwrap();
            let reloaded = crate::parser::parse_txt_input(&buffer[..]).unwrap();

            prop_assert_eq!(graph, reloaded);
        }
    }
}
