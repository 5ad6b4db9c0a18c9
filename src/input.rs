//! Reading graphs from files and lines from the user.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};
use tracing::info;

use crate::{
    graph::Graph,
    parser::{parse_csv_input, parse_txt_input},
    Error,
};

/// File formats the edge list loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeListFormat {
    Csv,
    Txt,
}

impl EdgeListFormat {
    /// Pick the format from the file extension, case insensitive.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("txt") => Ok(Self::Txt),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn read_graph<B: BufRead>(input: B, format: EdgeListFormat) -> Result<Graph, Error> {
    match format {
        EdgeListFormat::Csv => parse_csv_input(input),
        EdgeListFormat::Txt => parse_txt_input(input),
    }
}

/// Load a graph from an edge list file. The format is checked before the
/// file is opened.
pub fn load_graph(path: &Path) -> Result<Graph, Error> {
    let format = EdgeListFormat::from_path(path)?;
    let file = File::open(path)?;

    let graph = read_graph(BufReader::new(file), format)?;
    info!(
        path = %path.display(),
        vertices = graph.size(),
        edges = graph.number_edges(),
        "graph loaded"
    );

    Ok(graph)
}

/// Print `prompt` and read one line, without its line break.
/// Returns `None` once the input is exhausted.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, io::Error> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Like [`read_line`], but asks again until the answer is not blank.
pub fn read_non_blank<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, io::Error> {
    loop {
        match read_line(input, output, prompt)? {
            Some(line) if line.trim().is_empty() => {
                writeln!(output, "Please type something.")?;
            }
            Some(line) => return Ok(Some(line.trim().to_string())),
            None => return Ok(None),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_format_from_path() -> Result<(), Error> {
        assert_eq!(EdgeListFormat::Csv, EdgeListFormat::from_path(Path::new("a.csv"))?);
        assert_eq!(EdgeListFormat::Txt, EdgeListFormat::from_path(Path::new("dir/a.TXT"))?);
        assert!(matches!(
            EdgeListFormat::from_path(Path::new("a.json")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            EdgeListFormat::from_path(Path::new("noextension")),
            Err(Error::UnsupportedFormat(_))
        ));

        Ok(())
    }

    #[test]
    fn test_load_graph() -> Result<(), Error> {
        let dir = tempdir()?;
        let path = dir.path().join("cities.txt");
        std::fs::write(&path, "Lisboa Porto 313\nPorto Braga 55\n")?;

        let graph = load_graph(&path)?;
        assert_eq!(3, graph.size());
        assert_eq!(Some(313), graph.weight("Porto", "Lisboa"));

        Ok(())
    }

    #[test]
    fn test_load_missing_or_unsupported() -> Result<(), Error> {
        let dir = tempdir()?;

        assert!(matches!(
            load_graph(&dir.path().join("missing.csv")),
            Err(Error::IoError(_))
        ));

        // Unsupported formats are rejected even if the file does not exist.
        assert!(matches!(
            load_graph(&dir.path().join("missing.xlsx")),
            Err(Error::UnsupportedFormat(_))
        ));

        Ok(())
    }

    #[test]
    fn test_read_line() -> Result<(), Error> {
        let mut input = Cursor::new("first\r\n\n  \nlast");
        let mut output = Vec::new();

        assert_eq!(Some("first".to_string()), read_line(&mut input, &mut output, "> ")?);
        assert_eq!(Some("last".to_string()), read_non_blank(&mut input, &mut output, "> ")?);
        assert_eq!(None, read_line(&mut input, &mut output, "> ")?);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(2, printed.matches("Please type something.").count());

        Ok(())
    }
}
