//! Interactive session: owns the current graph and drives the text menu.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::{
    graph::Graph,
    input::{load_graph, read_line, read_non_blank},
    misc::Settings,
    output::{save_graph, write_adjacency, write_dot, OutputFormat},
    properties::{query, query_all, Property, PropertyValue},
    Error,
};

const STOP_WORDS: [&str; 2] = ["fim", "end"];

#[derive(Debug)]
pub struct Session {
    graph: Graph,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Session {
            graph: Graph::new_empty(),
            settings,
        }
    }

    #[cfg(test)]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn add_edge(&mut self, origin: &str, destination: &str) -> Result<(), Error> {
        self.graph.add_edge(origin, destination).map_err(Error::from)
    }

    /// Replace the current graph with the one stored at `path`.
    /// On failure the current graph stays as it was.
    pub fn open(&mut self, path: &Path) -> Result<(), Error> {
        self.graph = load_graph(path)?;
        Ok(())
    }

    /// Save in the format given by the extension, which has to match
    /// `expected` when one is given.
    pub fn save(&self, path: &Path, expected: Option<OutputFormat>) -> Result<(), Error> {
        if let Some(expected) = expected {
            if OutputFormat::from_path(path)? != expected {
                return Err(Error::UnsupportedFormat(path.display().to_string()));
            }
        }

        save_graph(&self.graph, path)
    }

    /// Write the graph as DOT to the configured output path.
    pub fn show(&self) -> Result<&Path, Error> {
        let path = self.settings.dot_output.as_path();
        let mut file = BufWriter::new(File::create(path)?);
        write_dot(&mut file, &self.graph)?;
        info!(path = %path.display(), "graph rendered");

        Ok(path)
    }

    pub fn query(&self, property: Property) -> Result<PropertyValue, Error> {
        query(&self.graph, property, &self.settings)
    }

    /// Every property with its outcome, in menu order.
    pub fn report(&self) -> Vec<(Property, Result<PropertyValue, Error>)> {
        query_all(&self.graph, &self.settings)
    }

    /// Run the main menu until the user quits or the input ends.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), Error> {
        writeln!(output, "Welcome! Build, inspect and store undirected graphs.")?;

        loop {
            writeln!(output)?;
            writeln!(output, "Menu:")?;
            writeln!(output, "1. Create graph")?;
            writeln!(output, "2. Show graph")?;
            writeln!(output, "3. Graph properties")?;
            writeln!(output, "4. Open existing file")?;
            writeln!(output, "5. Save graph")?;
            writeln!(output, "6. Quit")?;

            let choice = match read_line(input, output, "Choose an option: ")? {
                Some(choice) => choice,
                None => break,
            };

            let keep_running = match choice.trim() {
                "1" => self.create(input, output)?,
                "2" => {
                    self.show_menu(output)?;
                    true
                }
                "3" => self.properties_menu(input, output)?,
                "4" => self.open_menu(input, output)?,
                "5" => self.save_menu(input, output)?,
                "6" => false,
                _ => {
                    writeln!(output, "Invalid option. Try again.")?;
                    true
                }
            };

            if !keep_running {
                break;
            }
        }

        Ok(())
    }

    // The menu actions return `false` once the input is exhausted.

    fn create<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, Error> {
        let is_stop = |label: &str| {
            STOP_WORDS
                .iter()
                .any(|stop| label.eq_ignore_ascii_case(stop))
        };

        loop {
            let origin = read_non_blank(input, output, "Origin vertex (or 'fim' to stop): ")?;
            let origin = match origin {
                Some(origin) if is_stop(&origin) => return Ok(true),
                Some(origin) => origin,
                None => return Ok(false),
            };
            let destination =
                read_non_blank(input, output, "Destination vertex (or 'fim' to stop): ")?;
            let destination = match destination {
                Some(destination) if is_stop(&destination) => return Ok(true),
                Some(destination) => destination,
                None => return Ok(false),
            };

            if self.graph.lookup_edge(&origin, &destination) {
                writeln!(output, "Edge {} -- {} already exists.", origin, destination)?;
                continue;
            }

            match self.add_edge(&origin, &destination) {
                Ok(()) => writeln!(output, "Edge added: {} -- {}", origin, destination)?,
                Err(error) => writeln!(output, "{}", error)?,
            }
        }
    }

    fn show_menu<W: Write>(&self, output: &mut W) -> Result<(), Error> {
        write_adjacency(output, &self.graph)?;
        match self.show() {
            Ok(path) => writeln!(output, "Graph written to '{}'.", path.display())?,
            Err(error) => {
                warn!(%error, "could not render graph");
                writeln!(output, "{}", error)?;
            }
        }

        Ok(())
    }

    fn properties_menu<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, Error> {
        if self.graph.is_empty() {
            writeln!(
                output,
                "There is no graph yet. Create one or open an existing file."
            )?;
            return Ok(true);
        }

        loop {
            writeln!(output)?;
            writeln!(output, "Graph properties:")?;
            for (number, property) in Property::ALL.iter().enumerate() {
                writeln!(output, "{:<3} {}", format!("{}.", number + 1), property.title())?;
            }
            writeln!(output, "11. Back")?;

            let choice = match read_line(input, output, "Choose a property: ")? {
                Some(choice) => choice,
                None => return Ok(false),
            };
            if choice.trim() == "11" {
                return Ok(true);
            }

            match choice.parse::<Property>() {
                Ok(property) => match self.query(property) {
                    Ok(value) => writeln!(output, "{}", property.describe(&value))?,
                    Err(error) => writeln!(output, "{}", error)?,
                },
                Err(_) => writeln!(output, "Invalid option. Try again.")?,
            }
        }
    }

    fn open_menu<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, Error> {
        let path = match read_line(input, output, "Name of the existing file: ")? {
            Some(path) => PathBuf::from(path.trim()),
            None => return Ok(false),
        };

        match self.open(&path) {
            Ok(()) => writeln!(output, "File opened and graph loaded.")?,
            Err(error) => {
                warn!(path = %path.display(), %error, "could not open graph");
                writeln!(output, "{}", error)?;
            }
        }

        Ok(true)
    }

    fn save_menu<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, Error> {
        loop {
            writeln!(output)?;
            writeln!(output, "Save graph:")?;
            writeln!(output, "1. Save as CSV")?;
            writeln!(output, "2. Save as TXT")?;
            writeln!(output, "3. Back")?;

            let format = match read_line(input, output, "Choose an option: ")?.as_deref() {
                Some("1") => OutputFormat::Csv,
                Some("2") => OutputFormat::Txt,
                Some("3") => return Ok(true),
                Some(_) => {
                    writeln!(output, "Invalid option. Try again.")?;
                    continue;
                }
                None => return Ok(false),
            };

            let path = match read_line(input, output, "Name of the file to save to: ")? {
                Some(path) => PathBuf::from(path.trim()),
                None => return Ok(false),
            };

            match self.save(&path, Some(format)) {
                Ok(()) => writeln!(output, "Graph saved to '{}'.", path.display())?,
                Err(error) => writeln!(output, "{}", error)?,
            }

            return Ok(true);
        }
    }
}
