//! Text, file and directory drivers around a graph function
//!
//! Each driver parses DOT, hands the graph to `f`, and serializes the
//! result. Errors from parsing or from `f` pass through unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery;
use crate::dot;
use crate::error::Error;
use crate::graph::Graph;

/// Parse `text`, apply `f`, and render the result
///
/// # Errors
///
/// [`Error::Dot`] for unreadable text, or whatever `f` fails with.
pub fn transform<F, E>(text: &str, f: F) -> Result<String, Error>
where
    F: FnOnce(&mut Graph) -> Result<(), E>,
    Error: From<E>,
{
    let mut graph = dot::parse(text)?;
    f(&mut graph)?;
    Ok(dot::serialize(&graph))
}

/// Transform the file at `input` into `output`
///
/// # Errors
///
/// [`Error::Io`] naming the path that could not be read or written, plus
/// everything [`transform`] can return.
pub fn transform_file<F, E>(input: &Path, output: &Path, f: F) -> Result<(), Error>
where
    F: FnOnce(&mut Graph) -> Result<(), E>,
    Error: From<E>,
{
    let text = fs::read_to_string(input).map_err(|err| Error::io(input, err))?;
    let rendered = transform(&text, f)?;
    fs::write(output, rendered).map_err(|err| Error::io(output, err))
}

/// Transform every `.dot`/`.DOT` file directly inside `input_dir`
///
/// Each file lands in `output_dir` under its original name. Stops at the
/// first failing file; files written before it stay written. Returns the
/// output paths in processing order.
///
/// # Errors
///
/// The first error any file produces, see [`transform_file`].
pub fn transform_dir<F, E>(input_dir: &Path, output_dir: &Path, mut f: F) -> Result<Vec<PathBuf>, Error>
where
    F: FnMut(&mut Graph) -> Result<(), E>,
    Error: From<E>,
{
    let mut written = Vec::new();
    for input in discovery::discover_dot_files(input_dir) {
        let Some(name) = input.file_name() else {
            continue;
        };
        let output = output_dir.join(name);
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            "transforming"
        );
        transform_file(&input, &output, &mut f)?;
        written.push(output);
    }
    Ok(written)
}
