use std::io;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::color::Rgb;
use crate::error::{AnnotatorError, Result};
use crate::labels;

/// A user's annotation work: palette, cluster names and the zero-based
/// cluster id of every pixel in row-major order.
///
/// The text form is a three-element list literal:
/// `[[[r, g, b], ...], ["name", ...], [c0, c1, ...]]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Wire", into = "Wire")]
pub struct Annotation {
    pub palette: Vec<Rgb>,
    pub label_names: Vec<String>,
    pub assignment: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
struct Wire(Vec<Rgb>, Vec<String>, Vec<u32>);

impl From<Wire> for Annotation {
    fn from(Wire(palette, label_names, assignment): Wire) -> Self {
        Self {
            palette,
            label_names,
            assignment,
        }
    }
}

impl From<Annotation> for Wire {
    fn from(a: Annotation) -> Self {
        Wire(a.palette, a.label_names, a.assignment)
    }
}

/// Writes `, ` between list items, matching the list-literal layout that
/// existing annotation files use.
struct ListLiteralFormatter;

impl Formatter for ListLiteralFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

impl Annotation {
    /// Capture the annotation state of a label grid.
    pub fn capture(palette: &[Rgb], label_names: &[String], grid: &Array2<u32>) -> Self {
        Self {
            palette: palette.to_vec(),
            label_names: label_names.to_vec(),
            assignment: labels::to_assignment(grid),
        }
    }

    /// Encode as a list literal with double-quoted strings.
    pub fn encode(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, ListLiteralFormatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| AnnotatorError::AnnotationFormat(e.to_string()))
    }

    /// Parse the list-literal text form.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text.trim())?)
    }

    /// Rebuild the label grid for a grid of `shape` (rows, cols) and check
    /// that the palette and names cover every cluster.
    ///
    /// Returns the grid in storage form and the cluster count.
    pub fn to_grid(&self, shape: (usize, usize)) -> Result<(Array2<u32>, usize)> {
        let num_labels = self
            .assignment
            .iter()
            .max()
            .map(|&m| m as usize + 1)
            .ok_or_else(|| AnnotatorError::AnnotationFormat("empty assignment".into()))?;
        labels::check_cluster_count(num_labels)?;
        let grid = labels::from_assignment(&self.assignment, shape)?;
        if self.palette.len() != num_labels {
            return Err(AnnotatorError::AnnotationFormat(format!(
                "palette has {} colors for {num_labels} clusters",
                self.palette.len()
            )));
        }
        if self.label_names.len() != num_labels {
            return Err(AnnotatorError::AnnotationFormat(format!(
                "{} label names for {num_labels} clusters",
                self.label_names.len()
            )));
        }
        Ok((grid, num_labels))
    }

    /// Write the encoded annotation to a text file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }

    /// Read an annotation text file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::decode(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_as_list_literal() {
        let a = Annotation {
            palette: vec![[255, 0, 0], [0, 0, 0]],
            label_names: vec!["wall".into(), "_2".into()],
            assignment: vec![0, 1, 1, 0],
        };
        assert_eq!(
            a.encode().unwrap(),
            r#"[[[255, 0, 0], [0, 0, 0]], ["wall", "_2"], [0, 1, 1, 0]]"#
        );
    }

    #[test]
    fn decodes_compact_json_too() {
        let a = Annotation::decode(r#"[[[1,2,3]],["x"],[0,0]]"#).unwrap();
        assert_eq!(a.palette, vec![[1, 2, 3]]);
        assert_eq!(a.label_names, vec!["x".to_string()]);
        assert_eq!(a.assignment, vec![0, 0]);
    }

    #[test]
    fn rejects_palette_shorter_than_clusters() {
        let a = Annotation {
            palette: vec![[0, 0, 0]],
            label_names: vec!["a".into(), "b".into()],
            assignment: vec![0, 1],
        };
        assert!(matches!(
            a.to_grid((1, 2)),
            Err(AnnotatorError::AnnotationFormat(_))
        ));
    }
}
