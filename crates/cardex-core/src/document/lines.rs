//! Normalized line sequences and index scans over them.

use serde::{Deserialize, Serialize};

/// Ordered, normalized OCR fragments for one document.
///
/// Order is the reading order the OCR engine emitted and is the only
/// positional signal available. Every retained line is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Wrap lines that are already normalized. Empty strings are dropped.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter().filter(|l| !l.is_empty()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn into_vec(self) -> Vec<String> {
        self.lines
    }

    /// All lines joined with newlines, the blob direct patterns run against.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Uppercased blob used for vocabulary checks.
    pub fn upper_text(&self) -> String {
        self.text().to_uppercase()
    }

    /// Keep only lines satisfying `keep`, preserving order.
    pub fn filtered(&self, keep: impl Fn(&str) -> bool) -> Self {
        Self {
            lines: self.lines.iter().filter(|l| keep(l)).cloned().collect(),
        }
    }

    /// Drop lines shorter than `min_len` characters.
    pub fn with_min_len(&self, min_len: usize) -> Self {
        self.filtered(|l| l.chars().count() >= min_len)
    }

    /// Index of the first line whose uppercase form satisfies `is_anchor`.
    pub fn find_anchor(&self, is_anchor: impl Fn(&str) -> bool) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| is_anchor(&l.to_uppercase()))
    }

    /// Indices of every line whose uppercase form satisfies `is_anchor`.
    pub fn anchors(&self, is_anchor: impl Fn(&str) -> bool) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| is_anchor(&l.to_uppercase()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Scan the lines after `anchor`, top to bottom.
    pub fn scan_after(&self, anchor: usize) -> AnchorScan<'_> {
        AnchorScan::new(self, anchor, Direction::Forward)
    }

    /// Scan the lines before `anchor`, bottom to top.
    pub fn scan_before(&self, anchor: usize) -> AnchorScan<'_> {
        AnchorScan::new(self, anchor, Direction::Backward)
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Scan direction relative to the anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Decision taken for each visited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Capture the line and keep going.
    Take,
    /// Ignore the line and keep going.
    Skip,
    /// Capture the line, then end the scan.
    TakeAndStop,
    /// End the scan without capturing the line.
    Stop,
}

/// Bounded walk away from an anchor index. The anchor line itself is never visited.
#[derive(Debug, Clone)]
pub struct AnchorScan<'a> {
    lines: &'a LineSequence,
    anchor: usize,
    direction: Direction,
    limit: Option<usize>,
}

impl<'a> AnchorScan<'a> {
    fn new(lines: &'a LineSequence, anchor: usize, direction: Direction) -> Self {
        Self {
            lines,
            anchor,
            direction,
            limit: None,
        }
    }

    /// Visit at most `limit` lines.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn indices(&self) -> Box<dyn Iterator<Item = usize>> {
        let indices: Box<dyn Iterator<Item = usize>> = match self.direction {
            Direction::Forward => {
                let start = self.anchor.saturating_add(1).min(self.lines.len());
                Box::new(start..self.lines.len())
            }
            Direction::Backward => {
                let end = self.anchor.min(self.lines.len());
                Box::new((0..end).rev())
            }
        };
        match self.limit {
            Some(limit) => Box::new(indices.take(limit)),
            None => indices,
        }
    }

    /// Collect captured lines in visiting order.
    pub fn collect(&self, mut step: impl FnMut(&str) -> ScanStep) -> Vec<&'a str> {
        let lines = self.lines;
        let mut captured = Vec::new();
        for index in self.indices() {
            let Some(line) = lines.get(index) else { break };
            match step(line) {
                ScanStep::Take => captured.push(line),
                ScanStep::Skip => {}
                ScanStep::TakeAndStop => {
                    captured.push(line);
                    break;
                }
                ScanStep::Stop => break,
            }
        }
        captured
    }

    /// First captured line, if any.
    pub fn first(&self, mut step: impl FnMut(&str) -> ScanStep) -> Option<&'a str> {
        self.collect(|line| match step(line) {
            ScanStep::Take => ScanStep::TakeAndStop,
            other => other,
        })
        .into_iter()
        .next()
    }
}
