//! Initial node placement.
//!
//! Placeholder-grade layouts only: yEd is expected to re-layout the graph,
//! these just keep nodes from stacking on top of each other when the file
//! is first opened.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Horizontal distance between grid columns
const GRID_COLUMN_SPACING: f64 = 200.0;
/// Vertical distance between grid rows and list entries
const ROW_SPACING: f64 = 150.0;
/// Arc length per node on the circle layout
const CIRCLE_NODE_SPACING: f64 = 50.0;

/// Initial layout algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Square-ish grid, filled row by row
    #[default]
    Grid,
    /// Nodes evenly spaced on a circle around the origin
    Circle,
    /// Single vertical column
    List,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Circle => "circle",
            Layout::List => "list",
        }
    }

    /// Position of the node at `index` out of `total` nodes
    ///
    /// # Examples
    /// ```
    /// use netgraphml::layout::Layout;
    ///
    /// assert_eq!(Layout::Grid.position(2, 4), (0.0, 150.0));
    /// assert_eq!(Layout::List.position(3, 10), (0.0, 450.0));
    /// ```
    pub fn position(&self, index: usize, total: usize) -> (f64, f64) {
        match self {
            Layout::Grid => {
                let columns = ((total as f64).sqrt() as usize).max(1);
                let row = index / columns;
                let col = index % columns;
                (col as f64 * GRID_COLUMN_SPACING, row as f64 * ROW_SPACING)
            }
            Layout::Circle => {
                let angle = 2.0 * PI * index as f64 / total.max(1) as f64;
                let radius = CIRCLE_NODE_SPACING * total as f64 / (2.0 * PI);
                (radius * angle.cos(), radius * angle.sin())
            }
            Layout::List => (0.0, index as f64 * ROW_SPACING),
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        // 4 nodes -> 2 columns
        assert_eq!(Layout::Grid.position(0, 4), (0.0, 0.0));
        assert_eq!(Layout::Grid.position(1, 4), (200.0, 0.0));
        assert_eq!(Layout::Grid.position(2, 4), (0.0, 150.0));
        assert_eq!(Layout::Grid.position(3, 4), (200.0, 150.0));

        // 10 nodes -> floor(sqrt(10)) = 3 columns
        assert_eq!(Layout::Grid.position(7, 10), (200.0, 300.0));
    }

    #[test]
    fn test_grid_layout_small_totals() {
        assert_eq!(Layout::Grid.position(0, 1), (0.0, 0.0));
        // floor(sqrt(2)) = 1 column
        assert_eq!(Layout::Grid.position(1, 2), (0.0, 150.0));
        // zero total still yields at least one column
        assert_eq!(Layout::Grid.position(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_circle_layout() {
        let total = 4;
        let radius = 50.0 * 4.0 / (2.0 * PI);

        let (x, y) = Layout::Circle.position(0, total);
        assert!((x - radius).abs() < 1e-9);
        assert!(y.abs() < 1e-9);

        let (x, y) = Layout::Circle.position(1, total);
        assert!(x.abs() < 1e-9);
        assert!((y - radius).abs() < 1e-9);

        let (x, _) = Layout::Circle.position(2, total);
        assert!((x + radius).abs() < 1e-9);
    }

    #[test]
    fn test_circle_layout_zero_total_is_finite() {
        let (x, y) = Layout::Circle.position(0, 0);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn test_list_layout() {
        assert_eq!(Layout::List.position(0, 5), (0.0, 0.0));
        assert_eq!(Layout::List.position(4, 5), (0.0, 600.0));
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(Layout::default(), Layout::Grid);
        assert_eq!(Layout::Circle.to_string(), "circle");
        let parsed: Layout = serde_yaml::from_str("list").unwrap();
        assert_eq!(parsed, Layout::List);
    }
}
