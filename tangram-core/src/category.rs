//! Piece categories, resolved once from an element's class list.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum Category {
    #[display(fmt = "triangle-large-1")]
    #[serde(rename = "triangle-large-1")]
    TriangleLarge1,
    #[display(fmt = "triangle-large-2")]
    #[serde(rename = "triangle-large-2")]
    TriangleLarge2,
    #[display(fmt = "triangle-medium")]
    #[serde(rename = "triangle-medium")]
    TriangleMedium,
    #[display(fmt = "triangle-small-1")]
    #[serde(rename = "triangle-small-1")]
    TriangleSmall1,
    #[display(fmt = "triangle-small-2")]
    #[serde(rename = "triangle-small-2")]
    TriangleSmall2,
    #[display(fmt = "square")]
    #[serde(rename = "square")]
    Square,
    #[display(fmt = "parallelogram")]
    #[serde(rename = "parallelogram")]
    Parallelogram,
    #[display(fmt = "piece")]
    #[serde(rename = "piece")]
    Unknown,
}

/// Class name → category, in match order.
pub const TABLE: [(&str, Category); 7] = [
    ("triangle-large-1", Category::TriangleLarge1),
    ("triangle-large-2", Category::TriangleLarge2),
    ("triangle-medium", Category::TriangleMedium),
    ("triangle-small-1", Category::TriangleSmall1),
    ("triangle-small-2", Category::TriangleSmall2),
    ("square", Category::Square),
    ("parallelogram", Category::Parallelogram),
];

impl Category {
    /// First table entry present in `classes` wins; otherwise [`Category::Unknown`].
    pub fn classify<S: AsRef<str>>(classes: &[S]) -> Category {
        TABLE
            .iter()
            .find(|(class, _)| classes.iter().any(|c| c.as_ref() == *class))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::TriangleLarge1 => "Large Triangle 1 (Purple)",
            Category::TriangleLarge2 => "Large Triangle 2 (Blue)",
            Category::TriangleMedium => "Medium Triangle (Violet)",
            Category::TriangleSmall1 => "Small Triangle 1 (Orangered)",
            Category::TriangleSmall2 => "Small Triangle 2 (Cadetblue)",
            Category::Square => "Square (Darkgreen)",
            Category::Parallelogram => "Parallelogram (Orange)",
            Category::Unknown => "Piece",
        }
    }
}
