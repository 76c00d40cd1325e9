use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{category::Category, config::Config, deg::Deg, r2::R2, rect::Rect};

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, From, Serialize, Deserialize, Tsify)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// Identifier given to the `index`th piece when markup doesn't supply one.
    pub fn generated(index: usize) -> Self {
        PieceId(format!("piece-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self {
        PieceId(id.to_string())
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, From, Serialize, Deserialize, Tsify)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        ContainerId(id.to_string())
    }
}

/// Stacking layer; pieces sit at `Base` except while dragged.
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    #[default]
    Base,
    Front,
}

impl Layer {
    pub fn z_index(&self, config: &Config) -> i32 {
        match self {
            Layer::Base => config.base_z,
            Layer::Front => config.front_z,
        }
    }
}

/// A piece as enumerated from markup, before initialization.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct PieceSpec {
    #[serde(default)]
    pub id: Option<PieceId>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Defaults to the board's source container
    #[serde(default)]
    pub container: Option<ContainerId>,
    #[serde(default)]
    pub position: R2<f64>,
    #[serde(default)]
    pub size: R2<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    pub category: Category,
    pub name: String,
    #[tsify(type = "number")]
    pub rotation: Deg,
    /// Offset of the top-left corner from the container origin
    pub position: R2<f64>,
    pub size: R2<f64>,
    pub container: ContainerId,
    pub layer: Layer,
    pub selected: bool,
}

impl Piece {
    pub fn new(index: usize, spec: PieceSpec, container: ContainerId) -> Self {
        let category = Category::classify(&spec.classes);
        Piece {
            id: spec.id.unwrap_or_else(|| PieceId::generated(index)),
            category,
            name: category.label().to_string(),
            rotation: Deg::default(),
            position: spec.position,
            size: spec.size,
            container: spec.container.unwrap_or(container),
            layer: Layer::Base,
            selected: false,
        }
    }

    /// Top-left corner in viewport coordinates, given the container origin.
    pub fn top_left(&self, origin: R2<f64>) -> R2<f64> {
        origin + self.position
    }

    /// Center in viewport coordinates. Rotation is applied about the center,
    /// so it doesn't move it.
    pub fn center(&self, origin: R2<f64>) -> R2<f64> {
        Rect::from_origin_size(self.top_left(origin), self.size).center()
    }

    /// `"<name>: <rotation>°"`
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.rotation)
    }
}
