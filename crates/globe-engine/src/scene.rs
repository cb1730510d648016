//! Scene graph handed to the render backend

use crate::geometry::{self, MarkerMesh, SphereOptions};
use globe_core::constants::STAR_MARKER_RADIUS;
use globe_core::Color;
use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Constellation,
    Band,
    Axis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SceneNode {
    /// Instance of the shared marker mesh
    Marker { position: Vec3, color: Color },
    /// Connected path through `points`, drawn open
    Line { kind: LineKind, points: Vec<Vec3>, color: Color },
}

impl SceneNode {
    pub fn color(&self) -> Color {
        match self {
            SceneNode::Marker { color, .. } | SceneNode::Line { color, .. } => *color,
        }
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        match self {
            SceneNode::Marker { position, .. } => {
                let r = Vec3::splat(STAR_MARKER_RADIUS);
                Some((*position - r, *position + r))
            }
            SceneNode::Line { points, .. } => geometry::bounds(points),
        }
    }

    /// Centre of the bounding box
    pub fn center(&self) -> Option<Vec3> {
        self.bounds().map(|(min, max)| (min + max) * 0.5)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Scene {
    pub background: Color,
    pub fog: Option<Fog>,
    #[serde(skip)]
    pub marker_mesh: MarkerMesh,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: Color::WHITE,
            fog: None,
            marker_mesh: MarkerMesh::sphere(SphereOptions::default()),
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn markers(&self) -> impl Iterator<Item = (Vec3, Color)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Marker { position, color } => Some((*position, *color)),
            _ => None,
        })
    }

    pub fn lines(&self, kind: LineKind) -> impl Iterator<Item = &[Vec3]> + '_ {
        self.nodes.iter().filter_map(move |n| match n {
            SceneNode::Line { kind: k, points, .. } if *k == kind => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
