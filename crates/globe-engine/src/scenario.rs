//! Globe scenario: places catalog stars, constellation lines and decorative
//! bands on a sphere and keeps them on screen through a [`Controller`].

use crate::backend::{Host, RenderBackend};
use crate::controller::Controller;
use crate::error::EngineResult;
use crate::event::{Event, ListenerId};
use crate::geometry::{ellipse_points, rotate_zyx};
use crate::scene::{Fog, LineKind, NodeId, SceneNode};
use globe_core::constants::*;
use globe_core::{Color, EquatorialCoord, LatLon, Theme};
use globe_data::CompactCatalog;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Radius of the base sphere
    pub radius: f64,
    pub band_count: usize,
    /// Seed for band inclinations
    pub seed: u64,
    pub theme: Theme,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            band_count: BAND_COUNT,
            seed: 0,
            theme: Theme::Light,
        }
    }
}

/// Counts of placed primitives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub stars: usize,
    pub lines: usize,
    pub bands: usize,
    pub theme: Theme,
}

pub struct Scenario<B: RenderBackend, H: Host> {
    controller: Controller<B, H>,
    catalog: CompactCatalog,
    radius: f64,
    band_count: usize,
    theme: Theme,
    rng: StdRng,
    theme_changed: Event<Theme>,
    stars: Vec<NodeId>,
    lines: Vec<NodeId>,
    bands: Vec<NodeId>,
}

impl<B: RenderBackend, H: Host> Scenario<B, H> {
    pub fn new(controller: Controller<B, H>, catalog: CompactCatalog, config: ScenarioConfig) -> Self {
        let mut scenario = Self {
            controller,
            catalog,
            radius: config.radius,
            band_count: config.band_count,
            theme: config.theme,
            rng: StdRng::seed_from_u64(config.seed),
            theme_changed: Event::new(),
            stars: Vec::new(),
            lines: Vec::new(),
            bands: Vec::new(),
        };
        scenario.apply_theme();
        scenario
    }

    /// Place the camera, build every mesh and start the animation loop
    pub fn start(&mut self) -> EngineResult<()> {
        self.controller.set_camera_position(Vec3::from(CAMERA_START));
        self.controller.set_camera_focus(Vec3::ZERO);

        self.create_meshes()?;
        self.controller.start_animation_loop()
    }

    pub fn controller(&self) -> &Controller<B, H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<B, H> {
        &mut self.controller
    }

    pub fn catalog(&self) -> &CompactCatalog {
        &self.catalog
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Markers and lines sit at this radius, just above the base sphere
    pub fn surface_radius(&self) -> f64 {
        self.radius * SURFACE_OFFSET
    }

    pub fn on_theme_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Theme) + 'static,
    {
        self.theme_changed.on(listener)
    }

    /// Switch theme: background, fog and the document attribute follow, then
    /// listeners are notified. Geometry already in the scene keeps the color
    /// it was built with.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        tracing::info!("Theme {} -> {}", self.theme, theme);
        self.theme = theme;
        self.apply_theme();
        self.theme_changed.emit(&theme);
    }

    fn apply_theme(&mut self) {
        let theme = self.theme;
        let scene = self.controller.scene_mut();
        scene.background = theme.background();
        if let Some(fog) = scene.fog.as_mut() {
            fog.color = theme.fog();
        }
        self.controller.set_theme_attribute(theme.attribute());
    }

    pub fn create_fog(&mut self, color: Color, near: f32, far: f32) {
        self.controller.scene_mut().fog = Some(Fog { color, near, far });
    }

    pub fn create_band(&self, inclination: f64, period: f64) -> SceneNode {
        let r = self.surface_radius() as f32;
        let mut points = ellipse_points(r, r, BAND_SEGMENTS, BAND_ROTATION as f32);
        rotate_zyx(&mut points, inclination as f32, period as f32, 0.0);
        SceneNode::Line {
            kind: LineKind::Band,
            points,
            color: self.theme.foreground(),
        }
    }

    pub fn create_star(&self, position: LatLon, color: Option<Color>) -> SceneNode {
        SceneNode::Marker {
            position: position.to_cartesian(self.surface_radius()).as_vec3(),
            color: color.unwrap_or_else(|| self.theme.foreground()),
        }
    }

    pub fn create_line(&self, coords: &[EquatorialCoord]) -> SceneNode {
        let radius = self.surface_radius();
        SceneNode::Line {
            kind: LineKind::Constellation,
            points: coords
                .iter()
                .map(|c| c.to_lat_lon().to_cartesian(radius).as_vec3())
                .collect(),
            color: self.theme.foreground(),
        }
    }

    /// Fog, bands, one marker per catalog star, one path per catalog line
    pub fn create_meshes(&mut self) -> EngineResult<()> {
        self.create_fog(self.theme.fog(), FOG_NEAR, FOG_FAR);

        for _ in 0..self.band_count {
            let inclination = self.rng.gen_range(0.0..PI);
            let period = self.rng.gen_range(0.0..PI);
            let band = self.create_band(inclination, period);
            self.bands.push(self.controller.scene_mut().add(band));
        }

        let markers: Vec<SceneNode> = self
            .catalog
            .stars()
            .map(|star| self.create_star(star.to_lat_lon(), None))
            .collect();
        for marker in markers {
            self.stars.push(self.controller.scene_mut().add(marker));
        }

        for line in 0..self.catalog.lines.len() {
            let coords = self.catalog.line_coords(line)?;
            if coords.len() < 2 {
                tracing::debug!("Line {} has {} stars", line, coords.len());
            }
            let node = self.create_line(&coords);
            self.lines.push(self.controller.scene_mut().add(node));
        }

        tracing::info!(
            "Placed {} stars, {} lines, {} bands",
            self.stars.len(), self.lines.len(), self.bands.len()
        );
        Ok(())
    }

    pub fn star_nodes(&self) -> &[NodeId] {
        &self.stars
    }

    pub fn line_nodes(&self) -> &[NodeId] {
        &self.lines
    }

    pub fn band_nodes(&self) -> &[NodeId] {
        &self.bands
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            stars: self.stars.len(),
            lines: self.lines.len(),
            bands: self.bands.len(),
            theme: self.theme,
        }
    }
}
