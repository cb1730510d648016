//! WASM bindings for the browser viewer.
//!
//! The page owns the canvas and calls [`WasmGlobe::frame`] from
//! `requestAnimationFrame` while it returns true. Geometry is handed over as
//! flat `f32` buffers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::{
    BufferBackend, Controller, ControllerOptions, FrameOutcome, LineKind, ManualHost, Scenario,
    ScenarioConfig, Viewport,
};

#[cfg(target_arch = "wasm32")]
fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct WasmGlobe {
    scenario: Scenario<BufferBackend, ManualHost>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl WasmGlobe {
    /// `prefers_dark` is the page's `(prefers-color-scheme: dark)` match,
    /// read once by the caller.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: &str,
        options_json: &str,
        prefers_dark: bool,
        width: f32,
        height: f32,
    ) -> Result<WasmGlobe, JsValue> {
        let catalog = globe_data::CompactCatalog::from_json_str(catalog_json).map_err(js_err)?;
        let options = if options_json.trim().is_empty() {
            ControllerOptions::default()
        } else {
            ControllerOptions::from_json_str(options_json).map_err(js_err)?
        };

        let controller = Controller::new(
            BufferBackend::default(),
            ManualHost::new(Viewport::new(width, height)),
            options,
        );
        let config = ScenarioConfig {
            theme: globe_core::Theme::from_prefers_dark(prefers_dark),
            seed: js_sys::Date::now() as u64,
            ..Default::default()
        };

        Ok(Self { scenario: Scenario::new(controller, catalog, config) })
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.scenario.start().map_err(js_err)
    }

    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.scenario.controller_mut().stop_animation_loop().map_err(js_err)
    }

    /// Run one queued frame; false once the loop has stopped
    pub fn frame(&mut self) -> bool {
        let controller = self.scenario.controller_mut();
        if !controller.host_mut().take_frame() {
            return false;
        }
        controller.animation_frame() == FrameOutcome::Rendered
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let controller = self.scenario.controller_mut();
        controller.host_mut().viewport = Viewport::new(width, height);
        controller.handle_resize();
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.scenario.set_theme(globe_core::Theme::from_prefers_dark(dark));
    }

    /// Pointer drag, in radians of orbit
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.scenario.controller_mut().rotate_camera(dx, dy);
    }

    /// Wheel: scale > 1 moves away. No effect unless `enableZoom` is set.
    pub fn dolly(&mut self, scale: f32) {
        self.scenario.controller_mut().dolly_camera(scale);
    }

    /// No effect unless `enablePan` is set
    pub fn pan(&mut self, dx: f32, dy: f32, dz: f32) {
        self.scenario.controller_mut().pan_camera(glam::Vec3::new(dx, dy, dz));
    }

    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.scenario.theme().attribute().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn background(&self) -> u32 {
        self.scenario.controller().scene().background.hex()
    }

    /// xyz per star marker
    pub fn star_positions(&self) -> Vec<f32> {
        self.scenario
            .controller()
            .scene()
            .markers()
            .flat_map(|(p, _)| p.to_array())
            .collect()
    }

    /// Marker mesh vertices (xyz) shared by every star
    pub fn marker_vertices(&self) -> Vec<f32> {
        let mesh = &self.scenario.controller().scene().marker_mesh;
        bytemuck::cast_slice(&mesh.positions).to_vec()
    }

    pub fn marker_indices(&self) -> Vec<u32> {
        self.scenario.controller().scene().marker_mesh.indices.clone()
    }

    /// Constellation paths as a line-segment list (two xyz per segment)
    pub fn line_segments(&self) -> Vec<f32> {
        segments(self.scenario.controller().scene().lines(LineKind::Constellation))
    }

    pub fn band_segments(&self) -> Vec<f32> {
        segments(self.scenario.controller().scene().lines(LineKind::Band))
    }

    /// 4x4 view-projection, camera position, near/far/fov/aspect
    pub fn camera_uniform(&self) -> Vec<f32> {
        match self.scenario.controller().backend().last_uniform {
            Some(uniform) => bytemuck::cast_slice(&[uniform]).to_vec(),
            None => Vec::new(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn segments<'a>(paths: impl Iterator<Item = &'a [glam::Vec3]>) -> Vec<f32> {
    paths
        .flat_map(|pts| pts.windows(2))
        .flat_map(|w| w[0].to_array().into_iter().chain(w[1].to_array()))
        .collect()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
