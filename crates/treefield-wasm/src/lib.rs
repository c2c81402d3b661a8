use js_sys::Function;
use treefield_core::config::FieldConfig;
use treefield_core::field::{Batch, InstanceTransform, ParticleField};
use treefield_core::interaction::{HoverObserver, PickTarget, PointerRouter};
use treefield_core::particle::ShapeKind;
use treefield_core::trigger::StarTrigger;
use wasm_bindgen::prelude::*;

mod logger;
pub mod wish;

/// GPU-compatible instance matrix: 64 bytes, column-major like `instanceMatrix`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuInstance {
    matrix: [f32; 16],
}

impl From<&InstanceTransform> for GpuInstance {
    fn from(t: &InstanceTransform) -> Self {
        Self {
            matrix: t.to_matrix().to_cols_array(),
        }
    }
}

/// Instance matrices plus the fixed per-instance colours for one batch.
struct GpuBatch {
    matrices: Vec<GpuInstance>,
    colors: Vec<[f32; 3]>,
}

impl GpuBatch {
    fn new(batch: &Batch) -> Self {
        let mut gpu = Self {
            matrices: vec![GpuInstance { matrix: [0.0; 16] }; batch.len()],
            colors: batch.particles().iter().map(|p| p.color.to_array()).collect(),
        };
        gpu.write(batch);
        gpu
    }

    fn write(&mut self, batch: &Batch) {
        for (out, t) in self.matrices.iter_mut().zip(batch.transforms()) {
            *out = GpuInstance::from(t);
        }
    }

    fn matrix_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<GpuInstance, f32>(&self.matrices).as_ptr()
    }

    fn matrix_byte_length(&self) -> usize {
        self.matrices.len() * std::mem::size_of::<GpuInstance>()
    }

    fn color_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<[f32; 3], f32>(&self.colors).as_ptr()
    }
}

/// Forwards hover changes to an optional JS callback `(hovered: boolean) => void`.
#[derive(Default)]
struct JsHover {
    callback: Option<Function>,
}

impl HoverObserver for JsHover {
    fn on_hover_change(&mut self, hovered: bool) {
        if let Some(callback) = &self.callback {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(hovered)) {
                log::warn!("hover callback failed: {:?}", err);
            }
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

fn pick_target(kind: u8, index: usize) -> Option<PickTarget> {
    match kind {
        2 => Some(PickTarget::Trigger),
        k => ShapeKind::from_u8(k).map(|shape| PickTarget::Particle { shape, index }),
    }
}

#[wasm_bindgen]
pub struct TreeFieldWorld {
    field: ParticleField,
    router: PointerRouter<JsHover>,
    cubes: GpuBatch,
    spheres: GpuBatch,
    trigger: GpuInstance,
}

#[wasm_bindgen]
impl TreeFieldWorld {
    /// Pass a `seed` for a reproducible scene; omit it for a fresh one.
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize, seed: Option<u32>) -> Result<TreeFieldWorld, JsValue> {
        let config = FieldConfig {
            particle_count,
            ..FieldConfig::default()
        };
        let field = match seed {
            Some(seed) => ParticleField::with_seed(config, seed as u64),
            None => ParticleField::new(config),
        }
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        log::info!(
            "TreeFieldWorld created: {} particles ({} cubes, {} spheres)",
            field.particle_count(),
            field.batch(ShapeKind::Cube).len(),
            field.batch(ShapeKind::Sphere).len()
        );

        Ok(TreeFieldWorld {
            cubes: GpuBatch::new(field.batch(ShapeKind::Cube)),
            spheres: GpuBatch::new(field.batch(ShapeKind::Sphere)),
            router: PointerRouter::new(JsHover::default()),
            trigger: GpuInstance::from(&field.trigger().transform()),
            field,
        })
    }

    /// Advance one frame. Returns the time spent in ms.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.field.tick(dt, self.router.is_exploded());
        self.cubes.write(self.field.batch(ShapeKind::Cube));
        self.spheres.write(self.field.batch(ShapeKind::Sphere));
        self.trigger = GpuInstance::from(&self.field.trigger().transform());
        (js_sys::Date::now() - start) as f32
    }

    /// Flip between tree and universe. Returns the new state.
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.router.toggle()
    }

    #[wasm_bindgen]
    pub fn is_exploded(&self) -> bool {
        self.router.is_exploded()
    }

    #[wasm_bindgen]
    pub fn expansion(&self) -> f32 {
        self.field.expansion()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.field.particle_count()
    }

    #[wasm_bindgen]
    pub fn cube_count(&self) -> usize {
        self.field.batch(ShapeKind::Cube).len()
    }

    #[wasm_bindgen]
    pub fn sphere_count(&self) -> usize {
        self.field.batch(ShapeKind::Sphere).len()
    }

    #[wasm_bindgen]
    pub fn cube_matrix_ptr(&self) -> *const f32 {
        self.cubes.matrix_ptr()
    }

    #[wasm_bindgen]
    pub fn cube_matrix_byte_length(&self) -> usize {
        self.cubes.matrix_byte_length()
    }

    #[wasm_bindgen]
    pub fn cube_color_ptr(&self) -> *const f32 {
        self.cubes.color_ptr()
    }

    #[wasm_bindgen]
    pub fn sphere_matrix_ptr(&self) -> *const f32 {
        self.spheres.matrix_ptr()
    }

    #[wasm_bindgen]
    pub fn sphere_matrix_byte_length(&self) -> usize {
        self.spheres.matrix_byte_length()
    }

    #[wasm_bindgen]
    pub fn sphere_color_ptr(&self) -> *const f32 {
        self.spheres.color_ptr()
    }

    /// Star pose: 16 floats, column-major, refreshed by `tick`.
    #[wasm_bindgen]
    pub fn trigger_matrix_ptr(&self) -> *const f32 {
        self.trigger.matrix.as_ptr()
    }

    #[wasm_bindgen]
    pub fn trigger_light_intensity(&self) -> f32 {
        StarTrigger::light_intensity(self.router.is_exploded())
    }

    /// `kind`: 0 = cube, 1 = sphere, 2 = star trigger.
    #[wasm_bindgen]
    pub fn on_click(&mut self, kind: u8, index: usize) -> bool {
        match pick_target(kind, index) {
            Some(target) => self.router.on_click(target),
            None => self.router.is_exploded(),
        }
    }

    #[wasm_bindgen]
    pub fn on_hover(&mut self, kind: u8, index: usize) {
        if let Some(target) = pick_target(kind, index) {
            self.router.on_hover(target);
        }
    }

    #[wasm_bindgen]
    pub fn on_unhover(&mut self, kind: u8, index: usize) {
        if let Some(target) = pick_target(kind, index) {
            self.router.on_unhover(target);
        }
    }

    /// Register `(hovered: boolean) => void`, e.g. to switch the cursor.
    #[wasm_bindgen]
    pub fn set_hover_callback(&mut self, callback: Function) {
        self.router.observer_mut().callback = Some(callback);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn trigger_matrix_updates_in_place() {
        let mut world = TreeFieldWorld::new(16, Some(3)).unwrap();
        let ptr = world.trigger_matrix_ptr();
        world.tick(1.0);
        assert_eq!(ptr, world.trigger_matrix_ptr());
        let expected = world.field.trigger().transform().to_matrix().to_cols_array();
        assert_eq!(world.trigger.matrix, expected);
    }

    #[wasm_bindgen_test]
    fn batch_buffers_cover_every_instance() {
        let world = TreeFieldWorld::new(64, Some(5)).unwrap();
        assert_eq!(world.cube_count() + world.sphere_count(), 64);
        assert_eq!(world.cube_matrix_byte_length(), world.cube_count() * 64);
        assert_eq!(world.sphere_matrix_byte_length(), world.sphere_count() * 64);
    }
}
