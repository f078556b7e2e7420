//! Forward renderer
//!
//! One pass per frame into the surface (through an MSAA target when
//! enabled). Opaque meshes go first, front to back; blended meshes follow,
//! back to front, with depth writes off.

pub mod context;
pub mod pipeline;
pub mod resources;
pub mod settings;
pub mod uniforms;

use glam::{Mat4, Vec3};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::assets::{AssetServer, GeometryHandle, MaterialHandle};
use crate::errors::Result;
use crate::resources::MaterialKind;
use crate::scene::{LightKind, Scene};

use self::context::WgpuContext;
use self::pipeline::{PipelineCache, PipelineKey};
use self::resources::ResourceManager;
use self::settings::RenderSettings;
use self::uniforms::{FrameUniforms, OBJECT_STRIDE, ObjectUniforms};

/// GPU state, present once [`Renderer::init`] has succeeded.
struct RendererState {
    context: WgpuContext,
    resources: ResourceManager,
    pipelines: PipelineCache,
}

pub struct Renderer {
    settings: RenderSettings,
    state: Option<RendererState>,
    frame_index: u64,
}

struct RenderItem {
    geometry: GeometryHandle,
    material: MaterialHandle,
    key: PipelineKey,
    model: Mat4,
    /// Squared distance from the camera to the bounding sphere center.
    distance: f32,
    render_order: i32,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            state: None,
            frame_index: 0,
        }
    }

    pub async fn init<W>(&mut self, window: W, width: u32, height: u32) -> Result<()>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let context = WgpuContext::new(window, &self.settings, width, height).await?;
        let resources = ResourceManager::new(&context.device, &context.queue);
        let pipelines = PipelineCache::new(
            &context.device,
            &resources.layouts.as_array(),
            context.color_format(),
            context.sample_count,
        );
        log::info!(
            "Renderer ready: {width}x{height}, {:?}, {}x MSAA",
            context.color_format(),
            context.sample_count
        );
        self.state = Some(RendererState {
            context,
            resources,
            pipelines,
        });
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(state) = &mut self.state {
            state.context.resize(width, height);
        }
    }

    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.state.as_ref().map(|s| s.context.size())
    }

    /// Draws the scene from its active camera.
    ///
    /// Returns `false` when nothing was presented: no GPU yet, no camera, or
    /// the surface had to be reconfigured.
    pub fn render(&mut self, scene: &Scene, assets: &AssetServer) -> bool {
        let Some(state) = &mut self.state else {
            return false;
        };
        let Some(camera) = scene.main_camera() else {
            return false;
        };
        self.frame_index += 1;

        // =========================================================
        // 1. Collect
        // =========================================================
        let camera_position = camera.position();
        let frustum = camera.frustum();
        let mut opaque = Vec::new();
        let mut blended = Vec::new();

        for &root in &scene.root_nodes {
            scene.traverse_visible(root, &mut |_, node| {
                let Some(mesh) = node.mesh.and_then(|k| scene.meshes.get(k)) else {
                    return;
                };
                let Some(material) = assets.get_material(mesh.material) else {
                    return;
                };
                if !material.visible || material.kind == MaterialKind::Shadow {
                    return;
                }
                let Some(geometry) = assets.get_geometry(mesh.geometry) else {
                    return;
                };
                let Some(sphere) = geometry.bounding_sphere() else {
                    return;
                };

                let world = node.transform.world_matrix();
                let center: Vec3 = world.transform_point3(sphere.center);
                let scale = world.matrix3.x_axis.length()
                    .max(world.matrix3.y_axis.length())
                    .max(world.matrix3.z_axis.length());
                if !frustum.intersects_sphere(center, sphere.radius * scale) {
                    return;
                }

                let item = RenderItem {
                    geometry: mesh.geometry,
                    material: mesh.material,
                    key: PipelineKey::from_material(material),
                    model: Mat4::from(*world),
                    distance: center.distance_squared(camera_position),
                    render_order: mesh.render_order,
                };
                if material.is_transparent() {
                    blended.push(item);
                } else {
                    opaque.push(item);
                }
            });
        }

        // =========================================================
        // 2. Sort
        // =========================================================
        opaque.sort_by(|a, b| {
            a.render_order
                .cmp(&b.render_order)
                .then(a.distance.total_cmp(&b.distance))
        });
        blended.sort_by(|a, b| {
            a.render_order
                .cmp(&b.render_order)
                .then(b.distance.total_cmp(&a.distance))
        });
        let render_list: Vec<RenderItem> = opaque.into_iter().chain(blended).collect();

        // =========================================================
        // 3. Prepare & upload
        // =========================================================
        let RendererState {
            context,
            resources,
            pipelines,
        } = state;
        let device = &context.device;
        let queue = &context.queue;

        let mut frame = FrameUniforms::default();
        frame.set_camera(
            camera.view_projection_matrix(),
            camera_position,
            !context.color_format().is_srgb(),
        );
        collect_lights(scene, &mut frame);
        resources.write_frame(queue, &frame);

        for item in &render_list {
            if let Some(geometry) = assets.get_geometry(item.geometry) {
                resources.prepare_geometry(device, item.geometry, geometry);
            }
            if let Some(material) = assets.get_material(item.material) {
                resources.prepare_material(device, queue, assets, item.material, material);
            }
            pipelines.get_or_create(device, item.key);
        }

        let objects: Vec<ObjectUniforms> = render_list.iter().map(|item| ObjectUniforms::new(item.model)).collect();
        resources.write_objects(device, queue, &objects);

        if self.frame_index % 600 == 0 {
            resources.prune(assets);
        }

        // =========================================================
        // 4. Record
        // =========================================================
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return false;
            }
            Err(e) => {
                log::error!("Render error: {e:?}");
                return false;
            }
        };
        let surface_view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let clear = match scene.background {
            Some(c) => wgpu::Color {
                r: f64::from(c.x),
                g: f64::from(c.y),
                b: f64::from(c.z),
                a: f64::from(c.w),
            },
            None => self.settings.wgpu_clear_color(),
        };

        let (color_view, resolve_target, store) = match &context.msaa_view {
            Some(msaa) => (msaa, Some(&surface_view), wgpu::StoreOp::Discard),
            None => (&surface_view, None, wgpu::StoreOp::Store),
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Forward Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_bind_group(0, &resources.frame_bind_group, &[]);

            let mut current_key = None;
            for (i, item) in render_list.iter().enumerate() {
                let (Some(geometry), Some(material)) =
                    (resources.geometry(item.geometry), resources.material(item.material))
                else {
                    continue;
                };

                if current_key != Some(item.key) {
                    pass.set_pipeline(pipelines.get_or_create(device, item.key));
                    current_key = Some(item.key);
                }
                pass.set_bind_group(1, &material.bind_group, &[]);
                pass.set_bind_group(2, &resources.object_bind_group, &[(i as u64 * OBJECT_STRIDE) as u32]);

                for (slot, buffer) in geometry.vertex_buffers.iter().enumerate() {
                    pass.set_vertex_buffer(slot as u32, buffer.slice(..));
                }
                pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..geometry.index_count, 0, 0..1);
            }
        }

        queue.submit(Some(encoder.finish()));
        output.present();
        true
    }
}

/// Sums ambient lights, keeps the first directional light and up to
/// [`uniforms::MAX_POINT_LIGHTS`] point lights.
fn collect_lights(scene: &Scene, frame: &mut FrameUniforms) {
    let mut ambient = Vec3::ZERO;
    let mut has_directional = false;

    for (light, world) in scene.iter_active_lights() {
        let radiance = light.color * light.intensity;
        let position: Vec3 = world.translation.into();
        match light.kind {
            LightKind::Ambient => ambient += radiance,
            LightKind::Directional { target } => {
                if has_directional {
                    continue;
                }
                let direction = (position - target).normalize_or(Vec3::Y);
                frame.directional_direction = [direction.x, direction.y, direction.z, 1.0];
                frame.directional_color = [radiance.x, radiance.y, radiance.z, 0.0];
                has_directional = true;
            }
            LightKind::Point { range } => {
                if !frame.push_point_light(position, range, radiance) {
                    log::trace!("Point light limit reached, skipping");
                }
            }
        }
    }

    frame.ambient = [ambient.x, ambient.y, ambient.z, 0.0];
    let env = scene.environment.radiance();
    frame.environment = [env.x, env.y, env.z, 0.0];
}
