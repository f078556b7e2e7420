//! GPU resource caches
//!
//! CPU assets carry a version counter; the caches here keep the matching
//! GPU objects and re-upload only when the version moves:
//! - geometry: three vertex streams plus an index buffer
//! - textures: `Rgba8UnormSrgb`, single mip
//! - materials: a uniform buffer and the group 1 bind group
//!
//! Per-frame data (group 0) and per-object transforms (group 2, dynamic
//! offsets) live here too.

use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;

use crate::assets::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle};
use crate::renderer::uniforms::{FrameUniforms, MaterialUniforms, OBJECT_STRIDE, ObjectUniforms};
use crate::resources::{Geometry, Material, Texture, WrapMode};

pub struct GpuGeometry {
    pub vertex_buffers: [wgpu::Buffer; 3],
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    version: u64,
}

pub struct GpuTexture {
    pub view: wgpu::TextureView,
    pub wrap: WrapMode,
    version: u64,
}

pub struct GpuMaterial {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    version: u64,
    /// Texture (and its version) the bind group was built against.
    bound_map: Option<(TextureHandle, u64)>,
}

pub struct BindGroupLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
}

impl BindGroupLayouts {
    fn new(device: &wgpu::Device) -> Self {
        let uniform = |binding, visibility, has_dynamic_offset| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset,
                min_binding_size: None,
            },
            count: None,
        };

        let frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Layout"),
            entries: &[uniform(0, wgpu::ShaderStages::VERTEX_FRAGMENT, false)],
        });

        let material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Layout"),
            entries: &[
                uniform(0, wgpu::ShaderStages::FRAGMENT, false),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Layout"),
            entries: &[uniform(0, wgpu::ShaderStages::VERTEX, true)],
        });

        Self { frame, material, object }
    }

    #[must_use]
    pub fn as_array(&self) -> [&wgpu::BindGroupLayout; 3] {
        [&self.frame, &self.material, &self.object]
    }
}

pub struct ResourceManager {
    pub layouts: BindGroupLayouts,

    frame_buffer: wgpu::Buffer,
    pub frame_bind_group: wgpu::BindGroup,

    object_buffer: wgpu::Buffer,
    object_capacity: u64,
    pub object_bind_group: wgpu::BindGroup,

    white_texture: wgpu::TextureView,
    repeat_sampler: wgpu::Sampler,
    clamp_sampler: wgpu::Sampler,

    geometries: SecondaryMap<GeometryHandle, GpuGeometry>,
    textures: SecondaryMap<TextureHandle, GpuTexture>,
    materials: SecondaryMap<MaterialHandle, GpuMaterial>,
}

impl ResourceManager {
    const INITIAL_OBJECTS: u64 = 128;

    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layouts = BindGroupLayouts::new(device);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame BindGroup"),
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let (object_buffer, object_bind_group) =
            Self::create_object_buffer(device, &layouts.object, Self::INITIAL_OBJECTS);

        let white = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let white_texture = upload_texture(device, queue, "White Texture", &white);

        let sampler = |label, address_mode| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: address_mode,
                address_mode_v: address_mode,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                ..Default::default()
            })
        };
        let repeat_sampler = sampler("Repeat Sampler", wgpu::AddressMode::Repeat);
        let clamp_sampler = sampler("Clamp Sampler", wgpu::AddressMode::ClampToEdge);

        Self {
            layouts,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_capacity: Self::INITIAL_OBJECTS,
            object_bind_group,
            white_texture,
            repeat_sampler,
            clamp_sampler,
            geometries: SecondaryMap::new(),
            textures: SecondaryMap::new(),
            materials: SecondaryMap::new(),
        }
    }

    fn create_object_buffer(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniforms"),
            size: capacity * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    pub fn write_frame(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(frame));
    }

    /// Uploads all per-draw transforms, growing the buffer when needed.
    /// Object `i` is then bound at dynamic offset `i * OBJECT_STRIDE`.
    pub fn write_objects(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, objects: &[ObjectUniforms]) {
        let needed = objects.len() as u64;
        if needed > self.object_capacity {
            let capacity = needed.next_power_of_two();
            log::debug!("Growing object buffer to {capacity} slots");
            let (buffer, bind_group) = Self::create_object_buffer(device, &self.layouts.object, capacity);
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
            self.object_capacity = capacity;
        }
        if objects.is_empty() {
            return;
        }

        let stride = OBJECT_STRIDE as usize;
        let mut staging = vec![0u8; objects.len() * stride];
        for (chunk, object) in staging.chunks_exact_mut(stride).zip(objects) {
            let bytes = bytemuck::bytes_of(object);
            chunk[..bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.object_buffer, 0, &staging);
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Makes sure the GPU copy of `handle` is current.
    pub fn prepare_geometry(&mut self, device: &wgpu::Device, handle: GeometryHandle, geometry: &Geometry) {
        if let Some(gpu) = self.geometries.get(handle)
            && gpu.version == geometry.version()
        {
            return;
        }
        self.geometries.insert(handle, create_geometry(device, geometry));
    }

    #[must_use]
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GpuGeometry> {
        self.geometries.get(handle)
    }

    // ========================================================================
    // Textures
    // ========================================================================

    pub fn prepare_texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, handle: TextureHandle, texture: &Texture) {
        if let Some(gpu) = self.textures.get(handle)
            && gpu.version == texture.version()
        {
            return;
        }
        let view = upload_texture(device, queue, &texture.name, &texture.image);
        self.textures.insert(
            handle,
            GpuTexture {
                view,
                wrap: texture.wrap,
                version: texture.version(),
            },
        );
    }

    // ========================================================================
    // Materials
    // ========================================================================

    /// Uploads the material uniforms and (re)builds its bind group when the
    /// bound texture changed. Textures referenced by the material are
    /// prepared first.
    pub fn prepare_material(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        assets: &AssetServer,
        handle: MaterialHandle,
        material: &Material,
    ) {
        let map = material
            .map
            .and_then(|h| assets.get_texture(h).map(|t| (h, t)));
        if let Some((h, texture)) = map {
            self.prepare_texture(device, queue, h, texture);
        }
        let bound_map = map.map(|(h, t)| (h, t.version()));
        let uniforms = MaterialUniforms::from_material(material, bound_map.is_some());

        if let Some(gpu) = self.materials.get_mut(handle) {
            if gpu.bound_map == bound_map {
                if gpu.version != material.version() {
                    queue.write_buffer(&gpu.buffer, 0, bytemuck::bytes_of(&uniforms));
                    gpu.version = material.version();
                }
                return;
            }
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&material.name),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (view, sampler) = match bound_map.and_then(|(h, _)| self.textures.get(h)) {
            Some(gpu) => {
                let sampler = match gpu.wrap {
                    WrapMode::Repeat => &self.repeat_sampler,
                    WrapMode::ClampToEdge => &self.clamp_sampler,
                };
                (&gpu.view, sampler)
            }
            None => (&self.white_texture, &self.clamp_sampler),
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&material.name),
            layout: &self.layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.materials.insert(
            handle,
            GpuMaterial {
                buffer,
                bind_group,
                version: material.version(),
                bound_map,
            },
        );
    }

    #[must_use]
    pub fn material(&self, handle: MaterialHandle) -> Option<&GpuMaterial> {
        self.materials.get(handle)
    }

    /// Drops GPU copies of assets that no longer exist.
    pub fn prune(&mut self, assets: &AssetServer) {
        self.geometries.retain(|h, _| assets.geometries.contains(h));
        self.materials.retain(|h, _| assets.materials.contains(h));
        self.textures.retain(|h, _| assets.textures.contains(h));
    }
}

fn create_geometry(device: &wgpu::Device, geometry: &Geometry) -> GpuGeometry {
    let vertex_count = geometry.positions.len();
    // Missing streams are zero-filled so every pipeline sees all three.
    let normals = if geometry.normals.len() == vertex_count {
        bytemuck::cast_slice(&geometry.normals).to_vec()
    } else {
        vec![0u8; vertex_count * 12]
    };
    let uvs = if geometry.uvs.len() == vertex_count {
        bytemuck::cast_slice(&geometry.uvs).to_vec()
    } else {
        vec![0u8; vertex_count * 8]
    };

    let vertex = |label, contents: &[u8]| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        })
    };

    let indices: Vec<u32> = if geometry.indices.is_empty() {
        (0..vertex_count as u32).collect()
    } else {
        geometry.indices.clone()
    };

    GpuGeometry {
        vertex_buffers: [
            vertex("Positions", bytemuck::cast_slice(&geometry.positions)),
            vertex("Normals", &normals),
            vertex("UVs", &uvs),
        ],
        index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }),
        index_count: indices.len() as u32,
        version: geometry.version(),
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &image::RgbaImage,
) -> wgpu::TextureView {
    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    if width > 0 && height > 0 {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );
    }
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
