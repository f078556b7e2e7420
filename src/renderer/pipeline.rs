//! Render pipeline cache.
//!
//! There is a single shader; pipelines differ only in fixed-function state
//! (culling, blending, depth writes), which [`PipelineKey`] captures as
//! flags.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::renderer::settings::DEPTH_FORMAT;
use crate::resources::{Blending, Material, Side};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PipelineKey: u32 {
        const TRANSPARENT  = 1 << 0;
        const ADDITIVE     = 1 << 1;
        const SIDE_BACK    = 1 << 2;
        const SIDE_DOUBLE  = 1 << 3;
        const NO_DEPTH_WRITE = 1 << 4;
    }
}

impl PipelineKey {
    #[must_use]
    pub fn from_material(material: &Material) -> Self {
        let mut key = Self::empty();
        if material.is_transparent() {
            key |= Self::TRANSPARENT;
        }
        if material.blending == Blending::Additive {
            key |= Self::ADDITIVE;
        }
        match material.side {
            Side::Front => {}
            Side::Back => key |= Self::SIDE_BACK,
            Side::Double => key |= Self::SIDE_DOUBLE,
        }
        if !material.depth_write || material.is_transparent() {
            key |= Self::NO_DEPTH_WRITE;
        }
        key
    }

    #[must_use]
    pub fn cull_mode(self) -> Option<wgpu::Face> {
        if self.contains(Self::SIDE_DOUBLE) {
            None
        } else if self.contains(Self::SIDE_BACK) {
            Some(wgpu::Face::Front)
        } else {
            Some(wgpu::Face::Back)
        }
    }

    #[must_use]
    pub fn blend_state(self) -> Option<wgpu::BlendState> {
        if self.contains(Self::ADDITIVE) {
            Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Zero,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            })
        } else if self.contains(Self::TRANSPARENT) {
            Some(wgpu::BlendState::ALPHA_BLENDING)
        } else {
            None
        }
    }
}

/// Vertex layout shared by every geometry: three tightly packed streams.
pub const VERTEX_BUFFER_LAYOUTS: [wgpu::VertexBufferLayout<'static>; 3] = [
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    },
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 1,
        }],
    },
    wgpu::VertexBufferLayout {
        array_stride: 8,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 2,
        }],
    },
];

pub struct PipelineCache {
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
    pipelines: FxHashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(
        device: &wgpu::Device,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Forward Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/forward.wgsl").into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Forward Pipeline Layout"),
            bind_group_layouts,
            immediate_size: 0,
        });
        Self {
            shader,
            layout,
            color_format,
            sample_count,
            pipelines: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Returns the pipeline for `key`, compiling it on first use.
    pub fn get_or_create(&mut self, device: &wgpu::Device, key: PipelineKey) -> &wgpu::RenderPipeline {
        let (shader, layout, format, samples) = (&self.shader, &self.layout, self.color_format, self.sample_count);
        self.pipelines.entry(key).or_insert_with(|| {
            log::debug!("Compiling pipeline {key:?}");
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Forward Pipeline"),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &VERTEX_BUFFER_LAYOUTS,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: key.blend_state(),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: key.cull_mode(),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: !key.contains(PipelineKey::NO_DEPTH_WRITE),
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: samples,
                    ..Default::default()
                },
                multiview_mask: None,
                cache: None,
            })
        })
    }
}
