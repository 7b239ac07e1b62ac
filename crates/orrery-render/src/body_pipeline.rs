//! Lit, optionally textured sphere pipeline used for every body.
//!
//! Bind groups:
//! - group 0: [`FrameUniform`] (camera and light), shared by all draws
//! - group 1: [`BodyUniform`] (model, color, flags), one per body
//! - group 2: surface texture + sampler from [`TextureManager`](crate::TextureManager)

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::buffer::{MeshBuffer, VertexPositionNormalUv};
use crate::depth::DepthBuffer;

/// Per-frame camera and light data. 160 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub view_position: [f32; 4],
}

impl FrameUniform {
    pub fn new(view: Mat4, projection: Mat4, light_position: Vec3, view_position: Vec3) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            light_position: light_position.extend(1.0).to_array(),
            view_position: view_position.extend(1.0).to_array(),
        }
    }
}

/// Per-body draw data. 176 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, stored as a full matrix to avoid mat3 padding.
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub light_color: [f32; 4],
    /// x: textured, y: emissive, zw unused.
    pub flags: [f32; 4],
}

impl BodyUniform {
    pub fn new(model: Mat4, color: Vec3, light_color: Vec3, textured: bool, emissive: bool) -> Self {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
            flags: [flag(textured), flag(emissive), 0.0, 0.0],
        }
    }
}

/// A uniform buffer and its bind group.
pub struct UniformBinding<T> {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Pod> UniformBinding<T> {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str, initial: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-bind-group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer,
            bind_group,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

pub type FrameBinding = UniformBinding<FrameUniform>;
pub type BodyBinding = UniformBinding<BodyUniform>;

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size as u64),
            },
            count: None,
        }],
    })
}

pub struct BodyPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_layout: wgpu::BindGroupLayout,
    pub body_layout: wgpu::BindGroupLayout,
}

impl BodyPipeline {
    /// Build the pipeline. `texture_layout` is group 2.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let frame_layout = uniform_layout(
            device,
            "body-frame-layout",
            stages,
            std::mem::size_of::<FrameUniform>(),
        );
        let body_layout = uniform_layout(
            device,
            "body-uniform-layout",
            stages,
            std::mem::size_of::<BodyUniform>(),
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body-shader"),
            source: wgpu::ShaderSource::Wgsl(BODY_SHADER_SOURCE.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &body_layout, texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_layout,
            body_layout,
        }
    }

    pub fn create_frame_binding(&self, device: &wgpu::Device) -> FrameBinding {
        UniformBinding::new(
            device,
            &self.frame_layout,
            "frame-uniform",
            &FrameUniform::zeroed(),
        )
    }

    pub fn create_body_binding(&self, device: &wgpu::Device, label: &str) -> BodyBinding {
        UniformBinding::new(
            device,
            &self.body_layout,
            &format!("{label}-uniform"),
            &BodyUniform::zeroed(),
        )
    }

    /// Set pipeline and shared state once per pass.
    pub fn begin(&self, pass: &mut wgpu::RenderPass<'_>, frame: &FrameBinding, mesh: &MeshBuffer) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &frame.bind_group, &[]);
        mesh.bind(pass);
    }

    /// Draw one body with the mesh bound by [`begin`](Self::begin).
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        body: &BodyBinding,
        texture: &wgpu::BindGroup,
        mesh: &MeshBuffer,
    ) {
        pass.set_bind_group(1, &body.bind_group, &[]);
        pass.set_bind_group(2, texture, &[]);
        mesh.draw(pass);
    }
}

/// WGSL for body shading.
///
/// Planets: ambient 0.2, Lambert diffuse, Phong specular (0.3, shininess 16),
/// attenuated by `1 / (1 + 0.01 d + 0.0001 d^2)` from the light.
/// Emissive bodies: surface color plus corona and rim glow, scaled by 2.5.
pub const BODY_SHADER_SOURCE: &str = r#"
struct FrameUniform {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_position: vec4<f32>,
    view_position: vec4<f32>,
};

struct BodyUniform {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    light_color: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0) var<uniform> frame: FrameUniform;
@group(1) @binding(0) var<uniform> body: BodyUniform;
@group(2) @binding(0) var t_surface: texture_2d<f32>;
@group(2) @binding(1) var s_surface: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = body.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.world_position = world.xyz;
    out.normal = (body.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    out.clip_position = frame.projection * frame.view * world;
    return out;
}

const AMBIENT: f32 = 0.2;
const SPECULAR_STRENGTH: f32 = 0.3;
const SHININESS: f32 = 16.0;
const GLOW: f32 = 2.5;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sampled = textureSample(t_surface, s_surface, in.uv).rgb;
    let base = mix(body.color.rgb, sampled, body.flags.x);
    let light_color = body.light_color.rgb;

    let normal = normalize(in.normal);
    let view_dir = normalize(frame.view_position.xyz - in.world_position);
    let to_light = frame.light_position.xyz - in.world_position;

    if body.flags.y > 0.5 {
        let corona = 1.0 - smoothstep(0.8, 1.2, length(to_light));
        let rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0);
        let glow = base
            + vec3<f32>(1.0, 0.8, 0.4) * corona * 0.5
            + vec3<f32>(1.0, 0.7, 0.3) * rim * 0.3;
        return vec4<f32>(glow * GLOW, 1.0);
    }

    let light_dir = normalize(to_light);
    let distance = length(to_light);
    let diffuse = max(dot(normal, light_dir), 0.0) * light_color;
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), SHININESS);
    let specular = SPECULAR_STRENGTH * spec * light_color;
    let attenuation = 1.0 / (1.0 + 0.01 * distance + 0.0001 * distance * distance);

    let result = (AMBIENT * light_color + (diffuse + specular) * attenuation) * base;
    return vec4<f32>(result, 1.0);
}
"#;
