//! wgpu rendering for the orrery: surface management, sphere mesh, body
//! textures, the lit body pipeline and per-frame command encoding.

pub mod body_pipeline;
pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod sphere;
pub mod texture;

pub use body_pipeline::{
    BODY_SHADER_SOURCE, BodyBinding, BodyPipeline, BodyUniform, FrameBinding, FrameUniform,
};
pub use buffer::{MeshBuffer, VertexPositionNormalUv};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLUE};
pub use sphere::{SphereMesh, generate_uv_sphere};
pub use texture::{BodyTexture, TextureError, TextureManager, mip_level_count};
