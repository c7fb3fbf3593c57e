//! Lumiray recursive ray tracer
//!
//! Renders a scene of analytic spheres and planes with a single point light,
//! hard shadows, Phong-style diffuse and specular shading, and mirror
//! reflection traced to a fixed depth. Rendering is progressive: completed
//! scanlines are streamed to the caller so partial images can be displayed.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod material;
pub mod plane;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod sphere;
pub mod surface;
pub mod vector;
