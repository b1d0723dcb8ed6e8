pub mod error;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod source;

#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 6] = [
    -0.5, -0.5,
     0.0,  0.5,
     0.5, -0.5,
];
