use std::path::PathBuf;

use clap::Parser;

/// Draws a color-animated quad with the shaders from one combined
/// vertex/fragment source file.
#[derive(Debug, Parser)]
pub struct Args {
    /// Combined shader source file (`#shader vertex` / `#shader fragment` sections)
    #[arg(default_value = "res/shaders/basic.glsl")]
    pub shader: PathBuf,
    /// Window title
    #[arg(long, default_value = "prism")]
    pub title: String,
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
