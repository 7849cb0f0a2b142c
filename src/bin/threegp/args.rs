use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// Initial window width
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Initial window height
    #[arg(long, default_value_t = 600)]
    pub height: u32,
    /// Directory containing `Shaders/vertex_shader.glsl` and `Shaders/fragment_shader.glsl`
    #[arg(long, default_value = "Data")]
    pub data_dir: PathBuf,
    /// Start in wireframe mode
    #[arg(short, long)]
    pub wireframe: bool,
    /// Log filter, e.g. `debug` or `threegp=trace` (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}
