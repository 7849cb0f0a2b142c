use gl::types::GLuint;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::context::{GraphicsContext, ShaderKind};

/// Reads the shader source at `path` and compiles it into a new shader object.
///
/// On failure nothing is left allocated.
pub fn load_and_compile_shader<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    kind: ShaderKind,
    path: &Path,
) -> Result<GLuint, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    compile_shader(ctx, kind, &source).map_err(|e| match e {
        ShaderError::Compilation { log, .. } => {
            log::error!("Failed to compile {:?}: {log}", path);
            ShaderError::Compilation {
                path: Some(path.to_path_buf()),
                log,
            }
        }
        other => other,
    })
}

pub fn compile_shader<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    kind: ShaderKind,
    source: &str,
) -> Result<GLuint, ShaderError> {
    let shader = ctx.create_shader(kind);
    if shader == 0 {
        return Err(ShaderError::Creation);
    }

    ctx.shader_source(shader, source);
    ctx.compile_shader(shader);

    if !ctx.compile_status(shader) {
        let log = ctx.shader_info_log(shader);
        ctx.delete_shader(shader);
        return Err(ShaderError::Compilation { path: None, log });
    }

    Ok(shader)
}

/// Links `program`, which must already have its shaders attached.
pub fn link_program_shaders<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    program: GLuint,
) -> Result<(), ShaderError> {
    ctx.link_program(program);

    if !ctx.link_status(program) {
        let log = ctx.program_info_log(program);
        log::error!("Failed to link program {program}: {log}");
        return Err(ShaderError::Linking(log));
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not read shader source {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not create shader object")]
    Creation,
    #[error("shader compilation failed: {log}")]
    Compilation { path: Option<PathBuf>, log: String },
    #[error("program linking failed: {0}")]
    Linking(String),
}
