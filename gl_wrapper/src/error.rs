use gl::types::GLenum;

use crate::context::GraphicsContext;

pub fn error_name(code: GLenum) -> String {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM".to_owned(),
        gl::INVALID_VALUE => "GL_INVALID_VALUE".to_owned(),
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION".to_owned(),
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION".to_owned(),
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY".to_owned(),
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW".to_owned(),
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW".to_owned(),
        other => format!("unknown GL error 0x{other:04X}"),
    }
}

/// Drains the error queue, logging every entry. Returns `true` if any error was present.
pub fn check_for_gl_error<C: GraphicsContext + ?Sized>(ctx: &mut C) -> bool {
    let mut found = false;

    // GL keeps one flag per error kind, so the queue is short and always drains
    loop {
        let code = ctx.get_error();
        if code == gl::NO_ERROR {
            break;
        }
        log::error!("OpenGL error: {}", error_name(code));
        found = true;
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingContext;

    #[test]
    fn no_error() {
        let mut ctx = RecordingContext::new();
        assert!(!check_for_gl_error(&mut ctx));
    }

    #[test]
    fn drains_all_errors() {
        let mut ctx = RecordingContext::new()
            .with_error(gl::INVALID_ENUM)
            .with_error(gl::OUT_OF_MEMORY);

        assert!(check_for_gl_error(&mut ctx));
        assert!(ctx.pending_errors.is_empty());
        assert!(!check_for_gl_error(&mut ctx));
    }

    #[test]
    fn names() {
        assert_eq!(error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(error_name(0x1234), "unknown GL error 0x1234");
    }
}
