use clap::Parser;

use threegp::logging::{init_logging, LoggingConfig};
use threegp::{Renderer, ShaderPaths};

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    init_logging(LoggingConfig {
        filter: args.log.clone(),
    });

    let mut renderer =
        Renderer::with_shader_paths(ShaderPaths::in_dir(args.data_dir.join("Shaders")));
    renderer.set_wireframe(args.wireframe);

    let app = match App::new(&args, renderer) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    app.run();
}
