use clap::Parser;

use log::LevelFilter;
use simple_logger::SimpleLogger;

use prism_gl::source::ShaderSource;

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    let args = Args::parse();

    let source = match ShaderSource::load(&args.shader) {
        Ok(source) => source,
        Err(e) => {
            log::error!("{}: {e}", args.shader.display());
            std::process::exit(1);
        }
    };

    let app = match App::new(&args.title, args.width, args.height) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(source) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
