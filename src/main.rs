use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use lumiray::renderer::{CancelToken, Renderer};
use lumiray::scene::demo_scene;
use output::save_image_as_png;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Lumiray - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, 4 samples per pixel",
        args.width, args.height
    );

    let scene = demo_scene();
    let renderer = Renderer::new(args.width, args.height);

    let image = if args.parallel {
        renderer.render_parallel(&scene)
    } else {
        info!("Rendering progressively, one scanline batch at a time...");
        let pb = ProgressBar::new(args.height as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

        let mut image = image::RgbaImage::new(args.width, args.height);
        renderer.render_into(&scene, &mut image, &CancelToken::new(), |update| {
            // This is where a display layer would blit the finished rows.
            pb.inc((update.rows.end - update.rows.start) as u64);
        });
        pb.finish();
        image
    };

    if args.output.ends_with(".png") {
        if let Err(e) = save_image_as_png(&image, &args.output) {
            log::error!("Failed to save '{}': {}", args.output, e);
            std::process::exit(1);
        }
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png output is supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
