mod config;
mod draw;

use config::EvalConfig;
use cpm_base::Tensor;
use cpm_infer::pose::TwoStageEstimator;
use cpm_infer::OnnxBackend;
use draw::{draw_limbs, DEFAULT_THICKNESS};
use minifb::{Key, Window, WindowOptions};
use std::env;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        let program = args.first().map_or("cpm-eval", String::as_str);
        eprintln!("usage: {program} <pretrained_model_path> <image_path>");
        process::exit(2);
    }

    let config = EvalConfig::from_env(&args[1], &args[2])?;
    cpm_base::init_logger(&config.log_target)?;
    log::info!("models in {}, device {}", config.model_dir.display(), config.device);

    let estimator = TwoStageEstimator::from_model_dir(
        &config.model_dir,
        Box::new(OnnxBackend::new(config.device.clone())),
    );
    let (height, width) = estimator.config().person_size();

    let original = cpm_image::load_rgb(&config.image_path)?;
    log::info!("loaded {} {:?}", config.image_path.display(), original.shape);
    let mut pixels = cpm_image::resize_rgb(&original, height, width)?;

    let estimation = match estimator.estimate(&pixels) {
        Ok(estimation) => estimation,
        Err(e) => {
            log::error!("pose estimation failed: {}", e);
            return Err(e.into());
        }
    };
    log::info!("person heatmap {:?}", estimation.person_heatmap.shape);
    log::info!("pose heatmaps {:?}", estimation.pose_heatmap_shape);
    log::info!("centers {:?}", estimation.centers);
    for (i, person) in estimation.people.iter().enumerate() {
        log::debug!("person {}: {:?}", i, person.parts);
    }

    draw_limbs(&mut pixels.data, width, height, &estimation.people, DEFAULT_THICKNESS);

    if let Some(path) = &config.save_path {
        cpm_image::save_rgb(path, &pixels)?;
        log::info!("saved {}", path.display());
    }

    if config.headless {
        return Ok(());
    }
    show(&pixels, width, height)
}

/// Show the annotated image until the window is closed or ESC is pressed
fn show(pixels: &Tensor<u8>, width: usize, height: usize) -> Result<(), Box<dyn std::error::Error>> {
    let argb = cpm_image::rgb_to_argb(pixels)?;

    let mut window = Window::new("cpm-eval - ESC to exit", width, height, WindowOptions::default())?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&argb, width, height)?;
    }

    Ok(())
}
