use argh::FromArgs;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use deepdream::{
    dream::{frame_output_path, render_frames, DreamParams, FrameParams},
    image::{Image, ImageSize},
    io::{functional as F, jpeg},
    nn::{ConvNet, FeatureExtractor, Objective},
};

/// Side of the default square input image.
const DEFAULT_INPUT_SIDE: usize = 1024;

/// JPEG quality of the written frames.
const OUTPUT_QUALITY: u8 = 98;

#[derive(FromArgs)]
/// Render deep dream frames by gradient ascent on a convolutional network
struct Args {
    /// path to the network weights in safetensors format
    #[argh(option, short = 'm')]
    model: PathBuf,

    /// path to the input image, a flat gray 1024x1024 image if absent
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// prefix of the output files, frames are written as <prefix>_<index>.jpg
    #[argh(option, short = 'o', default = "String::from(\"output\")")]
    output: String,

    /// layer whose activations are maximized
    #[argh(option, default = "String::from(\"features.21\")")]
    layer: String,

    /// feature channel of the layer to maximize, negative for the whole layer
    #[argh(option, default = "-1")]
    feature: i64,

    /// how many frames to render
    #[argh(option, default = "5")]
    frames: usize,

    /// how many image octaves (scales)
    #[argh(option, default = "5")]
    octaves: usize,

    /// how many ascent iterations per octave
    #[argh(option, default = "10")]
    iterations: usize,

    /// octave scaling factor
    #[argh(option, default = "1.4")]
    octave_scale: f32,

    /// frame scaling factor
    #[argh(option, default = "1.0")]
    frame_scale: f32,

    /// crop every frame to the input resolution
    #[argh(switch)]
    frame_crop: bool,

    /// side of the square tiles fed to the network
    #[argh(option, default = "256")]
    tile_size: usize,

    /// ascent step size
    #[argh(option, default = "1.5")]
    step_size: f32,

    /// value subtracted from the pixels before the network
    #[argh(option, default = "117.0")]
    input_mean: f32,

    /// seed of the tile shifts, random if absent
    #[argh(option)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let model = ConvNet::from_safetensors(&args.model, args.input_mean)?;

    let layers = model.layers();
    for layer in layers.iter() {
        log::info!("layer {}: {} channels", layer.name, layer.channels);
    }
    log::info!(
        "number of layers: {}, total number of feature channels: {}",
        layers.len(),
        layers.iter().map(|l| l.channels).sum::<usize>()
    );

    let objective = Objective::from_feature_index(&args.layer, args.feature);
    log::info!("maximizing {objective}");

    let image = match &args.input {
        Some(path) => F::read_image_rgb_f32(path)?,
        None => Image::from_size_val(
            ImageSize {
                width: DEFAULT_INPUT_SIDE,
                height: DEFAULT_INPUT_SIDE,
            },
            128.0,
        )?,
    };

    let dream = DreamParams {
        iterations: args.iterations,
        step_size: args.step_size,
        octave_count: args.octaves,
        octave_scale: args.octave_scale,
        tile_size: args.tile_size,
    };
    let frames = FrameParams {
        frames: args.frames,
        frame_scale: args.frame_scale,
        frame_crop: args.frame_crop,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    render_frames(
        &model,
        &objective,
        image,
        &dream,
        &frames,
        &mut rng,
        |index, frame| -> Result<(), Box<dyn std::error::Error>> {
            let path = frame_output_path(&args.output, index);
            jpeg::write_image_jpeg_rgb8(&path, frame, OUTPUT_QUALITY)?;
            log::info!("saved frame {index} to {}", path.display());
            Ok(())
        },
    )?;

    Ok(())
}
