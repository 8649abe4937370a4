use station_carousel::api::{CarouselConfig, CarouselController};
use station_carousel::core::{StationCatalog, Viewport};
use station_carousel::interaction::ManualScheduler;
use station_carousel::render::{CairoRenderer, Color, Renderer};
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: render_station_cards --output-dir <dir> [--catalog <path>]";
const BACKGROUND: Color = Color::rgb(0.94, 0.96, 0.95);

#[derive(Debug)]
struct CliArgs {
    output_dir: PathBuf,
    catalog: Option<PathBuf>,
}

fn main() {
    let _ = station_carousel::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let catalog = match &args.catalog {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            StationCatalog::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => StationCatalog::builtin(),
    };
    fs::create_dir_all(&args.output_dir).map_err(|err| {
        format!(
            "failed to create `{}`: {err}",
            args.output_dir.display()
        )
    })?;

    let config = CarouselConfig::new(Viewport::new(400, 340));
    let mut controller = CarouselController::new(catalog, config, ManualScheduler::new())
        .map_err(|err| err.to_string())?;
    controller.mount().map_err(|err| err.to_string())?;

    for index in 0..controller.catalog().len() {
        let frame = controller
            .build_card_frame(index)
            .map_err(|err| err.to_string())?;
        let path = args.output_dir.join(format!("card_{index}.png"));
        render_png(
            &frame,
            i32::try_from(frame.viewport.width).unwrap_or(i32::MAX),
            i32::try_from(frame.viewport.height).unwrap_or(i32::MAX),
            &path,
        )?;
        println!("wrote {}", path.display());
    }

    let frame = controller
        .build_render_frame()
        .map_err(|err| err.to_string())?;
    let path = args.output_dir.join("carousel.png");
    render_png(
        &frame,
        i32::try_from(config.viewport.width).unwrap_or(i32::MAX),
        i32::try_from(config.viewport.height).unwrap_or(i32::MAX),
        &path,
    )?;
    println!("wrote {}", path.display());
    Ok(())
}

fn render_png(
    frame: &station_carousel::render::RenderFrame,
    width: i32,
    height: i32,
    path: &Path,
) -> Result<(), String> {
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    renderer
        .set_clear_color(BACKGROUND)
        .map_err(|err| err.to_string())?;
    renderer.render(frame).map_err(|err| err.to_string())?;
    renderer.write_png(path).map_err(|err| err.to_string())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut output_dir = None::<PathBuf>;
    let mut catalog = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--output-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-dir".to_owned())?;
                output_dir = Some(PathBuf::from(value));
            }
            "--catalog" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --catalog".to_owned())?;
                catalog = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let output_dir = output_dir.ok_or_else(|| format!("missing --output-dir\n{USAGE}"))?;
    Ok(CliArgs {
        output_dir,
        catalog,
    })
}
