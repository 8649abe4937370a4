use serde::{Deserialize, Serialize};
use station_carousel::api::{CarouselConfig, CarouselController, CarouselEvent, CarouselSnapshot};
use station_carousel::core::{StationCatalog, Viewport};
use station_carousel::interaction::ManualScheduler;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const USAGE: &str =
    "usage: carousel_trace --script <path> [--catalog <path>] [--output <path>]";

#[derive(Debug)]
struct CliArgs {
    script: PathBuf,
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct TraceScript {
    #[serde(default)]
    config: Option<CarouselConfig>,
    steps: Vec<TraceStep>,
}

/// One scripted input. `advance_ms` moves the fake clock and feeds every
/// timer fire that elapsed back into the controller.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum TraceStep {
    Mount,
    Start,
    Stop,
    Teardown,
    AdvanceMs(u64),
    Frame(f64),
    DragBegin,
    Scroll(f64),
    MomentumEnd(f64),
    Dot(usize),
}

#[derive(Debug, Serialize)]
struct TraceRecord {
    step: TraceStep,
    snapshot: CarouselSnapshot,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = station_carousel::telemetry::init_default_tracing();
    let raw = fs::read_to_string(&args.script)
        .map_err(|err| format!("failed to read `{}`: {err}", args.script.display()))?;
    let script: TraceScript =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let catalog = match &args.catalog {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            StationCatalog::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => StationCatalog::builtin(),
    };
    let config = script
        .config
        .unwrap_or_else(|| CarouselConfig::new(Viewport::new(400, 340)));

    let mut controller = CarouselController::new(catalog, config, ManualScheduler::new())
        .map_err(|err| err.to_string())?;
    let mut records = Vec::with_capacity(script.steps.len());
    for step in script.steps {
        apply_step(&mut controller, step).map_err(|err| format!("{step:?}: {err}"))?;
        records.push(TraceRecord {
            step,
            snapshot: controller.snapshot(),
        });
    }

    let payload = serde_json::to_string_pretty(&records)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    match &args.output {
        Some(path) => fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn apply_step(
    controller: &mut CarouselController<ManualScheduler>,
    step: TraceStep,
) -> station_carousel::CarouselResult<()> {
    let event = match step {
        TraceStep::Mount => CarouselEvent::Mount,
        TraceStep::Start => CarouselEvent::Start,
        TraceStep::Stop => CarouselEvent::Stop,
        TraceStep::Teardown => CarouselEvent::Teardown,
        TraceStep::Frame(delta_seconds) => CarouselEvent::AnimationFrame { delta_seconds },
        TraceStep::DragBegin => CarouselEvent::DragBegin,
        TraceStep::Scroll(offset) => CarouselEvent::Scrolled { offset },
        TraceStep::MomentumEnd(offset) => CarouselEvent::MomentumEnd { offset },
        TraceStep::Dot(index) => CarouselEvent::DotPressed { index },
        TraceStep::AdvanceMs(millis) => {
            let fired = controller
                .scheduler_mut()
                .advance(Duration::from_millis(millis));
            for handle in fired {
                controller.on_timer_fired(handle)?;
            }
            return Ok(());
        }
    };
    controller.dispatch(event)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut script = None::<PathBuf>;
    let mut catalog = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--script" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --script".to_owned())?;
                script = Some(PathBuf::from(value));
            }
            "--catalog" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --catalog".to_owned())?;
                catalog = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let script = script.ok_or_else(|| format!("missing --script\n{USAGE}"))?;
    Ok(CliArgs {
        script,
        catalog,
        output,
    })
}
