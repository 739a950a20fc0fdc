use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use likeness::{
    Compositor, CompositorOpts, FixedAdvanceText, FontBook, GlyphPainter, ImageSource,
    ParleyText, PreparedImage, RenderOutcome, ResultPayload, TextMeasure, plan_report,
};

#[derive(Parser, Debug)]
#[command(name = "likeness", version)]
struct Cli {
    /// Log layout and render decisions to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a report as a PNG.
    Render(RenderArgs),
    /// Print the computed layout as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Analysis result JSON.
    #[arg(long)]
    payload: PathBuf,

    /// Photo to annotate. Defaults to the payload's `images.child`, resolved next to the payload.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Available width in logical pixels.
    #[arg(long, default_value_t = 360.0)]
    width: f64,

    /// Regular font (TTF/OTF). Without it text is laid out with fixed advances and drawn as boxes.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font; defaults to the regular font.
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Compositor options JSON; missing fields take their defaults.
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Device pixel ratio; overrides the options file.
    #[arg(long)]
    dpr: Option<f64>,

    /// Draw a crosshair at the face anchor.
    #[arg(long, default_value_t = false)]
    debug_anchor: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,
}

struct Inputs {
    payload: ResultPayload,
    image: PreparedImage,
    opts: CompositorOpts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Inputs> {
    let payload = ResultPayload::from_path(&args.payload)?;
    let payload_dir = args.payload.parent().unwrap_or_else(|| Path::new("."));

    let child = payload.images.as_ref().and_then(|i| i.child.as_deref());
    let image = match (&args.image, child) {
        (Some(p), _) => ImageSource::Path(p.clone()).load(None)?,
        (None, Some(reference)) => ImageSource::parse(reference)?.load(Some(payload_dir))?,
        (None, None) => anyhow::bail!(
            "no photo: pass --image or set images.child in '{}'",
            args.payload.display()
        ),
    };

    let opts = match &args.opts {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .with_context(|| format!("read options '{}'", p.display()))?;
            CompositorOpts::from_json_str(&s)?
        }
        None => CompositorOpts::default(),
    };

    Ok(Inputs {
        payload,
        image,
        opts,
    })
}

fn load_fonts(args: &InputArgs) -> anyhow::Result<Option<ParleyText>> {
    let Some(regular) = &args.font else {
        if args.font_bold.is_some() {
            anyhow::bail!("--font-bold needs --font");
        }
        return Ok(None);
    };
    let book = FontBook::from_paths(regular, args.font_bold.as_deref())?;
    Ok(Some(ParleyText::new(book)?))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut inputs = load_inputs(&args.input)?;
    if let Some(dpr) = args.dpr {
        inputs.opts = inputs.opts.with_device_pixel_ratio(dpr);
    }
    if args.debug_anchor {
        inputs.opts = inputs.opts.with_debug_anchor(true);
    }

    let png = match load_fonts(&args.input)? {
        Some(text) => render_png(text, inputs, args.input.width)?,
        None => render_png(FixedAdvanceText::default(), inputs, args.input.width)?,
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn render_png<T: GlyphPainter>(text: T, inputs: Inputs, width: f64) -> anyhow::Result<Vec<u8>> {
    let mut compositor = Compositor::new(text, inputs.opts)?;
    compositor.set_image(inputs.image)?;
    compositor.set_result(inputs.payload)?;
    match compositor.set_available_width(width)? {
        RenderOutcome::Drawn(summary) => {
            tracing::info!(?summary, "rendered report");
        }
        other => anyhow::bail!("report was not drawn: {other:?}"),
    }
    let surface = compositor
        .surface()
        .context("compositor has no surface after drawing")?;
    Ok(surface.encode_png()?)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let json = match load_fonts(&args.input)? {
        Some(text) => plan_json(text, inputs, args.input.width)?,
        None => plan_json(FixedAdvanceText::default(), inputs, args.input.width)?,
    };
    println!("{json}");
    Ok(())
}

fn plan_json<T: TextMeasure>(mut text: T, inputs: Inputs, width: f64) -> anyhow::Result<String> {
    let plan = plan_report(
        &mut text,
        &inputs.payload,
        inputs.image.width,
        inputs.image.height,
        width,
        &inputs.opts.layout,
        &inputs.opts.connector,
    )?;
    Ok(serde_json::to_string_pretty(&plan)?)
}
