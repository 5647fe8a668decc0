use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollstory", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the viewport at a scroll position as a PNG.
    Frame(FrameArgs),
    /// Scroll through a range and print JSON snapshots.
    Simulate(SimulateArgs),
    /// Load the config and assets and report problems.
    Validate(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Story config JSON; defaults to the built-in story.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `dna_helix.json` and `morph_path.json`; defaults to bundled assets.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct HostArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Mount without a canvas surface, as a host without a graphics context would.
    #[arg(long)]
    no_graphics: bool,

    /// Animation frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    host: HostArgs,

    /// Page scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Seconds of animation to run after scrolling.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Let scrolling settle (snapping the strip) before running the animation.
    #[arg(long)]
    settle: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    host: HostArgs,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll increment between snapshots.
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Animation frames run after each scroll step.
    #[arg(long, default_value_t = 6)]
    frames_per_step: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn load(
    source: &SourceArgs,
) -> anyhow::Result<(scrollstory::StoryConfig, scrollstory::StoryAssets)> {
    let config = match &source.config {
        Some(path) => scrollstory::StoryConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => scrollstory::StoryConfig::default(),
    };
    let assets = match &source.assets {
        Some(dir) => scrollstory::StoryAssets::from_dir(dir)
            .with_context(|| format!("load assets from '{}'", dir.display()))?,
        None => scrollstory::StoryAssets::builtin().context("load bundled assets")?,
    };
    Ok((config, assets))
}

fn make_host(args: &HostArgs) -> anyhow::Result<scrollstory::Host> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0, got {}", args.fps);
    }
    let viewport = scrollstory::Viewport::new(args.width, args.height)?;
    Ok(if args.no_graphics {
        scrollstory::Host::without_graphics(viewport)
    } else {
        scrollstory::Host::new(viewport)
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (config, assets) = load(&args.source)?;
    let host = make_host(&args.host)?;
    let story = scrollstory::ProductStory::mount(&host, config, assets)?;

    host.scroll_to(args.scroll);
    if args.settle {
        host.end_scroll();
    }
    let frames = (args.time.max(0.0) * args.host.fps).ceil() as usize;
    host.run_frames(frames, 1.0 / args.host.fps);

    let frame = story.render_frame()?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be > 0, got {}", args.step);
    }
    let (config, assets) = load(&args.source)?;
    let host = make_host(&args.host)?;
    let story = scrollstory::ProductStory::mount(&host, config, assets)?;

    let dt = 1.0 / args.host.fps;
    let mut snapshots = Vec::new();
    let mut scroll = args.from;
    while scroll <= args.to {
        host.scroll_to(scroll);
        host.run_frames(args.frames_per_step, dt);
        snapshots.push(story.snapshot());
        scroll += args.step;
    }

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &snapshots).context("write snapshots")?;
    println!();
    Ok(())
}

fn cmd_validate(args: SourceArgs) -> anyhow::Result<()> {
    let (config, assets) = load(&args)?;
    config.validate()?;
    let body = scrollstory::assets::text::TextLayoutEngine::new(&assets.fonts.regular)
        .context("load body font")?;
    scrollstory::assets::text::TextLayoutEngine::new(&assets.fonts.bold)
        .context("load title font")?;
    println!(
        "ok: {} sections, {} vector layers ({} frames at {} fps), font '{}'",
        config.sections.len(),
        assets.vector.layers.len(),
        assets.vector.duration_frames(),
        assets.vector.fps,
        body.family_name(),
    );
    Ok(())
}
