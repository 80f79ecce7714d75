use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use meshgrad::{BlurKind, DistortionSpec, GradientConfig, Harmony, MeshGradient, PaletteEngine};

#[derive(Parser, Debug)]
#[command(name = "meshgrad", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one gradient as a PNG.
    Render(RenderArgs),
    /// Print a harmony palette as hex colors, one per line.
    Palette(PaletteArgs),
    /// Render a PNG sequence of hue rotation and/or cell wander.
    Animate(AnimateArgs),
}

/// Settings shared by `render` and `animate`. Flags override the config file.
#[derive(Args, Debug)]
struct GradientArgs {
    /// Gradient config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Number of cells (3..=64).
    #[arg(long)]
    cells: Option<usize>,

    /// Blur amount (0..=100).
    #[arg(long)]
    blur: Option<f64>,

    /// `gaussian` or `box`.
    #[arg(long, value_parser = parse_blur_kind)]
    blur_kind: Option<BlurKind>,

    /// analogous, complementary, triadic, tetradic, monochromatic,
    /// split-complementary or random.
    #[arg(long)]
    harmony: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Distortion kind (polar, ripple, wave, twist, bulge, barrel) with default options.
    #[arg(long)]
    distortion: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    gradient: GradientArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the resolved config (sites and locks included) as JSON.
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    #[arg(long, default_value = "analogous")]
    harmony: String,

    #[arg(long, default_value_t = 5)]
    count: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON array instead of plain lines.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    gradient: GradientArgs,

    /// Directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 30)]
    frames: u32,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Rotate hues.
    #[arg(long, default_value_t = false)]
    hue: bool,

    /// Drift cell sites.
    #[arg(long, default_value_t = false)]
    wander: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshgrad=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Palette(args) => cmd_palette(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn parse_blur_kind(s: &str) -> Result<BlurKind, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "gaussian" => Ok(BlurKind::Gaussian),
        "box" => Ok(BlurKind::Box),
        other => Err(format!("unknown blur kind '{other}' (expected gaussian or box)")),
    }
}

fn load_config(args: &GradientArgs) -> anyhow::Result<GradientConfig> {
    let mut cfg = match &args.config {
        Some(path) => GradientConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => GradientConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(n) = args.cells {
        cfg.cell_count = n;
        if cfg.sites.as_ref().is_some_and(|s| s.len() != n) {
            cfg.sites = None;
        }
    }
    if let Some(b) = args.blur {
        cfg.blur_amount = b;
    }
    if let Some(k) = args.blur_kind {
        cfg.blur_kind = k;
    }
    if let Some(h) = &args.harmony {
        cfg.harmony = Harmony::parse_lossy(h);
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(kind) = &args.distortion {
        cfg.distortions = vec![DistortionSpec::new(kind.clone(), serde_json::Value::Null)];
    }
    cfg.validate().context("invalid gradient settings")?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.gradient)?;
    let mut gradient = MeshGradient::from_config(&cfg)?;
    gradient.export_png(&args.out)?;

    if let Some(path) = &args.dump_config {
        let json = gradient.to_config().to_json_pretty()?;
        write_text(path, &json)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_palette(args: PaletteArgs) -> anyhow::Result<()> {
    let mut engine = match args.seed {
        Some(seed) => PaletteEngine::with_seed(seed),
        None => PaletteEngine::default(),
    };
    let harmony = Harmony::parse_lossy(&args.harmony);
    let hex: Vec<String> = engine
        .generate(harmony, args.count)
        .iter()
        .map(|c| c.hex().to_owned())
        .collect();

    if args.json {
        println!("{}", serde_json::to_string(&hex)?);
    } else {
        for h in hex {
            println!("{h}");
        }
    }
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number");
    }
    let cfg = load_config(&args.gradient)?;
    let mut gradient = MeshGradient::from_config(&cfg)?;
    let (hue, wander) = if args.hue || args.wander {
        (args.hue, args.wander)
    } else {
        (true, false)
    };
    if hue {
        gradient.start_hue_animation(0.0);
    }
    if wander {
        gradient.start_wander(0.0);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for i in 0..args.frames {
        let t = f64::from(i) / args.fps;
        gradient.tick(t)?;
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        gradient.export_png(&path)?;
    }
    gradient.stop_hue_animation();
    gradient.stop_wander();

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
