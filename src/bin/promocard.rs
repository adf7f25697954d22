use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "promocard", version, about = "Compose model-announcement promo images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the static asset as a PNG.
    Still(StillArgs),
    /// Render one animation frame as a PNG.
    Frame(FrameArgs),
    /// Export the intro animation (requires `ffmpeg` on PATH).
    Animate(AnimateArgs),
    /// List the image ids a design needs and whether each one loads.
    Sources(CommonArgs),
    /// Generate a background with the mock provider and write the updated design.
    Generate(GenerateArgs),
    /// Print the default design as JSON.
    DefaultConfig,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Which asset to produce.
    #[arg(long, value_enum, default_value_t = KindChoice::Social)]
    kind: KindChoice,

    /// Design JSON; the default design when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine settings JSON (assets root, fonts, export colour).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the font configured for each role (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct StillArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output PNG path or directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index (0-based, 30 fps).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, value_enum, default_value_t = FormatChoice::Both)]
    format: FormatChoice,

    /// Directory the video files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Render frames on this many worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Design JSON to update; the default design when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = promocard::DEFAULT_PROMPT)]
    prompt: String,

    /// One of the style preset ids.
    #[arg(long)]
    style: Option<String>,

    /// Where the updated design is written; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Social,
    Header,
}

impl From<KindChoice> for promocard::AssetKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::Social => Self::Social,
            KindChoice::Header => Self::Header,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Mp4,
    Webm,
    Both,
}

impl From<FormatChoice> for promocard::ExportFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Mp4 => Self::Mp4,
            FormatChoice::Webm => Self::Webm,
            FormatChoice::Both => Self::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Sources(args) => cmd_sources(args),
        Command::Generate(args) => cmd_generate(args),
        Command::DefaultConfig => {
            println!("{}", promocard::AssetConfig::default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("promocard=info")),
        )
        .try_init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<promocard::AssetConfig> {
    let Some(path) = path else {
        return Ok(promocard::AssetConfig::default());
    };
    let json =
        std::fs::read_to_string(path).with_context(|| format!("open design '{}'", path.display()))?;
    promocard::AssetConfig::from_json(&json)
        .with_context(|| format!("parse design '{}'", path.display()))
}

/// Everything a render needs, loaded from the common arguments.
struct Session {
    kind: promocard::AssetKind,
    config: promocard::AssetConfig,
    settings: promocard::EngineSettings,
    images: promocard::ImageSet,
    renderer: promocard::FrameRenderer,
}

fn open_session(args: &CommonArgs) -> anyhow::Result<Session> {
    let kind = promocard::AssetKind::from(args.kind);
    let config = read_config(args.config.as_deref())?;
    let settings = promocard::EngineSettings::resolve(args.settings.as_deref())?;

    let loader = settings.asset_loader();
    let images = loader.resolve(&promocard::image_sources(kind, &config));
    let mut renderer = promocard::FrameRenderer::new(settings.build_typesetter());

    if args.dump_fonts {
        dump_font_diagnostics(renderer.typesetter());
    }

    Ok(Session {
        kind,
        config,
        settings,
        images,
        renderer,
    })
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut s = open_session(&args.common)?;
    let path = promocard::save_still(&mut s.renderer, s.kind, &s.config, &s.images, &args.out)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.frame >= promocard::TOTAL_FRAMES {
        anyhow::bail!(
            "frame {} is past the end of the animation ({} frames)",
            args.frame,
            promocard::TOTAL_FRAMES
        );
    }
    let mut s = open_session(&args.common)?;
    let t = promocard::frame_time(args.frame);
    let frame = s.renderer.render_at(s.kind, &s.config, &s.images, t)?;
    promocard::save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut s = open_session(&args.common)?;
    let mut threading = s.settings.threading();
    if let Some(n) = args.threads {
        threading.parallel = true;
        threading.threads = Some(n);
    }
    let encoder = promocard::FfmpegEncoder {
        bg: s.settings.video_background()?,
    };
    let mut exporter = promocard::AnimationExport::new(Box::new(encoder)).with_threading(threading);
    let job = promocard::ExportJob {
        kind: s.kind,
        format: args.format.into(),
        out_dir: args.out_dir,
    };

    let mut last_decile = -1i64;
    let mut last_message = String::new();
    let state = exporter.export(&job, &mut s.renderer, &s.config, &s.images, &mut |st| {
        let decile = (st.progress / 10.0).floor() as i64;
        if decile != last_decile || st.message != last_message {
            eprintln!("{:>3.0}% {}", st.progress, st.message);
            last_decile = decile;
            last_message = st.message.clone();
        }
    })?;

    for path in [&state.mp4, &state.webm].into_iter().flatten() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_sources(args: CommonArgs) -> anyhow::Result<()> {
    let kind = promocard::AssetKind::from(args.kind);
    let config = read_config(args.config.as_deref())?;
    let settings = promocard::EngineSettings::resolve(args.settings.as_deref())?;
    let loader = settings.asset_loader();
    let ids = promocard::image_sources(kind, &config);
    loader.resolve(&ids);

    for id in &ids {
        match loader.state(id) {
            promocard::LoadState::Ready(img) => {
                println!("ok       {id} ({}x{})", img.width, img.height)
            }
            promocard::LoadState::Failed(reason) => println!("missing  {id}: {reason}"),
            promocard::LoadState::Pending => println!("pending  {id}"),
        }
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let mut request = promocard::GenerateRequest::new(args.prompt);
    if let Some(style) = args.style {
        if promocard::style_preset(&style).is_none() {
            let known: Vec<&str> = promocard::STYLE_PRESETS.iter().map(|p| p.id).collect();
            anyhow::bail!("unknown style preset '{style}' (known: {})", known.join(", "));
        }
        request = request.with_style_preset(style);
    }

    let provider = promocard::MockProvider::new();
    let url =
        promocard::generate_background(&provider, &request, promocard::PollOptions::default())?;
    let updated = promocard::apply_generated(&config, url);
    let json = updated.to_json_pretty()?;

    match args.out {
        Some(out) => {
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn dump_font_diagnostics(ts: &promocard::Typesetter) {
    eprintln!("font diagnostics:");
    for role in promocard::FontRole::ALL {
        eprintln!("  {}:", role.name());
        match (ts.family(role), ts.font_bytes(role)) {
            (Some(family), Some(bytes)) => {
                eprintln!("    family:      {family}");
                eprintln!("    sha256:      {}", sha256_hex(bytes));
            }
            _ => eprintln!("    (none; text in this role is not drawn)"),
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
