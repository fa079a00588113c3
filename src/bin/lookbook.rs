// lookbook - compose fashion ads from six images with a hosted image model

use clap::{Parser, Subcommand};
use lookbook::composition::service::GeminiService;
use lookbook::composition::{AccentColor, DroppedItem, PhotoStyle, SlotId, WorkflowController};
use lookbook::config::ComposerConfig;
use lookbook::output::{save_result, timestamp};
use lookbook::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use termimad::{MadSkin, crossterm::style::Color};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fuse six images into two AI-generated fashion advertisements", long_about = None)]
struct Cli {
    /// Config file (default: ./.lookbook.json, then ~/.lookbook.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the artistic and expository composites
    Generate(GenerateArgs),
    /// List the available photo styles
    Styles,
    /// List the accent color palette
    Colors,
    /// Write an example config file
    InitConfig {
        #[arg(default_value = ".lookbook.json")]
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background scene
    #[arg(long)]
    scenario: PathBuf,

    /// Model to dress
    #[arg(long)]
    model: PathBuf,

    #[arg(long)]
    clothing1: PathBuf,

    #[arg(long)]
    clothing2: PathBuf,

    #[arg(long)]
    clothing3: PathBuf,

    #[arg(long)]
    accessory: PathBuf,

    /// Photo style label (see `lookbook styles`)
    #[arg(short, long)]
    style: Option<PhotoStyle>,

    /// Accent color name or hex (see `lookbook colors`)
    #[arg(long)]
    color: Option<AccentColor>,

    /// Where to write the generated images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn inputs(&self) -> [(SlotId, &Path); 6] {
        [
            (SlotId::Scenario, self.scenario.as_path()),
            (SlotId::Model, self.model.as_path()),
            (SlotId::Clothing1, self.clothing1.as_path()),
            (SlotId::Clothing2, self.clothing2.as_path()),
            (SlotId::Clothing3, self.clothing3.as_path()),
            (SlotId::Accessory, self.accessory.as_path()),
        ]
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lookbook={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded .env from {}", path.display()),
        Err(e) => tracing::debug!("No .env loaded: {}", e),
    }

    let skin = create_markdown_skin();

    let outcome = match cli.command {
        Commands::Generate(args) => generate(args, cli.config.as_deref(), &skin).await,
        Commands::Styles => {
            print_styles(&skin);
            Ok(())
        }
        Commands::Colors => {
            print_colors(&skin);
            Ok(())
        }
        Commands::InitConfig { path } => init_config(&path),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn generate(args: GenerateArgs, config_path: Option<&Path>, skin: &MadSkin) -> Result<()> {
    let (config, source) = ComposerConfig::load(config_path)?;
    match &source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("Model: {}", config.model);

    let service = GeminiService::new(config.gemini())?;
    let mut controller = WorkflowController::new(Arc::new(service));

    for (slot, path) in args.inputs() {
        let item = DroppedItem::from_path(path)
            .await
            .map_err(|source| Error::Input {
                path: path.to_path_buf(),
                source,
            })?;

        // A rejected item leaves the slot empty; submit reports it as missing
        if let Err(e) = controller.drop_item(slot, &item) {
            eprintln!("⚠️  {}: {}", slot, e);
        }
    }

    if !controller.is_ready() {
        let missing = controller.session().slots.missing();
        eprintln!(
            "⚠️  Not ready: {} of {} images accepted",
            SlotId::ALL.len() - missing.len(),
            SlotId::ALL.len()
        );
    }

    if let Some(style) = args.style {
        controller.set_style(style);
    }
    if let Some(color) = args.color {
        controller.set_color(color);
    }

    let selection = controller.session().selection;
    println!(
        "🎨 Style: {}  |  Color: {}",
        selection.style(),
        selection.color()
    );
    println!("⏳ AI is crafting your images... this may take a moment.\n");

    let result = controller.submit().await?;

    let output_dir = args.output_dir.unwrap_or(config.output_dir);
    let saved = save_result(&result, &output_dir, &timestamp()).await?;

    skin.print_text(&format!(
        "## Artistic Composition\n\n`{}`\n\n## Expository View\n\n`{}`\n",
        saved[0].display(),
        saved[1].display()
    ));

    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::InvalidConfig(format!(
            "{} already exists",
            path.display()
        )));
    }

    ComposerConfig::default().to_file(path)?;
    println!("✅ Created example config at: {}", path.display());
    println!("   Set GEMINI_API_KEY in your environment or a .env file");
    Ok(())
}

fn print_styles(skin: &MadSkin) {
    let mut text = String::from("## Photo styles\n\n");
    for (i, style) in PhotoStyle::ALL.iter().enumerate() {
        let marker = if i == 0 { " *(default)*" } else { "" };
        text.push_str(&format!("* {}{}\n", style, marker));
    }
    skin.print_text(&text);
}

fn print_colors(skin: &MadSkin) {
    let mut text = String::from("## Accent colors\n\n|Name|Hex|\n|:-|:-|\n");
    for color in AccentColor::ALL {
        text.push_str(&format!("|{}|`{}`|\n", color.name(), color.hex()));
    }
    skin.print_text(&text);
}

fn create_markdown_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    skin.headers[0].set_fg(Color::Magenta);
    skin.headers[1].set_fg(Color::Magenta);
    skin.inline_code.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::DarkGrey);

    skin
}
