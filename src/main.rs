//! qrforge CLI entrypoint

use clap::Parser;
use qrforge::{
    ContactRecord, Error, LogoOptions, LogoShape, PayloadSource, QrRenderer, QrforgeConfig,
    Result, logging, output, verify,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrforge",
    version,
    about = "Styled QR code generator with vCard contact payloads"
)]
struct Cli {
    /// Raw text or URL to embed (plain-text mode)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to qrforge.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Embed a vCard contact instead of raw text
    #[arg(long, conflicts_with = "text")]
    contact: bool,

    /// Contact given name
    #[arg(long, value_name = "NAME", requires = "contact")]
    name: Option<String>,

    /// Contact family name
    #[arg(long, value_name = "NAME", requires = "contact")]
    last_name: Option<String>,

    /// Contact organization
    #[arg(long, value_name = "ORG", requires = "contact")]
    org: Option<String>,

    /// Contact job title
    #[arg(long, value_name = "TITLE", requires = "contact")]
    title: Option<String>,

    /// Contact phone number
    #[arg(long, value_name = "TEL", requires = "contact")]
    phone: Option<String>,

    /// Contact email address
    #[arg(long, value_name = "EMAIL", requires = "contact")]
    email: Option<String>,

    /// Output size in pixels, 100-500 (takes precedence over config file)
    #[arg(long, value_name = "PX")]
    size: Option<u32>,

    /// Module color as hex (e.g. #000000)
    #[arg(long, value_name = "HEX")]
    fg: Option<String>,

    /// Background color as hex (e.g. #ffffff)
    #[arg(long, value_name = "HEX")]
    bg: Option<String>,

    /// Dot style: square, dots, rounded, extra-rounded
    #[arg(long, value_name = "STYLE")]
    dot_style: Option<String>,

    /// Logo image to overlay in the center
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// Padding in pixels around the logo patch
    #[arg(long, value_name = "PX")]
    logo_margin: Option<u32>,

    /// Logo size as a fraction of output width (max 0.4)
    #[arg(long, value_name = "FRACTION")]
    logo_scale: Option<f32>,

    /// Shape cleared behind the logo: circle, square, none
    #[arg(long, value_name = "SHAPE")]
    logo_shape: Option<String>,

    /// Keep the modules under the logo patch instead of clearing them
    #[arg(long)]
    keep_logo_dots: bool,

    /// Output PNG path
    #[arg(long, short, value_name = "PATH", default_value = "qr-code.png")]
    out: PathBuf,

    /// Print a unicode preview of the QR code to the terminal
    #[arg(long)]
    terminal: bool,

    /// Re-decode the rendered image and fail if the payload does not match
    #[arg(long)]
    verify: bool,

    /// Output the render summary as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn contact_record(&self) -> ContactRecord {
        ContactRecord {
            name: self.name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            org: self.org.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrforgeConfig::load(cli.config.as_deref())?;

    if let Some(size) = cli.size {
        config.render.size = Some(size);
    }
    if let Some(ref fg) = cli.fg {
        config.render.foreground = Some(fg.clone());
    }
    if let Some(ref bg) = cli.bg {
        config.render.background = Some(bg.clone());
    }
    if let Some(ref style) = cli.dot_style {
        config.render.dot_style = Some(style.clone());
    }
    if let Some(ref logo) = cli.logo {
        config.render.logo = Some(logo.clone());
    }
    if let Some(margin) = cli.logo_margin {
        config.render.logo_margin = Some(margin);
    }
    if let Some(scale) = cli.logo_scale {
        config.render.logo_scale = Some(scale);
    }
    if let Some(ref shape) = cli.logo_shape {
        // Validate early so a typo fails before any rendering work
        LogoShape::from_str(shape).map_err(Error::Config)?;
        config.render.logo_shape = Some(shape.clone());
    }

    logging::init(&config.logging)?;

    let mut options = config.render_options()?;

    if let Some(path) = config.render.logo.clone() {
        let mut logo = config
            .render
            .apply_logo_overrides(LogoOptions::load(&path).await?)?;
        if cli.keep_logo_dots {
            logo = logo.keep_dots();
        }
        options.logo = Some(logo);
    }

    let source = build_source(&cli);
    let payload = source.payload();
    info!(
        mode = %source.mode,
        payload_bytes = payload.len(),
        size = options.size,
        "Rendering QR code"
    );

    let renderer = QrRenderer::for_options(&options);

    if cli.terminal {
        println!("{}", renderer.render_terminal(&payload)?);
    }

    let image = renderer.render(&payload, &options)?;
    output::write_png(&image, &cli.out)?;

    if cli.verify {
        verify::round_trip(&image, &payload)?;
        info!("Verification passed: output decodes to the input payload");
    }

    let summary = output::render_summary(&source, &options, Some(&cli.out));
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary.json)?);
    } else {
        for line in &summary.human {
            println!("{line}");
        }
    }

    Ok(())
}

/// Build the payload source from CLI arguments
fn build_source(cli: &Cli) -> PayloadSource {
    if cli.contact {
        PayloadSource::contact(cli.contact_record())
    } else {
        let text = cli
            .text
            .clone()
            .unwrap_or_else(|| "https://www.example.com/".to_string());
        PayloadSource::plain_text(text)
    }
}
