mod logger;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use logger::StderrLogger;
use pdf_pins::{PinOptions, PinSize, TextBlock, TextPosition, parse_color, parse_optional_color};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pins", about = "Pin and button cut-template generator", version)]
struct Cli {
    /// More log output: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PDF sheet of pin templates
    Generate(GenerateArgs),

    /// List the supported pin sizes
    Profiles,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Input image(s); omit for a blank or text-only template
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Load options from a JSON file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Pin size
    #[arg(long, value_enum)]
    size: Option<SizeArg>,

    /// Repeat images and text to fill whole pages
    #[arg(long)]
    duplicate: bool,

    /// Fill the background with the image's edge colour
    #[arg(long)]
    fill: bool,

    /// Background colour (hex or CSS name)
    #[arg(long)]
    background: Option<String>,

    /// Border ring colour (hex or CSS name)
    #[arg(long)]
    border: Option<String>,

    /// Border ring width in mm
    #[arg(long, allow_negative_numbers = true)]
    border_width: Option<f32>,

    /// Text for one pin, `|` separates lines (repeat for more pins)
    #[arg(long)]
    text: Vec<String>,

    /// CSV file with one pin per row and one line per column
    #[arg(long)]
    text_csv: Option<PathBuf>,

    /// Vertical text placement
    #[arg(long, value_enum)]
    text_position: Option<PositionArg>,

    /// Text colour (hex or CSS name)
    #[arg(long)]
    text_color: Option<String>,

    /// Default font size in points
    #[arg(long)]
    text_size: Option<f32>,

    /// Text outline colour (hex or CSS name)
    #[arg(long)]
    outline_color: Option<String>,

    /// Text outline width in points
    #[arg(long, allow_negative_numbers = true)]
    outline_width: Option<f32>,

    /// Zoom per slot, in slot order (repeatable)
    #[arg(long, allow_negative_numbers = true)]
    zoom: Vec<f32>,

    /// Horizontal image offset per slot in points (repeatable)
    #[arg(long, allow_negative_numbers = true)]
    offset_x: Vec<f32>,

    /// Vertical image offset per slot in points (repeatable)
    #[arg(long, allow_negative_numbers = true)]
    offset_y: Vec<f32>,

    /// Raster resolution for embedded images
    #[arg(long)]
    dpi: Option<f32>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    #[value(name = "32mm")]
    Small,
    #[value(name = "58mm")]
    Large,
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    Top,
    Center,
    Bottom,
}

impl From<SizeArg> for PinSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => Self::Small,
            SizeArg::Large => Self::Large,
        }
    }
}

impl From<PositionArg> for TextPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Top => Self::Top,
            PositionArg::Center => Self::Center,
            PositionArg::Bottom => Self::Bottom,
        }
    }
}

impl GenerateArgs {
    /// Layer the flags over the config file (or the defaults)
    async fn options(&self) -> Result<PinOptions> {
        let mut options = match &self.config {
            Some(path) => PinOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PinOptions::default(),
        };

        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        if let Some(size) = self.size {
            options.size = size.into();
        }
        options.duplicate |= self.duplicate;
        options.fill_with_edge_color |= self.fill;

        if let Some(color) = &self.background {
            options.background_color = parse_optional_color(color)?;
        }
        if let Some(color) = &self.border {
            options.border_color = parse_optional_color(color)?;
        }
        if let Some(width) = self.border_width {
            options.border_width_mm = width;
        }

        let mut text_blocks: Vec<TextBlock> = self
            .text
            .iter()
            .map(|text| TextBlock::from_delimited(text))
            .filter(|block| !block.is_empty())
            .collect();
        if let Some(path) = &self.text_csv {
            let from_csv = pdf_pins::load_text_blocks_from_csv(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            text_blocks.extend(from_csv);
        }
        if !text_blocks.is_empty() {
            options.text_blocks = text_blocks;
        }

        if let Some(position) = self.text_position {
            options.text_position = position.into();
        }
        if let Some(color) = &self.text_color {
            options.text_color = parse_color(color)?;
        }
        if let Some(size) = self.text_size {
            options.default_text_size = Some(size);
        }
        if let Some(color) = &self.outline_color {
            options.text_outline_color = parse_optional_color(color)?;
        }
        if let Some(width) = self.outline_width {
            options.text_outline_width_pt = width;
        }
        if let Some(dpi) = self.dpi {
            options.raster_dpi = dpi;
        }

        let options = options.with_framing(&self.zoom, &self.offset_x, &self.offset_y);
        options.validate()?;
        Ok(options)
    }
}

fn print_profiles() {
    println!("{:<6} {:>10} {:>12} {:>10}", "Size", "Pin (mm)", "Circle (mm)", "Per page");
    for size in PinSize::ALL {
        let profile = size.profile();
        println!(
            "{:<6} {:>10.1} {:>12.1} {:>10}",
            size.name(),
            pdf_pins::constants::pt_to_mm(profile.pin_diameter_pt),
            pdf_pins::constants::pt_to_mm(profile.circle_diameter_pt),
            profile.circles_per_page
        );
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let options = args.options().await?;

    if let Some(path) = &args.save_config {
        options
            .save(path)
            .await
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        println!("Saved options → {}", path.display());
    }

    let stats = pdf_pins::calculate_statistics(args.input.len(), &options);
    println!("Pin Sheet Statistics:");
    println!("  Pin size: {}", stats.pin_size.name());
    println!("  Circles per page: {}", stats.circles_per_page);
    println!("  Total circles: {}", stats.total_slots);
    println!("  Pages: {}", stats.pages);
    println!("  Circles on last page: {}", stats.circles_on_last_page);
    println!("  Images used: {}", stats.images_used);
    println!("  Text blocks used: {}", stats.text_blocks_used);
    println!("  Circles without image: {}", stats.blank_slots);

    if args.stats_only {
        return Ok(());
    }

    let Some(output) = args.output else {
        if args.save_config.is_some() {
            return Ok(());
        }
        bail!("No output file given (use -o/--output)");
    };

    let images = pdf_pins::load_images(&args.input).await?;
    pdf_pins::generate_pdf(images, &options, &output).await?;
    println!("Generated {} pins → {}", stats.total_slots, output.display());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    StderrLogger::new(StderrLogger::level_for(cli.verbose, cli.quiet))
        .init()
        .context("Failed to initialise logging")?;

    match cli.command {
        Commands::Generate(args) => run_generate(args).await?,
        Commands::Profiles => print_profiles(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(std::iter::once("pins").chain(args.iter().copied())).unwrap();
        match cli.command {
            Commands::Generate(args) => args,
            Commands::Profiles => panic!("Expected generate"),
        }
    }

    #[tokio::test]
    async fn test_flags_build_options() {
        let args = parse(&[
            "generate",
            "--size",
            "58mm",
            "--duplicate",
            "--background",
            "#ff0000",
            "--border",
            "black",
            "--border-width",
            "2",
            "--text",
            "Hello|World",
            "--text-position",
            "bottom",
            "--zoom",
            "1.5",
            "--offset-x",
            "-4",
        ]);

        let options = args.options().await.unwrap();
        assert_eq!(options.size, PinSize::Large);
        assert!(options.duplicate);
        assert_eq!(options.background_color, Some(pdf_pins::RgbColor::new(255, 0, 0)));
        assert_eq!(options.border_width_mm, 2.0);
        assert_eq!(options.text_blocks.len(), 1);
        assert_eq!(options.text_blocks[0].lines.len(), 2);
        assert_eq!(options.text_position, TextPosition::Bottom);
        assert_eq!(options.style_for(0).zoom, 1.5);
        assert_eq!(options.style_for(0).offset_x_pt, -4.0);
    }

    #[tokio::test]
    async fn test_invalid_flags_are_rejected() {
        let args = parse(&["generate", "--border-width", "-1"]);
        assert!(args.options().await.is_err());

        let args = parse(&["generate", "--text-color", "notacolour"]);
        assert!(args.options().await.is_err());
    }

    #[test]
    fn test_unknown_size_is_a_parse_error() {
        assert!(Cli::try_parse_from(["pins", "generate", "--size", "45mm"]).is_err());
    }
}
