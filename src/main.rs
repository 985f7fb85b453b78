//! picascii CLI - Convert images to ASCII art

use clap::Parser;
use picascii::config::ScaleMode;
use picascii::ramp::NAMED_RAMPS;
use picascii::{ConfigSnapshot, Converter, PicasciiError, Preset};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picascii", version, about = "Convert images to ASCII art")]
struct Args {
    /// Input image file
    #[arg(required_unless_present_any = ["list_ramps", "preview"])]
    input: Option<PathBuf>,
    /// Config file (TOML); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Scaling mode: pixel-perfect, auto or manual
    #[arg(short, long)]
    mode: Option<ScaleMode>,
    /// Output width in characters (manual mode; implies it when no mode is given)
    #[arg(short, long, allow_negative_numbers = true)]
    width: Option<i64>,
    /// Multiplier applied to the output height
    #[arg(short, long)]
    stretch: Option<f64>,
    /// Named glyph ramp
    #[arg(short, long)]
    ramp: Option<String>,
    /// Custom glyphs, darkest first, one per character (overrides --ramp)
    #[arg(short, long)]
    glyphs: Option<String>,
    /// Reverse the ramp
    #[arg(short, long)]
    negative: bool,
    /// Apply a preset: pastebin or wykop
    #[arg(short, long)]
    preset: Option<Preset>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Only print the active ramp
    #[arg(long)]
    preview: bool,
    /// List the built-in ramps and exit
    #[arg(long)]
    list_ramps: bool,
}

impl Args {
    fn snapshot(&self) -> Result<ConfigSnapshot, PicasciiError> {
        let mut config = match &self.config {
            Some(path) => ConfigSnapshot::load(path)?,
            None => ConfigSnapshot::default(),
        };

        if let Some(preset) = self.preset {
            config = config.with_preset(preset);
        }
        if let Some(width) = self.width {
            config.set_manual_width(width);
            config.scale_mode = ScaleMode::Manual;
        }
        if let Some(mode) = self.mode {
            config.scale_mode = mode;
        }
        if let Some(stretch) = self.stretch {
            config.vertical_stretch = stretch;
        }
        if let Some(ramp) = &self.ramp {
            config.ramp_key = ramp.clone();
        }
        if let Some(glyphs) = &self.glyphs {
            config.glyphs = Some(glyphs.chars().map(String::from).collect());
        }
        if self.negative {
            config.negative = true;
        }
        Ok(config)
    }
}

fn main() -> Result<(), PicasciiError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.list_ramps {
        for (key, glyphs) in NAMED_RAMPS {
            println!("{:<18}{}", key, glyphs.join(" "));
        }
        return Ok(());
    }

    let mut converter = Converter::new().with_config(args.snapshot()?);

    if args.preview {
        println!("{}", converter.preview_ramp()?);
        return Ok(());
    }

    if let Some(input) = &args.input {
        converter.open(input)?;
    }
    let result = converter.render()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.text);
        log::info!("Chars: {}", result.char_count);
    }
    Ok(())
}
