//! Inspect a font program
//!
//! Parses a font file, loads it the way it would be embedded and prints its
//! metrics and mapping summary as JSON.
//!
//! Usage:
//!   cargo run --bin inspect_font -- path/to/font.ttf
//!   cargo run --bin inspect_font -- font.afm --text "Hello" --size 12
//!   cargo run --bin inspect_font -- font.bin --format cff --strict

use pdf_fonts::config::FontConfig;
use pdf_fonts::fonts::{parsers, FontFormat, FontLoader, ProgramLoader};
use std::path::{Path, PathBuf};

struct InspectConfig {
    path: PathBuf,
    format: Option<FontFormat>,
    text: Option<String>,
    size: f64,
    strict: bool,
}

impl InspectConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut path = None;
        let mut format = None;
        let mut text = None;
        let mut size = 12.0;
        let mut strict = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--format" => {
                    i += 1;
                    let name = args.get(i).ok_or("--format needs a value")?;
                    format = Some(format_from_name(name).ok_or_else(|| format!("unknown format '{}'", name))?);
                },
                "--text" => {
                    i += 1;
                    text = Some(args.get(i).ok_or("--text needs a value")?.clone());
                },
                "--size" => {
                    i += 1;
                    let value = args.get(i).ok_or("--size needs a value")?;
                    size = value.parse().map_err(|_| format!("invalid size '{}'", value))?;
                },
                "--strict" => strict = true,
                arg if path.is_none() => path = Some(PathBuf::from(arg)),
                arg => return Err(format!("unexpected argument '{}'", arg)),
            }
            i += 1;
        }

        Ok(Self {
            path: path.ok_or("usage: inspect_font <font file> [--format ttf|otf|cff|afm|pfb] [--text TEXT] [--size N] [--strict]")?,
            format,
            text,
            size,
            strict,
        })
    }
}

fn format_from_name(name: &str) -> Option<FontFormat> {
    match name.to_ascii_lowercase().as_str() {
        "ttf" | "otf" | "ttc" | "truetype" | "opentype" => Some(FontFormat::OpenType),
        "cff" => Some(FontFormat::Cff),
        "afm" => Some(FontFormat::Afm),
        "pfb" | "pfa" | "t1" | "type1" => Some(FontFormat::Type1),
        _ => None,
    }
}

fn detect_format(path: &Path, data: &[u8]) -> Option<FontFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(format_from_name)
        .or_else(|| parsers::sniff(data))
}

fn run(config: &InspectConfig) -> pdf_fonts::Result<serde_json::Value> {
    let data = std::fs::read(&config.path)?;
    let format = match config.format.or_else(|| detect_format(&config.path, &data)) {
        Some(format) => format,
        None => {
            return Err(pdf_fonts::Error::UnsupportedFormat(format!(
                "cannot tell the format of {}",
                config.path.display()
            )))
        },
    };
    log::info!("Reading {} as {:?}", config.path.display(), format);

    let loader = ProgramLoader::new(parsers::parse(format, &data)?);
    let font_config = if config.strict {
        FontConfig::strict()
    } else {
        FontConfig::new()
    };
    let font = loader.load(&font_config)?;
    let bundle = loader.bundle();

    let mut summary = serde_json::json!({
        "name": font.name(),
        "format": bundle.format,
        "flavor": bundle.flavor,
        "code_space": bundle.code_space,
        "kind": font.kind(),
        "glyph_count": bundle.glyph_count,
        "mapped_codes": font.codes().len(),
        "kerning_pairs": bundle.glyph_kernings.len(),
        "char_code_max_length": font.char_code_max_length(),
        "symbolic": font.is_symbolic(),
        "default_code": font.default_code().map(String::from),
        "average_width": font.average_width(),
        "flags": font.metrics().flags(font.is_symbolic()).bits(),
        "metrics": font.metrics(),
    });

    if let Some(text) = &config.text {
        let codes = font.encode(text)?;
        summary["sample"] = serde_json::json!({
            "text": text,
            "size": config.size,
            "codes": codes.iter().map(|b| format!("{:02X}", b)).collect::<String>(),
            "width": font.width(text, config.size),
            "kerning": font.kerning(text, config.size),
            "line_height": font.line_height(config.size),
        });
    }
    Ok(summary)
}

fn main() {
    env_logger::init();

    let config = match InspectConfig::from_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        },
    };

    match run(&config) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            },
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    }
}
