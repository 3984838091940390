//! statcard - render daily health-metric stat cards
//!
//! ```text
//! statcard render --weight 115 --intake 5000 --active 3000 --resting 10000 [--title 2023-05-05] [-o img.jpg]
//! statcard import export.json [--out-dir DIR]
//! ```

use anyhow::{anyhow, bail, Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

use statcard::config::{self, Config};
use statcard::health::{parse_export, TITLE_FORMAT};
use statcard::{
    render_card_with, CardLayout, DirFontSource, FontRepository, Preset, Record, Renderer,
};

/// Default output file for `render`
const DEFAULT_OUTPUT: &str = "img.jpg";

fn print_help() {
    println!("statcard {} - daily stat card renderer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage:");
    println!("  statcard render [OPTIONS] --weight KG --intake KJ --active KJ --resting KJ");
    println!("  statcard import EXPORT.json [OPTIONS]");
    println!("  statcard --init-config [--force]");
    println!();
    println!("Render options:");
    println!("  --title TEXT      Card title (default: yesterday, YYYY-MM-DD)");
    println!("  -o, --output FILE Output JPEG (default: {})", DEFAULT_OUTPUT);
    println!();
    println!("Import options:");
    println!("  --out-dir DIR     Base directory; cards go to DIR/weightlog/<day>.jpg");
    println!();
    println!("Common options:");
    println!("  --preset NAME     Layout preset (daily, daily-mono, daily-small)");
    println!("  --fonts DIR       Font directory");
    println!("  -h, --help        Show this help");
    println!("  -V, --version     Show version");
    println!();
    println!("Environment:");
    println!("  {}   Config file path", config::CONFIG_ENV);
    println!("  {} Font directory", statcard::font::FONT_DIR_ENV);
    println!("  RUST_LOG          Log filter (default: warn)");
}

/// Value of `--name VALUE` or `--name=VALUE`
fn arg_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        for name in names {
            if arg == name {
                return iter.next().map(String::as_str);
            }
            if let Some(value) = arg.strip_prefix(name).and_then(|r| r.strip_prefix('=')) {
                return Some(value);
            }
        }
    }
    None
}

fn arg_f64(args: &[String], name: &str) -> Result<f64> {
    let raw = arg_value(args, &[name]).ok_or_else(|| anyhow!("Missing {}", name))?;
    raw.parse::<f64>()
        .with_context(|| format!("Invalid number for {}: {}", name, raw))
}

/// Positional arguments following the subcommand
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if arg.starts_with('-') {
            // Options taking a value consume the next argument
            if !arg.contains('=') && !matches!(arg.as_str(), "-f" | "--force") {
                iter.next();
            }
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

/// Yesterday in local time, the day a morning post reports on
fn default_title() -> String {
    let today = chrono::Local::now().date_naive();
    today
        .pred_opt()
        .unwrap_or(today)
        .format(TITLE_FORMAT)
        .to_string()
}

struct Session {
    card: CardLayout,
    fonts: FontRepository,
    renderer: Renderer,
}

impl Session {
    /// Resolve layout and load every font once
    fn open(cfg: &Config, args: &[String]) -> Result<Self> {
        let mut cfg = cfg.clone();
        if let Some(preset) = arg_value(args, &["--preset"]) {
            cfg.card.preset = preset.to_string();
        }
        if let Some(dir) = arg_value(args, &["--fonts"]) {
            cfg.fonts.dir = dir.to_string();
        }

        let card = cfg.card_layout()?;
        let dir = cfg.fonts.resolve_dir();
        info!("Preset: {}, fonts: {}", cfg.card.preset, dir.display());

        let source = DirFontSource::new(&dir);
        let fonts = FontRepository::load(&source, cfg.font_ids(&card))
            .with_context(|| format!("Font directory: {}", dir.display()))?;

        Ok(Self {
            card,
            fonts,
            renderer: Renderer::new(cfg.card.on_missing_font),
        })
    }

    fn render_to(&self, record: &Record, path: &Path) -> Result<()> {
        let bytes = render_card_with(&self.renderer, record, &self.card, &self.fonts)
            .with_context(|| format!("Failed to render card {}", record.title))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Card written: {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

fn cmd_render(cfg: &Config, args: &[String]) -> Result<()> {
    let record = Record {
        title: arg_value(args, &["--title"])
            .map(str::to_string)
            .unwrap_or_else(default_title),
        active_energy: arg_f64(args, "--active")?,
        resting_energy: arg_f64(args, "--resting")?,
        intake_energy: arg_f64(args, "--intake")?,
        weight: arg_f64(args, "--weight")?,
    };
    let output = arg_value(args, &["-o", "--output"]).unwrap_or(DEFAULT_OUTPUT);

    let session = Session::open(cfg, args)?;
    session.render_to(&record, Path::new(output))?;
    println!("{}", output);
    Ok(())
}

fn cmd_import(cfg: &Config, args: &[String]) -> Result<()> {
    let export_path = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow!("Missing export file"))?;
    let json = std::fs::read_to_string(export_path)
        .with_context(|| format!("Failed to read {}", export_path))?;
    let records = parse_export(&json).with_context(|| format!("Failed to parse {}", export_path))?;
    if records.is_empty() {
        println!("No records in {}", export_path);
        return Ok(());
    }

    let out_dir = arg_value(args, &["--out-dir"])
        .map(PathBuf::from)
        .unwrap_or_else(|| config::expand_home(&cfg.output.dir));

    let session = Session::open(cfg, args)?;
    let mut failed = 0usize;
    for record in &records {
        let path = out_dir.join(record.image_key());
        match session.render_to(record, &path) {
            Ok(()) => println!("{}", path.display()),
            Err(e) => {
                error!("{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} cards failed", failed, records.len());
    }
    Ok(())
}

fn cmd_init_config(args: &[String]) -> Result<()> {
    let path = config::default_config_path()
        .ok_or_else(|| anyhow!("Config directory not found"))?;
    let force = args.iter().any(|a| a == "--force" || a == "-f");
    if path.exists() && !force {
        println!("Config file already exists: {}", path.display());
        println!("Use --force to overwrite.");
        return Ok(());
    }
    Config::write_default(&path)?;
    println!("Config file generated: {}", path.display());
    println!();
    println!("Available presets:");
    for preset in Preset::ALL {
        println!("  {}", preset);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("statcard {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        return cmd_init_config(&args);
    }

    let cfg = Config::load();

    match args[1].as_str() {
        "render" => cmd_render(&cfg, &args),
        "import" => cmd_import(&cfg, &args),
        other => {
            print_help();
            bail!("Unknown command: {}", other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_arg_value_forms() {
        let a = args("statcard render --title 2023-05-05 --weight=115 -o out.jpg");
        assert_eq!(arg_value(&a, &["--title"]), Some("2023-05-05"));
        assert_eq!(arg_value(&a, &["--weight"]), Some("115"));
        assert_eq!(arg_value(&a, &["-o", "--output"]), Some("out.jpg"));
        assert_eq!(arg_value(&a, &["--intake"]), None);
        assert_eq!(arg_f64(&a, "--weight").unwrap(), 115.0);
        assert!(arg_f64(&a, "--title").is_err());
    }

    #[test]
    fn test_positionals_skip_option_values() {
        let a = args("statcard import --out-dir cards export.json --preset=daily");
        assert_eq!(positionals(&a), vec!["export.json"]);
    }

    #[test]
    fn test_default_title_format() {
        let title = default_title();
        assert_eq!(title.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&title, TITLE_FORMAT).is_ok());
    }
}
