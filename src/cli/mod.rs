//! CLI module for Headlamp

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::highlight::Highlighter;
use crate::index::{FileIndex, SymbolIndex};
use crate::model::load_topics;
use crate::output::{SiteConfig, SiteGenerator};
use crate::sections::SectionRules;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Build {
            source_dir,
            config,
            output,
            tab_width,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref());

            // Merge CLI arguments (CLI takes precedence)
            cfg.merge_cli(Some(output), tab_width);
            cfg.validate()?;

            if !source_dir.exists() {
                return Err(Error::PathNotFound(source_dir));
            }

            let rules = SectionRules::new(&cfg.scan.symbol_pattern, &cfg.scan.skip_sections)?;

            println!("Scanning sources...");
            let topics = load_topics(&cfg, &source_dir, &rules)?;

            let file_count: usize = topics.iter().map(|t| t.files.len()).sum();
            if file_count == 0 {
                return Err(Error::build("no source files in topic tree"));
            }
            println!("Found {} files in {} topics", file_count, topics.len());

            let symbols = SymbolIndex::build(&topics);
            let files = FileIndex::build(&topics);
            println!("Indexed {} symbols", symbols.len());

            let highlighter = Highlighter::new(&symbols, &files, cfg.scan.tab_width);

            let generator = SiteGenerator::new(SiteConfig {
                output_dir: cfg.output.directory.clone(),
                title: cfg.project.title.clone(),
                intro: cfg.project.intro.clone(),
            })?
            .with_verbose(verbose);

            let report = generator.generate(&topics, &highlighter)?;

            println!("{}", report.summary());
            println!("Reference written to: {}", cfg.output.directory.display());

            Ok(())
        }

        Command::Inspect { file, config } => {
            let cfg = load_config(config.as_deref());
            let rules = SectionRules::new(&cfg.scan.symbol_pattern, &cfg.scan.skip_sections)?;

            let text = std::fs::read_to_string(&file)
                .map_err(|e| Error::source_read(file.clone(), e))?;
            let sections = rules.scan(&text);

            if sections.is_empty() {
                println!("No sections in {}", file.display());
                return Ok(());
            }

            println!("Sections in {}:", file.display());
            for section in &sections {
                println!(
                    "  line {:>5}  {:<8} {}  (#{})",
                    section.line,
                    if section.is_symbol { "symbol" } else { "section" },
                    section.label,
                    section.anchor
                );
            }

            Ok(())
        }

        Command::Version => {
            println!("headlamp {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the given config file, or headlamp.toml, or defaults
fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load_or_default(p),
        None => Config::load_or_default(&PathBuf::from("headlamp.toml")),
    }
}
