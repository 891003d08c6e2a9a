use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use ddl_schema::config::{self, ColumnLayout, Config, LineEndings, OutputConfig, OutputFormat};
use ddl_schema::utils::logging::init_logging;
use ddl_schema::{OutputGenerator, SchemaExtractor, TableRecord};

#[derive(Parser)]
#[command(name = "ddl_schema")]
#[command(about = "Extract table and column metadata from MySQL CREATE TABLE dumps")]
#[command(version)]
struct Cli {
    /// Dump file, or a directory searched recursively for .sql files
    path: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: json, yaml, toml or markdown
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write one output file per dump into this directory instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Keep one column slot per fragment line
    #[arg(long)]
    legacy_layout: bool,

    /// Also end table fragments at ";\n"
    #[arg(long)]
    any_line_endings: bool,

    /// Annotate every column of a multi-column primary key
    #[arg(long)]
    composite_keys: bool,
}

impl Cli {
    /// Load the configuration file, then apply command line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => Config::default(),
        };

        if self.legacy_layout {
            config.extract.column_layout = ColumnLayout::Legacy;
        }
        if self.any_line_endings {
            config.extract.line_endings = LineEndings::Any;
        }
        if self.composite_keys {
            config.extract.composite_primary_keys = true;
        }

        let mut output = config.output.take().unwrap_or_default();
        if let Some(format) = self.format {
            output.format = format;
        }
        if let Some(dir) = &self.output {
            output.directory = Some(dir.clone());
        }
        config.output = Some(output);

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(&config.logging)?;

    let extractor = SchemaExtractor::from_config(&config);
    let dumps: Vec<(PathBuf, Vec<TableRecord>)> = if cli.path.is_dir() {
        extractor.extract_dir(&cli.path)?
    } else {
        let tables = extractor
            .extract_file(&cli.path)
            .with_context(|| format!("Failed to extract {}", cli.path.display()))?;
        vec![(cli.path.clone(), tables)]
    };

    let output = config.output.unwrap_or_default();
    let generator = OutputGenerator::new(&output);

    match &output.directory {
        Some(dir) => write_outputs(&generator, &output, Path::new(dir), &dumps)?,
        None => {
            let tables: Vec<TableRecord> = dumps.into_iter().flat_map(|(_, tables)| tables).collect();
            println!("{}", generator.render(&tables)?);
        }
    }

    Ok(())
}

fn write_outputs(
    generator: &OutputGenerator<'_>,
    output: &OutputConfig,
    dir: &Path,
    dumps: &[(PathBuf, Vec<TableRecord>)],
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;

    for (dump_path, tables) in dumps {
        let stem = dump_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dump".to_string());
        let target = dir.join(format!("{}.{}", stem, output.format.extension()));

        fs::write(&target, generator.render(tables)?)
            .with_context(|| format!("Cannot write {}", target.display()))?;
        tracing::info!(target = %target.display(), tables = tables.len(), "Wrote schema output");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddl_schema::ExtractConfig;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    /// Config file asking for unpretty YAML with every extraction default
    fn yaml_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[extract]\ncolumn_layout = \"compact\"\n\n[output]\nformat = \"yaml\"\npretty = false"
        )
        .unwrap();
        file
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ddl_schema").chain(args.iter().copied()))
    }

    #[test]
    fn config_file_applies_without_flags() {
        let file = yaml_config();
        let cli = parse(&["dump.sql", "-c", file.path().to_str().unwrap()]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.extract, ExtractConfig::default());

        let output = config.output.unwrap();
        assert_eq!(output.format, OutputFormat::Yaml);
        assert!(!output.pretty);
        assert_eq!(output.directory, None);
    }

    #[test]
    fn flags_override_config_file() {
        let file = yaml_config();
        let cli = parse(&[
            "dump.sql",
            "--config",
            file.path().to_str().unwrap(),
            "--format",
            "json",
            "--legacy-layout",
            "--any-line-endings",
            "--composite-keys",
            "--output",
            "out",
        ]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.extract.column_layout, ColumnLayout::Legacy);
        assert_eq!(config.extract.line_endings, LineEndings::Any);
        assert!(config.extract.composite_primary_keys);

        let output = config.output.unwrap();
        assert_eq!(output.format, OutputFormat::Json);
        assert_eq!(output.directory.as_deref(), Some("out"));
        // Settings without a flag keep the file's value
        assert!(!output.pretty);
    }

    #[test]
    fn no_config_file_uses_defaults() {
        let config = parse(&["dump.sql", "-f", "markdown"]).resolve_config().unwrap();
        assert_eq!(config.extract, ExtractConfig::default());
        assert_eq!(config.output.unwrap().format, OutputFormat::Markdown);
    }

    #[test]
    fn unknown_format_flag_is_rejected() {
        let result = Cli::try_parse_from(["ddl_schema", "dump.sql", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn write_outputs_creates_one_file_per_dump() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("docs");
        let output = OutputConfig {
            format: OutputFormat::Toml,
            ..OutputConfig::default()
        };
        let dumps = vec![
            (
                PathBuf::from("/data/shop.sql"),
                vec![TableRecord::new("orders", "Orders table")],
            ),
            (PathBuf::from("archive/legacy.sql"), Vec::new()),
        ];

        write_outputs(&OutputGenerator::new(&output), &output, &out, &dumps).unwrap();

        let shop = fs::read_to_string(out.join("shop.toml")).unwrap();
        assert!(shop.contains("name = \"orders\""));
        assert!(out.join("legacy.toml").is_file());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }
}
