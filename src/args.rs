use clap::{ArgAction, Args, Parser, Subcommand};
use unite_tl::types::*;

/// Tools for translating RPG Maker Unite event assets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arg {
    #[arg(short, long, global = true)]
    /// Project root. Relative paths of every command are resolved under it
    pub project: Option<String>,
    #[arg(global = true, action = ArgAction::SetTrue, short, long)]
    /// Print backtrace on error
    pub backtrace: bool,
    #[command(subcommand)]
    /// Command
    pub command: Command,
}

#[derive(Subcommand, Debug)]
/// Commands
pub enum Command {
    /// Extract event texts from assets into a translation table
    Extract(ExtractArgs),
    /// Write translated texts back into the assets named by a table
    Apply(ApplyArgs),
    /// Merge an original and a translated text file into a source,target table
    Merge(MergeArgs),
    /// Encrypt a translation table with AES-256-CBC
    Encrypt(EncryptArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[arg(
        short,
        long,
        default_value = "ExportedProject/Assets/RPGMaker/Storage/Event/SO/Event"
    )]
    /// Input directory or single .asset file
    pub input: String,
    #[arg(short, long)]
    /// Output table. Defaults to translation.csv for pairs and rpgm_texts.csv otherwise
    pub output: Option<String>,
    #[arg(short, long, value_enum, default_value_t = TableSchema::Full)]
    /// Table layout
    pub schema: TableSchema,
    #[arg(short, long, value_enum)]
    /// String selection. Defaults to all for pairs and first otherwise
    pub mode: Option<ExtractMode>,
    #[arg(long, default_value = "401,402")]
    /// Event codes to extract (comma separated)
    pub codes: String,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Drop repeated rows
    pub dedupe: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Keep real newlines and tabs instead of \n and \t
    pub no_escape: bool,
    #[arg(long, default_value_t = 1)]
    /// Minimum string length after trimming
    pub min_len: usize,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Copy the source into the target column. Off by default for every
    /// schema, including full, so pass it to get a prefilled full table
    pub identity: bool,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[arg(default_value = "rpgm_texts.csv")]
    /// Table with file, source and target columns
    pub table: String,
    #[arg(long)]
    /// Directory the table's file column is relative to
    pub base_dir: Option<String>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Original text file
    pub original: String,
    /// Translated text file
    pub translated: String,
    #[arg(short, long, default_value = "rpgm_texts-translated.csv")]
    /// Output table
    pub output: String,
}

#[derive(Args, Debug)]
pub struct EncryptArgs {
    #[arg(short, long, default_value = "translation.csv")]
    /// Input table
    pub input: String,
    #[arg(short, long, default_value = "translation.csv.enc")]
    /// Output file
    pub output: String,
    #[arg(short, long)]
    /// 32 byte key in base64. A random key is generated and printed when omitted
    pub key: Option<String>,
}

impl ExtractArgs {
    pub fn extra_config(&self) -> ExtraConfig {
        ExtraConfig {
            codes: parse_codes(&self.codes),
            mode: self.mode.unwrap_or_else(|| self.schema.default_mode()),
            escape: !self.no_escape,
            min_len: self.min_len,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            schema: self.schema,
            dedupe: self.dedupe,
            identity: self.identity,
        }
    }
}

pub fn parse_args() -> Arg {
    Arg::parse()
}

#[test]
fn test_extract_defaults() {
    let arg = Arg::try_parse_from(["unite_tl", "extract", "--schema", "pairs"]).unwrap();
    match arg.command {
        Command::Extract(args) => {
            let cfg = args.extra_config();
            assert_eq!(cfg.mode, ExtractMode::All);
            assert!(cfg.escape);
            assert_eq!(cfg.min_len, 1);
            assert_eq!(cfg.codes.iter().copied().collect::<Vec<_>>(), vec![401, 402]);
            assert!(args.output.is_none());
            assert!(!args.export_options().identity);
        }
        _ => panic!("expected extract"),
    }
}

#[test]
fn test_global_project() {
    let arg = Arg::try_parse_from([
        "unite_tl", "apply", "-p", "projects/demo", "--base-dir", "root",
    ])
    .unwrap();
    assert_eq!(arg.project.as_deref(), Some("projects/demo"));
    match arg.command {
        Command::Apply(args) => {
            assert_eq!(args.table, "rpgm_texts.csv");
            assert_eq!(args.base_dir.as_deref(), Some("root"));
        }
        _ => panic!("expected apply"),
    }
}

#[test]
fn test_identity_is_opt_in_for_full() {
    let parse = |extra: &[&str]| {
        let mut argv = vec!["unite_tl", "extract", "--schema", "full"];
        argv.extend_from_slice(extra);
        match Arg::try_parse_from(argv).unwrap().command {
            Command::Extract(args) => args.export_options().identity,
            _ => panic!("expected extract"),
        }
    };
    assert!(!parse(&[]));
    assert!(parse(&["--identity"]));
}
