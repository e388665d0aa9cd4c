pub mod args;

use std::io::Write;
use std::path::{Path, PathBuf};
use unite_tl::output_scripts::csv::{CsvDumper, CsvParser};
use unite_tl::scripts;
use unite_tl::types::*;
use unite_tl::utils;
use unite_tl::utils::files::resolve;
use unite_tl::COUNTER;

/// Extracts every asset under `input` and writes the table to `output`.
///
/// Returns the number of rows written.
pub fn export_scripts(
    input: &Path,
    output: &Path,
    config: &ExtraConfig,
    opts: &ExportOptions,
    backtrace: bool,
) -> anyhow::Result<usize> {
    let files = utils::files::collect_files(input);
    if files.is_empty() {
        eprintln!("Warning: no .asset files found in {}", input.display());
        COUNTER.add_warning();
    }
    let mut units = Vec::new();
    for file in files.iter() {
        let filename = file.to_string_lossy();
        eprintln!("Exporting {}", filename);
        let re = scripts::parse_script(&filename, config).and_then(|s| s.extract_messages());
        match re {
            Ok(mes) => {
                COUNTER.add_extracted(mes.len());
                units.extend(mes);
            }
            Err(e) => {
                eprintln!("Error exporting {}: {}", filename, e);
                if backtrace {
                    eprintln!("Backtrace: {}", e.backtrace());
                }
                COUNTER.add_failed();
            }
        }
    }
    utils::files::make_sure_dir_exists(output)?;
    let f = utils::files::write_file(output)?;
    CsvDumper::dump(units, opts, f)
}

/// Applies one table to the assets it names.
///
/// A file that cannot be read or written is reported and skipped.
pub fn import_scripts(
    table: &Path,
    base_dir: Option<&Path>,
    backtrace: bool,
) -> anyhow::Result<()> {
    let data = utils::files::read_file(table)?;
    let groups = CsvParser::parse(data.as_slice())?;
    let config = ExtraConfig::default();
    for group in groups.iter() {
        let path = resolve(base_dir, &group.file);
        let filename = path.to_string_lossy();
        eprintln!("Importing {}", filename);
        let re = scripts::parse_script(&filename, &config)
            .and_then(|script| script.import_messages_filename(&group.pairs, &filename));
        match re {
            Ok(_) => COUNTER.add_applied(),
            Err(e) => {
                eprintln!("Error importing {}: {}", filename, e);
                if backtrace {
                    eprintln!("Backtrace: {}", e.backtrace());
                }
                COUNTER.add_failed();
            }
        }
    }
    Ok(())
}

/// Zips two line files into a source,target table. Returns the row count.
pub fn merge_files(original: &Path, translated: &Path, output: &Path) -> anyhow::Result<usize> {
    let orig = String::from_utf8(utils::files::read_file(original)?)?;
    let trans = String::from_utf8(utils::files::read_file(translated)?)?;
    let orig_lines = utils::lines::split_lines(&orig);
    let trans_lines = utils::lines::split_lines(&trans);
    if orig_lines.len() != trans_lines.len() {
        eprintln!(
            "Warning: line counts differ! original: {}, translated: {}",
            orig_lines.len(),
            trans_lines.len()
        );
        COUNTER.add_warning();
    }
    let pairs = utils::lines::zip_lines(orig_lines, trans_lines);
    utils::files::make_sure_dir_exists(output)?;
    let f = utils::files::write_file(output)?;
    CsvDumper::dump_pairs(&pairs, f)?;
    Ok(pairs.len())
}

/// Encrypts `input` into an envelope at `output`.
///
/// Returns the IV and, when no key was supplied, the generated key.
pub fn encrypt_file(
    input: &Path,
    output: &Path,
    key: Option<&str>,
) -> anyhow::Result<([u8; utils::envelope::IV_SIZE], Option<String>)> {
    let (key, generated) = match key {
        Some(k) => (utils::envelope::decode_key(k)?, None),
        None => {
            let k = utils::envelope::generate_key();
            (k, Some(utils::envelope::encode_key(&k)))
        }
    };
    let plain = utils::files::read_file(input)?;
    let (envelope, iv) = utils::envelope::seal(&plain, &key);
    utils::files::make_sure_dir_exists(output)?;
    let mut f = utils::files::write_file(output)?;
    f.write_all(&envelope)?;
    f.flush()?;
    Ok((iv, generated))
}

/// Fails when a required input file is missing.
pub fn require_file(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "required file not found: {}",
            path.display()
        ));
    }
    Ok(())
}

fn report(e: anyhow::Error, backtrace: bool) -> ! {
    eprintln!("Error: {}", e);
    if backtrace {
        eprintln!("Backtrace: {}", e.backtrace());
    }
    std::process::exit(1);
}

fn main() {
    let arg = args::parse_args();
    if arg.backtrace {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
    let project = arg.project.as_ref().map(PathBuf::from);
    let project = project.as_deref();
    match &arg.command {
        args::Command::Extract(args) => {
            let input = resolve(project, &args.input);
            let output = resolve(
                project,
                args.output
                    .as_deref()
                    .unwrap_or(args.schema.default_output()),
            );
            let config = args.extra_config();
            let opts = args.export_options();
            match export_scripts(&input, &output, &config, &opts, arg.backtrace) {
                Ok(count) => {
                    println!("[OK] extracted {} lines → {}", count, output.display());
                    eprintln!("{}", COUNTER.extract_summary());
                }
                Err(e) => report(e, arg.backtrace),
            }
        }
        args::Command::Apply(args) => {
            let table = resolve(project, &args.table);
            if let Err(e) = require_file(&table) {
                report(e, arg.backtrace);
            }
            // File columns hold paths as they were scanned, so they are not
            // re-rooted under the project.
            let base_dir = args.base_dir.as_ref().map(PathBuf::from);
            match import_scripts(&table, base_dir.as_deref(), arg.backtrace) {
                Ok(_) => {
                    println!("[OK] applied {}", table.display());
                    eprintln!("{}", COUNTER.apply_summary());
                }
                Err(e) => report(e, arg.backtrace),
            }
        }
        args::Command::Merge(args) => {
            let original = resolve(project, &args.original);
            let translated = resolve(project, &args.translated);
            let output = resolve(project, &args.output);
            if let Err(e) = require_file(&original).and_then(|_| require_file(&translated)) {
                report(e, arg.backtrace);
            }
            match merge_files(&original, &translated, &output) {
                Ok(count) => println!("[OK] Merged {} lines → {}", count, output.display()),
                Err(e) => report(e, arg.backtrace),
            }
        }
        args::Command::Encrypt(args) => {
            let input = resolve(project, &args.input);
            let output = resolve(project, &args.output);
            if let Err(e) = require_file(&input) {
                report(e, arg.backtrace);
            }
            match encrypt_file(&input, &output, args.key.as_deref()) {
                Ok((iv, generated)) => {
                    if let Some(key) = generated {
                        println!("Generated key (base64, keep it safe): {}", key);
                    }
                    println!("[OK] wrote {}, IV={}", output.display(), hex::encode(iv));
                }
                Err(e) => report(e, arg.backtrace),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EVENT: &str = r#"%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!114 &11400000
MonoBehaviour:
  m_Name: EV002
  dataModel:
    eventCommands:
    - code: 401
      indent: 0
      parameters:
      - "Hello"
      - 0
    - code: 401
      indent: 0
      parameters:
      - "Line one\nLine two"
"#;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap().replace("\r\n", "\n")
    }

    #[test]
    fn test_extract_then_apply_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("Event");
        fs::create_dir_all(&assets).unwrap();
        let asset = assets.join("EV002.asset");
        fs::write(&asset, EVENT.replace('\n', "\r\n")).unwrap();
        fs::write(assets.join("broken.asset"), [0xffu8, 0xfe, 0x00]).unwrap();

        let table = dir.path().join("out/rpgm_texts.csv");
        let opts = ExportOptions {
            schema: TableSchema::Apply,
            dedupe: false,
            identity: false,
        };
        let count =
            export_scripts(&assets, &table, &ExtraConfig::default(), &opts, false).unwrap();
        assert_eq!(count, 2);
        let file = utils::files::table_path(&asset);
        assert_eq!(
            read(&table),
            format!(
                "file,source,target\n{0},Hello,\n{0},Line one\\nLine two,\n",
                file
            )
        );

        let filled = format!(
            "file,source,target\n{0},Hello,Bonjour\n{0},Line one\\nLine two,\n",
            file
        );
        fs::write(&table, filled).unwrap();
        import_scripts(&table, None, false).unwrap();
        let patched = fs::read_to_string(&asset).unwrap();
        assert!(!patched.contains('\r'));
        assert!(patched.contains("- \"Bonjour\""));
        assert!(!patched.contains("- \"Hello\""));
        assert!(patched.contains("- \"Line one\\nLine two\""));

        // Nothing left to match on a second run.
        import_scripts(&table, None, false).unwrap();
        assert_eq!(fs::read_to_string(&asset).unwrap(), patched);
    }

    #[test]
    fn test_apply_missing_file_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.asset"), "- \"A\"\n").unwrap();
        let table = dir.path().join("t.csv");
        fs::write(
            &table,
            "file,source,target\nmissing.asset,A,B\nok.asset,A,B\n",
        )
        .unwrap();
        import_scripts(&table, Some(dir.path()), false).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("ok.asset")).unwrap(),
            "- \"B\"\n"
        );
        assert!(!dir.path().join("missing.asset").exists());
    }

    #[test]
    fn test_apply_skips_rows_without_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.asset"), "- \"x\"\n- \"z\"\n").unwrap();
        let table = dir.path().join("t.csv");
        fs::write(
            &table,
            "file,source,target\na.asset,x,y\nlonely.asset\na.asset,z\n",
        )
        .unwrap();
        import_scripts(&table, Some(dir.path()), false).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("a.asset")).unwrap(),
            "- \"y\"\n- \"z\"\n"
        );
        assert!(!dir.path().join("lonely.asset").exists());
    }

    #[test]
    fn test_require_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("rpgm_texts.csv");
        let err = require_file(&table).unwrap_err();
        assert!(err.to_string().contains("required file not found"));
        assert!(require_file(dir.path()).is_err());
        fs::write(&table, "file,source,target\n").unwrap();
        assert!(require_file(&table).is_ok());
    }

    #[test]
    fn test_merge_files_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("source.txt");
        let translated = dir.path().join("translated.txt");
        fs::write(&original, "A\nB\nC\n").unwrap();
        fs::write(&translated, "X\r\nY\r\n").unwrap();
        let output = dir.path().join("nested/merged.csv");
        let count = merge_files(&original, &translated, &output).unwrap();
        assert_eq!(count, 2);
        assert_eq!(read(&output), "source,target\nA,X\nB,Y\n");
    }

    #[test]
    fn test_encrypt_file() {
        use aes::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
        use utils::envelope::*;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("translation.csv");
        let output = dir.path().join("translation.csv.enc");
        let plain = "source,target\nこんにちは,Hello\n";
        fs::write(&input, plain).unwrap();

        let (iv, generated) = encrypt_file(&input, &output, None).unwrap();
        let key = decode_key(&generated.unwrap()).unwrap();
        let data = fs::read(&output).unwrap();
        assert_eq!(&data[..5], b"TCSV1");
        assert_eq!(&data[5..HEADER_SIZE], &iv);
        assert_eq!((data.len() - HEADER_SIZE) % 16, 0);
        let dec = cbc::Decryptor::<aes::Aes256>::new((&key).into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&data[HEADER_SIZE..])
            .unwrap();
        assert_eq!(dec, plain.as_bytes());

        let fixed = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
        let (_, generated) = encrypt_file(&input, &output, Some(fixed)).unwrap();
        assert!(generated.is_none());
        assert!(encrypt_file(&input, &output, Some("AAAA")).is_err());
    }
}
