use crate::scripts::ALL_EXTS;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn has_known_ext(path: &Path) -> bool {
    path.file_name().map_or(false, |file| {
        let file = file.to_string_lossy().to_lowercase();
        ALL_EXTS
            .iter()
            .any(|ext| file.ends_with(&format!(".{}", ext)))
    })
}

/// Recursively finds every asset file under `path`, sorted by path.
///
/// Unreadable directory entries are skipped.
pub fn find_files<P: AsRef<Path>>(path: P) -> Vec<PathBuf> {
    let mut result = Vec::new();
    for entry in WalkDir::new(path.as_ref()).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Warning: cannot access path: {}", e);
                crate::COUNTER.add_warning();
                continue;
            }
        };
        if entry.file_type().is_file() && has_known_ext(entry.path()) {
            result.push(entry.into_path());
        }
    }
    result.sort();
    result
}

/// Returns the asset files named by `path`.
///
/// A single file is returned as the sole candidate when it carries a known
/// extension. A directory is searched recursively. Anything else yields
/// nothing.
pub fn collect_files<P: AsRef<Path>>(path: P) -> Vec<PathBuf> {
    let pa = path.as_ref();
    if pa.is_file() {
        if has_known_ext(pa) {
            return vec![pa.to_path_buf()];
        }
        return Vec::new();
    }
    if pa.is_dir() {
        return find_files(pa);
    }
    Vec::new()
}

/// Formats a path the way it is stored in a translation table.
pub fn table_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve<P: AsRef<Path>>(base: Option<&Path>, path: P) -> PathBuf {
    let path = path.as_ref();
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

pub fn read_file<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<Vec<u8>> {
    fs::read(f)
}

pub fn write_file<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<Box<dyn Write>> {
    Ok(Box::new(io::BufWriter::new(fs::File::create(f)?)))
}

pub fn make_sure_dir_exists<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<()> {
    let path = f.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/nested/z.asset"), "").unwrap();
        fs::write(root.join("b/y.ASSET"), "").unwrap();
        fs::write(root.join("a/x.asset"), "").unwrap();
        fs::write(root.join("a/readme.txt"), "").unwrap();
        fs::write(root.join("a/x.asset.meta"), "").unwrap();

        let files = collect_files(root);
        let names: Vec<_> = files
            .iter()
            .map(|p| table_path(p.strip_prefix(root).unwrap()))
            .collect();
        assert_eq!(names, vec!["a/x.asset", "b/nested/z.asset", "b/y.ASSET"]);

        let single = collect_files(root.join("a/x.asset"));
        assert_eq!(single, vec![root.join("a/x.asset")]);
        assert!(collect_files(root.join("a/readme.txt")).is_empty());
        assert!(collect_files(root.join("missing")).is_empty());
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("projects/demo");
        assert_eq!(
            resolve(Some(base), "rpgm_texts.csv"),
            PathBuf::from("projects/demo/rpgm_texts.csv")
        );
        assert_eq!(resolve(None, "rpgm_texts.csv"), PathBuf::from("rpgm_texts.csv"));
        #[cfg(unix)]
        assert_eq!(resolve(Some(base), "/tmp/a.csv"), PathBuf::from("/tmp/a.csv"));
    }

    #[test]
    fn test_table_path() {
        assert_eq!(table_path(r"Event\SO\a.asset"), "Event/SO/a.asset");
    }
}
