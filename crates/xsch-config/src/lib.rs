//! Parses the Tcl-flavored xschemrc search-path grammar: `set` and
//! `append` directives building up `XSCHEM_LIBRARY_PATH`, with
//! `${VAR}`/`$VAR`/`env(NAME)` and the `[file dirname [info script]]`
//! sentinel expanded before the colon-separated path list is split,
//! absolutized against the config file's own directory, and filtered down
//! to segments that actually exist.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::warn;
use regex::{Captures, Regex};
use xsch_types::Error;

const SCRIPT_DIR_SENTINEL: &str = "[file dirname [info script]]";

/// Abstraction over "where do symbol search paths come from", so a caller
/// can plug in an xschemrc file, a static list, or anything else without
/// the parser crate depending on configuration parsing.
pub trait SearchPathProvider {
    fn paths(&self) -> Vec<PathBuf>;
}

pub struct StaticPaths(pub Vec<PathBuf>);

impl SearchPathProvider for StaticPaths {
    fn paths(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}

pub struct XschemrcProvider {
    pub rc_path: PathBuf,
}

impl SearchPathProvider for XschemrcProvider {
    fn paths(&self) -> Vec<PathBuf> {
        parse_xschemrc(&self.rc_path).unwrap_or_else(|e| {
            warn!("failed to parse {}: {e}", self.rc_path.display());
            Vec::new()
        })
    }
}

pub fn parse_xschemrc(path: &Path) -> Result<Vec<PathBuf>, Error> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::new("config", format!("cannot open {}: {e}", path.display())))?;
    let config_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut vars: IndexMap<String, String> = IndexMap::new();
    let mut segments: Vec<String> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("set ") {
            let rest = rest.trim();
            let Some((name, value)) = rest.split_once(char::is_whitespace) else {
                continue;
            };
            let name = name.trim();
            let value = expand(strip_braces(value.trim()), &vars, &config_dir);
            if name == "XSCHEM_LIBRARY_PATH" {
                segments.clear();
                if !value.is_empty() {
                    segments.push(value);
                }
            } else {
                vars.insert(name.to_string(), value);
            }
        } else if let Some(rest) = line.strip_prefix("append ") {
            let rest = rest.trim();
            let Some((name, value)) = rest.split_once(char::is_whitespace) else {
                continue;
            };
            if name.trim() == "XSCHEM_LIBRARY_PATH" {
                let value = expand(strip_braces(value.trim()), &vars, &config_dir);
                segments.push(value);
            }
        }
    }

    let joined = segments.join("");
    let mut results = Vec::new();
    for seg in joined.split(':') {
        if seg.is_empty() {
            continue;
        }
        let candidate = Path::new(seg);
        let abs = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            config_dir.join(candidate)
        };
        if abs.exists() {
            results.push(fs::canonicalize(&abs).unwrap_or(abs));
        }
    }

    Ok(results)
}

fn strip_braces(value: &str) -> &str {
    if value.starts_with('{') && value.ends_with('}') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn expand(input: &str, vars: &IndexMap<String, String>, config_dir: &Path) -> String {
    let mut s = input.replace(SCRIPT_DIR_SENTINEL, &config_dir.to_string_lossy());

    let env_re = Regex::new(r"\$env\((\w+)\)").expect("valid regex");
    s = env_re
        .replace_all(&s, |c: &Captures| std::env::var(&c[1]).unwrap_or_default())
        .into_owned();

    let brace_re = Regex::new(r"\$\{(\w+)\}").expect("valid regex");
    s = brace_re
        .replace_all(&s, |c: &Captures| vars.get(&c[1]).cloned().unwrap_or_default())
        .into_owned();

    let bare_re = Regex::new(r"\$(\w+)").expect("valid regex");
    s = bare_re
        .replace_all(&s, |c: &Captures| vars.get(&c[1]).cloned().unwrap_or_default())
        .into_owned();

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn missing_rc_file_warns_and_falls_back_to_empty() {
        init();
        let provider = XschemrcProvider {
            rc_path: PathBuf::from("/nonexistent/xschemrc"),
        };
        assert!(provider.paths().is_empty());
    }

    #[test]
    fn set_then_append_collects_existing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let lib_a = dir.path().join("liba");
        let lib_b = dir.path().join("libb");
        fs::create_dir_all(&lib_a).unwrap();
        fs::create_dir_all(&lib_b).unwrap();

        let rc_path = dir.path().join("xschemrc");
        fs::write(
            &rc_path,
            format!(
                "set XSCHEM_LIBRARY_PATH {{{}}}\nappend XSCHEM_LIBRARY_PATH :{}\n",
                lib_a.display(),
                lib_b.display()
            ),
        )
        .unwrap();

        let paths = parse_xschemrc(&rc_path).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn nonexistent_segments_are_filtered_out() {
        let dir = tempfile::tempdir().unwrap();
        let rc_path = dir.path().join("xschemrc");
        fs::write(
            &rc_path,
            "set XSCHEM_LIBRARY_PATH {/definitely/not/a/real/path}\n",
        )
        .unwrap();
        let paths = parse_xschemrc(&rc_path).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn script_dir_sentinel_expands_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let rc_path = dir.path().join("xschemrc");
        fs::write(
            &rc_path,
            "set XSCHEM_LIBRARY_PATH {[file dirname [info script]]}\n",
        )
        .unwrap();
        let paths = parse_xschemrc(&rc_path).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(fs::canonicalize(dir.path()).unwrap(), paths[0]);
    }

    #[test]
    fn env_var_expansion() {
        std::env::set_var("XSCH_TEST_VAR_CONFIG", "from_env");
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("from_env");
        fs::create_dir_all(&target).unwrap();

        let rc_path = dir.path().join("xschemrc");
        fs::write(
            &rc_path,
            format!(
                "set XSCHEM_LIBRARY_PATH {{{}/$env(XSCH_TEST_VAR_CONFIG)}}\n",
                dir.path().display()
            ),
        )
        .unwrap();
        let paths = parse_xschemrc(&rc_path).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn missing_rc_file_is_an_error() {
        assert!(parse_xschemrc(Path::new("/nonexistent/xschemrc")).is_err());
    }
}
