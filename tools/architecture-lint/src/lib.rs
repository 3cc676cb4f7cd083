//! Repo-local architectural lint for the console's hexagonal layout.
//!
//! The console keeps its view models, forms, and ports in `domain`, the
//! command line in `inbound`, and the REST adapter in `outbound`. This crate
//! parses every source file under those directories with `syn` and reports
//! paths that cross a boundary. The rules live in [`LAYER_RULES`].
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the linted crate, as written in absolute paths.
const CRATE_NAME: &str = "admin_console";

/// Boundary rules for one top-level module of `console/src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRule {
    /// Directory (and module) name under `console/src`.
    pub layer: &'static str,
    /// Sibling layers this layer must not import.
    pub forbidden_layers: &'static [&'static str],
    /// External crates this layer must not import.
    pub forbidden_crates: &'static [&'static str],
}

/// Rules enforced by [`lint_sources`].
pub const LAYER_RULES: [LayerRule; 3] = [
    LayerRule {
        layer: "domain",
        forbidden_layers: &["inbound", "outbound"],
        forbidden_crates: &[
            "clap",
            "color_eyre",
            "httpmock",
            "ortho_config",
            "reqwest",
            "tracing_subscriber",
        ],
    },
    LayerRule {
        layer: "inbound",
        forbidden_layers: &["outbound"],
        forbidden_crates: &["httpmock", "ortho_config", "reqwest"],
    },
    LayerRule {
        layer: "outbound",
        forbidden_layers: &["inbound"],
        forbidden_crates: &["clap", "color_eyre", "ortho_config"],
    },
];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `console/src`.
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse { file: PathBuf, message: String },
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting console sources: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} layer boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "- {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { .. } | Self::Violations(_) => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `console/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the console crate sources on disk.
///
/// `console_dir` must be the `console/` directory at the repository root.
pub fn lint_console_sources(console_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = console_dir.join("src");
    let mut sources = Vec::new();
    for rule in &LAYER_RULES {
        let dir = src_dir.join(rule.layer);
        if dir.is_dir() {
            read_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let rule = rule_for(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is outside the domain, inbound, and outbound layers".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, rule, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn rule_for(relative_path: &Path) -> Option<&'static LayerRule> {
    let first = relative_path.components().next()?.as_os_str().to_str()?;
    LAYER_RULES.iter().find(|rule| rule.layer == first)
}

fn check_file(file: &Path, rule: &LayerRule, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for path in &collector.paths {
        match classify(path) {
            Some(Target::Layer(name)) if listed(rule.forbidden_layers, name) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{name}",
                    rule.layer
                ));
            }
            Some(Target::Crate(name)) if listed(rule.forbidden_crates, name) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{name}`",
                    rule.layer
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn listed(names: &[&str], name: &str) -> bool {
    names.iter().any(|candidate| *candidate == name)
}

/// What the first meaningful segment of a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Layer(&'a str),
    Crate(&'a str),
}

fn classify(path: &[String]) -> Option<Target<'_>> {
    let first = path.first()?.as_str();
    let is_layer = |name: &str| LAYER_RULES.iter().any(|rule| rule.layer == name);

    if is_layer(first) {
        return Some(Target::Layer(first));
    }
    if matches!(first, "crate" | "self" | "super") || first == CRATE_NAME {
        return path
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super" | CRATE_NAME))
            .filter(|segment| is_layer(segment))
            .map(Target::Layer);
    }
    Some(Target::Crate(first))
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn collect_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.collect_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                let mut full = prefix.clone();
                full.push(ident.to_string());
                self.paths.insert(full);
            }
            syn::UseTree::Glob(_) => {
                let mut full = prefix.clone();
                full.push("*".to_owned());
                self.paths.insert(full);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.collect_use(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.collect_use(&node.tree, &mut Vec::new());
    }
}

fn read_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            read_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
