//! Minimal CLI: design JSON → (component | exportable | ids | find)
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexSet;
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use design_jsx::catalog::{catalog_file, component_types, enumerate_exportable, CatalogFilter, ExportableNode};
use design_jsx::config::{ExportableTypes, TranslateOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use design_jsx::ident::suggest_file_path;
use design_jsx::traverse::{collect_ids, find_by_id};
use design_jsx::{ComponentEmission, DesignInput, Emitter, NodeType, TranslateError};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate design-tool node trees (JSON) into React components, or list what a file contains
#[derive(Parser, Debug)]
#[command(name = "design-jsx", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit a React component (.tsx) for a node tree
    Convert(ConvertOut),
    /// list exportable frames/components with their page paths
    Exportable(ExportableOut),
    /// print every node id in pre-order
    Ids(IdsOut),
    /// print the node with the given id
    Find(FindOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /nodes/1:2/document)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    #[command(flatten)]
    limits: LimitSettings,
}

#[derive(Args, Debug, Clone)]
struct LimitSettings {
    /// reject trees nested deeper than this
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// reject trees with more nodes than this
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: usize,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// component name (defaults to the node's name)
    #[arg(long)]
    name: Option<String>,

    /// convert this node instead of the input root
    #[arg(long)]
    node_id: Option<String>,

    /// output .tsx file, or a directory for several inputs (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ExportableOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// also list GROUP nodes
    #[arg(long)]
    with_groups: bool,

    /// keep entries whose name or path contains this (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// keep entries of this node type (e.g. FRAME, case-insensitive)
    #[arg(long = "type", value_parser = parse_node_type)]
    node_type: Option<NodeType>,

    /// print the distinct node types instead of the entries
    #[arg(long)]
    list_types: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct IdsOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct FindOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// node id to look up
    #[arg(long)]
    id: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

struct Loaded {
    source: PathBuf,
    input: DesignInput,
}

impl InputSettings {
    fn options(&self) -> TranslateOptions {
        TranslateOptions {
            max_depth: self.limits.max_depth,
            max_nodes: self.limits.max_nodes,
            ..TranslateOptions::default()
        }
    }

    fn load(&self) -> Result<Vec<Loaded>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut loaded = Vec::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read {}", source_path.display()))?;
            let json_value = serde_json::from_str::<Value>(&source)
                .with_context(|| format!("failed to parse JSON in {}", source_path.display()))?;
            for value in self.select(json_value, &source_path)? {
                let input = DesignInput::from_value(value)
                    .with_context(|| format!("invalid design tree in {}", source_path.display()))?;
                loaded.push(Loaded { source: source_path.clone(), input });
            }
        }
        log::debug!("loaded {} design tree(s)", loaded.len());
        Ok(loaded)
    }

    fn select(&self, value: Value, source_path: &Path) -> Result<Vec<Value>> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => match value.pointer(pointer) {
                Some(selected) => selected.clone(),
                None => bail!("JSON pointer {pointer} matched nothing in {}", source_path.display()),
            },
        };
        match self.jq_expr.as_deref() {
            None => Ok(vec![value]),
            Some(jq_expr) => design_jsx::jq_exec::select(jq_expr, &value).with_context(|| {
                format!("failed to apply jq expression to {}", source_path.display())
            }),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Convert(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let options = target.input_settings.options();
                let loaded = target.input_settings.load()?;
                let emissions = loaded
                    .par_iter()
                    .map(|doc| convert_one(doc, target, &options))
                    .collect::<Result<Vec<_>>>()?;
                write_emissions(&emissions, target.out.as_deref())
            }
            Command::Exportable(target) => {
                let settings = &target.input_settings;
                let types = if target.with_groups {
                    ExportableTypes::with_groups()
                } else {
                    ExportableTypes::default()
                };
                let mut entries = Vec::<ExportableNode>::new();
                for doc in settings.load()? {
                    let found = match &doc.input {
                        DesignInput::File(file) => catalog_file(file, &types, settings.limits.max_depth)?,
                        DesignInput::Node(node) => enumerate_exportable(node, &types, settings.limits.max_depth)?,
                    };
                    entries.extend(found);
                }
                let filter = CatalogFilter { search: target.search.clone(), node_type: target.node_type.clone() };
                let entries = filter.apply(entries);
                let rendered = if target.list_types {
                    serde_json::to_string_pretty(&component_types(&entries))?
                } else {
                    serde_json::to_string_pretty(&entries)?
                };
                write_or_print(target.out.as_deref(), &rendered)
            }
            Command::Ids(target) => {
                let settings = &target.input_settings;
                let mut ids = Vec::<String>::new();
                for doc in settings.load()? {
                    let found = collect_ids(doc.input.root(), settings.limits.max_depth)?;
                    ids.extend(found.into_iter().map(str::to_string));
                }
                println!("{}", serde_json::to_string_pretty(&ids)?);
                Ok(())
            }
            Command::Find(target) => {
                let settings = &target.input_settings;
                for doc in settings.load()? {
                    if let Some(node) = find_by_id(doc.input.root(), &target.id, settings.limits.max_depth)? {
                        println!("{}", serde_json::to_string_pretty(node)?);
                        return Ok(());
                    }
                }
                Err(TranslateError::NodeNotFound { id: target.id.clone() }.into())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn convert_one(doc: &Loaded, target: &ConvertOut, options: &TranslateOptions) -> Result<ComponentEmission> {
    let root = doc.input.root();
    let node = match target.node_id.as_deref() {
        None => root,
        Some(id) => find_by_id(root, id, options.max_depth)?
            .ok_or_else(|| TranslateError::NodeNotFound { id: id.to_string() })
            .with_context(|| format!("in {}", doc.source.display()))?,
    };
    let emission = Emitter::new(options.clone())
        .translate(node, target.name.as_deref())
        .with_context(|| format!("failed to convert {}", doc.source.display()))?;
    if !emission.unsupported.is_empty() {
        eprintln!(
            "{} {}: placeholders for {}",
            "warning:".yellow().bold(),
            emission.component_name,
            emission.unsupported.join(", ")
        );
    }
    Ok(emission)
}

fn parse_node_type(raw: &str) -> Result<NodeType, std::convert::Infallible> {
    raw.parse()
}

fn write_emissions(emissions: &[ComponentEmission], out: Option<&Path>) -> Result<()> {
    match (emissions, out) {
        (_, Some(out)) if out.extension().is_some() => {
            ensure!(
                emissions.len() <= 1,
                "{} components to write but {} is a single file; pass a directory instead",
                emissions.len(),
                out.display()
            );
            match emissions {
                [single] => write_or_print(Some(out), &single.source_text),
                _ => Ok(()),
            }
        }
        (_, Some(dir)) => {
            let paths = output_paths(emissions, dir);
            for (emission, path) in emissions.iter().zip(&paths) {
                write_or_print(Some(path), &emission.source_text)?;
            }
            Ok(())
        }
        (_, None) => {
            for emission in emissions {
                println!("{}", emission.source_text);
            }
            Ok(())
        }
    }
}

/// One `.tsx` path per emission under `dir`. Repeated component names get a
/// numeric suffix instead of overwriting each other.
fn output_paths(emissions: &[ComponentEmission], dir: &Path) -> Vec<PathBuf> {
    let dir = dir.to_string_lossy().into_owned();
    let mut taken = IndexSet::<PathBuf>::new();
    for emission in emissions {
        let name = &emission.component_name;
        let mut path = PathBuf::from(suggest_file_path(Some(dir.as_str()), name));
        let mut n = 2;
        while taken.contains(&path) {
            path = PathBuf::from(suggest_file_path(Some(dir.as_str()), &format!("{name}{n}")));
            n += 1;
        }
        if n > 2 {
            log::warn!("component name {name} repeats; writing {}", path.display());
        }
        taken.insert(path);
    }
    taken.into_iter().collect()
}

fn write_or_print(out: Option<&Path>, contents: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{contents}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("{} {}", "wrote".green().bold(), out.display());
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
