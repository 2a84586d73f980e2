//! Assembly driver
//!
//! Builds every condition module of a catalog plus the shared history module,
//! then writes them as pretty-printed JSON files. Condition modules are
//! independent of each other and are built in parallel unless the
//! configuration asks otherwise; output order is catalog order either way.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::algorithm::module::{
    ConditionModuleBuilder, HISTORY_MODULE_STEM, ModuleGraph, build_history_module,
};
use crate::config::{GeneratorConfig, load_priors};
use crate::error::util::ensure_directory;
use crate::error::{GeneratorError, Result};
use crate::models::catalog::{Catalog, Condition};
use crate::models::priors::PriorTable;
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_modules_written, log_run_start,
    log_skipped_condition, log_warning,
};

const JSON_INDENT: &[u8] = b"    ";

/// A built module and the file stem it is written under
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    pub stem: String,
    pub graph: ModuleGraph,
}

impl GeneratedModule {
    /// File name of the module, e.g. `symcat_gout.json`
    #[must_use]
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}{}.json", self.stem)
    }
}

/// Render a module as JSON indented by four spaces
pub fn render_module(graph: &ModuleGraph) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    graph
        .serialize(&mut serializer)
        .map_err(|e| GeneratorError::json(graph.name(), e))?;
    Ok(buffer)
}

/// Builds all modules of a run
#[derive(Debug, Clone, Copy)]
pub struct ModuleAssembler<'a> {
    catalog: &'a Catalog,
    priors: &'a PriorTable,
    config: &'a GeneratorConfig,
}

impl<'a> ModuleAssembler<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, priors: &'a PriorTable, config: &'a GeneratorConfig) -> Self {
        Self {
            catalog,
            priors,
            config,
        }
    }

    /// Build every module; the first data error aborts the whole run
    pub fn assemble(&self) -> Result<Vec<GeneratedModule>> {
        let builder = ConditionModuleBuilder::new(self.catalog, self.priors, self.config);
        let conditions: Vec<(&str, &Condition)> = self.catalog.conditions.iter().collect();

        let build = |&(key, condition): &(&str, &Condition)| -> Result<Option<GeneratedModule>> {
            let graph = builder.build(condition)?;
            if graph.is_none() {
                log_skipped_condition(key, "no symptoms listed");
            }
            Ok(graph.map(|graph| GeneratedModule {
                stem: key.to_string(),
                graph,
            }))
        };

        let built: Vec<Option<GeneratedModule>> = if self.config.parallel {
            log::info!("Building {} condition modules in parallel", conditions.len());
            conditions.par_iter().map(build).collect::<Result<_>>()?
        } else {
            log::info!("Building {} condition modules sequentially", conditions.len());
            conditions.iter().map(build).collect::<Result<_>>()?
        };

        let mut modules: Vec<GeneratedModule> = built.into_iter().flatten().collect();
        modules.push(GeneratedModule {
            stem: HISTORY_MODULE_STEM.to_string(),
            graph: build_history_module(self.config.num_history_years)?,
        });
        Ok(modules)
    }
}

/// Write modules into `dir` as `<prefix><stem>.json`, creating `dir` if needed
///
/// Returns the number of files written.
pub fn write_modules(dir: &Path, modules: &[GeneratedModule], prefix: &str) -> Result<usize> {
    ensure_directory(dir)?;
    if modules.is_empty() {
        log_warning("No modules to write", Some(dir));
        return Ok(0);
    }
    log::debug!("Writing {} modules to {}", modules.len(), dir.display());

    let pb = create_main_progress_bar(modules.len() as u64, Some("Writing modules"));
    for module in modules {
        let path = dir.join(module.file_name(prefix));
        let bytes = render_module(&module.graph)?;
        fs::write(&path, bytes).map_err(|e| GeneratorError::io(&path, e))?;
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("Modules written"));

    Ok(modules.len())
}

/// Input and output locations of a run
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub symptoms: PathBuf,
    pub conditions: PathBuf,
    pub priors: Option<PathBuf>,
    pub output: PathBuf,
}

/// Load the inputs, build every module and write them out
///
/// Returns the number of modules written.
pub fn run(paths: &RunPaths, config: &GeneratorConfig) -> Result<usize> {
    let start = Instant::now();
    log_run_start(config);

    let priors = load_priors(paths.priors.as_deref())?;
    let catalog = Catalog::from_files(&paths.symptoms, &paths.conditions)?;

    let modules = ModuleAssembler::new(&catalog, &priors, config).assemble()?;
    let written = write_modules(&paths.output, &modules, &config.prefix)?;

    log_modules_written(&paths.output, written, Some(start.elapsed()));
    Ok(written)
}
