//! One conversion run: collect rules from the selected sources, merge them
//! into the persisted document and write the result.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, error, info, warn};

use crate::error::Result;
use crate::merge::{
    export_patterns, load_document, load_pattern_list, save_document, MergeEngine, MergeStats,
};
use crate::models::CandidatePattern;
use crate::rules::{parse_custom_urls, parse_filter_list, ConversionReport};
use crate::settings::Settings;
use crate::sources::{fetch_filter_list, read_interactive, read_rule_file};
use crate::utils::http::parse_proxy;

/// Supplies the decoded filter-list text.
pub trait FilterListSource {
    fn fetch(&self) -> Result<String>;
}

/// The published gfwlist, fetched over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteFilterList {
    pub url: String,
    pub proxy: String,
}

impl RemoteFilterList {
    pub fn from_settings(settings: &Settings) -> Self {
        RemoteFilterList {
            url: settings.source.gfwlist_url.clone(),
            proxy: settings.source.proxy.clone(),
        }
    }
}

impl FilterListSource for RemoteFilterList {
    fn fetch(&self) -> Result<String> {
        fetch_filter_list(&self.url, &parse_proxy(&self.proxy))
    }
}

/// Which steps a run performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub update_gfw: bool,
    pub add_custom: bool,
    pub interactive: bool,
    pub import_patterns: Option<PathBuf>,
    pub export_patterns: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl RunOptions {
    /// No step selected: refresh from the filter list and merge the rule file.
    pub fn is_full_update(&self) -> bool {
        !(self.update_gfw || self.add_custom || self.interactive || self.import_patterns.is_some())
    }
}

/// Aggregate outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub skipped_lines: usize,
    /// Set when the filter-list refresh failed and was skipped.
    pub source_error: Option<String>,
    /// Where the document was written, `None` when nothing changed.
    pub output: Option<PathBuf>,
}

impl RunReport {
    fn record_conversion(&mut self, report: &ConversionReport) {
        self.invalid += report.invalid.len();
        self.duplicates += report.duplicates;
        self.skipped_lines += report.skipped;
    }

    fn record_merge(&mut self, stats: &MergeStats) {
        self.added += stats.added;
        self.duplicates += stats.duplicates.len();
    }
}

/// `<stem>_<YYYY-MM-DD>.<ext>` next to `base`.
pub fn dated_output_path(base: &Path, date: NaiveDate) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "FoxyProxy".to_string());
    let file_name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), ext.to_string_lossy()),
        None => format!("{}_{}", stem, date.format("%Y-%m-%d")),
    };
    base.with_file_name(file_name)
}

pub struct Runner<'a, S: FilterListSource> {
    settings: &'a Settings,
    source: S,
    today: NaiveDate,
}

impl<'a, S: FilterListSource> Runner<'a, S> {
    pub fn new(settings: &'a Settings, source: S, today: NaiveDate) -> Self {
        Runner {
            settings,
            source,
            today,
        }
    }

    pub fn run<R: BufRead>(&self, options: &RunOptions, input: &mut R) -> Result<RunReport> {
        let config_path = &self.settings.files.config_path;
        let full_update = options.is_full_update();
        let mut report = RunReport::default();

        let base = load_document(config_path)?;
        let loaded_existing = base.is_some();
        match &base {
            Some(_) => info!("Loaded existing configuration '{}'", config_path.display()),
            None => warn!(
                "'{}' not found, creating a new configuration",
                config_path.display()
            ),
        }

        let mut engine = MergeEngine::new(
            base,
            &self.settings.endpoint(),
            self.settings.ordering_policy(),
        )?;

        if options.update_gfw || full_update {
            match self.source.fetch() {
                Ok(content) => {
                    let conversion = parse_filter_list(&content);
                    info!(
                        "Generated {} patterns from the filter list ({} invalid, {} skipped)",
                        conversion.candidates.len(),
                        conversion.invalid.len(),
                        conversion.skipped
                    );
                    report.record_conversion(&conversion);
                    if let Some(path) = &options.export_patterns {
                        self.export(path, &conversion.candidates)?;
                    }
                    self.merge_batch(&mut engine, "filter list", conversion.candidates, &mut report);
                }
                Err(e) if e.is_source_failure() => {
                    error!("Skipping filter-list refresh: {}", e);
                    report.source_error = Some(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        if options.add_custom || full_update {
            let urls = read_rule_file(&self.settings.files.rule_file)?;
            let conversion = parse_custom_urls(&urls);
            report.record_conversion(&conversion);
            self.merge_batch(&mut engine, "custom rules", conversion.candidates, &mut report);
        }

        if options.interactive {
            let urls = read_interactive(input)?;
            let conversion = parse_custom_urls(&urls);
            report.record_conversion(&conversion);
            self.merge_batch(&mut engine, "input", conversion.candidates, &mut report);
        }

        if let Some(path) = &options.import_patterns {
            let patterns = load_pattern_list(path)?;
            info!("Read {} patterns from '{}'", patterns.len(), path.display());
            self.merge_batch(&mut engine, "imported patterns", patterns, &mut report);
        }

        if report.invalid > 0 {
            warn!("Skipped {} invalid rules", report.invalid);
        }

        if report.added == 0 && loaded_existing && !full_update && options.output.is_none() {
            info!("No new rules were added, '{}' left unchanged", config_path.display());
            return Ok(report);
        }

        let output = match &options.output {
            Some(path) => path.clone(),
            None if full_update => dated_output_path(config_path, self.today),
            None => config_path.clone(),
        };
        save_document(&output, engine.document())?;
        report.output = Some(output);
        Ok(report)
    }

    fn export(&self, path: &Path, candidates: &[CandidatePattern]) -> Result<()> {
        let ordered = match self.settings.ordering_policy() {
            Some(policy) => policy.reorder(candidates.to_vec()),
            None => candidates.to_vec(),
        };
        export_patterns(path, &ordered)
    }

    fn merge_batch(
        &self,
        engine: &mut MergeEngine,
        label: &str,
        patterns: Vec<CandidatePattern>,
        report: &mut RunReport,
    ) {
        let stats = engine.merge(patterns);
        if stats.added > 0 {
            info!("Added {} new patterns from {}", stats.added, label);
        }
        if !stats.duplicates.is_empty() {
            info!(
                "Skipped {} patterns from {} that already exist",
                stats.duplicates.len(),
                label
            );
            for duplicate in &stats.duplicates {
                debug!("Existing pattern: {}", duplicate.pattern);
            }
        }
        report.record_merge(&stats);
    }
}
