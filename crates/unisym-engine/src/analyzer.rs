//! Single-file and batch analysis
//!
//! Each file runs through lex → parse → extract on its own. The only state
//! shared between files is the name [`Interner`] and the results map, and a
//! file's result is published only once its pipeline has finished.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};
use unisym_ast::{Diagnostic, Diagnostics, FileId, LineIndex, Profile, Severity, Span, Stage};
use unisym_symbols::{ExtractOptions, Interner};

use crate::config::{AnalyzerConfig, ConfigError};
use crate::frontend::frontend_for;
use crate::source::{FileAnalysis, SourceFile, SourceInput};

/// Code of the warning that replaces diagnostics over the per-file cap
pub const TRUNCATION_CODE: &str = "W-ENGINE-001";

/// Stops a running batch before its remaining files start
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to each input of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Finished files in input order
    pub files: Vec<Arc<FileAnalysis>>,
    /// Inputs whose profile could not be determined
    pub unrecognized: Vec<PathBuf>,
    /// Inputs skipped because the batch was cancelled
    pub cancelled: Vec<PathBuf>,
}

impl BatchReport {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.source.errors().count()).sum()
    }
}

enum Outcome {
    Done(Arc<FileAnalysis>),
    Unrecognized(PathBuf),
    Cancelled(PathBuf),
}

pub struct Analyzer {
    config: AnalyzerConfig,
    options: ExtractOptions,
    interner: Interner,
    pool: Option<rayon::ThreadPool>,
    results: DashMap<FileId, Arc<FileAnalysis>>,
    cancelled: Arc<AtomicBool>,
    next_id: AtomicU32,
}

impl Default for Analyzer {
    fn default() -> Self {
        let config = AnalyzerConfig::default();
        Self {
            options: config.extract_options(),
            config,
            interner: Interner::new(),
            pool: None,
            results: DashMap::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
            next_id: AtomicU32::new(0),
        }
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("unisym-worker-{}", i))
                    .build()?,
            ),
            None => None,
        };
        Ok(Self {
            options: config.extract_options(),
            config,
            pool,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Every finished file so far, keyed by id
    pub fn results(&self) -> &DashMap<FileId, Arc<FileAnalysis>> {
        &self.results
    }

    pub fn get(&self, id: FileId) -> Option<Arc<FileAnalysis>> {
        self.results.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove and return every published result, ordered by id.
    ///
    /// Long-running sessions call this between batches so the map only holds
    /// files that have not been collected yet.
    pub fn take_results(&self) -> Vec<Arc<FileAnalysis>> {
        let ids: Vec<FileId> = self.results.iter().map(|entry| *entry.key()).collect();
        let mut taken: Vec<_> = ids
            .into_iter()
            .filter_map(|id| self.results.remove(&id).map(|(_, analysis)| analysis))
            .collect();
        taken.sort_by_key(|analysis| analysis.id());
        taken
    }

    pub fn clear_results(&self) {
        self.results.clear();
    }

    /// Analyze one input and publish the result.
    ///
    /// Returns `None` when the profile cannot be determined or the analyzer
    /// has been cancelled.
    pub fn analyze_file(&self, input: SourceInput) -> Option<Arc<FileAnalysis>> {
        let id = FileId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.process(id, input) {
            Outcome::Done(analysis) => Some(analysis),
            Outcome::Unrecognized(_) | Outcome::Cancelled(_) => None,
        }
    }

    /// Analyze inputs in parallel. Ids are assigned in input order.
    pub fn analyze_batch(&self, inputs: Vec<SourceInput>) -> BatchReport {
        let count = inputs.len() as u32;
        let base = self.next_id.fetch_add(count, Ordering::Relaxed);
        debug!(files = count, first_id = base, "batch started");

        let run = || -> Vec<Outcome> {
            inputs
                .into_par_iter()
                .enumerate()
                .map(|(i, input)| self.process(FileId(base + i as u32), input))
                .collect()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Done(analysis) => report.files.push(analysis),
                Outcome::Unrecognized(path) => report.unrecognized.push(path),
                Outcome::Cancelled(path) => report.cancelled.push(path),
            }
        }
        debug!(
            finished = report.files.len(),
            unrecognized = report.unrecognized.len(),
            cancelled = report.cancelled.len(),
            "batch finished"
        );
        report
    }

    fn process(&self, id: FileId, input: SourceInput) -> Outcome {
        if self.cancelled.load(Ordering::SeqCst) {
            return Outcome::Cancelled(input.path);
        }
        let profile = input
            .profile
            .or_else(|| self.config.resolve_profile(&input.path, &input.text));
        let Some(profile) = profile else {
            warn!(path = %input.path.display(), "no language profile for file");
            return Outcome::Unrecognized(input.path);
        };

        let analysis = Arc::new(self.analyze_source(id, input.path, input.text, profile));
        self.results.insert(id, Arc::clone(&analysis));
        Outcome::Done(analysis)
    }

    /// Run the full pipeline for one file without publishing it
    pub fn analyze_source(&self, id: FileId, path: PathBuf, text: String, profile: Profile) -> FileAnalysis {
        let span = debug_span!("analyze", file = id.0, profile = profile.name());
        let _enter = span.enter();
        debug!(path = %path.display(), bytes = text.len(), "started");

        let frontend = frontend_for(profile);
        let lexed = frontend.tokenize(&text);
        let parsed = frontend.parse(&text, &lexed);
        let extraction = frontend.extract(&parsed.tree, &text, id, &self.interner, &self.options);

        let mut collector = Diagnostics::new(id);
        collector.extend(&lexed.errors);
        collector.extend(&parsed.errors);
        collector.extend(&extraction.warnings);

        let index = LineIndex::new(&text);
        let mut diagnostics = collector.finish(&text, &index);
        let suppressed = self.cap_diagnostics(&mut diagnostics, id, &text, &index);

        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        if errors > 0 {
            warn!(path = %path.display(), errors, "file has errors");
        }
        debug!(
            tokens = lexed.tokens.len(),
            symbols = extraction.symbol_count(),
            diagnostics = diagnostics.len(),
            "finished"
        );

        FileAnalysis {
            source: SourceFile {
                id,
                path,
                profile,
                text,
                tokens: lexed.tokens,
                tree: parsed.tree,
                diagnostics,
            },
            symbols: extraction.symbols,
            suppressed_diagnostics: suppressed,
        }
    }

    /// Keep the first `max_diagnostics_per_file` diagnostics and note the rest
    fn cap_diagnostics(&self, diagnostics: &mut Vec<Diagnostic>, file: FileId, text: &str, index: &LineIndex) -> usize {
        let Some(limit) = self.config.max_diagnostics_per_file else {
            return 0;
        };
        if diagnostics.len() <= limit {
            return 0;
        }
        let suppressed = diagnostics.len() - limit;
        diagnostics.truncate(limit);
        let end = Span::new(text.len(), text.len());
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            stage: Stage::Engine,
            code: TRUNCATION_CODE.to_string(),
            message: format!("{} more diagnostics suppressed", suppressed),
            file,
            span: end,
            position: index.position(text, end.start),
        });
        suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<SourceInput> {
        vec![
            SourceInput::new("a.cs", "public class Shared { }\nclass A { int x; }"),
            SourceInput::new("b.ts", "export class Shared { }\nfunction b() {}"),
            SourceInput::new("notes.txt", "plain words"),
            SourceInput::new("c.tsx", "export const C = () => <>{1}</>;"),
        ]
    }

    #[test]
    fn test_batch_publishes_finished_files() {
        let analyzer = Analyzer::default();
        let report = analyzer.analyze_batch(inputs());

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.unrecognized, vec![PathBuf::from("notes.txt")]);
        assert!(report.cancelled.is_empty());
        assert_eq!(report.error_count(), 0);

        let ids: Vec<_> = report.files.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![FileId(0), FileId(1), FileId(3)]);
        assert_eq!(analyzer.results().len(), 3);
        assert!(analyzer.get(FileId(2)).is_none());
        assert_eq!(analyzer.get(FileId(3)).unwrap().source.profile, Profile::TypeScriptMarkup);
    }

    #[test]
    fn test_taking_results_empties_the_map() {
        let analyzer = Analyzer::default();
        analyzer.analyze_batch(inputs());

        let taken: Vec<_> = analyzer.take_results().iter().map(|f| f.id()).collect();
        assert_eq!(taken, vec![FileId(0), FileId(1), FileId(3)]);
        assert!(analyzer.results().is_empty());
        assert!(analyzer.take_results().is_empty());

        let next = analyzer.analyze_file(SourceInput::new("d.ts", "let d = 1;")).unwrap();
        assert_eq!(next.id(), FileId(4));
        assert_eq!(analyzer.results().len(), 1);
        analyzer.clear_results();
        assert!(analyzer.get(FileId(4)).is_none());
    }

    #[test]
    fn test_names_are_shared_across_files() {
        let analyzer = Analyzer::default();
        let report = analyzer.analyze_batch(inputs());
        let csharp = report.files[0].find_type("Shared").unwrap();
        let script = report.files[1].find_type("Shared").unwrap();
        assert!(Arc::ptr_eq(&csharp.name, &script.name));
        assert!(analyzer.interner().contains("Shared"));
    }

    #[test]
    fn test_cancelled_batch_publishes_nothing() {
        let analyzer = Analyzer::default();
        analyzer.cancel_handle().cancel();
        let report = analyzer.analyze_batch(inputs());
        assert!(report.files.is_empty());
        assert_eq!(report.cancelled.len(), 4);
        assert!(analyzer.results().is_empty());
        assert!(analyzer.analyze_file(SourceInput::new("d.ts", "let d = 1;")).is_none());
    }

    #[test]
    fn test_dedicated_pool() {
        let config = AnalyzerConfig {
            threads: Some(2),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        let report = analyzer.analyze_batch(inputs());
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalyzerConfig {
            threads: Some(0),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(Analyzer::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_diagnostics_are_collected_sorted_and_positioned() {
        let analyzer = Analyzer::default();
        let source = "class A {\n  int = 1;\n  required int B;\n}";
        let analysis = analyzer
            .analyze_file(SourceInput::new("a.cs", source))
            .unwrap();
        let codes: Vec<_> = analysis.diagnostics().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["E-PARSE-001", "W-EXTRACT-001"]);
        assert_eq!(analysis.diagnostics()[0].position.line, 2);
        assert_eq!(analysis.diagnostics()[1].position.line, 3);
        assert!(analysis.source.has_errors());
        assert_eq!(analysis.find_type("A").unwrap().members.len(), 1);
    }

    #[test]
    fn test_diagnostic_cap() {
        let config = AnalyzerConfig {
            max_diagnostics_per_file: Some(2),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        let source = "class A { int = 1; int = 2; int = 3; int = 4; }";
        let analysis = analyzer
            .analyze_file(SourceInput::new("a.cs", source))
            .unwrap();
        assert_eq!(analysis.suppressed_diagnostics, 2);
        let diagnostics = analysis.diagnostics();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[2].code, TRUNCATION_CODE);
        assert_eq!(diagnostics[2].severity, Severity::Warning);
    }

    #[test]
    fn test_explicit_profile_overrides_extension() {
        let analyzer = Analyzer::default();
        let input = SourceInput::new("view.ts", "const v = <div/>;").with_profile(Profile::TypeScriptMarkup);
        let analysis = analyzer.analyze_file(input).unwrap();
        assert_eq!(analysis.source.profile, Profile::TypeScriptMarkup);
        assert!(!analysis.source.has_errors());
    }

    #[test]
    fn test_options_flow_to_extraction() {
        let config = AnalyzerConfig {
            include_private: false,
            extract_imports: true,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        let source = "import { x } from \"./x\";\nclass K { private a = 1; b = 2; }";
        let analysis = analyzer.analyze_file(SourceInput::new("k.ts", source)).unwrap();
        assert!(matches!(analysis.symbols[0], unisym_symbols::Symbol::Import(_)));
        let names: Vec<_> = analysis.find_type("K").unwrap().members.iter().map(|m| m.name.to_string()).collect();
        assert_eq!(names, vec!["b"]);
    }
}
