//! Integration tests for batch analysis

use std::sync::Arc;

use unisym_engine::{Analyzer, AnalyzerConfig, FileAnalysis, SourceInput};

fn generated_inputs(count: usize) -> Vec<SourceInput> {
    (0..count)
        .map(|i| match i % 3 {
            0 => SourceInput::new(
                format!("Model{}.cs", i),
                format!("namespace App {{ public class Model{} : Base {{ public int Id {{ get; set; }} }} }}", i),
            ),
            1 => SourceInput::new(
                format!("model{}.ts", i),
                format!("export class Model{} extends Base {{ id = {}; }}", i, i),
            ),
            _ => SourceInput::new(
                format!("View{}.tsx", i),
                format!("export function View{}() {{ return <div>{{ {} > 0 && <b/> }}</div>; }}", i, i),
            ),
        })
        .collect()
}

fn fingerprint(files: &[Arc<FileAnalysis>]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            format!(
                "{}|{}|{}",
                f.source.path.display(),
                serde_json::to_string(&f.symbols).expect("serialize symbols"),
                serde_json::to_string(&f.source.diagnostics).expect("serialize diagnostics"),
            )
        })
        .collect()
}

// === Parallel batches ===

#[test]
fn test_large_batch_on_dedicated_pool() {
    let config = AnalyzerConfig::from_toml_str("threads = 4").expect("config");
    let analyzer = Analyzer::new(config).expect("analyzer");
    let report = analyzer.analyze_batch(generated_inputs(60));

    assert_eq!(report.files.len(), 60);
    assert_eq!(report.error_count(), 0);
    assert_eq!(analyzer.results().len(), 60);
    for (i, file) in report.files.iter().enumerate() {
        assert_eq!(file.id().0 as usize, i);
        let expected = if i % 3 == 2 { format!("View{}", i) } else { format!("Model{}", i) };
        let found = file
            .symbols
            .iter()
            .any(|s| s.name() == expected.as_str())
            || file.find_type(&expected).is_some();
        assert!(found, "missing {} in {}", expected, file.source.path.display());
    }
}

#[test]
fn test_parallel_results_match_sequential_ones() {
    let parallel = Analyzer::default().analyze_batch(generated_inputs(30));

    let sequential = Analyzer::new(AnalyzerConfig::from_toml_str("threads = 1").expect("config")).expect("analyzer");
    let sequential = sequential.analyze_batch(generated_inputs(30));

    assert_eq!(fingerprint(&parallel.files), fingerprint(&sequential.files));
}

#[test]
fn test_consecutive_batches_get_fresh_ids() {
    let analyzer = Analyzer::default();
    let first = analyzer.analyze_batch(generated_inputs(3));
    let second = analyzer.analyze_batch(generated_inputs(3));
    assert_eq!(first.files[0].id().0, 0);
    assert_eq!(second.files[0].id().0, 3);
    assert_eq!(analyzer.results().len(), 6);
}

#[test]
fn test_one_broken_file_does_not_affect_others() {
    let mut inputs = generated_inputs(6);
    inputs.insert(2, SourceInput::new("Broken.cs", "class Broken { int = ; }\n}\nclass After { }"));
    let report = Analyzer::default().analyze_batch(inputs);

    assert_eq!(report.files.len(), 7);
    let broken = &report.files[2];
    assert!(broken.source.has_errors());
    assert!(broken.find_type("Broken").is_some());
    assert!(broken.find_type("After").is_some());
    let clean = report.files.iter().filter(|f| !f.source.has_errors()).count();
    assert_eq!(clean, 6);
}
