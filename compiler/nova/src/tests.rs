use crate::{analyze_strict, analyze_tolerant, ErrorPhase, PipelineConfig};
use nova_ir::StringInterner;
use nova_types::EmptyTypeRegistry;
use pretty_assertions::assert_eq;

fn default_config() -> PipelineConfig {
    PipelineConfig { file_path: "test.nova".to_string() }
}

#[test]
fn strict_pipeline_analyzes_a_clean_function() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let source = "fun add(a: Int, b: Int): Int {\n    return a + b\n}\n";
    let output = analyze_strict(source, &interner, &registry, &default_config()).unwrap();
    assert!(!output.has_errors(), "diagnostics: {:?}", output.analysis.diagnostics);
}

#[test]
fn strict_pipeline_reports_parse_phase_on_syntax_error() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let result = analyze_strict("fun broken(", &interner, &registry, &default_config());
    let (_, phase) = result.unwrap_err();
    assert_eq!(phase, ErrorPhase::Parse);
}

#[test]
fn strict_pipeline_surfaces_unresolved_reference() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let source = "fun broken(): Int {\n    return unknownName\n}\n";
    let output = analyze_strict(source, &interner, &registry, &default_config()).unwrap();
    assert!(output.has_errors());
}

#[test]
fn tolerant_pipeline_wraps_bare_statements_into_synthetic_main() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let source = "val x = 1\nval y = x + 1\n";
    let output = analyze_tolerant(source, &interner, &registry, &default_config());
    assert!(!output.has_errors(), "diagnostics: {:?}", output.all_diagnostics());
}

#[test]
fn tolerant_pipeline_recovers_from_a_syntax_error() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let source = "fun a(): Int {\n    return 1\n}\nfun (\nfun b(): Int {\n    return 2\n}\n";
    let output = analyze_tolerant(source, &interner, &registry, &default_config());
    assert!(!output.parse_errors.is_empty());
    assert!(output.has_errors());
}

#[test]
fn tolerant_pipeline_flags_const_with_non_constant_initializer() {
    let interner = StringInterner::new();
    let registry = EmptyTypeRegistry;
    let source = "fun computeName(): String {\n    return \"x\"\n}\nconst val NAME = computeName()\n";
    let output = analyze_tolerant(source, &interner, &registry, &default_config());
    assert!(output.has_errors());
}
