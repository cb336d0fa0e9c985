//! Text inputs through to reports.

use spc_search::{
    read_constellation, Engine, Error, MappingReader, ParityReader, SearchConfig, SieveConfig,
};

const SQUARE: &str = "# 4-point square\n-1 -1\n 1 -1\n-1  1\n 1  1\n";

#[test]
fn mapping_file_drives_one_report_per_line() {
    let engine = Engine::new(read_constellation(SQUARE.as_bytes()).unwrap()).unwrap();
    let config = SearchConfig::new(3, 20);
    let mappings = "0 1 2 3\n\n# reversed\n3 2 1 0\n";

    let reports: Vec<_> = MappingReader::new(mappings.as_bytes(), engine.field().size())
        .map(|m| engine.best_parity(&m?, &config))
        .collect::<Result<_, Error>>()
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].mapping.to_string(), "0 1 2 3");
    assert_eq!(reports[1].mapping.to_string(), "3 2 1 0");
    // Reversing the square is a symmetry of it, so the spectra agree.
    assert_eq!(
        reports[0].best().map(|c| &c.score),
        reports[1].best().map(|c| &c.score)
    );
}

#[test]
fn parity_file_feeds_the_sieve() {
    let engine = Engine::new(read_constellation(SQUARE.as_bytes()).unwrap()).unwrap();
    // Scaled and permuted forms collapse onto canonical parities.
    let parities = "2 2 1\n0 1 5\n# same as the first\n4 0 1\n";
    let parities: Vec<_> = ParityReader::new(parities.as_bytes(), engine.field(), 3)
        .collect::<Result<_, Error>>()
        .unwrap();
    let exps: Vec<_> = parities.iter().map(|h| h.exponents().to_vec()).collect();
    assert_eq!(exps, vec![vec![1, 1, 0], vec![2, 1, 0], vec![1, 1, 0]]);

    let report = engine
        .sieve(
            &spc_search::Mapping::identity(4),
            &SieveConfig::new(3, 8),
            parities,
        )
        .unwrap();
    assert_eq!(report.evaluated, 3);
    assert_eq!(report.best().map(|c| c.score), Some(48));
}

#[test]
fn bad_mapping_line_is_reported_and_the_rest_continue() {
    let text = "0 1 2 3\n0 0 1 2\n1 0 3 2\n";
    let results: Vec<_> = MappingReader::new(text.as_bytes(), 4).collect();
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert!(err.to_string().starts_with("line 2: "), "{err}");
    assert!(results[2].is_ok());
}
