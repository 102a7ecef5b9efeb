use clinica_instruments::InstrumentTable;
use clinica_instruments::definition::InstrumentDefinition;
use clinica_instruments::error::InstrumentError;
use clinica_instruments::scoring::{BandViolation, Category, Polarity, SeverityBand, check_bands};

fn k10() -> InstrumentDefinition {
    InstrumentDefinition {
        id: "k10".to_string(),
        name: "K10".to_string(),
        full_name: "Kessler Psychological Distress Scale".to_string(),
        category: Category::Anxiety,
        polarity: Polarity::HigherIsWorse,
        bands: vec![
            SeverityBand::new(10, 15, "Baja", 1),
            SeverityBand::new(16, 21, "Moderada", 2),
            SeverityBand::new(22, 29, "Alta", 3),
            SeverityBand::new(30, 50, "Muy alta", 4),
        ],
    }
}

#[test]
fn builtin_table_lists_all_instruments() {
    let table = InstrumentTable::builtin();
    assert_eq!(table.len(), 5);
    for id in ["phq-9", "gad-7", "beck-depression", "beck-anxiety", "who-5"] {
        assert!(table.get(id).is_some(), "missing {id}");
    }
    assert_eq!(table.polarity("who-5"), Some(Polarity::HigherIsBetter));
    assert_eq!(table.polarity("phq-9"), Some(Polarity::HigherIsWorse));
}

#[test]
fn caller_definitions_extend_the_builtin_table() {
    let table = InstrumentTable::builtin().with_definitions(vec![k10()]).unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.interpret("k10", 24).label(), "Alta");
    assert_eq!(table.get("k10").unwrap().full_name(), "Kessler Psychological Distress Scale");
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut clash = k10();
    clash.id = "phq-9".to_string();
    let err = InstrumentTable::builtin().with_definitions(vec![clash]).unwrap_err();
    assert!(matches!(err, InstrumentError::DuplicateInstrument(id) if id == "phq-9"));

    let err = InstrumentTable::from_definitions(vec![k10(), k10()]).unwrap_err();
    assert!(matches!(err, InstrumentError::DuplicateInstrument(_)));
}

#[test]
fn gaps_and_overlaps_are_detected() {
    let gap = vec![SeverityBand::new(0, 4, "A", 1), SeverityBand::new(6, 9, "B", 2)];
    assert_eq!(
        check_bands(&gap),
        vec![BandViolation::Gap { index: 1, min: 6, previous_max: 4 }]
    );

    let overlap = vec![SeverityBand::new(0, 5, "A", 1), SeverityBand::new(5, 9, "B", 2)];
    assert_eq!(
        check_bands(&overlap),
        vec![BandViolation::Overlap { index: 1, min: 5, previous_max: 5 }]
    );
}

#[test]
fn ranks_must_be_strictly_monotonic() {
    let flat = vec![
        SeverityBand::new(0, 4, "A", 1),
        SeverityBand::new(5, 9, "B", 1),
    ];
    assert_eq!(check_bands(&flat), vec![BandViolation::NonMonotonicRank { index: 1 }]);

    let zigzag = vec![
        SeverityBand::new(0, 4, "A", 1),
        SeverityBand::new(5, 9, "B", 3),
        SeverityBand::new(10, 14, "C", 2),
    ];
    assert_eq!(check_bands(&zigzag), vec![BandViolation::NonMonotonicRank { index: 2 }]);

    let descending = vec![
        SeverityBand::new(0, 4, "A", 3),
        SeverityBand::new(5, 9, "B", 2),
        SeverityBand::new(10, 14, "C", 1),
    ];
    assert!(check_bands(&descending).is_empty());
}

#[test]
fn empty_and_inverted_tables_are_invalid() {
    assert_eq!(check_bands(&[]), vec![BandViolation::Empty]);
    assert_eq!(
        check_bands(&[SeverityBand::new(9, 3, "A", 1)]),
        vec![BandViolation::InvertedRange { index: 0, min: 9, max: 3 }]
    );

    let mut broken = k10();
    broken.bands.clear();
    let err = InstrumentTable::from_definitions(vec![broken]).unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::InvalidBands { ref instrument_id, violation: BandViolation::Empty } if instrument_id == "k10"
    ));
}

#[test]
fn table_loads_from_json() {
    let json = r#"[
        {
            "id": "pss-10",
            "name": "PSS-10",
            "category": "anxiety",
            "polarity": "higher_is_worse",
            "bands": [
                {"range": {"min": 0, "max": 13}, "label": "Estrés bajo", "severity_rank": 1},
                {"range": {"min": 14, "max": 26}, "label": "Estrés moderado", "severity_rank": 2},
                {"range": {"min": 27, "max": 40}, "label": "Estrés alto", "severity_rank": 3}
            ]
        }
    ]"#;

    let table = InstrumentTable::from_json(json).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.interpret("pss-10", 27).label(), "Estrés alto");
    assert_eq!(table.get("pss-10").unwrap().full_name(), "PSS-10");
    assert!(table.get("phq-9").is_none());

    assert!(matches!(
        InstrumentTable::from_json("[{\"id\": 3}]"),
        Err(InstrumentError::Deserialize(_))
    ));
}

#[test]
fn definitions_round_trip_the_builtin_table() {
    let table = InstrumentTable::builtin();
    let rebuilt = InstrumentTable::from_definitions(table.definitions()).unwrap();
    assert_eq!(rebuilt.len(), table.len());
    for score in 0..=27 {
        assert_eq!(rebuilt.interpret("phq-9", score), table.interpret("phq-9", score));
    }
}
