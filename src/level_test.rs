use std::collections::HashSet;

use super::*;

#[test]
fn aliases_compare_equal_by_value() {
    assert_eq!(Level::ERROR, Level::SEVERE);
    assert_eq!(Level::WARN, Level::WARNING);
    assert_eq!(Level::DEBUG, Level::FINE);
    assert_eq!(Level::TRACE, Level::FINER);

    let set: HashSet<Level> = [Level::ERROR, Level::SEVERE, Level::INFO].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn ordering_follows_numeric_severity() {
    assert!(Level::ALL < Level::FINEST);
    assert!(Level::FINEST < Level::DEBUG);
    assert!(Level::DEBUG < Level::CONFIG);
    assert!(Level::CONFIG < Level::INFO);
    assert!(Level::INFO < Level::WARN);
    assert!(Level::WARN < Level::ERROR);
    assert!(Level::ERROR < Level::FATAL);
    assert!(Level::FATAL < Level::OFF);
}

#[test]
fn parses_names_case_insensitively_and_numbers() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::DEBUG);
    assert_eq!(" WARN ".parse::<Level>().unwrap(), Level::WARN);
    assert_eq!("800".parse::<Level>().unwrap(), Level::INFO);

    let custom: Level = "850".parse().unwrap();
    assert_eq!(custom.value(), 850);
    assert_eq!(custom.name(), "CUSTOM");
}

#[test]
fn unknown_name_is_an_invalid_argument() {
    let err = "LOUD".parse::<Level>().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn display_uses_the_level_name() {
    assert_eq!(Level::CONFIG.to_string(), "CONFIG");
    assert_eq!(Level::custom("NOTICE", 850).to_string(), "NOTICE");
}

#[test]
fn from_value_prefers_well_known_levels() {
    assert_eq!(Level::from_value(1000).name(), "SEVERE");
    assert_eq!(Level::from_value(i32::MAX).name(), "OFF");
    assert_eq!(Level::from_value(42).name(), "CUSTOM");
}
