//! The Variables table: classification and exact re-dump.

mod helpers;

use helpers::source_fixtures::parse_as;
use robot_syntax::parser::ScalarValuePolicy;
use robot_syntax::syntax::VariableType;
use robot_syntax::{ParseOptions, dump, parse};

const SOURCE: &str = "*** Variables ***\n\
                      ${scalar}  0\n\
                      @{list}  1  2  3\n\
                      &{dict}  a=1  b=2\n\
                      invalid}  1  2  3\n";

#[test]
fn test_end_to_end_variables() {
    let file = parse(SOURCE, &ParseOptions::default());
    let kinds: Vec<_> = file.variables().iter().map(|v| v.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            VariableType::Scalar,
            VariableType::List,
            VariableType::Dictionary,
            VariableType::Invalid,
        ]
    );
    assert_eq!(dump(&file), SOURCE);
    assert_eq!(dump(&file).lines().count(), 5);
}

#[test]
fn test_invalid_variable_survives_round_trip() {
    let file = parse(SOURCE, &ParseOptions::default());
    let invalid = &file.variables().elements()[3];
    assert!(invalid.is_present(&file));
    assert_eq!(invalid.name(&file), "invalid}");
    assert_eq!(invalid.values().len(), 3);
}

#[test]
fn test_dictionary_items() {
    let file = parse(SOURCE, &ParseOptions::default());
    let dict = &file.variables().elements()[2];
    let items: Vec<_> = dict
        .items(&file)
        .into_iter()
        .map(|item| (item.key.to_string(), item.value.map(str::to_string)))
        .collect();
    assert_eq!(
        items,
        vec![
            ("a".to_string(), Some("1".to_string())),
            ("b".to_string(), Some("2".to_string())),
        ]
    );
}

#[test]
fn test_scalar_policy_is_configurable() {
    let source = "*** Variables ***\n${multi}  a  b\n";
    let default = parse(source, &ParseOptions::default());
    assert_eq!(default.variables().elements()[0].kind(), VariableType::ScalarAsList);

    let options = ParseOptions::default().with_scalar_policy(ScalarValuePolicy::AlwaysScalar);
    let scalar = parse(source, &options);
    assert_eq!(scalar.variables().elements()[0].kind(), VariableType::Scalar);
    assert_eq!(dump(&scalar), source);
}

#[test]
fn test_tsv_variables() {
    let file = parse_as("*** Variables ***\n@{L}\ta b\tc\n", "vars.tsv");
    let values: Vec<_> = file.variables().elements()[0]
        .values()
        .iter()
        .map(|id| file.text(*id).to_string())
        .collect();
    assert_eq!(values, vec!["a b", "c"]);
}
