#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{compile, Slot};
use crate::{DefinitionError, Part, Validator};

fn render(slots: &[Slot]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

#[test]
fn test_phrase_first_injects_subject() {
    let slots = compile(&["to be greater than".into(), Validator::number().into()]).unwrap();
    assert_eq!(
        render(&slots),
        vec!["{unknown}", "\"to be greater than\"", "{number}"]
    );
    assert!(matches!(slots[0], Slot::Validator { loose: true, .. }));
    assert!(matches!(slots[2], Slot::Validator { loose: false, .. }));
}

#[test]
fn test_choice_first_injects_subject() {
    let slots = compile(&[["to contain", "to include"].into()]).unwrap();
    assert_eq!(
        render(&slots),
        vec!["{unknown}", "[\"to contain\" | \"to include\"]"]
    );
}

#[test]
fn test_validator_first_is_subject() {
    let slots = compile(&[Validator::string().into(), "to be empty".into()]).unwrap();
    assert_eq!(render(&slots), vec!["{string}", "\"to be empty\""]);
}

#[test]
fn test_rejects_empty_parts() {
    assert_eq!(compile(&[]).unwrap_err(), DefinitionError::EmptyParts);
}

#[test]
fn test_rejects_empty_phrase_and_choice() {
    assert_eq!(
        compile(&["".into()]).unwrap_err(),
        DefinitionError::EmptyPhrase { index: 0 }
    );
    assert_eq!(
        compile(&[Validator::any().into(), Part::Choice(Vec::new())]).unwrap_err(),
        DefinitionError::EmptyChoice { index: 1 }
    );
}

#[test]
fn test_rejects_negation_marker() {
    assert_eq!(
        compile(&["not to be".into()]).unwrap_err(),
        DefinitionError::NegatedPhrase {
            index: 0,
            phrase: "not to be".into()
        }
    );
    assert!(matches!(
        compile(&[["to be", "not to be"].into()]),
        Err(DefinitionError::NegatedPhrase { index: 0, .. })
    ));
}

#[test]
fn test_conjunction_needs_value() {
    let ok = compile(&[
        "to be between".into(),
        Validator::number().into(),
        "and".into(),
        Validator::number().into(),
    ]);
    assert!(ok.is_ok());

    assert_eq!(
        compile(&["to be between".into(), Validator::number().into(), "and".into()])
            .unwrap_err(),
        DefinitionError::DanglingConjunction {
            index: 2,
            phrase: "and".into()
        }
    );
    assert!(matches!(
        compile(&["to be".into(), "or".into(), "to be".into()]),
        Err(DefinitionError::DanglingConjunction { index: 1, .. })
    ));
}

#[test]
fn test_phrases() {
    let slots = compile(&[["a", "b"].into(), "c".into()]).unwrap();
    assert!(slots[0].phrases().is_empty());
    assert_eq!(slots[1].phrases(), ["a".to_string(), "b".to_string()]);
    assert_eq!(slots[2].phrases(), ["c".to_string()]);
}
