use eloelo_shared::protocol::DescribedOption;
use serde_json::json;

use super::*;

fn groups() -> Vec<OptionsGroup> {
    vec![OptionsGroup {
        name: "Spawelo".into(),
        key: "spawelo".into(),
        options: vec![
            DescribedOption {
                key: "minLoses".into(),
                name: "Min loses".into(),
                value: OptionValue::Integer(3),
            },
            DescribedOption {
                key: "factor".into(),
                name: "Factor".into(),
                value: OptionValue::Decimal("0.98".into()),
            },
            DescribedOption {
                key: "additive".into(),
                name: "Additive".into(),
                value: OptionValue::Boolean(false),
            },
            DescribedOption {
                key: "label".into(),
                name: "Label".into(),
                value: OptionValue::String("spring".into()),
            },
        ],
    }]
}

#[test]
fn generic_options_mirror_described_groups() {
    let generic = make_generic_options(&groups());
    assert_eq!(generic["spawelo"]["minLoses"], OptionValue::Integer(3));
    assert_eq!(
        generic["spawelo"]["factor"],
        OptionValue::Decimal("0.98".into())
    );
    assert_eq!(generic["spawelo"].len(), 4);
}

#[test]
fn untouched_form_saves_snapshot_values() {
    let form = OptionsForm::from_groups(&groups());
    let command = form.save().expect("valid form");
    assert_eq!(command, UiCommand::Options(make_generic_options(&groups())));
    assert_eq!(
        command.args(),
        json!({ "spawelo": {
            "minLoses": 3,
            "factor": "0.98",
            "additive": false,
            "label": "spring"
        } })
    );
}

#[test]
fn edits_are_typed_on_save() {
    let mut form = OptionsForm::from_groups(&groups());
    *form.buffer_mut("spawelo", "minLoses").expect("field") = OptionBuffer::Integer(" 5 ".into());
    *form.buffer_mut("spawelo", "factor").expect("field") = OptionBuffer::Decimal("1.25".into());
    *form.buffer_mut("spawelo", "additive").expect("field") = OptionBuffer::Boolean(true);

    let values = form.validate().expect("valid");
    assert_eq!(values["spawelo"]["minLoses"], OptionValue::Integer(5));
    assert_eq!(values["spawelo"]["factor"], OptionValue::Decimal("1.25".into()));
    assert_eq!(values["spawelo"]["additive"], OptionValue::Boolean(true));
}

#[test]
fn bad_numbers_are_refused_with_their_keys() {
    let mut form = OptionsForm::from_groups(&groups());
    *form.buffer_mut("spawelo", "minLoses").expect("field") = OptionBuffer::Integer("2.5".into());
    *form.buffer_mut("spawelo", "factor").expect("field") = OptionBuffer::Decimal("inf".into());
    assert!(!OptionBuffer::Integer("2.5".into()).is_valid());

    let err = form.save().expect_err("invalid form");
    assert_eq!(err.invalid_keys, ["spawelo.minLoses", "spawelo.factor"]);
    assert_eq!(
        err.to_string(),
        "invalid option values: spawelo.minLoses, spawelo.factor"
    );
}

#[test]
fn cancel_resets_from_snapshot() {
    let mut form = OptionsForm::from_groups(&groups());
    *form.buffer_mut("spawelo", "label").expect("field") = OptionBuffer::Text("autumn".into());
    assert!(form.buffer_mut("spawelo", "missing").is_none());
    assert!(form.buffer_mut("other", "label").is_none());

    form.reset(&groups());
    assert_eq!(form, OptionsForm::from_groups(&groups()));
    assert_eq!(form.groups()[0].fields.len(), 4);
}
