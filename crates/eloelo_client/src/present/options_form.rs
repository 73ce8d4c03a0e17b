use eloelo_shared::protocol::{GenericOptions, OptionValue, OptionsGroup, UiCommand};

use crate::error::OptionsFormError;

/// `{ group: { option: value } }` exactly as described by the backend.
pub fn make_generic_options(groups: &[OptionsGroup]) -> GenericOptions {
    groups
        .iter()
        .map(|group| {
            let values = group
                .options
                .iter()
                .map(|option| (option.key.clone(), option.value.clone()))
                .collect();
            (group.key.clone(), values)
        })
        .collect()
}

/// Editable text (or toggle) behind one option input.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionBuffer {
    Boolean(bool),
    Integer(String),
    Decimal(String),
    Text(String),
}

impl OptionBuffer {
    fn from_value(value: &OptionValue) -> Self {
        match value {
            OptionValue::Boolean(v) => OptionBuffer::Boolean(*v),
            OptionValue::Integer(v) => OptionBuffer::Integer(v.to_string()),
            OptionValue::Decimal(v) => OptionBuffer::Decimal(v.clone()),
            OptionValue::String(v) => OptionBuffer::Text(v.clone()),
        }
    }

    fn parse(&self) -> Option<OptionValue> {
        match self {
            OptionBuffer::Boolean(v) => Some(OptionValue::Boolean(*v)),
            OptionBuffer::Integer(text) => text.trim().parse::<i64>().ok().map(OptionValue::Integer),
            OptionBuffer::Decimal(text) => {
                let text = text.trim();
                text.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|_| OptionValue::Decimal(text.to_string()))
            }
            OptionBuffer::Text(text) => Some(OptionValue::String(text.clone())),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.parse().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionField {
    pub key: String,
    pub name: String,
    pub buffer: OptionBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsFormGroup {
    pub key: String,
    pub name: String,
    pub fields: Vec<OptionField>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsForm {
    groups: Vec<OptionsFormGroup>,
}

impl OptionsForm {
    pub fn from_groups(groups: &[OptionsGroup]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|group| OptionsFormGroup {
                    key: group.key.clone(),
                    name: group.name.clone(),
                    fields: group
                        .options
                        .iter()
                        .map(|option| OptionField {
                            key: option.key.clone(),
                            name: option.name.clone(),
                            buffer: OptionBuffer::from_value(&option.value),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Cancel: throw away edits and reload from the latest snapshot.
    pub fn reset(&mut self, groups: &[OptionsGroup]) {
        *self = Self::from_groups(groups);
    }

    pub fn groups(&self) -> &[OptionsFormGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [OptionsFormGroup] {
        &mut self.groups
    }

    pub fn buffer_mut(&mut self, group: &str, key: &str) -> Option<&mut OptionBuffer> {
        self.groups
            .iter_mut()
            .find(|g| g.key == group)?
            .fields
            .iter_mut()
            .find(|field| field.key == key)
            .map(|field| &mut field.buffer)
    }

    pub fn validate(&self) -> Result<GenericOptions, OptionsFormError> {
        let mut values = GenericOptions::new();
        let mut invalid_keys = Vec::new();
        for group in &self.groups {
            let group_values = values.entry(group.key.clone()).or_default();
            for field in &group.fields {
                match field.buffer.parse() {
                    Some(value) => {
                        group_values.insert(field.key.clone(), value);
                    }
                    None => invalid_keys.push(format!("{}.{}", group.key, field.key)),
                }
            }
        }
        if invalid_keys.is_empty() {
            Ok(values)
        } else {
            Err(OptionsFormError { invalid_keys })
        }
    }

    pub fn save(&self) -> Result<UiCommand, OptionsFormError> {
        self.validate().map(UiCommand::Options)
    }
}

#[cfg(test)]
#[path = "tests/options_form_tests.rs"]
mod tests;
