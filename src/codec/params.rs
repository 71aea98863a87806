//! Build parameter codec
//!
//! Translates the ordered parameter list to and from the
//! `hudson.model.ParametersDefinitionProperty` block under a job's
//! `properties` element.

use crate::codec::enums::{kind_for_long_name, long_name_for};
use crate::codec::tree::Element;
use crate::pipeline::params::{ParameterDefinition, ParameterKind};

const PARAMETERS_PROPERTY: &str = "hudson.model.ParametersDefinitionProperty";
const PARAMETER_DEFINITIONS: &str = "parameterDefinitions";

/// Writes the parameter block under `properties`, replacing any previous one.
///
/// An empty list removes the block entirely, so re-encoding after clearing
/// parameters leaves no stale XML behind. Choice options are emitted one
/// `string` entry per line of the default value; file parameters carry no
/// default-value element.
pub fn append_parameters_to_tree(properties: &mut Element, parameters: &[ParameterDefinition]) {
    properties.remove_children(PARAMETERS_PROPERTY);
    if parameters.is_empty() {
        return;
    }

    let definitions = properties
        .add_child(Element::new(PARAMETERS_PROPERTY))
        .get_or_create_child(PARAMETER_DEFINITIONS);

    for parameter in parameters {
        let definition = definitions.add_child(Element::new(long_name_for(&parameter.kind)));
        definition.add_text_child("name", parameter.name.as_str());
        definition.add_text_child("description", parameter.description.as_str());
        match &parameter.kind {
            ParameterKind::Choice => {
                let array = definition
                    .add_child(
                        Element::new("choices").with_attribute("class", "java.util.Arrays$ArrayList"),
                    )
                    .add_child(Element::new("a").with_attribute("class", "string-array"));
                for option in parameter.default_value.split('\n') {
                    array.add_text_child("string", option);
                }
            }
            ParameterKind::File => {}
            _ => definition.add_text_child("defaultValue", parameter.default_value.as_str()),
        }
    }
}

/// Reads the parameter block under `properties` back into an ordered list.
///
/// An absent block decodes to an empty list. Choice parameters accept both
/// legacy nestings: options wrapped in an `a` array element, or listed bare
/// under `choices`.
#[must_use]
pub fn get_parameters_from_tree(properties: &Element) -> Vec<ParameterDefinition> {
    let Some(definitions) = properties
        .child(PARAMETERS_PROPERTY)
        .and_then(|block| block.child(PARAMETER_DEFINITIONS))
    else {
        return Vec::new();
    };

    definitions
        .children
        .iter()
        .map(|definition| {
            let kind = kind_for_long_name(&definition.tag);
            let default_value = match kind {
                ParameterKind::Choice => definition
                    .child("choices")
                    .map(|choices| {
                        let holder = choices.child("a").unwrap_or(choices);
                        holder
                            .children_named("string")
                            .map(|option| option.text.as_str())
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default(),
                ParameterKind::File => String::new(),
                _ => definition.child_text("defaultValue").to_string(),
            };
            ParameterDefinition {
                name: definition.child_text("name").to_string(),
                description: definition.child_text("description").to_string(),
                default_value,
                kind,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn sample_parameters() -> Vec<ParameterDefinition> {
        vec![
            ParameterDefinition::new("BRANCH", ParameterKind::String)
                .with_description("branch to build")
                .with_default_value("main"),
            ParameterDefinition::new("DRY_RUN", ParameterKind::Boolean).with_default_value("true"),
            ParameterDefinition::new("NOTES", ParameterKind::Text)
                .with_default_value("line one\nline two"),
            ParameterDefinition::new("ENV", ParameterKind::Choice)
                .with_default_value("dev\nstaging\nprod"),
            ParameterDefinition::new("BUNDLE", ParameterKind::File),
            ParameterDefinition::new("SECRET", ParameterKind::Password).with_default_value("hunter2"),
        ]
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let parameters = sample_parameters();
        let mut properties = Element::new("properties");
        append_parameters_to_tree(&mut properties, &parameters);
        assert_eq!(get_parameters_from_tree(&properties), parameters);
    }

    #[test]
    fn test_encode_is_destructive_and_idempotent() {
        let mut properties = Element::new("properties");
        append_parameters_to_tree(&mut properties, &sample_parameters());
        append_parameters_to_tree(
            &mut properties,
            &[ParameterDefinition::new("ONLY", ParameterKind::String)],
        );
        let decoded = get_parameters_from_tree(&properties);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "ONLY");

        append_parameters_to_tree(&mut properties, &[]);
        assert!(properties.child(PARAMETERS_PROPERTY).is_none());
        assert!(get_parameters_from_tree(&properties).is_empty());
    }

    #[test]
    fn test_absent_block_decodes_to_empty_list() {
        let properties = Element::new("properties");
        assert!(get_parameters_from_tree(&properties).is_empty());
    }

    #[test]
    fn test_unknown_class_preserved_through_round_trip() {
        let parameter = ParameterDefinition::new("ODD", ParameterKind::Custom(
            "InvalidParameterDefinition".to_string(),
        ));
        let mut properties = Element::new("properties");
        append_parameters_to_tree(&mut properties, std::slice::from_ref(&parameter));
        let block = properties.child(PARAMETERS_PROPERTY).unwrap();
        let definitions = block.child(PARAMETER_DEFINITIONS).unwrap();
        assert_eq!(definitions.children[0].tag, "InvalidParameterDefinition");
        assert_eq!(get_parameters_from_tree(&properties), vec![parameter]);
    }

    #[test]
    fn test_choice_legacy_bare_nesting() {
        let mut properties = Element::new("properties");
        let choices = properties
            .get_or_create_child(PARAMETERS_PROPERTY)
            .get_or_create_child(PARAMETER_DEFINITIONS)
            .add_child(Element::new("hudson.model.ChoiceParameterDefinition"));
        choices.add_text_child("name", "ENV");
        choices.add_text_child("description", "");
        let bare = choices.add_child(Element::new("choices"));
        bare.add_text_child("string", "dev");
        bare.add_text_child("string", "prod");

        let decoded = get_parameters_from_tree(&properties);
        assert_eq!(decoded[0].kind, ParameterKind::Choice);
        assert_eq!(decoded[0].default_value, "dev\nprod");
    }

    #[test]
    fn test_file_parameter_has_no_default_element() {
        let mut properties = Element::new("properties");
        append_parameters_to_tree(
            &mut properties,
            &[ParameterDefinition::new("UPLOAD", ParameterKind::File)
                .with_default_value("ignored")],
        );
        let definitions = properties
            .child(PARAMETERS_PROPERTY)
            .and_then(|b| b.child(PARAMETER_DEFINITIONS))
            .unwrap();
        assert!(definitions.children[0].child("defaultValue").is_none());
    }

    proptest! {
        #[test]
        fn prop_string_parameters_round_trip(
            names in proptest::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 0..6),
            defaults in proptest::collection::vec("[ -~]{0,20}", 6),
        ) {
            let parameters: Vec<ParameterDefinition> = names
                .iter()
                .zip(&defaults)
                .map(|(name, default)| {
                    ParameterDefinition::new(name.clone(), ParameterKind::String)
                        .with_default_value(default.clone())
                })
                .collect();
            let mut properties = Element::new("properties");
            append_parameters_to_tree(&mut properties, &parameters);
            prop_assert_eq!(get_parameters_from_tree(&properties), parameters);
        }
    }
}
