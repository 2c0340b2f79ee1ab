//! Recursive schema rendering.
//!
//! A schema becomes a nested Markdown bullet list. Recursion is bounded by a depth budget
//! that every nested call decrements by one, which keeps self-referential schemas (a `Node`
//! whose `children` are `Node`s) finite without tracking visited schemas.

use crate::formatter::{format_constraints, format_enum, format_type, sorted_entries, ValueDisplay};
use crate::markdown::{self, deprecated_marker, required_marker};
use crate::model::{Components, Composition, ReferenceOr, Schema};
use log::debug;
use std::collections::HashSet;

/// Depth budget for a top-level schema rendering
pub const MAX_RECURSION_DEPTH: usize = 20;

/// Renders schemas into indented Markdown, resolving `$ref`s through the document's
/// components.
pub struct SchemaRenderer<'a> {
    components: &'a Components,
}

impl<'a> SchemaRenderer<'a> {
    /// Create a new SchemaRenderer resolving references against `components`
    pub fn new(components: &'a Components) -> Self {
        Self { components }
    }

    /// Renders a schema slot that may be inline or a reference.
    pub fn render_ref(
        &self,
        schema: Option<&ReferenceOr<Schema>>,
        indent: usize,
        max_depth: usize,
    ) -> String {
        self.render(self.components.resolve_schema(schema), indent, max_depth)
    }

    /// Renders a schema at `indent` levels (two spaces each) with `max_depth` levels of
    /// nesting left.
    ///
    /// A composed schema (oneOf, anyOf, allOf, in that priority) is rendered only through its
    /// members. Otherwise the schema is rendered as an object, an array or a primitive,
    /// depending on its declared type.
    pub fn render(&self, schema: Option<&Schema>, indent: usize, max_depth: usize) -> String {
        let Some(schema) = schema else {
            return String::new();
        };

        let prefix = markdown::indent(indent);

        if max_depth == 0 {
            debug!("Schema depth budget exhausted at indent {}", indent);
            return format!("{}- *(max depth reached)*\n", prefix);
        }

        let mut result = String::new();

        if let Some((composition, members)) = schema.composition() {
            self.write_composition(&mut result, composition, members, &prefix, indent, max_depth);
        } else if schema.is_type("object") {
            self.write_object(&mut result, schema, &prefix, indent, max_depth);
        } else if schema.is_type("array") {
            self.write_array(&mut result, schema, &prefix, indent, max_depth);
        } else if !schema.types.is_empty() {
            write_primitive(&mut result, schema, &prefix);
        } else if !schema.enum_values.is_empty() {
            result.push_str(&format!(
                "{}- Allowed values: {}\n",
                prefix,
                format_enum(&schema.enum_values)
            ));
        }

        result
    }

    fn write_composition(
        &self,
        result: &mut String,
        composition: Composition,
        members: &[ReferenceOr<Schema>],
        prefix: &str,
        indent: usize,
        max_depth: usize,
    ) {
        debug!(
            "Rendering {} with {} members",
            composition.keyword(),
            members.len()
        );

        result.push_str(&format!(
            "{}- **{}** ({}):\n",
            prefix,
            composition.keyword(),
            composition.meaning()
        ));

        for (i, member) in members.iter().enumerate() {
            result.push_str(&format!(
                "{}  - {} {}:\n",
                prefix,
                composition.member_label(),
                i + 1
            ));
            result.push_str(&self.render_ref(Some(member), indent + 2, max_depth - 1));
        }
    }

    fn write_object(
        &self,
        result: &mut String,
        schema: &Schema,
        prefix: &str,
        indent: usize,
        max_depth: usize,
    ) {
        result.push_str(&format!("{}- Type: `object`\n", prefix));

        if schema.nullable {
            result.push_str(&format!("{}- Nullable: `true`\n", prefix));
        }

        if schema.properties.is_empty() {
            return;
        }

        result.push_str(&format!("{}- Properties:\n", prefix));

        let required: HashSet<&str> = schema.required.iter().map(String::as_str).collect();

        for (name, property) in sorted_entries(&schema.properties) {
            let Some(property) = self.components.resolve(property) else {
                continue;
            };

            result.push_str(&format!(
                "{}  - **{}**{}{}",
                prefix,
                name,
                required_marker(required.contains(name)),
                deprecated_marker(property.deprecated)
            ));
            match markdown::non_empty(property.description.as_ref()) {
                Some(description) => result.push_str(&format!(": {}\n", description)),
                None => result.push('\n'),
            }

            write_inline_details(result, property, &format!("{}    ", prefix), true);

            // Nested objects and array items
            if property.is_type("object") && !property.properties.is_empty() {
                result.push_str(&self.render(Some(property), indent + 2, max_depth - 1));
            }
            if property.is_type("array") {
                if let Some(items) = self.components.resolve_schema(property.items.as_deref()) {
                    result.push_str(&format!("{}    - Items:\n", prefix));
                    result.push_str(&self.render(Some(items), indent + 3, max_depth - 1));
                }
            }
        }
    }

    fn write_array(
        &self,
        result: &mut String,
        schema: &Schema,
        prefix: &str,
        indent: usize,
        max_depth: usize,
    ) {
        result.push_str(&format!("{}- Type: `array`\n", prefix));

        if schema.nullable {
            result.push_str(&format!("{}- Nullable: `true`\n", prefix));
        }

        let constraints = format_constraints(Some(schema));
        if !constraints.is_empty() {
            result.push_str(&format!("{}- Constraints: {}\n", prefix, constraints));
        }

        if let Some(items) = self.components.resolve_schema(schema.items.as_deref()) {
            result.push_str(&format!("{}- Items:\n", prefix));
            result.push_str(&self.render(Some(items), indent + 1, max_depth - 1));
        }
    }
}

/// Inline (non-recursive) details of a schema: type, format, default, example, optionally
/// nullability, constraints and allowed values. Used for object properties and parameters.
pub(crate) fn write_inline_details(
    result: &mut String,
    schema: &Schema,
    prefix: &str,
    include_nullable: bool,
) {
    result.push_str(&format!("{}- Type: `{}`\n", prefix, format_type(Some(schema))));

    if let Some(format) = markdown::non_empty(schema.format.as_ref()) {
        result.push_str(&format!("{}- Format: `{}`\n", prefix, format));
    }
    if let Some(default) = &schema.default {
        result.push_str(&format!("{}- Default: `{}`\n", prefix, ValueDisplay(default)));
    }
    if let Some(example) = &schema.example {
        result.push_str(&format!("{}- Example: `{}`\n", prefix, ValueDisplay(example)));
    }
    if include_nullable && schema.nullable {
        result.push_str(&format!("{}- Nullable: `true`\n", prefix));
    }

    let constraints = format_constraints(Some(schema));
    if !constraints.is_empty() {
        result.push_str(&format!("{}- Constraints: {}\n", prefix, constraints));
    }

    if !schema.enum_values.is_empty() {
        result.push_str(&format!(
            "{}- Allowed values: {}\n",
            prefix,
            format_enum(&schema.enum_values)
        ));
    }
}

fn write_primitive(result: &mut String, schema: &Schema, prefix: &str) {
    result.push_str(&format!("{}- Type: `{}`\n", prefix, format_type(Some(schema))));

    if let Some(format) = markdown::non_empty(schema.format.as_ref()) {
        result.push_str(&format!("{}- Format: `{}`\n", prefix, format));
    }
    if schema.nullable {
        result.push_str(&format!("{}- Nullable: `true`\n", prefix));
    }
    if let Some(default) = &schema.default {
        result.push_str(&format!("{}- Default: `{}`\n", prefix, ValueDisplay(default)));
    }
    if let Some(example) = &schema.example {
        result.push_str(&format!("{}- Example: `{}`\n", prefix, ValueDisplay(example)));
    }

    let constraints = format_constraints(Some(schema));
    if !constraints.is_empty() {
        result.push_str(&format!("{}- Constraints: {}\n", prefix, constraints));
    }

    if !schema.enum_values.is_empty() {
        result.push_str(&format!(
            "{}- Allowed values: {}\n",
            prefix,
            format_enum(&schema.enum_values)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExclusiveBound;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Schema {
        Schema {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema.into()))
                .collect(),
            required: required.iter().map(|r| r.to_string()).collect(),
            ..Schema::typed("object")
        }
    }

    fn render(schema: &Schema) -> String {
        let components = Components::default();
        SchemaRenderer::new(&components).render(Some(schema), 0, MAX_RECURSION_DEPTH)
    }

    /// Object nested `levels` deep through a property named `child`, ending in a string.
    fn nested_object(levels: usize) -> Schema {
        let mut schema = Schema::typed("string");
        for _ in 0..levels {
            schema = object(vec![("child", schema)], &[]);
        }
        schema
    }

    #[test]
    fn test_absent_schema_renders_nothing() {
        let components = Components::default();
        let renderer = SchemaRenderer::new(&components);
        assert_eq!(renderer.render(None, 0, MAX_RECURSION_DEPTH), "");
        assert_eq!(renderer.render_ref(None, 0, MAX_RECURSION_DEPTH), "");
    }

    #[test]
    fn test_zero_depth_budget() {
        let components = Components::default();
        let renderer = SchemaRenderer::new(&components);
        assert_eq!(
            renderer.render(Some(&Schema::typed("string")), 2, 0),
            "    - *(max depth reached)*\n"
        );
    }

    #[test]
    fn test_primitive_schema() {
        let schema = Schema {
            format: Some("email".to_string()),
            nullable: true,
            default: Some(json!("a@example.com")),
            example: Some(json!("b@example.com")),
            max_length: Some(254),
            ..Schema::typed("string")
        };

        assert_eq!(
            render(&schema),
            "- Type: `string`\n\
             - Format: `email`\n\
             - Nullable: `true`\n\
             - Default: `a@example.com`\n\
             - Example: `b@example.com`\n\
             - Constraints: maxLength: 254\n"
        );
    }

    #[test]
    fn test_primitive_enum() {
        let schema = Schema {
            enum_values: vec![json!("asc"), json!("desc")],
            ..Schema::typed("string")
        };
        assert_eq!(
            render(&schema),
            "- Type: `string`\n- Allowed values: [asc desc]\n"
        );
    }

    #[test]
    fn test_multiple_types() {
        let schema = Schema {
            types: vec!["integer".to_string(), "null".to_string()],
            ..Default::default()
        };
        assert_eq!(render(&schema), "- Type: `integer | null`\n");
    }

    #[test]
    fn test_untyped_schema() {
        assert_eq!(render(&Schema::default()), "");

        let enum_only = Schema {
            enum_values: vec![json!(1), json!(2)],
            ..Default::default()
        };
        assert_eq!(render(&enum_only), "- Allowed values: [1 2]\n");
    }

    #[test]
    fn test_object_schema() {
        let schema = object(
            vec![
                ("name", Schema::typed("string")),
                ("id", Schema::typed("string")),
            ],
            &["id"],
        );

        assert_eq!(
            render(&schema),
            "- Type: `object`\n\
             - Properties:\n  \
               - **id** **(required)**\n    \
                 - Type: `string`\n  \
               - **name**\n    \
                 - Type: `string`\n"
        );
    }

    #[test]
    fn test_object_without_properties() {
        let schema = Schema {
            nullable: true,
            ..Schema::typed("object")
        };
        assert_eq!(render(&schema), "- Type: `object`\n- Nullable: `true`\n");
    }

    #[test]
    fn test_property_details() {
        let status = Schema {
            description: Some("Lifecycle state".to_string()),
            deprecated: true,
            default: Some(json!("active")),
            example: Some(json!("closed")),
            nullable: true,
            min_length: Some(1),
            enum_values: vec![json!("active"), json!("closed")],
            ..Schema::typed("string")
        };
        let count = Schema {
            format: Some("int32".to_string()),
            minimum: Some(0.0),
            exclusive_minimum: Some(ExclusiveBound::Flag(true)),
            ..Schema::typed("integer")
        };
        let schema = object(vec![("status", status), ("count", count)], &["status"]);

        assert_eq!(
            render(&schema),
            "- Type: `object`\n\
             - Properties:\n  \
               - **count**\n    \
                 - Type: `integer`\n    \
                 - Format: `int32`\n    \
                 - Constraints: min: 0 (exclusive)\n  \
               - **status** **(required)** ⚠️ *deprecated*: Lifecycle state\n    \
                 - Type: `string`\n    \
                 - Default: `active`\n    \
                 - Example: `closed`\n    \
                 - Nullable: `true`\n    \
                 - Constraints: minLength: 1\n    \
                 - Allowed values: [active closed]\n"
        );
    }

    #[test]
    fn test_nested_object_and_array_properties() {
        let address = object(vec![("city", Schema::typed("string"))], &[]);
        let tags = Schema {
            items: Some(Box::new(Schema::typed("string").into())),
            ..Schema::typed("array")
        };
        let schema = object(vec![("address", address), ("tags", tags)], &[]);

        assert_eq!(
            render(&schema),
            "- Type: `object`\n\
             - Properties:\n  \
               - **address**\n    \
                 - Type: `object`\n    \
                 - Type: `object`\n    \
                 - Properties:\n      \
                   - **city**\n        \
                     - Type: `string`\n  \
               - **tags**\n    \
                 - Type: `array`\n    \
                 - Items:\n      \
                   - Type: `string`\n"
        );
    }

    #[test]
    fn test_array_schema() {
        let schema = Schema {
            min_items: Some(1),
            unique_items: true,
            items: Some(Box::new(Schema::typed("integer").into())),
            ..Schema::typed("array")
        };

        assert_eq!(
            render(&schema),
            "- Type: `array`\n\
             - Constraints: minItems: 1, uniqueItems: true\n\
             - Items:\n  \
               - Type: `integer`\n"
        );
    }

    #[test]
    fn test_one_of_composition() {
        let schema = Schema {
            one_of: vec![Schema::typed("string").into(), Schema::typed("integer").into()],
            ..Default::default()
        };

        assert_eq!(
            render(&schema),
            "- **oneOf** (one of the following):\n  \
               - Option 1:\n    \
                 - Type: `string`\n  \
               - Option 2:\n    \
                 - Type: `integer`\n"
        );
    }

    #[test]
    fn test_all_of_members_are_labelled_schemas() {
        let schema = Schema {
            all_of: vec![Schema::typed("object").into()],
            ..Default::default()
        };

        assert_eq!(
            render(&schema),
            "- **allOf** (all of the following):\n  \
               - Schema 1:\n    \
                 - Type: `object`\n"
        );
    }

    #[test]
    fn test_any_of_composition() {
        let schema = Schema {
            any_of: vec![Schema::typed("boolean").into()],
            ..Default::default()
        };
        let rendered = render(&schema);
        assert!(rendered.starts_with("- **anyOf** (any of the following):\n"));
        assert!(rendered.contains("  - Option 1:\n"));
    }

    #[test]
    fn test_one_of_wins_over_all_of() {
        let schema = Schema {
            one_of: vec![Schema::typed("string").into()],
            all_of: vec![Schema::typed("integer").into()],
            ..Schema::typed("object")
        };

        let rendered = render(&schema);
        assert!(rendered.contains("**oneOf**"));
        assert!(!rendered.contains("**allOf**"));
        assert!(!rendered.contains("integer"));
        assert!(!rendered.contains("Type: `object`"));
    }

    #[test]
    fn test_depth_bound_on_deep_nesting() {
        let schema = nested_object(25);
        let rendered = render(&schema);

        assert_eq!(rendered.matches("*(max depth reached)*").count(), 1);

        // Twenty object levels are rendered, each one two indentation levels deeper
        let marker = format!("{}- *(max depth reached)*\n", markdown::indent(40));
        assert!(rendered.ends_with(&marker));
        let object_levels = rendered
            .lines()
            .filter(|line| line.trim_start() == "- Properties:")
            .count();
        assert_eq!(object_levels, 20);
    }

    #[test]
    fn test_shallow_nesting_is_not_truncated() {
        let rendered = render(&nested_object(5));
        assert!(!rendered.contains("max depth reached"));
        assert!(rendered.contains("- Type: `string`"));
    }

    #[test]
    fn test_self_referencing_schema_terminates() {
        let mut components = Components::default();
        let node = Schema {
            properties: [
                ("value".to_string(), ReferenceOr::Item(Schema::typed("string"))),
                (
                    "next".to_string(),
                    ReferenceOr::<Schema>::reference("#/components/schemas/Node"),
                ),
            ]
            .into_iter()
            .collect(),
            ..Schema::typed("object")
        };
        components.schemas.insert("Node".to_string(), node.into());

        let renderer = SchemaRenderer::new(&components);
        let root = ReferenceOr::<Schema>::reference("#/components/schemas/Node");
        let rendered = renderer.render_ref(Some(&root), 0, MAX_RECURSION_DEPTH);

        assert_eq!(rendered.matches("*(max depth reached)*").count(), 1);
        assert_eq!(rendered.matches("- **next**").count(), 20);
    }

    #[test]
    fn test_referenced_items_and_members() {
        let mut components = Components::default();
        components
            .schemas
            .insert("Tag".to_string(), Schema::typed("string").into());

        let schema = Schema {
            items: Some(Box::new(ReferenceOr::reference("#/components/schemas/Tag"))),
            ..Schema::typed("array")
        };
        let renderer = SchemaRenderer::new(&components);
        assert_eq!(
            renderer.render(Some(&schema), 0, MAX_RECURSION_DEPTH),
            "- Type: `array`\n- Items:\n  - Type: `string`\n"
        );

        let dangling = Schema {
            one_of: vec![ReferenceOr::reference("#/components/schemas/Missing")],
            ..Default::default()
        };
        assert_eq!(
            renderer.render(Some(&dangling), 0, MAX_RECURSION_DEPTH),
            "- **oneOf** (one of the following):\n  - Option 1:\n"
        );
    }

    #[test]
    fn test_unresolved_property_is_skipped() {
        let schema = Schema {
            properties: [(
                "ghost".to_string(),
                ReferenceOr::<Schema>::reference("#/components/schemas/Ghost"),
            )]
            .into_iter()
            .collect(),
            ..Schema::typed("object")
        };
        assert_eq!(render(&schema), "- Type: `object`\n- Properties:\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let names = ["zeta", "alpha", "mid", "beta", "omega", "gamma", "delta"];
        let forward = object(names.iter().map(|n| (*n, Schema::typed("string"))).collect(), &[]);
        let backward = object(
            names.iter().rev().map(|n| (*n, Schema::typed("string"))).collect(),
            &[],
        );

        let first = render(&forward);
        assert_eq!(first, render(&backward));
        assert_eq!(first, render(&forward.clone()));

        let alpha = first.find("**alpha**").unwrap();
        let zeta = first.find("**zeta**").unwrap();
        assert!(alpha < zeta);
    }
}
