//! Schema tree used by the rewriter.
//!
//! The tree only names what the envelope rewrite needs to look at (object
//! properties, array items, references, primitive type/example/nullable).
//! Every other JSON-Schema keyword found in a document is carried in the
//! `extra` map of the node so that a schema read from a document and written
//! back keeps its content.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// JSON pointer prefix of schemas registered under `components.schemas`
pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// A node describing the shape of a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Named properties, each itself a schema
    Object(ObjectSchema),
    /// A single item schema
    Array(ArraySchema),
    /// Pointer to a globally registered named schema
    Reference(ReferenceSchema),
    /// Type tag, optional example, nullability
    Primitive(PrimitiveSchema),
}

/// Object schema with ordered properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub properties: Vec<(String, Schema)>,
    pub nullable: bool,
    pub extra: Map<String, JsonValue>,
}

/// Array schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    pub items: Option<Box<Schema>>,
    pub nullable: bool,
    pub extra: Map<String, JsonValue>,
}

/// `$ref` schema
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSchema {
    /// Full pointer, e.g. `#/components/schemas/Widget`
    pub reference: String,
    pub extra: Map<String, JsonValue>,
}

/// Primitive type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "string" => Some(PrimitiveType::String),
            "integer" => Some(PrimitiveType::Integer),
            "number" => Some(PrimitiveType::Number),
            "boolean" => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }
}

/// Primitive schema. A schema with no type tag at all is also represented
/// here (composition-only schemas, the nullable `page` placeholder).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveSchema {
    pub schema_type: Option<PrimitiveType>,
    pub example: Option<JsonValue>,
    pub nullable: bool,
    pub extra: Map<String, JsonValue>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, replacing an existing one with the same name in place
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = schema,
            None => self.properties.push((name, schema)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|(key, _)| key.as_str()).collect()
    }
}

impl ArraySchema {
    pub fn of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }
}

impl ReferenceSchema {
    /// Reference to a schema registered under `components.schemas`
    pub fn component(name: &str) -> Self {
        Self {
            reference: format!("{COMPONENTS_SCHEMAS_PREFIX}{name}"),
            extra: Map::new(),
        }
    }

    /// Registered name when the pointer targets `components.schemas`
    pub fn component_name(&self) -> Option<&str> {
        self.reference.strip_prefix(COMPONENTS_SCHEMAS_PREFIX)
    }
}

impl PrimitiveSchema {
    pub fn typed(schema_type: PrimitiveType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn integer() -> Self {
        Self::typed(PrimitiveType::Integer)
    }

    pub fn example(mut self, example: JsonValue) -> Self {
        self.example = Some(example);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}

impl From<ReferenceSchema> for Schema {
    fn from(schema: ReferenceSchema) -> Self {
        Schema::Reference(schema)
    }
}

impl From<PrimitiveSchema> for Schema {
    fn from(schema: PrimitiveSchema) -> Self {
        Schema::Primitive(schema)
    }
}

impl Schema {
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Schema::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Schema::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceSchema> {
        match self {
            Schema::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveSchema> {
        match self {
            Schema::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    /// Whether the node accepts `null`
    pub fn is_nullable(&self) -> bool {
        match self {
            Schema::Object(object) => object.nullable,
            Schema::Array(array) => array.nullable,
            Schema::Reference(_) => false,
            Schema::Primitive(primitive) => primitive.nullable,
        }
    }

    /// Parse a schema from its OpenAPI JSON form.
    ///
    /// Returns `None` for values that are not JSON objects (boolean schemas),
    /// which the rewriter treats like an absent schema.
    pub fn from_json(value: &JsonValue) -> Option<Schema> {
        let map = value.as_object()?;
        let mut extra = map.clone();

        if let Some(JsonValue::String(reference)) = map.get("$ref") {
            extra.remove("$ref");
            return Some(Schema::Reference(ReferenceSchema {
                reference: reference.clone(),
                extra,
            }));
        }

        let nullable = take_nullable(&mut extra);
        let type_tag = map.get("type").and_then(JsonValue::as_str);

        let is_array = match type_tag {
            Some(tag) => tag == "array",
            None => map.contains_key("items"),
        };
        if is_array {
            if type_tag.is_some() {
                extra.remove("type");
            }
            let items = extra
                .remove("items")
                .map(|items| match Schema::from_json(&items) {
                    Some(schema) => Ok(Box::new(schema)),
                    None => Err(items),
                });
            let items = match items {
                Some(Ok(schema)) => Some(schema),
                Some(Err(raw)) => {
                    extra.insert("items".to_string(), raw);
                    None
                }
                None => None,
            };
            return Some(Schema::Array(ArraySchema {
                items,
                nullable,
                extra,
            }));
        }

        let is_object = match type_tag {
            Some(tag) => tag == "object",
            None => map.contains_key("properties"),
        };
        if is_object {
            if type_tag.is_some() {
                extra.remove("type");
            }
            let mut properties = Vec::new();
            if let Some(JsonValue::Object(props)) = map.get("properties") {
                let parsed: Option<Vec<_>> = props
                    .iter()
                    .map(|(name, value)| Schema::from_json(value).map(|s| (name.clone(), s)))
                    .collect();
                if let Some(parsed) = parsed {
                    extra.remove("properties");
                    properties = parsed;
                }
            }
            return Some(Schema::Object(ObjectSchema {
                properties,
                nullable,
                extra,
            }));
        }

        let schema_type = type_tag.and_then(PrimitiveType::parse);
        if schema_type.is_some() {
            extra.remove("type");
        }
        let example = extra.remove("example");
        Some(Schema::Primitive(PrimitiveSchema {
            schema_type,
            example,
            nullable,
            extra,
        }))
    }

    /// Render the schema in its OpenAPI JSON form
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        match self {
            Schema::Object(object) => {
                put_type(&mut map, &object.extra, "object");
                if !object.properties.is_empty() {
                    let properties = object
                        .properties
                        .iter()
                        .map(|(name, schema)| (name.clone(), schema.to_json()))
                        .collect();
                    map.insert("properties".to_string(), JsonValue::Object(properties));
                }
                put_nullable(&mut map, object.nullable);
                map.extend(object.extra.clone());
            }
            Schema::Array(array) => {
                put_type(&mut map, &array.extra, "array");
                if let Some(items) = &array.items {
                    map.insert("items".to_string(), items.to_json());
                }
                put_nullable(&mut map, array.nullable);
                map.extend(array.extra.clone());
            }
            Schema::Reference(reference) => {
                map.insert(
                    "$ref".to_string(),
                    JsonValue::from(reference.reference.clone()),
                );
                map.extend(reference.extra.clone());
            }
            Schema::Primitive(primitive) => {
                if let Some(schema_type) = primitive.schema_type {
                    map.insert("type".to_string(), JsonValue::from(schema_type.as_str()));
                }
                put_nullable(&mut map, primitive.nullable);
                if let Some(example) = &primitive.example {
                    map.insert("example".to_string(), example.clone());
                }
                map.extend(primitive.extra.clone());
            }
        }
        JsonValue::Object(map)
    }
}

/// Only `nullable: true` is modelled; any other value stays in `extra`.
fn take_nullable(extra: &mut Map<String, JsonValue>) -> bool {
    if extra.get("nullable") == Some(&JsonValue::Bool(true)) {
        extra.remove("nullable");
        true
    } else {
        false
    }
}

/// A `type` kept in `extra` (a JSON-Schema type list) wins over the tag.
fn put_type(map: &mut Map<String, JsonValue>, extra: &Map<String, JsonValue>, tag: &str) {
    let schema_type = extra
        .get("type")
        .cloned()
        .unwrap_or_else(|| JsonValue::from(tag));
    map.insert("type".to_string(), schema_type);
}

fn put_nullable(map: &mut Map<String, JsonValue>, nullable: bool) {
    if nullable {
        map.insert("nullable".to_string(), JsonValue::Bool(true));
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_reference() {
        let schema = Schema::from_json(&json!({"$ref": "#/components/schemas/Widget"})).unwrap();
        let reference = schema.as_reference().unwrap();
        assert_eq!(reference.component_name(), Some("Widget"));
    }

    #[test]
    fn test_parse_object_keeps_property_order_and_extras() {
        let value = json!({
            "type": "object",
            "required": ["id"],
            "description": "Company",
            "properties": {
                "name": {"type": "string", "example": "Acme"},
                "id": {"type": "integer", "format": "int64"}
            }
        });
        let schema = Schema::from_json(&value).unwrap();
        let object = schema.as_object().unwrap();

        assert_eq!(object.property_names(), vec!["name", "id"]);
        assert_eq!(object.extra.get("required"), Some(&json!(["id"])));

        let id = object.get("id").unwrap().as_primitive().unwrap();
        assert_eq!(id.schema_type, Some(PrimitiveType::Integer));
        assert_eq!(id.extra.get("format"), Some(&json!("int64")));

        let name = object.get("name").unwrap().as_primitive().unwrap();
        assert_eq!(name.example, Some(json!("Acme")));
    }

    #[test]
    fn test_parse_untyped_array_and_object() {
        let array = Schema::from_json(&json!({"items": {"type": "string"}})).unwrap();
        assert!(array.as_array().is_some());

        let object = Schema::from_json(&json!({"properties": {}})).unwrap();
        assert!(object.as_object().is_some());
    }

    #[test]
    fn test_composition_schema_is_untyped_primitive() {
        let value = json!({"oneOf": [{"type": "string"}, {"type": "integer"}]});
        let schema = Schema::from_json(&value).unwrap();
        let primitive = schema.as_primitive().unwrap();
        assert_eq!(primitive.schema_type, None);
        assert_eq!(schema.to_json(), value);
    }

    #[test]
    fn test_boolean_schema_is_not_parsed() {
        assert!(Schema::from_json(&json!(true)).is_none());
    }

    #[test]
    fn test_nullable_false_is_preserved() {
        let value = json!({"type": "string", "nullable": false});
        let schema = Schema::from_json(&value).unwrap();
        assert!(!schema.is_nullable());
        assert_eq!(schema.to_json(), value);
    }

    #[test]
    fn test_document_schema_survives_round_trip() {
        let value = json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer", "format": "int64", "example": 1},
                "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}},
                "address": {"type": "string", "nullable": true}
            },
            "required": ["id"]
        });
        let schema = Schema::from_json(&value).unwrap();
        assert_eq!(schema.to_json(), value);
    }

    #[test]
    fn test_type_list_survives_round_trip() {
        let object = json!({
            "type": ["object", "null"],
            "properties": {"id": {"type": "integer"}}
        });
        let schema = Schema::from_json(&object).unwrap();
        assert!(schema.as_object().is_some());
        assert_eq!(schema.to_json(), object);

        let array = json!({
            "type": ["array", "null"],
            "items": {"$ref": "#/components/schemas/Tag"}
        });
        let schema = Schema::from_json(&array).unwrap();
        assert!(schema.as_array().is_some());
        assert_eq!(schema.to_json(), array);
    }

    #[test]
    fn test_placeholder_renders_without_type() {
        let placeholder: Schema = PrimitiveSchema::default().nullable(true).into();
        assert_eq!(placeholder.to_json(), json!({"nullable": true}));
    }

    #[test]
    fn test_object_property_replaces_in_place() {
        let object = ObjectSchema::new()
            .property("a", PrimitiveSchema::integer().into())
            .property("b", PrimitiveSchema::integer().into())
            .property("a", PrimitiveSchema::typed(PrimitiveType::String).into());
        assert_eq!(object.property_names(), vec!["a", "b"]);
        assert_eq!(
            object.get("a").unwrap().as_primitive().unwrap().schema_type,
            Some(PrimitiveType::String)
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let schema: Schema = ArraySchema::of(ReferenceSchema::component("Widget").into()).into();
        let serialized = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            serialized,
            json!({"type": "array", "items": {"$ref": "#/components/schemas/Widget"}})
        );
    }
}
