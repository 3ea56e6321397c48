//! End-to-end checks that the rewritten document describes what the
//! response wrapper actually sends.

use std::io::Write;
use std::sync::Arc;

use envelope_docs::application::{
    OpenApiLoader, RewriteDocumentRequest, RewriteDocumentUseCase, rewrite_document,
};
use envelope_docs::core::config::RewriteConfig;
use envelope_docs::envelope::{ApiResponse, Page, ResponseWrapper};
use envelope_docs::infrastructure::openapi::{FileOpenApiLoader, FileSystemDocumentOutput};
use envelope_docs::rewrite::{ReturnShape, SchemaName};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use tempfile::NamedTempFile;

const COMPANY_API: &str = r##"{
  "openapi": "3.0.1",
  "info": {"title": "Company REST API", "version": "v1.0.0"},
  "paths": {
    "/company/{id}": {
      "get": {
        "tags": ["Company"],
        "operationId": "getCompany",
        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}],
        "responses": {
          "200": {"description": "OK", "content": {"*/*": {"schema": {"$ref": "#/components/schemas/CompanyDTO"}}}}
        }
      }
    },
    "/company/list": {
      "get": {
        "tags": ["Company"],
        "operationId": "getCompanyList",
        "responses": {
          "200": {"description": "OK", "content": {"*/*": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/CompanyDTO"}}}}}
        }
      }
    },
    "/company/page": {
      "get": {
        "tags": ["Company"],
        "operationId": "getCompanyPage",
        "responses": {
          "200": {"description": "OK", "content": {"*/*": {"schema": {"$ref": "#/components/schemas/PageCompanyDTO"}}}}
        }
      }
    }
  },
  "components": {
    "schemas": {
      "CompanyDTO": {
        "required": ["id", "name"],
        "type": "object",
        "properties": {
          "id": {"type": "integer", "format": "int64", "example": 1},
          "name": {"type": "string", "example": "Acme"},
          "address": {"type": "string", "example": "Main Street 1"}
        }
      },
      "PageCompanyDTO": {
        "type": "object",
        "properties": {
          "totalElements": {"type": "integer", "format": "int64"},
          "totalPages": {"type": "integer", "format": "int32"},
          "size": {"type": "integer", "format": "int32"},
          "content": {"type": "array", "items": {"$ref": "#/components/schemas/CompanyDTO"}},
          "number": {"type": "integer", "format": "int32"}
        }
      }
    }
  }
}"##;

const MANIFEST: &str = r#"
[operations.getCompanyList]
kind = "collection"
element = "CompanyDTO"

[operations.getCompanyPage]
kind = "paginated"
element = "org.example.dto.CompanyDTO"
"#;

#[derive(Debug, Clone, Serialize)]
struct CompanyDto {
    id: i64,
    name: String,
    address: Option<String>,
}

impl SchemaName for CompanyDto {
    fn schema_name() -> String {
        "CompanyDTO".to_string()
    }
}

fn companies() -> Vec<CompanyDto> {
    (1..=3)
        .map(|id| CompanyDto {
            id,
            name: format!("Company {id}"),
            address: Some(format!("Street {id}")),
        })
        .collect()
}

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn response_schema(document: &JsonValue, path: &str) -> JsonValue {
    let pointer = format!(
        "/paths/{}/get/responses/200/content/*~1*/schema",
        path.replace('/', "~1")
    );
    document
        .pointer(&pointer)
        .cloned()
        .unwrap_or_else(|| panic!("no schema at {pointer}"))
}

fn sorted_keys(value: &JsonValue) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

async fn rewritten_company_api() -> JsonValue {
    let file = temp_file(".json", COMPANY_API);
    let mut document = FileOpenApiLoader::new()
        .load(file.path().to_str().unwrap())
        .await
        .unwrap();
    let config = RewriteConfig::from_toml(MANIFEST).unwrap();
    rewrite_document(&mut document, &config);
    document.into_json()
}

#[tokio::test]
async fn test_paginated_document_matches_wire_shape() {
    let document = rewritten_company_api().await;
    let schema = response_schema(&document, "/company/page");

    let wrapper = ResponseWrapper::default();
    let wire =
        serde_json::to_value(wrapper.wrap("/company/page", Page::new(companies(), 0, 5, 3))).unwrap();

    assert_eq!(sorted_keys(&schema["properties"]), sorted_keys(&wire));
    assert_eq!(schema["properties"]["data"]["type"], "array");
    assert_eq!(
        schema["properties"]["data"]["items"]["$ref"],
        "#/components/schemas/CompanyDTO"
    );
    assert_eq!(
        sorted_keys(&schema["properties"]["page"]["properties"]),
        sorted_keys(&wire["page"])
    );
    for (name, property) in schema["properties"]["page"]["properties"].as_object().unwrap() {
        assert_eq!(property["type"], "integer", "{name} should be an integer");
    }
    assert_eq!(wire["page"]["currentPage"], 1);
}

#[tokio::test]
async fn test_single_and_list_keep_original_data() {
    let document = rewritten_company_api().await;
    let original: JsonValue = serde_json::from_str(COMPANY_API).unwrap();

    for path in ["/company/{id}", "/company/list"] {
        let schema = response_schema(&document, path);
        assert_eq!(schema["properties"]["data"], response_schema(&original, path));
        assert_eq!(schema["properties"]["page"], json!({"nullable": true}));
    }

    let wrapper = ResponseWrapper::default();
    let wire = serde_json::to_value(wrapper.wrap("/company/list", companies())).unwrap();
    assert!(wire["data"].is_array());
}

#[tokio::test]
async fn test_components_are_untouched() {
    let document = rewritten_company_api().await;
    let original: JsonValue = serde_json::from_str(COMPANY_API).unwrap();
    assert_eq!(document["components"], original["components"]);
}

#[tokio::test]
async fn test_rewritten_document_is_valid_openapi() {
    let document = rewritten_company_api().await;
    let parsed: openapiv3::OpenAPI =
        serde_json::from_value(document).expect("rewritten document should be valid OpenAPI 3");
    assert_eq!(parsed.paths.paths.len(), 3);
}

#[test]
fn test_return_shapes_from_static_types() {
    assert!(<Page<CompanyDto> as ReturnShape>::return_type_info().is_paginated());
    assert_eq!(
        <Page<CompanyDto> as ReturnShape>::return_type_info().element_name(),
        Some("CompanyDTO")
    );
    assert!(<ApiResponse<CompanyDto> as ReturnShape>::return_type_info().is_envelope());
}

#[tokio::test]
async fn test_use_case_writes_yaml_output() {
    let input = temp_file(".json", COMPANY_API);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("openapi.yaml");

    let use_case = RewriteDocumentUseCase::new(
        Arc::new(FileOpenApiLoader::new()),
        Arc::new(FileSystemDocumentOutput::new()),
    );
    let summary = use_case
        .execute(RewriteDocumentRequest {
            source: input.path().to_str().unwrap().to_string(),
            target: target.to_str().unwrap().to_string(),
            config: RewriteConfig::from_toml(MANIFEST).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(summary.rewritten, 3);
    assert_eq!(summary.replaced_slots, 3);

    let written: JsonValue =
        serde_yaml::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    let schema = response_schema(&written, "/company/page");
    assert_eq!(schema["properties"]["page"]["properties"]["size"]["example"], 5);
}
