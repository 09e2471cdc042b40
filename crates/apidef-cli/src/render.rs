//! Documentation rendering
//!
//! Turns synthesized resource surfaces into Markdown reference pages, or
//! into JSON/YAML documents with sample requests embedded as structured
//! values.

use crate::cli::DocFormat;
use crate::error::Result;
use apidef_core::{Endpoint, HttpMethod, Property, ResourceSurface};
use serde::Serialize;
use serde_json::Value;

/// Serializable view of one resource and its endpoints
#[derive(Debug, Serialize)]
pub struct ResourceDocument<'a> {
    pub resource: ResourceSummary<'a>,
    pub endpoints: Vec<EndpointDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ResourceSummary<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub properties: &'a [Property],
}

#[derive(Debug, Serialize)]
pub struct EndpointDocument<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "<[Property]>::is_empty")]
    pub params: &'a [Property],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_request: Option<Value>,
}

/// Render surfaces in the requested format
pub fn render(format: DocFormat, surfaces: &[ResourceSurface<'_>]) -> Result<String> {
    match format {
        DocFormat::Markdown => markdown(surfaces),
        DocFormat::Json => {
            let mut out = serde_json::to_string_pretty(&documents(surfaces)?)?;
            out.push('\n');
            Ok(out)
        }
        DocFormat::Yaml => Ok(serde_yaml::to_string(&documents(surfaces)?)?),
    }
}

/// Build the serializable documents for every surface, in order
pub fn documents<'a>(surfaces: &'a [ResourceSurface<'a>]) -> Result<Vec<ResourceDocument<'a>>> {
    surfaces
        .iter()
        .map(|surface| {
            let endpoints = surface
                .endpoints
                .iter()
                .map(|endpoint| {
                    Ok(EndpointDocument {
                        name: &endpoint.name,
                        description: &endpoint.description,
                        method: endpoint.method,
                        path: format!("/{}", endpoint.path),
                        params: &endpoint.params,
                        sample_request: endpoint.sample_request_value()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(ResourceDocument {
                resource: ResourceSummary {
                    key: &surface.resource.key,
                    name: surface.resource.name(),
                    description: surface.resource.description(),
                    properties: surface.resource.properties(),
                },
                endpoints,
            })
        })
        .collect()
}

/// Markdown reference pages. Resources without endpoints are skipped.
pub fn markdown(surfaces: &[ResourceSurface<'_>]) -> Result<String> {
    let mut out = String::new();

    for surface in surfaces.iter().filter(|s| !s.endpoints.is_empty()) {
        let resource = surface.resource;
        out.push_str(&format!(
            "\n# {} ({})\n{}",
            resource.name(),
            resource.key,
            resource.description()
        ));

        if !resource.properties().is_empty() {
            out.push('\n');
        }
        for property in resource.properties() {
            write_property(&mut out, property);
        }

        for endpoint in &surface.endpoints {
            write_endpoint(&mut out, endpoint)?;
        }
    }

    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn write_property(out: &mut String, property: &Property) {
    out.push_str(&format!(
        "\n * **{}** *({})*: {}",
        property.id, property.property_type, property.description
    ));
    if let Some(values) = property.allowed_values() {
        out.push_str("\n\t * **Possible Values**:");
        for value in values {
            out.push_str(&format!("\n\t\t * {}", display_value(value)));
        }
    }
    if let Some(default) = &property.default {
        out.push_str(&format!("\n\t * **Default Value**: {}", display_value(default)));
    }
    if let Some(maximum) = property.maximum {
        out.push_str(&format!("\n\t * **Maximum Value**: {}", maximum));
    }
    if let Some(minimum) = property.minimum {
        out.push_str(&format!("\n\t * **Minimum Value**: {}", minimum));
    }
}

fn write_endpoint(out: &mut String, endpoint: &Endpoint) -> Result<()> {
    out.push_str(&format!(
        "\n\n## {}\n\n### Request\n\n{} /{}{}",
        endpoint.name,
        endpoint.method,
        endpoint.path,
        query_string(&endpoint.params)
    ));

    if let Some(sample) = endpoint.sample_request_value()? {
        let pretty = serde_json::to_string_pretty(&sample)?;
        out.push_str("\n\n\t");
        out.push_str(&pretty.replace('\n', "\n\t"));
    }
    Ok(())
}

/// Query string for the parameters a caller must supply; repeated ones appear three times
pub fn query_string(params: &[Property]) -> String {
    let mut pairs = Vec::new();
    for param in params.iter().filter(|p| p.default.is_none()) {
        let pair = format!("{}={{{}}}", param.id, param.property_type);
        let times = if param.repeated { 3 } else { 1 };
        pairs.extend(std::iter::repeat(pair).take(times));
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
