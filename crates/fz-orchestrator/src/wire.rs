// SPDX-License-Identifier: MIT OR Apache-2.0
//! Substitutes a payload into an endpoint's path/query/header/body and
//! produces the [`RequestSpec`] a transport sends on the wire.

use fz_contract::{Endpoint, HeaderMultiMap, Location, Parameter, PayloadValue};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters left unescaped in a path segment or query value beyond
/// alphanumerics; everything else (including all non-ASCII) is percent-encoded.
const ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'&')
    .add(b'=')
    .add(b'/');

/// A parameter paired with the value to substitute for it in one probe.
pub struct ParamValue<'a> {
    /// The parameter being substituted.
    pub parameter: &'a Parameter,
    /// The value to substitute.
    pub value: &'a PayloadValue,
}

/// Build the fully-substituted request for one probe.
///
/// `values` must contain every parameter on `endpoint`, each paired with
/// the value to send for it — the one under test carries the generated
/// payload; every other parameter carries a representative valid value so
/// only the parameter under test can provoke a finding.
#[must_use]
pub fn build_request(base_url: &str, endpoint: &Endpoint, values: &[ParamValue<'_>]) -> fz_contract::RequestSpec {
    let mut path = endpoint.path.clone();
    let mut query_pairs = Vec::new();
    let mut headers = HeaderMultiMap::new();
    let mut body_fields = Vec::new();

    for pv in values {
        match pv.parameter.location {
            Location::Path => {
                let placeholder = format!("{{{}}}", pv.parameter.name);
                let encoded = utf8_percent_encode(&pv.value.to_wire_string(), ENCODE_SET).to_string();
                path = path.replace(&placeholder, &encoded);
            }
            Location::Query => {
                query_pairs.push((pv.parameter.name.clone(), pv.value.to_wire_string()));
            }
            Location::Header => {
                headers.push(pv.parameter.name.clone(), pv.value.to_wire_string());
            }
            Location::Body => {
                body_fields.push((pv.parameter.name.clone(), pv.value.to_json()));
            }
        }
    }

    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);
    if !query_pairs.is_empty() {
        let query = query_pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, ENCODE_SET),
                    utf8_percent_encode(v, ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }

    let mut request = fz_contract::RequestSpec::new(endpoint.method, url).with_headers(headers);
    if !body_fields.is_empty() {
        request = request.with_body(serde_json::Value::Object(body_fields.into_iter().collect()));
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_contract::{Constraints, HttpMethod, TypeTag};

    fn path_param() -> Parameter {
        Parameter {
            name: "id".into(),
            location: Location::Path,
            type_tag: TypeTag::Id,
            required: true,
            constraints: Constraints::default(),
        }
    }

    fn query_param() -> Parameter {
        Parameter {
            name: "q".into(),
            location: Location::Query,
            type_tag: TypeTag::String,
            required: false,
            constraints: Constraints::default(),
        }
    }

    fn endpoint_with(path: &str, params: Vec<Parameter>) -> Endpoint {
        Endpoint {
            id: "ep".into(),
            path: path.into(),
            method: HttpMethod::Get,
            parameters: params,
            expected_schema: None,
            auth_role: None,
            baseline: None,
        }
    }

    #[test]
    fn substitutes_path_placeholder() {
        let id = path_param();
        let endpoint = endpoint_with("/api/users/{id}", vec![id.clone()]);
        let value = PayloadValue::Int(42);
        let values = [ParamValue {
            parameter: &id,
            value: &value,
        }];
        let req = build_request("https://target.test", &endpoint, &values);
        assert_eq!(req.url, "https://target.test/api/users/42");
    }

    #[test]
    fn percent_encodes_query_values() {
        let q = query_param();
        let endpoint = endpoint_with("/api/search", vec![q.clone()]);
        let value = PayloadValue::text("a b&c");
        let values = [ParamValue {
            parameter: &q,
            value: &value,
        }];
        let req = build_request("https://target.test", &endpoint, &values);
        assert!(req.url.contains("q=a%20b%26c"));
    }

    #[test]
    fn body_location_builds_json_object() {
        let field = Parameter {
            name: "content".into(),
            location: Location::Body,
            type_tag: TypeTag::String,
            required: true,
            constraints: Constraints::default(),
        };
        let endpoint = endpoint_with("/api/posts", vec![field.clone()]);
        let value = PayloadValue::text("<script>alert(1)</script>");
        let values = [ParamValue {
            parameter: &field,
            value: &value,
        }];
        let req = build_request("https://target.test", &endpoint, &values);
        let body = req.body.unwrap();
        assert_eq!(body["content"], "<script>alert(1)</script>");
    }

    #[test]
    fn header_location_is_attached() {
        let header = Parameter {
            name: "x-api-version".into(),
            location: Location::Header,
            type_tag: TypeTag::String,
            required: false,
            constraints: Constraints::default(),
        };
        let endpoint = endpoint_with("/api/ping", vec![header.clone()]);
        let value = PayloadValue::text("v1");
        let values = [ParamValue {
            parameter: &header,
            value: &value,
        }];
        let req = build_request("https://target.test", &endpoint, &values);
        assert_eq!(req.headers.get("x-api-version"), Some("v1"));
    }
}
