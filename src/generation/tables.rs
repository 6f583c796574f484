//! Fixed lookup tables consulted by the model builder
//!
//! Tables are plain values built once per run and handed to the builders, so
//! tests can swap in alternate mappings without touching process state.

use std::collections::BTreeMap;

/// Swagger `type`/`format` to logical type mappings
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTables {
    /// Keyed by `type` or `type/format`; the more specific key wins
    pub primitives: BTreeMap<String, String>,
    /// String formats that need a conversion step, keyed by format
    pub formatters: BTreeMap<String, String>,
    /// String-to-value converter per logical type
    pub converters: BTreeMap<String, String>,
    /// Zero value literal per logical type
    pub zero_values: BTreeMap<String, String>,
    /// Logical names starting with this prefix are maps
    pub map_prefix: String,
    /// Logical name of an element whose type is unknown
    pub untyped: String,
    /// Logical name of an uploaded file
    pub file: String,
}

impl Default for TypeTables {
    fn default() -> Self {
        let primitives = [
            ("string", "String"),
            ("integer", "i64"),
            ("integer/int32", "i32"),
            ("integer/int64", "i64"),
            ("number", "f64"),
            ("number/float", "f32"),
            ("number/double", "f64"),
            ("boolean", "bool"),
        ];
        let formatters = [
            ("date", "Date"),
            ("date-time", "DateTime"),
            ("byte", "Base64"),
            ("uuid", "Uuid"),
            ("email", "Email"),
            ("uri", "Uri"),
            ("hostname", "Hostname"),
            ("ipv4", "IPv4"),
            ("ipv6", "IPv6"),
            ("duration", "Duration"),
            ("password", "Password"),
        ];
        let converters = [
            ("i32", "to_i32"),
            ("i64", "to_i64"),
            ("f32", "to_f32"),
            ("f64", "to_f64"),
            ("bool", "to_bool"),
        ];
        let zero_values = [
            ("String", "String::new()"),
            ("i32", "0"),
            ("i64", "0"),
            ("f32", "0.0"),
            ("f64", "0.0"),
            ("bool", "false"),
        ];

        Self {
            primitives: to_map(&primitives),
            formatters: to_map(&formatters),
            converters: to_map(&converters),
            zero_values: to_map(&zero_values),
            map_prefix: "HashMap".to_string(),
            untyped: "serde_json::Value".to_string(),
            file: "runtime::File".to_string(),
        }
    }
}

impl TypeTables {
    /// Logical primitive for a `type`/`format` pair
    pub fn primitive(&self, type_name: &str, format: Option<&str>) -> Option<&str> {
        format
            .and_then(|f| self.primitives.get(&format!("{type_name}/{f}")))
            .or_else(|| self.primitives.get(type_name))
            .map(String::as_str)
    }

    /// Logical formatted type for a string format
    pub fn formatter(&self, format: &str) -> Option<&str> {
        self.formatters.get(format).map(String::as_str)
    }

    pub fn is_primitive(&self, logical: &str) -> bool {
        self.primitives.values().any(|v| v == logical)
    }

    pub fn is_formatted(&self, logical: &str) -> bool {
        self.formatters.values().any(|v| v == logical)
    }

    pub fn is_map(&self, logical: &str) -> bool {
        logical.starts_with(&self.map_prefix)
    }

    pub fn converter(&self, logical: &str) -> Option<&str> {
        self.converters.get(logical).map(String::as_str)
    }

    pub fn zero_value(&self, logical: &str) -> Option<&str> {
        self.zero_values.get(logical).map(String::as_str)
    }
}

/// MIME type to serializer mappings
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTables {
    /// Normalized MIME type to logical media name
    pub names: BTreeMap<String, String>,
    /// Logical media name to response serializer
    pub producers: BTreeMap<String, String>,
    /// Logical media name to request deserializer
    pub consumers: BTreeMap<String, String>,
    /// Default media type when JSON is part of the required set
    pub json_media_type: String,
}

impl Default for MediaTables {
    fn default() -> Self {
        let names = [
            ("application/json", "json"),
            ("application/x-yaml", "yaml"),
            ("application/x-protobuf", "protobuf"),
            ("application/x-capnproto", "capnproto"),
            ("application/x-thrift", "thrift"),
            ("application/xml", "xml"),
            ("text/xml", "xml"),
            ("text/x-markdown", "markdown"),
            ("text/html", "html"),
            ("text/csv", "csv"),
            ("text/tsv", "tsv"),
            ("text/javascript", "js"),
            ("text/css", "css"),
        ];
        let producers = [
            ("json", "runtime::JsonProducer"),
            ("yaml", "runtime::YamlProducer"),
        ];
        let consumers = [
            ("json", "runtime::JsonConsumer"),
            ("yaml", "runtime::YamlConsumer"),
        ];

        Self {
            names: to_map(&names),
            producers: to_map(&producers),
            consumers: to_map(&consumers),
            json_media_type: "application/json".to_string(),
        }
    }
}

impl MediaTables {
    /// Logical name of a raw MIME type; parameters such as `;charset=utf-8` are ignored
    pub fn logical_name(&self, media_type: &str) -> Option<&str> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.names.get(&essence).map(String::as_str)
    }
}

fn to_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
