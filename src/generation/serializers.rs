//! Grouping of consumed/produced media types into serializer families

use serde::Serialize;

use super::tables::MediaTables;
use crate::core::utils::{to_human_name_lower, to_pascal_case};

/// Which direction a serializer works in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerKind {
    Consumer,
    Producer,
}

/// One concrete MIME type of a family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializerEntry {
    pub media_type: String,
    /// Empty when no built-in implementation exists for the family
    pub implementation: String,
}

/// A logical media family, e.g. `json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializerGroup {
    pub name: String,
    pub class_name: String,
    pub human_class_name: String,
    pub app_name: String,
    pub receiver_name: String,
    /// First MIME type seen for the family
    pub media_type: String,
    pub implementation: String,
    pub all_serializers: Vec<SerializerEntry>,
}

/// Result of grouping one media type list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializerSelection {
    pub groups: Vec<SerializerGroup>,
    pub includes_json: bool,
    pub default_media_type: String,
}

/// Builds serializer groups
pub struct SerializerGroupBuilder<'a> {
    tables: &'a MediaTables,
    app_name: String,
    receiver_name: String,
}

impl<'a> SerializerGroupBuilder<'a> {
    pub fn new(
        tables: &'a MediaTables,
        app_name: impl Into<String>,
        receiver_name: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            app_name: app_name.into(),
            receiver_name: receiver_name.into(),
        }
    }

    /// Group `media_types` by logical name, dropping unknown types
    ///
    /// The default is the JSON media type when JSON is in the list and the
    /// first raw entry otherwise.
    pub fn build(&self, media_types: &[String], kind: SerializerKind) -> SerializerSelection {
        let known = match kind {
            SerializerKind::Consumer => &self.tables.consumers,
            SerializerKind::Producer => &self.tables.producers,
        };

        let mut groups: Vec<SerializerGroup> = Vec::new();
        let mut includes_json = false;

        for media_type in media_types {
            let Some(logical) = self.tables.logical_name(media_type) else {
                tracing::debug!(media_type = %media_type, "no serializer family for media type");
                continue;
            };
            if logical == "json" {
                includes_json = true;
            }

            let implementation = known.get(logical).cloned().unwrap_or_default();
            let entry = SerializerEntry {
                media_type: media_type.clone(),
                implementation: implementation.clone(),
            };

            match groups.iter_mut().find(|g| g.name == logical) {
                Some(group) => {
                    if !group
                        .all_serializers
                        .iter()
                        .any(|e| e.media_type == entry.media_type)
                    {
                        group.all_serializers.push(entry);
                    }
                }
                None => groups.push(SerializerGroup {
                    name: logical.to_string(),
                    class_name: to_pascal_case(logical),
                    human_class_name: to_human_name_lower(logical),
                    app_name: self.app_name.clone(),
                    receiver_name: self.receiver_name.clone(),
                    media_type: media_type.clone(),
                    implementation,
                    all_serializers: vec![entry],
                }),
            }
        }

        let default_media_type = match media_types.first() {
            Some(first) if !includes_json => first.clone(),
            _ => self.tables.json_media_type.clone(),
        };

        SerializerSelection {
            groups,
            includes_json,
            default_media_type,
        }
    }
}
