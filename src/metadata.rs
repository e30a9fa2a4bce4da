// Metadata sink and the default collecting implementation

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Serialize, Serializer};

use crate::field_mapping::{FieldMappings, StandardField, ValueConverter};

/// Tag namespace used for Matroska tags.
pub const MATROSKA_NAMESPACE: &str = "matroska";

/// Format (stream property) keys a parser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKey {
    Container,
    Duration,
    Codec,
    SampleRate,
    NumberOfChannels,
    BitsPerSample,
    CreationTime,
}

impl FormatKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKey::Container => "container",
            FormatKey::Duration => "duration",
            FormatKey::Codec => "codec",
            FormatKey::SampleRate => "sampleRate",
            FormatKey::NumberOfChannels => "numberOfChannels",
            FormatKey::BitsPerSample => "bitsPerSample",
            FormatKey::CreationTime => "creationTime",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    Text(String),
    Float(f64),
    Unsigned(u64),
}

impl FormatValue {
    fn into_text(self) -> String {
        match self {
            FormatValue::Text(s) => s,
            FormatValue::Float(f) => f.to_string(),
            FormatValue::Unsigned(u) => u.to_string(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FormatValue::Float(f) => Some(*f),
            FormatValue::Unsigned(u) => Some(*u as f64),
            FormatValue::Text(_) => None,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            FormatValue::Unsigned(u) => u32::try_from(*u).ok(),
            _ => None,
        }
    }
}

/// Tag value: text, or raw bytes when the tag carries binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Binary(Vec<u8>),
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Text(text) => serializer.serialize_str(text),
            TagValue::Binary(data) => serializer.serialize_str(&BASE64.encode(data)),
        }
    }
}

/// Receiver of extracted metadata.
pub trait MetadataSink {
    fn set_format(&mut self, key: FormatKey, value: FormatValue);
    fn add_tag(&mut self, namespace: &str, id: &str, value: TagValue);
}

/// Stream properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_sample: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
}

/// Native tag as found in the file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeTag {
    pub id: String,
    pub value: TagValue,
}

/// Tags mapped onto standard fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub albumartist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encodedby: Option<String>,
}

impl CommonTags {
    fn slot(&mut self, field: StandardField) -> &mut Option<String> {
        match field {
            StandardField::Title => &mut self.title,
            StandardField::Artist => &mut self.artist,
            StandardField::AlbumArtist => &mut self.albumartist,
            StandardField::Album => &mut self.album,
            StandardField::Date => &mut self.date,
            StandardField::Track => &mut self.track,
            StandardField::Disc => &mut self.disc,
            StandardField::Genre => &mut self.genre,
            StandardField::Comment => &mut self.comment,
            StandardField::Label => &mut self.label,
            StandardField::EncodedBy => &mut self.encodedby,
        }
    }

    pub fn get(&self, field: StandardField) -> Option<&str> {
        let value = match field {
            StandardField::Title => &self.title,
            StandardField::Artist => &self.artist,
            StandardField::AlbumArtist => &self.albumartist,
            StandardField::Album => &self.album,
            StandardField::Date => &self.date,
            StandardField::Track => &self.track,
            StandardField::Disc => &self.disc,
            StandardField::Genre => &self.genre,
            StandardField::Comment => &self.comment,
            StandardField::Label => &self.label,
            StandardField::EncodedBy => &self.encodedby,
        };
        value.as_deref()
    }

    /// Set `field` unless it already has a value.
    pub fn set(&mut self, field: StandardField, value: &str) {
        let value = match field {
            StandardField::Track | StandardField::Disc => ValueConverter::normalize_position(value),
            _ => value.to_string(),
        };

        if field == StandardField::Date && self.year.is_none() {
            self.year = Some(ValueConverter::normalize_year(&value));
        }

        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// Audio metadata structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub format: Format,
    /// Tags per namespace, in the order they were reported
    pub native: BTreeMap<String, Vec<NativeTag>>,
    pub common: CommonTags,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata::default()
    }

    /// Native tags of `namespace` with key `id`.
    pub fn tags<'a>(&'a self, namespace: &str, id: &'a str) -> impl Iterator<Item = &'a TagValue> + 'a {
        self.native
            .get(namespace)
            .into_iter()
            .flatten()
            .filter(move |tag| tag.id == id)
            .map(|tag| &tag.value)
    }
}

impl MetadataSink for Metadata {
    fn set_format(&mut self, key: FormatKey, value: FormatValue) {
        let format = &mut self.format;
        match key {
            FormatKey::Container => format.container = Some(value.into_text()),
            FormatKey::Duration => format.duration = value.as_f64(),
            FormatKey::Codec => format.codec = Some(value.into_text()),
            FormatKey::SampleRate => format.sample_rate = value.as_f64(),
            FormatKey::NumberOfChannels => format.number_of_channels = value.as_u32(),
            FormatKey::BitsPerSample => format.bits_per_sample = value.as_u32(),
            FormatKey::CreationTime => format.creation_time = Some(value.into_text()),
        }
    }

    fn add_tag(&mut self, namespace: &str, id: &str, value: TagValue) {
        if namespace == MATROSKA_NAMESPACE {
            if let (Some(field), TagValue::Text(text)) = (FieldMappings::from_matroska(id), &value) {
                self.common.set(field, text);
            }
        }

        self.native
            .entry(namespace.to_string())
            .or_default()
            .push(NativeTag {
                id: id.to_string(),
                value,
            });
    }
}
