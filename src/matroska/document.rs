// Typed view over a parsed Matroska tree

use crate::ebml::ParsedNode;
use crate::error::ExtractError;

/// Timecode scale assumed when the segment info does not declare one
/// (nanoseconds per tick).
pub const DEFAULT_TIMECODE_SCALE: u64 = 1_000_000;

/// Track types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Video,
    Audio,
    Complex,
    Logo,
    Subtitle,
    Buttons,
    Control,
    Metadata,
    Unknown(u64),
}

impl TrackType {
    pub fn from_u64(value: u64) -> Self {
        match value {
            0x01 => TrackType::Video,
            0x02 => TrackType::Audio,
            0x03 => TrackType::Complex,
            0x10 => TrackType::Logo,
            0x11 => TrackType::Subtitle,
            0x12 => TrackType::Buttons,
            0x20 => TrackType::Control,
            0x21 => TrackType::Metadata,
            other => TrackType::Unknown(other),
        }
    }
}

/// Tag target levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Shot = 10,
    Scene = 20,
    Track = 30,
    Part = 40,
    Album = 50,
    Edition = 60,
    Collection = 70,
}

impl TargetType {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            10 => Some(TargetType::Shot),
            20 => Some(TargetType::Scene),
            30 => Some(TargetType::Track),
            40 => Some(TargetType::Part),
            50 => Some(TargetType::Album),
            60 => Some(TargetType::Edition),
            70 => Some(TargetType::Collection),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Shot => "shot",
            TargetType::Scene => "scene",
            TargetType::Track => "track",
            TargetType::Part => "part",
            TargetType::Album => "album",
            TargetType::Edition => "edition",
            TargetType::Collection => "collection",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatroskaDocument {
    pub ebml: EbmlHeader,
    pub segment: Option<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EbmlHeader {
    pub doc_type: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub info: Option<Info>,
    pub tracks: Option<Vec<Track>>,
    pub tags: Option<Vec<TagEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub timecode_scale: Option<u64>,
    /// Duration in ticks of `timecode_scale` nanoseconds
    pub duration: Option<f64>,
    /// Nanoseconds since 2001-01-01T00:00:00 UTC, negative before it
    pub date_utc: Option<i64>,
    pub title: Option<String>,
}

impl Info {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> Option<f64> {
        let scale = self.timecode_scale.unwrap_or(DEFAULT_TIMECODE_SCALE);
        self.duration
            .map(|ticks| ticks * scale as f64 / 1_000_000_000.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_type: TrackType,
    pub codec_id: String,
    pub audio: Option<AudioSettings>,
}

impl Track {
    /// Codec identifier without the `A_` prefix (`A_OPUS` becomes `OPUS`)
    pub fn codec_name(&self) -> &str {
        self.codec_id.strip_prefix("A_").unwrap_or(&self.codec_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSettings {
    pub sampling_frequency: Option<f64>,
    pub channels: Option<u64>,
    pub bit_depth: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTarget {
    pub target_type: Option<String>,
    pub target_type_value: Option<u64>,
}

impl TagTarget {
    /// Label used as the tag key prefix.
    ///
    /// A known numeric level wins over the explicit string, and a target
    /// with neither applies to the album.
    pub fn label(&self) -> String {
        if let Some(level) = self.target_type_value.and_then(TargetType::from_u64) {
            return level.as_str().to_string();
        }
        match &self.target_type {
            Some(name) => name.clone(),
            None => TargetType::Album.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTag {
    pub name: String,
    pub string: Option<String>,
    pub binary: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagEntry {
    pub target: TagTarget,
    pub simple_tags: Vec<SimpleTag>,
}

impl MatroskaDocument {
    /// Build the typed view from the generic tree.
    ///
    /// Only the EBML header is required; everything under the segment is
    /// optional and missing leaves come back as `None`.
    pub fn from_node(root: &ParsedNode) -> Result<Self, ExtractError> {
        let ebml = root.node("ebml").ok_or(ExtractError::MissingEbmlHeader)?;
        let doc_type = ebml.string("docType").unwrap_or("matroska").to_string();

        Ok(MatroskaDocument {
            ebml: EbmlHeader { doc_type },
            segment: root.node("segment").map(Segment::from_node),
        })
    }

    pub fn container(&self) -> String {
        format!("EBML/{}", self.ebml.doc_type)
    }
}

impl Segment {
    fn from_node(node: &ParsedNode) -> Self {
        Segment {
            info: node.node("info").map(Info::from_node),
            tracks: node
                .node("tracks")
                .map(|tracks| tracks.nodes("entries").map(Track::from_node).collect()),
            tags: node
                .node("tags")
                .map(|tags| tags.nodes("tag").map(TagEntry::from_node).collect()),
        }
    }
}

impl Info {
    fn from_node(node: &ParsedNode) -> Self {
        Info {
            timecode_scale: node.unsigned("timecodeScale"),
            duration: node.float("duration"),
            date_utc: node.unsigned("dateUTC").map(|bits| bits as i64),
            title: node.string("title").map(str::to_string),
        }
    }
}

impl Track {
    fn from_node(node: &ParsedNode) -> Self {
        Track {
            track_type: TrackType::from_u64(node.unsigned("trackType").unwrap_or(0)),
            codec_id: node.string("codecID").unwrap_or_default().to_string(),
            audio: node.node("audio").map(|audio| AudioSettings {
                sampling_frequency: audio.float("samplingFrequency"),
                channels: audio.unsigned("channels"),
                bit_depth: audio.unsigned("bitDepth"),
            }),
        }
    }
}

impl TagEntry {
    fn from_node(node: &ParsedNode) -> Self {
        let target = node
            .node("target")
            .map(|target| TagTarget {
                target_type: target.string("targetType").map(str::to_string),
                target_type_value: target.unsigned("targetTypeValue"),
            })
            .unwrap_or_default();

        TagEntry {
            target,
            simple_tags: node
                .nodes("simpleTags")
                .map(|tag| SimpleTag {
                    name: tag.string("name").unwrap_or_default().to_string(),
                    string: tag.string("string").map(str::to_string),
                    binary: tag.binary("binary").map(<[u8]>::to_vec),
                })
                .collect(),
        }
    }
}
