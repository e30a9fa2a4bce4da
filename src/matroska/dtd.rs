// Matroska element schema
//
// Subset of the Matroska/WebM element tree relevant to metadata. Anything
// not listed (clusters, cues, attachments, ...) is skipped by the parser in
// one step using its declared length.
//
// Reference:
// - https://www.matroska.org/technical/elements.html

use crate::ebml::{SchemaNode, SchemaTree, ValueType::*};

// `String` in the tables below is `ValueType::String`.

pub mod ids {
    pub const EBML: u64 = 0x1A45DFA3;
    pub const DOC_TYPE: u64 = 0x4282;
    pub const SEGMENT: u64 = 0x18538067;
    pub const INFO: u64 = 0x1549A966;
    pub const TIMECODE_SCALE: u64 = 0x2AD7B1;
    pub const DURATION: u64 = 0x4489;
    pub const DATE_UTC: u64 = 0x4461;
    pub const TITLE: u64 = 0x7BA9;
    pub const TRACKS: u64 = 0x1654AE6B;
    pub const TRACK_ENTRY: u64 = 0xAE;
    pub const TRACK_NUMBER: u64 = 0xD7;
    pub const TRACK_TYPE: u64 = 0x83;
    pub const CODEC_ID: u64 = 0x86;
    pub const AUDIO: u64 = 0xE1;
    pub const SAMPLING_FREQUENCY: u64 = 0xB5;
    pub const CHANNELS: u64 = 0x9F;
    pub const BIT_DEPTH: u64 = 0x6264;
    pub const TAGS: u64 = 0x1254C367;
    pub const TAG: u64 = 0x7373;
    pub const TARGETS: u64 = 0x63C0;
    pub const TARGET_TYPE_VALUE: u64 = 0x68CA;
    pub const TARGET_TYPE: u64 = 0x63CA;
    pub const SIMPLE_TAG: u64 = 0x67C8;
    pub const TAG_NAME: u64 = 0x45A3;
    pub const TAG_STRING: u64 = 0x4487;
    pub const TAG_BINARY: u64 = 0x4485;
    pub const CLUSTER: u64 = 0x1F43B675;
}

use ids::*;

const EBML_HEADER: &[SchemaNode] = &[
    SchemaNode::leaf(0x4286, "ebmlVersion", UnsignedInt),
    SchemaNode::leaf(0x42F7, "ebmlReadVersion", UnsignedInt),
    SchemaNode::leaf(0x42F2, "ebmlMaxIDWidth", UnsignedInt),
    SchemaNode::leaf(0x42F3, "ebmlMaxSizeWidth", UnsignedInt),
    SchemaNode::leaf(DOC_TYPE, "docType", String),
    SchemaNode::leaf(0x4287, "docTypeVersion", UnsignedInt),
    SchemaNode::leaf(0x4285, "docTypeReadVersion", UnsignedInt),
];

const SEEK: &[SchemaNode] = &[
    SchemaNode::leaf(0x53AB, "seekId", Binary),
    SchemaNode::leaf(0x53AC, "seekPosition", UnsignedInt),
];

const SEEK_HEAD: &[SchemaNode] = &[SchemaNode::container(0x4DBB, "seek", SEEK).repeated()];

const INFO_NODES: &[SchemaNode] = &[
    // Segment UIDs are 128-bit
    SchemaNode::leaf(0x73A4, "uid", Binary),
    SchemaNode::leaf(0x7384, "filename", String),
    SchemaNode::leaf(0x3CB923, "prevUID", Binary),
    SchemaNode::leaf(0x3C83AB, "prevFilename", String),
    SchemaNode::leaf(0x3EB923, "nextUID", Binary),
    SchemaNode::leaf(0x3E83BB, "nextFilename", String),
    SchemaNode::leaf(0x4444, "segmentFamily", Binary),
    SchemaNode::leaf(TIMECODE_SCALE, "timecodeScale", UnsignedInt),
    SchemaNode::leaf(DURATION, "duration", Float),
    // Signed 8-byte date, reinterpreted by the document view
    SchemaNode::leaf(DATE_UTC, "dateUTC", UnsignedInt),
    SchemaNode::leaf(TITLE, "title", String),
    SchemaNode::leaf(0x4D80, "muxingApp", String),
    SchemaNode::leaf(0x5741, "writingApp", String),
];

const VIDEO: &[SchemaNode] = &[
    SchemaNode::leaf(0x9A, "flagInterlaced", Flag),
    SchemaNode::leaf(0x53B8, "stereoMode", UnsignedInt),
    SchemaNode::leaf(0x53C0, "alphaMode", UnsignedInt),
    SchemaNode::leaf(0xB0, "pixelWidth", UnsignedInt),
    SchemaNode::leaf(0xBA, "pixelHeight", UnsignedInt),
    SchemaNode::leaf(0x54B0, "displayWidth", UnsignedInt),
    SchemaNode::leaf(0x54BA, "displayHeight", UnsignedInt),
    SchemaNode::leaf(0x54B2, "displayUnit", UnsignedInt),
    SchemaNode::leaf(0x54B3, "aspectRatioType", UnsignedInt),
    SchemaNode::leaf(0x2EB524, "colourSpace", Binary),
    SchemaNode::leaf(0x2FB523, "gammaValue", Float),
];

const AUDIO_SETTINGS: &[SchemaNode] = &[
    SchemaNode::leaf(SAMPLING_FREQUENCY, "samplingFrequency", Float),
    SchemaNode::leaf(0x78B5, "outputSamplingFrequency", Float),
    SchemaNode::leaf(CHANNELS, "channels", UnsignedInt),
    SchemaNode::leaf(0x7D7B, "channelPositions", Binary),
    SchemaNode::leaf(BIT_DEPTH, "bitDepth", UnsignedInt),
];

const TRACK_ENTRY_NODES: &[SchemaNode] = &[
    SchemaNode::leaf(TRACK_NUMBER, "trackNumber", UnsignedInt),
    SchemaNode::leaf(0x73C5, "uid", Uid),
    SchemaNode::leaf(TRACK_TYPE, "trackType", UnsignedInt),
    SchemaNode::leaf(0xB9, "flagEnabled", Flag),
    SchemaNode::leaf(0x88, "flagDefault", Flag),
    SchemaNode::leaf(0x55AA, "flagForced", Flag),
    SchemaNode::leaf(0x9C, "flagLacing", Flag),
    SchemaNode::leaf(0x6DE7, "minCache", UnsignedInt),
    SchemaNode::leaf(0x6DF8, "maxCache", UnsignedInt),
    SchemaNode::leaf(0x23E383, "defaultDuration", UnsignedInt),
    SchemaNode::leaf(0x23314F, "trackTimecodeScale", Float),
    SchemaNode::leaf(0x536E, "name", String),
    SchemaNode::leaf(0x22B59C, "language", String),
    SchemaNode::leaf(CODEC_ID, "codecID", String),
    SchemaNode::leaf(0x63A2, "codecPrivate", Binary),
    SchemaNode::leaf(0x258688, "codecName", String),
    SchemaNode::leaf(0x56AA, "codecDelay", UnsignedInt),
    SchemaNode::leaf(0x56BB, "seekPreRoll", UnsignedInt),
    SchemaNode::container(0xE0, "video", VIDEO),
    SchemaNode::container(AUDIO, "audio", AUDIO_SETTINGS),
];

const TRACKS_NODES: &[SchemaNode] = &[
    SchemaNode::container(TRACK_ENTRY, "entries", TRACK_ENTRY_NODES).repeated(),
];

const TARGETS_NODES: &[SchemaNode] = &[
    SchemaNode::leaf(0x63C5, "tagTrackUID", Uid),
    SchemaNode::leaf(0x63C4, "tagChapterUID", Uid),
    SchemaNode::leaf(0x63C6, "tagAttachmentUID", Uid),
    SchemaNode::leaf(TARGET_TYPE_VALUE, "targetTypeValue", UnsignedInt),
    SchemaNode::leaf(TARGET_TYPE, "targetType", String),
];

const SIMPLE_TAG_NODES: &[SchemaNode] = &[
    SchemaNode::leaf(TAG_NAME, "name", String),
    SchemaNode::leaf(TAG_STRING, "string", String),
    SchemaNode::leaf(TAG_BINARY, "binary", Binary),
    SchemaNode::leaf(0x447A, "language", String),
    SchemaNode::leaf(0x447B, "languageIETF", String),
    SchemaNode::leaf(0x4484, "default", Flag),
];

const TAG_NODES: &[SchemaNode] = &[
    SchemaNode::container(TARGETS, "target", TARGETS_NODES),
    SchemaNode::container(SIMPLE_TAG, "simpleTags", SIMPLE_TAG_NODES).repeated(),
];

const TAGS_NODES: &[SchemaNode] = &[SchemaNode::container(TAG, "tag", TAG_NODES).repeated()];

const SEGMENT_NODES: &[SchemaNode] = &[
    SchemaNode::container(0x114D9B74, "seekHead", SEEK_HEAD),
    SchemaNode::container(INFO, "info", INFO_NODES),
    SchemaNode::container(TRACKS, "tracks", TRACKS_NODES),
    SchemaNode::container(TAGS, "tags", TAGS_NODES),
];

const ROOT: &[SchemaNode] = &[
    SchemaNode::container(EBML, "ebml", EBML_HEADER),
    SchemaNode::container(SEGMENT, "segment", SEGMENT_NODES),
];

/// Root schema of a Matroska or WebM document.
pub static MATROSKA: SchemaTree = SchemaTree::new(ROOT);
