use std::io::Write;

use mkvmeta::metadata::{TagValue, MATROSKA_NAMESPACE};
use mkvmeta::{AudioFile, ExtractError, MetadataError, StandardField};

fn size(length: usize) -> Vec<u8> {
    assert!(length < 0x3FFF);
    if length < 0x7F {
        vec![0x80 | length as u8]
    } else {
        vec![0x40 | (length >> 8) as u8, length as u8]
    }
}

fn element(id: &[u8], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend(size(body.len()));
    out.extend_from_slice(body);
    out
}

fn simple_tag(name: &str, value: &str) -> Vec<u8> {
    element(
        &[0x67, 0xC8],
        &[
            element(&[0x45, 0xA3], name.as_bytes()),
            element(&[0x44, 0x87], value.as_bytes()),
        ]
        .concat(),
    )
}

fn sample_file(track_types: &[u8]) -> Vec<u8> {
    let ebml = element(&[0x1A, 0x45, 0xDF, 0xA3], &element(&[0x42, 0x82], b"matroska"));

    let info = element(
        &[0x15, 0x49, 0xA9, 0x66],
        &[
            element(&[0x73, 0xA4], &[0x5A; 16]),
            element(&[0x2A, 0xD7, 0xB1], &[0x0F, 0x42, 0x40]),
            element(&[0x44, 0x89], &183_500.0f64.to_be_bytes()),
            element(&[0x7B, 0xA9], b"Sessions\0\0"),
        ]
        .concat(),
    );

    let entries: Vec<u8> = track_types
        .iter()
        .map(|&track_type| {
            element(
                &[0xAE],
                &[
                    element(&[0x83], &[track_type]),
                    element(&[0x86], b"A_FLAC"),
                    element(
                        &[0xE1],
                        &[
                            element(&[0xB5], &44_100.0f32.to_be_bytes()),
                            element(&[0x9F], &[2]),
                            element(&[0x62, 0x64], &[16]),
                        ]
                        .concat(),
                    ),
                ]
                .concat(),
            )
        })
        .collect::<Vec<_>>()
        .concat();
    let tracks = element(&[0x16, 0x54, 0xAE, 0x6B], &entries);

    let album = element(
        &[0x73, 0x73],
        &[
            element(&[0x63, 0xC0], &element(&[0x68, 0xCA], &[50])),
            simple_tag("TITLE", "Sessions"),
            simple_tag("ARTIST", "The Band"),
            simple_tag("PART_NUMBER", "1/2"),
        ]
        .concat(),
    );
    let track = element(
        &[0x73, 0x73],
        &[
            element(&[0x63, 0xC0], &element(&[0x63, 0xCA], b"TRACK")),
            simple_tag("TITLE", "First Take"),
        ]
        .concat(),
    );
    let tags = element(&[0x12, 0x54, 0xC3, 0x67], &[album, track].concat());

    let cluster = element(&[0x1F, 0x43, 0xB6, 0x75], &[0u8; 200]);
    let void = element(&[0xEC], &[0u8; 16]);

    let segment = element(
        &[0x18, 0x53, 0x80, 0x67],
        &[info, void, tracks, tags, cluster].concat(),
    );

    [ebml, segment].concat()
}

fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_matroska_audio_file() {
    let file = write_temp(".bin", &sample_file(&[2]));

    let audio = AudioFile::new(file.path()).unwrap();
    let metadata = audio.read_metadata().unwrap();

    let format = &metadata.format;
    assert_eq!(format.container.as_deref(), Some("EBML/matroska"));
    assert_eq!(format.duration, Some(183.5));
    assert_eq!(format.codec.as_deref(), Some("FLAC"));
    assert_eq!(format.sample_rate, Some(44_100.0));
    assert_eq!(format.number_of_channels, Some(2));
    assert_eq!(format.bits_per_sample, Some(16));

    let ids: Vec<&str> = metadata.native[MATROSKA_NAMESPACE]
        .iter()
        .map(|tag| tag.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "segment:title",
            "album:TITLE",
            "album:ARTIST",
            "album:PART_NUMBER",
            "TRACK:TITLE",
        ]
    );
    let titles: Vec<&TagValue> = metadata.tags(MATROSKA_NAMESPACE, "segment:title").collect();
    assert_eq!(titles, vec![&TagValue::Text("Sessions".to_string())]);

    let common = &metadata.common;
    assert_eq!(common.get(StandardField::Album), Some("Sessions"));
    assert_eq!(common.get(StandardField::AlbumArtist), Some("The Band"));
    assert_eq!(common.get(StandardField::Disc), Some("1"));
}

#[test]
fn test_serialized_metadata() {
    let file = write_temp(".mka", &sample_file(&[2]));
    let metadata = AudioFile::new(file.path()).unwrap().read_metadata().unwrap();

    let json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json["format"]["codec"], "FLAC");
    assert_eq!(json["format"]["numberOfChannels"], 2);
    assert_eq!(json["native"]["matroska"][1]["id"], "album:TITLE");
    assert_eq!(json["common"]["albumartist"], "The Band");
}

#[test]
fn test_multiple_audio_tracks_rejected() {
    let file = write_temp(".mka", &sample_file(&[2, 1, 2]));
    let err = AudioFile::new(file.path()).unwrap().read_metadata().unwrap_err();

    assert!(matches!(
        err,
        MetadataError::Extract(ExtractError::AudioTrackCount { found: 2 })
    ));
}

#[test]
fn test_detection_by_extension_then_parse_error() {
    let file = write_temp(".webm", b"not really a webm file");
    let audio = AudioFile::new(file.path()).unwrap();
    assert!(matches!(audio.read_metadata(), Err(MetadataError::Parse(_))));
}

#[test]
fn test_unsupported_file() {
    let file = write_temp(".txt", b"plain text");
    assert!(matches!(
        AudioFile::new(file.path()),
        Err(MetadataError::UnsupportedFormat(_))
    ));
}
