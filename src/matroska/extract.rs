// Map a parsed Matroska tree onto format fields and tags

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use tracing::debug;

use crate::ebml::ParsedNode;
use crate::error::ExtractError;
use crate::metadata::{FormatKey, FormatValue, MetadataSink, TagValue, MATROSKA_NAMESPACE};

use super::document::{MatroskaDocument, Track, TrackType};

/// Convert a Matroska `DateUTC` value to an RFC 3339 timestamp.
///
/// `DateUTC` counts nanoseconds from 2001-01-01T00:00:00 UTC and is
/// negative for earlier dates.
pub fn date_utc_to_rfc3339(nanos: i64) -> Option<String> {
    let epoch: DateTime<Utc> = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).single()?;
    let offset = Duration::nanoseconds(nanos);
    let time = epoch.checked_add_signed(offset)?;
    Some(time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// The single audio track of the document, if it has a track list.
///
/// A track list with zero or several audio tracks is rejected.
fn audio_track(document: &MatroskaDocument) -> Result<Option<&Track>, ExtractError> {
    let tracks = match document.segment.as_ref().and_then(|s| s.tracks.as_ref()) {
        Some(tracks) => tracks,
        None => return Ok(None),
    };

    let mut audio = tracks.iter().filter(|t| t.track_type == TrackType::Audio);
    match (audio.next(), audio.next()) {
        (Some(track), None) => Ok(Some(track)),
        (None, _) => Err(ExtractError::AudioTrackCount { found: 0 }),
        (Some(_), Some(_)) => Err(ExtractError::AudioTrackCount {
            found: 2 + audio.count(),
        }),
    }
}

/// Report the metadata of a parsed document to `sink`.
///
/// All checks run before the first call into the sink, so a failed
/// extraction leaves the sink untouched.
pub fn extract<M: MetadataSink + ?Sized>(root: &ParsedNode, sink: &mut M) -> Result<(), ExtractError> {
    let document = MatroskaDocument::from_node(root)?;
    let track = audio_track(&document)?;

    sink.set_format(FormatKey::Container, FormatValue::Text(document.container()));

    let segment = document.segment.as_ref();
    let info = segment.and_then(|s| s.info.as_ref());

    if let Some(info) = info {
        if let Some(duration) = info.duration_seconds() {
            sink.set_format(FormatKey::Duration, FormatValue::Float(duration));
        }
        if let Some(created) = info.date_utc.and_then(date_utc_to_rfc3339) {
            sink.set_format(FormatKey::CreationTime, FormatValue::Text(created));
        }
    }

    if let Some(track) = track {
        sink.set_format(FormatKey::Codec, FormatValue::Text(track.codec_name().to_string()));

        if let Some(audio) = &track.audio {
            if let Some(rate) = audio.sampling_frequency {
                sink.set_format(FormatKey::SampleRate, FormatValue::Float(rate));
            }
            if let Some(channels) = audio.channels {
                sink.set_format(FormatKey::NumberOfChannels, FormatValue::Unsigned(channels));
            }
            if let Some(bits) = audio.bit_depth {
                sink.set_format(FormatKey::BitsPerSample, FormatValue::Unsigned(bits));
            }
        }
    }

    if let Some(title) = info.and_then(|i| i.title.as_ref()) {
        sink.add_tag(MATROSKA_NAMESPACE, "segment:title", TagValue::Text(title.clone()));
    }

    let mut emitted = 0;
    for entry in segment.and_then(|s| s.tags.as_ref()).into_iter().flatten() {
        let target = entry.target.label();
        for simple in &entry.simple_tags {
            let value = match (&simple.string, &simple.binary) {
                (Some(text), _) => TagValue::Text(text.clone()),
                (None, Some(data)) => TagValue::Binary(data.clone()),
                (None, None) => continue,
            };
            sink.add_tag(MATROSKA_NAMESPACE, &format!("{}:{}", target, simple.name), value);
            emitted += 1;
        }
    }

    debug!(
        container = %document.ebml.doc_type,
        audio = track.is_some(),
        tags = emitted,
        "Extracted Matroska metadata"
    );
    Ok(())
}
