// Unified metadata field mapping
//
// Matroska tags are free-form `TargetType:NAME` pairs (for example
// `album:TITLE` or `track:PART_NUMBER`). This module maps the well-known
// ones onto a small set of standard fields so callers do not need to know
// Matroska tagging conventions.
//
// Reference:
// - https://www.matroska.org/technical/tagging.html

/// Standard metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    AlbumArtist,
    Album,
    Date,
    Track,
    Disc,
    Genre,
    Comment,
    Label,
    EncodedBy,
}

impl StandardField {
    pub const ALL: [StandardField; 11] = [
        StandardField::Title,
        StandardField::Artist,
        StandardField::AlbumArtist,
        StandardField::Album,
        StandardField::Date,
        StandardField::Track,
        StandardField::Disc,
        StandardField::Genre,
        StandardField::Comment,
        StandardField::Label,
        StandardField::EncodedBy,
    ];

    /// Get standard field name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Title => "title",
            StandardField::Artist => "artist",
            StandardField::AlbumArtist => "albumartist",
            StandardField::Album => "album",
            StandardField::Date => "date",
            StandardField::Track => "track",
            StandardField::Disc => "disc",
            StandardField::Genre => "genre",
            StandardField::Comment => "comment",
            StandardField::Label => "label",
            StandardField::EncodedBy => "encodedby",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Some(StandardField::Title),
            "artist" => Some(StandardField::Artist),
            "albumartist" | "album_artist" => Some(StandardField::AlbumArtist),
            "album" => Some(StandardField::Album),
            "date" | "year" => Some(StandardField::Date),
            "track" => Some(StandardField::Track),
            "disc" | "disk" => Some(StandardField::Disc),
            "genre" => Some(StandardField::Genre),
            "comment" => Some(StandardField::Comment),
            "label" => Some(StandardField::Label),
            "encodedby" | "encoded_by" => Some(StandardField::EncodedBy),
            _ => None,
        }
    }
}

/// Matroska tag key mappings
pub struct FieldMappings;

impl FieldMappings {
    // Simple tag names
    pub const MATROSKA_TITLE: &'static str = "TITLE";
    pub const MATROSKA_ARTIST: &'static str = "ARTIST";
    pub const MATROSKA_DATE_RELEASED: &'static str = "DATE_RELEASED";
    pub const MATROSKA_DATE_RECORDED: &'static str = "DATE_RECORDED";
    pub const MATROSKA_PART_NUMBER: &'static str = "PART_NUMBER";
    pub const MATROSKA_GENRE: &'static str = "GENRE";
    pub const MATROSKA_COMMENT: &'static str = "COMMENT";
    pub const MATROSKA_LABEL: &'static str = "LABEL";
    pub const MATROSKA_PUBLISHER: &'static str = "PUBLISHER";
    pub const MATROSKA_ENCODED_BY: &'static str = "ENCODED_BY";

    /// Convert a resolved `target:NAME` tag key to a standard field
    pub fn from_matroska(key: &str) -> Option<StandardField> {
        let (target, name) = key.split_once(':')?;
        let name = name.to_uppercase();

        match (target, name.as_str()) {
            ("segment", "TITLE") => Some(StandardField::Title),
            ("track", Self::MATROSKA_TITLE) => Some(StandardField::Title),
            ("album", Self::MATROSKA_TITLE) => Some(StandardField::Album),
            ("track", Self::MATROSKA_ARTIST) => Some(StandardField::Artist),
            ("album", Self::MATROSKA_ARTIST) => Some(StandardField::AlbumArtist),
            ("track" | "album", Self::MATROSKA_DATE_RELEASED | Self::MATROSKA_DATE_RECORDED) => {
                Some(StandardField::Date)
            }
            ("track", Self::MATROSKA_PART_NUMBER) => Some(StandardField::Track),
            ("album", Self::MATROSKA_PART_NUMBER) => Some(StandardField::Disc),
            ("track" | "album", Self::MATROSKA_GENRE) => Some(StandardField::Genre),
            ("track" | "album", Self::MATROSKA_COMMENT) => Some(StandardField::Comment),
            ("track" | "album", Self::MATROSKA_LABEL | Self::MATROSKA_PUBLISHER) => {
                Some(StandardField::Label)
            }
            ("track" | "album", Self::MATROSKA_ENCODED_BY) => Some(StandardField::EncodedBy),
            _ => None,
        }
    }
}

/// Metadata value converter for handling format-specific value formats
pub struct ValueConverter;

impl ValueConverter {
    /// Extract the 4-digit year from a date such as "2024-01-15"
    pub fn normalize_year(date: &str) -> String {
        let date = date.trim();
        match date.get(..4) {
            Some(year) if year.chars().all(|c| c.is_ascii_digit()) => year.to_string(),
            _ => date.to_string(),
        }
    }

    /// Convert position to standard format (e.g., "1/10" -> "1")
    pub fn normalize_position(position: &str) -> String {
        position.split('/').next().unwrap_or(position).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_field_parsing() {
        assert_eq!(StandardField::parse("title"), Some(StandardField::Title));
        assert_eq!(StandardField::parse("TITLE"), Some(StandardField::Title));
        assert_eq!(StandardField::parse(" Year "), Some(StandardField::Date));
        assert_eq!(StandardField::parse("unknown"), None);

        for field in StandardField::ALL {
            assert_eq!(StandardField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn test_field_mapping_depends_on_target() {
        assert_eq!(FieldMappings::from_matroska("track:TITLE"), Some(StandardField::Title));
        assert_eq!(FieldMappings::from_matroska("album:TITLE"), Some(StandardField::Album));
        assert_eq!(FieldMappings::from_matroska("album:ARTIST"), Some(StandardField::AlbumArtist));
        assert_eq!(FieldMappings::from_matroska("track:part_number"), Some(StandardField::Track));
        assert_eq!(FieldMappings::from_matroska("album:PART_NUMBER"), Some(StandardField::Disc));
        assert_eq!(FieldMappings::from_matroska("segment:title"), Some(StandardField::Title));
        assert_eq!(FieldMappings::from_matroska("shot:TITLE"), None);
        assert_eq!(FieldMappings::from_matroska("TITLE"), None);
    }

    #[test]
    fn test_value_normalization() {
        assert_eq!(ValueConverter::normalize_year("2024-01-15"), "2024");
        assert_eq!(ValueConverter::normalize_year("2024"), "2024");
        assert_eq!(ValueConverter::normalize_year("May 2024"), "May 2024");
        assert_eq!(ValueConverter::normalize_position("1/10"), "1");
        assert_eq!(ValueConverter::normalize_position("5"), "5");
    }
}
