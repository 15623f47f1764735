use crate::library::ContainerKind;

/// How a tag value is turned into a year.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseRule {
    Date,
    Copyright,
}

/// One tag field to probe and the rule used to read it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub field: &'a str,
    pub rule: ParseRule,
}

impl<'a> Candidate<'a> {
    const fn date(field: &'a str) -> Self {
        Self {
            field,
            rule: ParseRule::Date,
        }
    }

    const fn copyright(field: &'a str) -> Self {
        Self {
            field,
            rule: ParseRule::Copyright,
        }
    }
}

// Release date before recording date, then the plain frame-style fields.
const ID3: &[Candidate<'static>] = &[
    Candidate::date("releasedate"),
    Candidate::date("date"),
    Candidate::date("originaldate"),
    Candidate::date("year"),
];

const VORBIS: &[Candidate<'static>] = &[
    Candidate::date("date"),
    Candidate::date("year"),
    Candidate::copyright("copyright"),
];

const MP4: &[Candidate<'static>] = &[
    Candidate::date("date"),
    Candidate::date("year"),
    Candidate::date("releasedate"),
    Candidate::copyright("copyright"),
];

/// Tag layout of a container family, selected from its [`ContainerKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSchema<'a> {
    Id3,
    VorbisComment,
    Mp4Atoms,
    /// Probes the configured tag names in order.
    Generic(&'a [String]),
}

impl<'a> TagSchema<'a> {
    pub fn for_kind(kind: ContainerKind, generic_names: &'a [String]) -> Self {
        match kind {
            ContainerKind::Mp3 => Self::Id3,
            ContainerKind::Flac | ContainerKind::Ogg => Self::VorbisComment,
            ContainerKind::Mp4 => Self::Mp4Atoms,
            ContainerKind::Wav | ContainerKind::Wma | ContainerKind::Aac | ContainerKind::Generic => {
                Self::Generic(generic_names)
            }
        }
    }

    /// Ordered tag fields to try for this schema.
    pub fn candidates(&self) -> Vec<Candidate<'a>> {
        match *self {
            Self::Id3 => ID3.to_vec(),
            Self::VorbisComment => VORBIS.to_vec(),
            Self::Mp4Atoms => MP4.to_vec(),
            Self::Generic(names) => names
                .iter()
                .map(|name| {
                    if name.eq_ignore_ascii_case("copyright") {
                        Candidate::copyright(name)
                    } else {
                        Candidate::date(name)
                    }
                })
                .collect(),
        }
    }
}
