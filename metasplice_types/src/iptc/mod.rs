//! Types for IPTC IIM (Information Interchange Model) datasets.
//!
//! Every IPTC dataset is addressed by a pair: its record number and its
//! dataset number. This module maps those pairs onto [`IptcTag`], which
//! knows each tag's name, whether it may repeat, and how tags sort.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

pub mod tags;

use tags::{ApplicationTag, EnvelopeTag};

/// An IPTC record.
///
/// Records group datasets. Only the first two carry metadata we name;
/// datasets from any other record are still kept as [`IptcTag::Unknown`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum IptcRecord {
    /// Record 1, the envelope record.
    ///
    /// Describes how the object was transmitted.
    Envelope = 1,

    /// Record 2, the application record.
    ///
    /// This is where captions, keywords, bylines, and friends live.
    Application = 2,
}

impl IptcRecord {
    /// Returns this record's number.
    pub const fn number(&self) -> u8 {
        *self as u8
    }
}

/// A set of all known tags and their records.
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum KnownTag {
    Envelope(EnvelopeTag),
    Application(ApplicationTag),
}

impl KnownTag {
    /// Returns the record this tag belongs to.
    pub const fn record(&self) -> IptcRecord {
        match self {
            KnownTag::Envelope(_) => EnvelopeTag::record(),
            KnownTag::Application(_) => ApplicationTag::record(),
        }
    }

    /// Returns this tag's dataset number.
    pub const fn dataset(&self) -> u8 {
        match self {
            KnownTag::Envelope(t) => t.dataset(),
            KnownTag::Application(t) => t.dataset(),
        }
    }

    /// Grabs the tag's name as defined in the standard.
    ///
    /// ```
    /// use metasplice_types::iptc::{KnownTag, tags::ApplicationTag};
    ///
    /// let keywords = KnownTag::Application(ApplicationTag::Keywords);
    /// assert_eq!(keywords.tag_name(), "Keywords");
    /// ```
    pub const fn tag_name(&self) -> &'static str {
        match self {
            KnownTag::Envelope(t) => t.tag_name(),
            KnownTag::Application(t) => t.tag_name(),
        }
    }

    /// Whether a file may hold more than one dataset with this tag.
    pub const fn allows_multiple(&self) -> bool {
        match self {
            KnownTag::Envelope(t) => t.allows_multiple(),
            KnownTag::Application(t) => t.allows_multiple(),
        }
    }
}

/// Maps a `(record, dataset)` pair to the tag it names.
static KNOWN_TAG_MAP: LazyLock<FxHashMap<(u8, u8), KnownTag>> = LazyLock::new(|| {
    let mut m: FxHashMap<(u8, u8), KnownTag> = FxHashMap::default();

    for t in EnvelopeTag::ALL {
        m.insert((IptcRecord::Envelope.number(), t.dataset()), KnownTag::Envelope(*t));
    }
    for t in ApplicationTag::ALL {
        m.insert(
            (IptcRecord::Application.number(), t.dataset()),
            KnownTag::Application(*t),
        );
    }

    m
});

/// The tag of an IPTC dataset.
///
/// Tags we don't have a name for are kept as `Unknown`, carrying their raw
/// numbers. They're treated as repeatable so that no data is lost when
/// passing them through.
///
/// Tags compare, sort, and hash by `(record, dataset)`. That's the order in
/// which datasets are written back out.
#[derive(Clone, Copy, Debug)]
pub enum IptcTag {
    Known(KnownTag),
    Unknown { record: u8, dataset: u8 },
}

impl IptcTag {
    /// Finds the tag for a `(record, dataset)` pair.
    ///
    /// ```
    /// use metasplice_types::iptc::{IptcTag, KnownTag, tags::ApplicationTag};
    ///
    /// assert_eq!(
    ///     IptcTag::new(2, 25),
    ///     IptcTag::Known(KnownTag::Application(ApplicationTag::Keywords)),
    /// );
    /// assert_eq!(IptcTag::new(9, 9), IptcTag::Unknown { record: 9, dataset: 9 });
    /// ```
    pub fn new(record: u8, dataset: u8) -> Self {
        match KNOWN_TAG_MAP.get(&(record, dataset)) {
            Some(known) => IptcTag::Known(*known),
            None => IptcTag::Unknown { record, dataset },
        }
    }

    /// The record number.
    pub const fn record(&self) -> u8 {
        match self {
            IptcTag::Known(k) => k.record().number(),
            IptcTag::Unknown { record, .. } => *record,
        }
    }

    /// The dataset number.
    pub const fn dataset(&self) -> u8 {
        match self {
            IptcTag::Known(k) => k.dataset(),
            IptcTag::Unknown { dataset, .. } => *dataset,
        }
    }

    /// A human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            IptcTag::Known(k) => k.tag_name(),
            IptcTag::Unknown { .. } => "Unknown",
        }
    }

    /// Whether this tag may appear more than once.
    pub const fn allows_multiple(&self) -> bool {
        match self {
            IptcTag::Known(k) => k.allows_multiple(),
            IptcTag::Unknown { .. } => true,
        }
    }

    /// The key this tag sorts by.
    pub const fn sort_key(&self) -> (u8, u8) {
        (self.record(), self.dataset())
    }
}

impl PartialEq for IptcTag {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for IptcTag {}

impl PartialOrd for IptcTag {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IptcTag {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl core::hash::Hash for IptcTag {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl core::fmt::Display for IptcTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IptcTag::Known(k) => write!(
                f,
                "known tag `{}` ({}:{})",
                k.tag_name(),
                self.record(),
                self.dataset()
            ),
            IptcTag::Unknown { record, dataset } => {
                write!(f, "unknown tag ({record}:{dataset})")
            }
        }
    }
}
