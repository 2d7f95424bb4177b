//! Definitions for the datasets in each IPTC record.
//!
//! ## For contributors
//!
//! To add a dataset, find the `make_tag_list_for_record!` call for its
//! record and add a listing:
//!
//! ```no_compile
//! make_tag_list_for_record!(enum ApplicationTag => IptcRecord::Application,
//!     // ...snip!
//!     YourNewTag = 250 => {
//!         name: "Your New Tag",
//!         repeatable: false,
//!     },
//! );
//! ```
//!
//! Then [`IptcTag::new`](super::IptcTag::new) will find it automatically.

use super::IptcRecord;

/// Creates a tag list for an IPTC record.
macro_rules! make_tag_list_for_record {
    (enum $enum_name:ident => $record:expr,
        $( $tag_ident:ident = $dataset:literal => {
            name: $tag_name:expr,
            repeatable: $repeatable:expr,
        },
    )+) => {
        #[doc = "A list of all datasets present in the matching `IptcRecord` variant."]
        #[repr(u8)]
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
        pub enum $enum_name {
            $(
              $tag_ident = $dataset,
            )+
        }

        impl $enum_name {
            /// Every tag in this record, in dataset order.
            pub const ALL: &'static [Self] = &[ $( Self::$tag_ident, )+ ];

            /// Returns the `IptcRecord` that this enum represents.
            pub const fn record() -> IptcRecord {
                $record
            }

            /// Returns this tag's dataset number.
            pub const fn dataset(&self) -> u8 {
                *self as u8
            }

            /// Grabs a tag's name as defined in the standard.
            pub const fn tag_name(&self) -> &'static str {
                match self {
                    $( Self::$tag_ident => $tag_name, )+
                }
            }

            /// Whether the standard lets this dataset repeat.
            pub const fn allows_multiple(&self) -> bool {
                match self {
                    $( Self::$tag_ident => $repeatable, )+
                }
            }
        }

        impl core::convert::TryFrom<u8> for $enum_name {
            type Error = ();

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $dataset => Ok($enum_name::$tag_ident), )+
                    _ => Err(()),
                }
            }
        }
    }
}

/*
 *
 *
 *  Record 1: Envelope
 *
 *
 */
make_tag_list_for_record!(enum EnvelopeTag => IptcRecord::Envelope,
    ModelVersion = 0 => {
        name: "Model Version",
        repeatable: false,
    },
    Destination = 5 => {
        name: "Destination",
        repeatable: true,
    },
    FileFormat = 20 => {
        name: "File Format",
        repeatable: false,
    },
    FileFormatVersion = 22 => {
        name: "File Format Version",
        repeatable: false,
    },
    ServiceIdentifier = 30 => {
        name: "Service Identifier",
        repeatable: false,
    },
    EnvelopeNumber = 40 => {
        name: "Envelope Number",
        repeatable: false,
    },
    ProductId = 50 => {
        name: "Product I.D.",
        repeatable: true,
    },
    EnvelopePriority = 60 => {
        name: "Envelope Priority",
        repeatable: false,
    },
    DateSent = 70 => {
        name: "Date Sent",
        repeatable: false,
    },
    TimeSent = 80 => {
        name: "Time Sent",
        repeatable: false,
    },
    CodedCharacterSet = 90 => {
        name: "Coded Character Set",
        repeatable: false,
    },
    Uno = 100 => {
        name: "UNO",
        repeatable: false,
    },
    ArmIdentifier = 120 => {
        name: "ARM Identifier",
        repeatable: false,
    },
    ArmVersion = 122 => {
        name: "ARM Version",
        repeatable: false,
    },
);

/*
 *
 *
 *  Record 2: Application
 *
 *
 */
make_tag_list_for_record!(enum ApplicationTag => IptcRecord::Application,
    RecordVersion = 0 => {
        name: "Record Version",
        repeatable: false,
    },
    ObjectTypeReference = 3 => {
        name: "Object Type Reference",
        repeatable: false,
    },
    ObjectAttributeReference = 4 => {
        name: "Object Attribute Reference",
        repeatable: true,
    },
    ObjectName = 5 => {
        name: "Object Name",
        repeatable: false,
    },
    EditStatus = 7 => {
        name: "Edit Status",
        repeatable: false,
    },
    EditorialUpdate = 8 => {
        name: "Editorial Update",
        repeatable: false,
    },
    Urgency = 10 => {
        name: "Urgency",
        repeatable: false,
    },
    SubjectReference = 12 => {
        name: "Subject Reference",
        repeatable: true,
    },
    Category = 15 => {
        name: "Category",
        repeatable: false,
    },
    SupplementalCategories = 20 => {
        name: "Supplemental Categories",
        repeatable: true,
    },
    FixtureIdentifier = 22 => {
        name: "Fixture Identifier",
        repeatable: false,
    },
    Keywords = 25 => {
        name: "Keywords",
        repeatable: true,
    },
    ContentLocationCode = 26 => {
        name: "Content Location Code",
        repeatable: true,
    },
    ContentLocationName = 27 => {
        name: "Content Location Name",
        repeatable: true,
    },
    ReleaseDate = 30 => {
        name: "Release Date",
        repeatable: false,
    },
    ReleaseTime = 35 => {
        name: "Release Time",
        repeatable: false,
    },
    ExpirationDate = 37 => {
        name: "Expiration Date",
        repeatable: false,
    },
    ExpirationTime = 38 => {
        name: "Expiration Time",
        repeatable: false,
    },
    SpecialInstructions = 40 => {
        name: "Special Instructions",
        repeatable: false,
    },
    ActionAdvised = 42 => {
        name: "Action Advised",
        repeatable: false,
    },
    ReferenceService = 45 => {
        name: "Reference Service",
        repeatable: true,
    },
    ReferenceDate = 47 => {
        name: "Reference Date",
        repeatable: true,
    },
    ReferenceNumber = 50 => {
        name: "Reference Number",
        repeatable: true,
    },
    DateCreated = 55 => {
        name: "Date Created",
        repeatable: false,
    },
    TimeCreated = 60 => {
        name: "Time Created",
        repeatable: false,
    },
    DigitalCreationDate = 62 => {
        name: "Digital Creation Date",
        repeatable: false,
    },
    DigitalCreationTime = 63 => {
        name: "Digital Creation Time",
        repeatable: false,
    },
    OriginatingProgram = 65 => {
        name: "Originating Program",
        repeatable: false,
    },
    ProgramVersion = 70 => {
        name: "Program Version",
        repeatable: false,
    },
    ObjectCycle = 75 => {
        name: "Object Cycle",
        repeatable: false,
    },
    ByLine = 80 => {
        name: "By-line",
        repeatable: true,
    },
    ByLineTitle = 85 => {
        name: "By-line Title",
        repeatable: true,
    },
    City = 90 => {
        name: "City",
        repeatable: false,
    },
    SubLocation = 92 => {
        name: "Sub-location",
        repeatable: false,
    },
    ProvinceState = 95 => {
        name: "Province/State",
        repeatable: false,
    },
    CountryCode = 100 => {
        name: "Country/Primary Location Code",
        repeatable: false,
    },
    CountryName = 101 => {
        name: "Country/Primary Location Name",
        repeatable: false,
    },
    OriginalTransmissionReference = 103 => {
        name: "Original Transmission Reference",
        repeatable: false,
    },
    Headline = 105 => {
        name: "Headline",
        repeatable: false,
    },
    Credit = 110 => {
        name: "Credit",
        repeatable: false,
    },
    Source = 115 => {
        name: "Source",
        repeatable: false,
    },
    CopyrightNotice = 116 => {
        name: "Copyright Notice",
        repeatable: false,
    },
    Contact = 118 => {
        name: "Contact",
        repeatable: true,
    },
    CaptionAbstract = 120 => {
        name: "Caption/Abstract",
        repeatable: false,
    },
    WriterEditor = 122 => {
        name: "Writer/Editor",
        repeatable: true,
    },
    RasterizedCaption = 125 => {
        name: "Rasterized Caption",
        repeatable: false,
    },
    ImageType = 130 => {
        name: "Image Type",
        repeatable: false,
    },
    ImageOrientation = 131 => {
        name: "Image Orientation",
        repeatable: false,
    },
    LanguageIdentifier = 135 => {
        name: "Language Identifier",
        repeatable: false,
    },
    AudioType = 150 => {
        name: "Audio Type",
        repeatable: false,
    },
    AudioSamplingRate = 151 => {
        name: "Audio Sampling Rate",
        repeatable: false,
    },
    AudioSamplingResolution = 152 => {
        name: "Audio Sampling Resolution",
        repeatable: false,
    },
    AudioDuration = 153 => {
        name: "Audio Duration",
        repeatable: false,
    },
    AudioOutcue = 154 => {
        name: "Audio Outcue",
        repeatable: false,
    },
    ObjectPreviewFileFormat = 200 => {
        name: "ObjectData Preview File Format",
        repeatable: false,
    },
    ObjectPreviewFileFormatVersion = 201 => {
        name: "ObjectData Preview File Format Version",
        repeatable: false,
    },
    ObjectPreviewData = 202 => {
        name: "ObjectData Preview Data",
        repeatable: false,
    },
);

#[cfg(test)]
mod tests {
    use super::{ApplicationTag, EnvelopeTag};

    #[test]
    fn try_from_matches_discriminant() {
        for t in ApplicationTag::ALL {
            assert_eq!(ApplicationTag::try_from(t.dataset()), Ok(*t));
        }
        for t in EnvelopeTag::ALL {
            assert_eq!(EnvelopeTag::try_from(t.dataset()), Ok(*t));
        }

        assert_eq!(ApplicationTag::try_from(1_u8), Err(()));
    }

    #[test]
    fn caption_is_single_valued() {
        assert_eq!(ApplicationTag::CaptionAbstract.dataset(), 120);
        assert!(!ApplicationTag::CaptionAbstract.allows_multiple());
        assert_eq!(ApplicationTag::CaptionAbstract.tag_name(), "Caption/Abstract");
    }
}
