use metasplice_types::iptc::IptcTag;
use winnow::{
    Parser as _,
    binary::{be_u16, u8},
    error::EmptyError,
    token::take,
};

use super::error::IptcError;

/// Every IPTC dataset starts with this byte.
pub const TAG_MARKER: u8 = 0x1C;

/// The number of bytes before a dataset's value: marker, record, dataset,
/// and a two-byte size.
pub const HEADER_LEN: usize = 5;

/// One IPTC dataset: a tagged value.
///
/// Two datasets are equal when their record, dataset number, and raw bytes
/// all match.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IptcDataSet {
    record: u8,
    dataset: u8,
    data: Vec<u8>,
}

impl IptcDataSet {
    /// Creates a dataset.
    ///
    /// # Errors
    ///
    /// Fails if `data` is longer than `u16::MAX` bytes, since the size field
    /// couldn't describe it.
    pub fn new(record: u8, dataset: u8, data: Vec<u8>) -> Result<Self, IptcError> {
        if data.len() > u16::MAX as usize {
            log::error!(
                "IPTC dataset `{record}:{dataset}` is too long to encode! len: `{}`",
                data.len()
            );
            return Err(IptcError::DataTooLong { len: data.len() });
        }

        Ok(Self {
            record,
            dataset,
            data,
        })
    }

    /// Creates a dataset for a tag.
    pub fn with_tag(tag: IptcTag, data: Vec<u8>) -> Result<Self, IptcError> {
        Self::new(tag.record(), tag.dataset(), data)
    }

    /// The record number.
    pub fn record(&self) -> u8 {
        self.record
    }

    /// The dataset number.
    pub fn dataset(&self) -> u8 {
        self.dataset
    }

    /// The raw value.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The tag this dataset belongs to.
    pub fn tag(&self) -> IptcTag {
        IptcTag::new(self.record, self.dataset)
    }

    /// Whether more than one dataset with this tag may be kept.
    pub fn allows_multiple(&self) -> bool {
        self.tag().allows_multiple()
    }

    /// The value as text, replacing anything that isn't UTF-8.
    pub fn data_as_string(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// How many bytes this dataset takes up once encoded.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }

    /// Appends the encoded dataset to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        out.push(TAG_MARKER);
        out.push(self.record);
        out.push(self.dataset);

        // `new` keeps this in range
        out.extend_from_slice(&(self.data.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.data);
    }
}

/// What [`dataset`] found at the front of the input.
#[derive(Debug, PartialEq)]
pub(super) enum Parsed {
    /// A complete dataset.
    DataSet(IptcDataSet),

    /// A complete dataset with no value. It carries nothing, so it's skipped.
    Empty,

    /// The run of datasets is over.
    ///
    /// Either the next byte isn't a tag marker, or there isn't a whole header
    /// left.
    End,
}

/// Parses out the dataset at the front of `input`.
///
/// `offset` is only used for error reporting.
pub(super) fn dataset(input: &mut &[u8], offset: usize) -> Result<Parsed, IptcError> {
    // a dataset needs its whole header to be here
    if input.len() < HEADER_LEN || input[0] != TAG_MARKER {
        log::trace!(
            "No more IPTC datasets at offset `{offset}`. remaining len: `{}`",
            input.len()
        );
        return Ok(Parsed::End);
    }

    let header = (u8::<_, EmptyError>, u8, u8, be_u16).parse_next(input);
    let Ok((_marker, record, dataset, size)) = header else {
        // we checked the length above
        return Ok(Parsed::End);
    };

    let remaining: usize = input.len();
    let data: &[u8] = take(size as usize)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!(
                "IPTC dataset `{record}:{dataset}` wants `{size}` bytes, \
                but only `{remaining}` are left!"
            );
            IptcError::TruncatedRecord {
                offset,
                declared: size,
                remaining,
            }
        })?;

    if data.is_empty() {
        log::trace!("Skipping empty IPTC dataset `{record}:{dataset}`.");
        return Ok(Parsed::Empty);
    }

    Ok(Parsed::DataSet(IptcDataSet {
        record,
        dataset,
        data: data.to_vec(),
    }))
}
