//! IPTC IIM metadata.
//!
//! IPTC is stored as a run of tag-length-value datasets. This module decodes
//! that run into an [`Iptc`] collection and encodes it back out.

use std::collections::BTreeMap;

pub use metasplice_types::iptc::{IptcRecord, IptcTag, KnownTag, tags};

mod dataset;
pub mod error;

pub use dataset::{HEADER_LEN, IptcDataSet, TAG_MARKER};

use dataset::Parsed;
use error::IptcError;

/// A collection of IPTC datasets.
///
/// Datasets are grouped by tag, and tags are kept in `(record, dataset)`
/// order. Within a tag, datasets keep the order they were added in.
///
/// Two rules apply when adding:
///
/// - an exact duplicate of a dataset already present is dropped
/// - if the tag can't repeat, only the first dataset for it is kept
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Iptc {
    datasets: BTreeMap<IptcTag, Vec<IptcDataSet>>,
}

impl Iptc {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a run of IPTC datasets.
    ///
    /// # Errors
    ///
    /// See [`Iptc::read_from`].
    pub fn decode(bytes: &[u8]) -> Result<Self, IptcError> {
        let mut iptc = Self::new();
        iptc.read_from(bytes)?;
        Ok(iptc)
    }

    /// Decodes a run of IPTC datasets, adding each to `self`.
    ///
    /// Decoding stops quietly when the next byte isn't a tag marker or the
    /// input runs out. Returns how many bytes were consumed.
    ///
    /// # Errors
    ///
    /// Fails with [`IptcError::TruncatedRecord`] if a dataset claims more
    /// data than the input has left. Anything decoded before that stays in
    /// `self`.
    pub fn read_from(&mut self, bytes: &[u8]) -> Result<usize, IptcError> {
        let mut added: usize = 0_usize;
        let consumed: usize = visit(bytes, |ds| {
            if self.add(ds) {
                added += 1;
            }
        })?;

        log::trace!("Decoded IPTC: kept `{added}` datasets from `{consumed}` bytes.");
        Ok(consumed)
    }

    /// Adds a dataset.
    ///
    /// Returns `false` if it was dropped, either as a duplicate or because
    /// its tag doesn't repeat and already has a value.
    pub fn add(&mut self, dataset: IptcDataSet) -> bool {
        let tag: IptcTag = dataset.tag();
        let list: &mut Vec<IptcDataSet> = self.datasets.entry(tag).or_default();

        if !list.is_empty() && !tag.allows_multiple() {
            log::trace!("Dropping another value for non-repeatable {tag}.");
            return false;
        }

        if list.contains(&dataset) {
            log::trace!("Dropping duplicate dataset for {tag}.");
            return false;
        }

        list.push(dataset);
        true
    }

    /// Adds each dataset in order. See [`Iptc::add`].
    pub fn add_all(&mut self, datasets: impl IntoIterator<Item = IptcDataSet>) {
        for ds in datasets {
            self.add(ds);
        }
    }

    /// The datasets for a tag, if any.
    pub fn get(&self, tag: IptcTag) -> Option<&[IptcDataSet]> {
        self.datasets.get(&tag).map(Vec::as_slice)
    }

    /// All values of a tag as text, joined with `;`.
    ///
    /// Returns an empty string if the tag has no datasets.
    pub fn get_as_string(&self, tag: IptcTag) -> String {
        self.get(tag)
            .unwrap_or_default()
            .iter()
            .map(IptcDataSet::data_as_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Iterates over each tag and its datasets, in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&IptcTag, &[IptcDataSet])> {
        self.datasets.iter().map(|(t, v)| (t, v.as_slice()))
    }

    /// Iterates over every dataset in the order they'd be encoded.
    pub fn datasets(&self) -> impl Iterator<Item = &IptcDataSet> {
        self.datasets.values().flatten()
    }

    /// Consumes the collection, yielding every dataset in encoding order.
    pub fn into_datasets(self) -> impl Iterator<Item = IptcDataSet> {
        self.datasets.into_values().flatten()
    }

    /// How many datasets are held.
    pub fn len(&self) -> usize {
        self.datasets.values().map(Vec::len).sum()
    }

    /// Whether no datasets are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encodes every dataset, in tag order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(self.datasets().map(|d| d.encoded_len()).sum());
        self.write_to(&mut out);
        out
    }

    /// Appends every encoded dataset to `out`, in tag order.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for ds in self.datasets() {
            ds.write_to(out);
        }
    }
}

/// Decodes a run of IPTC datasets, handing each one to `f` in file order.
///
/// Unlike [`Iptc::read_from`], nothing is grouped or deduplicated. Returns
/// how many bytes were consumed.
///
/// # Errors
///
/// Same as [`Iptc::read_from`]. Datasets before the bad one have already
/// been handed to `f`.
pub fn visit(bytes: &[u8], mut f: impl FnMut(IptcDataSet)) -> Result<usize, IptcError> {
    let input: &mut &[u8] = &mut &*bytes;

    loop {
        let offset: usize = bytes.len() - input.len();

        match dataset::dataset(input, offset)? {
            Parsed::DataSet(ds) => f(ds),
            Parsed::Empty => (),
            Parsed::End => break,
        }
    }

    Ok(bytes.len() - input.len())
}

impl Extend<IptcDataSet> for Iptc {
    fn extend<T: IntoIterator<Item = IptcDataSet>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}

impl FromIterator<IptcDataSet> for Iptc {
    fn from_iter<T: IntoIterator<Item = IptcDataSet>>(iter: T) -> Self {
        let mut iptc = Self::new();
        iptc.add_all(iter);
        iptc
    }
}
