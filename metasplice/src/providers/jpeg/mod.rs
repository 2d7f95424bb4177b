//! JPEG is an older image format designed with old-school compression in mind.
//!
//! Its metadata lives in segments before the first `SOS` (start of scan)
//! marker. This module rewrites that run of segments and copies everything
//! after it byte-for-byte:
//!
//! 1. `SOI` is checked, then written.
//! 2. Segments are read until `SOS` (or `EOI`, for files without a scan).
//!    Any whose marker belongs to a [`MetadataKind`] the caller wants gone
//!    is dropped. Everything else, unknown markers included, is kept as-is.
//! 3. New IPTC, if any, is merged with the IPTC already in the file and
//!    written into one `APP13` segment. It goes right after the last `APP0`
//!    or `APP1`, or first if there are none.
//! 4. The kept segments are written, then the terminating marker, then the
//!    rest of the input.

use std::io::{Read, Write};

use metasplice_types::jpeg::Marker;

use crate::{
    MetadataKind, MetadataSink,
    comment::Comments,
    iptc::{self, Iptc, IptcDataSet},
    irb::{self, ImageResource},
    providers::shared::copy_tail,
};

mod error;
mod parse;
mod segment;

pub use error::JpegTranscodeError;
pub use segment::{MAX_PAYLOAD_LEN, Segment};

use parse::Scanned;

/// The kinds of metadata stored in segments with this marker.
///
/// Removing any of them removes the whole segment. Nothing looks inside
/// the payload to tell, say, Exif from XMP.
pub fn removal_kinds(marker: Marker) -> &'static [MetadataKind] {
    match marker {
        Marker::Com => &[MetadataKind::Comment],
        Marker::App(0) => &[MetadataKind::Jfif],
        Marker::App(1) => &[MetadataKind::Exif, MetadataKind::Xmp],
        Marker::App(2) => &[MetadataKind::IccProfile],
        Marker::App(12) => &[MetadataKind::Ducky],
        Marker::App(13) => &[MetadataKind::Iptc, MetadataKind::PhotoshopIrb],
        Marker::App(14) => &[MetadataKind::Adobe],
        _ => &[],
    }
}

/// Rewrites a JPEG's metadata.
///
/// - `new_iptc`: datasets to add. `None` and an empty slice both mean "no
///   new data".
/// - `remove`: kinds of metadata to strip. See [`removal_kinds`].
///
/// `APP13` is handled like so:
///
/// | new data? | stripped? | result                                  |
/// |-----------|-----------|-----------------------------------------|
/// | no        | no        | existing `APP13` segments are untouched |
/// | yes       | no        | old and new IPTC are combined           |
/// | yes       | yes       | only the new IPTC is written            |
/// | no        | yes       | no `APP13` is written                   |
///
/// When combining, new datasets are added before old ones, so a new value
/// for a tag that can't repeat replaces the old one. Other resources in the
/// old blocks are kept, in order. Adjacent Photoshop `APP13` segments are
/// read as one run of resource blocks, since large blocks get split across
/// segments.
///
/// Fill bytes before a kept segment's marker, or before the terminating
/// marker, are written back. Those before a removed segment go with it.
///
/// # Errors
///
/// If the input doesn't start with `SOI`, this fails before anything is
/// written. Any later failure may leave partial output behind.
pub fn transcode<R, W>(
    input: &mut R,
    output: &mut W,
    new_iptc: Option<&[IptcDataSet]>,
    remove: &[MetadataKind],
) -> Result<(), JpegTranscodeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    parse::soi(input)?;
    output.write_all(&Marker::Soi.code().to_be_bytes())?;

    // buffer the metadata region, dropping whatever was asked for
    let mut segments: Vec<Retained> = Vec::new();
    let (terminator_fill, terminator) = loop {
        match parse::next_segment(input)? {
            Scanned::End { fill, marker } => break (fill, marker),
            Scanned::Segment { fill, segment } => {
                let marker: Marker = segment.marker();
                if removal_kinds(marker).iter().any(|k| remove.contains(k)) {
                    log::debug!("Removing segment {marker}.");
                    continue;
                }
                segments.push(Retained { fill, segment });
            }
        }
    };

    if let Some(new) = new_iptc.filter(|n| !n.is_empty()) {
        let app13: Segment = combine_iptc(&mut segments, new)?;

        let at: usize = segments
            .iter()
            .rposition(|r| matches!(r.segment.marker(), Marker::App(0) | Marker::App(1)))
            .map_or(0, |i| i + 1);

        log::debug!("Injecting IPTC as segment `{at}`.");
        segments.insert(
            at,
            Retained {
                fill: 0,
                segment: app13,
            },
        );
    }

    for retained in &segments {
        write_fill(output, retained.fill)?;
        retained.segment.write_to(output)?;
    }

    // the terminator and everything after it go through untouched
    write_fill(output, terminator_fill)?;
    output.write_all(&terminator.code().to_be_bytes())?;
    let copied: u64 = copy_tail(input, output)?;
    log::debug!(
        "Wrote `{}` segments, then {terminator} and `{copied}` more bytes.",
        segments.len()
    );

    Ok(())
}

/// A segment that's going to be written, with the count of fill bytes
/// found before its marker.
struct Retained {
    fill: usize,
    segment: Segment,
}

fn write_fill<W: Write + ?Sized>(output: &mut W, fill: usize) -> Result<(), JpegTranscodeError> {
    if fill > 0 {
        output.write_all(&vec![0xFF_u8; fill])?;
    }
    Ok(())
}

/// Takes every Photoshop `APP13` out of `segments` and merges it with the
/// new datasets, returning the one `APP13` that replaces them.
///
/// Segments whose resource blocks don't parse stay where they are.
fn combine_iptc(
    segments: &mut Vec<Retained>,
    new: &[IptcDataSet],
) -> Result<Segment, JpegTranscodeError> {
    let mut merge = Merge {
        iptc: new.iter().cloned().collect(),
        others: Vec::new(),
        iptc_slot: None,
    };

    let mut kept: Vec<Retained> = Vec::with_capacity(segments.len());
    let mut run: Vec<Retained> = Vec::new();
    for retained in segments.drain(..) {
        if photoshop_blocks(&retained.segment).is_some() {
            run.push(retained);
            continue;
        }

        merge.absorb_run(&mut run, &mut kept)?;
        kept.push(retained);
    }
    merge.absorb_run(&mut run, &mut kept)?;
    *segments = kept;

    let Merge {
        iptc,
        mut others,
        iptc_slot,
    } = merge;
    let slot: usize = iptc_slot.unwrap_or(others.len());
    others.insert(slot, ImageResource::iptc(iptc.encode())?);

    Segment::full(Marker::App(13), irb::photoshop_payload(&others))
}

/// Resources gathered from the old `APP13` segments.
struct Merge {
    iptc: Iptc,
    others: Vec<ImageResource>,

    /// Where the first old IPTC resource sat among `others`.
    iptc_slot: Option<usize>,
}

impl Merge {
    /// Absorbs a run of adjacent Photoshop `APP13` segments, leaving `run`
    /// empty. Segments that don't parse are moved to `kept` instead.
    fn absorb_run(
        &mut self,
        run: &mut Vec<Retained>,
        kept: &mut Vec<Retained>,
    ) -> Result<(), JpegTranscodeError> {
        if run.is_empty() {
            return Ok(());
        }

        let blocks: Vec<&[u8]> = run
            .iter()
            .filter_map(|r| photoshop_blocks(&r.segment))
            .collect();
        let (resources, unparsed) = parse_run(&blocks);

        for resource in resources {
            if resource.is_iptc() {
                if self.iptc_slot.is_none() {
                    self.iptc_slot = Some(self.others.len());
                }
                self.iptc.read_from(resource.data())?;
            } else {
                self.others.push(resource);
            }
        }

        kept.extend(
            run.drain(..)
                .enumerate()
                .filter(|(i, _)| unparsed.contains(i))
                .map(|(_, r)| r),
        );
        Ok(())
    }
}

/// The resource blocks of a segment, if it's a Photoshop `APP13`.
fn photoshop_blocks(segment: &Segment) -> Option<&[u8]> {
    if segment.marker() != Marker::App(13) {
        return None;
    }
    irb::strip_photoshop_signature(segment.payload()?)
}

/// Parses the resource blocks of adjacent Photoshop `APP13` segments.
///
/// The blocks are first parsed joined together, which handles a resource
/// split across segments. If that fails, each segment is parsed alone.
/// Returns the resources in order, plus the indices of the segments that
/// didn't parse.
fn parse_run(blocks: &[&[u8]]) -> (Vec<ImageResource>, Vec<usize>) {
    if blocks.len() > 1 {
        match irb::parse_resources(&blocks.concat()) {
            Ok(resources) => {
                log::trace!("Parsed `{}` joined `APP13` segments.", blocks.len());
                return (resources, Vec::new());
            }
            Err(e) => log::debug!(
                "Joined `APP13` segments didn't parse. Trying them one at a time. err: {e}"
            ),
        }
    }

    let mut resources: Vec<ImageResource> = Vec::new();
    let mut unparsed: Vec<usize> = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        match irb::parse_resources(block) {
            Ok(parsed) => resources.extend(parsed),
            Err(e) => {
                log::warn!("Passing through an `APP13` segment that didn't parse. err: {e}");
                unparsed.push(i);
            }
        }
    }

    (resources, unparsed)
}

/// Reads a JPEG's metadata without writing anything.
///
/// Comments and IPTC datasets are handed to `sink` in file order. Reading
/// stops at the end of the metadata region; the rest of the input is left
/// unread.
///
/// # Errors
///
/// Fails on the same malformed input [`transcode`] does. IPTC that doesn't
/// decode is an error; resource blocks that don't parse are skipped.
pub fn read<R, S>(input: &mut R, sink: &mut S) -> Result<(), JpegTranscodeError>
where
    R: Read + ?Sized,
    S: MetadataSink + ?Sized,
{
    parse::soi(input)?;

    // adjacent Photoshop segments are held until the run ends
    let mut run: Vec<Segment> = Vec::new();
    while let Scanned::Segment { segment, .. } = parse::next_segment(input)? {
        if photoshop_blocks(&segment).is_some() {
            run.push(segment);
            continue;
        }

        visit_run(&mut run, sink)?;
        if segment.marker() == Marker::Com {
            sink.comment(segment.payload().unwrap_or_default());
        }
    }
    visit_run(&mut run, sink)?;

    Ok(())
}

/// Hands the IPTC in a run of Photoshop `APP13` segments to `sink`, then
/// empties the run.
fn visit_run<S: MetadataSink + ?Sized>(
    run: &mut Vec<Segment>,
    sink: &mut S,
) -> Result<(), JpegTranscodeError> {
    if run.is_empty() {
        return Ok(());
    }

    let blocks: Vec<&[u8]> = run.iter().filter_map(photoshop_blocks).collect();
    let (resources, _) = parse_run(&blocks);
    for resource in resources.iter().filter(|r| r.is_iptc()) {
        iptc::visit(resource.data(), |ds| sink.iptc(ds))?;
    }

    run.clear();
    Ok(())
}

/// Comments and IPTC read from a JPEG.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JpegMetadata {
    /// Raw comments, queued for decoding.
    pub comments: Comments,

    /// Every IPTC dataset found.
    pub iptc: Iptc,
}

impl JpegMetadata {
    /// Reads a JPEG's comments and IPTC.
    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self, JpegTranscodeError> {
        let mut metadata = Self::default();
        read(input, &mut metadata)?;
        Ok(metadata)
    }
}

impl MetadataSink for JpegMetadata {
    fn comment(&mut self, raw: &[u8]) {
        self.comments.add_raw(raw);
    }

    fn iptc(&mut self, dataset: IptcDataSet) {
        self.iptc.add(dataset);
    }
}
