use metasplice::{
    MetadataKind,
    iptc::{Iptc, IptcDataSet, IptcTag, tags::ApplicationTag},
    irb::{self, ImageResource},
    providers::jpeg::{self, JpegMetadata, JpegTranscodeError, Segment},
};
use metasplice_types::{iptc::KnownTag, jpeg::Marker};

fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// A scan with stuffed bytes, restart markers, and some junk after `EOI`.
const SCAN_AND_TAIL: &[u8] = &[
    0xFF, 0xDA, 0x00, 0x0C, 0x03, 0x01, 0x00, 0x02, 0x11, 0x03, 0x11, 0x00, 0x3F, 0x00,
    0xF8, 0xFF, 0x00, 0xA2, 0x8A, 0xFF, 0xD0, 0x28, 0xA0, 0xFF, 0xD1, 0x0F, 0xFF, 0xD9,
    b'j', b'u', b'n', b'k',
];

fn full(marker: Marker, payload: &[u8]) -> Segment {
    Segment::full(marker, payload.to_vec()).unwrap()
}

fn make_jpeg(segments: &[Segment]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    for s in segments {
        s.write_to(&mut out).unwrap();
    }
    out.extend_from_slice(SCAN_AND_TAIL);
    out
}

/// A JPEG like a camera might write.
fn camera_jpeg() -> Vec<u8> {
    make_jpeg(&[
        full(Marker::App(0), b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"),
        full(Marker::App(1), b"Exif\0\0MM\0\x2A\0\0\0\x08\0\0"),
        full(Marker::App(2), b"ICC_PROFILE\0\x01\x01"),
        full(Marker::Com, b"shot on a potato"),
        full(Marker::Dqt, &[0x00; 65]),
        full(Marker::Sof(0), &[0x08, 0x00, 0x10, 0x00, 0x10, 0x01, 0x01, 0x11, 0x00]),
        full(Marker::Dht, &[0x00; 29]),
        Segment::Standalone { marker: Marker::Tem },
        full(Marker::App(14), b"Adobe\0\x64\0\0\0\0\x01"),
    ])
}

fn ds(tag: ApplicationTag, data: &[u8]) -> IptcDataSet {
    IptcDataSet::with_tag(IptcTag::Known(KnownTag::Application(tag)), data.to_vec()).unwrap()
}

/// Lists the marker of every segment before the scan.
fn markers(jpeg: &[u8]) -> Vec<Marker> {
    let mut found = Vec::new();
    let mut i = 2;
    loop {
        let marker = Marker::from(u16::from_be_bytes([jpeg[i], jpeg[i + 1]]));
        if matches!(marker, Marker::Sos | Marker::Eoi) {
            return found;
        }
        found.push(marker);

        if marker.is_standalone() {
            i += 2;
        } else {
            i += 2 + u16::from_be_bytes([jpeg[i + 2], jpeg[i + 3]]) as usize;
        }
    }
}

fn transcode(input: &[u8], new: Option<&[IptcDataSet]>, remove: &[MetadataKind]) -> Vec<u8> {
    let mut out = Vec::new();
    jpeg::transcode(&mut &*input, &mut out, new, remove).unwrap();
    out
}

#[test]
fn round_trip_is_byte_identical() {
    logger();

    let input = camera_jpeg();
    assert_eq!(transcode(&input, None, &[]), input);
}

#[test]
fn fill_bytes_survive_round_trip_and_injection() {
    logger();

    // pad the COM and SOS markers with extra 0xFFs
    let mut input = vec![0xFF, 0xD8];
    for segment in [
        full(Marker::App(1), b"Exif\0\0"),
        full(Marker::Com, b"padded"),
        full(Marker::Dqt, &[0x00; 65]),
    ] {
        if segment.marker() == Marker::Com {
            input.extend_from_slice(&[0xFF, 0xFF]);
        }
        segment.write_to(&mut input).unwrap();
    }
    input.push(0xFF);
    input.extend_from_slice(SCAN_AND_TAIL);

    assert_eq!(transcode(&input, None, &[]), input);

    // the new APP13 goes in without fill, and the rest keeps its padding
    let new = [ds(ApplicationTag::Keywords, b"pad")];
    let out = transcode(&input, Some(&new), &[]);
    let app13_len: usize = out.len() - input.len();
    assert_eq!(out[..12], input[..12]);
    assert_eq!(out[12..14], [0xFF, 0xED]);
    assert_eq!(out[12 + app13_len..], input[12..]);
}

#[test]
fn removing_comments_leaves_everything_else() {
    logger();

    let input = camera_jpeg();
    let kept = transcode(&input, None, &[]);
    assert_eq!(
        markers(&kept).iter().filter(|m| **m == Marker::Com).count(),
        1
    );

    let out = transcode(&input, None, &[MetadataKind::Comment]);
    let mut expected = markers(&input);
    expected.retain(|m| *m != Marker::Com);
    assert_eq!(markers(&out), expected);

    // the scan and tail are untouched
    assert!(out.ends_with(SCAN_AND_TAIL));
}

#[test]
fn removing_everything_removable() {
    logger();

    let out = transcode(&camera_jpeg(), None, MetadataKind::ALL);
    assert_eq!(
        markers(&out),
        vec![Marker::Dqt, Marker::Sof(0), Marker::Dht, Marker::Tem]
    );
}

#[test]
fn injection_follows_app1() {
    logger();

    let new = [ds(ApplicationTag::Keywords, b"potato")];
    let out = transcode(&camera_jpeg(), Some(&new), &[]);

    let found = markers(&out);
    let app1 = found.iter().position(|m| *m == Marker::App(1)).unwrap();
    assert_eq!(found[app1 + 1], Marker::App(13));
    assert_eq!(found.len(), markers(&camera_jpeg()).len() + 1);
    assert!(out.ends_with(SCAN_AND_TAIL));
}

#[test]
fn injection_goes_first_without_app0_or_app1() {
    logger();

    let new = [ds(ApplicationTag::ObjectName, b"title")];
    let out = transcode(
        &camera_jpeg(),
        Some(&new),
        &[MetadataKind::Jfif, MetadataKind::Exif],
    );

    assert_eq!(
        markers(&out),
        vec![
            Marker::App(13),
            Marker::App(2),
            Marker::Com,
            Marker::Dqt,
            Marker::Sof(0),
            Marker::Dht,
            Marker::Tem,
            Marker::App(14),
        ]
    );
}

#[test]
fn injected_iptc_reads_back() {
    logger();

    let new = [
        ds(ApplicationTag::Keywords, b"cat"),
        ds(ApplicationTag::Keywords, b"nap"),
        ds(ApplicationTag::CaptionAbstract, b"A cat, asleep."),
    ];
    let out = transcode(&camera_jpeg(), Some(&new), &[]);

    let mut metadata = JpegMetadata::read(&mut out.as_slice()).unwrap();
    assert_eq!(
        metadata.iptc,
        new.iter().cloned().collect::<Iptc>()
    );

    metadata.comments.read().unwrap();
    assert_eq!(metadata.comments.comments(), &["shot on a potato".to_string()]);
}

#[test]
fn existing_iptc_is_merged_then_replaced() {
    logger();

    let old: Iptc = [
        ds(ApplicationTag::ObjectName, b"old title"),
        ds(ApplicationTag::Keywords, b"old"),
    ]
    .into_iter()
    .collect();
    let input = make_jpeg(&[
        full(Marker::App(1), b"Exif\0\0"),
        Segment::full(
            Marker::App(13),
            irb::photoshop_payload(&[ImageResource::iptc(old.encode()).unwrap()]),
        )
        .unwrap(),
    ]);
    let new = [
        ds(ApplicationTag::ObjectName, b"new title"),
        ds(ApplicationTag::Keywords, b"new"),
    ];

    // merged
    let merged = JpegMetadata::read(&mut transcode(&input, Some(&new), &[]).as_slice())
        .unwrap()
        .iptc;
    assert_eq!(
        merged.get_as_string(IptcTag::Known(KnownTag::Application(
            ApplicationTag::ObjectName
        ))),
        "new title"
    );
    assert_eq!(
        merged.get_as_string(IptcTag::Known(KnownTag::Application(
            ApplicationTag::Keywords
        ))),
        "new;old"
    );

    // replaced
    let replaced = JpegMetadata::read(
        &mut transcode(&input, Some(&new), &[MetadataKind::Iptc]).as_slice(),
    )
    .unwrap()
    .iptc;
    assert_eq!(replaced, new.iter().cloned().collect::<Iptc>());

    // removed
    let removed = transcode(&input, None, &[MetadataKind::Iptc]);
    assert_eq!(markers(&removed), vec![Marker::App(1)]);

    // untouched
    assert_eq!(transcode(&input, None, &[]), input);
}

#[test]
fn bad_signature_writes_nothing() {
    logger();

    for input in [&b""[..], &[0xFF][..], &[0xD8, 0xFF, 0xDA][..], &b"\x89PNG"[..]] {
        let mut out = Vec::new();
        let res = jpeg::transcode(&mut &*input, &mut out, None, &[]);

        assert!(matches!(res, Err(JpegTranscodeError::InvalidContainer { .. })));
        assert!(out.is_empty());
    }
}

#[test]
fn truncated_metadata_fails() {
    logger();

    let mut input = camera_jpeg();
    input.truncate(30);

    let mut out = Vec::new();
    assert!(matches!(
        jpeg::transcode(&mut input.as_slice(), &mut out, None, &[]),
        Err(JpegTranscodeError::UnexpectedEndOfStream { .. })
    ));
}
