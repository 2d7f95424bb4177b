use metasplice::{
    iptc::{Iptc, IptcDataSet, IptcTag, error::IptcError},
    irb::{self, ImageResource},
};

fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

fn ds(record: u8, dataset: u8, data: &str) -> IptcDataSet {
    IptcDataSet::new(record, dataset, data.as_bytes().to_vec()).unwrap()
}

fn raw(list: &[IptcDataSet]) -> Vec<u8> {
    let mut out = Vec::new();
    for d in list {
        d.write_to(&mut out);
    }
    out
}

#[test]
fn dedup_and_order() {
    logger();

    let bytes = raw(&[
        ds(2, 105, "Headline"),
        ds(2, 25, "b"),
        ds(2, 105, "Headline"),
        ds(2, 25, "a"),
        ds(2, 25, "b"),
    ]);
    let iptc = Iptc::decode(&bytes).unwrap();

    assert_eq!(
        iptc.get(IptcTag::new(2, 105)).unwrap(),
        &[ds(2, 105, "Headline")]
    );
    assert_eq!(
        iptc.get(IptcTag::new(2, 25)).unwrap(),
        &[ds(2, 25, "b"), ds(2, 25, "a")]
    );
    assert_eq!(iptc.len(), 3);
}

#[test]
fn encode_decode_round_trip() {
    logger();

    let iptc: Iptc = [
        ds(1, 90, "\x1B%G"),
        ds(2, 80, "Photographer"),
        ds(2, 25, "one"),
        ds(2, 25, "two"),
        ds(2, 101, "Norway"),
        ds(2, 250, "custom"),
        ds(2, 250, "custom 2"),
    ]
    .into_iter()
    .collect();

    let encoded = iptc.encode();
    assert_eq!(Iptc::decode(&encoded).unwrap(), iptc);

    // tag order on the wire
    let tags: Vec<(u8, u8)> = Iptc::decode(&encoded)
        .unwrap()
        .datasets()
        .map(|d| (d.record(), d.dataset()))
        .collect();
    assert_eq!(
        tags,
        vec![(1, 90), (2, 25), (2, 25), (2, 80), (2, 101), (2, 250), (2, 250)]
    );
}

#[test]
fn names_and_repeatability() {
    let keywords = IptcTag::new(2, 25);
    assert_eq!(keywords.name(), "Keywords");
    assert!(keywords.allows_multiple());

    let title = IptcTag::new(2, 5);
    assert!(!title.allows_multiple());

    let unknown = IptcTag::new(9, 9);
    assert!(unknown.allows_multiple());
    assert!(IptcTag::new(1, 255) < IptcTag::new(2, 0));
}

#[test]
fn oversized_dataset_is_rejected() {
    assert_eq!(
        IptcDataSet::new(2, 120, vec![0; 70_000]),
        Err(IptcError::DataTooLong { len: 70_000 })
    );
}

#[test]
fn resource_block_wraps_iptc() {
    logger();

    let iptc: Iptc = [ds(2, 120, "odd")].into_iter().collect();
    let encoded = iptc.encode();
    let payload = irb::photoshop_payload(&[ImageResource::iptc(encoded.clone()).unwrap()]);

    let resources = irb::parse_resources(irb::strip_photoshop_signature(&payload).unwrap()).unwrap();
    assert_eq!(resources.len(), 1);
    assert!(resources[0].is_iptc());
    assert_eq!(resources[0].data(), encoded.as_slice());
    assert_eq!(Iptc::decode(resources[0].data()).unwrap(), iptc);
}
