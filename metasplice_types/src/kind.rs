//! Kinds of embedded metadata a caller may ask to remove.

/// A kind of metadata found in a JPEG file.
///
/// Several kinds share a segment type, so asking to remove any of them
/// removes every segment of that type.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum MetadataKind {
    /// `COM` segments.
    Comment,

    /// JFIF header, found in `APP0`.
    Jfif,

    /// Exif, found in `APP1`.
    Exif,

    /// XMP, found in `APP1`.
    Xmp,

    /// An ICC color profile, found in `APP2`.
    IccProfile,

    /// Ducky (Photoshop "Save for Web") quality info, found in `APP12`.
    Ducky,

    /// IPTC, found in a Photoshop resource block in `APP13`.
    Iptc,

    /// Any Photoshop image resource block, found in `APP13`.
    PhotoshopIrb,

    /// Adobe color transform info, found in `APP14`.
    Adobe,
}

impl MetadataKind {
    /// Every kind.
    pub const ALL: &'static [Self] = &[
        MetadataKind::Comment,
        MetadataKind::Jfif,
        MetadataKind::Exif,
        MetadataKind::Xmp,
        MetadataKind::IccProfile,
        MetadataKind::Ducky,
        MetadataKind::Iptc,
        MetadataKind::PhotoshopIrb,
        MetadataKind::Adobe,
    ];

    /// A short, human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            MetadataKind::Comment => "comment",
            MetadataKind::Jfif => "JFIF",
            MetadataKind::Exif => "Exif",
            MetadataKind::Xmp => "XMP",
            MetadataKind::IccProfile => "ICC profile",
            MetadataKind::Ducky => "Ducky",
            MetadataKind::Iptc => "IPTC",
            MetadataKind::PhotoshopIrb => "Photoshop IRB",
            MetadataKind::Adobe => "Adobe",
        }
    }
}

impl core::fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
