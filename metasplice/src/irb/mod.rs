//! Photoshop image resource blocks (IRBs).
//!
//! JPEG files carry IPTC inside an `APP13` segment. That segment's payload
//! is the string `Photoshop 3.0\0`, followed by any number of resource
//! blocks. Each block looks like this:
//!
//! - `8BIM` (4 bytes)
//! - resource ID (`u16`, big-endian)
//! - name: a length byte, then that many bytes, padded to an even total
//! - data size (`u32`, big-endian)
//! - data, padded to an even length
//!
//! IPTC lives in resource `0x0404`.

use winnow::{
    Parser as _,
    binary::{be_u16, be_u32, u8},
    error::EmptyError,
    token::take,
};

pub mod error;

use error::IrbError;

/// Every resource block starts with this.
pub const RESOURCE_SIGNATURE: [u8; 4] = *b"8BIM";

/// Photoshop's `APP13` payloads start with this.
pub const PHOTOSHOP_SIGNATURE: &[u8] = b"Photoshop 3.0\0";

/// The resource ID for IPTC-NAA records.
pub const IPTC_NAA_RESOURCE_ID: u16 = 0x0404;

/// One image resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageResource {
    id: u16,
    name: Vec<u8>,
    data: Vec<u8>,
}

impl ImageResource {
    /// Creates an image resource.
    ///
    /// # Errors
    ///
    /// The name may be at most 255 bytes, and the data at most `u32::MAX`
    /// bytes.
    pub fn new(id: u16, name: impl Into<Vec<u8>>, data: Vec<u8>) -> Result<Self, IrbError> {
        let name: Vec<u8> = name.into();

        if name.len() > u8::MAX as usize {
            log::error!("Image resource name is too long! len: `{}`", name.len());
            return Err(IrbError::NameTooLong { len: name.len() });
        }
        if u32::try_from(data.len()).is_err() {
            log::error!("Image resource data is too long! len: `{}`", data.len());
            return Err(IrbError::DataTooLong { len: data.len() });
        }

        Ok(Self { id, name, data })
    }

    /// Wraps encoded IPTC as an IPTC-NAA resource with an empty name.
    pub fn iptc(encoded: Vec<u8>) -> Result<Self, IrbError> {
        Self::new(IPTC_NAA_RESOURCE_ID, Vec::<u8>::new(), encoded)
    }

    /// The resource ID.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The raw name, without its length prefix or padding.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The raw data, without padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether this resource holds IPTC.
    pub fn is_iptc(&self) -> bool {
        self.id == IPTC_NAA_RESOURCE_ID
    }

    /// The size of the padded name field, including its length byte.
    fn name_field_len(&self) -> usize {
        let len = 1 + self.name.len();
        len + (len % 2)
    }

    /// How many bytes this resource takes up once written.
    pub fn encoded_len(&self) -> usize {
        RESOURCE_SIGNATURE.len()
            + 2
            + self.name_field_len()
            + 4
            + self.data.len()
            + (self.data.len() % 2)
    }

    /// Appends the framed resource to `out`.
    ///
    /// The data is copied as-is; nothing inside it is looked at.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&RESOURCE_SIGNATURE);
        out.extend_from_slice(&self.id.to_be_bytes());

        // pascal string, padded so the whole field is even
        out.push(self.name.len() as u8);
        out.extend_from_slice(&self.name);
        if (1 + self.name.len()) % 2 != 0 {
            out.push(0);
        }

        // `new` keeps both lengths in range
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.data);
        if self.data.len() % 2 != 0 {
            out.push(0);
        }
    }
}

/// Returns the resource blocks in an `APP13` payload, if it's a Photoshop
/// one.
pub fn strip_photoshop_signature(payload: &[u8]) -> Option<&[u8]> {
    payload.strip_prefix(PHOTOSHOP_SIGNATURE)
}

/// Builds a whole `APP13` payload from a list of resources.
pub fn photoshop_payload<'r>(resources: impl IntoIterator<Item = &'r ImageResource>) -> Vec<u8> {
    let mut out: Vec<u8> = PHOTOSHOP_SIGNATURE.to_vec();
    for r in resources {
        r.write_to(&mut out);
    }
    out
}

/// Parses a run of resource blocks.
///
/// The input should be everything after the Photoshop signature.
pub fn parse_resources(bytes: &[u8]) -> Result<Vec<ImageResource>, IrbError> {
    let input: &mut &[u8] = &mut &*bytes;
    let mut resources: Vec<ImageResource> = Vec::new();

    while !input.is_empty() {
        let offset: usize = bytes.len() - input.len();
        let truncated = |_: EmptyError| {
            log::error!("Image resource block at offset `{offset}` ran out of data.");
            IrbError::Truncated { offset }
        };

        let signature: &[u8] = take(4_usize).parse_next(input).map_err(truncated)?;
        if signature != RESOURCE_SIGNATURE {
            let mut found = [0_u8; 4];
            found.copy_from_slice(signature);
            log::error!("Image resource block had a bad signature: `{found:02X?}`");
            return Err(IrbError::BadSignature { found });
        }

        let id: u16 = be_u16.parse_next(input).map_err(truncated)?;

        // the name's field is padded to an even length, length byte included
        let name_len: u8 = u8.parse_next(input).map_err(truncated)?;
        let name: &[u8] = take(name_len as usize).parse_next(input).map_err(truncated)?;
        if (1 + name_len as usize) % 2 != 0 {
            take(1_usize).void().parse_next(input).map_err(truncated)?;
        }

        let size: u32 = be_u32.parse_next(input).map_err(truncated)?;
        let data: &[u8] = take(size as usize).parse_next(input).map_err(truncated)?;

        // some writers leave off the final pad byte, so don't insist on it
        if size % 2 != 0 && !input.is_empty() {
            take(1_usize).void().parse_next(input).map_err(truncated)?;
        }

        log::trace!(
            "Found image resource `{id:#06X}` with `{}` bytes of data.",
            data.len()
        );
        resources.push(ImageResource {
            id,
            name: name.to_vec(),
            data: data.to_vec(),
        });
    }

    Ok(resources)
}
