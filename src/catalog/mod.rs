//! Track catalog models.
//!
//! [`RawRecord`] is the untrusted shape coming from the upstream catalog,
//! [`Track`] is the canonical shape every other part of the crate works with.

mod normalize;
mod raw;
mod track;

pub use normalize::{normalize, normalize_record, parse_release_year};
pub use raw::{RawAlbum, RawArtist, RawId, RawRecord};
pub use track::{decade_of, format_duration, Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};
