//! Aggregate analytics over a batch of normalized tracks.

mod stats;

pub use stats::{aggregate, decade_histogram, top_artists, ArtistRollup, Stats, TOP_ARTISTS_LIMIT};
