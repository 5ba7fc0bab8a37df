//! Booking identifiers.

use jiff::Timestamp;
use rand::seq::SliceRandom;

/// Leading segment of every booking id.
pub const BOOKING_ID_PREFIX: &str = "booking";

const SUFFIX_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an id of the form `booking-{unix millis}-{7 base36 chars}`.
#[must_use]
pub fn generate_booking_id(at: Timestamp) -> String {
    let mut rng = rand::thread_rng();

    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| BASE36.choose(&mut rng))
        .map(|byte| char::from(*byte))
        .collect();

    format!("{BOOKING_ID_PREFIX}-{}-{suffix}", at.as_millisecond())
}
