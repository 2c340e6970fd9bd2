//! Correlation id generation.

use uuid::Uuid;

/// Length of a correlation id in characters.
const ID_LEN: usize = 12;

/// Generate a fresh correlation id for one backend call.
///
/// 12 hex characters out of a v4 UUID: collision odds are negligible for
/// the handful of calls ever in flight at once.
pub fn correlation_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
