//! Types mirrored from backend responses that are not part of a listing.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Usage record for one mounted disk, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub device: String,
    pub path: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// Hash algorithm supported by the backend hashing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HashAlgo {
    Crc32,
    Md5,
    Sha1,
    Sha256,
}
