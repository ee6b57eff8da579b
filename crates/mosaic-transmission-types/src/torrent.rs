//! Torrent snapshots as reported by `torrent-get`.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::InvalidStatus;
use crate::scalar::{flag, unix_seconds};

/// Every field name `torrent-get` understands. Used when the caller does not
/// narrow the field list.
pub const ALL_TORRENT_FIELDS: &[&str] = &[
    "activityDate",
    "addedDate",
    "bandwidthPriority",
    "comment",
    "corruptEver",
    "creator",
    "dateCreated",
    "desiredAvailable",
    "doneDate",
    "downloadDir",
    "downloadLimit",
    "downloadLimited",
    "downloadedEver",
    "editDate",
    "error",
    "errorString",
    "eta",
    "etaIdle",
    "fileStats",
    "files",
    "hashString",
    "haveUnchecked",
    "haveValid",
    "honorsSessionLimits",
    "id",
    "isFinished",
    "isPrivate",
    "isStalled",
    "labels",
    "leftUntilDone",
    "magnetLink",
    "manualAnnounceTime",
    "maxConnectedPeers",
    "metadataPercentComplete",
    "name",
    "peer-limit",
    "peers",
    "peersConnected",
    "peersFrom",
    "peersGettingFromUs",
    "peersSendingToUs",
    "percentDone",
    "pieces",
    "pieceCount",
    "pieceSize",
    "priorities",
    "queuePosition",
    "rateDownload",
    "rateUpload",
    "recheckProgress",
    "secondsDownloading",
    "secondsSeeding",
    "seedIdleLimit",
    "seedIdleMode",
    "seedRatioLimit",
    "seedRatioMode",
    "sizeWhenDone",
    "startDate",
    "status",
    "trackers",
    "trackerStats",
    "torrentFile",
    "totalSize",
    "uploadRatio",
    "uploadLimit",
    "uploadLimited",
    "uploadedEver",
    "wanted",
    "webseeds",
    "webseedsSendingToUs",
];

/// Lifecycle state of a torrent. Transmitted as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Not transferring.
    Stopped,
    /// Queued for a local data check.
    CheckWait,
    /// Checking local data.
    Check,
    /// Queued for download.
    DownloadWait,
    /// Downloading.
    Downloading,
    /// Queued for seeding.
    SeedWait,
    /// Seeding.
    Seeding,
}

impl TryFrom<i64> for TorrentStatus {
    type Error = InvalidStatus;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Stopped),
            1 => Ok(Self::CheckWait),
            2 => Ok(Self::Check),
            3 => Ok(Self::DownloadWait),
            4 => Ok(Self::Downloading),
            5 => Ok(Self::SeedWait),
            6 => Ok(Self::Seeding),
            other => Err(InvalidStatus(other)),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::CheckWait => 1,
            TorrentStatus::Check => 2,
            TorrentStatus::DownloadWait => 3,
            TorrentStatus::Downloading => 4,
            TorrentStatus::SeedWait => 5,
            TorrentStatus::Seeding => 6,
        }
    }
}

/// Torrent snapshot. Fields are `None` unless they were requested.
///
/// Two snapshots are the same torrent when their `name` and `magnet_link` match;
/// every other field is ignored by `==` and by hashing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub activity_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub added_date: Option<DateTime<Utc>>,
    pub bandwidth_priority: Option<i64>,
    pub comment: Option<String>,
    pub corrupt_ever: Option<i64>,
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub date_created: Option<DateTime<Utc>>,
    pub desired_available: Option<i64>,
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub done_date: Option<DateTime<Utc>>,
    pub download_dir: Option<String>,
    pub download_limit: Option<i64>,
    pub download_limited: Option<bool>,
    pub downloaded_ever: Option<i64>,
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub edit_date: Option<DateTime<Utc>>,
    pub error: Option<i64>,
    pub error_string: Option<String>,
    pub eta: Option<i64>,
    pub eta_idle: Option<i64>,
    pub files: Option<Vec<File>>,
    pub file_stats: Option<Vec<FileStat>>,
    pub hash_string: Option<String>,
    pub have_unchecked: Option<i64>,
    pub have_valid: Option<i64>,
    pub honors_session_limits: Option<bool>,
    pub id: Option<i64>,
    pub is_finished: Option<bool>,
    pub is_private: Option<bool>,
    pub is_stalled: Option<bool>,
    pub labels: Option<Vec<String>>,
    pub left_until_done: Option<i64>,
    pub magnet_link: Option<String>,
    pub manual_announce_time: Option<i64>,
    pub max_connected_peers: Option<i64>,
    pub metadata_percent_complete: Option<f64>,
    pub name: Option<String>,
    #[serde(rename = "peer-limit")]
    pub peer_limit: Option<i64>,
    pub peers: Option<Vec<Peer>>,
    pub peers_connected: Option<i64>,
    pub peers_from: Option<PeersFrom>,
    pub peers_getting_from_us: Option<i64>,
    pub peers_sending_to_us: Option<i64>,
    pub percent_done: Option<f64>,
    pub pieces: Option<String>,
    pub piece_count: Option<i64>,
    pub piece_size: Option<i64>,
    pub priorities: Option<Vec<i64>>,
    pub queue_position: Option<i64>,
    pub rate_download: Option<i64>,
    pub rate_upload: Option<i64>,
    pub recheck_progress: Option<f64>,
    pub seconds_downloading: Option<i64>,
    pub seconds_seeding: Option<i64>,
    pub seed_idle_limit: Option<i64>,
    pub seed_idle_mode: Option<i64>,
    pub seed_ratio_limit: Option<f64>,
    pub seed_ratio_mode: Option<i64>,
    pub size_when_done: Option<i64>,
    #[serde(default, deserialize_with = "unix_seconds::option::deserialize")]
    pub start_date: Option<DateTime<Utc>>,
    pub status: Option<TorrentStatus>,
    pub trackers: Option<Vec<Tracker>>,
    pub tracker_stats: Option<Vec<TrackerStat>>,
    pub torrent_file: Option<String>,
    pub total_size: Option<i64>,
    pub upload_ratio: Option<f64>,
    pub upload_limit: Option<i64>,
    pub upload_limited: Option<bool>,
    pub uploaded_ever: Option<i64>,
    #[serde(default, deserialize_with = "flag::option_vec")]
    pub wanted: Option<Vec<bool>>,
    pub webseeds: Option<Vec<String>>,
    pub webseeds_sending_to_us: Option<i64>,
}

impl Torrent {
    /// Whether the torrent is doing anything. A snapshot without a status counts as active.
    pub fn is_active(&self) -> bool {
        self.status != Some(TorrentStatus::Stopped)
    }

    /// Whether the daemon reported an error message for this torrent.
    pub fn is_error(&self) -> bool {
        self.error_string.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl PartialEq for Torrent {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.magnet_link == other.magnet_link
    }
}

impl Eq for Torrent {}

impl Hash for Torrent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.magnet_link.hash(state);
    }
}

/// A file inside a torrent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct File {
    pub name: String,
    pub length: i64,
    pub bytes_completed: i64,
}

/// Transfer state of a file inside a torrent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FileStat {
    pub bytes_completed: i64,
    pub priority: i64,
    #[serde(deserialize_with = "flag::deserialize")]
    pub wanted: bool,
}

/// A connected peer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,
    pub client_name: String,
    pub client_is_choked: bool,
    pub client_is_interested: bool,
    pub flag_str: String,
    pub is_downloading_from: bool,
    pub is_encrypted: bool,
    pub is_incoming: bool,
    #[serde(rename = "isUTP")]
    pub is_utp: bool,
    pub is_uploading_to: bool,
    pub peer_is_choked: bool,
    pub peer_is_interested: bool,
    pub port: i64,
    pub progress: f64,
    pub rate_to_client: i64,
    pub rate_to_peer: i64,
}

/// How many of the known peers came from each discovery source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeersFrom {
    pub from_cache: i64,
    pub from_dht: i64,
    pub from_incoming: i64,
    pub from_lpd: i64,
    pub from_ltep: i64,
    pub from_pex: i64,
    pub from_tracker: i64,
}

/// A tracker configured on a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,
    pub id: i64,
    pub scrape: String,
    pub tier: i64,
}

/// Announce and scrape statistics for one tracker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub announce: String,
    pub announce_state: i64,
    pub download_count: i64,
    pub has_announced: bool,
    pub has_scraped: bool,
    pub host: String,
    pub id: i64,
    pub is_backup: bool,
    pub last_announce_peer_count: i64,
    pub last_announce_result: String,
    pub last_announce_start_time: i64,
    pub last_announce_succeeded: bool,
    #[serde(deserialize_with = "unix_seconds::deserialize")]
    pub last_announce_time: DateTime<Utc>,
    pub last_announce_timed_out: bool,
    pub last_scrape_result: String,
    pub last_scrape_start_time: i64,
    pub last_scrape_succeeded: bool,
    #[serde(deserialize_with = "unix_seconds::deserialize")]
    pub last_scrape_time: DateTime<Utc>,
    #[serde(deserialize_with = "flag::deserialize")]
    pub last_scrape_timed_out: bool,
    pub leecher_count: i64,
    #[serde(deserialize_with = "unix_seconds::deserialize")]
    pub next_announce_time: DateTime<Utc>,
    #[serde(deserialize_with = "unix_seconds::deserialize")]
    pub next_scrape_time: DateTime<Utc>,
    pub scrape: String,
    pub scrape_state: i64,
    pub seeder_count: i64,
    pub tier: i64,
}
