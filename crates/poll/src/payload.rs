use serde::Deserialize;
use speedo_core::{Batch, Result, Sample, SpeedoError};

/// JSON shape returned by the measurement archive:
/// `{"servdata": {"data": [[timestamp, value], ...]}}`.
#[derive(Debug, Deserialize)]
pub struct Payload {
    pub servdata: ServData,
}

#[derive(Debug, Deserialize)]
pub struct ServData {
    pub data: Vec<Entry>,
}

/// One element of the `data` array.  Entries are normally
/// `[timestamp, value]` pairs, but the service occasionally emits a bare
/// number, or a one-element array where the value field went missing —
/// both count as a bare scalar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Pair(f64, f64),
    Short([f64; 1]),
    Scalar(f64),
}

impl Entry {
    fn value(self) -> f64 {
        match self {
            Entry::Pair(_, value) => value,
            Entry::Short([value]) => value,
            Entry::Scalar(value) => value,
        }
    }
}

/// Decode a raw response body into a buffer-ready [`Batch`].
pub fn decode(body: &str) -> Result<Batch> {
    let payload: Payload =
        serde_json::from_str(body).map_err(|e| SpeedoError::Poll(format!("bad payload: {e}")))?;

    let mut entries = payload.servdata.data;
    trim_trailing_zeros(&mut entries);
    Ok(to_batch(entries))
}

/// Drop the zero-valued tail the archive appends while it is still filling
/// the newest buckets, always keeping at least one entry.
fn trim_trailing_zeros(entries: &mut Vec<Entry>) {
    let before = entries.len();
    while entries.len() > 1 && entries.last().is_some_and(|e| e.value() == 0.0) {
        entries.pop();
    }
    if entries.len() < before {
        tracing::debug!(trimmed = before - entries.len(), "trimmed zero tail");
    }
}

/// A payload where every entry carries a timestamp becomes a keyed batch
/// (subject to the buffer's duplicate filtering).  Any bare scalar downgrades
/// the whole payload to unkeyed values in arrival order.
fn to_batch(entries: Vec<Entry>) -> Batch {
    if entries.iter().all(|e| matches!(e, Entry::Pair(..))) {
        Batch::Keyed(
            entries
                .into_iter()
                .map(|e| match e {
                    Entry::Pair(timestamp, value) => Sample::new(timestamp, value),
                    _ => unreachable!(),
                })
                .collect(),
        )
    } else {
        Batch::Unkeyed(entries.into_iter().map(Entry::value).collect())
    }
}
