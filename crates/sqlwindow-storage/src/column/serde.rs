use aligned_vec::{AVec, ConstAlign};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cache-line alignment for numeric column buffers.
pub type A64 = ConstAlign<64>;

const ALIGN: usize = 64;

/// Writes an aligned buffer as a plain sequence.
pub fn serialize_aligned<T, S>(data: &AVec<T, A64>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    data.as_slice().serialize(serializer)
}

pub fn deserialize_aligned<'de, T, D>(deserializer: D) -> Result<AVec<T, A64>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    let values = Vec::<T>::deserialize(deserializer)?;
    Ok(AVec::from_iter(ALIGN, values))
}
