/// Extracts the key that a stored value is ordered or hashed by.
///
/// The associative cores store whole values and only ever look at them through this trait, which
/// lets one tree or hash table implementation back both sets (where the value is the key) and maps
/// (where the key is the first half of a pair).
pub trait KeyOf<V> {
    /// The type of key that is extracted.
    type Key;

    /// Returns a reference to the key stored within `value`.
    fn key_of(value: &V) -> &Self::Key;
}

/// Uses the whole value as its own key, for sets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    fn key_of(value: &T) -> &T {
        value
    }
}

/// Uses the first element of a pair as the key, for maps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct First;

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;

    fn key_of(value: &(K, V)) -> &K {
        &value.0
    }
}
