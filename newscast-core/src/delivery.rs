// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// What a subscriber queue receives: a produced item or the end-of-stream marker.
///
/// The poison token is a variant of its own rather than a reserved payload
/// value, so no legitimate item can ever be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<T> {
    /// A produced item
    Item(T),
    /// The producer has finished; no further deliveries follow on this queue
    EndOfStream,
}

impl<T> Delivery<T> {
    /// Returns `true` if this is the poison token.
    #[must_use]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Delivery::EndOfStream)
    }

    /// Returns `true` if this carries an item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Delivery::Item(_))
    }

    /// Borrows the carried item, if any.
    #[must_use]
    pub const fn item(&self) -> Option<&T> {
        match self {
            Delivery::Item(item) => Some(item),
            Delivery::EndOfStream => None,
        }
    }

    /// Consumes the delivery, returning the item if there is one.
    pub fn into_item(self) -> Option<T> {
        match self {
            Delivery::Item(item) => Some(item),
            Delivery::EndOfStream => None,
        }
    }

    /// Maps the carried item, leaving the poison token untouched.
    pub fn map<U, F>(self, f: F) -> Delivery<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Delivery::Item(item) => Delivery::Item(f(item)),
            Delivery::EndOfStream => Delivery::EndOfStream,
        }
    }
}

impl<T> From<T> for Delivery<T> {
    fn from(item: T) -> Self {
        Delivery::Item(item)
    }
}

impl<T> From<Delivery<T>> for Option<T> {
    fn from(delivery: Delivery<T>) -> Self {
        delivery.into_item()
    }
}

#[cfg(test)]
mod tests {
    use super::Delivery;

    #[test]
    fn end_of_stream_is_not_an_item() {
        let poison: Delivery<Option<i32>> = Delivery::EndOfStream;
        let empty: Delivery<Option<i32>> = Delivery::Item(None);

        assert!(poison.is_end_of_stream());
        assert!(!empty.is_end_of_stream());
        assert_ne!(poison, empty);
    }

    #[test]
    fn map_preserves_end_of_stream() {
        let item = Delivery::Item(2).map(|v| v * 10);
        let poison = Delivery::<i32>::EndOfStream.map(|v| v * 10);

        assert_eq!(item.into_item(), Some(20));
        assert_eq!(poison.into_item(), None);
    }
}
