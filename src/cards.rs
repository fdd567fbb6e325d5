use std::fmt;
use std::str::FromStr;

/// Stable card identity. Survives shuffles; the only thing layout and
/// interaction logic look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u32);

impl CardId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardIdParseError {
    #[error("invalid card id: '{0}'")]
    Invalid(String),
}

impl FromStr for CardId {
    type Err = CardIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let digits = t.strip_prefix('#').unwrap_or(t);
        digits.parse::<u32>().map(CardId).map_err(|_| CardIdParseError::Invalid(s.to_string()))
    }
}

/// Opaque handle to a card's face (an asset key, an image path...).
/// The engine carries it around but never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An immutable card: id + display name + front content.
///
/// ```
/// use tarot_fan::cards::{Card, CardId, ContentRef};
///
/// let card = Card::new(CardId::new(0), "The Fool", ContentRef::new("fool.png"));
/// assert_eq!(card.to_string(), "The Fool");
/// assert_eq!(card.id(), CardId::new(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    id: CardId,
    name: String,
    front: ContentRef,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>, front: ContentRef) -> Self {
        Self { id, name: name.into(), front }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn front(&self) -> &ContentRef {
        &self.front
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_id_display_and_from_str() {
        let id = CardId::new(42);
        assert_eq!(id.to_string(), "#42");
        assert_eq!(CardId::from_str("#42").unwrap(), id);
        assert_eq!(CardId::from_str(" 42 ").unwrap(), id);
        assert!(CardId::from_str("forty-two").is_err());
    }

    #[test]
    fn card_accessors() {
        let c = Card::new(CardId::new(7), "The Chariot", ContentRef::new("placeholder.png"));
        assert_eq!(c.id().value(), 7);
        assert_eq!(c.name(), "The Chariot");
        assert_eq!(c.front().as_str(), "placeholder.png");
    }

    #[test]
    fn ids_order_numerically() {
        assert!(CardId::new(3) < CardId::new(21));
    }
}
