use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-assigned hero identifier.
pub type HeroId = i64;

/// A hero record exchanged with the `api/heroes` resource.
///
/// The `id` is absent until the server assigns one on creation and is never
/// changed afterwards. Fields the client does not model are kept in
/// `attributes` and serialized back unchanged, so a fetched record that is
/// saved without edits produces the same JSON body it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HeroId>,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Hero {
    /// A record carrying only a name, as submitted for creation.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// A persisted record with a known id.
    pub fn with_id(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::named(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_id_before_creation() {
        let body = serde_json::to_value(Hero::named("Storm")).unwrap();
        assert_eq!(body, json!({ "name": "Storm" }));
    }

    #[test]
    fn keeps_unknown_fields_through_a_round_trip() {
        let raw = json!({ "id": 3, "name": "Nightcrawler", "power": "teleport", "rank": 2 });
        let hero: Hero = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(hero.id, Some(3));
        assert_eq!(hero.attributes.get("power"), Some(&json!("teleport")));
        assert_eq!(serde_json::to_value(&hero).unwrap(), raw);
    }
}
