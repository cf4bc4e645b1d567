/// Server-assigned identifier shared by every catalog collection.
pub type EntityId = u32;

/// Substituted for a missing or null display name.
pub const UNKNOWN_TITLE: &str = "Unknown";
/// Substituted for a missing or null lowercase attribute (status, species).
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";
/// Substituted when a character has no location object or no location name.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A character record.
///
/// Fields are private so the identifier can never change once constructed.
/// Optional attributes are set through the consuming `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    id: EntityId,
    name: String,
    status: String,
    species: String,
    image: String,
    location_name: String,
    episode_refs: Vec<String>,
}

impl Character {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: UNKNOWN_ATTRIBUTE.to_string(),
            species: UNKNOWN_ATTRIBUTE.to_string(),
            image: String::new(),
            location_name: UNKNOWN_LOCATION.to_string(),
            episode_refs: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_location_name(mut self, location_name: impl Into<String>) -> Self {
        self.location_name = location_name.into();
        self
    }

    pub fn with_episode_refs(mut self, episode_refs: Vec<String>) -> Self {
        self.episode_refs = episode_refs;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    /// Episode URLs in server order.
    pub fn episode_refs(&self) -> &[String] {
        &self.episode_refs
    }
}

/// An episode record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    id: EntityId,
    name: String,
    air_date: String,
    code: String,
    character_refs: Vec<String>,
}

impl Episode {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            air_date: UNKNOWN_TITLE.to_string(),
            code: UNKNOWN_TITLE.to_string(),
            character_refs: Vec::new(),
        }
    }

    pub fn with_air_date(mut self, air_date: impl Into<String>) -> Self {
        self.air_date = air_date.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_character_refs(mut self, character_refs: Vec<String>) -> Self {
        self.character_refs = character_refs;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn air_date(&self) -> &str {
        &self.air_date
    }

    /// Season/episode code such as `S01E01`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn character_refs(&self) -> &[String] {
        &self.character_refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_starts_with_unknown_attributes() {
        let rick = Character::new(1, "Rick");
        assert_eq!(rick.status(), "unknown");
        assert_eq!(rick.species(), "unknown");
        assert_eq!(rick.location_name(), "unknown");
        assert_eq!(rick.image(), "");
        assert!(rick.episode_refs().is_empty());
    }

    #[test]
    fn builder_methods_keep_identifier() {
        let rick = Character::new(1, "Rick")
            .with_status("Alive")
            .with_location_name("Earth");
        assert_eq!(rick.id(), 1);
        assert_eq!(rick.status(), "Alive");
        assert_eq!(rick.location_name(), "Earth");
    }
}
