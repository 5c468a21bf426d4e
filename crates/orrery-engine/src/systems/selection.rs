use crate::api::types::EntityId;

/// Result of a selection toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The panel now shows this entity.
    Opened { entity: EntityId, identifier: String },
    /// The panel closed.
    Closed,
}

/// At most one opened entity. Selecting it again closes it; selecting a
/// different one replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<(EntityId, String)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, entity: EntityId, identifier: &str) -> SelectionChange {
        match &self.current {
            Some((_, open)) if open == identifier => {
                self.current = None;
                SelectionChange::Closed
            }
            _ => {
                self.current = Some((entity, identifier.to_string()));
                SelectionChange::Opened {
                    entity,
                    identifier: identifier.to_string(),
                }
            }
        }
    }

    pub fn clear(&mut self) -> Option<SelectionChange> {
        self.current.take().map(|_| SelectionChange::Closed)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, name)| name.as_str())
    }

    pub fn current_entity(&self) -> Option<EntityId> {
        self.current.as_ref().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identifier_twice_closes() {
        let mut sel = Selection::new();
        sel.toggle(EntityId(3), "mars");
        assert_eq!(sel.toggle(EntityId(3), "mars"), SelectionChange::Closed);
        assert_eq!(sel.current(), None);
    }

    #[test]
    fn different_identifier_replaces() {
        let mut sel = Selection::new();
        sel.toggle(EntityId(3), "mars");
        let change = sel.toggle(EntityId(4), "earth");
        assert_eq!(
            change,
            SelectionChange::Opened { entity: EntityId(4), identifier: "earth".into() }
        );
        assert_eq!(sel.current(), Some("earth"));
        assert_eq!(sel.current_entity(), Some(EntityId(4)));
    }

    #[test]
    fn clear_reports_only_when_open() {
        let mut sel = Selection::new();
        assert_eq!(sel.clear(), None);
        sel.toggle(EntityId(1), "sun");
        assert_eq!(sel.clear(), Some(SelectionChange::Closed));
    }
}
