use rusqlite::{params, Connection, OptionalExtension};

use std::collections::HashMap;
use std::sync::Mutex;

use super::{sanitize_data, unescape_data, Entity, Repository};
use crate::data::{new_entity_id, now, EntityID};
use crate::internal_error::InternalResult;

/// String key-value storage with the shape of browser local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> InternalResult<()>;
}

#[derive(Default, Debug)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>> {
        Ok(self.items.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> InternalResult<()> {
        self.items
            .lock()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueStore for Connection {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>> {
        let value = self
            .query_row(
                "SELECT value FROM kv WHERE key = (?1)",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> InternalResult<()> {
        self.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Keeps each collection as one JSON array under its own key.
pub struct LocalRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    namespace: Option<String>,
}

impl<'a, S: KeyValueStore + ?Sized> LocalRepository<'a, S> {
    pub fn new(store: &'a S) -> LocalRepository<'a, S> {
        LocalRepository {
            store,
            namespace: None,
        }
    }

    /// Prefixes every key, so several users can share one store.
    pub fn namespaced(store: &'a S, namespace: &str) -> LocalRepository<'a, S> {
        LocalRepository {
            store,
            namespace: Some(namespace.to_string()),
        }
    }

    fn key<E: Entity>(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}:{}", namespace, E::COLLECTION),
            None => E::COLLECTION.to_string(),
        }
    }

    fn load<E: Entity>(&self) -> InternalResult<Vec<E>> {
        match self.store.get_item(&self.key::<E>())? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(vec![]),
        }
    }

    fn save<E: Entity>(&self, records: &[E]) -> InternalResult<()> {
        let json = serde_json::to_string(records)?;
        self.store.set_item(&self.key::<E>(), &json)
    }
}

impl<'a, S: KeyValueStore + ?Sized, E: Entity> Repository<E> for LocalRepository<'a, S> {
    fn list(&self) -> InternalResult<Vec<E>> {
        Ok(self.load::<E>()?.into_iter().map(unescape_data).collect())
    }

    fn get(&self, id: EntityID) -> InternalResult<Option<E>> {
        Ok(self
            .load::<E>()?
            .into_iter()
            .find(|record| record.id() == id)
            .map(unescape_data))
    }

    fn create(&self, draft: E::Draft) -> InternalResult<E> {
        let mut records = self.load::<E>()?;
        let record = sanitize_data(E::from_draft(new_entity_id(), now(), draft));

        records.push(record.clone());
        self.save(&records)?;

        Ok(unescape_data(record))
    }

    fn update(&self, id: EntityID, patch: E::Patch) -> InternalResult<Option<E>> {
        let mut records = self.load::<E>()?;

        let record = match records.iter_mut().find(|record| record.id() == id) {
            Some(record) => record,
            None => return Ok(None),
        };
        record.apply(sanitize_data(patch), now());
        let updated = record.clone();

        self.save(&records)?;

        Ok(Some(unescape_data(updated)))
    }

    fn delete(&self, id: EntityID) -> InternalResult<bool> {
        let mut records = self.load::<E>()?;
        records.retain(|record| record.id() != id);
        self.save(&records)?;

        // Reported regardless of whether a record matched.
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::data::{NewNote, Note, NotePatch};
    use crate::store::schema::test_connection;

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "Tom & Jerry".to_string(),
            category: None,
            is_pinned: false,
        }
    }

    #[test]
    fn stores_escaped_text_and_reads_it_back_plain() {
        let store = MemoryStore::default();
        let repository = LocalRepository::new(&store);

        let note: Note = repository.create(new_note("<em>Ideas</em>")).unwrap();
        assert_eq!(note.title, "Ideas");
        assert_eq!(note.content, "Tom & Jerry");

        let raw = store.get_item("notes").unwrap().unwrap();
        assert!(raw.contains("Tom &amp; Jerry"));
        assert!(!raw.contains("<em>"));
    }

    #[test]
    fn lists_in_insertion_order() {
        let store = MemoryStore::default();
        let repository = LocalRepository::new(&store);

        for title in ["first", "second", "third"] {
            let _: Note = repository.create(new_note(title)).unwrap();
        }
        let notes: Vec<Note> = repository.list().unwrap();

        let titles: Vec<&str> = notes.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn unknown_ids_are_tolerated() {
        let store = MemoryStore::default();
        let repository = LocalRepository::new(&store);

        let updated =
            Repository::<Note>::update(&repository, new_entity_id(), NotePatch::default()).unwrap();
        assert_eq!(updated, None);

        assert!(Repository::<Note>::delete(&repository, new_entity_id()).unwrap());
    }

    #[test]
    fn namespaces_keep_users_apart() {
        let connection = test_connection();
        let alice = LocalRepository::namespaced(&connection, "alice");
        let bob = LocalRepository::namespaced(&connection, "bob");

        let note: Note = alice.create(new_note("Private")).unwrap();

        assert_eq!(Repository::<Note>::get(&bob, note.id).unwrap(), None);
        assert_eq!(Repository::<Note>::list(&bob).unwrap(), vec![]);
        assert_eq!(Repository::<Note>::get(&alice, note.id).unwrap(), Some(note));
        assert!(connection.get_item("alice:notes").unwrap().is_some());
    }
}
