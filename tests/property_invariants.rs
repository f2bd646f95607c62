use std::collections::BTreeMap;

use proptest::prelude::*;

use roster::{
    record::UserRecord,
    store::{RecordStore, sqlite::SqliteStore},
};

#[derive(Debug, Clone)]
enum Action {
    Upsert { id_idx: u8, name_idx: u8 },
    Delete { id_idx: u8 },
    DeleteAll,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        8 => (0u8..16, 0u8..32).prop_map(|(id_idx, name_idx)| Action::Upsert { id_idx, name_idx }),
        4 => (0u8..16).prop_map(|id_idx| Action::Delete { id_idx }),
        1 => Just(Action::DeleteAll),
    ]
}

fn record_from(id_idx: u8, name_idx: u8) -> UserRecord {
    UserRecord::new(
        format!("id{id_idx}"),
        format!("User{name_idx}"),
        format!("user{name_idx}@x.com"),
        format!("Major{}", name_idx % 4),
    )
}

/// Insertion-ordered reference model mirroring the table contract.
#[derive(Debug, Default)]
struct Model {
    records: BTreeMap<String, UserRecord>,
    order: Vec<String>,
}

impl Model {
    fn upsert(&mut self, record: UserRecord) {
        if !self.records.contains_key(&record.id) {
            self.order.push(record.id.clone());
        }
        self.records.insert(record.id.clone(), record);
    }

    fn delete(&mut self, id: &str) {
        if self.records.remove(id).is_some() {
            self.order.retain(|x| x != id);
        }
    }

    fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    fn snapshot(&self) -> Vec<UserRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }
}

proptest! {
    #[test]
    fn random_sequences_match_insertion_ordered_model(actions in prop::collection::vec(action_strategy(), 1..150)) {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut model = Model::default();

        for action in actions {
            match action {
                Action::Upsert { id_idx, name_idx } => {
                    let record = record_from(id_idx, name_idx);
                    store.upsert(&record).expect("upsert");
                    model.upsert(record);
                }
                Action::Delete { id_idx } => {
                    let id = format!("id{id_idx}");
                    store.delete_by_id(&id).expect("delete");
                    model.delete(&id);
                }
                Action::DeleteAll => {
                    store.delete_all().expect("delete all");
                    model.clear();
                }
            }

            prop_assert_eq!(store.all().expect("scan"), model.snapshot());
        }

        // A scan with no interleaved mutation returns the same ordering.
        let again = store.all().expect("rescan");
        prop_assert_eq!(again, model.snapshot());
    }
}
