//! Property tests for the ordering of the all-playlists live query.

use playlist_inventory::{Playlist, RecordStore};
use proptest::prelude::*;

fn names_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9 ]{0,12}", 0..max)
}

proptest! {
    /// Property: the snapshot is sorted by name whatever the insertion order.
    #[test]
    fn all_playlists_sorted_by_name(names in names_strategy(20)) {
        let store = RecordStore::open_in_memory().unwrap();
        for name in &names {
            store
                .insert(&Playlist {
                    name: name.clone(),
                    ..Playlist::default()
                })
                .unwrap();
        }

        let all = store.all_playlists().unwrap().latest().unwrap();
        prop_assert_eq!(all.len(), names.len());

        let mut expected = names.clone();
        expected.sort();
        let actual: Vec<String> = all.into_iter().map(|p| p.name).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: every observer sees the same final snapshot after a burst of writes.
    #[test]
    fn observers_agree_on_final_snapshot(quantities in prop::collection::vec(0u32..5, 1..10)) {
        let store = RecordStore::open_in_memory().unwrap();
        let early = store.all_playlists().unwrap();

        let mut inserted = Vec::new();
        for (n, quantity) in quantities.iter().enumerate() {
            inserted.push(
                store
                    .insert(&Playlist {
                        name: format!("Playlist {n:02}"),
                        quantity: *quantity,
                        ..Playlist::default()
                    })
                    .unwrap(),
            );
        }
        for playlist in &inserted {
            if let Some(sold) = playlist.with_one_less() {
                store.update(&sold).unwrap();
            }
        }

        let late = store.all_playlists().unwrap();
        let early_snapshot = early.latest().unwrap();
        prop_assert_eq!(&early_snapshot, &late.latest().unwrap());
        prop_assert!(early_snapshot
            .iter()
            .zip(&quantities)
            .all(|(p, q)| p.quantity == q.saturating_sub(1)));
    }
}
