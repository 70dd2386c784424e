// Readers never observe a half-applied lifecycle operation

mod common;

use common::{object, publish_records};
use semstore_engine::VersionStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_readers_see_exactly_one_active_during_publishes() {
    let store = Arc::new(VersionStore::in_memory());
    publish_records(&store, &[object("bo_0", "Zero", &[])], "v0");
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    let versions = store.list_versions();
                    let active = versions.iter().filter(|v| v.is_active).count();
                    let drafts = versions.iter().filter(|v| v.is_draft()).count();
                    assert_eq!(active, 1, "observed {} active versions", active);
                    assert!(drafts <= 1, "observed {} drafts", drafts);
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for i in 1..=20 {
        let id = format!("bo_{}", i);
        publish_records(&store, &[object(&id, "Object", &[])], "next");
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(store.get_active().unwrap().version.to_string(), "1.20.0");
}

#[test]
fn test_concurrent_writers_serialize() {
    let store = Arc::new(VersionStore::in_memory());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..5 {
                    let id = format!("bo_{}_{}", w, i);
                    // Another writer may publish the shared draft first.
                    if let Ok(draft) = store.create_draft(&[object(&id, "Object", &[])]) {
                        let _ = store.publish(&draft.version_id, "concurrent");
                    }
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let versions = store.list_versions();
    assert!(versions.iter().filter(|v| v.is_draft()).count() <= 1);
    assert_eq!(versions.iter().filter(|v| v.is_active).count(), 1);

    let mut numbers: Vec<_> = versions
        .iter()
        .filter(|v| v.was_published())
        .map(|v| v.version)
        .collect();
    let total = numbers.len();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), total, "published version numbers must be unique");
}
