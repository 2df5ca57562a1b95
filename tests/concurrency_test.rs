//! Concurrent readers and writers on one shared graph
//!
//! Walks run while other threads connect and delete nodes. Every edge a walk
//! observes must still reference two live nodes at that moment.

use dagger::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn user(id: usize) -> TypedId {
    TypedId::new("user", id.to_string())
}

#[test]
fn test_walks_never_see_dangling_edges() {
    let graph = Graph::new();
    let n = 64;
    for i in 0..n {
        graph.add_node(Node::new(user(i)));
    }

    let done = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let graph = graph.clone();
            thread::spawn(move || {
                for round in 0..200 {
                    let a = user((w * 7 + round) % n);
                    let b = user((w * 13 + round * 3 + 1) % n);
                    graph.add_node(Node::new(b.clone()));
                    // The target may have been deleted by another writer.
                    let _ = graph.connect(&a, &b, "friend", round % 2 == 0);
                    if round % 5 == 0 {
                        graph.del_node(&user((w + round) % n));
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let graph = graph.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut walks = 0usize;
                while !done.load(Ordering::Relaxed) || walks == 0 {
                    for i in 0..n {
                        let store = graph.read();
                        store.edges_from("friend", &user(i), |edge| {
                            assert!(store.has_node(edge.from()));
                            assert!(store.has_node(edge.to()));
                            true
                        });
                        store.edges_to("friend", &user(i), |edge| {
                            assert!(store.has_node(edge.from()));
                            assert!(store.has_node(edge.to()));
                            true
                        });
                    }
                    walks += 1;
                }
                walks
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Relaxed);
    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }

    // Final state is consistent too
    let store = graph.read();
    for edge in store.edges() {
        assert!(store.has_node(edge.from()));
        assert!(store.has_node(edge.to()));
    }
}

#[test]
fn test_mutual_connections_stay_paired() {
    let graph = Graph::new();
    let n = 32;
    for i in 0..n {
        graph.add_node(Node::new(user(i)));
    }

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let graph = graph.clone();
            thread::spawn(move || {
                for i in 0..n {
                    let a = user(i);
                    let b = user((i + t + 1) % n);
                    graph.connect(&a, &b, "friend", true).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(graph.edge_count(), 8 * n * 2);

    // Every node has as many friend edges out as in
    let store = graph.read();
    for i in 0..n {
        let id = user(i);
        let out = store.filter_edges_from("friend", &id, |_| true).len();
        let incoming = store.filter_edges_to("friend", &id, |_| true).len();
        assert_eq!(out, incoming);
    }
}
