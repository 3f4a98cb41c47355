//! Integration tests for the reactive primitives the wizards are built on

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use stepwise::runtime::ReactiveRuntime;
use stepwise::{Effect, Memo, Signal, Store};

#[test]
fn signal_integration() {
    let runtime = ReactiveRuntime::new();
    let count = Signal::new(&runtime, 0);

    // Test read
    assert_eq!(count.get(), 0);

    // Test write
    count.set(42);
    assert_eq!(count.get(), 42);

    // Test update
    count.update(|n| *n += 10);
    assert_eq!(count.get(), 52);
}

#[test]
fn memo_integration() {
    let runtime = ReactiveRuntime::new();
    let a = Signal::new(&runtime, 5);
    let b = Signal::new(&runtime, 10);

    let sum = Memo::new(&runtime, {
        let a = a.clone();
        let b = b.clone();
        move || a.get() + b.get()
    });

    assert_eq!(sum.get(), 15);

    a.set(20);
    assert_eq!(sum.get(), 30);

    b.set(5);
    assert_eq!(sum.get(), 25);
}

#[test]
fn effect_integration() {
    let runtime = ReactiveRuntime::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let signal = Signal::new(&runtime, 0);

    let _effect = Effect::new(&runtime, {
        let signal = signal.clone();
        move || {
            let _ = signal.get();
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }
    });

    // Effect runs immediately
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    signal.set(1);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn effect_through_memo_reruns_on_source_change() {
    let runtime = ReactiveRuntime::new();
    let position = Signal::new(&runtime, 1u32);
    let is_first = Memo::new(&runtime, {
        let position = position.clone();
        move || position.get() == 1
    });
    let seen = Arc::new(AtomicUsize::new(0));

    let _effect = Effect::new(&runtime, {
        let is_first = is_first.clone();
        let seen = Arc::clone(&seen);
        move || {
            if !is_first.get() {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        }
    });

    position.set(2);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    position.set(1);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn runtimes_are_isolated() {
    let first = ReactiveRuntime::new();
    let second = ReactiveRuntime::new();
    let runs = Arc::new(AtomicUsize::new(0));

    let a = Signal::new(&first, 0);
    let b = Signal::new(&second, 0);

    let _effect = Effect::new(&first, {
        let a = a.clone();
        let runs = Arc::clone(&runs);
        move || {
            let _ = a.get();
            runs.fetch_add(1, Ordering::SeqCst);
        }
    });

    b.set(1);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(second.effect_count(), 0);
    assert_eq!(first.effect_count(), 1);
}

#[test]
fn untracked_reads_do_not_subscribe() {
    let runtime = ReactiveRuntime::new();
    let signal = Signal::new(&runtime, 0);
    let runs = Arc::new(AtomicUsize::new(0));

    let _effect = Effect::new(&runtime, {
        let signal = signal.clone();
        let runs = Arc::clone(&runs);
        move || {
            let _ = signal.get_untracked();
            runs.fetch_add(1, Ordering::SeqCst);
        }
    });

    signal.set(5);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn store_integration() {
    #[derive(Clone, PartialEq, Debug)]
    struct State {
        count: i32,
        name: String,
    }

    let store = Store::new(State {
        count: 0,
        name: "test".to_string(),
    });

    // Test get
    assert_eq!(store.get().count, 0);

    // Test update
    store.update(|state| {
        state.count = 42;
        state.name = "updated".to_string();
    });

    assert_eq!(store.get().count, 42);
    assert_eq!(store.get().name, "updated");

    // Test set
    store.set(State {
        count: 100,
        name: "new".to_string(),
    });

    assert_eq!(store.get().count, 100);
}

#[test]
fn store_subscription() {
    let store = Store::new(0);
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let _subscription = store.subscribe(move |_| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(counter.load(Ordering::SeqCst), 0);

    store.update(|n| *n += 1);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    store.update(|n| *n += 1);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn complex_reactive_chain() {
    let runtime = ReactiveRuntime::new();
    let input = Signal::new(&runtime, 1);

    let doubled = Memo::new(&runtime, {
        let input = input.clone();
        move || input.get() * 2
    });

    let quadrupled = Memo::new(&runtime, {
        let doubled = doubled.clone();
        move || doubled.get() * 2
    });

    assert_eq!(quadrupled.get(), 4);

    input.set(5);
    assert_eq!(quadrupled.get(), 20);
}
