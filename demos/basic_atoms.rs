//! Basic atom and computed example

use atomstore::{Atom, Computed};

fn main() {
    println!("=== Basic Atom Example ===\n");

    // Create an atom with initial value
    let count = Atom::new(0);

    // Subscribe to changes
    let subscription = count.subscribe(|value| {
        println!("Count changed to: {value}");
    });

    // Create a derived value over the atom
    let doubled = Computed::new({
        let count = count.clone();
        move || count.get() * 2
    });

    println!("Setting count to 5...");
    count.set(5);
    println!("Doubled: {}", doubled.get());

    println!("Setting count to 10...");
    count.set(10);
    println!("Doubled: {}", doubled.get());

    println!("Unsubscribing, further sets are silent...");
    subscription.unsubscribe();
    count.set(20);
    println!("Final count: {}, doubled: {}", count.get(), doubled.get());
}
