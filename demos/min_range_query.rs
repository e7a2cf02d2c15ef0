//! Range-minimum queries across versions.

use perseg::{algebra::Min, PersistentSegmentTree};

fn main() -> anyhow::Result<()> {
    let mut tree = PersistentSegmentTree::new(&[2, 5, 1, 4, 9, 3], Min::<i32>::new())?;

    println!("0, 1: {}", tree.query_current(0, 1)?); // 2
    println!("3, 5: {}", tree.query_current(3, 5)?); // 3
    println!("0, 5: {}", tree.query_current(0, 5)?); // 1

    println!("Updating values...");
    tree.update(1, -3)?; // {2, -3, 1, 4, 9, 3}
    tree.update(4, -1)?; // {2, -3, 1, 4, -1, 3}
    tree.update(5, -11)?; // {2, -3, 1, 4, -1, -11}

    println!("0, 1: {}", tree.query_current(0, 1)?); // -3
    println!("3, 4: {}", tree.query_current(3, 4)?); // -1
    println!("0, 5: {}", tree.query_current(0, 5)?); // -11

    // Version 0 is untouched
    println!("v0 0, 5: {}", tree.query(0, 0, 5)?); // 1

    Ok(())
}
