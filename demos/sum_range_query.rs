//! Range sums, a closure-built tree, and the in-place variant side by side.

use perseg::{PersistentSegmentTree, SegmentTree};

fn main() -> anyhow::Result<()> {
    let values = [0, 1, 3, 5, -2, 3];

    let mut versioned = PersistentSegmentTree::from_fn(&values[..], |a: &i32, b: &i32| a + b, 0)?;
    let mut in_place = SegmentTree::from_fn(&values[..], |a: &i32, b: &i32| a + b, 0)?;

    for (left, right) in [(0, 2), (3, 4), (0, 5)] {
        println!("{}, {}: {}", left, right, versioned.query_current(left, right)?);
    }

    println!("Updating values...");
    for (index, value) in [(2, 7), (4, -5), (0, 12)] {
        versioned.update(index, value)?;
        in_place.update(index, value)?;
    }

    for (left, right) in [(0, 2), (3, 4), (0, 5)] {
        println!(
            "{}, {}: {} (in place: {})",
            left,
            right,
            versioned.query_current(left, right)?,
            in_place.query(left, right)?
        );
    }

    for version in 0..versioned.version_count() {
        println!("version {}: {:?}", version, versioned.values(version)?);
    }

    Ok(())
}
