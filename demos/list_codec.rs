//! Example: Serializing and Deep Copying Lists with Random References
//!
//! Builds a small chain, writes it to an in-memory stream, reads it back and
//! deep copies it, printing the structure at each step.
//!
//! Run with: `cargo run --example list_codec`

use random_list_codec::config::CodecSettings;
use random_list_codec::utils::init_logging;
use random_list_codec::{BinaryListSerializer, ListSerializer, NodeArena, NodeId, NodeList};
use std::io::Cursor;

fn describe(label: &str, list: &NodeList) {
    println!("{label}:");
    let ids = list.ids();
    let randoms = list.random_indices();
    for (index, (id, random)) in ids.iter().zip(randoms).enumerate() {
        let data = list.get(*id).map(|n| n.data.as_str()).unwrap_or_default();
        match random {
            Some(target) => println!("   [{index}] {data:<8} random -> [{target}]"),
            None => println!("   [{index}] {data:<8} random -> none"),
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = CodecSettings::from_env()?;
    settings.validate_strict()?;
    init_logging(&settings.logging)?;

    println!("=== Random List Codec Demo ===\n");

    // 1. Build a chain: head -> tail, head.random -> tail, middle.random -> itself
    let mut arena = NodeArena::new();
    let head = arena.push_chain(["first", "middle", "last"]);
    let ids: Vec<NodeId> = arena
        .iter(head)
        .map(|step| step.map(|(id, _)| id))
        .collect::<Result<_, _>>()?;
    arena.set_random(ids[0], Some(ids[2]))?;
    arena.set_random(ids[1], Some(ids[1]))?;
    let original = NodeList::new(arena, head);
    describe("1. ORIGINAL", &original);

    // 2. Serialize
    let serializer = BinaryListSerializer::from_settings(&settings);
    let mut stream = Cursor::new(Vec::new());
    serializer.serialize(&original.arena, original.head, &mut stream)?;
    let bytes = stream.get_ref();
    println!("2. SERIALIZED");
    println!("   - Size: {} bytes", bytes.len());
    println!("   - Hex:  {:02X?}", &bytes[..bytes.len().min(24)]);
    println!();

    // 3. Deserialize
    let decoded = serializer.deserialize(&mut stream)?;
    describe("3. DESERIALIZED", &decoded);

    // 4. Deep copy
    let copy = serializer.deep_copy(&original.arena, original.head)?;
    describe("4. DEEP COPY", &copy);

    let same =
        decoded.values() == copy.values() && decoded.random_indices() == copy.random_indices();
    println!("Structures match: {}", if same { "✓ Yes" } else { "✗ No" });

    // 5. Rejecting a corrupt stream
    let corrupt = serializer.deserialize(&mut Cursor::new(vec![0u8; 10]));
    if let Err(e) = corrupt {
        let cause = std::error::Error::source(&e).map(|s| s.to_string());
        println!("Corrupt stream rejected: {e} (cause: {cause:?})");
    }

    Ok(())
}
