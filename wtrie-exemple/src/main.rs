use wtrie_core::TrieError;
use wtrie_core::trie::tree::Trie;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An empty trie holds only the sentinel root; payloads are generic,
    // here a plain counter per node.
    let mut trie: Trie<u32> = Trie::new();
    let root = trie.root();

    // Insert a few words. Shared prefixes share nodes: "car" and "cat"
    // split only at their last character.
    for word in ["car", "cat", "cart", "do", "dog"] {
        trie.add_word(root, word)?;
    }
    println!("{} nodes after insertion", trie.node_count());

    // Lookup succeeds only on terminal nodes: "ca" is a stored prefix
    // but not a stored word.
    println!("find 'cat': {:?}", trie.find_word(root, "cat").is_ok());
    println!("find 'ca':  {:?}", trie.find_word(root, "ca").err());

    // Enumerate the symbols that can follow a prefix node.
    let (ca, _) = {
        let (c, _) = trie.find_child(root, 'c')?.ok_or(TrieError::NoSuchNode)?;
        trie.find_child(c, 'a')?.ok_or(TrieError::NoSuchNode)?
    };
    let following: Vec<char> = trie.children(ca)?
        .map(|child| trie.symbol(child))
        .collect::<Result<_, _>>()?;
    println!("after 'ca': {:?}", following);

    // Strict spawning refuses to overwrite an existing child.
    match trie.spawn(true, root, 'c', false, None, false) {
        Ok(_) => println!("Should not happen"),
        Err(err) => println!("strict spawn of 'c' failed as expected: {err}"),
    }

    // Attach a payload to a node and update it in place.
    let end = trie.find_word(root, "dog")?;
    trie.set_meta(end, Some(1))?;
    if let Some(count) = trie.meta_mut(end)? {
        *count += 1;
    }
    println!("payload on 'dog': {:?}", trie.meta(end)?);

    // Removing "do" only clears its terminal flag ("dog" still needs the
    // path); removing "cart" cuts the privately owned 't' node.
    trie.remove_word(root, "do")?;
    println!("after removing 'do', 'dog' found: {}", trie.find_word(root, "dog").is_ok());
    trie.remove_word(root, "cart")?;
    println!("{} nodes after removals", trie.node_count());

    // Depth-first dump of the remaining structure (debugging aid).
    print!("{}", trie.dump()?);

    Ok(())
}
