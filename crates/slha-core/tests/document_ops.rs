use slha_core::{canonical_document_hash, Block, Decay, Document, Index};

#[test]
fn block_lookup_is_case_insensitive() {
    let mut doc = Document::new();
    doc.set("hmix", 2, 10.0);
    assert_eq!(doc.get("HMIX", 2), Some(10.0));
    assert_eq!(doc.block("HMix").map(Block::name), Some("HMIX"));
    assert!(doc.get("HMIX", 3).is_none());
    assert!(doc.get("MASS", 25).is_none());
}

#[test]
fn identity_block_seeds_diagonal_and_zeros() {
    let block = Block::identity("usqmix", 6);
    assert_eq!(block.name(), "USQMIX");
    assert_eq!(block.len(), 36);
    for i in 1..=6 {
        for j in 1..=6 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_eq!(block.get((i, j)), Some(expected));
        }
    }
}

#[test]
fn annotations_require_existing_entries() {
    let mut doc = Document::new();
    doc.set("NMIX", (1, 1), 0.98);
    doc.set_annotation("NMIX", (1, 1), "N_11").expect("annotate");
    let entry = doc.block("NMIX").and_then(|b| b.entry((1, 1))).expect("entry");
    assert_eq!(entry.annotation.as_deref(), Some("N_11"));

    let err = doc.set_annotation("NMIX", (5, 5), "missing").unwrap_err();
    assert_eq!(err.info().code, "missing-entry");
    let err = doc.set_scale("MSOFT", 1000.0).unwrap_err();
    assert_eq!(err.info().code, "missing-block");
}

#[test]
fn set_replaces_annotation() {
    let mut block = Block::new("MASS");
    block.set_with_annotation(25, 125.0, "h0");
    block.set(25, 125.5);
    assert_eq!(block.entry(25).and_then(|e| e.annotation.clone()), None);
}

#[test]
fn index_accessors() {
    assert_eq!(Index::scalar().arity(), 0);
    assert_eq!(Index::single(3).as_single(), Some(3));
    assert_eq!(Index::single(3).as_pair(), None);
    assert_eq!(Index::pair(1, 4).as_pair(), Some((1, 4)));
    assert_eq!(Index::pair(1, 4).to_string(), "(1,4)");
    assert!(Index::pair(1, 2) < Index::pair(2, 1));
}

#[test]
fn document_order_is_preserved_but_not_hashed() {
    let mut doc = Document::new();
    doc.set("MODSEL", 1, 1.0);
    doc.set("MASS", 1000022, 97.0);
    doc.insert_decay(1000022, Decay::new(0.0));
    let names: Vec<_> = doc.blocks().map(|b| b.name().to_string()).collect();
    assert_eq!(names, vec!["MODSEL", "MASS"]);

    let mut reordered = Document::new();
    reordered.set("MASS", 1000022, 97.0);
    reordered.set("MODSEL", 1, 1.0);
    reordered.insert_decay(1000022, Decay::new(0.0));

    let a = canonical_document_hash(&doc).expect("hash");
    let b = canonical_document_hash(&doc.clone()).expect("hash");
    let c = canonical_document_hash(&reordered).expect("hash");
    assert_eq!(a, b);
    assert_eq!(a, c);

    reordered.set("MASS", 1000022, -97.0);
    let d = canonical_document_hash(&reordered).expect("hash");
    assert_ne!(a, d);
    assert_eq!(a.len(), 64);
}

#[test]
fn merge_overlays_entries_and_keeps_the_rest() {
    let mut doc = Document::new();
    doc.insert_block(Block::identity("USQMIX", 6).with_scale(Some(467.0)));
    let mut stop = Block::new("usqmix");
    stop.set_with_annotation((3, 6), 0.83, "STOPMIX(1,2)");
    stop.set_label((0, 0), "embedded");

    let merged = doc.merge_block(stop);
    assert_eq!(merged.len(), 36);
    assert_eq!(merged.scale(), Some(467.0));
    assert_eq!(merged.get((3, 6)), Some(0.83));
    assert_eq!(merged.get((1, 1)), Some(1.0));
    assert_eq!(merged.label((0, 0)), Some("embedded"));
    assert_eq!(doc.block_count(), 1);

    doc.merge_block(Block::new("TU").with_scale(Some(1000.0)));
    assert_eq!(doc.block("TU").and_then(Block::scale), Some(1000.0));
}
